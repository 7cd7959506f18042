use lotto_core::error::ResultError;

/// Raw query pairs. Keys may repeat (`days=Sun&days=Mon`) and list values may also be
/// comma separated (`days=Sun, Mon`).
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    fn values(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Last value given for `key`.
    pub fn single(&self, key: &str) -> Option<&str> {
        self.values(key).into_iter().last()
    }

    pub fn required(&self, key: &'static str) -> Result<String, ResultError> {
        self.single(key)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or(ResultError::MissingParameter { field: key })
    }

    /// `None` when the key is absent or holds only blanks.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        let items: Vec<String> = self
            .values(key)
            .into_iter()
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if items.is_empty() {
            None
        } else {
            Some(items)
        }
    }

    pub fn flag(&self, key: &'static str, default: bool) -> Result<bool, ResultError> {
        let Some(raw) = self.single(key) else {
            return Ok(default);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ResultError::InvalidFlag {
                field: key,
                value: raw.to_string(),
            }),
        }
    }
}
