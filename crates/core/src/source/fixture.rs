use crate::domain::draw::DrawRecord;
use crate::source::types::DrawsPayload;
use crate::source::DrawSource;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

/// Draws held in memory, usually loaded from a JSON file once at startup.
#[derive(Debug, Clone, Default)]
pub struct FixtureDrawSource {
    draws: Vec<DrawRecord>,
}

impl FixtureDrawSource {
    pub fn new(draws: Vec<DrawRecord>) -> Self {
        Self { draws }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read draw fixture {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid draw fixture {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let payload = serde_json::from_str::<DrawsPayload>(text)?;
        Ok(Self::new(payload.into_draws()))
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

#[async_trait::async_trait]
impl DrawSource for FixtureDrawSource {
    fn source_name(&self) -> &'static str {
        "fixture"
    }

    async fn fetch_draws(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DrawRecord>> {
        Ok(self
            .draws
            .iter()
            .filter(|d| start <= d.date && d.date <= end)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> FixtureDrawSource {
        let body = json!([
            { "game": "EZ2", "date": "2022-08-10", "numbers": [3, 17], "jackpot": 4000 },
            { "game": "EZ2", "date": "2022-08-11", "numbers": [8, 21], "jackpot": 4000 },
            { "game": "Swertres", "date": "2022-08-12", "numbers": [1, 4, 9], "jackpot": 4500 },
        ])
        .to_string();
        FixtureDrawSource::from_json(&body).unwrap()
    }

    #[tokio::test]
    async fn serves_only_the_window() {
        let source = fixture();
        assert_eq!(source.len(), 3);

        let d = |day| NaiveDate::from_ymd_opt(2022, 8, day).unwrap();
        let draws = source.fetch_draws(d(11), d(12)).await.unwrap();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].date, d(11));

        assert!(source.fetch_draws(d(13), d(13)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let err = FixtureDrawSource::from_path("/nonexistent/draws.json")
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read draw fixture"));
    }
}
