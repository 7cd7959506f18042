pub mod domain;
pub mod error;
pub mod results;
pub mod source;
pub mod time;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub draw_source_base_url: Option<String>,
        pub draw_source_api_key: Option<String>,
        pub draw_source_fixture: Option<String>,
        pub utc_offset_hours: i32,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let utc_offset_hours = match std::env::var("LOTTO_UTC_OFFSET_HOURS") {
                Ok(v) => v
                    .trim()
                    .parse::<i32>()
                    .with_context(|| format!("LOTTO_UTC_OFFSET_HOURS is not an integer: {v}"))?,
                Err(_) => DEFAULT_UTC_OFFSET_HOURS,
            };
            anyhow::ensure!(
                (-12..=14).contains(&utc_offset_hours),
                "LOTTO_UTC_OFFSET_HOURS out of range: {utc_offset_hours}"
            );

            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                draw_source_base_url: std::env::var("DRAW_SOURCE_BASE_URL").ok(),
                draw_source_api_key: std::env::var("DRAW_SOURCE_API_KEY").ok(),
                draw_source_fixture: std::env::var("DRAW_SOURCE_FIXTURE")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                utc_offset_hours,
            })
        }

        pub fn require_draw_source_base_url(&self) -> anyhow::Result<&str> {
            self.draw_source_base_url
                .as_deref()
                .context("DRAW_SOURCE_BASE_URL is required")
        }
    }
}
