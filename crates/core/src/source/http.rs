use crate::config::Settings;
use crate::domain::draw::DrawRecord;
use crate::source::types::DrawsPayload;
use crate::source::DrawSource;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PATH: &str = "/v1/draws";

#[derive(Debug, Clone)]
pub struct HttpJsonDrawSource {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    path: String,
}

impl HttpJsonDrawSource {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_draw_source_base_url()?.to_string();
        let api_key = settings.draw_source_api_key.clone();

        let timeout_secs = std::env::var("DRAW_SOURCE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let path = std::env::var("DRAW_SOURCE_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());

        Self::new(base_url, api_key, path, Duration::from_secs(timeout_secs))
    }

    pub fn new(
        base_url: String,
        api_key: Option<String>,
        path: String,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build draw source http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
            path,
        })
    }

    fn url(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        }
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl DrawSource for HttpJsonDrawSource {
    fn source_name(&self) -> &'static str {
        "external_http_json"
    }

    async fn fetch_draws(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DrawRecord>> {
        let res = self
            .http
            .get(self.url())
            .headers(self.headers()?)
            .query(&[("start_date", start.to_string()), ("end_date", end.to_string())])
            .send()
            .await
            .context("draw source request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read draw source response")?;

        parse_response(status, &text)
    }
}

fn parse_response(status: StatusCode, text: &str) -> Result<Vec<DrawRecord>> {
    // Nothing published for the window yet.
    if status == StatusCode::NOT_FOUND {
        tracing::debug!("draw source returned 404; treating as no results yet");
        return Ok(Vec::new());
    }

    if !status.is_success() {
        anyhow::bail!("draw source HTTP {status}: {text}");
    }

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let payload = serde_json::from_str::<DrawsPayload>(text)
        .with_context(|| format!("draw source response is not a valid draws payload: {text}"))?;
    Ok(payload.into_draws())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(base_url: &str, path: &str) -> HttpJsonDrawSource {
        HttpJsonDrawSource::new(
            base_url.to_string(),
            Some("secret".to_string()),
            path.to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn joins_base_url_and_path() {
        assert_eq!(
            source("https://draws.example.com/", "v1/draws").url(),
            "https://draws.example.com/v1/draws"
        );
        assert_eq!(
            source("https://draws.example.com", "/draws").url(),
            "https://draws.example.com/draws"
        );
    }

    #[test]
    fn sends_api_key_header() {
        let headers = source("https://draws.example.com", "/draws").headers().unwrap();
        assert_eq!(headers.get("x-api-key").unwrap(), "secret");
    }

    #[test]
    fn not_found_and_empty_body_mean_no_results_yet() {
        assert!(parse_response(StatusCode::NOT_FOUND, "").unwrap().is_empty());
        assert!(parse_response(StatusCode::OK, "  ").unwrap().is_empty());
        assert!(parse_response(StatusCode::OK, "[]").unwrap().is_empty());
    }

    #[test]
    fn server_errors_and_garbage_fail() {
        assert!(parse_response(StatusCode::BAD_GATEWAY, "upstream down").is_err());
        assert!(parse_response(StatusCode::OK, "<html>").is_err());
    }

    #[test]
    fn parses_draws() {
        let body = json!({
            "draws": [{
                "game": "Ultra Lotto 6/58",
                "date": "2022-08-12",
                "numbers": "05-14-22-37-41-58",
                "jackpot": "49,500,000.00",
                "winners": 0,
            }]
        })
        .to_string();
        let draws = parse_response(StatusCode::OK, &body).unwrap();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].game, "Ultra Lotto 6/58");
        assert_eq!(draws[0].jackpot.centavos(), 4_950_000_000);
    }
}
