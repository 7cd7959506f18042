use crate::domain::result::{ChatMessage, FormattedResult};
use crate::error::ResultError;
use crate::results::chunk::chunk_messages;
use crate::results::filter::{filter_records, FilterCriteria};
use crate::results::format::format_results;
use crate::results::response::ResultSet;
use crate::source::DrawSource;
use crate::time::dates::{local_today, parse_query_date, utc_offset, DateWindow};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::sync::Arc;

/// Chat chunk width for the "latest" window.
pub const LATEST_CHAT_WIDTH: usize = 650;
/// Chat chunk width for single-day windows.
pub const DAY_CHAT_WIDTH: usize = 500;

/// Windows anchored on the current local date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeWindow {
    Today,
    Yesterday,
    Latest,
}

impl RelativeWindow {
    pub fn resolve(self, today: NaiveDate) -> DateWindow {
        match self {
            Self::Today => DateWindow::today(today),
            Self::Yesterday => DateWindow::yesterday(today),
            Self::Latest => DateWindow::default_window(today),
        }
    }

    pub fn chat_width(self) -> usize {
        match self {
            Self::Today | Self::Yesterday => DAY_CHAT_WIDTH,
            Self::Latest => LATEST_CHAT_WIDTH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Latest => "latest",
        }
    }
}

/// Unvalidated input for an explicit date range.
#[derive(Debug, Clone, Default)]
pub struct RangeQuery {
    pub start_date: String,
    pub end_date: String,
    pub days: Option<Vec<String>>,
    pub games: Option<Vec<String>>,
    pub peso_sign: bool,
}

pub struct ResultService {
    source: Arc<dyn DrawSource>,
    offset: FixedOffset,
    clock: fn() -> DateTime<Utc>,
}

impl ResultService {
    pub fn new(source: Arc<dyn DrawSource>, utc_offset_hours: i32) -> anyhow::Result<Self> {
        Ok(Self {
            source,
            offset: utc_offset(utc_offset_hours)?,
            clock: Utc::now,
        })
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn source_name(&self) -> &'static str {
        self.source.source_name()
    }

    pub fn today(&self) -> NaiveDate {
        local_today((self.clock)(), &self.offset)
    }

    /// Results in `start_date..=end_date`, optionally narrowed by weekday and game.
    ///
    /// All parameters are validated before the source is contacted.
    pub async fn results_by_range(
        &self,
        query: RangeQuery,
    ) -> Result<Vec<FormattedResult>, ResultError> {
        let start = parse_query_date(&query.start_date, "start_date")?;
        let end = parse_query_date(&query.end_date, "end_date")?;
        let window = DateWindow::new(start, end)?;
        let criteria = FilterCriteria::new(window, query.days, query.games)?;
        self.fetch_formatted(&criteria, query.peso_sign).await
    }

    pub async fn results_today(
        &self,
        games: Option<Vec<String>>,
        peso_sign: bool,
    ) -> Result<Vec<FormattedResult>, ResultError> {
        self.results_relative(RelativeWindow::Today, games, peso_sign)
            .await
    }

    pub async fn results_yesterday(
        &self,
        games: Option<Vec<String>>,
        peso_sign: bool,
    ) -> Result<Vec<FormattedResult>, ResultError> {
        self.results_relative(RelativeWindow::Yesterday, games, peso_sign)
            .await
    }

    /// Three days before today through today.
    pub async fn results_default_window(
        &self,
        games: Option<Vec<String>>,
        peso_sign: bool,
    ) -> Result<Vec<FormattedResult>, ResultError> {
        self.results_relative(RelativeWindow::Latest, games, peso_sign)
            .await
    }

    pub async fn results_relative(
        &self,
        window: RelativeWindow,
        games: Option<Vec<String>>,
        peso_sign: bool,
    ) -> Result<Vec<FormattedResult>, ResultError> {
        let dates = window.resolve(self.today());
        let criteria = FilterCriteria::new(dates, None, games)?;
        self.fetch_formatted(&criteria, peso_sign).await
    }

    /// Relative-window results in the requested shape. Chat mode uses the window's
    /// chunk width.
    pub async fn relative_result_set(
        &self,
        window: RelativeWindow,
        games: Option<Vec<String>>,
        peso_sign: bool,
        chat: bool,
    ) -> Result<ResultSet, ResultError> {
        let results = self.results_relative(window, games, peso_sign).await?;
        if chat {
            Ok(ResultSet::Chat(chat_messages(
                &results,
                Some(window.chat_width()),
            )))
        } else {
            Ok(ResultSet::Structured(results))
        }
    }

    async fn fetch_formatted(
        &self,
        criteria: &FilterCriteria,
        peso_sign: bool,
    ) -> Result<Vec<FormattedResult>, ResultError> {
        let window = criteria.window;
        let records = self
            .source
            .fetch_draws(window.start, window.end)
            .await
            .map_err(|e| {
                tracing::error!(
                    source = self.source.source_name(),
                    start = %window.start,
                    end = %window.end,
                    error = %e,
                    "draw source fetch failed"
                );
                ResultError::Upstream(e)
            })?;

        let fetched = records.len();
        let kept = filter_records(records, criteria);
        tracing::info!(
            start = %window.start,
            end = %window.end,
            fetched,
            kept = kept.len(),
            "filtered draw results"
        );

        Ok(format_results(kept, peso_sign))
    }
}

/// Joins results with blank lines and splits the text into chat-sized messages.
///
/// `width: None` spreads the text over roughly nine messages.
pub fn chat_messages(results: &[FormattedResult], width: Option<usize>) -> Vec<ChatMessage> {
    let text = results
        .iter()
        .map(FormattedResult::to_chat_text)
        .collect::<Vec<_>>()
        .join("\n\n");
    chunk_messages(&text, width)
}
