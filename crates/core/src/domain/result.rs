use crate::time::dates::DISPLAY_DATE_FORMAT;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Display-ready view of a [`DrawRecord`](crate::domain::draw::DrawRecord).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedResult {
    pub game: String,
    #[serde(serialize_with = "serialize_display_date")]
    pub date: NaiveDate,
    pub numbers: Vec<String>,
    #[serde(rename = "jackpot")]
    pub jackpot_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winners: Option<u32>,
}

impl FormattedResult {
    /// Multi-line text block used for chat delivery.
    pub fn to_chat_text(&self) -> String {
        let mut text = format!(
            "{}\nDraw Date: {}\nWinning Combination: {}\nJackpot: {}",
            self.game,
            self.date.format(DISPLAY_DATE_FORMAT),
            self.numbers.join("-"),
            self.jackpot_display,
        );
        if let Some(winners) = self.winners {
            text.push_str(&format!("\nWinners: {winners}"));
        }
        text
    }
}

fn serialize_display_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DISPLAY_DATE_FORMAT))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub text: String,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
