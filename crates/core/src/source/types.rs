use crate::domain::draw::DrawRecord;
use serde::Deserialize;

/// Accepted upstream payloads: `{"draws": [...]}` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DrawsPayload {
    Wrapped { draws: Vec<DrawRecord> },
    Bare(Vec<DrawRecord>),
}

impl DrawsPayload {
    pub fn into_draws(self) -> Vec<DrawRecord> {
        match self {
            Self::Wrapped { draws } => draws,
            Self::Bare(draws) => draws,
        }
    }
}
