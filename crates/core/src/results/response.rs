use crate::domain::result::{ChatMessage, FormattedResult};
use crate::error::ResultError;
use serde::Serialize;

pub const RESULTS_UNAVAILABLE: &str =
    "Sorry, results are not available yet. Please check again later.";

/// What a query produced: structured results, or the same results as chat messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSet {
    Structured(Vec<FormattedResult>),
    Chat(Vec<ChatMessage>),
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Structured(r) => r.is_empty(),
            Self::Chat(m) => m.is_empty(),
        }
    }
}

/// JSON body returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Results {
        success: bool,
        message: String,
        results: Vec<FormattedResult>,
    },
    Messages {
        #[serde(skip_serializing_if = "Option::is_none")]
        success: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        messages: Vec<ChatMessage>,
    },
    Unavailable {
        success: bool,
        message: String,
    },
    Failure {
        success: bool,
        message: String,
        detail: String,
    },
}

impl ResponseBody {
    pub fn failure(err: &ResultError) -> Self {
        Self::Failure {
            success: false,
            message: err.message(),
            detail: err.detail(),
        }
    }
}

impl From<ResultSet> for ResponseBody {
    fn from(set: ResultSet) -> Self {
        match set {
            ResultSet::Structured(results) if results.is_empty() => Self::Unavailable {
                success: false,
                message: RESULTS_UNAVAILABLE.to_string(),
            },
            ResultSet::Structured(results) => Self::Results {
                success: true,
                message: "ok".to_string(),
                results,
            },
            ResultSet::Chat(messages) if messages.is_empty() => Self::Messages {
                success: Some(false),
                message: Some(RESULTS_UNAVAILABLE.to_string()),
                messages: vec![ChatMessage::new(RESULTS_UNAVAILABLE)],
            },
            ResultSet::Chat(messages) => Self::Messages {
                success: None,
                message: None,
                messages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_chat_carries_unavailable_message() {
        let body = ResponseBody::from(ResultSet::Chat(vec![]));
        let v = serde_json::to_value(body).unwrap();
        assert_eq!(v["messages"], json!([{ "text": RESULTS_UNAVAILABLE }]));
        assert_eq!(v["success"], json!(false));
    }

    #[test]
    fn chat_body_is_only_messages() {
        let body = ResponseBody::from(ResultSet::Chat(vec![ChatMessage::new("EZ2")]));
        let v = serde_json::to_value(body).unwrap();
        assert_eq!(v, json!({ "messages": [{ "text": "EZ2" }] }));
    }

    #[test]
    fn empty_structured_is_unavailable() {
        let v = serde_json::to_value(ResponseBody::from(ResultSet::Structured(vec![]))).unwrap();
        assert_eq!(v, json!({ "success": false, "message": RESULTS_UNAVAILABLE }));
    }

    #[test]
    fn failure_names_the_parameter() {
        let err = ResultError::InvalidDateFormat { field: "start_date" };
        let v = serde_json::to_value(ResponseBody::failure(&err)).unwrap();
        assert_eq!(v["success"], json!(false));
        assert_eq!(v["message"], json!("Invalid start_date parameter"));
        assert!(v["detail"].as_str().unwrap().contains("start_date"));
    }
}
