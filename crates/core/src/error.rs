use crate::time::dates::ALLOWED_DAYS;
use chrono::NaiveDate;
use thiserror::Error;

/// Failures a results query can end in. "No results yet" is not one of them.
#[derive(Error, Debug)]
pub enum ResultError {
    #[error("cannot parse {field}: expected YYYY/MM/DD")]
    InvalidDateFormat { field: &'static str },

    #[error("end_date {end} is before start_date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid day name: {day}")]
    InvalidDayName { day: String },

    #[error("invalid boolean for {field}: {value}")]
    InvalidFlag { field: &'static str, value: String },

    #[error("missing required parameter: {field}")]
    MissingParameter { field: &'static str },

    #[error("upstream fetch failed: {0:#}")]
    Upstream(anyhow::Error),
}

impl ResultError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Upstream(_))
    }

    /// Short message for the failure body.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidDateFormat { field } => format!("Invalid {field} parameter"),
            Self::InvalidDateRange { .. } => "Invalid date range".to_string(),
            Self::InvalidDayName { day } => format!("Invalid '{day}' day in days parameter"),
            Self::InvalidFlag { field, .. } => format!("Invalid {field} parameter"),
            Self::MissingParameter { field } => format!("Missing {field} parameter"),
            Self::Upstream(_) => "Failed to fetch lotto results".to_string(),
        }
    }

    /// Detail string naming the offending parameter.
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidDateFormat { field } => {
                format!("Cannot parse {field}. Make sure it uses the format: YYYY/MM/DD")
            }
            Self::InvalidDateRange { start, end } => format!(
                "end_date ({}) must not be before start_date ({}).",
                end.format("%Y/%m/%d"),
                start.format("%Y/%m/%d")
            ),
            Self::InvalidDayName { day } => format!(
                "Only allowed days: {}. '{day}' is not in the list.",
                ALLOWED_DAYS.join(", ")
            ),
            Self::InvalidFlag { field, value } => {
                format!("Cannot parse {field} value '{value}'. Use true or false.")
            }
            Self::MissingParameter { field } => format!("The {field} parameter is required."),
            Self::Upstream(_) => {
                "The results source could not be reached. Please try again later.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_failure_names_the_bad_value() {
        let err = ResultError::InvalidDayName { day: "Xyz".to_string() };
        assert!(err.is_validation());
        assert_eq!(err.message(), "Invalid 'Xyz' day in days parameter");
        assert!(err.detail().contains("'Xyz' is not in the list"));
        assert!(err.detail().contains("Mon, Tue, Wed, Thu, Fri, Sat, Sun"));
    }

    #[test]
    fn date_failure_names_the_field() {
        let err = ResultError::InvalidDateFormat { field: "end_date" };
        assert_eq!(err.message(), "Invalid end_date parameter");
        assert!(err.detail().starts_with("Cannot parse end_date."));
    }

    #[test]
    fn upstream_is_not_validation_and_hides_cause() {
        let err = ResultError::Upstream(anyhow::anyhow!("connection refused at 10.0.0.1"));
        assert!(!err.is_validation());
        assert!(!err.detail().contains("10.0.0.1"));
        assert!(err.to_string().contains("connection refused"));
    }
}
