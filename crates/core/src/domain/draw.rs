use crate::domain::jackpot::Jackpot;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One game's draw for one date, as supplied by the upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub game: String,
    pub date: NaiveDate,
    #[serde(deserialize_with = "deserialize_numbers")]
    pub numbers: Vec<String>,
    pub jackpot: Jackpot,
    #[serde(default)]
    pub winners: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumbersWire {
    List(Vec<NumberToken>),
    Joined(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberToken {
    Int(u64),
    Text(String),
}

// Upstreams disagree on the shape: `[4, 18, 22]`, `["04", "18"]` or `"04-18-22"`.
fn deserialize_numbers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let numbers = match NumbersWire::deserialize(deserializer)? {
        NumbersWire::List(tokens) => tokens
            .into_iter()
            .map(|t| match t {
                NumberToken::Int(n) => n.to_string(),
                NumberToken::Text(s) => s.trim().to_string(),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        NumbersWire::Joined(s) => s
            .split('-')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect(),
    };
    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_integer_and_string_numbers() {
        let v = json!({
            "game": "Lotto 6/42",
            "date": "2022-08-12",
            "numbers": [4, "18", " 22 "],
            "jackpot": 5_940_000,
        });
        let record: DrawRecord = serde_json::from_value(v).unwrap();
        assert_eq!(record.numbers, vec!["4", "18", "22"]);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2022, 8, 12).unwrap());
        assert_eq!(record.winners, None);
    }

    #[test]
    fn splits_dash_joined_combination() {
        let v = json!({
            "game": "Superlotto 6/49",
            "date": "2022-08-11",
            "numbers": "02-11-19-33-40-45",
            "jackpot": "₱ 16,000,000.00",
            "winners": 0,
        });
        let record: DrawRecord = serde_json::from_value(v).unwrap();
        assert_eq!(record.numbers.len(), 6);
        assert_eq!(record.numbers[0], "02");
        assert_eq!(record.jackpot, Jackpot::from_centavos(1_600_000_000));
        assert_eq!(record.winners, Some(0));
    }

    #[test]
    fn rejects_non_iso_date() {
        let v = json!({
            "game": "EZ2",
            "date": "08/12/2022",
            "numbers": [1, 2],
            "jackpot": 4000,
        });
        assert!(serde_json::from_value::<DrawRecord>(v).is_err());
    }
}
