use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub const PESO_SIGN: char = '₱';

/// Prize amount held exactly, in centavos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Jackpot {
    centavos: u64,
}

impl Jackpot {
    pub fn from_centavos(centavos: u64) -> Self {
        Self { centavos }
    }

    pub fn centavos(&self) -> u64 {
        self.centavos
    }

    /// Parses amounts like `49500000`, `49,500,000.00` or `₱ 49,500,000.5`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let cleaned: String = s
            .trim()
            .trim_start_matches(PESO_SIGN)
            .trim_start_matches("PHP")
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        if cleaned.is_empty() {
            return Err(format!("empty jackpot amount: {s:?}"));
        }

        let (whole, frac) = match cleaned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (cleaned.as_str(), ""),
        };

        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) || frac.len() > 2 {
            return Err(format!("invalid jackpot amount: {s:?}"));
        }

        let whole: u64 = whole
            .parse()
            .map_err(|_| format!("jackpot amount too large: {s:?}"))?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().unwrap_or(0) * 10,
            _ => frac.parse::<u64>().unwrap_or(0),
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Self::from_centavos)
            .ok_or_else(|| format!("jackpot amount too large: {s:?}"))
    }

    fn from_f64(v: f64) -> Result<Self, String> {
        if !v.is_finite() || v < 0.0 {
            return Err(format!("invalid jackpot amount: {v}"));
        }
        let centavos = (v * 100.0).round();
        if centavos > u64::MAX as f64 {
            return Err(format!("jackpot amount too large: {v}"));
        }
        Ok(Self::from_centavos(centavos as u64))
    }

    /// `49,500,000.00`, optionally prefixed with the peso sign.
    pub fn display(&self, peso_sign: bool) -> String {
        let grouped = group_thousands(self.centavos / 100);
        let frac = self.centavos % 100;
        if peso_sign {
            format!("{PESO_SIGN}{grouped}.{frac:02}")
        } else {
            format!("{grouped}.{frac:02}")
        }
    }
}

impl fmt::Display for Jackpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(false))
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl Serialize for Jackpot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display(false))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JackpotWire {
    Int(u64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Jackpot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JackpotWire::deserialize(deserializer)? {
            JackpotWire::Int(n) => n
                .checked_mul(100)
                .map(Self::from_centavos)
                .ok_or_else(|| de::Error::custom(format!("jackpot amount too large: {n}"))),
            JackpotWire::Float(v) => Self::from_f64(v).map_err(de::Error::custom),
            JackpotWire::Text(s) => Self::parse(&s).map_err(de::Error::custom),
        }
    }
}
