use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day's score as the score API reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub date: String,
    pub score: u8,
}

/// A daily score, always within `Score::MIN..=Score::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Parses the raw value of the score input field.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| format!("score must be a whole number, got '{}'", raw.trim()))?;
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| format!("score must be between {} and {}", Self::MIN, Self::MAX))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("date must be a calendar date (YYYY-MM-DD), got '{}'", raw.trim()))
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[derive(Debug, Serialize)]
pub struct SubmitScoreRequest {
    pub date: String,
    pub score: Score,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateTokenResponse {
    pub username: String,
}

/// Error body the score API attaches to rejected requests.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Raw score form fields; both are kept as typed so a failed submit can
/// re-render exactly what the user entered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub score: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
}
