use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::id::string_or_number;
use super::offer::{Person, Rating};

pub type ReviewAuthor = Person;

/// A guest review of an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub user: ReviewAuthor,
    #[serde(default)]
    pub rating: Rating,
    pub comment: String,
    /// Decoding rejects anything that is not a real calendar date.
    #[serde(
        deserialize_with = "deserialize_review_date",
        serialize_with = "serialize_review_date"
    )]
    pub date: DateTime<Utc>,
}

impl Review {
    /// Display label such as `MAY 2019`.
    pub fn date_label(&self) -> String {
        self.date.format("%B %Y").to_string().to_uppercase()
    }

    /// Machine-readable date, e.g. `2019-05-08`.
    pub fn date_attr(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub(crate) fn parse_review_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_review_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_review_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid review date '{raw}'")))
}

fn serialize_review_date<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Minimum and maximum comment length accepted by the backend.
pub const COMMENT_MIN_CHARS: usize = 50;
pub const COMMENT_MAX_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewDraftError {
    #[error("Rating must be between 1 and 5, got {0}")]
    Rating(u8),

    #[error("Comment must be {min}..={max} characters, got {actual}")]
    CommentLength {
        min: usize,
        max: usize,
        actual: usize,
    },
}

/// A review the signed-in user is about to post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDraft {
    pub comment: String,
    pub rating: u8,
}

impl ReviewDraft {
    pub fn new(comment: impl Into<String>, rating: u8) -> Result<Self, ReviewDraftError> {
        let draft = Self {
            comment: comment.into(),
            rating,
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn validate(&self) -> Result<(), ReviewDraftError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ReviewDraftError::Rating(self.rating));
        }
        let length = self.comment.trim().chars().count();
        if !(COMMENT_MIN_CHARS..=COMMENT_MAX_CHARS).contains(&length) {
            return Err(ReviewDraftError::CommentLength {
                min: COMMENT_MIN_CHARS,
                max: COMMENT_MAX_CHARS,
                actual: length,
            });
        }
        Ok(())
    }
}
