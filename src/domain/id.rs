use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque offer identifier taken verbatim from the route.
///
/// Older backends send numeric ids, newer ones send strings; both decode
/// into the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct OfferId(String);

impl OfferId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OfferId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OfferId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<OfferId> for String {
    fn from(id: OfferId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

impl From<RawId> for OfferId {
    fn from(raw: RawId) -> Self {
        Self(raw.into())
    }
}

/// Accepts either a JSON string or a JSON integer and yields a `String`.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numeric_and_text_ids() {
        let numeric: OfferId = serde_json::from_str("42").unwrap();
        let text: OfferId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(numeric, text);
        assert_eq!(numeric.as_str(), "42");
    }

    #[test]
    fn serializes_as_string() {
        let id = OfferId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }
}
