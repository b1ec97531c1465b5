// ── Identity ──
//
// The backend hands out ids as JSON numbers on some resources and as
// strings on others. EntityId keeps whichever form arrived so it is sent
// back unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier for any backend entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Numeric(i64),
    Text(String),
}

impl EntityId {
    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

/// Only canonical integers become `Numeric`; `"007"` or `"+5"` stay text
/// so they are sent back exactly as typed.
impl From<String> for EntityId {
    fn from(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => Self::Numeric(n),
            _ => Self::Text(s),
        }
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_deserialize() {
        let n: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(n, EntityId::Numeric(42));

        let t: EntityId = serde_json::from_str("\"65f0c2a1e4\"").unwrap();
        assert_eq!(t, EntityId::Text("65f0c2a1e4".into()));
    }

    #[test]
    fn parsed_ids_display_as_given() {
        let id: EntityId = "42".parse().unwrap();
        assert_eq!(id.as_numeric(), Some(42));
        assert_eq!(id.to_string(), "42");

        let id: EntityId = "shop-a".parse().unwrap();
        assert_eq!(id.to_string(), "shop-a");

        let id: EntityId = "-3".parse().unwrap();
        assert_eq!(id, EntityId::Numeric(-3));
    }

    #[test]
    fn non_canonical_numbers_stay_text() {
        for raw in ["007", "+5", "-0", "00"] {
            let id: EntityId = raw.parse().unwrap();
            assert_eq!(id, EntityId::Text(raw.to_owned()), "{raw}");
            assert_eq!(id.to_string(), raw);
        }
    }
}
