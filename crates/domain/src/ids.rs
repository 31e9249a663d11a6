use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque string-backed identifiers.
///
/// Record and user ids are assigned outside this crate (by the document store
/// and the identity provider), so none of these can be minted here.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Storage-assigned record key
define_id!(CharacterId);

// Identity-provider user id
define_id!(UserId);

// List row key for weapons, armor, trappings, spells and prayers
define_id!(ItemKey);

impl ItemKey {
    /// Key stamped from the creation instant (milliseconds since the epoch).
    ///
    /// Two rows created in the same millisecond share a key; the key is only
    /// used to tell rows apart when rendering, never for lookup.
    pub fn stamped(now: DateTime<Utc>) -> Self {
        Self(now.timestamp_millis().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = CharacterId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");

        let back: CharacterId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn item_key_uses_epoch_millis() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let key = ItemKey::stamped(now);
        assert_eq!(key.as_str(), now.timestamp_millis().to_string());
    }
}
