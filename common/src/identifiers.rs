use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($($name:ident),+) => {
        $(
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(String);

            impl $name {
                pub fn new(id: String) -> Self {
                    Self(id)
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl From<String> for $name {
                fn from(s: String) -> Self {
                    Self(s)
                }
            }

            impl From<&str> for $name {
                fn from(s: &str) -> Self {
                    Self(s.to_string())
                }
            }

            impl From<$name> for String {
                fn from(id: $name) -> Self {
                    id.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )+
    };
}

string_id!(UserId, PlayerId, EntryId, AuthToken);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = PlayerId::new("active-1".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"active-1\"");
        let parsed: UserId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(parsed.as_str(), "7");
    }

    #[test]
    fn test_display_matches_inner_value() {
        let token = AuthToken::from("abc");
        assert_eq!(token.to_string(), "abc");
        assert_eq!(String::from(token), "abc");
    }
}
