//! Typed views of backend payloads.
//!
//! The backend owns its JSON schemas; this layer only names the fields it
//! actually reads (`User.id` for the connections lookup, `Connection.topic`
//! for rendering) and keeps everything else in a flattened `extra` bag so
//! no contract is over-specified client-side. Lifecycle command results
//! stay raw `serde_json::Value` — they pass straight through to the view.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A message/data topic identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(pub String);

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Topic {
    fn from(s: &str) -> Self {
        Topic(s.to_string())
    }
}

/// A user record from the paginated listing or a per-topic lookup.
///
/// Only `id` is required — it feeds the connections endpoint. The backend
/// sends numeric ids; they are normalized to strings on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Best label for table output: `name`, then `screenName`, then the id.
    pub fn display_name(&self) -> &str {
        for key in ["name", "screenName", "screen_name"] {
            if let Some(Value::String(s)) = self.extra.get(key) {
                return s;
            }
        }
        &self.id
    }
}

/// An association between a user and a topic.
///
/// Shape is backend-defined; `topic` and `user` are surfaced when present
/// for rendering, the rest rides along untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An ad suggestion from the backend's query surface.
///
/// Entirely backend-defined; `name` is surfaced when present for table
/// output, everything else rides along in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ad {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept a JSON string or number and store it as a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_accepts_numeric_id() {
        let user: User = serde_json::from_str(r#"{"id": 42, "name": "Ada"}"#).unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn user_accepts_string_id() {
        let user: User = serde_json::from_str(r#"{"id": "u42"}"#).unwrap();
        assert_eq!(user.id, "u42");
        assert_eq!(user.display_name(), "u42");
    }

    #[test]
    fn user_preserves_unknown_fields() {
        let user: User =
            serde_json::from_str(r#"{"id": 1, "followers": 900, "verified": true}"#).unwrap();
        assert_eq!(user.extra["followers"], 900);
        assert_eq!(user.extra["verified"], true);
    }

    #[test]
    fn connection_tolerates_arbitrary_shape() {
        let conn: Connection =
            serde_json::from_str(r#"{"topic": "rust", "weight": 3}"#).unwrap();
        assert_eq!(conn.topic.as_deref(), Some("rust"));
        assert_eq!(conn.extra["weight"], 3);
    }

    #[test]
    fn ad_tolerates_arbitrary_shape() {
        let ad: Ad = serde_json::from_str(r#"{"name": "Crates Weekly", "budget": 12.5}"#).unwrap();
        assert_eq!(ad.name.as_deref(), Some("Crates Weekly"));
        assert_eq!(ad.extra["budget"], 12.5);
    }

    #[test]
    fn topic_is_a_transparent_string() {
        let topics: Vec<Topic> = serde_json::from_str(r#"["alpha", "beta"]"#).unwrap();
        assert_eq!(topics, vec![Topic::from("alpha"), Topic::from("beta")]);
    }
}
