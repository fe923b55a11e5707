//! Story payloads exchanged with the Story API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Request payload for creating or editing a story spoiler.
///
/// The server validates the fields; an empty title or description is rejected
/// with `400 Bad Request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDraft {
    /// Story title.
    pub title: String,
    /// Spoiler text.
    pub description: String,
    /// Optional link to an image; omitted from the JSON when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl StoryDraft {
    /// Creates a draft without a URL.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: None,
        }
    }

    /// Sets the URL (builder pattern).
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Response envelope returned by the story endpoints.
///
/// Field names are matched case-insensitively, so `msg`, `Msg`, `storyId`
/// and `storyid` all parse. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// Human-readable confirmation or error message.
    pub msg: String,
    /// Identifier of the created story, present only on creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_id: Option<String>,
}

impl ApiResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON object.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Looks up `key` in a JSON object.
///
/// An exact key match wins; otherwise the first key equal to `key` ignoring
/// ASCII case is used.
#[must_use]
pub fn lookup_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

fn into_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl<'de> Deserialize<'de> for ApiResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let text = |key: &str| lookup_field(&fields, key).cloned().and_then(into_text);

        Ok(Self {
            msg: text("msg").unwrap_or_default(),
            story_id: text("storyId"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_draft_omits_missing_url() {
        let draft = StoryDraft::new("New Spoiler Title", "A short spoiler description.");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "New Spoiler Title",
                "description": "A short spoiler description."
            })
        );

        let json = serde_json::to_value(draft.with_url("")).unwrap();
        assert_eq!(json["url"], "");
    }

    #[test]
    fn test_envelope_is_case_insensitive() {
        let parsed =
            ApiResponse::from_body(r#"{"Msg":"Successfully created!","StoryId":"42a"}"#).unwrap();
        assert_eq!(parsed.msg, "Successfully created!");
        assert_eq!(parsed.story_id.as_deref(), Some("42a"));

        let parsed = ApiResponse::from_body(r#"{"msg":"ok","storyid":"b7"}"#).unwrap();
        assert_eq!(parsed.story_id.as_deref(), Some("b7"));
    }

    #[test]
    fn test_envelope_nulls_and_extras() {
        let parsed =
            ApiResponse::from_body(r#"{"msg":"Deleted successfully!","storyId":null,"x":1}"#)
                .unwrap();
        assert_eq!(
            parsed,
            ApiResponse {
                msg: "Deleted successfully!".to_string(),
                story_id: None,
            }
        );
        assert_eq!(ApiResponse::from_body("{}").unwrap(), ApiResponse::default());
    }

    #[test]
    fn test_exact_key_wins_over_case_variant() {
        let parsed =
            ApiResponse::from_body(r#"{"storyid":"lower","storyId":"exact","STORYID":"upper"}"#)
                .unwrap();
        assert_eq!(parsed.story_id.as_deref(), Some("exact"));

        let object: Map<String, Value> =
            serde_json::from_str(r#"{"MSG":"shouted","other":1}"#).unwrap();
        assert_eq!(lookup_field(&object, "msg"), Some(&Value::from("shouted")));
        assert_eq!(lookup_field(&object, "storyId"), None);
    }

    #[test]
    fn test_envelope_rejects_non_object() {
        assert!(ApiResponse::from_body("[]").is_err());
        assert!(ApiResponse::from_body("").is_err());
    }

    #[test]
    fn test_envelope_write_omits_null_id() {
        let json = serde_json::to_string(&ApiResponse {
            msg: "m".to_string(),
            story_id: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"msg":"m"}"#);
    }
}
