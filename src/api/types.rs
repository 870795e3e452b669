//! Backend data types.
//!
//! These types map to the JSON payloads of the client-activity endpoints.
//! Unknown fields returned by the backend are ignored.

use serde::{Deserialize, Deserializer, Serialize};

use crate::state::EditDraft;

/// A client activity / ticket record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Opaque identifier. Numeric ids are accepted and kept as text.
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    /// The client this activity belongs to.
    #[serde(default, alias = "client")]
    pub client_name: Option<String>,
    /// Short description of the activity.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the activity has been paid.
    #[serde(default)]
    pub paid: bool,
    /// Response sent to the client.
    #[serde(default)]
    pub response: Option<String>,
    /// Internal notes.
    #[serde(default)]
    pub inside_info: Option<String>,
    /// Creation timestamp as sent by the backend.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Activity {
    /// Create an activity with only the required fields set.
    #[cfg(test)]
    pub fn new(id: impl Into<String>, paid: bool) -> Self {
        Self {
            id: id.into(),
            client_name: None,
            description: None,
            paid,
            response: None,
            inside_info: None,
            created_at: None,
        }
    }

    /// Display name for the client, falling back to a placeholder.
    pub fn client_display(&self) -> &str {
        self.client_name.as_deref().unwrap_or("(no client)")
    }

    /// The stored response, or an empty string.
    pub fn response_text(&self) -> &str {
        self.response.as_deref().unwrap_or("")
    }

    /// The stored inside info, or an empty string.
    pub fn inside_info_text(&self) -> &str {
        self.inside_info.as_deref().unwrap_or("")
    }
}

/// Body of a paid-flag update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaidUpdate {
    /// The new paid value.
    pub paid: bool,
}

/// Body of a ticket field update. Only touched fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdate {
    /// New response text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// New inside info text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inside_info: Option<String>,
}

impl ActivityUpdate {
    /// Whether the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.response.is_none() && self.inside_info.is_none()
    }
}

impl From<EditDraft> for ActivityUpdate {
    fn from(draft: EditDraft) -> Self {
        Self {
            response: draft.response,
            inside_info: draft.inside_info,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_deserialize_camel_case() {
        let json = r#"{
            "id": "a1",
            "clientName": "Acme",
            "paid": true,
            "response": "Done",
            "insideInfo": "called twice",
            "extra": 42
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();

        assert_eq!(activity.id, "a1");
        assert_eq!(activity.client_display(), "Acme");
        assert!(activity.paid);
        assert_eq!(activity.response_text(), "Done");
        assert_eq!(activity.inside_info_text(), "called twice");
    }

    #[test]
    fn test_activity_numeric_id() {
        let activity: Activity = serde_json::from_str(r#"{"id": 17}"#).unwrap();
        assert_eq!(activity.id, "17");
        assert!(!activity.paid);
        assert_eq!(activity.response_text(), "");
    }

    #[test]
    fn test_activity_underscore_id_alias() {
        let activity: Activity =
            serde_json::from_str(r#"{"_id": "64f0", "paid": false}"#).unwrap();
        assert_eq!(activity.id, "64f0");
    }

    #[test]
    fn test_paid_update_body() {
        let body = serde_json::to_value(PaidUpdate { paid: true }).unwrap();
        assert_eq!(body, serde_json::json!({ "paid": true }));
    }

    #[test]
    fn test_activity_update_skips_untouched_fields() {
        let update = ActivityUpdate {
            response: None,
            inside_info: Some("note".to_string()),
        };
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, serde_json::json!({ "insideInfo": "note" }));
    }

    #[test]
    fn test_activity_update_from_draft() {
        let draft = EditDraft {
            response: Some("reply".to_string()),
            inside_info: None,
        };
        let update = ActivityUpdate::from(draft);
        assert_eq!(update.response.as_deref(), Some("reply"));
        assert!(update.inside_info.is_none());
        assert!(!update.is_empty());
    }
}
