//! Keyed buffer of in-progress ticket edits.
//!
//! The buffer is never the source of truth. Nothing in it reaches the
//! backend until a save hands a draft off for persistence.

use std::collections::HashMap;

/// An editable free-text field of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditField {
    /// The response shown to the client.
    #[default]
    Response,
    /// Internal notes.
    InsideInfo,
}

impl EditField {
    /// All editable fields in form order.
    pub const ALL: [EditField; 2] = [EditField::Response, EditField::InsideInfo];

    /// The form label for this field.
    pub fn label(&self) -> &'static str {
        match self {
            EditField::Response => "Response",
            EditField::InsideInfo => "Inside info",
        }
    }

    /// The next field in form order, wrapping around.
    pub fn next(&self) -> EditField {
        match self {
            EditField::Response => EditField::InsideInfo,
            EditField::InsideInfo => EditField::Response,
        }
    }
}

/// A partial record of edits for one activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    /// Edited response, if touched.
    pub response: Option<String>,
    /// Edited inside info, if touched.
    pub inside_info: Option<String>,
}

impl EditDraft {
    /// Get the buffered value of a field.
    pub fn get(&self, field: EditField) -> Option<&str> {
        match field {
            EditField::Response => self.response.as_deref(),
            EditField::InsideInfo => self.inside_info.as_deref(),
        }
    }

    /// Set one field, leaving the other untouched.
    pub fn set(&mut self, field: EditField, value: String) {
        match field {
            EditField::Response => self.response = Some(value),
            EditField::InsideInfo => self.inside_info = Some(value),
        }
    }

    /// Whether no field has been touched.
    pub fn is_empty(&self) -> bool {
        self.response.is_none() && self.inside_info.is_none()
    }
}

/// Drafts keyed by activity id.
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    drafts: HashMap<String, EditDraft>,
}

impl EditBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke's result for one field of one activity.
    pub fn set_field(&mut self, id: &str, field: EditField, value: String) {
        self.drafts.entry(id.to_string()).or_default().set(field, value);
    }

    /// Get the draft for an activity.
    pub fn draft(&self, id: &str) -> Option<&EditDraft> {
        self.drafts.get(id)
    }

    /// Get a buffered field value.
    pub fn field(&self, id: &str, field: EditField) -> Option<&str> {
        self.drafts.get(id).and_then(|d| d.get(field))
    }

    /// Drop the draft for one activity.
    pub fn discard(&mut self, id: &str) {
        self.drafts.remove(id);
    }

    /// Drop every draft.
    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    /// Number of activities with unsaved edits.
    pub fn len(&self) -> usize {
        self.drafts.values().filter(|d| !d.is_empty()).count()
    }

    /// Whether no activity has unsaved edits.
    pub fn is_empty(&self) -> bool {
        self.drafts.values().all(EditDraft::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field_creates_draft() {
        let mut buffer = EditBuffer::new();
        buffer.set_field("a", EditField::Response, "hello".to_string());

        assert_eq!(buffer.field("a", EditField::Response), Some("hello"));
        assert_eq!(buffer.field("a", EditField::InsideInfo), None);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_set_field_preserves_sibling() {
        let mut buffer = EditBuffer::new();
        buffer.set_field("a", EditField::Response, "reply".to_string());
        buffer.set_field("a", EditField::InsideInfo, "note".to_string());
        buffer.set_field("a", EditField::Response, "reply 2".to_string());

        let draft = buffer.draft("a").unwrap();
        assert_eq!(draft.response.as_deref(), Some("reply 2"));
        assert_eq!(draft.inside_info.as_deref(), Some("note"));
    }

    #[test]
    fn test_drafts_are_isolated_by_key() {
        let mut buffer = EditBuffer::new();
        buffer.set_field("b", EditField::Response, "b reply".to_string());
        let before = buffer.draft("b").cloned();

        buffer.set_field("a", EditField::Response, "a reply".to_string());
        buffer.set_field("a", EditField::InsideInfo, "a note".to_string());

        assert_eq!(buffer.draft("b").cloned(), before);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_discard_and_clear() {
        let mut buffer = EditBuffer::new();
        buffer.set_field("a", EditField::Response, "x".to_string());
        buffer.set_field("b", EditField::Response, "y".to_string());

        buffer.discard("a");
        assert!(buffer.draft("a").is_none());
        assert!(!buffer.is_empty());

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_field_next_wraps() {
        assert_eq!(EditField::Response.next(), EditField::InsideInfo);
        assert_eq!(EditField::InsideInfo.next(), EditField::Response);
    }
}
