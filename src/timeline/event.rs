// src/timeline/event.rs
// Timeline event types and their prompt rendering

use serde::Deserialize;
use serde_json::Value;

/// Default description for tickets created without one
pub const DEFAULT_DESCRIPTION: &str = "N/A";
/// Default issue type for tickets created without one
pub const DEFAULT_ISSUE_TYPE: &str = "task";
/// Default priority for tickets created without one
pub const DEFAULT_PRIORITY: i64 = 2;

/// One record of the chronological timeline.
///
/// Discriminated by the `type` field. Unrecognized types land in
/// [`Event::Other`] so a timeline with new event kinds still loads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "message")]
    Message(MessageEvent),
    #[serde(rename = "bead_created")]
    BeadCreated(BeadCreated),
    /// Fields are never read, so they are not checked either
    #[serde(rename = "bead_closed")]
    BeadClosed {},
    #[serde(other)]
    Other,
}

/// A message typed by the user
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageEvent {
    pub content: String,
}

/// A ticket (bead) opened in the issue tracker
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BeadCreated {
    pub id: String,
    pub title: String,
    // Display-only fields: any scalar the tracker wrote is rendered as-is
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub issue_type: Option<Value>,
    #[serde(default)]
    pub priority: Option<Value>,
}

impl Event {
    /// Render this event as a prompt line, or `None` if it carries nothing
    /// worth briefing on.
    ///
    /// Closed tickets are always skipped: the creation event already holds
    /// everything the briefing needs.
    pub fn format(&self) -> Option<String> {
        match self {
            Event::Message(msg) => Some(format!("[USER MESSAGE] {}", msg.content)),
            Event::BeadCreated(bead) => Some(bead.format()),
            Event::BeadClosed {} | Event::Other => None,
        }
    }

    /// Whether the formatter keeps this event
    pub fn is_useful(&self) -> bool {
        self.format().is_some()
    }
}

impl BeadCreated {
    fn format(&self) -> String {
        format!(
            "[TICKET CREATED] {}: {}\n  Description: {}\n  Type: {} | Priority: {}",
            self.id,
            self.title,
            display(&self.description, DEFAULT_DESCRIPTION),
            display(&self.issue_type, DEFAULT_ISSUE_TYPE),
            display(&self.priority, &DEFAULT_PRIORITY.to_string()),
        )
    }
}

/// Strings verbatim, other values as JSON text; absent or null takes `default`
fn display(value: &Option<Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Event {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_message_format() {
        let event = parse(json!({"type": "message", "content": "Use dark mode"}));
        assert_eq!(event.format().unwrap(), "[USER MESSAGE] Use dark mode");
    }

    #[test]
    fn test_bead_created_full() {
        let event = parse(json!({
            "type": "bead_created",
            "id": "B1",
            "title": "Add login",
            "description": "OAuth only",
            "issue_type": "feature",
            "priority": 1
        }));
        assert_eq!(
            event.format().unwrap(),
            "[TICKET CREATED] B1: Add login\n  Description: OAuth only\n  Type: feature | Priority: 1"
        );
    }

    #[test]
    fn test_bead_created_defaults() {
        let event = parse(json!({"type": "bead_created", "id": "B2", "title": "Refactor"}));
        let line = event.format().unwrap();
        assert!(line.contains("Description: N/A"));
        assert!(line.contains("Type: task | Priority: 2"));
    }

    #[test]
    fn test_bead_created_null_fields_take_defaults() {
        let event = parse(json!({
            "type": "bead_created",
            "id": "B3",
            "title": "Docs",
            "description": null,
            "priority": null
        }));
        let line = event.format().unwrap();
        assert!(line.contains("Description: N/A"));
        assert!(line.ends_with("Priority: 2"));
    }

    #[test]
    fn test_string_priority_rendered_verbatim() {
        let event = parse(json!({"type": "bead_created", "id": "B4", "title": "t", "priority": "P0"}));
        assert!(event.format().unwrap().ends_with("Priority: P0"));
    }

    #[test]
    fn test_bead_closed_skipped() {
        let event = parse(json!({"type": "bead_closed", "id": "x"}));
        assert!(matches!(event, Event::BeadClosed {}));
        assert!(event.format().is_none());
        assert!(!event.is_useful());
    }

    #[test]
    fn test_bead_closed_fields_not_checked() {
        let events: Vec<Event> = serde_json::from_value(json!([
            {"type": "message", "content": "ship it"},
            {"type": "bead_closed", "id": 42, "reason": {"code": 7}},
            {"type": "bead_closed"}
        ]))
        .unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events.iter().filter(|e| e.is_useful()).count(), 1);
    }

    #[test]
    fn test_non_string_display_fields_rendered() {
        let event = parse(json!({
            "type": "bead_created",
            "id": "B6",
            "title": "Numbers",
            "description": 5,
            "issue_type": true,
            "priority": 0
        }));
        assert_eq!(
            event.format().unwrap(),
            "[TICKET CREATED] B6: Numbers\n  Description: 5\n  Type: true | Priority: 0"
        );
    }

    #[test]
    fn test_unknown_type_skipped() {
        let event = parse(json!({"type": "commit", "sha": "abc123", "content": "ignored"}));
        assert_eq!(event, Event::Other);
        assert!(event.format().is_none());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let event = parse(json!({"type": "message", "content": "hi", "timestamp": "2025-01-01T00:00:00Z"}));
        assert!(event.is_useful());
    }

    #[test]
    fn test_message_without_content_is_rejected() {
        let result = serde_json::from_value::<Event>(json!({"type": "message"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let result = serde_json::from_value::<Event>(json!({"content": "orphan"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_format_is_idempotent() {
        let event = parse(json!({"type": "bead_created", "id": "B5", "title": "Same", "priority": 3}));
        assert_eq!(event.format(), event.format());
    }
}
