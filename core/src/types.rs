//! Domain types for the per-user todo list.
//!
//! # Design
//! `Todo` is the stored entity and doubles as the flat field set of the HAL
//! item representation, so its serde names are the wire names (`targetDate`
//! in camelCase). `NewTodo` is the already-validated creation input; the
//! store never sees a request that is missing required data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store. Unique across all users; allocated ids
/// are always positive.
pub type TodoId = i64;

/// A single todo item owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub user: String,
    pub desc: String,
    pub target_date: Option<DateTime<Utc>>,
    pub done: bool,
}

/// Input for `TodoStore::add`. The identifier is always chosen by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub user: String,
    pub desc: String,
    pub target_date: Option<DateTime<Utc>>,
    pub done: bool,
}

impl NewTodo {
    pub fn new(user: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            desc: desc.into(),
            target_date: None,
            done: false,
        }
    }

    pub fn target_date(mut self, target_date: Option<DateTime<Utc>>) -> Self {
        self.target_date = target_date;
        self
    }

    pub fn done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn todo_serializes_with_wire_names() {
        let todo = Todo {
            id: 7,
            user: "Jack".to_string(),
            desc: "Test".to_string(),
            target_date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
            done: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["user"], "Jack");
        assert_eq!(json["desc"], "Test");
        assert_eq!(json["targetDate"], "2024-05-01T12:00:00Z");
        assert_eq!(json["done"], false);
        assert!(json.get("target_date").is_none());
    }

    #[test]
    fn missing_target_date_serializes_as_null() {
        let todo = Todo {
            id: 1,
            user: "Jill".to_string(),
            desc: "No date".to_string(),
            target_date: None,
            done: true,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json["targetDate"].is_null());
    }

    #[test]
    fn new_todo_builder_defaults() {
        let input = NewTodo::new("Jack", "Walk dog");
        assert_eq!(input.user, "Jack");
        assert!(input.target_date.is_none());
        assert!(!input.done);
        assert!(input.done(true).done);
    }
}
