use serde::{Deserialize, Serialize};

/// The full ordered set of tasks. Insertion order is both the persisted
/// order and the display order.
pub type Collection = Vec<Task>;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier, generated at creation
    pub id: String,
    /// Free text shown in the list (the `task` form field)
    #[serde(rename = "task")]
    pub description: String,
    /// Completion flag, carried on the wire as `"true"` / `"false"`
    #[serde(with = "done_flag")]
    pub done: bool,
}

impl Task {
    pub fn new(id: String, description: String, done: bool) -> Self {
        Task {
            id,
            description,
            done,
        }
    }

    /// The literal persisted for the `done` column
    pub fn done_str(&self) -> &'static str {
        done_flag::as_str(self.done)
    }
}

/// Serde adapter keeping `done` as the lowercase string the CSV file uses.
pub mod done_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn as_str(done: bool) -> &'static str {
        if done { "true" } else { "false" }
    }

    /// Case-insensitive: files written by older versions carry `True`/`False`.
    /// Anything that is not some spelling of "true" reads as not done.
    pub fn parse(value: &str) -> bool {
        value.trim().eq_ignore_ascii_case("true")
    }

    pub fn serialize<S: Serializer>(done: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(as_str(*done))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Bool(bool),
            Text(String),
        }

        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => b,
            Flag::Text(s) => parse(&s),
        })
    }
}

/// Position of a task by id
pub fn position_of(tasks: &[Task], id: &str) -> Option<usize> {
    tasks.iter().position(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn done_serializes_as_string() {
        let task = Task::new("a1".into(), "Buy milk".into(), true);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["done"], "true");
        assert_eq!(json["task"], "Buy milk");
        assert_eq!(json["id"], "a1");
    }

    #[test]
    fn done_deserializes_from_string_or_bool() {
        let from_str: Task =
            serde_json::from_str(r#"{"id":"a","task":"x","done":"false"}"#).unwrap();
        assert!(!from_str.done);
        let from_bool: Task = serde_json::from_str(r#"{"id":"a","task":"x","done":true}"#).unwrap();
        assert!(from_bool.done);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert!(done_flag::parse("true"));
        assert!(done_flag::parse("True"));
        assert!(done_flag::parse(" TRUE "));
        assert!(!done_flag::parse("false"));
        assert!(!done_flag::parse("yes"));
        assert!(!done_flag::parse(""));
    }

    #[test]
    fn position_by_id() {
        let tasks = vec![
            Task::new("a".into(), "A".into(), false),
            Task::new("b".into(), "B".into(), true),
        ];
        assert_eq!(position_of(&tasks, "b"), Some(1));
        assert!(position_of(&tasks, "zzz").is_none());
    }
}
