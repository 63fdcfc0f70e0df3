use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories suggested by task forms. Any other string is accepted as well;
/// an absent category means "uncategorized".
pub const TASK_CATEGORIES: [&str; 8] = [
    "Personal", "Work", "Health", "Learning", "Shopping", "Travel", "Finance", "Other",
];

/// Priority levels, ordered `low < medium < high`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(AppError::invalid_input(format!("unknown priority '{other}'"))),
        }
    }
}

/// A single trackable to-do item. The serialized field names follow the
/// stored wire format, so `created_at` round-trips as `createdAt`. Absent
/// `dueDate` and `category` are omitted from the stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Priority, TASK_CATEGORIES, Task};
    use std::str::FromStr;

    #[test]
    fn priority_orders_high_over_medium_over_low() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::High.rank(), 3);
        assert_eq!(Priority::Medium.rank(), 2);
        assert_eq!(Priority::Low.rank(), 1);
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!(Priority::from_str("High").unwrap(), Priority::High);
        assert_eq!(Priority::from_str(" low ").unwrap(), Priority::Low);
        assert_eq!(Priority::from_str("urgent").unwrap_err().code(), "invalid_input");
    }

    #[test]
    fn task_serializes_with_wire_field_names() {
        let task = Task {
            id: "task-1".to_string(),
            title: "demo".to_string(),
            description: String::new(),
            completed: false,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            due_date: Some("2026-01-02T00:00:00Z".to_string()),
            priority: Priority::High,
            category: Some("Work".to_string()),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["createdAt"], "2026-01-01T00:00:00Z");
        assert_eq!(json["dueDate"], "2026-01-02T00:00:00Z");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["category"], "Work");
    }

    #[test]
    fn task_omits_absent_optional_fields() {
        let task = Task {
            id: "task-1".to_string(),
            title: "demo".to_string(),
            description: String::new(),
            completed: false,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            due_date: None,
            priority: Priority::Medium,
            category: None,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("dueDate").is_none());
        assert!(json.get("category").is_none());
    }

    #[test]
    fn task_deserializes_missing_fields_to_defaults() {
        let json = r#"{"id":"task-1","title":"demo","createdAt":"2026-01-01T00:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.description, "");
        assert!(!task.completed);
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.category, None);
    }

    #[test]
    fn suggested_categories_cover_the_fixed_set() {
        assert_eq!(TASK_CATEGORIES.len(), 8);
        assert!(TASK_CATEGORIES.contains(&"Personal"));
        assert!(TASK_CATEGORIES.contains(&"Other"));
    }
}
