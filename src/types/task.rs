//! The [`Task`] record.
//!
//! A `Task` is a plain immutable value: four fields, structural equality,
//! and defaults for every field. Positional construction with trailing
//! defaults is expressed with `From` impls on tuples of arity 0 to 4, in the
//! field order `(summary, owner, done, id)`.

use serde::{Deserialize, Serialize};

/// One task's descriptive fields.
///
/// Fields are read through accessors and never mutated in place. The
/// `with_*` methods return a modified copy.
///
/// # Defaults
///
/// | Field     | Default |
/// |-----------|---------|
/// | `summary` | `None`  |
/// | `owner`   | `None`  |
/// | `done`    | `false` |
/// | `id`      | `None`  |
///
/// # Examples
///
/// ```
/// use tasks::Task;
///
/// assert_eq!(Task::new(), Task::from_parts(None, None, false, None));
///
/// let t = Task::from(("buy oat milk", "brian"));
/// assert_eq!(t.summary(), Some("buy oat milk"));
/// assert_eq!(t.owner(), Some("brian"));
/// assert!(!t.done());
/// assert_eq!(t.id(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    summary: Option<String>,
    owner: Option<String>,
    done: bool,
    id: Option<u64>,
}

impl Task {
    /// Creates a record with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record from all four fields, in positional order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasks::Task;
    ///
    /// let t = Task::from_parts(Some("sweep".to_string()), None, true, Some(7));
    /// assert_eq!(t.summary(), Some("sweep"));
    /// assert_eq!(t.owner(), None);
    /// assert!(t.done());
    /// assert_eq!(t.id(), Some(7));
    /// ```
    pub fn from_parts(
        summary: Option<String>,
        owner: Option<String>,
        done: bool,
        id: Option<u64>,
    ) -> Self {
        Self {
            summary,
            owner,
            done,
            id,
        }
    }

    /// Short description of the task.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Who the task is assigned to.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Whether the task is finished.
    pub fn done(&self) -> bool {
        self.done
    }

    /// Identifier assigned by a store, if any.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Returns a copy with `summary` replaced.
    #[must_use]
    pub fn with_summary(self, summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..self
        }
    }

    /// Returns a copy with `owner` replaced.
    #[must_use]
    pub fn with_owner(self, owner: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            ..self
        }
    }

    /// Returns a copy with `done` replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasks::Task;
    ///
    /// let open = Task::from(("do something", "okken"));
    /// let closed = open.clone().with_done(true);
    /// assert!(!open.done());
    /// assert!(closed.done());
    /// assert_eq!(open.summary(), closed.summary());
    /// ```
    #[must_use]
    pub fn with_done(self, done: bool) -> Self {
        Self { done, ..self }
    }

    /// Returns a copy with `id` replaced.
    #[must_use]
    pub fn with_id(self, id: u64) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

impl From<()> for Task {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl<S> From<(S,)> for Task
where
    S: Into<String>,
{
    fn from((summary,): (S,)) -> Self {
        Self::new().with_summary(summary)
    }
}

impl<S, O> From<(S, O)> for Task
where
    S: Into<String>,
    O: Into<String>,
{
    fn from((summary, owner): (S, O)) -> Self {
        Self::new().with_summary(summary).with_owner(owner)
    }
}

impl<S, O> From<(S, O, bool)> for Task
where
    S: Into<String>,
    O: Into<String>,
{
    fn from((summary, owner, done): (S, O, bool)) -> Self {
        Self::from((summary, owner)).with_done(done)
    }
}

impl<S, O> From<(S, O, bool, u64)> for Task
where
    S: Into<String>,
    O: Into<String>,
{
    fn from((summary, owner, done, id): (S, O, bool, u64)) -> Self {
        Self::from((summary, owner, done)).with_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn defaults() {
        let t1 = Task::new();
        let t2 = Task::from_parts(None, None, false, None);
        assert_eq!(t1, t2);
        assert_eq!(Task::from(()), t1);
    }

    #[test]
    fn member_access() {
        let t = Task::from(("buy oat milk", "brian"));
        assert_eq!(t.summary(), Some("buy oat milk"));
        assert_eq!(t.owner(), Some("brian"));
        assert_eq!((t.done(), t.id()), (false, None));
    }

    #[test]
    fn trailing_positions_take_defaults() {
        let t = Task::from(("write report",));
        assert_eq!(t.summary(), Some("write report"));
        assert_eq!(t.owner(), None);

        let t = Task::from(("write report", "okken", true));
        assert!(t.done());
        assert_eq!(t.id(), None);

        let t = Task::from(("write report", "okken", true, 42));
        assert_eq!(t.id(), Some(42));
    }

    #[test]
    fn equality_is_structural() {
        let a = Task::from(("x", String::from("y"), false, 3));
        let b = Task::from_parts(Some("x".into()), Some("y".into()), false, Some(3));
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_done(true));

        let set: HashSet<Task> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn with_methods_leave_original_untouched() {
        let original = Task::from(("feed cat", "brian"));
        let changed = original.clone().with_owner("okken").with_id(9);
        assert_eq!(original.owner(), Some("brian"));
        assert_eq!(original.id(), None);
        assert_eq!(changed.owner(), Some("okken"));
        assert_eq!(changed.id(), Some(9));
        assert_eq!(changed.summary(), original.summary());
    }

    #[test]
    fn deserialize_fills_missing_fields_with_defaults() {
        let t: Task = serde_json::from_str(r#"{"summary": "buy oat milk"}"#).unwrap();
        assert_eq!(t, Task::from(("buy oat milk",)));

        let t: Task = serde_json::from_str("{}").unwrap();
        assert_eq!(t, Task::new());
    }

    #[test]
    fn serialize_uses_field_names() {
        let json = serde_json::to_value(Task::from(("a", "b", true, 1))).unwrap();
        assert_eq!(json["summary"], "a");
        assert_eq!(json["owner"], "b");
        assert_eq!(json["done"], true);
        assert_eq!(json["id"], 1);

        let json = serde_json::to_value(Task::new()).unwrap();
        assert!(json["summary"].is_null());
        assert!(json["id"].is_null());
    }
}
