//! Resource-level access rules for tasks, layered on top of the route
//! matrix.
//!
//! Reads of a single task are ownership-scoped: the executor or an
//! admin. Status updates and comments are intentionally NOT narrowed
//! here — any authenticated user the route matrix lets through may hit
//! them on any task. Callers must resolve the task (existence check)
//! before consulting this guard so a missing task is a 404, never a 403.

use crate::auth::principal::Identity;
use crate::domain::Role;
use crate::entities::tasks;

/// True iff the identity may read this task: its executor, or an admin.
pub fn can_read(identity: &Identity, task: &tasks::Model) -> bool {
    identity.email == task.executor_email || identity.role == Role::Admin
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::{Priority, Status};

    fn identity(email: &str, role: Role) -> Identity {
        Identity {
            subject_id: Uuid::new_v4(),
            email: email.to_string(),
            role,
        }
    }

    fn task_executed_by(email: &str) -> tasks::Model {
        tasks::Model {
            id: 1,
            title: "title".to_string(),
            description: "description".to_string(),
            priority: Priority::Medium,
            status: Status::Todo,
            author: "Author".to_string(),
            author_email: "author@x".to_string(),
            executor: "Executor".to_string(),
            executor_email: email.to_string(),
            created_at: time::OffsetDateTime::UNIX_EPOCH,
            updated_at: time::OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn executor_may_read() {
        let task = task_executed_by("e@x");
        assert!(can_read(&identity("e@x", Role::User), &task));
    }

    #[test]
    fn other_user_may_not_read() {
        let task = task_executed_by("e@x");
        assert!(!can_read(&identity("c@x", Role::User), &task));
        // author without admin role is still denied
        assert!(!can_read(&identity("author@x", Role::User), &task));
    }

    #[test]
    fn admin_may_read_anything() {
        let task = task_executed_by("e@x");
        assert!(can_read(&identity("someone@x", Role::Admin), &task));
    }
}
