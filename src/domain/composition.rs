use crate::utils::error::{ModError, Result};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: EntryLevel,
    pub message: String,
}

/// Records what its owner did and mirrors each entry to `tracing`.
#[derive(Debug, Default, Clone)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.entries.push(LogEntry {
            level: EntryLevel::Info,
            message,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.entries.push(LogEntry {
            level: EntryLevel::Error,
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permissions {
    granted: BTreeSet<String>,
}

impl Permissions {
    pub fn new<I, S>(granted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: granted.into_iter().map(Into::into).collect(),
        }
    }

    pub fn admin() -> Self {
        Self::new(["read", "write", "delete"])
    }

    pub fn allows(&self, permission: &str) -> bool {
        self.granted.contains(permission)
    }
}

/// A user assembled from a log and a permission set.
#[derive(Debug, Clone)]
pub struct AdminUser {
    username: String,
    log: ActivityLog,
    permissions: Permissions,
}

impl AdminUser {
    pub fn new(username: impl Into<String>, permissions: Permissions) -> Self {
        Self {
            username: username.into(),
            log: ActivityLog::default(),
            permissions,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.allows(permission)
    }

    pub fn delete_item(&mut self, item: &str) -> Result<()> {
        if self.has_permission("delete") {
            self.log
                .info(format!("User {} deleted {}", self.username, item));
            Ok(())
        } else {
            self.log.error(format!(
                "User {} doesn't have permission to delete",
                self.username
            ));
            Err(ModError::PermissionDenied {
                user: self.username.clone(),
                action: format!("delete {}", item),
            })
        }
    }

    pub fn activity(&self) -> &[LogEntry] {
        self.log.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_can_delete() {
        let mut admin = AdminUser::new("admin1", Permissions::admin());
        admin.delete_item("file.txt").unwrap();
        assert!(admin.has_permission("write"));
        assert_eq!(
            admin.activity(),
            &[LogEntry {
                level: EntryLevel::Info,
                message: "User admin1 deleted file.txt".to_string(),
            }]
        );
    }

    #[test]
    fn test_reader_cannot_delete() {
        let mut reader = AdminUser::new("guest", Permissions::new(["read"]));
        let err = reader.delete_item("file.txt").unwrap_err();
        assert!(matches!(err, ModError::PermissionDenied { .. }));
        assert_eq!(reader.activity().len(), 1);
        assert_eq!(reader.activity()[0].level, EntryLevel::Error);
    }
}
