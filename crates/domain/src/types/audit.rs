//! Audit log types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One admin action recorded by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub action: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_log_entry() {
        let entry: AuditLogEntry = serde_json::from_value(serde_json::json!({
            "action": "PHONE_UPDATED",
            "details": "Marked Galaxy S22 unavailable",
            "timestamp": "2026-01-15T18:04:11Z",
            "username": "admin"
        }))
        .unwrap();
        assert_eq!(entry.action, "PHONE_UPDATED");
        assert_eq!(entry.username, "admin");
    }
}
