//! Customer inquiry types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow state of an inquiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryStatus {
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl InquiryStatus {
    /// Wire value used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }
}

/// A customer inquiry, optionally linked to a catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_name: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InquiryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_wire_values() {
        for (status, wire) in [
            (InquiryStatus::Pending, "PENDING"),
            (InquiryStatus::InProgress, "IN_PROGRESS"),
            (InquiryStatus::Resolved, "RESOLVED"),
            (InquiryStatus::Closed, "CLOSED"),
        ] {
            assert_eq!(status.as_str(), wire);
            assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{wire}\""));
        }
    }

    #[test]
    fn new_inquiry_omits_server_owned_fields() {
        let inquiry = Inquiry {
            id: None,
            name: "Dana".into(),
            email: "dana@example.com".into(),
            phone_number: None,
            phone_id: Some(3),
            phone_name: Some("Galaxy S22".into()),
            message: "Is this still available?".into(),
            status: None,
            admin_notes: None,
            created_at: None,
        };
        let value = serde_json::to_value(&inquiry).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.get("id").is_none());
        assert!(obj.get("status").is_none());
        assert_eq!(obj["phoneId"], 3);
    }
}
