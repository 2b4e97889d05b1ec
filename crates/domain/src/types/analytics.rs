//! Analytics aggregates and tracking events

use serde::{Deserialize, Serialize};

/// Dashboard-level aggregate counters
///
/// Read-only; never constructed locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_products: i64,
    pub total_views: i64,
    pub total_inquiries: i64,
    #[serde(rename = "totalWhatsAppClicks")]
    pub total_whatsapp_clicks: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_revenue: Option<String>,
}

/// One row of the top-products ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub views: i64,
}

/// Outbound interaction reported to the analytics endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedEvent {
    View,
    Inquiry,
    WhatsappClick,
}

impl TrackedEvent {
    /// Wire value used in the `eventType` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "VIEW",
            Self::Inquiry => "INQUIRY",
            Self::WhatsappClick => "WHATSAPP_CLICK",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_dashboard_counters() {
        let analytics: Analytics = serde_json::from_value(serde_json::json!({
            "totalProducts": 12,
            "totalViews": 340,
            "totalInquiries": 9,
            "totalWhatsAppClicks": 27,
            "estimatedRevenue": "$4,200"
        }))
        .unwrap();
        assert_eq!(analytics.total_whatsapp_clicks, 27);
        assert_eq!(analytics.estimated_revenue.as_deref(), Some("$4,200"));
    }

    #[test]
    fn event_wire_values() {
        assert_eq!(TrackedEvent::View.as_str(), "VIEW");
        assert_eq!(TrackedEvent::Inquiry.as_str(), "INQUIRY");
        assert_eq!(TrackedEvent::WhatsappClick.as_str(), "WHATSAPP_CLICK");
    }
}
