//! Domain types exchanged with the Mobistore backend
//!
//! These are backend-owned records: identifiers, counters, and timestamps
//! are authoritative from the server and never fabricated client-side.

pub mod analytics;
pub mod audit;
pub mod auth;
pub mod inquiry;
pub mod phone;

pub use analytics::{Analytics, TopProduct, TrackedEvent};
pub use audit::AuditLogEntry;
pub use auth::AuthResponse;
pub use inquiry::{Inquiry, InquiryStatus};
pub use phone::{Phone, PhoneCondition, PhoneDraft};
