//! Authentication result types
//!
//! The bearer token in [`AuthResponse`] is the only piece of session state
//! the client persists.

use serde::{Deserialize, Serialize};

/// Successful login result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_login_payload() {
        let auth: AuthResponse = serde_json::from_value(serde_json::json!({
            "token": "jwt-abc",
            "id": 1,
            "username": "admin",
            "email": "admin@mobistore.test",
            "fullName": "Store Admin",
            "role": "ADMIN"
        }))
        .unwrap();
        assert_eq!(auth.token, "jwt-abc");
        assert_eq!(auth.full_name, "Store Admin");
    }
}
