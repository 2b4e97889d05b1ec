//! Resource-level client for the Mobistore backend
//!
//! Thin typed methods over the shared [`HttpClient`] pipeline: phones,
//! inquiries, analytics, audit logs, auth, and the standalone image upload.

use std::sync::Arc;

use mobistore_domain::{
    Analytics, ApiError, AuditLogEntry, AuthResponse, Inquiry, InquiryStatus, Phone, PhoneDraft,
    Result, TopProduct, TrackedEvent,
};
use serde::Serialize;
use tracing::{debug, info, instrument};
use urlencoding::encode;

use crate::config::ClientConfig;
use crate::http::HttpClient;
use crate::session::{KeyringTokenStore, Session, TokenStore};
use crate::upload::UploadClient;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Typed client for the Mobistore backend API
///
/// Cheap to clone; all clones share the same session, so a login through one
/// handle authenticates the others.
#[derive(Clone)]
pub struct StoreClient {
    http: Arc<HttpClient>,
    session: Arc<Session>,
    uploader: Arc<UploadClient>,
}

impl StoreClient {
    /// Create a client with the platform keychain as the token store
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP clients cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_store(config, Arc::new(KeyringTokenStore::new()))
    }

    /// Create a client over an injected token store (used by tests)
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP clients cannot be built.
    pub fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let session = Arc::new(Session::new(store));
        let uploader = Arc::new(UploadClient::new(config.upload_url.clone())?);
        let http = Arc::new(HttpClient::new(config, session.clone())?);

        Ok(Self { http, session, uploader })
    }

    /// Create a builder for fluent configuration.
    pub fn builder() -> StoreClientBuilder {
        StoreClientBuilder::default()
    }

    // === Auth ===

    /// Authenticate and persist the returned bearer token
    ///
    /// The token is stored as a side effect before the result is returned,
    /// so subsequent calls authenticate automatically.
    ///
    /// # Errors
    /// Returns `ApiError::Auth` if the credentials are rejected.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest { username, password };
        let response: AuthResponse = self.http.post("/auth/login", &request).await?;

        if !response.token.is_empty() {
            self.session.set_token(&response.token).await;
        }

        info!(username = %response.username, role = %response.role, "Login successful");
        Ok(response)
    }

    /// Clear the session; no network call, always succeeds.
    pub async fn logout(&self) {
        self.session.clear().await;
        info!("Logged out");
    }

    /// Check whether a session token is currently available.
    pub async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    // === Phones ===

    /// List all phone listings.
    pub async fn list_phones(&self) -> Result<Vec<Phone>> {
        self.http.get("/phones").await
    }

    /// Fetch a single phone listing.
    pub async fn get_phone(&self, id: i64) -> Result<Phone> {
        self.http.get(&format!("/phones/{id}")).await
    }

    /// List the listings flagged as featured.
    pub async fn featured_phones(&self) -> Result<Vec<Phone>> {
        self.http.get("/phones/featured").await
    }

    /// Search listings by keyword.
    pub async fn search_phones(&self, keyword: &str) -> Result<Vec<Phone>> {
        self.http.get(&format!("/phones/search?keyword={}", encode(keyword))).await
    }

    /// Create a phone listing
    ///
    /// Enforces the backend-required fields before anything touches the
    /// network: at least one image reference and a condition. Unset
    /// `is_featured` defaults to `false` and `is_available` to `true`.
    ///
    /// # Errors
    /// Returns a local `ApiError::Validation` (zero network calls) when the
    /// pre-flight check fails.
    #[instrument(skip(self, draft))]
    pub async fn create_phone(&self, mut draft: PhoneDraft) -> Result<Phone> {
        if !draft.images.as_ref().is_some_and(|images| !images.is_empty()) {
            return Err(ApiError::Validation("At least one image is required".into()));
        }
        if draft.condition.is_none() {
            return Err(ApiError::Validation("Condition is required".into()));
        }

        draft.is_featured = Some(draft.is_featured.unwrap_or(false));
        draft.is_available = Some(draft.is_available.unwrap_or(true));

        let phone: Phone = self.http.post("/phones", &draft).await?;
        debug!(phone_id = phone.id, "Phone created");
        Ok(phone)
    }

    /// Apply a partial update to a listing.
    pub async fn update_phone(&self, id: i64, draft: &PhoneDraft) -> Result<Phone> {
        self.http.put(&format!("/phones/{id}"), draft).await
    }

    /// Delete a listing.
    pub async fn delete_phone(&self, id: i64) -> Result<()> {
        self.http.delete(&format!("/phones/{id}")).await
    }

    // === Inquiries ===

    /// List all inquiries.
    pub async fn list_inquiries(&self) -> Result<Vec<Inquiry>> {
        self.http.get("/inquiries").await
    }

    /// Submit a customer inquiry.
    pub async fn create_inquiry(&self, inquiry: &Inquiry) -> Result<Inquiry> {
        self.http.post("/inquiries", inquiry).await
    }

    /// Advance an inquiry's workflow status
    ///
    /// Status and the optional admin note travel as query parameters on a
    /// bodyless PUT.
    pub async fn update_inquiry_status(
        &self,
        id: i64,
        status: InquiryStatus,
        admin_notes: Option<&str>,
    ) -> Result<Inquiry> {
        let mut path = format!("/inquiries/{id}/status?status={}", status.as_str());
        if let Some(notes) = admin_notes {
            path.push_str(&format!("&adminNotes={}", encode(notes)));
        }
        self.http.put_empty(&path).await
    }

    /// Delete an inquiry.
    pub async fn delete_inquiry(&self, id: i64) -> Result<()> {
        self.http.delete(&format!("/inquiries/{id}")).await
    }

    // === Analytics ===

    /// Report an outbound interaction; the response body is discarded.
    pub async fn track_event(&self, phone_id: i64, event: TrackedEvent) -> Result<()> {
        self.http
            .post_empty(&format!("/analytics/track?phoneId={phone_id}&eventType={}", event.as_str()))
            .await
    }

    /// Fetch the dashboard aggregate counters.
    pub async fn dashboard_analytics(&self) -> Result<Analytics> {
        self.http.get("/analytics/dashboard").await
    }

    /// Fetch the most-viewed listings ranking.
    pub async fn top_products(&self) -> Result<Vec<TopProduct>> {
        self.http.get("/analytics/top-products").await
    }

    // === Audit logs ===

    /// Fetch admin actions from the trailing time window (24 hours is the
    /// console's usual view).
    pub async fn recent_audit_logs(&self, hours: u32) -> Result<Vec<AuditLogEntry>> {
        self.http.get(&format!("/audit-logs/recent?hours={hours}")).await
    }

    /// Fetch the audit trail of one entity.
    pub async fn entity_audit_logs(
        &self,
        entity_type: &str,
        entity_id: i64,
    ) -> Result<Vec<AuditLogEntry>> {
        self.http
            .get(&format!("/audit-logs/entity/{}/{entity_id}", encode(entity_type)))
            .await
    }

    // === Upload ===

    /// Upload an image through the standalone multipart endpoint
    ///
    /// # Errors
    /// Returns `ApiError::Upload` with the server-supplied message, or a
    /// generic one if the server gives none.
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>, mime: &str) -> Result<String> {
        self.uploader.upload(file_name, bytes, mime).await
    }

    // === Health ===

    /// Check if the backend is reachable (`/health`, short deadline, no
    /// retries).
    pub async fn health_check(&self) -> bool {
        self.http.check_health().await
    }
}

/// Builder for [`StoreClient`]
#[derive(Default)]
pub struct StoreClientBuilder {
    config: Option<ClientConfig>,
    store: Option<Arc<dyn TokenStore>>,
}

impl StoreClientBuilder {
    /// Set the client configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the token persistence backend.
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `ApiError::Config` if client construction fails.
    pub fn build(self) -> Result<StoreClient> {
        let config = self.config.unwrap_or_default();
        match self.store {
            Some(store) => StoreClient::with_store(config, store),
            None => StoreClient::new(config),
        }
    }
}
