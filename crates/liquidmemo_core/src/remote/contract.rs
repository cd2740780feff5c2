//! Remote store SPI: per-kind CRUD plus OTP email authentication.
//!
//! # Responsibility
//! - Mirror the local entity shapes through a user-scoped CRUD contract.
//! - Keep authentication (OTP request/confirm, session) on the same
//!   boundary so one backend implements both.

use crate::model::entity::{Card, Category, Doc, Highlight, Link, Project};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote operation family, used for error envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    Auth,
    Fetch,
    Create,
    Update,
    Delete,
}

impl Display for RemoteOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Auth => "auth",
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(label)
    }
}

/// Stable error envelope for remote-store failures.
///
/// Failures are scoped to the one remote call that produced them; local
/// state is never rolled back in response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// Which backend produced the failure.
    pub backend_id: String,
    /// Which operation family failed.
    pub operation: RemoteOperation,
    /// Stable machine-readable code, e.g. `not_authenticated`.
    pub code: String,
    /// Human-readable context.
    pub message: String,
    /// Whether retrying the same call may succeed.
    pub retryable: bool,
}

impl RemoteError {
    pub fn new(
        backend_id: impl Into<String>,
        operation: RemoteOperation,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            backend_id: backend_id.into(),
            operation,
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "remote {} failed on `{}` ({}): {}",
            self.operation, self.backend_id, self.code, self.message
        )
    }
}

impl Error for RemoteError {}

/// Authenticated session metadata returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSession {
    pub user_id: String,
    pub email: String,
    /// Epoch ms expiry, when the backend reports one.
    pub expires_at_ms: Option<i64>,
}

/// OTP-based email authentication surface.
pub trait RemoteAuth {
    /// Sends a one-time code to `email`. `is_signup` controls whether an
    /// unknown address may create an account.
    fn request_otp(&self, email: &str, is_signup: bool) -> RemoteResult<()>;
    /// Exchanges the one-time code for a session.
    fn confirm_otp(&self, email: &str, code: &str) -> RemoteResult<RemoteSession>;
    /// Ends the current session.
    fn logout(&self) -> RemoteResult<()>;
    /// Returns the current session, if one is active.
    fn current_session(&self) -> RemoteResult<Option<RemoteSession>>;
}

/// Per-kind CRUD mirror scoped to the authenticated user.
///
/// The method set mirrors the local store's entity kinds; annotation fetches
/// accept an optional doc filter. Links carry no update operation.
pub trait RemoteStore: RemoteAuth + std::fmt::Debug {
    /// Stable backend identifier (lowercase, `_`/`-` separated).
    fn backend_id(&self) -> &str;

    fn fetch_categories(&self) -> RemoteResult<Vec<Category>>;
    fn create_category(&self, category: &Category) -> RemoteResult<()>;
    fn update_category(&self, category: &Category) -> RemoteResult<()>;
    fn delete_category(&self, id: &str) -> RemoteResult<()>;

    fn fetch_projects(&self) -> RemoteResult<Vec<Project>>;
    fn create_project(&self, project: &Project) -> RemoteResult<()>;
    fn update_project(&self, project: &Project) -> RemoteResult<()>;
    fn delete_project(&self, id: &str) -> RemoteResult<()>;

    fn fetch_docs(&self) -> RemoteResult<Vec<Doc>>;
    fn create_doc(&self, doc: &Doc) -> RemoteResult<()>;
    fn update_doc(&self, doc: &Doc) -> RemoteResult<()>;
    fn delete_doc(&self, id: &str) -> RemoteResult<()>;

    fn fetch_highlights(&self, doc_id: Option<&str>) -> RemoteResult<Vec<Highlight>>;
    fn create_highlight(&self, highlight: &Highlight) -> RemoteResult<()>;
    fn update_highlight(&self, highlight: &Highlight) -> RemoteResult<()>;
    fn delete_highlight(&self, id: &str) -> RemoteResult<()>;

    fn fetch_cards(&self, doc_id: Option<&str>) -> RemoteResult<Vec<Card>>;
    fn create_card(&self, card: &Card) -> RemoteResult<()>;
    fn update_card(&self, card: &Card) -> RemoteResult<()>;
    fn delete_card(&self, id: &str) -> RemoteResult<()>;

    fn fetch_links(&self, doc_id: Option<&str>) -> RemoteResult<Vec<Link>>;
    fn create_link(&self, link: &Link) -> RemoteResult<()>;
    fn delete_link(&self, id: &str) -> RemoteResult<()>;
}
