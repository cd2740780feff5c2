//! In-process remote backend registry and selection.

use crate::remote::contract::{RemoteError, RemoteOperation, RemoteResult, RemoteStore};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Backend registration/selection errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRegistryError {
    InvalidBackendId(String),
    DuplicateBackendId(String),
    BackendNotFound(String),
}

impl Display for RemoteRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBackendId(value) => write!(f, "backend id is invalid: {value}"),
            Self::DuplicateBackendId(value) => {
                write!(f, "backend id already registered: {value}")
            }
            Self::BackendNotFound(value) => write!(f, "backend not found: {value}"),
        }
    }
}

impl Error for RemoteRegistryError {}

/// Runtime registry of remote store backends.
#[derive(Default)]
pub struct RemoteRegistry {
    backends: BTreeMap<String, Arc<dyn RemoteStore>>,
    active_backend_id: Option<String>,
}

impl RemoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one backend adapter.
    pub fn register(&mut self, backend: Arc<dyn RemoteStore>) -> Result<(), RemoteRegistryError> {
        let backend_id = backend.backend_id().trim().to_string();
        if !is_valid_backend_id(&backend_id) {
            return Err(RemoteRegistryError::InvalidBackendId(backend_id));
        }
        if self.backends.contains_key(backend_id.as_str()) {
            return Err(RemoteRegistryError::DuplicateBackendId(backend_id));
        }

        self.backends.insert(backend_id, backend);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Returns sorted backend ids.
    pub fn backend_ids(&self) -> Vec<String> {
        self.backends.keys().cloned().collect()
    }

    /// Selects one active backend.
    pub fn select_active(&mut self, backend_id: &str) -> Result<(), RemoteRegistryError> {
        let normalized = backend_id.trim();
        if !self.backends.contains_key(normalized) {
            return Err(RemoteRegistryError::BackendNotFound(normalized.to_string()));
        }
        self.active_backend_id = Some(normalized.to_string());
        Ok(())
    }

    /// Clears active backend selection.
    pub fn clear_active(&mut self) {
        self.active_backend_id = None;
    }

    /// Returns active backend id.
    pub fn active_backend_id(&self) -> Option<&str> {
        self.active_backend_id.as_deref()
    }

    /// Returns one backend by id.
    pub fn get(&self, backend_id: &str) -> Option<Arc<dyn RemoteStore>> {
        self.backends.get(backend_id.trim()).cloned()
    }

    /// Returns the active backend, or a `backend_not_selected` envelope so
    /// callers can treat a missing selection like any other remote failure.
    pub fn active(&self) -> RemoteResult<Arc<dyn RemoteStore>> {
        let selected = self
            .active_backend_id
            .as_deref()
            .and_then(|id| self.get(id));
        match selected {
            Some(backend) => Ok(backend),
            None => Err(RemoteError::new(
                "registry",
                RemoteOperation::Fetch,
                "backend_not_selected",
                "No active remote backend selected.",
                false,
            )),
        }
    }
}

fn is_valid_backend_id(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
