use gloo::storage::{LocalStorage, Storage};

use super::logging::Logger;

/// Where the auth token lives between requests
pub trait CredentialStore {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// Token kept as a plain string in browser local storage
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStorageCredentials {
    key: String,
}

impl LocalStorageCredentials {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }
}

impl CredentialStore for LocalStorageCredentials {
    fn token(&self) -> Option<String> {
        LocalStorage::raw()
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn store(&self, token: &str) {
        if let Err(e) = LocalStorage::raw().set_item(&self.key, token) {
            Logger::error_with_component("credentials", &format!("Failed to store token: {:?}", e));
        }
    }

    fn clear(&self) {
        LocalStorage::delete(&self.key);
    }
}

#[cfg(test)]
pub use memory::MemoryCredentials;
