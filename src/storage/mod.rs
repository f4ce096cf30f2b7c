use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StorageError;

mod sqlite;
pub use sqlite::SqliteStorage;

/// Flat record handed to the persistence collaborator after an analysis.
#[derive(Debug, Clone)]
pub struct ScanRecord {
    pub url: String,
    pub title: String,
    pub price: u64,
    pub mileage: u64,
    pub first_registration: String,
    pub rating: String,
    pub ai_market_estimate: u64,
    pub ai_potential: i64,
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn migrate(&self) -> Result<(), StorageError>;
    async fn save_scan(&self, scan: &ScanRecord) -> Result<(), StorageError>;
}

/// Narrow key-value seam for per-user language preferences. Injected into
/// the request context so a persistent or distributed store can replace it
/// without touching call sites.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn language(&self, user_key: &str) -> Result<Option<String>, StorageError>;
    async fn set_language(&self, user_key: &str, language: &str) -> Result<(), StorageError>;
}

/// Process-local preference store for tests and embedded use.
#[derive(Default)]
pub struct InMemoryPreferences {
    languages: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl PreferenceStore for InMemoryPreferences {
    async fn language(&self, user_key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.languages.lock().unwrap().get(user_key).cloned())
    }

    async fn set_language(&self, user_key: &str, language: &str) -> Result<(), StorageError> {
        self.languages
            .lock()
            .unwrap()
            .insert(user_key.to_string(), language.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_preferences_round_trip() {
        tokio_test::block_on(async {
            let prefs = InMemoryPreferences::default();
            assert_eq!(prefs.language("chat-42").await.unwrap(), None);

            prefs.set_language("chat-42", "en").await.unwrap();
            assert_eq!(
                prefs.language("chat-42").await.unwrap(),
                Some("en".to_string())
            );

            prefs.set_language("chat-42", "de").await.unwrap();
            assert_eq!(
                prefs.language("chat-42").await.unwrap(),
                Some("de".to_string())
            );
        });
    }
}
