use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Storage key for the persisted theme preference.
pub const THEME_KEY: &str = "@ThemePreference";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Process-wide dark-mode toggle: one persisted value, one mutator,
/// subscriber notification through a watch channel. Unlike the favorites
/// blob, a missing or unreadable preference is not an error worth surfacing;
/// it just falls back to light.
pub struct ThemeStore {
    store: Arc<dyn KeyValueStore>,
    tx: watch::Sender<ThemeMode>,
}

impl ThemeStore {
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let initial = match store.get(THEME_KEY).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed theme preference: {}", e);
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                ThemeMode::default()
            }
        };
        let (tx, _) = watch::channel(initial);
        Self { store, tx }
    }

    pub fn current(&self) -> ThemeMode {
        *self.tx.borrow()
    }

    /// Receiver that observes every committed change.
    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.tx.subscribe()
    }

    /// The single mutator: persists first, then notifies subscribers, so an
    /// observer never sees a mode the store failed to record.
    pub async fn set(&self, mode: ThemeMode) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&mode)
            .map_err(|e| StorageError::Write(std::io::Error::other(e)))?;
        self.store
            .set(THEME_KEY, &blob)
            .await
            .map_err(StorageError::Write)?;
        self.tx.send_replace(mode);
        Ok(())
    }

    pub async fn toggle(&self) -> Result<ThemeMode, StorageError> {
        let next = match self.current() {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
        self.set(next).await?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStore for MemoryStore {
        async fn get(&self, key: &str) -> io::Result<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> io::Result<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn defaults_to_light_when_nothing_persisted() {
        let themes = ThemeStore::load(Arc::new(MemoryStore::default())).await;
        assert_eq!(themes.current(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn malformed_preference_falls_back_to_light() {
        let store = Arc::new(MemoryStore::default());
        store.set(THEME_KEY, "??").await.unwrap();
        let themes = ThemeStore::load(store).await;
        assert_eq!(themes.current(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn toggle_persists_and_survives_reload() {
        let store = Arc::new(MemoryStore::default());
        let themes = ThemeStore::load(store.clone()).await;
        assert_eq!(themes.toggle().await.unwrap(), ThemeMode::Dark);

        let reloaded = ThemeStore::load(store).await;
        assert_eq!(reloaded.current(), ThemeMode::Dark);
    }

    #[tokio::test]
    async fn subscribers_observe_the_change() {
        let themes = ThemeStore::load(Arc::new(MemoryStore::default())).await;
        let mut rx = themes.subscribe();
        themes.set(ThemeMode::Dark).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ThemeMode::Dark);
    }
}
