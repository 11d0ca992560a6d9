use std::io;
use std::sync::Arc;

use crate::error::StorageError;
use crate::models::Movie;
use crate::storage::KeyValueStore;

/// Storage key holding the entire serialized favorites list.
pub const FAVORITES_KEY: &str = "@FavoriteList";

/// Owns the persisted favorites list. Every operation is a whole-blob
/// read-modify-write against a single key; the serialized form is the sole
/// source of truth. There is no locking here. Concurrent toggles for the same
/// id can lose an update, which is why callers must route mutation through
/// the toggle coordinator and keep the control disabled while one is in
/// flight.
pub struct FavoritesRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl FavoritesRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: FAVORITES_KEY.to_string(),
        }
    }

    /// The full persisted list. An absent blob is an empty list; a present
    /// but unparseable blob is [`StorageError::Corrupt`] and must surface to
    /// the caller rather than be coerced to empty.
    pub async fn load_all(&self) -> Result<Vec<Movie>, StorageError> {
        match self.store.get(&self.key).await.map_err(StorageError::Read)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(StorageError::Corrupt),
        }
    }

    pub async fn contains(&self, id: i32) -> Result<bool, StorageError> {
        // Linear scan over the full list; it holds tens of entries at most.
        Ok(self.load_all().await?.iter().any(|m| m.id == id))
    }

    /// Appends without a duplicate check. Duplicate prevention lives in the
    /// toggle coordinator; a raw double `add` leaves two entries, which
    /// `remove` later cleans up.
    pub async fn add(&self, movie: &Movie) -> Result<(), StorageError> {
        let mut list = self.load_all().await?;
        list.push(movie.clone());
        self.persist(&list).await
    }

    /// Removes every entry matching `id`, repairing duplicates left by raw
    /// `add` calls.
    pub async fn remove(&self, id: i32) -> Result<(), StorageError> {
        let mut list = self.load_all().await?;
        list.retain(|m| m.id != id);
        self.persist(&list).await
    }

    async fn persist(&self, list: &[Movie]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(list)
            .map_err(|e| StorageError::Write(io::Error::other(e)))?;
        self.store
            .set(&self.key, &blob)
            .await
            .map_err(StorageError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
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

    fn movie(id: i32, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            vote_average: 7.0,
            vote_count: 100,
            popularity: 10.0,
            runtime: Some(100),
            release_date: None,
            original_language: "en".to_string(),
            genres: Vec::new(),
            poster_path: None,
            backdrop_path: None,
        }
    }

    fn repo() -> (Arc<MemoryStore>, FavoritesRepository) {
        let store = Arc::new(MemoryStore::default());
        let repo = FavoritesRepository::new(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn absent_blob_is_an_empty_list() {
        let (_store, repo) = repo();
        assert!(repo.load_all().await.unwrap().is_empty());
        assert!(!repo.contains(42).await.unwrap());
    }

    #[tokio::test]
    async fn unparseable_blob_is_corrupt_not_empty() {
        let (store, repo) = repo();
        store.set(FAVORITES_KEY, "not json").await.unwrap();
        assert!(matches!(
            repo.load_all().await,
            Err(StorageError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn add_then_contains_then_remove() {
        let (_store, repo) = repo();
        repo.add(&movie(42, "Example")).await.unwrap();
        assert!(repo.contains(42).await.unwrap());
        assert!(!repo.contains(7).await.unwrap());

        repo.remove(42).await.unwrap();
        assert!(!repo.contains(42).await.unwrap());
        assert!(repo.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_does_not_deduplicate() {
        let (_store, repo) = repo();
        let m = movie(42, "Example");
        repo.add(&m).await.unwrap();
        repo.add(&m).await.unwrap();
        assert_eq!(repo.load_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn one_remove_clears_every_duplicate() {
        let (_store, repo) = repo();
        let m = movie(42, "Example");
        repo.add(&m).await.unwrap();
        repo.add(&m).await.unwrap();
        repo.add(&movie(7, "Other")).await.unwrap();

        repo.remove(42).await.unwrap();
        let left = repo.load_all().await.unwrap();
        assert!(!repo.contains(42).await.unwrap());
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, 7);
    }

    #[tokio::test]
    async fn persisted_blob_survives_a_reload() {
        let (store, repo) = repo();
        repo.add(&movie(42, "Example")).await.unwrap();

        // A fresh repository over the same store sees the same list, the way
        // a remounted screen re-reads on focus.
        let reloaded = FavoritesRepository::new(store);
        let list = reloaded.load_all().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Example");
    }
}
