use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use tokio::fs;

/// The host platform's durable string-keyed, string-valued store. Keys map to
/// whole serialized blobs; there are no partial reads or writes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> io::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// File-backed store: one file per key under a root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys like "@FavoriteList" are safe filenames; path separators are not.
        let name: String = key
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.root.join(name)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root).await?;
        let path = self.path_for(key);
        // Write to a temp file, then rename: a failed write leaves the
        // previous value intact.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}
