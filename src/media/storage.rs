//! Media file storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::media::MediaError;

/// Backend holding uploaded images and generated thumbnails.
///
/// Names are relative, `/`-separated paths such as `chair.jpg` or
/// `thumbnails/chair.jpg`. Saving over an existing name replaces it.
pub trait MediaStorage: Send + Sync {
    fn save(&self, name: &str, bytes: &[u8]) -> Result<(), MediaError>;
    fn open(&self, name: &str) -> Result<Vec<u8>, MediaError>;
    fn exists(&self, name: &str) -> bool;
}

/// Stores media files below a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` below the root, refusing anything that could escape it.
    fn path_for(&self, name: &str) -> Result<PathBuf, MediaError> {
        let relative = Path::new(name);
        let safe = !name.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !safe {
            return Err(MediaError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl MediaStorage for LocalMediaStorage {
    fn save(&self, name: &str, bytes: &[u8]) -> Result<(), MediaError> {
        let path = self.path_for(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        log::debug!("Stored media file {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn open(&self, name: &str) -> Result<Vec<u8>, MediaError> {
        let path = self.path_for(name)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => MediaError::Missing(name.to_string()),
            _ => MediaError::Io(e),
        })
    }

    fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }
}

/// Normalise a client-supplied file name into a storage name.
///
/// Only the final path segment is kept. The result is lowercased, whitespace
/// becomes `_`, and characters outside `[a-z0-9._-]` are dropped.
pub fn stored_file_name(original: &str) -> Result<String, MediaError> {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let name = base
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            'a'..='z' | '0'..='9' | '.' | '_' | '-' => Some(c),
            _ => None,
        })
        .collect::<String>();

    if name.is_empty() || name.starts_with('.') {
        return Err(MediaError::InvalidName(original.to_string()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_uploaded_names() {
        assert_eq!(stored_file_name("Sev-Drulo_SOFA.JPG").unwrap(), "sev-drulo_sofa.jpg");
    }

    #[test]
    fn keeps_only_the_basename() {
        assert_eq!(stored_file_name("C:\\photos\\Chair.png").unwrap(), "chair.png");
        assert_eq!(stored_file_name("../../etc/passwd").unwrap(), "passwd");
    }

    #[test]
    fn replaces_whitespace_and_drops_symbols() {
        assert_eq!(
            stored_file_name("Captain's Chair (front).jpg").unwrap(),
            "captains_chair_front.jpg"
        );
    }

    #[test]
    fn rejects_hidden_or_empty_names() {
        assert!(stored_file_name(".htaccess").is_err());
        assert!(stored_file_name("   ").is_err());
        assert!(stored_file_name("dir/").is_err());
    }

    #[test]
    fn local_storage_round_trips_nested_names() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());

        storage.save("thumbnails/chair.jpg", b"jpeg").unwrap();

        assert!(storage.exists("thumbnails/chair.jpg"));
        assert_eq!(storage.open("thumbnails/chair.jpg").unwrap(), b"jpeg");
    }

    #[test]
    fn local_storage_refuses_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());

        assert!(matches!(
            storage.save("../outside.jpg", b"x"),
            Err(MediaError::InvalidName(_))
        ));
        assert!(!storage.exists("/etc/passwd"));
    }

    #[test]
    fn opening_missing_file_reports_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());

        assert!(matches!(
            storage.open("nope.jpg"),
            Err(MediaError::Missing(name)) if name == "nope.jpg"
        ));
    }
}
