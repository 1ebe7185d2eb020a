use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use corkboard_common::file_name::{ConfinedName, ConfinedNameError};

pub mod rebuild;
pub mod split;

// file hierarchy
// root
// - image-organizer.html
// - image-assignments.json
// - images
//   - a.png
//   - b.webp
// - image-chunks (split-assignments)
//   - index.json
//   - chunk-1.json

#[derive(Debug, Clone)]
pub struct LocalSystemStore {
    upload_dir: PathBuf,
    assignments_file: PathBuf,
    assignments_lock: Arc<Mutex<()>>,
}

#[derive(Debug)]
pub enum Error {
    IOError(std::io::Error),
    Json(serde_json::Error),
    InvalidFileName(ConfinedNameError),
    MissingUploadDir(PathBuf),
    NotAnObject,
    InvalidChunkSize,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IOError(e) => write!(f, "{}", e),
            Error::Json(e) => write!(f, "{}", e),
            Error::InvalidFileName(e) => write!(f, "{}", e),
            Error::MissingUploadDir(path) => {
                write!(f, "upload directory not found: {}", path.display())
            }
            Error::NotAnObject => write!(f, "assignments document is not a JSON object"),
            Error::InvalidChunkSize => write!(f, "images per chunk must be at least 1"),
        }
    }
}

impl std::error::Error for Error {}

impl LocalSystemStore {
    pub fn new(upload_dir: PathBuf, assignments_file: PathBuf) -> Self {
        Self {
            upload_dir,
            assignments_file,
            assignments_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn assignments_file(&self) -> &Path {
        &self.assignments_file
    }

    pub fn ensure_upload_dir(&self) -> Result<(), Error> {
        std::fs::create_dir_all(&self.upload_dir).map_err(Error::IOError)
    }

    pub fn image_path(&self, file_name: &str) -> Result<PathBuf, Error> {
        let name = ConfinedName::new(file_name).map_err(Error::InvalidFileName)?;
        Ok(name.join_onto(&self.upload_dir))
    }

    /// Overwrites any image already stored under `name`.
    pub fn write_image(&self, name: &ConfinedName, data: &[u8]) -> Result<PathBuf, Error> {
        let path = name.join_onto(&self.upload_dir);
        std::fs::write(&path, data).map_err(Error::IOError)?;
        Ok(path)
    }

    pub fn read_image(&self, file_name: &str) -> Result<Option<Vec<u8>>, Error> {
        let path = self.image_path(file_name)?;
        read_if_exists(&path)
    }

    /// Regular files in the upload directory, sorted by name. Names that are
    /// not valid UTF-8 are skipped.
    pub fn list_images(&self) -> Result<Vec<String>, Error> {
        if !self.upload_dir.is_dir() {
            return Err(Error::MissingUploadDir(self.upload_dir.clone()));
        }
        let entries = std::fs::read_dir(&self.upload_dir).map_err(Error::IOError)?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(Error::IOError)?;
            if !entry.file_type().map_err(Error::IOError)?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => log::warn!("skipping non utf-8 file name: {:?}", name),
            }
        }
        names.sort();
        Ok(names)
    }

    /// Raw bytes of the stored document, `None` until the first save.
    pub fn read_assignments_raw(&self) -> Result<Option<Vec<u8>>, Error> {
        read_if_exists(&self.assignments_file)
    }

    pub fn read_assignments(&self) -> Result<Option<serde_json::Value>, Error> {
        match self.read_assignments_raw()? {
            Some(raw) => {
                let value = serde_json::from_slice(&raw).map_err(Error::Json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Replaces the whole document with the compact serialization of `value`.
    pub fn save_assignments(&self, value: &serde_json::Value) -> Result<(), Error> {
        let data = serde_json::to_vec(value).map_err(Error::Json)?;
        self.replace_assignments_file(&data)
    }

    pub(crate) fn replace_assignments_file(&self, data: &[u8]) -> Result<(), Error> {
        let _guard = self
            .assignments_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let parent = match self.assignments_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // the temp file lives next to the target so the rename stays on one filesystem
        let mut file = tempfile::NamedTempFile::new_in(parent).map_err(Error::IOError)?;
        file.write_all(data).map_err(Error::IOError)?;
        file.persist(&self.assignments_file)
            .map_err(|e| Error::IOError(e.error))?;
        Ok(())
    }
}

fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, Error> {
    match std::fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::IOError(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn new_store(root: &Path) -> LocalSystemStore {
        let store = LocalSystemStore::new(
            root.join("images"),
            root.join("image-assignments.json"),
        );
        store.ensure_upload_dir().unwrap();
        store
    }

    #[test]
    fn test_ensure_upload_dir_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        store.ensure_upload_dir().unwrap();
        assert!(dir.path().join("images").is_dir());
    }

    #[test]
    fn test_write_then_read_image() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());

        let name = ConfinedName::new("a.png").unwrap();
        let path = store.write_image(&name, b"\x89PNG first").unwrap();
        assert_eq!(path, dir.path().join("images").join("a.png"));

        store.write_image(&name, b"\x89PNG second").unwrap();
        assert_eq!(
            store.read_image("a.png").unwrap().unwrap(),
            b"\x89PNG second"
        );
    }

    #[test]
    fn test_read_missing_image() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        assert!(store.read_image("missing.png").unwrap().is_none());
    }

    #[test]
    fn test_image_path_rejects_traversal() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        assert!(matches!(
            store.image_path("../image-assignments.json"),
            Err(Error::InvalidFileName(_))
        ));
        assert!(matches!(
            store.read_image(".."),
            Err(Error::InvalidFileName(_))
        ));
    }

    #[test]
    fn test_list_images_skips_directories() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        for name in ["b.png", "a.webp"] {
            store
                .write_image(&ConfinedName::new(name).unwrap(), b"x")
                .unwrap();
        }
        std::fs::create_dir(dir.path().join("images").join("nested")).unwrap();
        assert_eq!(store.list_images().unwrap(), vec!["a.webp", "b.png"]);
    }

    #[test]
    fn test_assignments_absent_until_first_save() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        assert!(store.read_assignments_raw().unwrap().is_none());
        assert!(store.read_assignments().unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_whole_document() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());

        store
            .save_assignments(&json!({"1": "catA", "2": "catB"}))
            .unwrap();
        store.save_assignments(&json!({"3": "catC"})).unwrap();

        assert_eq!(store.read_assignments().unwrap().unwrap(), json!({"3": "catC"}));
        assert_eq!(
            store.read_assignments_raw().unwrap().unwrap(),
            br#"{"3":"catC"}"#
        );
    }

    #[test]
    fn test_save_accepts_arrays() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        store.save_assignments(&json!([1, "two", null])).unwrap();
        assert_eq!(
            store.read_assignments().unwrap().unwrap(),
            json!([1, "two", null])
        );
    }

    #[test]
    fn test_save_leaves_no_temp_files_behind() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        store.save_assignments(&json!({})).unwrap();
        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["image-assignments.json", "images"]);
    }

    #[test]
    fn test_concurrent_saves_keep_a_whole_document() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.save_assignments(&json!({ "writer": i })).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let value = store.read_assignments().unwrap().unwrap();
        assert!(value["writer"].is_u64());
    }
}
