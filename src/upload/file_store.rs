//! Disk storage for uploaded image binaries.
//!
//! The rest of the application never performs file I/O itself: handlers stage
//! bytes through a [FileStore] and pass the resulting metadata to the image
//! mutations, and remove the asset again when the record is deleted.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Error, endpoints};

/// The maximum allowed upload size in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Owns the directory that uploaded image binaries are stored in.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

/// Metadata for a staged upload, ready to be recorded in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    /// The storage-assigned file name under the upload directory.
    pub filename: String,
    /// The URL path the asset is served from.
    pub file_path: String,
    /// The asset size in bytes.
    pub file_size: i64,
}

impl FileStore {
    /// Create a file store rooted at `root`, creating the directory if it
    /// does not exist.
    ///
    /// # Errors
    /// Returns [Error::FileStorageError] if the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();

        fs::create_dir_all(&root)
            .map_err(|error| Error::FileStorageError(error.to_string()))?;

        Ok(Self { root })
    }

    /// The directory uploads are stored in, for serving via `ServeDir`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` to disk under a content-derived file name and return the
    /// metadata to record against the image.
    ///
    /// The file name is the md5 digest of the content plus the original
    /// extension, so re-uploading identical bytes overwrites in place instead
    /// of accumulating duplicates.
    ///
    /// # Errors
    /// - [Error::NotAnImage] if `original_name` does not carry an allowed
    ///   image extension.
    /// - [Error::FileTooLarge] if `data` exceeds [MAX_UPLOAD_BYTES].
    /// - [Error::FileStorageError] if the file cannot be written.
    pub fn stage(&self, original_name: &str, data: &[u8]) -> Result<StagedFile, Error> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| extension.to_ascii_lowercase())
            .ok_or(Error::NotAnImage)?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::NotAnImage);
        }

        if data.len() > MAX_UPLOAD_BYTES {
            return Err(Error::FileTooLarge(MAX_UPLOAD_BYTES));
        }

        let filename = format!("{:x}.{extension}", md5::compute(data));

        fs::write(self.root.join(&filename), data)
            .map_err(|error| Error::FileStorageError(error.to_string()))?;

        tracing::debug!("staged upload '{original_name}' as '{filename}' ({} bytes)", data.len());

        Ok(StagedFile {
            file_path: format!("{}/{filename}", endpoints::UPLOADS),
            filename,
            file_size: data.len() as i64,
        })
    }

    /// Remove a previously staged file.
    ///
    /// A file that is already gone is logged and ignored: by the end of a
    /// delete operation the asset must not exist, and it does not.
    ///
    /// # Errors
    /// Returns [Error::FileStorageError] if the file exists but cannot be
    /// removed.
    pub fn remove(&self, filename: &str) -> Result<(), Error> {
        match fs::remove_file(self.root.join(filename)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("asset '{filename}' was already removed from disk");
                Ok(())
            }
            Err(error) => Err(Error::FileStorageError(error.to_string())),
        }
    }
}

#[cfg(test)]
mod file_store_tests {
    use crate::Error;

    use super::{FileStore, MAX_UPLOAD_BYTES};

    fn get_test_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().expect("Could not create temp dir");
        let store = FileStore::new(dir.path().join("uploads")).expect("Could not create store");

        (dir, store)
    }

    #[test]
    fn stage_writes_file_and_returns_metadata() {
        let (_dir, store) = get_test_store();
        let data = b"not really a png";

        let staged = store.stage("fox.png", data).expect("Could not stage file");

        assert!(staged.filename.ends_with(".png"));
        assert_eq!(staged.file_path, format!("/uploads/{}", staged.filename));
        assert_eq!(staged.file_size, data.len() as i64);
        assert_eq!(
            std::fs::read(store.root().join(&staged.filename)).unwrap(),
            data
        );
    }

    #[test]
    fn stage_rejects_non_image_extension() {
        let (_dir, store) = get_test_store();

        assert_eq!(store.stage("script.exe", b"boo"), Err(Error::NotAnImage));
        assert_eq!(store.stage("no-extension", b"boo"), Err(Error::NotAnImage));
    }

    #[test]
    fn stage_accepts_uppercase_extension() {
        let (_dir, store) = get_test_store();

        assert!(store.stage("photo.JPG", b"bytes").is_ok());
    }

    #[test]
    fn stage_rejects_oversized_file() {
        let (_dir, store) = get_test_store();
        let data = vec![0u8; MAX_UPLOAD_BYTES + 1];

        assert_eq!(
            store.stage("big.png", &data),
            Err(Error::FileTooLarge(MAX_UPLOAD_BYTES))
        );
    }

    #[test]
    fn remove_deletes_staged_file() {
        let (_dir, store) = get_test_store();
        let staged = store.stage("fox.png", b"bytes").unwrap();

        store.remove(&staged.filename).expect("Could not remove file");

        assert!(!store.root().join(&staged.filename).exists());
    }

    #[test]
    fn remove_of_missing_file_is_a_no_op() {
        let (_dir, store) = get_test_store();

        assert_eq!(store.remove("never-staged.png"), Ok(()));
    }
}
