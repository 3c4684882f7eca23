//! Filesystem storage for uploaded files.
//!
//! Uploads land under a capability-scoped root directory opened once at
//! start-up. Paths are built from a folder chosen by the upload field and a
//! `<unix-millis>-<name>` file name; the original name is reduced to its
//! final component so clients cannot escape the root. Files are created
//! exclusively, and a name already taken in the same millisecond becomes
//! `<unix-millis>-<n>-<name>`.

use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use mockable::Clock;
use tracing::debug;

use crate::domain::UploadedFile;
use crate::domain::ports::{DocumentStorage, DocumentStorageError};

const FALLBACK_FILE_NAME: &str = "upload";

/// Names tried per upload before giving up.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Stores uploads on the local filesystem.
#[derive(Clone)]
pub struct FsDocumentStorage {
    root: Arc<Dir>,
    public_root: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FsDocumentStorage {
    /// Open (creating if needed) `root` as the upload directory.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStorageError::Unavailable`] when the directory
    /// cannot be created or opened.
    pub fn open(
        root: impl AsRef<Path>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DocumentStorageError> {
        let root = root.as_ref();
        let unavailable =
            |err: std::io::Error| DocumentStorageError::unavailable(format!("{}: {err}", root.display()));
        std::fs::create_dir_all(root).map_err(unavailable)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(unavailable)?;
        Ok(Self {
            root: Arc::new(dir),
            public_root: root.to_path_buf(),
            clock,
        })
    }
}

/// Final path component of `name`, or a fallback when nothing usable remains.
fn sanitise_file_name(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if last.is_empty() || last == "." || last == ".." {
        FALLBACK_FILE_NAME.to_owned()
    } else {
        last.to_owned()
    }
}

/// Create `<folder>/<millis>-<name>` (or the first free `<millis>-<n>-<name>`)
/// and write `bytes` into it, returning the path relative to the root.
fn write_new(
    root: &Dir,
    folder: &str,
    millis: i64,
    name: &str,
    bytes: &[u8],
) -> io::Result<PathBuf> {
    root.create_dir_all(folder)?;
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let stored_name = if attempt == 0 {
            format!("{millis}-{name}")
        } else {
            format!("{millis}-{attempt}-{name}")
        };
        let relative = Path::new(folder).join(stored_name);
        match root.open_with(&relative, &options) {
            Ok(mut handle) => {
                handle.write_all(bytes)?;
                return Ok(relative);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free name for {name} after {MAX_NAME_ATTEMPTS} attempts"),
    ))
}

#[async_trait]
impl DocumentStorage for FsDocumentStorage {
    async fn store(&self, file: &UploadedFile) -> Result<String, DocumentStorageError> {
        let folder = file.folder().as_str();
        let millis = self.clock.utc().timestamp_millis();
        let name = sanitise_file_name(&file.file_name);

        let root = Arc::clone(&self.root);
        let bytes = file.bytes.clone();
        let relative =
            tokio::task::spawn_blocking(move || write_new(&root, folder, millis, &name, &bytes))
                .await
                .map_err(|err| DocumentStorageError::write(err.to_string()))?
                .map_err(|err| DocumentStorageError::write(err.to_string()))?;
        let reference = self.public_root.join(&relative);

        debug!(path = %reference.display(), size = file.bytes.len(), "upload stored");
        Ok(reference.to_string_lossy().into_owned())
    }
}
