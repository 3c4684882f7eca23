//! Uploaded files and their storage folders.

use std::fmt;

/// Folder an upload is stored under, chosen from the multipart field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadFolder {
    /// Pet images (`image`, `petImage`).
    Pets,
    /// Profile pictures (`profile`).
    Profiles,
    /// Everything else.
    Documents,
}

impl UploadFolder {
    /// Pick the folder for a multipart field.
    ///
    /// # Examples
    /// ```
    /// use adoptme::domain::UploadFolder;
    ///
    /// assert_eq!(UploadFolder::for_field("petImage"), UploadFolder::Pets);
    /// assert_eq!(UploadFolder::for_field("passport"), UploadFolder::Documents);
    /// ```
    pub fn for_field(field: &str) -> Self {
        match field {
            "image" | "petImage" => Self::Pets,
            "profile" => Self::Profiles,
            _ => Self::Documents,
        }
    }

    /// Directory name relative to the uploads root.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pets => "pets",
            Self::Profiles => "profiles",
            Self::Documents => "documents",
        }
    }
}

impl fmt::Display for UploadFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file received in a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Multipart field name.
    pub field: String,
    /// Client-supplied file name.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Storage folder derived from the field name.
    pub fn folder(&self) -> UploadFolder {
        UploadFolder::for_field(&self.field)
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
