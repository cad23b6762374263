use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::Path;

use mime::Mime;

/// Loader a file is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Portable Document Format.
    Pdf,
    /// Plain text in any common encoding.
    Text,
}

impl FileKind {
    /// Maps a file extension (case-insensitive, without the dot) to a kind.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    /// Canonical MIME type for this kind.
    #[must_use]
    pub fn mime(self) -> Mime {
        match self {
            Self::Pdf => mime::APPLICATION_PDF,
            Self::Text => mime::TEXT_PLAIN,
        }
    }
}

/// Lower-cased extension of `name`, or an empty string.
pub(crate) fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

/// A file handed over by the front end.
///
/// The size is recorded up front (from filesystem metadata or the buffer length), so the
/// validator never has to touch the content.
pub struct Upload<R> {
    name: String,
    declared_type: String,
    size: u64,
    reader: R,
}

impl<R> std::fmt::Debug for Upload<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl Upload<Cursor<Vec<u8>>> {
    /// Wraps an in-memory buffer.
    pub fn from_bytes(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let bytes = bytes.into();
        let size = bytes.len() as u64;
        Self::new(name, declared_type, size, Cursor::new(bytes))
    }
}

impl Upload<File> {
    /// Opens a file on disk. The size comes from metadata; nothing is read yet.
    ///
    /// # Errors
    /// Returns the I/O error if the file cannot be opened or stat'ed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let declared_type = FileKind::from_extension(&extension_of(&name))
            .map_or(mime::APPLICATION_OCTET_STREAM, FileKind::mime);
        Ok(Self::new(name, declared_type.essence_str(), size, file))
    }
}

impl<R: Read> Upload<R> {
    /// Builds an upload from its parts.
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        size: u64,
        reader: R,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            size,
            reader,
        }
    }

    /// Display name, including the extension.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type as declared by the front end.
    #[must_use]
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Declared MIME type, if it parses.
    #[must_use]
    pub fn declared_mime(&self) -> Option<Mime> {
        self.declared_type.parse().ok()
    }

    /// Size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns `true` for a zero-byte upload.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Picks the loader: a declared `application/pdf` or a `.pdf` name goes to the PDF
    /// loader, everything else is treated as text.
    #[must_use]
    pub fn kind(&self) -> FileKind {
        let declared_pdf = self
            .declared_mime()
            .is_some_and(|m| m.essence_str() == mime::APPLICATION_PDF.essence_str());
        if declared_pdf || extension_of(&self.name) == "pdf" {
            FileKind::Pdf
        } else {
            FileKind::Text
        }
    }

    /// Consumes the upload and reads exactly [`Upload::size`] bytes.
    ///
    /// # Errors
    /// Propagates read failures. Returns [`io::ErrorKind::InvalidData`] when the content
    /// is shorter or longer than the recorded size, e.g. a file that changed on disk after
    /// [`Upload::open`].
    pub fn read_bytes(self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(usize::try_from(self.size).unwrap_or_default());
        self.reader
            .take(self.size.saturating_add(1))
            .read_to_end(&mut buf)?;
        let read = buf.len() as u64;
        if read != self.size {
            let detail = if read > self.size {
                format!("content grew past the recorded {} bytes", self.size)
            } else {
                format!("expected {} bytes, read {read}", self.size)
            };
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("upload changed while reading: {detail}"),
            ));
        }
        Ok(buf)
    }
}
