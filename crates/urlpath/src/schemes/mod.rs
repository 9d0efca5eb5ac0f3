/* 📖 # Why a SchemeBackend trait instead of reflective dispatch?

Each I/O operation on a UrlPath is resolved per scheme: `file` paths go to
the local filesystem, `http(s)` paths to the HTTP client. The trait carries
one method per operation, and every method has a default body that fails
with an UnsupportedOperation error naming the operation and the scheme.
A backend opts into exactly the operations it can support; a missing
operation is default behavior, not a configuration error.
*/

use std::fs;
use std::io::{Read, Write};

use crate::error::{UrlPathError, UrlPathResult};
use crate::path::UrlPath;

pub mod file;
pub mod http;

pub use file::FileBackend;
pub use http::HttpBackend;

/// Recognized scheme aliases, mapped to canonical backend names.
/// Read-only after definition; any other scheme is used verbatim.
pub const SCHEME_ALIAS: &[(&str, &str)] = &[("", "file"), ("https", "http")];

/// Resolves a raw scheme to its canonical backend name.
pub(crate) fn canonical_scheme(scheme: &str) -> &str {
    for (alias, canonical) in SCHEME_ALIAS {
        if *alias == scheme {
            return canonical;
        }
    }
    scheme
}

/// Looks up the backend for a raw scheme.
/// Unknown schemes get the default backend, which supports nothing.
pub(crate) fn backend_for(scheme: &str) -> &'static dyn SchemeBackend {
    match canonical_scheme(scheme) {
        "file" => &FileBackend,
        "http" => &HttpBackend,
        _ => &DefaultBackend,
    }
}

/// How a path should be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
    Append,
}

/// An open byte stream over a resource.
pub enum Stream {
    Reader(Box<dyn Read + Send>),
    Writer(Box<dyn Write + Send>),
}

impl Stream {
    /// Unwraps the reading half; fails for write streams.
    pub fn into_reader(self) -> UrlPathResult<Box<dyn Read + Send>> {
        match self {
            Self::Reader(reader) => Ok(reader),
            Self::Writer(_) => Err(crate::err!("stream is write-only")),
        }
    }

    /// Unwraps the writing half; fails for read streams.
    pub fn into_writer(self) -> UrlPathResult<Box<dyn Write + Send>> {
        match self {
            Self::Writer(writer) => Ok(writer),
            Self::Reader(_) => Err(crate::err!("stream is read-only")),
        }
    }
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reader(_) => f.debug_tuple("Reader").finish(),
            Self::Writer(_) => f.debug_tuple("Writer").finish(),
        }
    }
}

/// A lazy, finite sequence of child paths.
pub type PathIter = Box<dyn Iterator<Item = UrlPathResult<UrlPath>>>;

fn unsupported<T>(operation: &'static str, path: &UrlPath) -> UrlPathResult<T> {
    Err(Box::new(UrlPathError::unsupported(operation, path.scheme())))
}

/// Scheme-specific implementation of the I/O operations of a UrlPath.
///
/// Every method defaults to an UnsupportedOperation error carrying the
/// path's raw scheme; backends override only what they can support.
pub trait SchemeBackend: Sync {
    fn touch(&self, path: &UrlPath) -> UrlPathResult<()> {
        unsupported("touch", path)
    }

    fn stat(&self, path: &UrlPath) -> UrlPathResult<fs::Metadata> {
        unsupported("stat", path)
    }

    fn lstat(&self, path: &UrlPath) -> UrlPathResult<fs::Metadata> {
        unsupported("lstat", path)
    }

    fn chmod(&self, path: &UrlPath, _mode: u32) -> UrlPathResult<()> {
        unsupported("chmod", path)
    }

    fn exists(&self, path: &UrlPath) -> UrlPathResult<bool> {
        unsupported("exists", path)
    }

    fn is_dir(&self, path: &UrlPath) -> UrlPathResult<bool> {
        unsupported("is_dir", path)
    }

    fn is_file(&self, path: &UrlPath) -> UrlPathResult<bool> {
        unsupported("is_file", path)
    }

    fn is_symlink(&self, path: &UrlPath) -> UrlPathResult<bool> {
        unsupported("is_symlink", path)
    }

    fn is_socket(&self, path: &UrlPath) -> UrlPathResult<bool> {
        unsupported("is_socket", path)
    }

    fn is_fifo(&self, path: &UrlPath) -> UrlPathResult<bool> {
        unsupported("is_fifo", path)
    }

    fn is_block_device(&self, path: &UrlPath) -> UrlPathResult<bool> {
        unsupported("is_block_device", path)
    }

    fn is_char_device(&self, path: &UrlPath) -> UrlPathResult<bool> {
        unsupported("is_char_device", path)
    }

    fn mkdir(&self, path: &UrlPath) -> UrlPathResult<()> {
        unsupported("mkdir", path)
    }

    fn mkdir_all(&self, path: &UrlPath) -> UrlPathResult<()> {
        unsupported("mkdir_all", path)
    }

    fn open(&self, path: &UrlPath, _mode: OpenMode) -> UrlPathResult<Stream> {
        unsupported("open", path)
    }

    fn read_bytes(&self, path: &UrlPath) -> UrlPathResult<Vec<u8>> {
        unsupported("read_bytes", path)
    }

    fn read_text(&self, path: &UrlPath) -> UrlPathResult<String> {
        unsupported("read_text", path)
    }

    fn rmdir(&self, path: &UrlPath) -> UrlPathResult<()> {
        unsupported("rmdir", path)
    }

    fn unlink(&self, path: &UrlPath) -> UrlPathResult<()> {
        unsupported("unlink", path)
    }

    fn write_bytes(&self, path: &UrlPath, _data: &[u8]) -> UrlPathResult<()> {
        unsupported("write_bytes", path)
    }

    fn write_text(&self, path: &UrlPath, _data: &str) -> UrlPathResult<()> {
        unsupported("write_text", path)
    }

    fn expanduser(&self, path: &UrlPath) -> UrlPathResult<UrlPath> {
        unsupported("expanduser", path)
    }

    fn glob(&self, path: &UrlPath, _pattern: &str) -> UrlPathResult<Vec<UrlPath>> {
        unsupported("glob", path)
    }

    fn rglob(&self, path: &UrlPath, _pattern: &str) -> UrlPathResult<Vec<UrlPath>> {
        unsupported("rglob", path)
    }

    fn iterdir(&self, path: &UrlPath) -> UrlPathResult<PathIter> {
        unsupported("iterdir", path)
    }

    fn rename(&self, path: &UrlPath, _target: &UrlPath) -> UrlPathResult<()> {
        unsupported("rename", path)
    }

    fn replace(&self, path: &UrlPath, _target: &UrlPath) -> UrlPathResult<()> {
        unsupported("replace", path)
    }

    fn resolve(&self, path: &UrlPath) -> UrlPathResult<UrlPath> {
        unsupported("resolve", path)
    }

    fn samefile(&self, path: &UrlPath, _other: &UrlPath) -> UrlPathResult<bool> {
        unsupported("samefile", path)
    }

    fn symlink_to(
        &self,
        path: &UrlPath,
        _target: &UrlPath,
        _target_is_directory: bool,
    ) -> UrlPathResult<()> {
        unsupported("symlink_to", path)
    }
}

/// Backend for schemes with no implementation at all.
#[derive(Debug)]
pub struct DefaultBackend;

impl SchemeBackend for DefaultBackend {}
