use std::fs;
use std::path::PathBuf;

use crate::err;
use crate::error::{ErrorKind, UrlPathError, UrlPathResult};
use crate::path::UrlPath;
use crate::schemes::{self, OpenMode, PathIter, SchemeBackend, Stream};

/* 📖 # How do I/O methods reach their backend?

Every method below is a one-line dispatch: look up the backend for the
path's scheme and forward the call unchanged. The UrlPath type itself
stays scheme-agnostic; whether an operation is supported is decided by
the backend (or by the trait's default, which rejects everything).
*/

impl UrlPath {
    /// A path for the current working directory.
    pub fn cwd() -> UrlPathResult<UrlPath> {
        let dir = std::env::current_dir().map_err(|e| {
            Box::new(UrlPathError::new(ErrorKind::FileError {
                path: PathBuf::from("."),
                source: e,
            }))
        })?;
        Ok(UrlPath::from(dir.to_string_lossy().into_owned()))
    }

    /// A path for the user's home directory.
    pub fn home() -> UrlPathResult<UrlPath> {
        let home =
            std::env::var("HOME").map_err(|_| err!("HOME environment variable is not set"))?;
        Ok(UrlPath::from(home))
    }

    fn backend(&self) -> &'static dyn SchemeBackend {
        schemes::backend_for(self.scheme())
    }

    /// Creates a file at this path, updating its mtime when it exists.
    pub fn touch(&self) -> UrlPathResult<()> {
        self.backend().touch(self)
    }

    /// Returns information about this path.
    pub fn stat(&self) -> UrlPathResult<fs::Metadata> {
        self.backend().stat(self)
    }

    /// Returns information about this path without following symlinks.
    pub fn lstat(&self) -> UrlPathResult<fs::Metadata> {
        self.backend().lstat(self)
    }

    /// Changes the file mode and permissions.
    pub fn chmod(&self, mode: u32) -> UrlPathResult<()> {
        self.backend().chmod(self, mode)
    }

    /// Whether the path points to an existing resource.
    pub fn exists(&self) -> UrlPathResult<bool> {
        self.backend().exists(self)
    }

    /// Whether the path points to a directory.
    pub fn is_dir(&self) -> UrlPathResult<bool> {
        self.backend().is_dir(self)
    }

    /// Whether the path points to a regular file.
    pub fn is_file(&self) -> UrlPathResult<bool> {
        self.backend().is_file(self)
    }

    /// Whether the path points to a symbolic link.
    pub fn is_symlink(&self) -> UrlPathResult<bool> {
        self.backend().is_symlink(self)
    }

    /// Whether the path points to a Unix socket.
    pub fn is_socket(&self) -> UrlPathResult<bool> {
        self.backend().is_socket(self)
    }

    /// Whether the path points to a FIFO.
    pub fn is_fifo(&self) -> UrlPathResult<bool> {
        self.backend().is_fifo(self)
    }

    /// Whether the path points to a block device.
    pub fn is_block_device(&self) -> UrlPathResult<bool> {
        self.backend().is_block_device(self)
    }

    /// Whether the path points to a character device.
    pub fn is_char_device(&self) -> UrlPathResult<bool> {
        self.backend().is_char_device(self)
    }

    /// Creates a new directory at this path.
    pub fn mkdir(&self) -> UrlPathResult<()> {
        self.backend().mkdir(self)
    }

    /// Creates a new directory at this path, including missing parents.
    pub fn mkdir_all(&self) -> UrlPathResult<()> {
        self.backend().mkdir_all(self)
    }

    /// Opens the resource as a byte stream.
    pub fn open(&self, mode: OpenMode) -> UrlPathResult<Stream> {
        self.backend().open(self, mode)
    }

    /// Returns the binary contents of the pointed-to resource.
    pub fn read_bytes(&self) -> UrlPathResult<Vec<u8>> {
        self.backend().read_bytes(self)
    }

    /// Returns the contents of the pointed-to resource as a UTF-8 string.
    pub fn read_text(&self) -> UrlPathResult<String> {
        self.backend().read_text(self)
    }

    /// Removes this directory. The directory must be empty.
    pub fn rmdir(&self) -> UrlPathResult<()> {
        self.backend().rmdir(self)
    }

    /// Removes this file or symbolic link.
    pub fn unlink(&self) -> UrlPathResult<()> {
        self.backend().unlink(self)
    }

    /// Writes bytes to the resource, replacing its contents.
    pub fn write_bytes(&self, data: &[u8]) -> UrlPathResult<()> {
        self.backend().write_bytes(self, data)
    }

    /// Writes a string to the resource, replacing its contents.
    pub fn write_text(&self, data: &str) -> UrlPathResult<()> {
        self.backend().write_text(self, data)
    }

    /// Returns a new path with a leading `~` expanded.
    pub fn expanduser(&self) -> UrlPathResult<UrlPath> {
        self.backend().expanduser(self)
    }

    /// Globs the given pattern below this path, eagerly collecting matches.
    pub fn glob(&self, pattern: &str) -> UrlPathResult<Vec<UrlPath>> {
        self.backend().glob(self, pattern)
    }

    /// Like `glob()` with `**/` prepended to the pattern.
    pub fn rglob(&self, pattern: &str) -> UrlPathResult<Vec<UrlPath>> {
        self.backend().rglob(self, pattern)
    }

    /// Yields the children of this path as a lazy, finite sequence.
    /// Each call starts from a fresh listing.
    pub fn iterdir(&self) -> UrlPathResult<PathIter> {
        self.backend().iterdir(self)
    }

    /// Renames this file or directory to the given target.
    pub fn rename(&self, target: impl Into<UrlPath>) -> UrlPathResult<()> {
        self.backend().rename(self, &target.into())
    }

    /// Renames this file or directory, replacing the target if it exists.
    pub fn replace(&self, target: impl Into<UrlPath>) -> UrlPathResult<()> {
        self.backend().replace(self, &target.into())
    }

    /// Makes the path absolute, resolving any symlinks.
    pub fn resolve(&self) -> UrlPathResult<UrlPath> {
        self.backend().resolve(self)
    }

    /// Whether this path points to the same file as `other`.
    pub fn samefile(&self, other: &UrlPath) -> UrlPathResult<bool> {
        self.backend().samefile(self, other)
    }

    /// Makes this path a symbolic link to `target`.
    pub fn symlink_to(
        &self,
        target: impl Into<UrlPath>,
        target_is_directory: bool,
    ) -> UrlPathResult<()> {
        self.backend()
            .symlink_to(self, &target.into(), target_is_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_http_mkdir_is_unsupported() {
        let path = UrlPath::new("http://example.com/dir");
        let error = path.mkdir().unwrap_err();
        match error.kind() {
            ErrorKind::UnsupportedOperation { operation, scheme } => {
                assert_eq!(*operation, "mkdir");
                assert_eq!(scheme, "http");
            }
            other => panic!("expected UnsupportedOperation, got {:?}", other),
        }
    }

    #[test]
    fn test_https_dispatches_to_http_backend() {
        // rglob is not provided by the http backend, so the alias must still
        // surface the raw scheme in the error.
        let path = UrlPath::new("https://example.com/dir");
        let error = path.rglob("*.txt").unwrap_err();
        assert_eq!(
            error.to_string(),
            "rglob() is not available for 'https' scheme"
        );
    }

    #[test]
    fn test_cwd_is_absolute() {
        let cwd = UrlPath::cwd().unwrap();
        assert!(cwd.is_absolute());
    }
}
