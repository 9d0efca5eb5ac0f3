use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use globset::GlobBuilder;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::err;
use crate::error::{ErrorKind, UrlPathError, UrlPathResult};
use crate::path::UrlPath;

use super::{OpenMode, PathIter, SchemeBackend, Stream};

/* 📖 # Why delegate to std::fs keyed by the rendered path?

The file backend adds no semantics of its own: every operation maps the
path's string form onto the equivalent std::fs primitive and returns the
result unmodified. Operations that hand back native paths (expanduser,
glob, rglob, resolve, iterdir) re-wrap them into new UrlPath values.
*/

/// Backend for the `file` scheme (and the implicit empty scheme).
#[derive(Debug)]
pub struct FileBackend;

/// The filesystem location of a path. An empty rendered path means the
/// current directory.
fn fs_path(path: &UrlPath) -> PathBuf {
    let rendered = path.path();
    if rendered.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(rendered)
    }
}

fn file_error(path: PathBuf, source: std::io::Error) -> Box<UrlPathError> {
    Box::new(UrlPathError::new(ErrorKind::FileError { path, source }))
}

impl SchemeBackend for FileBackend {
    #[instrument(skip(self), fields(path = %path))]
    fn touch(&self, path: &UrlPath) -> UrlPathResult<()> {
        let resolved = fs_path(path);
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&resolved)
            .map_err(|e| file_error(resolved.clone(), e))?;
        file.set_modified(SystemTime::now())
            .map_err(|e| file_error(resolved, e))?;
        debug!("touched file");
        Ok(())
    }

    fn stat(&self, path: &UrlPath) -> UrlPathResult<fs::Metadata> {
        let resolved = fs_path(path);
        fs::metadata(&resolved).map_err(|e| file_error(resolved, e))
    }

    fn lstat(&self, path: &UrlPath) -> UrlPathResult<fs::Metadata> {
        let resolved = fs_path(path);
        fs::symlink_metadata(&resolved).map_err(|e| file_error(resolved, e))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn chmod(&self, path: &UrlPath, mode: u32) -> UrlPathResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let resolved = fs_path(path);
            fs::set_permissions(&resolved, fs::Permissions::from_mode(mode))
                .map_err(|e| file_error(resolved, e))
        }
        #[cfg(not(unix))]
        {
            let _ = mode;
            Err(err!("chmod() is not supported on this platform"))
        }
    }

    fn exists(&self, path: &UrlPath) -> UrlPathResult<bool> {
        Ok(fs_path(path).exists())
    }

    fn is_dir(&self, path: &UrlPath) -> UrlPathResult<bool> {
        Ok(fs_path(path).is_dir())
    }

    fn is_file(&self, path: &UrlPath) -> UrlPathResult<bool> {
        Ok(fs_path(path).is_file())
    }

    fn is_symlink(&self, path: &UrlPath) -> UrlPathResult<bool> {
        Ok(fs_path(path).is_symlink())
    }

    fn is_socket(&self, path: &UrlPath) -> UrlPathResult<bool> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            Ok(fs::metadata(fs_path(path))
                .map(|m| m.file_type().is_socket())
                .unwrap_or(false))
        }
        #[cfg(not(unix))]
        {
            let _ = path;
            Ok(false)
        }
    }

    fn is_fifo(&self, path: &UrlPath) -> UrlPathResult<bool> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            Ok(fs::metadata(fs_path(path))
                .map(|m| m.file_type().is_fifo())
                .unwrap_or(false))
        }
        #[cfg(not(unix))]
        {
            let _ = path;
            Ok(false)
        }
    }

    fn is_block_device(&self, path: &UrlPath) -> UrlPathResult<bool> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            Ok(fs::metadata(fs_path(path))
                .map(|m| m.file_type().is_block_device())
                .unwrap_or(false))
        }
        #[cfg(not(unix))]
        {
            let _ = path;
            Ok(false)
        }
    }

    fn is_char_device(&self, path: &UrlPath) -> UrlPathResult<bool> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            Ok(fs::metadata(fs_path(path))
                .map(|m| m.file_type().is_char_device())
                .unwrap_or(false))
        }
        #[cfg(not(unix))]
        {
            let _ = path;
            Ok(false)
        }
    }

    #[instrument(skip(self), fields(path = %path))]
    fn mkdir(&self, path: &UrlPath) -> UrlPathResult<()> {
        let resolved = fs_path(path);
        fs::create_dir(&resolved).map_err(|e| file_error(resolved, e))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn mkdir_all(&self, path: &UrlPath) -> UrlPathResult<()> {
        let resolved = fs_path(path);
        fs::create_dir_all(&resolved).map_err(|e| file_error(resolved, e))
    }

    #[instrument(skip(self), fields(path = %path, mode = ?mode))]
    fn open(&self, path: &UrlPath, mode: OpenMode) -> UrlPathResult<Stream> {
        let resolved = fs_path(path);
        match mode {
            OpenMode::Read => {
                let file = fs::File::open(&resolved).map_err(|e| file_error(resolved, e))?;
                Ok(Stream::Reader(Box::new(file)))
            }
            OpenMode::Write => {
                let file = fs::File::create(&resolved).map_err(|e| file_error(resolved, e))?;
                Ok(Stream::Writer(Box::new(file)))
            }
            OpenMode::Append => {
                let file = fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&resolved)
                    .map_err(|e| file_error(resolved, e))?;
                Ok(Stream::Writer(Box::new(file)))
            }
        }
    }

    fn read_bytes(&self, path: &UrlPath) -> UrlPathResult<Vec<u8>> {
        let resolved = fs_path(path);
        fs::read(&resolved).map_err(|e| file_error(resolved, e))
    }

    fn read_text(&self, path: &UrlPath) -> UrlPathResult<String> {
        let resolved = fs_path(path);
        fs::read_to_string(&resolved).map_err(|e| file_error(resolved, e))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn rmdir(&self, path: &UrlPath) -> UrlPathResult<()> {
        let resolved = fs_path(path);
        fs::remove_dir(&resolved).map_err(|e| file_error(resolved, e))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn unlink(&self, path: &UrlPath) -> UrlPathResult<()> {
        let resolved = fs_path(path);
        fs::remove_file(&resolved).map_err(|e| file_error(resolved, e))
    }

    fn write_bytes(&self, path: &UrlPath, data: &[u8]) -> UrlPathResult<()> {
        let resolved = fs_path(path);
        fs::write(&resolved, data).map_err(|e| file_error(resolved, e))
    }

    fn write_text(&self, path: &UrlPath, data: &str) -> UrlPathResult<()> {
        let resolved = fs_path(path);
        fs::write(&resolved, data).map_err(|e| file_error(resolved, e))
    }

    /// Expands a leading bare `~` segment from `$HOME`.
    /// `~user` forms and paths without a leading `~` pass through unchanged.
    fn expanduser(&self, path: &UrlPath) -> UrlPathResult<UrlPath> {
        if path.root().is_empty()
            && path.segments().first().is_some_and(|s| s == "~")
            && let Ok(home) = std::env::var("HOME")
        {
            let mut raw = vec![home];
            raw.extend(path.segments()[1..].iter().cloned());
            return Ok(UrlPath::from_parts(raw));
        }
        Ok(path.clone())
    }

    #[instrument(skip(self), fields(path = %path, pattern = %pattern))]
    fn glob(&self, path: &UrlPath, pattern: &str) -> UrlPathResult<Vec<UrlPath>> {
        if pattern.starts_with('/') {
            return Err(err!("non-relative glob patterns are unsupported"));
        }
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| err!("invalid glob pattern '{}': {}", pattern, e))?;
        let matcher = glob.compile_matcher();

        let base = fs_path(path);
        let mut rv = Vec::new();
        for entry in WalkDir::new(&base).min_depth(1) {
            let entry = entry.map_err(|e| {
                let entry_path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| base.clone());
                file_error(entry_path, std::io::Error::other(e.to_string()))
            })?;
            let Ok(relative) = entry.path().strip_prefix(&base) else {
                continue;
            };
            if matcher.is_match(relative) {
                rv.push(UrlPath::from(entry.path().to_string_lossy().into_owned()));
            }
        }
        debug!(matched = rv.len(), "glob completed");
        Ok(rv)
    }

    fn rglob(&self, path: &UrlPath, pattern: &str) -> UrlPathResult<Vec<UrlPath>> {
        self.glob(path, &format!("**/{}", pattern))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn iterdir(&self, path: &UrlPath) -> UrlPathResult<PathIter> {
        let resolved = fs_path(path);
        let entries = fs::read_dir(&resolved).map_err(|e| file_error(resolved.clone(), e))?;
        Ok(Box::new(entries.map(move |entry| match entry {
            Ok(entry) => Ok(UrlPath::from(entry.path().to_string_lossy().into_owned())),
            Err(e) => Err(file_error(resolved.clone(), e)),
        })))
    }

    #[instrument(skip(self), fields(path = %path, target = %target))]
    fn rename(&self, path: &UrlPath, target: &UrlPath) -> UrlPathResult<()> {
        let resolved = fs_path(path);
        fs::rename(&resolved, fs_path(target)).map_err(|e| file_error(resolved, e))
    }

    #[instrument(skip(self), fields(path = %path, target = %target))]
    fn replace(&self, path: &UrlPath, target: &UrlPath) -> UrlPathResult<()> {
        let resolved = fs_path(path);
        fs::rename(&resolved, fs_path(target)).map_err(|e| file_error(resolved, e))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn resolve(&self, path: &UrlPath) -> UrlPathResult<UrlPath> {
        let resolved = fs_path(path);
        let canonical = fs::canonicalize(&resolved).map_err(|e| file_error(resolved, e))?;
        Ok(UrlPath::from(canonical.to_string_lossy().into_owned()))
    }

    /// Only paths with an empty or `file` netloc can point at the same file.
    fn samefile(&self, path: &UrlPath, other: &UrlPath) -> UrlPathResult<bool> {
        if !(other.netloc().is_empty() || other.netloc() == "file") {
            return Ok(false);
        }
        let own = fs_path(path);
        let theirs = fs_path(other);
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            let a = fs::metadata(&own).map_err(|e| file_error(own, e))?;
            let b = fs::metadata(&theirs).map_err(|e| file_error(theirs, e))?;
            Ok(a.dev() == b.dev() && a.ino() == b.ino())
        }
        #[cfg(not(unix))]
        {
            let a = fs::canonicalize(&own).map_err(|e| file_error(own, e))?;
            let b = fs::canonicalize(&theirs).map_err(|e| file_error(theirs, e))?;
            Ok(a == b)
        }
    }

    #[instrument(skip(self), fields(path = %path, target = %target))]
    fn symlink_to(
        &self,
        path: &UrlPath,
        target: &UrlPath,
        target_is_directory: bool,
    ) -> UrlPathResult<()> {
        let link = fs_path(path);
        let original = fs_path(target);
        #[cfg(unix)]
        {
            let _ = target_is_directory;
            std::os::unix::fs::symlink(&original, &link).map_err(|e| file_error(link, e))
        }
        #[cfg(windows)]
        {
            if target_is_directory {
                std::os::windows::fs::symlink_dir(&original, &link)
                    .map_err(|e| file_error(link, e))
            } else {
                std::os::windows::fs::symlink_file(&original, &link)
                    .map_err(|e| file_error(link, e))
            }
        }
        #[cfg(not(any(unix, windows)))]
        {
            let _ = (original, link, target_is_directory);
            Err(err!("symlink_to() is not supported on this platform"))
        }
    }
}
