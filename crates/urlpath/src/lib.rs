/* 📖 # Why one urlpath library crate?

urlpath represents local file paths and remote http(s) resources under a
single polymorphic path type. The pure value type, the per-scheme backends
and the shared error handling all live here so that every consumer gets the
same dispatch and error semantics.
*/

pub mod error;
mod io;
mod parse;
pub mod path;
mod path_tests;
pub mod schemes;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, ResultExt, UrlPathError, UrlPathResult};
pub use path::{PathPart, UrlPath};
pub use schemes::{FileBackend, HttpBackend, OpenMode, SCHEME_ALIAS, SchemeBackend, Stream};
