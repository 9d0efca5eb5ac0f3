use regex::Regex;
use tracing::{debug, instrument};

use crate::err;
use crate::error::{ErrorKind, UrlPathError, UrlPathResult};
use crate::path::UrlPath;

use super::{OpenMode, PathIter, SchemeBackend, Stream};

/* 📖 # What can the http backend do?

Only what a plain HTTP client can express: existence via HEAD, directory
listing via anchor scraping on HTML pages, and read-only binary open via
GET. Everything else stays at the trait default and reports unsupported.
glob() is a deliberate no-op (server-side globbing is not a meaningful
network operation) while rglob() is not overridden at all; the asymmetry
is inherited from the reference behavior.
*/

/// The fixed anchor-scraping pattern used by `iterdir`.
const HREF_PATTERN: &str = r#"<a href="([^"]+)">"#;

/// Backend for the `http` scheme (and the `https` alias).
#[derive(Debug)]
pub struct HttpBackend;

fn transport_error(url: &str, source: reqwest::Error) -> Box<UrlPathError> {
    Box::new(UrlPathError::new(ErrorKind::HttpError {
        url: url.to_string(),
        source,
    }))
}

/// Builds a fresh blocking client; backends hold no state between calls.
fn client(url: &str) -> UrlPathResult<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .build()
        .map_err(|e| transport_error(url, e))
}

impl SchemeBackend for HttpBackend {
    /// Issues a HEAD request; an HTTP error status means "does not exist",
    /// transport failures propagate.
    #[instrument(skip(self), fields(path = %path))]
    fn exists(&self, path: &UrlPath) -> UrlPathResult<bool> {
        let url = path.to_string();
        let response = client(&url)?
            .head(&url)
            .send()
            .map_err(|e| transport_error(&url, e))?;
        let status = response.status();
        debug!(status = status.as_u16(), "HEAD request completed");
        Ok(status.as_u16() < 400)
    }

    /// Scrapes anchors off an HTML page, yielding only depth-1 children.
    /// Non-HTML content types produce an empty listing.
    #[instrument(skip(self), fields(path = %path))]
    fn iterdir(&self, path: &UrlPath) -> UrlPathResult<PathIter> {
        let url = path.to_string();
        let client = client(&url)?;

        let head = client
            .head(&url)
            .send()
            .map_err(|e| transport_error(&url, e))?
            .error_for_status()
            .map_err(|e| transport_error(&url, e))?;
        let content_type = head
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("html") {
            debug!(content_type, "skipping non-html listing");
            return Ok(Box::new(std::iter::empty()));
        }

        let body = client
            .get(&url)
            .send()
            .map_err(|e| transport_error(&url, e))?
            .error_for_status()
            .map_err(|e| transport_error(&url, e))?
            .bytes()
            .map_err(|e| transport_error(&url, e))?;
        let content = String::from_utf8(body.to_vec())
            .map_err(|_| err!("response body of '{}' is not valid UTF-8", url))?;

        let href = Regex::new(HREF_PATTERN).map_err(|e| err!("invalid href pattern: {}", e))?;
        let mut children = Vec::new();
        for capture in href.captures_iter(&content) {
            let mut child = UrlPath::from(&capture[1]);
            // rebuild the complete url
            if !child.is_absolute() {
                child = path.join(child);
            }
            // ensure the yield depth is 1
            if &child.parent() == path {
                children.push(child);
            }
        }
        debug!(count = children.len(), "collected listing entries");
        Ok(Box::new(children.into_iter().map(Ok)))
    }

    /// Read-only binary access to the resource body via GET.
    #[instrument(skip(self), fields(path = %path, mode = ?mode))]
    fn open(&self, path: &UrlPath, mode: OpenMode) -> UrlPathResult<Stream> {
        if mode != OpenMode::Read {
            return Err(Box::new(UrlPathError::new(ErrorKind::UnsupportedMode {
                message: "http open() only supports read-only access".to_string(),
            })));
        }
        let url = path.to_string();
        let response = client(&url)?
            .get(&url)
            .send()
            .map_err(|e| transport_error(&url, e))?
            .error_for_status()
            .map_err(|e| transport_error(&url, e))?;
        Ok(Stream::Reader(Box::new(response)))
    }

    /// Deliberately a no-op, not an alias for iterdir().
    fn glob(&self, _path: &UrlPath, _pattern: &str) -> UrlPathResult<Vec<UrlPath>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    /// Serves the given (path, content-type, body) pages on a loopback
    /// socket; anything else answers 404. Returns the base URL.
    fn spawn_test_server(pages: &'static [(&'static str, &'static str, &'static str)]) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("failed to bind test server");
        let port = server.server_addr().to_ip().unwrap().port();
        thread::spawn(move || {
            for request in server.incoming_requests() {
                let url = request.url().to_string();
                match pages.iter().find(|(page, _, _)| *page == url) {
                    Some((_, content_type, body)) => {
                        let header = tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            content_type.as_bytes(),
                        )
                        .unwrap();
                        let response = tiny_http::Response::new(
                            tiny_http::StatusCode(200),
                            vec![header],
                            std::io::Cursor::new(body.as_bytes().to_vec()),
                            Some(body.len()),
                            None,
                        );
                        let _ = request.respond(response);
                    }
                    None => {
                        let _ = request.respond(tiny_http::Response::empty(404));
                    }
                }
            }
        });
        format!("http://127.0.0.1:{}", port)
    }

    /// A loopback URL with nothing listening behind it.
    fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}/gone", port)
    }

    #[test]
    fn test_exists_on_200() {
        let base = spawn_test_server(&[("/present.txt", "text/plain", "here")]);
        let path = UrlPath::from(format!("{}/present.txt", base));
        assert!(path.exists().unwrap());
    }

    #[test]
    fn test_exists_on_404() {
        let base = spawn_test_server(&[]);
        let path = UrlPath::from(format!("{}/missing.txt", base));
        assert!(!path.exists().unwrap());
    }

    #[test]
    fn test_exists_propagates_transport_errors() {
        let path = UrlPath::from(refused_url());
        let error = path.exists().unwrap_err();
        match error.kind() {
            ErrorKind::HttpError { .. } => {}
            other => panic!("expected HttpError, got {:?}", other),
        }
    }

    #[test]
    fn test_iterdir_yields_depth_one_children() {
        let base = spawn_test_server(&[(
            "/",
            "text/html",
            r#"<html><a href="a.txt">a</a><a href="b.txt">b</a><a href="sub/deep.txt">deep</a><a href="http://elsewhere.example/x">away</a></html>"#,
        )]);
        let path = UrlPath::from(format!("{}/", base));

        let children: Vec<UrlPath> = path
            .iterdir()
            .unwrap()
            .collect::<UrlPathResult<Vec<_>>>()
            .unwrap();
        assert_eq!(
            children,
            vec![path.join("a.txt"), path.join("b.txt")],
            "only depth-1 links below the listed path are yielded"
        );
    }

    #[test]
    fn test_iterdir_skips_non_html() {
        let base = spawn_test_server(&[("/data.csv", "text/csv", "a,b\n1,2\n")]);
        let path = UrlPath::from(format!("{}/data.csv", base));

        let children: Vec<_> = path.iterdir().unwrap().collect();
        assert!(children.is_empty());
    }

    #[test]
    fn test_iterdir_propagates_error_status() {
        let base = spawn_test_server(&[]);
        let path = UrlPath::from(format!("{}/nope/", base));
        assert!(path.iterdir().is_err());
    }

    #[test]
    fn test_open_reads_body() {
        let base = spawn_test_server(&[("/body.bin", "application/octet-stream", "payload")]);
        let path = UrlPath::from(format!("{}/body.bin", base));

        let mut reader = path.open(OpenMode::Read).unwrap().into_reader().unwrap();
        let mut contents = String::new();
        reader.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "payload");
    }

    #[test]
    fn test_open_rejects_write_modes() {
        let path = UrlPath::new("http://example.com/file");
        for mode in [OpenMode::Write, OpenMode::Append] {
            let error = path.open(mode).unwrap_err();
            match error.kind() {
                ErrorKind::UnsupportedMode { message } => {
                    assert_eq!(message, "http open() only supports read-only access");
                }
                other => panic!("expected UnsupportedMode, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_open_propagates_error_status() {
        let base = spawn_test_server(&[]);
        let path = UrlPath::from(format!("{}/absent.bin", base));
        assert!(path.open(OpenMode::Read).is_err());
    }

    #[test]
    fn test_glob_is_a_no_op() {
        let path = UrlPath::new("http://example.com/dir");
        assert!(path.glob("*.txt").unwrap().is_empty());
    }

    #[test]
    fn test_rglob_is_unsupported() {
        let path = UrlPath::new("http://example.com/dir");
        let error = path.rglob("*.txt").unwrap_err();
        assert_eq!(
            error.to_string(),
            "rglob() is not available for 'http' scheme"
        );
    }

    #[test]
    fn test_mkdir_is_unsupported() {
        let path = UrlPath::new("http://example.com/dir");
        let error = path.mkdir().unwrap_err();
        assert_eq!(
            error.to_string(),
            "mkdir() is not available for 'http' scheme"
        );
    }
}
