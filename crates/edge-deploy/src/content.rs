//! Artifact content acquisition
//!
//! A locator is either an http(s) URL or a filesystem path. Both are read
//! fully into memory.

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::error::ContentError;

/// Blocking HTTP GET used for remote locators
pub trait HttpTransport: Send + Sync {
    /// Fetch the full body of `url`, failing on non-2xx responses
    fn get(&self, url: &Url) -> Result<Bytes, ContentError>;
}

/// `HttpTransport` backed by a blocking reqwest client
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Transport with no request timeout
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Transport whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<Bytes, ContentError> {
        let http_err = |source| ContentError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.bytes().map_err(http_err)
    }
}

/// Parse `locator` as a remote URL if it uses a recognized scheme
fn remote_url(locator: &str) -> Option<Url> {
    Url::parse(locator)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// Whether `locator` is fetched over the network rather than from disk
pub fn is_remote(locator: &str) -> bool {
    remote_url(locator).is_some()
}

/// Reads artifact bytes from disk or over HTTP
pub struct ContentSource {
    transport: Box<dyn HttpTransport>,
}

impl ContentSource {
    /// Content source using the given transport for remote locators
    pub fn new(transport: impl HttpTransport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Fetch the full contents behind `locator`
    pub fn fetch(&self, locator: &str) -> Result<Bytes, ContentError> {
        match remote_url(locator) {
            Some(url) => {
                tracing::debug!("Fetching remote content: {}", url);
                self.transport.get(&url)
            }
            None => read_local(Path::new(locator)),
        }
    }
}

impl Default for ContentSource {
    fn default() -> Self {
        Self::new(ReqwestTransport::new())
    }
}

fn read_local(path: &Path) -> Result<Bytes, ContentError> {
    tracing::debug!("Reading local content: {:?}", path);
    std::fs::read(path)
        .map(Bytes::from)
        .map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Transport that serves canned bodies and records every URL requested
    #[derive(Clone, Default)]
    pub(crate) struct StubTransport {
        pub bodies: Arc<HashMap<String, Vec<u8>>>,
        pub requested: Arc<Mutex<Vec<String>>>,
    }

    impl StubTransport {
        pub fn serving(url: &str, body: &[u8]) -> Self {
            let mut bodies = HashMap::new();
            bodies.insert(url.to_string(), body.to_vec());
            Self {
                bodies: Arc::new(bodies),
                requested: Arc::default(),
            }
        }
    }

    impl HttpTransport for StubTransport {
        fn get(&self, url: &Url) -> Result<Bytes, ContentError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.bodies
                .get(url.as_str())
                .map(|body| Bytes::from(body.clone()))
                .ok_or_else(|| ContentError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("http://example.com/hello.js"));
        assert!(is_remote("https://example.com/hello.js"));
        assert!(!is_remote("src/hello.js"));
        assert!(!is_remote("/tmp/hello.js"));
        assert!(!is_remote("httpd/hello.js"));
        assert!(!is_remote("ftp://example.com/hello.js"));
    }

    #[test]
    fn test_fetch_local_returns_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        let raw = [0u8, 159, 146, 150, b'\n', 0xff];
        std::fs::write(&path, raw).unwrap();

        let source = ContentSource::new(StubTransport::default());
        let content = source.fetch(path.to_str().unwrap()).unwrap();
        assert_eq!(&content[..], &raw[..]);
    }

    #[test]
    fn test_fetch_missing_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.js");

        let source = ContentSource::new(StubTransport::default());
        let err = source.fetch(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[test]
    fn test_fetch_url_dispatches_to_transport() {
        let url = "http://localhost/hello.js";
        let transport = StubTransport::serving(url, b"remote");
        let requested = transport.requested.clone();
        let source = ContentSource::new(transport);

        let content = source.fetch(url).unwrap();
        assert_eq!(&content[..], b"remote");
        assert_eq!(*requested.lock().unwrap(), vec![url.to_string()]);
    }

    #[test]
    fn test_fetch_url_ignores_local_file_with_same_name() {
        let url = "http://localhost/hello.js";
        let dir = tempfile::tempdir().unwrap();
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        // Relative to the working directory the locator also names this file
        std::fs::create_dir_all("http:/localhost").unwrap();
        std::fs::write("http:/localhost/hello.js", "local").unwrap();
        let local_exists = Path::new(url).is_file();

        let transport = StubTransport::serving(url, b"remote");
        let requested = transport.requested.clone();
        let result = ContentSource::new(transport).fetch(url);
        std::env::set_current_dir(original).unwrap();

        assert!(local_exists);
        assert_eq!(&result.unwrap()[..], b"remote");
        assert_eq!(*requested.lock().unwrap(), vec![url.to_string()]);
    }

    #[test]
    fn test_fetch_url_error_status_propagates() {
        let source = ContentSource::new(StubTransport::default());
        let err = source.fetch("https://example.com/missing.zip").unwrap_err();
        assert!(matches!(err, ContentError::Status { status: 404, .. }));
    }
}
