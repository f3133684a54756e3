//! ColourLovers palette API client

use palette_core::{FetchError, get_text, http_client};

use crate::schema::{PageRequest, RawRecord};

/// Top-rated palettes endpoint
pub const DEFAULT_BASE_URL: &str = "http://www.colourlovers.com/api/palettes/top";

/// Largest `numResults` the API honors per request
pub const MAX_PAGE_SIZE: usize = 100;

/// Anything that can hand back one page of records.
///
/// Implemented by [`ColourLoversClient`] for live use and by plain closures
/// for fixtures.
pub trait PageSource {
    fn fetch_page(&self, request: PageRequest) -> Result<Vec<RawRecord>, FetchError>;
}

impl<F> PageSource for F
where
    F: Fn(PageRequest) -> Result<Vec<RawRecord>, FetchError>,
{
    fn fetch_page(&self, request: PageRequest) -> Result<Vec<RawRecord>, FetchError> {
        self(request)
    }
}

/// HTTP page source. One attempt per page, no retry.
#[derive(Debug, Clone)]
pub struct ColourLoversClient {
    base_url: String,
    client: reqwest::Client,
}

impl ColourLoversClient {
    /// Client on the shared connection pool
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, http_client().clone())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn page_request(&self, request: PageRequest) -> reqwest::RequestBuilder {
        self.client
            .get(&self.base_url)
            .query(&[("format", "json"), ("showPaletteWidths", "1")])
            .query(&[
                ("numResults", request.page_size),
                ("resultOffset", request.offset),
            ])
    }
}

impl Default for ColourLoversClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PageSource for ColourLoversClient {
    fn fetch_page(&self, request: PageRequest) -> Result<Vec<RawRecord>, FetchError> {
        log::debug!(
            "GET {} offset={} size={}",
            self.base_url,
            request.offset,
            request.page_size
        );
        let body = get_text(self.page_request(request))?;
        let records: Vec<RawRecord> = serde_json::from_str(&body)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serve exactly one HTTP response, returning the request line seen.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut seen = Vec::new();
            let mut chunk = [0u8; 1024];
            while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                seen.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&seen)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });
        (format!("http://{addr}/api/palettes/top"), handle)
    }

    fn local_client(url: &str) -> ColourLoversClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        ColourLoversClient::with_client(url, client)
    }

    fn page(offset: usize, page_size: usize) -> PageRequest {
        PageRequest { offset, page_size }
    }

    #[test]
    fn request_carries_paging_params() {
        let client = ColourLoversClient::default();
        let req = client.page_request(page(200, 100)).build().unwrap();
        assert_eq!(req.url().path(), "/api/palettes/top");
        assert_eq!(
            req.url().query(),
            Some("format=json&showPaletteWidths=1&numResults=100&resultOffset=200")
        );
    }

    #[test]
    fn fetch_decodes_records() {
        let (url, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"title":"a","colors":["111111","222222"],"colorWidths":[0.5,0.5],"url":"u"}]"#,
        );
        let records = local_client(&url).fetch_page(page(20, 10)).unwrap();
        let request_line = server.join().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].colors, vec!["111111", "222222"]);
        assert_eq!(
            request_line,
            "GET /api/palettes/top?format=json&showPaletteWidths=1&numResults=10&resultOffset=20 HTTP/1.1"
        );
    }

    #[test]
    fn empty_page_is_ok() {
        let (url, server) = serve_once("200 OK", "[]");
        let records = local_client(&url).fetch_page(page(0, 10)).unwrap();
        server.join().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn server_error_keeps_status() {
        let (url, server) = serve_once("503 Service Unavailable", "");
        let err = local_client(&url).fetch_page(page(0, 10)).unwrap_err();
        server.join().unwrap();
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn non_array_body_is_decode_error() {
        let (url, server) = serve_once("200 OK", r#"{"error":"rate limited"}"#);
        let err = local_client(&url).fetch_page(page(0, 10)).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn closure_is_a_page_source() {
        let source = |req: PageRequest| -> Result<Vec<RawRecord>, FetchError> {
            assert_eq!(req.offset, 7);
            Ok(Vec::new())
        };
        assert!(source.fetch_page(page(7, 3)).unwrap().is_empty());
    }
}
