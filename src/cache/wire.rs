//! Wire-level HTTP response encoding
//!
//! Cache files hold complete responses (status line, headers, blank line,
//! body) rather than bare bodies, so an entry can be reparsed as the response
//! the server originally sent.

use crate::{CatechismError, Result};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE,
    TRANSFER_ENCODING,
};
use reqwest::{StatusCode, Version};

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// A complete HTTP response as stored in the page cache
#[derive(Debug, Clone, PartialEq)]
pub struct WireResponse {
    pub version: Version,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl WireResponse {
    /// Creates an HTTP/1.1 HTML response with the given status and body
    pub fn html(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        Self {
            version: Version::HTTP_11,
            status,
            headers,
            body: body.into(),
        }
    }

    /// The body decoded as text, with invalid UTF-8 replaced
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Serializes the response to its wire form
    ///
    /// The body is stored already decoded, so `content-encoding` and
    /// `transfer-encoding` are dropped and `content-length` is rewritten to
    /// the stored length.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len() + 512);

        let status_line = format!(
            "{} {} {}\r\n",
            version_str(self.version),
            self.status.as_str(),
            self.status.canonical_reason().unwrap_or("")
        );
        out.extend_from_slice(status_line.as_bytes());

        for (name, value) in &self.headers {
            if name == CONTENT_ENCODING || name == TRANSFER_ENCODING || name == CONTENT_LENGTH {
                continue;
            }
            out.extend_from_slice(name.as_str().as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("content-length: {}\r\n", self.body.len()).as_bytes());
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.body);

        out
    }

    /// Parses a response previously written by [`WireResponse::to_bytes`]
    ///
    /// `key` names the cache entry in error messages.
    ///
    /// # Errors
    ///
    /// Returns `CatechismError::Parse` if the header block is unterminated,
    /// the status line or a header is malformed, or the body is shorter than
    /// its `content-length`.
    pub fn from_bytes(key: &str, bytes: &[u8]) -> Result<Self> {
        let parse_error = |message: String| CatechismError::Parse {
            key: key.to_string(),
            message,
        };

        let split = bytes
            .windows(HEADER_TERMINATOR.len())
            .position(|window| window == HEADER_TERMINATOR)
            .ok_or_else(|| parse_error("missing end of headers".to_string()))?;

        let head = &bytes[..split];
        let rest = &bytes[split + HEADER_TERMINATOR.len()..];

        let mut lines = head
            .split(|b| *b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line));

        let status_line = lines.next().unwrap_or_default();
        let status_line = std::str::from_utf8(status_line)
            .map_err(|_| parse_error("status line is not valid UTF-8".to_string()))?;
        let (version, status) = parse_status_line(status_line).map_err(parse_error)?;

        let mut headers = HeaderMap::new();
        for line in lines {
            let colon = line.iter().position(|b| *b == b':').ok_or_else(|| {
                parse_error(format!(
                    "header without ':': {}",
                    String::from_utf8_lossy(line)
                ))
            })?;

            let name = HeaderName::from_bytes(line[..colon].trim_ascii())
                .map_err(|e| parse_error(format!("invalid header name: {}", e)))?;
            let value = HeaderValue::from_bytes(line[colon + 1..].trim_ascii())
                .map_err(|e| parse_error(format!("invalid value for {}: {}", name, e)))?;
            headers.append(name, value);
        }

        let body = match headers.get(CONTENT_LENGTH) {
            Some(length) => {
                let expected: usize = length
                    .to_str()
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| parse_error("invalid content-length".to_string()))?;
                if rest.len() < expected {
                    return Err(parse_error(format!(
                        "truncated body: expected {} bytes, found {}",
                        expected,
                        rest.len()
                    )));
                }
                rest[..expected].to_vec()
            }
            None => rest.to_vec(),
        };

        Ok(Self {
            version,
            status,
            headers,
            body,
        })
    }
}

fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_09 {
        "HTTP/0.9"
    } else if version == Version::HTTP_10 {
        "HTTP/1.0"
    } else if version == Version::HTTP_2 {
        "HTTP/2.0"
    } else if version == Version::HTTP_3 {
        "HTTP/3.0"
    } else {
        "HTTP/1.1"
    }
}

fn parse_status_line(line: &str) -> std::result::Result<(Version, StatusCode), String> {
    let mut parts = line.splitn(3, ' ');

    let version = match parts.next().unwrap_or_default() {
        "HTTP/0.9" => Version::HTTP_09,
        "HTTP/1.0" => Version::HTTP_10,
        "HTTP/1.1" => Version::HTTP_11,
        "HTTP/2" | "HTTP/2.0" => Version::HTTP_2,
        "HTTP/3" | "HTTP/3.0" => Version::HTTP_3,
        other => return Err(format!("unknown HTTP version '{}'", other)),
    };

    let code = parts.next().unwrap_or_default();
    let status = code
        .parse::<u16>()
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| format!("invalid status code '{}'", code))?;

    Ok((version, status))
}
