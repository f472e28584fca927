use crate::http::error::RequestError;
use crate::http::method::Method;
use std::str::FromStr;

/// The version token must start with exactly this, line break included.
pub const PROTOCOL_TOKEN: &str = "HTTP/1.1\r\n";

const CONTENT_TYPE: &str = "Content-Type:";
const CONTENT_LENGTH: &str = "Content-Length:";

/// The only two headers the server looks at. Missing values are empty strings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Headers {
    pub content_type: String,
    pub content_length: String,
}

impl Headers {
    /// Forward scan over every token; a later occurrence of a name overwrites
    /// an earlier one.
    fn scan(tokens: &[&str]) -> Headers {
        let mut headers = Headers::default();
        for pair in tokens.windows(2) {
            let (name, value) = (pair[0], header_value(pair[1]));
            if name.ends_with(CONTENT_TYPE) {
                headers.content_type = value.to_string();
            }
            if name.ends_with(CONTENT_LENGTH) {
                headers.content_length = value.to_string();
            }
        }
        headers
    }
}

fn header_value(token: &str) -> &str {
    token.split_once("\r\n").map_or(token, |(value, _)| value)
}

#[derive(Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path and query exactly as received, not percent-decoded.
    pub target: String,
    pub headers: Headers,
}

impl Request {
    /// Tokenizes the head by splitting the whole text on single spaces.
    ///
    /// Spaces inside the target are not special-cased, so `GET /a b HTTP/1.1`
    /// yields the target `/a` and fails the protocol check on `b`.
    pub fn parse(raw: &str) -> Result<Request, RequestError> {
        let tokens: Vec<&str> = raw.split(' ').collect();

        let [method_raw, target, version, ..] = tokens[..] else {
            return Err(RequestError::TooFewTokens);
        };

        let method = Method::from_str(method_raw)
            .map_err(|_| RequestError::UnknownMethod(method_raw.to_string()))?;

        if !version.starts_with(PROTOCOL_TOKEN) {
            return Err(RequestError::UnsupportedVersion(version.to_string()));
        }

        let headers = match method {
            Method::GET => Headers::default(),
            Method::POST => Headers::scan(&tokens),
        };

        Ok(Request {
            method,
            target: target.to_string(),
            headers,
        })
    }

    pub fn from_bytes(head: &[u8]) -> Result<Request, RequestError> {
        let raw = std::str::from_utf8(head).map_err(|_| RequestError::InvalidEncoding)?;
        Self::parse(raw)
    }
}
