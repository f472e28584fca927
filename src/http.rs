pub mod content_type;
pub mod error;
pub mod handler;
pub mod method;
mod parse;
pub mod request;
pub mod router;
pub mod server;
pub mod status;

use status::Status;

pub(crate) const BUFFER_SIZE: usize = 1024;

#[derive(Debug, PartialEq)]
pub struct Response {
    pub status: Status,
    /// Header lines without their line breaks, in output order.
    pub headers: Vec<String>,
    /// `None` means no body and no `Content-Length`.
    pub content: Option<Vec<u8>>,
}

impl Response {
    pub fn from_parts(status: Status, headers: Vec<String>, content: Option<Vec<u8>>) -> Response {
        Response {
            status,
            headers,
            content,
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        let content_len = self.content.as_ref().map(|c| c.len()).unwrap_or(0);
        let mut resp_bytes = Vec::with_capacity(content_len + 32 + self.headers.len() * 32);

        resp_bytes.extend(format!("HTTP/1.1 {}\r\n", self.status).as_bytes());

        for line in &self.headers {
            resp_bytes.extend(line.as_bytes());
            resp_bytes.extend(b"\r\n");
        }

        if let Some(c) = &self.content {
            resp_bytes.extend(format!("Content-Length:{}\r\n\r\n", c.len()).as_bytes());
            resp_bytes.extend(c);
        } else {
            resp_bytes.extend(b"\r\n");
        }

        resp_bytes
    }
}

/// The only success path: `200 OK`, optional content type, exact length.
pub fn ok(content_type: Option<String>, content: Vec<u8>) -> Response {
    Response::from_parts(Status::OK, content_type.into_iter().collect(), Some(content))
}

pub fn moved() -> Response {
    Response::from_parts(
        Status::MOVED_TEMPORARILY,
        vec!["Location: /".to_string()],
        None,
    )
}

/// Status line only, no headers and no body.
pub fn status_only(status: Status) -> Response {
    Response::from_parts(status, Vec::new(), None)
}

pub fn not_found() -> Response {
    status_only(Status::NOT_FOUND)
}

pub fn bad_request() -> Response {
    status_only(Status::BAD_REQUEST)
}
