use crate::http::status::Status;
use std::io;
use thiserror::Error;

/// Reasons the request parser rejects a request head.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("request has fewer than 3 space-separated tokens")]
    TooFewTokens,
    #[error("unknown HTTP method: {0:?}")]
    UnknownMethod(String),
    #[error("unsupported protocol token: {0:?}")]
    UnsupportedVersion(String),
    #[error("request head is not valid UTF-8")]
    InvalidEncoding,
}

/// Failures local to one request/response cycle. Each maps to one status line.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] RequestError),
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    #[error("bad parameter: {0}")]
    BadParameter(String),
    #[error("upload failed: {0}")]
    UploadFailure(#[source] io::Error),
}

impl HttpError {
    pub fn status(&self) -> Status {
        match self {
            HttpError::MalformedRequest(_) => Status::BAD_REQUEST,
            HttpError::ResourceNotFound(_) => Status::NOT_FOUND,
            HttpError::BadParameter(_) => Status::BAD_REQUEST,
            HttpError::UploadFailure(_) => Status::BAD_REQUEST,
        }
    }

    pub(crate) fn upload(kind: io::ErrorKind, msg: &str) -> HttpError {
        HttpError::UploadFailure(io::Error::new(kind, msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_has_a_status() {
        let malformed = HttpError::from(RequestError::TooFewTokens);
        assert_eq!(malformed.status(), Status::BAD_REQUEST);
        assert_eq!(
            HttpError::ResourceNotFound("/nope".into()).status(),
            Status::NOT_FOUND
        );
        assert_eq!(
            HttpError::BadParameter("abc".into()).status(),
            Status::BAD_REQUEST
        );
        assert_eq!(
            HttpError::upload(io::ErrorKind::UnexpectedEof, "short body").status(),
            Status::BAD_REQUEST
        );
    }
}
