use crate::config::ServerConfig;
use crate::http::content_type::{self, TEXT_PLAIN_HEADER};
use crate::http::error::HttpError;
use crate::http::request::Request;
use crate::http::router::Route;
use crate::http::{self, BUFFER_SIZE, Response};
use anyhow::Context;
use log::{info, warn};
use std::cmp::min;
use std::fs;
use std::io::{self, ErrorKind, Read};
use std::path::{Component, Path};

/// Request body source: whatever arrived together with the head, then the
/// connection itself.
pub struct Body<'a, R: Read> {
    pub buffered: &'a [u8],
    pub reader: &'a mut R,
}

/// Runs the handler picked by the router.
///
/// Request-level failures become their status response here. Only a failed
/// read of an already resolved static file escapes as an error.
pub fn dispatch<R: Read>(
    route: Route,
    req: &Request,
    config: &ServerConfig,
    body: Body<'_, R>,
) -> anyhow::Result<Response> {
    let result = match route {
        Route::Redirect => Ok(http::moved()),
        Route::Canned(status) => Ok(http::status_only(status)),
        Route::NotFound { path } => Err(HttpError::ResourceNotFound(path)),
        Route::Static { path, extension } => return static_file(&path, &extension),
        Route::NextNumber { arg } => next_number(&arg),
        Route::Area { height, width } => area(&height, &width),
        Route::Upload { file_name } => upload(
            &config.upload_dir,
            &file_name,
            &req.headers.content_length,
            config.max_upload,
            body,
        ),
        Route::Image { file_name } => image(&config.upload_dir, &file_name),
    };

    Ok(result.unwrap_or_else(|e| {
        warn!("{} -> {}", req.target, e);
        http::status_only(e.status())
    }))
}

pub fn static_file(path: &Path, extension: &str) -> anyhow::Result<Response> {
    let data = fs::read(path).with_context(|| format!("Can't read {}", path.display()))?;
    Ok(http::ok(content_type::header_for(extension), data))
}

pub fn next_number(arg: &str) -> Result<Response, HttpError> {
    let num: i64 = arg
        .trim()
        .parse()
        .map_err(|_| HttpError::BadParameter(format!("num={}", arg)))?;
    let next = num
        .checked_add(1)
        .ok_or_else(|| HttpError::BadParameter(format!("num={} overflows", arg)))?;

    Ok(http::ok(
        Some(TEXT_PLAIN_HEADER.to_string()),
        next.to_string().into_bytes(),
    ))
}

pub fn area(height: &str, width: &str) -> Result<Response, HttpError> {
    let parse = |name: &str, v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|_| HttpError::BadParameter(format!("{}={}", name, v)))
    };
    let height = parse("height", height)?;
    let width = parse("width", width)?;

    Ok(http::ok(
        Some(TEXT_PLAIN_HEADER.to_string()),
        format_float(0.5 * height * width).into_bytes(),
    ))
}

/// Integral values keep one decimal place: `6.0`, not `6`. Magnitudes from
/// `1e16` up and below `1e-4` switch to exponent form: `1e+16`, `2.5e-05`.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        (if v > 0.0 { "inf" } else { "-inf" }).to_string()
    } else if v != 0.0 && (v.abs() >= 1e16 || v.abs() < 1e-4) {
        exponent_form(v)
    } else if v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

fn exponent_form(v: f64) -> String {
    let formatted = format!("{:e}", v);
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

pub fn upload<R: Read>(
    upload_dir: &Path,
    file_name: &str,
    content_length: &str,
    max_upload: usize,
    body: Body<'_, R>,
) -> Result<Response, HttpError> {
    let name = plain_file_name(file_name)
        .ok_or_else(|| HttpError::upload(ErrorKind::InvalidInput, "invalid file name"))?;

    let length: usize = content_length
        .trim()
        .parse()
        .map_err(|_| HttpError::upload(ErrorKind::InvalidData, "invalid Content-Length"))?;
    if length > max_upload {
        return Err(HttpError::upload(
            ErrorKind::InvalidData,
            "Content-Length exceeds upload limit",
        ));
    }

    let content = read_content(body, length).map_err(HttpError::UploadFailure)?;

    fs::write(upload_dir.join(name), &content).map_err(HttpError::UploadFailure)?;
    info!("stored upload {} ({} bytes)", file_name, content.len());

    Ok(http::ok(None, Vec::new()))
}

/// Reads exactly `content_length` bytes, starting with the buffered ones.
fn read_content<R: Read>(body: Body<'_, R>, content_length: usize) -> io::Result<Vec<u8>> {
    let mut content = Vec::with_capacity(content_length);
    content.extend_from_slice(&body.buffered[..min(body.buffered.len(), content_length)]);

    let mut buf = [0u8; BUFFER_SIZE];
    while content.len() < content_length {
        let want = min(BUFFER_SIZE, content_length - content.len());
        let bytes_read = match body.reader.read(&mut buf[..want]) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if bytes_read == 0 {
            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                format!(
                    "connection closed after {} of {} bytes",
                    content.len(),
                    content_length
                ),
            ));
        }
        content.extend_from_slice(&buf[..bytes_read]);
    }
    Ok(content)
}

pub fn image(upload_dir: &Path, file_name: &str) -> Result<Response, HttpError> {
    let not_found = || HttpError::ResourceNotFound(file_name.to_string());
    let name = plain_file_name(file_name).ok_or_else(not_found)?;
    let data = fs::read(upload_dir.join(name)).map_err(|_| not_found())?;
    Ok(http::ok(None, data))
}

/// A single normal path component, so joining it never leaves the directory.
fn plain_file_name(name: &str) -> Option<&Path> {
    let path = Path::new(name);
    let mut comps = path.components();
    match (comps.next(), comps.next()) {
        (Some(Component::Normal(_)), None) => Some(path),
        _ => None,
    }
}
