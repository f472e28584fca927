use crate::config::ServerConfig;
use crate::http::error::HttpError;
use crate::http::handler::{self, Body};
use crate::http::request::Request;
use crate::http::router::Router;
use crate::http::{self, BUFFER_SIZE, Response};
use anyhow::Context;
use bytes::{Bytes, BytesMut};
use log::{debug, error, info, warn};
use std::io::{self, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";
const MAX_HEAD_SIZE: usize = 100 * BUFFER_SIZE;

/// A request head through its blank line, plus any body bytes that came
/// with it.
struct RawRequest {
    head: Bytes,
    rest: Bytes,
}

pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
}

impl Server {
    pub fn bind(config: ServerConfig) -> anyhow::Result<Server> {
        let listener = TcpListener::bind(&config.addr)
            .with_context(|| format!("Can't bind address {}", config.addr))?;
        Ok(Server { listener, config })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves one connection at a time, each to completion.
    pub fn run(&self) -> anyhow::Result<()> {
        info!("listening for connections on {}", self.local_addr()?);
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(e) = self.process_incoming(stream) {
                        error!("connection failed: {:#}", e);
                    }
                }
                Err(e) => warn!("accept failed: {}", e),
            }
        }
        Ok(())
    }

    fn process_incoming(&self, mut stream: TcpStream) -> anyhow::Result<()> {
        stream
            .set_read_timeout(Some(self.config.read_timeout))
            .context("Can't set read timeout")?;

        info!("accepted new connection: {:?}", stream.peer_addr());
        let result = self.handle_connection(&mut stream);
        debug!("closing connection");
        result
    }

    /// Reads one request, writes at most one response. A peer that goes away
    /// before the head is complete gets nothing.
    pub fn handle_connection<S: Read + Write>(&self, stream: &mut S) -> anyhow::Result<()> {
        let raw = match read_request(stream).context("Error while reading request")? {
            Some(raw) => raw,
            None => {
                info!("client disconnected");
                return Ok(());
            }
        };

        let response = self.respond(&raw, stream)?;

        stream
            .write_all(&response.serialize())
            .context("Can't write response")?;
        stream.flush().context("Can't flush response")?;
        Ok(())
    }

    fn respond(&self, raw: &RawRequest, reader: &mut impl Read) -> anyhow::Result<Response> {
        let req = match Request::from_bytes(&raw.head) {
            Ok(req) => req,
            Err(e) => {
                let err = HttpError::from(e);
                info!("not a valid HTTP request: {}", err);
                return Ok(http::status_only(err.status()));
            }
        };
        info!("got a valid HTTP request: {} {}", req.method, req.target);

        let router = Router::new(&self.config.routes, &self.config.web_root);
        let route = router.route(&req.target, req.method);
        debug!("{} routed to {:?}", req.target, route);

        handler::dispatch(
            route,
            &req,
            &self.config,
            Body {
                buffered: &raw.rest,
                reader,
            },
        )
    }
}

/// Accumulates reads until the head terminator shows up. `None` on EOF before
/// that.
fn read_request(readable: &mut impl Read) -> io::Result<Option<RawRequest>> {
    let mut buf = BytesMut::with_capacity(BUFFER_SIZE);
    let mut chunk = [0u8; BUFFER_SIZE];

    loop {
        if let Some(pos) = find_terminator(&buf) {
            let head = buf.split_to(pos + HEAD_TERMINATOR.len()).freeze();
            return Ok(Some(RawRequest {
                head,
                rest: buf.freeze(),
            }));
        }
        if buf.len() > MAX_HEAD_SIZE {
            return Err(io::Error::new(ErrorKind::InvalidData, "request head too large"));
        }

        let bytes_read = match readable.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if bytes_read == 0 {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk[..bytes_read]);
    }
}

fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_TERMINATOR.len())
        .position(|w| w == HEAD_TERMINATOR)
}
