use crate::http::status::Status;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about = "Serves a web root plus a few computed endpoints")]
pub struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:80")]
    pub addr: String,

    /// Directory static files are served from
    #[arg(long, default_value = "webroot")]
    pub web_root: PathBuf,

    /// Directory uploads are written to and images are read back from
    #[arg(long, default_value = "upload")]
    pub upload_dir: PathBuf,

    /// Idle read timeout per connection, in seconds
    #[arg(long, default_value_t = 2)]
    pub read_timeout: u64,

    /// Largest accepted upload body, in bytes
    #[arg(long, default_value_t = 10 * 1024 * 1024)]
    pub max_upload: usize,
}

/// Literal paths and prefixes the router matches against.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub default_url: String,
    pub moved: String,
    pub upload: String,
    pub image: String,
    pub next_number: String,
    pub area: String,
    pub canned: Vec<(String, Status)>,
}

impl Default for RouteTable {
    fn default() -> Self {
        RouteTable {
            default_url: "/index.html".to_string(),
            moved: "/moved".to_string(),
            upload: "/upload?file-name".to_string(),
            image: "/image?image-name".to_string(),
            next_number: "/calculate-next?num".to_string(),
            area: "/calculate-area".to_string(),
            canned: vec![
                ("/forbidden".to_string(), Status::FORBIDDEN),
                ("/error".to_string(), Status::INTERNAL_SERVER_ERROR),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub web_root: PathBuf,
    pub upload_dir: PathBuf,
    pub read_timeout: Duration,
    pub max_upload: usize,
    pub routes: RouteTable,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            addr: args.addr,
            web_root: args.web_root,
            upload_dir: args.upload_dir,
            read_timeout: Duration::from_secs(args.read_timeout),
            max_upload: args.max_upload,
            routes: RouteTable::default(),
        }
    }
}
