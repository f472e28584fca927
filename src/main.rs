mod config;
mod http;

use clap::Parser;
use config::{Args, ServerConfig};
use http::server::Server;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from(Args::parse());
    let server = Server::bind(config)?;
    server.run()
}
