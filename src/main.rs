use actix_web::web::Data;
use anyhow::{Context, Result};
use log::info;
use tokio::signal::unix::{signal, SignalKind};

use api::{start_api_server, State};
use env::Env;

mod api;
mod auth;
mod constants;
mod engine;
mod env;
mod peer;
mod record;
mod store;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let env = Env::load().context("Failed to load configuration.")?;
    let server = start_api_server(env.listen, Data::new(State::new(&env)))?;
    let handle = server.handle();
    info!("Listening on: {}", env.listen);

    let mut term_signal =
        signal(SignalKind::terminate()).context("Failed to listen for SIGTERM.")?;
    tokio::select! {
        _ = term_signal.recv() => {
            info!("SIGTERM received, shutting down...");
            handle.stop(true).await;
        },
        _ = tokio::signal::ctrl_c() => {
            info!("SIGINT received, shutting down...");
            handle.stop(true).await;
        },
        result = server => {
            result.context("API server finished with an error.")?;
        },
    }

    Ok(())
}
