//! Main entry point for the backend server.
//!
//! Loads the built-in level catalog, builds the shared application state, and
//! launches the HTTP server with the level, result and play-session endpoints.

use std::io;

use actix_web::{web, App, HttpServer};
use log::info;

use crate::config::server::{BIND_ADDRESS, BIND_ENV, PORT, PORT_ENV};
use crate::game::catalog::Catalog;

pub mod config;
mod server;
mod game;

/// Listener address from the environment, falling back to the defaults.
fn bind_address() -> io::Result<(String, u16)> {
    let host = std::env::var(BIND_ENV).unwrap_or_else(|_| BIND_ADDRESS.to_string());
    let port = match std::env::var(PORT_ENV) {
        Ok(raw) => raw.parse().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("{PORT_ENV}={raw}: {e}"))
        })?,
        Err(_) => PORT,
    };
    Ok((host, port))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    let catalog = Catalog::builtin()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("built-in level: {e}")))?;
    info!("Loaded {} built-in levels", catalog.levels().len());

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(catalog));

    let (host, port) = bind_address()?;
    info!("Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
