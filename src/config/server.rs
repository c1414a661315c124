/// Server configuration constants.
///
/// Defaults for the HTTP/WebSocket listener. `GRID_CODER_BIND` and
/// `GRID_CODER_PORT` override them at startup.
pub const BIND_ADDRESS: &str = "127.0.0.1";

/// Port of the HTTP/WebSocket listener.
pub const PORT: u16 = 8080;

/// Environment variable overriding `BIND_ADDRESS`.
pub const BIND_ENV: &str = "GRID_CODER_BIND";

/// Environment variable overriding `PORT`.
pub const PORT_ENV: &str = "GRID_CODER_PORT";
