// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend server components:
//! - Application state (level catalog, custom levels, result log, quizzes)
//! - HTTP/WebSocket routing
//! - Level, builder, result and quiz HTTP endpoints
//! - Play sessions (one WebSocket actor per player running the engine)

pub mod state;
pub mod router;
pub mod levels;
pub mod builder;
pub mod quiz;
pub mod results;
pub mod play_session;
pub mod ws_error;
