//! WebSocket play session.
//!
//! One actor per connection, bound to one level. The actor wraps a
//! `SessionController`; during a run it forwards every published state and coin
//! event to the socket, then reports the outcome and records it.

use std::sync::Arc;

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse, http::StatusCode};
use actix_web_actors::ws;
use log::{debug, info, warn};
use serde_json::json;

use crate::game::engine::StepDelay;
use crate::game::level::LevelDefinition;
use crate::game::state::GameState;
use crate::game::types::Command;
use crate::server::play_session::controller::{forward_run, Reaction, SessionController};
use crate::server::play_session::messages::{ClientAction, Outgoing, ServerMessage};
use crate::server::state::AppState;
use crate::server::ws_error::{http_error_response, ws_error_message};

pub struct PlaySessionActor {
    controller: SessionController,
    app: web::Data<AppState>,
}

impl PlaySessionActor {
    pub fn new(level: Arc<LevelDefinition>, app: web::Data<AppState>) -> Self {
        Self {
            controller: SessionController::new(level, StepDelay::default()),
            app,
        }
    }

    fn send_all(&self, ctx: &mut ws::WebsocketContext<Self>, frames: Vec<ServerMessage>) {
        for frame in frames {
            ctx.text(frame.to_json());
        }
    }

    fn handle_action(&mut self, action: ClientAction, ctx: &mut ws::WebsocketContext<Self>) {
        match self.controller.handle(action) {
            Reaction::Reply(frames) => self.send_all(ctx, frames),
            Reaction::Run(commands) => self.start_run(commands, ctx),
        }
    }

    /// Run `commands` on the engine without blocking the mailbox.
    fn start_run(&mut self, commands: Vec<Command>, ctx: &mut ws::WebsocketContext<Self>) {
        let engine = self.controller.engine();
        let addr = ctx.address();
        debug!(
            "[PlaySession] session={} level={} run {} command(s)",
            self.controller.session_id,
            engine.level().id(),
            commands.len()
        );

        // `send().await` keeps frames in publication order
        let run = async move {
            forward_run(&engine, &commands, |frame| {
                let addr = addr.clone();
                async move {
                    let _ = addr.send(Outgoing(frame)).await;
                }
            })
            .await
        };

        ctx.spawn(run.into_actor(self).map(|final_state, act, ctx| act.finish_run(final_state, ctx)));
    }

    fn finish_run(&mut self, final_state: GameState, ctx: &mut ws::WebsocketContext<Self>) {
        let session_id = self.controller.session_id;
        let Some((frame, record)) = self.controller.finish(&final_state) else {
            warn!("[PlaySession] session={} run ended without a terminal state", session_id);
            return;
        };
        info!(
            "[PlaySession] session={} level={} outcome={:?}",
            session_id,
            self.controller.level().id(),
            record.outcome
        );
        ctx.text(frame.to_json());
        self.app.record_result(record);
    }
}

impl Actor for PlaySessionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "[PlaySession] session={} opened on level={}",
            self.controller.session_id,
            self.controller.level().id()
        );
        let frames = self.controller.greeting();
        self.send_all(ctx, frames);
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        if self.controller.is_executing() {
            debug!("[PlaySession] session={} closed during a run", self.controller.session_id);
        } else {
            debug!("[PlaySession] session={} closed", self.controller.session_id);
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlaySessionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                let action: ClientAction = match serde_json::from_str(&text) {
                    Ok(a) => a,
                    Err(e) => {
                        warn!("[PlaySession] session={} invalid frame: {}", self.controller.session_id, e);
                        ctx.text(ws_error_message("INVALID_ACTION", "Invalid action", Some(json!(e.to_string()))));
                        return;
                    }
                };
                self.handle_action(action, ctx);
            }
            Ok(ws::Message::Ping(payload)) => ctx.pong(&payload),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[PlaySession] session={} protocol error: {}", self.controller.session_id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<Outgoing> for PlaySessionActor {
    type Result = ();

    fn handle(&mut self, msg: Outgoing, ctx: &mut Self::Context) -> Self::Result {
        ctx.text(msg.0.to_json());
    }
}

/// Upgrade `/ws/play/{level_id}` to a play session.
pub async fn ws_play(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let level_id = path.into_inner();
    let Some(level) = data.find_level(&level_id) else {
        warn!("[PlaySession] unknown level {}", level_id);
        return Ok(http_error_response(
            "LEVEL_NOT_FOUND",
            "No level with this id.",
            Some(level_id.as_str()),
            StatusCode::NOT_FOUND,
        ));
    };
    ws::start(PlaySessionActor::new(level, data.clone()), &req, stream)
}
