//! HTTP and WebSocket routing configuration.
//!
//! Level, builder, result and quiz endpoints are plain HTTP handlers. Play sessions
//! are upgraded to a WebSocket actor per connection. Unreadable JSON bodies
//! are answered with the same error shape as every other rejection.

use actix_web::web;
use crate::server::{builder, quiz};
use crate::server::levels::{create_custom_level, get_level, get_results, list_levels, run_level, update_custom_level};
use crate::server::play_session::session::ws_play;
use crate::server::ws_error::json_body_error;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_body_error))
        .service(web::resource("/levels").route(web::get().to(list_levels)))
        .service(web::resource("/levels/custom").route(web::post().to(create_custom_level)))
        .service(web::resource("/levels/custom/{id}").route(web::put().to(update_custom_level)))
        .service(web::resource("/levels/{id}").route(web::get().to(get_level)))
        .service(web::resource("/levels/{id}/run").route(web::post().to(run_level)))
        .service(web::resource("/builder").route(web::get().to(builder::new_draft)))
        .service(web::resource("/builder/click").route(web::post().to(builder::click)))
        .service(web::resource("/builder/save").route(web::post().to(builder::save)))
        .service(web::resource("/builder/{id}").route(web::get().to(builder::load_draft)))
        .service(web::resource("/results").route(web::get().to(get_results)))
        .service(web::resource("/quiz").route(web::get().to(quiz::list_topics)))
        .service(
            web::resource("/quiz/sessions/{id}")
                .route(web::get().to(quiz::get_quiz))
                .route(web::delete().to(quiz::reset_quiz)),
        )
        .service(web::resource("/quiz/sessions/{id}/answer").route(web::post().to(quiz::answer_question)))
        .service(web::resource("/quiz/sessions/{id}/next").route(web::post().to(quiz::next_question)))
        .service(web::resource("/quiz/{topic_id}").route(web::post().to(quiz::start_quiz)))
        .service(web::resource("/ws/play/{level_id}").to(ws_play));
}
