//! HTTP endpoints for levels and results.

use actix_web::{web, HttpResponse, http::StatusCode};
use log::{info, warn};
use serde::{Serialize, Deserialize};
use serde_json::json;

use crate::game::engine::replay;
use crate::game::level::{CustomLevel, LevelDefinition};
use crate::game::queue::CommandQueue;
use crate::server::state::AppState;
use crate::server::ws_error::http_error_response;

/// Short description of a level for the level list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelListing {
    pub id: String,
    pub name: String,
    pub rows: i32,
    pub cols: i32,
    pub custom: bool,
}

impl LevelListing {
    fn from_level(level: &LevelDefinition, custom: bool) -> Self {
        Self {
            id: level.id().to_string(),
            name: level.name().to_string(),
            rows: level.rows(),
            cols: level.cols(),
            custom,
        }
    }
}

fn store_unavailable() -> HttpResponse {
    http_error_response(
        "STORE_UNAVAILABLE",
        "Level store is unavailable.",
        None,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}

/// `GET /levels`: built-in levels first, then custom ones.
pub async fn list_levels(data: web::Data<AppState>) -> HttpResponse {
    let mut listing: Vec<LevelListing> = data.catalog.levels().iter()
        .map(|l| LevelListing::from_level(l, false))
        .collect();
    match data.custom_levels.read() {
        Ok(store) => listing.extend(store.levels().map(|l| LevelListing::from_level(l, true))),
        Err(_) => return store_unavailable(),
    }
    HttpResponse::Ok().json(listing)
}

/// `GET /levels/{id}`
pub async fn get_level(path: web::Path<String>, data: web::Data<AppState>) -> HttpResponse {
    let id = path.into_inner();
    match data.find_level(&id) {
        Some(level) => HttpResponse::Ok().json(level.as_ref()),
        None => http_error_response("LEVEL_NOT_FOUND", "No level with this id.", Some(id.as_str()), StatusCode::NOT_FOUND),
    }
}

/// `POST /levels/{id}/run`: replay a command list without pacing and return
/// the terminal state. Nothing is recorded.
pub async fn run_level(
    path: web::Path<String>,
    body: web::Json<CommandQueue>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let id = path.into_inner();
    let Some(level) = data.find_level(&id) else {
        return http_error_response("LEVEL_NOT_FOUND", "No level with this id.", Some(id.as_str()), StatusCode::NOT_FOUND);
    };
    let queue = body.into_inner();
    if queue.is_empty() {
        warn!("[Levels] empty program submitted for {}", id);
    }
    let state = replay(level, queue.as_slice()).await;
    HttpResponse::Ok().json(state)
}

/// `POST /levels/custom`
pub async fn create_custom_level(body: web::Json<CustomLevel>, data: web::Data<AppState>) -> HttpResponse {
    let Ok(mut store) = data.custom_levels.write() else {
        return store_unavailable();
    };
    match store.insert(body.into_inner()) {
        Ok(level) => {
            info!("[Levels] created {} ({})", level.id(), level.name());
            HttpResponse::Created().json(json!({ "id": level.id() }))
        }
        Err(e) => {
            warn!("[Levels] rejected custom level: {}", e);
            http_error_response("INVALID_LEVEL", &e.to_string(), None, StatusCode::BAD_REQUEST)
        }
    }
}

/// `PUT /levels/custom/{id}`
pub async fn update_custom_level(
    path: web::Path<String>,
    body: web::Json<CustomLevel>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let id = path.into_inner();
    let Ok(mut store) = data.custom_levels.write() else {
        return store_unavailable();
    };
    match store.update(&id, body.into_inner()) {
        Ok(Some(level)) => {
            info!("[Levels] updated {} ({})", level.id(), level.name());
            HttpResponse::Ok().json(json!({ "id": level.id() }))
        }
        Ok(None) => http_error_response("LEVEL_NOT_FOUND", "No custom level with this id.", Some(id.as_str()), StatusCode::NOT_FOUND),
        Err(e) => {
            warn!("[Levels] rejected update of {}: {}", id, e);
            http_error_response("INVALID_LEVEL", &e.to_string(), Some(id.as_str()), StatusCode::BAD_REQUEST)
        }
    }
}

/// `GET /results`: every recorded run plus the per-level summary covering
/// every built-in and custom level.
pub async fn get_results(data: web::Data<AppState>) -> HttpResponse {
    let Ok(store) = data.custom_levels.read() else {
        return store_unavailable();
    };
    let levels = data.catalog.levels().iter().chain(store.levels()).map(|l| l.as_ref());
    match data.results.lock() {
        Ok(log) => HttpResponse::Ok().json(json!({
            "records": log.records(),
            "summary": log.summary(levels),
        })),
        Err(_) => http_error_response(
            "RESULTS_UNAVAILABLE",
            "Result log is unavailable.",
            None,
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::Value;
    use uuid::Uuid;

    use super::*;
    use crate::game::catalog::Catalog;
    use crate::game::types::GameOutcome;
    use crate::server::results::SessionRecord;

    fn app_state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Catalog::builtin().unwrap()))
    }

    fn custom_body() -> Value {
        json!({
            "name": "Zigzag", "rows": 4, "cols": 4,
            "walls": [[1, 0], [1, 1]], "coins": [[0, 3]],
            "start_row": 0, "start_col": 0, "end_row": 3, "end_col": 0
        })
    }

    #[actix_web::test]
    async fn test_list_and_get_levels() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(crate::server::router::config),
        ).await;

        let req = test::TestRequest::get().uri("/levels").to_request();
        let listing: Vec<LevelListing> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listing.len(), 6);
        assert!(listing.iter().all(|l| !l.custom));

        let req = test::TestRequest::get().uri("/levels/1-2").to_request();
        let level: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(level["name"], "Level 1 - Game 2");
        assert_eq!(level["walls"].as_array().map(|w| w.len()), Some(2));

        let req = test::TestRequest::get().uri("/levels/9-9").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_create_and_update_custom_level() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(crate::server::router::config),
        ).await;

        let req = test::TestRequest::post().uri("/levels/custom").set_json(custom_body()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["id"], "custom_1");

        let mut renamed = custom_body();
        renamed["name"] = json!("Zigzag 2");
        let req = test::TestRequest::put().uri("/levels/custom/custom_1").set_json(&renamed).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/levels/custom_1").to_request();
        let level: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(level["name"], "Zigzag 2");

        let req = test::TestRequest::put().uri("/levels/custom/custom_5").set_json(&renamed).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/levels").to_request();
        let listing: Vec<LevelListing> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listing.last().map(|l| (l.id.as_str(), l.custom)), Some(("custom_1", true)));
    }

    #[actix_web::test]
    async fn test_run_level() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(crate::server::router::config),
        ).await;

        let req = test::TestRequest::post()
            .uri("/levels/1-1/run")
            .set_json(json!(["Right", "Right", "Right", "Right"]))
            .to_request();
        let state: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(state["is_win"], true);
        assert_eq!(state["collected_coins"], json!([{"row": 0, "col": 2}]));

        let req = test::TestRequest::post().uri("/levels/1-2/run").set_json(json!(["Up"])).to_request();
        let state: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(state["is_win"], false);
        assert_eq!(state["error"], "OutOfMoves");
    }

    #[actix_web::test]
    async fn test_invalid_custom_level_is_rejected() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(crate::server::router::config),
        ).await;

        let mut body = custom_body();
        body["walls"] = json!([[0, 0]]);
        let req = test::TestRequest::post().uri("/levels/custom").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"]["code"], "INVALID_LEVEL");
    }

    #[actix_web::test]
    async fn test_results_endpoint() {
        let data = app_state();
        let level = data.catalog.find("1-1").unwrap();
        data.record_result(SessionRecord::new(Uuid::new_v4(), &level, GameOutcome::Win));

        let app = test::init_service(
            App::new().app_data(data.clone()).configure(crate::server::router::config),
        ).await;
        let req = test::TestRequest::get().uri("/results").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["records"].as_array().map(|r| r.len()), Some(1));
        assert_eq!(body["summary"][0]["wins"], 1);
        assert_eq!(body["summary"][0]["best_score"], 100);
        assert_eq!(body["summary"].as_array().map(|s| s.len()), Some(6));
        assert_eq!(body["summary"][1]["level_id"], "1-2");
        assert_eq!(body["summary"][1]["attempts"], 0);
    }

    #[actix_web::test]
    async fn test_malformed_body_gets_json_error() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(crate::server::router::config),
        ).await;

        let req = test::TestRequest::post().uri("/levels/1-1/run").set_json(json!(["Jump"])).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"]["code"], "INVALID_BODY");
        assert!(error["error"]["context"].as_str().is_some_and(|c| c.contains("Jump")));

        let req = test::TestRequest::post()
            .uri("/levels/custom")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"]["code"], "INVALID_BODY");
    }
}
