//! Level builder endpoints.
//!
//! The draft lives on the client; each call takes the current draft and returns
//! the edited one, so the server keeps no per-editor state.

use actix_web::{web, HttpResponse, http::StatusCode};
use log::{info, warn};
use serde::{Serialize, Deserialize};
use serde_json::json;

use crate::game::builder::LevelBuilder;
use crate::game::level::CustomLevel;
use crate::game::types::{CellType, GridPosition};
use crate::server::state::AppState;
use crate::server::ws_error::http_error_response;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderClick {
    pub draft: LevelBuilder,
    pub tool: CellType,
    pub pos: GridPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderSave {
    pub draft: LevelBuilder,
    pub name: String,
    /// Existing custom level to overwrite; a new one is created when absent.
    #[serde(default)]
    pub id: Option<String>,
}

/// `GET /builder`: an empty draft.
pub async fn new_draft() -> HttpResponse {
    HttpResponse::Ok().json(LevelBuilder::new())
}

/// `GET /builder/{id}`: draft of a stored custom level.
pub async fn load_draft(path: web::Path<String>, data: web::Data<AppState>) -> HttpResponse {
    let id = path.into_inner();
    let level = match data.custom_levels.read() {
        Ok(store) => store.get(&id),
        Err(_) => None,
    };
    match level {
        Some(level) => HttpResponse::Ok().json(LevelBuilder::load(&CustomLevel::from(level.as_ref()))),
        None => http_error_response("LEVEL_NOT_FOUND", "No custom level with this id.", Some(id.as_str()), StatusCode::NOT_FOUND),
    }
}

/// `POST /builder/click`: apply one tool click to the draft.
pub async fn click(body: web::Json<BuilderClick>) -> HttpResponse {
    let BuilderClick { mut draft, tool, pos } = body.into_inner();
    draft.select_tool(tool);
    draft.click(pos);
    HttpResponse::Ok().json(draft)
}

/// `POST /builder/save`: validate the draft and store it.
pub async fn save(body: web::Json<BuilderSave>, data: web::Data<AppState>) -> HttpResponse {
    let BuilderSave { draft, name, id } = body.into_inner();
    let raw = draft.build(name);
    let Ok(mut store) = data.custom_levels.write() else {
        return http_error_response("STORE_UNAVAILABLE", "Level store is unavailable.", None, StatusCode::INTERNAL_SERVER_ERROR);
    };
    let saved = match id.as_deref() {
        Some(id) => store.update(id, raw),
        None => store.insert(raw).map(Some),
    };
    match saved {
        Ok(Some(level)) => {
            info!("[Builder] saved {} ({})", level.id(), level.name());
            HttpResponse::Ok().json(json!({ "id": level.id() }))
        }
        Ok(None) => http_error_response("LEVEL_NOT_FOUND", "No custom level with this id.", id.as_deref(), StatusCode::NOT_FOUND),
        Err(e) => {
            warn!("[Builder] rejected draft: {}", e);
            http_error_response("INVALID_LEVEL", &e.to_string(), id.as_deref(), StatusCode::BAD_REQUEST)
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::Value;

    use super::*;
    use crate::game::catalog::Catalog;

    #[actix_web::test]
    async fn test_edit_save_and_reload_draft() {
        let data = web::Data::new(AppState::new(Catalog::builtin().unwrap()));
        let app = test::init_service(
            App::new().app_data(data.clone()).configure(crate::server::router::config),
        ).await;

        let req = test::TestRequest::get().uri("/builder").to_request();
        let draft: LevelBuilder = test::call_and_read_body_json(&app, req).await;
        assert_eq!(draft, LevelBuilder::new());

        let click = BuilderClick { draft, tool: CellType::Coin, pos: GridPosition::new(2, 2) };
        let req = test::TestRequest::post().uri("/builder/click").set_json(&click).to_request();
        let draft: LevelBuilder = test::call_and_read_body_json(&app, req).await;
        assert!(draft.coins.contains(&GridPosition::new(2, 2)));
        assert_eq!(draft.selected_tool, CellType::Coin);

        let save = BuilderSave { draft, name: "Coins".to_string(), id: None };
        let req = test::TestRequest::post().uri("/builder/save").set_json(&save).to_request();
        let saved: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(saved["id"], "custom_1");

        let req = test::TestRequest::get().uri("/builder/custom_1").to_request();
        let reloaded: LevelBuilder = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reloaded.coins.len(), 1);
        assert_eq!(reloaded.selected_tool, CellType::Wall);
        assert_eq!(data.find_level("custom_1").unwrap().name(), "Coins");
    }

    #[actix_web::test]
    async fn test_save_rejects_invalid_draft() {
        let data = web::Data::new(AppState::new(Catalog::builtin().unwrap()));
        let app = test::init_service(
            App::new().app_data(data).configure(crate::server::router::config),
        ).await;

        let mut draft = LevelBuilder::new();
        draft.select_tool(CellType::End);
        draft.click(GridPosition::new(0, 0));
        let save = BuilderSave { draft, name: "Same cell".to_string(), id: None };
        let req = test::TestRequest::post().uri("/builder/save").set_json(&save).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
