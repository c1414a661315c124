//! Quiz endpoints.
//!
//! A quiz is started on a topic and then driven by id: answer the current
//! question, move to the next one, or drop the quiz to start over.

use std::collections::HashMap;
use std::sync::MutexGuard;

use actix_web::{web, HttpResponse, http::StatusCode};
use log::{info, warn};
use serde::{Serialize, Deserialize};
use serde_json::json;
use uuid::Uuid;

use crate::game::quiz::{find_topic, topics, QuizSession};
use crate::server::state::AppState;
use crate::server::ws_error::http_error_response;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicListing {
    pub id: String,
    pub title: String,
    pub questions: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub answer: usize,
}

fn quiz_body(id: Uuid, quiz: &QuizSession) -> serde_json::Value {
    json!({
        "id": id,
        "title": quiz.topic().title,
        "quiz": quiz,
        "question": quiz.question(),
    })
}

fn quiz_not_found(id: Uuid) -> HttpResponse {
    let id = id.to_string();
    http_error_response("QUIZ_NOT_FOUND", "No quiz with this id.", Some(id.as_str()), StatusCode::NOT_FOUND)
}

fn quizzes(data: &AppState) -> Result<MutexGuard<'_, HashMap<Uuid, QuizSession>>, HttpResponse> {
    data.quizzes.lock().map_err(|_| {
        http_error_response("QUIZ_UNAVAILABLE", "Quiz store is unavailable.", None, StatusCode::INTERNAL_SERVER_ERROR)
    })
}

/// `GET /quiz`
pub async fn list_topics() -> HttpResponse {
    let listing: Vec<TopicListing> = topics().iter()
        .map(|t| TopicListing { id: t.id.to_string(), title: t.title.to_string(), questions: t.questions.len() })
        .collect();
    HttpResponse::Ok().json(listing)
}

/// `POST /quiz/{topic_id}`: start a quiz on the first question.
pub async fn start_quiz(path: web::Path<String>, data: web::Data<AppState>) -> HttpResponse {
    let topic_id = path.into_inner();
    let Some(topic) = find_topic(&topic_id) else {
        return http_error_response("TOPIC_NOT_FOUND", "No quiz topic with this id.", Some(topic_id.as_str()), StatusCode::NOT_FOUND);
    };
    let mut store = match quizzes(&data) {
        Ok(store) => store,
        Err(resp) => return resp,
    };
    let id = Uuid::new_v4();
    let quiz = QuizSession::start(topic);
    let body = quiz_body(id, &quiz);
    store.insert(id, quiz);
    info!("[Quiz] started {} on {}", id, topic.id);
    HttpResponse::Created().json(body)
}

/// `GET /quiz/sessions/{id}`
pub async fn get_quiz(path: web::Path<Uuid>, data: web::Data<AppState>) -> HttpResponse {
    let id = path.into_inner();
    let store = match quizzes(&data) {
        Ok(store) => store,
        Err(resp) => return resp,
    };
    match store.get(&id) {
        Some(quiz) => HttpResponse::Ok().json(quiz_body(id, quiz)),
        None => quiz_not_found(id),
    }
}

/// `POST /quiz/sessions/{id}/answer`
pub async fn answer_question(
    path: web::Path<Uuid>,
    body: web::Json<QuizAnswer>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let id = path.into_inner();
    let mut store = match quizzes(&data) {
        Ok(store) => store,
        Err(resp) => return resp,
    };
    let Some(quiz) = store.get_mut(&id) else {
        return quiz_not_found(id);
    };
    match quiz.answer(body.answer) {
        Ok(correct) => {
            let mut reply = quiz_body(id, quiz);
            reply["correct"] = json!(correct);
            HttpResponse::Ok().json(reply)
        }
        Err(e) => {
            warn!("[Quiz] {} refused answer {}: {}", id, body.answer, e);
            http_error_response("INVALID_ANSWER", &e.to_string(), None, StatusCode::BAD_REQUEST)
        }
    }
}

/// `POST /quiz/sessions/{id}/next`
pub async fn next_question(path: web::Path<Uuid>, data: web::Data<AppState>) -> HttpResponse {
    let id = path.into_inner();
    let mut store = match quizzes(&data) {
        Ok(store) => store,
        Err(resp) => return resp,
    };
    let Some(quiz) = store.get_mut(&id) else {
        return quiz_not_found(id);
    };
    quiz.next();
    if quiz.is_finished {
        info!("[Quiz] {} finished with {}/{}", id, quiz.score, quiz.total_questions);
    }
    HttpResponse::Ok().json(quiz_body(id, quiz))
}

/// `DELETE /quiz/sessions/{id}`: drop the quiz.
pub async fn reset_quiz(path: web::Path<Uuid>, data: web::Data<AppState>) -> HttpResponse {
    let id = path.into_inner();
    let mut store = match quizzes(&data) {
        Ok(store) => store,
        Err(resp) => return resp,
    };
    match store.remove(&id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => quiz_not_found(id),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::Value;

    use super::*;
    use crate::game::catalog::Catalog;

    fn app_state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Catalog::builtin().unwrap()))
    }

    #[actix_web::test]
    async fn test_list_topics() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(crate::server::router::config),
        ).await;
        let req = test::TestRequest::get().uri("/quiz").to_request();
        let listing: Vec<TopicListing> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[1], TopicListing { id: "bugs".into(), title: "Bugs".into(), questions: 5 });
    }

    #[actix_web::test]
    async fn test_play_through_quiz() {
        let data = app_state();
        let app = test::init_service(
            App::new().app_data(data.clone()).configure(crate::server::router::config),
        ).await;

        let req = test::TestRequest::post().uri("/quiz/bugs").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let started: Value = test::read_body_json(resp).await;
        let id = started["id"].as_str().expect("quiz id").to_string();
        assert_eq!(started["question"]["text"], "How many legs does an insect have?");
        assert!(started["question"].get("correct_index").is_none());

        let answer = |index: usize| {
            test::TestRequest::post()
                .uri(&format!("/quiz/sessions/{id}/answer"))
                .set_json(json!({ "answer": index }))
                .to_request()
        };
        let next = || test::TestRequest::post().uri(&format!("/quiz/sessions/{id}/next")).to_request();

        let reply: Value = test::call_and_read_body_json(&app, answer(2)).await;
        assert_eq!(reply["correct"], true);
        assert_eq!(reply["quiz"]["score"], 1);

        let resp = test::call_service(&app, answer(2)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"]["code"], "INVALID_ANSWER");

        for _ in 0..5 {
            test::call_service(&app, next()).await;
        }
        let req = test::TestRequest::get().uri(&format!("/quiz/sessions/{id}")).to_request();
        let state: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(state["quiz"]["is_finished"], true);
        assert_eq!(state["quiz"]["score"], 1);
        assert_eq!(state["question"], Value::Null);

        let req = test::TestRequest::delete().uri(&format!("/quiz/sessions/{id}")).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
        let req = test::TestRequest::get().uri(&format!("/quiz/sessions/{id}")).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        assert!(data.quizzes.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_unknown_topic() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(crate::server::router::config),
        ).await;
        let req = test::TestRequest::post().uri("/quiz/space").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"]["code"], "TOPIC_NOT_FOUND");
    }
}
