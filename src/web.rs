use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

use crate::board::{copy_to_clipboard, Action, AssignmentStore, Notice};
use crate::classify::classify_zones;
use crate::clipboard::Clipboard;
use crate::model::Person;

/// One session shared by every request. Each mutation runs under the store
/// lock, so it is computed from a single snapshot of the board.
pub struct AppState {
    pub store: Mutex<AssignmentStore>,
    pub clipboard: Mutex<Box<dyn Clipboard>>,
}

impl AppState {
    pub fn new(store: AssignmentStore, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            store: Mutex::new(store),
            clipboard: Mutex::new(clipboard),
        }
    }
}

#[derive(Deserialize)]
pub struct PersonRequest {
    person_id: String,
}

#[derive(Deserialize)]
pub struct ZoneRequest {
    zone_id: String,
}

#[derive(Serialize)]
pub struct SlotView {
    zone_id: String,
    label: String,
    role_label: Option<String>,
    occupant: Option<Person>,
}

#[derive(Serialize)]
pub struct GroupView {
    base_label: String,
    slots: Vec<SlotView>,
}

#[derive(Serialize)]
pub struct NoticeView {
    kind: &'static str,
    title: &'static str,
    description: String,
}

impl From<&Notice> for NoticeView {
    fn from(notice: &Notice) -> Self {
        let kind = match notice {
            Notice::ResetDone => "reset",
            Notice::Copied { .. } => "copied",
            Notice::CopyFailed { .. } => "copy_failed",
        };
        Self { kind, title: notice.title(), description: notice.description() }
    }
}

#[derive(Serialize)]
pub struct BoardResponse {
    people: Vec<Person>,
    unassigned: Vec<Person>,
    selected: Option<String>,
    singles: Vec<SlotView>,
    groups: Vec<GroupView>,
    result_text: String,
    notice: Option<NoticeView>,
}

fn board_response(store: &AssignmentStore, notice: Option<&Notice>) -> BoardResponse {
    let roster = store.roster();
    let occupants = store.assignments().group_by_zone(roster);
    let occupant = |zone_id: &str| {
        occupants
            .get(zone_id)
            .and_then(|o| o.first())
            .map(|p| (*p).clone())
    };
    let classification = classify_zones(roster.zones());

    let singles = classification
        .singles
        .iter()
        .map(|z| SlotView {
            zone_id: z.id.clone(),
            label: z.label.clone(),
            role_label: None,
            occupant: occupant(z.id.as_str()),
        })
        .collect();

    let groups = classification
        .groups
        .iter()
        .map(|g| GroupView {
            base_label: g.base_label.clone(),
            slots: g
                .items
                .iter()
                .map(|i| SlotView {
                    zone_id: i.zone.id.clone(),
                    label: i.zone.label.clone(),
                    role_label: Some(i.role_label.clone()),
                    occupant: occupant(i.zone.id.as_str()),
                })
                .collect(),
        })
        .collect();

    BoardResponse {
        people: roster.people().to_vec(),
        unassigned: store.unassigned_people().into_iter().cloned().collect(),
        selected: store.state().selected.clone(),
        singles,
        groups,
        result_text: store.result_text(),
        notice: notice.map(NoticeView::from),
    }
}

fn lock_store(state: &AppState) -> Result<MutexGuard<'_, AssignmentStore>> {
    state
        .store
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("session state is unavailable"))
}

/// Applies one action and answers with the new board
fn apply(state: &AppState, action: Action) -> Result<HttpResponse> {
    let mut store = lock_store(state)?;
    let notice = store.dispatch(action);
    Ok(HttpResponse::Ok().json(board_response(&store, notice.as_ref())))
}

async fn get_board(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock_store(&state)?;
    Ok(HttpResponse::Ok().json(board_response(&store, None)))
}

async fn select_person(req: web::Json<PersonRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    apply(&state, Action::SelectPerson(req.into_inner().person_id))
}

async fn assign_to_zone(req: web::Json<ZoneRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    apply(&state, Action::AssignToZone(req.into_inner().zone_id))
}

async fn unassign_person(req: web::Json<PersonRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    apply(&state, Action::UnassignPerson(req.into_inner().person_id))
}

async fn unassign_selected(state: web::Data<AppState>) -> Result<HttpResponse> {
    apply(&state, Action::UnassignSelected)
}

async fn reset_all(state: web::Data<AppState>) -> Result<HttpResponse> {
    apply(&state, Action::ResetAll)
}

async fn get_result(state: web::Data<AppState>) -> Result<HttpResponse> {
    let text = lock_store(&state)?.result_text();
    Ok(HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(text))
}

// Host clipboard copy. The board lock is released before the write so a slow
// clipboard tool never blocks other requests.
async fn copy_result(state: web::Data<AppState>) -> Result<HttpResponse> {
    let text = lock_store(&state)?.result_text();

    let worker_state = state.clone();
    let notice = web::block(move || match worker_state.clipboard.lock() {
        Ok(mut clipboard) => copy_to_clipboard(&mut **clipboard, text),
        Err(_) => Notice::CopyFailed { reason: "clipboard is unavailable".to_string() },
    })
    .await
    .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(NoticeView::from(&notice)))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Routes, shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/board", web::get().to(get_board))
        .route("/api/select", web::post().to(select_person))
        .route("/api/assign", web::post().to(assign_to_zone))
        .route("/api/unassign", web::post().to(unassign_person))
        .route("/api/unassign-selected", web::post().to(unassign_selected))
        .route("/api/reset", web::post().to(reset_all))
        .route("/api/result", web::get().to(get_result))
        .route("/api/copy", web::post().to(copy_result));
}

pub async fn start_server(
    bind: &str,
    port: u16,
    store: AssignmentStore,
    clipboard: Box<dyn Clipboard>,
) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(store, clipboard));

    tracing::info!(%bind, port, "starting web server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((bind, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::model::{Roster, Zone};
    use actix_web::test;
    use serde_json::{json, Value};

    fn app_state(clipboard: MemoryClipboard) -> web::Data<AppState> {
        let roster = Roster::new(
            vec![Person::new("a", "Alice"), Person::new("b", "Bob")],
            vec![
                Zone::new("z1", "Lounge").with_order(1),
                Zone::new("z2", "Shower(1)").with_order(2),
                Zone::new("z3", "Shower(2)").with_order(3),
            ],
        )
        .unwrap();
        web::Data::new(AppState::new(AssignmentStore::new(roster), Box::new(clipboard)))
    }

    macro_rules! post_json {
        ($app:expr, $uri:expr, $body:expr) => {{
            let req = test::TestRequest::post().uri($uri).set_json($body).to_request();
            let body: Value = test::call_and_read_body_json(&$app, req).await;
            body
        }};
    }

    #[actix_web::test]
    async fn board_lists_groups_and_singles() {
        let app = test::init_service(App::new().app_data(app_state(MemoryClipboard::default())).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/board").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["singles"][0]["label"], "Lounge");
        assert_eq!(body["groups"][0]["base_label"], "Shower");
        assert_eq!(body["groups"][0]["slots"][1]["role_label"], "deputy");
        assert_eq!(body["unassigned"].as_array().unwrap().len(), 2);
        assert_eq!(body["result_text"], "");
        assert!(body["notice"].is_null());
    }

    #[actix_web::test]
    async fn select_assign_and_swap() {
        let app = test::init_service(App::new().app_data(app_state(MemoryClipboard::default())).configure(configure)).await;

        post_json!(app, "/api/select", json!({"person_id": "a"}));
        post_json!(app, "/api/assign", json!({"zone_id": "z2"}));
        post_json!(app, "/api/select", json!({"person_id": "b"}));
        let body = post_json!(app, "/api/assign", json!({"zone_id": "z2"}));

        assert_eq!(body["result_text"], "Bob - Shower senior");
        assert_eq!(body["groups"][0]["slots"][0]["occupant"]["id"], "b");
        assert_eq!(body["unassigned"][0]["id"], "a");
    }

    #[actix_web::test]
    async fn clicking_a_badge_unassigns() {
        let app = test::init_service(App::new().app_data(app_state(MemoryClipboard::default())).configure(configure)).await;

        post_json!(app, "/api/select", json!({"person_id": "a"}));
        post_json!(app, "/api/assign", json!({"zone_id": "z1"}));
        let body = post_json!(app, "/api/unassign", json!({"person_id": "a"}));

        assert!(body["selected"].is_null());
        assert!(body["singles"][0]["occupant"].is_null());
    }

    #[actix_web::test]
    async fn reset_returns_a_notice() {
        let app = test::init_service(App::new().app_data(app_state(MemoryClipboard::default())).configure(configure)).await;

        post_json!(app, "/api/select", json!({"person_id": "a"}));
        post_json!(app, "/api/assign", json!({"zone_id": "z1"}));
        let req = test::TestRequest::post().uri("/api/reset").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["notice"]["kind"], "reset");
        assert_eq!(body["result_text"], "");
    }

    #[actix_web::test]
    async fn result_is_plain_text() {
        let app = test::init_service(App::new().app_data(app_state(MemoryClipboard::default())).configure(configure)).await;

        post_json!(app, "/api/select", json!({"person_id": "b"}));
        post_json!(app, "/api/assign", json!({"zone_id": "z3"}));
        let req = test::TestRequest::get().uri("/api/result").to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, "Bob - Shower deputy");
    }

    #[actix_web::test]
    async fn copy_failure_is_reported_not_raised() {
        let state = app_state(MemoryClipboard::failing());
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post().uri("/api/copy").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "copy_failed");
    }

    #[actix_web::test]
    async fn copy_success_carries_the_text() {
        let app = test::init_service(App::new().app_data(app_state(MemoryClipboard::default())).configure(configure)).await;

        post_json!(app, "/api/select", json!({"person_id": "a"}));
        post_json!(app, "/api/assign", json!({"zone_id": "z1"}));
        let req = test::TestRequest::post().uri("/api/copy").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["kind"], "copied");
        assert_eq!(body["description"], "Alice - Lounge");
    }

    #[actix_web::test]
    async fn index_serves_html() {
        let app = test::init_service(App::new().app_data(app_state(MemoryClipboard::default())).configure(configure)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
