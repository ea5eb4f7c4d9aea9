use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect};

use crate::io::store::RecordStore;
use crate::undo::{LastAction, UndoStatus};
use crate::web::AppState;
use crate::web::dto::{AddForm, TodosResponse, UpdateForm};
use crate::web::error::ApiError;
use crate::web::render::render_page;

const APP_JS: &str = include_str!("static/app.js");

/// `GET /`
pub async fn index<S: RecordStore + 'static>(State(service): State<AppState<S>>) -> Html<String> {
    let tasks = service.list();
    Html(render_page(&tasks, &service.last_action()))
}

/// `POST /add`
///
/// Form rejections are taken as a `Result` so they render as JSON errors.
pub async fn add_task<S: RecordStore + 'static>(
    State(service): State<AppState<S>>,
    form: Result<Form<AddForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form?;
    service.add(&form.task, form.done)?;
    Ok(Redirect::to("/"))
}

/// `POST /update/{id}`
pub async fn update_task<S: RecordStore + 'static>(
    State(service): State<AppState<S>>,
    Path(id): Path<String>,
    form: Result<Form<UpdateForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form?;
    service.set_done(&id, form.done)?;
    Ok(Redirect::to("/"))
}

/// `POST /delete/{id}`
pub async fn delete_task<S: RecordStore + 'static>(
    State(service): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    service.delete(&id)?;
    Ok(Redirect::to("/"))
}

/// `POST /clear`
pub async fn clear_tasks<S: RecordStore + 'static>(
    State(service): State<AppState<S>>,
) -> Result<Json<TodosResponse>, ApiError> {
    let todos = service.clear()?;
    Ok(Json(TodosResponse {
        status: UndoStatus::Success,
        todos,
    }))
}

/// `POST /undo`
pub async fn undo<S: RecordStore + 'static>(
    State(service): State<AppState<S>>,
) -> Result<Json<TodosResponse>, ApiError> {
    let (todos, status) = service.undo()?;
    Ok(Json(TodosResponse { status, todos }))
}

/// `GET /last-action`
pub async fn last_action<S: RecordStore + 'static>(
    State(service): State<AppState<S>>,
) -> Json<LastAction> {
    Json(service.last_action())
}

/// `GET /static/app.js`
pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        APP_JS,
    )
}
