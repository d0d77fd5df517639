//! In-memory stand-in for the GoRest users API.
//!
//! Serves the listing, get, update and delete endpoints under
//! `/public/v2/users` with the same pagination headers and error bodies as
//! the public service. Every request must carry the configured bearer token.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const USERS_PATH: &str = "/public/v2/users";
pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

pub const PAGINATION_TOTAL: &str = "x-pagination-total";
pub const PAGINATION_PAGES: &str = "x-pagination-pages";
pub const PAGINATION_PAGE: &str = "x-pagination-page";
pub const PAGINATION_LIMIT: &str = "x-pagination-limit";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub status: String,
}

/// Update payload. Unknown fields such as `id` are ignored; omitted fields
/// keep their stored value.
#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

pub type Db = Arc<RwLock<BTreeMap<u64, User>>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    token: Arc<str>,
}

type Rejection = (StatusCode, Json<Message>);

pub fn app(token: &str, users: Vec<User>) -> Router {
    let db: Db = Arc::new(RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()));
    let state = AppState {
        db,
        token: Arc::from(token),
    };
    Router::new()
        .route(USERS_PATH, get(list_users))
        .route(
            &format!("{USERS_PATH}/{{id}}"),
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str, users: Vec<User>) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, users = users.len(), "mock users service listening");
    }
    axum::serve(listener, app(token, users)).await
}

/// Deterministic sample users with ids `1..=count`.
pub fn seed_users(count: u64) -> Vec<User> {
    const FIRST: [&str; 8] = ["Anunay", "Triloki", "Menka", "Nawal", "Bhudev", "Navin", "Anila", "Sharmila"];
    const LAST: [&str; 5] = ["Gupta", "Pillai", "Banerjee", "Dwivedi", "Malik"];

    (1..=count)
        .map(|id| {
            let first = FIRST[(id as usize) % FIRST.len()];
            let last = LAST[(id as usize / FIRST.len()) % LAST.len()];
            User {
                id,
                name: format!("{first} {last}"),
                email: format!("{}_{}_{id}@example.test", first.to_lowercase(), last.to_lowercase()),
                gender: if id % 2 == 0 { "female" } else { "male" }.to_string(),
                status: if id % 3 == 0 { "inactive" } else { "active" }.to_string(),
            }
        })
        .collect()
}

fn reject(status: StatusCode, message: &str) -> Rejection {
    (
        status,
        Json(Message {
            message: message.to_string(),
        }),
    )
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Rejection> {
    let expected = format!("Bearer {}", state.token);
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(reject(StatusCode::UNAUTHORIZED, "Authentication failed")),
    }
}

fn not_found() -> Rejection {
    reject(StatusCode::NOT_FOUND, "Resource not found")
}

async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<(HeaderMap, Json<Vec<User>>), Rejection> {
    authorize(&state, &headers)?;

    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let page = query.page.unwrap_or(1).max(1);

    let users = state.db.read().await;
    let total = users.len();
    let pages = total.div_ceil(per_page);
    // Newest first, like the public service.
    let page_users: Vec<User> = users
        .values()
        .rev()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .cloned()
        .collect();

    let mut out = HeaderMap::new();
    out.insert(HeaderName::from_static(PAGINATION_TOTAL), HeaderValue::from(total));
    out.insert(HeaderName::from_static(PAGINATION_PAGES), HeaderValue::from(pages));
    out.insert(HeaderName::from_static(PAGINATION_PAGE), HeaderValue::from(page));
    out.insert(HeaderName::from_static(PAGINATION_LIMIT), HeaderValue::from(per_page));
    Ok((out, Json(page_users)))
}

async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<User>, Rejection> {
    authorize(&state, &headers)?;
    let users = state.db.read().await;
    users.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, Rejection> {
    authorize(&state, &headers)?;
    let mut users = state.db.write().await;
    let user = users.get_mut(&id).ok_or_else(not_found)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    if let Some(gender) = input.gender {
        user.gender = gender;
    }
    if let Some(status) = input.status {
        user.status = status;
    }
    info!(id, name = %user.name, "user updated");
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, Rejection> {
    authorize(&state, &headers)?;
    let mut users = state.db.write().await;
    users.remove(&id).ok_or_else(not_found)?;
    info!(id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
