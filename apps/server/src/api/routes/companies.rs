//! Company search routes

use crate::api::handlers::search;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(search::search_companies))
        .route("/companies/", get(search::search_companies))
        .route("/companies/_search", post(search::search_companies_post))
}
