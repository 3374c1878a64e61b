//! Company search handlers
//!
//! - `GET  /api/companies?search=..&sort_by=..&sort_order=..&algorithm=..`
//! - `POST /api/companies/_search` with the same fields as a JSON body

use crate::{services::SearchRequest, state::AppState, Result};
use axum::{
    extract::{Query, State},
    Json,
};
use tally_query::Record;

pub async fn search_companies(
    State(state): State<AppState>,
    Query(request): Query<SearchRequest>,
) -> Result<Json<Vec<Record>>> {
    run_search(&state, request).await
}

pub async fn search_companies_post(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<Record>>> {
    run_search(&state, request).await
}

async fn run_search(state: &AppState, request: SearchRequest) -> Result<Json<Vec<Record>>> {
    tracing::debug!(
        search_text = %request.search_text,
        sort_field = ?request.sort_field,
        sort_order = ?request.sort_order,
        algorithm = ?request.algorithm,
        "Search request"
    );
    let records = state.search_service.search(&request).await?;
    Ok(Json(records))
}
