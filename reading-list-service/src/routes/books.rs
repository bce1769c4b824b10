use crate::models::responses::{BooksResponse, EditRequest, LoadStatusResponse, ReloadResponse};
use crate::services::loader::reload;
use crate::services::table::{
    build_page, edit_cell, Column, EditError, SortOrder, TableQuery, TableRow,
};
use crate::state::{LoadState, SharedContext};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct BooksParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

pub async fn list_books(
    Query(params): Query<BooksParams>,
    State(ctx): State<SharedContext>,
) -> Result<Json<BooksResponse>, StatusCode> {
    let sort = match params.sort.as_deref() {
        Some(name) => Some(name.parse::<Column>().map_err(|e| {
            warn!("Rejected sort request: {}", e);
            StatusCode::BAD_REQUEST
        })?),
        None => None,
    };

    let query = TableQuery {
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(ctx.default_page_size),
        sort,
        order: params.order.unwrap_or_default(),
    };

    match &*ctx.state.read().await {
        LoadState::Ready(loaded) => Ok(Json(BooksResponse {
            source: loaded.source,
            loaded_at: loaded.loaded_at,
            page: build_page(&loaded.records, &query),
        })),
        _ => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

pub async fn load_status(State(ctx): State<SharedContext>) -> Json<LoadStatusResponse> {
    let state = ctx.state.read().await;

    let (count, source, loaded_at) = match &*state {
        LoadState::Ready(loaded) => (
            loaded.records.len(),
            Some(loaded.source),
            Some(loaded.loaded_at),
        ),
        _ => (0, None, None),
    };

    Json(LoadStatusResponse {
        state: state.name().to_string(),
        count,
        source,
        loaded_at,
    })
}

/// Edits stay in memory; the cached slot keeps the catalog data.
pub async fn edit_book(
    Path(row): Path<usize>,
    State(ctx): State<SharedContext>,
    Json(request): Json<EditRequest>,
) -> Result<Json<TableRow>, StatusCode> {
    let column: Column = request
        .column
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    let mut state = ctx.state.write().await;
    let LoadState::Ready(loaded) = &mut *state else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    match edit_cell(&mut loaded.records, row, column, request.value) {
        Ok(()) => {
            info!("Edited row {} column {}", row, column.name());
            Ok(Json(TableRow {
                row,
                record: loaded.records[row].clone(),
            }))
        }
        Err(e @ EditError::RowOutOfRange(_)) => {
            warn!("Rejected edit: {}", e);
            Err(StatusCode::NOT_FOUND)
        }
        Err(e @ EditError::InvalidYear(_)) => {
            warn!("Rejected edit: {}", e);
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

pub async fn reload_books(
    State(ctx): State<SharedContext>,
) -> Result<(StatusCode, Json<ReloadResponse>), StatusCode> {
    if *ctx.state.read().await == LoadState::Loading {
        return Err(StatusCode::CONFLICT);
    }

    info!("Reloading reading list from catalog");
    tokio::spawn(async move {
        reload(&ctx).await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(ReloadResponse {
            status: "reloading".to_string(),
        }),
    ))
}
