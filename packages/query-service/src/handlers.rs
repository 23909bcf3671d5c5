//! HTTP request handlers.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use daocean_subgraph::query::{dao_scoped, my_daos, recent_daos};
use daocean_subgraph::{execute, Block, EntityQuery, EntityStore, QueryError};
use daocean_types::{parse_u256, EventKind};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::response::{CollectionResponse, EntityResponse, HealthResponse, IngestResponse};
use crate::state::AppState;
use crate::Error;

fn collection_kind(collection: &str) -> Result<EventKind, Error> {
    EventKind::from_collection(collection)
        .ok_or_else(|| QueryError::UnknownCollection(collection.to_string()).into())
}

fn run_query(state: &AppState, query: &EntityQuery) -> Result<CollectionResponse, Error> {
    let indexer = state.indexer()?;
    let data = execute(indexer.store(), query)
        .into_iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()?;

    debug!(collection = query.kind.collection(), rows = data.len(), "Query executed");
    Ok(CollectionResponse {
        success: true,
        collection: query.kind.collection(),
        count: data.len(),
        data,
    })
}

/// Health check with indexing progress.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, Error> {
    let indexer = state.indexer()?;
    Ok(Json(HealthResponse {
        status: "ok",
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
        blocks_indexed: state.blocks_indexed.load(Ordering::Relaxed),
        last_block: indexer.last_block(),
        entities: indexer.store().len(),
    }))
}

/// Index one block posted by the indexing host.
pub async fn ingest_block(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Block>, JsonRejection>,
) -> Result<Json<IngestResponse>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let Json(block) = body.map_err(|e| {
        warn!(error = %e, "Invalid block body");
        Error::BadRequest(e.body_text())
    })?;

    info!(block = block.number, logs = block.logs.len(), "Ingesting block");
    let summary = state.ingest(&block)?;
    Ok(Json(summary.into()))
}

/// Collection query. Every query-string pair is passed through, in order.
pub async fn list_entities(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<CollectionResponse>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let query = EntityQuery::from_params(
        &collection,
        params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    )?;
    Ok(Json(run_query(&state, &query)?))
}

pub async fn get_entity(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<EntityResponse>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let kind = collection_kind(&collection)?;
    let indexer = state.indexer()?;
    let entity = indexer
        .store()
        .get(kind, &id)
        .ok_or_else(|| Error::NotFound(format!("{} {id}", kind.name())))?;

    let data = serde_json::to_value(entity)?;
    Ok(Json(EntityResponse { success: true, data }))
}

#[derive(Debug, Deserialize)]
pub struct DaosParams {
    pub owner: Option<String>,
}

/// DAOs owned by `owner`, or the most recent DAOs when no owner is given.
pub async fn daos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DaosParams>,
) -> Result<Json<CollectionResponse>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let query = match params.owner.as_deref().filter(|o| !o.is_empty()) {
        Some(owner) => my_daos(owner)?,
        None => recent_daos()?,
    };
    Ok(Json(run_query(&state, &query)?))
}

/// One DAO's slice of a DAO-keyed collection, newest first.
pub async fn dao_collection(
    State(state): State<Arc<AppState>>,
    Path((dao_id, collection)): Path<(String, String)>,
) -> Result<Json<CollectionResponse>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let dao_id = parse_u256(&dao_id).map_err(|e| Error::BadRequest(e.to_string()))?;
    let kind = collection_kind(&collection)?;
    let query = dao_scoped(kind, dao_id)?;
    Ok(Json(run_query(&state, &query)?))
}
