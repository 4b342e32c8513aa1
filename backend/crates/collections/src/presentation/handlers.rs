//! HTTP Handlers
//!
//! All handlers assume the auth identity middleware already ran and
//! attached a `CurrentUser`; the router composition in the API binary
//! guarantees this.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::{CardId, CollectionId};

use crate::application::service::CollectionService;
use crate::domain::repository::CollectionRepository;
use crate::error::CollectionResult;
use crate::presentation::dto::{
    AddCardRequest, CollectionListResponse, CollectionResponse, CreateCollectionRequest,
    ListCollectionsQuery, UpdateCardRequest, UpdateCollectionRequest,
};

/// Shared state for collection handlers
pub struct CollectionsAppState<R>
where
    R: CollectionRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

// Manual impl: derive(Clone) would require R: Clone
impl<R> Clone for CollectionsAppState<R>
where
    R: CollectionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// POST /api/collections
pub async fn create_collection<R>(
    State(state): State<CollectionsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateCollectionRequest>,
) -> CollectionResult<impl IntoResponse>
where
    R: CollectionRepository + Send + Sync + 'static,
{
    let service = CollectionService::new(state.repo.clone());
    let collection = service
        .create(&current.0.id, req.title, req.description)
        .await?;

    Ok((StatusCode::CREATED, Json(CollectionResponse::new(collection))))
}

/// GET /api/collections?title=
pub async fn list_collections<R>(
    State(state): State<CollectionsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListCollectionsQuery>,
) -> CollectionResult<Json<CollectionListResponse>>
where
    R: CollectionRepository + Send + Sync + 'static,
{
    let service = CollectionService::new(state.repo.clone());
    let collections = service
        .list(&current.0.id, query.title.as_deref())
        .await?;

    Ok(Json(CollectionListResponse::new(collections)))
}

/// GET /api/collections/{id}
pub async fn get_collection<R>(
    State(state): State<CollectionsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<CollectionId>,
) -> CollectionResult<Json<CollectionResponse>>
where
    R: CollectionRepository + Send + Sync + 'static,
{
    let service = CollectionService::new(state.repo.clone());
    let collection = service.get(&current.0.id, &id).await?;

    Ok(Json(CollectionResponse::new(collection)))
}

/// PATCH /api/collections/{id}
pub async fn update_collection<R>(
    State(state): State<CollectionsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<CollectionId>,
    Json(req): Json<UpdateCollectionRequest>,
) -> CollectionResult<Json<CollectionResponse>>
where
    R: CollectionRepository + Send + Sync + 'static,
{
    let service = CollectionService::new(state.repo.clone());
    let collection = service
        .update(&current.0.id, &id, req.title, req.description)
        .await?;

    Ok(Json(CollectionResponse::new(collection)))
}

/// DELETE /api/collections/{id}
pub async fn delete_collection<R>(
    State(state): State<CollectionsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<CollectionId>,
) -> CollectionResult<StatusCode>
where
    R: CollectionRepository + Send + Sync + 'static,
{
    let service = CollectionService::new(state.repo.clone());
    service.delete(&current.0.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/collections/{id}/cards
pub async fn add_card<R>(
    State(state): State<CollectionsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<CollectionId>,
    Json(req): Json<AddCardRequest>,
) -> CollectionResult<impl IntoResponse>
where
    R: CollectionRepository + Send + Sync + 'static,
{
    let service = CollectionService::new(state.repo.clone());
    let collection = service
        .add_card(&current.0.id, &id, req.lexi, req.description)
        .await?;

    Ok((StatusCode::CREATED, Json(CollectionResponse::new(collection))))
}

/// PUT /api/collections/{id}/cards/{card_id}
pub async fn update_card<R>(
    State(state): State<CollectionsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path((id, card_id)): Path<(CollectionId, CardId)>,
    Json(req): Json<UpdateCardRequest>,
) -> CollectionResult<Json<CollectionResponse>>
where
    R: CollectionRepository + Send + Sync + 'static,
{
    let service = CollectionService::new(state.repo.clone());
    let collection = service
        .update_card(&current.0.id, &id, &card_id, req.lexi, req.description)
        .await?;

    Ok(Json(CollectionResponse::new(collection)))
}

/// DELETE /api/collections/{id}/cards/{card_id}
pub async fn remove_card<R>(
    State(state): State<CollectionsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path((id, card_id)): Path<(CollectionId, CardId)>,
) -> CollectionResult<Json<CollectionResponse>>
where
    R: CollectionRepository + Send + Sync + 'static,
{
    let service = CollectionService::new(state.repo.clone());
    let collection = service.remove_card(&current.0.id, &id, &card_id).await?;

    // The trimmed collection goes back so the client can re-render
    Ok(Json(CollectionResponse::new(collection)))
}
