//! Collections Router
//!
//! The identity middleware is layered on by the caller (the API
//! binary), since it needs the auth state; every handler here
//! requires a `CurrentUser` extension.

use axum::routing::{get, post, put};
use axum::Router;

use crate::domain::repository::CollectionRepository;
use crate::presentation::handlers::{self, CollectionsAppState};

/// Create the collections router
pub fn collections_router<R>(state: CollectionsAppState<R>) -> Router
where
    R: CollectionRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            post(handlers::create_collection::<R>).get(handlers::list_collections::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_collection::<R>)
                .patch(handlers::update_collection::<R>)
                .delete(handlers::delete_collection::<R>),
        )
        .route("/{id}/cards", post(handlers::add_card::<R>))
        .route(
            "/{id}/cards/{card_id}",
            put(handlers::update_card::<R>).delete(handlers::remove_card::<R>),
        )
        .with_state(state)
}
