//! JSON REST API for rollcall.
//!
//! Exposes an axum [`Router`] backed by any [`rollcall_core::store::MateriaStore`].
//! Transport concerns (binding, tracing layers) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new().merge(rollcall_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod materias;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use rollcall_core::store::MateriaStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged or nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: MateriaStore + 'static,
{
  Router::new()
    .route("/materias", get(materias::list::<S>).post(materias::create::<S>))
    .route("/materias/{id}", put(materias::update::<S>).delete(materias::delete::<S>))
    .with_state(store)
}
