//! The `MateriaStore` trait.
//!
//! Implemented by storage backends (e.g. `rollcall-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on a concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::materia::{Materia, MateriaInput};

/// Error type of a [`MateriaStore`] backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` when the operation addressed an id the store does not hold.
  fn is_not_found(&self) -> bool;
}

/// Abstraction over the persistence backend for subject records.
///
/// Every method maps to a single statement against the backing store. No
/// value validation happens here: empty names or negative counts are stored
/// as given.
pub trait MateriaStore: Send + Sync {
  type Error: StoreError;

  /// Insert a new record with a store-assigned id.
  fn create(
    &self,
    input: MateriaInput,
  ) -> impl Future<Output = Result<Materia, Self::Error>> + Send + '_;

  /// All records, in insertion order.
  fn list(&self) -> impl Future<Output = Result<Vec<Materia>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Materia>, Self::Error>> + Send + '_;

  /// Overwrite all four fields of the record `id`.
  ///
  /// Fails with a not-found error if no such record exists.
  fn update(
    &self,
    id: Uuid,
    input: MateriaInput,
  ) -> impl Future<Output = Result<Materia, Self::Error>> + Send + '_;

  /// Hard-delete the record `id`.
  ///
  /// Fails with a not-found error if no such record exists, including when it
  /// was already deleted.
  fn delete(&self, id: Uuid) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
