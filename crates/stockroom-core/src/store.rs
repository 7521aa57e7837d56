//! The `InventoryStore` trait.
//!
//! Implemented by storage backends (e.g. `stockroom-store-sqlite`). Higher
//! layers (`stockroom-api`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  projection::Snapshot,
  record::{
    Asset, Location, Manufacturer, Model, NewAsset, NewLocation,
    NewManufacturer, NewModel,
  },
};

/// Abstraction over an inventory store backend.
///
/// The four collections are read independently and in full. Writes are
/// inserts only; the store assigns the id and creation timestamp. No write
/// checks that referenced ids exist.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait InventoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Whether `err` means an insert clashed with existing data (such as a
  /// reused asset tag), as opposed to the store failing.
  fn is_conflict(_err: &Self::Error) -> bool { false }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every asset, in insertion order.
  fn list_assets(
    &self,
  ) -> impl Future<Output = Result<Vec<Asset>, Self::Error>> + Send + '_;

  fn list_models(
    &self,
  ) -> impl Future<Output = Result<Vec<Model>, Self::Error>> + Send + '_;

  fn list_manufacturers(
    &self,
  ) -> impl Future<Output = Result<Vec<Manufacturer>, Self::Error>> + Send + '_;

  fn list_locations(
    &self,
  ) -> impl Future<Output = Result<Vec<Location>, Self::Error>> + Send + '_;

  /// Retrieve a manufacturer by id. Returns `None` if not found.
  fn get_manufacturer(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Manufacturer>, Self::Error>> + Send + '_;

  // ── Inserts ───────────────────────────────────────────────────────────

  /// Persist a new asset. Fails if the asset tag is already taken or the
  /// write is rejected; failures are not retried.
  fn create_asset(
    &self,
    input: NewAsset,
  ) -> impl Future<Output = Result<Asset, Self::Error>> + Send + '_;

  fn create_model(
    &self,
    input: NewModel,
  ) -> impl Future<Output = Result<Model, Self::Error>> + Send + '_;

  fn create_manufacturer(
    &self,
    input: NewManufacturer,
  ) -> impl Future<Output = Result<Manufacturer, Self::Error>> + Send + '_;

  fn create_location(
    &self,
    input: NewLocation,
  ) -> impl Future<Output = Result<Location, Self::Error>> + Send + '_;

  // ── Derived ───────────────────────────────────────────────────────────

  /// Read all four collections into a [`Snapshot`].
  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_ {
    async move {
      Ok(Snapshot {
        assets:        self.list_assets().await?,
        models:        self.list_models().await?,
        manufacturers: self.list_manufacturers().await?,
        locations:     self.list_locations().await?,
      })
    }
  }
}
