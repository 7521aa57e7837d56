//! JSON REST API for Stockroom.
//!
//! Exposes an axum [`Router`] backed by any
//! [`stockroom_core::store::InventoryStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", stockroom_api::api_router(store.clone()))
//! ```

pub mod assets;
pub mod columns;
pub mod error;
pub mod locations;
pub mod manufacturers;
pub mod models;

use std::sync::Arc;

use axum::{Router, routing::get};
use stockroom_core::store::InventoryStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: InventoryStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/assets", get(assets::list::<S>).post(assets::create::<S>))
    .route("/models", get(models::list::<S>).post(models::create::<S>))
    .route(
      "/manufacturers",
      get(manufacturers::list::<S>).post(manufacturers::create::<S>),
    )
    .route("/manufacturers/{id}", get(manufacturers::get_one::<S>))
    .route("/locations", get(locations::list::<S>).post(locations::create::<S>))
    .route("/columns", get(columns::handler))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use stockroom_core::record::{
    Asset, Location, Manufacturer, Model, NewAsset, NewLocation,
    NewManufacturer, NewModel,
  };
  use stockroom_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  async fn post(app: &Router, uri: &str, body: Value) -> Value {
    let (status, json) = send(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri}: {json}");
    json
  }

  fn warehouse(name: &str) -> Value {
    json!({
      "name": name,
      "street1": "12 Quay St",
      "street2": "",
      "suburb": "Fremantle",
      "postcode": 6160,
      "state": "WA",
    })
  }

  fn drill(manufacturer_id: &Value) -> Value {
    json!({
      "name": "Drill",
      "manufacturer_id": manufacturer_id,
      "category": "Tool",
      "purchase_price": 349.95,
      "daily_hire": 35.0,
      "weekly_hire": 140.0,
      "weight": 2.1,
    })
  }

  /// Acme Drill in Warehouse A (AST-001), plus an asset with a dangling
  /// model (AST-002) in Warehouse B.
  async fn seeded() -> Router {
    let app = app().await;
    let acme = post(&app, "/manufacturers", json!({ "name": "Acme" })).await;
    let model = post(&app, "/models", drill(&acme["manufacturer_id"])).await;
    let a = post(&app, "/locations", warehouse("Warehouse A")).await;
    let b = post(&app, "/locations", warehouse("Warehouse B")).await;
    post(&app, "/assets", json!({
      "asset_tag": "AST-001",
      "model_id": model["model_id"],
      "location_id": a["location_id"],
      "serial_number": "SN-1",
    }))
    .await;
    post(&app, "/assets", json!({
      "asset_tag": "AST-002",
      "model_id": Uuid::new_v4(),
      "location_id": b["location_id"],
    }))
    .await;
    app
  }

  fn tags(rows: &Value) -> Vec<&str> {
    rows
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["asset_tag"].as_str().unwrap())
      .collect()
  }

  // ── Assets ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn empty_store_lists_no_assets() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/assets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn list_assets_returns_projected_rows() {
    let app = seeded().await;
    let (status, rows) = send(&app, "GET", "/assets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tags(&rows), ["AST-001", "AST-002"]);

    assert_eq!(rows[0]["full_model_name"], "Acme Drill");
    assert_eq!(rows[0]["manufacturer_name"], "Acme");
    assert_eq!(rows[0]["location_name"], "Warehouse A");
    assert_eq!(rows[0]["serial_number"], "SN-1");

    assert_eq!(rows[1]["model_name"], "");
    assert_eq!(rows[1]["full_model_name"], "");
    assert_eq!(rows[1]["location_name"], "Warehouse B");
  }

  #[tokio::test]
  async fn list_assets_text_search_and_sort() {
    let app = seeded().await;

    let (_, rows) = send(&app, "GET", "/assets?q=acme", None).await;
    assert_eq!(tags(&rows), ["AST-001"]);

    let (_, rows) = send(&app, "GET", "/assets?sort=asset_tag&desc=true", None).await;
    assert_eq!(tags(&rows), ["AST-002", "AST-001"]);
  }

  #[tokio::test]
  async fn list_assets_column_filter() {
    let app = seeded().await;
    let (_, rows) =
      send(&app, "GET", "/assets?filter=storage_location:warehouse%20b", None).await;
    assert_eq!(tags(&rows), ["AST-002"]);
  }

  #[tokio::test]
  async fn list_assets_filter_text_may_contain_commas() {
    let app = seeded().await;
    let (status, _) = send(&app, "POST", "/assets", Some(json!({
      "asset_tag": "AST-003",
      "model_id": Uuid::new_v4(),
      "location_id": Uuid::new_v4(),
      "name": "Drill, cordless",
    })))
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, rows) =
      send(&app, "GET", "/assets?filter=name:drill%2C%20cordless", None).await;
    assert_eq!(status, StatusCode::OK, "{rows}");
    assert_eq!(tags(&rows), ["AST-003"]);

    let (_, rows) = send(
      &app,
      "GET",
      "/assets?filter=name:drill%2C%20cordless,asset_tag:ast-002",
      None,
    )
    .await;
    assert_eq!(tags(&rows), Vec::<&str>::new());
  }

  #[tokio::test]
  async fn list_assets_unknown_sort_column_is_400() {
    let app = seeded().await;
    let (status, body) = send(&app, "GET", "/assets?sort=colour", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("colour"));
  }

  #[tokio::test]
  async fn create_asset_accepts_timestamp_purchase_date() {
    let app = app().await;
    let asset = post(&app, "/assets", json!({
      "asset_tag": "AST-100",
      "model_id": Uuid::new_v4(),
      "location_id": Uuid::new_v4(),
      "name": "",
      "purchase_date": "2024-07-01T00:00:00.000Z",
    }))
    .await;
    assert_eq!(asset["purchase_date"], "2024-07-01");
    assert_eq!(asset["name"], Value::Null);
  }

  #[tokio::test]
  async fn create_asset_rejects_blank_tag_and_bad_date() {
    let app = app().await;
    let (status, _) = send(&app, "POST", "/assets", Some(json!({
      "asset_tag": "  ",
      "model_id": Uuid::new_v4(),
      "location_id": Uuid::new_v4(),
    })))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/assets", Some(json!({
      "asset_tag": "AST-101",
      "model_id": Uuid::new_v4(),
      "location_id": Uuid::new_v4(),
      "purchase_date": "yesterday",
    })))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn duplicate_asset_tag_is_409() {
    let app = seeded().await;
    let (status, body) = send(&app, "POST", "/assets", Some(json!({
      "asset_tag": "AST-001",
      "model_id": Uuid::new_v4(),
      "location_id": Uuid::new_v4(),
    })))
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("AST-001"));
  }

  // ── Reference collections ──────────────────────────────────────────────────

  #[tokio::test]
  async fn reference_collections_list_what_was_created() {
    let app = seeded().await;

    let (_, manufacturers) = send(&app, "GET", "/manufacturers", None).await;
    assert_eq!(manufacturers.as_array().unwrap().len(), 1);

    let (_, models) = send(&app, "GET", "/models", None).await;
    assert_eq!(models[0]["name"], "Drill");

    let (_, locations) = send(&app, "GET", "/locations", None).await;
    assert_eq!(locations.as_array().unwrap().len(), 2);
    assert_eq!(locations[0]["street2"], Value::Null);
  }

  #[tokio::test]
  async fn get_manufacturer_by_id() {
    let app = app().await;
    let acme = post(&app, "/manufacturers", json!({ "name": "Acme" })).await;
    let id = acme["manufacturer_id"].as_str().unwrap();

    let (status, body) = send(&app, "GET", &format!("/manufacturers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme");

    let missing = Uuid::new_v4();
    let (status, _) = send(&app, "GET", &format!("/manufacturers/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn create_location_trims_name() {
    let app = app().await;
    let depot = post(&app, "/locations", warehouse("  Depot  ")).await;
    assert_eq!(depot["name"], "Depot");

    post(&app, "/assets", json!({
      "asset_tag": "AST-200",
      "model_id": Uuid::new_v4(),
      "location_id": depot["location_id"],
    }))
    .await;
    let (_, rows) = send(&app, "GET", "/assets", None).await;
    assert_eq!(rows[0]["location_name"], "Depot");
  }

  #[tokio::test]
  async fn create_rejects_missing_required_fields() {
    let app = app().await;
    let (status, _) =
      send(&app, "POST", "/manufacturers", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut location = warehouse("Depot");
    location["suburb"] = json!(" ");
    let (status, _) = send(&app, "POST", "/locations", Some(location)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut model = drill(&json!(Uuid::new_v4()));
    model["daily_hire"] = json!(-1.0);
    let (status, body) = send(&app, "POST", "/models", Some(model)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("daily_hire"));
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("disk I/O error")]
  struct DiskError;

  /// Reads succeed and are empty; every write fails without conflicting.
  #[derive(Default)]
  struct BrokenDisk {
    asset_writes: AtomicUsize,
  }

  impl InventoryStore for BrokenDisk {
    type Error = DiskError;

    async fn list_assets(&self) -> Result<Vec<Asset>, DiskError> {
      Ok(Vec::new())
    }

    async fn list_models(&self) -> Result<Vec<Model>, DiskError> {
      Ok(Vec::new())
    }

    async fn list_manufacturers(&self) -> Result<Vec<Manufacturer>, DiskError> {
      Ok(Vec::new())
    }

    async fn list_locations(&self) -> Result<Vec<Location>, DiskError> {
      Ok(Vec::new())
    }

    async fn get_manufacturer(
      &self,
      _id: Uuid,
    ) -> Result<Option<Manufacturer>, DiskError> {
      Ok(None)
    }

    async fn create_asset(&self, _input: NewAsset) -> Result<Asset, DiskError> {
      self.asset_writes.fetch_add(1, Ordering::SeqCst);
      Err(DiskError)
    }

    async fn create_model(&self, _input: NewModel) -> Result<Model, DiskError> {
      Err(DiskError)
    }

    async fn create_manufacturer(
      &self,
      _input: NewManufacturer,
    ) -> Result<Manufacturer, DiskError> {
      Err(DiskError)
    }

    async fn create_location(
      &self,
      _input: NewLocation,
    ) -> Result<Location, DiskError> {
      Err(DiskError)
    }
  }

  #[tokio::test]
  async fn failed_asset_write_is_500_and_not_retried() {
    let store = Arc::new(BrokenDisk::default());
    let app = api_router(store.clone());

    let (status, body) = send(&app, "POST", "/assets", Some(json!({
      "asset_tag": "AST-001",
      "model_id": Uuid::new_v4(),
      "location_id": Uuid::new_v4(),
    })))
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "disk I/O error");
    assert_eq!(store.asset_writes.load(Ordering::SeqCst), 1);

    let (status, rows) = send(&app, "GET", "/assets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows, json!([]));
  }

  // ── Columns ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn columns_catalog() {
    let app = app().await;
    let (status, cols) = send(&app, "GET", "/columns", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cols[0], json!({
      "key": "asset_tag",
      "label": "Asset Tag",
      "hidden_by_default": false,
    }));
    assert_eq!(cols.as_array().unwrap().len(), 6);
  }
}
