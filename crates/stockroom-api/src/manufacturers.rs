//! Handlers for `/manufacturers` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/manufacturers` | All manufacturers |
//! | `POST` | `/manufacturers` | Body: `{"name":"Acme"}` |
//! | `GET`  | `/manufacturers/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use stockroom_core::{
  record::{Manufacturer, NewManufacturer},
  store::InventoryStore,
};
use uuid::Uuid;

use crate::error::{ApiError, require};

/// `GET /manufacturers`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Manufacturer>>, ApiError>
where
  S: InventoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let manufacturers = store
    .list_manufacturers()
    .await
    .map_err(ApiError::from_store::<S>)?;
  Ok(Json(manufacturers))
}

/// `POST /manufacturers`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewManufacturer>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require("name", &body.name)?;
  let manufacturer = store
    .create_manufacturer(NewManufacturer { name: body.name.trim().to_owned() })
    .await
    .map_err(ApiError::from_store::<S>)?;
  Ok((StatusCode::CREATED, Json(manufacturer)))
}

/// `GET /manufacturers/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Manufacturer>, ApiError>
where
  S: InventoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let manufacturer = store
    .get_manufacturer(id)
    .await
    .map_err(ApiError::from_store::<S>)?
    .ok_or_else(|| ApiError::NotFound(format!("manufacturer {id} not found")))?;
  Ok(Json(manufacturer))
}
