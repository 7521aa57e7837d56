//! Handlers for `/locations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/locations` | All storage locations |
//! | `POST` | `/locations` | Body: [`NewLocation`] |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use stockroom_core::{
  record::{Location, NewLocation},
  store::InventoryStore,
};

use crate::error::{ApiError, non_blank, require};

/// `GET /locations`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Location>>, ApiError>
where
  S: InventoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let locations = store
    .list_locations()
    .await
    .map_err(ApiError::from_store::<S>)?;
  Ok(Json(locations))
}

/// `POST /locations`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(mut body): Json<NewLocation>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require("name", &body.name)?;
  require("street1", &body.street1)?;
  require("suburb", &body.suburb)?;
  require("state", &body.state)?;
  body.name = body.name.trim().to_owned();
  body.street2 = non_blank(body.street2);

  let location = store
    .create_location(body)
    .await
    .map_err(ApiError::from_store::<S>)?;
  Ok((StatusCode::CREATED, Json(location)))
}
