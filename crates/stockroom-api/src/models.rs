//! Handlers for `/models` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/models` | All models |
//! | `POST` | `/models` | Body: [`NewModel`]; the manufacturer need not exist |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use stockroom_core::{
  record::{Model, NewModel},
  store::InventoryStore,
};

use crate::error::{ApiError, require};

/// `GET /models`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Model>>, ApiError>
where
  S: InventoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let models = store.list_models().await.map_err(ApiError::from_store::<S>)?;
  Ok(Json(models))
}

/// `POST /models`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(mut body): Json<NewModel>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require("name", &body.name)?;
  require("category", &body.category)?;
  let prices = [
    ("purchase_price", body.purchase_price),
    ("daily_hire", body.daily_hire),
    ("weekly_hire", body.weekly_hire),
    ("weight", body.weight),
  ];
  if let Some((field, _)) = prices.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
    return Err(ApiError::BadRequest(format!("{field} must be a non-negative number")));
  }
  body.name = body.name.trim().to_owned();

  let model = store
    .create_model(body)
    .await
    .map_err(ApiError::from_store::<S>)?;
  Ok((StatusCode::CREATED, Json(model)))
}
