//! Handlers for `/assets` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/assets` | Projected rows; optional `q`, `filter`, `sort`, `desc` |
//! | `POST` | `/assets` | Body: [`NewAssetBody`]; returns 201 + stored asset |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use stockroom_core::{
  ProjectedAsset,
  record::{NewAsset, parse_purchase_date},
  store::InventoryStore,
  table::{Column, ColumnFilter, Sort, TableQuery},
};
use uuid::Uuid;

use crate::error::{ApiError, non_blank, require};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Free-text filter over every column.
  pub q:      Option<String>,
  /// Comma-separated `<column>:<text>` pairs, e.g. `model:acme,name:drill`.
  /// A comma not followed by a column key stays in the filter text.
  pub filter: Option<String>,
  /// Column key to order by; projection order if absent.
  pub sort:   Option<String>,
  #[serde(default)]
  pub desc:   bool,
}

impl ListParams {
  fn into_query(self) -> Result<TableQuery, ApiError> {
    let filters = self
      .filter
      .as_deref()
      .map(ColumnFilter::parse_list)
      .transpose()?
      .unwrap_or_default();

    let sort = self
      .sort
      .as_deref()
      .map(Column::from_key)
      .transpose()?
      .map(|column| Sort { column, descending: self.desc });

    Ok(TableQuery { text: self.q, filters, sort })
  }
}

/// `GET /assets[?q=...][&filter=<col>:<text>,...][&sort=<col>][&desc=true]`
///
/// Reads a fresh snapshot of all four collections and projects it on every
/// request.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ProjectedAsset>>, ApiError>
where
  S: InventoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = params.into_query()?;
  let snapshot = store.snapshot().await.map_err(ApiError::from_store::<S>)?;
  Ok(Json(query.apply(snapshot.project())))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /assets`.
///
/// Blank optional strings are treated as absent. `purchase_date` accepts
/// `YYYY-MM-DD` or an RFC 3339 timestamp.
#[derive(Debug, Deserialize)]
pub struct NewAssetBody {
  pub asset_tag:     String,
  pub model_id:      Uuid,
  pub location_id:   Uuid,
  pub serial_number: Option<String>,
  pub name:          Option<String>,
  pub purchase_date: Option<String>,
}

impl TryFrom<NewAssetBody> for NewAsset {
  type Error = ApiError;

  fn try_from(b: NewAssetBody) -> Result<Self, ApiError> {
    require("asset_tag", &b.asset_tag)?;
    let purchase_date = non_blank(b.purchase_date)
      .as_deref()
      .map(parse_purchase_date)
      .transpose()?;

    Ok(NewAsset {
      asset_tag: b.asset_tag.trim().to_owned(),
      model_id: b.model_id,
      location_id: b.location_id,
      serial_number: non_blank(b.serial_number),
      name: non_blank(b.name),
      purchase_date,
    })
  }
}

/// `POST /assets`: returns 201 + the stored
/// [`Asset`](stockroom_core::record::Asset).
///
/// The referenced model and location are not required to exist.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewAssetBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = NewAsset::try_from(body)?;
  let asset = store
    .create_asset(input)
    .await
    .map_err(ApiError::from_store::<S>)?;
  Ok((StatusCode::CREATED, Json(asset)))
}
