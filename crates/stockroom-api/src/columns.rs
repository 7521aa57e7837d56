//! Handler for `GET /columns`: the asset-list column catalog, so clients can
//! label headers and hide the default-hidden columns.

use axum::Json;
use stockroom_core::table::{ColumnInfo, catalog};

/// `GET /columns`
pub async fn handler() -> Json<Vec<ColumnInfo>> { Json(catalog()) }
