//! Record types for the four independently stored collections.
//!
//! References between records are plain ids, never embedded objects. Nothing
//! here guarantees that a referenced id exists; see [`crate::projection`] for
//! how dangling references are displayed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Manufacturer ────────────────────────────────────────────────────────────

/// The maker of a [`Model`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
  pub manufacturer_id: Uuid,
  pub created_at:      DateTime<Utc>,
  pub name:            String,
}

/// Input to [`crate::store::InventoryStore::create_manufacturer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewManufacturer {
  pub name: String,
}

// ─── Location ────────────────────────────────────────────────────────────────

/// A physical storage address an asset can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub location_id: Uuid,
  pub created_at:  DateTime<Utc>,
  pub name:        String,
  pub street1:     String,
  pub street2:     Option<String>,
  pub suburb:      String,
  pub postcode:    u32,
  /// State or territory abbreviation, e.g. "NSW".
  pub state:       String,
}

/// Input to [`crate::store::InventoryStore::create_location`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLocation {
  pub name:     String,
  pub street1:  String,
  #[serde(default)]
  pub street2:  Option<String>,
  pub suburb:   String,
  pub postcode: u32,
  pub state:    String,
}

// ─── Model ───────────────────────────────────────────────────────────────────

/// A catalog entry describing a class of asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
  pub model_id:        Uuid,
  pub created_at:      DateTime<Utc>,
  pub name:            String,
  pub manufacturer_id: Uuid,
  pub category:        String,
  pub purchase_price:  f64,
  pub daily_hire:      f64,
  pub weekly_hire:     f64,
  /// Weight in kilograms.
  pub weight:          f64,
}

/// Input to [`crate::store::InventoryStore::create_model`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewModel {
  pub name:            String,
  pub manufacturer_id: Uuid,
  pub category:        String,
  pub purchase_price:  f64,
  pub daily_hire:      f64,
  pub weekly_hire:     f64,
  pub weight:          f64,
}

// ─── Asset ───────────────────────────────────────────────────────────────────

/// A physical inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
  pub asset_id:      Uuid,
  pub created_at:    DateTime<Utc>,
  /// Business key printed on the asset label; unique per store.
  pub asset_tag:     String,
  pub model_id:      Uuid,
  pub location_id:   Uuid,
  pub serial_number: Option<String>,
  pub name:          Option<String>,
  pub purchase_date: Option<NaiveDate>,
}

/// Input to [`crate::store::InventoryStore::create_asset`].
///
/// `model_id` and `location_id` are not checked against their collections;
/// an asset may point at a record that does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAsset {
  pub asset_tag:     String,
  pub model_id:      Uuid,
  pub location_id:   Uuid,
  #[serde(default)]
  pub serial_number: Option<String>,
  #[serde(default)]
  pub name:          Option<String>,
  #[serde(default)]
  pub purchase_date: Option<NaiveDate>,
}

impl NewAsset {
  /// Convenience constructor with all optional fields empty.
  pub fn new(asset_tag: impl Into<String>, model_id: Uuid, location_id: Uuid) -> Self {
    Self {
      asset_tag: asset_tag.into(),
      model_id,
      location_id,
      serial_number: None,
      name: None,
      purchase_date: None,
    }
  }
}

/// Parse a purchase date from an ISO-8601 string.
///
/// Accepts a plain calendar date (`2024-03-01`) or a full RFC 3339 timestamp
/// (`2024-03-01T00:00:00.000Z`), in which case only the UTC date is kept.
pub fn parse_purchase_date(s: &str) -> Result<NaiveDate> {
  let s = s.trim();
  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Ok(date);
  }
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc).date_naive())
    .map_err(|_| Error::InvalidPurchaseDate(s.to_owned()))
}
