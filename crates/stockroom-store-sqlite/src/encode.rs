//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, purchase dates are `YYYY-MM-DD`, and UUIDs
//! are hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use stockroom_core::record::{Asset, Location, Manufacturer, Model};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `manufacturers` row.
pub struct RawManufacturer {
  pub manufacturer_id: String,
  pub created_at:      String,
  pub name:            String,
}

impl RawManufacturer {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      manufacturer_id: row.get(0)?,
      created_at:      row.get(1)?,
      name:            row.get(2)?,
    })
  }

  pub fn into_manufacturer(self) -> Result<Manufacturer> {
    Ok(Manufacturer {
      manufacturer_id: decode_uuid(&self.manufacturer_id)?,
      created_at:      decode_dt(&self.created_at)?,
      name:            self.name,
    })
  }
}

/// Raw values read directly from a `locations` row.
pub struct RawLocation {
  pub location_id: String,
  pub created_at:  String,
  pub name:        String,
  pub street1:     String,
  pub street2:     Option<String>,
  pub suburb:      String,
  pub postcode:    u32,
  pub state:       String,
}

impl RawLocation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      location_id: row.get(0)?,
      created_at:  row.get(1)?,
      name:        row.get(2)?,
      street1:     row.get(3)?,
      street2:     row.get(4)?,
      suburb:      row.get(5)?,
      postcode:    row.get(6)?,
      state:       row.get(7)?,
    })
  }

  pub fn into_location(self) -> Result<Location> {
    Ok(Location {
      location_id: decode_uuid(&self.location_id)?,
      created_at:  decode_dt(&self.created_at)?,
      name:        self.name,
      street1:     self.street1,
      street2:     self.street2,
      suburb:      self.suburb,
      postcode:    self.postcode,
      state:       self.state,
    })
  }
}

/// Raw values read directly from a `models` row.
pub struct RawModel {
  pub model_id:        String,
  pub created_at:      String,
  pub name:            String,
  pub manufacturer_id: String,
  pub category:        String,
  pub purchase_price:  f64,
  pub daily_hire:      f64,
  pub weekly_hire:     f64,
  pub weight:          f64,
}

impl RawModel {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      model_id:        row.get(0)?,
      created_at:      row.get(1)?,
      name:            row.get(2)?,
      manufacturer_id: row.get(3)?,
      category:        row.get(4)?,
      purchase_price:  row.get(5)?,
      daily_hire:      row.get(6)?,
      weekly_hire:     row.get(7)?,
      weight:          row.get(8)?,
    })
  }

  pub fn into_model(self) -> Result<Model> {
    Ok(Model {
      model_id:        decode_uuid(&self.model_id)?,
      created_at:      decode_dt(&self.created_at)?,
      name:            self.name,
      manufacturer_id: decode_uuid(&self.manufacturer_id)?,
      category:        self.category,
      purchase_price:  self.purchase_price,
      daily_hire:      self.daily_hire,
      weekly_hire:     self.weekly_hire,
      weight:          self.weight,
    })
  }
}

/// Raw values read directly from an `assets` row.
pub struct RawAsset {
  pub asset_id:      String,
  pub created_at:    String,
  pub asset_tag:     String,
  pub model_id:      String,
  pub location_id:   String,
  pub serial_number: Option<String>,
  pub name:          Option<String>,
  pub purchase_date: Option<String>,
}

impl RawAsset {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      asset_id:      row.get(0)?,
      created_at:    row.get(1)?,
      asset_tag:     row.get(2)?,
      model_id:      row.get(3)?,
      location_id:   row.get(4)?,
      serial_number: row.get(5)?,
      name:          row.get(6)?,
      purchase_date: row.get(7)?,
    })
  }

  pub fn into_asset(self) -> Result<Asset> {
    Ok(Asset {
      asset_id:      decode_uuid(&self.asset_id)?,
      created_at:    decode_dt(&self.created_at)?,
      asset_tag:     self.asset_tag,
      model_id:      decode_uuid(&self.model_id)?,
      location_id:   decode_uuid(&self.location_id)?,
      serial_number: self.serial_number,
      name:          self.name,
      purchase_date: self
        .purchase_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
    })
  }
}
