//! Column catalog, free-text search, column filters and ordering over
//! projected asset rows.
//!
//! Everything here runs after [`crate::project`] and only ever looks at the
//! materialised display fields. Matching is plain case-insensitive substring
//! containment; there is no ranking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result, projection::ProjectedAsset};

// ─── Columns ─────────────────────────────────────────────────────────────────

/// A column of the asset list.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Column {
  AssetTag,
  Name,
  SerialNumber,
  /// Manufacturer and model, from `full_model_name`.
  Model,
  /// From `location_name`.
  StorageLocation,
  CreatedAt,
}

impl Column {
  /// Every column, in display order.
  pub fn all() -> impl Iterator<Item = Self> { Self::iter() }

  /// Parse a column from its snake_case key.
  pub fn from_key(key: &str) -> Result<Self> {
    key
      .trim()
      .parse()
      .map_err(|_| Error::UnknownColumn(key.to_owned()))
  }

  pub fn key(self) -> &'static str { self.into() }

  /// Header text shown to users.
  pub fn label(self) -> &'static str {
    match self {
      Self::AssetTag => "Asset Tag",
      Self::Name => "Name",
      Self::SerialNumber => "Serial Number",
      Self::Model => "Model",
      Self::StorageLocation => "Storage Location",
      Self::CreatedAt => "Created At",
    }
  }

  pub fn hidden_by_default(self) -> bool {
    matches!(self, Self::SerialNumber | Self::CreatedAt)
  }

  /// The cell text for `row`. Absent optional fields render as "".
  pub fn value(self, row: &ProjectedAsset) -> String {
    let asset = &row.asset;
    match self {
      Self::AssetTag => asset.asset_tag.clone(),
      Self::Name => asset.name.clone().unwrap_or_default(),
      Self::SerialNumber => asset.serial_number.clone().unwrap_or_default(),
      Self::Model => row.full_model_name.clone(),
      Self::StorageLocation => row.location_name.clone(),
      Self::CreatedAt => asset.created_at.format("%d/%m/%Y").to_string(),
    }
  }

  fn compare(self, a: &ProjectedAsset, b: &ProjectedAsset) -> Ordering {
    match self {
      Self::CreatedAt => a.asset.created_at.cmp(&b.asset.created_at),
      _ => self
        .value(a)
        .to_lowercase()
        .cmp(&self.value(b).to_lowercase()),
    }
  }
}

/// Serialisable description of a [`Column`], for clients building a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
  pub key:               Column,
  pub label:             String,
  pub hidden_by_default: bool,
}

/// The full column catalog in display order.
pub fn catalog() -> Vec<ColumnInfo> {
  Column::all()
    .map(|c| ColumnInfo {
      key:               c,
      label:             c.label().to_owned(),
      hidden_by_default: c.hidden_by_default(),
    })
    .collect()
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Restrict one column to rows whose cell contains `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
  pub column: Column,
  pub text:   String,
}

impl ColumnFilter {
  /// Parse `"<column>:<text>"`, e.g. `"model:acme"`.
  pub fn parse(s: &str) -> Result<Self> {
    let (key, text) = s
      .split_once(':')
      .ok_or_else(|| Error::MalformedFilter(s.to_owned()))?;
    Ok(Self { column: Column::from_key(key)?, text: text.trim().to_owned() })
  }

  /// Parse a comma-separated list of filters, e.g.
  /// `"model:acme,name:drill, cordless"`.
  ///
  /// A comma only starts a new filter when the text after it opens with a
  /// known column key and `:`; otherwise it belongs to the previous
  /// filter's text. Blank segments are skipped.
  pub fn parse_list(s: &str) -> Result<Vec<Self>> {
    let mut pieces: Vec<String> = Vec::new();
    for part in s.split(',').filter(|p| !p.trim().is_empty()) {
      let opens_filter = part
        .split_once(':')
        .is_some_and(|(key, _)| Column::from_key(key.trim()).is_ok());
      match pieces.last_mut() {
        Some(last) if !opens_filter => {
          last.push(',');
          last.push_str(part);
        }
        _ => pieces.push(part.to_owned()),
      }
    }
    pieces.iter().map(|p| Self::parse(p.trim_start())).collect()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
  pub column:     Column,
  pub descending: bool,
}

/// How a consumer wants the projected rows narrowed and ordered.
#[derive(Debug, Clone, Default)]
pub struct TableQuery {
  /// Free-text filter over every column.
  pub text:    Option<String>,
  /// All must match.
  pub filters: Vec<ColumnFilter>,
  /// `None` keeps projection order.
  pub sort:    Option<Sort>,
}

impl TableQuery {
  pub fn apply(&self, rows: Vec<ProjectedAsset>) -> Vec<ProjectedAsset> {
    let needle = self
      .text
      .as_deref()
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(str::to_lowercase);
    let filters: Vec<(Column, String)> = self
      .filters
      .iter()
      .map(|f| (f.column, f.text.to_lowercase()))
      .collect();

    let mut rows: Vec<ProjectedAsset> = rows
      .into_iter()
      .filter(|row| {
        needle.as_deref().is_none_or(|n| {
          Column::all().any(|c| c.value(row).to_lowercase().contains(n))
        })
      })
      .filter(|row| {
        filters
          .iter()
          .all(|(c, t)| c.value(row).to_lowercase().contains(t.as_str()))
      })
      .collect();

    if let Some(sort) = self.sort {
      // Stable, so equal keys keep projection order.
      rows.sort_by(|a, b| {
        let ord = sort.column.compare(a, b);
        if sort.descending { ord.reverse() } else { ord }
      });
    }

    rows
  }
}
