//! Denormalisation of assets into flat, display-ready rows.
//!
//! The four collections are fetched independently and are never required to
//! agree with each other. A reference that cannot be resolved, including one
//! into a collection that has not loaded yet, becomes an empty display field.
//! Projection never fails.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::{Asset, Location, Manufacturer, Model};

// ─── Projected row ───────────────────────────────────────────────────────────

/// An [`Asset`] with its references resolved to human-readable names.
///
/// Serialises flat: the asset's own fields sit alongside the resolved ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedAsset {
  #[serde(flatten)]
  pub asset:             Asset,
  pub model_name:        String,
  pub manufacturer_name: String,
  /// `"<manufacturer_name> <model_name>"`, see [`full_model_name`].
  pub full_model_name:   String,
  pub location_name:     String,
}

/// Join a manufacturer and model name with a single space, dropping the
/// separator when either side is empty. Both sides are trimmed first, so a
/// whitespace-only name counts as empty.
pub fn full_model_name(manufacturer: &str, model: &str) -> String {
  let (manufacturer, model) = (manufacturer.trim(), model.trim());
  match (manufacturer.is_empty(), model.is_empty()) {
    (false, false) => format!("{manufacturer} {model}"),
    (false, true) => manufacturer.to_owned(),
    (true, false) => model.to_owned(),
    (true, true) => String::new(),
  }
}

// ─── Lookup index ────────────────────────────────────────────────────────────

/// Id-keyed view over a borrowed collection. When ids repeat, the first
/// record in input order wins.
struct Index<'a, T> {
  by_id: HashMap<Uuid, &'a T>,
}

impl<'a, T> Index<'a, T> {
  fn build(items: &'a [T], id: impl Fn(&T) -> Uuid) -> Self {
    let mut by_id = HashMap::with_capacity(items.len());
    for item in items {
      by_id.entry(id(item)).or_insert(item);
    }
    Self { by_id }
  }

  fn get(&self, id: Uuid) -> Option<&'a T> { self.by_id.get(&id).copied() }
}

// ─── Projector ───────────────────────────────────────────────────────────────

/// Project every asset into a [`ProjectedAsset`], preserving asset order.
///
/// Lookup indices are built once per call, so the cost is linear in the total
/// size of the four collections.
pub fn project(
  assets: &[Asset],
  models: &[Model],
  manufacturers: &[Manufacturer],
  locations: &[Location],
) -> Vec<ProjectedAsset> {
  let manufacturers = Index::build(manufacturers, |m| m.manufacturer_id);
  let locations = Index::build(locations, |l| l.location_id);
  let models = Index::build(models, |m| m.model_id);

  assets
    .iter()
    .map(|asset| {
      let model = models.get(asset.model_id);
      let manufacturer =
        model.and_then(|m| manufacturers.get(m.manufacturer_id));
      let location = locations.get(asset.location_id);

      let model_name = model.map(|m| m.name.clone()).unwrap_or_default();
      let manufacturer_name =
        manufacturer.map(|m| m.name.clone()).unwrap_or_default();

      ProjectedAsset {
        asset: asset.clone(),
        full_model_name: full_model_name(&manufacturer_name, &model_name),
        model_name,
        manufacturer_name,
        location_name: location.map(|l| l.name.clone()).unwrap_or_default(),
      }
    })
    .collect()
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// One read of all four collections, taken together so a projection can be
/// recomputed from scratch whenever any of them changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  pub assets:        Vec<Asset>,
  pub models:        Vec<Model>,
  pub manufacturers: Vec<Manufacturer>,
  pub locations:     Vec<Location>,
}

impl Snapshot {
  pub fn project(&self) -> Vec<ProjectedAsset> {
    project(&self.assets, &self.models, &self.manufacturers, &self.locations)
  }
}
