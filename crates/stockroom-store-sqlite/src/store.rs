//! [`SqliteStore`], the SQLite implementation of [`InventoryStore`].

use std::{path::Path, sync::Arc};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tokio::sync::watch;
use uuid::Uuid;

use stockroom_core::{
  record::{
    Asset, Location, Manufacturer, Model, NewAsset, NewLocation,
    NewManufacturer, NewModel,
  },
  store::InventoryStore,
};

use crate::{
  Error, Result,
  encode::{
    RawAsset, RawLocation, RawManufacturer, RawModel, encode_date, encode_dt,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Stockroom inventory backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection and the revision channel are
/// reference-counted, so clones share both.
#[derive(Clone)]
pub struct SqliteStore {
  conn:     tokio_rusqlite::Connection,
  revision: Arc<watch::Sender<u64>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self::with_connection(conn);
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened inventory store");
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self::with_connection(conn);
    store.init_schema().await?;
    Ok(store)
  }

  fn with_connection(conn: tokio_rusqlite::Connection) -> Self {
    let (revision, _) = watch::channel(0);
    Self { conn, revision: Arc::new(revision) }
  }

  /// Watch the store's revision counter, which increases after every
  /// successful insert into any collection.
  ///
  /// A consumer holding a projection re-reads a snapshot whenever the
  /// receiver reports a change; intermediate revisions may be skipped.
  pub fn subscribe(&self) -> watch::Receiver<u64> { self.revision.subscribe() }

  /// The current revision; `0` for a freshly opened store.
  pub fn revision(&self) -> u64 { *self.revision.borrow() }

  fn bump_revision(&self) { self.revision.send_modify(|r| *r += 1); }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `sql` (which must take no parameters) and map every row with `map`.
  async fn query_all<R, F>(&self, sql: &'static str, map: F) -> Result<Vec<R>>
  where
    R: Send + 'static,
    F: Fn(&rusqlite::Row<'_>) -> rusqlite::Result<R> + Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map([], |row| map(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

// ─── InventoryStore impl ─────────────────────────────────────────────────────

impl InventoryStore for SqliteStore {
  type Error = Error;

  fn is_conflict(err: &Error) -> bool {
    matches!(err, Error::DuplicateAssetTag(_))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_assets(&self) -> Result<Vec<Asset>> {
    let raws = self
      .query_all(
        "SELECT asset_id, created_at, asset_tag, model_id, location_id,
                serial_number, name, purchase_date
         FROM assets ORDER BY rowid",
        RawAsset::from_row,
      )
      .await?;
    raws.into_iter().map(RawAsset::into_asset).collect()
  }

  async fn list_models(&self) -> Result<Vec<Model>> {
    let raws = self
      .query_all(
        "SELECT model_id, created_at, name, manufacturer_id, category,
                purchase_price, daily_hire, weekly_hire, weight
         FROM models ORDER BY rowid",
        RawModel::from_row,
      )
      .await?;
    raws.into_iter().map(RawModel::into_model).collect()
  }

  async fn list_manufacturers(&self) -> Result<Vec<Manufacturer>> {
    let raws = self
      .query_all(
        "SELECT manufacturer_id, created_at, name
         FROM manufacturers ORDER BY rowid",
        RawManufacturer::from_row,
      )
      .await?;
    raws
      .into_iter()
      .map(RawManufacturer::into_manufacturer)
      .collect()
  }

  async fn list_locations(&self) -> Result<Vec<Location>> {
    let raws = self
      .query_all(
        "SELECT location_id, created_at, name, street1, street2, suburb,
                postcode, state
         FROM locations ORDER BY rowid",
        RawLocation::from_row,
      )
      .await?;
    raws.into_iter().map(RawLocation::into_location).collect()
  }

  async fn get_manufacturer(&self, id: Uuid) -> Result<Option<Manufacturer>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawManufacturer> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT manufacturer_id, created_at, name
               FROM manufacturers WHERE manufacturer_id = ?1",
              rusqlite::params![id_str],
              RawManufacturer::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawManufacturer::into_manufacturer).transpose()
  }

  // ── Inserts ───────────────────────────────────────────────────────────────

  async fn create_asset(&self, input: NewAsset) -> Result<Asset> {
    let asset = Asset {
      asset_id:      Uuid::new_v4(),
      created_at:    Utc::now(),
      asset_tag:     input.asset_tag,
      model_id:      input.model_id,
      location_id:   input.location_id,
      serial_number: input.serial_number,
      name:          input.name,
      purchase_date: input.purchase_date,
    };

    let id_str       = encode_uuid(asset.asset_id);
    let at_str       = encode_dt(asset.created_at);
    let tag          = asset.asset_tag.clone();
    let model_str    = encode_uuid(asset.model_id);
    let location_str = encode_uuid(asset.location_id);
    let serial       = asset.serial_number.clone();
    let name         = asset.name.clone();
    let date_str     = asset.purchase_date.map(encode_date);

    let inserted = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO assets (
             asset_id, created_at, asset_tag, model_id, location_id,
             serial_number, name, purchase_date
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            at_str,
            tag,
            model_str,
            location_str,
            serial,
            name,
            date_str,
          ],
        );
        match res {
          Ok(_) => Ok(true),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      tracing::warn!(asset_tag = %asset.asset_tag, "rejected duplicate asset tag");
      return Err(Error::DuplicateAssetTag(asset.asset_tag));
    }

    tracing::debug!(asset_id = %asset.asset_id, asset_tag = %asset.asset_tag, "created asset");
    self.bump_revision();
    Ok(asset)
  }

  async fn create_model(&self, input: NewModel) -> Result<Model> {
    let model = Model {
      model_id:        Uuid::new_v4(),
      created_at:      Utc::now(),
      name:            input.name,
      manufacturer_id: input.manufacturer_id,
      category:        input.category,
      purchase_price:  input.purchase_price,
      daily_hire:      input.daily_hire,
      weekly_hire:     input.weekly_hire,
      weight:          input.weight,
    };

    let id_str           = encode_uuid(model.model_id);
    let at_str           = encode_dt(model.created_at);
    let name             = model.name.clone();
    let manufacturer_str = encode_uuid(model.manufacturer_id);
    let category         = model.category.clone();
    let (price, daily, weekly, weight) =
      (model.purchase_price, model.daily_hire, model.weekly_hire, model.weight);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO models (
             model_id, created_at, name, manufacturer_id, category,
             purchase_price, daily_hire, weekly_hire, weight
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str,
            at_str,
            name,
            manufacturer_str,
            category,
            price,
            daily,
            weekly,
            weight,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(model_id = %model.model_id, name = %model.name, "created model");
    self.bump_revision();
    Ok(model)
  }

  async fn create_manufacturer(
    &self,
    input: NewManufacturer,
  ) -> Result<Manufacturer> {
    let manufacturer = Manufacturer {
      manufacturer_id: Uuid::new_v4(),
      created_at:      Utc::now(),
      name:            input.name,
    };

    let id_str = encode_uuid(manufacturer.manufacturer_id);
    let at_str = encode_dt(manufacturer.created_at);
    let name   = manufacturer.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO manufacturers (manufacturer_id, created_at, name)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, at_str, name],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(
      manufacturer_id = %manufacturer.manufacturer_id,
      name = %manufacturer.name,
      "created manufacturer"
    );
    self.bump_revision();
    Ok(manufacturer)
  }

  async fn create_location(&self, input: NewLocation) -> Result<Location> {
    let location = Location {
      location_id: Uuid::new_v4(),
      created_at:  Utc::now(),
      name:        input.name,
      street1:     input.street1,
      street2:     input.street2,
      suburb:      input.suburb,
      postcode:    input.postcode,
      state:       input.state,
    };

    let id_str   = encode_uuid(location.location_id);
    let at_str   = encode_dt(location.created_at);
    let name     = location.name.clone();
    let street1  = location.street1.clone();
    let street2  = location.street2.clone();
    let suburb   = location.suburb.clone();
    let postcode = location.postcode;
    let state    = location.state.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO locations (
             location_id, created_at, name, street1, street2, suburb,
             postcode, state
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str, at_str, name, street1, street2, suburb, postcode, state,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(location_id = %location.location_id, name = %location.name, "created location");
    self.bump_revision();
    Ok(location)
  }
}
