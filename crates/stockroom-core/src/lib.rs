//! Core types and trait definitions for the Stockroom asset inventory.
//!
//! Records are stored normalised: an asset points at a model and a storage
//! location by id, and a model points at its manufacturer. The
//! [`projection`] module turns independently fetched collections back into
//! flat, display-ready rows.
//!
//! This crate is deliberately free of HTTP and database dependencies.

// Native `async fn` in traits; the store trait spells out `Send` futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod projection;
pub mod record;
pub mod store;
pub mod table;

pub use error::{Error, Result};
pub use projection::{ProjectedAsset, Snapshot, project};
