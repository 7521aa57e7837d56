//! Error types for `stockroom-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown column: {0:?}")]
  UnknownColumn(String),

  #[error("invalid purchase date: {0:?}")]
  InvalidPurchaseDate(String),

  #[error("malformed column filter: {0:?}")]
  MalformedFilter(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
