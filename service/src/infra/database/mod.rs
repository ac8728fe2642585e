//! [`Database`]-related implementations.

pub mod document;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(any(test, feature = "memory"))]
pub use self::memory::Memory;
#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;
pub use self::document::{
    CollectionId, DatabaseId, DocumentList, ListDocuments, Query,
};

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),

    /// Stored document doesn't match the expected shape.
    #[display("Failed to decode stored document: {_0}")]
    Decode(serde_json::Error),
}
