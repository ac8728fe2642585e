//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod search;

#[cfg(doc)]
use infra::Database;
use infra::database::{CollectionId, DatabaseId};

pub use self::query::Query;

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [`DatabaseId`] of the document store [`Database`] to query.
    pub database: DatabaseId,

    /// [`Collections`] of the documents to query.
    pub collections: Collections,

    /// [`search::Config`] of [`query::listings::Search`].
    pub search: search::Config,
}

/// Collections of the documents a [`Service`] queries.
#[derive(Clone, Debug)]
pub struct Collections {
    /// [`CollectionId`] of the [`domain::Listing`]s.
    pub listings: CollectionId,

    /// [`CollectionId`] of the [`domain::Make`]s.
    pub makes: CollectionId,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub const fn new(config: Config, database: Db) -> Self {
        Self { config, database }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub const fn database(&self) -> &Db {
        &self.database
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use serde::de::Error as _;
    use serde_json::Value;
    use tracerr::Traced;

    use crate::{
        infra::{
            database::{
                self, CollectionId, DatabaseId, DocumentList, ListDocuments,
            },
            Database, Memory,
        },
        search::{self, TotalCount},
        Collections, Config, Service,
    };

    fn config(total: TotalCount) -> Config {
        Config {
            database: DatabaseId::new("marketplace"),
            collections: Collections {
                listings: CollectionId::new("listings"),
                makes: CollectionId::new("makes"),
            },
            search: search::Config { total },
        }
    }

    /// Creates a new [`Service`] over the [`Memory`] store with the provided
    /// documents.
    pub(crate) fn service(
        listings: Vec<Value>,
        makes: Vec<Value>,
    ) -> Service<Memory> {
        service_with(TotalCount::Native, listings, makes)
    }

    /// Creates a new [`Service`] over the [`Memory`] store with the provided
    /// [`TotalCount`] mode and documents.
    pub(crate) fn service_with(
        total: TotalCount,
        listings: Vec<Value>,
        makes: Vec<Value>,
    ) -> Service<Memory> {
        let config = config(total);
        let store = Memory::new()
            .with_documents(
                config.database.clone(),
                config.collections.listings.clone(),
                listings,
            )
            .with_documents(
                config.database.clone(),
                config.collections.makes.clone(),
                makes,
            );
        Service::new(config, store)
    }

    /// Store failing every operation.
    #[derive(Clone, Copy, Debug)]
    pub(crate) struct Unavailable;

    impl<T> Database<Select<By<DocumentList<T>, ListDocuments>>> for Unavailable {
        type Ok = DocumentList<T>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            _: Select<By<DocumentList<T>, ListDocuments>>,
        ) -> Result<Self::Ok, Self::Err> {
            Err(tracerr::new!(database::Error::Decode(
                serde_json::Error::custom("store is unavailable"),
            )))
        }
    }

    /// Creates a new [`Service`] over the [`Unavailable`] store.
    pub(crate) fn failing_service() -> Service<Unavailable> {
        Service::new(config(TotalCount::Native), Unavailable)
    }
}
