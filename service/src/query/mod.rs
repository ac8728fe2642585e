//! [`Query`] definition.

pub mod listing;
pub mod listings;
pub mod makes;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{
        database::{
            self,
            document::{self, CollectionId, DocumentList, ListDocuments},
        },
        Database,
    },
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

impl<Db> Service<Db> {
    /// Lists documents of the provided `collection` in the [`Database`] of
    /// this [`Service`].
    async fn list_documents<T>(
        &self,
        collection: &CollectionId,
        queries: Vec<document::Query>,
    ) -> Result<DocumentList<T>, Traced<database::Error>>
    where
        Db: Database<
            Select<By<DocumentList<T>, ListDocuments>>,
            Ok = DocumentList<T>,
            Err = Traced<database::Error>,
        >,
    {
        self.database()
            .execute(Select(By::new(ListDocuments {
                database: self.config().database.clone(),
                collection: collection.clone(),
                queries,
            })))
            .await
            .map_err(tracerr::wrap!())
    }
}
