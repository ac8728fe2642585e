//! [`Query`] collection related to [`Make`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{make, Make},
    infra::{
        database::{
            self,
            document::{self, DocumentList, ListDocuments},
        },
        Database,
    },
    Query, Service,
};

/// Queries all the [`Make`]s ordered by their names.
#[derive(Clone, Copy, Debug, Default)]
pub struct List;

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
        Select<By<DocumentList<Make>, ListDocuments>>,
        Ok = DocumentList<Make>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Make>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        self.list_documents(
            &self.config().collections.makes,
            vec![document::Query::OrderAsc(make::attr::NAME)],
        )
        .await
        .map(|list| list.documents)
        .map_err(tracerr::wrap!())
    }
}
