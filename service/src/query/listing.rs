//! [`Query`] collection related to a single [`Listing`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        listing::{attr, Slug, Status},
        Listing,
    },
    infra::{
        database::{
            self,
            document::{self, DocumentList, ListDocuments},
        },
        Database,
    },
    Query, Service,
};

/// Queries a published [`Listing`] by its [`Slug`].
#[derive(Clone, Debug)]
pub struct BySlug(pub Slug);

impl<Db> Query<BySlug> for Service<Db>
where
    Db: Database<
        Select<By<DocumentList<Listing>, ListDocuments>>,
        Ok = DocumentList<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        BySlug(slug): BySlug,
    ) -> Result<Self::Ok, Self::Err> {
        let queries = vec![
            document::Query::equal(attr::SLUG, [AsRef::<str>::as_ref(&slug)]),
            document::Query::equal(attr::STATUS, [Status::Published.as_str()]),
            document::Query::Limit(1),
        ];
        self.list_documents::<Listing>(
            &self.config().collections.listings,
            queries,
        )
        .await
        .map(|list| list.documents.into_iter().next())
        .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        domain::listing::Slug, query::listing::BySlug, spec::service,
        Query as _,
    };

    #[tokio::test]
    async fn finds_published_only() {
        let svc = service(
            vec![
                json!({"$id": "1", "$createdAt": "2024-01-01T00:00:00Z",
                       "slug": "corolla", "condition": "used",
                       "status": "published", "is_available": false}),
                json!({"$id": "2", "$createdAt": "2024-01-01T00:00:00Z",
                       "slug": "civic", "condition": "new",
                       "status": "draft", "is_available": true}),
            ],
            vec![],
        );

        let found = svc
            .execute(BySlug(Slug::new("corolla").unwrap()))
            .await
            .unwrap();
        assert_eq!(found.unwrap().id.to_string(), "1");

        let draft = svc
            .execute(BySlug(Slug::new("civic").unwrap()))
            .await
            .unwrap();
        assert!(draft.is_none());

        let absent = svc
            .execute(BySlug(Slug::new("yaris").unwrap()))
            .await
            .unwrap();
        assert!(absent.is_none());
    }
}
