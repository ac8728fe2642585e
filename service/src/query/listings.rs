//! [`Query`] collection related to the multiple [`Listing`]s.

use std::fmt;

use common::operations::{By, Select};
use itertools::Itertools as _;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Listing,
    infra::{
        database::{
            self,
            document::{DocumentList, ListDocuments},
        },
        Database,
    },
    read::{NewCarFilter, ResultSet, UsedCarFilter},
    search::{Criteria, Sorting, TotalCount},
    Query, Service,
};

/// Queries a page of published and available [`Listing`]s matching the
/// filter.
#[derive(Clone, Debug)]
pub struct Search<F>(pub F);

/// Queries a page of new cars.
pub type NewCars = Search<NewCarFilter>;

/// Queries a page of used cars.
pub type UsedCars = Search<UsedCarFilter>;

impl<Db, F> Query<Search<F>> for Service<Db>
where
    Db: Database<
        Select<By<DocumentList<Listing>, ListDocuments>>,
        Ok = DocumentList<Listing>,
        Err = Traced<database::Error>,
    >,
    F: Criteria + fmt::Debug,
{
    type Ok = ResultSet;
    type Err = Traced<database::Error>;

    #[tracing::instrument(
        skip_all,
        fields(condition = %F::CONDITION, filter = ?search.0),
    )]
    async fn execute(
        &self,
        search: Search<F>,
    ) -> Result<Self::Ok, Self::Err> {
        let Search(filter) = search;
        let mode = self.config().search.total;

        let queries = filter
            .native_query(mode == TotalCount::Native)
            .into_queries();
        log::debug!(
            queries = %queries.iter().format(", "),
            "querying `Listing`s",
        );
        let DocumentList { documents, total } = self
            .list_documents(&self.config().collections.listings, queries)
            .await
            .inspect_err(|e| log::error!("failed to list `Listing`s: {e}"))
            .map_err(tracerr::wrap!())?;

        let fetched = documents.len();
        let mut listings = filter.residual().apply(documents);
        log::debug!(
            fetched,
            kept = listings.len(),
            native_total = total,
            "filtered fetched `Listing`s",
        );

        if let Sorting::Residual(sort) = filter.sorting() {
            sort.apply(&mut listings);
        }

        let args = *filter.arguments();
        Ok(match mode {
            TotalCount::Native => ResultSet::new(listings, total, &args),
            TotalCount::Exact => {
                let total = listings.len() as u64;
                ResultSet::new(args.slice(listings), total, &args)
            }
        })
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::Arguments;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    use crate::{
        domain::{
            body_type, color,
            listing::{FuelType, TransmissionType},
            make, Listing,
        },
        query::listings::{NewCars, Search, UsedCars},
        read::{
            listing::{Range, UsedCarSort},
            NewCarFilter, UsedCarFilter,
        },
        search::TotalCount,
        spec::{failing_service, service, service_with},
        Query as _,
    };

    fn car(id: &str, details: Value) -> Value {
        let mut doc = json!({
            "$id": id,
            "$createdAt": "2024-01-01T00:00:00Z",
            "condition": "used",
            "status": "published",
            "is_available": true,
        });
        doc.as_object_mut()
            .unwrap()
            .extend(details.as_object().unwrap().clone());
        doc
    }

    fn scenario() -> Vec<Value> {
        vec![
            car(
                "A",
                json!({"make": "toyota",
                       "pricing": {"selling_price": 20000},
                       "specifications": {"mileage": "10000"}}),
            ),
            car(
                "B",
                json!({"make": "toyota",
                       "pricing": {"selling_price": 45000},
                       "specifications": {"mileage": "5000"}}),
            ),
            car(
                "C",
                json!({"make": "honda",
                       "pricing": {"selling_price": 25000},
                       "specifications": {"mileage": "30000"}}),
            ),
        ]
    }

    fn scenario_filter() -> UsedCarFilter {
        UsedCarFilter {
            makes: vec![make::Id::new("toyota")],
            price: Range::new(None, Some(Decimal::from(30_000))),
            sort: UsedCarSort::PriceLow,
            ..UsedCarFilter::default()
        }
    }

    fn ids(data: &[Listing]) -> Vec<String> {
        data.iter().map(|l| l.id.to_string()).collect()
    }

    #[tokio::test]
    async fn native_total_counts_native_matches() {
        let svc = service(scenario(), vec![]);

        let page = svc.execute(Search(scenario_filter())).await.unwrap();

        assert_eq!(ids(&page.items), ["A"]);
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.limit, 12);
    }

    #[tokio::test]
    async fn exact_total_counts_residual_matches() {
        let svc = service_with(TotalCount::Exact, scenario(), vec![]);

        let page = svc.execute(Search(scenario_filter())).await.unwrap();

        assert_eq!(ids(&page.items), ["A"]);
        assert_eq!(page.pagination.total, 1);
    }

    #[tokio::test]
    async fn every_result_satisfies_every_criterion() {
        let matching = json!({
            "title": "Toyota Corolla Hybrid",
            "make": {"$id": "toyota", "name": "Toyota"},
            "model": "Corolla",
            "body_type": "sedan",
            "year": 2019,
            "is_certified": true,
            "color": "white",
            "specifications": {
                "fuel_type": "hybrid",
                "transmission_type": "automatic",
                "mileage": "40,000",
            },
            "pricing": {"selling_price": 18000},
            "ownership": {
                "previous_owners": 1,
                "service_history": "full",
                "accident_free": true,
                "warranty_remaining": true,
            },
        });
        let violating = |key: &str, value: Value| {
            let mut doc = matching.clone();
            let mut target = &mut doc;
            let mut path = key.split('.').peekable();
            while let Some(segment) = path.next() {
                if path.peek().is_none() {
                    target[segment] = value.clone();
                } else {
                    target = &mut target[segment];
                }
            }
            car(&format!("bad-{key}"), doc)
        };
        let mut docs = vec![car("good", matching.clone())];
        docs.extend([
            violating("status", json!("draft")),
            violating("is_available", json!(false)),
            violating("condition", json!("new")),
            violating("title", json!("Honda Civic")),
            violating("make", json!("honda")),
            violating("model", json!("Civic")),
            violating("body_type", json!("hatchback")),
            violating("year", json!(2005)),
            violating("is_certified", json!(false)),
            violating("color", json!("black")),
            violating("specifications.fuel_type", json!("diesel")),
            violating("specifications.transmission_type", json!("manual")),
            violating("specifications.mileage", json!("90000")),
            violating("pricing.selling_price", json!(99000)),
            violating("ownership.previous_owners", json!(4)),
            violating("ownership.service_history", json!("partial")),
            violating("ownership.accident_free", json!(false)),
            violating("ownership.warranty_remaining", json!(false)),
        ]);
        let svc = service(docs, vec![]);

        let filter = UsedCarFilter {
            search: Some("corolla".into()),
            makes: vec![make::Id::new("toyota")],
            models: vec!["corolla".into()],
            body_types: vec![body_type::Id::new("sedan")],
            price: Range::new(
                Some(Decimal::from(10_000)),
                Some(Decimal::from(20_000)),
            ),
            colors: vec![color::Id::new("white")],
            fuel_types: vec![FuelType::Hybrid],
            transmission_types: vec![TransmissionType::Automatic],
            year: Range::new(Some(2015), None),
            mileage: Range::new(None, Some(50_000)),
            max_owners: Some(2),
            full_service_history: true,
            accident_free: true,
            warranty_remaining: true,
            certified: true,
            ..UsedCarFilter::default()
        };
        let query: UsedCars = Search(filter);
        let page = svc.execute(query).await.unwrap();

        assert_eq!(ids(&page.items), ["good"]);
    }

    #[tokio::test]
    async fn native_sorts_and_paginates() {
        let docs = (1..=5)
            .map(|n| {
                car(
                    &"x".repeat(n),
                    json!({"condition": "new",
                           "$createdAt": format!("2024-01-0{n}T00:00:00Z")}),
                )
            })
            .collect();
        let svc = service(docs, vec![]);

        let query: NewCars = Search(NewCarFilter {
            pagination: Arguments { page: 2, limit: 2 },
            ..NewCarFilter::default()
        });
        let page = svc.execute(query).await.unwrap();

        assert_eq!(ids(&page.items), ["xxx", "xx"]);
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[tokio::test]
    async fn store_failure_is_error() {
        let svc = failing_service();

        let err = svc
            .execute(Search(UsedCarFilter::default()))
            .await
            .unwrap_err();

        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn inconsistent_documents_are_tolerated() {
        let svc = service(
            vec![
                car(
                    "nulls",
                    json!({"is_special_offer": null,
                           "is_certified": null,
                           "views": null}),
                ),
                car(
                    "unknown-kinds",
                    json!({"specifications": {"fuel_type": "gasoline"},
                           "ownership": {"service_history": "lost"}}),
                ),
                car("valid", json!({"specifications": {"fuel_type": "petrol"}})),
            ],
            vec![],
        );

        let page = svc.execute(Search(UsedCarFilter::default())).await.unwrap();

        assert_eq!(ids(&page.items), ["nulls", "unknown-kinds", "valid"]);

        let query: UsedCars = Search(UsedCarFilter {
            fuel_types: vec![FuelType::Petrol],
            ..UsedCarFilter::default()
        });
        let page = svc.execute(query).await.unwrap();

        assert_eq!(ids(&page.items), ["valid"]);
    }
}
