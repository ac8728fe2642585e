//! Document-related [`Database`] implementations.

use common::{
    operations::{By, Select},
    Order,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use serde::de::DeserializeOwned;
use tracerr::Traced;

use crate::infra::{
    database::{
        self,
        document::{DocumentList, ListDocuments, Query, Value},
        postgres::{Connection, FuzzPattern},
        Postgres,
    },
    Database,
};

impl<C, T> Database<Select<By<DocumentList<T>, ListDocuments>>> for Postgres<C>
where
    C: Connection,
    T: DeserializeOwned,
{
    type Ok = DocumentList<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<DocumentList<T>, ListDocuments>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ListDocuments {
            database,
            collection,
            queries,
        } = by.into_inner();
        let database = String::from(database);
        let collection = String::from(collection);
        let patterns = queries
            .iter()
            .map(|q| match q {
                Query::Search(_, term) => Some(FuzzPattern::new(term)),
                _ => None,
            })
            .collect::<Vec<_>>();
        let (limit, offset) = pagination(&queries);

        let mut stmt =
            Statement::new(&database, &collection, &queries, &patterns);

        let documents = self
            .query(stmt.select(&limit, &offset).as_str(), &stmt.params)
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| serde_json::from_value(row.get::<_, Value>("data")))
            .collect::<Result<Vec<T>, _>>()
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;

        let total = self
            .query_one(
                stmt.count().as_str(),
                &stmt.params[..stmt.predicate_params],
            )
            .await
            .map_err(tracerr::wrap!())?
            .get::<_, i64>("total");

        Ok(DocumentList {
            documents,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}

/// Returns the `LIMIT` and `OFFSET` of the provided [`Query`] directives.
///
/// The last directive of each kind wins.
fn pagination(queries: &[Query]) -> (Option<i64>, Option<i64>) {
    let last = |pick: fn(&Query) -> Option<u64>| {
        queries
            .iter()
            .rev()
            .find_map(pick)
            .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
    };
    (
        last(|q| match q {
            Query::Limit(n) => Some(*n),
            _ => None,
        }),
        last(|q| match q {
            Query::Offset(n) => Some(*n),
            _ => None,
        }),
    )
}

/// SQL statement listing documents, along with its parameters.
///
/// Parameters of the predicates go first, so they may be reused for counting
/// the matching documents.
struct Statement<'q> {
    /// Parameters referred by the statement.
    params: Vec<&'q (dyn ToSql + Sync)>,

    /// Number of the leading [`Statement::params`] referred by the
    /// [`Statement::predicates`].
    predicate_params: usize,

    /// `WHERE` clause conditions.
    predicates: Vec<String>,

    /// `ORDER BY` clause expressions.
    ordering: Vec<String>,
}

impl<'q> Statement<'q> {
    /// Builds a new [`Statement`] out of the provided [`Query`] directives.
    ///
    /// `patterns` must hold a [`FuzzPattern`] for every [`Query::Search`] at
    /// the same position.
    #[expect(clippy::ptr_arg, reason = "`str` cannot be a `dyn ToSql`")]
    fn new(
        database: &'q String,
        collection: &'q String,
        queries: &'q [Query],
        patterns: &'q [Option<FuzzPattern>],
    ) -> Self {
        let mut stmt = Self {
            params: vec![database, collection],
            predicate_params: 0,
            predicates: vec![
                "database_id = $1::TEXT".to_owned(),
                "collection_id = $2::TEXT".to_owned(),
            ],
            ordering: vec![],
        };

        for (query, pattern) in queries.iter().zip(patterns) {
            let predicate = match (query, pattern) {
                (Query::Equal(attr, values), _) => {
                    let attr = stmt.param(attr);
                    let values = stmt.param(values);
                    format!(
                        "COALESCE(data #> ARRAY[${attr}::TEXT, '$id'], \
                                  data -> ${attr}::TEXT) \
                         = ANY(${values}::JSONB[])",
                    )
                }
                (Query::Search(attr, _), Some(pattern)) => {
                    let attr = stmt.param(attr);
                    let pattern = stmt.param(pattern);
                    format!(
                        "LOWER(data ->> ${attr}::TEXT) \
                         SIMILAR TO LOWER(${pattern}::VARCHAR)",
                    )
                }
                (Query::GreaterThanEqual(attr, bound), _) => {
                    stmt.range(attr, ">=", bound)
                }
                (Query::LessThanEqual(attr, bound), _) => {
                    stmt.range(attr, "<=", bound)
                }
                (
                    Query::Search(..)
                    | Query::OrderAsc(_)
                    | Query::OrderDesc(_)
                    | Query::Limit(_)
                    | Query::Offset(_),
                    _,
                ) => continue,
            };
            stmt.predicates.push(predicate);
        }
        stmt.predicate_params = stmt.params.len();

        for query in queries {
            let (attr, order) = match query {
                Query::OrderAsc(attr) => (attr, Order::Ascending),
                Query::OrderDesc(attr) => (attr, Order::Descending),
                Query::Equal(..)
                | Query::Search(..)
                | Query::GreaterThanEqual(..)
                | Query::LessThanEqual(..)
                | Query::Limit(_)
                | Query::Offset(_) => continue,
            };
            let attr = stmt.param(attr);
            // JSON `null`s are ordered as missing values.
            stmt.ordering.push(format!(
                "NULLIF(data -> ${attr}::TEXT, 'null'::JSONB) {} NULLS {}",
                order.sql(),
                match order {
                    Order::Ascending => "LAST",
                    Order::Descending => "FIRST",
                },
            ));
        }
        stmt.ordering.push("id ASC".to_owned());

        stmt
    }

    /// Adds the provided parameter, returning its index.
    fn param(&mut self, param: &'q (dyn ToSql + Sync)) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Builds a condition comparing the `attr` with the `bound`.
    ///
    /// Values of a JSON type other than the `bound`'s one never satisfy the
    /// condition.
    fn range(
        &mut self,
        attr: &'q &'static str,
        op: &str,
        bound: &'q Value,
    ) -> String {
        let attr = self.param(attr);
        let bound = self.param(bound);
        format!(
            "(jsonb_typeof(data -> ${attr}::TEXT) = jsonb_typeof(${bound}::JSONB) \
              AND data -> ${attr}::TEXT {op} ${bound}::JSONB)",
        )
    }

    /// Returns the `WHERE` clause of this [`Statement`].
    fn filtering(&self) -> String {
        self.predicates.iter().join(" AND ")
    }

    /// Returns SQL selecting a page of the matching documents.
    ///
    /// Pushes the `limit` and `offset` parameters.
    fn select(
        &mut self,
        limit: &'q Option<i64>,
        offset: &'q Option<i64>,
    ) -> String {
        let limit = self.param(limit);
        let offset = self.param(offset);
        format!(
            "SELECT data \
             FROM documents \
             WHERE {} \
             ORDER BY {} \
             LIMIT ${limit}::INT8 \
             OFFSET ${offset}::INT8",
            self.filtering(),
            self.ordering.iter().join(", "),
        )
    }

    /// Returns SQL counting the matching documents.
    ///
    /// Refers to the leading [`Statement::predicate_params`] only.
    fn count(&self) -> String {
        format!(
            "SELECT COUNT(*)::INT8 AS total \
             FROM documents \
             WHERE {}",
            self.filtering(),
        )
    }
}
