//! In-memory [`Database`] implementation.

use std::{cmp::Ordering, collections::HashMap};

use common::{
    operations::{By, Select},
    Order,
};
use serde::de::DeserializeOwned;
use tracerr::Traced;

use crate::infra::{
    database::{
        self,
        document::{
            CollectionId, DatabaseId, DocumentList, ListDocuments, Query,
            Value,
        },
    },
    Database,
};

/// Document store keeping all the documents in memory.
///
/// Evaluates [`Query`] directives the same way the persistent stores do, so
/// may stand in for them in tests and local runs.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Stored documents grouped by their collections.
    collections: HashMap<(DatabaseId, CollectionId), Vec<Value>>,
}

impl Memory {
    /// Creates a new empty [`Memory`] store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the provided `documents` to the specified collection.
    #[must_use]
    pub fn with_documents(
        mut self,
        database: DatabaseId,
        collection: CollectionId,
        documents: impl IntoIterator<Item = Value>,
    ) -> Self {
        self.collections
            .entry((database, collection))
            .or_default()
            .extend(documents);
        self
    }
}

impl<T> Database<Select<By<DocumentList<T>, ListDocuments>>> for Memory
where
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

        let stored = self
            .collections
            .get(&(database, collection))
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut matched = stored
            .iter()
            .filter(|doc| {
                queries
                    .iter()
                    .filter(|q| q.is_predicate())
                    .all(|q| satisfies(doc, q))
            })
            .collect::<Vec<_>>();
        let total = matched.len() as u64;

        let orders = queries
            .iter()
            .filter_map(|q| match q {
                Query::OrderAsc(attr) => Some((*attr, Order::Ascending)),
                Query::OrderDesc(attr) => Some((*attr, Order::Descending)),
                _ => None,
            })
            .collect::<Vec<_>>();
        matched.sort_by(|a, b| {
            orders
                .iter()
                .map(|(attr, order)| {
                    let ord = compare(attribute(a, attr), attribute(b, attr));
                    match order {
                        Order::Ascending => ord,
                        Order::Descending => ord.reverse(),
                    }
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        let offset = queries
            .iter()
            .rev()
            .find_map(|q| match q {
                Query::Offset(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(0);
        let limit = queries
            .iter()
            .rev()
            .find_map(|q| match q {
                Query::Limit(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(u64::MAX);

        let documents = matched
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|doc| serde_json::from_value(doc.clone()))
            .collect::<Result<Vec<T>, _>>()
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;

        Ok(DocumentList { documents, total })
    }
}

/// Returns the value of the `attr` of the provided `doc`.
///
/// Expanded references are resolved to their `$id`, and `null`s are treated
/// as missing values.
fn attribute<'v>(doc: &'v Value, attr: &str) -> Option<&'v Value> {
    let value = doc.get(attr)?;
    let value = match value {
        Value::Object(obj) => obj.get("$id")?,
        v => v,
    };
    (!value.is_null()).then_some(value)
}

/// Checks whether the provided `doc` satisfies the predicate `query`.
///
/// Missing values never satisfy a predicate.
fn satisfies(doc: &Value, query: &Query) -> bool {
    match query {
        Query::Equal(attr, values) => attribute(doc, attr).is_some_and(|v| {
            values
                .iter()
                .any(|expected| partial_cmp(v, expected).is_some_and(Ordering::is_eq))
        }),
        Query::Search(attr, term) => attribute(doc, attr)
            .and_then(Value::as_str)
            .is_some_and(|text| {
                let text = text.to_lowercase();
                term.split_whitespace()
                    .any(|word| text.contains(&word.to_lowercase()))
            }),
        Query::GreaterThanEqual(attr, bound) => attribute(doc, attr)
            .and_then(|v| partial_cmp(v, bound))
            .is_some_and(Ordering::is_ge),
        Query::LessThanEqual(attr, bound) => attribute(doc, attr)
            .and_then(|v| partial_cmp(v, bound))
            .is_some_and(Ordering::is_le),
        Query::OrderAsc(_)
        | Query::OrderDesc(_)
        | Query::Limit(_)
        | Query::Offset(_) => true,
    }
}

/// Compares two values of the same JSON type.
///
/// Numbers are compared by their magnitude regardless of their
/// representation. Values of different types are incomparable.
fn partial_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            a.as_f64()?.partial_cmp(&b.as_f64()?)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (a, b) => (a == b).then_some(Ordering::Equal),
    }
}

/// Compares two optional attribute values for ordering documents.
///
/// Missing values go after the present ones in ascending order.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => partial_cmp(a, b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
