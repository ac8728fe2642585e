//! Document store query vocabulary.

use std::fmt;

use common::Order;
use derive_more::{AsRef, Display, From, Into};
use itertools::Itertools as _;
use serde::Deserialize;

pub use serde_json::Value;

#[cfg(doc)]
use crate::infra::Database;

/// Name of a document attribute.
pub type Attribute = &'static str;

/// ID of a database in a document store.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, Hash, Into, PartialEq)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct DatabaseId(String);

impl DatabaseId {
    /// Creates a new [`DatabaseId`] out of the provided raw `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// ID of a collection of documents in a database.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, Hash, Into, PartialEq)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    /// Creates a new [`CollectionId`] out of the provided raw `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Single directive of a document store query.
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    /// Attribute equals any of the values.
    Equal(Attribute, Vec<Value>),

    /// Attribute contains any whitespace-separated word of the term,
    /// case-insensitively.
    Search(Attribute, String),

    /// Attribute is greater than or equal to the value.
    GreaterThanEqual(Attribute, Value),

    /// Attribute is less than or equal to the value.
    LessThanEqual(Attribute, Value),

    /// Order documents by the attribute ascending.
    OrderAsc(Attribute),

    /// Order documents by the attribute descending.
    OrderDesc(Attribute),

    /// Return at most this number of documents.
    Limit(u64),

    /// Skip this number of matching documents.
    Offset(u64),
}

impl Query {
    /// Creates a new [`Query::Equal`] out of the provided `values`.
    #[must_use]
    pub fn equal<V: Into<Value>>(
        attr: Attribute,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::Equal(attr, values.into_iter().map(Into::into).collect())
    }

    /// Creates a new ordering [`Query`] of the provided [`Order`].
    #[must_use]
    pub fn order(attr: Attribute, order: Order) -> Self {
        match order {
            Order::Ascending => Self::OrderAsc(attr),
            Order::Descending => Self::OrderDesc(attr),
        }
    }

    /// Indicates whether this [`Query`] narrows the set of matching
    /// documents, as opposed to ordering or paginating it.
    #[must_use]
    pub fn is_predicate(&self) -> bool {
        matches!(
            self,
            Self::Equal(..)
                | Self::Search(..)
                | Self::GreaterThanEqual(..)
                | Self::LessThanEqual(..)
        )
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal(attr, values) => {
                write!(f, "equal({attr:?}, [{}])", values.iter().format(", "))
            }
            Self::Search(attr, term) => write!(f, "search({attr:?}, {term:?})"),
            Self::GreaterThanEqual(attr, v) => {
                write!(f, "greaterThanEqual({attr:?}, {v})")
            }
            Self::LessThanEqual(attr, v) => {
                write!(f, "lessThanEqual({attr:?}, {v})")
            }
            Self::OrderAsc(attr) => write!(f, "orderAsc({attr:?})"),
            Self::OrderDesc(attr) => write!(f, "orderDesc({attr:?})"),
            Self::Limit(n) => write!(f, "limit({n})"),
            Self::Offset(n) => write!(f, "offset({n})"),
        }
    }
}

/// Operation of listing documents of a collection matching [`Query`]
/// directives.
#[derive(Clone, Debug)]
pub struct ListDocuments {
    /// [`DatabaseId`] to list documents in.
    pub database: DatabaseId,

    /// [`CollectionId`] to list documents of.
    pub collection: CollectionId,

    /// [`Query`] directives to apply.
    pub queries: Vec<Query>,
}

/// Result of [`ListDocuments`].
#[derive(Clone, Debug)]
pub struct DocumentList<T> {
    /// Documents of the requested page.
    pub documents: Vec<T>,

    /// Total number of documents matching the [`Query`] predicates,
    /// regardless of [`Query::Limit`] and [`Query::Offset`].
    pub total: u64,
}

#[cfg(test)]
mod spec {
    use common::Order;
    use serde_json::json;

    use super::Query;

    #[test]
    fn displays_directives() {
        assert_eq!(
            Query::equal("make", ["toyota", "honda"]).to_string(),
            r#"equal("make", ["toyota", "honda"])"#,
        );
        assert_eq!(
            Query::GreaterThanEqual("year", json!(2015)).to_string(),
            r#"greaterThanEqual("year", 2015)"#,
        );
        assert_eq!(
            Query::order("views", Order::Descending).to_string(),
            r#"orderDesc("views")"#,
        );
        assert_eq!(Query::Offset(24).to_string(), "offset(24)");
    }

    #[test]
    fn predicates() {
        assert!(Query::Search("title", "corolla".into()).is_predicate());
        assert!(Query::LessThanEqual("year", json!(2020)).is_predicate());
        assert!(!Query::OrderAsc("year").is_predicate());
        assert!(!Query::Limit(12).is_predicate());
    }
}
