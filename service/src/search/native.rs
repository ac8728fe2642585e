//! [`NativeQuery`] builder.

use common::{pagination::Arguments, Order};

use crate::{
    domain::listing::{attr, Condition, Status},
    infra::database::document::{Attribute, Query, Value},
    read::listing::Range,
};

/// Builder of the [`Query`] directives a document store evaluates on its own.
///
/// Always narrows [`Listing`]s to the published and available ones of a
/// single [`Condition`].
///
/// [`Listing`]: crate::domain::Listing
#[derive(Clone, Debug, PartialEq)]
pub struct NativeQuery {
    /// Accumulated [`Query`] directives.
    queries: Vec<Query>,
}

impl NativeQuery {
    /// Creates a new [`NativeQuery`] of [`Listing`]s in the provided
    /// [`Condition`].
    ///
    /// [`Listing`]: crate::domain::Listing
    #[must_use]
    pub fn new(condition: Condition) -> Self {
        Self {
            queries: vec![
                Query::equal(attr::STATUS, [Status::Published.as_str()]),
                Query::equal(attr::IS_AVAILABLE, [true]),
                Query::equal(attr::CONDITION, [condition.as_str()]),
            ],
        }
    }

    /// Searches the provided `term` in the `attr`, unless it's blank.
    pub fn search(&mut self, attr: Attribute, term: &str) -> &mut Self {
        let term = term.trim();
        if !term.is_empty() {
            self.queries.push(Query::Search(attr, term.to_owned()));
        }
        self
    }

    /// Requires the `attr` to equal any of the provided `values`, unless
    /// there are none.
    pub fn equal_any<V: Into<Value>>(
        &mut self,
        attr: Attribute,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        let values = values.into_iter().map(Into::into).collect::<Vec<_>>();
        if !values.is_empty() {
            self.queries.push(Query::Equal(attr, values));
        }
        self
    }

    /// Requires the boolean `attr` to be `true`, if the flag is `set`.
    pub fn flag(&mut self, attr: Attribute, set: bool) -> &mut Self {
        if set {
            self.queries.push(Query::equal(attr, [true]));
        }
        self
    }

    /// Requires the `attr` to lie within the provided [`Range`].
    pub fn range<V: Into<Value>>(
        &mut self,
        attr: Attribute,
        Range { min, max }: Range<V>,
    ) -> &mut Self {
        if let Some(min) = min {
            self.queries.push(Query::GreaterThanEqual(attr, min.into()));
        }
        if let Some(max) = max {
            self.queries.push(Query::LessThanEqual(attr, max.into()));
        }
        self
    }

    /// Orders the results by the `attr`.
    pub fn order(&mut self, attr: Attribute, order: Order) -> &mut Self {
        self.queries.push(Query::order(attr, order));
        self
    }

    /// Selects the page of results specified by the provided [`Arguments`].
    pub fn paginate(&mut self, args: &Arguments) -> &mut Self {
        self.queries.push(Query::Limit(u64::from(args.limit)));
        self.queries.push(Query::Offset(args.offset()));
        self
    }

    /// Returns the accumulated [`Query`] directives.
    #[must_use]
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Converts this [`NativeQuery`] into its [`Query`] directives.
    #[must_use]
    pub fn into_queries(self) -> Vec<Query> {
        self.queries
    }
}
