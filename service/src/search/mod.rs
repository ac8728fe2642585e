//! Pipeline of searching [`Listing`]s.
//!
//! A search runs in three stages:
//! 1. [`NativeQuery`] narrows and orders [`Listing`]s inside a document store;
//! 2. [`ResidualFilter`] drops the fetched [`Listing`]s violating criteria on
//!    nested attributes;
//! 3. [`ResidualSort`] reorders the rest by nested attributes, if required.
//!
//! [`Criteria`] wires a filter of a single car category into these stages.

mod native;
mod residual;
mod sort;

use common::{pagination::Arguments, Order};
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::{
    domain::listing::{attr, Condition},
    read::listing::{NewCarFilter, NewCarSort, UsedCarFilter, UsedCarSort},
};
#[cfg(doc)]
use crate::domain::Listing;

pub use self::{native::NativeQuery, residual::ResidualFilter, sort::ResidualSort};

/// Search configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Config {
    /// [`TotalCount`] mode of computing the total number of found
    /// [`Listing`]s.
    #[serde(default)]
    pub total: TotalCount,
}

/// Mode of computing the total number of found [`Listing`]s.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumString,
    Eq,
    Hash,
    PartialEq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TotalCount {
    /// Total number of [`Listing`]s matching the [`NativeQuery`] only, with
    /// the requested page fetched by the document store.
    ///
    /// Residual criteria may make the total exceed the real number of
    /// matching [`Listing`]s, and [`ResidualSort`] orders a single page only.
    #[default]
    Native,

    /// Total number of [`Listing`]s matching all the criteria.
    ///
    /// All the [`Listing`]s matching the [`NativeQuery`] are fetched, and the
    /// requested page is cut out of them after the residual stages.
    Exact,
}

/// Order of search results.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sorting {
    /// Ordered by the document store by the attribute.
    Native(&'static str, Order),

    /// Ordered by the [`ResidualSort`] after fetching.
    Residual(ResidualSort),
}

impl Sorting {
    /// Ordering of fetched [`Listing`]s preceding a [`Sorting::Residual`].
    pub const FALLBACK: (&'static str, Order) =
        (attr::CREATED_AT, Order::Descending);
}

/// Search criteria of a single car category.
pub trait Criteria {
    /// [`Condition`] of the searched [`Listing`]s.
    const CONDITION: Condition;

    /// Adds the criteria evaluated by a document store to the provided
    /// [`NativeQuery`].
    fn native(&self, query: &mut NativeQuery);

    /// Returns the [`ResidualFilter`] of the criteria a document store cannot
    /// evaluate.
    fn residual(&self) -> ResidualFilter;

    /// Returns the [`Sorting`] of the search results.
    fn sorting(&self) -> Sorting;

    /// Returns pagination [`Arguments`] of the search.
    fn arguments(&self) -> &Arguments;

    /// Builds the [`NativeQuery`] of these [`Criteria`], optionally
    /// paginated.
    fn native_query(&self, paginated: bool) -> NativeQuery {
        let mut query = NativeQuery::new(Self::CONDITION);
        self.native(&mut query);
        let (attr, order) = match self.sorting() {
            Sorting::Native(attr, order) => (attr, order),
            Sorting::Residual(_) => Sorting::FALLBACK,
        };
        let _ = query.order(attr, order);
        if paginated {
            let _ = query.paginate(self.arguments());
        }
        query
    }
}

impl Criteria for NewCarFilter {
    const CONDITION: Condition = Condition::New;

    fn native(&self, query: &mut NativeQuery) {
        let _ = query
            .search(attr::TITLE, self.search.as_deref().unwrap_or_default())
            .equal_any(attr::MAKE, self.makes.iter().map(AsRef::<str>::as_ref))
            .equal_any(
                attr::BODY_TYPE,
                self.body_types.iter().map(AsRef::<str>::as_ref),
            )
            .flag(attr::IS_SPECIAL_OFFER, self.special_offer)
            .flag(attr::IS_PRE_ORDER, self.pre_order)
            .search(attr::MODEL, &self.models.join(" "));
    }

    fn residual(&self) -> ResidualFilter {
        ResidualFilter::new()
            .colors(&self.colors)
            .fuel_types(&self.fuel_types)
            .transmission_types(&self.transmission_types)
            .price(self.price)
    }

    fn sorting(&self) -> Sorting {
        match self.sort {
            NewCarSort::Newest => {
                Sorting::Native(attr::CREATED_AT, Order::Descending)
            }
            NewCarSort::Popular => Sorting::Native(attr::VIEWS, Order::Descending),
            NewCarSort::PriceLow => Sorting::Residual(ResidualSort::PriceAscending),
            NewCarSort::PriceHigh => {
                Sorting::Residual(ResidualSort::PriceDescending)
            }
        }
    }

    fn arguments(&self) -> &Arguments {
        &self.pagination
    }
}

impl Criteria for UsedCarFilter {
    const CONDITION: Condition = Condition::Used;

    fn native(&self, query: &mut NativeQuery) {
        let _ = query
            .search(attr::TITLE, self.search.as_deref().unwrap_or_default())
            .equal_any(attr::MAKE, self.makes.iter().map(AsRef::<str>::as_ref))
            .equal_any(
                attr::BODY_TYPE,
                self.body_types.iter().map(AsRef::<str>::as_ref),
            )
            .flag(attr::IS_CERTIFIED, self.certified)
            .range(attr::YEAR, self.year)
            .search(attr::MODEL, &self.models.join(" "));
    }

    fn residual(&self) -> ResidualFilter {
        ResidualFilter::new()
            .colors(&self.colors)
            .fuel_types(&self.fuel_types)
            .transmission_types(&self.transmission_types)
            .price(self.price)
            .mileage(self.mileage)
            .max_owners(self.max_owners)
            .full_service_history(self.full_service_history)
            .accident_free(self.accident_free)
            .warranty_remaining(self.warranty_remaining)
    }

    fn sorting(&self) -> Sorting {
        match self.sort {
            UsedCarSort::Newest => {
                Sorting::Native(attr::CREATED_AT, Order::Descending)
            }
            UsedCarSort::YearNew => Sorting::Native(attr::YEAR, Order::Descending),
            UsedCarSort::YearOld => Sorting::Native(attr::YEAR, Order::Ascending),
            UsedCarSort::PriceLow => {
                Sorting::Residual(ResidualSort::PriceAscending)
            }
            UsedCarSort::PriceHigh => {
                Sorting::Residual(ResidualSort::PriceDescending)
            }
            UsedCarSort::MileageLow => {
                Sorting::Residual(ResidualSort::MileageAscending)
            }
        }
    }

    fn arguments(&self) -> &Arguments {
        &self.pagination
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::Arguments;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::{
        domain::{color, make},
        infra::database::document::Query,
        read::listing::{
            NewCarFilter, NewCarSort, Range, UsedCarFilter, UsedCarSort,
        },
    };

    use super::{Criteria as _, TotalCount};

    #[test]
    fn new_cars_native_query() {
        let filter = NewCarFilter {
            search: Some("hybrid".into()),
            makes: vec![make::Id::new("toyota")],
            models: vec!["corolla".into(), "yaris".into()],
            special_offer: true,
            sort: NewCarSort::Popular,
            pagination: Arguments { page: 2, limit: 5 },
            ..NewCarFilter::default()
        };

        assert_eq!(
            filter.native_query(true).into_queries(),
            [
                Query::Equal("status", vec![json!("published")]),
                Query::Equal("is_available", vec![json!(true)]),
                Query::Equal("condition", vec![json!("new")]),
                Query::Search("title", "hybrid".into()),
                Query::Equal("make", vec![json!("toyota")]),
                Query::Equal("is_special_offer", vec![json!(true)]),
                Query::Search("model", "corolla yaris".into()),
                Query::OrderDesc("views"),
                Query::Limit(5),
                Query::Offset(5),
            ],
        );
    }

    #[test]
    fn used_cars_residual_sort_falls_back_to_newest() {
        let filter = UsedCarFilter {
            certified: true,
            year: Range::new(Some(2010), Some(2020)),
            sort: UsedCarSort::MileageLow,
            ..UsedCarFilter::default()
        };

        assert_eq!(
            filter.native_query(false).into_queries()[3..],
            [
                Query::Equal("is_certified", vec![json!(true)]),
                Query::GreaterThanEqual("year", json!(2010)),
                Query::LessThanEqual("year", json!(2020)),
                Query::OrderDesc("$createdAt"),
            ],
        );
    }

    #[test]
    fn residual_chain_order() {
        let filter = UsedCarFilter {
            colors: vec![color::Id::new("red")],
            price: Range::new(Some(Decimal::from(1)), None),
            mileage: Range::new(None, Some(100)),
            max_owners: Some(1),
            accident_free: true,
            warranty_remaining: true,
            ..UsedCarFilter::default()
        };

        assert_eq!(
            filter.residual().names().collect::<Vec<_>>(),
            [
                "colors",
                "price",
                "mileage",
                "max_owners",
                "accident_free",
                "warranty_remaining",
            ],
        );
        assert!(NewCarFilter::default().residual().is_empty());
    }

    #[test]
    fn total_count_modes() {
        assert_eq!(TotalCount::default(), TotalCount::Native);
        assert_eq!("exact".parse::<TotalCount>(), Ok(TotalCount::Exact));
        assert_eq!(
            serde_json::from_value::<TotalCount>(json!("native")).unwrap(),
            TotalCount::Native,
        );
    }
}
