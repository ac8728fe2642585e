//! [`Listing`]-related read definitions.

use common::Page;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::domain::{
    body_type, color,
    listing::{FuelType, Price, TransmissionType, Year},
    make, Listing,
};

pub use common::pagination::Arguments;

/// Page of [`Listing`]s found by a search.
pub type ResultSet = Page<Listing>;

/// Inclusive range of values with optional bounds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Range<T> {
    /// Lower bound of this [`Range`], if any.
    pub min: Option<T>,

    /// Upper bound of this [`Range`], if any.
    pub max: Option<T>,
}

impl<T> Range<T> {
    /// Creates a new [`Range`] out of the provided bounds.
    #[must_use]
    pub const fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// Indicates whether this [`Range`] has no bounds at all.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

impl<T: PartialOrd> Range<T> {
    /// Checks whether the provided `value` lies within this [`Range`].
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.min.as_ref().map_or(true, |min| value >= min)
            && self.max.as_ref().map_or(true, |max| value <= max)
    }

    /// Indicates whether the lower bound of this [`Range`] exceeds its upper
    /// bound, so nothing may lie within it.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        matches!((&self.min, &self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Filter of a search for new cars.
#[derive(Clone, Debug, Default)]
pub struct NewCarFilter {
    /// Free text to search for in the [`Listing`] titles.
    pub search: Option<String>,

    /// [`make::Id`]s, any of which a [`Listing`] should refer to.
    pub makes: Vec<make::Id>,

    /// Model keywords, any of which a [`Listing`] model should contain.
    pub models: Vec<String>,

    /// [`body_type::Id`]s, any of which a [`Listing`] should refer to.
    pub body_types: Vec<body_type::Id>,

    /// [`Range`] of selling prices.
    pub price: Range<Price>,

    /// [`color::Id`]s, any of which a [`Listing`] should be painted in.
    pub colors: Vec<color::Id>,

    /// [`FuelType`]s, any of which a [`Listing`] should consume.
    pub fuel_types: Vec<FuelType>,

    /// [`TransmissionType`]s, any of which a [`Listing`] should have.
    pub transmission_types: Vec<TransmissionType>,

    /// Whether only special offers should be found.
    pub special_offer: bool,

    /// Whether only pre-order [`Listing`]s should be found.
    pub pre_order: bool,

    /// [`NewCarSort`] order of the found [`Listing`]s.
    pub sort: NewCarSort,

    /// [`Arguments`] selecting the page to return.
    pub pagination: Arguments,
}

/// Filter of a search for used cars.
#[derive(Clone, Debug, Default)]
pub struct UsedCarFilter {
    /// Free text to search for in the [`Listing`] titles.
    pub search: Option<String>,

    /// [`make::Id`]s, any of which a [`Listing`] should refer to.
    pub makes: Vec<make::Id>,

    /// Model keywords, any of which a [`Listing`] model should contain.
    pub models: Vec<String>,

    /// [`body_type::Id`]s, any of which a [`Listing`] should refer to.
    pub body_types: Vec<body_type::Id>,

    /// [`Range`] of selling prices.
    pub price: Range<Price>,

    /// [`color::Id`]s, any of which a [`Listing`] should be painted in.
    pub colors: Vec<color::Id>,

    /// [`FuelType`]s, any of which a [`Listing`] should consume.
    pub fuel_types: Vec<FuelType>,

    /// [`TransmissionType`]s, any of which a [`Listing`] should have.
    pub transmission_types: Vec<TransmissionType>,

    /// [`Range`] of model years.
    pub year: Range<Year>,

    /// [`Range`] of mileage.
    pub mileage: Range<u64>,

    /// Maximum number of previous owners.
    pub max_owners: Option<u32>,

    /// Whether only cars with full service history should be found.
    pub full_service_history: bool,

    /// Whether only accident-free cars should be found.
    pub accident_free: bool,

    /// Whether only cars with remaining warranty should be found.
    pub warranty_remaining: bool,

    /// Whether only certified pre-owned cars should be found.
    pub certified: bool,

    /// [`UsedCarSort`] order of the found [`Listing`]s.
    pub sort: UsedCarSort,

    /// [`Arguments`] selecting the page to return.
    pub pagination: Arguments,
}

/// Order of new car search results.
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
    IntoStaticStr,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NewCarSort {
    /// Most recently listed first.
    #[default]
    Newest,

    /// Cheapest first.
    PriceLow,

    /// Most expensive first.
    PriceHigh,

    /// Most viewed first.
    Popular,
}

/// Order of used car search results.
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
    IntoStaticStr,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UsedCarSort {
    /// Most recently listed first.
    #[default]
    Newest,

    /// Cheapest first.
    PriceLow,

    /// Most expensive first.
    PriceHigh,

    /// Least driven first.
    MileageLow,

    /// Newest model year first.
    YearNew,

    /// Oldest model year first.
    YearOld,
}
