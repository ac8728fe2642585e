//! [`ResidualSort`] definitions.

use std::cmp::Reverse;

use rust_decimal::Decimal;

use crate::domain::Listing;

/// Ordering of fetched [`Listing`]s by nested attributes a document store
/// cannot order by natively.
///
/// Sorting is stable, and missing values are sorted as zeros.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResidualSort {
    /// Cheapest first.
    PriceAscending,

    /// Most expensive first.
    PriceDescending,

    /// Least driven first.
    MileageAscending,
}

impl ResidualSort {
    /// Sorts the provided [`Listing`]s in place.
    pub fn apply(self, listings: &mut [Listing]) {
        match self {
            Self::PriceAscending => listings.sort_by_key(price),
            Self::PriceDescending => listings.sort_by_key(|l| Reverse(price(l))),
            Self::MileageAscending => {
                listings.sort_by_key(|l| l.mileage().unwrap_or_default());
            }
        }
    }
}

/// Returns the selling price of the provided [`Listing`] to sort by.
fn price(listing: &Listing) -> Decimal {
    listing.selling_price().unwrap_or_default()
}
