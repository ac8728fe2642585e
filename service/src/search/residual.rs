//! [`ResidualFilter`] definitions.

use std::fmt;

use crate::{
    domain::{
        color,
        listing::{FuelType, Price, ServiceHistory, TransmissionType},
        Listing,
    },
    read::listing::Range,
};

/// Predicate over a fetched [`Listing`].
type Predicate = Box<dyn Fn(&Listing) -> bool + Send + Sync>;

/// Chain of predicates a document store cannot evaluate natively, applied to
/// the fetched [`Listing`]s.
///
/// Every predicate fails on a missing value it inspects.
#[derive(Default)]
pub struct ResidualFilter {
    /// Named predicates in the order of their application.
    criteria: Vec<(&'static str, Predicate)>,
}

impl fmt::Debug for ResidualFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.criteria.iter().map(|(name, _)| name))
            .finish()
    }
}

impl ResidualFilter {
    /// Creates a new [`ResidualFilter`] passing everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the named `predicate` to this [`ResidualFilter`].
    #[must_use]
    pub fn with<F>(mut self, name: &'static str, predicate: F) -> Self
    where
        F: Fn(&Listing) -> bool + Send + Sync + 'static,
    {
        self.criteria.push((name, Box::new(predicate)));
        self
    }

    /// Requires a [`Listing`] to be painted in any of the provided `colors`.
    #[must_use]
    pub fn colors(self, colors: &[color::Id]) -> Self {
        if colors.is_empty() {
            return self;
        }
        let colors = colors.to_vec();
        self.with("colors", move |l| {
            l.color.as_ref().is_some_and(|c| colors.contains(c))
        })
    }

    /// Requires a [`Listing`] to consume any of the provided [`FuelType`]s.
    #[must_use]
    pub fn fuel_types(self, types: &[FuelType]) -> Self {
        if types.is_empty() {
            return self;
        }
        let types = types.to_vec();
        self.with("fuel_types", move |l| {
            l.fuel_type().is_some_and(|t| types.contains(&t))
        })
    }

    /// Requires a [`Listing`] to have any of the provided
    /// [`TransmissionType`]s.
    #[must_use]
    pub fn transmission_types(self, types: &[TransmissionType]) -> Self {
        if types.is_empty() {
            return self;
        }
        let types = types.to_vec();
        self.with("transmission_types", move |l| {
            l.transmission_type().is_some_and(|t| types.contains(&t))
        })
    }

    /// Requires the selling price of a [`Listing`] to lie within the provided
    /// [`Range`].
    #[must_use]
    pub fn price(self, range: Range<Price>) -> Self {
        if range.is_unbounded() {
            return self;
        }
        self.with("price", move |l| {
            l.selling_price().is_some_and(|p| range.contains(&p))
        })
    }

    /// Requires the mileage of a [`Listing`] to lie within the provided
    /// [`Range`].
    #[must_use]
    pub fn mileage(self, range: Range<u64>) -> Self {
        if range.is_unbounded() {
            return self;
        }
        self.with("mileage", move |l| {
            l.mileage().is_some_and(|m| range.contains(&m))
        })
    }

    /// Requires a [`Listing`] to have had at most `max` previous owners.
    #[must_use]
    pub fn max_owners(self, max: Option<u32>) -> Self {
        let Some(max) = max else {
            return self;
        };
        self.with("max_owners", move |l| {
            l.ownership()
                .and_then(|o| o.previous_owners)
                .is_some_and(|n| n <= max)
        })
    }

    /// Requires a [`Listing`] to have [`ServiceHistory::Full`], if `set`.
    #[must_use]
    pub fn full_service_history(self, set: bool) -> Self {
        if !set {
            return self;
        }
        self.with("full_service_history", |l| {
            l.ownership().and_then(|o| o.service_history)
                == Some(ServiceHistory::Full)
        })
    }

    /// Requires a [`Listing`] to be accident-free, if `set`.
    #[must_use]
    pub fn accident_free(self, set: bool) -> Self {
        if !set {
            return self;
        }
        self.with("accident_free", |l| {
            l.ownership().and_then(|o| o.accident_free) == Some(true)
        })
    }

    /// Requires a [`Listing`] to have remaining warranty, if `set`.
    #[must_use]
    pub fn warranty_remaining(self, set: bool) -> Self {
        if !set {
            return self;
        }
        self.with("warranty_remaining", |l| {
            l.ownership().and_then(|o| o.warranty_remaining) == Some(true)
        })
    }

    /// Returns names of the predicates of this [`ResidualFilter`] in the order
    /// of their application.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.criteria.iter().map(|(name, _)| *name)
    }

    /// Indicates whether this [`ResidualFilter`] passes everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Checks whether the provided [`Listing`] satisfies all the predicates.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        self.criteria.iter().all(|(_, p)| p(listing))
    }

    /// Retains only the [`Listing`]s satisfying all the predicates, preserving
    /// their order.
    #[must_use]
    pub fn apply(&self, mut listings: Vec<Listing>) -> Vec<Listing> {
        listings.retain(|l| self.matches(l));
        listings
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::{
        domain::{color, listing::FuelType, Listing},
        read::listing::Range,
    };

    use super::ResidualFilter;

    fn listing(id: &str, details: serde_json::Value) -> Listing {
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
        serde_json::from_value(doc).unwrap()
    }

    fn ids(listings: &[Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn empty_passes_everything() {
        let filter = ResidualFilter::new()
            .colors(&[])
            .fuel_types(&[])
            .price(Range::default())
            .mileage(Range::default())
            .max_owners(None)
            .full_service_history(false)
            .accident_free(false)
            .warranty_remaining(false);

        assert!(filter.is_empty());
        assert!(filter.matches(&listing("a", json!({}))));
    }

    #[test]
    fn price_bounds() {
        let listings = vec![
            listing("cheap", json!({"pricing": {"selling_price": 500}})),
            listing("dear", json!({"pricing": {"selling_price": 1_000_000}})),
            listing("unpriced", json!({"pricing": {}})),
        ];

        let filter = ResidualFilter::new()
            .price(Range::new(None, Some(Decimal::from(1000))));

        assert_eq!(ids(&filter.apply(listings)), ["cheap"]);
    }

    #[test]
    fn missing_mileage_never_matches() {
        let listings = vec![
            listing("low", json!({"specifications": {"mileage": "5000"}})),
            listing("none", json!({"specifications": {}})),
            listing("garbage", json!({"specifications": {"mileage": "n/a"}})),
            listing("bare", json!({})),
        ];

        let at_least = ResidualFilter::new().mileage(Range::new(Some(0), None));
        let at_most =
            ResidualFilter::new().mileage(Range::new(None, Some(u64::MAX)));

        assert_eq!(ids(&at_least.apply(listings.clone())), ["low"]);
        assert_eq!(ids(&at_most.apply(listings)), ["low"]);
    }

    #[test]
    fn ownership_flags() {
        let listings = vec![
            listing(
                "clean",
                json!({"ownership": {
                    "previous_owners": 1,
                    "service_history": "full",
                    "accident_free": true,
                    "warranty_remaining": true,
                }}),
            ),
            listing(
                "partial",
                json!({"ownership": {
                    "previous_owners": 3,
                    "service_history": "partial",
                    "accident_free": true,
                }}),
            ),
            listing("unknown", json!({})),
        ];

        let owners = ResidualFilter::new().max_owners(Some(2));
        let history = ResidualFilter::new().full_service_history(true);
        let accidents = ResidualFilter::new().accident_free(true);
        let warranty = ResidualFilter::new().warranty_remaining(true);

        assert_eq!(ids(&owners.apply(listings.clone())), ["clean"]);
        assert_eq!(ids(&history.apply(listings.clone())), ["clean"]);
        assert_eq!(
            ids(&accidents.apply(listings.clone())),
            ["clean", "partial"],
        );
        assert_eq!(ids(&warranty.apply(listings)), ["clean"]);
    }

    #[test]
    fn chains_preserving_order() {
        let listings = vec![
            listing("c", json!({"color": "red",
                                "specifications": {"fuel_type": "diesel"}})),
            listing("b", json!({"color": {"$id": "red"},
                                "specifications": {"fuel_type": "petrol"}})),
            listing("a", json!({"color": "blue",
                                "specifications": {"fuel_type": "petrol"}})),
            listing("d", json!({"color": "red",
                                "specifications": {"fuel_type": "electric"}})),
        ];

        let filter = ResidualFilter::new()
            .colors(&[color::Id::new("red")])
            .fuel_types(&[FuelType::Diesel, FuelType::Electric]);

        assert_eq!(filter.names().collect::<Vec<_>>(), ["colors", "fuel_types"]);
        assert_eq!(ids(&filter.apply(listings)), ["c", "d"]);
    }
}
