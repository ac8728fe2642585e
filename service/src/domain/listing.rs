//! [`Listing`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{body_type, color, lenient, make, reference};
#[cfg(doc)]
use crate::domain::Make;

/// Car put up for sale on the marketplace.
///
/// Every attribute besides the identity, the classification and the creation
/// time is optional, because listings are edited by a separate subsystem and
/// may be saved half-filled.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Listing {
    /// ID of this [`Listing`].
    #[serde(rename = "$id")]
    pub id: Id,

    /// [`Slug`] of this [`Listing`] used in URLs.
    #[serde(default, deserialize_with = "lenient::known")]
    pub slug: Option<Slug>,

    /// [`Title`] of this [`Listing`].
    #[serde(default, deserialize_with = "lenient::known")]
    pub title: Option<Title>,

    /// [`Make`] of the listed car.
    #[serde(default, with = "reference")]
    pub make: Option<make::Id>,

    /// [`Model`] of the listed car.
    #[serde(default, deserialize_with = "lenient::known")]
    pub model: Option<Model>,

    /// Body type of the listed car.
    #[serde(default, with = "reference")]
    pub body_type: Option<body_type::Id>,

    /// [`Condition`] of the listed car.
    pub condition: Condition,

    /// Publication [`Status`] of this [`Listing`].
    pub status: Status,

    /// Indicator whether the listed car is still available for purchase.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_available: bool,

    /// Model [`Year`] of the listed car.
    #[serde(default, deserialize_with = "lenient::known")]
    pub year: Option<Year>,

    /// Technical [`Specification`] of the listed car.
    #[serde(
        default,
        deserialize_with = "lenient::known",
        rename = "specifications"
    )]
    pub specification: Option<Specification>,

    /// [`Pricing`] of this [`Listing`].
    #[serde(default, deserialize_with = "lenient::known")]
    pub pricing: Option<Pricing>,

    /// [`Ownership`] history of the listed car (used cars only).
    #[serde(default, deserialize_with = "lenient::known")]
    pub ownership: Option<Ownership>,

    /// Color of the listed car.
    #[serde(default, with = "reference")]
    pub color: Option<color::Id>,

    /// Indicator whether the listed car is certified pre-owned.
    ///
    /// Denormalized copy of [`Ownership::certified_pre_owned`] the document
    /// store is able to filter on.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_certified: bool,

    /// Indicator whether this [`Listing`] is a special offer.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_special_offer: bool,

    /// Indicator whether the listed car is available for pre-order only.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_pre_order: bool,

    /// Number of times this [`Listing`] was viewed.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub views: Views,

    /// [`DateTime`] when this [`Listing`] was created.
    #[serde(rename = "$createdAt", with = "common::datetime::serde::rfc3339")]
    pub created_at: CreationDateTime,
}

impl Listing {
    /// Returns the selling [`Price`] of this [`Listing`], if any.
    #[must_use]
    pub fn selling_price(&self) -> Option<Price> {
        self.pricing.as_ref()?.selling_price
    }

    /// Returns the [`FuelType`] of the listed car, if known.
    #[must_use]
    pub fn fuel_type(&self) -> Option<FuelType> {
        self.specification.as_ref()?.fuel_type
    }

    /// Returns the [`TransmissionType`] of the listed car, if known.
    #[must_use]
    pub fn transmission_type(&self) -> Option<TransmissionType> {
        self.specification.as_ref()?.transmission_type
    }

    /// Returns the mileage of the listed car, if known and readable.
    #[must_use]
    pub fn mileage(&self) -> Option<u64> {
        self.specification.as_ref()?.mileage.as_ref()?.value()
    }

    /// Returns the [`Ownership`] history of the listed car, if known.
    #[must_use]
    pub fn ownership(&self) -> Option<&Ownership> {
        self.ownership.as_ref()
    }
}

/// Names of [`Listing`] document attributes the document store is queried by.
pub mod attr {
    /// Attribute holding the [`Id`](super::Id).
    pub const ID: &str = "$id";

    /// Attribute holding the [`CreationDateTime`](super::CreationDateTime).
    pub const CREATED_AT: &str = "$createdAt";

    /// Attribute holding the [`Slug`](super::Slug).
    pub const SLUG: &str = "slug";

    /// Attribute holding the [`Title`](super::Title).
    pub const TITLE: &str = "title";

    /// Attribute holding the make reference.
    pub const MAKE: &str = "make";

    /// Attribute holding the [`Model`](super::Model).
    pub const MODEL: &str = "model";

    /// Attribute holding the body type reference.
    pub const BODY_TYPE: &str = "body_type";

    /// Attribute holding the [`Condition`](super::Condition).
    pub const CONDITION: &str = "condition";

    /// Attribute holding the [`Status`](super::Status).
    pub const STATUS: &str = "status";

    /// Attribute holding the availability flag.
    pub const IS_AVAILABLE: &str = "is_available";

    /// Attribute holding the [`Year`](super::Year).
    pub const YEAR: &str = "year";

    /// Attribute holding the certified pre-owned flag.
    pub const IS_CERTIFIED: &str = "is_certified";

    /// Attribute holding the special offer flag.
    pub const IS_SPECIAL_OFFER: &str = "is_special_offer";

    /// Attribute holding the pre-order flag.
    pub const IS_PRE_ORDER: &str = "is_pre_order";

    /// Attribute holding the [`Views`](super::Views) counter.
    pub const VIEWS: &str = "views";
}

/// ID of a [`Listing`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] out of the provided raw `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Human-readable unique identifier of a [`Listing`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Creates a new [`Slug`] if the given `slug` is valid.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        Self::check(&slug).then_some(Self(slug))
    }

    /// Checks whether the given `slug` is a valid [`Slug`].
    fn check(slug: impl AsRef<str>) -> bool {
        let slug = slug.as_ref();
        !slug.is_empty()
            && slug.len() <= 256
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Title(String);

/// Model of a listed car, like `Corolla` or `Civic`.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Model(String);

/// Model year of a listed car.
pub type Year = u16;

/// Number of times a [`Listing`] was viewed.
pub type Views = u64;

/// Selling price of a listed car.
pub type Price = Decimal;

define_kind! {
    #[doc = "Condition of a listed car."]
    enum Condition {
        #[doc = "Brand new car."]
        New,

        #[doc = "Previously owned car."]
        Used,
    }
}

define_kind! {
    #[doc = "Publication status of a [`Listing`]."]
    enum Status {
        #[doc = "Not yet visible on the marketplace."]
        Draft,

        #[doc = "Visible on the marketplace."]
        Published,
    }
}

define_kind! {
    #[doc = "Fuel type of a listed car."]
    enum FuelType {
        #[doc = "Petrol engine."]
        Petrol,

        #[doc = "Diesel engine."]
        Diesel,

        #[doc = "Hybrid powertrain."]
        Hybrid,

        #[doc = "Plug-in hybrid powertrain."]
        PluginHybrid,

        #[doc = "Battery electric powertrain."]
        Electric,

        #[doc = "Liquefied petroleum gas engine."]
        Lpg,
    }
}

define_kind! {
    #[doc = "Transmission type of a listed car."]
    enum TransmissionType {
        #[doc = "Automatic transmission."]
        Automatic,

        #[doc = "Manual transmission."]
        Manual,

        #[doc = "Semi-automatic transmission."]
        SemiAutomatic,

        #[doc = "Continuously variable transmission."]
        Cvt,
    }
}

define_kind! {
    #[doc = "Completeness of a used car service history."]
    enum ServiceHistory {
        #[doc = "Every service is documented."]
        Full,

        #[doc = "Some services are documented."]
        Partial,

        #[doc = "No services are documented."]
        Absent,
    }
}

/// Technical specification of a listed car.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Specification {
    /// [`FuelType`] of the car.
    #[serde(default, deserialize_with = "lenient::known")]
    pub fuel_type: Option<FuelType>,

    /// [`TransmissionType`] of the car.
    #[serde(default, deserialize_with = "lenient::known")]
    pub transmission_type: Option<TransmissionType>,

    /// [`Mileage`] of the car.
    #[serde(default, deserialize_with = "lenient::known")]
    pub mileage: Option<Mileage>,

    /// Engine size, like `2.0L`.
    #[serde(default, deserialize_with = "lenient::known")]
    pub engine_size: Option<String>,

    /// Drivetrain, like `AWD`.
    #[serde(default, deserialize_with = "lenient::known")]
    pub drivetrain: Option<String>,

    /// Engine power in horsepower.
    #[serde(default, deserialize_with = "lenient::known")]
    pub horsepower: Option<u32>,
}

/// Mileage of a listed car, stored as text.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Mileage(String);

impl Mileage {
    /// Creates a new [`Mileage`] out of its textual representation.
    #[must_use]
    pub fn new(mileage: impl Into<String>) -> Self {
        Self(mileage.into())
    }

    /// Reads the numeric value of this [`Mileage`].
    ///
    /// The leading run of digits is read, ignoring leading whitespace and
    /// `,`/`_` digit group separators, so `"12,500 km"` reads as `12500`.
    /// [`None`] is returned if this [`Mileage`] doesn't start with a digit.
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        let text = self.0.trim_start();
        if !text.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        text.chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '_')
            .filter(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .ok()
    }
}

impl<'de> Deserialize<'de> for Mileage {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        /// Stored representation of a [`Mileage`].
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            /// Textual representation.
            Text(String),

            /// Numeric representation saved by older editors.
            Number(u64),
        }

        Ok(match Repr::deserialize(d)? {
            Repr::Text(text) => Self(text),
            Repr::Number(n) => Self(n.to_string()),
        })
    }
}

/// Pricing of a [`Listing`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Pricing {
    /// Selling [`Price`].
    #[serde(default, deserialize_with = "lenient::known")]
    pub selling_price: Option<Price>,

    /// [`Currency`] of the [`Pricing::selling_price`].
    #[serde(default, deserialize_with = "lenient::known")]
    pub currency: Option<Currency>,
}

/// [ISO 4217] code of a currency.
///
/// [ISO 4217]: https://en.wikipedia.org/wiki/ISO_4217
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Currency(String);

/// Ownership history of a used car.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Ownership {
    /// Number of previous owners.
    #[serde(default, deserialize_with = "lenient::known")]
    pub previous_owners: Option<u32>,

    /// Completeness of the [`ServiceHistory`].
    #[serde(default, deserialize_with = "lenient::known")]
    pub service_history: Option<ServiceHistory>,

    /// Indicator whether the car has never been in an accident.
    #[serde(default, deserialize_with = "lenient::known")]
    pub accident_free: Option<bool>,

    /// Indicator whether the manufacturer warranty is still active.
    #[serde(default, deserialize_with = "lenient::known")]
    pub warranty_remaining: Option<bool>,

    /// Indicator whether the car is certified pre-owned.
    #[serde(default, deserialize_with = "lenient::known")]
    pub certified_pre_owned: Option<bool>,
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<Listing>;

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{
        Condition, FuelType, Listing, Mileage, ServiceHistory, Slug, Status,
    };

    #[test]
    fn mileage_value() {
        assert_eq!(Mileage::new("10000").value(), Some(10_000));
        assert_eq!(Mileage::new("  42 km").value(), Some(42));
        assert_eq!(Mileage::new("12,500 km").value(), Some(12_500));
        assert_eq!(Mileage::new("0").value(), Some(0));
        assert_eq!(Mileage::new("").value(), None);
        assert_eq!(Mileage::new("unknown").value(), None);
        assert_eq!(Mileage::new("-5").value(), None);
    }

    #[test]
    fn slug_check() {
        assert!(Slug::new("toyota-corolla-2021").is_some());
        assert!(Slug::new("").is_none());
        assert!(Slug::new("has space").is_none());
        assert!(Slug::new("../etc").is_none());
    }

    #[test]
    fn kinds_are_snake_case() {
        assert_eq!(FuelType::PluginHybrid.as_str(), "plugin_hybrid");
        assert_eq!("used".parse::<Condition>().unwrap(), Condition::Used);
        assert!("USED".parse::<Condition>().is_err());
    }

    #[test]
    fn deserializes_full_document() {
        let listing: Listing = serde_json::from_value(json!({
            "$id": "car-1",
            "$createdAt": "2024-05-01T10:00:00.000+00:00",
            "slug": "toyota-corolla",
            "title": "Toyota Corolla 1.8 Hybrid",
            "make": { "$id": "toyota", "name": "Toyota" },
            "model": "Corolla",
            "body_type": "sedan",
            "condition": "used",
            "status": "published",
            "is_available": true,
            "year": 2021,
            "specifications": {
                "fuel_type": "hybrid",
                "transmission_type": "automatic",
                "mileage": "23,000",
            },
            "pricing": { "selling_price": 21500.50, "currency": "USD" },
            "ownership": {
                "previous_owners": 1,
                "service_history": "full",
                "accident_free": true,
            },
            "color": "white",
            "views": 7,
        }))
        .unwrap();

        assert_eq!(listing.id.to_string(), "car-1");
        assert_eq!(listing.make.as_ref().unwrap().to_string(), "toyota");
        assert_eq!(listing.body_type.as_ref().unwrap().to_string(), "sedan");
        assert_eq!(listing.condition, Condition::Used);
        assert_eq!(listing.status, Status::Published);
        assert_eq!(listing.mileage(), Some(23_000));
        assert_eq!(
            listing.selling_price(),
            Some(Decimal::new(2_150_050, 2)),
        );
        assert_eq!(listing.fuel_type(), Some(FuelType::Hybrid));
        assert_eq!(
            listing.ownership().and_then(|o| o.service_history),
            Some(ServiceHistory::Full),
        );
        assert!(!listing.is_certified);
    }

    #[test]
    fn deserializes_sparse_document() {
        let listing: Listing = serde_json::from_value(json!({
            "$id": "car-2",
            "$createdAt": "2024-05-01T10:00:00Z",
            "condition": "new",
            "status": "draft",
            "specifications": { "mileage": 1500 },
        }))
        .unwrap();

        assert!(!listing.is_available);
        assert_eq!(listing.make, None);
        assert_eq!(listing.selling_price(), None);
        assert_eq!(listing.mileage(), Some(1500));
        assert!(listing.ownership().is_none());
    }

    #[test]
    fn tolerates_inconsistent_document() {
        let listing: Listing = serde_json::from_value(json!({
            "$id": "car-3",
            "$createdAt": "2024-05-01T10:00:00Z",
            "condition": "used",
            "status": "published",
            "is_available": true,
            "is_certified": null,
            "is_special_offer": null,
            "is_pre_order": "no",
            "views": null,
            "year": "unknown",
            "specifications": {
                "fuel_type": "gasoline",
                "transmission_type": null,
                "mileage": "5000",
            },
            "pricing": { "selling_price": "call us" },
            "ownership": { "service_history": "lost", "previous_owners": -1 },
        }))
        .unwrap();

        assert!(listing.is_available);
        assert!(!listing.is_certified);
        assert!(!listing.is_special_offer);
        assert!(!listing.is_pre_order);
        assert_eq!(listing.views, 0);
        assert_eq!(listing.year, None);
        assert_eq!(listing.fuel_type(), None);
        assert_eq!(listing.transmission_type(), None);
        assert_eq!(listing.mileage(), Some(5000));
        assert_eq!(listing.selling_price(), None);
        assert_eq!(listing.ownership().and_then(|o| o.service_history), None);
        assert_eq!(listing.ownership().and_then(|o| o.previous_owners), None);
    }
}
