//! Car [`Listing`]s HTTP API.

use std::{fmt, str::FromStr};

use axum::{extract::Path, Extension};
use axum_extra::extract::{Query, QueryRejection};
use common::pagination::Arguments;
use rust_decimal::Decimal;
use serde::{de::Error as _, Deserialize, Deserializer};
use service::{
    domain::{
        listing::{FuelType, Slug, TransmissionType, Year},
        Listing,
    },
    query::{self, listings::Search},
    read::{
        listing::{NewCarSort, Range, UsedCarSort},
        NewCarFilter, UsedCarFilter,
    },
    Query as _,
};

use crate::{api, define_error, AsError, Error, Service};

/// Maximum number of [`Listing`]s a client may request on a single page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MaxLimit(pub u32);

define_error! {
    enum FilterError {
        #[code = "INVALID_PAGE"]
        #[status = BAD_REQUEST]
        #[message = "`page` must be at least 1"]
        InvalidPage,

        #[code = "INVALID_LIMIT"]
        #[status = BAD_REQUEST]
        #[message = "`limit` must be positive and not exceed the maximum"]
        InvalidLimit,

        #[code = "INVERTED_RANGE"]
        #[status = BAD_REQUEST]
        #[message = "Range minimum must not exceed its maximum"]
        InvertedRange,
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the provided slug does not exist"]
        NotExists,
    }
}

/// Query parameters of searching new cars.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewCarParams {
    /// Free text to search for in titles.
    pub search: Option<String>,

    /// IDs of makes.
    #[serde(deserialize_with = "list")]
    pub makes: Vec<String>,

    /// Model keywords.
    #[serde(deserialize_with = "list")]
    pub models: Vec<String>,

    /// IDs of body types.
    #[serde(deserialize_with = "list")]
    pub body_types: Vec<String>,

    /// Minimum selling price.
    pub price_min: Option<Decimal>,

    /// Maximum selling price.
    pub price_max: Option<Decimal>,

    /// IDs of colors.
    #[serde(deserialize_with = "list")]
    pub colors: Vec<String>,

    /// Fuel types.
    #[serde(deserialize_with = "list")]
    pub fuel_types: Vec<FuelType>,

    /// Transmission types.
    #[serde(deserialize_with = "list")]
    pub transmissions: Vec<TransmissionType>,

    /// Whether only special offers should be found.
    pub special_offer: bool,

    /// Whether only pre-order listings should be found.
    pub pre_order: bool,

    /// Order of the results.
    pub sort_by: Option<NewCarSort>,

    /// Number of the page, starting from `1`.
    pub page: Option<u32>,

    /// Number of listings on the page.
    pub limit: Option<u32>,
}

impl NewCarParams {
    /// Validates these [`NewCarParams`] and converts them into a
    /// [`NewCarFilter`].
    ///
    /// # Errors
    ///
    /// If pagination is out of bounds, or a range is inverted.
    pub fn into_filter(
        self,
        max_limit: MaxLimit,
    ) -> Result<NewCarFilter, FilterError> {
        let Self {
            search,
            makes,
            models,
            body_types,
            price_min,
            price_max,
            colors,
            fuel_types,
            transmissions,
            special_offer,
            pre_order,
            sort_by,
            page,
            limit,
        } = self;

        Ok(NewCarFilter {
            search,
            makes: makes.into_iter().map(Into::into).collect(),
            models,
            body_types: body_types.into_iter().map(Into::into).collect(),
            price: range(price_min, price_max)?,
            colors: colors.into_iter().map(Into::into).collect(),
            fuel_types,
            transmission_types: transmissions,
            special_offer,
            pre_order,
            sort: sort_by.unwrap_or_default(),
            pagination: arguments(page, limit, max_limit)?,
        })
    }
}

/// Query parameters of searching used cars.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsedCarParams {
    /// Free text to search for in titles.
    pub search: Option<String>,

    /// IDs of makes.
    #[serde(deserialize_with = "list")]
    pub makes: Vec<String>,

    /// Model keywords.
    #[serde(deserialize_with = "list")]
    pub models: Vec<String>,

    /// IDs of body types.
    #[serde(deserialize_with = "list")]
    pub body_types: Vec<String>,

    /// Minimum selling price.
    pub price_min: Option<Decimal>,

    /// Maximum selling price.
    pub price_max: Option<Decimal>,

    /// IDs of colors.
    #[serde(deserialize_with = "list")]
    pub colors: Vec<String>,

    /// Fuel types.
    #[serde(deserialize_with = "list")]
    pub fuel_types: Vec<FuelType>,

    /// Transmission types.
    #[serde(deserialize_with = "list")]
    pub transmissions: Vec<TransmissionType>,

    /// Minimum model year.
    pub year_min: Option<Year>,

    /// Maximum model year.
    pub year_max: Option<Year>,

    /// Minimum mileage.
    pub mileage_min: Option<u64>,

    /// Maximum mileage.
    pub mileage_max: Option<u64>,

    /// Maximum number of previous owners.
    pub max_owners: Option<u32>,

    /// Whether only cars with full service history should be found.
    pub service_history: bool,

    /// Whether only accident-free cars should be found.
    pub accident_free: bool,

    /// Whether only cars with remaining warranty should be found.
    pub warranty: bool,

    /// Whether only certified pre-owned cars should be found.
    pub certified: bool,

    /// Order of the results.
    pub sort_by: Option<UsedCarSort>,

    /// Number of the page, starting from `1`.
    pub page: Option<u32>,

    /// Number of listings on the page.
    pub limit: Option<u32>,
}

impl UsedCarParams {
    /// Validates these [`UsedCarParams`] and converts them into an
    /// [`UsedCarFilter`].
    ///
    /// # Errors
    ///
    /// If pagination is out of bounds, or a range is inverted.
    pub fn into_filter(
        self,
        max_limit: MaxLimit,
    ) -> Result<UsedCarFilter, FilterError> {
        let Self {
            search,
            makes,
            models,
            body_types,
            price_min,
            price_max,
            colors,
            fuel_types,
            transmissions,
            year_min,
            year_max,
            mileage_min,
            mileage_max,
            max_owners,
            service_history,
            accident_free,
            warranty,
            certified,
            sort_by,
            page,
            limit,
        } = self;

        Ok(UsedCarFilter {
            search,
            makes: makes.into_iter().map(Into::into).collect(),
            models,
            body_types: body_types.into_iter().map(Into::into).collect(),
            price: range(price_min, price_max)?,
            colors: colors.into_iter().map(Into::into).collect(),
            fuel_types,
            transmission_types: transmissions,
            year: range(year_min, year_max)?,
            mileage: range(mileage_min, mileage_max)?,
            max_owners,
            full_service_history: service_history,
            accident_free,
            warranty_remaining: warranty,
            certified,
            sort: sort_by.unwrap_or_default(),
            pagination: arguments(page, limit, max_limit)?,
        })
    }
}

/// Searches published new cars.
///
/// # Errors
///
/// If the parameters are invalid, or the document store fails.
#[tracing::instrument(skip_all, fields(http.handler = "cars.new"))]
pub async fn new_cars(
    Extension(service): Extension<Service>,
    Extension(max_limit): Extension<MaxLimit>,
    params: Result<Query<NewCarParams>, QueryRejection>,
) -> Result<api::Response<Vec<Listing>>, Error> {
    let Query(params) = params.map_err(AsError::into_error)?;
    let filter = params.into_filter(max_limit)?;

    let query: query::listings::NewCars = Search(filter);
    service
        .execute(query)
        .await
        .map(Into::into)
        .map_err(AsError::into_error)
}

/// Searches published used cars.
///
/// # Errors
///
/// If the parameters are invalid, or the document store fails.
#[tracing::instrument(skip_all, fields(http.handler = "cars.used"))]
pub async fn used_cars(
    Extension(service): Extension<Service>,
    Extension(max_limit): Extension<MaxLimit>,
    params: Result<Query<UsedCarParams>, QueryRejection>,
) -> Result<api::Response<Vec<Listing>>, Error> {
    let Query(params) = params.map_err(AsError::into_error)?;
    let filter = params.into_filter(max_limit)?;

    let query: query::listings::UsedCars = Search(filter);
    service
        .execute(query)
        .await
        .map(Into::into)
        .map_err(AsError::into_error)
}

/// Returns a published [`Listing`] by its [`Slug`].
///
/// # Errors
///
/// If no such [`Listing`] exists, or the document store fails.
#[tracing::instrument(skip_all, fields(http.handler = "cars.by_slug", slug))]
pub async fn by_slug(
    Extension(service): Extension<Service>,
    Path(slug): Path<String>,
) -> Result<api::Response<Listing>, Error> {
    let slug = Slug::new(slug).ok_or(ListingError::NotExists)?;

    service
        .execute(query::listing::BySlug(slug))
        .await
        .map_err(AsError::into_error)?
        .map(api::Response::new)
        .ok_or_else(|| ListingError::NotExists.into())
}

/// Creates pagination [`Arguments`] out of the provided parameters.
fn arguments(
    page: Option<u32>,
    limit: Option<u32>,
    MaxLimit(max_limit): MaxLimit,
) -> Result<Arguments, FilterError> {
    let args = Arguments::new(page, limit);
    if args.page < Arguments::FIRST_PAGE {
        return Err(FilterError::InvalidPage);
    }
    if args.limit == 0 || args.limit > max_limit {
        return Err(FilterError::InvalidLimit);
    }
    Ok(args)
}

/// Creates a [`Range`] out of the provided bounds.
fn range<T: PartialOrd>(
    min: Option<T>,
    max: Option<T>,
) -> Result<Range<T>, FilterError> {
    let range = Range::new(min, max);
    if range.is_inverted() {
        return Err(FilterError::InvertedRange);
    }
    Ok(range)
}

/// Deserializes a list of values, each given either as a separate parameter or
/// as a part of a comma-separated one.
fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    Vec::<String>::deserialize(deserializer)?
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.parse().map_err(D::Error::custom))
        .collect()
}
