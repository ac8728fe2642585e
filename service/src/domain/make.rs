//! [`Make`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Manufacturer of a car, like `Toyota` or `Honda`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Make {
    /// ID of this [`Make`].
    #[serde(rename = "$id")]
    pub id: Id,

    /// [`Name`] of this [`Make`] to be displayed.
    pub name: Name,

    /// [`Logo`] of this [`Make`], if any.
    #[serde(default)]
    pub logo: Option<Logo>,
}

/// Names of [`Make`] document attributes.
pub mod attr {
    /// Attribute holding the [`Name`] of a [`Make`].
    ///
    /// [`Make`]: super::Make
    /// [`Name`]: super::Name
    pub const NAME: &str = "name";
}

/// ID of a [`Make`].
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

/// Display name of a [`Make`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Name(String);

/// Reference to the logo image of a [`Make`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Logo(String);
