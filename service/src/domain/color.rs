//! Color definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

/// ID of a color a [`Listing`] is painted in.
///
/// [`Listing`]: crate::domain::Listing
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
