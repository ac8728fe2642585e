//! Domain definitions.

pub mod body_type;
pub mod color;
pub mod listing;
pub mod make;
mod lenient;
mod reference;

pub use self::{listing::Listing, make::Make};
