//! (De)serialization of references to other documents.
//!
//! A reference is stored either as a plain ID, or as an expanded document
//! carrying its ID in the `$id` attribute. Both forms are read as the ID, and
//! always written as a plain ID.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stored representation of a reference.
#[derive(Deserialize)]
#[serde(untagged)]
enum Repr<Id> {
    /// Plain ID.
    Id(Id),

    /// Expanded document.
    Document {
        /// ID of the referenced document.
        #[serde(rename = "$id")]
        id: Id,
    },
}

/// Deserializes an optional reference into the ID it points to.
pub(crate) fn deserialize<'de, D, Id>(
    deserializer: D,
) -> Result<Option<Id>, D::Error>
where
    D: Deserializer<'de>,
    Id: Deserialize<'de>,
{
    Ok(Option::<Repr<Id>>::deserialize(deserializer)?.map(|r| match r {
        Repr::Id(id) | Repr::Document { id } => id,
    }))
}

/// Serializes an optional reference as a plain ID.
pub(crate) fn serialize<S, Id>(
    id: &Option<Id>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    Id: Serialize,
{
    id.serialize(serializer)
}
