//! Partial-update (JSON merge-patch) support
//!
//! A merge-patch only carries the fields the caller wants to change. Every
//! patchable field is therefore three-state:
//!
//! - [`Patch::Unset`]: the field is left out of the payload
//! - [`Patch::Null`]: the field is sent as an explicit `null` (clears it)
//! - [`Patch::Value`]: the field is sent with the given value
//!
//! Patch models mark each field with
//! `#[serde(default, skip_serializing_if = "Patch::is_unset")]` and implement
//! [`AsPatch`] to produce the minimal JSON object.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Content type sent with merge-patch request bodies
pub const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

/// A single field of a partial update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Not part of the update
    #[default]
    Unset,
    /// Explicitly cleared
    Null,
    /// Set to a value
    Value(T),
}

impl<T> Patch<T> {
    /// Build from an option, mapping `None` to an explicit null
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }

    /// True if the field is not part of the update
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// True if the field is explicitly cleared
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True if the field carries a value
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Borrow the value, if any
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// `None` when unset, `Some(None)` when null, `Some(Some(v))` when set
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unset => None,
            Self::Null => Some(None),
            Self::Value(v) => Some(Some(v)),
        }
    }

    /// Map the contained value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Self::Unset => Patch::Unset,
            Self::Null => Patch::Null,
            Self::Value(v) => Patch::Value(f(v)),
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            // Unset fields are skipped by the containing struct.
            Self::Unset | Self::Null => serializer.serialize_none(),
            Self::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // Absent fields never reach here; they fall back to `Default` (Unset).
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}

/// Conversion of a patch model into a merge-patch JSON object
pub trait AsPatch: Serialize {
    /// Serialize only the fields that were explicitly set
    fn as_patch(&self) -> Result<JsonObject> {
        match serde_json::to_value(self)? {
            JsonValue::Object(map) => Ok(map),
            other => Err(Error::invalid_param(
                "patch",
                format!("expected a JSON object, got {other}"),
            )),
        }
    }
}
