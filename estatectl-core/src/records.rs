//! Record types for the three document collections and the derived `AgentStat`.
//!
//! Documents are schema-less JSON objects. They are mapped onto fixed record
//! types here, at the boundary, so the rest of the crate never sees a null:
//! - `_id` is accepted as an alias for `id` on agents and listings
//! - missing or null `name`, `active`, `price`, `views`, `date` take their defaults
//! - numeric fields accept JSON numbers or numeric strings (`"250000.00"`)
//!
//! Missing identity fields and wrongly-shaped values are reported as
//! [`EstateError::Document`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EstateError, Result};

/// Real-estate agent. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(alias = "_id", deserialize_with = "lenient::integer")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub active: bool,
}

/// Property listing, owned by exactly one agent through `agent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(alias = "_id", deserialize_with = "lenient::integer")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub agent_id: i64,
    #[serde(default, deserialize_with = "lenient::price")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Daily view counter for one listing. Several records may share a
/// `(listing_id, date)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRecord {
    #[serde(deserialize_with = "lenient::integer")]
    pub listing_id: i64,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub views: u64,
}

/// Per-agent summary emitted by the statistics engine. Serialized as
/// `{"agent", "listings", "totalViews"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStat {
    pub agent: String,
    pub listings: u64,
    pub total_views: u64,
}

/// A record type that can be read from a named document collection.
pub trait Document: DeserializeOwned {
    /// Collection name, used in error messages and by the store adapters.
    const COLLECTION: &'static str;

    /// Map a single document onto the record type.
    fn from_document(index: usize, doc: Value) -> Result<Self> {
        if !doc.is_object() {
            return Err(EstateError::document(
                Self::COLLECTION,
                index,
                format!("expected an object, found {}", kind_of(&doc)),
            ));
        }

        serde_json::from_value(doc)
            .map_err(|e| EstateError::document(Self::COLLECTION, index, e.to_string()))
    }
}

impl Document for Agent {
    const COLLECTION: &'static str = "agents";
}

impl Document for Listing {
    const COLLECTION: &'static str = "listings";
}

impl Document for ViewRecord {
    const COLLECTION: &'static str = "views";
}

/// Map a whole collection, failing on the first malformed document.
pub fn from_documents<T: Document>(docs: impl IntoIterator<Item = Value>) -> Result<Vec<T>> {
    docs.into_iter()
        .enumerate()
        .map(|(index, doc)| T::from_document(index, doc))
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Deserializers that tolerate the shapes documents actually come in.
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    /// 2^63 and 2^64 as floats. Whole floats at or past these have no exact
    /// integer counterpart and would saturate on `as` casts.
    const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;
    const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

    // Variant order matters: JSON integers above i64::MAX only fit `Unsigned`.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Unsigned(u64),
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Numeric::deserialize(deserializer)? {
            Numeric::Unsigned(n) => i64::try_from(n)
                .map_err(|_| D::Error::custom(format!("integer {n} is out of range"))),
            Numeric::Int(n) => Ok(n),
            Numeric::Float(f) if is_whole(f) && (-I64_LIMIT..I64_LIMIT).contains(&f) => Ok(f as i64),
            Numeric::Float(f) if is_whole(f) => {
                Err(D::Error::custom(format!("integer {f} is out of range")))
            }
            Numeric::Float(f) => Err(D::Error::custom(format!("expected an integer, found {f}"))),
            Numeric::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("expected an integer, found {s:?}"))),
        }
    }

    pub fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<Numeric>::deserialize(deserializer)? {
            None => return Ok(0.0),
            Some(Numeric::Unsigned(n)) => n as f64,
            Some(Numeric::Int(n)) => n as f64,
            Some(Numeric::Float(f)) => f,
            Some(Numeric::Text(s)) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("expected a price, found {s:?}")))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(D::Error::custom("price must be finite"))
        }
    }

    pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Numeric>::deserialize(deserializer)? {
            None => Ok(0),
            Some(Numeric::Unsigned(n)) => Ok(n),
            Some(Numeric::Int(n)) => Err(negative(n)),
            Some(Numeric::Float(f)) if is_whole(f) && f < 0.0 => Err(negative(f)),
            Some(Numeric::Float(f)) if is_whole(f) && f < U64_LIMIT => Ok(f as u64),
            Some(Numeric::Float(f)) if is_whole(f) => {
                Err(D::Error::custom(format!("count {f} is out of range")))
            }
            Some(Numeric::Float(f)) => Err(D::Error::custom(format!("expected a count, found {f}"))),
            Some(Numeric::Text(s)) => {
                let text = s.trim();
                match text.parse::<u64>() {
                    Ok(n) => Ok(n),
                    Err(_) => match text.parse::<i64>() {
                        Ok(n) if n < 0 => Err(negative(n)),
                        _ => Err(D::Error::custom(format!("expected a count, found {s:?}"))),
                    },
                }
            }
        }
    }

    fn is_whole(f: f64) -> bool {
        f.is_finite() && f.fract() == 0.0
    }

    fn negative<E: Error>(value: impl std::fmt::Display) -> E {
        E::custom(format!("count must be >= 0, found {value}"))
    }
}
