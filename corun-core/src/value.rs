//! Dynamic payload type.
//!
//! Values flow from providers into computations at each resumption and out
//! of a computation when it completes.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fmt;

/// Payload carried by settlements and resumptions.
///
/// Any JSON document. Providers and computations exchange it without
/// agreeing on a concrete Rust type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(pub Json);

impl Value {
    /// The null value. Also what a callback reporting neither failure nor
    /// value settles with.
    pub const fn null() -> Self {
        Self(Json::Null)
    }

    /// An integer.
    pub fn int(n: i64) -> Self {
        Self(n.into())
    }

    /// A string.
    pub fn string(s: impl Into<String>) -> Self {
        Self(Json::String(s.into()))
    }

    /// An array, in iteration order.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self(items.into_iter().map(|item| item.0).collect())
    }

    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// The string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// The integer, if this is an integral number.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }

    /// The elements, if this is an array.
    pub fn items(&self) -> Option<&[Json]> {
        self.0.as_array().map(Vec::as_slice)
    }

    /// JSON kind name, as reported in shape violations.
    pub fn kind(&self) -> &'static str {
        match self.0 {
            Json::Null => "null",
            Json::Bool(_) => "bool",
            Json::Number(_) => "number",
            Json::String(_) => "string",
            Json::Array(_) => "array",
            Json::Object(_) => "object",
        }
    }

    /// Borrow the JSON document.
    pub fn as_json(&self) -> &Json {
        &self.0
    }

    /// Take the JSON document.
    pub fn into_json(self) -> Json {
        self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(s) = self.0.as_str() {
            return f.write_str(s);
        }
        write!(f, "{}", self.0)
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Self(json)
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        value.0
    }
}

macro_rules! value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self(Json::from(v))
                }
            }
        )*
    };
}

value_from!(&str, String, i32, i64, u32, u64, f64, bool);
