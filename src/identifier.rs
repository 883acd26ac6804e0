//! Station, stop and location references accepted by the resource operations.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// A stop or location given either as a plain id or as a structured value
/// carrying an `id` field.
///
/// Anything returned by [`Client::locations`](crate::Client::locations) can be
/// passed back as a `Reference`.
///
/// # Examples
///
/// ```
/// use hafas_rest_client::Identifier;
/// use serde_json::json;
///
/// assert_eq!(Identifier::from("900058101").id(), Some("900058101"));
///
/// let stop = json!({"type": "stop", "id": "900058101", "name": "S Südkreuz"});
/// assert_eq!(Identifier::from(stop).id(), Some("900058101"));
///
/// assert_eq!(Identifier::from("").id(), None);
/// assert_eq!(Identifier::from(None::<&str>).id(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    /// A bare id string.
    Plain(String),
    /// A structured value, e.g. a stop, station or [`Location`].
    Reference(Value),
}

impl Identifier {
    /// Returns the id, or `None` if it is absent or empty.
    pub fn id(&self) -> Option<&str> {
        let id = match self {
            Identifier::Plain(id) => id.as_str(),
            Identifier::Reference(value) => value.get("id")?.as_str()?,
        };
        (!id.is_empty()).then_some(id)
    }

    /// Returns `true` if nothing was given at all: an empty string or `null`.
    pub fn is_missing(&self) -> bool {
        match self {
            Identifier::Plain(id) => id.is_empty(),
            Identifier::Reference(value) => value.is_null(),
        }
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Identifier::Plain(id) => serializer.serialize_str(id),
            Identifier::Reference(value) => value.serialize(serializer),
        }
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Identifier::Plain(id.to_string())
    }
}

impl From<String> for Identifier {
    fn from(id: String) -> Self {
        Identifier::Plain(id)
    }
}

impl From<&String> for Identifier {
    fn from(id: &String) -> Self {
        Identifier::Plain(id.clone())
    }
}

impl From<Value> for Identifier {
    fn from(value: Value) -> Self {
        match value {
            Value::String(id) => Identifier::Plain(id),
            other => Identifier::Reference(other),
        }
    }
}

impl From<&Value> for Identifier {
    fn from(value: &Value) -> Self {
        Identifier::from(value.clone())
    }
}

impl From<Location> for Identifier {
    fn from(location: Location) -> Self {
        Identifier::from(&location)
    }
}

impl From<&Location> for Identifier {
    fn from(location: &Location) -> Self {
        Identifier::Reference(serde_json::to_value(location).unwrap_or(Value::Null))
    }
}

impl<T> From<Option<T>> for Identifier
where
    T: Into<Identifier>,
{
    fn from(id: Option<T>) -> Self {
        id.map(Into::into)
            .unwrap_or(Identifier::Reference(Value::Null))
    }
}

/// A geographic point, an address or a point of interest.
///
/// Unset fields are left out of the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// Always `"location"`.
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// POI id, if this is a point of interest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name, for points of interest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Latitude in decimal degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Whether this is a point of interest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poi: Option<bool>,
}

impl Location {
    /// A bare coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            kind: "location",
            id: None,
            name: None,
            address: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
            poi: None,
        }
    }

    /// Attaches a street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Marks this location as a point of interest.
    pub fn poi(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self.name = Some(name.into());
        self.poi = Some(true);
        self
    }
}

/// A rectangular area used by [`Client::radar`](crate::Client::radar).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub north: f64,
    pub west: f64,
    pub south: f64,
    pub east: f64,
}
