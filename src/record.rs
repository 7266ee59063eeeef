use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Listings keyed by MLS ID.
pub type Listings = BTreeMap<String, ListingRecord>;

/// The facts extracted from one listing card.
///
/// Every card field is a display string that is empty when it couldn't be observed.
/// `lot_size` only ever comes from a listing's detail page.
/// Fields a store carries that this crate doesn't know about end up in `extra`
/// so they survive a load/save cycle. Known fields holding numbers or bools are
/// read as their text, `null` as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub image: String,
    #[serde(deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(deserialize_with = "lenient_string")]
    pub bedrooms: String,
    #[serde(deserialize_with = "lenient_string")]
    pub bathrooms: String,
    #[serde(deserialize_with = "lenient_string")]
    pub square_feet: String,
    #[serde(deserialize_with = "lenient_string")]
    pub details_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub lot_size: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

impl ListingRecord {
    /// Overlays `newer` onto `self` field by field.
    ///
    /// Fields `newer` supplies win; fields it lacks (`lot_size: None`, missing extra keys)
    /// keep their current value. Nothing is ever removed.
    pub fn overlay(&mut self, newer: ListingRecord) {
        let ListingRecord {
            image,
            price,
            bedrooms,
            bathrooms,
            square_feet,
            details_url,
            address,
            lot_size,
            extra,
        } = newer;

        self.image = image;
        self.price = price;
        self.bedrooms = bedrooms;
        self.bathrooms = bathrooms;
        self.square_feet = square_feet;
        self.details_url = details_url;
        self.address = address;
        if lot_size.is_some() {
            self.lot_size = lot_size;
        }
        self.extra.extend(extra);
    }
}
