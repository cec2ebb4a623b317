//! Catalog products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A purchasable catalog entry.
///
/// Created once per catalog load and never mutated afterwards. Field names
/// match the persisted cart snapshot, which stores a frozen copy of the
/// product inside every cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier assigned by the remote source.
    pub id: ProductId,
    /// Lower-case source name, e.g. `"bulbasaur"`.
    pub name: String,
    /// Front sprite URL, when the source has one.
    pub image: Option<String>,
    /// Unit price derived at load time.
    pub price: Price,
    /// Category tags in source order, duplicates removed.
    pub types: Vec<String>,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Ability names joined with `", "`.
    pub abilities: String,
    /// Base stats in source order.
    #[serde(default)]
    pub stats: Vec<Stat>,
}

/// A single base stat, e.g. `hp: 45`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub base_stat: u32,
}

impl Product {
    /// Name with the first character upper-cased, e.g. `"Bulbasaur"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }

    /// Whether the product carries `tag`.
    #[must_use]
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }

    /// Height in metres, e.g. `"0.7"` or `"1"`.
    #[must_use]
    pub fn height_metres(&self) -> String {
        tenths(self.height)
    }

    /// Weight in kilograms, e.g. `"6.9"`.
    #[must_use]
    pub fn weight_kilograms(&self) -> String {
        tenths(self.weight)
    }

    /// One-line physical summary, e.g. `"Height: 0.7m | Weight: 6.9kg"`.
    #[must_use]
    pub fn dimensions(&self) -> String {
        format!(
            "Height: {}m | Weight: {}kg",
            self.height_metres(),
            self.weight_kilograms()
        )
    }
}

/// Upper-case the first character of `s`, leaving the rest unchanged.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn tenths(value: u32) -> String {
    Decimal::new(i64::from(value), 1).normalize().to_string()
}
