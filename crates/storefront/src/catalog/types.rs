//! Raw PokeAPI response shapes.
//!
//! Only the fields the mapper reads are declared; everything else in the
//! payload is ignored.

use serde::Deserialize;

/// `GET /pokemon?limit=N&offset=0`
#[derive(Debug, Clone, Deserialize)]
pub struct ListingResponse {
    pub results: Vec<NamedResource>,
}

/// A `{name, url}` reference to another resource.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// `GET /pokemon/{id}/`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonRecord {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    /// Null for some forms; absent in trimmed fixtures.
    pub base_experience: Option<u32>,
    pub types: Vec<TypeSlot>,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}
