//! PokeAPI record to `Product` conversion.

use pokemart_core::{Price, Product, ProductId, Stat};

use super::types::PokemonRecord;

/// Map a detail record to the display model.
///
/// Type tags keep source order with duplicates dropped; abilities are joined
/// into one comma-separated summary.
#[must_use]
pub fn convert_pokemon(record: PokemonRecord) -> Product {
    let mut types: Vec<String> = Vec::with_capacity(record.types.len());
    for slot in record.types {
        if !types.contains(&slot.kind.name) {
            types.push(slot.kind.name);
        }
    }

    let abilities = record
        .abilities
        .into_iter()
        .map(|slot| slot.ability.name)
        .collect::<Vec<_>>()
        .join(", ");

    let stats = record
        .stats
        .into_iter()
        .map(|slot| Stat {
            name: slot.stat.name,
            base_stat: slot.base_stat,
        })
        .collect();

    Product {
        id: ProductId::new(record.id),
        name: record.name,
        image: record.sprites.front_default,
        price: Price::from_base_experience(record.base_experience),
        types,
        height: record.height,
        weight: record.weight,
        abilities,
        stats,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "base_experience": 64,
        "height": 7,
        "weight": 69,
        "sprites": {
            "front_default": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/1.png",
            "back_default": null
        },
        "types": [
            {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
            {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
        ],
        "abilities": [
            {"ability": {"name": "overgrow", "url": ""}, "is_hidden": false, "slot": 1},
            {"ability": {"name": "chlorophyll", "url": ""}, "is_hidden": true, "slot": 3}
        ],
        "stats": [
            {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": ""}}
        ],
        "moves": []
    }"#;

    #[test]
    fn test_convert_pokemon() {
        let record: PokemonRecord = serde_json::from_str(BULBASAUR).unwrap();
        let product = convert_pokemon(record);

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "bulbasaur");
        assert_eq!(product.price.amount(), 60);
        assert_eq!(product.types, vec!["grass", "poison"]);
        assert_eq!(product.abilities, "overgrow, chlorophyll");
        assert_eq!(product.height, 7);
        assert_eq!(product.weight, 69);
        assert!(product.image.as_deref().is_some_and(|u| u.ends_with("/1.png")));
        assert_eq!(product.stats.len(), 2);
        assert_eq!(product.stats[0].name, "hp");
        assert_eq!(product.stats[0].base_stat, 45);
    }

    #[test]
    fn test_convert_pokemon_null_base_experience_and_sprite() {
        let json = r#"{
            "id": 10,
            "name": "caterpie",
            "base_experience": null,
            "height": 3,
            "weight": 29,
            "sprites": {"front_default": null},
            "types": [{"type": {"name": "bug", "url": ""}}],
            "abilities": []
        }"#;
        let product = convert_pokemon(serde_json::from_str(json).unwrap());

        assert_eq!(product.price.amount(), 100);
        assert!(product.image.is_none());
        assert_eq!(product.abilities, "");
        assert!(product.stats.is_empty());
    }

    #[test]
    fn test_convert_pokemon_missing_base_experience() {
        let json = r#"{
            "id": 11, "name": "metapod", "height": 7, "weight": 99,
            "types": [{"type": {"name": "bug"}}, {"type": {"name": "bug"}}]
        }"#;
        let product = convert_pokemon(serde_json::from_str(json).unwrap());

        assert_eq!(product.price.amount(), 100);
        assert_eq!(product.types, vec!["bug"]);
    }
}
