//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! pm-cli catalog list --type water
//! pm-cli catalog list --search 25
//! ```

use std::io::{self, Write};

use pokemart_core::Product;
use pokemart_storefront::catalog::{CatalogClient, filter_by_tag, search};
use pokemart_storefront::config::CatalogConfig;

use super::CliError;

/// Load the catalog and print the products matching `tag` or `query`.
///
/// A search wins over a tag filter.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the catalog cannot be
/// loaded, or output cannot be written.
pub async fn list(tag: Option<String>, query: Option<String>) -> Result<(), CliError> {
    let config = CatalogConfig::from_env()?;
    let client = CatalogClient::new(&config)?;

    tracing::info!(listing = %client.listing_url(), "Loading catalog");
    let catalog = client.load_catalog().await?;

    let visible = match (query, tag) {
        (Some(query), _) => search(&catalog, &query),
        (None, Some(tag)) => filter_by_tag(&catalog, &tag),
        (None, None) => catalog.iter().collect(),
    };

    write_catalog(&mut io::stdout().lock(), &visible)?;
    Ok(())
}

fn write_catalog(out: &mut impl Write, products: &[&Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No Pokemon found.");
    }

    for product in products {
        writeln!(
            out,
            "#{:03} {:<12} {:>5}  {:<16} {}",
            product.id.as_i32(),
            product.display_name(),
            product.price.to_string(),
            product.types.join("/"),
            product.dimensions()
        )?;
    }
    writeln!(out, "{} Pokemon", products.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pokemart_core::{Price, ProductId};

    use super::*;

    fn pikachu() -> Product {
        Product {
            id: ProductId::new(25),
            name: "pikachu".to_string(),
            image: None,
            price: Price::new(110),
            types: vec!["electric".to_string()],
            height: 4,
            weight: 60,
            abilities: "static, lightning-rod".to_string(),
            stats: vec![],
        }
    }

    #[test]
    fn test_write_catalog() {
        let product = pikachu();
        let mut out = Vec::new();
        write_catalog(&mut out, &[&product]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("#025 Pikachu"));
        assert!(text.contains("$110"));
        assert!(text.contains("electric"));
        assert!(text.contains("Height: 0.4m | Weight: 6kg"));
        assert!(text.ends_with("1 Pokemon\n"));
    }

    #[test]
    fn test_write_empty_catalog() {
        let mut out = Vec::new();
        write_catalog(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No Pokemon found.\n");
    }
}
