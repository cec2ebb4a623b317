//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! pm-cli cart add 4 --yes
//! pm-cli cart show
//! pm-cli cart checkout
//! ```
//!
//! Adding needs the catalog, so `add` loads it first. The other commands
//! work on the stored cart alone.

use std::io::{self, Write};

use pokemart_core::{Cart, ProductId, format_money};
use pokemart_storefront::shop::{Action, Outcome};

use super::{CliError, StdinPrompter, load_catalog, open_shop};

/// Print the cart and its total.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or output cannot be
/// written.
pub fn show() -> Result<(), CliError> {
    let shop = open_shop()?;
    write_cart(&mut io::stdout().lock(), shop.cart().cart())?;
    Ok(())
}

/// Add one unit of `id`, asking first unless `yes`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or does not contain
/// `id`.
pub async fn add(id: ProductId, yes: bool) -> Result<(), CliError> {
    let mut shop = open_shop()?;
    load_catalog(&mut shop).await?;

    let outcome = shop
        .dispatch(Action::Add(id), &mut StdinPrompter::new(yes))
        .await;
    if outcome == Outcome::Ignored {
        return Err(CliError::UnknownProduct(id.as_i32()));
    }
    Ok(())
}

/// Remove the line for `id`, then print the cart.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or output cannot be
/// written.
pub async fn remove(id: ProductId) -> Result<(), CliError> {
    let mut shop = open_shop()?;
    shop.dispatch(Action::Remove(id), &mut StdinPrompter::new(true))
        .await;
    write_cart(&mut io::stdout().lock(), shop.cart().cart())?;
    Ok(())
}

/// Empty the cart, asking first unless `yes`.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub async fn clear(yes: bool) -> Result<(), CliError> {
    let mut shop = open_shop()?;
    shop.dispatch(Action::Clear, &mut StdinPrompter::new(yes))
        .await;
    Ok(())
}

/// Print the purchase summary and empty the cart.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub async fn checkout() -> Result<(), CliError> {
    let mut shop = open_shop()?;
    shop.dispatch(Action::Checkout, &mut StdinPrompter::new(true))
        .await;
    Ok(())
}

fn write_cart(out: &mut impl Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
    }

    for line in cart.lines() {
        writeln!(
            out,
            "{} x {} (#{}) @ {} = {}",
            line.quantity,
            line.product.display_name(),
            line.id(),
            line.product.price,
            format_money(line.line_total())
        )?;
    }
    writeln!(out, "Total: {}", cart.totals().display_total())
}
