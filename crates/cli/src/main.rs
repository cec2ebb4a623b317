//! Pokemart CLI - Browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, optionally filtered
//! pm-cli catalog list
//! pm-cli catalog list --type fire
//! pm-cli catalog list --search pika
//!
//! # Manage the cart
//! pm-cli cart show
//! pm-cli cart add 25
//! pm-cli cart add 25 --yes
//! pm-cli cart remove 25
//! pm-cli cart clear
//! pm-cli cart checkout
//! ```
//!
//! # Commands
//!
//! - `catalog list` - Load the catalog from PokeAPI and print it
//! - `cart` - Show or change the cart shared with the storefront server
//!
//! The cart lives in the same store file as the server's
//! (`POKEMART_STORE_PATH`); run one or the other at a time.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use pokemart_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "pm-cli")]
#[command(author, version, about = "Pokemart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load and print the catalog
    List {
        /// Only show products with this type (`all` for everything)
        #[arg(short = 't', long = "type")]
        tag: Option<String>,

        /// Name substring or exact number
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart and its total
    Show,
    /// Add one unit of a product
    Add {
        /// Product number
        id: ProductId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove a product line
    Remove {
        /// Product number
        id: ProductId,
    },
    /// Empty the cart
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print a purchase summary and empty the cart
    Checkout,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing on stderr so stdout stays clean for output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pokemart_storefront=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), commands::CliError> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { tag, search } => {
                commands::catalog::list(tag, search).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add { id, yes } => commands::cart::add(id, yes).await?,
            CartAction::Remove { id } => commands::cart::remove(id).await?,
            CartAction::Clear { yes } => commands::cart::clear(yes).await?,
            CartAction::Checkout => commands::cart::checkout().await?,
        },
    }
    Ok(())
}
