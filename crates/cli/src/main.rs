//! Boutique CLI - Catalog and shopper state tools.
//!
//! Works directly on the storefront's file-backed storage, so a cart built
//! here is the cart the storefront hydrates on its next start.
//!
//! # Usage
//!
//! ```bash
//! # List electronics
//! boutique-cli catalog list --category electronics
//!
//! # Put two units of product 9 in the cart, then show it
//! boutique-cli --storage-dir .boutique cart add 9 --quantity 2
//! boutique-cli --storage-dir .boutique cart show
//!
//! # Toggle product 5 on the wishlist
//! boutique-cli --storage-dir .boutique wishlist toggle 5
//! ```
//!
//! # Commands
//!
//! - `catalog list` - List products, optionally by category
//! - `cart show|add|set|remove|clear` - Edit the persisted cart
//! - `wishlist show|toggle|clear` - Edit the persisted wishlist

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use boutique_core::ProductId;
use boutique_storefront::config::DEFAULT_CATALOG_PATH;
use clap::{Parser, Subcommand};

mod commands;

use commands::{CommandError, Shop};

#[derive(Parser)]
#[command(name = "boutique-cli")]
#[command(author, version, about = "Boutique CLI tools")]
struct Cli {
    /// Directory holding the persisted cart and wishlist
    #[arg(long, global = true, env = "BOUTIQUE_STORAGE_DIR", default_value = ".boutique")]
    storage_dir: PathBuf,

    /// Catalog document
    #[arg(long, global = true, env = "BOUTIQUE_CATALOG_PATH", default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the persisted wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Category key (`all`, `men clothing`, `women clothing`, `jewelery`, `electronics`)
        #[arg(short, long, default_value = "all")]
        category: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart entries and totals
    Show,
    /// Add a catalog product
    Add {
        product_id: ProductId,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of an entry (below 1 removes it)
    Set {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove an entry
    Remove { product_id: ProductId },
    /// Remove every entry
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlisted products
    Show,
    /// Add a catalog product, or remove it if already present
    Toggle { product_id: ProductId },
    /// Remove every product
    Clear,
}

fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let shop = Shop::new(cli.storage_dir, cli.catalog);

    let output = match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category } => commands::catalog::list(&shop, &category)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop)?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&shop, product_id, quantity)?,
            CartAction::Set {
                product_id,
                quantity,
            } => commands::cart::set(&shop, product_id, quantity)?,
            CartAction::Remove { product_id } => commands::cart::remove(&shop, product_id)?,
            CartAction::Clear => commands::cart::clear(&shop)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&shop)?,
            WishlistAction::Toggle { product_id } => {
                commands::wishlist::toggle(&shop, product_id)?
            }
            WishlistAction::Clear => commands::wishlist::clear(&shop)?,
        },
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}
