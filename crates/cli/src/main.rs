//! Tote CLI - drive the storefront cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two mugs at $9.99
//! tote cart add 1 --quantity 2 --title Mug --price 9.99
//!
//! # Add a product straight from a catalog payload
//! tote cart add-product 7 --catalog products.json
//!
//! # Show the cart with totals
//! tote cart show
//!
//! # Search the catalog
//! tote products --catalog products.json --query lamp
//!
//! # Place the order
//! tote checkout --first-name Ada --last-name Lovelace --email ada@example.com \
//!     --phone 5551234567 --address "1 Main St" --city Springfield --state IL --zip 62701
//! ```
//!
//! # Commands
//!
//! - `cart` - Inspect and change the persisted cart
//! - `products` - List, search and rank catalog products
//! - `checkout` - Validate contact details and place the order
//!
//! The cart lives in `$TOTE_DATA_DIR/cart_v1.json`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tote_core::{Price, ProductId};
use tote_storefront::{CartStorage, FileStore, Store, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "tote")]
#[command(author, version, about = "Tote storefront CLI")]
struct Cli {
    /// Directory holding the persisted cart (overrides `TOTE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// List catalog products
    Products {
        /// Catalog payload file (overrides `TOTE_CATALOG`)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Only products whose title or category contains this text
        #[arg(short, long)]
        query: Option<String>,

        /// Only products rated 4 or higher, best first
        #[arg(long)]
        top_rated: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Place the order for the current cart
    Checkout {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long = "zip")]
        zip_code: String,

        /// Payment method (`card`, `upi`, `cod`)
        #[arg(long = "payment", alias = "payment-method", default_value = "card")]
        payment_method: String,
    },
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show line items and totals
    Show {
        /// Print the stored snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add units of a product by id
    Add {
        id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        price: Option<Price>,

        #[arg(long)]
        image: Option<String>,
    },
    /// Add units of a catalog product, copying its details
    AddProduct {
        id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Catalog payload file (overrides `TOTE_CATALOG`)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Set a line's quantity; zero or below removes it
    Update {
        id: ProductId,

        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Add one unit to a line
    Inc { id: ProductId },
    /// Take one unit from a line, removing it at zero
    Dec { id: ProductId },
    /// Remove a line
    Remove { id: ProductId },
    /// Empty the cart
    Clear,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tote_storefront=info,tote_cli=info".into());

    // JSON logs for log shippers, text otherwise
    let as_json = std::env::var("TOTE_LOG_JSON").is_ok();
    let json_layer = as_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!as_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let open_store = || {
        let storage = CartStorage::new(FileStore::new(config.data_dir.clone()));
        Store::with_storage(storage, config.pricing)
    };

    match cli.command {
        Commands::Cart { action } => {
            let mut store = open_store();
            match action {
                CartCommand::Show { json } => commands::cart::show(&store, json)?,
                CartCommand::Add {
                    id,
                    quantity,
                    title,
                    price,
                    image,
                } => commands::cart::add(
                    &mut store,
                    commands::cart::NewLine {
                        id,
                        quantity,
                        title,
                        price,
                        image,
                    },
                ),
                CartCommand::AddProduct {
                    id,
                    quantity,
                    catalog,
                } => {
                    let path = commands::catalog_path(catalog, &config)?;
                    commands::cart::add_product(&mut store, &path, id, quantity)?;
                }
                CartCommand::Update { id, quantity } => {
                    commands::cart::update(&mut store, id, quantity);
                }
                CartCommand::Inc { id } => commands::cart::increment(&mut store, id),
                CartCommand::Dec { id } => commands::cart::decrement(&mut store, id),
                CartCommand::Remove { id } => commands::cart::remove(&mut store, id),
                CartCommand::Clear => commands::cart::clear(&mut store),
            }
        }
        Commands::Products {
            catalog,
            query,
            top_rated,
            json,
        } => {
            let path = commands::catalog_path(catalog, &config)?;
            let mut store = open_store();
            if let Some(query) = query {
                store.set_query(query.trim());
            }
            commands::products::list(&store, &path, top_rated, json)?;
        }
        Commands::Checkout {
            first_name,
            last_name,
            email,
            phone,
            address,
            city,
            state,
            zip_code,
            payment_method,
        } => {
            let form = tote_storefront::checkout::CheckoutForm {
                first_name,
                last_name,
                email,
                phone,
                address,
                city,
                state,
                zip_code,
                payment_method,
            };
            commands::checkout::place_order(&mut open_store(), &form)?;
        }
    }
    Ok(())
}
