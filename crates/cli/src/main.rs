//! YuvaKart CLI - Cart and checkout tools.
//!
//! Drives the cart store over file-backed storage, the way the storefront
//! drives it over browser storage.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product
//! yk-cli cart add --id 1 --name "Turmeric 200g" --price 120 --quantity 2
//!
//! # Show the cart
//! yk-cli cart show
//!
//! # Set a quantity (0 or less removes the item)
//! yk-cli cart update --id 1 --quantity 3
//!
//! # Print the order payload for checkout
//! yk-cli checkout draft --name "Asha Rao" --phone 9876543210 --address "12 MG Road, Guntur"
//! ```
//!
//! # Commands
//!
//! - `cart` - Show, add, update, remove, clear
//! - `checkout` - Summary, order draft, UPI payment link, complete
//!
//! Configuration comes from `YUVAKART_*` environment variables; see
//! `yuvakart_cart::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yuvakart_cart::CartConfig;
use yuvakart_core::{CategoryId, Price, ProductId};

mod commands;

#[derive(Parser)]
#[command(name = "yk-cli")]
#[command(author, version, about = "YuvaKart cart tools")]
struct Cli {
    /// Storage directory (overrides `YUVAKART_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and modify the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Checkout totals and order payloads
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart items and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        /// Product name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: Price,

        /// Units to add
        #[arg(short, long, default_value_t = 1, allow_hyphen_values = true)]
        quantity: i64,

        /// Units in stock
        #[arg(long, default_value_t = 0)]
        stock: u32,

        /// Category ID
        #[arg(long, default_value = "0")]
        category: CategoryId,

        /// Product description
        #[arg(long)]
        description: Option<String>,
    },
    /// Set the quantity of a cart item (0 or less removes it)
    Update {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        /// New quantity
        #[arg(short, long, allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        #[arg(long)]
        id: ProductId,
    },
    /// Delete the stored cart
    Clear,
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Show subtotal, shipping, and total
    Summary,
    /// Print the order-create JSON payload
    Draft {
        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Customer phone number
        #[arg(short, long)]
        phone: String,

        /// Shipping address
        #[arg(short, long)]
        address: String,

        /// Customer email
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Print the UPI payment link for the current total
    Upi,
    /// Clear the cart after the order has been accepted
    Complete,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "yk_cli=info,yuvakart_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config),
            CartAction::Add {
                id,
                name,
                price,
                quantity,
                stock,
                category,
                description,
            } => {
                let product = commands::cart::ProductArgs {
                    id,
                    name,
                    price,
                    stock,
                    category,
                    description,
                };
                commands::cart::add(&config, product, quantity);
            }
            CartAction::Update { id, quantity } => {
                commands::cart::update(&config, id, quantity);
            }
            CartAction::Remove { id } => commands::cart::remove(&config, id),
            CartAction::Clear => commands::cart::clear(&config),
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Summary => commands::checkout::summary(&config),
            CheckoutAction::Draft {
                name,
                phone,
                address,
                email,
            } => {
                let customer = yuvakart_cart::Customer {
                    name,
                    phone,
                    email,
                    shipping_address: address,
                };
                commands::checkout::draft(&config, &customer)?;
            }
            CheckoutAction::Upi => commands::checkout::upi(&config)?,
            CheckoutAction::Complete => commands::checkout::complete(&config)?,
        },
    }
    Ok(())
}
