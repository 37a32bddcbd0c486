//! GameVerse CLI - drive the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! gv-cli catalog --type accessories --sort price-asc
//!
//! # Fill the cart
//! gv-cli cart add "Starfall Odyssey"
//! gv-cli cart quantity "Starfall Odyssey" 2
//! gv-cli cart show --delivery express
//!
//! # Sign up and in
//! gv-cli account signup player@gameverse.gg hunter22
//! gv-cli account login player@gameverse.gg hunter22
//!
//! # Check out
//! gv-cli checkout --first-name Ada --last-name Lovelace ... --card-number "4242 4242 4242 4242"
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products for a filter selection
//! - `cart` - Show or change the cart
//! - `account` - Sign up, log in, log out
//! - `checkout` - Run the checkout wizard end to end
//!
//! State persists in the JSON file named by `GAMEVERSE_STORE_PATH`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gameverse_storefront::config::{LogFormat, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "gv-cli")]
#[command(author, version, about = "GameVerse storefront CLI")]
struct Cli {
    /// Store file (overrides `GAMEVERSE_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Catalog YAML file (defaults to the built-in catalog)
    #[arg(long, global = true)]
    catalog_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products for a filter selection
    Catalog(CatalogArgs),
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the prototype account session
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Run the checkout wizard
    Checkout(CheckoutArgs),
}

#[derive(Args)]
struct CatalogArgs {
    /// Product type (`all`, `games`, `accessories`)
    #[arg(long = "type", default_value = "all")]
    product_type: String,

    /// Price range (`any`, `under-50`, `50-100`, `over-100`)
    #[arg(long, default_value = "any")]
    price: String,

    /// Sort order (`featured`, `price-asc`, `price-desc`)
    #[arg(long, default_value = "featured")]
    sort: String,

    /// Search term matched against title and category
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show lines and totals
    Show {
        /// Delivery tier (`standard`, `express`, `overnight`)
        #[arg(long, default_value = "standard")]
        delivery: String,
    },
    /// Add a product (catalog product, or a custom line with --price)
    Add {
        /// Product name
        product: String,

        /// Unit price, e.g. `$59.99`
        #[arg(long)]
        price: Option<String>,

        /// Category text
        #[arg(long, default_value = "")]
        category: String,

        /// Image reference
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Remove a product
    Remove {
        /// Product name
        product: String,
    },
    /// Change a product's quantity by a delta
    Quantity {
        /// Product name
        product: String,

        /// Amount to add (negative to reduce)
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an account
    Signup { email: String, password: String },
    /// Sign in
    Login { email: String, password: String },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
}

#[derive(Args)]
struct CheckoutArgs {
    /// Delivery tier (`standard`, `express`, `overnight`)
    #[arg(long, default_value = "standard")]
    delivery: String,

    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    street: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    state: String,
    #[arg(long, default_value = "")]
    zip: String,
    #[arg(long, default_value = "")]
    country: String,

    /// Card number (at least 19 characters, spaces included)
    #[arg(long, default_value = "")]
    card_number: String,
    /// Expiry as `MM/YY`
    #[arg(long, default_value = "")]
    expiry: String,
    #[arg(long, default_value = "")]
    cvv: String,
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gameverse_cli=info,gameverse_storefront=info".into());

    let json = format == LogFormat::Json;
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().without_time());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, mut config: StorefrontConfig) -> Result<(), commands::CliError> {
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    let catalog = commands::catalog::load(cli.catalog_file.as_deref())?;
    let mut shop = commands::open(&config, catalog);

    match cli.command {
        Commands::Catalog(args) => {
            commands::catalog::list(
                &mut shop,
                &args.product_type,
                &args.price,
                &args.sort,
                &args.search,
            );
        }
        Commands::Cart { action } => match action {
            CartAction::Show { delivery } => commands::cart::show(&mut shop, &delivery),
            CartAction::Add {
                product,
                price,
                category,
                image,
            } => commands::cart::add(&mut shop, &product, price.as_deref(), &category, &image)?,
            CartAction::Remove { product } => commands::cart::remove(&mut shop, &product)?,
            CartAction::Quantity { product, delta } => {
                commands::cart::quantity(&mut shop, &product, delta)?;
            }
        },
        Commands::Account { action } => match action {
            AccountAction::Signup { email, password } => {
                commands::account::signup(&mut shop, &email, &password)?;
            }
            AccountAction::Login { email, password } => {
                commands::account::login(&mut shop, &email, &password)?;
            }
            AccountAction::Logout => commands::account::logout(&mut shop)?,
            AccountAction::Whoami => commands::account::whoami(&shop),
        },
        Commands::Checkout(args) => commands::checkout::run(&mut shop, args.into())?,
    }
    Ok(())
}

impl From<CheckoutArgs> for commands::checkout::CheckoutInput {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            delivery: args.delivery,
            address: gameverse_storefront::services::checkout::DeliveryForm {
                first_name: args.first_name,
                last_name: args.last_name,
                email: args.email,
                phone: args.phone,
                street: args.street,
                city: args.city,
                state: args.state,
                zip: args.zip,
                country: args.country,
            },
            payment: gameverse_storefront::services::checkout::PaymentForm {
                card_number: args.card_number,
                expiry: args.expiry,
                cvv: args.cvv,
            },
        }
    }
}
