use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod session_file;

#[derive(Parser)]
#[command(name = "cart")]
#[command(about = "Session shopping cart CLI", long_about = None)]
struct Cli {
    /// Session file standing in for the browser tab's session storage
    #[arg(
        long,
        env = "CART_SESSION",
        default_value = ".cart-session.json",
        global = true
    )]
    session: PathBuf,

    /// Layered config paths in merge order (comma-separated in CART_CONFIG)
    #[arg(long = "config", env = "CART_CONFIG", value_delimiter = ',', global = true)]
    config_paths: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the cart page: compact removed slots and print every line
    Show {
        /// Print the page view model as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Submit the product dialog (new line, or overwrite --slot)
    Add {
        #[arg(long = "product-id")]
        product_id: i64,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        sku: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "")]
        vendor: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long, default_value = "")]
        measurement: String,
        /// Raw quantity input (coerced like a numeric form field)
        #[arg(long)]
        quantity: String,
        #[arg(long, default_value = "")]
        text: String,
        /// Option selection NAME=VALUE (repeatable)
        #[arg(long = "option")]
        options: Vec<String>,
        /// Existing slot the dialog is bound to
        #[arg(long)]
        slot: Option<usize>,
    },

    /// Submit the edit dialog for a cart line
    Edit {
        slot: usize,
        #[arg(long)]
        quantity: String,
        #[arg(long, default_value = "")]
        text: String,
    },

    /// Remove a cart line (edit with quantity 0)
    Remove { slot: usize },

    /// Append a copy of a cart line
    Clone { slot: usize },

    /// Print the cart summary line
    Summary,

    /// Catalog "already in cart" badges
    Badge {
        /// Single product; all products in the cart when omitted
        #[arg(long = "product-id")]
        product_id: Option<i64>,
    },

    /// Variant picker for a product
    Variants {
        #[arg(long = "product-id")]
        product_id: i64,
        /// Requested slot; the first variant when omitted
        #[arg(long, conflicts_with = "new")]
        slot: Option<usize>,
        /// Select the "add new variant" entry
        #[arg(long, default_value_t = false)]
        new: bool,
    },

    /// Dialog view models
    Dialog {
        #[command(subcommand)]
        cmd: DialogCmd,
    },

    /// Post the cart form fields and reset the cart
    Checkout,

    /// Remove the cart key from the session entirely
    Forget,

    /// Project selection cookie check
    Project {
        /// Cookie header, e.g. "project_id=3; project_name=Depot"
        #[arg(long, default_value = "")]
        cookie: String,
        /// Print the cookie assignments that clear the selection
        #[arg(long, default_value_t = false)]
        reset: bool,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> site -> local ...)
        #[arg(required = true)]
        paths: Vec<String>,

        /// Fail instead of warn on config keys nothing reads
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

#[derive(Subcommand)]
enum DialogCmd {
    /// Product (add) dialog
    Product {
        #[arg(long = "product-id")]
        product_id: i64,
        /// Option select names the product form carries (repeatable)
        #[arg(long = "select")]
        selects: Vec<String>,
        /// Bound slot; the first variant when omitted
        #[arg(long)]
        slot: Option<usize>,
    },

    /// Cart line (edit) dialog
    Line { slot: usize },
}

fn main() -> Result<()> {
    // dev-time overrides (CART_SESSION, CART_CONFIG, RUST_LOG)
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();
    let open = || commands::open_session(&cli.session, &cli.config_paths);

    match cli.cmd {
        Commands::Show { json } => commands::cart::show(&mut open()?, json),

        Commands::Add {
            product_id,
            name,
            sku,
            price,
            vendor,
            image,
            measurement,
            quantity,
            text,
            options,
            slot,
        } => {
            let product = cart_schemas::ProductDataset {
                id: product_id,
                name,
                sku,
                price,
                vendor,
                image,
                measurement,
            };
            commands::cart::add(&mut open()?, product, quantity, text, &options, slot)
        }

        Commands::Edit {
            slot,
            quantity,
            text,
        } => commands::cart::edit(&mut open()?, slot, quantity, text),

        Commands::Remove { slot } => {
            commands::cart::edit(&mut open()?, slot, "0".to_string(), String::new())
        }

        Commands::Clone { slot } => commands::cart::clone(&mut open()?, slot),

        Commands::Summary => {
            commands::cart::summary(&open()?);
            Ok(())
        }

        Commands::Badge { product_id } => commands::dialog::badge(&mut open()?, product_id),

        Commands::Variants {
            product_id,
            slot,
            new,
        } => {
            commands::dialog::variants(&open()?, product_id, slot, new);
            Ok(())
        }

        Commands::Dialog { cmd } => match cmd {
            DialogCmd::Product {
                product_id,
                selects,
                slot,
            } => commands::dialog::product_dialog(&open()?, product_id, &selects, slot),
            DialogCmd::Line { slot } => commands::dialog::line_dialog(&mut open()?, slot),
        },

        Commands::Checkout => commands::cart::checkout(&mut open()?),

        Commands::Forget => commands::cart::forget(&mut open()?),

        Commands::Project { cookie, reset } => {
            commands::project::project(&cookie, reset);
            Ok(())
        }

        Commands::ConfigHash { paths, strict } => commands::config::config_hash(&paths, strict),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
