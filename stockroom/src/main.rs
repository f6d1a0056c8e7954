//! Stockroom CLI
//!
//! Manage a small product inventory from the command line.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! cargo run -p stockroom -- list
//!
//! # Add a product
//! cargo run -p stockroom -- add --name "Desk Lamp" --price 39.99 --image file:///lamp.jpg
//!
//! # Use another data directory
//! STOCKROOM_DATA_DIR=/tmp/shop cargo run -p stockroom -- list
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKROOM_ENV`: Environment (test, development, production)
//! - `STOCKROOM_DATA_DIR`: Data directory (default: ./.stockroom)
//! - `STOCKROOM_STORAGE_KEY`: Blob key (default: @products_storage)
//! - `STOCKROOM_MAX_PRODUCTS`: Product cap (default: 5)

use clap::{Parser, Subcommand};
use stockroom::{App, Config, ProductPatch, Submission};
use stockroom_domain::{Product, ProductDraft, ProductId};
use stockroom_store::ProductRecord;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(about = "Manage a small product inventory", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    List,
    /// Add a new product
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        price: String,

        #[arg(long)]
        image: String,
    },
    /// Edit an existing product
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product
    Delete { id: String },
    /// Print one product as JSON
    Show { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("stockroom=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        data_dir = %config.storage.data_dir.display(),
        max_products = config.catalog.max_products,
        "Stockroom"
    );

    let app = App::open(config).await?;

    match cli.command {
        Commands::List => {
            let (capacity, products) = app.list();
            println!("{}", capacity);
            for product in &products {
                print_row(product);
            }
        },
        Commands::Add { name, price, image } => {
            let submission = app.add(&ProductDraft::new(name, price, image)).await?;
            if let Submission::Added { product, capacity } = &submission {
                println!("Added {} ({})", product.id(), capacity);
            }
            if submission.reached_limit() {
                println!("Maximum product limit reached");
            }
        },
        Commands::Edit {
            id,
            name,
            price,
            image,
        } => {
            let patch = ProductPatch {
                name,
                price,
                image_ref: image,
            };
            let product = app.edit(&ProductId::new(id)?, patch).await?;
            println!("Updated {}", product.id());
        },
        Commands::Delete { id } => {
            let id = ProductId::new(id)?;
            app.delete(&id).await?;
            println!("Deleted {}", id);
        },
        Commands::Show { id } => {
            let product = app.show(&ProductId::new(id)?)?;
            println!("{}", serde_json::to_string_pretty(&ProductRecord::from_domain(&product))?);
        },
    }

    Ok(())
}

fn print_row(product: &Product) {
    println!(
        "{}  {:<50}  {:>14}  {}",
        product.id(),
        product.name().as_str(),
        product.price().formatted(),
        product.image_ref()
    );
}
