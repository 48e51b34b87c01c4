//! Shop Pilot CLI - Database migrations and store management.
//!
//! # Usage
//!
//! ```bash
//! # Run catalog database migrations
//! sp-cli migrate
//!
//! # Stores owned by the caller
//! sp-cli stores list
//! sp-cli stores create -n "Acme"
//!
//! # Store-scoped resources
//! sp-cli billboards -s <store-id> list
//! sp-cli colors -s <store-id> create --json '{"name": "Red", "value": "#ff0000"}'
//! sp-cli products -s <store-id> delete <product-id> --yes
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `stores` - List, create, rename and delete stores
//! - `billboards`, `categories`, `colors`, `sizes`, `products` - Manage store resources

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use shop_pilot_cli::{ApiClient, Billboards, Categories, Colors, Products, Sizes};
use shop_pilot_core::StoreId;

mod commands;

#[derive(Parser)]
#[command(name = "sp-cli")]
#[command(author, version, about = "Shop Pilot CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage stores
    Stores {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Manage billboards
    Billboards(ResourceArgs),
    /// Manage categories
    Categories(ResourceArgs),
    /// Manage colors
    Colors(ResourceArgs),
    /// Manage sizes
    Sizes(ResourceArgs),
    /// Manage products
    Products(ResourceArgs),
}

#[derive(Subcommand)]
enum StoreAction {
    /// List stores owned by the caller
    List,
    /// Show one store
    Get { id: StoreId },
    /// Create a new store
    Create {
        /// Store name
        #[arg(short, long)]
        name: String,
    },
    /// Rename a store
    Rename {
        id: StoreId,

        /// New store name
        #[arg(short, long)]
        name: String,
    },
    /// Delete a store
    Delete {
        id: StoreId,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct ResourceArgs {
    /// Store the resources belong to
    #[arg(short, long)]
    store: StoreId,

    #[command(subcommand)]
    action: ResourceAction,
}

#[derive(Subcommand)]
enum ResourceAction {
    /// List everything in the store, newest first
    List,
    /// Show one record
    Get { id: Uuid },
    /// Create a record from a JSON body
    Create {
        /// Request body, e.g. '{"name": "Small", "value": "S"}'
        #[arg(long)]
        json: String,
    },
    /// Overwrite a record with a JSON body
    Update {
        id: Uuid,

        /// Request body with every required field
        #[arg(long)]
        json: String,
    },
    /// Delete a record
    Delete {
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Stores { action } => {
            let client = ApiClient::from_env();
            match action {
                StoreAction::List => commands::stores::list(&client).await?,
                StoreAction::Get { id } => commands::stores::get(&client, id).await?,
                StoreAction::Create { name } => commands::stores::create(&client, &name).await?,
                StoreAction::Rename { id, name } => {
                    commands::stores::rename(&client, id, &name).await?;
                }
                StoreAction::Delete { id, yes } => {
                    commands::stores::delete(&client, id, yes).await?;
                }
            }
        }
        Commands::Billboards(args) => resource::<Billboards>(args).await?,
        Commands::Categories(args) => resource::<Categories>(args).await?,
        Commands::Colors(args) => resource::<Colors>(args).await?,
        Commands::Sizes(args) => resource::<Sizes>(args).await?,
        Commands::Products(args) => resource::<Products>(args).await?,
    }
    Ok(())
}

async fn resource<R: shop_pilot_cli::Resource>(
    args: ResourceArgs,
) -> Result<(), commands::CommandError> {
    use commands::resources;

    let client = ApiClient::from_env();
    let store = args.store;

    match args.action {
        ResourceAction::List => resources::list::<R>(&client, store).await,
        ResourceAction::Get { id } => resources::get::<R>(&client, store, id.into()).await,
        ResourceAction::Create { json } => resources::create::<R>(&client, store, &json).await,
        ResourceAction::Update { id, json } => {
            resources::update::<R>(&client, store, id.into(), &json).await
        }
        ResourceAction::Delete { id, yes } => {
            resources::delete::<R>(&client, store, id.into(), yes).await
        }
    }
}
