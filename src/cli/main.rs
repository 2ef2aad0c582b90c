use anyhow::Context;
use catalog_search::{
    config::Config,
    search::SearchService,
    seed::run_seed,
    state::create_store,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Catalog search CLI", long_about = None)]
struct Cli {
    /// Configuration file (overrides CONFIG_PATH)
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the catalog with the seed products
    Seed,

    /// Search the catalog and print the response
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// List products
    List {
        #[arg(short, long, default_value = "20")]
        limit: u32,

        #[arg(short, long, default_value = "0")]
        offset: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        std::env::set_var("CONFIG_PATH", path);
    }
    let config = Config::load().context("Failed to load configuration")?;
    let store = create_store(&config.storage).context("Failed to open product store")?;

    match cli.command {
        Commands::Seed => {
            let count = run_seed(store.as_ref()).await?;
            println!("Inserted {} products", count);
        }

        Commands::Search { query } => {
            let service = SearchService::new(store, config.search);
            let response = service.search(Some(&query)).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::List { limit, offset } => {
            anyhow::ensure!(limit > 0, "limit must be greater than zero");
            let page = store.find_all(limit, offset).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}
