use clap::{Parser, Subcommand};
use pizza_service::{app, build_pool, config::Config, run_migrations, seed};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Apply migrations and serve the HTTP API (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Replace all data with sample restaurants and pizzas
    Seed,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pool = build_pool(&config.database_url, config.pool_size)?;
    run_migrations(&pool)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Migrate => {
            info!(database_url = %config.database_url, "migrations up to date");
        }
        Commands::Seed => {
            let mut conn = pool.get()?;
            seed::seed(&mut conn)?;
        }
        Commands::Serve => {
            let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
            info!("Pizza service listening on {}", listener.local_addr()?);

            axum::serve(listener, app(pool)).await?;
        }
    }

    Ok(())
}
