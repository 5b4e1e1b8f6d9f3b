use std::time::Duration;

use clap::Parser;
use migration::{Migrator, MigratorTrait};
use sea_orm::ConnectOptions;
use settings::Database;

mod settings;

#[derive(Parser, Debug)]
#[command(name = "balance_service")]
#[command(about = "Balance and transfer HTTP service")]
struct Cli {
    /// Settings file, without or with the `.toml` extension.
    #[arg(long, env = "BALANCE_CONFIG", default_value = "settings")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "balance_service={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;
    let db = parse_database(&server.database).await?;

    let engine = engine::Engine::builder()
        .database(db.clone())
        .max_retries(settings.ledger.max_retries)
        .build()
        .await?;

    let config = server::ServerConfig {
        request_timeout: Duration::from_millis(server.request_timeout_ms),
        pagination: server::PaginationSettings {
            default_limit: settings.pagination.default_limit,
            max_limit: settings.pagination.max_limit,
            empty_page_is_error: settings.pagination.empty_page_is_error,
        },
    };

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, db, config, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let options = match config {
        Database::Memory => {
            let mut options = ConnectOptions::new("sqlite::memory:");
            options.max_connections(1);
            options
        }
        Database::Sqlite(path) => ConnectOptions::new(format!("sqlite:{}?mode=rwc", path)),
    };

    tracing::info!("connecting to {}", options.get_url());
    let database = sea_orm::Database::connect(options).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
