//! Procurement backend HTTP server

mod config;

use clap::Parser;
use procurement_service::api::rest::{router, AppState};
use procurement_service::domain::{AccessControl, BidService, EmployeeService, TenderService};
use procurement_service::infra::storage::migrations::Migrator;
use procurement_service::infra::storage::repositories::{
    SeaOrmBidRepository, SeaOrmEmployeeRepository, SeaOrmFeedbackRepository,
    SeaOrmOrganizationRepository, SeaOrmTenderRepository,
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "procurement-server", about = "Tender/bid procurement backend")]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = config::AppConfig::load(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .init();

    tracing::info!(url = %config::redact_url(&config.database.url), "connecting to database");
    let db: DatabaseConnection = Database::connect(&config.database.url).await?;
    Migrator::up(&db, None).await?;

    let state = build_state(Arc::new(db));
    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn build_state(db: Arc<DatabaseConnection>) -> AppState {
    let employees = Arc::new(SeaOrmEmployeeRepository::new(db.clone()));
    let organizations = Arc::new(SeaOrmOrganizationRepository::new(db.clone()));
    let tenders = Arc::new(SeaOrmTenderRepository::new(db.clone()));
    let bids = Arc::new(SeaOrmBidRepository::new(db.clone()));
    let feedback = Arc::new(SeaOrmFeedbackRepository::new(db));

    let access = AccessControl::new(employees.clone(), organizations);

    AppState {
        employees: Arc::new(EmployeeService::new(employees)),
        tenders: Arc::new(TenderService::new(tenders.clone(), access.clone())),
        bids: Arc::new(BidService::new(bids, tenders, feedback, access)),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install shutdown signal handler");
    }
    tracing::info!("shutdown signal received");
}
