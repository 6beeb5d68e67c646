use anyhow::Context;
use storage::Database;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod routes;

use config::Config;
use features::{events, fighters, fights, health, rankings};

#[derive(OpenApi)]
#[openapi(
    paths(
        fighters::handlers::list_fighters,
        fighters::handlers::get_fighter,
        fighters::handlers::get_fighter_statistics,
        fighters::handlers::create_fighter,
        fighters::handlers::update_fighter,
        fighters::handlers::delete_fighter,
        events::handlers::list_events,
        events::handlers::list_upcoming_events,
        events::handlers::get_event,
        events::handlers::create_event,
        events::handlers::update_event,
        events::handlers::delete_event,
        fights::handlers::list_fights,
        fights::handlers::get_fight,
        fights::handlers::create_fight,
        fights::handlers::update_fight,
        fights::handlers::delete_fight,
        rankings::handlers::list_rankings,
        rankings::handlers::get_ranking,
        rankings::handlers::create_ranking,
        rankings::handlers::update_ranking,
        rankings::handlers::delete_ranking,
        health::health,
    ),
    components(
        schemas(
            storage::dto::fighter::CreateFighterRequest,
            storage::dto::fighter::UpdateFighterRequest,
            storage::dto::fighter::FighterResponse,
            storage::dto::fighter::FighterDetailResponse,
            storage::dto::fighter::FighterStatisticsResponse,
            storage::dto::fighter::FighterSummary,
            storage::dto::fighter::FightStatistics,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::EventResponse,
            storage::dto::event::EventDetailResponse,
            storage::dto::fight::CreateFightRequest,
            storage::dto::fight::UpdateFightRequest,
            storage::dto::fight::FightDetailResponse,
            storage::dto::fight::FightCreatedResponse,
            storage::dto::fight::RankingUpdateReport,
            storage::dto::fight::RankingUpdateStatus,
            storage::dto::ranking::CreateRankingRequest,
            storage::dto::ranking::UpdateRankingRequest,
            storage::dto::ranking::RankingDetailResponse,
            storage::services::ranking_adjustment::RankChange,
            storage::models::Fighter,
            storage::models::Event,
            storage::models::Fight,
            storage::models::Ranking,
            storage::models::WeightClass,
        )
    ),
    tags(
        (name = "fighters", description = "Fighter records and statistics"),
        (name = "events", description = "Events and their fight cards"),
        (name = "fights", description = "Fight results; recording a fight adjusts rankings"),
        (name = "rankings", description = "Weight class rankings"),
        (name = "health", description = "Service health"),
    )
)]
pub(crate) struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting fight records API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, routes::router(db))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
