use axum::Router;
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::features::{events, fighters, fights, health, rankings};

pub fn router(db: Database) -> Router {
    Router::new()
        .nest("/fighters", fighters::routes::routes())
        .nest("/events", events::routes::routes())
        .nest("/fights", fights::routes::routes())
        .nest("/rankings", rankings::routes::routes())
        .nest("/health", health::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
