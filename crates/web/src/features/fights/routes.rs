use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_fight, delete_fight, get_fight, list_fights, update_fight};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_fights).post(create_fight))
        .route("/:id", get(get_fight).put(update_fight).delete(delete_fight))
}
