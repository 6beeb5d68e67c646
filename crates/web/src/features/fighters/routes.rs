use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    create_fighter, delete_fighter, get_fighter, get_fighter_statistics, list_fighters,
    update_fighter,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_fighters).post(create_fighter))
        .route(
            "/:id",
            get(get_fighter).put(update_fighter).delete(delete_fighter),
        )
        .route("/:id/statistics", get(get_fighter_statistics))
}
