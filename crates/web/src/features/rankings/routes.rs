use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_ranking, delete_ranking, get_ranking, list_rankings, update_ranking};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_rankings).post(create_ranking))
        .route(
            "/:id",
            get(get_ranking).put(update_ranking).delete(delete_ranking),
        )
}
