use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A fighter's standing within one weight class. Lower is better, 1 is the top spot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ranking {
    pub ranking_id: Uuid,
    pub fighter_id: Uuid,
    pub category: String,
    pub rank: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
