use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fight {
    pub fight_id: Uuid,
    pub event_id: Uuid,
    pub winner_id: Uuid,
    pub loser_id: Uuid,
    pub last_round: i32,
    pub referee: Option<String>,
    pub win_condition: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
