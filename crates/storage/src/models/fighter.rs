use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fighter {
    pub fighter_id: Uuid,
    pub name: String,
    pub wins: i32,
    pub losses: i32,
    pub knockouts: i32,
    pub submissions: i32,
    pub weight_class: String,
    pub nationality: Option<String>,
    pub team: Option<String>,
    pub nickname: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub last_weight_grams: Option<i32>,
    pub height_cm: Option<i32>,
    pub image_path: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
