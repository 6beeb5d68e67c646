use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::validate_weight_class;
use crate::models::{Fighter, Ranking};

/// Ranking together with the ranked fighter
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankingDetailResponse {
    #[serde(flatten)]
    pub ranking: Ranking,
    pub fighter: Fighter,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RankingFilter {
    /// Only return rankings in this weight class
    pub category: Option<String>,
}

impl RankingFilter {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(category) = &self.category {
            validate_weight_class(category).map_err(|_| format!("Unknown category: {}", category))?;
        }
        Ok(())
    }
}

/// Request payload for creating a new ranking
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRankingRequest {
    pub fighter_id: Uuid,

    #[validate(custom(function = "validate_weight_class"))]
    pub category: String,

    #[validate(range(min = 1, message = "Rank must be at least 1"))]
    pub rank: i32,
}

/// Request payload for updating an existing ranking
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRankingRequest {
    #[validate(custom(function = "validate_weight_class"))]
    pub category: Option<String>,

    #[validate(range(min = 1, message = "Rank must be at least 1"))]
    pub rank: Option<i32>,
}
