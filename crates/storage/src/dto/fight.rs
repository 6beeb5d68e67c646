use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::validate_weight_class;
use crate::models::{Event, Fight, Fighter};
use crate::services::ranking_adjustment::{RankAdjustment, RankChange};

/// Fight with its event and both fighters loaded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FightDetailResponse {
    #[serde(flatten)]
    pub fight: Fight,
    pub event: Event,
    pub winner: Fighter,
    pub loser: Fighter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RankingUpdateStatus {
    Applied,
    Skipped,
    Failed,
}

/// What happened to the fighters' rankings when the fight was recorded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankingUpdateReport {
    pub status: RankingUpdateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<RankChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loser: Option<RankChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FightCreatedResponse {
    pub fight: Fight,
    pub ranking_update: RankingUpdateReport,
}

/// Request payload for recording a fight.
///
/// Identifiers are optional at the serde level so a missing id is reported
/// as a descriptive client error by [`CreateFightRequest::into_new_fight`]
/// instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFightRequest {
    pub event_id: Option<Uuid>,
    pub winner_id: Option<Uuid>,
    pub loser_id: Option<Uuid>,

    #[validate(range(min = 1, message = "Last round must be at least 1"))]
    pub last_round: i32,

    #[validate(length(
        min = 2,
        max = 50,
        message = "Referee must be between 2 and 50 characters"
    ))]
    pub referee: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Win condition is required"))]
    pub win_condition: String,

    /// Ranking category to adjust; defaults to the winner's weight class
    #[validate(custom(function = "validate_weight_class"))]
    pub weight_class: Option<String>,
}

/// A fight request whose identifiers are present and consistent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFight {
    pub event_id: Uuid,
    pub winner_id: Uuid,
    pub loser_id: Uuid,
    pub last_round: i32,
    pub referee: Option<String>,
    pub win_condition: String,
    pub weight_class: Option<String>,
}

impl CreateFightRequest {
    pub fn into_new_fight(self) -> Result<NewFight, String> {
        let (Some(event_id), Some(winner_id), Some(loser_id)) =
            (self.event_id, self.winner_id, self.loser_id)
        else {
            return Err("Missing required fields: event_id, winner_id and loser_id".to_string());
        };

        if winner_id == loser_id {
            return Err("Winner and loser can't be the same".to_string());
        }

        Ok(NewFight {
            event_id,
            winner_id,
            loser_id,
            last_round: self.last_round,
            referee: self.referee,
            win_condition: self.win_condition,
            weight_class: self.weight_class,
        })
    }
}

/// Request payload for updating a recorded fight. Rankings are not re-adjusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFightRequest {
    pub event_id: Option<Uuid>,
    pub winner_id: Option<Uuid>,
    pub loser_id: Option<Uuid>,

    #[validate(range(min = 1))]
    pub last_round: Option<i32>,

    #[validate(length(min = 2, max = 50))]
    pub referee: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub win_condition: Option<String>,
}

impl UpdateFightRequest {
    /// Winner and loser ids once this update is applied to `existing`
    pub fn fighters_after(&self, existing: &Fight) -> (Uuid, Uuid) {
        (
            self.winner_id.unwrap_or(existing.winner_id),
            self.loser_id.unwrap_or(existing.loser_id),
        )
    }

    pub fn check_against(&self, existing: &Fight) -> Result<(), String> {
        let (winner_id, loser_id) = self.fighters_after(existing);
        if winner_id == loser_id {
            return Err("Winner and loser can't be the same".to_string());
        }
        Ok(())
    }
}

impl From<&RankAdjustment> for RankingUpdateReport {
    fn from(adjustment: &RankAdjustment) -> Self {
        match adjustment {
            RankAdjustment::Applied { winner, loser } => Self {
                status: RankingUpdateStatus::Applied,
                winner: Some(winner.clone()),
                loser: Some(loser.clone()),
                message: None,
            },
            RankAdjustment::MissingRanking { fighter_id } => Self {
                status: RankingUpdateStatus::Skipped,
                winner: None,
                loser: None,
                message: Some(format!(
                    "Fighter {} has no ranking in this category",
                    fighter_id
                )),
            },
            RankAdjustment::SameFighter => Self {
                status: RankingUpdateStatus::Skipped,
                winner: None,
                loser: None,
                message: Some("Winner and loser are the same fighter".to_string()),
            },
            RankAdjustment::Failed(_) => Self {
                status: RankingUpdateStatus::Failed,
                winner: None,
                loser: None,
                message: Some("Rankings could not be updated".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    fn request() -> CreateFightRequest {
        CreateFightRequest {
            event_id: Some(Uuid::new_v4()),
            winner_id: Some(Uuid::new_v4()),
            loser_id: Some(Uuid::new_v4()),
            last_round: 3,
            referee: Some("Herb Dean".to_string()),
            win_condition: "KO".to_string(),
            weight_class: None,
        }
    }

    #[test]
    fn test_into_new_fight() {
        let req = request();
        let (winner, loser) = (req.winner_id.unwrap(), req.loser_id.unwrap());

        let fight = req.into_new_fight().unwrap();
        assert_eq!(fight.winner_id, winner);
        assert_eq!(fight.loser_id, loser);
        assert_eq!(fight.last_round, 3);
    }

    #[test]
    fn test_missing_ids_rejected() {
        for req in [
            CreateFightRequest {
                event_id: None,
                ..request()
            },
            CreateFightRequest {
                winner_id: None,
                ..request()
            },
            CreateFightRequest {
                loser_id: None,
                ..request()
            },
        ] {
            let err = req.into_new_fight().unwrap_err();
            assert!(err.starts_with("Missing required fields"));
        }
    }

    #[test]
    fn test_same_winner_and_loser_rejected() {
        let fighter = Uuid::new_v4();
        let req = CreateFightRequest {
            winner_id: Some(fighter),
            loser_id: Some(fighter),
            ..request()
        };

        assert_eq!(
            req.into_new_fight().unwrap_err(),
            "Winner and loser can't be the same"
        );
    }

    #[test]
    fn test_field_validation() {
        let req = CreateFightRequest {
            last_round: 0,
            referee: Some("X".to_string()),
            weight_class: Some("openweight".to_string()),
            ..request()
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("last_round"));
        assert!(fields.contains_key("referee"));
        assert!(fields.contains_key("weight_class"));
    }

    #[test]
    fn test_update_cannot_make_fighter_beat_themselves() {
        let now = chrono::Utc::now().naive_utc();
        let existing = Fight {
            fight_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            winner_id: Uuid::new_v4(),
            loser_id: Uuid::new_v4(),
            last_round: 2,
            referee: None,
            win_condition: "Decision".to_string(),
            created_at: now,
            updated_at: now,
        };

        let swap_loser = UpdateFightRequest {
            loser_id: Some(existing.winner_id),
            ..Default::default()
        };
        assert!(swap_loser.check_against(&existing).is_err());

        let swap_both = UpdateFightRequest {
            winner_id: Some(existing.loser_id),
            loser_id: Some(existing.winner_id),
            ..Default::default()
        };
        assert!(swap_both.check_against(&existing).is_ok());
        assert_eq!(
            swap_both.fighters_after(&existing),
            (existing.loser_id, existing.winner_id)
        );
    }

    #[test]
    fn test_report_for_applied_adjustment() {
        let winner = RankChange {
            ranking_id: Uuid::new_v4(),
            fighter_id: Uuid::new_v4(),
            previous_rank: 3,
            new_rank: 2,
        };
        let loser = RankChange {
            ranking_id: Uuid::new_v4(),
            fighter_id: Uuid::new_v4(),
            previous_rank: 5,
            new_rank: 6,
        };

        let report = RankingUpdateReport::from(&RankAdjustment::Applied {
            winner: winner.clone(),
            loser,
        });
        assert_eq!(report.status, RankingUpdateStatus::Applied);
        assert_eq!(report.winner, Some(winner));
        assert!(report.message.is_none());
    }

    #[test]
    fn test_report_hides_storage_details() {
        let report = RankingUpdateReport::from(&RankAdjustment::Failed(
            StorageError::ConstraintViolation("secret".to_string()),
        ));
        assert_eq!(report.status, RankingUpdateStatus::Failed);
        assert!(!report.message.unwrap().contains("secret"));
    }
}
