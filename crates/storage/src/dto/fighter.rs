use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::validate_weight_class;
use crate::models::{Fight, Fighter, Ranking};

/// Response containing basic fighter information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FighterResponse {
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
    pub date_of_birth: Option<NaiveDate>,
    pub last_weight_grams: Option<i32>,
    pub height_cm: Option<i32>,
    pub image_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fighter together with their rankings and recorded fights
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FighterDetailResponse {
    #[serde(flatten)]
    pub fighter: FighterResponse,
    pub rankings: Vec<Ranking>,
    pub fights_as_winner: Vec<Fight>,
    pub fights_as_loser: Vec<Fight>,
}

impl FighterDetailResponse {
    /// Attach to each fighter the rankings and fights that reference them,
    /// keeping the order of `rankings` and `fights`
    pub fn group(fighters: Vec<Fighter>, rankings: &[Ranking], fights: &[Fight]) -> Vec<Self> {
        fighters
            .into_iter()
            .map(|fighter| {
                let id = fighter.fighter_id;
                Self {
                    fighter: FighterResponse::from(fighter),
                    rankings: rankings
                        .iter()
                        .filter(|r| r.fighter_id == id)
                        .cloned()
                        .collect(),
                    fights_as_winner: fights
                        .iter()
                        .filter(|f| f.winner_id == id)
                        .cloned()
                        .collect(),
                    fights_as_loser: fights
                        .iter()
                        .filter(|f| f.loser_id == id)
                        .cloned()
                        .collect(),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FighterSummary {
    pub fighter_id: Uuid,
    pub name: String,
}

/// Win/loss record computed from recorded fights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FightStatistics {
    pub total_fights: i64,
    pub wins: i64,
    pub losses: i64,
}

impl FightStatistics {
    pub fn new(wins: i64, losses: i64) -> Self {
        Self {
            total_fights: wins + losses,
            wins,
            losses,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FighterStatisticsResponse {
    pub fighter: FighterSummary,
    pub statistics: FightStatistics,
}

/// Request payload for creating a new fighter
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFighterRequest {
    #[validate(length(
        min = 2,
        max = 50,
        message = "Name must be between 2 and 50 characters"
    ))]
    pub name: String,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub wins: i32,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub losses: i32,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub knockouts: i32,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub submissions: i32,

    #[validate(custom(function = "validate_weight_class"))]
    pub weight_class: String,

    #[validate(length(max = 255))]
    pub nationality: Option<String>,

    #[validate(length(max = 255))]
    pub team: Option<String>,

    #[validate(length(max = 255))]
    pub nickname: Option<String>,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(range(min = 0))]
    pub last_weight_grams: Option<i32>,

    #[validate(range(min = 0))]
    pub height_cm: Option<i32>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_path: Option<String>,
}

/// Request payload for updating an existing fighter
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFighterRequest {
    #[validate(length(min = 2, max = 50))]
    pub name: Option<String>,

    #[validate(range(min = 0))]
    pub wins: Option<i32>,

    #[validate(range(min = 0))]
    pub losses: Option<i32>,

    #[validate(range(min = 0))]
    pub knockouts: Option<i32>,

    #[validate(range(min = 0))]
    pub submissions: Option<i32>,

    #[validate(custom(function = "validate_weight_class"))]
    pub weight_class: Option<String>,

    #[validate(length(max = 255))]
    pub nationality: Option<String>,

    #[validate(length(max = 255))]
    pub team: Option<String>,

    #[validate(length(max = 255))]
    pub nickname: Option<String>,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(range(min = 0))]
    pub last_weight_grams: Option<i32>,

    #[validate(range(min = 0))]
    pub height_cm: Option<i32>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_path: Option<String>,
}

impl From<Fighter> for FighterResponse {
    fn from(fighter: Fighter) -> Self {
        Self {
            fighter_id: fighter.fighter_id,
            name: fighter.name,
            wins: fighter.wins,
            losses: fighter.losses,
            knockouts: fighter.knockouts,
            submissions: fighter.submissions,
            weight_class: fighter.weight_class,
            nationality: fighter.nationality,
            team: fighter.team,
            nickname: fighter.nickname,
            date_of_birth: fighter.date_of_birth,
            last_weight_grams: fighter.last_weight_grams,
            height_cm: fighter.height_cm,
            image_path: fighter.image_path,
            created_at: fighter.created_at,
            updated_at: fighter.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateFighterRequest {
        CreateFighterRequest {
            name: "Alex Pereira".to_string(),
            wins: 11,
            losses: 2,
            knockouts: 9,
            submissions: 0,
            weight_class: "light_heavyweight".to_string(),
            nationality: Some("Brazil".to_string()),
            team: None,
            nickname: Some("Poatan".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1987, 7, 7),
            last_weight_grams: Some(92_900),
            height_cm: Some(193),
            image_path: None,
        }
    }

    #[test]
    fn test_valid_fighter() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_counts_default_to_zero() {
        let req: CreateFighterRequest =
            serde_json::from_str(r#"{"name": "Jo Doe", "weight_class": "flyweight"}"#).unwrap();
        assert_eq!(req.wins, 0);
        assert_eq!(req.losses, 0);
        assert_eq!(req.knockouts, 0);
        assert_eq!(req.submissions, 0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rejects_short_name_and_negative_counts() {
        let mut req = valid_request();
        req.name = "A".to_string();
        req.losses = -1;

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("losses"));
    }

    #[test]
    fn test_rejects_unknown_weight_class() {
        let mut req = valid_request();
        req.weight_class = "catchweight".to_string();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("weight_class"));
    }

    #[test]
    fn test_rejects_invalid_image_url() {
        let mut req = valid_request();
        req.image_path = Some("not a url".to_string());

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_statistics_total() {
        let stats = FightStatistics::new(7, 3);
        assert_eq!(stats.total_fights, 10);
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateFighterRequest::default().validate().is_ok());
    }

    #[test]
    fn test_group_attaches_rankings_and_fights_per_fighter() {
        let now = chrono::Utc::now().naive_utc();
        let fighter = |name: &str| Fighter {
            fighter_id: Uuid::new_v4(),
            name: name.to_string(),
            wins: 0,
            losses: 0,
            knockouts: 0,
            submissions: 0,
            weight_class: "middleweight".to_string(),
            nationality: None,
            team: None,
            nickname: None,
            date_of_birth: None,
            last_weight_grams: None,
            height_cm: None,
            image_path: None,
            created_at: now,
            updated_at: now,
        };
        let (a, b, c) = (fighter("Ann"), fighter("Bea"), fighter("Cat"));
        let ranking = Ranking {
            ranking_id: Uuid::new_v4(),
            fighter_id: a.fighter_id,
            category: "middleweight".to_string(),
            rank: 2,
            created_at: now,
            updated_at: now,
        };
        let fight = Fight {
            fight_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            winner_id: a.fighter_id,
            loser_id: b.fighter_id,
            last_round: 1,
            referee: None,
            win_condition: "KO".to_string(),
            created_at: now,
            updated_at: now,
        };

        let grouped = FighterDetailResponse::group(vec![a, b, c], &[ranking], &[fight]);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].rankings.len(), 1);
        assert_eq!(grouped[0].fights_as_winner.len(), 1);
        assert!(grouped[0].fights_as_loser.is_empty());
        assert!(grouped[1].rankings.is_empty());
        assert_eq!(grouped[1].fights_as_loser.len(), 1);
        assert!(grouped[2].fights_as_winner.is_empty() && grouped[2].fights_as_loser.is_empty());
    }
}
