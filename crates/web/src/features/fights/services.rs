use sqlx::PgPool;
use storage::{
    dto::fight::{
        FightCreatedResponse, FightDetailResponse, NewFight, RankingUpdateReport,
        UpdateFightRequest,
    },
    error::Result,
    models::Fight,
    repository::{
        event::EventRepository,
        fight::{FightRepository, PgFightStore},
        fighter::FighterRepository,
    },
    services::fight_recording,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn list_fights(pool: &PgPool) -> Result<Vec<Fight>> {
    let repo = FightRepository::new(pool);
    repo.list().await
}

pub async fn get_fight_detailed(pool: &PgPool, id: Uuid) -> Result<FightDetailResponse> {
    let repo = FightRepository::new(pool);
    repo.find_detailed(id).await
}

/// Record a fight and shift the fighters' rankings.
///
/// Referenced records are checked before anything is written. The fight is
/// stored whatever the ranking adjustment outcome; the outcome is reported
/// back in the response.
pub async fn record_fight(pool: &PgPool, fight: &NewFight) -> WebResult<FightCreatedResponse> {
    EventRepository::new(pool)
        .find_by_id(fight.event_id)
        .await
        .map_err(WebError::unknown_reference("event", fight.event_id))?;

    let fighters = FighterRepository::new(pool);
    let winner = fighters
        .find_by_id(fight.winner_id)
        .await
        .map_err(WebError::unknown_reference("winner", fight.winner_id))?;
    fighters
        .find_by_id(fight.loser_id)
        .await
        .map_err(WebError::unknown_reference("loser", fight.loser_id))?;

    let category = fight_recording::ranking_category(fight.weight_class.as_deref(), &winner);
    let store = PgFightStore::new(pool.clone());
    let (created, adjustment) = fight_recording::record_fight(&store, fight, &category).await?;

    Ok(FightCreatedResponse {
        fight: created,
        ranking_update: RankingUpdateReport::from(&adjustment),
    })
}

/// Update a fight record. Rankings are left as they are.
pub async fn update_fight(pool: &PgPool, id: Uuid, request: &UpdateFightRequest) -> WebResult<Fight> {
    let repo = FightRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    request
        .check_against(&existing)
        .map_err(WebError::BadRequest)?;

    Ok(repo.update(id, &existing, request).await?)
}

pub async fn delete_fight(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = FightRepository::new(pool);
    repo.delete(id).await
}
