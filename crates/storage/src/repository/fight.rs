use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::common::canonical_weight_class;
use crate::dto::fight::{FightDetailResponse, NewFight, UpdateFightRequest};
use crate::error::{Result, StorageError};
use crate::models::{Fight, Ranking};
use crate::repository::event::EventRepository;
use crate::repository::fighter::FighterRepository;
use crate::repository::ranking::RANKING_COLUMNS;
use crate::services::fight_recording::{FightStore, FightTransaction};
use crate::services::ranking_adjustment::RankingTransaction;

const FIGHT_COLUMNS: &str = r#"
    fight_id, event_id, winner_id, loser_id, last_round, referee, win_condition,
    created_at, updated_at
"#;

/// Repository for Fight database operations
pub struct FightRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FightRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Fight>> {
        let fights = sqlx::query_as::<_, Fight>(&format!(
            "SELECT {FIGHT_COLUMNS} FROM fights ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(fights)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Fight> {
        let fight = sqlx::query_as::<_, Fight>(&format!(
            "SELECT {FIGHT_COLUMNS} FROM fights WHERE fight_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(fight)
    }

    /// Fight with its event, winner and loser
    pub async fn find_detailed(&self, id: Uuid) -> Result<FightDetailResponse> {
        let fight = self.find_by_id(id).await?;

        let event = EventRepository::new(self.pool)
            .find_by_id(fight.event_id)
            .await?;
        let fighters = FighterRepository::new(self.pool);
        let winner = fighters.find_by_id(fight.winner_id).await?;
        let loser = fighters.find_by_id(fight.loser_id).await?;

        Ok(FightDetailResponse {
            fight,
            event,
            winner,
            loser,
        })
    }

    pub async fn update(&self, id: Uuid, existing: &Fight, req: &UpdateFightRequest) -> Result<Fight> {
        let (winner_id, loser_id) = req.fighters_after(existing);

        let fight = sqlx::query_as::<_, Fight>(&format!(
            r#"
            UPDATE fights
            SET event_id = $2,
                winner_id = $3,
                loser_id = $4,
                last_round = $5,
                referee = $6,
                win_condition = $7,
                updated_at = NOW()
            WHERE fight_id = $1
            RETURNING {FIGHT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.event_id.unwrap_or(existing.event_id))
        .bind(winner_id)
        .bind(loser_id)
        .bind(req.last_round.unwrap_or(existing.last_round))
        .bind(req.referee.as_ref().or(existing.referee.as_ref()))
        .bind(req.win_condition.as_ref().unwrap_or(&existing.win_condition))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).into_constraint_violation("Event or fighter does not exist")
        })?
        .ok_or(StorageError::NotFound)?;

        Ok(fight)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM fights WHERE fight_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// Postgres-backed [`FightStore`] used when recording fights
#[derive(Debug, Clone)]
pub struct PgFightStore {
    pool: PgPool,
}

impl PgFightStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub struct PgFightTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl FightStore for PgFightStore {
    async fn begin(&self) -> Result<Box<dyn FightTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgFightTransaction { tx }))
    }
}

#[async_trait]
impl RankingTransaction for PgFightTransaction {
    async fn find_ranking(&mut self, fighter_id: Uuid, category: &str) -> Result<Option<Ranking>> {
        let ranking = sqlx::query_as::<_, Ranking>(&format!(
            r#"
            SELECT {RANKING_COLUMNS}
            FROM rankings
            WHERE fighter_id = $1 AND category = $2
            FOR UPDATE
            "#
        ))
        .bind(fighter_id)
        .bind(canonical_weight_class(category))
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(ranking)
    }

    async fn fighter_rankings(&mut self, fighter_id: Uuid) -> Result<Vec<Ranking>> {
        let rankings = sqlx::query_as::<_, Ranking>(&format!(
            r#"
            SELECT {RANKING_COLUMNS}
            FROM rankings
            WHERE fighter_id = $1
            ORDER BY category
            FOR UPDATE
            "#
        ))
        .bind(fighter_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(rankings)
    }

    async fn set_rank(&mut self, ranking_id: Uuid, rank: i32) -> Result<()> {
        sqlx::query("UPDATE rankings SET rank = $2, updated_at = NOW() WHERE ranking_id = $1")
            .bind(ranking_id)
            .bind(rank)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn savepoint(&mut self) -> Result<()> {
        sqlx::query("SAVEPOINT ranking_adjustment")
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn rollback_to_savepoint(&mut self) -> Result<()> {
        sqlx::query("ROLLBACK TO SAVEPOINT ranking_adjustment")
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn release_savepoint(&mut self) -> Result<()> {
        sqlx::query("RELEASE SAVEPOINT ranking_adjustment")
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl FightTransaction for PgFightTransaction {
    async fn insert_fight(&mut self, fight: &NewFight) -> Result<Fight> {
        let fight = sqlx::query_as::<_, Fight>(&format!(
            r#"
            INSERT INTO fights (event_id, winner_id, loser_id, last_round, referee, win_condition)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {FIGHT_COLUMNS}
            "#
        ))
        .bind(fight.event_id)
        .bind(fight.winner_id)
        .bind(fight.loser_id)
        .bind(fight.last_round)
        .bind(&fight.referee)
        .bind(&fight.win_condition)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            StorageError::from(e).into_constraint_violation("Event or fighter does not exist")
        })?;

        Ok(fight)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
