use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::canonical_weight_class;
use crate::dto::fighter::{
    CreateFighterRequest, FightStatistics, FighterDetailResponse, FighterResponse,
    UpdateFighterRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{Fight, Fighter, Ranking};

const FIGHTER_COLUMNS: &str = r#"
    fighter_id, name, wins, losses, knockouts, submissions, weight_class,
    nationality, team, nickname, date_of_birth, last_weight_grams, height_cm,
    image_path, created_at, updated_at
"#;

pub struct FighterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FighterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all fighters with their rankings and recorded fights
    pub async fn list_detailed(&self) -> Result<Vec<FighterDetailResponse>> {
        let fighters = sqlx::query_as::<_, Fighter>(&format!(
            "SELECT {FIGHTER_COLUMNS} FROM fighters ORDER BY name"
        ))
        .fetch_all(self.pool)
        .await?;

        let rankings = sqlx::query_as::<_, Ranking>(
            r#"
            SELECT ranking_id, fighter_id, category, rank, created_at, updated_at
            FROM rankings
            ORDER BY category
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let fights = sqlx::query_as::<_, Fight>(
            r#"
            SELECT f.fight_id, f.event_id, f.winner_id, f.loser_id, f.last_round,
                   f.referee, f.win_condition, f.created_at, f.updated_at
            FROM fights f
            JOIN events e ON f.event_id = e.event_id
            ORDER BY e.date DESC, f.created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(FighterDetailResponse::group(fighters, &rankings, &fights))
    }

    /// Find fighter by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Fighter> {
        let fighter = sqlx::query_as::<_, Fighter>(&format!(
            "SELECT {FIGHTER_COLUMNS} FROM fighters WHERE fighter_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(fighter)
    }

    /// Fighter with rankings and every fight they won or lost
    pub async fn find_detailed(&self, id: Uuid) -> Result<FighterDetailResponse> {
        let fighter = self.find_by_id(id).await?;

        let rankings = sqlx::query_as::<_, Ranking>(
            r#"
            SELECT ranking_id, fighter_id, category, rank, created_at, updated_at
            FROM rankings
            WHERE fighter_id = $1
            ORDER BY category
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let fights = sqlx::query_as::<_, Fight>(
            r#"
            SELECT f.fight_id, f.event_id, f.winner_id, f.loser_id, f.last_round,
                   f.referee, f.win_condition, f.created_at, f.updated_at
            FROM fights f
            JOIN events e ON f.event_id = e.event_id
            WHERE f.winner_id = $1 OR f.loser_id = $1
            ORDER BY e.date DESC, f.created_at DESC
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let (fights_as_winner, fights_as_loser): (Vec<Fight>, Vec<Fight>) =
            fights.into_iter().partition(|fight| fight.winner_id == id);

        Ok(FighterDetailResponse {
            fighter: FighterResponse::from(fighter),
            rankings,
            fights_as_winner,
            fights_as_loser,
        })
    }

    /// Count recorded wins and losses
    pub async fn statistics(&self, id: Uuid) -> Result<FightStatistics> {
        let (wins, losses) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM fights WHERE winner_id = $1),
                (SELECT COUNT(*) FROM fights WHERE loser_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(FightStatistics::new(wins, losses))
    }

    /// Create a new fighter
    pub async fn create(&self, req: &CreateFighterRequest) -> Result<Fighter> {
        let fighter = sqlx::query_as::<_, Fighter>(&format!(
            r#"
            INSERT INTO fighters (
                name, wins, losses, knockouts, submissions, weight_class, nationality,
                team, nickname, date_of_birth, last_weight_grams, height_cm, image_path
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {FIGHTER_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(req.wins)
        .bind(req.losses)
        .bind(req.knockouts)
        .bind(req.submissions)
        .bind(canonical_weight_class(&req.weight_class))
        .bind(&req.nationality)
        .bind(&req.team)
        .bind(&req.nickname)
        .bind(req.date_of_birth)
        .bind(req.last_weight_grams)
        .bind(req.height_cm)
        .bind(&req.image_path)
        .fetch_one(self.pool)
        .await?;

        Ok(fighter)
    }

    /// Update an existing fighter, keeping current values for omitted fields
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Fighter,
        req: &UpdateFighterRequest,
    ) -> Result<Fighter> {
        let weight_class = req
            .weight_class
            .as_deref()
            .map(canonical_weight_class)
            .unwrap_or_else(|| existing.weight_class.clone());

        let fighter = sqlx::query_as::<_, Fighter>(&format!(
            r#"
            UPDATE fighters
            SET name = $2,
                wins = $3,
                losses = $4,
                knockouts = $5,
                submissions = $6,
                weight_class = $7,
                nationality = $8,
                team = $9,
                nickname = $10,
                date_of_birth = $11,
                last_weight_grams = $12,
                height_cm = $13,
                image_path = $14,
                updated_at = NOW()
            WHERE fighter_id = $1
            RETURNING {FIGHTER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.wins.unwrap_or(existing.wins))
        .bind(req.losses.unwrap_or(existing.losses))
        .bind(req.knockouts.unwrap_or(existing.knockouts))
        .bind(req.submissions.unwrap_or(existing.submissions))
        .bind(weight_class)
        .bind(req.nationality.as_ref().or(existing.nationality.as_ref()))
        .bind(req.team.as_ref().or(existing.team.as_ref()))
        .bind(req.nickname.as_ref().or(existing.nickname.as_ref()))
        .bind(req.date_of_birth.or(existing.date_of_birth))
        .bind(req.last_weight_grams.or(existing.last_weight_grams))
        .bind(req.height_cm.or(existing.height_cm))
        .bind(req.image_path.as_ref().or(existing.image_path.as_ref()))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(fighter)
    }

    /// Delete a fighter by ID. Rankings go with them; recorded fights block the delete.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM fighters WHERE fighter_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e)
                    .into_constraint_violation("Fighter still has recorded fights")
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
