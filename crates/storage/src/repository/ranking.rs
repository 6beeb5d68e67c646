use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::canonical_weight_class;
use crate::dto::ranking::{
    CreateRankingRequest, RankingDetailResponse, RankingFilter, UpdateRankingRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Ranking;
use crate::repository::fighter::FighterRepository;

pub(crate) const RANKING_COLUMNS: &str =
    "ranking_id, fighter_id, category, rank, created_at, updated_at";

/// Repository for Ranking database operations
pub struct RankingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RankingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List rankings ordered by category then rank, optionally for one category
    pub async fn list(&self, filter: &RankingFilter) -> Result<Vec<Ranking>> {
        let category = filter.category.as_deref().map(canonical_weight_class);

        let rankings = sqlx::query_as::<_, Ranking>(&format!(
            r#"
            SELECT {RANKING_COLUMNS}
            FROM rankings
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY category, rank
            "#
        ))
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        Ok(rankings)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Ranking> {
        let ranking = sqlx::query_as::<_, Ranking>(&format!(
            "SELECT {RANKING_COLUMNS} FROM rankings WHERE ranking_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(ranking)
    }

    pub async fn find_detailed(&self, id: Uuid) -> Result<RankingDetailResponse> {
        let ranking = self.find_by_id(id).await?;
        let fighter = FighterRepository::new(self.pool)
            .find_by_id(ranking.fighter_id)
            .await?;

        Ok(RankingDetailResponse { ranking, fighter })
    }

    pub async fn create(&self, req: &CreateRankingRequest) -> Result<Ranking> {
        let ranking = sqlx::query_as::<_, Ranking>(&format!(
            r#"
            INSERT INTO rankings (fighter_id, category, rank)
            VALUES ($1, $2, $3)
            RETURNING {RANKING_COLUMNS}
            "#
        ))
        .bind(req.fighter_id)
        .bind(canonical_weight_class(&req.category))
        .bind(req.rank)
        .fetch_one(self.pool)
        .await
        .map_err(ranking_constraint_error)?;

        Ok(ranking)
    }

    pub async fn update(
        &self,
        id: Uuid,
        existing: &Ranking,
        req: &UpdateRankingRequest,
    ) -> Result<Ranking> {
        let category = req
            .category
            .as_deref()
            .map(canonical_weight_class)
            .unwrap_or_else(|| existing.category.clone());

        let ranking = sqlx::query_as::<_, Ranking>(&format!(
            r#"
            UPDATE rankings
            SET category = $2,
                rank = $3,
                updated_at = NOW()
            WHERE ranking_id = $1
            RETURNING {RANKING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(category)
        .bind(req.rank.unwrap_or(existing.rank))
        .fetch_optional(self.pool)
        .await
        .map_err(ranking_constraint_error)?
        .ok_or(StorageError::NotFound)?;

        Ok(ranking)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM rankings WHERE ranking_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn ranking_constraint_error(error: sqlx::Error) -> StorageError {
    let error = StorageError::from(error);
    if error.is_unique_violation() {
        StorageError::ConstraintViolation(
            "Fighter already has a ranking in this category".to_string(),
        )
    } else {
        error.into_constraint_violation("Fighter does not exist")
    }
}
