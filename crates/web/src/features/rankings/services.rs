use sqlx::PgPool;
use storage::{
    dto::ranking::{
        CreateRankingRequest, RankingDetailResponse, RankingFilter, UpdateRankingRequest,
    },
    error::Result,
    models::Ranking,
    repository::{fighter::FighterRepository, ranking::RankingRepository},
};
use uuid::Uuid;

/// List rankings, optionally for a single weight class
pub async fn list_rankings(pool: &PgPool, filter: &RankingFilter) -> Result<Vec<Ranking>> {
    let repo = RankingRepository::new(pool);
    repo.list(filter).await
}

pub async fn get_ranking_detailed(pool: &PgPool, id: Uuid) -> Result<RankingDetailResponse> {
    let repo = RankingRepository::new(pool);
    repo.find_detailed(id).await
}

/// Create a ranking for an existing fighter
pub async fn create_ranking(pool: &PgPool, request: &CreateRankingRequest) -> Result<Ranking> {
    FighterRepository::new(pool)
        .find_by_id(request.fighter_id)
        .await?;

    let repo = RankingRepository::new(pool);
    repo.create(request).await
}

pub async fn update_ranking(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateRankingRequest,
) -> Result<Ranking> {
    let repo = RankingRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(id, &existing, request).await
}

pub async fn delete_ranking(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = RankingRepository::new(pool);
    repo.delete(id).await
}
