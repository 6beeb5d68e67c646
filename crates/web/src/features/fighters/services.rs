use sqlx::PgPool;
use storage::{
    dto::fighter::{
        CreateFighterRequest, FighterDetailResponse, FighterStatisticsResponse, FighterSummary,
        UpdateFighterRequest,
    },
    error::Result,
    models::Fighter,
    repository::fighter::FighterRepository,
};
use uuid::Uuid;

/// List all fighters with rankings and fights
pub async fn list_fighters(pool: &PgPool) -> Result<Vec<FighterDetailResponse>> {
    let repo = FighterRepository::new(pool);
    repo.list_detailed().await
}

/// Get fighter with rankings and fights
pub async fn get_fighter_detailed(pool: &PgPool, id: Uuid) -> Result<FighterDetailResponse> {
    let repo = FighterRepository::new(pool);
    repo.find_detailed(id).await
}

/// Win/loss statistics computed from recorded fights
pub async fn get_fighter_statistics(pool: &PgPool, id: Uuid) -> Result<FighterStatisticsResponse> {
    let repo = FighterRepository::new(pool);

    let fighter = repo.find_by_id(id).await?;
    let statistics = repo.statistics(id).await?;

    Ok(FighterStatisticsResponse {
        fighter: FighterSummary {
            fighter_id: fighter.fighter_id,
            name: fighter.name,
        },
        statistics,
    })
}

/// Create a new fighter
pub async fn create_fighter(pool: &PgPool, request: &CreateFighterRequest) -> Result<Fighter> {
    let repo = FighterRepository::new(pool);
    repo.create(request).await
}

/// Update a fighter
pub async fn update_fighter(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateFighterRequest,
) -> Result<Fighter> {
    let repo = FighterRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(id, &existing, request).await
}

/// Delete a fighter
pub async fn delete_fighter(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = FighterRepository::new(pool);
    repo.delete(id).await
}
