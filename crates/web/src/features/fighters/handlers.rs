use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::fighter::{
        CreateFighterRequest, FighterDetailResponse, FighterResponse, FighterStatisticsResponse,
        UpdateFighterRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/fighters",
    responses(
        (status = 200, description = "All fighters with their rankings and fights", body = Vec<FighterDetailResponse>)
    ),
    tag = "fighters"
)]
pub async fn list_fighters(State(db): State<Database>) -> Result<Response, WebError> {
    let fighters = services::list_fighters(db.pool()).await?;

    Ok(Json(fighters).into_response())
}

#[utoipa::path(
    get,
    path = "/fighters/{id}",
    params(
        ("id" = Uuid, Path, description = "Fighter ID")
    ),
    responses(
        (status = 200, description = "Fighter with rankings and fight history", body = FighterDetailResponse),
        (status = 404, description = "Fighter not found")
    ),
    tag = "fighters"
)]
pub async fn get_fighter(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let fighter = services::get_fighter_detailed(db.pool(), id).await?;

    Ok(Json(fighter).into_response())
}

#[utoipa::path(
    get,
    path = "/fighters/{id}/statistics",
    params(
        ("id" = Uuid, Path, description = "Fighter ID")
    ),
    responses(
        (status = 200, description = "Fight statistics computed from recorded fights", body = FighterStatisticsResponse),
        (status = 404, description = "Fighter not found")
    ),
    tag = "fighters"
)]
pub async fn get_fighter_statistics(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let statistics = services::get_fighter_statistics(db.pool(), id).await?;

    Ok(Json(statistics).into_response())
}

#[utoipa::path(
    post,
    path = "/fighters",
    request_body = CreateFighterRequest,
    responses(
        (status = 201, description = "Fighter created successfully", body = FighterResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "fighters"
)]
pub async fn create_fighter(
    State(db): State<Database>,
    Json(req): Json<CreateFighterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let fighter = services::create_fighter(db.pool(), &req).await?;
    tracing::info!(fighter_id = %fighter.fighter_id, "Fighter created");

    Ok((StatusCode::CREATED, Json(FighterResponse::from(fighter))).into_response())
}

#[utoipa::path(
    put,
    path = "/fighters/{id}",
    params(
        ("id" = Uuid, Path, description = "Fighter ID")
    ),
    request_body = UpdateFighterRequest,
    responses(
        (status = 200, description = "Fighter updated successfully", body = FighterResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Fighter not found")
    ),
    tag = "fighters"
)]
pub async fn update_fighter(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateFighterRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_fighter(db.pool(), id, &update_req).await?;

    Ok(Json(FighterResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/fighters/{id}",
    params(
        ("id" = Uuid, Path, description = "Fighter ID")
    ),
    responses(
        (status = 204, description = "Fighter deleted successfully"),
        (status = 404, description = "Fighter not found"),
        (status = 409, description = "Fighter still has recorded fights")
    ),
    tag = "fighters"
)]
pub async fn delete_fighter(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_fighter(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
