use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::fight::{CreateFightRequest, FightCreatedResponse, FightDetailResponse, UpdateFightRequest},
    models::Fight,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/fights",
    responses(
        (status = 200, description = "List all fights", body = Vec<Fight>)
    ),
    tag = "fights"
)]
pub async fn list_fights(State(db): State<Database>) -> Result<Response, WebError> {
    let fights = services::list_fights(db.pool()).await?;

    Ok(Json(fights).into_response())
}

#[utoipa::path(
    get,
    path = "/fights/{id}",
    params(
        ("id" = Uuid, Path, description = "Fight ID")
    ),
    responses(
        (status = 200, description = "Fight with event, winner and loser", body = FightDetailResponse),
        (status = 404, description = "Fight not found")
    ),
    tag = "fights"
)]
pub async fn get_fight(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let fight = services::get_fight_detailed(db.pool(), id).await?;

    Ok(Json(fight).into_response())
}

#[utoipa::path(
    post,
    path = "/fights",
    request_body = CreateFightRequest,
    responses(
        (status = 201, description = "Fight recorded; ranking_update reports the rank adjustment", body = FightCreatedResponse),
        (status = 400, description = "Missing identifiers, winner equals loser, or validation error"),
        (status = 404, description = "Event or fighter not found"),
        (status = 409, description = "Event or fighter removed while the fight was being recorded")
    ),
    tag = "fights"
)]
pub async fn create_fight(
    State(db): State<Database>,
    Json(req): Json<CreateFightRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    let fight = req.into_new_fight().map_err(WebError::BadRequest)?;

    let created = services::record_fight(db.pool(), &fight).await?;

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

#[utoipa::path(
    put,
    path = "/fights/{id}",
    params(
        ("id" = Uuid, Path, description = "Fight ID")
    ),
    request_body = UpdateFightRequest,
    responses(
        (status = 200, description = "Fight updated successfully", body = Fight),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Fight not found")
    ),
    tag = "fights"
)]
pub async fn update_fight(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateFightRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_fight(db.pool(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/fights/{id}",
    params(
        ("id" = Uuid, Path, description = "Fight ID")
    ),
    responses(
        (status = 204, description = "Fight deleted successfully"),
        (status = 404, description = "Fight not found")
    ),
    tag = "fights"
)]
pub async fn delete_fight(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_fight(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
