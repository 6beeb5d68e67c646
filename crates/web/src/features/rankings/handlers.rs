use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::ranking::{
        CreateRankingRequest, RankingDetailResponse, RankingFilter, UpdateRankingRequest,
    },
    models::Ranking,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/rankings",
    params(RankingFilter),
    responses(
        (status = 200, description = "Rankings ordered by category and rank", body = Vec<Ranking>),
        (status = 400, description = "Unknown category")
    ),
    tag = "rankings"
)]
pub async fn list_rankings(
    State(db): State<Database>,
    Query(filter): Query<RankingFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let rankings = services::list_rankings(db.pool(), &filter).await?;

    Ok(Json(rankings).into_response())
}

#[utoipa::path(
    get,
    path = "/rankings/{id}",
    params(
        ("id" = Uuid, Path, description = "Ranking ID")
    ),
    responses(
        (status = 200, description = "Ranking with its fighter", body = RankingDetailResponse),
        (status = 404, description = "Ranking not found")
    ),
    tag = "rankings"
)]
pub async fn get_ranking(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let ranking = services::get_ranking_detailed(db.pool(), id).await?;

    Ok(Json(ranking).into_response())
}

#[utoipa::path(
    post,
    path = "/rankings",
    request_body = CreateRankingRequest,
    responses(
        (status = 201, description = "Ranking created successfully", body = Ranking),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Fighter not found"),
        (status = 409, description = "Fighter already ranked in this category")
    ),
    tag = "rankings"
)]
pub async fn create_ranking(
    State(db): State<Database>,
    Json(req): Json<CreateRankingRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let ranking = services::create_ranking(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(ranking)).into_response())
}

#[utoipa::path(
    put,
    path = "/rankings/{id}",
    params(
        ("id" = Uuid, Path, description = "Ranking ID")
    ),
    request_body = UpdateRankingRequest,
    responses(
        (status = 200, description = "Ranking updated successfully", body = Ranking),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Ranking not found")
    ),
    tag = "rankings"
)]
pub async fn update_ranking(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateRankingRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_ranking(db.pool(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/rankings/{id}",
    params(
        ("id" = Uuid, Path, description = "Ranking ID")
    ),
    responses(
        (status = 204, description = "Ranking deleted successfully"),
        (status = 404, description = "Ranking not found")
    ),
    tag = "rankings"
)]
pub async fn delete_ranking(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_ranking(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
