use axum::{
    Json,
    extract::{
        Path, Query, RawQuery, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use p10_storage::dto::pick::{
    CreatePickRequest, ListPicksQuery, PickListResponse, PickResponse, UpdatePickRequest,
};
use serde_json::{Value, json};

use crate::error::{WebError, WebResult};
use crate::state::AppState;

use super::services;

fn required_identifiers(req: &CreatePickRequest) -> Value {
    json!({
        "userId": req.user_id,
        "leagueId": req.league_id,
        "raceId": req.race_id,
    })
}

#[utoipa::path(
    get,
    path = "/picks",
    params(ListPicksQuery),
    responses(
        (status = 200, description = "Page of picks matching the filters", body = PickListResponse),
        (status = 400, description = "Invalid pagination parameters", body = crate::error::ErrorBody)
    ),
    tag = "picks"
)]
pub async fn list_picks(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    query: Result<Query<ListPicksQuery>, QueryRejection>,
) -> WebResult<Response> {
    let Query(query) = query.map_err(|rejection| {
        WebError::from(rejection).with_details(json!({ "query": raw_query }))
    })?;

    let echo = json!({
        "limit": query.pagination.limit,
        "offset": query.pagination.offset,
    });
    let filter = query.into_filter().map_err(|message| WebError::InvalidQuery {
        message,
        details: Some(echo),
    })?;

    let page = services::list_picks(state.picks.as_ref(), &filter).await?;

    let response = PickListResponse {
        items: page.items.into_iter().map(PickResponse::from).collect(),
        total: page.total,
        limit: filter.limit,
        offset: filter.offset,
    };

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/picks",
    request_body = CreatePickRequest,
    responses(
        (status = 201, description = "Pick created successfully", body = PickResponse,
            headers(("Location" = String, description = "URL of the new pick"))),
        (status = 400, description = "Missing userId, leagueId or raceId", body = crate::error::ErrorBody),
        (status = 409, description = "A pick already exists for this user, league and race", body = crate::error::ErrorBody)
    ),
    tag = "picks"
)]
pub async fn create_pick(
    State(state): State<AppState>,
    payload: Result<Json<CreatePickRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = payload?;

    let echo = required_identifiers(&req);
    let new_pick = req
        .into_new_pick()
        .map_err(|errors| WebError::from(errors).with_details(echo))?;

    let pick = services::create_pick(state.picks.as_ref(), &new_pick).await?;
    let location = format!("/picks/{}", pick.pick_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PickResponse::from(pick)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/picks/{pickId}",
    params(
        ("pickId" = String, Path, description = "Pick identifier")
    ),
    responses(
        (status = 200, description = "Pick found", body = PickResponse),
        (status = 404, description = "Pick not found", body = crate::error::ErrorBody)
    ),
    tag = "picks"
)]
pub async fn get_pick(
    State(state): State<AppState>,
    Path(pick_id): Path<String>,
) -> WebResult<Response> {
    let pick = services::get_pick(state.picks.as_ref(), &pick_id).await?;

    Ok(Json(PickResponse::from(pick)).into_response())
}

#[utoipa::path(
    put,
    path = "/picks/{pickId}",
    params(
        ("pickId" = String, Path, description = "Pick identifier")
    ),
    request_body = CreatePickRequest,
    responses(
        (status = 200, description = "Pick replaced successfully", body = PickResponse),
        (status = 400, description = "Missing userId, leagueId or raceId", body = crate::error::ErrorBody),
        (status = 404, description = "Pick not found", body = crate::error::ErrorBody),
        (status = 409, description = "Another pick already uses this user, league and race", body = crate::error::ErrorBody)
    ),
    tag = "picks"
)]
pub async fn replace_pick(
    State(state): State<AppState>,
    Path(pick_id): Path<String>,
    payload: Result<Json<CreatePickRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = payload?;

    let echo = required_identifiers(&req);
    let new_pick = req
        .into_new_pick()
        .map_err(|errors| WebError::from(errors).with_details(echo))?;

    let pick = services::replace_pick(state.picks.as_ref(), &pick_id, &new_pick).await?;

    Ok(Json(PickResponse::from(pick)).into_response())
}

#[utoipa::path(
    patch,
    path = "/picks/{pickId}",
    params(
        ("pickId" = String, Path, description = "Pick identifier")
    ),
    request_body = UpdatePickRequest,
    responses(
        (status = 200, description = "Pick updated successfully", body = PickResponse),
        (status = 400, description = "No field to update, or a required field set to null", body = crate::error::ErrorBody),
        (status = 404, description = "Pick not found", body = crate::error::ErrorBody),
        (status = 409, description = "Another pick already uses this user, league and race", body = crate::error::ErrorBody)
    ),
    tag = "picks"
)]
pub async fn update_pick(
    State(state): State<AppState>,
    Path(pick_id): Path<String>,
    payload: Result<Json<UpdatePickRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = payload?;

    let changes = req.into_changes()?;
    if changes.is_empty() {
        return Err(WebError::validation(
            "At least one field must be provided for PATCH",
            None,
        ));
    }

    let pick = services::update_pick(state.picks.as_ref(), &pick_id, &changes).await?;

    Ok(Json(PickResponse::from(pick)).into_response())
}

#[utoipa::path(
    delete,
    path = "/picks/{pickId}",
    params(
        ("pickId" = String, Path, description = "Pick identifier")
    ),
    responses(
        (status = 204, description = "Pick deleted successfully"),
        (status = 404, description = "Pick not found", body = crate::error::ErrorBody)
    ),
    tag = "picks"
)]
pub async fn delete_pick(
    State(state): State<AppState>,
    Path(pick_id): Path<String>,
) -> WebResult<Response> {
    services::delete_pick(state.picks.as_ref(), &pick_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
