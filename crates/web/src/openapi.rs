use utoipa::OpenApi;

use crate::features::{picks::handlers, system};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_picks,
        handlers::create_pick,
        handlers::get_pick,
        handlers::replace_pick,
        handlers::update_pick,
        handlers::delete_pick,
        system::handlers::health,
    ),
    components(
        schemas(
            p10_storage::dto::pick::PickResponse,
            p10_storage::dto::pick::PickListResponse,
            p10_storage::dto::pick::CreatePickRequest,
            p10_storage::dto::pick::UpdatePickRequest,
            crate::error::ErrorBody,
            system::handlers::HealthResponse,
        )
    ),
    tags(
        (name = "picks", description = "Race predictions of a user within a league"),
        (name = "system", description = "Service health"),
    )
)]
pub struct ApiDoc;
