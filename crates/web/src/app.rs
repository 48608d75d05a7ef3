use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{picks, system};
use crate::openapi::ApiDoc;
use crate::state::AppState;

fn cors(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Full application router: picks resource, system routes, API docs.
pub fn router(state: AppState, allowed_origin: HeaderValue) -> Router {
    Router::new()
        .merge(system::routes::routes())
        .nest("/picks", picks::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(system::handlers::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors(allowed_origin)),
        )
        .with_state(state)
}
