use axum::{Router, routing::get};

use super::handlers::{create_pick, delete_pick, get_pick, list_picks, replace_pick, update_pick};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_picks).post(create_pick))
        .route(
            "/:pickId",
            get(get_pick)
                .put(replace_pick)
                .patch(update_pick)
                .delete(delete_pick),
        )
}
