//! Route definitions for the `/plantseed` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::plantseed;
use crate::state::AppState;

/// Plantseed routes.
///
/// ```text
/// GET    /plantseed      -> list_plantseeds
/// POST   /plantseed      -> create_plantseed
/// GET    /plantseed/{id} -> show_plantseed
/// PATCH  /plantseed/{id} -> update_plantseed
/// DELETE /plantseed/{id} -> delete_plantseed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/plantseed",
            get(plantseed::list_plantseeds).post(plantseed::create_plantseed),
        )
        .route(
            "/plantseed/{id}",
            get(plantseed::show_plantseed)
                .patch(plantseed::update_plantseed)
                .delete(plantseed::delete_plantseed),
        )
}
