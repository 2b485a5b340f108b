//! Handlers for the `/plantseed` resource.

use axum::extract::{Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use plantseed_core::filters::{validate_filters, Filters};
use plantseed_core::plantseed::{
    validate_plantseed, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT, SORT_SAFELIST,
};
use plantseed_core::validator::Validator;
use plantseed_db::models::plantseed::{CreatePlantseed, PatchPlantseed, PlantseedListParams};
use plantseed_db::repositories::PlantseedRepo;
use plantseed_db::DbError;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, IdParam};
use crate::middleware::permission::{RequirePlantseedRead, RequirePlantseedWrite};
use crate::query::{read_int, read_string, QueryParams};
use crate::response::{MessageResponse, PlantseedListResponse, PlantseedResponse};
use crate::state::AppState;

/// Optional precondition header for `PATCH`; must equal the current version.
pub const EXPECTED_VERSION_HEADER: &str = "x-expected-version";

/// POST /v1/plantseed
pub async fn create_plantseed(
    auth: RequirePlantseedWrite,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePlantseed>,
) -> AppResult<impl IntoResponse> {
    let mut v = Validator::new();
    validate_plantseed(&mut v, &input.name, &input.family, input.amount, input.price);
    v.into_result().map_err(AppError::FailedValidation)?;

    let plantseed = PlantseedRepo::insert(&state.pool, &input).await?;

    tracing::info!(
        plantseed_id = plantseed.id,
        user_id = auth.user.id,
        "Plantseed created"
    );

    let location = format!("/v1/plantseed/{}", plantseed.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(PlantseedResponse { plantseed }),
    ))
}

/// GET /v1/plantseed/{id}
pub async fn show_plantseed(
    IdParam(id): IdParam,
    _auth: RequirePlantseedRead,
    State(state): State<AppState>,
) -> AppResult<Json<PlantseedResponse>> {
    let plantseed = PlantseedRepo::get(&state.pool, id).await?;
    Ok(Json(PlantseedResponse { plantseed }))
}

/// PATCH /v1/plantseed/{id}
///
/// Absent fields keep their stored value. When `X-Expected-Version` is sent
/// and differs from the stored version the update is refused with 409.
pub async fn update_plantseed(
    IdParam(id): IdParam,
    auth: RequirePlantseedWrite,
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(patch): AppJson<PatchPlantseed>,
) -> AppResult<Json<PlantseedResponse>> {
    let mut plantseed = PlantseedRepo::get(&state.pool, id).await?;

    if let Some(expected) = headers.get(EXPECTED_VERSION_HEADER) {
        if expected.to_str().ok() != Some(plantseed.version.to_string().as_str()) {
            return Err(DbError::EditConflict.into());
        }
    }

    patch.apply_to(&mut plantseed);

    let mut v = Validator::new();
    validate_plantseed(
        &mut v,
        &plantseed.name,
        &plantseed.family,
        plantseed.amount,
        plantseed.price,
    );
    v.into_result().map_err(AppError::FailedValidation)?;

    PlantseedRepo::update(&state.pool, &mut plantseed).await?;

    tracing::info!(
        plantseed_id = id,
        version = plantseed.version,
        user_id = auth.user.id,
        "Plantseed updated"
    );

    Ok(Json(PlantseedResponse { plantseed }))
}

/// DELETE /v1/plantseed/{id}
pub async fn delete_plantseed(
    IdParam(id): IdParam,
    auth: RequirePlantseedWrite,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    PlantseedRepo::delete(&state.pool, id).await?;

    tracing::info!(plantseed_id = id, user_id = auth.user.id, "Plantseed deleted");

    Ok(Json(MessageResponse {
        message: "plantseed successfully deleted",
    }))
}

/// GET /v1/plantseed
///
/// Query: `name`, `family` (full-text), `amount`, `price`, `page`,
/// `page_size`, `sort`.
pub async fn list_plantseeds(
    _auth: RequirePlantseedRead,
    State(state): State<AppState>,
    Query(qs): Query<QueryParams>,
) -> AppResult<Json<PlantseedListResponse>> {
    let (params, filters) = parse_list_query(&qs)?;

    let (plantseeds, metadata) = PlantseedRepo::get_all(&state.pool, &params, &filters).await?;

    Ok(Json(PlantseedListResponse {
        plantseeds,
        metadata,
    }))
}

/// Read and validate the list query string.
fn parse_list_query(qs: &QueryParams) -> AppResult<(PlantseedListParams, Filters)> {
    let mut v = Validator::new();

    let params = PlantseedListParams {
        name: read_string(qs, "name", ""),
        family: read_string(qs, "family", ""),
        amount: read_int(qs, "amount", 0, &mut v),
        price: read_int(qs, "price", 0, &mut v),
    };

    let filters = Filters {
        page: read_int(qs, "page", DEFAULT_PAGE, &mut v),
        page_size: read_int(qs, "page_size", DEFAULT_PAGE_SIZE, &mut v),
        sort: read_string(qs, "sort", DEFAULT_SORT),
        sort_safelist: SORT_SAFELIST,
    };

    validate_filters(&mut v, &filters);
    v.into_result().map_err(AppError::FailedValidation)?;

    Ok((params, filters))
}
