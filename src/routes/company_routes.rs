use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::company_controller::CompanyController;
use crate::dto::company_dto::{
    ApiResponse, CompanyResponse, CompanySummary, MainAddressResponse, ShortBrandUrlRequest,
    ShortBrandUrlResponse, SyncEventsResponse,
};
use crate::models::company::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_company_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/", get(list_searchable))
        .route("/:id", get(get_company))
        .route("/:id", put(update_company))
        .route("/:id", delete(destroy_company))
        .route("/:id/main-address", get(main_address))
        .route("/:id/short-brand-url", post(short_brand_url))
        .route("/:id/sync-events", post(sync_events))
}

fn controller(state: &AppState) -> CompanyController {
    CompanyController::new(
        state.pool.clone(),
        state.event_importer.clone(),
        state.url_shortener.clone(),
    )
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanySummary>>, AppError> {
    let response = controller(&state).register(request).await?;
    Ok(Json(response))
}

async fn list_searchable(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanySummary>>, AppError> {
    let response = controller(&state).list_searchable().await?;
    Ok(Json(response))
}

async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanySummary>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn destroy_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).destroy(id).await?;
    Ok(Json(response))
}

async fn main_address(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MainAddressResponse>, AppError> {
    let response = controller(&state).main_address(id).await?;
    Ok(Json(response))
}

async fn short_brand_url(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ShortBrandUrlRequest>,
) -> Result<Json<ShortBrandUrlResponse>, AppError> {
    let response = controller(&state).short_brand_url(id, request.url).await?;
    Ok(Json(response))
}

async fn sync_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SyncEventsResponse>, AppError> {
    let response = controller(&state).sync_events(id).await?;
    Ok(Json(response))
}
