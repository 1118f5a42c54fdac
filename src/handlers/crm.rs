// src/handlers/crm.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::crm::{ConnectCrmPayload, CrmConfig, CrmProvider, SyncReport},
};

// GET /api/crm/providers
#[utoipa::path(
    get,
    path = "/api/crm/providers",
    tag = "CRM",
    responses(
        (status = 200, description = "Catálogo de CRMs suportados", body = Vec<CrmProvider>)
    )
)]
pub async fn list_providers(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.crm_service.list_providers()))
}

// GET /api/crm/config
#[utoipa::path(
    get,
    path = "/api/crm/config",
    tag = "CRM",
    responses(
        (status = 200, description = "Configuração atual (chave mascarada)", body = CrmConfig)
    )
)]
pub async fn get_config(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let config = app_state.crm_service.get_config().await?;

    Ok((StatusCode::OK, Json(config.redacted())))
}

// POST /api/crm/connect
#[utoipa::path(
    post,
    path = "/api/crm/connect",
    tag = "CRM",
    request_body = ConnectCrmPayload,
    responses(
        (status = 200, description = "CRM conectado", body = CrmConfig),
        (status = 400, description = "Chave de API ausente"),
        (status = 404, description = "Provedor desconhecido")
    )
)]
pub async fn connect(
    State(app_state): State<AppState>,
    Json(payload): Json<ConnectCrmPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let config = app_state
        .crm_service
        .connect(&payload.provider_id, &payload.api_key, &payload.api_url)
        .await?;

    Ok((StatusCode::OK, Json(config.redacted())))
}

// POST /api/crm/sync
#[utoipa::path(
    post,
    path = "/api/crm/sync",
    tag = "CRM",
    responses(
        (status = 200, description = "Sincronização concluída", body = SyncReport),
        (status = 409, description = "Nenhum CRM conectado")
    )
)]
pub async fn sync(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut report = app_state.crm_service.sync().await?;
    report.config = report.config.redacted();

    Ok((StatusCode::OK, Json(report)))
}

// POST /api/crm/disconnect
#[utoipa::path(
    post,
    path = "/api/crm/disconnect",
    tag = "CRM",
    responses(
        (status = 200, description = "CRM desconectado", body = CrmConfig)
    )
)]
pub async fn disconnect(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let config = app_state.crm_service.disconnect().await?;

    Ok((StatusCode::OK, Json(config)))
}
