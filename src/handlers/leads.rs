// src/handlers/leads.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::lead::{Lead, LeadQuery, RawLeadInput, TransitionStatusPayload},
};

// =============================================================================
//  ÁREA 1: CAPTURA
// =============================================================================

// POST /api/leads
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = RawLeadInput,
    responses(
        (status = 201, description = "Lead capturado", body = Lead),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn capture_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<RawLeadInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state.lead_service.capture_lead(payload).await?;

    Ok((StatusCode::CREATED, Json(lead)))
}

// =============================================================================
//  ÁREA 2: CONSULTA
// =============================================================================

// GET /api/leads
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Leads",
    responses(
        (status = 200, description = "Leads filtrados, do mais recente para o mais antigo", body = Vec<Lead>),
        (status = 400, description = "Filtro inválido")
    ),
    params(
        ("term" = Option<String>, Query, description = "Busca em nome, sobrenome, e-mail ou empresa"),
        ("status" = Option<String>, Query, description = "new | contacted | qualified | converted | lost | all"),
        ("source" = Option<String>, Query, description = "website | social-media | email-campaign | referral | event | advertisement | all")
    )
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    Query(query): Query<LeadQuery>,
) -> Result<impl IntoResponse, AppError> {
    let leads = app_state.lead_service.list_leads(&query).await?;

    Ok((StatusCode::OK, Json(leads)))
}

// GET /api/leads/{id}
#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    tag = "Leads",
    responses(
        (status = 200, description = "Lead", body = Lead),
        (status = 404, description = "Lead não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do lead")
    )
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state.lead_service.get_lead(id).await?;

    Ok((StatusCode::OK, Json(lead)))
}

// GET /api/leads/export
#[utoipa::path(
    get,
    path = "/api/leads/export",
    tag = "Leads",
    responses(
        (status = 200, description = "CSV dos leads filtrados", body = String, content_type = "text/csv")
    ),
    params(
        ("term" = Option<String>, Query, description = "Mesmos filtros da listagem"),
        ("status" = Option<String>, Query, description = "Status ou all"),
        ("source" = Option<String>, Query, description = "Origem ou all")
    )
)]
pub async fn export_leads(
    State(app_state): State<AppState>,
    Query(query): Query<LeadQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (csv, _count) = app_state.lead_service.export_leads(&query).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"leads-export.csv\""),
        ],
        csv,
    ))
}

// =============================================================================
//  ÁREA 3: CICLO DE VIDA
// =============================================================================

// PATCH /api/leads/{id}/status
#[utoipa::path(
    patch,
    path = "/api/leads/{id}/status",
    tag = "Leads",
    request_body = TransitionStatusPayload,
    responses(
        (status = 200, description = "Status alterado", body = Lead),
        (status = 404, description = "Lead não encontrado"),
        (status = 409, description = "Transição inválida (status terminal)")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do lead")
    )
)]
pub async fn change_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state.lead_service.change_status(id, payload.status).await?;

    Ok((StatusCode::OK, Json(lead)))
}

// DELETE /api/leads/{id}
#[utoipa::path(
    delete,
    path = "/api/leads/{id}",
    tag = "Leads",
    responses(
        (status = 204, description = "Lead removido"),
        (status = 404, description = "Lead não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do lead")
    )
)]
pub async fn delete_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.lead_service.delete_lead(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
