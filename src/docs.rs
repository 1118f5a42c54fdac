// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Leads ---
        handlers::leads::capture_lead,
        handlers::leads::list_leads,
        handlers::leads::get_lead,
        handlers::leads::export_leads,
        handlers::leads::change_status,
        handlers::leads::delete_lead,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_recent_leads,

        // --- CRM ---
        handlers::crm::list_providers,
        handlers::crm::get_config,
        handlers::crm::connect,
        handlers::crm::sync,
        handlers::crm::disconnect,
    ),
    components(
        schemas(
            // --- LEADS ---
            models::lead::LeadSource,
            models::lead::LeadStatus,
            models::lead::Lead,
            models::lead::RawLeadInput,
            models::lead::TransitionStatusPayload,

            // --- DASHBOARD ---
            models::dashboard::DashboardStats,
            models::dashboard::StatusCount,
            models::dashboard::SourceScore,

            // --- CRM ---
            models::crm::ConnectionStatus,
            models::crm::CrmProvider,
            models::crm::CrmConfig,
            models::crm::ConnectCrmPayload,
            models::crm::SyncReport,
        )
    ),
    tags(
        (name = "Leads", description = "Captura e ciclo de vida dos leads"),
        (name = "Dashboard", description = "Indicadores dos leads"),
        (name = "CRM", description = "Integração com CRM (simulada)")
    )
)]
pub struct ApiDoc;
