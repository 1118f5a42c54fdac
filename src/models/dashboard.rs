// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::lead::{LeadSource, LeadStatus};

// 1. Cards do topo. Sempre recalculado a partir da store, nunca guardado.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_leads: usize,
    pub new_leads: usize,
    pub qualified_leads: usize,
    #[schema(example = 33.33)]
    pub conversion_rate: f64, // Em %
    #[schema(example = 70.0)]
    pub avg_score: f64,
    pub status_breakdown: Vec<StatusCount>,
    pub source_scores: Vec<SourceScore>,
}

// 2. Contagem por status (cards da página de leads)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: LeadStatus,
    pub count: usize,
}

// 3. Qualidade média por origem
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceScore {
    pub source: LeadSource,
    pub lead_count: usize,
    pub avg_score: f64,
}
