// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::LeadRepository,
    models::{
        dashboard::{DashboardStats, SourceScore, StatusCount},
        lead::{Lead, LeadSource, LeadStatus},
    },
};

#[derive(Clone)]
pub struct DashboardService {
    repo: LeadRepository,
    recent_limit: usize,
}

impl DashboardService {
    pub fn new(repo: LeadRepository, recent_limit: usize) -> Self {
        Self { repo, recent_limit }
    }

    // Recalculado a cada leitura, sobre um snapshot da store
    pub async fn get_summary(&self) -> Result<DashboardStats, AppError> {
        let leads = self.repo.all().await?;
        Ok(summarize(&leads))
    }

    pub async fn get_recent_leads(&self) -> Result<Vec<Lead>, AppError> {
        let mut leads = self.repo.all().await?;
        leads.truncate(self.recent_limit);
        Ok(leads)
    }
}

/// Estatísticas do dashboard. Coleção vazia dá zero em tudo.
pub fn summarize(leads: &[Lead]) -> DashboardStats {
    let total = leads.len();
    let count = |status: LeadStatus| leads.iter().filter(|l| l.status == status).count();
    let converted = count(LeadStatus::Converted);

    let conversion_rate = if total == 0 {
        0.0
    } else {
        round2(100.0 * converted as f64 / total as f64)
    };

    DashboardStats {
        total_leads: total,
        new_leads: count(LeadStatus::New),
        qualified_leads: count(LeadStatus::Qualified),
        conversion_rate,
        avg_score: average_score(leads.iter()),
        status_breakdown: LeadStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: count(status),
            })
            .collect(),
        source_scores: LeadSource::ALL
            .into_iter()
            .map(|source| {
                let matching: Vec<&Lead> = leads.iter().filter(|l| l.source == source).collect();
                SourceScore {
                    source,
                    lead_count: matching.len(),
                    avg_score: average_score(matching.into_iter()),
                }
            })
            .collect(),
    }
}

fn average_score<'a>(leads: impl Iterator<Item = &'a Lead>) -> f64 {
    let (sum, n) = leads.fold((0u64, 0u64), |(sum, n), lead| (sum + u64::from(lead.score), n + 1));
    if n == 0 {
        return 0.0;
    }
    round2(sum as f64 / n as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
