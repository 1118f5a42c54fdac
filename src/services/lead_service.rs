// src/services/lead_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LeadRepository,
    models::lead::{Lead, LeadQuery, LeadStatus, RawLeadInput},
    services::{export_service, filter_engine, lead_factory::LeadFactory, status_service},
};

#[derive(Clone)]
pub struct LeadService {
    repo: LeadRepository,
    factory: LeadFactory,
    export_date_format: String,
}

impl LeadService {
    pub fn new(repo: LeadRepository, factory: LeadFactory, export_date_format: String) -> Self {
        Self {
            repo,
            factory,
            export_date_format,
        }
    }

    // =========================================================================
    //  1. CAPTURA
    // =========================================================================

    /// Captura do formulário. Não é idempotente: reenviar cria outro lead.
    pub async fn capture_lead(&self, input: RawLeadInput) -> Result<Lead, AppError> {
        let lead = self.factory.capture(input)?;
        let lead = self.repo.insert(lead).await?;

        tracing::info!(
            lead_id = %lead.id,
            source = %lead.source,
            score = lead.score,
            "Lead capturado"
        );

        Ok(lead)
    }

    // =========================================================================
    //  2. LEITURA
    // =========================================================================

    pub async fn list_leads(&self, query: &LeadQuery) -> Result<Vec<Lead>, AppError> {
        let leads = self.repo.all().await?;
        Ok(filter_engine::filter(&leads, query))
    }

    pub async fn get_lead(&self, id: Uuid) -> Result<Lead, AppError> {
        self.repo.find(id).await
    }

    /// CSV da mesma visão filtrada que a listagem devolve.
    pub async fn export_leads(&self, query: &LeadQuery) -> Result<(String, usize), AppError> {
        let leads = self.list_leads(query).await?;
        let csv = export_service::serialize(&leads, &self.export_date_format);

        tracing::info!(exported = leads.len(), "Exportação de leads gerada");

        Ok((csv, leads.len()))
    }

    // =========================================================================
    //  3. ESCRITA
    // =========================================================================

    pub async fn change_status(&self, id: Uuid, next: LeadStatus) -> Result<Lead, AppError> {
        let mut previous = None;
        let updated = self
            .repo
            .update(id, |current| {
                previous = Some(current.status);
                status_service::transition(current, next)
            })
            .await?;

        if let Some(from) = previous {
            tracing::info!(lead_id = %id, %from, to = %next, "Status do lead alterado");
        }

        Ok(updated)
    }

    pub async fn delete_lead(&self, id: Uuid) -> Result<(), AppError> {
        let removed = self.repo.delete(id).await?;
        tracing::info!(lead_id = %removed.id, "Lead removido");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryKvStore;
    use crate::models::lead::{Facet, LeadSource};
    use crate::services::export_service::DEFAULT_DATE_FORMAT;
    use crate::services::lead_factory::ScoreSource;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU8, Ordering};

    // Scores 10, 20, 30, ...
    struct SteppedScore(AtomicU8);

    impl ScoreSource for SteppedScore {
        fn next_score(&self) -> u8 {
            self.0.fetch_add(10, Ordering::SeqCst) + 10
        }
    }

    fn service() -> LeadService {
        let repo = LeadRepository::new(Arc::new(InMemoryKvStore::new()));
        let factory = LeadFactory::new(Arc::new(SteppedScore(AtomicU8::new(0))));
        LeadService::new(repo, factory, DEFAULT_DATE_FORMAT.to_string())
    }

    fn input(first_name: &str, company: &str, source: LeadSource) -> RawLeadInput {
        RawLeadInput {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            company: company.to_string(),
            source: Some(source),
            ..RawLeadInput::default()
        }
    }

    #[tokio::test]
    async fn capture_persists_most_recent_first() {
        let service = service();
        let ada = service.capture_lead(input("Ada", "Analytical", LeadSource::Website)).await.unwrap();
        let bob = service.capture_lead(input("Bob", "Builders", LeadSource::Event)).await.unwrap();

        assert_eq!((ada.score, bob.score), (10, 20));
        let all = service.list_leads(&LeadQuery::default()).await.unwrap();
        assert_eq!(all, vec![bob, ada]);
    }

    #[tokio::test]
    async fn invalid_capture_stores_nothing() {
        let service = service();
        let err = service
            .capture_lead(input("", "Analytical", LeadSource::Website))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(service.list_leads(&LeadQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_changes_go_through_the_state_machine() {
        let service = service();
        let lead = service.capture_lead(input("Ada", "Analytical", LeadSource::Website)).await.unwrap();

        let contacted = service.change_status(lead.id, LeadStatus::Contacted).await.unwrap();
        assert_eq!(contacted.status, LeadStatus::Contacted);
        assert_eq!(contacted.score, lead.score);

        service.change_status(lead.id, LeadStatus::Converted).await.unwrap();
        let err = service.change_status(lead.id, LeadStatus::Contacted).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));

        let stored = service.get_lead(lead.id).await.unwrap();
        assert_eq!(stored.status, LeadStatus::Converted);
        assert_eq!(stored.score, lead.score);
        assert_eq!(stored.created_at, lead.created_at);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_leaves_store_alone() {
        let service = service();
        service.capture_lead(input("Ada", "Analytical", LeadSource::Website)).await.unwrap();

        let err = service.delete_lead(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::LeadNotFound(_)));
        assert_eq!(service.list_leads(&LeadQuery::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn export_uses_the_filtered_view() {
        let service = service();
        service.capture_lead(input("Ada", "Analytical", LeadSource::Website)).await.unwrap();
        service.capture_lead(input("Bob", "Builders", LeadSource::Referral)).await.unwrap();

        let query = LeadQuery {
            source: Facet::Only(LeadSource::Referral),
            ..LeadQuery::default()
        };
        let (csv, count) = service.export_leads(&query).await.unwrap();

        assert_eq!(count, 1);
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.lines().nth(1).unwrap().starts_with("Bob Doe,bob@example.com,"));
    }
}
