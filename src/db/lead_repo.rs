// src/db/lead_repo.rs

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{common::error::AppError, db::KeyValueStore, models::lead::Lead};

const LEADS_KEY: &str = "leads";
const STORE_VERSION: u32 = 1;

// Envelope versionado, para permitir migrar o formato no futuro
#[derive(Serialize, Deserialize)]
struct StoredLeads<'a> {
    version: u32,
    leads: Cow<'a, [Lead]>,
}

/// A store de leads: fonte única da verdade.
///
/// A coleção inteira vive sob uma chave. Toda escrita é um
/// ler-modificar-gravar feito sob `write_lock`, então duas requisições
/// concorrentes nunca perdem a atualização uma da outra.
#[derive(Clone)]
pub struct LeadRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl LeadRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Snapshot de todos os leads, do mais recente para o mais antigo.
    pub async fn all(&self) -> Result<Vec<Lead>, AppError> {
        self.load().await
    }

    pub async fn find(&self, id: Uuid) -> Result<Lead, AppError> {
        self.load()
            .await?
            .into_iter()
            .find(|lead| lead.id == id)
            .ok_or(AppError::LeadNotFound(id))
    }

    /// Insere no topo da lista (mais recente primeiro).
    pub async fn insert(&self, lead: Lead) -> Result<Lead, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut leads = self.load().await?;

        if leads.iter().any(|existing| existing.id == lead.id) {
            return Err(AppError::DuplicateLeadId(lead.id));
        }

        leads.insert(0, lead.clone());
        self.save(&leads).await?;

        Ok(lead)
    }

    /// Aplica `mutator` ao lead `id`. Se o mutator falhar nada é gravado.
    ///
    /// `id`, `score` e `created_at` são imutáveis: mesmo que o mutator os
    /// altere, os valores originais são mantidos.
    pub async fn update<F>(&self, id: Uuid, mutator: F) -> Result<Lead, AppError>
    where
        F: FnOnce(&Lead) -> Result<Lead, AppError> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut leads = self.load().await?;

        let slot = leads
            .iter_mut()
            .find(|lead| lead.id == id)
            .ok_or(AppError::LeadNotFound(id))?;

        let mut updated = mutator(slot)?;
        updated.id = slot.id;
        updated.score = slot.score;
        updated.created_at = slot.created_at;
        *slot = updated.clone();

        self.save(&leads).await?;

        Ok(updated)
    }

    /// Remove e devolve o lead apagado.
    pub async fn delete(&self, id: Uuid) -> Result<Lead, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut leads = self.load().await?;

        let position = leads
            .iter()
            .position(|lead| lead.id == id)
            .ok_or(AppError::LeadNotFound(id))?;
        let removed = leads.remove(position);

        self.save(&leads).await?;

        Ok(removed)
    }

    async fn load(&self) -> Result<Vec<Lead>, AppError> {
        let Some(raw) = self.store.get(LEADS_KEY).await? else {
            return Ok(Vec::new());
        };

        let stored: StoredLeads<'static> = serde_json::from_str(&raw)?;
        if stored.version != STORE_VERSION {
            return Err(AppError::UnsupportedStoreVersion(stored.version));
        }

        Ok(stored.leads.into_owned())
    }

    async fn save(&self, leads: &[Lead]) -> Result<(), AppError> {
        let payload = serde_json::to_string(&StoredLeads {
            version: STORE_VERSION,
            leads: Cow::Borrowed(leads),
        })?;

        self.store.set(LEADS_KEY, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryKvStore;
    use crate::models::lead::{LeadSource, LeadStatus};
    use chrono::Utc;

    fn lead(first_name: &str, score: u8) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            phone: None,
            company: "Acme".to_string(),
            job_title: None,
            industry: None,
            message: None,
            source: LeadSource::Website,
            status: LeadStatus::New,
            score,
            created_at: Utc::now(),
        }
    }

    fn repo() -> (LeadRepository, Arc<InMemoryKvStore>) {
        let store = Arc::new(InMemoryKvStore::new());
        (LeadRepository::new(store.clone()), store)
    }

    #[tokio::test]
    async fn insert_prepends_and_rejects_duplicates() {
        let (repo, _) = repo();
        let first = repo.insert(lead("Ada", 10)).await.unwrap();
        let second = repo.insert(lead("Grace", 20)).await.unwrap();

        let all = repo.all().await.unwrap();
        assert_eq!(all.iter().map(|l| l.id).collect::<Vec<_>>(), vec![second.id, first.id]);

        let err = repo.insert(first.clone()).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateLeadId(id) if id == first.id));
        assert_eq!(repo.all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_keeps_immutable_fields() {
        let (repo, _) = repo();
        let original = repo.insert(lead("Ada", 42)).await.unwrap();

        let updated = repo
            .update(original.id, |current| {
                let mut next = current.clone();
                next.status = LeadStatus::Contacted;
                next.score = 99;
                next.id = Uuid::new_v4();
                Ok(next)
            })
            .await
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.score, 42);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.status, LeadStatus::Contacted);
        assert_eq!(repo.find(original.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn failed_mutator_leaves_store_untouched() {
        let (repo, _) = repo();
        let original = repo.insert(lead("Ada", 42)).await.unwrap();

        let err = repo
            .update(original.id, |current| {
                Err(AppError::InvalidTransition {
                    from: current.status,
                    to: LeadStatus::Lost,
                })
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidTransition { .. }));
        assert_eq!(repo.find(original.id).await.unwrap(), original);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let (repo, _) = repo();
        let kept = repo.insert(lead("Ada", 1)).await.unwrap();
        let ghost = Uuid::new_v4();

        assert!(matches!(repo.delete(ghost).await, Err(AppError::LeadNotFound(id)) if id == ghost));
        assert!(matches!(
            repo.update(ghost, |l| Ok(l.clone())).await,
            Err(AppError::LeadNotFound(_))
        ));
        assert_eq!(repo.all().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn delete_removes_the_lead() {
        let (repo, _) = repo();
        let a = repo.insert(lead("Ada", 1)).await.unwrap();
        let b = repo.insert(lead("Grace", 2)).await.unwrap();

        let removed = repo.delete(a.id).await.unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(repo.all().await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn collection_is_persisted_with_a_version_tag() {
        let (repo, store) = repo();
        repo.insert(lead("Ada", 7)).await.unwrap();

        let raw = store.get(LEADS_KEY).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["leads"][0]["firstName"], "Ada");
        assert_eq!(json["leads"][0]["status"], "new");
    }

    #[tokio::test]
    async fn unknown_version_is_rejected() {
        let (repo, store) = repo();
        store
            .set(LEADS_KEY, r#"{"version":2,"leads":[]}"#)
            .await
            .unwrap();

        assert!(matches!(
            repo.all().await,
            Err(AppError::UnsupportedStoreVersion(2))
        ));
    }

    #[tokio::test]
    async fn concurrent_inserts_are_all_kept() {
        let (repo, _) = repo();
        let mut handles = Vec::new();
        for i in 0..20u8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(lead(&format!("Lead{i}"), i + 1)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.all().await.unwrap().len(), 20);
    }
}
