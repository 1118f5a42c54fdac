// src/db/crm_repo.rs

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{common::error::AppError, db::KeyValueStore, models::crm::CrmConfig};

const CRM_CONFIG_KEY: &str = "crmConfig";
const STORE_VERSION: u32 = 1;

// Mesmo envelope versionado dos leads
#[derive(Serialize, Deserialize)]
struct StoredCrmConfig {
    version: u32,
    config: CrmConfig,
}

/// Configuração do CRM. Como nos leads, toda escrita passa por `write_lock`:
/// uma sincronização lenta não pode sobrescrever um connect/disconnect
/// que aconteceu no meio do caminho.
#[derive(Clone)]
pub struct CrmRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl CrmRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    // Se não houver nada guardado, devolvemos a configuração "desconectada"
    pub async fn get_config(&self) -> Result<CrmConfig, AppError> {
        self.load().await
    }

    pub async fn save_config(&self, config: &CrmConfig) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        self.save(config).await
    }

    /// Ler-modificar-gravar sob o lock. Se o mutator falhar nada é gravado.
    pub async fn update_config<F>(&self, mutator: F) -> Result<CrmConfig, AppError>
    where
        F: FnOnce(&CrmConfig) -> Result<CrmConfig, AppError> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let current = self.load().await?;

        let updated = mutator(&current)?;
        self.save(&updated).await?;

        Ok(updated)
    }

    /// Apaga a configuração e devolve a que estava guardada.
    pub async fn clear_config(&self) -> Result<CrmConfig, AppError> {
        let _guard = self.write_lock.lock().await;
        let previous = self.load().await?;

        self.store.remove(CRM_CONFIG_KEY).await?;

        Ok(previous)
    }

    async fn load(&self) -> Result<CrmConfig, AppError> {
        let Some(raw) = self.store.get(CRM_CONFIG_KEY).await? else {
            return Ok(CrmConfig::default());
        };

        let stored: StoredCrmConfig = serde_json::from_str(&raw)?;
        if stored.version != STORE_VERSION {
            return Err(AppError::UnsupportedStoreVersion(stored.version));
        }

        Ok(stored.config)
    }

    async fn save(&self, config: &CrmConfig) -> Result<(), AppError> {
        let payload = serde_json::to_string(&StoredCrmConfig {
            version: STORE_VERSION,
            config: config.clone(),
        })?;

        self.store.set(CRM_CONFIG_KEY, &payload).await
    }
}
