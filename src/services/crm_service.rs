// src/services/crm_service.rs

use std::time::Duration;

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::{CrmRepository, LeadRepository},
    models::crm::{CRM_PROVIDERS, ConnectionStatus, CrmConfig, CrmProvider, SyncReport, find_provider},
};

/// Integração simulada: nenhuma chamada de rede sai daqui.
/// As esperas só imitam a latência de um CRM de verdade.
#[derive(Clone)]
pub struct CrmService {
    repo: CrmRepository,
    leads: LeadRepository,
    connect_latency: Duration,
    sync_latency: Duration,
}

impl CrmService {
    pub fn new(
        repo: CrmRepository,
        leads: LeadRepository,
        connect_latency: Duration,
        sync_latency: Duration,
    ) -> Self {
        Self {
            repo,
            leads,
            connect_latency,
            sync_latency,
        }
    }

    pub fn list_providers(&self) -> &'static [CrmProvider] {
        CRM_PROVIDERS
    }

    pub async fn get_config(&self) -> Result<CrmConfig, AppError> {
        self.repo.get_config().await
    }

    pub async fn connect(
        &self,
        provider_id: &str,
        api_key: &str,
        api_url: &str,
    ) -> Result<CrmConfig, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::ApiKeyRequired);
        }
        let provider = find_provider(provider_id)
            .ok_or_else(|| AppError::UnknownProvider(provider_id.to_string()))?;

        tokio::time::sleep(self.connect_latency).await;

        let config = CrmConfig {
            name: provider.name.to_string(),
            api_key: api_key.trim().to_string(),
            api_url: api_url.trim().to_string(),
            enabled: true,
            last_sync: Some(Utc::now()),
            status: ConnectionStatus::Connected,
        };
        self.repo.save_config(&config).await?;

        tracing::info!(provider = provider.name, "CRM conectado");

        Ok(config)
    }

    pub async fn sync(&self) -> Result<SyncReport, AppError> {
        if !is_connected(&self.repo.get_config().await?) {
            return Err(AppError::CrmNotConnected);
        }

        tokio::time::sleep(self.sync_latency).await;

        let synced_leads = self.leads.all().await?.len();

        // Relê sob o lock: um disconnect durante a espera vence
        let config = self
            .repo
            .update_config(|current| {
                if !is_connected(current) {
                    return Err(AppError::CrmNotConnected);
                }
                Ok(CrmConfig {
                    last_sync: Some(Utc::now()),
                    ..current.clone()
                })
            })
            .await?;

        tracing::info!(provider = %config.name, synced_leads, "Sincronização com o CRM concluída");

        Ok(SyncReport { config, synced_leads })
    }

    pub async fn disconnect(&self) -> Result<CrmConfig, AppError> {
        let previous = self.repo.clear_config().await?;

        if previous.enabled {
            tracing::info!(provider = %previous.name, "CRM desconectado");
        }

        Ok(CrmConfig::default())
    }
}

fn is_connected(config: &CrmConfig) -> bool {
    config.enabled && config.status == ConnectionStatus::Connected
}
