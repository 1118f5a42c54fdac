// src/config.rs

use std::{env, fmt::Display, str::FromStr, sync::Arc, time::Duration};

use anyhow::anyhow;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{CrmRepository, InMemoryKvStore, KeyValueStore, LeadRepository, PgKvStore},
    services::{
        CrmService, DashboardService, LeadService,
        export_service::DEFAULT_DATE_FORMAT,
        lead_factory::{LeadFactory, RandomScore, ScoreSource},
    },
};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    // Sem DATABASE_URL os leads ficam só em memória
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub export_date_format: String,
    pub crm_connect_latency: Duration,
    pub crm_sync_latency: Duration,
    pub recent_leads_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            database_url: None,
            db_max_connections: 5,
            export_date_format: DEFAULT_DATE_FORMAT.to_string(),
            crm_connect_latency: Duration::from_millis(2000),
            crm_sync_latency: Duration::from_millis(1500),
            recent_leads_limit: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte chave -> valor.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: non_empty("DATABASE_URL"),
            db_max_connections: parse_or(&non_empty, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            export_date_format: non_empty("EXPORT_DATE_FORMAT").unwrap_or(defaults.export_date_format),
            crm_connect_latency: Duration::from_millis(parse_or(&non_empty, "CRM_CONNECT_LATENCY_MS", 2000)?),
            crm_sync_latency: Duration::from_millis(parse_or(&non_empty, "CRM_SYNC_LATENCY_MS", 1500)?),
            recent_leads_limit: parse_or(&non_empty, "RECENT_LEADS_LIMIT", defaults.recent_leads_limit)?,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Valor inválido para {}: '{}' ({})", key, raw, e)),
        None => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub lead_service: LeadService,
    pub dashboard_service: DashboardService,
    pub crm_service: CrmService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.database_url {
            Some(database_url) => {
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!().run(&db_pool).await?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgKvStore::new(db_pool))
            }
            None => {
                tracing::warn!("DATABASE_URL não definida: usando armazenamento em memória");
                Arc::new(InMemoryKvStore::new())
            }
        };

        Ok(Self::with_store(config, store, Arc::new(RandomScore)))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_store(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        scores: Arc<dyn ScoreSource>,
    ) -> Self {
        let lead_repo = LeadRepository::new(store.clone());
        let crm_repo = CrmRepository::new(store);

        let lead_service = LeadService::new(
            lead_repo.clone(),
            LeadFactory::new(scores),
            config.export_date_format,
        );
        let dashboard_service = DashboardService::new(lead_repo.clone(), config.recent_leads_limit);
        let crm_service = CrmService::new(
            crm_repo,
            lead_repo,
            config.crm_connect_latency,
            config.crm_sync_latency,
        );

        Self {
            lead_service,
            dashboard_service,
            crm_service,
        }
    }
}
