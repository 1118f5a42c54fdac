// src/models/crm.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
}

// --- CATÁLOGO DE PROVEDORES (fixo) ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrmProvider {
    #[schema(value_type = String, example = "hubspot")]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub description: &'static str,
    #[schema(value_type = Vec<String>)]
    pub features: &'static [&'static str],
    pub popular: bool,
}

pub const CRM_PROVIDERS: &[CrmProvider] = &[
    CrmProvider {
        id: "hubspot",
        name: "HubSpot",
        description: "All-in-one marketing, sales, and service platform",
        features: &["Lead scoring", "Email automation", "Analytics", "Contact management"],
        popular: true,
    },
    CrmProvider {
        id: "salesforce",
        name: "Salesforce",
        description: "World's #1 CRM platform for sales and customer service",
        features: &["Advanced reporting", "Custom objects", "AI insights", "Mobile app"],
        popular: true,
    },
    CrmProvider {
        id: "pipedrive",
        name: "Pipedrive",
        description: "Simple and effective sales CRM for small businesses",
        features: &["Visual pipeline", "Activity reminders", "Email sync", "Mobile access"],
        popular: false,
    },
    CrmProvider {
        id: "zoho",
        name: "Zoho CRM",
        description: "Complete CRM solution with built-in intelligence",
        features: &["AI assistant", "Social CRM", "Workflow automation", "Multi-channel"],
        popular: false,
    },
];

pub fn find_provider(id: &str) -> Option<&'static CrmProvider> {
    CRM_PROVIDERS.iter().find(|p| p.id == id)
}

// --- CONFIGURAÇÃO (guardada sob a chave "crmConfig") ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrmConfig {
    #[schema(example = "HubSpot")]
    pub name: String,
    pub api_key: String,
    pub api_url: String,
    pub enabled: bool,
    pub last_sync: Option<DateTime<Utc>>,
    pub status: ConnectionStatus,
}

impl CrmConfig {
    /// Cópia segura para devolver ao cliente: só os 4 últimos caracteres da chave.
    pub fn redacted(&self) -> Self {
        let visible: String = {
            let chars: Vec<char> = self.api_key.chars().collect();
            let start = chars.len().saturating_sub(4);
            chars[start..].iter().collect()
        };
        let api_key = if self.api_key.is_empty() {
            String::new()
        } else {
            format!("****{}", visible)
        };

        Self { api_key, ..self.clone() }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectCrmPayload {
    #[schema(example = "hubspot")]
    pub provider_id: String,

    #[serde(default)]
    #[validate(length(max = 512, message = "too_long"))]
    pub api_key: String,

    #[serde(default)]
    #[validate(length(max = 2048, message = "too_long"))]
    #[schema(example = "https://api.hubapi.com")]
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub config: CrmConfig,
    pub synced_leads: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_keeps_only_the_tail_of_the_key() {
        let config = CrmConfig {
            api_key: "sk-live-123456".to_string(),
            ..CrmConfig::default()
        };
        assert_eq!(config.redacted().api_key, "****3456");
        assert_eq!(CrmConfig::default().redacted().api_key, "");
    }

    #[test]
    fn catalog_lookup() {
        assert_eq!(find_provider("zoho").map(|p| p.name), Some("Zoho CRM"));
        assert!(find_provider("dynamics").is_none());
        assert_eq!(CRM_PROVIDERS.iter().filter(|p| p.popular).count(), 2);
    }
}
