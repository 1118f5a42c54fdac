// src/models/lead.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// Canal de aquisição do lead
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LeadSource {
    #[default]
    Website,
    SocialMedia,
    EmailCampaign,
    Referral,
    Event,
    Advertisement,
}

impl LeadSource {
    pub const ALL: [LeadSource; 6] = [
        LeadSource::Website,
        LeadSource::SocialMedia,
        LeadSource::EmailCampaign,
        LeadSource::Referral,
        LeadSource::Event,
        LeadSource::Advertisement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::SocialMedia => "social-media",
            LeadSource::EmailCampaign => "email-campaign",
            LeadSource::Referral => "referral",
            LeadSource::Event => "event",
            LeadSource::Advertisement => "advertisement",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| format!("origem desconhecida: '{}'", s))
    }
}

/// Estado do lead no funil.
///
/// `Converted` e `Lost` são terminais: nenhuma transição sai deles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LeadStatus::Converted | LeadStatus::Lost)
    }

    // Tabela de transições: qualquer estado aberto pode ir para qualquer outro.
    pub fn can_transition_to(self, next: LeadStatus) -> bool {
        match (self, next) {
            (LeadStatus::Converted | LeadStatus::Lost, _) => false,
            (
                LeadStatus::New | LeadStatus::Contacted | LeadStatus::Qualified,
                LeadStatus::New
                | LeadStatus::Contacted
                | LeadStatus::Qualified
                | LeadStatus::Converted
                | LeadStatus::Lost,
            ) => true,
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("status desconhecido: '{}'", s))
    }
}

// --- LEAD (O Dado) ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,

    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@analytical.com")]
    pub email: String,
    pub phone: Option<String>,
    #[schema(example = "Analytical Engines")]
    pub company: String,

    pub job_title: Option<String>,
    pub industry: Option<String>,
    pub message: Option<String>,

    pub source: LeadSource,
    pub status: LeadStatus,

    // Sorteado na captura e nunca recalculado
    #[schema(minimum = 1, maximum = 100, example = 72)]
    pub score: u8,

    pub created_at: DateTime<Utc>,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// --- ENTRADA DO FORMULÁRIO ---

// Os obrigatórios são verificados (com trim) pela LeadFactory;
// aqui só limitamos o tamanho do que chega pela API.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawLeadInput {
    #[serde(default)]
    #[validate(length(max = 100, message = "too_long"))]
    #[schema(example = "Ada")]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "too_long"))]
    #[schema(example = "Lovelace")]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(max = 254, message = "too_long"))]
    #[schema(example = "ada@analytical.com")]
    pub email: String,

    #[validate(length(max = 40, message = "too_long"))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 200, message = "too_long"))]
    #[schema(example = "Analytical Engines")]
    pub company: String,

    #[validate(length(max = 200, message = "too_long"))]
    pub job_title: Option<String>,

    #[validate(length(max = 100, message = "too_long"))]
    #[schema(example = "technology")]
    pub industry: Option<String>,

    #[validate(length(max = 5000, message = "too_long"))]
    pub message: Option<String>,

    pub source: Option<LeadSource>,
}

// --- FILTROS ---

/// Filtro de faceta: "all" ou um valor exato.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet<T> {
    All,
    Only(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::All
    }
}

impl<T: PartialEq> Facet<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Facet<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "all" {
            return Ok(Facet::All);
        }
        s.parse().map(Facet::Only)
    }
}

impl<'de, T> Deserialize<'de> for Facet<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeadQuery {
    pub term: Option<String>,
    pub status: Facet<LeadStatus>,
    pub source: Facet<LeadSource>,
}

// Corpo do PATCH /api/leads/{id}/status
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionStatusPayload {
    #[schema(example = "contacted")]
    pub status: LeadStatus,
}
