// src/services/lead_factory.rs

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::{
    common::error::{AppError, field_error},
    models::lead::{Lead, LeadStatus, RawLeadInput},
};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 100;

/// De onde vem o score de um lead novo. Injetável para os testes.
pub trait ScoreSource: Send + Sync {
    fn next_score(&self) -> u8;
}

/// Score uniforme em [1, 100].
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomScore;

impl ScoreSource for RandomScore {
    fn next_score(&self) -> u8 {
        rand::rng().random_range(MIN_SCORE..=MAX_SCORE)
    }
}

#[derive(Clone)]
pub struct LeadFactory {
    scores: Arc<dyn ScoreSource>,
}

impl LeadFactory {
    pub fn new(scores: Arc<dyn ScoreSource>) -> Self {
        Self { scores }
    }

    /// Valida a entrada do formulário e monta um lead completo.
    ///
    /// Não grava nada: persistir é um passo separado, na store.
    pub fn capture(&self, input: RawLeadInput) -> Result<Lead, AppError> {
        let mut errors = validator::ValidationErrors::new();

        let first_name = required(&mut errors, "firstName", &input.first_name);
        let last_name = required(&mut errors, "lastName", &input.last_name);
        let email = required(&mut errors, "email", &input.email);
        let company = required(&mut errors, "company", &input.company);

        if !email.is_empty() && !email.contains('@') {
            field_error(&mut errors, "email", "invalid_email");
        }

        if !errors.errors().is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        Ok(Lead {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            phone: optional(input.phone),
            company,
            job_title: optional(input.job_title),
            industry: optional(input.industry),
            message: optional(input.message),
            source: input.source.unwrap_or_default(),
            status: LeadStatus::New,
            score: self.scores.next_score().clamp(MIN_SCORE, MAX_SCORE),
            created_at: Utc::now(),
        })
    }
}

fn required(
    errors: &mut validator::ValidationErrors,
    field: &'static str,
    value: &str,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        field_error(errors, field, "required");
    }
    trimmed.to_string()
}

// Campo opcional em branco vira None
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
