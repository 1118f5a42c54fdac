// src/services/status_service.rs

use crate::{
    common::error::AppError,
    models::lead::{Lead, LeadStatus},
};

/// Aplica a máquina de estados ao lead.
///
/// Devolve uma cópia com o novo status; em caso de erro o lead de entrada
/// não é tocado. Mudar para o status atual (não terminal) é um no-op.
pub fn transition(lead: &Lead, next: LeadStatus) -> Result<Lead, AppError> {
    if !lead.status.can_transition_to(next) {
        return Err(AppError::InvalidTransition {
            from: lead.status,
            to: next,
        });
    }

    Ok(Lead {
        status: next,
        ..lead.clone()
    })
}
