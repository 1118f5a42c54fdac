// src/services/filter_engine.rs

use crate::models::lead::{Lead, LeadQuery};

/// Devolve os leads que casam com a busca, na mesma ordem da entrada.
///
/// Termo (sem diferenciar maiúsculas) em nome, sobrenome, e-mail ou empresa;
/// status e origem exatos. Os três filtros são combinados com E.
/// O termo é usado como veio, sem trim; só o termo vazio desliga a busca.
pub fn filter(leads: &[Lead], query: &LeadQuery) -> Vec<Lead> {
    let term = query
        .term
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    leads
        .iter()
        .filter(|lead| term.as_deref().is_none_or(|t| matches_term(lead, t)))
        .filter(|lead| query.status.matches(&lead.status))
        .filter(|lead| query.source.matches(&lead.source))
        .cloned()
        .collect()
}

fn matches_term(lead: &Lead, term: &str) -> bool {
    [&lead.first_name, &lead.last_name, &lead.email, &lead.company]
        .into_iter()
        .any(|field| field.to_lowercase().contains(term))
}
