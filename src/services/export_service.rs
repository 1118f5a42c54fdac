// src/services/export_service.rs

use crate::models::lead::Lead;

pub const EXPORT_HEADER: [&str; 10] = [
    "Name",
    "Email",
    "Phone",
    "Company",
    "Job Title",
    "Industry",
    "Source",
    "Status",
    "Score",
    "Created",
];

// Igual ao `toLocaleDateString()` em en-US: 3/7/2026
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Gera o CSV de exportação: cabeçalho fixo + uma linha por lead.
pub fn serialize(leads: &[Lead], date_format: &str) -> String {
    let mut lines = Vec::with_capacity(leads.len() + 1);
    lines.push(EXPORT_HEADER.join(","));

    for lead in leads {
        let row = [
            lead.full_name(),
            lead.email.clone(),
            lead.phone.clone().unwrap_or_default(),
            lead.company.clone(),
            lead.job_title.clone().unwrap_or_default(),
            lead.industry.clone().unwrap_or_default(),
            lead.source.to_string(),
            lead.status.to_string(),
            lead.score.to_string(),
            lead.created_at.format(date_format).to_string(),
        ];
        let escaped: Vec<String> = row.iter().map(|field| csv_escape(field)).collect();
        lines.push(escaped.join(","));
    }

    lines.join("\n")
}

/// Aspas em volta quando o valor tem vírgula, aspas ou quebra de linha.
fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
