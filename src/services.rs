pub mod crm_service;
pub mod dashboard_service;
pub mod export_service;
pub mod filter_engine;
pub mod lead_factory;
pub mod lead_service;
pub mod status_service;

pub use crm_service::CrmService;
pub use dashboard_service::DashboardService;
pub use lead_service::LeadService;
