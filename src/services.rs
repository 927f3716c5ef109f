pub mod auth;
pub mod role_helpers;
pub mod dashboard_service;
pub mod admin_service;
pub mod company_service;
pub mod segmentation_service;
