pub mod auth;
pub mod tenancy;
pub mod segmentation;
pub mod pagination;
pub mod dashboard;
