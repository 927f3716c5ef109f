pub mod auth;
pub mod dashboard;
pub mod admin;
pub mod companies;
