pub mod guard;
pub mod auth;
pub mod rbac;
pub mod navigation;
