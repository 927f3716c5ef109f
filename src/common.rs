pub mod error;
pub mod navigation;
