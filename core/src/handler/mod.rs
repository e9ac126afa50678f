pub mod addons;
pub mod pagination;
