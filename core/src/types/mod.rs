pub mod addon;
pub mod handlers;
