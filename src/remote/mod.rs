pub mod engine;
pub mod loader;
