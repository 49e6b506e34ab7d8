pub mod animation;
pub mod config;
pub mod constants;
pub mod deck;
pub mod engine;
pub mod error;
pub mod fragment;
pub mod inline;
pub mod input;
pub mod layout;
pub mod navigation;
pub mod remote;
pub mod render_sync;
pub mod scene;
pub mod slide;
pub mod state;
