pub mod engine;
pub mod page;
pub mod tabs;
