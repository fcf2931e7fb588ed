pub mod analysis;
pub mod builder;
pub mod components;
pub mod event;
pub mod execution;
pub mod types;
