pub mod network_builder;

pub use network_builder::NetworkBuilder;
