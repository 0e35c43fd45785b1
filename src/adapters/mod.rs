//! Concrete adapter implementations for ports.

#[cfg(feature = "postgres")]
pub mod postgres_adapter;
pub mod csv_hedge_adapter;
pub mod csv_template_sink;
pub mod file_config_adapter;
