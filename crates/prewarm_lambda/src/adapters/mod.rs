pub mod control_plane;
pub mod data_plane;
pub mod postgres;
pub mod rds;
pub mod secret_store;
pub mod secrets_manager;
