//! PostgreSQL implementation of the tender repository.
pub mod connection;
mod tender_repository;

pub use connection::connect;
pub use tender_repository::PostgresTenderRepository;
