//! Adapters implementing the ports against concrete infrastructure

pub mod csv_metrics;
pub mod in_memory_repository;
pub mod msgpack_repository;

pub use csv_metrics::CsvMetricsWriter;
pub use in_memory_repository::InMemoryRepository;
pub use msgpack_repository::MsgPackRepository;
