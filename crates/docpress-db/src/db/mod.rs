//! Conversion record repositories
//!
//! `ConversionRecordStore` is the seam the request pipeline writes status
//! transitions to. Postgres backs it when a database is configured;
//! otherwise records live in process memory.

mod conversion;
mod memory;
mod postgres;

pub use conversion::{create_record_store, ConversionRecordStore};
pub use memory::InMemoryConversionRepository;
pub use postgres::PgConversionRepository;
