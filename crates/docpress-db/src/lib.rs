//! Persistence for conversion history.

pub mod db;

pub use db::{
    create_record_store, ConversionRecordStore, InMemoryConversionRepository,
    PgConversionRepository,
};
