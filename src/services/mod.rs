//! Business logic services.

pub mod aggregate;
pub mod compliance;
pub mod identifier;
pub mod ingestion;
pub mod normalizer;
pub mod scan;
pub mod scoring;
