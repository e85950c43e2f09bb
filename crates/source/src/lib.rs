//! Data-source access layer for Firmsight.
//!
//! Report data lives in a remote tabular source that caps how many rows
//! one request may return. This crate owns the collaborator trait for
//! that source, the exhaustive offset-paged fetch loop, an in-memory
//! source backing uploaded snapshots and tests, and the report
//! assemblers that wire windows + filters + aggregation together per
//! report family.

pub mod assembler;
pub mod fetch;
pub mod memory;
pub mod source;

pub use assembler::{ReportAssembler, ReportError};
pub use fetch::{PAGE_SIZE, fetch_all};
pub use memory::MemorySource;
pub use source::{SourceError, TableSource};
