//! Wxmap EDR - diagnostic product dumper for OGC EDR APIs
//!
//! Queries every parameter/level combination advertised by an EDR endpoint
//! and dumps the responses to JSON files for manual verification, plus a
//! text/JSON/HTML summary of what came back.
//!
//! The crawl is strictly sequential: one request at a time, a fixed timeout
//! per request, and no retries. A failed request is recorded in the run's
//! error list and the crawl moves on; the run always completes.

pub mod client;
pub mod dump;
pub mod error;
pub mod report;

pub use client::EdrClient;
pub use dump::{DumpConfig, DumpFormat, ProductDumper, QueryType, Stats};
pub use error::{Error, Result};
