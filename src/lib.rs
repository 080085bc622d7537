//! binarycookies - A decoder for Apple binary cookie containers.
//!
//! Safari and apps using `NSHTTPCookieStorage` persist cookies in
//! `Cookies.binarycookies` files: a `cook` header, a table of page sizes, and
//! pages of cookie records whose text fields are addressed by relative
//! offsets. This crate decodes such files into a fully materialized
//! [`Container`] and exports the records as a flat table.
//!
//! # Features
//!
//! - **Bounds-checked decoding**: every read is validated, malformed input
//!   yields an error instead of a panic
//! - **Per-record isolation**: one corrupt record is reported and skipped
//!   without losing the rest of the page
//! - **Lossless enumerations**: unknown page tags and cookie flags keep their
//!   raw values
//! - **Gzip input**: compressed containers are decompressed transparently
//! - **Tabular export**: CSV and JSON output for timeline tooling
//!
//! # Quick Start
//!
//! ```ignore
//! use binarycookies::{Container, DecoderConfig, ExportFormat};
//!
//! let container = Container::open("Cookies.binarycookies", &DecoderConfig::default())?;
//! for cookie in container.records() {
//!     println!("{} {}={} [{}]", cookie.url, cookie.name, cookie.value, cookie.flag);
//! }
//!
//! let file = std::fs::File::create("binary_cookies.csv")?;
//! ExportFormat::Csv.write(file, &container)?;
//! ```
//!
//! # Error Handling
//!
//! Header and page-size table errors abort the decode. Errors while decoding
//! a single record are collected on the page as [`RecordFailure`] values and
//! the remaining records are still decoded.

mod error;
#[cfg(test)]
mod fixture;

pub mod config;
pub mod container;
pub mod cursor;
pub mod export;
pub mod format;
pub mod page;
pub mod record;
pub mod timestamp;

// Re-export core types
pub use error::{Error, Result};

pub use config::{DecoderConfig, TimeZone};
pub use container::Container;
pub use cursor::ByteCursor;
pub use export::{ExportFormat, ExportRow};
pub use format::{CookieFlag, PageType, COCOA_EPOCH_DELTA, COOKIE_PAGE_TAG, MAGIC};
pub use page::{Page, RecordFailure};
pub use record::{CookieField, CookieRecord, FieldOffsets};
pub use timestamp::CocoaTimestamp;
