//! Page decoding.

use crate::config::DecoderConfig;
use crate::cursor::ByteCursor;
use crate::format::PageType;
use crate::record::CookieRecord;
use crate::{Error, Result};

/// A record that could not be decoded.
#[derive(Debug)]
pub struct RecordFailure {
    /// Position in the page's record offset table
    pub index: usize,
    /// Record start within the page
    pub offset: u32,
    pub error: Error,
}

/// A decoded page.
#[derive(Debug)]
pub struct Page {
    /// Page size as declared in the container header
    pub size: u32,
    pub page_type: PageType,
    /// Record count from the page header; zero for unrecognized pages
    pub declared_count: u32,
    /// Record start offsets, in table order
    pub record_offsets: Vec<u32>,
    /// Successfully decoded records, in table order
    pub records: Vec<CookieRecord>,
    pub failures: Vec<RecordFailure>,
    /// Set when the page header or offset table could not be read
    pub failure: Option<Error>,
}

impl Page {
    /// Decode one page body.
    ///
    /// Errors in the page header or offset table are returned; errors while
    /// decoding an individual record are collected in `failures`.
    pub fn decode(data: &[u8], config: &DecoderConfig) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        let size = data.len() as u32;

        let page_type = PageType::from_u32(cursor.read_u32_be()?);
        if let PageType::Unrecognized(tag) = page_type {
            log::warn!("Skipping page with unrecognized type tag {:#010x}", tag);
            return Ok(Self {
                size,
                page_type,
                declared_count: 0,
                record_offsets: Vec::new(),
                records: Vec::new(),
                failures: Vec::new(),
                failure: None,
            });
        }

        let declared_count = cursor.read_u32_le()?;
        let table_len = (declared_count as usize)
            .checked_mul(4)
            .ok_or(Error::OutOfBounds {
                offset: cursor.position(),
                len: usize::MAX,
                available: data.len(),
            })?;
        let record_offsets: Vec<u32> = cursor
            .read_bytes(table_len)?
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        log::debug!(
            "Page of {} bytes declares {} records",
            data.len(),
            declared_count
        );

        let mut records = Vec::with_capacity(record_offsets.len());
        let mut failures = Vec::new();
        for (index, &offset) in record_offsets.iter().enumerate() {
            match decode_record_at(data, offset, config) {
                Ok(record) => records.push(record),
                Err(error) => {
                    log::warn!(
                        "Skipping record {} at page offset {}: {}",
                        index,
                        offset,
                        error
                    );
                    failures.push(RecordFailure {
                        index,
                        offset,
                        error,
                    });
                }
            }
        }

        Ok(Self {
            size,
            page_type,
            declared_count,
            record_offsets,
            records,
            failures,
            failure: None,
        })
    }

    /// A page whose header or offset table could not be read.
    ///
    /// The type tag and record count are kept when the body is long enough
    /// to hold them; a body too short for a tag is reported as tag `0`.
    pub fn failed(data: &[u8], error: Error) -> Self {
        let cursor = ByteCursor::new(data);
        let page_type = PageType::from_u32(cursor.u32_be_at(0).unwrap_or(0));
        Self {
            size: data.len() as u32,
            page_type,
            declared_count: cursor.u32_le_at(4).unwrap_or(0),
            record_offsets: Vec::new(),
            records: Vec::new(),
            failures: Vec::new(),
            failure: Some(error),
        }
    }

    /// Number of decoded records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the page structure and every declared record decoded.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.failures.is_empty()
    }
}

/// Decode the record starting at `offset`, with the slice running to page end.
fn decode_record_at(page: &[u8], offset: u32, config: &DecoderConfig) -> Result<CookieRecord> {
    let start = offset as usize;
    let body = match page.get(start..) {
        Some(body) if !body.is_empty() => body,
        _ => {
            return Err(Error::OutOfBounds {
                offset: start,
                len: 1,
                available: page.len(),
            })
        }
    };
    CookieRecord::decode(body, config)
}
