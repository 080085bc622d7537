//! Container decoding and file loading.

use flate2::read::GzDecoder;
use memmap2::Mmap;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::DecoderConfig;
use crate::cursor::ByteCursor;
use crate::format::MAGIC;
use crate::page::{Page, RecordFailure};
use crate::record::CookieRecord;
use crate::{Error, Result};

/// Gzip stream magic.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A fully decoded binary cookie container.
#[derive(Debug)]
pub struct Container {
    /// Pages in file order
    pub pages: Vec<Page>,
    /// Bytes after the last page (checksum and metadata), not interpreted
    pub trailer: Vec<u8>,
    /// Hex SHA-256 of the input as supplied, before any decompression
    pub source_sha256: String,
}

impl Container {
    /// Open and decode a container file.
    ///
    /// Gzip-compressed files are decompressed in memory first.
    pub fn open(path: impl AsRef<Path>, config: &DecoderConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            // Empty files cannot be mapped on every platform.
            return Self::from_bytes(&[], config);
        }
        let mmap = unsafe { Mmap::map(&file)? };
        log::debug!("Mapped {:?} ({} bytes)", path, mmap.len());
        Self::from_bytes(&mmap, config)
    }

    /// Decode a container from a complete in-memory buffer.
    pub fn from_bytes(data: &[u8], config: &DecoderConfig) -> Result<Self> {
        let source_sha256 = hex_digest(data);

        if is_gzip(data) {
            let mut decoder = GzDecoder::new(data);
            let mut decompressed = Vec::new();
            decoder
                .read_to_end(&mut decompressed)
                .map_err(|e| Error::Decompress(format!("Gzip decompression failed: {}", e)))?;
            log::debug!(
                "Decompressed gzip input: {} -> {} bytes",
                data.len(),
                decompressed.len()
            );
            return Self::decode(&decompressed, config, source_sha256);
        }

        Self::decode(data, config, source_sha256)
    }

    fn decode(data: &[u8], config: &DecoderConfig, source_sha256: String) -> Result<Self> {
        let mut found = [0u8; 4];
        let head = &data[..data.len().min(4)];
        found[..head.len()].copy_from_slice(head);
        if found != MAGIC {
            return Err(Error::InvalidMagic { found });
        }

        let mut cursor = ByteCursor::new(data);
        cursor.seek(MAGIC.len());
        let page_count = cursor.read_u32_be()?;

        // The size table must be read in full before any page body.
        let table_len = (page_count as usize)
            .checked_mul(4)
            .ok_or(Error::OutOfBounds {
                offset: cursor.position(),
                len: usize::MAX,
                available: data.len(),
            })?;
        let page_sizes: Vec<u32> = cursor
            .read_bytes(table_len)?
            .chunks_exact(4)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        log::debug!("Container declares {} pages: {:?}", page_count, page_sizes);

        let mut pages = Vec::with_capacity(page_sizes.len());
        for (index, &page_size) in page_sizes.iter().enumerate() {
            let body = cursor.read_bytes(page_size as usize)?;
            let page = match Page::decode(body, config) {
                Ok(page) => page,
                Err(error) => {
                    log::warn!("Skipping page {} ({} bytes): {}", index, page_size, error);
                    pages.push(Page::failed(body, error));
                    continue;
                }
            };
            log::debug!(
                "Page {}: {} of {} records decoded",
                index,
                page.record_count(),
                page.declared_count
            );
            pages.push(page);
        }

        let trailer = cursor.rest().to_vec();
        if !trailer.is_empty() {
            log::debug!("{} trailing bytes after last page", trailer.len());
        }

        Ok(Self {
            pages,
            trailer,
            source_sha256,
        })
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All decoded records, in page order then table order.
    pub fn records(&self) -> impl Iterator<Item = &CookieRecord> {
        self.pages.iter().flat_map(|page| page.records.iter())
    }

    /// Total decoded records.
    pub fn record_count(&self) -> usize {
        self.pages.iter().map(Page::record_count).sum()
    }

    /// Record failures, paired with the index of their page.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &RecordFailure)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(index, page)| page.failures.iter().map(move |f| (index, f)))
    }

    /// Pages whose header or offset table could not be read, with their index.
    pub fn page_failures(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.pages
            .iter()
            .enumerate()
            .filter_map(|(index, page)| page.failure.as_ref().map(|e| (index, e)))
    }

    /// Whether no record was decoded.
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[..2] == GZIP_MAGIC
}

fn hex_digest(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
