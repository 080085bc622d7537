//! Synthetic container builder for unit tests.

use crate::format::{COOKIE_PAGE_TAG, MAGIC, PAGE_HEADER_SIZE};

/// Field values for one synthetic cookie record.
#[derive(Debug, Clone)]
pub(crate) struct RecordSpec {
    pub flag: u32,
    pub url: Vec<u8>,
    pub name: Vec<u8>,
    pub path: Vec<u8>,
    pub value: Vec<u8>,
    pub expires: f64,
    pub last_access: f64,
}

impl RecordSpec {
    pub fn new(url: &str, name: &str, path: &str, value: &str) -> Self {
        Self {
            flag: 0,
            url: url.as_bytes().to_vec(),
            name: name.as_bytes().to_vec(),
            path: path.as_bytes().to_vec(),
            value: value.as_bytes().to_vec(),
            expires: 0.0,
            last_access: 0.0,
        }
    }

    pub fn flag(mut self, flag: u32) -> Self {
        self.flag = flag;
        self
    }

    pub fn times(mut self, expires: f64, last_access: f64) -> Self {
        self.expires = expires;
        self.last_access = last_access;
        self
    }

    /// Encode with the strings packed right after the 56-byte header.
    pub fn encode(&self) -> Vec<u8> {
        let mut strings = Vec::new();
        let mut offsets = [0u32; 4];
        for (slot, field) in [&self.url, &self.name, &self.path, &self.value]
            .into_iter()
            .enumerate()
        {
            offsets[slot] = (56 + strings.len()) as u32;
            strings.extend_from_slice(field);
            strings.push(0);
        }

        let size = (56 + strings.len()) as u32;
        let mut out = Vec::with_capacity(size as usize);
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&self.flag.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        for offset in offsets {
            out.extend_from_slice(&offset.to_le_bytes());
        }
        out.extend_from_slice(&[0u8; 8]);
        out.extend_from_slice(&self.expires.to_le_bytes());
        out.extend_from_slice(&self.last_access.to_le_bytes());
        out.extend_from_slice(&strings);
        out
    }
}

/// Encode a cookie page holding `records` in order.
pub(crate) fn page(records: &[Vec<u8>]) -> Vec<u8> {
    page_with_tag(COOKIE_PAGE_TAG, records)
}

/// Encode a page with an arbitrary type tag.
pub(crate) fn page_with_tag(tag: u32, records: &[Vec<u8>]) -> Vec<u8> {
    // tag + count + offsets + 4-byte zero footer
    let mut next = PAGE_HEADER_SIZE + records.len() * 4 + 4;
    let mut out = Vec::new();
    out.extend_from_slice(&tag.to_be_bytes());
    out.extend_from_slice(&(records.len() as u32).to_le_bytes());
    for record in records {
        out.extend_from_slice(&(next as u32).to_le_bytes());
        next += record.len();
    }
    out.extend_from_slice(&0u32.to_le_bytes());
    for record in records {
        out.extend_from_slice(record);
    }
    out
}

/// Encode a container around already-encoded pages.
pub(crate) fn container(pages: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&(pages.len() as u32).to_be_bytes());
    for page in pages {
        out.extend_from_slice(&(page.len() as u32).to_be_bytes());
    }
    for page in pages {
        out.extend_from_slice(page);
    }
    out
}
