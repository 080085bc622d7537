//! Cookie record decoding.

use std::fmt;

use serde::Serialize;

use crate::config::DecoderConfig;
use crate::cursor::ByteCursor;
use crate::format::{record_layout, CookieFlag};
use crate::timestamp::CocoaTimestamp;
use crate::{Error, Result};

/// One of the four variable-length text fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CookieField {
    Url,
    Name,
    Path,
    Value,
}

impl CookieField {
    /// Fields in the order their offsets are stored.
    pub const ALL: [CookieField; 4] = [
        CookieField::Url,
        CookieField::Name,
        CookieField::Path,
        CookieField::Value,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CookieField::Url => "URL",
            CookieField::Name => "Name",
            CookieField::Path => "Path",
            CookieField::Value => "Value",
        }
    }

    fn offset_span(self) -> std::ops::Range<usize> {
        match self {
            CookieField::Url => record_layout::URL_OFFSET,
            CookieField::Name => record_layout::NAME_OFFSET,
            CookieField::Path => record_layout::PATH_OFFSET,
            CookieField::Value => record_layout::VALUE_OFFSET,
        }
    }
}

impl fmt::Display for CookieField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field offsets stored in the record header, relative to the record start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FieldOffsets {
    pub url: u32,
    pub name: u32,
    pub path: u32,
    pub value: u32,
}

impl FieldOffsets {
    pub fn get(&self, field: CookieField) -> u32 {
        match field {
            CookieField::Url => self.url,
            CookieField::Name => self.name,
            CookieField::Path => self.path,
            CookieField::Value => self.value,
        }
    }

    fn set(&mut self, field: CookieField, offset: u32) {
        match field {
            CookieField::Url => self.url = offset,
            CookieField::Name => self.name = offset,
            CookieField::Path => self.path = offset,
            CookieField::Value => self.value = offset,
        }
    }
}

/// A decoded cookie record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CookieRecord {
    /// Declared record size; informational, never used for bounds
    pub size: u32,
    pub flag: CookieFlag,
    pub offsets: FieldOffsets,
    pub expires: CocoaTimestamp,
    pub expires_hr: String,
    pub last_access: CocoaTimestamp,
    pub last_access_hr: String,
    pub url: String,
    pub name: String,
    pub path: String,
    pub value: String,
    /// Fields whose bytes were not valid UTF-8 and were decoded lossily
    pub lossy_fields: Vec<CookieField>,
}

impl CookieRecord {
    /// Decode a record from a slice starting at its first byte.
    ///
    /// The slice should run to the end of the page: string fields may lie
    /// beyond the declared record size.
    pub fn decode(data: &[u8], config: &DecoderConfig) -> Result<Self> {
        let cursor = ByteCursor::new(data);

        let size = cursor.u32_le_at(record_layout::SIZE.start)?;
        let raw_flag = cursor.u32_le_at(record_layout::FLAG.start)?;
        let flag = CookieFlag::from_u32(raw_flag);
        if !flag.is_recognized() {
            log::warn!("Unrecognized cookie flag {:#x}, keeping raw value", raw_flag);
        }

        let mut offsets = FieldOffsets::default();
        for field in CookieField::ALL {
            offsets.set(field, cursor.u32_le_at(field.offset_span().start)?);
        }

        let expires = CocoaTimestamp(cursor.f64_le_at(record_layout::EXPIRES.start)?);
        let last_access = CocoaTimestamp(cursor.f64_le_at(record_layout::LAST_ACCESS.start)?);

        let mut lossy_fields = Vec::new();
        let mut texts: [String; 4] = Default::default();
        for (slot, field) in CookieField::ALL.into_iter().enumerate() {
            let (text, lossy) = read_text(&cursor, field, offsets.get(field), config)?;
            if lossy {
                lossy_fields.push(field);
            }
            texts[slot] = text;
        }
        let [url, name, path, value] = texts;

        Ok(Self {
            size,
            flag,
            offsets,
            expires,
            expires_hr: expires.format_or_invalid(config.time_zone),
            last_access,
            last_access_hr: last_access.format_or_invalid(config.time_zone),
            url,
            name,
            path,
            value,
            lossy_fields,
        })
    }

    /// Get a text field by kind.
    pub fn field(&self, field: CookieField) -> &str {
        match field {
            CookieField::Url => &self.url,
            CookieField::Name => &self.name,
            CookieField::Path => &self.path,
            CookieField::Value => &self.value,
        }
    }

    /// Whether any text field needed replacement characters.
    pub fn has_lossy_text(&self) -> bool {
        !self.lossy_fields.is_empty()
    }
}

/// Read a null-terminated text field, reporting whether it was decoded lossily.
fn read_text(
    cursor: &ByteCursor<'_>,
    field: CookieField,
    offset: u32,
    config: &DecoderConfig,
) -> Result<(String, bool)> {
    let offset = offset as usize;
    let bytes = cursor.cstr_at(offset)?;
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok((text.to_string(), false)),
        Err(_) if config.strict_text => Err(Error::InvalidText {
            field: field.name(),
            offset,
        }),
        Err(_) => {
            log::warn!(
                "{} field at offset {} is not valid UTF-8, replacing invalid bytes",
                field,
                offset
            );
            Ok((String::from_utf8_lossy(bytes).into_owned(), true))
        }
    }
}
