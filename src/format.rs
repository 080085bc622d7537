//! Binary cookie container format constants and structures.
//!
//! File structure:
//! ```text
//! +----------------------+
//! |  "cook"              |  4 bytes magic
//! |  page_count (BE u32) |
//! |  page_size  (BE u32) |  x page_count
//! +----------------------+
//! |  PAGE 0              |  page_size[0] bytes
//! +----------------------+
//! |  PAGE 1              |
//! +----------------------+
//! |  ...                 |
//! +----------------------+
//! |  trailer             |  checksum and plist, not interpreted
//! +----------------------+
//! ```
//!
//! Page structure:
//! ```text
//! +-----------------------+
//! |  page_tag (BE u32)    |  0x00000100 for cookie pages
//! |  record_count (LE u32)|
//! |  record_offset (LE)   |  x record_count, relative to page start
//! +-----------------------+
//! |  records ...          |
//! +-----------------------+
//! ```
//!
//! Record structure (all little-endian, offsets relative to record start):
//! ```text
//!  0..4   size           informational only
//!  4..8   reserved
//!  8..12  flag
//! 12..16  reserved
//! 16..32  url, name, path, value offsets
//! 32..40  reserved (header footer)
//! 40..48  expiry        f64 Cocoa seconds
//! 48..56  last access   f64 Cocoa seconds
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

/// Magic bytes at the start of a binary cookie container.
pub const MAGIC: [u8; 4] = *b"cook";

/// Container header size: magic plus page count.
pub const CONTAINER_HEADER_SIZE: usize = 8;

/// Page type tag identifying a cookie page.
pub const COOKIE_PAGE_TAG: u32 = 0x0000_0100;

/// Page header size: type tag plus record count.
pub const PAGE_HEADER_SIZE: usize = 8;

/// Seconds between the Unix epoch and the Cocoa epoch (2001-01-01T00:00:00Z).
pub const COCOA_EPOCH_DELTA: i64 = 978_307_200;

/// Byte spans of the fixed cookie record header.
pub mod record_layout {
    use std::ops::Range;

    pub const SIZE: Range<usize> = 0..4;
    pub const RESERVED_1: Range<usize> = 4..8;
    pub const FLAG: Range<usize> = 8..12;
    pub const RESERVED_2: Range<usize> = 12..16;
    pub const URL_OFFSET: Range<usize> = 16..20;
    pub const NAME_OFFSET: Range<usize> = 20..24;
    pub const PATH_OFFSET: Range<usize> = 24..28;
    pub const VALUE_OFFSET: Range<usize> = 28..32;
    pub const FOOTER: Range<usize> = 32..40;
    pub const EXPIRES: Range<usize> = 40..48;
    pub const LAST_ACCESS: Range<usize> = 48..56;

    /// Length of the fixed header preceding the string area.
    pub const HEADER_LEN: usize = LAST_ACCESS.end;
}

/// Page type, as named by the leading big-endian tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageType {
    /// A page holding cookie records
    Cookies,
    /// Any other tag, preserved verbatim
    Unrecognized(u32),
}

impl PageType {
    /// Convert from the raw page tag.
    pub fn from_u32(tag: u32) -> Self {
        match tag {
            COOKIE_PAGE_TAG => PageType::Cookies,
            other => PageType::Unrecognized(other),
        }
    }

    /// Convert back to the raw page tag.
    pub fn as_u32(self) -> u32 {
        match self {
            PageType::Cookies => COOKIE_PAGE_TAG,
            PageType::Unrecognized(tag) => tag,
        }
    }

    /// Whether this is a cookie page.
    pub fn is_cookies(self) -> bool {
        self == PageType::Cookies
    }
}

/// Cookie attribute flag.
///
/// Values outside the known set are kept as [`CookieFlag::Unrecognized`]
/// rather than coerced to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CookieFlag {
    #[default]
    None,
    Secure,
    HttpOnly,
    SecureHttpOnly,
    Unrecognized(u32),
}

impl CookieFlag {
    /// Convert from the raw flag value.
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => CookieFlag::None,
            1 => CookieFlag::Secure,
            2 => CookieFlag::HttpOnly,
            3 => CookieFlag::SecureHttpOnly,
            other => CookieFlag::Unrecognized(other),
        }
    }

    /// Convert back to the raw flag value.
    pub fn as_u32(self) -> u32 {
        match self {
            CookieFlag::None => 0,
            CookieFlag::Secure => 1,
            CookieFlag::HttpOnly => 2,
            CookieFlag::SecureHttpOnly => 3,
            CookieFlag::Unrecognized(value) => value,
        }
    }

    /// Whether the raw value is one of the known flags.
    pub fn is_recognized(self) -> bool {
        !matches!(self, CookieFlag::Unrecognized(_))
    }

    /// Whether the Secure attribute is set.
    pub fn is_secure(self) -> bool {
        matches!(self, CookieFlag::Secure | CookieFlag::SecureHttpOnly)
    }

    /// Whether the HttpOnly attribute is set.
    pub fn is_http_only(self) -> bool {
        matches!(self, CookieFlag::HttpOnly | CookieFlag::SecureHttpOnly)
    }
}

impl fmt::Display for CookieFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieFlag::None => f.write_str("none"),
            CookieFlag::Secure => f.write_str("Secure"),
            CookieFlag::HttpOnly => f.write_str("HTTP"),
            CookieFlag::SecureHttpOnly => f.write_str("Secure/HTTP"),
            CookieFlag::Unrecognized(value) => write!(f, "unknown({})", value),
        }
    }
}

impl Serialize for CookieFlag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
