//! Page computation over an ordered snapshot.
//!
//! # Responsibility
//! - Turn `(page, size)` into one bounded slice plus totals.
//!
//! # Invariants
//! - `paginate` is pure: it reads only the slice it is handed.
//! - Pages past the end are empty, not errors.
//! - `total_pages == ceil(total_elements / size)`, and `0` when empty.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Invalid paging input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    InvalidSize { size: u32 },
    SizeTooLarge { size: u32, max: u32 },
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSize { size } => write!(f, "page size must be at least 1, got {size}"),
            Self::SizeTooLarge { size, max } => {
                write!(f, "page size must be at most {max}, got {size}")
            }
        }
    }
}

impl Error for PageError {}

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub content: Vec<T>,
    /// Zero-based page index, echoed from the request.
    pub page: u32,
    /// Requested page size, echoed from the request.
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

/// Caller-facing paging parameters with transport defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Checks `size` against `1..=MAX_PAGE_SIZE`.
    pub fn checked(self) -> Result<Self, PageError> {
        if self.size == 0 {
            return Err(PageError::InvalidSize { size: self.size });
        }
        if self.size > MAX_PAGE_SIZE {
            return Err(PageError::SizeTooLarge {
                size: self.size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(self)
    }
}

/// Slices `snapshot` into page `page` of `size` items.
///
/// # Errors
/// - `PageError::InvalidSize` when `size == 0`.
pub fn paginate<T: Clone>(
    snapshot: &[T],
    page: u32,
    size: u32,
) -> Result<PageResult<T>, PageError> {
    if size == 0 {
        return Err(PageError::InvalidSize { size });
    }

    let total = snapshot.len() as u64;
    let size_wide = u64::from(size);
    let start = u64::from(page) * size_wide;
    let content = if start >= total {
        Vec::new()
    } else {
        let end = (start + size_wide).min(total);
        snapshot[start as usize..end as usize].to_vec()
    };

    Ok(PageResult {
        content,
        page,
        size,
        total_elements: total,
        total_pages: total.div_ceil(size_wide),
    })
}
