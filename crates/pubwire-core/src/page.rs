//! Paging cursors.
//!
//! Two cursor shapes exist on the service:
//! - Bounded pages: a timetoken range plus a limit (message history).
//! - Hashed pages: opaque next/prev hashes plus a total count (objects APIs).
//!
//! Both are capabilities: any type implementing the trait can be rebuilt as
//! any other implementing type via `transcode`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::same_type;
use crate::error::ConversionError;
use crate::timetoken::Timetoken;

/// A response page bounded by one or more timetokens.
pub trait BoundedPage {
    /// Start value for the next set of remote data.
    fn start(&self) -> Option<Timetoken>;
    /// Bounded end value that will eventually be fetched to.
    fn end(&self) -> Option<Timetoken>;
    /// Previous limiting value, if any.
    fn limit(&self) -> Option<u32>;

    /// Build this type from any other bounded page.
    fn from_bounded(other: &dyn BoundedPage) -> Result<Self, ConversionError>
    where
        Self: Sized;

    /// Convert into `T`, returning a copy when `T` is already `Self`.
    fn transcode<T>(&self) -> Result<T, ConversionError>
    where
        Self: Sized + 'static,
        T: BoundedPage + Clone + 'static,
    {
        if let Some(same) = same_type::<Self, T>(self) {
            return Ok(same);
        }
        T::from_bounded(self)
    }
}

/// Default [`BoundedPage`] implementation.
///
/// Deserializing `{}` yields the all-empty page that [`BoundedPageBase::new`] refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundedPageBase {
    #[serde(default, with = "crate::timetoken::option")]
    start: Option<Timetoken>,
    #[serde(default, with = "crate::timetoken::option")]
    end: Option<Timetoken>,
    #[serde(default)]
    limit: Option<u32>,
}

impl BoundedPageBase {
    /// Returns `None` for an empty page (no start, no end, no limit).
    pub fn new(start: Option<Timetoken>, end: Option<Timetoken>, limit: Option<u32>) -> Option<Self> {
        if start.is_none() && end.is_none() && limit.is_none() {
            return None;
        }
        Some(Self { start, end, limit })
    }

    pub fn with_limit(self, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }
}

impl BoundedPage for BoundedPageBase {
    fn start(&self) -> Option<Timetoken> {
        self.start
    }

    fn end(&self) -> Option<Timetoken> {
        self.end
    }

    fn limit(&self) -> Option<u32> {
        self.limit
    }

    fn from_bounded(other: &dyn BoundedPage) -> Result<Self, ConversionError> {
        Ok(Self {
            start: other.start(),
            end: other.end(),
            limit: other.limit(),
        })
    }
}

impl fmt::Display for BoundedPageBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start={} end={} limit={}",
            OrDash(self.start),
            OrDash(self.end),
            OrDash(self.limit)
        )
    }
}

/// A cursor for the next/previous page of remote data.
pub trait HashedPage {
    /// Hash representing the next set of data.
    fn start(&self) -> Option<&str>;
    /// Hash representing the previous set of data.
    fn end(&self) -> Option<&str>;
    /// Total count of all objects within range.
    fn total_count(&self) -> Option<u32>;

    /// Build this type from any other hashed page.
    fn from_hashed(other: &dyn HashedPage) -> Result<Self, ConversionError>
    where
        Self: Sized;

    /// Same as [`HashedPage::start`], named after the `next` API parameter.
    fn next(&self) -> Option<&str> {
        self.start()
    }

    /// Same as [`HashedPage::end`], named after the `prev` API parameter.
    fn prev(&self) -> Option<&str> {
        self.end()
    }

    /// Convert into `T`, returning a copy when `T` is already `Self`.
    fn transcode<T>(&self) -> Result<T, ConversionError>
    where
        Self: Sized + 'static,
        T: HashedPage + Clone + 'static,
    {
        if let Some(same) = same_type::<Self, T>(self) {
            return Ok(same);
        }
        T::from_hashed(self)
    }
}

/// Default [`HashedPage`] implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashedPageBase {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub total_count: Option<u32>,
}

impl HashedPageBase {
    pub fn new(start: Option<String>, end: Option<String>, total_count: Option<u32>) -> Self {
        Self {
            start,
            end,
            total_count,
        }
    }
}

impl HashedPage for HashedPageBase {
    fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    fn total_count(&self) -> Option<u32> {
        self.total_count
    }

    fn from_hashed(other: &dyn HashedPage) -> Result<Self, ConversionError> {
        Ok(Self::new(
            other.start().map(str::to_owned),
            other.end().map(str::to_owned),
            other.total_count(),
        ))
    }
}

impl fmt::Display for HashedPageBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "next={} prev={} total={}",
            OrDash(self.start.as_deref()),
            OrDash(self.end.as_deref()),
            OrDash(self.total_count)
        )
    }
}

struct OrDash<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for OrDash<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("-"),
        }
    }
}
