//! List responses from the objects and multi-fetch APIs.
//!
//! Each payload carries a `next`/`prev` cursor pair, so each one is also a
//! [`HashedPage`]. The impls are independent; rebuilding one of these from
//! another page yields an empty `data` list with the cursors and count copied.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConversionError;
use crate::page::HashedPage;

/// Status reported by a page rebuilt from another page.
const SYNTHETIC_STATUS: u16 = 200;

/// Channel metadata object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMetadata {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub custom: Option<Value>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default, rename = "eTag")]
    pub etag: Option<String>,
}

/// A user's membership in a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub channel: ChannelMetadata,
    #[serde(default)]
    pub custom: Option<Value>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default, rename = "eTag")]
    pub etag: Option<String>,
}

/// Response of the channel metadata listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelsMetadataResponse {
    pub status: u16,
    #[serde(default)]
    pub data: Vec<ChannelMetadata>,
    #[serde(default)]
    pub total_count: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

impl HashedPage for ChannelsMetadataResponse {
    fn start(&self) -> Option<&str> {
        self.next.as_deref()
    }

    fn end(&self) -> Option<&str> {
        self.prev.as_deref()
    }

    fn total_count(&self) -> Option<u32> {
        self.total_count
    }

    fn from_hashed(other: &dyn HashedPage) -> Result<Self, ConversionError> {
        Ok(Self {
            status: SYNTHETIC_STATUS,
            data: Vec::new(),
            total_count: other.total_count(),
            next: other.start().map(str::to_owned),
            prev: other.end().map(str::to_owned),
        })
    }
}

/// Response of the membership listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipsResponse {
    pub status: u16,
    #[serde(default)]
    pub data: Vec<Membership>,
    #[serde(default)]
    pub total_count: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

impl HashedPage for MembershipsResponse {
    fn start(&self) -> Option<&str> {
        self.next.as_deref()
    }

    fn end(&self) -> Option<&str> {
        self.prev.as_deref()
    }

    fn total_count(&self) -> Option<u32> {
        self.total_count
    }

    fn from_hashed(other: &dyn HashedPage) -> Result<Self, ConversionError> {
        Ok(Self {
            status: SYNTHETIC_STATUS,
            data: Vec::new(),
            total_count: other.total_count(),
            next: other.start().map(str::to_owned),
            prev: other.end().map(str::to_owned),
        })
    }
}

/// Response of a multi-fetch listing, generic over the fetched item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchMultipleResponse<T> {
    pub status: u16,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

impl<T> HashedPage for FetchMultipleResponse<T> {
    fn start(&self) -> Option<&str> {
        self.next.as_deref()
    }

    fn end(&self) -> Option<&str> {
        self.prev.as_deref()
    }

    fn total_count(&self) -> Option<u32> {
        self.total_count
    }

    fn from_hashed(other: &dyn HashedPage) -> Result<Self, ConversionError> {
        Ok(Self {
            status: SYNTHETIC_STATUS,
            data: Vec::new(),
            total_count: other.total_count(),
            next: other.start().map(str::to_owned),
            prev: other.end().map(str::to_owned),
        })
    }
}
