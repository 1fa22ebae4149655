//! Cursor capability tests: identity fast path, cross-type rebuilds, rejection.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use assert_matches::assert_matches;

use pubwire_core::page::{BoundedPage, BoundedPageBase, HashedPage, HashedPageBase};
use pubwire_core::response::{ChannelMetadata, ChannelsMetadataResponse, FetchMultipleResponse, MembershipsResponse};
use pubwire_core::{ConversionError, PubwireError, Timetoken};

/// Caller-side page type that only accepts pages carrying a total count.
#[derive(Debug, Clone, PartialEq)]
struct CountedPage {
    cursor: Option<String>,
    back: Option<String>,
    count: u32,
}

impl HashedPage for CountedPage {
    fn start(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn end(&self) -> Option<&str> {
        self.back.as_deref()
    }

    fn total_count(&self) -> Option<u32> {
        Some(self.count)
    }

    fn from_hashed(other: &dyn HashedPage) -> Result<Self, ConversionError> {
        let count = other
            .total_count()
            .ok_or_else(|| ConversionError::new::<Self>("total count required"))?;
        Ok(Self {
            cursor: other.start().map(str::to_owned),
            back: other.end().map(str::to_owned),
            count,
        })
    }
}

/// Caller-side history window.
#[derive(Debug, Clone, PartialEq)]
struct Window {
    from: Option<Timetoken>,
    to: Option<Timetoken>,
    max: Option<u32>,
}

impl BoundedPage for Window {
    fn start(&self) -> Option<Timetoken> {
        self.from
    }

    fn end(&self) -> Option<Timetoken> {
        self.to
    }

    fn limit(&self) -> Option<u32> {
        self.max
    }

    fn from_bounded(other: &dyn BoundedPage) -> Result<Self, ConversionError> {
        Ok(Self {
            from: other.start(),
            to: other.end(),
            max: other.limit(),
        })
    }
}

fn channels_page() -> ChannelsMetadataResponse {
    ChannelsMetadataResponse {
        status: 200,
        data: vec![ChannelMetadata {
            id: "room1".into(),
            name: Some("Room 1".into()),
            description: None,
            custom: None,
            updated: None,
            etag: Some("AbC".into()),
        }],
        total_count: Some(42),
        next: Some("MTAw".into()),
        prev: Some("MA".into()),
    }
}

#[test]
fn empty_bounded_page_is_rejected() {
    assert_eq!(BoundedPageBase::new(None, None, None), None);

    let only_start = BoundedPageBase::new(Some(10), None, None).unwrap();
    assert_eq!((only_start.start(), only_start.end(), only_start.limit()), (Some(10), None, None));

    let only_end = BoundedPageBase::new(None, Some(20), None).unwrap();
    assert_eq!((only_end.start(), only_end.end(), only_end.limit()), (None, Some(20), None));

    let only_limit = BoundedPageBase::new(None, None, Some(25)).unwrap();
    assert_eq!((only_limit.start(), only_limit.end(), only_limit.limit()), (None, None, Some(25)));
}

#[test]
fn same_type_transcode_is_identity() {
    let bounded = BoundedPageBase::new(Some(1), Some(2), Some(3)).unwrap();
    assert_eq!(bounded.transcode::<BoundedPageBase>().unwrap(), bounded);

    let page = channels_page();
    // data survives only because no rebuild happened
    assert_eq!(page.transcode::<ChannelsMetadataResponse>().unwrap(), page);

    let counted = CountedPage { cursor: None, back: None, count: 0 };
    assert_eq!(counted.transcode::<CountedPage>().unwrap(), counted);
}

#[test]
fn bounded_pages_cross_types() {
    let base = BoundedPageBase::new(Some(100), None, Some(25)).unwrap();
    let window: Window = base.transcode().unwrap();
    assert_eq!(window, Window { from: Some(100), to: None, max: Some(25) });

    let back: BoundedPageBase = window.transcode().unwrap();
    assert_eq!(back, base);
}

#[test]
fn adapters_expose_next_and_prev() {
    let page = channels_page();
    assert_eq!(page.start(), Some("MTAw"));
    assert_eq!(page.next(), Some("MTAw"));
    assert_eq!(page.end(), Some("MA"));
    assert_eq!(page.prev(), Some("MA"));
    assert_eq!(HashedPage::total_count(&page), Some(42));
}

#[test]
fn hashed_round_trip_keeps_cursors_and_count() {
    let page = channels_page();

    let memberships: MembershipsResponse = page.transcode().unwrap();
    assert_eq!(memberships.status, 200);
    assert!(memberships.data.is_empty());

    let back: ChannelsMetadataResponse = memberships.transcode().unwrap();
    assert_eq!(back.next, page.next);
    assert_eq!(back.prev, page.prev);
    assert_eq!(back.total_count, page.total_count);
    assert!(back.data.is_empty());

    let fetched: FetchMultipleResponse<String> = back.transcode().unwrap();
    let base: HashedPageBase = fetched.transcode().unwrap();
    assert_eq!(base, HashedPageBase::new(Some("MTAw".into()), Some("MA".into()), Some(42)));
}

#[test]
fn rejection_propagates_as_conversion_error() {
    let page = HashedPageBase::new(Some("next".into()), None, None);
    let err = page.transcode::<CountedPage>().unwrap_err();
    assert!(err.target.ends_with("CountedPage"));
    assert_eq!(err.reason, "total count required");

    let wrapped: PubwireError = err.into();
    assert_matches!(wrapped, PubwireError::Conversion(_));
    assert_eq!(wrapped.code().as_str(), "CONVERSION");
}

#[test]
fn adapters_decode_wire_names() {
    let raw = r#"{"status":200,"data":[{"id":"room1","eTag":"x"}],"totalCount":9,"next":"n1"}"#;
    let page: ChannelsMetadataResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(page.data[0].etag.as_deref(), Some("x"));
    assert_eq!(page.total_count, Some(9));
    assert_eq!(page.prev(), None);
}

#[test]
fn deserialized_empty_page_bypasses_constructor() {
    let page: BoundedPageBase = serde_json::from_str("{}").unwrap();
    assert_eq!((page.start(), page.end(), page.limit()), (None, None, None));

    let page: BoundedPageBase = serde_json::from_str(r#"{"start":"15","limit":10}"#).unwrap();
    assert_eq!(page, BoundedPageBase::new(Some(15), None, Some(10)).unwrap());
}
