//! Paging defaults applied before a cursor is handed to a request builder.

use pubwire_core::error::{PubwireError, Result};
use pubwire_core::page::{BoundedPage, BoundedPageBase, HashedPage, HashedPageBase};

use crate::config::PagingSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    history_max: u32,
    objects_max: u32,
}

/// Sections built in code are validated here too; a zero max is rejected.
impl TryFrom<&PagingSection> for PagingPolicy {
    type Error = PubwireError;

    fn try_from(cfg: &PagingSection) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            history_max: cfg.history_max,
            objects_max: cfg.objects_max,
        })
    }
}

impl PagingPolicy {
    /// Convert any bounded page to the base type with its limit clamped to
    /// `1..=history_max`. A page without a limit gets `history_max`.
    pub fn history_page<P>(&self, page: &P) -> Result<BoundedPageBase>
    where
        P: BoundedPage + 'static,
    {
        let base: BoundedPageBase = page.transcode()?;
        let limit = base
            .limit()
            .map_or(self.history_max, |l| l.clamp(1, self.history_max));
        Ok(base.with_limit(limit))
    }

    /// Convert any hashed page to the base type.
    pub fn objects_page<P>(&self, page: &P) -> Result<HashedPageBase>
    where
        P: HashedPage + 'static,
    {
        Ok(page.transcode()?)
    }

    /// Page size to request from the objects API.
    pub fn objects_limit(&self, requested: Option<u32>) -> u32 {
        requested.map_or(self.objects_max, |l| l.clamp(1, self.objects_max))
    }
}
