use serde::Deserialize;
use pubwire_core::error::{PubwireError, Result};

/// Largest page the history and objects endpoints serve.
pub const SERVICE_PAGE_MAX: u32 = 100;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamConfig {
    pub version: u32,

    #[serde(default)]
    pub routing: RoutingSection,

    #[serde(default)]
    pub paging: PagingSection,
}

impl StreamConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PubwireError::UnsupportedVersion);
        }

        self.routing.validate()?;
        self.paging.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingSection {
    /// Channel suffix the service uses for presence channels.
    #[serde(default = "default_presence_suffix")]
    pub presence_suffix: String,

    /// Fail on unknown message types instead of skipping them.
    #[serde(default)]
    pub strict_kinds: bool,
}

impl Default for RoutingSection {
    fn default() -> Self {
        Self {
            presence_suffix: default_presence_suffix(),
            strict_kinds: false,
        }
    }
}

impl RoutingSection {
    pub fn validate(&self) -> Result<()> {
        if self.presence_suffix.is_empty() {
            return Err(PubwireError::BadConfig(
                "routing.presence_suffix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagingSection {
    #[serde(default = "default_page_max")]
    pub history_max: u32,

    #[serde(default = "default_page_max")]
    pub objects_max: u32,
}

impl Default for PagingSection {
    fn default() -> Self {
        Self {
            history_max: default_page_max(),
            objects_max: default_page_max(),
        }
    }
}

impl PagingSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=SERVICE_PAGE_MAX).contains(&self.history_max) {
            return Err(PubwireError::BadConfig(format!(
                "paging.history_max must be between 1 and {SERVICE_PAGE_MAX}"
            )));
        }
        if !(1..=SERVICE_PAGE_MAX).contains(&self.objects_max) {
            return Err(PubwireError::BadConfig(format!(
                "paging.objects_max must be between 1 and {SERVICE_PAGE_MAX}"
            )));
        }
        Ok(())
    }
}

fn default_presence_suffix() -> String {
    "-pnpres".into()
}
fn default_page_max() -> u32 {
    SERVICE_PAGE_MAX
}
