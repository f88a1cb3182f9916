use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdFormat {
    Rewarded,
    Interstitial,
}

impl AdFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdFormat::Rewarded => "rewarded",
            AdFormat::Interstitial => "interstitial",
        }
    }
}

impl fmt::Display for AdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ad slot operators configure per screen. Reward amounts live here,
/// server side, so clients cannot claim arbitrary points.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdPlacement {
    pub placement_key: String,
    pub ad_format: AdFormat,
    pub is_enabled: bool,
    pub points_reward: i64,
    pub ad_unit_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
