//! Addressing of the USGS summary feeds.
//!
//! The summary feeds are published as
//! `summary/{magnitude}_{period}.geojson`. The map defaults to all
//! magnitudes over the past week.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Base URL of the USGS summary feeds.
pub const SUMMARY_FEED_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Environment variable holding an explicit feed URL.
pub const FEED_URL_ENV: &str = "QUAKE_FEED_URL";
/// Environment variable selecting the feed period.
pub const FEED_PERIOD_ENV: &str = "QUAKE_FEED_PERIOD";
/// Environment variable selecting the feed magnitude threshold.
pub const FEED_MAGNITUDE_ENV: &str = "QUAKE_FEED_MAGNITUDE";

/// Time window covered by a summary feed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FeedPeriod {
    /// Past hour
    Hour,
    /// Past day
    Day,
    /// Past seven days
    #[default]
    Week,
    /// Past thirty days
    Month,
}

/// Magnitude threshold of a summary feed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum FeedMagnitude {
    /// Events flagged significant by the USGS
    #[serde(rename = "significant")]
    #[strum(serialize = "significant")]
    Significant,
    /// Magnitude 4.5 and above
    #[serde(rename = "4.5")]
    #[strum(serialize = "4.5")]
    M4_5,
    /// Magnitude 2.5 and above
    #[serde(rename = "2.5")]
    #[strum(serialize = "2.5")]
    M2_5,
    /// Magnitude 1.0 and above
    #[serde(rename = "1.0")]
    #[strum(serialize = "1.0")]
    M1_0,
    /// Every recorded event
    #[default]
    #[serde(rename = "all")]
    #[strum(serialize = "all")]
    All,
}

/// A summary feed, identified by magnitude threshold and period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSelection {
    /// Magnitude threshold.
    pub magnitude: FeedMagnitude,
    /// Time window.
    pub period: FeedPeriod,
}

impl FeedSelection {
    /// Returns the feed URL for this selection.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{SUMMARY_FEED_BASE}/{}_{}.geojson",
            self.magnitude.as_ref(),
            self.period.as_ref()
        )
    }

    /// Reads the selection from [`FEED_MAGNITUDE_ENV`] and
    /// [`FEED_PERIOD_ENV`], falling back to the defaults for unset or
    /// unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        let magnitude = std::env::var(FEED_MAGNITUDE_ENV)
            .ok()
            .and_then(|v| parse_or_warn(FEED_MAGNITUDE_ENV, &v))
            .unwrap_or_default();
        let period = std::env::var(FEED_PERIOD_ENV)
            .ok()
            .and_then(|v| parse_or_warn(FEED_PERIOD_ENV, &v))
            .unwrap_or_default();

        Self { magnitude, period }
    }
}

/// Resolves the feed URL: an explicit URL wins, then [`FEED_URL_ENV`],
/// then the selection from the environment.
#[must_use]
pub fn resolve_feed_url(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(FEED_URL_ENV).ok())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| FeedSelection::from_env().url())
}

fn parse_or_warn<T: std::str::FromStr>(var: &str, value: &str) -> Option<T> {
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        log::warn!("Ignoring invalid {var} value '{value}'");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_is_all_week() {
        assert_eq!(
            FeedSelection::default().url(),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
        );
    }

    #[test]
    fn builds_thresholded_urls() {
        let selection = FeedSelection {
            magnitude: FeedMagnitude::M4_5,
            period: FeedPeriod::Day,
        };
        assert!(selection.url().ends_with("/4.5_day.geojson"));

        let selection = FeedSelection {
            magnitude: FeedMagnitude::Significant,
            period: FeedPeriod::Month,
        };
        assert!(selection.url().ends_with("/significant_month.geojson"));
    }

    #[test]
    fn parses_feed_names() {
        assert_eq!("2.5".parse::<FeedMagnitude>().unwrap(), FeedMagnitude::M2_5);
        assert_eq!("HOUR".parse::<FeedPeriod>().unwrap(), FeedPeriod::Hour);
        assert!("5.0".parse::<FeedMagnitude>().is_err());
    }

    #[test]
    fn explicit_url_wins() {
        assert_eq!(
            resolve_feed_url(Some("http://localhost/feed.geojson")),
            "http://localhost/feed.geojson"
        );
    }
}
