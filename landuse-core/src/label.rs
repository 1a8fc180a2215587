//! Closed label sets used by the classification stage.
//!
//! Three enums cover the vocabulary:
//! - [`RuleLabel`] names the land use a taxonomy rule implies;
//! - [`LandUse`] is the aggregated, final label of a point; and
//! - [`ActivityCategory`] is the commercial judgement derived afterwards.
//!
//! All three render as lowercase `snake_case` and parse case-insensitively.
//!
//! # Examples
//! ```
//! use landuse_core::{ActivityCategory, LandUse, RuleLabel};
//!
//! assert_eq!(RuleLabel::Infer.as_str(), "infer");
//! assert_eq!(LandUse::Unclassified.to_string(), "none");
//! assert_eq!("NON_COMMERCIAL".parse(), Ok(ActivityCategory::NonCommercial));
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a label string is not part of the closed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLabelError {
    /// Which vocabulary was being parsed.
    pub kind: &'static str,
    /// Input that failed to parse.
    pub value: String,
}

/// Land use implied by a single taxonomy rule.
///
/// The declaration order is the iteration order of taxonomy rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RuleLabel {
    /// Shops, services and other activity uses.
    Activity,
    /// Dwellings.
    Residential,
    /// Mixed activity and residential use.
    Mixed,
    /// Generic building tags that need a later inference pass.
    Infer,
    /// Decorative or structural tags that suppress every other signal.
    Other,
}

impl RuleLabel {
    /// Every rule label in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Activity,
        Self::Residential,
        Self::Mixed,
        Self::Infer,
        Self::Other,
    ];

    /// Return the label as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Residential => "residential",
            Self::Mixed => "mixed",
            Self::Infer => "infer",
            Self::Other => "other",
        }
    }
}

/// Final land-use label of a point after aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LandUse {
    /// Activity use.
    Activity,
    /// Residential use.
    Residential,
    /// Both activity and residential use.
    Mixed,
    /// Deferred; callers drop or re-process these points.
    Infer,
    /// No valuable classification, including explicit `other` noise.
    #[cfg_attr(feature = "serde", serde(rename = "none"))]
    Unclassified,
}

impl LandUse {
    /// Return the label as a lowercase `&str`.
    ///
    /// [`LandUse::Unclassified`] renders as `"none"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Residential => "residential",
            Self::Mixed => "mixed",
            Self::Infer => "infer",
            Self::Unclassified => "none",
        }
    }

    /// Report whether points with this label take part in activity
    /// categorisation.
    ///
    /// # Examples
    /// ```
    /// use landuse_core::LandUse;
    ///
    /// assert!(LandUse::Mixed.is_classified());
    /// assert!(!LandUse::Infer.is_classified());
    /// ```
    #[must_use]
    pub const fn is_classified(self) -> bool {
        matches!(self, Self::Activity | Self::Residential | Self::Mixed)
    }
}

/// Binary commercial judgement attached to classified points.
///
/// `Commercial` orders first, so the first element of a category set is
/// commercial whenever both categories are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ActivityCategory {
    /// Retail, food and other commercial activity.
    Commercial,
    /// Civic, educational, industrial and leisure activity.
    NonCommercial,
}

impl ActivityCategory {
    /// Every category in lookup precedence order.
    pub const ALL: [Self; 2] = [Self::Commercial, Self::NonCommercial];

    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::NonCommercial => "non_commercial",
        }
    }
}

macro_rules! label_text {
    ($ty:ty, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lowered = s.to_lowercase();
                [$(Self::$variant),+]
                    .into_iter()
                    .find(|candidate| candidate.as_str() == lowered)
                    .ok_or_else(|| ParseLabelError {
                        kind: $kind,
                        value: s.to_owned(),
                    })
            }
        }
    };
}

label_text!(
    RuleLabel,
    "rule label",
    [Activity, Residential, Mixed, Infer, Other]
);
label_text!(
    LandUse,
    "land use",
    [Activity, Residential, Mixed, Infer, Unclassified]
);
label_text!(ActivityCategory, "activity category", [Commercial, NonCommercial]);
