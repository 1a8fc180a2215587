//! The taxonomy store: read-only rule tables driving classification.
//!
//! A [`Taxonomy`] holds two tables:
//! - land-use rules mapping `(rule label, attribute name)` to the attribute
//!   values that imply the label; and
//! - the shared activity table mapping each [`ActivityCategory`] to the
//!   attribute values that imply it.
//!
//! The store is built once, validated, and then passed by reference to every
//! classifier call. It is never mutated afterwards, so a single instance can
//! be shared across threads and pipeline runs.
//!
//! # Examples
//! ```
//! use landuse_core::{RuleLabel, Taxonomy};
//!
//! # fn main() -> Result<(), landuse_core::TaxonomyError> {
//! let taxonomy = Taxonomy::builder()
//!     .rule(RuleLabel::Activity, "amenity", ["cafe", "bar"])
//!     .rule(RuleLabel::Residential, "building", ["house"])
//!     .build()?;
//! assert_eq!(taxonomy.rule_count(), 2);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::{ActivityCategory, RuleLabel};

#[cfg(feature = "serde")]
mod document;
mod osm;

#[cfg(feature = "serde")]
pub use document::{ActivityDocument, RuleDocument, TaxonomyDocument};

/// Composite key of a land-use rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct RuleKey {
    label: RuleLabel,
    attribute: String,
}

/// A borrowed view of one land-use rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyRule<'a> {
    /// Label implied by a match.
    pub label: RuleLabel,
    /// Attribute name inspected on the point.
    pub attribute: &'a str,
    /// Attribute values that satisfy the rule.
    pub values: &'a BTreeSet<String>,
}

impl TaxonomyRule<'_> {
    /// Report whether `value` satisfies this rule.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.values.contains(value)
    }
}

/// Errors raised while assembling or loading a taxonomy.
///
/// Each of these is fatal at start-up; a malformed taxonomy is never used
/// for classification.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// A rule was declared without an attribute name.
    #[error("{label} rule has an empty attribute name")]
    EmptyAttribute {
        /// Label of the offending rule.
        label: RuleLabel,
    },
    /// A rule was declared without any values.
    #[error("{label} rule for '{attribute}' lists no values")]
    EmptyRule {
        /// Label of the offending rule.
        label: RuleLabel,
        /// Attribute of the offending rule.
        attribute: String,
    },
    /// A rule listed a blank value.
    #[error("{label} rule for '{attribute}' contains a blank value")]
    BlankRuleValue {
        /// Label of the offending rule.
        label: RuleLabel,
        /// Attribute of the offending rule.
        attribute: String,
    },
    /// The activity table listed a blank value.
    #[error("{category} activity values contain a blank value")]
    BlankActivityValue {
        /// Category whose table holds the blank value.
        category: ActivityCategory,
    },
    /// A taxonomy document could not be decoded.
    #[cfg(feature = "serde")]
    #[error("failed to decode taxonomy document: {source}")]
    Decode {
        /// Decoder error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable land-use and activity tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    rules: BTreeMap<RuleKey, BTreeSet<String>>,
    activity: BTreeMap<ActivityCategory, BTreeSet<String>>,
}

impl Taxonomy {
    /// Start assembling a custom taxonomy.
    #[must_use]
    pub fn builder() -> TaxonomyBuilder {
        TaxonomyBuilder::default()
    }

    /// The OpenStreetMap tables shipped with the engine.
    ///
    /// # Examples
    /// ```
    /// use landuse_core::{ActivityCategory, RuleLabel, Taxonomy};
    ///
    /// let taxonomy = Taxonomy::osm_default();
    /// let rule = taxonomy
    ///     .rule(RuleLabel::Activity, "amenity")
    ///     .expect("amenity rule");
    /// assert!(rule.matches("restaurant"));
    /// assert_eq!(
    ///     taxonomy.activity_category("retail"),
    ///     Some(ActivityCategory::Commercial)
    /// );
    /// ```
    #[must_use]
    pub fn osm_default() -> Self {
        osm::builder().assemble()
    }

    /// Iterate over every land-use rule, ordered by label then attribute.
    pub fn rules(&self) -> impl Iterator<Item = TaxonomyRule<'_>> + '_ {
        self.rules.iter().map(|(key, values)| TaxonomyRule {
            label: key.label,
            attribute: key.attribute.as_str(),
            values,
        })
    }

    /// Look up the rule for `label` on `attribute`.
    #[must_use]
    pub fn rule(&self, label: RuleLabel, attribute: &str) -> Option<TaxonomyRule<'_>> {
        self.rules()
            .find(|rule| rule.label == label && rule.attribute == attribute)
    }

    /// Number of land-use rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Resolve `value` through the shared activity table.
    ///
    /// Categories are consulted in [`ActivityCategory::ALL`] order, so a value
    /// listed under both resolves to [`ActivityCategory::Commercial`].
    #[must_use]
    pub fn activity_category(&self, value: &str) -> Option<ActivityCategory> {
        ActivityCategory::ALL.into_iter().find(|category| {
            self.activity
                .get(category)
                .is_some_and(|values| values.contains(value))
        })
    }

    /// Values listed for `category` in the shared activity table.
    pub fn activity_values(&self, category: ActivityCategory) -> impl Iterator<Item = &str> + '_ {
        self.activity
            .get(&category)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::osm_default()
    }
}

/// Incremental builder for [`Taxonomy`].
///
/// Repeated calls for the same `(label, attribute)` pair or the same
/// category extend the existing value set.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyBuilder {
    rules: BTreeMap<RuleKey, BTreeSet<String>>,
    activity: BTreeMap<ActivityCategory, BTreeSet<String>>,
}

impl TaxonomyBuilder {
    /// Add values that imply `label` when found under `attribute`.
    #[must_use]
    pub fn rule<A, I, V>(mut self, label: RuleLabel, attribute: A, values: I) -> Self
    where
        A: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = RuleKey {
            label,
            attribute: attribute.into(),
        };
        self.rules
            .entry(key)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Add values that imply `category` in the shared activity table.
    #[must_use]
    pub fn activity_values<I, V>(mut self, category: ActivityCategory, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.activity
            .entry(category)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Validate the tables and freeze them into a [`Taxonomy`].
    ///
    /// # Errors
    /// Returns [`TaxonomyError`] when a rule has an empty attribute name, no
    /// values, or a blank value, or when the activity table holds a blank
    /// value.
    pub fn build(self) -> Result<Taxonomy, TaxonomyError> {
        for (key, values) in &self.rules {
            if key.attribute.trim().is_empty() {
                return Err(TaxonomyError::EmptyAttribute { label: key.label });
            }
            if values.is_empty() {
                return Err(TaxonomyError::EmptyRule {
                    label: key.label,
                    attribute: key.attribute.clone(),
                });
            }
            if values.iter().any(|value| value.trim().is_empty()) {
                return Err(TaxonomyError::BlankRuleValue {
                    label: key.label,
                    attribute: key.attribute.clone(),
                });
            }
        }
        for (category, values) in &self.activity {
            if values.iter().any(|value| value.trim().is_empty()) {
                return Err(TaxonomyError::BlankActivityValue {
                    category: *category,
                });
            }
        }
        Ok(self.assemble())
    }

    fn assemble(self) -> Taxonomy {
        Taxonomy {
            rules: self.rules,
            activity: self.activity,
        }
    }
}
