//! JSON representation of taxonomy tables.
//!
//! ```json
//! {
//!   "rules": [{ "label": "activity", "attribute": "amenity", "values": ["cafe"] }],
//!   "activity": { "commercial": ["cafe"], "non_commercial": ["school"] }
//! }
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::{Taxonomy, TaxonomyError};
use crate::{ActivityCategory, RuleLabel};

/// Serialised form of a [`Taxonomy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyDocument {
    /// Land-use rules.
    #[serde(default)]
    pub rules: Vec<RuleDocument>,
    /// Shared activity value table.
    #[serde(default)]
    pub activity: ActivityDocument,
}

/// Serialised form of one land-use rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDocument {
    /// Label implied by a match.
    pub label: RuleLabel,
    /// Attribute name inspected on the point.
    pub attribute: String,
    /// Values that satisfy the rule.
    pub values: Vec<String>,
}

/// Serialised form of the shared activity table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDocument {
    /// Values implying commercial activity.
    #[serde(default)]
    pub commercial: Vec<String>,
    /// Values implying non-commercial activity.
    #[serde(default)]
    pub non_commercial: Vec<String>,
}

impl Taxonomy {
    /// Validate a decoded document and build a taxonomy from it.
    ///
    /// # Errors
    /// Returns [`TaxonomyError`] when the tables fail validation.
    pub fn from_document(document: TaxonomyDocument) -> Result<Self, TaxonomyError> {
        let TaxonomyDocument { rules, activity } = document;
        let builder = rules.into_iter().fold(Self::builder(), |builder, rule| {
            builder.rule(rule.label, rule.attribute, rule.values)
        });
        builder
            .activity_values(ActivityCategory::Commercial, activity.commercial)
            .activity_values(ActivityCategory::NonCommercial, activity.non_commercial)
            .build()
    }

    /// Decode and validate a JSON taxonomy document.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::Decode`] for unreadable or malformed JSON and
    /// other [`TaxonomyError`] variants when validation fails.
    ///
    /// # Examples
    /// ```
    /// use landuse_core::{RuleLabel, Taxonomy};
    ///
    /// # fn main() -> Result<(), landuse_core::TaxonomyError> {
    /// let json = r#"{"rules": [{"label": "activity", "attribute": "shop", "values": ["bakery"]}]}"#;
    /// let taxonomy = Taxonomy::from_json_reader(json.as_bytes())?;
    /// assert!(taxonomy.rule(RuleLabel::Activity, "shop").is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, TaxonomyError> {
        let document: TaxonomyDocument = serde_json::from_reader(reader)
            .map_err(|source| TaxonomyError::Decode { source })?;
        Self::from_document(document)
    }

    /// Export the tables as a document.
    #[must_use]
    pub fn to_document(&self) -> TaxonomyDocument {
        let rules = self
            .rules()
            .map(|rule| RuleDocument {
                label: rule.label,
                attribute: rule.attribute.to_owned(),
                values: rule.values.iter().cloned().collect(),
            })
            .collect();
        let collect = |category| {
            self.activity_values(category)
                .map(str::to_owned)
                .collect::<Vec<_>>()
        };
        TaxonomyDocument {
            rules,
            activity: ActivityDocument {
                commercial: collect(ActivityCategory::Commercial),
                non_commercial: collect(ActivityCategory::NonCommercial),
            },
        }
    }
}
