//! Tag classification, label aggregation and activity categorisation.
//!
//! Classification runs in three pure steps over a point's tags:
//! 1. [`TagClassifier::classify`] matches every taxonomy rule and records the
//!    candidate labels together with the triggering attribute pairs;
//! 2. [`aggregate`] reduces the candidates to one [`LandUse`] using fixed
//!    precedence; and
//! 3. [`categorize`] derives the commercial judgement from the triggering
//!    pairs.
//!
//! # Examples
//! ```
//! use landuse_core::{ActivityCategory, LandUse, TagClassifier, Tags, Taxonomy};
//!
//! let taxonomy = Taxonomy::osm_default();
//! let classifier = TagClassifier::new(&taxonomy);
//! let tags = Tags::from([("amenity".into(), "restaurant".into())]);
//!
//! let classification = classifier.classify_tags(&tags);
//! assert_eq!(classification.land_use, LandUse::Activity);
//! assert_eq!(classification.pairs.get("amenity"), Some("restaurant"));
//! assert_eq!(classification.primary_category(), Some(ActivityCategory::Commercial));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::{ActivityCategory, LandUse, RuleLabel, Tags, Taxonomy};

/// Pseudo-attribute carrying a land-use value assigned by a later inference
/// pass.
pub const INFERRED_ATTRIBUTE: &str = "inferred";

/// Attribute pairs that caused a point's candidate labels.
///
/// One entry per matched attribute name; iteration is ordered by name so
/// equal pair sets compare and serialise identically regardless of how they
/// were assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TriggeringPairs(BTreeMap<String, String>);

impl TriggeringPairs {
    /// Create an empty set of pairs.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record that `attribute=value` triggered a rule.
    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        self.0.insert(attribute.into(), value.into());
    }

    /// Return the triggering value for `attribute`.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.0.get(attribute).map(String::as_str)
    }

    /// Iterate over `(attribute, value)` pairs in attribute order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0
            .iter()
            .map(|(attribute, value)| (attribute.as_str(), value.as_str()))
    }

    /// Number of recorded pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Report whether no rule matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<A, V> FromIterator<(A, V)> for TriggeringPairs
where
    A: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (A, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(attribute, value)| (attribute.into(), value.into()))
                .collect(),
        )
    }
}

/// Raw outcome of rule matching, before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Distinct labels implied by matched rules.
    pub labels: BTreeSet<RuleLabel>,
    /// Attribute pairs that matched.
    pub pairs: TriggeringPairs,
}

/// Fully classified view of one point's tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Aggregated land-use label.
    pub land_use: LandUse,
    /// Attribute pairs that produced the label.
    pub pairs: TriggeringPairs,
    /// Activity categories; empty unless the label is activity, residential
    /// or mixed.
    pub categories: BTreeSet<ActivityCategory>,
}

impl Classification {
    /// The first category in [`ActivityCategory`] order, if any.
    ///
    /// `None` means the point is uncategorised.
    #[must_use]
    pub fn primary_category(&self) -> Option<ActivityCategory> {
        self.categories.first().copied()
    }
}

/// Applies a [`Taxonomy`] to tag sets.
#[derive(Debug, Clone, Copy)]
pub struct TagClassifier<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> TagClassifier<'a> {
    /// Create a classifier backed by `taxonomy`.
    #[must_use]
    pub const fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// The taxonomy backing this classifier.
    #[must_use]
    pub const fn taxonomy(&self) -> &'a Taxonomy {
        self.taxonomy
    }

    /// Match every taxonomy rule against `tags`.
    ///
    /// Unknown attributes and unmatched values contribute nothing.
    #[must_use]
    pub fn classify(&self, tags: &Tags) -> Candidates {
        let mut candidates = Candidates::default();
        for rule in self.taxonomy.rules() {
            let Some(value) = tags.get(rule.attribute) else {
                continue;
            };
            if rule.matches(value) {
                candidates.labels.insert(rule.label);
                candidates.pairs.insert(rule.attribute, value.as_str());
            }
        }
        candidates
    }

    /// Match, aggregate and categorise `tags` in one call.
    ///
    /// Only activity, residential and mixed points are categorised; every
    /// other label yields an empty category set.
    #[must_use]
    pub fn classify_tags(&self, tags: &Tags) -> Classification {
        let Candidates { labels, pairs } = self.classify(tags);
        let land_use = aggregate(&labels);
        let categories = if land_use.is_classified() {
            categorize(self.taxonomy, &pairs)
        } else {
            BTreeSet::new()
        };
        Classification {
            land_use,
            pairs,
            categories,
        }
    }
}

/// Reduce candidate labels to a single [`LandUse`].
///
/// Precedence, first match wins:
/// 1. `other` present: [`LandUse::Unclassified`];
/// 2. `activity` and `residential` present: [`LandUse::Mixed`];
/// 3. `mixed` present: [`LandUse::Mixed`];
/// 4. `activity` present: [`LandUse::Activity`];
/// 5. `residential` present: [`LandUse::Residential`];
/// 6. `infer` present: [`LandUse::Infer`];
/// 7. otherwise [`LandUse::Unclassified`].
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use landuse_core::{LandUse, RuleLabel, aggregate};
///
/// let labels = BTreeSet::from([RuleLabel::Activity, RuleLabel::Residential]);
/// assert_eq!(aggregate(&labels), LandUse::Mixed);
///
/// let labels = BTreeSet::from([RuleLabel::Activity, RuleLabel::Other]);
/// assert_eq!(aggregate(&labels), LandUse::Unclassified);
/// ```
#[must_use]
pub fn aggregate(labels: &BTreeSet<RuleLabel>) -> LandUse {
    let has = |label| labels.contains(&label);
    if has(RuleLabel::Other) {
        LandUse::Unclassified
    } else if has(RuleLabel::Activity) && has(RuleLabel::Residential) {
        LandUse::Mixed
    } else if has(RuleLabel::Mixed) {
        LandUse::Mixed
    } else if has(RuleLabel::Activity) {
        LandUse::Activity
    } else if has(RuleLabel::Residential) {
        LandUse::Residential
    } else if has(RuleLabel::Infer) {
        LandUse::Infer
    } else {
        LandUse::Unclassified
    }
}

/// How an attribute name maps to an activity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributePolicy {
    Always(ActivityCategory),
    ByValue,
}

fn attribute_policy(attribute: &str) -> Option<AttributePolicy> {
    match attribute {
        "shop" | "leisure" | "amenity" => Some(AttributePolicy::Always(ActivityCategory::Commercial)),
        "man_made" | "industrial" => Some(AttributePolicy::Always(ActivityCategory::NonCommercial)),
        "landuse" | "building" | "building:use" | "building:part" | INFERRED_ATTRIBUTE => {
            Some(AttributePolicy::ByValue)
        }
        _ => None,
    }
}

/// Derive the activity categories implied by `pairs`.
///
/// `shop`, `leisure` and `amenity` are always commercial; `man_made` and
/// `industrial` are always non-commercial; `landuse`, the three building
/// attributes and [`INFERRED_ATTRIBUTE`] resolve their value through the
/// shared activity table. Anything else contributes nothing. Both categories
/// may be present at once.
///
/// # Examples
/// ```
/// use landuse_core::{ActivityCategory, Taxonomy, TriggeringPairs, categorize};
///
/// let taxonomy = Taxonomy::osm_default();
/// let pairs = TriggeringPairs::from_iter([("shop", "bakery"), ("building", "school")]);
/// let categories = categorize(&taxonomy, &pairs);
/// assert!(categories.contains(&ActivityCategory::Commercial));
/// assert!(categories.contains(&ActivityCategory::NonCommercial));
/// ```
#[must_use]
pub fn categorize(taxonomy: &Taxonomy, pairs: &TriggeringPairs) -> BTreeSet<ActivityCategory> {
    pairs
        .iter()
        .filter_map(|(attribute, value)| match attribute_policy(attribute)? {
            AttributePolicy::Always(category) => Some(category),
            AttributePolicy::ByValue => taxonomy.activity_category(value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn taxonomy() -> Taxonomy {
        Taxonomy::osm_default()
    }

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[rstest]
    #[case(&[], LandUse::Unclassified)]
    #[case(&[RuleLabel::Other, RuleLabel::Activity, RuleLabel::Residential], LandUse::Unclassified)]
    #[case(&[RuleLabel::Activity, RuleLabel::Residential], LandUse::Mixed)]
    #[case(&[RuleLabel::Mixed], LandUse::Mixed)]
    #[case(&[RuleLabel::Activity, RuleLabel::Mixed], LandUse::Mixed)]
    #[case(&[RuleLabel::Activity, RuleLabel::Infer], LandUse::Activity)]
    #[case(&[RuleLabel::Residential, RuleLabel::Infer], LandUse::Residential)]
    #[case(&[RuleLabel::Infer], LandUse::Infer)]
    #[case(&[RuleLabel::Other, RuleLabel::Infer], LandUse::Unclassified)]
    fn aggregate_follows_precedence(#[case] labels: &[RuleLabel], #[case] expected: LandUse) {
        let label_set: BTreeSet<_> = labels.iter().copied().collect();
        assert_eq!(aggregate(&label_set), expected);
    }

    #[rstest]
    fn restaurant_is_commercial_activity(taxonomy: Taxonomy) {
        let classifier = TagClassifier::new(&taxonomy);
        let candidates = classifier.classify(&tags(&[("amenity", "restaurant")]));
        assert_eq!(candidates.labels, BTreeSet::from([RuleLabel::Activity]));

        let classification = classifier.classify_tags(&tags(&[("amenity", "restaurant")]));
        assert_eq!(classification.land_use, LandUse::Activity);
        assert_eq!(
            classification.pairs,
            TriggeringPairs::from_iter([("amenity", "restaurant")])
        );
        assert_eq!(
            classification.categories,
            BTreeSet::from([ActivityCategory::Commercial])
        );
    }

    #[rstest]
    fn house_is_residential_without_category(taxonomy: Taxonomy) {
        let classification =
            TagClassifier::new(&taxonomy).classify_tags(&tags(&[("building", "house")]));
        assert_eq!(classification.land_use, LandUse::Residential);
        assert!(classification.categories.is_empty());
        assert_eq!(classification.primary_category(), None);
    }

    #[rstest]
    fn generic_building_is_deferred(taxonomy: Taxonomy) {
        let classifier = TagClassifier::new(&taxonomy);
        let candidates = classifier.classify(&tags(&[("building", "yes")]));
        assert_eq!(candidates.labels, BTreeSet::from([RuleLabel::Infer]));

        let classification = classifier.classify_tags(&tags(&[("building", "yes")]));
        assert_eq!(classification.land_use, LandUse::Infer);
        assert!(classification.categories.is_empty());
    }

    #[rstest]
    fn shop_in_apartment_block_is_mixed(taxonomy: Taxonomy) {
        let classification = TagClassifier::new(&taxonomy)
            .classify_tags(&tags(&[("shop", "bakery"), ("building", "apartments")]));
        assert_eq!(classification.land_use, LandUse::Mixed);
        assert_eq!(classification.pairs.len(), 2);
        assert_eq!(classification.pairs.get("building"), Some("apartments"));
        assert_eq!(
            classification.primary_category(),
            Some(ActivityCategory::Commercial)
        );
    }

    #[rstest]
    fn decorative_tag_suppresses_activity(taxonomy: Taxonomy) {
        let classification = TagClassifier::new(&taxonomy)
            .classify_tags(&tags(&[("amenity", "cafe"), ("man_made", "flagpole")]));
        assert_eq!(classification.land_use, LandUse::Unclassified);
        assert_eq!(classification.pairs.get("man_made"), Some("flagpole"));
        assert!(classification.categories.is_empty());
    }

    #[rstest]
    fn unknown_attributes_are_ignored(taxonomy: Taxonomy) {
        let candidates = TagClassifier::new(&taxonomy)
            .classify(&tags(&[("name", "Connaught Place"), ("shop", "spaceship")]));
        assert!(candidates.labels.is_empty());
        assert!(candidates.pairs.is_empty());
    }

    #[rstest]
    fn explicit_mixed_rule_outranks_activity() {
        let taxonomy = Taxonomy::builder()
            .rule(RuleLabel::Mixed, "building", ["mixed_use"])
            .rule(RuleLabel::Activity, "amenity", ["cafe"])
            .build()
            .expect("valid taxonomy");
        let classification = TagClassifier::new(&taxonomy)
            .classify_tags(&tags(&[("building", "mixed_use"), ("amenity", "cafe")]));
        assert_eq!(classification.land_use, LandUse::Mixed);
    }

    #[rstest]
    #[case("shop", "anything", Some(ActivityCategory::Commercial))]
    #[case("leisure", "park", Some(ActivityCategory::Commercial))]
    #[case("amenity", "school", Some(ActivityCategory::Commercial))]
    #[case("man_made", "works", Some(ActivityCategory::NonCommercial))]
    #[case("industrial", "mine", Some(ActivityCategory::NonCommercial))]
    #[case("landuse", "military", Some(ActivityCategory::NonCommercial))]
    #[case("building:use", "retail", Some(ActivityCategory::Commercial))]
    #[case("building:part", "church", Some(ActivityCategory::NonCommercial))]
    #[case(INFERRED_ATTRIBUTE, "office", Some(ActivityCategory::Commercial))]
    #[case("building", "house", None)]
    #[case("tourism", "museum", None)]
    fn categorize_applies_attribute_policy(
        taxonomy: Taxonomy,
        #[case] attribute: &str,
        #[case] value: &str,
        #[case] expected: Option<ActivityCategory>,
    ) {
        let categories = categorize(&taxonomy, &TriggeringPairs::from_iter([(attribute, value)]));
        assert_eq!(categories.first().copied(), expected);
        assert!(categories.len() <= 1);
    }

    #[rstest]
    fn categorize_collapses_duplicates(taxonomy: Taxonomy) {
        let pairs = TriggeringPairs::from_iter([("shop", "bakery"), ("amenity", "cafe")]);
        assert_eq!(
            categorize(&taxonomy, &pairs),
            BTreeSet::from([ActivityCategory::Commercial])
        );
    }
}
