//! Property-based tests for classification and ranking.
//!
//! # Invariants tested
//!
//! - **Noise dominance:** any `other` candidate yields `none`.
//! - **Mixed detection:** `activity` with `residential` and no `other` yields
//!   `mixed`.
//! - **Unknown tags are inert:** attributes outside the taxonomy never change
//!   a classification.
//! - **Idempotence:** classifying the same tags twice yields the same label,
//!   pairs and categories.
//! - **Categorisation is order-free:** the category set depends only on the
//!   triggering pairs, never on their insertion order.
//! - **Useful labels are explained:** activity, residential and mixed points
//!   always carry at least one triggering pair.
//! - **Ranking shape:** indices equal cluster sizes, noise is excluded and
//!   rows are sorted by descending index.

use std::collections::{BTreeSet, HashMap, HashSet};

use landuse_core::{
    ClusterAssignment, ClusterId, LandUse, RuleLabel, TagClassifier, Tags, Taxonomy,
    TriggeringPairs, aggregate, categorize, rank,
};
use proptest::prelude::*;

const TAG_POOL: &[(&str, &str)] = &[
    ("amenity", "restaurant"),
    ("amenity", "school"),
    ("shop", "bakery"),
    ("shop", "supermarket"),
    ("leisure", "park"),
    ("man_made", "works"),
    ("man_made", "flagpole"),
    ("building", "yes"),
    ("building", "house"),
    ("building", "apartments"),
    ("building", "office"),
    ("building:use", "retail"),
    ("building:part", "church"),
    ("name", "Connaught Place"),
    ("tourism", "museum"),
];

fn labels_strategy() -> impl Strategy<Value = BTreeSet<RuleLabel>> {
    prop::collection::btree_set(prop::sample::select(RuleLabel::ALL.to_vec()), 0..=5)
}

fn tags_strategy() -> impl Strategy<Value = Tags> {
    prop::collection::vec(prop::sample::select(TAG_POOL), 0..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect()
    })
}

/// Tag pairs with one value per attribute, as triggering pairs are.
fn distinct_pairs_strategy() -> impl Strategy<Value = Vec<(&'static str, &'static str)>> {
    prop::collection::vec(prop::sample::select(TAG_POOL), 0..6).prop_map(|pairs| {
        let mut seen = HashSet::new();
        pairs
            .into_iter()
            .filter(|(attribute, _)| seen.insert(*attribute))
            .collect()
    })
}

fn assignment_strategy() -> impl Strategy<Value = ClusterAssignment> {
    prop::collection::vec(prop::option::of(0_u32..4), 0..40).prop_map(|clusters| {
        ClusterAssignment::new(
            clusters
                .into_iter()
                .zip(0_u64..)
                .map(|(cluster, id)| (id, cluster.map_or(ClusterId::Noise, ClusterId::Cluster)))
                .collect(),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn other_always_wins(mut labels in labels_strategy()) {
        labels.insert(RuleLabel::Other);
        prop_assert_eq!(aggregate(&labels), LandUse::Unclassified);
    }

    #[test]
    fn activity_with_residential_is_mixed(mut labels in labels_strategy()) {
        labels.remove(&RuleLabel::Other);
        labels.insert(RuleLabel::Activity);
        labels.insert(RuleLabel::Residential);
        prop_assert_eq!(aggregate(&labels), LandUse::Mixed);
    }

    #[test]
    fn unknown_attributes_do_not_change_classification(tags in tags_strategy()) {
        let taxonomy = Taxonomy::osm_default();
        let classifier = TagClassifier::new(&taxonomy);
        let before = classifier.classify_tags(&tags);

        let mut extended = tags.clone();
        extended.insert("note".to_owned(), "surveyed".to_owned());
        extended.insert("opening_hours".to_owned(), "24/7".to_owned());
        prop_assert_eq!(classifier.classify_tags(&extended), before);
    }

    #[test]
    fn classification_is_idempotent(tags in tags_strategy()) {
        let taxonomy = Taxonomy::osm_default();
        let classifier = TagClassifier::new(&taxonomy);
        prop_assert_eq!(classifier.classify_tags(&tags), classifier.classify_tags(&tags.clone()));
    }

    #[test]
    fn categorize_ignores_insertion_order(
        (pairs, shuffled) in distinct_pairs_strategy()
            .prop_flat_map(|pairs| (Just(pairs.clone()), Just(pairs).prop_shuffle())),
    ) {
        let taxonomy = Taxonomy::osm_default();
        let forward: TriggeringPairs = pairs.into_iter().collect();
        let reordered: TriggeringPairs = shuffled.into_iter().collect();
        prop_assert_eq!(categorize(&taxonomy, &forward), categorize(&taxonomy, &reordered));
    }

    #[test]
    fn classified_points_are_explained(tags in tags_strategy()) {
        let taxonomy = Taxonomy::osm_default();
        let classification = TagClassifier::new(&taxonomy).classify_tags(&tags);
        if classification.land_use.is_classified() {
            prop_assert!(!classification.pairs.is_empty());
        } else {
            prop_assert!(classification.categories.is_empty());
        }
        for (attribute, value) in classification.pairs.iter() {
            prop_assert_eq!(tags.get(attribute).map(String::as_str), Some(value));
        }
    }

    #[test]
    fn ranking_reflects_cluster_sizes(assignment in assignment_strategy()) {
        let ranked = rank(&assignment);
        prop_assert_eq!(ranked.len(), assignment.len() - assignment.noise_count());

        let mut sizes: HashMap<ClusterId, usize> = HashMap::new();
        for (_, cluster) in assignment.iter().filter(|(_, cluster)| !cluster.is_noise()) {
            *sizes.entry(cluster).or_default() += 1;
        }
        for row in &ranked {
            prop_assert!(!row.cluster.is_noise());
            prop_assert_eq!(Some(&row.population_index), sizes.get(&row.cluster));
        }
        prop_assert!(
            ranked
                .windows(2)
                .all(|pair| matches!(pair, [a, b] if a.population_index >= b.population_index))
        );
    }
}
