//! Shipped OpenStreetMap tag tables.
//!
//! Values follow the OpenStreetMap wiki groupings for `amenity`, `shop`,
//! `leisure`, `man_made` and `building`.

use super::TaxonomyBuilder;
use crate::{ActivityCategory, RuleLabel};

const AMENITY_SUSTENANCE: &[&str] = &[
    "bar",
    "pub",
    "restaurant",
    "biergarten",
    "cafe",
    "fast_food",
    "food_court",
    "ice_cream",
];

const AMENITY_EDUCATION: &[&str] = &[
    "college",
    "kindergarten",
    "library",
    "public_bookcase",
    "school",
    "music_school",
    "driving_school",
    "language_school",
    "university",
];

const AMENITY_TRANSPORTATION: &[&str] = &[
    "fuel",
    "bicycle_rental",
    "bus_station",
    "car_rental",
    "taxi",
    "car_wash",
    "ferry_terminal",
];

const AMENITY_FINANCIAL: &[&str] = &["atm", "bank", "bureau_de_change"];

const AMENITY_HEALTHCARE: &[&str] = &[
    "baby_hatch",
    "clinic",
    "dentist",
    "doctors",
    "hospital",
    "nursing_home",
    "pharmacy",
    "social_facility",
    "veterinary",
];

const AMENITY_ENTERTAINMENT: &[&str] = &[
    "arts_centre",
    "brothel",
    "casino",
    "cinema",
    "community_centre",
    "fountain",
    "gambling",
    "nightclub",
    "planetarium",
    "social_centre",
    "stripclub",
    "studio",
    "swingerclub",
    "theatre",
];

const AMENITY_OTHERS: &[&str] = &[
    "animal_boarding",
    "animal_shelter",
    "courthouse",
    "coworking_space",
    "crematorium",
    "dive_centre",
    "dojo",
    "embassy",
    "fire_station",
    "gym",
    "internet_cafe",
    "marketplace",
    "police",
    "post_office",
    "townhall",
];

const SHOP_OTHER: &[&str] = &[
    "bookmaker",
    "copyshop",
    "dry_cleaning",
    "e-cigarette",
    "funeral_directors",
    "laundry",
    "money_lender",
    "pawnbroker",
    "pet",
    "pyrotechnics",
    "religion",
    "tobacco",
    "toys",
    "travel_agency",
    "vacant",
    "weapons",
    "user defined",
];

const SHOP_GIFTS: &[&str] = &[
    "anime",
    "books",
    "gift",
    "lottery",
    "newsagent",
    "stationery",
    "ticket",
];

const SHOP_ART: &[&str] = &[
    "art",
    "collector",
    "craft",
    "frame",
    "games",
    "model",
    "music",
    "musical_instrument",
    "photo",
    "camera",
    "trophy",
    "video",
    "video_games",
];

const SHOP_SPORTS: &[&str] = &[
    "bicycle",
    "car",
    "car_repair",
    "car_parts",
    "fuel",
    "fishing",
    "free_flying",
    "hunting",
    "motorcycle",
    "outdoor",
    "scuba_diving",
    "sports",
    "swimming_pool",
    "tyres",
];

const SHOP_ELECTRONICS: &[&str] = &[
    "computer",
    "electronics",
    "hifi",
    "mobile_phone",
    "radiotechnics",
    "vacuum_cleaner",
];

const SHOP_FURNITURE: &[&str] = &[
    "antiques",
    "bed",
    "candles",
    "carpet",
    "curtain",
    "furniture",
    "interior_decoration",
    "kitchen",
    "lamps",
    "tiles",
    "window_blind",
];

const SHOP_HOUSEHOLD: &[&str] = &[
    "agrarian",
    "bathroom_furnishing",
    "doityourself",
    "electrical",
    "energy",
    "fireplace",
    "florist",
    "garden_centre",
    "garden_furniture",
    "gas",
    "glaziery",
    "hardware",
    "houseware",
    "locksmith",
    "paint",
    "security",
    "trade",
];

const SHOP_HEALTH: &[&str] = &[
    "beauty",
    "chemist",
    "cosmetics",
    "drugstore",
    "erotic",
    "hairdresser",
    "hairdresser_supply",
    "hearing_aids",
    "herbalist",
    "massage",
    "medical_supply",
    "nutrition_supplements",
    "optician",
    "perfumery",
    "tattoo",
];

const SHOP_CHARITY: &[&str] = &["charity", "second_hand", "variety_store"];

const SHOP_CLOTHING: &[&str] = &[
    "baby_goods",
    "bag",
    "boutique",
    "clothes",
    "fabric",
    "fashion",
    "jewelry",
    "leather",
    "shoes",
    "tailor",
    "watches",
];

const SHOP_MALL: &[&str] = &["department_store", "general", "kiosk", "mall", "supermarket"];

const SHOP_FOOD: &[&str] = &[
    "alcohol",
    "bakery",
    "beverages",
    "brewing_supplies",
    "butcher",
    "cheese",
    "chocolate",
    "coffee",
    "confectionery",
    "convenience",
    "deli",
    "dairy",
    "farm",
    "greengrocer",
    "ice_cream",
    "organic",
    "pasta",
    "pastry",
    "seafood",
    "spices",
    "tea",
    "wine",
];

// `shop=shop` is a common generic tag.
const SHOP_GENERIC: &[&str] = &["shop"];

const LEISURE: &[&str] = &[
    "dog_park",
    "bird_hide",
    "bandstand",
    "firepit",
    "fishing",
    "garden",
    "golf_course",
    "marina",
    "nature_reserve",
    "park",
    "playground",
    "slipway",
    "track",
    "wildlife_hide",
    "adult_gaming_centre",
    "amusement_arcade",
    "beach_resort",
    "dance",
    "escape_game",
    "fitness_centre",
    "hackerspace",
    "horse_riding",
    "ice_rink",
    "miniature_golf",
    "pitch",
    "sauna",
    "sports_centre",
    "stadium",
    "summer_camp",
    "swimming_area",
    "swimming_pool",
    "water_park",
];

const MAN_MADE_ACTIVITY: &[&str] = &[
    "offshore_platform",
    "works",
    "wastewater_plant",
    "water_works",
    "kiln",
    "monitoring_station",
    "observatory",
];

const MAN_MADE_OTHER: &[&str] = &[
    "adit",
    "beacon",
    "breakwater",
    "bridge",
    "bunker_silo",
    "campanile",
    "chimney",
    "communications_tower",
    "crane",
    "cross",
    "cutline",
    "clearcut",
    "embankment",
    "dovecote",
    "dyke",
    "flagpole",
    "gasometer",
    "groyne",
    "lighthouse",
    "mast",
    "mineshaft",
    "obelisk",
    "petroleum_well",
    "pier",
    "pipeline",
    "pumping_station",
    "reservoir_covered",
    "silo",
    "snow_fence",
    "snow_net",
    "storage_tank",
    "street_cabinet",
    "surveillance",
    "survey_point",
    "telescope",
    "tower",
    "watermill",
    "water_tower",
    "water_well",
    "water_tap",
    "wildlife_crossing",
    "windmill",
];

const BUILDING_INFER: &[&str] = &["yes"];

const BUILDING_OTHER: &[&str] = &[
    "barn",
    "bridge",
    "bunker",
    "cabin",
    "cowshed",
    "digester",
    "garage",
    "garages",
    "farm_auxiliary",
    "greenhouse",
    "hut",
    "roof",
    "shed",
    "stable",
    "sty",
    "transformer_tower",
    "service",
    "ruins",
];

const BUILDING_RELATED_ACTIVITY: &[&str] = &["hangar", "stable", "cowshed", "digester", "construction"];

const BUILDING_SHOP: &[&str] = &["shop", "kiosk"];

const BUILDING_COMMERCIAL: &[&str] = &[
    "commercial",
    "office",
    "industrial",
    "retail",
    "warehouse",
    "port",
];

const BUILDING_CIVIC: &[&str] = &[
    "cathedral",
    "chapel",
    "church",
    "mosque",
    "temple",
    "synagogue",
    "shrine",
    "civic",
    "hospital",
    "school",
    "stadium",
    "train_station",
    "transportation",
    "university",
    "public",
];

const BUILDING_RESIDENTIAL: &[&str] = &[
    "hotel",
    "farm",
    "apartment",
    "apartments",
    "dormitory",
    "house",
    "residential",
    "retirement_home",
    "terrace",
    "houseboat",
    "bungalow",
    "static_caravan",
    "detached",
];

const LANDUSE_NON_COMMERCIAL: &[&str] = &["quarry", "salt_pond", "military"];

const AMENITY_GROUPS: &[&[&str]] = &[
    AMENITY_SUSTENANCE,
    AMENITY_EDUCATION,
    AMENITY_TRANSPORTATION,
    AMENITY_FINANCIAL,
    AMENITY_HEALTHCARE,
    AMENITY_ENTERTAINMENT,
    AMENITY_OTHERS,
];

const AMENITY_NON_COMMERCIAL: &[&[&str]] = &[
    AMENITY_EDUCATION,
    AMENITY_TRANSPORTATION,
    AMENITY_FINANCIAL,
    AMENITY_HEALTHCARE,
    AMENITY_ENTERTAINMENT,
    AMENITY_OTHERS,
];

const SHOP_GROUPS: &[&[&str]] = &[
    SHOP_OTHER,
    SHOP_GIFTS,
    SHOP_ART,
    SHOP_SPORTS,
    SHOP_ELECTRONICS,
    SHOP_FURNITURE,
    SHOP_HOUSEHOLD,
    SHOP_HEALTH,
    SHOP_CHARITY,
    SHOP_CLOTHING,
    SHOP_MALL,
    SHOP_FOOD,
    SHOP_GENERIC,
];

const BUILDING_ACTIVITY: &[&[&str]] = &[
    BUILDING_COMMERCIAL,
    BUILDING_CIVIC,
    BUILDING_RELATED_ACTIVITY,
    BUILDING_SHOP,
];

/// Attributes that mirror the `building` activity and residential rules.
const BUILDING_ATTRIBUTES: [&str; 3] = ["building", "building:use", "building:part"];

fn flatten(groups: &'static [&'static [&'static str]]) -> impl Iterator<Item = &'static str> {
    groups.iter().flat_map(|group| group.iter().copied())
}

pub(super) fn builder() -> TaxonomyBuilder {
    let mut builder = TaxonomyBuilder::default()
        .rule(RuleLabel::Activity, "amenity", flatten(AMENITY_GROUPS))
        .rule(RuleLabel::Activity, "shop", flatten(SHOP_GROUPS))
        .rule(RuleLabel::Activity, "leisure", LEISURE.iter().copied())
        .rule(RuleLabel::Activity, "man_made", MAN_MADE_ACTIVITY.iter().copied())
        .rule(RuleLabel::Other, "man_made", MAN_MADE_OTHER.iter().copied())
        .rule(RuleLabel::Infer, "building", BUILDING_INFER.iter().copied())
        .rule(RuleLabel::Other, "building", BUILDING_OTHER.iter().copied());

    for attribute in BUILDING_ATTRIBUTES {
        builder = builder
            .rule(RuleLabel::Activity, attribute, flatten(BUILDING_ACTIVITY))
            .rule(
                RuleLabel::Residential,
                attribute,
                BUILDING_RESIDENTIAL.iter().copied(),
            );
    }

    builder
        .activity_values(ActivityCategory::Commercial, AMENITY_SUSTENANCE.iter().copied())
        .activity_values(ActivityCategory::Commercial, flatten(SHOP_GROUPS))
        .activity_values(ActivityCategory::Commercial, BUILDING_COMMERCIAL.iter().copied())
        .activity_values(ActivityCategory::Commercial, BUILDING_SHOP.iter().copied())
        .activity_values(ActivityCategory::NonCommercial, flatten(AMENITY_NON_COMMERCIAL))
        .activity_values(ActivityCategory::NonCommercial, LEISURE.iter().copied())
        .activity_values(
            ActivityCategory::NonCommercial,
            MAN_MADE_ACTIVITY.iter().copied(),
        )
        .activity_values(ActivityCategory::NonCommercial, BUILDING_CIVIC.iter().copied())
        .activity_values(
            ActivityCategory::NonCommercial,
            BUILDING_RELATED_ACTIVITY.iter().copied(),
        )
        .activity_values(
            ActivityCategory::NonCommercial,
            LANDUSE_NON_COMMERCIAL.iter().copied(),
        )
}
