use crate::core::price::format_inr;
use crate::models::{Package, PriceRange};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// What to do with packages whose price could not be parsed (reads as 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroPricePolicy {
    /// Keep them; 0 is always under the price ceiling
    #[default]
    Include,
    /// Drop them whenever a price ceiling is set
    Exclude,
}

/// Per-destination knobs fed into the filter and sort engine
#[derive(Debug, Clone)]
pub struct DestinationProfile {
    pub slug: String,
    pub name: String,
    /// Location token -> canonical city name
    pub synonyms: HashMap<String, String>,
    pub default_price_range: PriceRange,
    /// Package type -> popularity rank, lower sorts first
    pub popularity_ranks: HashMap<String, u32>,
    pub zero_price_policy: ZeroPricePolicy,
    /// Served when the store is unreachable and nothing is cached
    pub fallback_packages: Vec<Package>,
}

impl DestinationProfile {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            synonyms: HashMap::new(),
            default_price_range: PriceRange { min: 0, max: 500_000 },
            popularity_ranks: HashMap::new(),
            zero_price_policy: ZeroPricePolicy::Include,
            fallback_packages: vec![],
        }
    }

    pub fn with_synonym(mut self, alias: &str, canonical: &str) -> Self {
        self.synonyms.insert(alias.to_string(), canonical.to_string());
        self
    }

    pub fn with_price_range(mut self, min: u64, max: u64) -> Self {
        self.default_price_range = PriceRange { min, max };
        self
    }

    /// Ranks follow the order of `types`, starting at 1
    pub fn with_popularity(mut self, types: &[&str]) -> Self {
        self.set_popularity(types);
        self
    }

    fn set_popularity(&mut self, types: &[&str]) {
        self.popularity_ranks = types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i as u32 + 1))
            .collect();
    }

    pub fn with_fallback(mut self, packages: Vec<Package>) -> Self {
        self.fallback_packages = packages;
        self
    }

    /// Map a location token to its canonical city name
    pub fn canonical_city<'a>(&'a self, token: &'a str) -> &'a str {
        self.synonyms.get(token).map(String::as_str).unwrap_or(token)
    }

    /// Popularity rank of a package type; unknown types rank after all known ones
    pub fn popularity_rank(&self, package_type: Option<&str>) -> u32 {
        package_type
            .and_then(|t| self.popularity_ranks.get(t))
            .copied()
            .unwrap_or(self.popularity_ranks.len() as u32 + 1)
    }

    /// Apply configured overrides on top of this profile
    pub fn apply(&mut self, overrides: &DestinationOverrides) {
        if let Some(name) = &overrides.name {
            self.name = name.clone();
        }
        self.synonyms.extend(
            overrides
                .synonyms
                .iter()
                .map(|s| (s.alias.clone(), s.city.clone())),
        );
        if let Some(range) = overrides.price_range {
            self.default_price_range = range;
        }
        if !overrides.popularity.is_empty() {
            let types: Vec<&str> = overrides.popularity.iter().map(String::as_str).collect();
            self.set_popularity(&types);
        }
        if let Some(policy) = overrides.zero_price_policy {
            self.zero_price_policy = policy;
        }
    }
}

/// One `alias -> city` mapping from configuration
///
/// Kept as a list of entries rather than a table since config keys are
/// lowercased on load and city names are matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CitySynonym {
    pub alias: String,
    pub city: String,
}

/// Destination settings read from configuration (`[destinations.<slug>]`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DestinationOverrides {
    pub name: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<CitySynonym>,
    pub price_range: Option<PriceRange>,
    /// Package types in popularity order
    #[serde(default)]
    pub popularity: Vec<String>,
    pub zero_price_policy: Option<ZeroPricePolicy>,
}

/// Lookup of destination profiles by slug
#[derive(Debug, Clone, Default)]
pub struct DestinationRegistry {
    profiles: BTreeMap<String, Arc<DestinationProfile>>,
}

impl DestinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with every destination the site sells
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for profile in builtin_profiles() {
            registry.insert(profile);
        }
        registry
    }

    pub fn insert(&mut self, profile: DestinationProfile) {
        self.profiles.insert(profile.slug.to_lowercase(), Arc::new(profile));
    }

    /// Merge configured overrides, creating profiles for unknown slugs
    pub fn apply_overrides<'a, I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (&'a String, &'a DestinationOverrides)>,
    {
        for (slug, settings) in overrides {
            let key = slug.to_lowercase();
            let profile = self
                .profiles
                .entry(key.clone())
                .or_insert_with(|| Arc::new(DestinationProfile::new(key.clone(), slug.clone())));
            Arc::make_mut(profile).apply(settings);
            tracing::debug!("Applied configuration overrides for destination {}", key);
        }
    }

    pub fn get(&self, slug: &str) -> Option<&Arc<DestinationProfile>> {
        self.profiles.get(&slug.trim().to_lowercase())
    }

    pub fn slugs(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DestinationProfile>> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn fallback_package(
    id: &str,
    title: &str,
    location: &str,
    price: u64,
    days: &str,
    hotel_rating: u8,
    package_type: &str,
    features: &[&str],
) -> Package {
    Package {
        id: id.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        price: Some(format_inr(price).as_str().into()),
        days: days.to_string(),
        hotel_rating,
        package_type: Some(package_type.to_string()),
        features: features.iter().map(|f| f.to_string()).collect(),
        highlights: vec![],
        image: None,
        destination: None,
    }
}

fn builtin_profiles() -> Vec<DestinationProfile> {
    vec![
        DestinationProfile::new("dubai", "Dubai")
            .with_synonym("Dubai City", "Dubai")
            .with_synonym("Abu Dhabi City", "Abu Dhabi")
            .with_price_range(30_000, 250_000)
            .with_popularity(&["Family", "Honeymoon", "Luxury", "Adventure", "Budget"])
            .with_fallback(vec![
                fallback_package(
                    "dubai-fallback-1", "Dubai Delight", "Dubai", 45_000,
                    "4 Nights 5 Days", 3, "Budget",
                    &["Desert Safari", "Dhow Cruise", "City Tour"],
                ),
                fallback_package(
                    "dubai-fallback-2", "Dubai & Abu Dhabi Explorer", "Dubai & Abu Dhabi", 78_000,
                    "6 Nights 7 Days", 4, "Family",
                    &["Ferrari World", "Burj Khalifa", "Grand Mosque"],
                ),
                fallback_package(
                    "dubai-fallback-3", "Luxury Arabian Escape", "Dubai", 1_45_000,
                    "5 Nights and 6 Days", 5, "Luxury",
                    &["Burj Al Arab Dinner", "Private Transfers"],
                ),
            ]),
        DestinationProfile::new("malaysia", "Malaysia")
            .with_synonym("KL", "Kuala Lumpur")
            .with_synonym("Genting", "Genting Highlands")
            .with_synonym("Langkawi Island", "Langkawi")
            .with_price_range(25_000, 200_000)
            .with_popularity(&["Family", "Honeymoon", "Adventure", "Luxury"])
            .with_fallback(vec![
                fallback_package(
                    "malaysia-fallback-1", "Kuala Lumpur Getaway", "Kuala Lumpur, Genting Highlands", 38_000,
                    "3 Nights 4 Days", 3, "Family",
                    &["Petronas Towers", "Batu Caves"],
                ),
                fallback_package(
                    "malaysia-fallback-2", "Malaysia Island Hopper", "Kuala Lumpur & Langkawi & Penang", 72_000,
                    "6 Nights 7 Days", 4, "Honeymoon",
                    &["Cable Car", "Island Hopping", "Street Food Walk"],
                ),
            ]),
        DestinationProfile::new("maldives", "Maldives")
            .with_synonym("Male City", "Male")
            .with_synonym("Malé", "Male")
            .with_price_range(60_000, 400_000)
            .with_popularity(&["Honeymoon", "Luxury", "Family"])
            .with_fallback(vec![
                fallback_package(
                    "maldives-fallback-1", "Maldives Water Villa Retreat", "Male & Maafushi", 1_20_000,
                    "4 Nights 5 Days", 5, "Honeymoon",
                    &["Water Villa", "Sunset Cruise", "All Meals"],
                ),
                fallback_package(
                    "maldives-fallback-2", "Maldives Beach Break", "Maafushi", 65_000,
                    "3 Nights 4 Days", 3, "Family",
                    &["Snorkelling", "Sandbank Picnic"],
                ),
            ]),
        DestinationProfile::new("thailand", "Thailand")
            .with_synonym("Bangkok City", "Bangkok")
            .with_synonym("Phuket Island", "Phuket")
            .with_synonym("Pattaya City", "Pattaya")
            .with_price_range(20_000, 180_000)
            .with_popularity(&["Family", "Honeymoon", "Adventure", "Budget", "Luxury"])
            .with_fallback(vec![
                fallback_package(
                    "thailand-fallback-1", "Bangkok & Pattaya Saver", "Bangkok & Pattaya", 32_000,
                    "4 Nights 5 Days", 3, "Budget",
                    &["Coral Island", "Alcazar Show"],
                ),
                fallback_package(
                    "thailand-fallback-2", "Phuket Krabi Romance", "Phuket, Krabi", 68_000,
                    "5 Nights 6 Days", 4, "Honeymoon",
                    &["Phi Phi Island Tour", "Candlelight Dinner"],
                ),
            ]),
        DestinationProfile::new("bali", "Bali")
            .with_synonym("Ubud Village", "Ubud")
            .with_synonym("Kuta Beach", "Kuta")
            .with_price_range(35_000, 220_000)
            .with_popularity(&["Honeymoon", "Family", "Adventure", "Luxury"])
            .with_fallback(vec![
                fallback_package(
                    "bali-fallback-1", "Bali Honeymoon Special", "Ubud & Kuta", 58_000,
                    "5 Nights 6 Days", 4, "Honeymoon",
                    &["Private Pool Villa", "Floating Breakfast"],
                ),
                fallback_package(
                    "bali-fallback-2", "Bali Volcano Trek", "Kintamani, Ubud", 42_000,
                    "4 Nights 5 Days", 3, "Adventure",
                    &["Mount Batur Sunrise Trek", "Rice Terraces"],
                ),
            ]),
        DestinationProfile::new("singapore", "Singapore")
            .with_synonym("Sentosa Island", "Sentosa")
            .with_price_range(40_000, 220_000)
            .with_popularity(&["Family", "Luxury", "Honeymoon"])
            .with_fallback(vec![
                fallback_package(
                    "singapore-fallback-1", "Singapore Fun Break", "Singapore & Sentosa", 62_000,
                    "4 Nights 5 Days", 4, "Family",
                    &["Universal Studios", "Night Safari"],
                ),
            ]),
    ]
}
