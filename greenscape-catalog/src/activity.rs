use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Activity categories offered on the site
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityCategory {
    Hiking,
    Wildlife,
    Camping,
    Photography,
    Safari,
    Lodging,
}

/// Duration choices shown for a selected activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationOption {
    HalfDay,
    FullDay,
    Overnight,
    MultiDay,
    Week,
}

/// A bookable activity with a fixed base price in two denominations.
/// KSH prices are pre-converted at the static 150 KSH/USD rate rather
/// than derived at quote time, mirroring the published price list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ActivityCategory,
    pub base_price_usd: i64,
    pub base_price_ksh: i64,
    pub is_active: bool,
}

impl Activity {
    /// Overnight-style activities get longer-stay duration choices.
    pub fn duration_options(&self) -> &'static [DurationOption] {
        match self.category {
            ActivityCategory::Camping | ActivityCategory::Lodging => &[
                DurationOption::Overnight,
                DurationOption::MultiDay,
                DurationOption::Week,
            ],
            _ => &[
                DurationOption::HalfDay,
                DurationOption::FullDay,
                DurationOption::Overnight,
                DurationOption::MultiDay,
            ],
        }
    }
}

/// The activity catalog. Iteration follows declaration order so pricing
/// and display stay deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, Activity>,
    order: Vec<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, activity: Activity) {
        if !self.entries.contains_key(&activity.id) {
            self.order.push(activity.id.clone());
        }
        self.entries.insert(activity.id.clone(), activity);
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Activities in a category, declaration order preserved.
    pub fn filter_by_category(&self, category: ActivityCategory) -> Vec<&Activity> {
        self.iter().filter(|a| a.category == category).collect()
    }

    /// Case-insensitive substring search over name and description.
    /// An empty query returns the full catalog.
    pub fn search(&self, query: &str) -> Vec<&Activity> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return self.iter().collect();
        }
        self.iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&term)
                    || a.description.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// The production catalog at the published 150 KSH/USD rate.
    pub fn greenscape() -> Self {
        Self::greenscape_with_rate(150.0)
    }

    /// The production catalog with the KSH series derived from a
    /// configured conversion rate (business_rules.usd_to_ksh_rate).
    pub fn greenscape_with_rate(ksh_per_usd: f64) -> Self {
        let mut catalog = Self::new();
        let seed = [
            (
                "forest-hiking",
                "Forest Hiking",
                "Guided hikes through old-growth forest trails.",
                ActivityCategory::Hiking,
                45,
            ),
            (
                "bird-watching",
                "Bird Watching",
                "Early morning birding walks with a local ornithologist.",
                ActivityCategory::Wildlife,
                35,
            ),
            (
                "eco-camping",
                "Eco Camping",
                "Low-impact overnight camping at riverside sites.",
                ActivityCategory::Camping,
                85,
            ),
            (
                "nature-photography",
                "Nature Photography",
                "Small-group photography outings at golden hour.",
                ActivityCategory::Photography,
                55,
            ),
            (
                "wildlife-safari",
                "Wildlife Safari",
                "Open-vehicle safari across the conservancy.",
                ActivityCategory::Safari,
                65,
            ),
            (
                "eco-lodging",
                "Eco Lodging",
                "Solar-powered lodge stays with full board.",
                ActivityCategory::Lodging,
                120,
            ),
        ];
        for (id, name, description, category, usd) in seed {
            catalog.insert(Activity {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                category,
                base_price_usd: usd,
                base_price_ksh: (usd as f64 * ksh_per_usd).round() as i64,
                is_active: true,
            });
        }
        catalog
    }
}
