//! Buff / skill group data model
//!
//! Items (buffs) and groups are built once by a loader through
//! [`CatalogBuilder`] and are immutable afterwards. Groups share their
//! items through `Arc`, so merging never copies buff data.

use crate::error::{CoreError, Result};
use crate::filter::ItemFilter;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Default upper bound (exclusive) of the priority histogram
pub const MAX_PRIORITY: usize = 100;

/// Buff category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Offensive,
    Defensive,
    Movement,
    Support,
    Utility,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Offensive => "offensive",
            Category::Defensive => "defensive",
            Category::Movement => "movement",
            Category::Support => "support",
            Category::Utility => "utility",
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Case-insensitive. Unknown tags are rejected, never defaulted.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offensive" => Ok(Category::Offensive),
            "defensive" => Ok(Category::Defensive),
            "movement" => Ok(Category::Movement),
            "support" => Ok(Category::Support),
            "utility" => Ok(Category::Utility),
            _ => Err(CoreError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Damage type tag
///
/// `Any` means "no restriction"; it is also what unknown raw values map to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    None,
    Physical,
    Magical,
    #[default]
    Any,
}

impl DamageType {
    /// Lenient parse: empty and unrecognized values become `Any`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => DamageType::None,
            "physical" => DamageType::Physical,
            "magical" | "magic" => DamageType::Magical,
            _ => DamageType::Any,
        }
    }

    /// Whether an item of type `self` satisfies a filter asking for `wanted`.
    pub fn is_compatible_with(self, wanted: DamageType) -> bool {
        self == DamageType::Any || wanted == DamageType::Any || self == wanted
    }
}

/// Weighting value attached to a buff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    /// 1 = most important, 0 = unranked
    Priority(u32),
    Score(u64),
}

/// A buff. Identity is `name`, unique across the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub category: Option<Category>,
    pub damage: DamageType,
    pub description: String,
    pub weight: Option<Weight>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            damage: DamageType::Any,
            description: String::new(),
            weight: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_damage(mut self, damage: DamageType) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.weight = Some(Weight::Priority(priority));
        self
    }

    pub fn with_score(mut self, score: u64) -> Self {
        self.weight = Some(Weight::Score(score));
        self
    }

    /// Priority rank, 0 when unranked or score-weighted
    pub fn priority(&self) -> u32 {
        match self.weight {
            Some(Weight::Priority(p)) => p,
            _ => 0,
        }
    }

    /// Score, 0 when unset or priority-weighted
    pub fn score(&self) -> u64 {
        match self.weight {
            Some(Weight::Score(s)) => s,
            _ => 0,
        }
    }
}

/// A named skill group
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub name: String,
    items: Vec<Arc<Item>>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Build a group from already-shared items. Duplicate names keep the first.
    pub fn with_items(name: impl Into<String>, items: impl IntoIterator<Item = Arc<Item>>) -> Self {
        let mut group = Self::new(name);
        for item in items {
            if !group.contains(&item.name) {
                group.items.push(item);
            }
        }
        group
    }

    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Loaded dataset: every buff plus the groups in their input order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Arc<Item>>,
    groups: Vec<Group>,
}

impl Catalog {
    pub fn new(items: Vec<Arc<Item>>, groups: Vec<Group>) -> Self {
        Self { items, groups }
    }

    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn item(&self, name: &str) -> Option<&Arc<Item>> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Rejects any priority that would not fit a histogram of `max_priority` slots.
    pub fn check_priorities(&self, max_priority: usize) -> Result<()> {
        for item in &self.items {
            let priority = item.priority();
            if priority as usize >= max_priority {
                return Err(CoreError::PriorityOutOfRange {
                    item: item.name.clone(),
                    priority,
                    max: max_priority,
                });
            }
        }
        Ok(())
    }
}

/// Mutable staging area used while a dataset is being parsed
///
/// Weights and filters are applied here; [`CatalogBuilder::build`] freezes
/// the result into shared, immutable items.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    group_names: Vec<String>,
    items: Vec<Item>,
    memberships: Vec<Vec<usize>>,
    index: FxHashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn new(group_names: Vec<String>) -> Self {
        Self {
            group_names,
            ..Self::default()
        }
    }

    pub fn group_names(&self) -> &[String] {
        &self.group_names
    }

    /// Register a buff with the indices of the groups it belongs to.
    pub fn add_item(&mut self, item: Item, memberships: Vec<usize>) -> Result<()> {
        if self.index.contains_key(&item.name) {
            return Err(CoreError::DuplicateItem(item.name));
        }
        if let Some(&bad) = memberships.iter().find(|&&g| g >= self.group_names.len()) {
            return Err(CoreError::InvalidConfig(format!(
                "buff {:?} refers to group #{} but only {} groups exist",
                item.name,
                bad,
                self.group_names.len()
            )));
        }
        self.index.insert(item.name.clone(), self.items.len());
        self.items.push(item);
        self.memberships.push(memberships);
        Ok(())
    }

    /// Returns false when no buff has that name.
    pub fn set_weight(&mut self, name: &str, weight: Weight) -> bool {
        match self.index.get(name) {
            Some(&idx) => {
                self.items[idx].weight = Some(weight);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Freeze into a [`Catalog`]. Buffs rejected by `filter` stay in the
    /// catalog but are removed from every group.
    pub fn build(self, filter: &ItemFilter) -> Catalog {
        let mut groups: Vec<Group> = self.group_names.into_iter().map(Group::new).collect();
        let mut items = Vec::with_capacity(self.items.len());

        for (item, memberships) in self.items.into_iter().zip(self.memberships) {
            let item = Arc::new(item);
            if filter.accepts(&item) {
                for group_idx in memberships {
                    groups[group_idx].items.push(Arc::clone(&item));
                }
            }
            items.push(item);
        }

        Catalog { items, groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("Offensive".parse::<Category>().unwrap(), Category::Offensive);
        assert_eq!(" movement ".parse::<Category>().unwrap(), Category::Movement);

        let err = "explosive".parse::<Category>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownCategory(ref raw) if raw == "explosive"));
    }

    #[test]
    fn test_damage_parse_defaults_to_any() {
        assert_eq!(DamageType::parse_lenient("Physical"), DamageType::Physical);
        assert_eq!(DamageType::parse_lenient("none"), DamageType::None);
        assert_eq!(DamageType::parse_lenient("fire"), DamageType::Any);
        assert_eq!(DamageType::parse_lenient(""), DamageType::Any);
    }

    #[test]
    fn test_damage_compatibility() {
        assert!(DamageType::Physical.is_compatible_with(DamageType::Physical));
        assert!(DamageType::Any.is_compatible_with(DamageType::Magical));
        assert!(DamageType::Magical.is_compatible_with(DamageType::Any));
        assert!(!DamageType::None.is_compatible_with(DamageType::Physical));
    }

    #[test]
    fn test_item_weights() {
        let ranked = Item::new("haste").with_priority(3);
        assert_eq!(ranked.priority(), 3);
        assert_eq!(ranked.score(), 0);

        let scored = Item::new("shield").with_score(12);
        assert_eq!(scored.priority(), 0);
        assert_eq!(scored.score(), 12);

        assert_eq!(Item::new("plain").priority(), 0);
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let mut builder = CatalogBuilder::new(vec!["A".into()]);
        builder.add_item(Item::new("x"), vec![0]).unwrap();
        let err = builder.add_item(Item::new("x"), vec![]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateItem(_)));
    }

    #[test]
    fn test_builder_rejects_unknown_group_index() {
        let mut builder = CatalogBuilder::new(vec!["A".into()]);
        assert!(builder.add_item(Item::new("x"), vec![1]).is_err());
    }

    #[test]
    fn test_build_with_weights_and_filter() {
        let mut builder = CatalogBuilder::new(vec!["A".into(), "B".into()]);
        builder
            .add_item(Item::new("x").with_category(Category::Offensive), vec![0, 1])
            .unwrap();
        builder
            .add_item(Item::new("y").with_category(Category::Defensive), vec![1])
            .unwrap();
        assert!(builder.set_weight("x", Weight::Priority(2)));
        assert!(!builder.set_weight("missing", Weight::Priority(2)));

        let filter = ItemFilter::new().with_categories([Category::Offensive]);
        let catalog = builder.build(&filter);

        assert_eq!(catalog.items().len(), 2);
        assert_eq!(catalog.groups()[0].len(), 1);
        assert_eq!(catalog.groups()[1].len(), 1);
        assert!(!catalog.groups()[1].contains("y"));
        assert_eq!(catalog.item("x").unwrap().priority(), 2);
    }

    #[test]
    fn test_check_priorities() {
        let items = vec![Arc::new(Item::new("x").with_priority(99))];
        let catalog = Catalog::new(items, Vec::new());
        assert!(catalog.check_priorities(100).is_ok());

        let err = catalog.check_priorities(10).unwrap_err();
        assert!(matches!(
            err,
            CoreError::PriorityOutOfRange { priority: 99, max: 10, .. }
        ));
    }

    #[test]
    fn test_group_with_items_dedups() {
        let x = Arc::new(Item::new("x"));
        let group = Group::with_items("A", [Arc::clone(&x), x]);
        assert_eq!(group.len(), 1);
    }
}
