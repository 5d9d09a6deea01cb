//! Category / damage filtering of buffs before combination

use crate::error::Result;
use crate::model::{Category, DamageType, Item};
use serde::{Deserialize, Serialize};

/// Buff filter. The default accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFilter {
    /// Allowed categories; `None` means no category restriction
    pub categories: Option<Vec<Category>>,
    /// Wanted damage type; `None` behaves like `Any`
    pub damage: Option<DamageType>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    pub fn with_damage(mut self, damage: DamageType) -> Self {
        self.damage = Some(damage);
        self
    }

    /// Parse raw tags the way they appear on the command line.
    ///
    /// Unknown categories are an error; an unknown damage tag means no
    /// damage restriction.
    pub fn from_raw(categories: &[String], damage: Option<&str>) -> Result<Self> {
        let mut filter = Self::new();
        if !categories.is_empty() {
            let parsed = categories
                .iter()
                .map(|raw| raw.parse::<Category>())
                .collect::<Result<Vec<_>>>()?;
            filter.categories = Some(parsed);
        }
        filter.damage = damage.map(DamageType::parse_lenient);
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_none() && matches!(self.damage, None | Some(DamageType::Any))
    }

    pub fn accepts(&self, item: &Item) -> bool {
        if let Some(allowed) = &self.categories {
            match item.category {
                Some(category) if allowed.contains(&category) => {}
                _ => return false,
            }
        }
        match self.damage {
            Some(wanted) => item.damage.is_compatible_with(wanted),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_all() {
        let filter = ItemFilter::default();
        assert!(filter.is_empty());
        assert!(filter.accepts(&Item::new("anything")));
    }

    #[test]
    fn test_category_filter_rejects_unclassified() {
        let filter = ItemFilter::new().with_categories([Category::Movement]);
        assert!(filter.accepts(&Item::new("dash").with_category(Category::Movement)));
        assert!(!filter.accepts(&Item::new("slash").with_category(Category::Offensive)));
        assert!(!filter.accepts(&Item::new("mystery")));
    }

    #[test]
    fn test_damage_filter() {
        let filter = ItemFilter::new().with_damage(DamageType::Magical);
        assert!(filter.accepts(&Item::new("bolt").with_damage(DamageType::Magical)));
        assert!(filter.accepts(&Item::new("any").with_damage(DamageType::Any)));
        assert!(!filter.accepts(&Item::new("cut").with_damage(DamageType::Physical)));
        assert!(!filter.accepts(&Item::new("aura").with_damage(DamageType::None)));
    }

    #[test]
    fn test_from_raw() {
        let filter =
            ItemFilter::from_raw(&["offensive".into(), "Support".into()], Some("sparkly")).unwrap();
        assert_eq!(
            filter.categories,
            Some(vec![Category::Offensive, Category::Support])
        );
        assert_eq!(filter.damage, Some(DamageType::Any));

        assert!(ItemFilter::from_raw(&["bogus".into()], None).is_err());
    }
}
