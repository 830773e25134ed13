use super::{Category, ItemId, Map, MealItemSpec};

/// The items available at a meal, partitioned by category.
///
/// Within a category, items keep the order in which they were supplied; this order
/// drives enumeration (and therefore tie-breaking) in the item selector.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<MealItemSpec>", into = "Vec<MealItemSpec>")
)]
pub struct Catalog(Map<Category, Vec<MealItemSpec>>);

impl Catalog {
    /// Add an item to the end of its category
    pub fn insert(&mut self, item: MealItemSpec) {
        self.0.entry(item.category).or_default().push(item);
    }

    /// The items of a category (empty if the category is absent)
    pub fn items(&self, category: Category) -> &[MealItemSpec] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Look up an item by id
    pub fn find(&self, id: &ItemId) -> Option<&MealItemSpec> {
        self.iter().find(|item| &item.id == id)
    }

    /// Iterate over every item, category by category
    pub fn iter(&self) -> impl Iterator<Item = &MealItemSpec> {
        self.0.values().flatten()
    }

    /// The total number of items
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Whether the catalog has no items at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<MealItemSpec> for Catalog {
    fn from_iter<I: IntoIterator<Item = MealItemSpec>>(iter: I) -> Self {
        let mut catalog = Self::default();
        catalog.extend(iter);
        catalog
    }
}

impl Extend<MealItemSpec> for Catalog {
    fn extend<I: IntoIterator<Item = MealItemSpec>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl From<Vec<MealItemSpec>> for Catalog {
    fn from(value: Vec<MealItemSpec>) -> Self {
        value.into_iter().collect()
    }
}

impl From<Catalog> for Vec<MealItemSpec> {
    fn from(value: Catalog) -> Self {
        value.0.into_values().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutritionVector;

    fn item(id: u64, category: Category) -> MealItemSpec {
        MealItemSpec::new(id, category, 100.0, 0, NutritionVector::default()).unwrap()
    }

    #[test]
    fn test_partition_preserves_order() {
        let catalog: Catalog = [
            item(1, Category::Protein),
            item(2, Category::Grain),
            item(3, Category::Protein),
        ]
        .into_iter()
        .collect();

        let proteins: Vec<_> = catalog
            .items(Category::Protein)
            .iter()
            .map(|item| item.id.clone())
            .collect();
        assert_eq!(proteins, vec![ItemId::from(1), ItemId::from(3)]);
        assert!(catalog.items(Category::Vegetable).is_empty());
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find(&ItemId::from(2)).map(|i| i.category), Some(Category::Grain));
    }
}
