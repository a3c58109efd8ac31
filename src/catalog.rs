use serde::{Deserialize, Serialize};
use crate::model::{CatalogItem, Category, HistoryEntry, ItemId, ALL_CATEGORIES};


// Static catalog data supplied at start-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}


impl Catalog {
    pub fn item(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn history_entry(&self, id: u32) -> Option<&HistoryEntry> {
        self.history.iter().find(|entry| entry.id == id)
    }

    pub fn visible(&self, selector: &str) -> Vec<CatalogItem> {
        filter_items(&self.items, selector)
    }
}


// Items shown for a category selector; "all" keeps everything
pub fn filter_items(items: &[CatalogItem], selector: &str) -> Vec<CatalogItem> {
    if selector == ALL_CATEGORIES {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.category == selector)
        .cloned()
        .collect()
}


fn dish(id: u32, name: &str, description: &str, image: &str, category: &str) -> CatalogItem {
    CatalogItem {
        id: ItemId(id),
        name: name.to_string(),
        description: description.to_string(),
        image: format!("https://images.unsplash.com/{image}?w=200"),
        category: category.to_string(),
    }
}

fn category(id: &str, name: &str) -> Category {
    Category { id: id.to_string(), name: name.to_string() }
}

fn past(id: u32, day: &str, name: &str, emoji: &str) -> HistoryEntry {
    HistoryEntry {
        id,
        month: "Dec".to_string(),
        day: day.to_string(),
        name: name.to_string(),
        emoji: emoji.to_string(),
    }
}


impl Default for Catalog {
    fn default() -> Self {
        Self {
            items: vec![
                dish(1, "Spicy Hotpot", "Extra hot beef slices with seasonal greens", "photo-1617093727343-374698b1b08d", "serious"),
                dish(2, "Pearl Milk Tea", "Brown sugar pearls, half sugar, no ice", "photo-1558857563-b371033873b8", "midnight"),
                dish(3, "Cheese Pasta", "Bolognese sauce with double cheese", "photo-1621996346565-e3dbc646d9a9", "serious"),
                dish(4, "Strawberry Cake", "Fresh strawberry slices and whipped cream", "photo-1565958011703-44f9829ba187", "dessert"),
                dish(5, "Late Night Skewers", "Cumin-spiced grilled skewers", "photo-1529193591184-b1d58069ecdd", "midnight"),
            ],
            categories: vec![
                category(ALL_CATEGORIES, "All"),
                category("midnight", "Late night"),
                category("serious", "Mains"),
                category("dessert", "Dessert"),
            ],
            history: vec![
                past(1, "24", "Spicy Hotpot", "🍲"),
                past(2, "21", "Pearl Milk Tea", "🧋"),
                past(3, "18", "Strawberry Cake", "🍰"),
                past(4, "15", "Late Night Skewers", "🍢"),
            ],
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_selector_keeps_every_item() {
        let catalog = Catalog::default();
        assert_eq!(catalog.visible(ALL_CATEGORIES), catalog.items);
    }

    #[test]
    fn tag_selector_keeps_matching_items_in_order() {
        let catalog = Catalog::default();
        let ids: Vec<ItemId> = catalog.visible("midnight").iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ItemId(2), ItemId(5)]);
    }

    #[test]
    fn unknown_selector_yields_nothing() {
        assert!(Catalog::default().visible("breakfast").is_empty());
    }

    #[test]
    fn lookups() {
        let catalog = Catalog::default();
        assert_eq!(catalog.item(ItemId(4)).map(|i| i.name.as_str()), Some("Strawberry Cake"));
        assert!(catalog.item(ItemId(99)).is_none());
        assert_eq!(catalog.item_by_name("Cheese Pasta").map(|i| i.id), Some(ItemId(3)));
        assert_eq!(catalog.history_entry(2).map(|h| h.name.as_str()), Some("Pearl Milk Tea"));
    }

    #[test]
    fn default_data_is_consistent() {
        let catalog = Catalog::default();
        let ids: HashSet<ItemId> = catalog.items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), catalog.items.len());
        assert!(catalog.categories.iter().any(|c| c.id == ALL_CATEGORIES));
        for entry in &catalog.history {
            assert!(catalog.item_by_name(&entry.name).is_some());
        }
    }
}
