use serde::{Deserialize, Serialize};


macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(ItemId, u32);
id_newtype!(OrderId, u64);
id_newtype!(ProjectileId, u64);


// Selector that matches every catalog item
pub const ALL_CATEGORIES: &str = "all";

// Screen coordinate in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// Bounding rectangle reported by the layout collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

// Static, purchasable entry of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
}

// Category tab; the id is a tag or the "all" sentinel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

// Past order shown in the history strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u32,
    pub month: String,
    pub day: String,
    pub name: String,
    pub emoji: String,
}

// One aggregated line of the pending cart or of a placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub done: bool,
}

// A submitted cart going through the simulated kitchen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub submitted_at: String,
    pub lines: Vec<CartLine>,
    pub all_done: bool,
}

// Transient ball flying from the touch point to the cart icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub image: String,
    pub position: Point,
    pub opacity: f64,
    pub scale: f64,
}

// Top-level tabs of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Order,
    Making,
}


impl Order {
    // Derived flag: every line has finished cooking
    pub fn lines_all_done(&self) -> bool {
        self.lines.iter().all(|line| line.done)
    }
}
