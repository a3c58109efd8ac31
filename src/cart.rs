use tracing::debug;
use crate::{
    catalog::Catalog,
    error::OrderError,
    model::{CartLine, ItemId},
};


// Pending order lines, at most one per catalog item, in first-added order
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    total: u32,
}


impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn quantity_of(&self, item_id: ItemId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item_id == item_id)
            .map_or(0, |line| line.quantity)
    }

    // Add one unit of an item; unknown items leave the cart untouched
    pub fn add_unit(&mut self, catalog: &Catalog, item_id: ItemId) -> bool {
        let Some(item) = catalog.item(item_id) else {
            debug!(%item_id, "ignoring add for unknown catalog item");
            return false;
        };

        match self.lines.iter_mut().find(|line| line.item_id == item_id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                item_id,
                name: item.name.clone(),
                image: item.image.clone(),
                quantity: 1,
                done: false,
            }),
        }
        self.total += 1;
        debug!(%item_id, total = self.total, "cart updated");
        true
    }

    // Take the lines out for a new order and empty the cart
    pub fn submit(&mut self) -> Result<Vec<CartLine>, OrderError> {
        if self.is_empty() {
            return Err(OrderError::NothingSelected);
        }
        let snapshot = std::mem::take(&mut self.lines)
            .into_iter()
            .map(|line| CartLine { done: false, ..line })
            .collect();
        self.total = 0;
        Ok(snapshot)
    }
}
