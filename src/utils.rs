use std::sync::atomic::{AtomicU64, Ordering};
use crate::model::{CartLine, Order};


static NEXT_ID: AtomicU64 = AtomicU64::new(1);


// Point on a quadratic Bezier curve for one axis; t is expected in [0, 1]
pub fn bezier_point(t: f64, p0: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    u * u * p0 + 2.0 * u * t * p1 + t * t * p2
}


// Process-unique identifier for projectiles and orders
pub fn allocate_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}


// Wall-clock label shown next to a placed order
pub fn time_label() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}


// Sum of quantities over a set of lines
pub fn total_quantity(lines: &[CartLine]) -> u32 {
    lines.iter().map(|l| l.quantity).sum()
}


// Count total items in an order
pub fn order_total_items(order: &Order) -> u32 {
    total_quantity(&order.lines)
}


// Count lines already finished in an order
pub fn order_done_lines(order: &Order) -> usize {
    order.lines.iter().filter(|l| l.done).count()
}
