use std::time::Duration;
use tracing::{debug, info};
use crate::{
    events::ScreenEvent,
    model::{CartLine, Order, OrderId},
    screen::{OrderScreen, ScreenState},
    timers::TimerScope,
    utils::allocate_id,
};


// What a completion event found when it fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookingUpdate {
    OrderGone,
    LineGone,
    LineDone { order_done: bool },
}


// Orders being prepared, newest first
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}


impl OrderBook {
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    // True once every placed order has finished
    pub fn all_done(&self) -> bool {
        self.orders.iter().all(|order| order.all_done)
    }

    // (order, line position) of every line still cooking
    pub fn unfinished_lines(&self) -> Vec<(OrderId, usize)> {
        self.orders
            .iter()
            .flat_map(|order| {
                order
                    .lines
                    .iter()
                    .enumerate()
                    .filter(|(_, line)| !line.done)
                    .map(move |(position, _)| (order.id, position))
            })
            .collect()
    }

    pub fn place(&mut self, lines: Vec<CartLine>, submitted_at: String) -> OrderId {
        let id = OrderId(allocate_id());
        let lines = lines
            .into_iter()
            .map(|line| CartLine { done: false, ..line })
            .collect();
        self.orders.insert(0, Order { id, submitted_at, lines, all_done: false });
        id
    }

    // Mark a line finished, locating the order by id at the moment of the call
    pub fn complete_line(&mut self, id: OrderId, line: usize) -> CookingUpdate {
        let Some(order) = self.orders.iter_mut().find(|order| order.id == id) else {
            return CookingUpdate::OrderGone;
        };
        let Some(entry) = order.lines.get_mut(line) else {
            return CookingUpdate::LineGone;
        };
        entry.done = true;
        order.all_done = order.lines_all_done();
        CookingUpdate::LineDone { order_done: order.all_done }
    }
}


impl OrderScreen {
    // One completion timer per line, staggered by position
    pub(crate) fn simulate_cooking(&self, st: &mut ScreenState, order_id: OrderId, lines: usize) {
        for line in 0..lines {
            self.schedule_line(st, order_id, line);
        }
    }

    // Restart the timers of lines whose completion was cancelled by a detach
    pub(crate) fn resume_cooking(&self, st: &mut ScreenState) {
        if st.orders.all_done() {
            return;
        }
        let unfinished = st.orders.unfinished_lines();
        debug!(lines = unfinished.len(), "resuming cooking");
        for (order_id, line) in unfinished {
            self.schedule_line(st, order_id, line);
        }
    }

    fn schedule_line(&self, st: &mut ScreenState, order_id: OrderId, line: usize) {
        let delay = self.timing.cook_delay(line);
        st.timers
            .spawn(TimerScope::Cooking, self.clone().finish_line(order_id, line, delay));
    }

    async fn finish_line(self, order_id: OrderId, line: usize, delay: Duration) {
        tokio::time::sleep(delay).await;
        let mut st = self.state.lock().await;
        if !st.attached {
            return;
        }

        match st.orders.complete_line(order_id, line) {
            CookingUpdate::LineDone { order_done } => {
                debug!(%order_id, line, "line ready");
                self.emit(ScreenEvent::LineDone { order_id, line });
                if order_done {
                    info!(%order_id, "order ready");
                    self.emit(ScreenEvent::OrderDone(order_id));
                }
            }
            stale => debug!(%order_id, line, ?stale, "completion for a missing target"),
        }
    }
}
