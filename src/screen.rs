use std::{sync::Arc, time::Duration};

use serde::Serialize;
use tokio::{
    sync::{mpsc, Mutex},
    time::sleep,
};
use tracing::{debug, info};

use crate::{
    cart::Cart,
    catalog::Catalog,
    config::Timing,
    error::OrderError,
    events::{Notice, ScreenEvent},
    kitchen::OrderBook,
    model::{CartLine, CatalogItem, ItemId, Order, OrderId, Point, Projectile, ProjectileId, Rect, Tab, ALL_CATEGORIES},
    projectile::ProjectileRegistry,
    timers::{TimerRegistry, TimerScope},
    utils::time_label,
    voice::{VoiceGestureTracker, VoiceOutcome, VoicePhase, VoiceReaction},
};


// Geometry query answered by whoever lays out the screen
pub trait Layout: Send + Sync {
    // Bounding box of the cart icon, if it is currently laid out
    fn cart_rect(&self) -> Option<Rect>;
}

// Layout whose cart icon never moves
#[derive(Debug, Clone, Copy)]
pub struct FixedLayout {
    pub cart: Rect,
}

impl Layout for FixedLayout {
    fn cart_rect(&self) -> Option<Rect> {
        Some(self.cart)
    }
}


pub(crate) struct ScreenState {
    pub(crate) attached: bool,
    pub(crate) tab: Tab,
    pub(crate) category: String,
    pub(crate) visible: Vec<CatalogItem>,
    pub(crate) cart: Cart,
    pub(crate) orders: OrderBook,
    pub(crate) projectiles: ProjectileRegistry,
    pub(crate) voice: VoiceGestureTracker,
    pub(crate) cart_anchor: Point,
    pub(crate) cart_bounce: bool,
    pub(crate) timers: TimerRegistry,
}

impl ScreenState {
    fn new(timing: &Timing) -> Self {
        Self {
            attached: false,
            tab: Tab::Order,
            category: ALL_CATEGORIES.to_string(),
            visible: Vec::new(),
            cart: Cart::default(),
            orders: OrderBook::default(),
            projectiles: ProjectileRegistry::default(),
            voice: VoiceGestureTracker::new(timing.voice_cancel_distance),
            cart_anchor: Point::default(),
            cart_bounce: false,
            timers: TimerRegistry::default(),
        }
    }

    fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot {
            attached: self.attached,
            tab: self.tab,
            category: self.category.clone(),
            visible: self.visible.iter().map(|item| item.id).collect(),
            cart: self.cart.lines().to_vec(),
            total: self.cart.total(),
            cart_bounce: self.cart_bounce,
            cart_anchor: self.cart_anchor,
            projectiles: self.projectiles.iter().cloned().collect(),
            orders: self.orders.orders().to_vec(),
            voice: self.voice.phase(),
            pending_animation: self.timers.pending(TimerScope::Animation),
            pending_cooking: self.timers.pending(TimerScope::Cooking),
        }
    }
}


// Point-in-time copy of everything the screen renders
#[derive(Debug, Clone, Serialize)]
pub struct ScreenSnapshot {
    pub attached: bool,
    pub tab: Tab,
    pub category: String,
    pub visible: Vec<ItemId>,
    pub cart: Vec<CartLine>,
    pub total: u32,
    pub cart_bounce: bool,
    pub cart_anchor: Point,
    pub projectiles: Vec<Projectile>,
    pub orders: Vec<Order>,
    pub voice: VoicePhase,
    pub pending_animation: usize,
    pub pending_cooking: usize,
}

impl ScreenSnapshot {
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    pub fn quantity_of(&self, item_id: ItemId) -> u32 {
        self.cart
            .iter()
            .find(|line| line.item_id == item_id)
            .map_or(0, |line| line.quantity)
    }
}


// Read-only handle for renderers that must not keep the event sender alive
#[derive(Clone)]
pub struct ScreenView {
    state: Arc<Mutex<ScreenState>>,
}

impl ScreenView {
    pub async fn snapshot(&self) -> ScreenSnapshot {
        self.state.lock().await.snapshot()
    }
}


// Cloneable handle to one ordering screen
#[derive(Clone)]
pub struct OrderScreen {
    pub(crate) state: Arc<Mutex<ScreenState>>,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) timing: Arc<Timing>,
    layout: Arc<dyn Layout>,
    events: mpsc::UnboundedSender<ScreenEvent>,
}

impl OrderScreen {
    pub fn new(
        catalog: Catalog,
        timing: Timing,
        layout: Arc<dyn Layout>,
    ) -> (Self, mpsc::UnboundedReceiver<ScreenEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let screen = Self {
            state: Arc::new(Mutex::new(ScreenState::new(&timing))),
            catalog: Arc::new(catalog),
            timing: Arc::new(timing),
            layout,
            events,
        };
        (screen, events_rx)
    }

    pub fn view(&self) -> ScreenView {
        ScreenView { state: Arc::clone(&self.state) }
    }

    pub async fn snapshot(&self) -> ScreenSnapshot {
        self.state.lock().await.snapshot()
    }

    pub(crate) fn emit(&self, event: ScreenEvent) {
        let _ = self.events.send(event);
    }

    // Lifecycle

    pub async fn attach(&self) {
        let mut st = self.state.lock().await;
        st.timers.reset();
        // timers that owned these were cancelled by the last detach
        let dropped = st.projectiles.clear();
        st.cart_bounce = false;
        st.attached = true;
        let visible = self.catalog.visible(&st.category);
        st.visible = visible;
        self.schedule_anchor_refresh(&mut st, self.timing.attach_settle());
        self.resume_cooking(&mut st);
        info!(items = st.visible.len(), dropped, "order screen attached");
    }

    pub async fn detach(&self) {
        let mut st = self.state.lock().await;
        let cancelled = st.timers.cancel_all();
        st.attached = false;
        self.emit(ScreenEvent::Detached);
        info!(cancelled, "order screen detached");
    }

    fn schedule_anchor_refresh(&self, st: &mut ScreenState, delay: Duration) {
        st.timers
            .spawn(TimerScope::Animation, self.clone().refresh_cart_anchor(delay));
    }

    async fn refresh_cart_anchor(self, delay: Duration) {
        sleep(delay).await;
        let Some(rect) = self.layout.cart_rect() else {
            debug!("cart icon not laid out yet");
            return;
        };
        let center = rect.center();
        let half = self.timing.ball_half_size;

        let mut st = self.state.lock().await;
        if !st.attached {
            return;
        }
        st.cart_anchor = Point::new(center.x - half, center.y - half);
        debug!(x = st.cart_anchor.x, y = st.cart_anchor.y, "cart anchor updated");
    }

    // Navigation

    pub async fn switch_tab(&self, tab: Tab) {
        let mut st = self.state.lock().await;
        if !st.attached {
            return;
        }
        self.enter_tab(&mut st, tab);
    }

    fn enter_tab(&self, st: &mut ScreenState, tab: Tab) {
        st.tab = tab;
        self.emit(ScreenEvent::TabChanged(tab));
        if tab == Tab::Order {
            self.schedule_anchor_refresh(st, self.timing.tab_settle());
        }
    }

    pub async fn select_category(&self, category: &str) {
        let mut st = self.state.lock().await;
        st.category = category.to_string();
        st.visible = self.catalog.visible(category);
        debug!(category, visible = st.visible.len(), "category selected");
    }

    // Cart

    // With a touch point a projectile flies to the cart and the unit is
    // committed on landing; without one it is committed now
    pub async fn add_item(&self, item_id: ItemId, touch: Option<Point>) -> Option<ProjectileId> {
        let mut st = self.state.lock().await;
        if !st.attached {
            return None;
        }
        let Some(touch) = touch else {
            self.add_to_cart(&mut st, item_id);
            return None;
        };
        let Some(item) = self.catalog.item(item_id) else {
            debug!(%item_id, "no flight for unknown catalog item");
            return None;
        };
        let image = item.image.clone();
        Some(self.launch(&mut st, item_id, image, touch))
    }

    pub(crate) fn add_to_cart(&self, st: &mut ScreenState, item_id: ItemId) -> bool {
        let added = st.cart.add_unit(&self.catalog, item_id);
        if added {
            self.emit(ScreenEvent::CartChanged { total: st.cart.total() });
        }
        added
    }

    pub async fn submit(&self) -> Result<OrderId, OrderError> {
        let mut st = self.state.lock().await;
        if !st.attached {
            return Err(OrderError::Detached);
        }
        let lines = match st.cart.submit() {
            Ok(lines) => lines,
            Err(err) => {
                self.emit(ScreenEvent::Notify(Notice::plain("Please pick something first~")));
                return Err(err);
            }
        };

        let line_count = lines.len();
        let order_id = st.orders.place(lines, time_label());
        info!(%order_id, lines = line_count, "order placed");

        self.emit(ScreenEvent::CartChanged { total: 0 });
        self.emit(ScreenEvent::OrderPlaced(order_id));
        self.enter_tab(&mut st, Tab::Making);
        self.emit(ScreenEvent::Notify(Notice::success("Order placed!")));
        self.simulate_cooking(&mut st, order_id, line_count);
        Ok(order_id)
    }

    pub async fn select_history(&self, history_id: u32) {
        let mut st = self.state.lock().await;
        if !st.attached {
            return;
        }
        let Some(entry) = self.catalog.history_entry(history_id) else {
            return;
        };

        match self.catalog.item_by_name(&entry.name).map(|item| item.id) {
            Some(item_id) => {
                self.add_to_cart(&mut st, item_id);
                self.emit(ScreenEvent::Notify(Notice::plain(format!("Added {}", entry.name))));
                st.tab = Tab::Order;
                self.emit(ScreenEvent::TabChanged(Tab::Order));
            }
            None => {
                self.emit(ScreenEvent::Notify(Notice::success(format!("Selected {}", entry.name))));
            }
        }
    }

    // Voice

    pub async fn voice_press(&self, touch_y: Option<f64>) -> Option<VoiceOutcome> {
        self.voice_input(|voice| voice.press(touch_y)).await
    }

    pub async fn voice_move(&self, touch_y: Option<f64>) -> Option<VoiceOutcome> {
        self.voice_input(|voice| voice.move_to(touch_y)).await
    }

    pub async fn voice_release(&self) -> Option<VoiceOutcome> {
        self.voice_input(VoiceGestureTracker::release).await
    }

    pub async fn voice_cancel(&self) -> Option<VoiceOutcome> {
        self.voice_input(VoiceGestureTracker::cancel).await
    }

    async fn voice_input<F>(&self, input: F) -> Option<VoiceOutcome>
    where
        F: FnOnce(&mut VoiceGestureTracker) -> VoiceReaction,
    {
        let mut st = self.state.lock().await;
        if !st.attached {
            return None;
        }
        let before = st.voice.phase();
        let reaction = input(&mut st.voice);

        if st.voice.phase() != before {
            self.emit(ScreenEvent::VoiceChanged {
                recording: st.voice.is_recording(),
                cancel_pending: st.voice.cancel_pending(),
            });
        }
        for feedback in reaction.feedback {
            self.emit(feedback.into());
        }
        if let Some(outcome) = reaction.outcome {
            info!(?outcome, "voice gesture finished");
        }
        reaction.outcome
    }
}
