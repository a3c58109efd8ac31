use std::collections::BTreeMap;
use tokio::time::{interval, Duration, Instant};
use tracing::{debug, trace};
use crate::{
    events::ScreenEvent,
    model::{ItemId, Point, Projectile, ProjectileId},
    screen::{OrderScreen, ScreenState},
    timers::TimerScope,
    utils::{allocate_id, bezier_point},
};


// Arc from the touch point to the cart icon through a lifted control point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}


impl Flight {
    pub fn new(start: Point, end: Point, arc_lift: f64) -> Self {
        let control = Point::new((start.x + end.x) / 2.0, start.y.min(end.y) - arc_lift);
        Self { start, control, end }
    }

    pub fn position(&self, t: f64) -> Point {
        Point::new(
            bezier_point(t, self.start.x, self.control.x, self.end.x),
            bezier_point(t, self.start.y, self.control.y, self.end.y),
        )
    }
}


// The ball shrinks and fades a little on its way
pub fn scale_at(progress: f64) -> f64 {
    1.0 - 0.6 * progress
}

pub fn opacity_at(progress: f64) -> f64 {
    1.0 - 0.3 * progress
}


// In-flight projectiles keyed by id; frames never address them by position
#[derive(Debug, Default)]
pub struct ProjectileRegistry {
    flying: BTreeMap<ProjectileId, Projectile>,
}


impl ProjectileRegistry {
    pub fn spawn(&mut self, image: String, start: Point) -> Projectile {
        let projectile = Projectile {
            id: ProjectileId(allocate_id()),
            image,
            position: start,
            opacity: 1.0,
            scale: 1.0,
        };
        self.flying.insert(projectile.id, projectile.clone());
        projectile
    }

    // Move one projectile to its frame at `progress`; None if it is gone
    pub fn advance(&mut self, id: ProjectileId, flight: &Flight, progress: f64) -> Option<&Projectile> {
        let projectile = self.flying.get_mut(&id)?;
        projectile.position = flight.position(progress);
        projectile.scale = scale_at(progress);
        projectile.opacity = opacity_at(progress);
        Some(projectile)
    }

    pub fn remove(&mut self, id: ProjectileId) -> Option<Projectile> {
        self.flying.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.flying.values()
    }

    pub fn len(&self) -> usize {
        self.flying.len()
    }

    // Drop every projectile; returns how many were still flying
    pub fn clear(&mut self) -> usize {
        let dropped = self.flying.len();
        self.flying.clear();
        dropped
    }
}


impl OrderScreen {
    // Place a projectile at the touch point and start its flight task
    pub(crate) fn launch(&self, st: &mut ScreenState, item_id: ItemId, image: String, touch: Point) -> ProjectileId {
        let half = self.timing.ball_half_size;
        let start = Point::new(touch.x - half, touch.y - half);
        let flight = Flight::new(start, st.cart_anchor, self.timing.arc_lift);

        let projectile = st.projectiles.spawn(image, start);
        let id = projectile.id;
        debug!(%id, %item_id, in_flight = st.projectiles.len(), "projectile launched");
        self.emit(ScreenEvent::ProjectileLaunched(projectile));

        st.timers
            .spawn(TimerScope::Animation, self.clone().fly(id, flight, item_id));
        id
    }

    async fn fly(self, id: ProjectileId, flight: Flight, item_id: ItemId) {
        let started = Instant::now();
        let duration = self.timing.flight().as_secs_f64();
        let mut frames = interval(self.timing.frame().max(Duration::from_millis(1)));

        loop {
            frames.tick().await;
            let progress = (started.elapsed().as_secs_f64() / duration).min(1.0);

            let mut st = self.state.lock().await;
            if !st.attached {
                return;
            }
            if let Some(projectile) = st.projectiles.advance(id, &flight, progress) {
                trace!(%id, progress, x = projectile.position.x, y = projectile.position.y, "frame");
                self.emit(ScreenEvent::ProjectileMoved(projectile.clone()));
            }
            if progress >= 1.0 {
                self.land(&mut st, id, item_id);
                return;
            }
        }
    }

    fn land(&self, st: &mut ScreenState, id: ProjectileId, item_id: ItemId) {
        self.add_to_cart(st, item_id);
        self.bounce_cart(st);
        if st.projectiles.remove(id).is_some() {
            self.emit(ScreenEvent::ProjectileLanded { id, item_id });
        }
        debug!(%id, %item_id, in_flight = st.projectiles.len(), "projectile landed");
    }

    fn bounce_cart(&self, st: &mut ScreenState) {
        st.cart_bounce = true;
        self.emit(ScreenEvent::CartBounce(true));
        st.timers
            .spawn(TimerScope::Animation, self.clone().settle_bounce());
    }

    async fn settle_bounce(self) {
        tokio::time::sleep(self.timing.bounce()).await;
        let mut st = self.state.lock().await;
        if !st.attached {
            return;
        }
        st.cart_bounce = false;
        self.emit(ScreenEvent::CartBounce(false));
    }
}
