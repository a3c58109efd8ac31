use std::time::Duration;
use rand::{Rng, SeedableRng};
use order_screen::{model::{ItemId, Point, ALL_CATEGORIES}, Catalog};


// One user action of a scripted session
#[derive(Debug, Clone)]
pub enum ScriptStep {
    Browse(String),
    Tap { item: ItemId, touch: Option<Point> },
    Pause(Duration),
    PickHistory(u32),
    Submit,
    Voice { path: Vec<f64> },
}


// Random generation of a tap; most taps carry a touch point
fn random_tap(rng: &mut impl Rng, catalog: &Catalog) -> Option<ScriptStep> {
    if catalog.items.is_empty() {
        return None;
    }
    let item = catalog.items[rng.gen_range(0..catalog.items.len())].id;
    let touch = rng
        .gen_bool(0.85)
        .then(|| Point::new(rng.gen_range(20.0..360.0), rng.gen_range(120.0..620.0)));
    Some(ScriptStep::Tap { item, touch })
}

// Random generation of a category switch
fn random_browse(rng: &mut impl Rng, catalog: &Catalog) -> ScriptStep {
    match catalog.categories.len() {
        0 => ScriptStep::Browse(ALL_CATEGORIES.to_string()),
        n => ScriptStep::Browse(catalog.categories[rng.gen_range(0..n)].id.clone()),
    }
}

// Random generation of a hold-to-talk gesture: finger drifts up from y = 700
fn random_voice(rng: &mut impl Rng) -> ScriptStep {
    let samples = rng.gen_range(2..6);
    let mut y = 700.0;
    let mut path = Vec::with_capacity(samples);
    for _ in 0..samples {
        y -= rng.gen_range(0.0..40.0);
        path.push(y);
    }
    ScriptStep::Voice { path }
}

fn random_pause(rng: &mut impl Rng) -> ScriptStep {
    ScriptStep::Pause(Duration::from_millis(rng.gen_range(40..400)))
}

// Random generation of one ordering round ending in a submit
fn random_round(rng: &mut impl Rng, catalog: &Catalog, taps: usize) -> Vec<ScriptStep> {
    let mut steps = vec![random_browse(rng, catalog)];
    for _ in 0..taps {
        steps.extend(random_tap(rng, catalog));
        steps.push(random_pause(rng));
    }
    if !catalog.history.is_empty() && rng.gen_bool(0.5) {
        let entry = &catalog.history[rng.gen_range(0..catalog.history.len())];
        steps.push(ScriptStep::PickHistory(entry.id));
    }
    // let the last projectiles land before submitting
    steps.push(ScriptStep::Pause(Duration::from_millis(700)));
    steps.push(ScriptStep::Submit);
    if rng.gen_bool(0.6) {
        steps.push(random_voice(rng));
    }
    steps
}

// Generate a seeded session of several rounds
pub fn generate_session(catalog: &Catalog, seed: u64, rounds: usize, taps: usize) -> Vec<ScriptStep> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut steps = Vec::new();
    for _ in 0..rounds {
        steps.extend(random_round(&mut rng, catalog, taps));
        steps.push(random_pause(&mut rng));
    }
    steps
}
