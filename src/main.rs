use std::{io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use tokio::time::{sleep, timeout, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use order_screen::{
    load_settings,
    model::{Rect, Tab},
    FixedLayout, OrderScreen,
};

mod dashboard;
mod random;

use random::ScriptStep;


#[derive(Parser, Debug)]
#[command(about = "Plays a seeded ordering session against the order screen")]
struct Args {
    /// TOML settings file with timings and catalog data
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Ordering rounds, each ending in a submit
    #[arg(long, default_value_t = 2)]
    rounds: usize,
    /// Add-to-cart taps per round
    #[arg(long, default_value_t = 6)]
    taps: usize,
    /// Skip the terminal dashboard
    #[arg(long)]
    quiet: bool,
    /// Print the final screen snapshot as JSON
    #[arg(long)]
    json: bool,
}


// Cart icon of the simulated layout, bottom right of a 375pt wide screen
const CART_ICON: Rect = Rect { left: 290.0, top: 720.0, width: 60.0, height: 40.0 };


async fn play(screen: &OrderScreen, steps: Vec<ScriptStep>) {
    for step in steps {
        match step {
            ScriptStep::Browse(category) => screen.select_category(&category).await,
            ScriptStep::Tap { item, touch } => {
                screen.add_item(item, touch).await;
            }
            ScriptStep::Pause(pause) => sleep(pause).await,
            ScriptStep::PickHistory(id) => screen.select_history(id).await,
            ScriptStep::Submit => {
                match screen.submit().await {
                    Ok(order_id) => info!(%order_id, "submitted"),
                    Err(err) => warn!(%err, "submit rejected"),
                }
                screen.switch_tab(Tab::Order).await;
            }
            ScriptStep::Voice { path } => {
                screen.voice_press(Some(700.0)).await;
                for y in path {
                    sleep(Duration::from_millis(80)).await;
                    screen.voice_move(Some(y)).await;
                }
                sleep(Duration::from_millis(80)).await;
                if let Some(outcome) = screen.voice_release().await {
                    info!(?outcome, "voice message");
                }
            }
        }
    }
}

// Only warnings while the dashboard owns the terminal
fn default_filter(quiet: bool) -> &'static str {
    if quiet {
        "info"
    } else {
        "warn"
    }
}

// Poll until every order is ready and nothing is flying
async fn wait_for_kitchen(screen: &OrderScreen) {
    loop {
        let snap = screen.snapshot().await;
        if snap.projectiles.is_empty() && snap.orders.iter().all(|o| o.all_done) {
            return;
        }
        sleep(Duration::from_millis(250)).await;
    }
}


#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(args.quiet))),
        )
        .with_writer(io::stderr)
        .init();

    let settings = load_settings(args.config.as_deref())?;
    let script = random::generate_session(&settings.catalog, args.seed, args.rounds, args.taps);
    let cook_budget = settings
        .timing
        .cook_delay(settings.catalog.items.len())
        .saturating_mul(2);

    let layout = Arc::new(FixedLayout { cart: CART_ICON });
    let (screen, events_rx) = OrderScreen::new(settings.catalog, settings.timing, layout);

    let start = Instant::now();
    let dashboard = if args.quiet {
        drop(events_rx);
        None
    } else {
        Some(tokio::spawn(dashboard::dashboard_task(events_rx, screen.view(), start)))
    };

    screen.attach().await;
    play(&screen, script).await;
    if timeout(cook_budget, wait_for_kitchen(&screen)).await.is_err() {
        warn!("kitchen did not finish in time; tearing down anyway");
    }
    screen.detach().await;

    if let Some(dashboard) = dashboard {
        dashboard.await?;
    }

    let snap = screen.snapshot().await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        info!(orders = snap.orders.len(), elapsed = ?start.elapsed(), "session finished");
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_runs_keep_logs_to_warnings() {
        assert_eq!(default_filter(false), "warn");
        assert_eq!(default_filter(true), "info");
    }

    #[test]
    fn quiet_flag_and_defaults_parse() {
        let args = Args::parse_from(["order_screen", "--quiet", "--seed", "7"]);
        assert!(args.quiet);
        assert_eq!(args.seed, 7);
        assert_eq!(args.rounds, 2);
        assert!(args.config.is_none());
    }
}
