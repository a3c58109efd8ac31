use std::{io::{self, Write}, pin::Pin, time::Duration};
use tokio::{sync::mpsc, time::Instant};
use order_screen::{
    model::Tab,
    utils::{order_done_lines, order_total_items},
    Notice, ScreenEvent, ScreenSnapshot, ScreenView, VoicePhase,
};


// Render the screen state to the terminal
pub fn redraw_screen(start: Instant, snap: &ScreenSnapshot, last_notice: Option<&Notice>) {
    // Move cursor to top-left and clear screen
    print!("\x1B[H\x1B[0J");

    let elapsed = start.elapsed().as_secs_f32();
    let tab = match snap.tab {
        Tab::Order => "order",
        Tab::Making => "making",
    };
    println!("Time: {:.1}s   tab: {}   category: {}\n", elapsed, tab, snap.category);

    println!("Cart ({} items){}", snap.total, if snap.cart_bounce { "  *bounce*" } else { "" });
    println!("item | name                 | qty");
    println!("---- | -------------------- | ---");
    for line in &snap.cart {
        println!("{:>4} | {:<20} | {:>3}", line.item_id, line.name, line.quantity);
    }

    println!("\nIn flight: {}", snap.projectiles.len());
    for p in &snap.projectiles {
        println!(
            "  #{:<6} at ({:>6.1}, {:>6.1}) scale {:.2} opacity {:.2}",
            p.id, p.position.x, p.position.y, p.scale, p.opacity
        );
    }

    println!("\nMaking");
    println!("order    | time  | done/lines | items | status");
    println!("-------- | ----- | ---------- | ----- | ------");
    for order in &snap.orders {
        println!(
            "{:>8} | {:<5} | {:>4}/{:<5} | {:>5} | {}",
            order.id,
            order.submitted_at,
            order_done_lines(order),
            order.lines.len(),
            order_total_items(order),
            if order.all_done { "ready" } else { "cooking" },
        );
    }

    let voice = match snap.voice {
        VoicePhase::Idle => "idle".to_string(),
        VoicePhase::Recording { cancel_pending: true, .. } => "recording (release to cancel)".to_string(),
        VoicePhase::Recording { .. } => "recording".to_string(),
    };
    println!("\nVoice: {voice}");
    println!("Timers: {} animation, {} cooking", snap.pending_animation, snap.pending_cooking);
    if let Some(notice) = last_notice {
        println!("Notice: {}", notice.text);
    }

    let _ = io::stdout().flush();
}


pub async fn dashboard_task(
    mut events_rx: mpsc::UnboundedReceiver<ScreenEvent>,
    view: ScreenView,
    start: Instant,
) {
    let mut last_notice: Option<Notice> = None;

    // "dirty flag": data changed since last render
    let mut dirty = true; // render once at startup
    let debounce = Duration::from_millis(120);

    // Debounce timer: coalesce many events into one redraw
    let mut pending: Option<Pin<Box<tokio::time::Sleep>>> = None;

    loop {
        tokio::select! {
            ev = events_rx.recv() => {
                match ev {
                    Some(ScreenEvent::Detached) | None => {
                        // Screen torn down; do a final render and exit
                        let snap = view.snapshot().await;
                        redraw_screen(start, &snap, last_notice.as_ref());
                        break;
                    }
                    Some(event) => {
                        if let ScreenEvent::Notify(notice) = event {
                            last_notice = Some(notice);
                        }
                        dirty = true;

                        // Start debounce if not already running
                        if pending.is_none() {
                            pending = Some(Box::pin(tokio::time::sleep(debounce)));
                        }
                    }
                }
            }

            // Debounce fires: redraw once if anything changed
            _ = async {
                if let Some(s) = &mut pending {
                    s.as_mut().await;
                }
            }, if pending.is_some() => {
                if dirty {
                    let snap = view.snapshot().await;
                    redraw_screen(start, &snap, last_notice.as_ref());
                    dirty = false;
                }
                pending = None;
            }
        }
    }

    let _ = io::stdout().flush();
}
