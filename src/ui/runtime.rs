use crate::config::Config;
use crate::coordinator::{intent_channel, Coordinator};
use crate::gateway::Gateway;
use crate::routing::Route;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Runs the TUI until the user quits.
///
/// Blocks the calling thread; the caller must have entered a tokio runtime
/// so that coordinator tasks can be spawned.
pub fn run(config: &Config, gateway: Arc<dyn Gateway>, initial: Route) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);
    let fetch_timeout = Duration::from_secs(u64::from(config.api.request_timeout_seconds));

    let (intent_tx, intent_rx) = intent_channel();
    let events = EventHandler::new(tick_rate);
    let forwarder = events.forward_intents(intent_rx);

    let mut app = App::new(config, Coordinator::new(gateway, intent_tx, fetch_timeout));
    if let Ok((cols, rows)) = crossterm::terminal::size() {
        app.on_resize(cols, rows);
    }
    app.start(initial);
    info!(route = %app.route(), "UI started");

    loop {
        terminal.draw(|frame| draw(frame, &mut app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(event) => {
                if !apply(&mut app, event) {
                    break;
                }
                // Settle everything already queued before the next frame.
                while let Some(event) = events.try_next() {
                    if !apply(&mut app, event) {
                        break;
                    }
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    app.shutdown();
    forwarder.abort();
    drop(guard);
    info!("UI stopped");
    Ok(())
}

/// Returns false when the loop should stop.
fn apply(app: &mut App, event: AppEvent) -> bool {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Tick => app.on_tick(),
        AppEvent::Resize(cols, rows) => app.on_resize(cols, rows),
        AppEvent::Store(intent) => app.on_store(intent),
        AppEvent::InputClosed => return false,
    }
    !app.should_quit()
}
