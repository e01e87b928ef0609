use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gito::{
    app::{App, AppScreen},
    chat_view::chat_task,
    config::{get_config, initialize_config},
    constants::GREETING_QUERY,
    key_handlers, logging, ui,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};

enum Event {
    Input(CEvent),
    Tick,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    initialize_config()?;
    let config = get_config();
    let _logger = logging::init_logging(&config.log_level)?;
    log::info!(
        "starting gito (model: {}, credential configured: {})",
        config.model,
        !config.api_key.is_empty()
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(App::new()));
    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Input reader: polls crossterm with a timeout and interleaves ticks
    // that drive the spinner animation.
    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            let timeout = Duration::from_millis(100);
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if tx.send(Event::Input(event)).await.is_err() {
                        return;
                    }
                }
            }

            if last_tick.elapsed() >= Duration::from_millis(250) {
                if tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        {
            let mut guard = app.lock().await;
            terminal.draw(|f| ui::draw(f, &mut guard))?;
            if guard.screen == AppScreen::Quit {
                break;
            }
        }

        let Some(event) = rx.recv().await else { break };
        match event {
            Event::Input(CEvent::Key(key)) => {
                let mut guard = app.lock().await;
                key_handlers::handle_key(app.clone(), &mut guard, key).await;
            }
            Event::Input(_) => {}
            Event::Tick => {
                let mut guard = app.lock().await;
                guard.tick();
                maybe_send_greeting(&app, &mut guard);
            }
        }
    }

    Ok(())
}

/// First entry into the chat screen resolves a greeting so the assistant
/// introduces itself before the user types anything.
fn maybe_send_greeting(app_arc: &Arc<Mutex<App>>, app: &mut App) {
    if app.screen == AppScreen::Chat && !app.chat_greeted && !app.chat_thinking {
        app.chat_greeted = true;
        app.chat_thinking = true;
        app.status_indicator.set_thinking(true);
        let clone = app_arc.clone();
        tokio::spawn(async move {
            chat_task(clone, GREETING_QUERY.to_string()).await;
        });
    }
}
