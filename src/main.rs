// ============================================================================
// Coinboard - Dashboard crypto dans le terminal
// ============================================================================
// Programme TUI : listing CoinGecko rafraîchi périodiquement, graphique du
// coin sélectionné, favoris persistés sur disque
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui applique les résultats, dessine, lit le clavier
// 3. Worker thread : le réseau tourne sur un runtime tokio à part
// 4. Un seul écrivain : seule l'event loop modifie App (pas de Mutex)
// ============================================================================

use std::io;
use std::sync::mpsc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use coinboard::api::MarketClient;
use coinboard::app::{App, ChartRequest};
use coinboard::config::{Config, LoggingConfig};
use coinboard::storage::FavoritesStore;
use coinboard::ui::{render, Event, EventHandler};
use coinboard::worker::{spawn_background_worker, AppCommand, AppResult};

// ============================================================================
// Logging
// ============================================================================

/// Initialise le logging vers un fichier à rotation quotidienne
///
/// CONCEPT : Pas de logs sur stdout
/// - Le terminal est en raw mode, tout println casserait l'affichage
/// - RUST_LOG a priorité sur le filtre de la configuration
fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(&config.dir).context("Failed to create log directory")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.dir, "coinboard.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.filter))
                .unwrap_or_else(|_| "coinboard=debug,info".into()),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!(log_dir = ?config.dir, "Logging initialized");
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::load_default();

    init_logging(&config.logging).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(api = %config.api.base_url, "Coinboard starting up");

    // Favoris lus une seule fois au démarrage
    let store = FavoritesStore::new(&config.storage.data_dir);
    let favorites = store.load();
    info!(count = favorites.len(), path = ?store.path(), "Favorites loaded");

    let mut app = App::new(favorites, config.refresh.interval());

    let client = MarketClient::new(&config.api).context("Failed to build HTTP client")?;
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();
    let (command_tx, worker) = spawn_background_worker(client, result_tx)?;

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;
    let events = EventHandler::default();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &command_tx, &result_rx, &store);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // Fermer le canal arrête le worker
    drop(command_tx);
    if worker.join().is_err() {
        error!("Worker thread panicked");
    }

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event loop
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &UnboundedSender<AppCommand>,
    result_rx: &mpsc::Receiver<AppResult>,
    store: &FavoritesStore,
) -> Result<()> {
    while app.is_running() {
        // 0. RÉSULTATS : tout ce que le worker a terminé depuis le dernier tour
        loop {
            match result_rx.try_recv() {
                Ok(result) => apply_result(app, result, command_tx),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => bail!("Background worker stopped"),
            }
        }

        // 1. TIMER : rafraîchissement périodique du listing
        let now = Instant::now();
        if app.refresh_due(now) {
            let request = app.begin_market_refresh(now);
            send(command_tx, AppCommand::FetchMarkets(request));
        }

        // 2. RENDER
        terminal.draw(|frame| render(frame, app))?;

        // 3. INPUT
        match events.next() {
            Ok(event) => handle_event(app, event, command_tx, store),
            Err(e) => warn!(error = %e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

/// Applique un résultat du worker à l'état
fn apply_result(app: &mut App, result: AppResult, command_tx: &UnboundedSender<AppCommand>) {
    match result {
        AppResult::Markets { request, result } => {
            if let Some(chart) = app.apply_market_result(request, result) {
                request_chart(command_tx, chart);
            }
        }
        AppResult::Chart { request, result } => {
            app.apply_chart_result(&request, result);
        }
    }
}

fn send(command_tx: &UnboundedSender<AppCommand>, command: AppCommand) {
    if command_tx.send(command).is_err() {
        error!("Worker channel closed, command dropped");
    }
}

fn request_chart(command_tx: &UnboundedSender<AppCommand>, request: ChartRequest) {
    send(command_tx, AppCommand::FetchChart(request));
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Le mode recherche capture toutes les touches
/// - L'écran d'erreur ne garde que reload et quit
fn handle_event(
    app: &mut App,
    event: Event,
    command_tx: &UnboundedSender<AppCommand>,
    store: &FavoritesStore,
) {
    use coinboard::ui::events::{
        get_char_from_event, get_sort_key_from_event, is_backspace_event, is_down_event,
        is_enter_event, is_escape_event, is_favorite_event, is_next_window_event,
        is_previous_window_event, is_quit_event, is_reload_event, is_search_event,
        is_selected_favorite_event, is_tab_event, is_up_event,
    };

    if matches!(event, Event::Tick) {
        return;
    }

    // Une erreur de listing prend le pas sur la saisie en cours
    if app.error.is_some() && app.is_in_search_mode() {
        app.submit_search();
    }

    if app.is_in_search_mode() {
        if is_escape_event(&event) {
            app.cancel_search();
        } else if is_enter_event(&event) {
            app.submit_search();
        } else if is_backspace_event(&event) {
            app.search_backspace();
        } else if let Some(c) = get_char_from_event(&event) {
            app.append_search_char(c);
        }
        return;
    }

    // Two-step quit : 'q' arme, 'q' confirme, toute autre touche annule
    if is_quit_event(&event) {
        if app.is_awaiting_quit_confirmation() {
            info!("Quit confirmed");
            app.quit();
        } else {
            app.request_quit();
        }
        return;
    }
    if app.is_awaiting_quit_confirmation() {
        app.cancel_quit();
        return;
    }

    app.clear_status();

    if is_reload_event(&event) {
        let request = app.reload(Instant::now());
        send(command_tx, AppCommand::FetchMarkets(request));
        return;
    }

    // Écran d'erreur bloquant : rien d'autre n'est actif
    if app.error.is_some() {
        return;
    }

    if is_up_event(&event) {
        app.navigate_up();
    } else if is_down_event(&event) {
        app.navigate_down();
    } else if is_enter_event(&event) {
        if let Some(request) = app.select_cursor() {
            request_chart(command_tx, request);
        }
    } else if is_search_event(&event) {
        app.start_search();
    } else if is_tab_event(&event) {
        app.switch_tab();
    } else if is_next_window_event(&event) {
        if let Some(request) = app.next_window() {
            request_chart(command_tx, request);
        }
    } else if is_previous_window_event(&event) {
        if let Some(request) = app.previous_window() {
            request_chart(command_tx, request);
        }
    } else if is_favorite_event(&event) {
        if app.toggle_cursor_favorite().is_some() {
            save_favorites(app, store);
        }
    } else if is_selected_favorite_event(&event) {
        if app.toggle_selected_favorite().is_some() {
            save_favorites(app, store);
        }
    } else if let Some(key) = get_sort_key_from_event(&event) {
        app.request_sort(key);
    }
}

/// Écrit les favoris après chaque changement
///
/// Un échec d'écriture est affiché dans le footer, le dashboard continue.
fn save_favorites(app: &mut App, store: &FavoritesStore) {
    if let Err(e) = store.save(&app.favorites) {
        error!(error = ?e, "Failed to save favorites");
        app.set_status(format!("Failed to save favorites: {}", e));
    }
}

// ============================================================================
// Terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    // Alternate screen : l'écran précédent est restauré en sortie
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
