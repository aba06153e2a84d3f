//! # Checkout Terminal Library
//!
//! Core library for the checkout terminal: resolves configuration, wires
//! the file store into the workflow and runs the operator session.
//!
//! ## Module Organization
//! ```text
//! checkout_terminal/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Command-line flags
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── config.rs   ◄─── AppConfig (checkout.toml)
//! ├── terminal.rs     ◄─── TerminalNotifier (NotificationPort)
//! ├── commands.rs     ◄─── Operator command loop
//! └── error.rs        ◄─── AppError
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;
pub mod terminal;

use std::io;

use checkout_core::{CheckoutWorkflow, SaleFactory};
use checkout_store::{FileActivityLog, JsonLedgerStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::{AppError, AppResult};
use state::AppConfig;
use terminal::TerminalNotifier;

/// Runs the checkout terminal until the operator quits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info, checkout=debug; RUST_LOG overrides                 │
/// │                                                                         │
/// │  2. Resolve Configuration ────────────────────────────────────────────► │
/// │     • defaults < checkout.toml < CHECKOUT_* env < flags                 │
/// │                                                                         │
/// │  3. Prepare Data Directory ───────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/checkout/                                   │
/// │     • macOS: ~/Library/Application Support/com.checkout.till/           │
/// │                                                                         │
/// │  4. Build Workflow ───────────────────────────────────────────────────► │
/// │     • Load sales_history.json, open the first sale                      │
/// │                                                                         │
/// │  5. Run Session ──────────────────────────────────────────────────────► │
/// │     • Read commands from stdin until quit / end of input                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> AppResult<()> {
    init_tracing();

    info!("Starting checkout terminal");

    let config = AppConfig::resolve(&cli)?;
    let data_dir = config.data_dir()?;
    std::fs::create_dir_all(&data_dir).map_err(|source| AppError::DataDir {
        path: data_dir.clone(),
        source,
    })?;
    info!(data_dir = %data_dir.display(), "Data directory ready");

    let store = JsonLedgerStore::new(config.ledger_path(&data_dir));
    let log = FileActivityLog::new(
        config.activity_log_path(&data_dir),
        config.error_log_path(&data_dir),
    );
    let notifier = TerminalNotifier::new(io::stdin().lock(), io::stdout());

    let mut workflow = CheckoutWorkflow::new(
        notifier,
        log,
        store,
        SaleFactory::default(),
        config.number_format(),
    );
    info!(
        completed_sales = workflow.ledger().completed().len(),
        "Workflow ready"
    );

    commands::run_session(&mut workflow)?;

    info!("Checkout terminal stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=checkout=trace` - Trace the till's own targets only
/// - Default: info, debug for `checkout`
///
/// Output goes to stderr so it never mixes with the operator's screen
/// when stderr is redirected.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkout=debug"));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
