//! # Checkout Terminal Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Terminal                                │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Operator (stdin / stdout)                                       │   │
//! │  │  add · finish (F2) · new (F5) · status · items · history         │   │
//! │  └──────────────────────────────┬───────────────────────────────────┘   │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  checkout_terminal (lib.rs)                                      │   │
//! │  │  config ─► store + log ─► CheckoutWorkflow ─► command loop       │   │
//! │  └──────────────────────────────┬───────────────────────────────────┘   │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  sales_history.json · activity_log.txt · error_log.txt           │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use checkout_terminal::cli::Cli;

fn main() {
    let cli = Cli::parse();
    // The actual setup is in lib.rs for better testability
    if let Err(error) = checkout_terminal::run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
