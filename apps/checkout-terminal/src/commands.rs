//! # Session Commands
//!
//! The operator's command loop.
//!
//! ## Command Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input             Action                     Workflow call             │
//! │  ─────             ──────                     ─────────────             │
//! │  add | <Enter>     ring up a line item        add_line_item             │
//! │  finish | f2       complete the sale          finish_sale               │
//! │  new | f5          start over                 start_new_sale            │
//! │  status            sale #, items, total       summary                   │
//! │  items             lines of the active sale   active_sale               │
//! │  history           completed sales            ledger                    │
//! │  help | ?          this table                                           │
//! │  quit | exit | q   leave                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `add` prompts Name, Price and Quantity. When validation fails the error
//! is shown and prompting resumes at the offending field, keeping the
//! fields before it.

use std::io::{BufRead, Write};
use std::str::FromStr;

use checkout_core::{
    ActivityLog, CheckoutError, CheckoutWorkflow, InputField, Ledger, LedgerStore, NumberFormat,
    Sale, SaleSummary,
};
use checkout_core::validation::RawLineItem;
use tracing::debug;

use crate::error::AppResult;
use crate::terminal::TerminalNotifier;

const HELP: &str = "\
Commands:
  add, <Enter>     add a product to the current sale
  finish, f2       finish the current sale
  new, f5          start a new sale
  status           show sale number, item count and total
  items            list the products in the current sale
  history          list completed sales
  help, ?          show this help
  quit, exit, q    leave the till

End of input (Ctrl-D) while adding a product cancels it.";

/// One line of operator input, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Finish,
    NewSale,
    Status,
    Items,
    History,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "add" | "a" => Ok(Command::Add),
            "finish" | "f2" => Ok(Command::Finish),
            "new" | "f5" => Ok(Command::NewSale),
            "status" | "s" => Ok(Command::Status),
            "items" | "i" => Ok(Command::Items),
            "history" | "h" => Ok(Command::History),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!(
                "Unknown command '{other}'. Type help for the list of commands."
            )),
        }
    }
}

type Terminal<R, W> = TerminalNotifier<R, W>;
type Workflow<R, W, L, S> = CheckoutWorkflow<Terminal<R, W>, L, S>;

/// Runs commands until `quit` or end of input.
pub fn run_session<R, W, L, S>(workflow: &mut Workflow<R, W, L, S>) -> AppResult<()>
where
    R: BufRead,
    W: Write,
    L: ActivityLog,
    S: LedgerStore,
{
    workflow
        .notifier_mut()
        .say("Checkout ready. Type help for commands.")?;
    print_status(workflow)?;

    loop {
        let Some(line) = workflow.notifier_mut().prompt("> ")? else {
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                workflow.notifier_mut().say(&message)?;
                continue;
            }
        };
        debug!(?command, "Operator command");

        match command {
            Command::Add => {
                if add_line_item(workflow)? {
                    print_status(workflow)?;
                }
            }
            Command::Finish => {
                if workflow.finish_sale().is_ok() {
                    print_status(workflow)?;
                }
            }
            Command::NewSale => {
                if workflow.start_new_sale().is_ok() {
                    print_status(workflow)?;
                }
            }
            Command::Status => print_status(workflow)?,
            Command::Items => print_items(workflow)?,
            Command::History => print_history(workflow)?,
            Command::Help => workflow.notifier_mut().say(HELP)?,
            Command::Quit => break,
        }
    }

    debug!("Session ended");
    Ok(())
}

/// Prompts for a line item until it validates or input ends.
///
/// Returns whether an item was added.
fn add_line_item<R, W, L, S>(workflow: &mut Workflow<R, W, L, S>) -> AppResult<bool>
where
    R: BufRead,
    W: Write,
    L: ActivityLog,
    S: LedgerStore,
{
    const FIELDS: [(InputField, &str); 3] = [
        (InputField::Name, "Name: "),
        (InputField::Price, "Price: "),
        (InputField::Quantity, "Quantity: "),
    ];

    let mut raw = RawLineItem::default();
    let mut start = 0;

    loop {
        for (field, prompt) in &FIELDS[start..] {
            let Some(value) = workflow.notifier_mut().prompt(prompt)? else {
                debug!("Line item entry cancelled");
                return Ok(false);
            };
            match field {
                InputField::Name => raw.name = value,
                InputField::Price => raw.price = value,
                InputField::Quantity => raw.quantity = value,
            }
        }

        match workflow.add_line_item(&raw) {
            Ok(_) => return Ok(true),
            Err(CheckoutError::Validation(e)) => {
                start = field_index(e.field());
            }
            Err(_) => return Ok(false),
        }
    }
}

fn field_index(field: InputField) -> usize {
    match field {
        InputField::Name => 0,
        InputField::Price => 1,
        InputField::Quantity => 2,
    }
}

// =============================================================================
// Views
// =============================================================================

/// Status bar line, e.g. `Sale #3F2A9C1B | Items: 2 | Total: $9.90`.
pub fn status_line(summary: &SaleSummary, format: &NumberFormat) -> String {
    format!(
        "Sale #{} | Items: {} | Total: {}",
        summary.sale_id,
        summary.item_count,
        summary.total.format(format)
    )
}

fn print_status<R, W, L, S>(workflow: &mut Workflow<R, W, L, S>) -> AppResult<()>
where
    R: BufRead,
    W: Write,
    L: ActivityLog,
    S: LedgerStore,
{
    let text = match workflow.summary() {
        Some(summary) => status_line(&summary, workflow.number_format()),
        None => "No active sale".to_string(),
    };
    workflow.notifier_mut().say(&text)?;
    Ok(())
}

/// Lines of `sale`, one per item, e.g. `  1. Milk  2.50 x 3 = 7.50`.
pub fn item_lines(sale: &Sale, format: &NumberFormat) -> Vec<String> {
    let plain = NumberFormat {
        currency_symbol: String::new(),
        ..format.clone()
    };
    sale.items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{:>3}. {:<30} {:>10} x {:<5} = {:>12}",
                i + 1,
                item.name(),
                item.unit_price().format(&plain),
                item.quantity(),
                item.subtotal().format(format)
            )
        })
        .collect()
}

fn print_items<R, W, L, S>(workflow: &mut Workflow<R, W, L, S>) -> AppResult<()>
where
    R: BufRead,
    W: Write,
    L: ActivityLog,
    S: LedgerStore,
{
    let lines = match workflow.active_sale() {
        Some(sale) if !sale.is_empty() => item_lines(sale, workflow.number_format()),
        _ => vec!["No products in current sale".to_string()],
    };
    workflow.notifier_mut().say(&lines.join("\n"))?;
    Ok(())
}

/// One line per completed sale plus the takings.
pub fn history_lines(ledger: &Ledger, format: &NumberFormat) -> Vec<String> {
    let completed = ledger.completed();
    if completed.is_empty() {
        return vec!["No completed sales".to_string()];
    }

    let mut lines: Vec<String> = completed
        .iter()
        .map(|sale| {
            format!(
                "#{}  {}  {:>3} items  {:>12}",
                sale.id(),
                sale.created_at().format("%Y-%m-%d %H:%M"),
                sale.item_count(),
                sale.total().format(format)
            )
        })
        .collect();

    let takings = match ledger.completed_total() {
        Some(total) => total.format(format),
        None => "out of range".to_string(),
    };
    lines.push(format!("{} sales, total {}", completed.len(), takings));
    lines
}

fn print_history<R, W, L, S>(workflow: &mut Workflow<R, W, L, S>) -> AppResult<()>
where
    R: BufRead,
    W: Write,
    L: ActivityLog,
    S: LedgerStore,
{
    let lines = history_lines(workflow.ledger(), workflow.number_format());
    workflow.notifier_mut().say(&lines.join("\n"))?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
