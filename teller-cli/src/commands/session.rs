//! Session command - run one ATM session against the demo branch

use anyhow::Result;
use teller_core::adapters::console::ConsoleTerminal;
use teller_core::SessionOutcome;

use super::{accounts, get_context};
use crate::output;
use crate::terminal::DialoguerTerminal;

pub fn run(strict: bool, plain: bool) -> Result<()> {
    let mut ctx = get_context()?;
    ctx.record_command("session");

    // Cards are not printed anywhere else, so show the demo registry first
    accounts::print_listing(&ctx.bank.show_accounts());
    output::info(&format!(
        "{} ATM, {}",
        ctx.bank.branch().bank_name,
        ctx.config.atm_location
    ));

    let outcome = if plain || atty::isnt(atty::Stream::Stdin) {
        let mut terminal = ConsoleTerminal::stdio();
        ctx.atm().operate(&mut terminal)?
    } else {
        ctx.atm().operate(&mut DialoguerTerminal)?
    };

    let outcome = if strict {
        outcome.require_verified()?
    } else {
        outcome
    };

    match outcome {
        SessionOutcome::Completed { transactions, .. } => {
            output::success(&format!("Session closed after {} transaction(s)", transactions));
        }
        SessionOutcome::VerificationFailed => {
            output::warning("Session ended without access");
        }
    }

    Ok(())
}
