//! ATM service - one interactive cardholder session
//!
//! A session walks through a fixed sequence of states:
//!
//! ```text
//! AwaitingCredentials -> Authenticating -> AccountSelection -> TransactionLoop -> Terminated
//! ```
//!
//! A wrong card/PIN pair ends the session gracefully with
//! [`SessionOutcome::VerificationFailed`]. Every structural problem (unknown
//! customer, account outside the authorized set, bad amount, overdraw,
//! malformed input) aborts the session with an [`Error`].

use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::ids::generate_short_id;
use crate::domain::{Account, AccountId, CardId, CustomerId};
use crate::ports::Terminal;
use crate::services::bank::Bank;
use crate::services::logging::{LogEvent, LoggingService, SessionEvent};

pub const CARD_PROMPT: &str = "Please enter card and customer details (separate by space): ";
pub const PIN_PROMPT: &str = "Please enter four digit PIN: ";
pub const ACCOUNT_PROMPT: &str = "Please enter account number: ";
pub const OPERATION_PROMPT: &str =
    "Please choose 1 for Show balance, 2 for Deposit, 3 for Withdrawal: ";
pub const DEPOSIT_PROMPT: &str = "Enter deposit amount: ";
pub const WITHDRAW_PROMPT: &str = "Enter withdrawal amount: ";
pub const CONTINUE_PROMPT: &str = "Do you want to perform another transaction? (Y or N): ";

pub const VERIFICATION_FAILED: &str = "User verification failed";
pub const FAREWELL: &str = "Thank you!";

/// Where a session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    AwaitingCredentials,
    Authenticating,
    AccountSelection,
    TransactionLoop,
    Terminated,
}

/// A transaction the operator can pick in the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ShowBalance,
    Deposit,
    Withdraw,
}

impl Operation {
    /// Map an operation code; only 1, 2 and 3 are valid
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Operation::ShowBalance),
            2 => Some(Operation::Deposit),
            3 => Some(Operation::Withdraw),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::ShowBalance => "show_balance",
            Operation::Deposit => "deposit",
            Operation::Withdraw => "withdraw",
        }
    }
}

/// How a session ended, when it did not end in an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The operator finished transacting on the selected account
    Completed {
        account_id: AccountId,
        transactions: usize,
    },
    /// The card id or PIN did not match
    VerificationFailed,
}

impl SessionOutcome {
    /// Treat a failed verification as an error as well
    pub fn require_verified(self) -> Result<Self> {
        match self {
            SessionOutcome::VerificationFailed => Err(Error::AuthenticationFailed),
            completed => Ok(completed),
        }
    }
}

/// Best-effort event sink; a failing log never affects the session
struct SessionLog<'a> {
    logger: Option<&'a LoggingService>,
    session_id: String,
    location: String,
}

impl SessionLog<'_> {
    fn record(&self, event: SessionEvent) {
        if let Some(logger) = self.logger {
            let _ = logger.record(LogEvent::session(&self.session_id, &self.location, event));
        }
    }
}

/// Session controller for one ATM
///
/// Borrows the registry mutably for its lifetime, so only one session can
/// act on the branch at a time.
pub struct Atm<'a> {
    bank: &'a mut Bank,
    log: SessionLog<'a>,
    state: SessionState,
}

impl<'a> Atm<'a> {
    pub fn new(bank: &'a mut Bank, location: impl Into<String>) -> Self {
        Self {
            bank,
            log: SessionLog {
                logger: None,
                session_id: generate_short_id(),
                location: location.into(),
            },
            state: SessionState::AwaitingCredentials,
        }
    }

    /// Record session events to the given event log
    pub fn with_logger(mut self, logger: &'a LoggingService) -> Self {
        self.log.logger = Some(logger);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run one full session against `terminal`
    pub fn operate(&mut self, terminal: &mut dyn Terminal) -> Result<SessionOutcome> {
        self.log.record(SessionEvent::Started);

        let result = self.run(terminal);
        self.state = SessionState::Terminated;

        match &result {
            Ok(_) => self.log.record(SessionEvent::Completed),
            Err(e) => self.log.record(SessionEvent::Failed(e.kind())),
        }
        result
    }

    fn run(&mut self, terminal: &mut dyn Terminal) -> Result<SessionOutcome> {
        self.state = SessionState::AwaitingCredentials;
        let (card_id, customer_id) = read_card_details(terminal)?;
        let pin = terminal.prompt_secret(PIN_PROMPT)?;

        self.state = SessionState::Authenticating;
        let authorized: Vec<AccountId> =
            match self.bank.validate_user(&card_id, &customer_id, &pin)? {
                Some(accounts) => accounts.keys().cloned().collect(),
                None => {
                    self.log.record(SessionEvent::VerificationFailed);
                    terminal.say(VERIFICATION_FAILED)?;
                    return Ok(SessionOutcome::VerificationFailed);
                }
            };
        self.log.record(SessionEvent::UserVerified);

        self.state = SessionState::AccountSelection;
        for account_id in &authorized {
            terminal.say(&format!("Account_id: {}", account_id))?;
        }
        let selected = AccountId::new(terminal.prompt(ACCOUNT_PROMPT)?);
        if !authorized.contains(&selected) {
            return Err(Error::UnknownAccount(selected.to_string()));
        }
        let account = self
            .bank
            .account_mut(&customer_id, &selected)
            .ok_or_else(|| Error::UnknownAccount(selected.to_string()))?;
        self.log.record(SessionEvent::AccountSelected);

        self.state = SessionState::TransactionLoop;
        let mut transactions = 0;
        loop {
            let operation = read_operation(terminal)?;
            if let Err(e) = execute(account, operation, terminal) {
                self.log
                    .record(SessionEvent::TransactionFailed(operation, e.kind()));
                return Err(e);
            }
            transactions += 1;
            self.log.record(SessionEvent::TransactionCompleted(operation));

            if !read_continue(terminal)? {
                break;
            }
        }

        terminal.say(FAREWELL)?;
        Ok(SessionOutcome::Completed {
            account_id: selected,
            transactions,
        })
    }
}

/// Card id and customer id arrive on one line, separated by whitespace
fn read_card_details(terminal: &mut dyn Terminal) -> Result<(CardId, CustomerId)> {
    let line = terminal.prompt(CARD_PROMPT)?;
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(card), Some(customer), None) => Ok((CardId::from(card), CustomerId::from(customer))),
        _ => Err(Error::invalid_input(
            "expected a card id and a customer id separated by a space",
        )),
    }
}

/// Prompt until a valid operation code is entered
fn read_operation(terminal: &mut dyn Terminal) -> Result<Operation> {
    loop {
        let line = terminal.prompt(OPERATION_PROMPT)?;
        if let Some(operation) = line.trim().parse().ok().and_then(Operation::from_code) {
            return Ok(operation);
        }
    }
}

fn read_amount(terminal: &mut dyn Terminal, prompt: &str) -> Result<i64> {
    let line = terminal.prompt(prompt)?;
    line.trim()
        .parse()
        .map_err(|_| Error::invalid_input(format!("amount must be a whole number, got {:?}", line)))
}

/// Prompt until the operator answers Y or N (either case)
fn read_continue(terminal: &mut dyn Terminal) -> Result<bool> {
    loop {
        match terminal.prompt(CONTINUE_PROMPT)?.trim() {
            "Y" | "y" => return Ok(true),
            "N" | "n" => return Ok(false),
            _ => continue,
        }
    }
}

fn execute(account: &mut Account, operation: Operation, terminal: &mut dyn Terminal) -> Result<()> {
    match operation {
        Operation::ShowBalance => {
            terminal.say(&format!("Your balance is: {}", account.show_balance()))?;
        }
        Operation::Deposit => {
            let amount = read_amount(terminal, DEPOSIT_PROMPT)?;
            let balance = account.deposit(amount)?;
            terminal.say(&format!("Your new balance is: {}", balance))?;
        }
        Operation::Withdraw => {
            let amount = read_amount(terminal, WITHDRAW_PROMPT)?;
            let balance = account.withdraw(amount)?;
            terminal.say(&format!("Your new balance is: {}", balance))?;
        }
    }
    Ok(())
}
