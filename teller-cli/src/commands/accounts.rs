//! Accounts command - show the branch registry

use anyhow::Result;
use colored::Colorize;
use teller_core::services::CustomerListing;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    ctx.record_command("accounts");

    let listing = ctx.bank.show_accounts();
    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let branch = ctx.bank.branch();
    println!(
        "{} {} ({})",
        branch.bank_name.bold(),
        branch.branch_code,
        branch.branch_address
    );
    print_listing(&listing);
    Ok(())
}

/// Print every customer's accounts with their card ids
pub fn print_listing(listing: &[CustomerListing]) {
    if listing.is_empty() {
        println!("No customers registered.");
        return;
    }

    let mut table = output::create_table();
    table.set_header(vec!["Customer ID", "Name", "Account ID", "Balance", "ATM Card ID"]);

    for customer in listing {
        for account in &customer.accounts {
            table.add_row(vec![
                customer.customer_id.clone(),
                customer.name.clone(),
                account.account_id.clone(),
                account.balance.to_string(),
                account.card_id.clone(),
            ]);
        }
    }

    println!("{}", table);
}
