//! Expense CLI commands
//!
//! Implements CLI commands that drive the expense service directly against
//! the backing document.

use clap::Subcommand;

use crate::display::expense::{format_expense_details, format_expense_list, format_listing};
use crate::error::ExpenseResult;
use crate::models::{ExpenseUpdate, NewExpense};
use crate::services::{ExpenseQuery, ExpenseService};
use crate::storage::ExpenseStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        name: String,
        /// Amount spent
        nominal: f64,
        /// Category
        category: String,
    },
    /// List all expenses
    List,
    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(long)]
        nominal: Option<f64>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
    /// Total expenses by category or date range
    Total {
        /// Category to total (takes priority over dates)
        #[arg(short, long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        to: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(store: &ExpenseStore, cmd: ExpenseCommands) -> ExpenseResult<()> {
    let service = ExpenseService::new(store);

    match cmd {
        ExpenseCommands::Add {
            name,
            nominal,
            category,
        } => {
            let expenses = service.create(NewExpense::new(name, nominal, category))?;
            if let Some(expense) = expenses.last() {
                println!("Created expense: {}", expense.name);
                println!("  ID: {}", expense.id);
            }
        }

        ExpenseCommands::List => {
            let expenses = service.list_all()?;
            print!("{}", format_expense_list(&expenses));
        }

        ExpenseCommands::Show { id } => {
            let expense = service.get(&id)?;
            print!("{}", format_expense_details(&expense));
        }

        ExpenseCommands::Edit {
            id,
            name,
            nominal,
            category,
        } => {
            let update = ExpenseUpdate {
                name,
                nominal,
                category,
            };

            if update.is_empty() {
                println!("No changes specified. Use --name, --nominal, or --category.");
                return Ok(());
            }

            service.update(&id, &update)?;
            let expense = service.get(&id)?;
            println!("Updated expense: {}", expense.name);
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.get(&id)?;
            let remaining = service.delete(&id)?;
            println!("Deleted expense: {}", expense.name);
            println!("  Remaining: {}", remaining.len());
        }

        ExpenseCommands::Total { category, from, to } => {
            let query = ExpenseQuery {
                category,
                start_date: from,
                end_date: to,
            };
            let listing = service.list(&query)?;
            print!("{}", format_listing(&listing));
        }
    }

    Ok(())
}
