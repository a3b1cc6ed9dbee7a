//! Expense display formatting
//!
//! Provides utilities for formatting expenses and totals for terminal display.

use crate::models::{CategoryTotal, DateRangeTotal, Expense, ExpenseListing};

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense) -> String {
    format!(
        "{:>5} {} {:20} {:15} {:>12.2}",
        expense.id,
        expense.date.format("%Y-%m-%d"),
        truncate(&expense.name, 20),
        truncate(&expense.category, 15),
        expense.nominal
    )
}

/// Format a list of expenses
pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5} {:10} {:20} {:15} {:>12}\n",
        "ID", "Date", "Name", "Category", "Nominal"
    ));
    output.push_str(&"-".repeat(66));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Name:     {}\n", expense.name));
    output.push_str(&format!("Nominal:  {:.2}\n", expense.nominal));
    output.push_str(&format!("Category: {}\n", expense.category));
    output.push_str(&format!("Date:     {}\n", expense.date.to_rfc3339()));

    output
}

pub fn format_category_total(summary: &CategoryTotal) -> String {
    format!(
        "Total for category '{}': {:.2}\n",
        summary.category, summary.total_expenses
    )
}

pub fn format_date_range_total(summary: &DateRangeTotal) -> String {
    format!(
        "Total from {} to {}: {:.2}\n",
        summary.start_date, summary.end_date, summary.total_expenses
    )
}

/// Format whatever a list query returned
pub fn format_listing(listing: &ExpenseListing) -> String {
    match listing {
        ExpenseListing::All(expenses) => format_expense_list(expenses),
        ExpenseListing::ByCategory(summary) => format_category_total(summary),
        ExpenseListing::ByDateRange(summary) => format_date_range_total(summary),
    }
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
