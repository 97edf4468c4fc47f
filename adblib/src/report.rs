//! Текстовый отчёт по результату расчёта.

use crate::model::AggregateResult;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write as _;

const RULE: &str = "==================================================";

/// `1234567.891` -> `1,234,567.89`. Округление половины от нуля.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

pub fn format_money(currency: &str, amount: Decimal) -> String {
    format!("{currency} {}", format_amount(amount))
}

/// `files_processed` печатается только при нескольких источниках.
pub fn render_report(result: &AggregateResult, currency: &str, files_processed: usize) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{RULE}");
    let _ = writeln!(s, "AVERAGE DAILY BALANCE CALCULATION");
    let _ = writeln!(s, "{RULE}");
    if files_processed > 1 {
        let _ = writeln!(s, "Files processed: {files_processed}");
    }
    let _ = writeln!(
        s,
        "Period: {} to {}",
        result.period.start().format("%Y-%m-%d"),
        result.period.end().format("%Y-%m-%d")
    );
    let _ = writeln!(s, "Total days in period: {}", result.total_days_in_period);
    let _ = writeln!(s, "Days with transactions: {}", result.actual_days_with_data);

    let _ = writeln!(s);
    let _ = writeln!(s, "First transaction: {}", result.first_transaction_date.format("%Y-%m-%d"));
    let _ = writeln!(s, "Last transaction: {}", result.last_transaction_date.format("%Y-%m-%d"));

    let _ = writeln!(s);
    let _ = writeln!(s, "Starting balance: {}", format_money(currency, result.starting_balance));
    let _ = writeln!(s, "Ending balance: {}", format_money(currency, result.ending_balance));

    let _ = writeln!(s);
    let _ = writeln!(
        s,
        "Sum of all daily balances: {}",
        format_money(currency, result.total_balance_sum)
    );
    let _ = writeln!(
        s,
        "Average Daily Balance: {}",
        format_money(currency, result.average_daily_balance)
    );
    let _ = writeln!(s, "{RULE}");
    s
}
