//! Derived figures for the wallet dashboard.
//!
//! Everything here is a pure function of the transaction and payment lists:
//! nothing is cached and inputs are never mutated, so the same wallet always
//! yields the same summary.

use std::collections::BTreeMap;

use time::Date;
use time::macros::format_description;

use crate::constants::{
    INVALID_MONTH_KEY, INVALID_MONTH_LABEL, MAX_GOAL_PROGRESS, PROJECTION_MONTHS, TITHE_RATE,
};
use crate::models::{LedgerSummary, MonthlySummary, TithePayment, Transaction, WalletData};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

/// First day of the month named by the leading `YYYY-MM` of a date string.
/// Anything after the month (day, time, offset) is ignored.
fn parse_month_prefix(value: &str) -> Option<Date> {
    let prefix = value.get(..7)?;
    Date::parse(
        &format!("{}-01", prefix),
        format_description!("[year]-[month]-[day]"),
    )
    .ok()
}

pub fn gross_total(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|t| t.amount).sum()
}

pub fn suggested_tithe(amount: f64) -> f64 {
    amount * TITHE_RATE
}

/// The one net formula; monthly and overall figures both go through it.
pub fn net_balance(amount: f64) -> f64 {
    amount - suggested_tithe(amount)
}

/// The leading `YYYY-MM` of a date, `"invalid"` when it names no real month.
pub fn month_key(date: &str) -> String {
    match parse_month_prefix(date) {
        Some(d) => format!("{:04}-{:02}", d.year(), u8::from(d.month())),
        None => INVALID_MONTH_KEY.to_string(),
    }
}

/// Short pt-BR month label, e.g. `"mar. de 24"`.
pub fn month_label(date: &str) -> String {
    match parse_month_prefix(date) {
        Some(d) => {
            let month = MONTH_ABBREVIATIONS[usize::from(u8::from(d.month())) - 1];
            format!("{} de {:02}", month, d.year().rem_euclid(100))
        }
        None => INVALID_MONTH_LABEL.to_string(),
    }
}

/// Buckets transactions by month, sorted ascending by month key, and marks
/// each bucket paid when any tithe payment falls in the same month.
///
/// Payments outside every bucket are ignored; they never create a month.
pub fn monthly_summaries(
    transactions: &[Transaction],
    payments: &[TithePayment],
) -> Vec<MonthlySummary> {
    let mut groups: BTreeMap<String, MonthlySummary> = BTreeMap::new();

    for transaction in transactions {
        let key = month_key(&transaction.date);
        let group = groups.entry(key.clone()).or_insert_with(|| MonthlySummary {
            month_key: key,
            month: month_label(&transaction.date),
            total: 0.0,
            tithe: 0.0,
            net: 0.0,
            is_paid: false,
        });
        group.total += transaction.amount;
        group.tithe += suggested_tithe(transaction.amount);
        group.net += net_balance(transaction.amount);
    }

    for payment in payments {
        if let Some(group) = groups.get_mut(&month_key(&payment.date)) {
            group.is_paid = true;
        }
    }

    groups.into_values().collect()
}

pub fn goal_progress(gross: f64, goal: Option<f64>) -> f64 {
    match goal {
        Some(goal) if goal != 0.0 => (gross / goal * 100.0).min(MAX_GOAL_PROGRESS),
        _ => 0.0,
    }
}

pub fn goal_remaining(gross: f64, goal: Option<f64>) -> f64 {
    (goal.unwrap_or(0.0) - gross).max(0.0)
}

/// Naive linear extrapolation: every recorded month is assumed to weigh the
/// same, and twelve more of them are added on top of what is already there.
pub fn projection(gross: f64, month_count: usize) -> f64 {
    if month_count == 0 {
        return 0.0;
    }
    let average_monthly = gross / month_count as f64;
    gross + average_monthly * PROJECTION_MONTHS
}

/// The last `count` transactions in entry order.
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> &[Transaction] {
    let start = transactions.len().saturating_sub(count);
    &transactions[start..]
}

pub fn summarize(data: &WalletData, recent_count: usize) -> LedgerSummary {
    let gross = gross_total(&data.transactions);
    let monthly = monthly_summaries(&data.transactions, &data.tithe_payments);
    let projected = projection(gross, monthly.len());

    LedgerSummary {
        gross_total: gross,
        suggested_tithe: suggested_tithe(gross),
        net_balance: net_balance(gross),
        monthly,
        prosperity_goal: data.prosperity_goal,
        goal_progress: goal_progress(gross, data.prosperity_goal),
        goal_remaining: goal_remaining(gross, data.prosperity_goal),
        projection: projected,
        transaction_count: data.transactions.len(),
        recent_transactions: recent_transactions(&data.transactions, recent_count).to_vec(),
    }
}

/// Formats an amount the way Brazilian users read it: `R$ 1.234,56`.
pub fn format_brl(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, fraction)
}
