use tithe_wallet::ledger::*;
use tithe_wallet::models::{TithePayment, Transaction, WalletData};

const EPSILON: f64 = 1e-9;

fn tx(id: &str, amount: f64, date: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount,
        description: format!("income {}", id),
        date: date.to_string(),
    }
}

fn payment(id: &str, date: &str) -> TithePayment {
    TithePayment {
        id: id.to_string(),
        amount: 100.0,
        date: date.to_string(),
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn empty_ledger_is_all_zero() {
    let gross = gross_total(&[]);
    assert_close(gross, 0.0);
    assert_close(suggested_tithe(gross), 0.0);
    assert_close(net_balance(gross), 0.0);
    assert!(monthly_summaries(&[], &[]).is_empty());
    assert_close(projection(gross, 0), 0.0);
}

#[test]
fn tithe_and_net_identities() {
    let transactions = vec![
        tx("a", 1234.56, "2024-01-10"),
        tx("b", 99.99, "2024-02-01"),
        tx("c", 0.01, "2024-02-28"),
    ];
    let gross = gross_total(&transactions);
    assert_close(gross, 1334.56);
    assert_close(suggested_tithe(gross), gross * 0.10);
    assert_close(net_balance(gross), gross - suggested_tithe(gross));
    assert_close(net_balance(gross), gross * 0.90);
}

#[test]
fn group_totals_sum_to_gross() {
    let transactions = vec![
        tx("a", 300.0, "2024-03-15"),
        tx("b", 150.25, "2024-01-02"),
        tx("c", 49.75, "2024-03-01"),
        tx("d", 1000.0, "2023-12-31"),
    ];
    let groups = monthly_summaries(&transactions, &[]);
    let group_sum: f64 = groups.iter().map(|g| g.total).sum();
    assert_close(group_sum, gross_total(&transactions));

    let tithe_sum: f64 = groups.iter().map(|g| g.tithe).sum();
    let net_sum: f64 = groups.iter().map(|g| g.net).sum();
    assert_close(tithe_sum, suggested_tithe(gross_total(&transactions)));
    assert_close(net_sum, net_balance(gross_total(&transactions)));
}

#[test]
fn groups_are_sorted_by_month_key() {
    let transactions = vec![tx("a", 10.0, "2024-03-15"), tx("b", 20.0, "2024-01-02")];
    let groups = monthly_summaries(&transactions, &[]);
    let keys: Vec<&str> = groups.iter().map(|g| g.month_key.as_str()).collect();
    assert_eq!(keys, vec!["2024-01", "2024-03"]);
    assert_eq!(groups[0].month, "jan. de 24");
    assert_eq!(groups[1].month, "mar. de 24");
}

#[test]
fn same_month_transactions_share_a_group() {
    let transactions = vec![
        tx("a", 100.0, "2024-05-01"),
        tx("b", 200.0, "2024-05-31"),
    ];
    let groups = monthly_summaries(&transactions, &[]);
    assert_eq!(groups.len(), 1);
    assert_close(groups[0].total, 300.0);
    assert_close(groups[0].tithe, 30.0);
    assert_close(groups[0].net, 270.0);
    assert!(!groups[0].is_paid);
}

#[test]
fn payment_marks_only_its_month() {
    let transactions = vec![tx("a", 100.0, "2024-01-10"), tx("b", 100.0, "2024-02-10")];
    let payments = vec![payment("p1", "2024-02-20"), payment("p2", "2024-02-21")];
    let groups = monthly_summaries(&transactions, &payments);

    assert_eq!(groups.len(), 2);
    assert!(!groups[0].is_paid);
    assert!(groups[1].is_paid);
}

#[test]
fn payment_outside_any_month_creates_nothing() {
    let transactions = vec![tx("a", 100.0, "2024-01-10")];
    let payments = vec![payment("p1", "2025-06-01")];
    let groups = monthly_summaries(&transactions, &payments);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].month_key, "2024-01");
    assert!(!groups[0].is_paid);
}

#[test]
fn malformed_dates_fall_into_one_group() {
    let transactions = vec![
        tx("a", 10.0, "yesterday"),
        tx("b", 20.0, "2024-13-01"),
        tx("c", 30.0, "2024-04-02"),
        tx("d", 40.0, "24-4-2"),
    ];
    let groups = monthly_summaries(&transactions, &[]);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].month_key, "2024-04");
    assert_eq!(groups[1].month_key, "invalid");
    assert_eq!(groups[1].month, "???");
    assert_close(groups[1].total, 70.0);
}

#[test]
fn month_is_taken_from_the_leading_year_and_month() {
    assert_eq!(month_key("2024-03-15T10:00:00Z"), "2024-03");
    assert_eq!(month_key("2024-03-5"), "2024-03");
    assert_eq!(month_key("2024-02-30"), "2024-02");
    assert_eq!(month_label("2024-02-30"), "fev. de 24");

    let transactions = vec![
        tx("a", 100.0, "2024-03-15T10:00:00Z"),
        tx("b", 50.0, "2024-03-01"),
    ];
    let payments = vec![payment("p", "2024-03-31T23:59:59Z")];
    let groups = monthly_summaries(&transactions, &payments);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].month_key, "2024-03");
    assert_eq!(groups[0].month, "mar. de 24");
    assert_close(groups[0].total, 150.0);
    assert!(groups[0].is_paid);
}

#[test]
fn month_key_and_label_for_valid_dates() {
    assert_eq!(month_key("2024-03-15"), "2024-03");
    assert_eq!(month_key("2000-12-01"), "2000-12");
    assert_eq!(month_key(""), "invalid");
    assert_eq!(month_label("2000-01-01"), "jan. de 00");
    assert_eq!(month_label("2031-09-30"), "set. de 31");
}

#[test]
fn goal_progress_clamps_at_one_hundred() {
    assert_close(goal_progress(5000.0, Some(1000.0)), 100.0);
    assert_close(goal_progress(250.0, Some(1000.0)), 25.0);
    assert_close(goal_progress(5000.0, Some(0.0)), 0.0);
    assert_close(goal_progress(5000.0, None), 0.0);
}

#[test]
fn goal_progress_has_no_lower_clamp() {
    assert_close(goal_progress(-500.0, Some(1000.0)), -50.0);
}

#[test]
fn goal_remaining_never_negative() {
    assert_close(goal_remaining(1500.0, Some(5000.0)), 3500.0);
    assert_close(goal_remaining(6000.0, Some(5000.0)), 0.0);
    assert_close(goal_remaining(100.0, None), 0.0);
}

#[test]
fn projection_examples() {
    assert_close(projection(0.0, 0), 0.0);
    assert_close(projection(1000.0, 1), 13000.0);
    assert_close(projection(2400.0, 2), 2400.0 + 1200.0 * 12.0);
}

#[test]
fn recent_transactions_keeps_entry_order() {
    let transactions: Vec<Transaction> = (0..8)
        .map(|i| tx(&i.to_string(), i as f64, "2024-01-01"))
        .collect();
    let recent = recent_transactions(&transactions, 5);
    let ids: Vec<&str> = recent.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "4", "5", "6", "7"]);

    assert_eq!(recent_transactions(&transactions[..2], 5).len(), 2);
}

#[test]
fn summarize_matches_individual_operations() {
    let data = WalletData {
        transactions: vec![tx("a", 1000.0, "2024-01-05"), tx("b", 500.0, "2024-02-05")],
        tithe_payments: vec![payment("p", "2024-01-30")],
        prosperity_goal: Some(3000.0),
        ..WalletData::default()
    };

    let summary = summarize(&data, 5);
    assert_close(summary.gross_total, 1500.0);
    assert_close(summary.suggested_tithe, 150.0);
    assert_close(summary.net_balance, 1350.0);
    assert_close(summary.goal_progress, 50.0);
    assert_close(summary.goal_remaining, 1500.0);
    assert_close(summary.projection, 1500.0 + 750.0 * 12.0);
    assert_eq!(summary.transaction_count, 2);
    assert_eq!(summary.monthly.len(), 2);
    assert!(summary.monthly[0].is_paid);
    assert!(!summary.monthly[1].is_paid);

    // Inputs are untouched and a second run is identical.
    assert_eq!(summarize(&data, 5), summary);
}

#[test]
fn deleting_one_transaction_only_changes_its_share() {
    let mut transactions = vec![
        tx("a", 100.0, "2024-01-05"),
        tx("b", 200.0, "2024-01-06"),
        tx("c", 300.0, "2024-02-01"),
    ];
    let before = gross_total(&transactions);
    transactions.retain(|t| t.id != "b");

    assert_eq!(transactions.len(), 2);
    assert_close(gross_total(&transactions), before - 200.0);
    let groups = monthly_summaries(&transactions, &[]);
    assert_close(groups[0].total, 100.0);
    assert_close(groups[1].total, 300.0);
}

#[test]
fn brl_formatting() {
    assert_eq!(format_brl(1234.56), "R$ 1.234,56");
    assert_eq!(format_brl(0.0), "R$ 0,00");
    assert_eq!(format_brl(5.4321), "R$ 5,43");
    assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
    assert_eq!(format_brl(-12.0), "-R$ 12,00");
}
