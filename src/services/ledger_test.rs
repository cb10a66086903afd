use super::*;
use time::macros::date;

fn draft(title: &str, amount: f64) -> TransactionDraft {
    TransactionDraft {
        title: Some(title.into()),
        amount: Some(amount),
        category: Some("salary".into()),
        description: Some("monthly".into()),
        date: Some(date!(2024 - 03 - 01)),
    }
}

fn at(seconds: i64) -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + time::Duration::seconds(seconds)
}

// =============================================================================
// add / validation
// =============================================================================

#[test]
fn add_records_trimmed_transaction() {
    let mut ledger = Ledger::default();
    let mut d = draft("  Paycheck ", 1200.0);
    d.category = Some(" salary ".into());
    let tx = ledger.add(TransactionKind::Income, d).unwrap();
    assert_eq!(tx.title, "Paycheck");
    assert_eq!(tx.category, "salary");
    assert_eq!(tx.kind, TransactionKind::Income);
    assert_eq!(ledger.list(TransactionKind::Income), vec![tx]);
}

#[test]
fn add_rejects_missing_or_blank_fields() {
    let mut ledger = Ledger::default();
    let cases = [
        TransactionDraft { title: None, ..draft("x", 1.0) },
        TransactionDraft { title: Some("   ".into()), ..draft("x", 1.0) },
        TransactionDraft { category: None, ..draft("x", 1.0) },
        TransactionDraft { description: Some(String::new()), ..draft("x", 1.0) },
        TransactionDraft { date: None, ..draft("x", 1.0) },
        TransactionDraft { amount: None, ..draft("x", 1.0) },
    ];
    for d in cases {
        assert_eq!(ledger.add(TransactionKind::Expense, d), Err(LedgerError::MissingFields));
    }
    assert!(ledger.list(TransactionKind::Expense).is_empty());
}

#[test]
fn add_rejects_non_positive_amounts() {
    let mut ledger = Ledger::default();
    for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        assert_eq!(
            ledger.add(TransactionKind::Income, draft("x", amount)),
            Err(LedgerError::InvalidAmount),
            "amount {amount}"
        );
    }
}

#[test]
fn error_messages_match_form_copy() {
    assert_eq!(LedgerError::MissingFields.to_string(), "All fields are required!");
    assert_eq!(LedgerError::InvalidAmount.to_string(), "Amount must be a positive number!");
}

// =============================================================================
// list / delete
// =============================================================================

#[test]
fn list_is_newest_first_and_filtered_by_kind() {
    let mut ledger = Ledger::default();
    let a = ledger.add_at(TransactionKind::Income, draft("a", 1.0), at(1)).unwrap();
    ledger.add_at(TransactionKind::Expense, draft("b", 2.0), at(2)).unwrap();
    let c = ledger.add_at(TransactionKind::Income, draft("c", 3.0), at(3)).unwrap();

    let incomes = ledger.list(TransactionKind::Income);
    assert_eq!(incomes, vec![c, a]);
}

#[test]
fn delete_removes_only_matching_kind() {
    let mut ledger = Ledger::default();
    let income = ledger.add(TransactionKind::Income, draft("a", 1.0)).unwrap();

    assert_eq!(
        ledger.delete(TransactionKind::Expense, income.id),
        Err(LedgerError::NotFound(income.id))
    );
    assert_eq!(ledger.delete(TransactionKind::Income, income.id).unwrap().id, income.id);
    assert!(ledger.list(TransactionKind::Income).is_empty());
}

#[test]
fn delete_unknown_id_is_not_found() {
    let mut ledger = Ledger::default();
    let id = Uuid::new_v4();
    assert_eq!(ledger.delete(TransactionKind::Income, id), Err(LedgerError::NotFound(id)));
}

// =============================================================================
// summary
// =============================================================================

#[test]
fn empty_summary_is_zeroed() {
    let summary = Ledger::default().summary();
    assert!(summary.total_income.abs() < f64::EPSILON);
    assert!(summary.total_expenses.abs() < f64::EPSILON);
    assert!(summary.balance.abs() < f64::EPSILON);
    assert!(summary.recent_history.is_empty());
    assert!(summary.income_range.is_none());
    assert!(summary.expense_range.is_none());
}

#[test]
fn summary_totals_balance_and_ranges() {
    let mut ledger = Ledger::default();
    ledger.add(TransactionKind::Income, draft("salary", 3000.0)).unwrap();
    ledger.add(TransactionKind::Income, draft("bonus", 500.0)).unwrap();
    ledger.add(TransactionKind::Expense, draft("rent", 1200.0)).unwrap();
    ledger.add(TransactionKind::Expense, draft("food", 300.0)).unwrap();

    let summary = ledger.summary();
    assert!((summary.total_income - 3500.0).abs() < f64::EPSILON);
    assert!((summary.total_expenses - 1500.0).abs() < f64::EPSILON);
    assert!((summary.balance - 2000.0).abs() < f64::EPSILON);
    assert_eq!(summary.income_range, Some(AmountRange { min: 500.0, max: 3000.0 }));
    assert_eq!(summary.expense_range, Some(AmountRange { min: 300.0, max: 1200.0 }));
}

#[test]
fn recent_history_is_three_newest_of_any_kind() {
    let mut ledger = Ledger::default();
    for (i, kind) in [TransactionKind::Income, TransactionKind::Expense].iter().cycle().take(5).enumerate() {
        ledger.add(*kind, draft(&format!("t{i}"), 10.0)).unwrap();
    }
    let titles: Vec<String> = ledger.summary().recent_history.into_iter().map(|tx| tx.title).collect();
    assert_eq!(titles, vec!["t4", "t3", "t2"]);
}

#[test]
fn draft_deserializes_iso_date() {
    let d: TransactionDraft = serde_json::from_str(
        r#"{"title":"t","amount":12.5,"category":"c","description":"d","date":"2024-03-01"}"#,
    )
    .unwrap();
    assert_eq!(d.date, Some(date!(2024 - 03 - 01)));
    assert_eq!(d.amount, Some(12.5));
}
