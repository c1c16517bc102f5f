use budgety::domain::{Aggregates, Kind, Ledger, Percentage};

#[test]
fn test_ids_increase_without_reuse() {
    let mut ledger = Ledger::new();
    let ids: Vec<_> = (0..5)
        .map(|i| ledger.add_item(Kind::Income, format!("item {}", i), 100).id)
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);

    ledger.delete_item(Kind::Income, 2);
    assert_eq!(ledger.add_item(Kind::Income, "again", 100).id, 5);

    // Kinds are numbered independently
    assert_eq!(ledger.add_item(Kind::Expense, "first expense", 100).id, 0);
}

#[test]
fn test_empty_ledger_snapshot() {
    let mut ledger = Ledger::new();
    ledger.recompute_aggregates();

    let agg = ledger.snapshot_aggregates();
    assert_eq!(agg.budget, 0);
    assert_eq!(agg.total_income, 0);
    assert_eq!(agg.total_expense, 0);
    assert_eq!(agg.percentage, Percentage::Undefined);
}

#[test]
fn test_income_1000_expense_300() {
    let mut ledger = Ledger::new();
    ledger.add_item(Kind::Income, "Salary", 600_00);
    ledger.add_item(Kind::Income, "Freelance", 400_00);
    ledger.add_item(Kind::Expense, "Rent", 200_00);
    ledger.add_item(Kind::Expense, "Utilities", 100_00);
    ledger.recompute_aggregates();

    let agg = ledger.snapshot_aggregates();
    assert_eq!(agg.budget, 700_00);
    assert_eq!(agg.percentage, Percentage::Value(30));
}

#[test]
fn test_expense_share_of_income() {
    let mut ledger = Ledger::new();
    ledger.add_item(Kind::Income, "Salary", 1000_00);
    ledger.add_item(Kind::Expense, "Car", 150_00);
    ledger.recompute_aggregates();
    ledger.recompute_expense_percentages(ledger.snapshot_aggregates().total_income);

    assert_eq!(ledger.items(Kind::Expense)[0].percentage, Some(Percentage::Value(15)));
}

#[test]
fn test_delete_unknown_id_keeps_snapshot() {
    let mut ledger = Ledger::new();
    ledger.add_item(Kind::Income, "Salary", 1000_00);
    ledger.add_item(Kind::Expense, "Rent", 300_00);
    let before = ledger.recalculate();

    assert_eq!(ledger.delete_item(Kind::Expense, 7), None);
    assert_eq!(ledger.recalculate(), before);
}

#[test]
fn test_recompute_twice_is_stable() {
    let mut ledger = Ledger::new();
    ledger.add_item(Kind::Income, "Salary", 999_99);
    ledger.add_item(Kind::Expense, "Rent", 333_33);

    ledger.recompute_aggregates();
    let first = ledger.snapshot_aggregates();
    ledger.recompute_aggregates();
    assert_eq!(ledger.snapshot_aggregates(), first);
}

#[test]
fn test_salary_rent_scenario() {
    let mut ledger = Ledger::new();
    ledger.add_item(Kind::Income, "Salary", 1000_00);
    ledger.add_item(Kind::Expense, "Rent", 300_00);

    ledger.recompute_aggregates();
    assert_eq!(
        ledger.snapshot_aggregates(),
        Aggregates {
            budget: 700_00,
            total_income: 1000_00,
            total_expense: 300_00,
            percentage: Percentage::Value(30),
        }
    );

    ledger.recompute_expense_percentages(ledger.snapshot_aggregates().total_income);
    assert_eq!(ledger.snapshot_expense_percentages(), vec![Percentage::Value(30)]);
}

#[test]
fn test_stale_income_gives_stale_percentages() {
    let mut ledger = Ledger::new();
    ledger.add_item(Kind::Income, "Salary", 1000_00);
    ledger.add_item(Kind::Expense, "Rent", 300_00);
    ledger.recalculate();

    // More income arrives; percentages computed before the aggregates are
    // refreshed still use the old total.
    ledger.add_item(Kind::Income, "Bonus", 500_00);
    assert!(!ledger.is_fresh());
    ledger.recompute_expense_percentages(ledger.snapshot_aggregates().total_income);
    assert_eq!(ledger.snapshot_expense_percentages(), vec![Percentage::Value(30)]);

    // Refreshing first gives the right answer
    ledger.recompute_aggregates();
    assert!(ledger.is_fresh());
    ledger.recompute_expense_percentages(ledger.snapshot_aggregates().total_income);
    assert_eq!(ledger.snapshot_expense_percentages(), vec![Percentage::Value(20)]);
}

#[test]
fn test_independent_ledgers() {
    let mut a = Ledger::new();
    let b = Ledger::new();
    a.add_item(Kind::Income, "Salary", 1000_00);

    assert_eq!(a.len(), 1);
    assert!(b.is_empty());
}
