mod common;

use anyhow::Result;
use budgety::cli::{Flow, Session, SessionCommand};
use budgety::domain::{Kind, Percentage};
use common::test_controller;

const SCRIPT: &str = r#"
# March budget
add income Salary 1000
add expense Rent 300
type expense
add "Weekly groceries" 85.50
add Coffee 0
delete expense-7
show
"#;

#[test]
fn test_script_builds_budget() -> Result<()> {
    let mut session = Session::new(test_controller(), Vec::new(), false);
    session.run_script(SCRIPT.as_bytes())?;

    let (controller, out) = session.into_parts();
    let ledger = controller.ledger();
    assert_eq!(ledger.items(Kind::Income).len(), 1);
    assert_eq!(ledger.items(Kind::Expense).len(), 2);
    assert_eq!(ledger.snapshot_aggregates().budget, 614_50);
    assert_eq!(
        ledger.snapshot_expense_percentages(),
        vec![Percentage::Value(30), Percentage::Value(9)]
    );

    // Only the explicit `show` printed anything
    let text = String::from_utf8(out)?;
    assert!(text.starts_with("Available budget in March 2024:"));
    assert!(text.contains("Weekly groceries"));
    assert_eq!(text.matches("Available budget").count(), 1);
    Ok(())
}

#[test]
fn test_quit_stops_script() -> Result<()> {
    let mut session = Session::new(test_controller(), Vec::new(), false);
    session.run_script("add income Salary 1000\nquit\nadd expense Rent 300\n".as_bytes())?;

    assert_eq!(session.controller().ledger().len(), 1);
    Ok(())
}

#[test]
fn test_type_toggles_selection() -> Result<()> {
    let mut session = Session::new(test_controller(), Vec::new(), false);

    assert_eq!(session.execute(SessionCommand::Type(None))?, Flow::Continue);
    assert_eq!(session.controller().view().form().kind, Kind::Expense);
    session.execute(SessionCommand::Type(None))?;
    assert_eq!(session.controller().view().form().kind, Kind::Income);
    Ok(())
}

#[test]
fn test_unknown_command_reports_and_continues() -> Result<()> {
    let mut session = Session::new(test_controller(), Vec::new(), true);

    assert_eq!(session.handle_line("launch rockets")?, Flow::Continue);
    let (_, out) = session.into_parts();
    assert!(String::from_utf8(out)?.contains("Unknown command 'launch'"));
    Ok(())
}

#[test]
fn test_echo_prints_page_after_changes() -> Result<()> {
    let mut session = Session::new(test_controller(), Vec::new(), true);
    session.handle_line("add income Salary 1000")?;
    session.handle_line("add income Nothing 0")?;
    session.handle_line("delete income-0")?;

    let (_, out) = session.into_parts();
    // One page per accepted change, none for the rejected add
    assert_eq!(String::from_utf8(out)?.matches("Available budget").count(), 2);
    Ok(())
}

#[test]
fn test_interactive_prompt_shows_type() -> Result<()> {
    let mut session = Session::new(test_controller(), Vec::new(), true);
    session.run_interactive("type expense\nquit\n".as_bytes())?;

    let (_, out) = session.into_parts();
    let text = String::from_utf8(out)?;
    assert!(text.contains("[income] > "));
    assert!(text.contains("Type: expense"));
    assert!(text.contains("[expense] > "));
    Ok(())
}
