//! Integration tests for the EstateFlow console
//!
//! These drive the session context the way the CLI does: form submission,
//! lifecycle changes, and repeated yield releases against one loan.

use estateflow_console::{
    commands, split_line, AppContext, ConsoleCommand, ConsoleConfig, ConsoleError, SessionLine,
};
use clap::Parser;
use estateflow_core::{Amount, RequestStatus};
use estateflow_ledger::{LedgerError, RequestForm, RequestPatch, ValidationError};
use rust_decimal_macros::dec;

fn kochi_form() -> RequestForm {
    RequestForm {
        property_name: "Kochi Backwaters".to_string(),
        description: "Lakeside homestay".to_string(),
        loan_amount: "180000".to_string(),
        months: "18".to_string(),
        collateral_type: "direct".to_string(),
        yield_preference: "6.1".to_string(),
    }
}

/// Test: submit → engage → complete, with the listing order checked throughout
#[test]
fn test_request_lifecycle() {
    let mut ctx = AppContext::new(ConsoleConfig::default());

    let created = ctx.submit_request(kochi_form()).unwrap();
    assert_eq!(created.status, RequestStatus::Open);
    assert_eq!(created.proof_submitted, 0);
    assert_eq!(created.rate, dec!(6.0));
    assert_eq!(created.yield_preference, Some(dec!(6.1)));
    assert!(created.image.starts_with("/properties/"));

    // Newest first, seeds after
    assert_eq!(ctx.ledger.len(), 7);
    assert_eq!(ctx.ledger.requests()[0].id, created.id);

    ctx.transition(&created.id, RequestStatus::Pending).unwrap();
    assert!(ctx.update_request(&created.id, RequestPatch::new().proof_submitted(6)));
    let done = ctx.transition(&created.id, RequestStatus::Completed).unwrap();

    assert_eq!(done.status, RequestStatus::Completed);
    assert_eq!(done.proof_submitted, 6);
    assert_eq!(done.property, "Kochi Backwaters");

    let err = ctx.transition(&created.id, RequestStatus::Rejected).unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Ledger(LedgerError::IllegalTransition { .. })
    ));
}

#[test]
fn test_invalid_form_leaves_ledger_untouched() {
    let mut ctx = AppContext::new(ConsoleConfig::default());
    let mut form = kochi_form();
    form.loan_amount = String::new();

    let err = ctx.submit_request(form).unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Validation(ValidationError::MissingField("loan_amount"))
    ));
    assert_eq!(ctx.ledger.len(), 6);
}

/// Test: the console example loan released until repaid
#[test]
fn test_release_until_repaid() {
    let mut ctx = AppContext::new(ConsoleConfig::default());

    // Unknown id: fallback principal 150000, 3000 already released
    let view = ctx.console_view("m1").unwrap();
    assert_eq!(view.snapshot.yield_available, Amount::from_dollars(3_200));
    assert_eq!(view.snapshot.loan_remaining, Amount::from_dollars(147_000));
    assert_eq!(view.progress_percent, dec!(2));
    assert!(view.can_release);

    let outcome = ctx.release_yield("m1").unwrap();
    assert_eq!(outcome.transfer, Amount::from_dollars(3_200));
    assert_eq!(outcome.after.released, Amount::from_dollars(6_200));
    assert_eq!(outcome.after.loan_remaining, Amount::from_dollars(143_800));
    assert!(outcome.after.yield_available.is_zero());

    // A large accrual pays the rest off and leaves a surplus in the pool
    ctx.accrue_yield("m1", Amount::from_dollars(200_000)).unwrap();
    let outcome = ctx.release_yield("m1").unwrap();
    assert_eq!(outcome.transfer, Amount::from_dollars(143_800));
    assert!(outcome.after.is_repaid());
    assert_eq!(outcome.after.released, Amount::from_dollars(150_000));
    assert_eq!(outcome.after.yield_available, Amount::from_dollars(56_200));

    // Repaid: further releases change nothing
    let again = ctx.release_yield("m1").unwrap();
    assert!(again.transfer.is_zero());
    assert_eq!(again.after, outcome.after);

    let view = ctx.console_view("m1").unwrap();
    assert_eq!(view.progress_percent, dec!(100));
    assert!(!view.can_release);
}

#[test]
fn test_explicit_session_values() {
    let mut ctx = AppContext::new(ConsoleConfig::default());
    ctx.open_session(
        "p3",
        Amount::from_dollars(450_000),
        Amount::from_dollars(10_000),
        Amount::from_dollars(90_000),
    )
    .unwrap();

    let view = ctx.console_view("p3").unwrap();
    assert_eq!(view.property, "Goa Beach Villa");
    assert_eq!(view.progress_percent, dec!(20));

    let err = ctx
        .open_session("p3", Amount::from_dollars(1), Amount::ZERO, Amount::ZERO)
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Yield(_)));
}

#[test]
fn test_config_released_above_principal() {
    let mut config = ConsoleConfig::default();
    config.managed_loan.released = Amount::from_dollars(300_000);
    let mut ctx = AppContext::new(config);

    // Unknown ids use the 150000 fallback and keep the configured figure
    assert!(matches!(ctx.release_yield("m1"), Err(ConsoleError::Yield(_))));

    // p1 principal is 250000: released is capped, the loan shows as repaid
    let view = ctx.console_view("p1").unwrap();
    assert_eq!(view.snapshot.released, Amount::from_dollars(250_000));
    assert!(view.snapshot.is_repaid());
}

/// Test: session lines parsed and executed in order share one state
#[test]
fn test_session_lines_share_state() {
    let mut ctx = AppContext::new(ConsoleConfig::default());

    let script = [
        r#"new --property "Test Villa" --description "Hill side" --amount 200000 --months 24 --collateral yield"#,
        "transition p2 completed",
        "delete p1",
        "update p4 --proofs 3",
        "release p6",
        "accrue p6 500",
    ];

    for line in script {
        let parsed = SessionLine::try_parse_from(split_line(line)).unwrap();
        commands::execute(&mut ctx, parsed.command).unwrap();
    }

    assert_eq!(ctx.ledger.len(), 6);
    assert_eq!(ctx.ledger.requests()[0].property, "Test Villa");
    assert!(!ctx.ledger.contains("p1"));
    assert_eq!(ctx.ledger.get("p2").unwrap().status, RequestStatus::Completed);
    assert_eq!(ctx.ledger.get("p4").unwrap().proof_submitted, 3);

    let snapshot = ctx.yields.snapshot("p6").unwrap();
    assert_eq!(snapshot.released, Amount::from_dollars(6_200));
    assert_eq!(snapshot.yield_available, Amount::from_dollars(500));
    assert_eq!(snapshot.ledger_balance(), Amount::from_dollars(275_000));
}

#[test]
fn test_commands_report_errors() {
    let mut ctx = AppContext::new(ConsoleConfig::default());

    let missing = ConsoleCommand::Show {
        id: "p99".to_string(),
    };
    assert!(commands::execute(&mut ctx, missing).is_err());

    // Open -> Completed skips Pending
    let illegal = ConsoleCommand::Transition {
        id: "p1".to_string(),
        status: RequestStatus::Completed,
    };
    assert!(commands::execute(&mut ctx, illegal).is_err());

    // Silent no-ops stay successful
    let delete = ConsoleCommand::Delete {
        id: "p99".to_string(),
    };
    assert!(commands::execute(&mut ctx, delete).is_ok());
    assert_eq!(ctx.ledger.len(), 6);
}
