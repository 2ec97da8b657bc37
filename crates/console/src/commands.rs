//! CLI commands

use estateflow_core::Amount;
use estateflow_ledger::{LoanRequest, RequestForm, RequestPatch};
use rust_decimal::Decimal;

use crate::cli::ConsoleCommand;
use crate::context::AppContext;

/// Run one console command against the session state
pub fn execute(ctx: &mut AppContext, command: ConsoleCommand) -> Result<(), anyhow::Error> {
    match command {
        ConsoleCommand::List { status, json } => list(ctx, status, json),
        ConsoleCommand::Show { id } => show(ctx, &id),
        ConsoleCommand::New {
            property,
            description,
            amount,
            months,
            collateral,
            yield_preference,
        } => new_request(
            ctx,
            RequestForm {
                property_name: property,
                description,
                loan_amount: amount,
                months,
                collateral_type: collateral,
                yield_preference,
            },
        ),
        ConsoleCommand::Update { id, fields } => {
            let patch = fields.into_patch()?;
            update(ctx, &id, patch)
        }
        ConsoleCommand::Transition { id, status } => {
            let request = ctx.transition(&id, status)?;
            println!("✅ {} is now {}", request.id, request.status);
            Ok(())
        }
        ConsoleCommand::Delete { id } => delete(ctx, &id),
        ConsoleCommand::Manage { id } => manage(ctx, &id),
        ConsoleCommand::Release { id } => release(ctx, &id),
        ConsoleCommand::Accrue { id, amount } => accrue(ctx, &id, amount),
    }
}

/// List requests as a table or JSON
pub fn list(
    ctx: &AppContext,
    status: Option<estateflow_core::RequestStatus>,
    json: bool,
) -> Result<(), anyhow::Error> {
    let requests: Vec<&LoanRequest> = match status {
        Some(status) => ctx.ledger.by_status(status),
        None => ctx.ledger.requests().iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&requests)?);
        return Ok(());
    }

    if requests.is_empty() {
        println!("No requests found. Create your first EstateFlow request!");
        return Ok(());
    }

    println!("Credit Swap Requests ({}):", requests.len());
    println!("{:-<88}", "");
    println!(
        "{:>15} | {:<22} | {:>6} | {:>6} | {:>9} | {:>6} | {:>12}",
        "ID", "Property", "Rate", "Months", "Status", "Proofs", "Loan"
    );
    println!("{:-<88}", "");

    for request in requests {
        println!(
            "{:>15} | {:<22} | {:>5}% | {:>6} | {:>9} | {:>6} | {:>12}",
            request.id,
            request.property,
            request.rate,
            request.months,
            request.status,
            format!("{}/{}", request.proof_submitted, request.total_proofs),
            request.loan_amount.to_usd_string(),
        );
    }

    let counts = ctx.ledger.counts();
    println!("{:-<88}", "");
    println!(
        "Open: {}  Pending: {}  Completed: {}  Rejected: {}",
        counts.open, counts.pending, counts.completed, counts.rejected
    );
    Ok(())
}

/// Print one request
pub fn show(ctx: &AppContext, id: &str) -> Result<(), anyhow::Error> {
    let Some(request) = ctx.ledger.get(id) else {
        anyhow::bail!("Request not found: {id}");
    };
    println!("{}", serde_json::to_string_pretty(request)?);
    Ok(())
}

/// Submit the new-request form
pub fn new_request(ctx: &mut AppContext, form: RequestForm) -> Result<(), anyhow::Error> {
    let created = ctx.submit_request(form)?;
    println!(
        "✅ Created request {} for {} ({} over {} months)",
        created.id,
        created.property,
        created.loan_amount.to_usd_string(),
        created.months
    );
    Ok(())
}

/// Patch a request
pub fn update(ctx: &mut AppContext, id: &str, patch: RequestPatch) -> Result<(), anyhow::Error> {
    if patch.is_empty() {
        anyhow::bail!("Nothing to update for {id}");
    }
    if ctx.update_request(id, patch) {
        println!("✅ Updated {id}");
    } else {
        println!("No request {id}, nothing updated");
    }
    Ok(())
}

/// Delete a request
pub fn delete(ctx: &mut AppContext, id: &str) -> Result<(), anyhow::Error> {
    match ctx.delete_request(id) {
        Some(removed) => println!("✅ Deleted {} ({})", removed.id, removed.property),
        None => println!("No request {id}, nothing deleted"),
    }
    Ok(())
}

/// Print the management console for a loan
pub fn manage(ctx: &mut AppContext, id: &str) -> Result<(), anyhow::Error> {
    let view = ctx.console_view(id)?;

    println!("My Credit Swap for {}", view.property);
    if let Some(status) = view.status {
        println!("  Status:            {}", status);
    }
    println!("  Principal:         {}", view.principal.to_usd_string());
    println!("  Yield available:   {}", view.snapshot.yield_available.to_usd_string());
    println!("  Released:          {}", view.snapshot.released.to_usd_string());
    println!("  Remaining loan:    {}", view.snapshot.loan_remaining.to_usd_string());
    println!("  Progress:          {}%", view.progress_percent);
    if !view.can_release {
        println!("  (nothing to release)");
    }

    println!("Paybacks since {}:", view.opened_at.format("%Y-%m-%d %H:%M"));
    if view.releases.is_empty() {
        println!("  none yet");
    }
    for (n, record) in view.releases.iter().enumerate() {
        println!(
            "  #{:<3} {}  {:>12}",
            n + 1,
            record.released_at.format("%Y-%m-%d %H:%M:%S"),
            record.amount.to_usd_string()
        );
    }
    Ok(())
}

/// Release yield to the nominee purchaser
pub fn release(ctx: &mut AppContext, id: &str) -> Result<(), anyhow::Error> {
    let outcome = ctx.release_yield(id)?;

    if outcome.transfer.is_zero() {
        println!("Nothing to release for {id}");
    } else {
        println!(
            "💰 Released {} for {} (released {}, remaining {})",
            outcome.transfer.to_usd_string(),
            id,
            outcome.after.released.to_usd_string(),
            outcome.after.loan_remaining.to_usd_string(),
        );
    }
    Ok(())
}

/// Credit collected yield
pub fn accrue(ctx: &mut AppContext, id: &str, amount: Decimal) -> Result<(), anyhow::Error> {
    let amount = Amount::new(amount)?;
    let snapshot = ctx.accrue_yield(id, amount)?;
    println!(
        "✅ Accrued {} for {} (available {})",
        amount.to_usd_string(),
        id,
        snapshot.yield_available.to_usd_string()
    );
    Ok(())
}
