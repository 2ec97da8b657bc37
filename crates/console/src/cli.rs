//! Console subcommands shared by one-shot and session mode

use clap::{Args, Parser, Subcommand};
use estateflow_core::{Amount, AmountError, CollateralType, RequestStatus};
use estateflow_ledger::RequestPatch;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ConsoleCommand {
    /// List loan requests, most recent first
    List {
        /// Only show requests with this status
        #[arg(long)]
        status: Option<RequestStatus>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one request in full
    Show {
        id: String,
    },

    /// Create a request from the asset holder form
    New {
        /// Property name
        #[arg(long)]
        property: String,
        #[arg(long)]
        description: String,
        /// Requested loan amount in dollars
        #[arg(long)]
        amount: String,
        /// Loan term in months
        #[arg(long)]
        months: String,
        /// Collateral type (yield or direct)
        #[arg(long)]
        collateral: String,
        /// Preferred yield percentage
        #[arg(long, default_value = "")]
        yield_preference: String,
    },

    /// Patch fields of a request (no lifecycle checks)
    Update {
        id: String,
        #[command(flatten)]
        fields: PatchArgs,
    },

    /// Move a request along Open -> Pending -> Completed/Rejected
    Transition {
        id: String,
        status: RequestStatus,
    },

    /// Delete a request
    Delete {
        id: String,
    },

    /// Show the management console for a loan
    Manage {
        id: String,
    },

    /// Release available yield to the nominee purchaser
    Release {
        id: String,
    },

    /// Credit collected property yield to a loan
    Accrue {
        id: String,
        /// Amount in dollars
        amount: Decimal,
    },
}

/// Field flags of `update`; each flag present is merged onto the request
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct PatchArgs {
    #[arg(long)]
    pub property: Option<String>,
    #[arg(long)]
    pub rate: Option<Decimal>,
    /// Loan term in months
    #[arg(long)]
    pub months: Option<u32>,
    #[arg(long)]
    pub status: Option<RequestStatus>,
    #[arg(long)]
    pub proofs: Option<u32>,
    #[arg(long)]
    pub total_proofs: Option<u32>,
    /// Loan amount in dollars
    #[arg(long)]
    pub amount: Option<Decimal>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    /// Collateral type (yield or direct)
    #[arg(long, conflicts_with = "clear_collateral")]
    pub collateral: Option<CollateralType>,
    #[arg(long)]
    pub clear_collateral: bool,
    #[arg(long, conflicts_with = "clear_yield_preference")]
    pub yield_preference: Option<Decimal>,
    #[arg(long)]
    pub clear_yield_preference: bool,
}

impl PatchArgs {
    /// Build the shallow-merge patch; fails on a negative amount
    pub fn into_patch(self) -> Result<RequestPatch, AmountError> {
        Ok(RequestPatch {
            property: self.property,
            rate: self.rate,
            months: self.months,
            status: self.status,
            proof_submitted: self.proofs,
            total_proofs: self.total_proofs,
            loan_amount: self.amount.map(Amount::new).transpose()?,
            image: self.image,
            description: optional_field(self.description, self.clear_description),
            collateral_type: optional_field(self.collateral, self.clear_collateral),
            yield_preference: optional_field(self.yield_preference, self.clear_yield_preference),
        })
    }
}

fn optional_field<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

/// One line typed in session mode
#[derive(Debug, Parser)]
#[command(name = "estateflow", no_binary_name = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

/// Split a session line into words.
///
/// Whitespace separates words; single or double quotes group words
/// containing spaces. An unterminated quote runs to the end of the line.
pub fn split_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}
