//! Loan request data structures

use chrono::{DateTime, Utc};
use estateflow_core::{Amount, CollateralType, RequestStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque request identifier
pub type RequestId = String;

/// A funding request posted by an asset holder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Ledger-assigned, unique for the ledger's lifetime
    pub id: RequestId,

    /// Property display name
    pub property: String,

    /// Annual interest percentage (e.g. 5.9)
    pub rate: Decimal,

    /// Loan term in months
    pub months: u32,

    pub status: RequestStatus,

    /// Milestone proofs submitted so far
    pub proof_submitted: u32,

    /// Milestone proofs required
    pub total_proofs: u32,

    pub loan_amount: Amount,

    /// Display asset reference, e.g. `/properties/3.png`
    pub image: String,

    pub description: Option<String>,

    pub collateral_type: Option<CollateralType>,

    /// Preferred yield percentage
    pub yield_preference: Option<Decimal>,

    /// Set once at creation
    pub created_at: DateTime<Utc>,
}

impl LoanRequest {
    /// Proof progress as `(submitted, total)`
    pub fn proof_progress(&self) -> (u32, u32) {
        (self.proof_submitted, self.total_proofs)
    }
}

/// Caller-supplied fields for a new request.
///
/// Identity, status, submitted proofs and the creation timestamp are
/// assigned by the ledger and therefore absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLoanRequest {
    pub property: String,
    pub rate: Decimal,
    pub months: u32,
    pub total_proofs: u32,
    pub loan_amount: Amount,
    pub image: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub collateral_type: Option<CollateralType>,
    #[serde(default)]
    pub yield_preference: Option<Decimal>,
}

impl NewLoanRequest {
    pub(crate) fn into_request(self, id: RequestId, created_at: DateTime<Utc>) -> LoanRequest {
        LoanRequest {
            id,
            property: self.property,
            rate: self.rate,
            months: self.months,
            status: RequestStatus::Open,
            proof_submitted: 0,
            total_proofs: self.total_proofs,
            loan_amount: self.loan_amount,
            image: self.image,
            description: self.description,
            collateral_type: self.collateral_type,
            yield_preference: self.yield_preference,
            created_at,
        }
    }
}

/// Partial update merged onto an existing request.
///
/// `None` leaves a field untouched. `id` and `created_at` are not patchable.
/// For the optional descriptive fields the outer `Option` selects whether to
/// touch the field and the inner one is the new value, so a patch can clear
/// them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestPatch {
    pub property: Option<String>,
    pub rate: Option<Decimal>,
    pub months: Option<u32>,
    pub status: Option<RequestStatus>,
    pub proof_submitted: Option<u32>,
    pub total_proofs: Option<u32>,
    pub loan_amount: Option<Amount>,
    pub image: Option<String>,
    pub description: Option<Option<String>>,
    pub collateral_type: Option<Option<CollateralType>>,
    pub yield_preference: Option<Option<Decimal>>,
}

impl RequestPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn proof_submitted(mut self, count: u32) -> Self {
        self.proof_submitted = Some(count);
        self
    }

    pub fn total_proofs(mut self, count: u32) -> Self {
        self.total_proofs = Some(count);
        self
    }

    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn months(mut self, months: u32) -> Self {
        self.months = Some(months);
        self
    }

    pub fn loan_amount(mut self, amount: Amount) -> Self {
        self.loan_amount = Some(amount);
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn collateral_type(mut self, collateral: Option<CollateralType>) -> Self {
        self.collateral_type = Some(collateral);
        self
    }

    pub fn yield_preference(mut self, preference: Option<Decimal>) -> Self {
        self.yield_preference = Some(preference);
        self
    }

    /// True when the patch touches no field
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge onto `request`
    pub fn apply(self, request: &mut LoanRequest) {
        if let Some(v) = self.property {
            request.property = v;
        }
        if let Some(v) = self.rate {
            request.rate = v;
        }
        if let Some(v) = self.months {
            request.months = v;
        }
        if let Some(v) = self.status {
            request.status = v;
        }
        if let Some(v) = self.proof_submitted {
            request.proof_submitted = v;
        }
        if let Some(v) = self.total_proofs {
            request.total_proofs = v;
        }
        if let Some(v) = self.loan_amount {
            request.loan_amount = v;
        }
        if let Some(v) = self.image {
            request.image = v;
        }
        if let Some(v) = self.description {
            request.description = v;
        }
        if let Some(v) = self.collateral_type {
            request.collateral_type = v;
        }
        if let Some(v) = self.yield_preference {
            request.yield_preference = v;
        }
    }
}
