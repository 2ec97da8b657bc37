//! Initial fixture: six example properties

use chrono::{DateTime, NaiveDate, Utc};
use estateflow_core::{Amount, CollateralType, RequestStatus};
use rust_decimal::Decimal;

use crate::request::LoanRequest;

struct SeedRow {
    id: &'static str,
    property: &'static str,
    /// Rate in tenths of a percent
    rate_tenths: i64,
    months: u32,
    status: RequestStatus,
    proof_submitted: u32,
    loan_amount: u64,
    image: &'static str,
    description: &'static str,
    collateral: CollateralType,
    yield_pref_tenths: i64,
    created: (i32, u32, u32),
}

const ROWS: [SeedRow; 6] = [
    SeedRow {
        id: "p1",
        property: "Jaipur Palace",
        rate_tenths: 59,
        months: 24,
        status: RequestStatus::Open,
        proof_submitted: 2,
        loan_amount: 250_000,
        image: "/properties/1.png",
        description: "Luxurious palace-style property in Jaipur",
        collateral: CollateralType::Yield,
        yield_pref_tenths: 65,
        created: (2024, 1, 15),
    },
    SeedRow {
        id: "p2",
        property: "Pune Residency",
        rate_tenths: 63,
        months: 36,
        status: RequestStatus::Pending,
        proof_submitted: 0,
        loan_amount: 320_000,
        image: "/properties/2.png",
        description: "Modern residential complex in Pune",
        collateral: CollateralType::Direct,
        yield_pref_tenths: 58,
        created: (2024, 1, 20),
    },
    SeedRow {
        id: "p3",
        property: "Goa Beach Villa",
        rate_tenths: 55,
        months: 48,
        status: RequestStatus::Open,
        proof_submitted: 4,
        loan_amount: 450_000,
        image: "/properties/3.png",
        description: "Beachfront villa in Goa",
        collateral: CollateralType::Yield,
        yield_pref_tenths: 72,
        created: (2024, 1, 10),
    },
    SeedRow {
        id: "p4",
        property: "Bangalore Tech Park",
        rate_tenths: 61,
        months: 30,
        status: RequestStatus::Open,
        proof_submitted: 1,
        loan_amount: 380_000,
        image: "/properties/4.png",
        description: "Commercial tech park in Bangalore",
        collateral: CollateralType::Direct,
        yield_pref_tenths: 60,
        created: (2024, 1, 25),
    },
    SeedRow {
        id: "p5",
        property: "Hyderabad Heights",
        rate_tenths: 57,
        months: 36,
        status: RequestStatus::Pending,
        proof_submitted: 3,
        loan_amount: 290_000,
        image: "/properties/5.png",
        description: "High-rise residential building in Hyderabad",
        collateral: CollateralType::Yield,
        yield_pref_tenths: 68,
        created: (2024, 1, 18),
    },
    SeedRow {
        id: "p6",
        property: "Chennai Marina",
        rate_tenths: 60,
        months: 24,
        status: RequestStatus::Open,
        proof_submitted: 5,
        loan_amount: 275_000,
        image: "/properties/4.png",
        description: "Marina-front property in Chennai",
        collateral: CollateralType::Direct,
        yield_pref_tenths: 55,
        created: (2024, 1, 12),
    },
];

/// Every seeded request requires six proofs
pub const SEED_TOTAL_PROOFS: u32 = 6;

/// The fixture requests, ids `p1..p6`
pub fn initial_requests() -> Vec<LoanRequest> {
    ROWS.iter().map(to_request).collect()
}

fn to_request(row: &SeedRow) -> LoanRequest {
    LoanRequest {
        id: row.id.to_string(),
        property: row.property.to_string(),
        rate: Decimal::new(row.rate_tenths, 1),
        months: row.months,
        status: row.status,
        proof_submitted: row.proof_submitted,
        total_proofs: SEED_TOTAL_PROOFS,
        loan_amount: Amount::from_dollars(row.loan_amount),
        image: row.image.to_string(),
        description: Some(row.description.to_string()),
        collateral_type: Some(row.collateral),
        yield_preference: Some(Decimal::new(row.yield_pref_tenths, 1)),
        created_at: midnight_utc(row.created),
    }
}

fn midnight_utc((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}
