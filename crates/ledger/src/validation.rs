//! Input validation run by callers before touching the ledger
//!
//! The ledger itself trusts its input. Front ends parse raw form values with
//! [`RequestForm`] and may re-check a built request with
//! [`validate_new_request`].

use std::str::FromStr;

use estateflow_core::{Amount, CollateralType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::request::NewLoanRequest;

/// Structural checks on a new request
pub fn validate_new_request(data: &NewLoanRequest) -> Result<(), ValidationError> {
    if data.property.trim().is_empty() {
        return Err(ValidationError::MissingField("property"));
    }
    if data.rate < Decimal::ZERO {
        return Err(ValidationError::NegativeRate(data.rate));
    }
    if data.months == 0 {
        return Err(ValidationError::ZeroTerm);
    }
    if data.loan_amount.is_zero() {
        return Err(ValidationError::NonPositiveLoanAmount(data.loan_amount.value()));
    }
    Ok(())
}

/// Values the form does not ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub rate: Decimal,
    pub total_proofs: u32,
}

/// Raw "new request" form as typed by an asset holder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestForm {
    pub property_name: String,
    pub description: String,
    pub loan_amount: String,
    pub months: String,
    pub collateral_type: String,
    #[serde(default)]
    pub yield_preference: String,
}

impl RequestForm {
    /// Parse and validate the form into a ledger-ready request.
    ///
    /// Property name, description, loan amount, months and collateral type
    /// are required; a blank yield preference means none.
    pub fn into_new_request(
        self,
        defaults: &FormDefaults,
        image: String,
    ) -> Result<NewLoanRequest, ValidationError> {
        let property = required("property_name", &self.property_name)?;
        let description = required("description", &self.description)?;
        let loan_amount = required("loan_amount", &self.loan_amount)?;
        let months = required("months", &self.months)?;
        let collateral = required("collateral_type", &self.collateral_type)?;

        let loan_amount: Decimal = parse_number("loan_amount", loan_amount)?;
        if loan_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveLoanAmount(loan_amount));
        }
        let loan_amount = Amount::new(loan_amount)
            .map_err(|_| ValidationError::NonPositiveLoanAmount(loan_amount))?;

        let months: u32 = parse_number("months", months)?;

        let collateral_type = CollateralType::from_str(collateral)
            .map_err(|e| ValidationError::UnknownCollateral(e.0))?;

        let yield_preference = match self.yield_preference.trim() {
            "" => None,
            raw => Some(parse_number::<Decimal>("yield_preference", raw)?),
        };

        let request = NewLoanRequest {
            property: property.to_string(),
            rate: defaults.rate,
            months,
            total_proofs: defaults.total_proofs,
            loan_amount,
            image,
            description: Some(description.to_string()),
            collateral_type: Some(collateral_type),
            yield_preference,
        };

        validate_new_request(&request)?;
        Ok(request)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ValidationError> {
    value.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn defaults() -> FormDefaults {
        FormDefaults {
            rate: dec!(6.0),
            total_proofs: 6,
        }
    }

    fn filled_form() -> RequestForm {
        RequestForm {
            property_name: "Kochi Backwaters".to_string(),
            description: "Lakeside homestay".to_string(),
            loan_amount: "180000".to_string(),
            months: "18".to_string(),
            collateral_type: "yield".to_string(),
            yield_preference: String::new(),
        }
    }

    #[test]
    fn test_form_success() {
        let request = filled_form()
            .into_new_request(&defaults(), "/properties/2.png".to_string())
            .unwrap();

        assert_eq!(request.property, "Kochi Backwaters");
        assert_eq!(request.rate, dec!(6.0));
        assert_eq!(request.total_proofs, 6);
        assert_eq!(request.months, 18);
        assert_eq!(request.loan_amount, Amount::from_dollars(180_000));
        assert_eq!(request.collateral_type, Some(CollateralType::Yield));
        assert_eq!(request.yield_preference, None);
    }

    #[test]
    fn test_form_missing_fields() {
        let mut form = filled_form();
        form.description = "   ".to_string();
        let err = form.into_new_request(&defaults(), String::new()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("description"));

        let mut form = filled_form();
        form.collateral_type.clear();
        let err = form.into_new_request(&defaults(), String::new()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("collateral_type"));
    }

    #[test]
    fn test_form_bad_numbers() {
        let mut form = filled_form();
        form.loan_amount = "lots".to_string();
        let err = form.into_new_request(&defaults(), String::new()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "loan_amount", .. }));

        let mut form = filled_form();
        form.loan_amount = "-10".to_string();
        let err = form.into_new_request(&defaults(), String::new()).unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveLoanAmount(dec!(-10)));

        let mut form = filled_form();
        form.months = "0".to_string();
        let err = form.into_new_request(&defaults(), String::new()).unwrap_err();
        assert_eq!(err, ValidationError::ZeroTerm);
    }

    #[test]
    fn test_form_yield_preference_and_collateral() {
        let mut form = filled_form();
        form.yield_preference = "7.25".to_string();
        form.collateral_type = "Direct".to_string();
        let request = form.into_new_request(&defaults(), String::new()).unwrap();
        assert_eq!(request.yield_preference, Some(dec!(7.25)));
        assert_eq!(request.collateral_type, Some(CollateralType::Direct));

        let mut form = filled_form();
        form.collateral_type = "gold".to_string();
        let err = form.into_new_request(&defaults(), String::new()).unwrap_err();
        assert_eq!(err, ValidationError::UnknownCollateral("gold".to_string()));
    }

    #[test]
    fn test_validate_new_request_rules() {
        let mut request = filled_form()
            .into_new_request(&defaults(), String::new())
            .unwrap();

        request.rate = dec!(-0.5);
        assert_eq!(
            validate_new_request(&request),
            Err(ValidationError::NegativeRate(dec!(-0.5)))
        );

        request.rate = dec!(5);
        request.property = String::new();
        assert_eq!(
            validate_new_request(&request),
            Err(ValidationError::MissingField("property"))
        );
    }
}
