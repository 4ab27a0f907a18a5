//! # Validation Module
//!
//! Input validation for operator-entered data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                          │
//! │                                                                 │
//! │  Layer 1: form / input widgets (basic format checks)            │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 2: THIS MODULE, called by the command layer before any   │
//! │           state is mutated — a failure aborts the operation     │
//! │           with nothing written                                  │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 3: core invariant guards (drawer open, tolerance, ...)   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product display name: required, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a product business code: required, at most 50 characters.
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates an expense description: required, at most 200 characters.
pub fn validate_expense_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a patient name on an appointment form.
pub fn validate_patient_name(patient: &str) -> ValidationResult<()> {
    if patient.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "patient".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an entered quantity (grams or units): must be positive.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a catalog price: zero allowed (giveaways), negatives are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates an expense value: must be positive.
pub fn validate_expense_value(value: Money) -> ValidationResult<()> {
    if value.cents() <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "value".to_string(),
        });
    }
    Ok(())
}

/// Validates the drawer opening float: zero is a valid empty drawer.
pub fn validate_initial_float(float: Money) -> ValidationResult<()> {
    if float.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "initial float".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
