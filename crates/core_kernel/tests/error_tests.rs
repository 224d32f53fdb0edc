//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::ClaimNumber;

#[test]
fn test_core_error_invalid_identifier() {
    let error = CoreError::invalid_identifier("claim number is empty");

    match error {
        CoreError::InvalidIdentifier(msg) => assert_eq!(msg, "claim number is empty"),
    }
}

#[test]
fn test_invalid_claim_number_yields_identifier_error() {
    let error = "ABC".parse::<ClaimNumber>().unwrap_err();

    assert!(matches!(error, CoreError::InvalidIdentifier(_)));
    assert!(error.to_string().contains("12 digits"));
}

#[test]
fn test_core_error_display() {
    let error = CoreError::invalid_identifier("1234");
    let display = format!("{}", error);

    assert_eq!(display, "Invalid identifier: 1234");
}
