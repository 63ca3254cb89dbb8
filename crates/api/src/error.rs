// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use courier_dispatch::CoreError;
use courier_domain::DomainError;
use serde::Serialize;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// A short, stable name for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DomainRuleViolation { .. } => "domain_rule_violation",
            Self::InvalidInput { .. } => "invalid_input",
            Self::ResourceNotFound { .. } => "resource_not_found",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message,
    }
}

fn rule_violation(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message,
    }
}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from(resource_type),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidName(detail) => invalid_input("name", detail),
        DomainError::InvalidLocationEvent(_) => invalid_input("event", message),
        DomainError::InvalidWeight(_) => invalid_input("weight", message),
        DomainError::InvalidCapacity(_) => invalid_input("capacity", message),
        DomainError::InvalidDistance(_) => invalid_input("distance", message),
        DomainError::InvalidPriority(_) => invalid_input("priority", message),
        DomainError::InvalidStatus(_) => invalid_input("status", message),
        DomainError::InvalidWeightCategory(_) => invalid_input("weight_category", message),
        DomainError::SameEndpoints(_) => invalid_input("dest_city_id", message),
        DomainError::CityNotFound(_) => not_found("City", message),
        DomainError::ParcelNotFound(_) => not_found("Parcel", message),
        DomainError::RiderNotFound(_) => not_found("Rider", message),
        DomainError::RouteNotFound { .. } => not_found("Route", message),
        DomainError::NoPath { .. } => not_found("Path", message),
        DomainError::InvalidTransition { .. } => rule_violation("valid_transition", message),
        DomainError::ParcelClosed { .. } => rule_violation("parcel_open", message),
        DomainError::CapacityExceeded { .. } => rule_violation("rider_capacity", message),
        DomainError::AlreadyAssigned { .. } => rule_violation("single_assignment", message),
        DomainError::NoRiderAvailable(_) => rule_violation("rider_available", message),
        DomainError::RiderHasAssignments { .. } => rule_violation("rider_unassigned", message),
        DomainError::CapacityBelowLoad { .. } => rule_violation("capacity_covers_load", message),
        DomainError::DuplicateId { .. } => rule_violation("unique_id", message),
        DomainError::IdsExhausted(_) => rule_violation("id_available", message),
        DomainError::LoadMismatch { .. } => rule_violation("load_matches_assignments", message),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
