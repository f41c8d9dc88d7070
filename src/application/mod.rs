//! Application layer: DTOs and use-case orchestration.

/// Data transfer objects.
pub mod dto;
/// Use case implementations.
pub mod use_cases;
