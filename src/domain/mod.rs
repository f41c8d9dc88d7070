//! Domain layer: entities, errors, pure decision services, and ports.

/// Domain entity definitions.
pub mod entities;
/// Domain error types.
pub mod errors;
/// Port definitions for external collaborators.
pub mod ports;
/// Pure domain decision logic.
pub mod services;
