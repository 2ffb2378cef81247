//! Domain Layer - Scoring logic and entities
//!
//! This layer contains:
//! - Domain entities (Problem, RankEntry)
//! - Pure scoring rules (decay step, boundary guard)
//! - Pure access policy (tier/ownership matrix, answer redaction)
//! - Repository traits (interfaces)

pub mod entities;
pub mod policy;
pub mod repository;
pub mod scoring;
