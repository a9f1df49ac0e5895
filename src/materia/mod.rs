//! Materia need estimation.
//!
//! # Modules
//!
//! - [`estimator`] - Confidence-based need for one materia type
//! - [`counts`] - The per-materia table over counted gearsets

pub mod counts;
pub mod estimator;

pub use counts::{MateriaCounts, MateriaRow, MateriaSortColumn};
pub use estimator::{materia_needed, remaining, Confidence, MateriaGroup, RoundingPolicy};
