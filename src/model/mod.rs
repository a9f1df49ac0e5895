//! The requirement model.
//!
//! Gearsets, their gearpieces, prerequisite chains and materia sockets, held
//! in a [`GearsetStore`] arena and addressed by stable ids.
//!
//! # Modules
//!
//! - [`ids`] - Arena identifiers
//! - [`slot`] - Equipment and requirement slots
//! - [`gearpiece`] - Gearpieces, prerequisites and materia
//! - [`gearset`] - Gearsets and their origin
//! - [`requirements`] - The flattened all-item-requirements view
//! - [`priority`] - Gearset priority policy
//! - [`store`] - The arena and its mutations
//! - [`selection`] - Counted gearset selection
//! - [`factory`] - Catalog-backed gearpiece construction

pub mod factory;
pub mod gearpiece;
pub mod gearset;
pub mod ids;
pub mod priority;
pub mod requirements;
pub mod selection;
pub mod slot;
pub mod store;

pub use factory::GearpieceFactory;
pub use gearpiece::{Gearpiece, MateriaRequirement, Prerequisite};
pub use gearset::{Gearset, GearsetSource, ImportSourceType};
pub use ids::{GearpieceId, GearsetId};
pub use priority::PriorityPolicy;
pub use requirements::{AllItemRequirements, ItemRequirement, RequirementKind, RequirementOwner};
pub use selection::CountSelection;
pub use slot::{GearpieceSlot, RequirementSlot};
pub use store::{validate_gearset, GearsetStore, GearsetsFile, ModelChange, ModelChangeKind};
