//! Card system: attributes, definitions, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `Attribute` / `AttributeSet`: closed bit set over Guard, Thief and Curse
//! - `CardDefinition`: immutable catalog data
//! - `CardInstance`: a per-match copy with its own `InstanceId` and owner
//! - `CardCatalog`: definition lookup and cost tiers

pub mod attributes;
pub mod catalog;
pub mod definition;
pub mod instance;

pub use attributes::{Attribute, AttributeSet};
pub use catalog::{CardCatalog, CostTier};
pub use definition::{CardDefinition, CardId};
pub use instance::CardInstance;
