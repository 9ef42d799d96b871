//! Lane combat.
//!
//! `CombatResolver::resolve_pass` runs one side's attack against the other
//! side's lanes and returns a `PassReport` with the damage split and an
//! ordered list of `CombatEvent`s for the message stream.

pub mod event;
pub mod resolver;

pub use event::{ClashResult, CombatEvent};
pub use resolver::{CombatResolver, PassReport};
