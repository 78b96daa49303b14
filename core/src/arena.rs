//! Generational storage for simulation entities.
//!
//! A [`UnitHandle`] stays valid only while the slot it points to still holds
//! the same generation, so a destroyed unit can never be confused with the one
//! that later reuses its slot.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Weak reference to a unit owned by the host simulation.
    pub struct UnitHandle;
}

pub type Arena<T> = SlotMap<UnitHandle, T>;
