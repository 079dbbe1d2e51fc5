//! A value-holding optional type backed by inline, manually managed storage.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod slot;
pub mod optional;

pub use optional::{BadAccess, NoValue, Optional, NO_VALUE};
pub use slot::Slot;
