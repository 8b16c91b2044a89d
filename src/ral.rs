//! A RAL-like module for SAM DMA register access
//!
//! There's no generated register access layer in this crate's dependency
//! tree, and the register windows we touch are small. This module writes
//! them out by hand as `#[repr(C)]` blocks, with const assertions pinning
//! the offsets the datasheets prescribe.

#![allow(
    non_snake_case, // Register names match the datasheets
    unused, // Each backend build only touches its own registers
)]

#[cfg(not(feature = "xdmac"))]
pub mod pdc;
pub mod uart;
#[cfg(feature = "xdmac")]
pub mod xdmac;

use ral_registers::{RORegister, RWRegister, WORegister};

//
// Helper type for static memory
//
// Similar to a RAL's `Instance` type, but more copy.
//

pub(super) struct Static<T>(pub(super) *const T);
impl<T> core::ops::Deref for Static<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        // Safety: pointer points to static memory (peripheral memory)
        unsafe { &*self.0 }
    }
}
impl<T> Clone for Static<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Static<T> {}
