//! Peripheral DMA Controller (PDC) registers
//!
//! Every PDC-capable peripheral carries this window at offset 0x100
//! past its own register base. The receive and transmit halves are
//! independent register pairs; the `N`-prefixed pair is the hardware
//! reload slot that becomes current when the active count runs out.

use super::{RORegister, RWRegister, WORegister};

/// PDC registers, one window per peripheral.
#[repr(C)]
pub struct RegisterBlock {
    /// Receive Pointer Register
    pub RPR: RWRegister<u32>,
    /// Receive Counter Register
    pub RCR: RWRegister<u32>,
    /// Transmit Pointer Register
    pub TPR: RWRegister<u32>,
    /// Transmit Counter Register
    pub TCR: RWRegister<u32>,
    /// Receive Next Pointer Register
    pub RNPR: RWRegister<u32>,
    /// Receive Next Counter Register
    pub RNCR: RWRegister<u32>,
    /// Transmit Next Pointer Register
    pub TNPR: RWRegister<u32>,
    /// Transmit Next Counter Register
    pub TNCR: RWRegister<u32>,
    /// Transfer Control Register
    pub PTCR: WORegister<u32>,
    /// Transfer Status Register
    pub PTSR: RORegister<u32>,
}

impl RegisterBlock {
    /// Byte offset of the PDC window from the owning peripheral's base.
    pub const OFFSET: usize = 0x100;

    // PTCR write-only control bits
    pub const RXTEN: u32 = 1 << 0;
    pub const RXTDIS: u32 = 1 << 1;
    pub const TXTEN: u32 = 1 << 8;
    pub const TXTDIS: u32 = 1 << 9;

    // PTSR status bits
    pub const RXTEN_STATUS: u32 = 1 << 0;
    pub const TXTEN_STATUS: u32 = 1 << 8;
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, RNPR) == 0x10);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, PTCR) == 0x20);
