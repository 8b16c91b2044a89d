//! UART control/status registers driven by the DMA layer
//!
//! On SAM parts the UART and USART share this register prefix
//! (CR through THR at identical offsets), so one block serves both
//! kinds. The DMA layer only touches the interrupt enable/disable/mask
//! registers, the status register, and the two data registers the PDC
//! buffer-empty flags refer to.

use super::{RORegister, RWRegister, WORegister};

/// Leading UART/USART registers.
#[repr(C)]
pub struct RegisterBlock {
    /// Control Register
    pub CR: WORegister<u32>,
    /// Mode Register
    pub MR: RWRegister<u32>,
    /// Interrupt Enable Register
    pub IER: WORegister<u32>,
    /// Interrupt Disable Register
    pub IDR: WORegister<u32>,
    /// Interrupt Mask Register
    pub IMR: RORegister<u32>,
    /// Status Register (CSR on the USART)
    pub SR: RORegister<u32>,
    /// Receive Holding Register
    pub RHR: RORegister<u32>,
    /// Transmit Holding Register
    pub THR: WORegister<u32>,
}

impl RegisterBlock {
    /// Transmit buffer empty: TCR and TNCR both reached zero.
    pub const TXBUFE: u32 = 1 << 11;
    /// Receive buffer full: RCR and RNCR both reached zero.
    pub const RXBUFF: u32 = 1 << 12;
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, SR) == 0x14);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, RHR) == 0x18);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, THR) == 0x1C);
