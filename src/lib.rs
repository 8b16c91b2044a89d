//! Direct Memory Access (DMA) driver for Atmel SAM microcontrollers.
//!
//! `sam-dma` moves buffers between memory and serial peripheral data
//! registers over either of the SAM DMA engines:
//!
//! - the Peripheral DMA Controller (PDC) of SAM3/SAM4-class chips,
//!   integrated into each peripheral, with a hardware-reloaded
//!   next-buffer slot (the default backend).
//! - the eXtensible DMA Controller (XDMAC) of the SAM S70/E70/V70
//!   family, one global multi-channel engine. Enable the `xdmac`
//!   feature.
//!
//! A chip carries one engine or the other, never both for the same
//! peripheral, so the backend is fixed at build time and the
//! [`Channel`] API is the same either way. This driver may be
//! re-exported from a hardware abstraction layer (HAL). If it is, you
//! should use the safer APIs provided by your HAL.
//!
//! # Getting started
//!
//! To allocate channels, you'll need
//!
//! 1. the register base address of each peripheral you serve, taken
//!    from your chip's peripheral access crate.
//! 2. on XDMAC chips, the XDMAC register base address.
//!
//! Describe each peripheral with a [`PeripheralMap`], assign a [`Dma`]
//! to a static (see [`Dma::new`] for an example), and allocate one
//! channel per direction with [`Dma::receive_channel`] and
//! [`Dma::transmit_channel`]. Then drive transfers through the
//! [`Channel`] API.
//!
//! ### License
//!
//! Licensed under either of
//!
//! - [Apache License, Version 2.0](http://www.apache.org/licenses/LICENSE-2.0) ([LICENSE-APACHE](./LICENSE-APACHE))
//! - [MIT License](http://opensource.org/licenses/MIT) ([LICENSE-MIT](./LICENSE-MIT))
//!
//! at your option.
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted
//! for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
//! dual licensed as above, without any additional terms or conditions.

#![no_std]

pub mod channel;
mod peripheral;
mod ral;

pub use channel::{Channel, Direction};
pub use peripheral::PeripheralMap;

/// A DMA driver.
///
/// `Dma` allocates the per-direction [`Channel`]s serving a peripheral.
/// On XDMAC chips it holds the controller registers; on PDC chips the
/// transfer registers live inside each peripheral, so there is nothing
/// central to hold and construction takes no arguments.
pub struct Dma {
    #[cfg(feature = "xdmac")]
    controller: ral::Static<ral::xdmac::RegisterBlock>,
}

// Safety: OK to allocate a DMA driver in a static context.
unsafe impl Sync for Dma {}

#[cfg(not(feature = "xdmac"))]
impl Dma {
    /// Create the DMA driver.
    ///
    /// Note that this can evaluate at compile time. Consider using this
    /// to expose a `Dma` through your higher-level API that you can use
    /// to allocate DMA channels.
    ///
    /// ```
    /// use sam_dma::{Dma, PeripheralMap};
    /// # const UART1_PTR: *const () = core::ptr::null();
    ///
    /// static DMA: Dma = Dma::new();
    /// // Safety: UART1_PTR is this chip's UART1 register base.
    /// static UART1_DMA: PeripheralMap = unsafe { PeripheralMap::uart(1, UART1_PTR) };
    ///
    /// // Safety: we only allocate UART1's channels once.
    /// let mut rx = unsafe { DMA.receive_channel(&UART1_DMA) };
    /// let mut tx = unsafe { DMA.transmit_channel(&UART1_DMA) };
    /// ```
    pub const fn new() -> Self {
        Self {}
    }
}

#[cfg(feature = "xdmac")]
impl Dma {
    /// Create the DMA driver.
    ///
    /// Note that this can evaluate at compile time. Consider using this
    /// to expose a `Dma` through your higher-level API that you can use
    /// to allocate DMA channels.
    ///
    /// ```
    /// use sam_dma::{Dma, PeripheralMap};
    /// # const XDMAC_PTR: *const () = core::ptr::null();
    /// # const UART1_PTR: *const () = core::ptr::null();
    ///
    /// // Safety: XDMAC_PTR is this chip's XDMAC register base.
    /// static DMA: Dma = unsafe { Dma::new(XDMAC_PTR) };
    /// // Safety: UART1_PTR is this chip's UART1 register base.
    /// static UART1_DMA: PeripheralMap = unsafe { PeripheralMap::uart(1, UART1_PTR) };
    ///
    /// // Safety: we only allocate UART1's channels once.
    /// let mut rx = unsafe { DMA.receive_channel(&UART1_DMA) };
    /// let mut tx = unsafe { DMA.transmit_channel(&UART1_DMA) };
    /// ```
    ///
    /// # Safety
    ///
    /// Caller must make sure that `controller` is a pointer to the
    /// start of the XDMAC register block, valid for your MCU.
    pub const unsafe fn new(controller: *const ()) -> Self {
        Self {
            controller: ral::Static(controller.cast()),
        }
    }
}
