//! DMA routing constants for serial peripherals.
//!
//! A [`PeripheralMap`] bundles everything the driver needs to know about
//! one UART or USART instance: where its registers live, which XDMAC
//! channels and peripheral request IDs serve it, and where its data
//! registers sit. The channel and request numbers are fixed by the chip
//! design, so they're baked in here, one table entry per instance; the
//! register base depends on the exact part and comes from the caller
//! (take it from your PAC's peripheral addresses).

use crate::ral::uart;

/// DMA routing for one UART or USART instance.
///
/// Build one with [`usart`](PeripheralMap::usart) or
/// [`uart`](PeripheralMap::uart). Maps are plain constants; construction
/// touches no hardware, and the same map can back both of the
/// peripheral's channels.
///
/// ```
/// use sam_dma::PeripheralMap;
/// # const UART1: *const () = core::ptr::null();
/// // Safety: UART1 is this chip's UART1 register base.
/// static MAP: PeripheralMap = unsafe { PeripheralMap::uart(1, UART1) };
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PeripheralMap {
    base: *const (),
    rx_channel: usize,
    tx_channel: usize,
    rx_id: u8,
    tx_id: u8,
}

// Safety: a map is an immutable description of peripheral memory.
// Sharing or sending it doesn't touch that memory.
unsafe impl Send for PeripheralMap {}
unsafe impl Sync for PeripheralMap {}

impl PeripheralMap {
    /// Describes USART `index`.
    ///
    /// # Safety
    ///
    /// `base` must be the USART instance's register base address for
    /// your chip.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a USART instance with DMA service
    /// (greater than 2).
    pub const unsafe fn usart(index: usize, base: *const ()) -> Self {
        let (rx_channel, tx_channel, rx_id, tx_id) = match index {
            0 => (1, 0, 8, 7),
            1 => (3, 2, 10, 9),
            2 => (5, 4, 12, 11),
            _ => panic!("No DMA service for this USART instance"),
        };
        PeripheralMap {
            base,
            rx_channel,
            tx_channel,
            rx_id,
            tx_id,
        }
    }

    /// Describes UART `index`.
    ///
    /// # Safety
    ///
    /// `base` must be the UART instance's register base address for
    /// your chip.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a UART instance with DMA service
    /// (greater than 4).
    pub const unsafe fn uart(index: usize, base: *const ()) -> Self {
        let (rx_channel, tx_channel, rx_id, tx_id) = match index {
            0 => (7, 6, 21, 20),
            1 => (9, 8, 23, 22),
            2 => (11, 10, 25, 24),
            3 => (13, 12, 27, 26),
            4 => (15, 14, 29, 28),
            _ => panic!("No DMA service for this UART instance"),
        };
        PeripheralMap {
            base,
            rx_channel,
            tx_channel,
            rx_id,
            tx_id,
        }
    }

    /// The XDMAC channel that receives from this peripheral.
    pub const fn receive_channel_number(&self) -> usize {
        self.rx_channel
    }

    /// The XDMAC channel that transmits to this peripheral.
    pub const fn transmit_channel_number(&self) -> usize {
        self.tx_channel
    }

    /// The peripheral's receive hardware request ID.
    pub const fn receive_id(&self) -> u8 {
        self.rx_id
    }

    /// The peripheral's transmit hardware request ID.
    pub const fn transmit_id(&self) -> u8 {
        self.tx_id
    }

    /// Address of the receive holding register, the fixed
    /// peripheral-side address for receive transfers.
    pub fn receive_register(&self) -> *const u32 {
        (self.base as *const u8).wrapping_add(core::mem::offset_of!(uart::RegisterBlock, RHR))
            as *const u32
    }

    /// Address of the transmit holding register, the fixed
    /// peripheral-side address for transmit transfers.
    pub fn transmit_register(&self) -> *const u32 {
        (self.base as *const u8).wrapping_add(core::mem::offset_of!(uart::RegisterBlock, THR))
            as *const u32
    }

    /// The peripheral's PDC window.
    #[cfg(not(feature = "xdmac"))]
    pub(crate) fn pdc(&self) -> *const crate::ral::pdc::RegisterBlock {
        (self.base as *const u8).wrapping_add(crate::ral::pdc::RegisterBlock::OFFSET) as *const _
    }

    /// The peripheral's control/status window.
    #[cfg(not(feature = "xdmac"))]
    pub(crate) fn status(&self) -> *const uart::RegisterBlock {
        self.base as *const _
    }
}

#[cfg(test)]
mod tests {
    use super::PeripheralMap;

    const BASE: *const () = 0x4000_0000usize as *const ();

    #[test]
    fn usart_routing() {
        let map = unsafe { PeripheralMap::usart(1, BASE) };
        assert_eq!(map.receive_channel_number(), 3);
        assert_eq!(map.transmit_channel_number(), 2);
        assert_eq!(map.receive_id(), 10);
        assert_eq!(map.transmit_id(), 9);
    }

    #[test]
    fn uart_routing() {
        let map = unsafe { PeripheralMap::uart(4, BASE) };
        assert_eq!(map.receive_channel_number(), 15);
        assert_eq!(map.transmit_channel_number(), 14);
        assert_eq!(map.receive_id(), 29);
        assert_eq!(map.transmit_id(), 28);
    }

    #[test]
    fn data_registers() {
        let map = unsafe { PeripheralMap::uart(0, BASE) };
        assert_eq!(map.receive_register() as usize, 0x4000_0018);
        assert_eq!(map.transmit_register() as usize, 0x4000_001C);
    }

    #[test]
    #[should_panic]
    fn usart_without_dma_service() {
        let _ = unsafe { PeripheralMap::usart(3, BASE) };
    }

    #[test]
    #[should_panic]
    fn uart_without_dma_service() {
        let _ = unsafe { PeripheralMap::uart(5, BASE) };
    }
}
