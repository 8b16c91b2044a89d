//! Channel definition, implementation, for the PDC.
//!
//! The PDC is not a central controller: every DMA-capable peripheral
//! carries its own transfer registers, and completion interrupts route
//! through the owning peripheral's interrupt enable/mask/status window.
//! A channel therefore holds two pointers: the peripheral's PDC window,
//! and its control/status window.

use super::Direction;
use crate::ral::{pdc, uart, Static};
use crate::PeripheralMap;

impl crate::Dma {
    /// Creates the receive channel serving `map`'s peripheral.
    ///
    /// # Safety
    ///
    /// This will create a handle that may alias global, mutable state.
    /// You should only create one channel per peripheral direction. If
    /// there are multiple channels for the same direction, you're
    /// responsible for ensuring synchronized access.
    pub unsafe fn receive_channel(&self, map: &PeripheralMap) -> Channel {
        Channel {
            pdc: Static(map.pdc()),
            status: Static(map.status()),
            direction: Direction::Receive,
        }
    }

    /// Creates the transmit channel serving `map`'s peripheral.
    ///
    /// # Safety
    ///
    /// See [`receive_channel`](Self::receive_channel).
    pub unsafe fn transmit_channel(&self, map: &PeripheralMap) -> Channel {
        Channel {
            pdc: Static(map.pdc()),
            status: Static(map.status()),
            direction: Direction::Transmit,
        }
    }
}

/// A DMA channel
///
/// You should rely on your HAL to allocate `Channel`s. If your HAL does
/// not allocate channels, or if you're designing the HAL, use
/// [`Dma`](crate::Dma) to create channels.
///
/// The `Channel` stores memory addresses independent of the memory
/// lifetime. You must make sure that the channel's state is valid before
/// enabling a transfer!
pub struct Channel {
    /// The owning peripheral's PDC window.
    pdc: Static<pdc::RegisterBlock>,
    /// The owning peripheral's control/status window.
    status: Static<uart::RegisterBlock>,
    pub(super) direction: Direction,
}

impl Channel {
    /// The PDC keeps dedicated next-transfer registers and reloads them
    /// into the active slot in hardware, so queued transfers are
    /// supported.
    pub const SUPPORTS_QUEUEING: bool = true;

    /// The peripheral status flag marking this direction's completion.
    fn completion_flag(&self) -> u32 {
        match self.direction {
            Direction::Receive => uart::RegisterBlock::RXBUFF,
            Direction::Transmit => uart::RegisterBlock::TXBUFE,
        }
    }

    pub(super) fn reset_impl(&mut self) {
        // Disable before zeroing, and touch every field: a stale count
        // or pointer would drive the next transfer.
        match self.direction {
            Direction::Receive => {
                self.pdc.PTCR.write(pdc::RegisterBlock::RXTDIS);
                self.pdc.RPR.write(0);
                self.pdc.RNPR.write(0);
                self.pdc.RCR.write(0);
                self.pdc.RNCR.write(0);
            }
            Direction::Transmit => {
                self.pdc.PTCR.write(pdc::RegisterBlock::TXTDIS);
                self.pdc.TPR.write(0);
                self.pdc.TNPR.write(0);
                self.pdc.TCR.write(0);
                self.pdc.TNCR.write(0);
            }
        }
    }

    pub(super) fn enable_impl(&self) {
        // Immutable write OK. PTCR bits are set-only commands.
        match self.direction {
            Direction::Receive => self.pdc.PTCR.write(pdc::RegisterBlock::RXTEN),
            Direction::Transmit => self.pdc.PTCR.write(pdc::RegisterBlock::TXTEN),
        }
    }

    pub(super) fn disable_impl(&self) {
        match self.direction {
            Direction::Receive => self.pdc.PTCR.write(pdc::RegisterBlock::RXTDIS),
            Direction::Transmit => self.pdc.PTCR.write(pdc::RegisterBlock::TXTDIS),
        }
    }

    pub(super) fn is_enabled_impl(&self) -> bool {
        let status = match self.direction {
            Direction::Receive => pdc::RegisterBlock::RXTEN_STATUS,
            Direction::Transmit => pdc::RegisterBlock::TXTEN_STATUS,
        };
        self.pdc.PTSR.read() & status != 0
    }

    pub(super) fn set_current_impl(&mut self, buffer: *const u8, length: u32) {
        // Pointer before count: a nonzero count makes the transfer
        // eligible immediately.
        match self.direction {
            Direction::Receive => {
                self.pdc.RPR.write(buffer as u32);
                self.pdc.RCR.write(length);
            }
            Direction::Transmit => {
                self.pdc.TPR.write(buffer as u32);
                self.pdc.TCR.write(length);
            }
        }
    }

    pub(super) fn set_next_impl(&mut self, buffer: *const u8, length: u32) {
        match self.direction {
            Direction::Receive => {
                self.pdc.RNPR.write(buffer as u32);
                self.pdc.RNCR.write(length);
            }
            Direction::Transmit => {
                self.pdc.TNPR.write(buffer as u32);
                self.pdc.TNCR.write(length);
            }
        }
    }

    pub(super) fn remaining_impl(&self) -> u32 {
        match self.direction {
            Direction::Receive => self.pdc.RCR.read(),
            Direction::Transmit => self.pdc.TCR.read(),
        }
    }

    pub(super) fn remaining_next_impl(&self) -> u32 {
        match self.direction {
            Direction::Receive => self.pdc.RNCR.read(),
            Direction::Transmit => self.pdc.TNCR.read(),
        }
    }

    pub(super) fn position_impl(&self) -> *const u8 {
        match self.direction {
            Direction::Receive => self.pdc.RPR.read() as *const u8,
            Direction::Transmit => self.pdc.TPR.read() as *const u8,
        }
    }

    pub(super) fn flush_impl(&mut self) {
        // Next count first, so the hardware can't reload a queued
        // transfer between the two writes.
        match self.direction {
            Direction::Receive => {
                self.pdc.RNCR.write(0);
                self.pdc.RCR.write(0);
            }
            Direction::Transmit => {
                self.pdc.TNCR.write(0);
                self.pdc.TCR.write(0);
            }
        }
    }

    pub(super) fn set_interrupt_on_completion_impl(&mut self, intr: bool) {
        let flag = self.completion_flag();
        if intr {
            self.status.IER.write(flag);
        } else {
            self.status.IDR.write(flag);
        }
    }

    pub(super) fn is_interrupt_impl(&self) -> bool {
        // Check that the interrupt is unmasked before reading the
        // status register; the flag alone doesn't implicate us.
        let flag = self.completion_flag();
        self.status.IMR.read() & flag != 0 && self.status.SR.read() & flag != 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Channel, Direction};
    use crate::ral::{pdc, uart, Static};

    /// A fake peripheral: the PDC and status windows in plain memory.
    struct Peripheral {
        pdc: pdc::RegisterBlock,
        status: uart::RegisterBlock,
    }

    impl Peripheral {
        fn new() -> Self {
            // Registers are plain memory on the host. All-zero matches
            // the hardware reset state of every field we observe.
            unsafe { core::mem::zeroed() }
        }

        fn receive_channel(&self) -> Channel {
            Channel {
                pdc: Static(&self.pdc),
                status: Static(&self.status),
                direction: Direction::Receive,
            }
        }

        fn transmit_channel(&self) -> Channel {
            Channel {
                pdc: Static(&self.pdc),
                status: Static(&self.status),
                direction: Direction::Transmit,
            }
        }

        /// Mimic the PDC retiring the active receive transfer and
        /// reloading from the next registers, as the hardware does when
        /// RCR reaches zero.
        fn finish_receive(&self) {
            self.pdc.RPR.write(self.pdc.RNPR.read());
            self.pdc.RCR.write(self.pdc.RNCR.read());
            self.pdc.RNPR.write(0);
            self.pdc.RNCR.write(0);
        }
    }

    /// Read any register type, including write-only ones, which on the
    /// fake peripheral just record their last write.
    fn peek<T>(register: &T) -> u32 {
        unsafe { core::ptr::read_volatile(register as *const T as *const u32) }
    }

    /// Store into any register type, simulating a hardware-set value.
    fn poke<T>(register: &T, value: u32) {
        unsafe { core::ptr::write_volatile(register as *const T as *mut u32, value) }
    }

    #[test]
    fn start_when_idle() {
        let p = Peripheral::new();
        let mut rx = p.receive_channel();
        let buffer = [0u8; 100];

        assert!(unsafe { rx.start(buffer.as_ptr(), 100, true, false) });
        assert_eq!(rx.remaining(false), 100);
        assert_eq!(rx.remaining(true), 100);
        assert!(!rx.is_done(false));
        assert_eq!(peek(&p.pdc.PTCR), pdc::RegisterBlock::RXTEN);
        assert_eq!(peek(&p.status.IER), uart::RegisterBlock::RXBUFF);
    }

    #[test]
    fn start_without_interrupt_handling_leaves_masks_alone() {
        let p = Peripheral::new();
        let mut rx = p.receive_channel();
        let buffer = [0u8; 16];

        assert!(unsafe { rx.start(buffer.as_ptr(), 16, false, false) });
        assert_eq!(peek(&p.status.IER), 0);
        assert_eq!(peek(&p.status.IDR), 0);
    }

    #[test]
    fn zero_length_is_rejected() {
        let p = Peripheral::new();
        let mut rx = p.receive_channel();
        let buffer = [0u8; 4];

        assert!(!unsafe { rx.start(buffer.as_ptr(), 0, true, false) });
        assert!(rx.is_done(true));
        // The direction was never enabled.
        assert_eq!(peek(&p.pdc.PTCR), 0);
        assert!(!rx.is_enabled());
    }

    #[test]
    fn zero_length_queue_is_rejected() {
        let p = Peripheral::new();
        let mut rx = p.receive_channel();
        let (a, b) = ([0u8; 100], [0u8; 4]);

        assert!(unsafe { rx.start(a.as_ptr(), 100, true, false) });
        assert!(!unsafe { rx.start(b.as_ptr(), 0, true, true) });
        assert_eq!(rx.remaining(true), 100);
        assert_eq!(rx.remaining_next(), 0);
    }

    #[test]
    fn queue_while_active() {
        let p = Peripheral::new();
        let mut rx = p.receive_channel();
        let (a, b) = ([0u8; 100], [0u8; 50]);

        assert!(unsafe { rx.start(a.as_ptr(), 100, true, false) });
        assert!(unsafe { rx.start(b.as_ptr(), 50, true, true) });
        assert_eq!(rx.remaining(false), 100);
        assert_eq!(rx.remaining_next(), 50);
        assert_eq!(rx.remaining(true), 150);
    }

    #[test]
    fn second_start_without_queueing_is_rejected() {
        let p = Peripheral::new();
        let mut rx = p.receive_channel();
        let (a, b) = ([0u8; 10], [0u8; 10]);

        assert!(unsafe { rx.start(a.as_ptr(), 10, true, false) });
        assert!(!unsafe { rx.start(b.as_ptr(), 10, true, false) });
        assert_eq!(rx.remaining(false), 10);
        assert_eq!(rx.remaining_next(), 0);
    }

    #[test]
    fn both_slots_occupied_rejects_a_third() {
        let p = Peripheral::new();
        let mut rx = p.receive_channel();
        let (a, b, c) = ([0u8; 100], [0u8; 50], [0u8; 20]);

        assert!(unsafe { rx.start(a.as_ptr(), 100, true, false) });
        assert!(unsafe { rx.start(b.as_ptr(), 50, true, true) });
        assert!(!unsafe { rx.start(c.as_ptr(), 20, true, true) });
        assert_eq!(rx.remaining(true), 150);
    }

    #[test]
    fn promotion_frees_the_queue_slot() {
        let p = Peripheral::new();
        let mut rx = p.receive_channel();
        let (a, b, c) = ([0u8; 100], [0u8; 50], [0u8; 20]);

        assert!(unsafe { rx.start(a.as_ptr(), 100, true, false) });
        assert!(unsafe { rx.start(b.as_ptr(), 50, true, true) });

        p.finish_receive();
        assert_eq!(rx.remaining(false), 50);
        assert!(rx.is_done_next());

        assert!(unsafe { rx.start(c.as_ptr(), 20, true, true) });
        assert_eq!(rx.remaining(true), 70);
    }

    #[test]
    fn reset_is_idempotent() {
        let p = Peripheral::new();
        let mut rx = p.receive_channel();
        let (a, b) = ([0u8; 100], [0u8; 50]);

        assert!(unsafe { rx.start(a.as_ptr(), 100, true, false) });
        assert!(unsafe { rx.start(b.as_ptr(), 50, true, true) });

        for _ in 0..2 {
            rx.reset();
            assert_eq!(rx.remaining(true), 0);
            assert!(rx.is_done(true));
            assert_eq!(peek(&p.pdc.PTCR), pdc::RegisterBlock::RXTDIS);
            assert_eq!(peek(&p.pdc.RPR), 0);
            assert_eq!(peek(&p.pdc.RNPR), 0);
        }
    }

    #[test]
    fn flush_aborts_and_frees_the_channel() {
        let p = Peripheral::new();
        let mut rx = p.receive_channel();
        let (a, b) = ([0u8; 100], [0u8; 30]);

        assert!(unsafe { rx.start(a.as_ptr(), 100, true, false) });
        // 40 bytes arrived.
        p.pdc.RCR.write(60);

        rx.flush();
        assert_eq!(rx.remaining(true), 0);
        assert!(unsafe { rx.start(b.as_ptr(), 30, true, false) });
        assert_eq!(rx.remaining(false), 30);
    }

    #[test]
    fn transmit_uses_the_transmit_registers() {
        let p = Peripheral::new();
        let mut tx = p.transmit_channel();
        let buffer = [0u8; 40];

        assert!(unsafe { tx.start(buffer.as_ptr(), 40, true, false) });
        assert_eq!(tx.remaining(false), 40);
        assert_eq!(peek(&p.pdc.TCR), 40);
        assert_eq!(peek(&p.pdc.RCR), 0);
        assert_eq!(peek(&p.pdc.PTCR), pdc::RegisterBlock::TXTEN);
        assert_eq!(peek(&p.status.IER), uart::RegisterBlock::TXBUFE);
    }

    #[test]
    fn interrupt_attribution() {
        let p = Peripheral::new();
        let rx = p.receive_channel();
        let tx = p.transmit_channel();

        poke(&p.status.IMR, uart::RegisterBlock::RXBUFF);
        poke(&p.status.SR, uart::RegisterBlock::RXBUFF);
        assert!(rx.is_interrupt());
        assert!(!tx.is_interrupt());

        // Raised but masked: not ours.
        poke(&p.status.IMR, 0);
        assert!(!rx.is_interrupt());
    }

    #[test]
    fn transfer_position_follows_the_pointer_register() {
        let p = Peripheral::new();
        let rx = p.receive_channel();

        p.pdc.RPR.write(0x2000_0040);
        assert_eq!(rx.transfer_position() as usize, 0x2000_0040);
    }

    #[test]
    fn enabled_status_tracks_ptsr() {
        let p = Peripheral::new();
        let rx = p.receive_channel();
        let tx = p.transmit_channel();

        poke(&p.pdc.PTSR, pdc::RegisterBlock::RXTEN_STATUS);
        assert!(rx.is_enabled());
        assert!(!tx.is_enabled());
    }
}
