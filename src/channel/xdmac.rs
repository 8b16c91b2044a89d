//! Channel definition, implementation, for the XDMAC.
//!
//! One global controller serves every peripheral. A channel pairs one
//! XDMAC channel window with the peripheral request ID and data-register
//! address from its peripheral map. The XDMAC's linked-descriptor
//! machinery goes unused here: transfers are single-block, and there is
//! no next-transfer reload for the shared channel logic to fill.

use super::Direction;
use crate::ral::{xdmac, Static};
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
            registers: self.controller,
            index: map.receive_channel_number(),
            peripheral_id: map.receive_id(),
            data_register: map.receive_register(),
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
            registers: self.controller,
            index: map.transmit_channel_number(),
            peripheral_id: map.transmit_id(),
            data_register: map.transmit_register(),
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
    /// Reference to the XDMAC registers.
    registers: Static<xdmac::RegisterBlock>,
    /// Our channel number, expected to be between [0, CHANNEL_COUNT).
    index: usize,
    /// The peripheral's hardware request ID for this direction.
    peripheral_id: u8,
    /// The peripheral's data register, the fixed end of every transfer.
    data_register: *const u32,
    pub(super) direction: Direction,
}

impl Channel {
    /// The XDMAC has no next-transfer reload registers for
    /// single-block peripheral transfers, so queued transfers are not
    /// supported: `start` with `queue_next` while a transfer is active
    /// is rejected.
    pub const SUPPORTS_QUEUEING: bool = false;

    /// Returns a handle to this channel's register window.
    fn chid(&self) -> &xdmac::ChannelRegisters {
        &self.registers.CHID[self.index]
    }

    pub(super) fn reset_impl(&mut self) {
        self.disable_impl();

        // Single-block, single-microblock byte transfers between a
        // FIFO-backed peripheral register and incrementing memory.
        // Memory sits behind AHB interface 0, peripherals behind
        // interface 1.
        let chid = self.chid();
        match self.direction {
            Direction::Receive => {
                chid.CSA.write(self.data_register as u32);
                chid.CC.write(
                    xdmac::ChannelRegisters::CC_TYPE_PER_TRAN
                        | xdmac::ChannelRegisters::CC_MBSIZE_SINGLE
                        | xdmac::ChannelRegisters::CC_DSYNC_PER2MEM
                        | xdmac::ChannelRegisters::CC_CSIZE_CHK_1
                        | xdmac::ChannelRegisters::CC_DWIDTH_BYTE
                        | xdmac::ChannelRegisters::CC_SIF_AHB_IF1
                        | xdmac::ChannelRegisters::CC_DIF_AHB_IF0
                        | xdmac::ChannelRegisters::CC_SAM_FIXED
                        | xdmac::ChannelRegisters::CC_DAM_INCREMENTED
                        | xdmac::ChannelRegisters::cc_perid(self.peripheral_id),
                );
            }
            Direction::Transmit => {
                chid.CDA.write(self.data_register as u32);
                chid.CC.write(
                    xdmac::ChannelRegisters::CC_TYPE_PER_TRAN
                        | xdmac::ChannelRegisters::CC_MBSIZE_SINGLE
                        | xdmac::ChannelRegisters::CC_DSYNC_MEM2PER
                        | xdmac::ChannelRegisters::CC_CSIZE_CHK_1
                        | xdmac::ChannelRegisters::CC_DWIDTH_BYTE
                        | xdmac::ChannelRegisters::CC_SIF_AHB_IF0
                        | xdmac::ChannelRegisters::CC_DIF_AHB_IF1
                        | xdmac::ChannelRegisters::CC_SAM_INCREMENTED
                        | xdmac::ChannelRegisters::CC_DAM_FIXED
                        | xdmac::ChannelRegisters::cc_perid(self.peripheral_id),
                );
            }
        }

        // The datasheet wants these cleared explicitly before use.
        chid.CNDC.write(0);
        chid.CBC.write(0);
        chid.CDS_MSP.write(0);
        chid.CSUS.write(0);
        chid.CDUS.write(0);
        chid.CUBC.write(0);
    }

    pub(super) fn enable_impl(&self) {
        // Immutable write OK. GE bits are set-only commands.
        self.registers.GE.write(1 << self.index);
    }

    pub(super) fn disable_impl(&self) {
        self.registers.GD.write(1 << self.index);
    }

    pub(super) fn is_enabled_impl(&self) -> bool {
        self.registers.GS.read() & (1 << self.index) != 0
    }

    pub(super) fn set_current_impl(&mut self, buffer: *const u8, length: u32) {
        // Memory-side address before count; a nonzero count makes the
        // transfer eligible immediately. With byte-wide data, CUBC
        // counts bytes.
        let chid = self.chid();
        match self.direction {
            Direction::Receive => chid.CDA.write(buffer as u32),
            Direction::Transmit => chid.CSA.write(buffer as u32),
        }
        chid.CUBC.write(length);
    }

    pub(super) fn set_next_impl(&mut self, _buffer: *const u8, _length: u32) {
        // No reload registers to fill; the queueing gate keeps the
        // shared channel logic from ever calling this.
    }

    pub(super) fn remaining_impl(&self) -> u32 {
        self.chid().CUBC.read()
    }

    pub(super) fn remaining_next_impl(&self) -> u32 {
        0
    }

    pub(super) fn position_impl(&self) -> *const u8 {
        // The memory-side address register tracks the hardware's
        // progress through the buffer.
        let chid = self.chid();
        match self.direction {
            Direction::Receive => chid.CDA.read() as *const u8,
            Direction::Transmit => chid.CSA.read() as *const u8,
        }
    }

    pub(super) fn flush_impl(&mut self) {
        self.chid().CUBC.write(0);
    }

    pub(super) fn set_interrupt_on_completion_impl(&mut self, intr: bool) {
        // Block-end on the channel, plus the channel's line in the
        // global mask.
        let chid = self.chid();
        if intr {
            chid.CIE.write(xdmac::ChannelRegisters::BIE);
            self.registers.GIE.write(1 << self.index);
        } else {
            chid.CID.write(xdmac::ChannelRegisters::BIE);
            self.registers.GID.write(1 << self.index);
        }
    }

    pub(super) fn is_interrupt_impl(&self) -> bool {
        // CIS is clear-on-read: query once per interrupt.
        let chid = self.chid();
        chid.CIM.read() & xdmac::ChannelRegisters::BIE != 0
            && chid.CIS.read() & xdmac::ChannelRegisters::BIE != 0
    }
}
