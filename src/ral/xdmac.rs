//! Extensible DMA Controller (XDMAC) registers
//!
//! One global controller serves every peripheral. The global registers
//! carry one bit per channel; each channel then has its own 0x40-byte
//! window starting at offset 0x50.

use super::{RORegister, RWRegister, WORegister};

/// Number of XDMAC channels.
pub const CHANNEL_COUNT: usize = 24;

/// XDMAC global registers followed by the per-channel windows.
#[repr(C)]
pub struct RegisterBlock {
    /// Global Type Register
    pub GTYPE: RORegister<u32>,
    /// Global Configuration Register
    pub GCFG: RWRegister<u32>,
    /// Global Weighted Arbiter Configuration Register
    pub GWAC: RWRegister<u32>,
    /// Global Interrupt Enable Register
    pub GIE: WORegister<u32>,
    /// Global Interrupt Disable Register
    pub GID: WORegister<u32>,
    /// Global Interrupt Mask Register
    pub GIM: RORegister<u32>,
    /// Global Interrupt Status Register
    pub GIS: RORegister<u32>,
    /// Global Channel Enable Register
    pub GE: WORegister<u32>,
    /// Global Channel Disable Register
    pub GD: WORegister<u32>,
    /// Global Channel Status Register
    pub GS: RORegister<u32>,
    /// Global Channel Read Suspend Register
    pub GRS: RWRegister<u32>,
    /// Global Channel Write Suspend Register
    pub GWS: RWRegister<u32>,
    /// Global Channel Read Write Suspend Register
    pub GRWS: WORegister<u32>,
    /// Global Channel Read Write Resume Register
    pub GRWR: WORegister<u32>,
    /// Global Channel Software Request Register
    pub GSWR: WORegister<u32>,
    /// Global Channel Software Request Status Register
    pub GSWS: RORegister<u32>,
    /// Global Channel Software Flush Request Register
    pub GSWF: WORegister<u32>,
    _reserved: [u32; 3],
    /// Per-channel register windows
    pub CHID: [ChannelRegisters; CHANNEL_COUNT],
}

// The first channel window sits at 0x50.
const _: () = assert!(core::mem::offset_of!(RegisterBlock, CHID) == 0x50);

/// One XDMAC channel's registers.
#[repr(C)]
pub struct ChannelRegisters {
    /// Channel Interrupt Enable Register
    pub CIE: WORegister<u32>,
    /// Channel Interrupt Disable Register
    pub CID: WORegister<u32>,
    /// Channel Interrupt Mask Register
    pub CIM: RORegister<u32>,
    /// Channel Interrupt Status Register (clear-on-read)
    pub CIS: RORegister<u32>,
    /// Channel Source Address Register
    pub CSA: RWRegister<u32>,
    /// Channel Destination Address Register
    pub CDA: RWRegister<u32>,
    /// Channel Next Descriptor Address Register
    pub CNDA: RWRegister<u32>,
    /// Channel Next Descriptor Control Register
    pub CNDC: RWRegister<u32>,
    /// Channel Microblock Control Register (units left to transfer)
    pub CUBC: RWRegister<u32>,
    /// Channel Block Control Register
    pub CBC: RWRegister<u32>,
    /// Channel Configuration Register
    pub CC: RWRegister<u32>,
    /// Channel Data Stride Memory Set Pattern Register
    pub CDS_MSP: RWRegister<u32>,
    /// Channel Source Microblock Stride Register
    pub CSUS: RWRegister<u32>,
    /// Channel Destination Microblock Stride Register
    pub CDUS: RWRegister<u32>,
    _reserved: [u32; 2],
}

const _: () = assert!(core::mem::size_of::<ChannelRegisters>() == 0x40);

impl ChannelRegisters {
    /// Block-end interrupt bit, shared by CIE/CID/CIM (BIE) and CIS (BIS).
    pub const BIE: u32 = 1 << 0;

    // CC field values for peripheral-synchronized single-microblock
    // byte transfers. The zero-valued fields are spelled out so the
    // configuration words below read like the datasheet.
    pub const CC_TYPE_PER_TRAN: u32 = 1 << 0;
    pub const CC_MBSIZE_SINGLE: u32 = 0 << 1;
    pub const CC_DSYNC_PER2MEM: u32 = 0 << 4;
    pub const CC_DSYNC_MEM2PER: u32 = 1 << 4;
    pub const CC_CSIZE_CHK_1: u32 = 0 << 8;
    pub const CC_DWIDTH_BYTE: u32 = 0 << 11;
    pub const CC_SIF_AHB_IF0: u32 = 0 << 13;
    pub const CC_SIF_AHB_IF1: u32 = 1 << 13;
    pub const CC_DIF_AHB_IF0: u32 = 0 << 14;
    pub const CC_DIF_AHB_IF1: u32 = 1 << 14;
    pub const CC_SAM_FIXED: u32 = 0 << 16;
    pub const CC_SAM_INCREMENTED: u32 = 1 << 16;
    pub const CC_DAM_FIXED: u32 = 0 << 18;
    pub const CC_DAM_INCREMENTED: u32 = 1 << 18;

    /// CC peripheral identifier field.
    pub const fn cc_perid(id: u8) -> u32 {
        (id as u32) << 24
    }
}
