//! DMA transfer channels.
//!
//! A [`Channel`] moves bytes between memory and one direction of one
//! serial peripheral. It tracks up to two buffers: the one the hardware
//! is actively draining or filling, and (where the controller supports
//! it) one queued buffer that the hardware promotes when the active
//! count reaches zero. Occupancy is always read back from the count
//! registers, never mirrored in software, so the view from an interrupt
//! handler and from thread context can't diverge.

use core::sync::atomic;

cfg_if::cfg_if! {
    if #[cfg(feature = "xdmac")] {
        mod xdmac;
        pub use xdmac::Channel;
    } else {
        mod pdc;
        pub use pdc::Channel;
    }
}

/// The direction a channel serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Peripheral to memory.
    Receive,
    /// Memory to peripheral.
    Transmit,
}

impl Channel {
    /// Returns the direction this channel serves.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Put the channel into a known idle state.
    ///
    /// Disables the channel's direction, then zeroes the active and
    /// queued transfer registers, in that order; stale counts would
    /// otherwise corrupt the next transfer. Call `reset` on both of a
    /// peripheral's channels during initialization. Idempotent.
    pub fn reset(&mut self) {
        self.reset_impl();
    }

    /// Schedule a transfer of `length` bytes at `buffer`.
    ///
    /// If the active slot is free, the transfer starts immediately and
    /// `start` returns `true`. Otherwise, when `queue_next` is set and
    /// the controller keeps a queued slot (see [`SUPPORTS_QUEUEING`]),
    /// the buffer is queued behind the active transfer. A return of
    /// `false` with nonzero `length` means both slots are occupied:
    /// retry after a transfer completes.
    ///
    /// A `length` of zero never starts or queues anything and always
    /// returns `false`.
    ///
    /// When `handle_interrupts` is set, the completion interrupt is
    /// disarmed before the active registers change and rearmed after,
    /// so the handler can't observe a half-written descriptor. Pass
    /// `false` if the calling driver polls instead.
    ///
    /// [`SUPPORTS_QUEUEING`]: Self::SUPPORTS_QUEUEING
    ///
    /// # Safety
    ///
    /// `buffer` must point to `length` bytes that remain valid, and for
    /// receive channels unaliased, until this channel reports the
    /// transfer done. The buffer must not move. `length` must fit the
    /// controller's count register.
    pub unsafe fn start(
        &mut self,
        buffer: *const u8,
        length: u32,
        handle_interrupts: bool,
        queue_next: bool,
    ) -> bool {
        if self.is_done(false) {
            if handle_interrupts {
                self.set_interrupt_on_completion(false);
            }
            self.set_current_impl(buffer, length);
            if length == 0 {
                return false;
            }
            if handle_interrupts {
                self.set_interrupt_on_completion(true);
            }
            // Make buffer writes visible before the controller can read them.
            atomic::fence(atomic::Ordering::SeqCst);
            self.enable();
            true
        } else if queue_next && Self::SUPPORTS_QUEUEING && length != 0 && self.is_done_next() {
            // The active transfer keeps running with its interrupt
            // configuration untouched.
            self.set_next_impl(buffer, length);
            true
        } else {
            false
        }
    }

    /// Bytes left in the active transfer, plus the queued transfer's
    /// full length when `include_next` is set.
    pub fn remaining(&self, include_next: bool) -> u32 {
        if include_next {
            self.remaining_impl() + self.remaining_next_impl()
        } else {
            self.remaining_impl()
        }
    }

    /// Bytes in the queued slot. Always zero once the hardware promotes
    /// the queued transfer, and always zero on controllers without a
    /// queued slot.
    pub fn remaining_next(&self) -> u32 {
        self.remaining_next_impl()
    }

    /// Returns `true` if the active transfer (and, with `include_next`,
    /// the queued one) has fully completed.
    ///
    /// Safe to call from the completion interrupt handler.
    pub fn is_done(&self, include_next: bool) -> bool {
        self.remaining(include_next) == 0
    }

    /// Returns `true` if the queued slot is empty.
    pub fn is_done_next(&self) -> bool {
        self.remaining_next() == 0
    }

    /// The hardware's current position in the active buffer.
    ///
    /// Useful for inspecting a partially filled receive buffer without
    /// waiting for completion.
    pub fn transfer_position(&self) -> *const u8 {
        self.position_impl()
    }

    /// Enable this channel's direction.
    ///
    /// `start` enables the channel itself; use this for driver-level
    /// flow control after a `disable`.
    ///
    /// # Safety
    ///
    /// This may resume a transfer using whatever buffer registers hold.
    /// Caller must ensure they still describe valid memory.
    pub unsafe fn enable(&self) {
        self.enable_impl();
    }

    /// Disable this channel's direction, pausing transfers.
    pub fn disable(&self) {
        self.disable_impl();
    }

    /// Returns `true` if this channel's direction is enabled.
    pub fn is_enabled(&self) -> bool {
        self.is_enabled_impl()
    }

    /// Unconditionally abort the active and queued transfers.
    ///
    /// Zeroes the queued count, then the active count. Bytes the
    /// hardware already moved stay moved; sample [`remaining`] or
    /// [`transfer_position`] beforehand if you need the tally. After a
    /// flush the channel accepts a new `start` immediately.
    ///
    /// [`remaining`]: Self::remaining
    /// [`transfer_position`]: Self::transfer_position
    pub fn flush(&mut self) {
        self.flush_impl();
    }

    /// Enable or disable interrupt generation when the transfer completes
    ///
    /// You're responsible for registering your interrupt handler.
    pub fn set_interrupt_on_completion(&mut self, intr: bool) {
        self.set_interrupt_on_completion_impl(intr);
    }

    /// Returns `true` if this channel's completion interrupt is armed
    /// and its condition is raised.
    ///
    /// Call from a shared interrupt handler to attribute the interrupt
    /// to this channel.
    pub fn is_interrupt(&self) -> bool {
        self.is_interrupt_impl()
    }
}

// It's OK to send a channel across an execution context.
// They can't be cloned or copied, so there's no chance of
// them being (mutably) shared.
unsafe impl Send for Channel {}
