//! Digital I/O and byte stream traits.

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::types::{Level, Pin};

/// Read and write pin levels.
pub trait DigitalIo {
    /// Drive an output pin.
    fn set_level(&mut self, pin: Pin, level: Level);

    /// Sample a pin.
    fn level(&self, pin: Pin) -> Level;

    /// Invert an output pin and return the new level.
    fn toggle(&mut self, pin: Pin) -> Level {
        let next = self.level(pin).toggled();
        self.set_level(pin, next);
        next
    }
}

/// A byte-oriented input stream such as a UART receiver.
pub trait ByteSource {
    /// Bytes that can be read without blocking.
    fn available(&self) -> usize;

    /// Read one byte, `None` when nothing is buffered.
    fn read_byte(&mut self) -> Option<u8>;
}

/// A byte source shared between a stream reaction and its callback.
///
/// The scheduler only borrows it to ask [`ByteSource::available`]; the
/// callback borrows it mutably to read.
pub type SharedSource = Rc<RefCell<dyn ByteSource>>;
