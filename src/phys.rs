//! The physical-memory gateway. The only place in the crate that turns a
//! `(frame_index, row)` pair into a flat word address; every other module
//! reaches physical memory only through the helpers here.

use crate::backend::Backend;
use crate::config::{Config, Word};

#[must_use]
pub(crate) fn word_address(cfg: &Config, frame: usize, row: usize) -> u64 {
    frame as u64 * cfg.page_size as u64 + row as u64
}

#[must_use]
pub(crate) fn read_slot<B: Backend>(cfg: &Config, backend: &B, frame: usize, row: usize) -> Word {
    backend.read_word(word_address(cfg, frame, row))
}

pub(crate) fn write_slot<B: Backend>(
    cfg: &Config,
    backend: &mut B,
    frame: usize,
    row: usize,
    word: Word,
) {
    backend.write_word(word_address(cfg, frame, row), word);
}

/// Writes zero to every slot of `frame`. Used when a frame is about to serve
/// as a freshly allocated intermediate table.
pub(crate) fn zero_fill<B: Backend>(cfg: &Config, backend: &mut B, frame: usize) {
    for row in 0..cfg.page_size {
        write_slot(cfg, backend, frame, row, 0);
    }
}

/// `true` if every slot of `frame` is the "no child" sentinel.
#[must_use]
pub(crate) fn is_frame_empty<B: Backend>(cfg: &Config, backend: &B, frame: usize) -> bool {
    (0..cfg.page_size).all(|row| read_slot(cfg, backend, frame, row) == 0)
}
