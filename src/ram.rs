//! A concrete, in-process [`Backend`]: a flat array standing in for
//! physical RAM, and a `HashMap` keyed by page number standing in for the
//! disk-like backing store. Grounded on the fake `FrameAlloc`/`PhysMapper`
//! test doubles used in the example pack's own `kernel-vmem` unit tests —
//! same idea, promoted to a first-class, reusable type because this crate's
//! "external module" genuinely has no other implementation to reach for.

use std::collections::HashMap;

use crate::backend::Backend;
use crate::config::Word;

/// One observed call into the backing store, recorded in traversal order.
/// Exposed so tests can assert the op-trace properties of spec.md §8 (P5,
/// P6, P7) without re-deriving tree state by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    Evict { frame: usize, page: u64 },
    Restore { frame: usize, page: u64 },
}

/// An in-memory [`Backend`] useful for tests and for embedding a translator
/// in a larger simulation.
pub struct SimBackend {
    ram: Vec<Word>,
    page_size: usize,
    disk: HashMap<u64, Vec<Word>>,
    trace: Vec<TraceEvent>,
}

impl SimBackend {
    /// Builds a backend with `num_frames * page_size` physical words, all
    /// zero, and an empty backing store.
    #[must_use]
    pub fn new(num_frames: usize, page_size: usize) -> Self {
        Self {
            ram: vec![0; num_frames * page_size],
            page_size,
            disk: HashMap::new(),
            trace: Vec::new(),
        }
    }

    /// The operations recorded so far, oldest first.
    #[must_use]
    pub fn trace(&self) -> &[TraceEvent] {
        &self.trace
    }

    /// Number of times `evict` has been called for `page`.
    #[must_use]
    pub fn evict_count(&self, page: u64) -> usize {
        self.trace
            .iter()
            .filter(|event| matches!(event, TraceEvent::Evict { page: p, .. } if *p == page))
            .count()
    }
}

impl Backend for SimBackend {
    fn read_word(&self, address: u64) -> Word {
        self.ram[address as usize]
    }

    fn write_word(&mut self, address: u64, word: Word) {
        self.ram[address as usize] = word;
    }

    fn evict(&mut self, frame: usize, page: u64) {
        let start = frame * self.page_size;
        let page_words = self.ram[start..start + self.page_size].to_vec();
        self.disk.insert(page, page_words);
        self.trace.push(TraceEvent::Evict { frame, page });
    }

    fn restore(&mut self, frame: usize, page: u64) {
        let start = frame * self.page_size;
        match self.disk.get(&page) {
            Some(words) => self.ram[start..start + self.page_size].copy_from_slice(words),
            None => self.ram[start..start + self.page_size].fill(0),
        }
        self.trace.push(TraceEvent::Restore { frame, page });
    }
}
