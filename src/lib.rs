//! A hierarchical paged virtual-memory translator: byte-addressed reads and
//! writes against a virtual address space much larger than the physical
//! frame pool backing it, with on-demand page-table construction and a
//! three-priority frame-allocation/eviction policy (reclaim an empty table,
//! extend the high-water mark, or evict by cyclic distance).
//!
//! The translator is generic over a [`Backend`]: the physical frame array
//! and backing store are an external collaborator, not part of this crate's
//! core. [`ram::SimBackend`] is a ready-to-use in-memory implementation.

mod backend;
mod bits;
mod config;
mod error;
mod frame;
mod phys;
pub mod ram;
mod translator;
mod walker;

pub use backend::Backend;
pub use config::{Config, ConfigError, Word};
pub use error::AccessError;

/// A translator bound to one [`Config`] and one [`Backend`].
///
/// `Mmu` is the sole owner of its backend: every operation takes `&mut
/// self`, which is how this single-threaded, non-suspending design (spec.md
/// §5) is expressed in Rust — there is no lock to take because the borrow
/// checker already forbids concurrent access.
pub struct Mmu<B: Backend> {
    cfg: Config,
    backend: B,
}

impl<B: Backend> Mmu<B> {
    /// Initializes the translator: zeroes the root table (frame 0) and takes
    /// ownership of `backend`. Other frames need no explicit zeroing —
    /// priority 1 only ever runs against reachable frames, and priority 2
    /// hands out virgin frames that the translator itself zeroes (as a
    /// table) or restores (as a data leaf) before they are read.
    pub fn new(cfg: Config, mut backend: B) -> Self {
        phys::zero_fill(&cfg, &mut backend, walker::ROOT);
        Self { cfg, backend }
    }

    /// The configuration this translator was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// A reference to the underlying backend, e.g. to inspect a
    /// [`ram::SimBackend`]'s operation trace in tests.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads one word at `virtual_address`, faulting in any missing part of
    /// its translation path.
    ///
    /// # Errors
    /// Returns [`AccessError::OutOfRange`] if `virtual_address` is not in
    /// `[0, virtual_memory_size)`. No state changes on failure.
    pub fn read(&mut self, virtual_address: u64) -> Result<Word, AccessError> {
        self.validate(virtual_address)?;
        let address = translator::translate(&self.cfg, &mut self.backend, virtual_address);
        Ok(self.backend.read_word(address))
    }

    /// Writes `word` at `virtual_address`, faulting in any missing part of
    /// its translation path.
    ///
    /// # Errors
    /// Returns [`AccessError::OutOfRange`] if `virtual_address` is not in
    /// `[0, virtual_memory_size)`. No state changes on failure.
    pub fn write(&mut self, virtual_address: u64, word: Word) -> Result<(), AccessError> {
        self.validate(virtual_address)?;
        let address = translator::translate(&self.cfg, &mut self.backend, virtual_address);
        self.backend.write_word(address, word);
        Ok(())
    }

    fn validate(&self, virtual_address: u64) -> Result<(), AccessError> {
        if virtual_address >= self.cfg.virtual_memory_size() {
            return Err(AccessError::OutOfRange {
                virtual_address,
                virtual_memory_size: self.cfg.virtual_memory_size(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ram::SimBackend;

    fn mmu(offset_width: u32, num_frames: usize, tables_depth: u32, va_width: u32) -> Mmu<SimBackend> {
        let cfg = Config::new(offset_width, num_frames, tables_depth, va_width).unwrap();
        let backend = SimBackend::new(cfg.num_frames(), cfg.page_size());
        Mmu::new(cfg, backend)
    }

    #[test]
    fn fresh_read_is_zero() {
        let mut mmu = mmu(1, 8, 2, 3);
        assert_eq!(mmu.read(0).unwrap(), 0);
    }

    #[test]
    fn round_trip_within_one_page() {
        let mut mmu = mmu(1, 8, 2, 3);
        mmu.write(5, 42).unwrap();
        assert_eq!(mmu.read(5).unwrap(), 42);
    }

    #[test]
    fn out_of_range_address_is_rejected_without_side_effects() {
        let mut mmu = mmu(1, 8, 2, 3);
        let vms = mmu.config().virtual_memory_size();
        assert_eq!(
            mmu.read(vms),
            Err(AccessError::OutOfRange {
                virtual_address: vms,
                virtual_memory_size: vms,
            })
        );
        assert_eq!(mmu.backend().trace().len(), 0);
    }

    #[test]
    fn initialize_then_read_anywhere_is_zero() {
        let mut mmu = mmu(2, 10, 2, 6);
        for page in 0..4u64 {
            let va = page * mmu.config().page_size() as u64;
            assert_eq!(mmu.read(va).unwrap(), 0);
        }
    }
}
