use crate::config::Word;

/// The physical-memory and backing-store operations the translator consumes.
///
/// This is the seam between the core (bit decoder, tree walker, frame
/// acquirer, translator) and whatever actually holds the bytes — a real
/// simulator, a test double, or (in a production port) a real disk. The
/// translator never reasons about frame/row pairs past this trait; every
/// call already carries a flat word address computed by the physical-memory
/// gateway (`crate::phys`).
///
/// All four operations are total: there is no error kind in this design for
/// a failing read, write, evict or restore (spec.md §7, kind 3).
pub trait Backend {
    /// Reads the word stored at `address`.
    fn read_word(&self, address: u64) -> Word;

    /// Writes `word` at `address`.
    fn write_word(&mut self, address: u64, word: Word);

    /// Persists the contents of `frame` to the backing store under `page`.
    fn evict(&mut self, frame: usize, page: u64);

    /// Loads the contents of `page` from the backing store into `frame`.
    /// On first touch of a page the backing store yields a zero-filled page.
    fn restore(&mut self, frame: usize, page: u64);
}
