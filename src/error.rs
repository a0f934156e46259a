/// Error returned by [`crate::Mmu::read`] and [`crate::Mmu::write`].
///
/// This is the only failure the public API surfaces (spec.md §7, kind 1):
/// an out-of-range virtual address. Everything else — allocating frames,
/// evicting pages, restoring pages — always succeeds by construction once
/// the address has been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// `virtual_address` was not in `[0, virtual_memory_size)`.
    #[error(
        "virtual address {virtual_address:#x} is out of range (virtual memory size is {virtual_memory_size:#x})"
    )]
    OutOfRange {
        virtual_address: u64,
        virtual_memory_size: u64,
    },
}
