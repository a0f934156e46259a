//! Drives the walk for one virtual address: descends the page-table tree,
//! invoking the frame acquirer on every missing link, and restores the data
//! page from the backing store as soon as the leaf is installed.

use crate::backend::Backend;
use crate::bits;
use crate::config::Config;
use crate::frame;
use crate::phys;
use crate::walker::ROOT;

/// Translates `va` to a physical word address, materializing any missing
/// part of the path along the way.
///
/// Ordering contract (spec.md §5): within one call, every physical-memory
/// operation performed by the tree walk happens before the victim (if any)
/// is evicted, which happens before the parent slot is overwritten with the
/// newly acquired frame, which happens before `restore` (if the new frame is
/// a data leaf). Reordering the parent-slot write ahead of eviction would
/// corrupt the tree.
pub(crate) fn translate<B: Backend>(cfg: &Config, backend: &mut B, va: u64) -> u64 {
    let page_number = bits::page_number_of(cfg, va);
    let mut current = ROOT;

    for level in 0..cfg.tables_depth {
        let idx = bits::page_index(cfg, va, level);
        let mut next = phys::read_slot(cfg, backend, current, idx);

        if next == 0 {
            log::trace!("page fault: va={va:#x} level={level} parent={current}");
            let acquired = frame::acquire(cfg, backend, current, page_number);

            if level < cfg.tables_depth - 1 {
                phys::zero_fill(cfg, backend, acquired);
            }

            phys::write_slot(cfg, backend, current, idx, acquired as _);

            if level == cfg.tables_depth - 1 {
                backend.restore(acquired, page_number);
            }

            next = acquired as _;
        }

        current = next as usize;
    }

    phys::word_address(cfg, current, bits::offset_of(cfg, va) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ram::SimBackend;

    fn cfg() -> Config {
        Config::new(1, 8, 2, 3).unwrap()
    }

    #[test]
    fn translate_installs_the_full_path_on_first_touch() {
        let cfg = cfg();
        let mut backend = SimBackend::new(cfg.num_frames(), cfg.page_size());
        let address = translate(&cfg, &mut backend, 5);

        let table_frame = phys::read_slot(&cfg, &mut backend, ROOT, bits::page_index(&cfg, 5, 0));
        assert_ne!(table_frame, 0, "level 0 must have installed a table frame");
        let leaf_frame = phys::read_slot(&cfg, &mut backend, table_frame as usize, bits::page_index(&cfg, 5, 1));
        assert_ne!(leaf_frame, 0, "level 1 must have installed a leaf frame");
        assert_eq!(
            address,
            phys::word_address(&cfg, leaf_frame as usize, bits::offset_of(&cfg, 5) as usize)
        );
        assert_eq!(backend.read_word(address), 0, "a freshly restored page reads as zero");
    }

    #[test]
    fn translating_an_installed_page_again_causes_no_new_fault() {
        let cfg = cfg();
        let mut backend = SimBackend::new(cfg.num_frames(), cfg.page_size());
        let first = translate(&cfg, &mut backend, 5);
        backend.write_word(first, 77);
        let trace_len_after_first = backend.trace().len();

        let second = translate(&cfg, &mut backend, 5);
        assert_eq!(second, first);
        assert_eq!(backend.read_word(second), 77);
        assert_eq!(
            backend.trace().len(),
            trace_len_after_first,
            "no eviction or restore should happen on an already-resident page"
        );
    }

    #[test]
    fn sibling_pages_share_the_parent_table() {
        let cfg = cfg(); // tables_depth=2, offset_width=1: pages 2 and 3 share the top index
        let mut backend = SimBackend::new(cfg.num_frames(), cfg.page_size());
        let a = translate(&cfg, &mut backend, 4); // page 2
        let b = translate(&cfg, &mut backend, 6); // page 3

        let parent_a = phys::read_slot(&cfg, &mut backend, ROOT, bits::page_index(&cfg, 4, 0));
        let parent_b = phys::read_slot(&cfg, &mut backend, ROOT, bits::page_index(&cfg, 6, 0));
        assert_eq!(parent_a, parent_b, "pages 2 and 3 must resolve through the same table frame");
        assert_ne!(a, b);
    }
}
