//! Pure address-decomposition arithmetic. Nothing here touches physical
//! memory; every function is a total function of its inputs.

use crate::config::Config;

/// `virtual_address >> OFFSET_WIDTH`.
#[must_use]
pub(crate) fn page_number_of(cfg: &Config, va: u64) -> u64 {
    va >> cfg.offset_width
}

/// `virtual_address & (PAGE_SIZE - 1)`.
#[must_use]
pub(crate) fn offset_of(cfg: &Config, va: u64) -> u64 {
    va & (cfg.page_size as u64 - 1)
}

/// The `OFFSET_WIDTH`-bit slice of `va` selecting a row at tree depth
/// `level`, where `level` is in `[0, TABLES_DEPTH)`.
#[must_use]
pub(crate) fn page_index(cfg: &Config, va: u64, level: u32) -> usize {
    let shift = cfg.offset_width * (cfg.tables_depth - level);
    let mask = cfg.page_size as u64 - 1;
    ((va >> shift) & mask) as usize
}

/// Appends `row` as the next low-order `OFFSET_WIDTH` bits of `partial`,
/// used while descending the tree to accumulate the page number of the leaf
/// currently under inspection.
#[must_use]
pub(crate) fn extend_page(cfg: &Config, partial: u64, row: usize) -> u64 {
    (partial << cfg.offset_width) | row as u64
}

/// `min(|p - q|, num_pages - |p - q|)`.
#[must_use]
pub(crate) fn cyclic_distance(cfg: &Config, p: u64, q: u64) -> u64 {
    let d = p.abs_diff(q);
    d.min(cfg.num_pages - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    // offset_width * (tables_depth + 1) = virtual_address_width, so every
    // page number is fully decoded by the tree with no aliasing.
    fn cfg() -> Config {
        Config::new(1, 8, 3, 4).unwrap()
    }

    #[test]
    fn splits_offset_and_page_number() {
        let cfg = cfg();
        assert_eq!(page_number_of(&cfg, 13), 6);
        assert_eq!(offset_of(&cfg, 13), 1);
    }

    #[test]
    fn page_index_matches_each_level() {
        let cfg = cfg();
        // va = 0b1101 = 13, offset_width=1, tables_depth=3 -> level0 bit3, level1 bit2, level2 bit1
        assert_eq!(page_index(&cfg, 0b1101, 0), 0b1);
        assert_eq!(page_index(&cfg, 0b1101, 1), 0b1);
        assert_eq!(page_index(&cfg, 0b1101, 2), 0b0);
    }

    #[test]
    fn extend_page_rebuilds_the_page_number() {
        let cfg = cfg();
        let page = page_number_of(&cfg, 13);
        let top = page_index(&cfg, 13, 0);
        let mid = page_index(&cfg, 13, 1);
        let bottom = page_index(&cfg, 13, 2);
        let rebuilt = extend_page(&cfg, extend_page(&cfg, extend_page(&cfg, 0, top), mid), bottom);
        assert_eq!(rebuilt, page);
    }

    #[test]
    fn cyclic_distance_wraps() {
        let cfg = cfg(); // num_pages = 8
        assert_eq!(cyclic_distance(&cfg, 7, 0), 1);
        assert_eq!(cyclic_distance(&cfg, 0, 4), 4);
        assert_eq!(cyclic_distance(&cfg, 2, 7), 3);
    }
}
