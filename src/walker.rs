//! The tree walker: one depth-first-traversal shape, specialised three ways
//! by the frame acquirer (`crate::frame`) into the three eviction
//! priorities. Traversal order is always depth-first, children visited by
//! increasing row index, which is what makes priority 1's "first qualifying
//! frame" and priority 3's tie-break ("first maximum wins") deterministic.

use crate::backend::Backend;
use crate::bits;
use crate::config::Config;
use crate::phys;

pub(crate) const ROOT: usize = 0;

/// Priority 1: find a reachable, non-root table frame that is empty and is
/// not `protected` (the frame whose slot the current fault is about to
/// write into), detach it from its parent, and return it.
///
/// The search never descends into `protected`'s own subtree: once the walk
/// reaches `protected`, it stops right there, even if `protected` itself (or
/// something below it) turns out to be empty. `protected` is, by
/// definition, the frame the in-progress fault is still using as a parent;
/// reclaiming anything under it would sever that walk. Frames written by
/// earlier levels of the same fault are reachable from the root through a
/// different path and are therefore still eligible.
pub(crate) fn reclaim_empty_table<B: Backend>(
    cfg: &Config,
    backend: &mut B,
    protected: usize,
) -> Option<usize> {
    fn visit<B: Backend>(
        cfg: &Config,
        backend: &mut B,
        current: usize,
        parent: usize,
        parent_row: usize,
        depth: u32,
        protected: usize,
    ) -> Option<usize> {
        if depth == cfg.tables_depth || current == protected {
            return None;
        }
        if phys::is_frame_empty(cfg, backend, current) {
            if current == ROOT {
                return None;
            }
            phys::write_slot(cfg, backend, parent, parent_row, 0);
            return Some(current);
        }
        for row in 0..cfg.page_size {
            let child = phys::read_slot(cfg, backend, current, row);
            if child == 0 {
                continue;
            }
            if let Some(found) = visit(
                cfg,
                backend,
                child as usize,
                current,
                row,
                depth + 1,
                protected,
            ) {
                return Some(found);
            }
        }
        None
    }

    visit(cfg, backend, ROOT, ROOT, 0, 0, protected)
}

/// Priority 2: the highest frame index reachable from the root, including
/// the root itself. The caller compares `result + 1` against `NUM_FRAMES`.
pub(crate) fn max_reachable_frame<B: Backend>(cfg: &Config, backend: &mut B) -> usize {
    fn visit<B: Backend>(cfg: &Config, backend: &mut B, current: usize, depth: u32) -> usize {
        let mut max = current;
        if depth == cfg.tables_depth {
            return max;
        }
        for row in 0..cfg.page_size {
            let child = phys::read_slot(cfg, backend, current, row);
            if child == 0 {
                continue;
            }
            let candidate = visit(cfg, backend, child as usize, depth + 1);
            if candidate > max {
                max = candidate;
            }
        }
        max
    }

    visit(cfg, backend, ROOT, 0)
}

/// A resident leaf considered as a priority-3 eviction candidate.
pub(crate) struct Victim {
    pub parent: usize,
    pub parent_row: usize,
    pub frame: usize,
    pub page: u64,
    pub distance: u64,
}

/// Priority 3: walk every path to depth `TABLES_DEPTH`, and pick the
/// resident page whose cyclic distance from `swap_in_page` is largest. Ties
/// keep the first (shallowest-disagreement, lowest-row) maximum found by the
/// depth-first walk.
///
/// # Panics
/// Panics if no resident leaf exists. The frame-acquirer contract (and the
/// `NUM_FRAMES >= TABLES_DEPTH + 1` configuration constraint) guarantees this
/// is unreachable: priority 3 only runs once priorities 1 and 2 have both
/// failed, which means every frame is in use and at least one of them is a
/// data leaf.
pub(crate) fn select_victim<B: Backend>(cfg: &Config, backend: &mut B, swap_in_page: u64) -> Victim {
    fn visit<B: Backend>(
        cfg: &Config,
        backend: &mut B,
        current: usize,
        parent: usize,
        parent_row: usize,
        page: u64,
        depth: u32,
        swap_in_page: u64,
    ) -> Option<Victim> {
        if depth == cfg.tables_depth {
            return Some(Victim {
                parent,
                parent_row,
                frame: current,
                page,
                distance: bits::cyclic_distance(cfg, page, swap_in_page),
            });
        }
        let mut best: Option<Victim> = None;
        for row in 0..cfg.page_size {
            let child = phys::read_slot(cfg, backend, current, row);
            if child == 0 {
                continue;
            }
            let candidate_page = bits::extend_page(cfg, page, row);
            if let Some(candidate) = visit(
                cfg,
                backend,
                child as usize,
                current,
                row,
                candidate_page,
                depth + 1,
                swap_in_page,
            ) {
                let better = match &best {
                    None => true,
                    Some(b) => candidate.distance > b.distance,
                };
                if better {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    visit(cfg, backend, ROOT, ROOT, 0, 0, 0, swap_in_page)
        .expect("at least one resident data leaf must exist once priorities 1 and 2 fail")
}
