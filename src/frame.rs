//! The frame acquirer: applies priorities 1 -> 2 -> 3 in order and returns a
//! frame usable for the next step of a translation. The returned frame's
//! contents are undefined; the caller must zero-fill it (intermediate
//! table) or restore it (leaf data page).

use crate::backend::Backend;
use crate::config::Config;
use crate::walker;

/// `original_frame` is the frame into whose slot the caller is about to
/// install the returned frame — protected from priority-1 reclamation.
/// `target_page` is the page being faulted in, used by priority 3 if it
/// fires.
pub(crate) fn acquire<B: Backend>(
    cfg: &Config,
    backend: &mut B,
    original_frame: usize,
    target_page: u64,
) -> usize {
    if let Some(frame) = walker::reclaim_empty_table(cfg, backend, original_frame) {
        log::debug!("frame acquirer: priority 1 reclaimed frame {frame}");
        return frame;
    }

    let max = walker::max_reachable_frame(cfg, backend);
    if max + 1 < cfg.num_frames() {
        log::debug!("frame acquirer: priority 2 extended high-water mark to frame {}", max + 1);
        return max + 1;
    }

    let victim = walker::select_victim(cfg, backend, target_page);
    log::warn!(
        "frame acquirer: priority 3 evicting page {} (frame {}, cyclic distance {}) to admit page {target_page}",
        victim.page,
        victim.frame,
        victim.distance,
    );
    backend.evict(victim.frame, victim.page);
    crate::phys::write_slot(cfg, backend, victim.parent, victim.parent_row, 0);
    victim.frame
}
