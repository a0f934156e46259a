/// A single physical-memory word. Wide enough to hold a frame index for any
/// `Config` accepted by [`Config::new`].
pub type Word = i64;

/// Runtime-checked geometry of one translator instance.
///
/// The original design treats `OFFSET_WIDTH`, `PAGE_SIZE`, `NUM_FRAMES`,
/// `TABLES_DEPTH` and `VIRTUAL_ADDRESS_WIDTH` as compile-time constants
/// provided by the host environment. Here they are validated fields on a
/// value type instead, so a single binary can exercise the many different
/// geometries used by the testable scenarios without recompiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub(crate) offset_width: u32,
    pub(crate) page_size: usize,
    pub(crate) num_frames: usize,
    pub(crate) tables_depth: u32,
    pub(crate) num_pages: u64,
    pub(crate) virtual_memory_size: u64,
}

impl Config {
    /// Builds a [`Config`], checking the constraints spec.md §6 places on
    /// the host-provided constants.
    ///
    /// # Errors
    /// - [`ConfigError::TooFewFrames`] if `num_frames < tables_depth + 1`
    ///   (the frame acquirer's priority 3 needs at least one resident leaf
    ///   to always have a victim to evict).
    /// - [`ConfigError::NarrowAddressWidth`] if `virtual_address_width <
    ///   offset_width`.
    /// - [`ConfigError::Overflow`] if `tables_depth * offset_width` or the
    ///   derived `virtual_memory_size` would not fit in a `u64`.
    pub fn new(
        offset_width: u32,
        num_frames: usize,
        tables_depth: u32,
        virtual_address_width: u32,
    ) -> Result<Self, ConfigError> {
        if tables_depth == 0 || offset_width == 0 {
            return Err(ConfigError::Overflow {
                bits: u128::from(tables_depth) * u128::from(offset_width),
            });
        }

        let min_frames = tables_depth as usize + 1;
        if num_frames < min_frames {
            return Err(ConfigError::TooFewFrames {
                num_frames,
                min: min_frames,
            });
        }

        if virtual_address_width < offset_width {
            return Err(ConfigError::NarrowAddressWidth {
                virtual_address_width,
                offset_width,
            });
        }

        let table_bits = u128::from(tables_depth) * u128::from(offset_width);
        // `bits::page_index` shifts a `u64` virtual address right by up to
        // `table_bits` (the shift is maximal at level 0). A shift of 64 or
        // more on a `u64` is exactly the case that must never reach there.
        if table_bits > u128::from(virtual_address_width) || table_bits >= 64 {
            return Err(ConfigError::Overflow { bits: table_bits });
        }

        let page_size_bits = u128::from(offset_width);
        if page_size_bits >= 64 {
            return Err(ConfigError::Overflow {
                bits: page_size_bits,
            });
        }
        let page_size = 1usize << offset_width;

        let num_pages_bits = u128::from(virtual_address_width - offset_width);
        if num_pages_bits >= 64 {
            return Err(ConfigError::Overflow {
                bits: num_pages_bits,
            });
        }
        let num_pages = 1u64 << (virtual_address_width - offset_width);

        let virtual_memory_size = u128::from(page_size as u64) * u128::from(num_pages);
        let virtual_memory_size = u64::try_from(virtual_memory_size).map_err(|_| {
            ConfigError::Overflow {
                bits: u128::from(virtual_address_width),
            }
        })?;

        Ok(Self {
            offset_width,
            page_size,
            num_frames,
            tables_depth,
            num_pages,
            virtual_memory_size,
        })
    }

    /// Words per frame / bytes of offset addressable within one page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Physical frames available.
    #[must_use]
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Depth of the page-table tree.
    #[must_use]
    pub fn tables_depth(&self) -> u32 {
        self.tables_depth
    }

    /// Number of distinct pages in the virtual address space.
    #[must_use]
    pub fn num_pages(&self) -> u64 {
        self.num_pages
    }

    /// `PAGE_SIZE * NUM_PAGES`, the exclusive upper bound on a valid virtual
    /// address.
    #[must_use]
    pub fn virtual_memory_size(&self) -> u64 {
        self.virtual_memory_size
    }
}

/// Error returned when constructing an invalid [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Fewer physical frames than the frame acquirer can ever need; priority
    /// 3 would have no resident leaf left to evict.
    #[error("num_frames ({num_frames}) must be at least tables_depth + 1 ({min})")]
    TooFewFrames { num_frames: usize, min: usize },

    /// The virtual address is narrower than a single page offset.
    #[error(
        "virtual_address_width ({virtual_address_width}) is narrower than offset_width ({offset_width})"
    )]
    NarrowAddressWidth {
        virtual_address_width: u32,
        offset_width: u32,
    },

    /// The geometry would require arithmetic wider than a `u64`.
    #[error("configuration requires {bits} bits, which does not fit in a u64")]
    Overflow { bits: u128 },
}
