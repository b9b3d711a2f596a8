//! Binning of link ends into fixed-size genomic bins, for density tracks.

mod error;
mod link;
mod render;
mod table;

pub use error::BinError;
pub use link::{Link, LinkReader};
pub use render::{format_value, Renderer};
pub use table::{BinRow, Cell, LinkTable};

use crate::libs::interval::BinGrid;
use std::io::BufRead;

/// Which ends of a link are binned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEnd {
    Source,
    Target,
    Both,
}

impl LinkEnd {
    pub fn ends(&self) -> &'static [usize] {
        match self {
            LinkEnd::Source => &[0],
            LinkEnd::Target => &[1],
            LinkEnd::Both => &[0, 1],
        }
    }
}

impl TryFrom<u8> for LinkEnd {
    type Error = BinError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LinkEnd::Source),
            1 => Ok(LinkEnd::Target),
            2 => Ok(LinkEnd::Both),
            _ => Err(BinError::config(format!(
                "link_end must be 0, 1 or 2, got {}",
                value
            ))),
        }
    }
}

/// Layout of the output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// One line per bin with the bin total
    Total,
    /// One line per bin for the top target chromosome
    TopTarget,
    /// One line per bin and target chromosome
    PerTarget,
    /// One line per bin, values of all target chromosomes comma-joined
    Stacked,
}

impl TryFrom<u8> for OutputStyle {
    type Error = BinError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OutputStyle::Total),
            1 => Ok(OutputStyle::TopTarget),
            2 => Ok(OutputStyle::PerTarget),
            3 => Ok(OutputStyle::Stacked),
            _ => Err(BinError::config(format!(
                "output_style must be 0, 1, 2 or 3, got {}",
                value
            ))),
        }
    }
}

/// Options of a binning run. Immutable once validated.
#[derive(Debug, Clone, PartialEq)]
pub struct BinOpt {
    pub bin_size: f64,
    pub link_end: LinkEnd,
    pub min_link_size: Option<f64>,
    pub max_link_size: Option<f64>,
    pub output_style: OutputStyle,
    pub color_by_chr: bool,
    pub color_prefix: String,
    pub normalize: bool,
    pub num: bool,
    pub remove_intra: bool,
    pub log: bool,
    pub debug: u8,
}

impl BinOpt {
    pub fn new(bin_size: f64) -> Self {
        Self {
            bin_size,
            link_end: LinkEnd::Both,
            min_link_size: None,
            max_link_size: None,
            output_style: OutputStyle::Total,
            color_by_chr: false,
            color_prefix: String::new(),
            normalize: false,
            num: false,
            remove_intra: false,
            log: false,
            debug: 0,
        }
    }

    pub fn validate(&self) -> Result<(), BinError> {
        if !self.bin_size.is_finite() || self.bin_size <= 0.0 {
            return Err(BinError::config(format!(
                "bin_size must be a positive number, got {}",
                self.bin_size
            )));
        }
        for (name, bound) in [
            ("min_link_size", self.min_link_size),
            ("max_link_size", self.max_link_size),
        ] {
            if let Some(v) = bound {
                if v.is_nan() || v < 0.0 {
                    return Err(BinError::config(format!(
                        "{} must not be negative, got {}",
                        name, v
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_link_size, self.max_link_size) {
            if min >= max {
                return Err(BinError::config(format!(
                    "min_link_size ({}) must be smaller than max_link_size ({})",
                    min, max
                )));
            }
        }
        Ok(())
    }

    pub fn grid(&self) -> BinGrid {
        BinGrid::new(self.bin_size)
    }

    /// Size filter on both ends: `min_link_size <= size < max_link_size`.
    pub fn accepts(&self, link: &Link) -> bool {
        link.ends.iter().all(|end| {
            let size = end.cardinality() as f64;
            self.min_link_size.map_or(true, |min| size >= min)
                && self.max_link_size.map_or(true, |max| size < max)
        })
    }
}

/// Reads every link from `reader` into a new table.
///
/// Malformed lines are logged and skipped, I/O errors abort.
pub fn aggregate<R: BufRead>(reader: R, opt: &BinOpt) -> Result<LinkTable, BinError> {
    let grid = opt.grid();
    let mut table = LinkTable::new();
    let mut skipped = 0usize;

    for result in LinkReader::new(reader) {
        let link = match result {
            Ok(link) => link,
            Err(e) if e.is_recoverable() => {
                log::warn!("{}", e);
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        if !opt.accepts(&link) {
            log::trace!("filtered link {}", link);
            continue;
        }
        log::trace!("link {}", link);
        table.add(&link, &grid, opt.link_end);
    }

    if skipped > 0 {
        log::warn!("skipped {} malformed records", skipped);
    }
    log::debug!(
        "{} cells, {} source and {} target chromosomes",
        table.len(),
        table.sources().len(),
        table.targets().len()
    );

    Ok(table)
}
