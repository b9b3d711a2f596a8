use super::{Link, LinkEnd};
use crate::libs::chrom::{chr_cmp, sort_chrs};
use crate::libs::interval::BinGrid;
use fxhash::FxHashMap;
use indexmap::IndexSet;
use std::collections::BTreeMap;

/// Accumulated statistics of one `(source chr, bin, target chr)` triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Bases of link ends overlapping the bin
    pub size: u64,
    /// Links with a positive overlap
    pub n: u64,
}

impl Cell {
    pub fn add(&mut self, overlap: i64) {
        if overlap > 0 {
            self.size += overlap as u64;
            self.n += 1;
        }
    }

    pub fn merge(&mut self, other: &Cell) {
        self.size += other.size;
        self.n += other.n;
    }

    /// `n` when counting links, `size` otherwise.
    pub fn value(&self, num: bool) -> f64 {
        if num {
            self.n as f64
        } else {
            self.size as f64
        }
    }
}

/// All cells of one bin on a source chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct BinRow {
    pub chr: String,
    pub bin: i64,
    /// Per target chromosome, in numeric-aware order
    pub targets: Vec<(String, Cell)>,
}

impl BinRow {
    pub fn total(&self) -> Cell {
        let mut total = Cell::default();
        for (_, cell) in &self.targets {
            total.merge(cell);
        }
        total
    }
}

/// Sparse aggregation table keyed by `(source chr, bin, target chr)`.
#[derive(Debug, Default)]
pub struct LinkTable {
    cells: FxHashMap<(String, i64, String), Cell>,
    sources: IndexSet<String>,
    targets: IndexSet<String>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bins the selected ends of `link`.
    pub fn add(&mut self, link: &Link, grid: &BinGrid, link_end: LinkEnd) {
        for &e in link_end.ends() {
            let this = link.end(e);
            let other = link.other(e);

            for (bin, overlap) in grid.overlaps(this) {
                let cell = self
                    .cells
                    .entry((this.chr.clone(), bin, other.chr.clone()))
                    .or_default();
                cell.add(overlap);
            }

            if !self.sources.contains(&this.chr) {
                self.sources.insert(this.chr.clone());
            }
            if !self.targets.contains(&other.chr) {
                self.targets.insert(other.chr.clone());
            }
        }
    }

    pub fn cell(&self, source: &str, bin: i64, target: &str) -> Option<Cell> {
        self.cells
            .get(&(source.to_string(), bin, target.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Chromosomes seen on the binned side, numeric-aware sorted.
    pub fn sources(&self) -> Vec<String> {
        let mut chrs: Vec<String> = self.sources.iter().cloned().collect();
        sort_chrs(&mut chrs);
        chrs
    }

    /// Chromosomes seen on the opposite side, numeric-aware sorted.
    pub fn targets(&self) -> Vec<String> {
        let mut chrs: Vec<String> = self.targets.iter().cloned().collect();
        sort_chrs(&mut chrs);
        chrs
    }

    /// Rows ordered by source chromosome, then by ascending bin.
    pub fn rows(&self) -> Vec<BinRow> {
        let sources = self.sources();
        let rank: FxHashMap<&str, usize> = sources
            .iter()
            .enumerate()
            .map(|(i, chr)| (chr.as_str(), i))
            .collect();

        let mut grouped: BTreeMap<(usize, i64), Vec<(String, Cell)>> = BTreeMap::new();
        for ((source, bin, target), cell) in &self.cells {
            grouped
                .entry((rank[source.as_str()], *bin))
                .or_default()
                .push((target.clone(), *cell));
        }

        grouped
            .into_iter()
            .map(|((i, bin), mut targets)| {
                targets.sort_by(|a, b| chr_cmp(&a.0, &b.0));
                BinRow {
                    chr: sources[i].clone(),
                    bin,
                    targets,
                }
            })
            .collect()
    }
}
