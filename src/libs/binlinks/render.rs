use super::{BinOpt, BinRow, LinkTable, OutputStyle};
use crate::libs::chrom::chr_cmp;
use crate::libs::interval::BinGrid;
use itertools::Itertools;

/// Numeric fields are printed with four decimals.
pub fn format_value(v: f64) -> String {
    format!("{:.4}", v)
}

/// Turns table rows into output lines.
///
/// Per target chromosome the value goes through these steps, in order:
/// intra-chromosomal contributions are zeroed (`remove_intra`), the value is
/// divided by the bin total (`normalize`, styles 1-3 only) and finally
/// replaced by its base-10 logarithm (`log`, zero stays zero).
pub struct Renderer<'a> {
    opt: &'a BinOpt,
    grid: BinGrid,
    targets: Vec<String>,
}

impl<'a> Renderer<'a> {
    pub fn new(opt: &'a BinOpt, table: &LinkTable) -> Self {
        Self {
            opt,
            grid: opt.grid(),
            targets: table.targets(),
        }
    }

    pub fn color(&self, chr: &str) -> String {
        format!("{}{}", self.opt.color_prefix, chr)
    }

    /// The `fill_color=` line of the stacked style, listing the colors of all
    /// target chromosomes in column order.
    pub fn header(&self) -> Option<String> {
        match self.opt.output_style {
            OutputStyle::Stacked => Some(format!(
                "fill_color={}",
                self.targets.iter().map(|chr| self.color(chr)).join(",")
            )),
            _ => None,
        }
    }

    /// Values of each target chromosome of `row`, before any scaling.
    pub fn contributions<'r>(&self, row: &'r BinRow) -> Vec<(&'r str, f64)> {
        row.targets
            .iter()
            .map(|(chr, cell)| {
                let v = if self.opt.remove_intra && *chr == row.chr {
                    0.0
                } else {
                    cell.value(self.opt.num)
                };
                (chr.as_str(), v)
            })
            .collect()
    }

    /// Contributions sorted by descending value.
    pub fn ranked<'r>(&self, row: &'r BinRow) -> Vec<(&'r str, f64)> {
        let mut values = self.contributions(row);
        values.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| chr_cmp(a.0, b.0)));
        values
    }

    fn scale(&self, v: f64) -> f64 {
        if self.opt.log && v != 0.0 {
            v.log10()
        } else {
            v
        }
    }

    fn share(&self, v: f64, total: f64) -> f64 {
        if self.opt.normalize && total != 0.0 {
            v / total
        } else {
            v
        }
    }

    pub fn render(&self, row: &BinRow) -> Vec<String> {
        let (start, end) = self.grid.bounds(row.bin);
        let prefix = format!("{} {} {}", row.chr, start, end);

        let ranked = self.ranked(row);
        let total: f64 = ranked.iter().map(|(_, v)| v).sum();

        match self.opt.output_style {
            OutputStyle::Total => {
                let value = format_value(self.scale(total));
                match ranked.first() {
                    Some((top, _)) if self.opt.color_by_chr => {
                        vec![format!("{} {} fill_color={}", prefix, value, self.color(top))]
                    }
                    _ => vec![format!("{} {}", prefix, value)],
                }
            }
            OutputStyle::TopTarget | OutputStyle::PerTarget => {
                let limit = if self.opt.output_style == OutputStyle::TopTarget {
                    1
                } else {
                    ranked.len()
                };
                ranked
                    .iter()
                    .take(limit)
                    .map(|(chr, v)| {
                        format!(
                            "{} {} fill_color={}",
                            prefix,
                            format_value(self.scale(self.share(*v, total))),
                            self.color(chr)
                        )
                    })
                    .collect()
            }
            OutputStyle::Stacked => {
                let contributions = self.contributions(row);
                let values = self
                    .targets
                    .iter()
                    .map(|target| {
                        let v = contributions
                            .iter()
                            .find(|(chr, _)| *chr == target.as_str())
                            .map_or(0.0, |(_, v)| *v);
                        format_value(self.scale(self.share(v, total)))
                    })
                    .join(",");
                vec![format!("{} {}", prefix, values)]
            }
        }
    }
}
