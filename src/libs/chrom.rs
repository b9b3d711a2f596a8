use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;

lazy_static! {
    static ref RE_NUMBER: Regex = Regex::new(r"\d+").unwrap();
}

/// The first integer embedded in a chromosome name.
///
/// ```
/// use circkit::libs::chrom::chr_number;
/// assert_eq!(chr_number("chr10"), Some(10));
/// assert_eq!(chr_number("hs2_random"), Some(2));
/// assert_eq!(chr_number("chrX"), None);
/// ```
pub fn chr_number(name: &str) -> Option<u64> {
    RE_NUMBER
        .find(name)
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Numeric-aware ordering of chromosome names.
///
/// Names are compared by their first embedded integer; names without one sort
/// after all numbered names. Remaining ties fall back to the name itself.
pub fn chr_cmp(a: &str, b: &str) -> Ordering {
    match (chr_number(a), chr_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// ```
/// let mut chrs = vec!["chrX", "chr10", "chr2", "chr1"];
/// circkit::libs::chrom::sort_chrs(&mut chrs);
/// assert_eq!(chrs, vec!["chr1", "chr2", "chr10", "chrX"]);
/// ```
pub fn sort_chrs<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by(|a, b| chr_cmp(a.as_ref(), b.as_ref()));
}
