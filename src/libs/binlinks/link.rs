use super::BinError;
use crate::libs::interval::GenomicInterval;
use std::fmt;
use std::io::BufRead;

/// Two genomic intervals joined by a link. `ends[0]` is the source end and
/// `ends[1]` the target end, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Option<String>,
    pub ends: [GenomicInterval; 2],
}

impl Link {
    pub fn new(id: Option<&str>, source: GenomicInterval, target: GenomicInterval) -> Self {
        Self {
            id: id.map(|s| s.to_string()),
            ends: [source, target],
        }
    }

    pub fn end(&self, e: usize) -> &GenomicInterval {
        &self.ends[e]
    }

    /// The end opposite to `e`.
    pub fn other(&self, e: usize) -> &GenomicInterval {
        &self.ends[1 - e]
    }

}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id.as_deref().unwrap_or("-"))?;
        for end in &self.ends {
            write!(f, " {}:{}-{}", end.chr, end.start, end.end)?;
        }
        Ok(())
    }
}

/// One line of the two-line form: `id chr start end [options]`
#[derive(Debug, Clone)]
struct Half {
    line: usize,
    id: String,
    interval: GenomicInterval,
}

fn parse_coord(field: &str, line: usize) -> Result<i64, BinError> {
    field
        .parse::<i64>()
        .map_err(|_| BinError::malformed(line, format!("invalid coordinate '{}'", field)))
}

fn parse_interval(fields: &[&str], line: usize) -> Result<GenomicInterval, BinError> {
    let start = parse_coord(fields[1], line)?;
    let end = parse_coord(fields[2], line)?;
    Ok(GenomicInterval::new(fields[0], start, end))
}

/// Single-line form, either `id chr1 s1 e1 chr2 s2 e2` or the id-less
/// `chr1 s1 e1 chr2 s2 e2 [options]`.
fn parse_single(fields: &[&str], line: usize) -> Result<Link, BinError> {
    let has_id = fields.len() >= 7
        && fields[3].parse::<i64>().is_ok()
        && fields[6].parse::<i64>().is_ok();

    let (id, rest) = if has_id {
        (Some(fields[0]), &fields[1..])
    } else {
        (None, fields)
    };

    let source = parse_interval(&rest[0..3], line)?;
    let target = parse_interval(&rest[3..6], line)?;
    Ok(Link::new(id, source, target))
}

fn parse_half(fields: &[&str], line: usize) -> Result<Half, BinError> {
    Ok(Half {
        line,
        id: fields[0].to_string(),
        interval: parse_interval(&fields[1..4], line)?,
    })
}

/// Streams links from whitespace-delimited text.
///
/// A line with more than five fields holds a whole link. Lines with four or
/// five fields are halves of the two-line form and are paired with the next
/// half in read order. At most one half is held back at any time; a half
/// still waiting at the end of the stream is dropped silently.
///
/// Malformed lines come out as `Err(BinError::Malformed)` and reading can
/// continue past them.
pub struct LinkReader<R> {
    reader: R,
    line_buf: Vec<u8>,
    line_no: usize,
    pending: Option<Half>,
    queued: Option<Result<Link, BinError>>,
}

impl<R: BufRead> LinkReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_buf: Vec::new(),
            line_no: 0,
            pending: None,
            queued: None,
        }
    }

    fn read_line(&mut self) -> std::io::Result<usize> {
        self.line_buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.line_buf)?;
        if n > 0 {
            self.line_no += 1;
        }
        Ok(n)
    }
}

impl<R: BufRead> Iterator for LinkReader<R> {
    type Item = Result<Link, BinError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(queued) = self.queued.take() {
            return Some(queued);
        }

        loop {
            match self.read_line() {
                Ok(0) => {
                    if let Some(half) = self.pending.take() {
                        log::trace!(
                            "dropped unpaired link {} from line {} at end of input",
                            half.id,
                            half.line
                        );
                    }
                    return None;
                }
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }

            let line_no = self.line_no;
            let line = match std::str::from_utf8(&self.line_buf) {
                Ok(line) => line.trim(),
                Err(_) => return Some(Err(BinError::malformed(line_no, "invalid UTF-8"))),
            };
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();

            if fields.len() > 5 {
                let parsed = parse_single(&fields, line_no);
                if let Some(half) = self.pending.take() {
                    self.queued = Some(parsed);
                    return Some(Err(BinError::malformed(
                        half.line,
                        format!("link {} has no partner line", half.id),
                    )));
                }
                return Some(parsed);
            }

            if fields.len() < 4 {
                return Some(Err(BinError::malformed(
                    line_no,
                    format!("expected at least 4 fields, found {}", fields.len()),
                )));
            }

            let half = match parse_half(&fields, line_no) {
                Ok(half) => half,
                Err(e) => return Some(Err(e)),
            };
            match self.pending.take() {
                None => self.pending = Some(half),
                Some(first) => {
                    if first.id != half.id {
                        log::trace!(
                            "paired lines {} and {} carry different ids: {} {}",
                            first.line,
                            half.line,
                            first.id,
                            half.id
                        );
                    }
                    return Some(Ok(Link::new(
                        Some(&first.id),
                        first.interval,
                        half.interval,
                    )));
                }
            }
        }
    }
}
