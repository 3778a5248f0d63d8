use std::ops::Range;

use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate<K> {
    pub kind: K,
    pub range: Range<usize>,
}

impl<K> Candidate<K> {
    pub fn new(kind: K, range: Range<usize>) -> Self {
        Self { kind, range }
    }
}

/// Sort by start offset, then keep only candidates clear of every accepted one.
///
/// Matchers push candidates category by category; the stable sort keeps that
/// push order for ties, so an earlier category beats a later one starting at
/// the same byte. A candidate that overlaps anything already accepted is
/// dropped whole, never trimmed.
pub(crate) fn first_wins<K: std::fmt::Debug>(
    mut candidates: Vec<Candidate<K>>,
) -> Vec<Candidate<K>> {
    candidates.sort_by_key(|c| c.range.start);

    // Accepted ranges are sorted and disjoint, so the last end is the only
    // one a later start can collide with.
    let mut covered_to = 0;
    let mut accepted = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.range.start < covered_to {
            trace!(?candidate, covered_to, "discarding overlapping match");
            continue;
        }
        covered_to = candidate.range.end;
        accepted.push(candidate);
    }
    accepted
}

/// Fill every byte of `0..len` not covered by `accepted` with a `filler`
/// candidate. `accepted` must be sorted and disjoint.
pub(crate) fn tile<K: Copy>(
    len: usize,
    accepted: Vec<Candidate<K>>,
    filler: K,
) -> Vec<Candidate<K>> {
    let mut out = Vec::with_capacity(accepted.len() * 2 + 1);
    let mut last = 0;
    for candidate in accepted {
        if candidate.range.start > last {
            out.push(Candidate::new(filler, last..candidate.range.start));
        }
        last = candidate.range.end;
        out.push(candidate);
    }
    if last < len {
        out.push(Candidate::new(filler, last..len));
    }
    out
}
