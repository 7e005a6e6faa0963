//! Histogram to code tables: package-merge length computation, canonical
//! code assignment and construction of the decoder's prefix table.
//!
//! Code lengths are bounded by [`MAX_CODE_LEN`] using the coin-collector
//! form of the Larmore–Hirschberg package-merge algorithm (JACM 37, 3,
//! 1990), which runs in O(L·n) for n coded symbols.

use crate::{LOOKUP_BITS, MAX_CODE_LEN, NUM_SYMBOLS};

use super::CodeTables;

/// A symbol admitted to the code, tagged with its training weight.
///
/// The escape slot is admitted with weight 0, so after the stable sort by
/// weight it sits ahead of every real symbol and ends up with the longest
/// code.
#[derive(Clone, Copy)]
struct Included {
    symbol: u8,
    weight: u64,
}

/// Fills `tables` from the histogram and returns the escape symbol
/// (-1 when none was reserved).
///
/// With `partial` set the lowest-indexed zero-count byte joins the coded
/// set as the escape; if every byte occurs there is nothing to reserve.
pub(crate) fn build_code_tables(
    hist: &[u64; NUM_SYMBOLS],
    partial: bool,
    tables: &mut CodeTables,
) -> i32 {
    let mut esc_code: i32 = -1;
    let mut included: Vec<Included> = Vec::with_capacity(NUM_SYMBOLS);
    for (i, &weight) in hist.iter().enumerate() {
        if weight > 0 {
            included.push(Included {
                symbol: i as u8,
                weight,
            });
        } else if partial && esc_code < 0 {
            esc_code = i as i32;
            included.push(Included {
                symbol: i as u8,
                weight: 0,
            });
        }
    }

    // Stable, so ties keep symbol order and the build is deterministic.
    included.sort_by_key(|e| e.weight);

    let mut lengths = vec![0u8; included.len()];
    if included.len() == 1 {
        // A lone symbol still needs a real code or nothing round-trips.
        lengths[0] = 1;
    } else {
        package_merge(&included, &mut lengths);
    }
    let codes = assign_codes(&lengths);

    tables.code_len.fill(0);
    tables.code_bits.fill(0);
    for (i, e) in included.iter().enumerate() {
        tables.code_len[e.symbol as usize] = lengths[i];
        tables.code_bits[e.symbol as usize] = codes[i];
    }
    fill_lookup(tables);

    esc_code
}

/// Computes a code length per included symbol, all bounded by
/// [`MAX_CODE_LEN`] and together satisfying the Kraft inequality.
///
/// `included` must be sorted by weight ascending and hold at least two
/// entries; `lengths` is written in the same order.
fn package_merge(included: &[Included], lengths: &mut [u8]) {
    let n = included.len();
    let width = 2 * n;
    let weights: Vec<u64> = included.iter().map(|e| e.weight).collect();

    // Per row, true where a singleton was taken over a package of two.
    let mut taken = vec![vec![false; width]; MAX_CODE_LEN];

    // Two owned row arenas, swapped each level.
    let mut prev = vec![0u64; width];
    prev[..n].copy_from_slice(&weights);
    let mut next = vec![0u64; width];

    // Start from the deepest row of singletons and merge upward: at each
    // output slot take either the cheapest unused singleton or the sum of
    // the next two entries of the row below, whichever costs less.
    let mut row_len = n - 1;
    for level in (1..MAX_CODE_LEN).rev() {
        let mut j = 0;
        let mut k = 0;
        let mut m = 0;
        while j < n || k < row_len {
            if k >= row_len || (j < n && weights[j] <= prev[k] + prev[k + 1]) {
                next[m] = weights[j];
                taken[level][m] = true;
                j += 1;
            } else {
                next[m] = prev[k] + prev[k + 1];
                k += 2;
            }
            m += 1;
        }
        row_len = m - 1;
        std::mem::swap(&mut prev, &mut next);
    }

    // Back-trace: each singleton taken within the active span deepens the
    // corresponding symbol by one; the span halves over the packages.
    let mut span = 2 * (n - 1);
    for row in taken.iter().take(MAX_CODE_LEN).skip(1) {
        let mut j = 0;
        for &singleton in row.iter().take(span) {
            if singleton {
                lengths[j] += 1;
                j += 1;
            }
        }
        span = 2 * (span - j);
    }
    for len in lengths.iter_mut().take(span) {
        *len += 1;
    }

    debug_assert_eq!(
        lengths
            .iter()
            .map(|&l| 1u32 << (MAX_CODE_LEN - l as usize))
            .sum::<u32>(),
        1 << MAX_CODE_LEN,
        "code lengths must fill the Kraft budget exactly"
    );
}

/// Assigns canonical code words to `lengths`, which must be sorted
/// longest first (the weight-ascending order of the builder).
///
/// The first (longest) code is all ones; each following code strips the
/// trailing zero padding, decrements, then pads back out to its length.
fn assign_codes(lengths: &[u8]) -> Vec<u16> {
    let mut codes = vec![0u16; lengths.len()];
    let mut len = lengths[0] as u32;
    let mut bits: u16 = ((1u32 << len) - 1) as u16;
    codes[0] = bits;
    for i in 1..lengths.len() {
        while bits & 1 == 0 {
            bits >>= 1;
            len -= 1;
        }
        bits -= 1;
        while len < lengths[i] as u32 {
            bits = (bits << 1) | 1;
            len += 1;
        }
        codes[i] = bits;
    }
    codes
}

/// Rebuilds the prefix table from `code_len`/`code_bits`: every 16-bit
/// value whose high bits equal a symbol's code maps to that symbol.
pub(crate) fn fill_lookup(tables: &mut CodeTables) {
    tables.lookup.fill(0);
    for s in 0..NUM_SYMBOLS {
        let len = tables.code_len[s] as usize;
        if len == 0 {
            continue;
        }
        let base = (tables.code_bits[s] as usize) << (LOOKUP_BITS - len);
        for slot in &mut tables.lookup[base..base + (1 << (LOOKUP_BITS - len))] {
            *slot = s as u8;
        }
    }
}
