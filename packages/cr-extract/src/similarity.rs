//! Fuzzy string similarity used to find field labels among OCR tokens.

/// A similarity score between two strings on a 0..=100 scale.
pub trait StringSimilarity {
    fn score(&self, a: &str, b: &str) -> u8;
}

impl<F> StringSimilarity for F
where
    F: Fn(&str, &str) -> u8,
{
    fn score(&self, a: &str, b: &str) -> u8 {
        self(a, b)
    }
}

/// Partial ratio based on indel distance. See [`partial_ratio`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl StringSimilarity for PartialRatio {
    fn score(&self, a: &str, b: &str) -> u8 {
        partial_ratio(a, b)
    }
}

/// Best alignment of the shorter string against any substring of the longer one.
///
/// Each alignment scores `2 * lcs / (len_short + len_window)`, which is one
/// minus the normalized insert/delete distance. A string contained verbatim
/// in the other scores 100, and an empty string scores 0 against anything.
/// Matching is case sensitive.
///
/// Windows longer than twice the shorter string are not tried: they cannot
/// score above 67, so long tokens cost `O(n * m^2)` instead of `O(n^2 * m)`.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (needle, haystack) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let m = needle.len();

    let max_window = 2 * m;
    let mut best = 0.0_f64;
    let mut row = vec![0usize; m + 1];

    for start in 0..haystack.len() {
        // A best window never opens on a character the needle lacks.
        if !needle.contains(&haystack[start]) {
            continue;
        }

        // row[k] = LCS(needle[..k], haystack[start..=end]), grown one column at a time.
        row.iter_mut().for_each(|cell| *cell = 0);

        for (end, &c) in haystack.iter().enumerate().skip(start).take(max_window) {
            let mut diagonal = 0;
            for k in 1..=m {
                let above = row[k];
                row[k] = if needle[k - 1] == c {
                    diagonal + 1
                } else {
                    above.max(row[k - 1])
                };
                diagonal = above;
            }

            let window = end - start + 1;
            let ratio = 2.0 * row[m] as f64 / (m + window) as f64;
            if ratio > best {
                best = ratio;
                if best >= 1.0 {
                    return 100;
                }
            }

            // Past the needle length the best attainable ratio only shrinks.
            if window >= m && 2.0 * m as f64 / (m + window) as f64 <= best {
                break;
            }
        }
    }

    (best * 100.0).round() as u8
}
