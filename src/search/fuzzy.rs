//! Fuzzy subsequence scoring.
//!
//! The score of a match is that of the best alignment of the needle's
//! characters inside the haystack, found with two dynamic programming rows:
//! `d` holds the best score ending with a match at `j`, `m` the best score for
//! the needle prefix anywhere up to `j`.

pub type Score = f64;

pub const SCORE_MIN: Score = f64::NEG_INFINITY;
/// Score of an exact (case-insensitive) match. Finite so results serialize.
pub const SCORE_MAX: Score = 1e9;

const SCORE_GAP_LEADING: Score = -0.005;
const SCORE_GAP_TRAILING: Score = -0.005;
const SCORE_GAP_INNER: Score = -0.01;
const SCORE_MATCH_CONSECUTIVE: Score = 1.0;
const SCORE_MATCH_START: Score = 0.9;
const SCORE_MATCH_WORD: Score = 0.8;
const SCORE_MATCH_CAPITAL: Score = 0.7;
const SCORE_MATCH_DOT: Score = 0.6;

/// Whether the needle's characters occur in order in the haystack, ignoring
/// case.
pub fn has_match(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars().map(fold);
    needle.chars().map(fold).all(|n| hay.any(|h| h == n))
}

/// Score `needle` against `haystack`; `None` when it is not a subsequence.
pub fn score(needle: &str, haystack: &str) -> Option<Score> {
    if needle.is_empty() || !has_match(needle, haystack) {
        return None;
    }

    let needle: Vec<char> = needle.chars().map(fold).collect();
    let original: Vec<char> = haystack.chars().collect();
    let hay: Vec<char> = original.iter().map(|c| fold(*c)).collect();

    if needle == hay {
        return Some(SCORE_MAX);
    }

    let bonus = match_bonus(&original);
    let (n, m) = (needle.len(), hay.len());
    let mut d_prev = vec![SCORE_MIN; m];
    let mut m_prev = vec![SCORE_MIN; m];
    let mut d_row = vec![SCORE_MIN; m];
    let mut m_row = vec![SCORE_MIN; m];

    for (i, &nc) in needle.iter().enumerate() {
        let gap = if i == n - 1 {
            SCORE_GAP_TRAILING
        } else {
            SCORE_GAP_INNER
        };
        let mut prev_score = SCORE_MIN;

        for j in 0..m {
            if nc == hay[j] {
                let score = if i == 0 {
                    (j as Score) * SCORE_GAP_LEADING + bonus[j]
                } else if j > 0 {
                    (m_prev[j - 1] + bonus[j]).max(d_prev[j - 1] + SCORE_MATCH_CONSECUTIVE)
                } else {
                    SCORE_MIN
                };
                d_row[j] = score;
                prev_score = score.max(prev_score + gap);
            } else {
                d_row[j] = SCORE_MIN;
                prev_score += gap;
            }
            m_row[j] = prev_score;
        }

        std::mem::swap(&mut d_prev, &mut d_row);
        std::mem::swap(&mut m_prev, &mut m_row);
    }

    Some(m_prev[m - 1])
}

/// Single-char lower-case fold, keeping positions aligned.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Bonus for a match at each position, from the character before it.
fn match_bonus(haystack: &[char]) -> Vec<Score> {
    let mut prev = None;
    haystack
        .iter()
        .map(|&c| {
            let bonus = match prev {
                None => SCORE_MATCH_START,
                Some('_' | '-' | ' ') => SCORE_MATCH_WORD,
                Some('.' | ':') => SCORE_MATCH_DOT,
                Some(p) if p.is_lowercase() && c.is_uppercase() => SCORE_MATCH_CAPITAL,
                Some(_) => 0.0,
            };
            prev = Some(c);
            bonus
        })
        .collect()
}
