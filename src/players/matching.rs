use rapidfuzz::distance::indel;
use std::collections::HashSet;
use tracing::debug;

use super::normalizer::normalize_name;
use crate::TARGET_PLAYERS;

/// Minimum partial-overlap score (0-100) for two names to be treated as the same player.
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Best similarity (0-100) between the shorter string and any equally long
/// window of the longer one, windows at either edge included.
///
/// Similarity per window is the normalized indel score, `2 * lcs / (len_a + len_b)`,
/// so "n djokovic" scores highly against "novak djokovic" even though the two
/// differ substantially as whole strings.
pub fn partial_ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (needle, haystack) = if a.len() <= b.len() {
        (&a, &b)
    } else {
        (&b, &a)
    };

    let mut best = best_window(needle, haystack);
    // With equal lengths neither side is "the" needle, so try both.
    if best < 1.0 && a.len() == b.len() {
        best = best.max(best_window(haystack, needle));
    }
    best * 100.0
}

fn best_window(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let h = haystack.len();
    let alphabet: HashSet<char> = needle.iter().copied().collect();
    let mut best = 0.0_f64;

    // Windows sliding in from the left edge.
    for end in 1..n {
        if !alphabet.contains(&haystack[end - 1]) {
            continue;
        }
        best = best.max(indel_similarity(needle, &haystack[..end]));
        if best >= 1.0 {
            return best;
        }
    }

    // Full-width windows.
    for start in 0..(h - n) {
        if !alphabet.contains(&haystack[start]) {
            continue;
        }
        best = best.max(indel_similarity(needle, &haystack[start..start + n]));
        if best >= 1.0 {
            return best;
        }
    }

    // Windows sliding out past the right edge.
    for start in (h - n)..h {
        if !alphabet.contains(&haystack[start]) {
            continue;
        }
        best = best.max(indel_similarity(needle, &haystack[start..]));
        if best >= 1.0 {
            return best;
        }
    }

    best
}

fn indel_similarity(a: &[char], b: &[char]) -> f64 {
    indel::normalized_similarity(a.iter().copied(), b.iter().copied())
}

/// Decides whether two spellings of a player, or two fixtures, are the same.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    threshold: u8,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Partial-overlap score of the normalized names.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        partial_ratio(&normalize_name(a), &normalize_name(b))
    }

    pub fn names_equivalent(&self, a: &str, b: &str) -> bool {
        let score = self.score(a, b);
        debug!(
            target: TARGET_PLAYERS,
            "Name score '{}' vs '{}': {:.1} (threshold: {})", a, b, score, self.threshold
        );
        score >= f64::from(self.threshold)
    }

    /// True if the fixtures name the same two players, in either orientation.
    /// Feeds do not agree on which side is home.
    pub fn pair_equivalent(&self, a_home: &str, a_away: &str, b_home: &str, b_away: &str) -> bool {
        let direct = self.names_equivalent(a_home, b_home) && self.names_equivalent(a_away, b_away);
        let flipped =
            self.names_equivalent(a_home, b_away) && self.names_equivalent(a_away, b_home);
        direct || flipped
    }

    /// True if the `b` fixture lists the players in the opposite order to `a`.
    ///
    /// Decided by comparing the summed scores of both orientations, so it gives
    /// an answer even when the names do not clear the threshold. Ties keep the
    /// listed order.
    pub fn pair_is_flipped(
        &self,
        a_home: &str,
        a_away: &str,
        b_home: &str,
        b_away: &str,
    ) -> bool {
        let direct = self.score(a_home, b_home) + self.score(a_away, b_away);
        let flipped = self.score(a_home, b_away) + self.score(a_away, b_home);
        flipped > direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_ratio_edges() {
        assert_eq!(partial_ratio("", ""), 100.0);
        assert_eq!(partial_ratio("", "nadal"), 0.0);
        assert_eq!(partial_ratio("nadal", ""), 0.0);
        assert_eq!(partial_ratio("nadal", "nadal"), 100.0);
        assert_eq!(partial_ratio("nadal", "rafael nadal"), 100.0);
        assert_eq!(partial_ratio("xyz", "abc"), 0.0);
    }

    #[test]
    fn test_partial_ratio_abbreviations() {
        assert!(partial_ratio("n djokovic", "novak djokovic") > 90.0);
        assert!(partial_ratio("c alcaraz", "carlos alcaraz") > 90.0);
        assert!(partial_ratio("djokovic n", "n djokovic") >= 80.0);
        assert!(partial_ratio("nadal r", "r nadal") >= 80.0);
        assert!(partial_ratio("nadal r", "sinner j") < 80.0);
    }

    #[test]
    fn test_partial_ratio_window_scores() {
        // Best window "nadal" against needle "r nadal": 2 * 5 / 12.
        assert!((partial_ratio("nadal r", "r nadal") - 1000.0 / 12.0).abs() < 1e-9);
        // Best window "djokovic" against needle "n djokovic": 2 * 8 / 18.
        assert!((partial_ratio("djokovic n", "n djokovic") - 1600.0 / 18.0).abs() < 1e-9);
        // Best window is the right-edge " djokovic": 2 * 9 / 19.
        assert!((partial_ratio("n djokovic", "novak djokovic") - 1800.0 / 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_ratio_symmetric() {
        let pairs = [
            ("n djokovic", "novak djokovic"),
            ("nadal r", "r nadal"),
            ("alcaraz c", "sinner j"),
            ("ab", "ba"),
        ];
        for (a, b) in pairs {
            assert_eq!(partial_ratio(a, b), partial_ratio(b, a), "{a} / {b}");
        }
    }

    #[test]
    fn test_names_equivalent() {
        let matcher = FuzzyMatcher::new();
        assert!(matcher.names_equivalent("N. Djokovic", "Novak Djokovic"));
        assert!(matcher.names_equivalent("Djokovic N.", "N. Djokovic"));
        assert!(matcher.names_equivalent("Gaël Monfils", "G. Monfils"));
        assert!(!matcher.names_equivalent("Novak Djokovic", "Carlos Alcaraz"));

        for threshold in [0, 50, 80, 100] {
            let matcher = FuzzyMatcher::new().with_threshold(threshold);
            assert!(matcher.names_equivalent("J.R. Smith", "Jr Smith"));
            assert!(matcher.names_equivalent("", ""));
        }
    }

    #[test]
    fn test_pair_equivalent_orientation() {
        let matcher = FuzzyMatcher::new();
        assert!(matcher.pair_equivalent(
            "N. Djokovic",
            "C. Alcaraz",
            "Novak Djokovic",
            "Carlos Alcaraz"
        ));
        assert!(matcher.pair_equivalent(
            "R. Nadal",
            "N. Djokovic",
            "Djokovic N.",
            "Nadal R."
        ));
        assert!(!matcher.pair_equivalent(
            "R. Nadal",
            "N. Djokovic",
            "Alcaraz C.",
            "Sinner J."
        ));
        // Only one player in common is not a match.
        assert!(!matcher.pair_equivalent(
            "N. Djokovic",
            "C. Alcaraz",
            "Novak Djokovic",
            "Jannik Sinner"
        ));
    }

    #[test]
    fn test_pair_equivalent_with_missing_side() {
        let matcher = FuzzyMatcher::new();
        assert!(matcher.pair_equivalent("Novak Djokovic", "", "Novak Djokovic", ""));
        assert!(!matcher.pair_equivalent(
            "Novak Djokovic",
            "",
            "Novak Djokovic",
            "Rafael Nadal"
        ));
    }

    #[test]
    fn test_pair_is_flipped() {
        let matcher = FuzzyMatcher::new();
        assert!(matcher.pair_is_flipped(
            "R. Nadal",
            "N. Djokovic",
            "Novak Djokovic",
            "Rafael Nadal"
        ));
        assert!(!matcher.pair_is_flipped(
            "N. Djokovic",
            "R. Nadal",
            "Novak Djokovic",
            "Rafael Nadal"
        ));
        // Empty names keep the listed order.
        assert!(!matcher.pair_is_flipped("", "", "Jannik Sinner", "Daniil Medvedev"));
    }

    #[test]
    fn test_pair_equivalent_swap_symmetry() {
        let matcher = FuzzyMatcher::new();
        let names = [
            ("Novak Djokovic", "Rafael Nadal"),
            ("N. Djokovic", "R. Nadal"),
            ("Carlos Alcaraz", "Jannik Sinner"),
        ];
        for (h, a) in names {
            assert_eq!(
                matcher.pair_equivalent(h, a, a, h),
                matcher.pair_equivalent(a, h, h, a)
            );
        }
    }
}
