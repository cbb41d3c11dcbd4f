//! Lexical clause similarity and greedy line matching.

use crate::diff::SequenceMatcher;
use crate::types::SimilaritySample;
use std::collections::HashSet;

/// Main-document lines sampled for matching
pub const MAX_MAIN_LINES: usize = 20;
/// Client-document lines each main line is compared against
pub const MAX_CLIENT_LINES: usize = 40;

const TOKEN_WEIGHT: f64 = 0.6;
const SEQUENCE_WEIGHT: f64 = 0.4;

/// Blend of token-set overlap and character alignment, in [0, 1]
pub fn score(a: &str, b: &str) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let a_tokens = token_set(a);
    let b_tokens = token_set(b);
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }

    TOKEN_WEIGHT * jaccard(&a_tokens, &b_tokens) + SEQUENCE_WEIGHT * sequence_ratio(a, b)
}

/// Jaccard index of the lowercase whitespace-separated token sets
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    jaccard(&token_set(a), &token_set(b))
}

/// `2 * matched / total` over the characters of `a` and `b`, case preserved.
///
/// The alignment's tie-breaking depends on argument order ("tide" against
/// "diet" matches 1 character, the reverse matches 2), so both orders are
/// aligned and the larger ratio is kept.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let forward = SequenceMatcher::new(&a_chars, &b_chars).ratio();
    let backward = SequenceMatcher::new(&b_chars, &a_chars).ratio();
    forward.max(backward)
}

fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase().split_whitespace().map(str::to_string).collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Line boundaries, including the form feeds and separators PDF text carries
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Trimmed, non-blank lines in document order
pub fn content_lines(text: &str) -> Vec<&str> {
    text.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// For each of the first `MAX_MAIN_LINES` main lines, the best-scoring line
/// among the first `MAX_CLIENT_LINES` client lines.
///
/// Ties keep the earliest client line. A main line with no positive score
/// gets no match and a score of 0.0.
pub fn best_matches(main_text: &str, client_text: &str) -> Vec<SimilaritySample> {
    let main_lines = content_lines(main_text);
    let client_lines = content_lines(client_text);
    let client_lines = &client_lines[..client_lines.len().min(MAX_CLIENT_LINES)];

    main_lines
        .into_iter()
        .take(MAX_MAIN_LINES)
        .map(|main_line| {
            let mut best = 0.0;
            let mut best_line = None;
            for &client_line in client_lines {
                let sim = score(main_line, client_line);
                if sim > best {
                    best = sim;
                    best_line = Some(client_line.to_string());
                }
            }
            SimilaritySample {
                main: main_line.to_string(),
                best_match: best_line,
                score: best,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_edge_cases() {
        assert_eq!(score("", ""), 1.0);
        assert_eq!(score("x", ""), 0.0);
        assert_eq!(score("", "y"), 0.0);
        assert_eq!(score("   ", "y"), 0.0);
    }

    #[test]
    fn test_identical_lines_score_one() {
        assert!(approx(score("Line1", "Line1"), 1.0));
    }

    #[test]
    fn test_score_is_symmetric() {
        let pairs = [
            ("payment due in 30 days", "payment due in 45 days"),
            ("Line2", "LineX"),
            ("abc", "abd"),
            ("tide", "diet"),
        ];
        for (a, b) in pairs {
            assert_eq!(score(a, b), score(b, a), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_sequence_ratio_ignores_argument_order() {
        // One-directional alignment gives 0.25 one way and 0.5 the other
        assert!(approx(sequence_ratio("tide", "diet"), 0.5));
        assert!(approx(sequence_ratio("diet", "tide"), 0.5));
        assert!(approx(score("tide", "diet"), 0.2));
        assert!(approx(score("diet", "tide"), 0.2));
    }

    #[test]
    fn test_blend_weights() {
        // 4 of 6 tokens shared, 20 of 22 characters aligned on each side
        let s = score("payment due in 30 days", "payment due in 45 days");
        assert!(approx(s, 0.6 * (4.0 / 6.0) + 0.4 * (40.0 / 44.0)));
    }

    #[test]
    fn test_tokens_ignore_case_but_sequence_does_not() {
        let (a, b) = ("The Client shall pay", "the client SHALL pay");
        assert!(approx(token_jaccard(a, b), 1.0));
        assert!(approx(sequence_ratio(a, b), 0.65));
        assert!(approx(score(a, b), 0.86));
    }

    #[test]
    fn test_content_lines_trim_and_skip_blanks() {
        assert_eq!(content_lines("  a  \n\n\t\nb\r\n"), vec!["a", "b"]);
        assert_eq!(content_lines("page one\x0cpage two"), vec!["page one", "page two"]);
    }

    #[test]
    fn test_best_match_picks_exact_line() {
        let samples = best_matches("Line1\nLine2", "Line1\nLineX");
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].main, "Line1");
        assert_eq!(samples[0].best_match.as_deref(), Some("Line1"));
        assert!(approx(samples[0].score, 1.0));
    }

    #[test]
    fn test_ties_keep_first_client_line() {
        let samples = best_matches("alpha", "alpha\nalpha");
        assert_eq!(samples[0].best_match.as_deref(), Some("alpha"));

        // Two distinct client lines scoring equally: the earlier one wins
        let samples = best_matches("ab", "ax\nay");
        assert_eq!(samples[0].best_match.as_deref(), Some("ax"));
    }

    #[test]
    fn test_no_client_lines_means_no_match() {
        let samples = best_matches("Line1", "");
        assert_eq!(samples[0].best_match, None);
        assert_eq!(samples[0].score, 0.0);
    }

    #[test]
    fn test_line_caps() {
        let main: String = (0..30).map(|i| format!("main {i}\n")).collect();
        let samples = best_matches(&main, "main 29");
        assert_eq!(samples.len(), MAX_MAIN_LINES);

        // The matching client line sits past the client cap, so it is never seen
        let mut client: String = (0..MAX_CLIENT_LINES).map(|i| format!("zz{i}\n")).collect();
        client.push_str("main 0\n");
        let samples = best_matches("main 0", &client);
        assert_ne!(samples[0].best_match.as_deref(), Some("main 0"));
    }
}
