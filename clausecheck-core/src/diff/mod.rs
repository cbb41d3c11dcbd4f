//! Character-level diff between two document texts.

pub mod sequence_matcher;

pub use sequence_matcher::{Match, OpTag, Opcode, SequenceMatcher};

use crate::types::DiffResult;

/// Spans inserted into `b` and removed from `a`, in alignment order.
///
/// Only pure insert and delete opcodes are reported; replaced regions
/// surface in neither list.
pub fn diff(a: &str, b: &str) -> DiffResult {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let mut result = DiffResult::default();
    for op in SequenceMatcher::new(&a_chars, &b_chars).opcodes() {
        match op.tag {
            OpTag::Insert => result
                .added
                .push(b_chars[op.b_start..op.b_end].iter().collect()),
            OpTag::Delete => result
                .removed
                .push(a_chars[op.a_start..op.a_end].iter().collect()),
            OpTag::Equal | OpTag::Replace => {}
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_inputs_have_no_changes() {
        assert!(diff("", "").is_empty());
        assert!(diff("Payment due in 30 days.", "Payment due in 30 days.").is_empty());
    }

    #[test]
    fn test_insertion() {
        let result = diff("hello world", "hello brave world");
        assert_eq!(result.added, vec!["brave "]);
        assert!(result.removed.is_empty());
    }

    #[test]
    fn test_deletion() {
        let result = diff("hello brave world", "hello world");
        assert!(result.added.is_empty());
        assert_eq!(result.removed, vec!["brave "]);
    }

    #[test]
    fn test_one_side_empty() {
        assert_eq!(diff("", "new clause").added, vec!["new clause"]);
        assert_eq!(diff("old clause", "").removed, vec!["old clause"]);
    }

    #[test]
    fn test_replacement_is_not_reported() {
        let result = diff("abc", "abd");
        assert!(result.is_empty());
    }

    #[test]
    fn test_multibyte_spans() {
        let result = diff("Fee: ₹100", "Fee: ₹1,100");
        assert_eq!(result.added, vec![",1"]);
    }
}
