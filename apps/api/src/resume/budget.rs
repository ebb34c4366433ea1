//! Token budget — approximates model-billable units and keeps resume input under
//! the context ceiling.
//!
//! The estimate is linear: one unit per 2.5 characters plus a 20% structural
//! surcharge, i.e. `ceil(len / 2.5) + ceil(len * 0.2)`. It is an admission-control
//! estimate, not the real tokenizer.

use tracing::warn;

use crate::errors::AppError;

pub const CONTEXT_CEILING: usize = 128_000;
pub const COMPLETION_CEILING: usize = 1_500;
pub const SAFETY_BUFFER: usize = 3_000;

/// Estimated units for arbitrary text.
pub fn estimate_tokens(text: &str) -> usize {
    units_for_len(text.chars().count())
}

/// `ceil(len / 2.5) + ceil(len * 0.2)` in exact integer arithmetic.
fn units_for_len(len: usize) -> usize {
    (2 * len).div_ceil(5) + len.div_ceil(5)
}

/// Longest character count whose estimate stays within `units`.
fn max_len_within(units: usize) -> usize {
    let mut len = units.saturating_mul(5) / 3;
    while len > 0 && units_for_len(len) > units {
        len -= 1;
    }
    while units_for_len(len + 1) <= units {
        len += 1;
    }
    len
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    pub context_ceiling: usize,
    pub completion_ceiling: usize,
    pub safety_buffer: usize,
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self {
            context_ceiling: CONTEXT_CEILING,
            completion_ceiling: COMPLETION_CEILING,
            safety_buffer: SAFETY_BUFFER,
        }
    }
}

/// User input after admission control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedInput<'a> {
    /// Always a prefix of the original text.
    pub text: &'a str,
    pub units: usize,
    pub max_units: usize,
    pub truncated: bool,
}

impl TokenBudget {
    pub fn max_user_units(&self, system_units: usize) -> usize {
        self.context_ceiling
            .saturating_sub(system_units)
            .saturating_sub(self.completion_ceiling)
            .saturating_sub(self.safety_buffer)
    }

    /// Front-truncates `text` (keeping the prefix) until its estimate fits the
    /// user allowance, then re-validates the whole request against the ceiling.
    pub fn fit<'a>(&self, text: &'a str, system_units: usize) -> Result<FittedInput<'a>, AppError> {
        let max_units = self.max_user_units(system_units);
        let original_units = estimate_tokens(text);

        let (fitted, units) = if original_units > max_units {
            // First cut at 2.5 chars per unit; the surcharge means that alone can
            // still overshoot, so shrink to the exact allowance when it does.
            let mut max_chars = max_units.saturating_mul(5) / 2;
            if units_for_len(max_chars) > max_units {
                max_chars = max_len_within(max_units);
            }
            let prefix = char_prefix(text, max_chars);
            let units = estimate_tokens(prefix);
            warn!(
                "Resume truncated from {} to {} chars ({}/{} user tokens) to fit API token limit",
                text.chars().count(),
                prefix.chars().count(),
                units,
                max_units
            );
            (prefix, units)
        } else {
            (text, original_units)
        };

        let total = system_units + units + self.completion_ceiling;
        if total > self.context_ceiling {
            return Err(AppError::TokenBudgetExceeded {
                total,
                limit: self.context_ceiling,
                original_chars: text.chars().count(),
                truncated_chars: fitted.chars().count(),
            });
        }

        Ok(FittedInput {
            text: fitted,
            units,
            max_units,
            truncated: units < original_units,
        })
    }
}

fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_estimate_matches_formula() {
        // ceil(10/2.5)=4, ceil(10*0.2)=2
        assert_eq!(estimate_tokens(&"a".repeat(10)), 6);
        // ceil(1/2.5)=1, ceil(0.2)=1
        assert_eq!(estimate_tokens("a"), 2);
        // ceil(15/2.5)=6, ceil(3)=3
        assert_eq!(estimate_tokens(&"a".repeat(15)), 9);
        // ceil(7/2.5)=3, ceil(1.4)=2
        assert_eq!(estimate_tokens(&"a".repeat(7)), 5);
    }

    #[test]
    fn test_estimate_counts_chars_not_bytes() {
        assert_eq!(estimate_tokens("ééééé"), estimate_tokens("aaaaa"));
    }

    #[test]
    fn test_estimate_monotonic_in_length() {
        let mut previous = 0;
        for len in 0..500 {
            let units = estimate_tokens(&"x".repeat(len));
            assert!(units >= previous, "estimate decreased at len {len}");
            previous = units;
        }
    }

    #[test]
    fn test_max_len_within_is_tight() {
        for units in [0, 1, 2, 5, 17, 100, 123_456] {
            let len = max_len_within(units);
            assert!(units_for_len(len) <= units);
            assert!(units_for_len(len + 1) > units);
        }
    }

    #[test]
    fn test_max_user_units() {
        let budget = TokenBudget::default();
        assert_eq!(budget.max_user_units(500), 128_000 - 500 - 1_500 - 3_000);
        assert_eq!(budget.max_user_units(200_000), 0);
    }

    #[test]
    fn test_small_input_passes_through() {
        let budget = TokenBudget::default();
        let text = "Senior Rust engineer with 8 years of experience.";
        let fitted = budget.fit(text, 300).unwrap();
        assert_eq!(fitted.text, text);
        assert!(!fitted.truncated);
        assert_eq!(fitted.units, estimate_tokens(text));
    }

    #[test]
    fn test_oversized_input_truncated_to_strict_prefix_within_allowance() {
        let budget = TokenBudget::default();
        let text = "resume line\n".repeat(30_000); // 360k chars
        let fitted = budget.fit(&text, 300).unwrap();
        assert!(fitted.truncated);
        assert!(fitted.text.len() < text.len());
        assert!(text.starts_with(fitted.text));
        assert!(fitted.units <= fitted.max_units);
        assert!(300 + fitted.units + COMPLETION_CEILING <= CONTEXT_CEILING);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let budget = TokenBudget {
            context_ceiling: 100,
            completion_ceiling: 10,
            safety_buffer: 10,
        };
        let text = "ü".repeat(1_000);
        let fitted = budget.fit(&text, 0).unwrap();
        assert!(fitted.truncated);
        assert!(fitted.units <= 80);
        assert!(fitted.text.chars().all(|c| c == 'ü'));
    }

    #[test]
    fn test_system_prompt_alone_exceeding_ceiling_fails() {
        let budget = TokenBudget::default();
        let err = budget.fit("any resume text", 127_000).unwrap_err();
        match err {
            AppError::TokenBudgetExceeded { total, limit, .. } => {
                assert!(total > limit);
                assert_eq!(limit, CONTEXT_CEILING);
            }
            other => panic!("expected TokenBudgetExceeded, got {other:?}"),
        }
    }
}
