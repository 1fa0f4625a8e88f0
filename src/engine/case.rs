//! Capitalization transfer for prefix replacements.
//!
//! Prefix triggers are usually written in lower case, but the user may have
//! typed any capitalization. The replacement should echo what was typed:
//!
//! ```text
//! input:       W r I e t - O u t p u t
//! trigger:     w r i e t
//!              ^   ^                      case-only mismatches at 0 and 2
//! replacement: w r i t e
//! result:      W r I t e - O u t p u t
//! ```
//!
//! Positions are counted in characters and carried over 1:1 from the trigger
//! to the replacement. That is an approximation: it assumes the replacement
//! keeps the trigger's leading structure. Mismatches that fall past the end
//! of a shorter replacement are dropped rather than written into the tail.

/// Replace the leading `trigger` of `input` with `replacement`, re-applying
/// every capitalization difference the user typed inside the trigger.
///
/// # Panics
///
/// Panics if `input` is shorter (in characters) than `trigger`. Callers only
/// reach this after confirming `input` starts with `trigger`.
///
/// ```
/// use hotfix::preserve_case;
///
/// assert_eq!(preserve_case("Wriet-Output", "wriet", "write"), "Write-Output");
/// assert_eq!(preserve_case("WrIet-Output", "wriet", "write"), "WrIte-Output");
/// ```
pub fn preserve_case(input: &str, trigger: &str, replacement: &str) -> String {
    let trigger_len = trigger.chars().count();
    assert!(
        input.chars().count() >= trigger_len,
        "preserve_case: input {input:?} is shorter than trigger {trigger:?}"
    );

    let mismatches: Vec<(usize, char)> = input
        .chars()
        .zip(trigger.chars())
        .enumerate()
        .filter(|&(_, (typed, expected))| differs_only_in_case(typed, expected))
        .map(|(pos, (typed, _))| (pos, typed))
        .collect();

    let tail_start = input.char_indices().nth(trigger_len).map_or(input.len(), |(idx, _)| idx);

    let mut head: Vec<char> = replacement.chars().collect();
    for (pos, typed) in mismatches {
        if let Some(slot) = head.get_mut(pos) {
            *slot = typed;
        }
    }

    let mut out: String = head.into_iter().collect();
    out.push_str(&input[tail_start..]);
    out
}

fn differs_only_in_case(a: char, b: char) -> bool {
    a != b && a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capital_first_letter() {
        assert_eq!(preserve_case("Wriet-Output", "wriet", "write"), "Write-Output");
    }

    #[test]
    fn inner_capitals() {
        assert_eq!(preserve_case("WrIet-Output", "wriet", "write"), "WrIte-Output");
    }

    #[test]
    fn untouched_when_case_already_matches() {
        assert_eq!(preserve_case("wrietable", "wriet", "write"), "writeable");
        assert_eq!(preserve_case("wriet", "wriet", "write"), "write");
    }

    #[test]
    fn tail_keeps_its_own_case() {
        assert_eq!(preserve_case("dpeendencyMAP", "dpeend", "depend"), "dependencyMAP");
    }

    #[test]
    fn different_letters_are_not_case_mismatches() {
        // 'x' vs 'i' is a typo, not a capitalization choice
        assert_eq!(preserve_case("wrxet", "wriet", "write"), "write");
    }

    #[test]
    fn mismatch_past_shorter_replacement_is_dropped() {
        assert_eq!(preserve_case("ABCDEF-x", "abcdef", "abc"), "ABC-x");
        assert_eq!(preserve_case("abcdeF", "abcdef", "xyz"), "xyz");
    }

    #[test]
    fn longer_replacement() {
        assert_eq!(preserve_case("Teh", "teh", "the best"), "The best");
    }

    #[test]
    fn non_ascii_positions_are_characters() {
        assert_eq!(preserve_case("Ünbar!", "ünbar", "unbär"), "Ünbär!");
    }

    #[test]
    #[should_panic(expected = "shorter than trigger")]
    fn input_shorter_than_trigger_is_a_contract_error() {
        preserve_case("wr", "wriet", "write");
    }
}
