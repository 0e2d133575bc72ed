//! Numeric-tone pinyin to diacritic form.
//!
//! CC-CEDICT and similar sources romanize syllables with a trailing tone
//! digit (`huo3 shan1`); readable pinyin carries the tone as a diacritic on
//! exactly one vowel (`huǒ shān`). This crate implements the placement rule:
//!
//! 1. A syllable with no vowel keeps its letters, minus the tone digit.
//! 2. If the syllable contains both `i` and `u`, the mark goes on whichever
//!    of the two occurs last (`liu2` → `liú`, `shui3` → `shuǐ`).
//! 3. Otherwise the mark goes on the highest-priority vowel present, under
//!    the fixed order `a > o > e > i > u` (`ü` sorts with `u`), first
//!    occurrence winning among repeats.
//! 4. Tone digits 1–4 select the marked form; 5 — or any other digit — means
//!    neutral tone and selects the plain vowel. A syllable with no trailing
//!    digit is treated as neutral, so normalization is a no-op on already
//!    normalized text.
//!
//! # Example
//! ```rust
//! assert_eq!(hanzi_pinyin::mark_tones("huo3 shan1"), "huǒ shān");
//! assert_eq!(hanzi_pinyin::mark_syllable("liu2"), "liú");
//! ```

/// Tone-marked forms for tones 1–4 plus the unmarked neutral form.
fn tone_forms(vowel: char) -> Option<&'static [char; 5]> {
    match vowel {
        'a' => Some(&['ā', 'á', 'ǎ', 'à', 'a']),
        'e' => Some(&['ē', 'é', 'ě', 'è', 'e']),
        'i' => Some(&['ī', 'í', 'ǐ', 'ì', 'i']),
        'o' => Some(&['ō', 'ó', 'ǒ', 'ò', 'o']),
        'u' => Some(&['ū', 'ú', 'ǔ', 'ù', 'u']),
        'ü' => Some(&['ǖ', 'ǘ', 'ǚ', 'ǜ', 'ü']),
        _ => None,
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'ü')
}

fn priority(c: char) -> usize {
    match c {
        'a' => 0,
        'o' => 1,
        'e' => 2,
        'i' => 3,
        'u' | 'ü' => 4,
        _ => 5,
    }
}

/// Convert a space-separated sequence of numeric-tone syllables.
///
/// Each syllable is normalized independently; runs of whitespace collapse to
/// single spaces.
pub fn mark_tones(input: &str) -> String {
    input
        .split_whitespace()
        .map(mark_syllable)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert one numeric-tone syllable to its diacritic form.
pub fn mark_syllable(syllable: &str) -> String {
    let (body, tone) = split_tone(syllable);

    let vowels: Vec<(usize, char)> = body.char_indices().filter(|&(_, c)| is_vowel(c)).collect();
    let Some(&(pos, vowel)) = pick_vowel(&vowels) else {
        return body.to_string();
    };
    let Some(forms) = tone_forms(vowel) else {
        return body.to_string();
    };
    let marked = match tone {
        Some(t @ 1..=4) => forms[(t - 1) as usize],
        _ => forms[4],
    };

    let mut out = String::with_capacity(body.len() + 2);
    out.push_str(&body[..pos]);
    out.push(marked);
    out.push_str(&body[pos + vowel.len_utf8()..]);
    out
}

/// Split off the trailing tone digit, if any.
fn split_tone(syllable: &str) -> (&str, Option<u32>) {
    match syllable.chars().next_back() {
        Some(d) if d.is_ascii_digit() => (
            &syllable[..syllable.len() - d.len_utf8()],
            d.to_digit(10),
        ),
        _ => (syllable, None),
    }
}

fn pick_vowel(vowels: &[(usize, char)]) -> Option<&(usize, char)> {
    let has_i = vowels.iter().any(|&(_, c)| c == 'i');
    let has_u = vowels.iter().any(|&(_, c)| c == 'u');
    if has_i && has_u {
        // Medial exception: with both i and u present the mark lands on
        // whichever of the two comes last in the syllable.
        vowels.iter().rev().find(|&&(_, c)| c == 'i' || c == 'u')
    } else {
        // min_by_key keeps the first minimum, so among repeated vowels the
        // earliest occurrence wins.
        vowels.iter().min_by_key(|&&(_, c)| priority(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_the_only_vowel() {
        assert_eq!(mark_syllable("san1"), "sān");
        assert_eq!(mark_syllable("ma3"), "mǎ");
        assert_eq!(mark_syllable("de2"), "dé");
        assert_eq!(mark_syllable("bu4"), "bù");
    }

    #[test]
    fn priority_order_picks_a_over_o_over_e() {
        assert_eq!(mark_syllable("hao3"), "hǎo");
        assert_eq!(mark_syllable("huo3"), "huǒ");
        assert_eq!(mark_syllable("xie4"), "xiè");
        assert_eq!(mark_syllable("shan1"), "shān");
    }

    #[test]
    fn i_and_u_together_mark_the_later_one() {
        assert_eq!(mark_syllable("liu2"), "liú");
        assert_eq!(mark_syllable("jiu3"), "jiǔ");
        assert_eq!(mark_syllable("shui3"), "shuǐ");
        assert_eq!(mark_syllable("gui4"), "guì");
    }

    #[test]
    fn umlaut_u_sorts_with_u() {
        assert_eq!(mark_syllable("lü4"), "lǜ");
        assert_eq!(mark_syllable("nü3"), "nǚ");
        assert_eq!(mark_syllable("lüe4"), "lüè");
    }

    #[test]
    fn neutral_tone_strips_the_digit() {
        assert_eq!(mark_syllable("ma5"), "ma");
        assert_eq!(mark_syllable("le5"), "le");
        // any digit outside 1-4 is neutral, not an error
        assert_eq!(mark_syllable("ma0"), "ma");
        assert_eq!(mark_syllable("ma9"), "ma");
    }

    #[test]
    fn vowelless_syllables_lose_only_the_digit() {
        assert_eq!(mark_syllable("r5"), "r");
        assert_eq!(mark_syllable("m2"), "m");
        assert_eq!(mark_syllable("hm"), "hm");
    }

    #[test]
    fn idempotent_on_normalized_text() {
        assert_eq!(mark_syllable("shān"), "shān");
        assert_eq!(mark_syllable("huǒ"), "huǒ");
        assert_eq!(mark_syllable("ma"), "ma");
        assert_eq!(mark_tones("huǒ shān"), "huǒ shān");
    }

    #[test]
    fn marks_whole_romanization_strings() {
        assert_eq!(mark_tones("huo3 shan1"), "huǒ shān");
        assert_eq!(mark_tones("zhong1 guo2 ren2"), "zhōng guó rén");
        assert_eq!(mark_tones("  huo3   shan1 "), "huǒ shān");
        assert_eq!(mark_tones(""), "");
    }
}
