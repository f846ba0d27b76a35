//! Wrong answers for lesson questions.
//!
//! Which transformation produces a distractor is always decided by fixed
//! tables; randomness only picks shuffle orders and typo positions.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::verse::Word;
use super::QuestionOption;

/// Common ambiguities when writing Arabic sounds in Latin script,
/// scanned in this order for the first variant and in reverse for the second.
const TRANSLITERATION_RULES: [(&str, &str); 9] = [
    ("i", "e"),
    ("a", "e"),
    ("u", "o"),
    ("h", ""),
    ("ee", "i"),
    ("aa", "a"),
    ("kh", "h"),
    ("gh", "g"),
    ("th", "t"),
];

// Letters that are easy to mix up at a glance (mostly differing by dots)
const CONFUSABLE_LETTERS: [(char, char); 12] = [
    ('ا', 'أ'),
    ('ب', 'ت'),
    ('ج', 'ح'),
    ('د', 'ذ'),
    ('ر', 'ز'),
    ('س', 'ش'),
    ('ع', 'غ'),
    ('ف', 'ق'),
    ('ك', 'گ'),
    ('ل', 'م'),
    ('ن', 'ه'),
    ('و', 'ؤ'),
];

const FATHA: char = '\u{064E}';

const TRANSLITERATION_PLACEHOLDERS: [&str; 2] = ["Variant1", "Variant2"];
const ARABIC_PLACEHOLDERS: [&str; 2] = ["؟ ١", "؟ ٢"];

const MAX_RESHUFFLES: usize = 3;

fn placeholders(pair: [&str; 2]) -> [String; 2] {
    pair.map(str::to_string)
}

/// Two misspellings of a transliterated word.
///
/// Both differ from `correct` and from each other. Blank input gets
/// two fixed placeholders.
pub fn transliteration_distractors(correct: &str) -> [String; 2] {
    let clean = correct.trim();
    if clean.is_empty() {
        return placeholders(TRANSLITERATION_PLACEHOLDERS);
    }

    let apply = |from: &str, to: &str| -> Option<String> {
        if !clean.contains(from) {
            return None;
        }
        let variant = clean.replacen(from, to, 1);
        // Deleting the only letter of "h" would leave nothing to show
        if variant.is_empty() || variant == clean {
            return None;
        }
        Some(variant)
    };

    let first = TRANSLITERATION_RULES
        .iter()
        .find_map(|&(from, to)| apply(from, to))
        .unwrap_or_else(|| format!("{}i", clean));

    let second = TRANSLITERATION_RULES
        .iter()
        .rev()
        .filter_map(|&(from, to)| apply(from, to))
        .find(|variant| *variant != first)
        .unwrap_or_else(|| format!("{}a", clean));

    [first, second]
}

/// Misspells every token of a transliterated sequence, once with each variant.
pub fn sequence_transliteration_distractors(correct: &str) -> [String; 2] {
    if correct.trim().is_empty() {
        return placeholders(TRANSLITERATION_PLACEHOLDERS);
    }

    let variants = correct
        .split_whitespace()
        .map(transliteration_distractors)
        .collect::<Vec<_>>();
    let join = |i: usize| {
        variants
            .iter()
            .map(|v| v[i].as_str())
            .collect::<Vec<_>>()
            .join(" ")
    };

    [join(0), join(1)]
}

/// Wrong Arabic answers for a single word.
///
/// Other words of the same verse look the most plausible, so they're used
/// when there are at least two of them. Otherwise two near-duplicates of
/// `correct` are made up.
pub fn arabic_word_distractors(correct: &str, pool: &[Word]) -> [String; 2] {
    if correct.trim().is_empty() {
        return placeholders(ARABIC_PLACEHOLDERS);
    }

    let mut others: Vec<&str> = Vec::new();
    for word in pool {
        let text = word.text.trim();
        if !text.is_empty() && text != correct.trim() && !others.contains(&text) {
            others.push(text);
        }
        if others.len() == 2 {
            return [others[0].to_string(), others[1].to_string()];
        }
    }

    debug!(
        "Only {} other word(s) for {:?}, synthesizing near-duplicates",
        others.len(),
        correct
    );
    [swap_similar_letters(correct), toggle_diacritics(correct)]
}

/// A shuffled-order and a misspelled version of a space separated Arabic sequence.
pub fn sequence_distractors<R: Rng + ?Sized>(correct: &str, rng: &mut R) -> [String; 2] {
    if correct.trim().is_empty() {
        return placeholders(ARABIC_PLACEHOLDERS);
    }

    // Compare word order, not the joined string: spacing in the verse text may differ
    let original = correct.split_whitespace().collect::<Vec<_>>();
    let mut tokens = original.clone();
    let mut shuffled = None;
    if tokens.len() >= 2 {
        for _ in 0..=MAX_RESHUFFLES {
            tokens.shuffle(rng);
            if tokens != original {
                shuffled = Some(tokens.join(" "));
                break;
            }
        }
    }

    let typo = add_typo(correct, rng);
    let shuffled = shuffled.unwrap_or_else(|| {
        debug!("Shuffling {:?} kept its order, using a letter swap instead", correct);
        swap_similar_letters(correct)
    });

    [shuffled, typo]
}

/// Replaces one confusable letter, picked at random, with its look-alike.
pub fn add_typo<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let mut chars = text.chars().collect::<Vec<_>>();
    let candidates = chars
        .iter()
        .enumerate()
        .filter_map(|(i, c)| confusable(*c).map(|_| i))
        .collect::<Vec<_>>();

    match candidates.choose(rng) {
        Some(&i) if chars.len() >= 2 => {
            // candidates only holds indexes with a look-alike
            if let Some(swapped) = confusable(chars[i]) {
                chars[i] = swapped;
            }
            chars.into_iter().collect()
        }
        _ => toggle_diacritics(text),
    }
}

fn confusable(c: char) -> Option<char> {
    CONFUSABLE_LETTERS.iter().find_map(|&(a, b)| {
        if c == a {
            Some(b)
        } else if c == b {
            Some(a)
        } else {
            None
        }
    })
}

/// Swaps the classic dotted pairs (ب/ت, ج/ح, د/ذ), falling back to the
/// first confusable letter anywhere in the word.
fn swap_similar_letters(text: &str) -> String {
    let swapped = text.replacen('ب', "ت", 1).replacen('ج', "ح", 1).replacen('د', "ذ", 1);
    if swapped != text {
        return swapped;
    }

    let mut chars = text.chars().collect::<Vec<_>>();
    if let Some(i) = chars.iter().position(|c| confusable(*c).is_some()) {
        if let Some(swapped) = confusable(chars[i]) {
            chars[i] = swapped;
            return chars.into_iter().collect();
        }
    }
    toggle_diacritics(text)
}

/// Drops the short vowel marks and ends the word on a fatha.
fn toggle_diacritics(text: &str) -> String {
    let mut bare = text
        .chars()
        .filter(|c| !('\u{064B}'..='\u{0652}').contains(c))
        .collect::<String>();
    bare.push(FATHA);
    bare
}

fn is_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// Nudges `text` until it is non-blank and not already in `taken`.
fn make_distinct(text: String, taken: &[String], arabic: bool) -> String {
    let filler = if arabic { 'ا' } else { 'a' };
    let mut text = if text.trim().is_empty() {
        placeholders(if arabic {
            ARABIC_PLACEHOLDERS
        } else {
            TRANSLITERATION_PLACEHOLDERS
        })[taken.len().saturating_sub(1).min(1)]
        .clone()
    } else {
        text
    };
    while taken.contains(&text) {
        text.push(filler);
    }
    text
}

/// Builds the three options of a question and shuffles them.
///
/// The correct answer always gets id "a"; a distractor colliding with an
/// earlier option is altered so that all three texts differ.
pub fn build_options<R: Rng + ?Sized>(
    correct: &str,
    wrong: [String; 2],
    rng: &mut R,
) -> Vec<QuestionOption> {
    let arabic = is_arabic(correct) || wrong.iter().any(|w| is_arabic(w));

    let mut texts = vec![correct.to_string()];
    for w in wrong {
        let w = make_distinct(w, &texts, arabic);
        texts.push(w);
    }

    let mut options = texts
        .into_iter()
        .zip(["a", "b", "c"])
        .enumerate()
        .map(|(i, (text, id))| QuestionOption::new(id, text, i == 0))
        .collect::<Vec<_>>();

    // We shuffle the options so the correct one isn't always the first one
    options.shuffle(rng);
    options
}
