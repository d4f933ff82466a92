//! Icelandic string collation.
//!
//! Implements the Icelandic tailoring of the Unicode collation order closely
//! enough for sorting program names: accented vowels, `ð`, `þ`, `æ` and `ö`
//! are letters of their own, other Latin accents only break ties.

use std::cmp::Ordering;

/// Icelandic primary alphabet. Letters not listed here sort after it by
/// code point.
const ALPHABET: &[char] = &[
    'a', 'á', 'b', 'c', 'd', 'ð', 'e', 'é', 'f', 'g', 'h', 'i', 'í', 'j', 'k', 'l', 'm', 'n',
    'o', 'ó', 'p', 'q', 'r', 's', 't', 'u', 'ú', 'v', 'w', 'x', 'y', 'ý', 'z', 'þ', 'æ', 'ö', 'å',
];

/// Letters that share a primary weight with an alphabet letter and only
/// differ at the secondary (accent) level.
const SECONDARY_VARIANTS: &[(char, char)] = &[
    ('ä', 'æ'),
    ('ø', 'ö'),
    ('à', 'a'),
    ('â', 'a'),
    ('ã', 'a'),
    ('ç', 'c'),
    ('đ', 'd'),
    ('è', 'e'),
    ('ê', 'e'),
    ('ë', 'e'),
    ('ì', 'i'),
    ('î', 'i'),
    ('ï', 'i'),
    ('ñ', 'n'),
    ('ò', 'o'),
    ('ô', 'o'),
    ('õ', 'o'),
    ('ù', 'u'),
    ('û', 'u'),
    ('ü', 'u'),
    ('ÿ', 'y'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Letter,
}

/// Collation element of a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Element {
    primary: (CharClass, u32),
    secondary: u8,
    /// 0 for lowercase, 1 for uppercase
    tertiary: u8,
}

fn element(ch: char) -> Element {
    let lower = ch.to_lowercase().next().unwrap_or(ch);
    let tertiary = u8::from(lower != ch);

    if ch.is_whitespace() {
        return Element {
            primary: (CharClass::Whitespace, 0),
            secondary: 0,
            tertiary: 0,
        };
    }

    if let Some(digit) = ch.to_digit(10) {
        return Element {
            primary: (CharClass::Digit, digit),
            secondary: 0,
            tertiary: 0,
        };
    }

    if lower.is_alphabetic() {
        if let Some(rank) = alphabet_rank(lower) {
            return Element {
                primary: (CharClass::Letter, rank),
                secondary: 0,
                tertiary,
            };
        }
        if let Some(&(_, base)) = SECONDARY_VARIANTS.iter().find(|(v, _)| *v == lower) {
            let rank = alphabet_rank(base).unwrap_or(u32::from(base));
            return Element {
                primary: (CharClass::Letter, rank),
                secondary: 1,
                tertiary,
            };
        }
        return Element {
            primary: (CharClass::Letter, ALPHABET.len() as u32 + u32::from(lower)),
            secondary: 0,
            tertiary,
        };
    }

    Element {
        primary: (CharClass::Punctuation, u32::from(ch)),
        secondary: 0,
        tertiary: 0,
    }
}

fn alphabet_rank(ch: char) -> Option<u32> {
    ALPHABET.iter().position(|&c| c == ch).map(|i| i as u32)
}

/// Compare two strings under Icelandic collation.
///
/// Primary letter order decides first; accents break remaining ties, then
/// case (lowercase before uppercase).
///
/// ```
/// use dagskra_core::programs::compare_icelandic;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_icelandic("Ás", "Az"), Ordering::Greater);
/// assert_eq!(compare_icelandic("Þórsmörk", "Zebra"), Ordering::Greater);
/// ```
pub fn compare_icelandic(a: &str, b: &str) -> Ordering {
    let left: Vec<Element> = a.chars().map(element).collect();
    let right: Vec<Element> = b.chars().map(element).collect();

    let primary = |els: &[Element]| els.iter().map(|e| e.primary).collect::<Vec<_>>();
    let secondary = |els: &[Element]| els.iter().map(|e| e.secondary).collect::<Vec<_>>();
    let tertiary = |els: &[Element]| els.iter().map(|e| e.tertiary).collect::<Vec<_>>();

    primary(&left)
        .cmp(&primary(&right))
        .then_with(|| secondary(&left).cmp(&secondary(&right)))
        .then_with(|| tertiary(&left).cmp(&tertiary(&right)))
}
