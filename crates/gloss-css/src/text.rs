//! Identifier casing for custom property names.

/// Convert an identifier to kebab case.
///
/// Words break on any non-alphanumeric character, on a lowercase to
/// uppercase transition, before the last capital of an acronym that starts
/// a new word, and between letters and digits:
///
/// - `fontSize` -> `font-size`
/// - `white2black` -> `white-2-black`
/// - `XLarge` -> `x-large`
/// - `core/group` -> `core-group`
#[must_use]
pub fn kebab_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
}

fn classify(c: char) -> Option<CharClass> {
    if c.is_ascii_digit() {
        Some(CharClass::Digit)
    } else if c.is_uppercase() {
        Some(CharClass::Upper)
    } else if c.is_alphabetic() {
        Some(CharClass::Lower)
    } else {
        None
    }
}

fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        let Some(class) = classify(c) else {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        };

        if let Some(prev) = i.checked_sub(1).and_then(|p| classify(chars[p])) {
            let next = chars.get(i + 1).copied().and_then(classify);
            let boundary = match (prev, class) {
                (CharClass::Lower, CharClass::Upper) => true,
                (CharClass::Digit, CharClass::Lower | CharClass::Upper)
                | (CharClass::Lower | CharClass::Upper, CharClass::Digit) => true,
                (CharClass::Upper, CharClass::Upper) => next == Some(CharClass::Lower),
                _ => false,
            };
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}
