//! Hype phrases kept out of candidate-facing text.
//!
//! Generic superlatives ("exciting opportunity", "world-class") say nothing
//! about the role. Generators swap them for a plain alternative; the job ad
//! review reports them.

use tata_core::input::SupportedLanguage;

struct HypePhrase {
    /// Lowercase
    phrase: &'static str,
    plain: &'static str,
}

const fn hype(phrase: &'static str, plain: &'static str) -> HypePhrase {
    HypePhrase { phrase, plain }
}

const EN: &[HypePhrase] = &[
    hype("exciting opportunity", "opportunity"),
    hype("amazing opportunity", "opportunity"),
    hype("fantastic opportunity", "opportunity"),
    hype("incredible opportunity", "opportunity"),
    hype("unique opportunity", "opportunity"),
    hype("once in a lifetime", "rare"),
    hype("game changer", "impactful"),
    hype("game-changer", "impactful"),
    hype("world-class", "excellent"),
    hype("world class", "excellent"),
    hype("best in class", "leading"),
    hype("best-in-class", "leading"),
    hype("cutting edge", "innovative"),
    hype("cutting-edge", "innovative"),
    hype("state of the art", "modern"),
    hype("state-of-the-art", "modern"),
    hype("revolutionary", "innovative"),
    hype("groundbreaking", "pioneering"),
    hype("disruptive", "transformative"),
    hype("synergy", "collaboration"),
    hype("leverage", "use"),
    hype("paradigm shift", "significant change"),
    hype("think outside the box", "think creatively"),
    hype("hit the ground running", "contribute quickly"),
    hype("fast-paced environment", "dynamic workplace"),
    hype("dynamic environment", "varied workplace"),
    hype("rockstar", "skilled professional"),
    hype("rock star", "skilled professional"),
    hype("ninja", "expert"),
    hype("guru", "specialist"),
    hype("wizard", "expert"),
    hype("superstar", "high performer"),
    hype("unicorn", "specialist"),
];

const SV: &[HypePhrase] = &[
    hype("spännande möjlighet", "möjlighet"),
    hype("fantastisk möjlighet", "möjlighet"),
    hype("unik möjlighet", "möjlighet"),
    hype("världsklass", "hög klass"),
    hype("banbrytande", "nyskapande"),
    hype("revolutionerande", "nytänkande"),
    hype("synergi", "samarbete"),
    hype("paradigmskifte", "stor förändring"),
    hype("rockstjärna", "skicklig medarbetare"),
    hype("ninja", "expert"),
    hype("guru", "specialist"),
];

const DA: &[HypePhrase] = &[
    hype("spændende mulighed", "mulighed"),
    hype("fantastisk mulighed", "mulighed"),
    hype("unik mulighed", "mulighed"),
    hype("verdensklasse", "høj kvalitet"),
    hype("banebrydende", "nyskabende"),
    hype("revolutionerende", "nytænkende"),
    hype("synergi", "samarbejde"),
    hype("paradigmeskift", "stor forandring"),
    hype("rockstjerne", "dygtig medarbejder"),
    hype("ninja", "ekspert"),
    hype("guru", "specialist"),
];

const NO: &[HypePhrase] = &[
    hype("spennende mulighet", "mulighet"),
    hype("fantastisk mulighet", "mulighet"),
    hype("unik mulighet", "mulighet"),
    hype("verdensklasse", "høy kvalitet"),
    hype("banebrytende", "nyskapende"),
    hype("revolusjonerende", "nytenkende"),
    hype("synergi", "samarbeid"),
    hype("paradigmeskifte", "stor endring"),
    hype("rockestjerne", "dyktig medarbeider"),
    hype("ninja", "ekspert"),
    hype("guru", "spesialist"),
];

const DE: &[HypePhrase] = &[
    hype("spannende möglichkeit", "möglichkeit"),
    hype("fantastische möglichkeit", "möglichkeit"),
    hype("einzigartige möglichkeit", "möglichkeit"),
    hype("weltklasse", "hohe qualität"),
    hype("bahnbrechend", "wegweisend"),
    hype("revolutionär", "innovativ"),
    hype("synergie", "zusammenarbeit"),
    hype("paradigmenwechsel", "grundlegender wandel"),
    hype("rockstar", "kompetente fachkraft"),
    hype("ninja", "experte"),
    hype("guru", "spezialist"),
];

const ALL: [&[HypePhrase]; 5] = [EN, SV, DA, NO, DE];

fn phrases_for(language: SupportedLanguage) -> &'static [HypePhrase] {
    match language {
        SupportedLanguage::English => EN,
        SupportedLanguage::Swedish => SV,
        SupportedLanguage::Danish => DA,
        SupportedLanguage::Norwegian => NO,
        SupportedLanguage::German => DE,
    }
}

/// Hype phrases of `language` found in `text`, in order of first appearance.
pub fn find(text: &str, language: SupportedLanguage) -> Vec<&'static str> {
    let mut found = Vec::new();
    for (start, _) in text.char_indices() {
        if let Some((_, entry)) = longest_match(text, start, &[phrases_for(language)]) {
            if !found.contains(&entry.phrase) {
                found.push(entry.phrase);
            }
        }
    }
    found
}

/// Replace every hype phrase, in any supported language, with its plain
/// alternative.
pub fn scrub(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(c) = text[pos..].chars().next() {
        match longest_match(text, pos, &ALL) {
            Some((end, entry)) => {
                push_matching_case(&mut out, &text[pos..end], entry.plain);
                pos = end;
            }
            None => {
                out.push(c);
                pos += c.len_utf8();
            }
        }
    }
    out
}

pub(crate) fn scrub_all(items: &[String]) -> Vec<String> {
    items.iter().map(|item| scrub(item)).collect()
}

/// The longest whole-word phrase starting at byte `start`, with its end.
fn longest_match(
    text: &str,
    start: usize,
    tables: &[&'static [HypePhrase]],
) -> Option<(usize, &'static HypePhrase)> {
    let at_word_start = text[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphanumeric());
    if !at_word_start {
        return None;
    }

    let mut best: Option<(usize, &'static HypePhrase)> = None;
    for entry in tables.iter().flat_map(|table| table.iter()) {
        let Some(end) = match_at(text, start, entry.phrase) else {
            continue;
        };
        let at_word_end = text[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
        if at_word_end && best.is_none_or(|(best_end, _)| end > best_end) {
            best = Some((end, entry));
        }
    }
    best
}

/// Case-insensitive prefix match of `phrase` at `start`; returns the end byte.
fn match_at(text: &str, start: usize, phrase: &str) -> Option<usize> {
    let mut rest = text[start..].char_indices();
    let mut end = start;
    for expected in phrase.chars() {
        let (offset, c) = rest.next()?;
        let mut lower = c.to_lowercase();
        if lower.next() != Some(expected) || lower.next().is_some() {
            return None;
        }
        end = start + offset + c.len_utf8();
    }
    Some(end)
}

fn push_matching_case(out: &mut String, original: &str, plain: &str) {
    let capitalized = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = plain.chars();
    match chars.next() {
        Some(first) if capitalized => {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
        _ => out.push_str(plain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_replaces_phrases_and_keeps_the_rest() {
        assert_eq!(
            scrub("An exciting opportunity for a world-class engineer."),
            "An opportunity for a excellent engineer."
        );
        assert_eq!(scrub("Join our team in Oslo"), "Join our team in Oslo");
    }

    #[test]
    fn scrub_keeps_sentence_case() {
        assert_eq!(scrub("Rockstar wanted"), "Skilled professional wanted");
        assert_eq!(scrub("Eine spannende Möglichkeit"), "Eine möglichkeit");
        assert_eq!(scrub("Spannende Möglichkeit in Berlin"), "Möglichkeit in Berlin");
    }

    #[test]
    fn whole_words_only() {
        assert_eq!(scrub("gurus and ninjas"), "gurus and ninjas");
        assert_eq!(scrub("Leveraged finance"), "Leveraged finance");
    }

    #[test]
    fn longest_phrase_wins() {
        assert_eq!(scrub("a fast-paced environment"), "a dynamic workplace");
    }

    #[test]
    fn find_is_per_language_and_ordered() {
        let text = "Unik möjlighet för en rockstjärna. Unik möjlighet igen.";
        assert_eq!(
            find(text, SupportedLanguage::Swedish),
            vec!["unik möjlighet", "rockstjärna"]
        );
        assert!(find(text, SupportedLanguage::English).is_empty());
    }
}
