//! Text analysis for the intent classifier.
//!
//! Turns a raw user message into a bag of crude Spanish stems:
//! [`tokenize`] lower-cases, strips punctuation and splits on whitespace;
//! [`stem`] chops one plural or infinitive suffix. The training data was
//! tuned against exactly these rules, so they are deliberately not a real
//! linguistic stemmer.

/// Accented letters kept alongside ASCII word characters.
const SPANISH_LETTERS: &[char] = &['á', 'é', 'í', 'ó', 'ú', 'ü', 'ñ'];

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || SPANISH_LETTERS.contains(&c)
}

/// Split text into lower-case tokens, left to right.
///
/// Everything except ASCII word characters, whitespace and `áéíóúüñ` is
/// dropped before splitting, so `"¿Dónde?"` becomes `["dónde"]` and a
/// message of pure punctuation yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text.to_lowercase().chars().filter(|&c| is_kept(c)).collect();
    cleaned.split_whitespace().map(str::to_owned).collect()
}

/// Strip one suffix from a token. First matching rule wins:
///
/// 1. `-es` → drop 2 chars
/// 2. `-s` → drop 1 char
/// 3. `-ar` / `-er` / `-ir` → drop 2 chars
/// 4. otherwise unchanged
///
/// Rule 1 shadows rule 2, so `"mes"` stems to `"m"`.
pub fn stem(token: &str) -> String {
    // All suffixes are ASCII, so byte slicing stays on char boundaries.
    if let Some(rest) = token.strip_suffix("es") {
        return rest.to_owned();
    }
    if let Some(rest) = token.strip_suffix('s') {
        return rest.to_owned();
    }
    if token.ends_with("ar") || token.ends_with("er") || token.ends_with("ir") {
        return token[..token.len() - 2].to_owned();
    }
    token.to_owned()
}

/// Tokenize and stem in one pass. This is the representation the
/// classifier trains and scores on.
pub fn analyze(text: &str) -> Vec<String> {
    tokenize(text).iter().map(|t| stem(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("Quiero  RESERVAR\tuna mesa"),
            vec!["quiero", "reservar", "una", "mesa"]
        );
    }

    #[test]
    fn tokenize_keeps_spanish_letters_and_drops_punctuation() {
        assert_eq!(
            tokenize("¿Dónde están ubicados?"),
            vec!["dónde", "están", "ubicados"]
        );
        assert_eq!(tokenize("¡Añejo, pingüino!"), vec!["añejo", "pingüino"]);
    }

    #[test]
    fn tokenize_lowercases_accented_capitals() {
        assert_eq!(tokenize("ÁRBOL ÑANDÚ"), vec!["árbol", "ñandú"]);
    }

    #[test]
    fn tokenize_strips_letters_outside_the_spanish_set() {
        assert_eq!(tokenize("garçon à"), vec!["garon"]);
    }

    #[test]
    fn tokenize_keeps_digits_and_underscores() {
        assert_eq!(tokenize("mesa_4 para 12"), vec!["mesa_4", "para", "12"]);
    }

    #[test]
    fn tokenize_empty_and_punctuation_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("?!¿¡...").is_empty());
    }

    #[test]
    fn stem_plural_s() {
        assert_eq!(stem("cervezas"), "cerveza");
        assert_eq!(stem("reservas"), "reserva");
    }

    #[test]
    fn stem_plural_es_wins_over_other_rules() {
        assert_eq!(stem("bares"), "bar");
        assert_eq!(stem("mes"), "m");
        assert_eq!(stem("es"), "");
    }

    #[test]
    fn stem_infinitives() {
        assert_eq!(stem("comer"), "com");
        assert_eq!(stem("reservar"), "reserv");
        assert_eq!(stem("pedir"), "ped");
    }

    #[test]
    fn stem_no_rule_matches() {
        assert_eq!(stem("hola"), "hola");
        assert_eq!(stem("mesa"), "mesa");
    }

    #[test]
    fn stem_does_not_chain_rules() {
        // "-es" is stripped once; the remaining "-ar" stays.
        assert_eq!(stem("lugares"), "lugar");
    }

    #[test]
    fn analyze_combines_both_steps() {
        assert_eq!(
            analyze("Quiero reservar mesas"),
            vec!["quiero", "reserv", "mesa"]
        );
    }
}
