//! Word tokenization for sentiment scoring.

/// Split text into lowercase word tokens.
///
/// A token is a maximal run of alphanumeric characters. An apostrophe is kept
/// only when it sits between alphanumerics, so `don't` stays one token while
/// a trailing quote in `'quoted'` is stripped. All other punctuation and
/// whitespace terminates the current token. Whitespace-only input yields an
/// empty vector.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() {
            for lc in c.to_lowercase() {
                current.push(lc);
            }
        } else if c == '\''
            && !current.is_empty()
            && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric())
        {
            current.push('\'');
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_lowercases() {
        assert_eq!(tokenize("Revenue GREW fast"), vec!["revenue", "grew", "fast"]);
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(
            tokenize("profit, loss; (gain) -- end."),
            vec!["profit", "loss", "gain", "end"]
        );
    }

    #[test]
    fn keeps_interior_apostrophes() {
        assert_eq!(tokenize("don't stop"), vec!["don't", "stop"]);
    }

    #[test]
    fn strips_quoting_apostrophes() {
        assert_eq!(tokenize("'quoted' words'"), vec!["quoted", "words"]);
    }

    #[test]
    fn keeps_digits_inside_tokens() {
        assert_eq!(tokenize("q3 2024 10-K"), vec!["q3", "2024", "10", "k"]);
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        assert!(tokenize("  \t\n  ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn punctuation_only_yields_nothing() {
        assert!(tokenize("... !!! ---").is_empty());
    }
}
