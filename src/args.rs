/// Split a raw argument string into tokens, honoring single
/// and double quotes around whitespace. Quote characters are
/// consumed, not kept; adjacent quoted segments join into one
/// token; an unterminated quote closes at end of input.
///
/// This is intentionally a simplified shell-word split: no
/// escape sequences, no nested quotes, no expansion.
#[must_use]
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in raw.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '\'' || ch == '"' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokenize("--env production"), vec!["--env", "production"]);
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(tokenize("  a \t b  "), vec!["a", "b"]);
    }

    #[test]
    fn double_quotes_keep_spaces() {
        assert_eq!(
            tokenize(r#"--msg "hello world""#),
            vec!["--msg", "hello world"]
        );
    }

    #[test]
    fn single_quotes_keep_spaces() {
        assert_eq!(tokenize("--var 'a b c'"), vec!["--var", "a b c"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert_eq!(tokenize(""), Vec::<String>::new());
        assert_eq!(tokenize("   \t "), Vec::<String>::new());
    }

    #[test]
    fn quoted_segments_concatenate() {
        assert_eq!(tokenize(r#"a"b"c"#), vec!["abc"]);
        assert_eq!(tokenize("a'b c'd"), vec!["ab cd"]);
    }

    #[test]
    fn unterminated_quote_closes_implicitly() {
        assert_eq!(tokenize(r#"--msg "half done"#), vec!["--msg", "half done"]);
    }

    #[test]
    fn empty_quotes_produce_empty_token() {
        assert_eq!(tokenize(r#"a "" b"#), vec!["a", "", "b"]);
    }

    #[test]
    fn other_quote_kind_is_literal() {
        assert_eq!(tokenize(r#"'it"s' fine"#), vec![r#"it"s"#, "fine"]);
    }
}
