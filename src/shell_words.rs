//! POSIX-shell-style word splitting for `commandArgs`
//!
//! Supports single quotes (literal), double quotes (backslash escapes `\`,
//! `"`, `$` and `` ` ``) and backslash escapes outside quotes. A `#` at the
//! start of a word comments out the rest of the line. Nothing is expanded;
//! the result is handed to the process spawner verbatim.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("missing closing {0} quote")]
    UnterminatedQuote(char),
    #[error("trailing backslash")]
    TrailingEscape,
}

#[derive(Clone, Copy)]
enum State {
    Whitespace,
    Word,
    SingleQuoted,
    DoubleQuoted,
    Comment,
}

/// Split `input` into words the way a POSIX shell would
pub fn split(input: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut state = State::Whitespace;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        state = match state {
            State::Whitespace if c == '#' => State::Comment,
            State::Comment => match c {
                '\n' => State::Whitespace,
                _ => State::Comment,
            },
            State::Whitespace | State::Word => match c {
                c if c.is_whitespace() => {
                    if matches!(state, State::Word) {
                        words.push(std::mem::take(&mut word));
                    }
                    State::Whitespace
                }
                '\'' => State::SingleQuoted,
                '"' => State::DoubleQuoted,
                '\\' => {
                    word.push(chars.next().ok_or(SplitError::TrailingEscape)?);
                    State::Word
                }
                c => {
                    word.push(c);
                    State::Word
                }
            },
            State::SingleQuoted => match c {
                '\'' => State::Word,
                c => {
                    word.push(c);
                    State::SingleQuoted
                }
            },
            State::DoubleQuoted => match c {
                '"' => State::Word,
                '\\' => {
                    let escaped = chars.next().ok_or(SplitError::UnterminatedQuote('"'))?;
                    if !matches!(escaped, '\\' | '"' | '$' | '`') {
                        word.push('\\');
                    }
                    word.push(escaped);
                    State::DoubleQuoted
                }
                c => {
                    word.push(c);
                    State::DoubleQuoted
                }
            },
        };
    }

    match state {
        State::SingleQuoted => Err(SplitError::UnterminatedQuote('\'')),
        State::DoubleQuoted => Err(SplitError::UnterminatedQuote('"')),
        State::Word => {
            words.push(word);
            Ok(words)
        }
        State::Whitespace | State::Comment => Ok(words),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(split("").unwrap().is_empty());
        assert!(split("   \t ").unwrap().is_empty());
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(split("--new-window  -e htop").unwrap(), vec!["--new-window", "-e", "htop"]);
    }

    #[test]
    fn test_quoted_substrings_are_single_tokens() {
        assert_eq!(
            split(r#"--title "Text Editor" 'two  spaces'"#).unwrap(),
            vec!["--title", "Text Editor", "two  spaces"]
        );
    }

    #[test]
    fn test_adjacent_quotes_join() {
        assert_eq!(split(r#"--name="my app"x"#).unwrap(), vec!["--name=my appx"]);
        assert_eq!(split(r#"''"#).unwrap(), vec![""]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(split(r"a\ b c").unwrap(), vec!["a b", "c"]);
        assert_eq!(split(r#""say \"hi\"" "C:\path""#).unwrap(), vec![r#"say "hi""#, r"C:\path"]);
        assert_eq!(split(r"'no \escape'").unwrap(), vec![r"no \escape"]);
    }

    #[test]
    fn test_hash_starts_comment_only_at_word_start() {
        assert_eq!(split("--color #fff").unwrap(), vec!["--color"]);
        assert_eq!(split("#only a comment").unwrap(), Vec::<String>::new());
        assert_eq!(split("a#b '#quoted'").unwrap(), vec!["a#b", "#quoted"]);
        assert_eq!(split("one # skipped 'open\ntwo").unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn test_errors() {
        assert_eq!(split("'open"), Err(SplitError::UnterminatedQuote('\'')));
        assert_eq!(split("\"open"), Err(SplitError::UnterminatedQuote('"')));
        assert_eq!(split("end\\"), Err(SplitError::TrailingEscape));
    }
}
