use crate::constant::TERMINATOR;

/// One raw argument string, tagged with its index in the original argument
/// vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    text: String,
    position: usize,
}

impl Token {
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }
}

/// The ordered, mutable sequence of raw tokens shared across the whole
/// matching phase.
///
/// Matching removes contiguous spans in place; the relative order of
/// untouched tokens is always preserved.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub(crate) fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: args
                .into_iter()
                .enumerate()
                .map(|(position, text)| Token {
                    text: text.into(),
                    position,
                })
                .collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(Token::text)
    }

    /// Find the first token satisfying the predicate, scanning left to right.
    /// The scan never looks at or beyond a literal `--` token.
    pub(crate) fn find_before_terminator(
        &self,
        predicate: impl Fn(&str) -> bool,
    ) -> Option<usize> {
        for (index, token) in self.tokens.iter().enumerate() {
            if token.text == TERMINATOR {
                return None;
            }

            if predicate(&token.text) {
                return Some(index);
            }
        }

        None
    }

    /// Remove `count` tokens starting at `start` as one contiguous span.
    pub(crate) fn remove_span(&mut self, start: usize, count: usize) {
        assert!(
            start + count <= self.tokens.len(),
            "internal error - span must lie within the stream"
        );
        self.tokens.drain(start..start + count);
    }

    /// Remove the first literal `--` token, if any.
    /// Later occurrences are ordinary positional tokens.
    pub(crate) fn strip_terminator(&mut self) {
        if let Some(index) = self.tokens.iter().position(|t| t.text == TERMINATOR) {
            self.tokens.remove(index);
        }
    }

    pub(crate) fn into_strings(self) -> Vec<String> {
        self.tokens.into_iter().map(|t| t.text).collect()
    }
}
