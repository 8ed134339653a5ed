use thiserror::Error;

/// The matching identity of one declared option: its long form, optional
/// short form, and whether a match must consume a following value token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionConfig {
    long: String,
    short: Option<char>,
    requires_value: bool,
}

impl OptionConfig {
    pub(crate) fn new(long: impl Into<String>, short: Option<char>, requires_value: bool) -> Self {
        Self {
            long: long.into(),
            short,
            requires_value,
        }
    }

    pub(crate) fn long(&self) -> &str {
        &self.long
    }

    pub(crate) fn requires_value(&self) -> bool {
        self.requires_value
    }

    /// Exact-equality matching: `--name`, or `-c` when a short form exists.
    /// No combined `--name=value` syntax, no short-option clustering.
    pub(crate) fn matches(&self, token: &str) -> bool {
        if let Some(rest) = token.strip_prefix("--") {
            return rest == self.long;
        }

        match self.short {
            Some(short) => {
                let mut chars = token.chars();
                chars.next() == Some('-')
                    && chars.next() == Some(short)
                    && chars.next().is_none()
            }
            None => false,
        }
    }

    /// The user-facing spelling, as rendered in help text and diagnostics.
    pub(crate) fn display_name(&self) -> String {
        match self.short {
            Some(short) => format!("-{short}, --{long}", long = self.long),
            None => format!("--{long}", long = self.long),
        }
    }
}

/// A consumed option occurrence.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MatchedSpan {
    /// Index of the name token in the original argument vector.
    pub(crate) position: usize,
    /// The consumed value token, for value-taking options.
    pub(crate) value: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("option '{option}' requires a value")]
    MissingValue { option: String },

    #[error("both '{positive}' and '{negative}' were specified")]
    ConflictingFlags { positive: String, negative: String },
}
