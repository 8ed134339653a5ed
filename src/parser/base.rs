use thiserror::Error;

use crate::api::Bindable;
use crate::cast::{Cast, CastError};
use crate::constant::{HELP_NAME, HELP_SHORT, NEGATION_PREFIX, TERMINATOR};
use crate::matcher::{match_flag, match_option, MatchError, OptionConfig};
use crate::model::Bound;
use crate::tokens::TokenStream;

/// A binding diagnostic.
///
/// Diagnostics are accumulated across the whole run and surfaced together;
/// a single run reports every defect found, not just the first.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    /// A value-taking option matched at the end of the stream.
    #[error("option '{option}' requires a value")]
    MissingValue {
        /// The option spelling (ex: `-c, --count`).
        option: String,
    },

    /// A token was rejected by the declared type, at parse time, default
    /// resolution time, or typed positional access.
    #[error("'{literal}' is not a valid {hint} for {subject}")]
    InvalidLiteral {
        /// What the literal was bound to (ex: `option '--count'`).
        subject: String,
        /// The offending raw token.
        literal: String,
        /// The expected type (ex: `<int>`).
        hint: &'static str,
    },

    /// An option without a default never matched.
    #[error("option '{option}' was not specified")]
    MissingRequiredOption {
        /// The option spelling.
        option: String,
    },

    /// Both the positive and negated forms of a flag were given.
    #[error("both '{positive}' and '{negative}' were specified")]
    ConflictingFlags {
        /// The positive long form.
        positive: String,
        /// The negated long form.
        negative: String,
    },

    /// A leftover `--`-prefixed token matched no declaration.
    #[error("unknown option '{token}'")]
    UnknownOption {
        /// The unrecognized token.
        token: String,
    },

    /// Fewer positional arguments than the configured minimum.
    #[error("too few arguments (expected at least {minimum}, given {given})")]
    TooFewArguments {
        /// The configured minimum.
        minimum: usize,
        /// The number of positional arguments given.
        given: usize,
    },

    /// More positional arguments than the configured maximum.
    #[error("too many arguments (expected at most {maximum}, given {given})")]
    TooManyArguments {
        /// The configured maximum.
        maximum: usize,
        /// The number of positional arguments given.
        given: usize,
    },

    /// Positional access beyond the end of the results.
    #[error("argument index {index} is out of range (length {length})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of positional arguments available.
        length: usize,
    },
}

impl From<MatchError> for BindError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::MissingValue { option } => BindError::MissingValue { option },
            MatchError::ConflictingFlags { positive, negative } => {
                BindError::ConflictingFlags { positive, negative }
            }
        }
    }
}

fn invalid_literal(subject: String, error: CastError) -> BindError {
    let CastError { literal, hint } = error;
    BindError::InvalidLiteral {
        subject,
        literal,
        hint,
    }
}

/// A fully resolved option declaration: matching identity plus the binding
/// it writes through.
pub(crate) struct DeclaredOption<'a> {
    pub(crate) config: OptionConfig,
    /// The auto-registered `--no-` form; present only for flags.
    pub(crate) negated: Option<OptionConfig>,
    pub(crate) capture: Box<dyn Bindable + 'a>,
    pub(crate) default: Option<String>,
}

impl<'a> std::fmt::Debug for DeclaredOption<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclaredOption")
            .field("config", &self.config)
            .field("negated", &self.negated)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// The result of a completed run.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// All options bound; these are the remaining positional arguments.
    Bound(Positionals),
    /// The help flag was given; all other validation is skipped.
    Help,
}

/// The matching engine.
///
/// Phase 1 (the builder) only collects declarations; this type runs phase 2
/// once, over all declarations in declaration order, against a single shared
/// token stream.
pub(crate) struct Engine<'a> {
    options: Vec<DeclaredOption<'a>>,
    bound: Bound,
}

impl<'a> Engine<'a> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default(), Bound::any())
    }

    pub(crate) fn new(options: Vec<DeclaredOption<'a>>, bound: Bound) -> Self {
        Self { options, bound }
    }

    /// Run the engine against the input tokens.
    ///
    /// Declaration order is matching precedence: each declaration scans the
    /// current stream left to right and consumes its first occurrence.
    /// The implicit help flag is matched last and short-circuits every other
    /// check.
    pub(crate) fn consume(self, tokens: &[&str]) -> Result<Outcome, Vec<BindError>> {
        let Engine { options, bound } = self;
        let mut stream = TokenStream::new(tokens.iter().copied());
        let mut diagnostics = Vec::default();

        for option in options {
            bind_option(&mut stream, option, &mut diagnostics);
        }

        let help_positive = OptionConfig::new(HELP_NAME, Some(HELP_SHORT), false);
        let help_negative =
            OptionConfig::new(format!("{NEGATION_PREFIX}{HELP_NAME}"), None, false);
        let help_requested = match match_flag(&mut stream, &help_positive, &help_negative) {
            Ok(value) => value.unwrap_or(false),
            Err(error) => {
                diagnostics.push(BindError::from(error));
                false
            }
        };

        if help_requested {
            return Ok(Outcome::Help);
        }

        // Leftover unknown options; the scan stops at the terminator, which
        // itself is stripped exactly once.
        for token in stream.iter() {
            if token == TERMINATOR {
                break;
            }

            if token.starts_with(TERMINATOR) {
                diagnostics.push(BindError::UnknownOption {
                    token: token.to_string(),
                });
            }
        }

        stream.strip_terminator();

        let given = stream.len();

        if let Some(minimum) = bound.min() {
            if given < minimum {
                diagnostics.push(BindError::TooFewArguments { minimum, given });
            }
        }

        if let Some(maximum) = bound.max() {
            if given > maximum {
                diagnostics.push(BindError::TooManyArguments { maximum, given });
            }
        }

        if diagnostics.is_empty() {
            Ok(Outcome::Bound(Positionals::new(stream.into_strings())))
        } else {
            Err(diagnostics)
        }
    }
}

fn bind_option(
    stream: &mut TokenStream,
    option: DeclaredOption<'_>,
    diagnostics: &mut Vec<BindError>,
) {
    let DeclaredOption {
        config,
        negated,
        mut capture,
        default,
    } = option;

    // Resolve the default literal first; a match below overwrites it.
    // A malformed default is a configuration defect, reported on the same
    // batched surface as parse-time diagnostics.
    if let Some(literal) = &default {
        if let Err(error) = capture.assign(literal) {
            diagnostics.push(invalid_literal(
                format!("the default value of '{}'", config.display_name()),
                error,
            ));
        }
    }

    match negated {
        Some(negative) => match match_flag(stream, &config, &negative) {
            Ok(Some(value)) => capture.set_present(value),
            Ok(None) => {}
            Err(error) => diagnostics.push(BindError::from(error)),
        },
        None => match match_option(stream, &config) {
            Ok(Some(span)) => {
                let Some(value) = span.value else {
                    unreachable!("internal error - a value option match must carry a value");
                };

                if let Err(error) = capture.assign(&value) {
                    diagnostics.push(invalid_literal(
                        format!("option '{}'", config.display_name()),
                        error,
                    ));
                }
            }
            Ok(None) => {
                if default.is_none() {
                    diagnostics.push(BindError::MissingRequiredOption {
                        option: config.display_name(),
                    });
                }
            }
            Err(error) => diagnostics.push(BindError::from(error)),
        },
    }
}

/// The positional arguments remaining after all option matching.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Positionals {
    values: Vec<String>,
}

impl Positionals {
    pub(crate) fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// The number of positional arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no positional arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The positional argument at `index`, in original relative order.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Iterate the positional arguments in original relative order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Typed access: cast the positional argument at `index`.
    ///
    /// Unlike binding diagnostics, this failure is recoverable; the caller
    /// may catch and react.
    ///
    /// ### Example
    /// ```
    /// use optbind::{Bound, CommandLineBinder};
    ///
    /// let positionals = CommandLineBinder::new("program")
    ///     .arguments(Bound::precisely(2))
    ///     .build()
    ///     .bind_tokens(vec!["1", "x"].as_slice())
    ///     .unwrap();
    ///
    /// assert_eq!(positionals.cast::<i64>(0).unwrap(), 1);
    /// assert!(positionals.cast::<i64>(1).is_err());
    /// ```
    pub fn cast<T: Cast>(&self, index: usize) -> Result<T, BindError> {
        let value = self.get(index).ok_or(BindError::IndexOutOfRange {
            index,
            length: self.values.len(),
        })?;

        T::cast(value).map_err(|error| invalid_literal(format!("argument {index}"), error))
    }
}

impl std::ops::Index<usize> for Positionals {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.values[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Declaration, Scalar, Toggle};
    use rstest::rstest;

    fn declared<'a>(declaration: Declaration<'a>) -> DeclaredOption<'a> {
        let (option, _entry) = declaration.into_parts();
        option
    }

    #[test]
    fn engine_empty() {
        // Setup
        let engine = Engine::empty();

        // Execute
        let result = engine.consume(&[]).unwrap();

        // Verify
        assert_eq!(result, Outcome::Bound(Positionals::default()));
    }

    #[test]
    fn engine_scenario() {
        // Setup
        let mut count: i64 = 0;
        let mut verbose = false;
        let engine = Engine::new(
            vec![
                declared(Declaration::option(Scalar::new(&mut count), "count")),
                declared(Declaration::flag(Toggle::new(&mut verbose), "verbose").short('b')),
            ],
            Bound::between(1, 2),
        );

        // Execute
        let result = engine
            .consume(vec!["--count", "5", "-b", "a", "b"].as_slice())
            .unwrap();

        // Verify
        assert_eq!(
            result,
            Outcome::Bound(Positionals::new(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(count, 5);
        assert!(verbose);
    }

    #[test]
    fn engine_underscore_becomes_hyphen() {
        // Setup
        let mut count: i64 = 0;
        let engine = Engine::new(
            vec![declared(Declaration::option(
                Scalar::new(&mut count),
                "max_count",
            ))],
            Bound::any(),
        );

        // Execute
        engine.consume(vec!["--max-count", "3"].as_slice()).unwrap();

        // Verify
        assert_eq!(count, 3);
    }

    #[test]
    fn engine_invalid_literal() {
        // Setup
        let mut count: i64 = 0;
        let engine = Engine::new(
            vec![declared(Declaration::option(Scalar::new(&mut count), "count"))],
            Bound::any(),
        );

        // Execute
        let diagnostics = engine.consume(vec!["--count", "x"].as_slice()).unwrap_err();

        // Verify
        assert_eq!(
            diagnostics,
            vec![BindError::InvalidLiteral {
                subject: "option '--count'".to_string(),
                literal: "x".to_string(),
                hint: "<int>",
            }]
        );
        assert_eq!(count, 0);
    }

    #[test]
    fn engine_missing_value() {
        // Setup
        let mut count: i64 = 0;
        let engine = Engine::new(
            vec![declared(Declaration::option(Scalar::new(&mut count), "count"))],
            Bound::any(),
        );

        // Execute
        let diagnostics = engine.consume(vec!["--count"].as_slice()).unwrap_err();

        // Verify
        assert_eq!(
            diagnostics,
            vec![BindError::MissingValue {
                option: "--count".to_string(),
            }]
        );
    }

    #[test]
    fn engine_missing_required() {
        // Setup
        let mut count: i64 = 0;
        let engine = Engine::new(
            vec![declared(Declaration::option(Scalar::new(&mut count), "count"))],
            Bound::any(),
        );

        // Execute
        let diagnostics = engine.consume(&[]).unwrap_err();

        // Verify
        assert_eq!(
            diagnostics,
            vec![BindError::MissingRequiredOption {
                option: "--count".to_string(),
            }]
        );
    }

    #[test]
    fn engine_default_round_trip() {
        // Setup
        let mut count: i64 = 0;
        let engine = Engine::new(
            vec![declared(
                Declaration::option(Scalar::new(&mut count), "count").default("17"),
            )],
            Bound::any(),
        );

        // Execute
        engine.consume(&[]).unwrap();

        // Verify: same typed value as casting the literal directly.
        assert_eq!(count, i64::cast("17").unwrap());
    }

    #[test]
    fn engine_malformed_default() {
        // Setup
        let mut count: i64 = 0;
        let engine = Engine::new(
            vec![declared(
                Declaration::option(Scalar::new(&mut count), "count").default("x"),
            )],
            Bound::any(),
        );

        // Execute: the option matches, yet the malformed default still reports.
        let diagnostics = engine.consume(vec!["--count", "5"].as_slice()).unwrap_err();

        // Verify
        assert_eq!(
            diagnostics,
            vec![BindError::InvalidLiteral {
                subject: "the default value of '--count'".to_string(),
                literal: "x".to_string(),
                hint: "<int>",
            }]
        );
        assert_eq!(count, 5);
    }

    #[rstest]
    #[case(vec![], false)]
    #[case(vec!["--dry-run"], true)]
    #[case(vec!["--no-dry-run"], false)]
    fn engine_flag_default(#[case] tokens: Vec<&str>, #[case] expected: bool) {
        // Setup
        let mut dry_run = false;
        let engine = Engine::new(
            vec![declared(Declaration::flag(Toggle::new(&mut dry_run), "dry_run"))],
            Bound::any(),
        );

        // Execute
        engine.consume(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(dry_run, expected);
    }

    #[rstest]
    #[case(vec!["--dry-run", "--no-dry-run"])]
    #[case(vec!["--no-dry-run", "--dry-run"])]
    fn engine_flag_conflict(#[case] tokens: Vec<&str>) {
        // Setup
        let mut dry_run = false;
        let engine = Engine::new(
            vec![declared(Declaration::flag(Toggle::new(&mut dry_run), "dry_run"))],
            Bound::any(),
        );

        // Execute
        let diagnostics = engine.consume(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(
            diagnostics,
            vec![BindError::ConflictingFlags {
                positive: "--dry-run".to_string(),
                negative: "--no-dry-run".to_string(),
            }]
        );
    }

    #[test]
    fn engine_terminator_halts_matching() {
        // Setup
        let mut count: i64 = 0;
        let engine = Engine::new(
            vec![declared(
                Declaration::option(Scalar::new(&mut count), "count").default("1"),
            )],
            Bound::any(),
        );

        // Execute
        let result = engine
            .consume(vec!["--", "--count", "5"].as_slice())
            .unwrap();

        // Verify: the declaration never matches, and the terminator is
        // removed exactly once.
        assert_eq!(
            result,
            Outcome::Bound(Positionals::new(vec![
                "--count".to_string(),
                "5".to_string(),
            ]))
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn engine_second_terminator_is_positional() {
        // Setup
        let engine = Engine::empty();

        // Execute
        let result = engine.consume(vec!["--", "--"].as_slice()).unwrap();

        // Verify
        assert_eq!(
            result,
            Outcome::Bound(Positionals::new(vec!["--".to_string()]))
        );
    }

    #[test]
    fn engine_unknown_option() {
        // Setup
        let engine = Engine::empty();

        // Execute
        let diagnostics = engine
            .consume(vec!["--unknown-flag", "a"].as_slice())
            .unwrap_err();

        // Verify
        assert_eq!(
            diagnostics,
            vec![BindError::UnknownOption {
                token: "--unknown-flag".to_string(),
            }]
        );
    }

    #[test]
    fn engine_duplicate_reports_leftover() {
        // Setup
        let mut count: i64 = 0;
        let engine = Engine::new(
            vec![declared(Declaration::option(Scalar::new(&mut count), "count"))],
            Bound::any(),
        );

        // Execute
        let diagnostics = engine
            .consume(vec!["--count", "5", "--count", "7"].as_slice())
            .unwrap_err();

        // Verify: first occurrence wins, the duplicate is not silently ignored.
        assert_eq!(
            diagnostics,
            vec![BindError::UnknownOption {
                token: "--count".to_string(),
            }]
        );
        assert_eq!(count, 5);
    }

    #[rstest]
    #[case(vec!["a", "b"], None)]
    #[case(vec!["a"], Some(BindError::TooFewArguments { minimum: 2, given: 1 }))]
    #[case(vec!["a", "b", "c"], Some(BindError::TooManyArguments { maximum: 2, given: 3 }))]
    fn engine_precise_bound(#[case] tokens: Vec<&str>, #[case] expected: Option<BindError>) {
        // Setup
        let engine = Engine::new(Vec::default(), Bound::precisely(2));

        // Execute
        let result = engine.consume(tokens.as_slice());

        // Verify
        match expected {
            None => {
                assert_matches!(result, Ok(Outcome::Bound(_)));
            }
            Some(error) => {
                assert_eq!(result.unwrap_err(), vec![error]);
            }
        }
    }

    #[rstest]
    #[case(vec!["-h"])]
    #[case(vec!["--help"])]
    #[case(vec!["-h", "bogus", "--unknown"])]
    fn engine_help_short_circuits(#[case] tokens: Vec<&str>) {
        // Setup: a required option is missing, and leftovers abound.
        let mut count: i64 = 0;
        let engine = Engine::new(
            vec![declared(Declaration::option(Scalar::new(&mut count), "count"))],
            Bound::precisely(0),
        );

        // Execute
        let result = engine.consume(tokens.as_slice()).unwrap();

        // Verify: help takes priority over every accumulated diagnostic.
        assert_eq!(result, Outcome::Help);
    }

    #[test]
    fn engine_batches_diagnostics() {
        // Setup
        let mut count: i64 = 0;
        let mut rate: f64 = 0.0;
        let engine = Engine::new(
            vec![
                declared(Declaration::option(Scalar::new(&mut count), "count")),
                declared(Declaration::option(Scalar::new(&mut rate), "rate")),
            ],
            Bound::any(),
        );

        // Execute
        let diagnostics = engine
            .consume(vec!["--count", "x", "--bogus"].as_slice())
            .unwrap_err();

        // Verify: one run reports every defect found.
        assert_eq!(
            diagnostics,
            vec![
                BindError::InvalidLiteral {
                    subject: "option '--count'".to_string(),
                    literal: "x".to_string(),
                    hint: "<int>",
                },
                BindError::MissingRequiredOption {
                    option: "--rate".to_string(),
                },
                BindError::UnknownOption {
                    token: "--bogus".to_string(),
                },
            ]
        );
    }

    #[test]
    fn positionals_access() {
        let positionals = Positionals::new(vec!["5".to_string(), "x".to_string()]);

        assert_eq!(positionals.len(), 2);
        assert!(!positionals.is_empty());
        assert_eq!(positionals.get(0), Some("5"));
        assert_eq!(&positionals[1], "x");
        assert_eq!(positionals.get(2), None);
        assert_eq!(positionals.iter().collect::<Vec<&str>>(), vec!["5", "x"]);
    }

    #[test]
    fn positionals_cast() {
        let positionals = Positionals::new(vec!["5".to_string(), "x".to_string()]);

        assert_eq!(positionals.cast::<i64>(0).unwrap(), 5);
        assert_eq!(
            positionals.cast::<i64>(1).unwrap_err(),
            BindError::InvalidLiteral {
                subject: "argument 1".to_string(),
                literal: "x".to_string(),
                hint: "<int>",
            }
        );
        assert_eq!(
            positionals.cast::<i64>(2).unwrap_err(),
            BindError::IndexOutOfRange {
                index: 2,
                length: 2,
            }
        );
    }
}
