use crate::api::field::{Bindable, Scalar, Toggle};
use crate::cast::Cast;
use crate::constant::NEGATION_PREFIX;
use crate::matcher::OptionConfig;
use crate::parser::{DeclaredOption, OptionEntry};

/// One option declaration: a binding target, its logical name, and the
/// optional short form, default literal, and help text.
///
/// The long option name is derived from the logical name with underscores
/// rewritten to hyphens (ex: `max_count` becomes `--max-count`).
pub struct Declaration<'a> {
    capture: Box<dyn Bindable + 'a>,
    name: String,
    flag: bool,
    short: Option<char>,
    default: Option<String>,
    help: Option<String>,
}

impl<'a> std::fmt::Debug for Declaration<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let class = if self.flag { "Flag" } else { "Option" };
        let short = match &self.short {
            Some(s) => format!(" -{s},"),
            None => "".to_string(),
        };

        write!(
            f,
            "{class}[--{name},{short} default: {default:?}]",
            name = self.name,
            default = self.default,
        )
    }
}

impl<'a> Declaration<'a> {
    /// Declare a value-taking option.
    ///
    /// Without a default, the option is required; a run that never matches
    /// it reports `MissingRequiredOption`.
    ///
    /// ### Example
    /// ```
    /// use optbind::{CommandLineBinder, Declaration, Scalar};
    ///
    /// let mut count: i64 = 0;
    /// let binder = CommandLineBinder::new("program")
    ///     .declare(Declaration::option(Scalar::new(&mut count), "count").short('c'))
    ///     .build();
    ///
    /// binder.bind_tokens(vec!["-c", "5"].as_slice()).unwrap();
    ///
    /// assert_eq!(count, 5);
    /// ```
    pub fn option<T: Cast + 'a>(field: Scalar<'a, T>, name: impl Into<String>) -> Self {
        Self {
            capture: Box::new(field),
            name: name.into(),
            flag: false,
            short: None,
            default: None,
            help: None,
        }
    }

    /// Declare a boolean flag.
    ///
    /// Flag `x` also registers the negated long form `no-x`; giving both
    /// forms is a conflict.
    /// Flags default to `false` unless a default literal says otherwise.
    ///
    /// ### Example
    /// ```
    /// use optbind::{CommandLineBinder, Declaration, Toggle};
    ///
    /// let mut verbose = false;
    /// let binder = CommandLineBinder::new("program")
    ///     .declare(Declaration::flag(Toggle::new(&mut verbose), "verbose").short('v'))
    ///     .build();
    ///
    /// binder.bind_tokens(vec!["--verbose"].as_slice()).unwrap();
    ///
    /// assert!(verbose);
    /// ```
    pub fn flag(field: Toggle<'a>, name: impl Into<String>) -> Self {
        Self {
            capture: Box::new(field),
            name: name.into(),
            flag: true,
            short: None,
            default: None,
            help: None,
        }
    }

    /// Set the short form (ex: `-c`).
    /// If repeated, only the final short form applies.
    pub fn short(mut self, short: char) -> Self {
        self.short.replace(short);
        self
    }

    /// Set the default literal, cast through the same path as a matched
    /// value token.
    /// A malformed default is a configuration defect, reported at bind time.
    pub fn default(mut self, literal: impl Into<String>) -> Self {
        self.default.replace(literal.into());
        self
    }

    /// Document the help message for this option, possibly multi-line.
    /// If repeated, only the final message applies.
    pub fn help(mut self, message: impl Into<String>) -> Self {
        self.help.replace(message.into());
        self
    }

    pub(crate) fn into_parts(self) -> (DeclaredOption<'a>, OptionEntry) {
        let Declaration {
            capture,
            name,
            flag,
            short,
            default,
            help,
        } = self;
        let long = name.replace('_', "-");
        let config = OptionConfig::new(long.clone(), short, capture.requires_value());
        let negated = flag.then(|| {
            OptionConfig::new(format!("{NEGATION_PREFIX}{long}"), None, false)
        });
        // Flags always resolve; an unspecified flag is simply false.
        let default = default.or_else(|| flag.then(|| "false".to_string()));

        let rendering = if flag {
            match short {
                Some(s) => format!("-{s}, --[{NEGATION_PREFIX}]{long}"),
                None => format!("--[{NEGATION_PREFIX}]{long}"),
            }
        } else {
            config.display_name()
        };
        let entry = OptionEntry::new(rendering, capture.hint(), default.clone(), help);

        (
            DeclaredOption {
                config,
                negated,
                capture,
                default,
            },
            entry,
        )
    }
}
