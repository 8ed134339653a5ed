use crate::api::parameter::Declaration;
use crate::model::Bound;
use crate::parser::{
    ConsoleInterface, DeclaredOption, Engine, GeneralBinder, OptionEntry, Printer, UserInterface,
};

/// The builder for a command line binding run.
///
/// Declarations accumulate in order; `build` finalizes them into a
/// [`GeneralBinder`], which runs exactly once.
///
/// ### Example
/// ```
/// use optbind::{Bound, CommandLineBinder, Declaration, Scalar, Toggle};
///
/// let mut verbose = false;
/// let mut count: i64 = 0;
/// let binder = CommandLineBinder::new("program")
///     .usage("FILE..")
///     .arguments(Bound::at_least(1))
///     .declare(Declaration::flag(Toggle::new(&mut verbose), "verbose").short('v'))
///     .declare(Declaration::option(Scalar::new(&mut count), "count").default("1"))
///     .build();
///
/// let positionals = binder
///     .bind_tokens(vec!["-v", "input.txt"].as_slice())
///     .unwrap();
///
/// assert!(verbose);
/// assert_eq!(count, 1);
/// assert_eq!(positionals.get(0), Some("input.txt"));
/// ```
pub struct CommandLineBinder<'a> {
    program: String,
    usage: Option<String>,
    bound: Bound,
    options: Vec<DeclaredOption<'a>>,
    entries: Vec<OptionEntry>,
}

impl<'a> std::fmt::Debug for CommandLineBinder<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLineBinder")
            .field("program", &self.program)
            .field("usage", &self.usage)
            .field("bound", &self.bound)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> CommandLineBinder<'a> {
    /// Start a binding run for `program`.
    /// The program name only affects the help header.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            usage: None,
            bound: Bound::default(),
            options: Vec::default(),
            entries: Vec::default(),
        }
    }

    /// Document the positional grammar for the help usage line
    /// (ex: `SRC DST`).
    pub fn usage(mut self, grammar: impl Into<String>) -> Self {
        self.usage.replace(grammar.into());
        self
    }

    /// Constrain how many positional tokens must remain once every option
    /// is consumed.
    /// Unconstrained by default.
    pub fn arguments(mut self, bound: Bound) -> Self {
        self.bound = bound;
        self
    }

    /// Register a declaration.
    /// Earlier declarations match the token stream first, and render first
    /// in the help output.
    pub fn declare(mut self, declaration: Declaration<'a>) -> Self {
        let (option, entry) = declaration.into_parts();
        self.options.push(option);
        self.entries.push(entry);
        self
    }

    /// Finalize into a [`GeneralBinder`].
    pub fn build(self) -> GeneralBinder<'a> {
        self.build_with_interface(Box::<ConsoleInterface>::default())
    }

    fn build_with_interface(self, user_interface: Box<dyn UserInterface>) -> GeneralBinder<'a> {
        let CommandLineBinder {
            program,
            usage,
            bound,
            options,
            mut entries,
        } = self;
        entries.push(OptionEntry::help_flag());

        GeneralBinder::new(
            Engine::new(options, bound),
            Printer::terminal(program, usage, entries),
            user_interface,
        )
    }
}
