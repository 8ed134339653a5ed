use std::env;

use crate::parser::base::{Engine, Outcome, Positionals};
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;

/// The finalized binder.
/// Built via [`CommandLineBinder::build`](crate::CommandLineBinder::build).
pub struct GeneralBinder<'a> {
    engine: Engine<'a>,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl<'a> GeneralBinder<'a> {
    pub(crate) fn new(
        engine: Engine<'a>,
        printer: Printer,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            engine,
            printer,
            user_interface,
        }
    }

    /// Run the binder against the input tokens.
    ///
    /// Every declaration matches, casts, and consumes its tokens in
    /// declaration order; what remains of the stream becomes the
    /// [`Positionals`].
    ///
    /// Diagnostics are batched: a failing run prints every accumulated
    /// diagnostic (prefixed `error: `) and returns `Err(1)`.
    /// The help flag (`-h`/`--help`) takes priority over all diagnostics,
    /// printing usage plus options and returning `Err(0)`.
    pub fn bind_tokens(self, tokens: &[&str]) -> Result<Positionals, i32> {
        let GeneralBinder {
            engine,
            printer,
            user_interface,
        } = self;

        match engine.consume(tokens) {
            Ok(Outcome::Bound(positionals)) => Ok(positionals),
            Ok(Outcome::Help) => {
                printer.print_help(&*user_interface);
                Err(0)
            }
            Err(diagnostics) => {
                for diagnostic in diagnostics {
                    user_interface.print_error(diagnostic);
                }

                Err(1)
            }
        }
    }

    /// Run the binder against the Cli [`env::args`].
    ///
    /// Identical to [`GeneralBinder::bind_tokens`], except the failing paths
    /// exit the process (via [`std::process::exit`]) with the corresponding
    /// status code: `0` for help-requested, `1` for validation-failed.
    pub fn bind(self) -> Positionals {
        let command_input: Vec<String> = env::args().skip(1).collect();
        match self.bind_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(positionals) => positionals,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }
}
