use crate::constant::ERROR_PREFIX;
use crate::parser::BindError;

/// Where binding output lands: help text and diagnostics.
pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: BindError);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: BindError) {
        eprintln!("{ERROR_PREFIX}{error}");
    }
}
