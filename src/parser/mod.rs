mod base;
mod interface;
mod middleware;
mod printer;

pub use base::{BindError, Positionals};
pub use middleware::GeneralBinder;

pub(crate) use base::{DeclaredOption, Engine};
pub(crate) use interface::{ConsoleInterface, UserInterface};
pub(crate) use printer::{OptionEntry, Printer};

#[cfg(test)]
pub(crate) use interface::util;
