pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";

// A literal "--" ends option matching; everything after it is positional.
pub(crate) const TERMINATOR: &str = "--";

pub(crate) const NEGATION_PREFIX: &str = "no-";
pub(crate) const ERROR_PREFIX: &str = "error: ";
