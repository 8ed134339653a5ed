mod core;
mod model;

pub(crate) use self::core::{match_flag, match_option};
pub(crate) use model::{MatchError, MatchedSpan, OptionConfig};
