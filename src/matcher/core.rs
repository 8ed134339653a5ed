use crate::matcher::{MatchError, MatchedSpan, OptionConfig};
use crate::tokens::TokenStream;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Scan the stream for the first occurrence of `config` and consume it,
/// together with its value token when the option takes a value.
///
/// The name token and value token are removed as one contiguous span.
/// A second occurrence of the same name is left in the stream; leftover
/// detection reports it later.
pub(crate) fn match_option(
    stream: &mut TokenStream,
    config: &OptionConfig,
) -> Result<Option<MatchedSpan>, MatchError> {
    let index = match stream.find_before_terminator(|token| config.matches(token)) {
        Some(index) => index,
        None => return Ok(None),
    };
    let position = stream
        .get(index)
        .expect("internal error - found index must be in the stream")
        .position();

    if !config.requires_value() {
        stream.remove_span(index, 1);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("matched '{}' at position {position}.", config.display_name());
        }

        return Ok(Some(MatchedSpan {
            position,
            value: None,
        }));
    }

    match stream.get(index + 1) {
        Some(value_token) => {
            let value = value_token.text().to_string();
            stream.remove_span(index, 2);

            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "matched '{}' at position {position} with value '{value}'.",
                    config.display_name()
                );
            }

            Ok(Some(MatchedSpan {
                position,
                value: Some(value),
            }))
        }
        None => {
            // The name still gets consumed; otherwise it would double-report
            // as an unknown leftover option.
            stream.remove_span(index, 1);
            Err(MatchError::MissingValue {
                option: config.display_name(),
            })
        }
    }
}

/// Match a boolean flag: the positive and negated forms are scanned (and
/// consumed) independently.
///
/// Both present is a conflict; one present decides the value; neither leaves
/// the declared default in place (`None`).
pub(crate) fn match_flag(
    stream: &mut TokenStream,
    positive: &OptionConfig,
    negative: &OptionConfig,
) -> Result<Option<bool>, MatchError> {
    let positive_span = match_option(stream, positive)?;
    let negative_span = match_option(stream, negative)?;

    match (positive_span, negative_span) {
        (Some(_), Some(_)) => Err(MatchError::ConflictingFlags {
            positive: format!("--{}", positive.long()),
            negative: format!("--{}", negative.long()),
        }),
        (Some(_), None) => Ok(Some(true)),
        (None, Some(_)) => Ok(Some(false)),
        (None, None) => Ok(None),
    }
}
