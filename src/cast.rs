use thiserror::Error;

/// A raw token rejected by a [`Cast`] implementation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{literal}' is not a valid {hint}")]
pub struct CastError {
    pub(crate) literal: String,
    pub(crate) hint: &'static str,
}

impl CastError {
    pub(crate) fn new(literal: impl Into<String>, hint: &'static str) -> Self {
        Self {
            literal: literal.into(),
            hint,
        }
    }
}

/// Conversion from a raw command line token into a typed value.
///
/// Implementations must agree with themselves: `cast` never accepts a token
/// that `valid` rejects.
/// The converse is allowed in one narrow case — an integer literal may pass
/// `valid` syntactically yet overflow the target type, failing `cast`.
pub trait Cast: Sized {
    /// The type hint used in help text and diagnostics (ex: `<int>`).
    const HINT: &'static str;

    /// Report whether the token is syntactically acceptable for this type.
    fn valid(token: &str) -> bool;

    /// Convert the token, failing on any token `valid` rejects.
    fn cast(token: &str) -> Result<Self, CastError>;
}

fn is_digits(slice: &str) -> bool {
    !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit())
}

fn is_integer(token: &str) -> bool {
    is_digits(token.strip_prefix('-').unwrap_or(token))
}

// Optional sign, then digits with at most one '.'.
// The fractional part, when present, must be non-empty: "5." and "." are out,
// ".5" is in.
fn is_decimal(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    match unsigned.split_once('.') {
        None => is_digits(unsigned),
        Some((whole, fraction)) => {
            (whole.is_empty() || is_digits(whole)) && is_digits(fraction)
        }
    }
}

impl Cast for i64 {
    const HINT: &'static str = "<int>";

    fn valid(token: &str) -> bool {
        is_integer(token)
    }

    fn cast(token: &str) -> Result<Self, CastError> {
        if !Self::valid(token) {
            return Err(CastError::new(token, Self::HINT));
        }

        // Out-of-range literals are syntactically valid but still un-castable.
        token
            .parse::<i64>()
            .map_err(|_| CastError::new(token, Self::HINT))
    }
}

impl Cast for f64 {
    const HINT: &'static str = "<float>";

    fn valid(token: &str) -> bool {
        is_decimal(token)
    }

    fn cast(token: &str) -> Result<Self, CastError> {
        if !Self::valid(token) {
            return Err(CastError::new(token, Self::HINT));
        }

        token
            .parse::<f64>()
            .map_err(|_| CastError::new(token, Self::HINT))
    }
}

impl Cast for String {
    const HINT: &'static str = "<str>";

    fn valid(token: &str) -> bool {
        // Reject the empty token so a missing value can never silently become "".
        !token.is_empty()
    }

    fn cast(token: &str) -> Result<Self, CastError> {
        if !Self::valid(token) {
            return Err(CastError::new(token, Self::HINT));
        }

        Ok(token.to_string())
    }
}

fn valid_list<T: Cast>(token: &str) -> bool {
    !token.is_empty() && token.split(',').all(T::valid)
}

fn cast_list<T: Cast>(token: &str, hint: &'static str) -> Result<Vec<T>, CastError> {
    if token.is_empty() {
        return Err(CastError::new(token, hint));
    }

    token
        .split(',')
        .map(|element| T::cast(element).map_err(|_| CastError::new(token, hint)))
        .collect()
}

macro_rules! cast_list_impl {
    ($element:ty, $hint:literal) => {
        impl Cast for Vec<$element> {
            const HINT: &'static str = $hint;

            fn valid(token: &str) -> bool {
                valid_list::<$element>(token)
            }

            fn cast(token: &str) -> Result<Self, CastError> {
                cast_list::<$element>(token, Self::HINT)
            }
        }
    };
}

cast_list_impl!(i64, "<int,..>");
cast_list_impl!(f64, "<float,..>");
cast_list_impl!(String, "<str,..>");
