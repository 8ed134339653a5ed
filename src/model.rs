/// The number of positional arguments a command accepts.
///
/// An unset side is unbounded.
/// `min == max` expresses "precisely N".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    min: Option<usize>,
    max: Option<usize>,
}

impl Bound {
    /// Accept any number of positional arguments.
    pub fn any() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Accept at least `min` positional arguments.
    pub fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Accept at most `max` positional arguments.
    pub fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Accept between `min` and `max` positional arguments, inclusive.
    ///
    /// A `max` below `min` is raised up to `min`.
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(std::cmp::max(min, max)),
        }
    }

    /// Accept precisely `n` positional arguments.
    pub fn precisely(n: usize) -> Self {
        Self::between(n, n)
    }

    pub(crate) fn min(&self) -> Option<usize> {
        self.min
    }

    pub(crate) fn max(&self) -> Option<usize> {
        self.max
    }
}

impl Default for Bound {
    fn default() -> Self {
        Self::any()
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.min, self.max) {
            (None, None) => write!(f, ".."),
            (Some(min), None) => write!(f, "{min}.."),
            (None, Some(max)) => write!(f, "..={max}"),
            (Some(min), Some(max)) => write!(f, "{min}..={max}"),
        }
    }
}
