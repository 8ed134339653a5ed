use std::cell::RefCell;
use std::rc::Rc;

use crate::cast::{Cast, CastError};

/// Type-erased binding surface.
///
/// We use this at the top of the binder object graph so that targets of
/// varying types `T` may all live in a single declaration list.
pub(crate) trait Bindable {
    /// Whether a match must consume a following value token.
    fn requires_value(&self) -> bool;

    /// The type hint rendered in help text, when the kind has one.
    fn hint(&self) -> Option<&'static str>;

    /// Cast a literal (a value token or a default literal) and write it
    /// through to the bound variable.
    fn assign(&mut self, literal: &str) -> Result<(), CastError>;

    /// Record flag presence for this binding.
    fn set_present(&mut self, value: bool);
}

/// A value-taking option target: binds a single token, cast to `T`.
pub struct Scalar<'a, T> {
    variable: Rc<RefCell<&'a mut T>>,
}

impl<'a, T> Scalar<'a, T> {
    /// Bind a host variable as a value-taking option target.
    ///
    /// ### Example
    /// ```
    /// use optbind::Scalar;
    ///
    /// let mut count: i64 = 0;
    /// Scalar::new(&mut count);
    /// ```
    pub fn new(variable: &'a mut T) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
        }
    }
}

impl<'a, T> Bindable for Scalar<'a, T>
where
    T: Cast,
{
    fn requires_value(&self) -> bool {
        true
    }

    fn hint(&self) -> Option<&'static str> {
        Some(T::HINT)
    }

    fn assign(&mut self, literal: &str) -> Result<(), CastError> {
        let value = T::cast(literal)?;
        **self.variable.borrow_mut() = value;
        Ok(())
    }

    fn set_present(&mut self, _value: bool) {
        unreachable!("internal error - must not set presence on a value option");
    }
}

/// A presence flag target: binds a `bool`, with a `--no-` negated form
/// registered alongside the positive form.
pub struct Toggle<'a> {
    variable: Rc<RefCell<&'a mut bool>>,
}

impl<'a> Toggle<'a> {
    /// Bind a host variable as a presence flag target.
    ///
    /// ### Example
    /// ```
    /// use optbind::Toggle;
    ///
    /// let mut verbose = false;
    /// Toggle::new(&mut verbose);
    /// ```
    pub fn new(variable: &'a mut bool) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
        }
    }
}

impl<'a> Bindable for Toggle<'a> {
    fn requires_value(&self) -> bool {
        false
    }

    fn hint(&self) -> Option<&'static str> {
        // Presence alone suffices; flags render without a hint.
        None
    }

    fn assign(&mut self, literal: &str) -> Result<(), CastError> {
        // Only ever reached for default literals.
        let value = match literal {
            "true" => true,
            "false" => false,
            _ => return Err(CastError::new(literal, "<bool>")),
        };
        **self.variable.borrow_mut() = value;
        Ok(())
    }

    fn set_present(&mut self, value: bool) {
        **self.variable.borrow_mut() = value;
    }
}
