mod core;
mod field;
mod parameter;

pub use self::core::CommandLineBinder;
pub use field::{Scalar, Toggle};
pub use parameter::Declaration;

pub(crate) use field::Bindable;
