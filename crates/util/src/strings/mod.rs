//! String utilities.

mod camel_case;

pub use camel_case::camel_case;
