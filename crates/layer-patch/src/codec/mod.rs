//! Wire codecs for layer patch operations.

pub mod json;
