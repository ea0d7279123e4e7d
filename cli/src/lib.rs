//! stoplist-cli library: commands and the HTTP surface, exposed for tests.

pub mod commands;
pub mod http;
