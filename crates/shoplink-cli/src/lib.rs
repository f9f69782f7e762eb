//! Library components of the `shoplink` command-line tool.

pub mod logging;
