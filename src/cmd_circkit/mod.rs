//! Subcommand modules for the `circkit` binary.

pub mod binlinks;
