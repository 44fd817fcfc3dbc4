//! Command handlers for the extsecret CLI
//!
//! Each module handles one subcommand, delegating to `extsecret-tooling` for the work.

pub(crate) mod generate;
pub(crate) mod init;
pub(crate) mod list;
pub(crate) mod preview;

pub(crate) use generate::handle_generate_command;
pub(crate) use init::handle_init_command;
pub(crate) use list::handle_list_command;
pub(crate) use preview::handle_preview_command;
