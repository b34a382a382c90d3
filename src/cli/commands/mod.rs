pub mod backup;
pub mod config;
pub mod db;
pub mod form;
pub mod init;
pub mod list;
pub mod log;
pub mod vessels;

use crate::ui::messages::{confirm_from, warning};
use std::io;

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    confirm_from(&mut io::stdin().lock())
}
