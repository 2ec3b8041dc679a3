//! CLI command handlers, one file per command.

mod checksum;
mod fetch;
mod lint;
mod list;
mod resolve;
mod verify;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub use lint::run_lint;
pub use list::run_list;
pub use resolve::{run_resolve, select_record};
pub use verify::run_verify;
