mod command;
mod list;
mod resolve;

pub use command::command;
pub use list::{list, show};
pub use resolve::resolve;
