mod command;
mod query;
mod repository;

pub use command::*;
pub use query::*;
pub use repository::{ItemRow, ListRow, ListSummary};
