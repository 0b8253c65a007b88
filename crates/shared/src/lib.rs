pub mod access;
mod command;
mod page;
mod patch;
pub mod recipe;

pub use command::*;
pub use page::*;
pub use patch::*;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    pub fn new(read_db: sqlx::SqlitePool, write_db: sqlx::SqlitePool) -> Self {
        Self { read_db, write_db }
    }
}
