mod notifier;
pub mod password;
mod profile;
pub(crate) mod repository;
mod root;
pub mod token;

pub use notifier::*;
pub use profile::*;
pub use root::*;
