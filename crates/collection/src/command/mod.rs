use std::ops::Deref;

use serde::Deserialize;
use validator::Validate;
use yummio_shared::{Patch, access};

use crate::{CollectionRow, repository};

mod create;
mod recipes;
mod update;

pub struct Command {
    state: yummio_shared::State,
}

impl Deref for Command {
    type Target = yummio_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub image_url: Patch<String>,
    pub is_public: Option<bool>,
}

impl Command {
    pub fn new(state: yummio_shared::State) -> Self {
        Self { state }
    }

    /// Loads a live collection from the transaction and checks the requester owns it.
    async fn load_owned(
        conn: &mut sqlx::SqliteConnection,
        id: &str,
        user_id: &str,
        action: &str,
    ) -> yummio_shared::Result<CollectionRow> {
        let Some(collection) = repository::find(&mut *conn, id).await? else {
            yummio_shared::not_found!("collection not found");
        };

        access::ensure_owner(&collection.user_id, user_id, action, "collection")?;

        Ok(collection)
    }
}
