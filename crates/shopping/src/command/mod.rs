use std::ops::Deref;

use serde::Deserialize;
use validator::Validate;
use yummio_shared::{Patch, access};

use crate::{ItemRow, ListRow, repository};

mod item;
mod list;

/// Highest position an item may be given; appends past it are rejected.
pub const MAX_ORDER_INDEX: i32 = 1_000_000;

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
pub struct ItemInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    #[validate(length(max = 50))]
    pub unit: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[validate(range(min = 0, max = MAX_ORDER_INDEX))]
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<ItemInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateItemInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Patch<f64>,
    #[serde(default)]
    pub unit: Patch<String>,
    #[serde(default)]
    pub notes: Patch<String>,
    pub completed: Option<bool>,
    #[validate(range(min = 0, max = MAX_ORDER_INDEX))]
    pub order_index: Option<i32>,
}

impl Command {
    pub fn new(state: yummio_shared::State) -> Self {
        Self { state }
    }

    async fn load_owned(
        conn: &mut sqlx::SqliteConnection,
        id: &str,
        user_id: &str,
        action: &str,
    ) -> yummio_shared::Result<ListRow> {
        let Some(list) = repository::find_list(&mut *conn, id).await? else {
            yummio_shared::not_found!("shopping list not found");
        };

        access::ensure_owner(&list.user_id, user_id, action, "shopping list")?;

        Ok(list)
    }

    /// Loads an item of an owned list, rejecting items of any other list.
    async fn load_owned_item(
        conn: &mut sqlx::SqliteConnection,
        list_id: &str,
        item_id: &str,
        user_id: &str,
        action: &str,
    ) -> yummio_shared::Result<ItemRow> {
        Self::load_owned(&mut *conn, list_id, user_id, action).await?;

        let Some(item) = repository::find_item(&mut *conn, item_id).await? else {
            yummio_shared::not_found!("item not found");
        };

        if item.list_id != list_id {
            yummio_shared::user!("item does not belong to this shopping list");
        }

        Ok(item)
    }
}
