use std::ops::Deref;

use serde::Serialize;
use yummio_shared::access;

use crate::{ItemRow, ListRow, ListSummary, repository};

#[derive(Clone)]
pub struct Query(pub yummio_shared::State);

impl Deref for Query {
    type Target = yummio_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListDetail {
    #[serde(flatten)]
    pub list: ListRow,
    pub items: Vec<ItemRow>,
    pub item_count: usize,
    pub completed_count: usize,
}

impl Query {
    /// Shopping lists are never public: only the owner may read one.
    pub async fn find(&self, id: &str, user_id: &str) -> yummio_shared::Result<ListDetail> {
        let mut tx = self.read_db.begin().await?;

        let Some(list) = repository::find_list(&mut *tx, id).await? else {
            yummio_shared::not_found!("shopping list not found");
        };

        access::ensure_owner(&list.user_id, user_id, "access", "shopping list")?;

        let items = repository::find_items(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(ListDetail {
            list,
            item_count: items.len(),
            completed_count: items.iter().filter(|item| item.completed).count(),
            items,
        })
    }

    pub async fn list_mine(&self, user_id: &str) -> yummio_shared::Result<Vec<ListSummary>> {
        repository::find_lists_by_owner(&self.read_db, user_id).await
    }
}
