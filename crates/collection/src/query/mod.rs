use std::ops::Deref;

use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use yummio_db::table::{CollectionRecipes, Recipe};
use yummio_recipe::{RecipeRow, RecipeSummary};
use yummio_shared::access;

use crate::{CollectionRow, CollectionSummary, repository};

#[derive(Clone)]
pub struct Query(pub yummio_shared::State);

impl Deref for Query {
    type Target = yummio_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionDetail {
    #[serde(flatten)]
    pub collection: CollectionRow,
    pub recipes: Vec<RecipeSummary>,
    pub recipe_count: i64,
}

impl Query {
    /// Only recipes the viewer may read are listed, newest link first.
    pub async fn find(
        &self,
        id: &str,
        viewer: Option<&str>,
    ) -> yummio_shared::Result<CollectionDetail> {
        let mut tx = self.read_db.begin().await?;

        let Some(collection) = repository::find(&mut *tx, id).await? else {
            yummio_shared::not_found!("collection not found");
        };

        access::ensure_readable(&collection.user_id, collection.is_public, viewer, "collection")?;

        let visible = match viewer {
            Some(user_id) => Expr::col((Recipe::Table, Recipe::IsPublic))
                .eq(true)
                .or(Expr::col((Recipe::Table, Recipe::UserId)).eq(user_id)),
            None => Expr::col((Recipe::Table, Recipe::IsPublic)).eq(true),
        };

        let statement = yummio_recipe::summary_select()
            .inner_join(
                CollectionRecipes::Table,
                Expr::col((CollectionRecipes::Table, CollectionRecipes::RecipeId))
                    .equals((Recipe::Table, Recipe::Id)),
            )
            .and_where(
                Expr::col((CollectionRecipes::Table, CollectionRecipes::CollectionId)).eq(id),
            )
            .and_where(visible)
            .order_by(
                (CollectionRecipes::Table, CollectionRecipes::CreatedAt),
                Order::Desc,
            )
            .order_by((Recipe::Table, Recipe::Id), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        let recipes: Vec<RecipeSummary> = rows.into_iter().map(Into::into).collect();

        Ok(CollectionDetail {
            collection,
            recipe_count: recipes.len() as i64,
            recipes,
        })
    }

    pub async fn list_mine(&self, user_id: &str) -> yummio_shared::Result<Vec<CollectionSummary>> {
        repository::find_by_owner(&self.read_db, user_id).await
    }
}
