use sea_query::{Expr, ExprTrait, Order, SelectStatement};
use serde::Deserialize;
use validator::Validate;
use yummio_db::table::{Recipe, UserFavorites};
use yummio_shared::recipe::Difficulty;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    Rating,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl From<SortDirection> for Order {
    fn from(value: SortDirection) -> Self {
        match value {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Which recipes a listing starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Public,
    Owner(String),
    /// Favorites of a user that are still visible to them.
    Favorites(String),
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecipeFilter {
    #[validate(length(min = 1, max = 100))]
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    #[serde(rename = "type")]
    #[validate(length(max = 50))]
    pub recipe_type: Option<String>,
    /// A recipe matches only when it carries every listed tag.
    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortDirection,
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{escaped}%")
}

/// Adds the scope and filter predicates. Soft-deleted recipes are excluded.
pub(crate) fn apply_filter(statement: &mut SelectStatement, scope: &Scope, filter: &RecipeFilter) {
    statement.and_where(Expr::col((Recipe::Table, Recipe::DeletedAt)).is_null());

    match scope {
        Scope::Public => {
            statement.and_where(Expr::col((Recipe::Table, Recipe::IsPublic)).eq(true));
        }
        Scope::Owner(user_id) => {
            statement.and_where(Expr::col((Recipe::Table, Recipe::UserId)).eq(user_id.as_str()));
        }
        Scope::Favorites(user_id) => {
            statement
                .inner_join(
                    UserFavorites::Table,
                    Expr::col((UserFavorites::Table, UserFavorites::RecipeId))
                        .equals((Recipe::Table, Recipe::Id)),
                )
                .and_where(
                    Expr::col((UserFavorites::Table, UserFavorites::UserId)).eq(user_id.as_str()),
                )
                .and_where(
                    Expr::col((Recipe::Table, Recipe::IsPublic))
                        .eq(true)
                        .or(Expr::col((Recipe::Table, Recipe::UserId)).eq(user_id.as_str())),
                );
        }
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(search);
        statement.and_where(Expr::cust_with_values(
            r#""recipe"."search_text" LIKE ? ESCAPE '\'"#,
            [pattern],
        ));
    }

    if let Some(difficulty) = filter.difficulty {
        statement.and_where(
            Expr::col((Recipe::Table, Recipe::Difficulty)).eq(difficulty.to_string()),
        );
    }

    if let Some(recipe_type) = &filter.recipe_type {
        statement.and_where(
            Expr::col((Recipe::Table, Recipe::RecipeType)).eq(recipe_type.as_str()),
        );
    }

    let tags = crate::command::unique_tag_names(&filter.tags);
    if !tags.is_empty() {
        let in_clause = tags.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
        let count = tags.len() as i64;

        statement.and_where(Expr::cust_with_values(
            format!(
                r#""recipe"."id" IN (SELECT "recipe_tag"."recipe_id" FROM "recipe_tag" INNER JOIN "tag" ON "tag"."id" = "recipe_tag"."tag_id" WHERE "tag"."name" IN ({in_clause}) GROUP BY "recipe_tag"."recipe_id" HAVING COUNT(DISTINCT "tag"."name") = ?)"#
            ),
            tags.into_iter()
                .map(sea_query::Value::from)
                .chain(std::iter::once(sea_query::Value::from(count)))
                .collect::<Vec<_>>(),
        ));
    }
}

pub(crate) fn apply_order(statement: &mut SelectStatement, filter: &RecipeFilter) {
    let order: Order = filter.sort_order.into();
    let column = match filter.sort_by {
        SortField::CreatedAt => Recipe::CreatedAt,
        SortField::Rating => Recipe::Rating,
        SortField::Title => Recipe::Title,
    };

    statement
        .order_by((Recipe::Table, column), order.clone())
        .order_by((Recipe::Table, Recipe::Id), order);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(like_pattern(" Pasta "), "%pasta%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn filter_defaults_sort_newest_first() {
        let filter = RecipeFilter::default();
        assert_eq!(filter.sort_by, SortField::CreatedAt);
        assert_eq!(filter.sort_order, SortDirection::Desc);
    }
}
