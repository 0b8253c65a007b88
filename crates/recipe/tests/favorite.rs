use temp_dir::TempDir;
use yummio_recipe::RecipeInput;
use yummio_shared::{Error, Pagination};

mod helpers;

#[tokio::test]
async fn test_favorite_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_recipe::Command::new(state.clone());
    let query = yummio_recipe::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    let id = cmd.create(&john, helpers::recipe("Pancakes")).await?;

    cmd.add_favorite(&jane, &id).await?;
    cmd.add_favorite(&jane, &id).await?;

    let detail = query.find(&id, Some(&jane)).await?;
    assert_eq!(detail.favorite_count, 1);
    assert!(detail.is_favorited);

    let detail = query.find(&id, Some(&john)).await?;
    assert!(!detail.is_favorited);

    let page = query.list_favorites(&jane, Pagination::default()).await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, id);

    cmd.remove_favorite(&jane, &id).await?;
    let page = query.list_favorites(&jane, Pagination::default()).await?;
    assert_eq!(page.total, 0);

    let err = cmd.add_favorite(&jane, "missing").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_favorites_hide_recipes_made_private() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_recipe::Command::new(state.clone());
    let query = yummio_recipe::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    let id = cmd.create(&john, helpers::recipe("Pancakes")).await?;
    cmd.add_favorite(&jane, &id).await?;

    cmd.update(
        &john,
        &id,
        RecipeInput {
            is_public: Some(false),
            ..helpers::recipe("Pancakes")
        },
    )
    .await?;

    let page = query.list_favorites(&jane, Pagination::default()).await?;
    assert_eq!(page.total, 0);

    Ok(())
}

#[tokio::test]
async fn test_favorite_deleted_recipe() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_recipe::Command::new(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    let id = cmd.create(&john, helpers::recipe("Pancakes")).await?;
    let (deleted, favorited) =
        tokio::join!(cmd.delete(&john, &id), cmd.add_favorite(&jane, &id));
    deleted?;

    let (rows,): (i64,) =
        sqlx::query_as(r#"SELECT COUNT(*) FROM "user_favorites" WHERE "recipe_id" = ?"#)
            .bind(&id)
            .fetch_one(&state.read_db)
            .await?;

    match favorited {
        Ok(()) => assert_eq!(rows, 1),
        Err(err) => {
            assert!(matches!(err, Error::NotFound(_)));
            assert_eq!(rows, 0);
        }
    }

    let err = cmd.add_favorite(&jane, &id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = cmd.remove_favorite(&jane, &id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}
