use temp_dir::TempDir;
use yummio_collection::{CreateInput, UpdateInput};
use yummio_shared::{Error, Patch};

mod helpers;

fn create_input(name: &str, is_public: Option<bool>) -> CreateInput {
    CreateInput {
        name: name.to_owned(),
        description: Some("Weeknight favorites".to_owned()),
        image_url: None,
        is_public,
    }
}

#[tokio::test]
async fn test_create_update_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_collection::Command::new(state.clone());
    let query = yummio_collection::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    let id = cmd.create(&john, create_input("Dinners", None)).await?;

    let detail = query.find(&id, Some(&john)).await?;
    assert_eq!(detail.collection.name, "Dinners");
    assert!(!detail.collection.is_public);
    assert_eq!(detail.recipe_count, 0);

    cmd.update(
        &john,
        &id,
        UpdateInput {
            name: Some("Quick dinners".to_owned()),
            description: Patch::Null,
            ..Default::default()
        },
    )
    .await?;

    let detail = query.find(&id, Some(&john)).await?;
    assert_eq!(detail.collection.name, "Quick dinners");
    assert_eq!(detail.collection.description, None);
    assert!(!detail.collection.is_public);

    cmd.delete(&john, &id).await?;

    let err = query.find(&id, Some(&john)).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(query.list_mine(&john).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_private_collection_access() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_collection::Command::new(state.clone());
    let query = yummio_collection::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;
    let recipe = helpers::create_recipe(&state, &jane, "Soup", true).await?;

    let id = cmd.create(&john, create_input("Private", Some(false))).await?;

    let err = query.find(&id, Some(&jane)).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = query.find(&id, None).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = cmd
        .update(&jane, &id, UpdateInput::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "unauthorized to update this collection");

    let err = cmd.add_recipe(&jane, &id, &recipe).await.unwrap_err();
    assert_eq!(err.to_string(), "unauthorized to modify this collection");

    let err = cmd.remove_recipe(&jane, &id, &recipe).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = cmd.delete(&jane, &id).await.unwrap_err();
    assert_eq!(err.to_string(), "unauthorized to delete this collection");

    Ok(())
}

#[tokio::test]
async fn test_collection_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_collection::Command::new(state.clone());
    let query = yummio_collection::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    let soup = helpers::create_recipe(&state, &jane, "Soup", true).await?;
    let secret = helpers::create_recipe(&state, &jane, "Secret", false).await?;
    let mine = helpers::create_recipe(&state, &john, "Mine", false).await?;

    let id = cmd.create(&john, create_input("Shared", Some(true))).await?;

    cmd.add_recipe(&john, &id, &soup).await?;
    cmd.add_recipe(&john, &id, &soup).await?;
    cmd.add_recipe(&john, &id, &mine).await?;

    let err = cmd.add_recipe(&john, &id, &secret).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = cmd.add_recipe(&john, &id, "missing").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let detail = query.find(&id, Some(&john)).await?;
    assert_eq!(detail.recipe_count, 2);

    let detail = query.find(&id, Some(&jane)).await?;
    assert_eq!(detail.recipe_count, 1);
    assert_eq!(detail.recipes[0].title, "Soup");

    let collections = query.list_mine(&john).await?;
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].recipe_count, 2);

    yummio_recipe::Command::new(state.clone())
        .delete(&jane, &soup)
        .await?;

    let detail = query.find(&id, None).await?;
    assert_eq!(detail.recipe_count, 0);

    cmd.remove_recipe(&john, &id, &mine).await?;
    let collections = query.list_mine(&john).await?;
    assert_eq!(collections[0].recipe_count, 0);

    Ok(())
}
