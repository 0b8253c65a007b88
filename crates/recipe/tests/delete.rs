use temp_dir::TempDir;
use yummio_recipe::RecipeInput;
use yummio_shared::Error;

mod helpers;

#[tokio::test]
async fn test_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_recipe::Command::new(state.clone());
    let query = yummio_recipe::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    let id = cmd.create(&john, helpers::recipe("Pancakes")).await?;

    let err = cmd.delete(&jane, &id).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    cmd.delete(&john, &id).await?;

    let err = query.find(&id, Some(&john)).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = cmd.delete(&john, &id).await.unwrap_err();
    assert_eq!(err.to_string(), "recipe not found");

    Ok(())
}

#[tokio::test]
async fn test_private_recipe_visibility() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_recipe::Command::new(state.clone());
    let query = yummio_recipe::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    let id = cmd
        .create(
            &john,
            RecipeInput {
                is_public: Some(false),
                ..helpers::recipe("Family recipe")
            },
        )
        .await?;

    assert!(query.find(&id, Some(&john)).await.is_ok());

    let err = query.find(&id, Some(&jane)).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = query.find(&id, None).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    Ok(())
}
