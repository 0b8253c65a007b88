use temp_dir::TempDir;
use yummio_recipe::RateInput;
use yummio_shared::Error;

mod helpers;

fn rating(value: i32) -> RateInput {
    RateInput {
        rating: value,
        review: None,
    }
}

#[tokio::test]
async fn test_rating_mean_and_count() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_recipe::Command::new(state.clone());
    let query = yummio_recipe::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;
    let bob = helpers::create_user(&state, "bob").await?;

    let id = cmd.create(&john, helpers::recipe("Pancakes")).await?;

    cmd.rate(&jane, &id, rating(4)).await?;
    let summary = cmd.rate(&bob, &id, rating(5)).await?;
    assert_eq!(summary.rating, 4.5);
    assert_eq!(summary.rating_count, 2);

    let summary = cmd
        .rate(
            &jane,
            &id,
            RateInput {
                rating: 2,
                review: Some("too sweet".to_owned()),
            },
        )
        .await?;
    assert_eq!(summary.rating, 3.5);
    assert_eq!(summary.rating_count, 2);

    let detail = query.find(&id, None).await?;
    assert_eq!(detail.recipe.rating, 3.5);
    assert_eq!(detail.recipe.rating_count, 2);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_ratings_are_all_counted() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_recipe::Command::new(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;
    let bob = helpers::create_user(&state, "bob").await?;

    let id = cmd.create(&john, helpers::recipe("Pancakes")).await?;

    let (a, b) = tokio::join!(cmd.rate(&jane, &id, rating(3)), cmd.rate(&bob, &id, rating(5)));
    a?;
    b?;

    let detail = yummio_recipe::Query(state.clone()).find(&id, None).await?;
    assert_eq!(detail.recipe.rating, 4.0);
    assert_eq!(detail.recipe.rating_count, 2);

    Ok(())
}

#[tokio::test]
async fn test_rate_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_recipe::Command::new(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    let id = cmd.create(&john, helpers::recipe("Pancakes")).await?;

    let err = cmd.rate(&john, &id, rating(6)).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let err = cmd.rate(&john, &id, rating(0)).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let err = cmd.rate(&john, "missing", rating(3)).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}
