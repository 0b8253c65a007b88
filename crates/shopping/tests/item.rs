use temp_dir::TempDir;
use yummio_shopping::{CreateInput, ItemInput, MAX_ORDER_INDEX, UpdateItemInput};
use yummio_shared::{Error, Patch};

mod helpers;

#[tokio::test]
async fn test_items_keep_positions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_shopping::Command::new(state.clone());
    let query = yummio_shopping::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    let id = cmd
        .create(
            &john,
            CreateInput {
                name: "Groceries".to_owned(),
                items: vec![
                    helpers::item("Milk", Some(1.0), Some("L")),
                    helpers::item("Eggs", Some(12.0), Some("pcs")),
                ],
            },
        )
        .await?;

    let bread = cmd
        .add_item(&john, &id, helpers::item("Bread", None, None))
        .await?;
    assert_eq!(bread.order_index, 2);

    let detail = query.find(&id, &john).await?;
    let eggs = detail
        .items
        .iter()
        .find(|i| i.name == "Eggs")
        .map(|i| i.id.to_owned())
        .ok_or_else(|| anyhow::anyhow!("eggs missing"))?;

    cmd.delete_item(&john, &id, &eggs).await?;

    let detail = query.find(&id, &john).await?;
    let positions: Vec<_> = detail.items.iter().map(|i| i.order_index).collect();
    assert_eq!(positions, vec![0, 2]);
    assert_eq!(detail.item_count, 2);

    Ok(())
}

#[tokio::test]
async fn test_first_item_of_empty_list() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_shopping::Command::new(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    let id = cmd
        .create(
            &john,
            CreateInput {
                name: "Empty".to_owned(),
                items: vec![],
            },
        )
        .await?;

    let item = cmd
        .add_item(&john, &id, helpers::item("Salt", None, None))
        .await?;
    assert_eq!(item.order_index, 0);

    Ok(())
}

#[tokio::test]
async fn test_update_item() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_shopping::Command::new(state.clone());
    let query = yummio_shopping::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    let id = cmd
        .create(
            &john,
            CreateInput {
                name: "Groceries".to_owned(),
                items: vec![],
            },
        )
        .await?;
    let milk = cmd
        .add_item(&john, &id, helpers::item("Milk", Some(1.0), Some("L")))
        .await?;

    let updated = cmd
        .update_item(
            &john,
            &id,
            &milk.id,
            UpdateItemInput {
                completed: Some(true),
                unit: Patch::Null,
                ..Default::default()
            },
        )
        .await?;
    assert!(updated.completed);
    assert_eq!(updated.unit, None);
    assert_eq!(updated.amount, Some(1.0));
    assert_eq!(updated.name, "Milk");

    let detail = query.find(&id, &john).await?;
    assert_eq!(detail.completed_count, 1);

    let lists = query.list_mine(&john).await?;
    assert_eq!(lists[0].completed_count, 1);

    Ok(())
}

#[tokio::test]
async fn test_item_must_belong_to_list() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_shopping::Command::new(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    let first = cmd
        .create(
            &john,
            CreateInput {
                name: "First".to_owned(),
                items: vec![],
            },
        )
        .await?;
    let second = cmd
        .create(
            &john,
            CreateInput {
                name: "Second".to_owned(),
                items: vec![],
            },
        )
        .await?;
    let item = cmd
        .add_item(&john, &first, helpers::item("Milk", None, None))
        .await?;

    let err = cmd.delete_item(&john, &second, &item.id).await.unwrap_err();
    assert!(matches!(err, Error::User(_)));
    assert_eq!(err.to_string(), "item does not belong to this shopping list");

    let err = cmd
        .update_item(&jane, &first, &item.id, UpdateItemInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = cmd
        .add_item(&jane, &first, helpers::item("Cake", None, None))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "unauthorized to modify this shopping list");

    let err = cmd.delete_item(&john, &first, "missing").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_append_after_highest_position() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = yummio_shopping::Command::new(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    let err = cmd
        .create(
            &john,
            CreateInput {
                name: "Groceries".to_owned(),
                items: vec![ItemInput {
                    order_index: Some(i32::MAX),
                    ..helpers::item("Milk", None, None)
                }],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let id = cmd
        .create(
            &john,
            CreateInput {
                name: "Groceries".to_owned(),
                items: vec![ItemInput {
                    order_index: Some(MAX_ORDER_INDEX),
                    ..helpers::item("Milk", None, None)
                }],
            },
        )
        .await?;

    let err = cmd
        .add_item(&john, &id, helpers::item("Bread", None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::User(_)));
    assert_eq!(err.to_string(), "shopping list has no free position left");

    let bread = cmd
        .add_item(
            &john,
            &id,
            ItemInput {
                order_index: Some(5),
                ..helpers::item("Bread", None, None)
            },
        )
        .await?;
    assert_eq!(bread.order_index, 5);

    Ok(())
}
