#![allow(dead_code)]

use std::path::PathBuf;

use sqlx_migrator::{Migrate, Plan};
use uuid::Uuid;
use yummio_recipe::{IngredientInput, InstructionInput, RecipeInput};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<yummio_shared::State> {
    let url = format!("sqlite:{}", path.display());
    let write_db = yummio_db::create_write_pool(&url).await?;
    let mut conn = write_db.acquire().await?;
    yummio_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let read_db = yummio_db::create_read_pool(&url, 4).await?;

    Ok(yummio_shared::State::new(read_db, write_db))
}

pub async fn create_user(state: &yummio_shared::State, name: &str) -> anyhow::Result<String> {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"INSERT INTO "user" ("id", "name", "email", "password", "created_at", "updated_at") VALUES (?, ?, ?, ?, 0, 0)"#,
    )
    .bind(&id)
    .bind(name)
    .bind(format!("{name}@example.com"))
    .bind("not-a-hash")
    .execute(&state.write_db)
    .await?;

    Ok(id)
}

pub fn ingredient(name: &str) -> IngredientInput {
    IngredientInput {
        name: name.to_owned(),
        amount: Some(1.0),
        unit: Some("cup".to_owned()),
        notes: None,
        order_index: None,
    }
}

pub fn instruction(step: i32, text: &str) -> InstructionInput {
    InstructionInput {
        step,
        text: text.to_owned(),
        image_url: None,
        timer_minutes: None,
    }
}

pub fn recipe(title: &str) -> RecipeInput {
    RecipeInput {
        title: title.to_owned(),
        description: Some(format!("{title} description")),
        ingredients: vec![ingredient("flour"), ingredient("water")],
        instructions: vec![instruction(1, "Mix"), instruction(2, "Bake")],
        ..Default::default()
    }
}
