#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use sqlx_migrator::{Migrate, Plan};
use yummio_user::{Notifier, RegisterInput, password::Hasher, token::Tokens};

pub const SECRET: &str = "test_secret_key_minimum_32_characters_long";

#[derive(Default)]
pub struct CapturedNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait::async_trait]
impl Notifier for CapturedNotifier {
    async fn send(&self, address: &str, reset_token: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .map_err(|e| anyhow::anyhow!("{e}"))?
            .push((address.to_owned(), reset_token.to_owned()));

        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait::async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _address: &str, _reset_token: &str) -> anyhow::Result<()> {
        anyhow::bail!("smtp unavailable")
    }
}

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

pub fn tokens() -> Tokens {
    Tokens::new(
        SECRET,
        Duration::from_secs(86400),
        Duration::from_secs(604800),
        Duration::from_secs(3600),
    )
}

pub fn command(
    state: yummio_shared::State,
    notifier: Arc<dyn Notifier>,
) -> anyhow::Result<yummio_user::Command> {
    Ok(yummio_user::Command::new(
        state,
        Hasher::new(8192, 1, 1)?,
        tokens(),
        notifier,
    ))
}

pub fn register_input(name: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
    }
}
