use std::sync::Arc;

use temp_dir::TempDir;
use yummio_user::{LogNotifier, token::TokenKind};

mod helpers;

#[tokio::test]
async fn register_issues_token_pair() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(state, Arc::new(LogNotifier))?;

    let resp = cmd
        .register(helpers::register_input("Ann", "Ann@X.com ", "secret1"))
        .await?;

    assert_eq!(resp.user.name, "Ann");
    assert_eq!(resp.user.email, "ann@x.com");
    assert_eq!(resp.expires_in, 86400);

    let access = cmd.tokens().validate(&resp.access_token)?;
    assert_eq!(access.kind, TokenKind::Access);
    assert_eq!(access.sub, resp.user.id);

    let refresh = cmd.tokens().validate(&resp.refresh_token)?;
    assert_eq!(refresh.kind, TokenKind::Refresh);
    assert_eq!(refresh.sub, resp.user.id);

    Ok(())
}

#[tokio::test]
async fn validate_unique_emails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(state, Arc::new(LogNotifier))?;

    cmd.register(helpers::register_input("John", "john.doe@yummio.localhost", "my_password"))
        .await?;
    let user_2 = cmd
        .register(helpers::register_input(
            "Johnny",
            "JOHN.DOE@yummio.localhost",
            "my_password_v2",
        ))
        .await;

    let err = user_2.unwrap_err();
    assert!(matches!(err, yummio_shared::Error::Conflict(_)));
    assert_eq!(err.to_string(), "user with this email already exists");

    Ok(())
}

#[tokio::test]
async fn register_rejects_invalid_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(state, Arc::new(LogNotifier))?;

    for input in [
        helpers::register_input("A", "ann@x.com", "secret1"),
        helpers::register_input("Ann", "not-an-email", "secret1"),
        helpers::register_input("Ann", "ann@x.com", "short"),
    ] {
        let err = cmd.register(input).await.unwrap_err();
        assert!(matches!(err, yummio_shared::Error::Validate(_)));
    }

    Ok(())
}
