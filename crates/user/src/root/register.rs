use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::repository;

#[derive(Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

impl super::Command {
    #[tracing::instrument(skip_all)]
    pub async fn register(&self, input: RegisterInput) -> yummio_shared::Result<super::AuthResponse> {
        input.validate()?;

        let email = super::normalize_email(&input.email);

        if repository::is_email_exists(&self.read_db, &email).await? {
            yummio_shared::conflict!("user with this email already exists");
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let id = Uuid::new_v4().to_string();

        let created = repository::create(
            &self.write_db,
            repository::CreateInput {
                id: id.to_owned(),
                name: input.name.trim().to_owned(),
                email,
                password: password_hash,
            },
        )
        .await;

        match created {
            Ok(()) => {}
            Err(yummio_shared::Error::Conflict(_)) => {
                yummio_shared::conflict!("user with this email already exists");
            }
            Err(e) => return Err(e),
        }

        let Some(user) = repository::find(&self.write_db, repository::FindType::Id(id)).await?
        else {
            yummio_shared::server!("user missing after register");
        };

        tracing::info!(user_id = %user.id, "user registered");

        self.issue_pair(user.into())
    }
}
