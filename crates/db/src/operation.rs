use sea_query::{
    IndexCreateStatement, IndexDropStatement, SqliteQueryBuilder, TableCreateStatement,
    TableDropStatement,
};

/// Schema change applied by a migration, built from sea-query statements.
pub(crate) enum Schema {
    Table(fn() -> TableCreateStatement, fn() -> TableDropStatement),
    Index(fn() -> IndexCreateStatement, fn() -> IndexDropStatement),
}

impl Schema {
    fn up_statement(&self) -> String {
        match self {
            Schema::Table(create, _) => create().to_string(SqliteQueryBuilder),
            Schema::Index(create, _) => create().to_string(SqliteQueryBuilder),
        }
    }

    fn down_statement(&self) -> String {
        match self {
            Schema::Table(_, drop) => drop().to_string(SqliteQueryBuilder),
            Schema::Index(_, drop) => drop().to_string(SqliteQueryBuilder),
        }
    }
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Schema {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = self.up_statement();
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = self.down_statement();
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
