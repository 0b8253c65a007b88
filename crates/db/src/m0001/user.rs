use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::User;

pub(super) fn create_table() -> TableCreateStatement {
    Table::create()
        .table(User::Table)
        .col(
            ColumnDef::new(User::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(User::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(User::Email)
                .string()
                .not_null()
                .string_len(320),
        )
        .col(ColumnDef::new(User::Password).string().not_null())
        .col(ColumnDef::new(User::AvatarUrl).string())
        .col(
            ColumnDef::new(User::IsVerified)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(User::IsAdmin)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(User::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(User::UpdatedAt).big_integer().not_null())
        .col(ColumnDef::new(User::DeletedAt).big_integer().null())
        .to_owned()
}

pub(super) fn drop_table() -> TableDropStatement {
    Table::drop().table(User::Table).to_owned()
}

pub(super) fn create_uk_email() -> IndexCreateStatement {
    Index::create()
        .name("uk_user_email")
        .table(User::Table)
        .col(User::Email)
        .unique()
        .to_owned()
}

pub(super) fn drop_uk_email() -> IndexDropStatement {
    Index::drop()
        .name("uk_user_email")
        .table(User::Table)
        .to_owned()
}
