use sea_orm_migration::prelude::*;

use super::m20230402_101500_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transfers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transfers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transfers::FromUserId).integer().not_null())
                    .col(ColumnDef::new(Transfers::ToUserId).integer().not_null())
                    .col(
                        ColumnDef::new(Transfers::Amount)
                            .string()
                            .not_null()
                            .check(Expr::col(Transfers::Amount).not_like("-%")),
                    )
                    .col(
                        ColumnDef::new(Transfers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transfers-from_user_id")
                            .from(Transfers::Table, Transfers::FromUserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transfers-to_user_id")
                            .from(Transfers::Table, Transfers::ToUserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Cursor pagination walks `id` inside one sender or receiver.
        manager
            .create_index(
                Index::create()
                    .name("idx-transfers-from_user_id-id")
                    .table(Transfers::Table)
                    .col(Transfers::FromUserId)
                    .col(Transfers::Id)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-transfers-to_user_id-id")
                    .table(Transfers::Table)
                    .col(Transfers::ToUserId)
                    .col(Transfers::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transfers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Transfers {
    Table,
    Id,
    FromUserId,
    ToUserId,
    Amount,
    CreatedAt,
}
