use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TaskCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TaskCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Unique index doubles as the guard against concurrent creates
                    .col(
                        ColumnDef::new(TaskCategories::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TaskCategories::Description).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TaskCategories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum TaskCategories {
    Table,
    Id,
    Name,
    Description,
}
