use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InvType::Table)
                    .if_not_exists()
                    .col(pk_auto(InvType::Id))
                    .col(big_integer_uniq(InvType::TypeId))
                    .col(big_integer(InvType::GroupId))
                    .col(string(InvType::Name))
                    .col(text(InvType::Description))
                    .col(timestamp(InvType::CreatedAt))
                    .col(timestamp(InvType::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InvType::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum InvType {
    Table,
    Id,
    TypeId,
    GroupId,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
