use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TaxRate::Table)
                    .if_not_exists()
                    .col(pk_auto(TaxRate::Id))
                    .col(big_integer_uniq(TaxRate::TypeId))
                    .col(double(TaxRate::UnitValue))
                    .col(double(TaxRate::TaxRate))
                    .col(big_integer(TaxRate::UpdatedBy))
                    .col(timestamp(TaxRate::CreatedAt))
                    .col(timestamp(TaxRate::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TaxRate::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TaxRate {
    Table,
    Id,
    TypeId,
    UnitValue,
    TaxRate,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
