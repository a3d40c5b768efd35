use sea_orm_migration::{prelude::*, schema::*};

static IDX_REFINERY_SOLAR_SYSTEM_ID: &str = "idx-refinery-solar_system_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Refinery::Table)
                    .if_not_exists()
                    .col(pk_auto(Refinery::Id))
                    .col(big_integer_uniq(Refinery::ObserverId))
                    .col(string(Refinery::Name))
                    .col(big_integer(Refinery::SolarSystemId))
                    .col(double(Refinery::Income).default(0.0))
                    .col(timestamp(Refinery::CreatedAt))
                    .col(timestamp(Refinery::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REFINERY_SOLAR_SYSTEM_ID)
                    .table(Refinery::Table)
                    .col(Refinery::SolarSystemId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_REFINERY_SOLAR_SYSTEM_ID)
                    .table(Refinery::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Refinery::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Refinery {
    Table,
    Id,
    ObserverId,
    Name,
    SolarSystemId,
    Income,
    CreatedAt,
    UpdatedAt,
}
