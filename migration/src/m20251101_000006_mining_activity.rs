use sea_orm_migration::{prelude::*, schema::*};

static IDX_MINING_ACTIVITY_PROCESSED: &str = "idx-mining_activity-processed";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MiningActivity::Table)
                    .if_not_exists()
                    .col(pk_auto(MiningActivity::Id))
                    .col(big_integer(MiningActivity::TypeId))
                    .col(big_integer(MiningActivity::Quantity))
                    .col(big_integer(MiningActivity::MinerId))
                    .col(big_integer(MiningActivity::RefineryId))
                    .col(boolean(MiningActivity::Processed).default(false))
                    .col(timestamp_null(MiningActivity::ProcessedAt))
                    .col(timestamp(MiningActivity::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MINING_ACTIVITY_PROCESSED)
                    .table(MiningActivity::Table)
                    .col(MiningActivity::Processed)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MINING_ACTIVITY_PROCESSED)
                    .table(MiningActivity::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MiningActivity::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum MiningActivity {
    Table,
    Id,
    TypeId,
    Quantity,
    MinerId,
    RefineryId,
    Processed,
    ProcessedAt,
    CreatedAt,
}
