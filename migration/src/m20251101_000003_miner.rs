use sea_orm_migration::{prelude::*, schema::*};

static IDX_MINER_ALLIANCE_ID: &str = "idx-miner-alliance_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Miner::Table)
                    .if_not_exists()
                    .col(pk_auto(Miner::Id))
                    .col(big_integer_uniq(Miner::EveId))
                    .col(string(Miner::Name))
                    .col(double(Miner::AmountOwed).default(0.0))
                    .col(big_integer_null(Miner::AllianceId))
                    .col(timestamp(Miner::CreatedAt))
                    .col(timestamp(Miner::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MINER_ALLIANCE_ID)
                    .table(Miner::Table)
                    .col(Miner::AllianceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MINER_ALLIANCE_ID)
                    .table(Miner::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Miner::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Miner {
    Table,
    Id,
    EveId,
    Name,
    AmountOwed,
    AllianceId,
    CreatedAt,
    UpdatedAt,
}
