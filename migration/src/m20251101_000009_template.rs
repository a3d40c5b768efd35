use sea_orm_migration::{prelude::*, schema::*};

static DEFAULT_TEMPLATE_NAME: &str = "weekly_invoice";
static DEFAULT_TEMPLATE_SUBJECT: &str = "Moon mining tax invoice {date}";
static DEFAULT_TEMPLATE_BODY: &str = "Hi {name},\n\n\
    As of {date} you owe {amount_owed} ISK in moon mining tax.\n\n\
    Please transfer the outstanding amount to the corporation wallet.\n\n\
    Fly safe o7";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Template::Table)
                    .if_not_exists()
                    .col(pk_auto(Template::Id))
                    .col(string_uniq(Template::Name))
                    .col(string(Template::Subject))
                    .col(text(Template::Body))
                    .col(timestamp(Template::CreatedAt))
                    .col(timestamp(Template::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(Template::Table)
            .columns([
                Template::Name,
                Template::Subject,
                Template::Body,
                Template::CreatedAt,
                Template::UpdatedAt,
            ])
            .values_panic([
                DEFAULT_TEMPLATE_NAME.into(),
                DEFAULT_TEMPLATE_SUBJECT.into(),
                DEFAULT_TEMPLATE_BODY.into(),
                Expr::current_timestamp().into(),
                Expr::current_timestamp().into(),
            ])
            .to_owned();

        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Template::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Template {
    Table,
    Id,
    Name,
    Subject,
    Body,
    CreatedAt,
    UpdatedAt,
}
