use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

pub struct TemplateRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TemplateRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<entity::template::Model>, DbErr> {
        entity::prelude::Template::find()
            .filter(entity::template::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Creates a template or replaces the subject and body of an existing one
    pub async fn upsert(
        &self,
        name: &str,
        subject: &str,
        body: &str,
    ) -> Result<entity::template::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let template = entity::template::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            subject: ActiveValue::Set(subject.to_string()),
            body: ActiveValue::Set(body.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        entity::prelude::Template::insert(template)
            .on_conflict(
                OnConflict::column(entity::template::Column::Name)
                    .update_columns([
                        entity::template::Column::Subject,
                        entity::template::Column::Body,
                        entity::template::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }
}
