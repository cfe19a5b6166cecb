use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_catalog::Language;

const LANGUAGES: &[&str] = &[
    "English",
    "Portuguese",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Japanese",
    "Korean",
    "Mandarin",
    "Hindi",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(Language::Table).columns([Language::Name]);
        for name in LANGUAGES {
            insert.values_panic([(*name).into()]);
        }
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Language::Table)
                    .and_where(Expr::col(Language::Name).is_in(LANGUAGES.iter().copied()))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
