//! 表单提交表迁移
//!
//! 提交记录随所属链接级联删除。

use sea_orm_migration::prelude::*;

use crate::m20260301_000001_forms_and_links::Links;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::LinkId).string_len(36).not_null())
                    .col(ColumnDef::new(Submissions::FormId).string_len(36).not_null())
                    .col(ColumnDef::new(Submissions::Data).text().not_null())
                    .col(ColumnDef::new(Submissions::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(Submissions::UserAgent).text().null())
                    .col(ColumnDef::new(Submissions::Referrer).text().null())
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submissions_link_id")
                            .from(Submissions::Table, Submissions::LinkId)
                            .to(Links::Table, Links::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 单链接按时间倒序查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_link_time")
                    .table(Submissions::Table)
                    .col(Submissions::LinkId)
                    .col(Submissions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_form_id")
                    .table(Submissions::Table)
                    .col(Submissions::FormId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_submissions_form_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_submissions_link_time").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    LinkId,
    FormId,
    Data,
    IpAddress,
    UserAgent,
    Referrer,
    CreatedAt,
}
