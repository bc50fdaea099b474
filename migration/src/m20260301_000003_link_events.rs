//! 链接事件日志表迁移
//!
//! 不设外键：删除链接后事件仍保留用于审计。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LinkEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LinkEvents::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LinkEvents::LinkId).string_len(36).not_null())
                    .col(ColumnDef::new(LinkEvents::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(LinkEvents::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(LinkEvents::UserAgent).text().null())
                    .col(ColumnDef::new(LinkEvents::Referrer).text().null())
                    .col(ColumnDef::new(LinkEvents::Payload).text().null())
                    .col(
                        ColumnDef::new(LinkEvents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 单链接时间序列查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_link_events_link_time")
                    .table(LinkEvents::Table)
                    .col(LinkEvents::LinkId)
                    .col(LinkEvents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // 按类型统计
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_link_events_link_kind")
                    .table(LinkEvents::Table)
                    .col(LinkEvents::LinkId)
                    .col(LinkEvents::Kind)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_link_events_link_kind").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_link_events_link_time").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(LinkEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LinkEvents {
    #[sea_orm(iden = "link_events")]
    Table,
    Id,
    LinkId,
    Kind,
    IpAddress,
    UserAgent,
    Referrer,
    Payload,
    CreatedAt,
}
