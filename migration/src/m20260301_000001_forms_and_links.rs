//! 表单与短链接表迁移
//!
//! - forms: 字段 schema 以 JSON 文本存储
//! - links: code 同时承载系统生成码与自定义别名，共用一个唯一索引

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 forms 表
        manager
            .create_table(
                Table::create()
                    .table(Forms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Forms::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Forms::OwnerId).string_len(255).not_null())
                    .col(ColumnDef::new(Forms::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Forms::Fields).text().not_null())
                    .col(
                        ColumnDef::new(Forms::TemplateType)
                            .string_len(32)
                            .not_null()
                            .default("custom"),
                    )
                    .col(
                        ColumnDef::new(Forms::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Forms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Forms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_forms_owner_id")
                    .table(Forms::Table)
                    .col(Forms::OwnerId)
                    .to_owned(),
            )
            .await?;

        // 创建 links 表
        manager
            .create_table(
                Table::create()
                    .table(Links::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Links::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Links::OwnerId).string_len(255).not_null())
                    .col(ColumnDef::new(Links::Code).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Links::IsCustom)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Links::Destination).text().not_null())
                    .col(ColumnDef::new(Links::FormId).string_len(36).null())
                    .col(ColumnDef::new(Links::Title).string_len(255).null())
                    .col(ColumnDef::new(Links::Description).text().null())
                    .col(
                        ColumnDef::new(Links::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Links::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Links::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Links::LeadCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Links::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Links::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_links_form_id")
                            .from(Links::Table, Links::FormId)
                            .to(Forms::Table, Forms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // code 唯一索引（生成码与别名共用命名空间）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_code")
                    .table(Links::Table)
                    .col(Links::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_owner_created")
                    .table(Links::Table)
                    .col(Links::OwnerId)
                    .col(Links::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_form_id")
                    .table(Links::Table)
                    .col(Links::FormId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_links_form_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_links_owner_created").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_links_code").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Links::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_forms_owner_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Forms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Forms {
    #[sea_orm(iden = "forms")]
    Table,
    Id,
    OwnerId,
    Name,
    Fields,
    TemplateType,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Links {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    OwnerId,
    Code,
    IsCustom,
    Destination,
    FormId,
    Title,
    Description,
    IsActive,
    ExpiresAt,
    ClickCount,
    LeadCount,
    CreatedAt,
    UpdatedAt,
}
