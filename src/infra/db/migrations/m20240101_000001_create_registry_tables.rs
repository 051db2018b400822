//! Migration: Create the registry tables.
//!
//! Cities, equipment, users, professionals and the audit trail.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cidades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cidades::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cidades::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Cidades::Status).string().not_null())
                    .col(
                        ColumnDef::new(Cidades::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Equipamentos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Equipamentos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Equipamentos::Name).string().not_null())
                    .col(ColumnDef::new(Equipamentos::Description).text().null())
                    .col(ColumnDef::new(Equipamentos::Status).string().not_null())
                    .col(
                        ColumnDef::new(Equipamentos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Usuarios::FullName).string().not_null())
                    .col(ColumnDef::new(Usuarios::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Usuarios::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Usuarios::AccessLevel).integer().not_null())
                    .col(ColumnDef::new(Usuarios::CityId).integer().null())
                    .col(
                        ColumnDef::new(Usuarios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_usuarios_cidade")
                            .from(Usuarios::Table, Usuarios::CityId)
                            .to(Cidades::Table, Cidades::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Profissionais::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profissionais::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profissionais::EquipmentId).integer().not_null())
                    .col(ColumnDef::new(Profissionais::FullName).string().not_null())
                    .col(ColumnDef::new(Profissionais::BirthDate).date().not_null())
                    .col(ColumnDef::new(Profissionais::Cpf).string().not_null().unique_key())
                    .col(ColumnDef::new(Profissionais::Rg).string().not_null().unique_key())
                    .col(ColumnDef::new(Profissionais::RgIssueDate).date().not_null())
                    .col(ColumnDef::new(Profissionais::EducationLevel).string().not_null())
                    .col(ColumnDef::new(Profissionais::Profession).string().not_null())
                    .col(ColumnDef::new(Profissionais::Role).string().not_null())
                    .col(ColumnDef::new(Profissionais::Affiliation).string().not_null())
                    .col(ColumnDef::new(Profissionais::Phone).string().not_null())
                    .col(ColumnDef::new(Profissionais::Email).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Profissionais::EmploymentStartDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Profissionais::Address).text().not_null())
                    .col(ColumnDef::new(Profissionais::CityId).integer().not_null())
                    .col(
                        ColumnDef::new(Profissionais::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Profissionais::Active).boolean().not_null())
                    .col(ColumnDef::new(Profissionais::InactivationReason).text().null())
                    .col(
                        ColumnDef::new(Profissionais::InactivatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profissionais_equipamento")
                            .from(Profissionais::Table, Profissionais::EquipmentId)
                            .to(Equipamentos::Table, Equipamentos::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profissionais_cidade")
                            .from(Profissionais::Table, Profissionais::CityId)
                            .to(Cidades::Table, Cidades::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_profissionais_city_id")
                    .table(Profissionais::Table)
                    .col(Profissionais::CityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Auditoria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Auditoria::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Auditoria::UserId).integer().not_null())
                    .col(ColumnDef::new(Auditoria::Action).string().not_null())
                    .col(ColumnDef::new(Auditoria::TableName).string().not_null())
                    .col(ColumnDef::new(Auditoria::RecordId).integer().not_null())
                    .col(ColumnDef::new(Auditoria::OldData).json_binary().null())
                    .col(ColumnDef::new(Auditoria::NewData).json_binary().null())
                    .col(
                        ColumnDef::new(Auditoria::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Auditoria::SourceIp).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auditoria_usuario")
                            .from(Auditoria::Table, Auditoria::UserId)
                            .to(Usuarios::Table, Usuarios::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // The audit query is always ordered by timestamp descending
        manager
            .create_index(
                Index::create()
                    .name("idx_auditoria_recorded_at")
                    .table(Auditoria::Table)
                    .col(Auditoria::RecordedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Auditoria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profissionais::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Equipamentos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cidades::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cidades {
    Table,
    Id,
    Name,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Equipamentos {
    Table,
    Id,
    Name,
    Description,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Usuarios {
    Table,
    Id,
    FullName,
    Email,
    PasswordHash,
    AccessLevel,
    CityId,
    CreatedAt,
}

#[derive(Iden)]
enum Profissionais {
    Table,
    Id,
    EquipmentId,
    FullName,
    BirthDate,
    Cpf,
    Rg,
    RgIssueDate,
    EducationLevel,
    Profession,
    Role,
    Affiliation,
    Phone,
    Email,
    EmploymentStartDate,
    Address,
    CityId,
    CreatedAt,
    Active,
    InactivationReason,
    InactivatedAt,
}

#[derive(Iden)]
enum Auditoria {
    Table,
    Id,
    UserId,
    Action,
    TableName,
    RecordId,
    OldData,
    NewData,
    RecordedAt,
    SourceIp,
}
