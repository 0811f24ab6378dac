//! Database migrations for procurement service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_directory::Migration),
            Box::new(m20260815_000002_create_tenders::Migration),
            Box::new(m20260815_000003_create_bids::Migration),
        ]
    }
}

mod m20260815_000001_create_directory {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Employee::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Employee::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Employee::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Employee::FirstName).string().not_null())
                        .col(ColumnDef::new(Employee::LastName).string().not_null())
                        .col(
                            ColumnDef::new(Employee::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Employee::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Organization::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Organization::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Organization::Name).string().not_null())
                        .col(
                            ColumnDef::new(Organization::Description)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Organization::OrganizationType)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Organization::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Organization::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrganizationResponsible::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrganizationResponsible::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(OrganizationResponsible::OrganizationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrganizationResponsible::EmployeeId)
                                .uuid()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_responsible_organization")
                                .from(
                                    OrganizationResponsible::Table,
                                    OrganizationResponsible::OrganizationId,
                                )
                                .to(Organization::Table, Organization::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_responsible_employee")
                                .from(
                                    OrganizationResponsible::Table,
                                    OrganizationResponsible::EmployeeId,
                                )
                                .to(Employee::Table, Employee::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_responsible_org_employee")
                        .table(OrganizationResponsible::Table)
                        .col(OrganizationResponsible::OrganizationId)
                        .col(OrganizationResponsible::EmployeeId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(
                    Table::drop()
                        .table(OrganizationResponsible::Table)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_table(Table::drop().table(Organization::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Employee::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Employee {
        Table,
        Id,
        Username,
        FirstName,
        LastName,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Organization {
        Table,
        Id,
        Name,
        Description,
        OrganizationType,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum OrganizationResponsible {
        Table,
        Id,
        OrganizationId,
        EmployeeId,
    }
}

mod m20260815_000002_create_tenders {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Tenders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Tenders::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Tenders::Name).string().not_null())
                        .col(ColumnDef::new(Tenders::Description).string().not_null())
                        .col(ColumnDef::new(Tenders::ServiceType).string().not_null())
                        .col(ColumnDef::new(Tenders::Status).string().not_null())
                        .col(ColumnDef::new(Tenders::OrganizationId).uuid().not_null())
                        .col(
                            ColumnDef::new(Tenders::CreatorUsername)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Tenders::Version).integer().not_null())
                        .col(
                            ColumnDef::new(Tenders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Tenders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_tenders_organization")
                                .from(Tenders::Table, Tenders::OrganizationId)
                                .to(Organization::Table, Organization::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TenderHistories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TenderHistories::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(TenderHistories::TenderId).uuid().not_null())
                        .col(ColumnDef::new(TenderHistories::Name).string().not_null())
                        .col(
                            ColumnDef::new(TenderHistories::Description)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TenderHistories::ServiceType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TenderHistories::Status).string().not_null())
                        .col(
                            ColumnDef::new(TenderHistories::OrganizationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TenderHistories::CreatorUsername)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TenderHistories::Version)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TenderHistories::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TenderHistories::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_tender_histories_tender")
                                .from(TenderHistories::Table, TenderHistories::TenderId)
                                .to(Tenders::Table, Tenders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Rollback looks snapshots up by (tender, version)
            manager
                .create_index(
                    Index::create()
                        .name("idx_tender_histories_tender_version")
                        .table(TenderHistories::Table)
                        .col(TenderHistories::TenderId)
                        .col(TenderHistories::Version)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TenderHistories::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Tenders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Tenders {
        Table,
        Id,
        Name,
        Description,
        ServiceType,
        Status,
        OrganizationId,
        CreatorUsername,
        Version,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum TenderHistories {
        Table,
        Id,
        TenderId,
        Name,
        Description,
        ServiceType,
        Status,
        OrganizationId,
        CreatorUsername,
        Version,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Organization {
        Table,
        Id,
    }
}

mod m20260815_000003_create_bids {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Bids::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Bids::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Bids::Name).string().not_null())
                        .col(ColumnDef::new(Bids::Description).string().not_null())
                        .col(ColumnDef::new(Bids::Status).string().not_null())
                        .col(ColumnDef::new(Bids::TenderId).uuid().not_null())
                        .col(ColumnDef::new(Bids::AuthorType).string().not_null())
                        .col(ColumnDef::new(Bids::AuthorId).uuid().not_null())
                        .col(ColumnDef::new(Bids::Version).integer().not_null())
                        .col(
                            ColumnDef::new(Bids::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(Bids::Decision).string())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bids_tender")
                                .from(Bids::Table, Bids::TenderId)
                                .to(Tenders::Table, Tenders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_bids_tender_id")
                        .table(Bids::Table)
                        .col(Bids::TenderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BidHistories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BidHistories::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(BidHistories::BidId).uuid().not_null())
                        .col(ColumnDef::new(BidHistories::Name).string().not_null())
                        .col(
                            ColumnDef::new(BidHistories::Description)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BidHistories::Status).string().not_null())
                        .col(ColumnDef::new(BidHistories::TenderId).uuid().not_null())
                        .col(ColumnDef::new(BidHistories::AuthorType).string().not_null())
                        .col(ColumnDef::new(BidHistories::AuthorId).uuid().not_null())
                        .col(ColumnDef::new(BidHistories::Version).integer().not_null())
                        .col(
                            ColumnDef::new(BidHistories::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BidHistories::Decision).string())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bid_histories_bid")
                                .from(BidHistories::Table, BidHistories::BidId)
                                .to(Bids::Table, Bids::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_bid_histories_bid_version")
                        .table(BidHistories::Table)
                        .col(BidHistories::BidId)
                        .col(BidHistories::Version)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BidFeedbacks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BidFeedbacks::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(BidFeedbacks::BidId).uuid().not_null())
                        .col(ColumnDef::new(BidFeedbacks::Feedback).string().not_null())
                        .col(ColumnDef::new(BidFeedbacks::AuthorId).uuid().not_null())
                        .col(
                            ColumnDef::new(BidFeedbacks::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bid_feedbacks_bid")
                                .from(BidFeedbacks::Table, BidFeedbacks::BidId)
                                .to(Bids::Table, Bids::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_bid_feedbacks_bid_id")
                        .table(BidFeedbacks::Table)
                        .col(BidFeedbacks::BidId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BidFeedbacks::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(BidHistories::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Bids::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Bids {
        Table,
        Id,
        Name,
        Description,
        Status,
        TenderId,
        AuthorType,
        AuthorId,
        Version,
        CreatedAt,
        Decision,
    }

    #[derive(DeriveIden)]
    enum BidHistories {
        Table,
        Id,
        BidId,
        Name,
        Description,
        Status,
        TenderId,
        AuthorType,
        AuthorId,
        Version,
        CreatedAt,
        Decision,
    }

    #[derive(DeriveIden)]
    enum BidFeedbacks {
        Table,
        Id,
        BidId,
        Feedback,
        AuthorId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Tenders {
        Table,
        Id,
    }
}
