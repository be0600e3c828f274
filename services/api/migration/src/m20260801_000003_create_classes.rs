use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Classes::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Classes::Name)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Classes::Code)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Classes::Trimester).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Classes::IntakePeriod)
                            .string_len(10)
                            .not_null()
                            .check(Expr::col(Classes::IntakePeriod).is_in(["HT1", "HT2", "FT"])),
                    )
                    .col(
                        ColumnDef::new(Classes::Mode)
                            .string_len(20)
                            .not_null()
                            .check(Expr::col(Classes::Mode).is_in([
                                "online",
                                "in-person",
                                "hybrid",
                            ])),
                    )
                    .col(ColumnDef::new(Classes::CohortId).uuid().not_null())
                    .col(
                        ColumnDef::new(Classes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Classes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::CohortId)
                            .to(Cohorts::Table, Cohorts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Classes::Table)
                    .col(Classes::CohortId)
                    .name("idx_classes_cohort_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
    Name,
    Code,
    Trimester,
    IntakePeriod,
    Mode,
    CohortId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Cohorts {
    Table,
    Id,
}
