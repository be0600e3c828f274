use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cohorts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cohorts::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Cohorts::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Cohorts::StartDate).date().not_null())
                    .col(ColumnDef::new(Cohorts::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Cohorts::Status)
                            .string_len(20)
                            .not_null()
                            .default("planned")
                            .check(Expr::col(Cohorts::Status).is_in([
                                "planned",
                                "active",
                                "completed",
                                "archived",
                            ])),
                    )
                    .col(
                        ColumnDef::new(Cohorts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Cohorts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cohorts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cohorts {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
    UpdatedAt,
}
