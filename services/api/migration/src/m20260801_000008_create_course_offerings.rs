use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseOfferings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseOfferings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseOfferings::ModuleId).uuid().not_null())
                    .col(ColumnDef::new(CourseOfferings::ClassId).uuid().not_null())
                    .col(
                        ColumnDef::new(CourseOfferings::FacilitatorId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseOfferings::StartDate).date().not_null())
                    .col(ColumnDef::new(CourseOfferings::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(CourseOfferings::Status)
                            .string_len(20)
                            .not_null()
                            .default("planned")
                            .check(Expr::col(CourseOfferings::Status).is_in([
                                "planned",
                                "active",
                                "completed",
                                "cancelled",
                            ])),
                    )
                    .col(
                        ColumnDef::new(CourseOfferings::Capacity)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(CourseOfferings::CurrentEnrollment)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseOfferings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CourseOfferings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseOfferings::Table, CourseOfferings::ModuleId)
                            .to(Modules::Table, Modules::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseOfferings::Table, CourseOfferings::ClassId)
                            .to(Classes::Table, Classes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseOfferings::Table, CourseOfferings::FacilitatorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(CourseOfferings::Table)
                    .col(CourseOfferings::FacilitatorId)
                    .name("idx_course_offerings_facilitator_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseOfferings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CourseOfferings {
    Table,
    Id,
    ModuleId,
    ClassId,
    FacilitatorId,
    StartDate,
    EndDate,
    Status,
    Capacity,
    CurrentEnrollment,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Modules {
    Table,
    Id,
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
