use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Grades::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Grades::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Grades::OfferingId).uuid().not_null())
                    .col(ColumnDef::new(Grades::FormativeOne).float())
                    .col(ColumnDef::new(Grades::FormativeTwo).float())
                    .col(ColumnDef::new(Grades::Summative).float())
                    .col(ColumnDef::new(Grades::FinalGrade).float())
                    .col(
                        ColumnDef::new(Grades::GradeStatus)
                            .string_len(20)
                            .not_null()
                            .default("draft")
                            .check(
                                Expr::col(Grades::GradeStatus)
                                    .is_in(["draft", "published", "archived"]),
                            ),
                    )
                    .col(ColumnDef::new(Grades::Feedback).text())
                    .col(
                        ColumnDef::new(Grades::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Grades::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::OfferingId)
                            .to(CourseOfferings::Table, CourseOfferings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .name("idx_grades_student_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Grades {
    Table,
    Id,
    StudentId,
    OfferingId,
    FormativeOne,
    FormativeTwo,
    Summative,
    FinalGrade,
    GradeStatus,
    Feedback,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum CourseOfferings {
    Table,
    Id,
}
