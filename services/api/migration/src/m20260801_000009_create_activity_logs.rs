use sea_orm_migration::prelude::*;

const TASK_STATES: [&str; 3] = ["Done", "Pending", "Not Started"];

#[derive(DeriveMigrationName)]
pub struct Migration;

fn task_status_col(col: ActivityLogs) -> ColumnDef {
    let mut def = ColumnDef::new(col);
    def.string_len(20)
        .not_null()
        .default("Not Started")
        .check(Expr::col(col).is_in(TASK_STATES));
    def
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLogs::OfferingId).uuid().not_null())
                    .col(
                        ColumnDef::new(ActivityLogs::WeekNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivityLogs::Attendance)
                            .json_binary()
                            .not_null(),
                    )
                    .col(&mut task_status_col(ActivityLogs::FormativeOneGrading))
                    .col(&mut task_status_col(ActivityLogs::FormativeTwoGrading))
                    .col(&mut task_status_col(ActivityLogs::SummativeGrading))
                    .col(&mut task_status_col(ActivityLogs::CourseModeration))
                    .col(&mut task_status_col(ActivityLogs::IntranetSync))
                    .col(&mut task_status_col(ActivityLogs::GradebookStatus))
                    .col(ColumnDef::new(ActivityLogs::Notes).text())
                    .col(
                        ColumnDef::new(ActivityLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ActivityLogs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ActivityLogs::Table, ActivityLogs::OfferingId)
                            .to(CourseOfferings::Table, CourseOfferings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::OfferingId)
                    .col(ActivityLogs::WeekNumber)
                    .name("idx_activity_logs_offering_id_week_number")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum ActivityLogs {
    Table,
    Id,
    OfferingId,
    WeekNumber,
    Attendance,
    FormativeOneGrading,
    FormativeTwoGrading,
    SummativeGrading,
    CourseModeration,
    IntranetSync,
    GradebookStatus,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CourseOfferings {
    Table,
    Id,
}
