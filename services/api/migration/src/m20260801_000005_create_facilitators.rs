use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Facilitators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Facilitators::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Facilitators::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Facilitators::FacultyPosition).string_len(250))
                    .col(ColumnDef::new(Facilitators::Specialization).string_len(200))
                    .col(ColumnDef::new(Facilitators::OfficeLocation).string_len(100))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Facilitators::Table, Facilitators::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Facilitators::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Facilitators {
    Table,
    Id,
    UserId,
    FacultyPosition,
    Specialization,
    OfficeLocation,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
