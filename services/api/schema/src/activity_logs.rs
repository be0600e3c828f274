use sea_orm::entity::prelude::*;

/// Weekly facilitator activity log for one course offering.
///
/// `attendance` is an ordered JSON array; the six task columns hold
/// `Done` / `Pending` / `Not Started`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub offering_id: Uuid,
    pub week_number: i32,
    pub attendance: Json,
    pub formative_one_grading: String,
    pub formative_two_grading: String,
    pub summative_grading: String,
    pub course_moderation: String,
    pub intranet_sync: String,
    pub gradebook_status: String,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_offerings::Entity",
        from = "Column::OfferingId",
        to = "super::course_offerings::Column::Id"
    )]
    CourseOffering,
}

impl Related<super::course_offerings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseOffering.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
