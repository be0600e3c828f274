//! In-memory repository fakes shared by the use-case tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use campus_domain::grade::GradeStatus;
use campus_domain::offering::OfferingStatus;
use campus_domain::pagination::PageRequest;
use campus_domain::role::Role;

use crate::domain::repository::{
    ActivityLogRepository, ClassRepository, Clock, CohortRepository, GradeRepository,
    ModuleRepository, NotificationQueue, NotificationRepository, OfferingRepository,
    UserRepository,
};
use crate::domain::types::{
    ActivityLog, Class, ClassFilter, Cohort, Grade, JobEnvelope, Module, Notification, Offering,
    RoleProfile, User,
};
use crate::domain::view::{ClassDetail, EntityRef, OfferingDetail, PersonRef};
use crate::error::ApiError;

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemUsers {
    rows: Arc<Mutex<Vec<(User, RoleProfile)>>>,
}

impl MemUsers {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn insert(&self, user: User, profile: RoleProfile) {
        self.rows.lock().unwrap().push((user, profile));
    }

    pub fn get(&self, id: Uuid) -> Option<(User, RoleProfile)> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.id == id)
            .cloned()
    }
}

impl UserRepository for MemUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.get(id).map(|(u, _)| u))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.clone()))
    }

    async fn find_with_profile(&self, id: Uuid) -> Result<Option<(User, RoleProfile)>, ApiError> {
        Ok(self.get(id))
    }

    async fn list_with_profiles(&self) -> Result<Vec<(User, RoleProfile)>, ApiError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u.role == role)
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn username_exists(
        &self,
        username: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|(u, _)| u.username == username && Some(u.id) != exclude))
    }

    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|(u, _)| u.email == email && Some(u.id) != exclude))
    }

    async fn student_number_exists(
        &self,
        student_number: &str,
        exclude_user: Option<Uuid>,
    ) -> Result<bool, ApiError> {
        Ok(self.rows.lock().unwrap().iter().any(|(u, p)| {
            matches!(p, RoleProfile::Student(s) if s.student_number == student_number)
                && Some(u.id) != exclude_user
        }))
    }

    async fn create_with_profile(
        &self,
        user: &User,
        profile: &RoleProfile,
    ) -> Result<(), ApiError> {
        self.insert(user.clone(), profile.clone());
        Ok(())
    }

    async fn update_with_profile(
        &self,
        user: &User,
        profile: &RoleProfile,
    ) -> Result<(), ApiError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|(u, _)| u.id == user.id) {
            *row = (user.clone(), profile.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(u, _)| u.id != id);
        Ok(rows.len() < before)
    }

    async fn set_student_class(
        &self,
        user_id: Uuid,
        class_id: Option<Uuid>,
    ) -> Result<bool, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|(u, _)| u.id == user_id) {
            Some((_, RoleProfile::Student(student))) => {
                student.class_id = class_id;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ── Cohorts ──────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemCohorts {
    rows: Arc<Mutex<Vec<Cohort>>>,
}

impl MemCohorts {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn insert(&self, cohort: Cohort) {
        self.rows.lock().unwrap().push(cohort);
    }

    pub fn get(&self, id: Uuid) -> Option<Cohort> {
        self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned()
    }
}

impl CohortRepository for MemCohorts {
    async fn create(&self, cohort: &Cohort) -> Result<(), ApiError> {
        self.insert(cohort.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cohort>, ApiError> {
        Ok(self.get(id))
    }

    async fn list(&self) -> Result<Vec<Cohort>, ApiError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(rows)
    }

    async fn update(&self, cohort: &Cohort) -> Result<(), ApiError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|c| c.id == cohort.id) {
            *row = cohort.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }

    async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.name == name && Some(c.id) != exclude))
    }
}

// ── Classes ──────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemClasses {
    rows: Arc<Mutex<Vec<Class>>>,
    cohort_names: Arc<Mutex<HashMap<Uuid, String>>>,
    enrolled: Arc<Mutex<HashSet<Uuid>>>,
    offerings: Arc<Mutex<HashSet<Uuid>>>,
}

impl MemClasses {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn insert(&self, class: Class) {
        self.rows.lock().unwrap().push(class);
    }

    pub fn set_cohort_name(&self, id: Uuid, name: &str) {
        self.cohort_names.lock().unwrap().insert(id, name.to_owned());
    }

    /// Mark a class as having at least one enrolled student.
    pub fn mark_enrolled(&self, class_id: Uuid) {
        self.enrolled.lock().unwrap().insert(class_id);
    }

    /// Mark a class as referenced by an offering.
    pub fn mark_offering(&self, class_id: Uuid) {
        self.offerings.lock().unwrap().insert(class_id);
    }

    fn detail(&self, class: Class) -> ClassDetail {
        let name = self
            .cohort_names
            .lock()
            .unwrap()
            .get(&class.cohort_id)
            .cloned()
            .unwrap_or_default();
        ClassDetail {
            cohort: EntityRef {
                id: class.cohort_id,
                name,
            },
            class,
        }
    }
}

impl ClassRepository for MemClasses {
    async fn create(&self, class: &Class) -> Result<(), ApiError> {
        self.insert(class.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Class>, ApiError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<ClassDetail>, ApiError> {
        Ok(self.find_by_id(id).await?.map(|c| self.detail(c)))
    }

    async fn list(
        &self,
        filter: ClassFilter,
        page: PageRequest,
    ) -> Result<(u64, Vec<ClassDetail>), ApiError> {
        let PageRequest { per_page, page } = page.clamped();
        let rows = self.rows.lock().unwrap().clone();
        let matches: Vec<Class> = rows
            .into_iter()
            .filter(|c| filter.cohort_id.is_none_or(|id| c.cohort_id == id))
            .filter(|c| filter.intake_period.is_none_or(|p| c.intake_period == p))
            .filter(|c| filter.mode.is_none_or(|m| c.mode == m))
            .collect();
        let total = matches.len() as u64;
        let data = matches
            .into_iter()
            .skip(((page - 1) * per_page) as usize)
            .take(per_page as usize)
            .map(|c| self.detail(c))
            .collect();
        Ok((total, data))
    }

    async fn update(&self, class: &Class) -> Result<(), ApiError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|c| c.id == class.id) {
            *row = class.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }

    async fn code_exists(&self, code: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.code == code && Some(c.id) != exclude))
    }

    async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.name == name && Some(c.id) != exclude))
    }

    async fn has_enrolled_students(&self, class_id: Uuid) -> Result<bool, ApiError> {
        Ok(self.enrolled.lock().unwrap().contains(&class_id))
    }

    async fn has_offerings(&self, class_id: Uuid) -> Result<bool, ApiError> {
        Ok(self.offerings.lock().unwrap().contains(&class_id))
    }
}

// ── Modules ──────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemModules {
    rows: Arc<Mutex<Vec<Module>>>,
    offerings: Arc<Mutex<HashSet<Uuid>>>,
}

impl MemModules {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn insert(&self, module: Module) {
        self.rows.lock().unwrap().push(module);
    }

    pub fn get(&self, id: Uuid) -> Option<Module> {
        self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned()
    }

    /// Mark a module as referenced by an offering.
    pub fn mark_offering(&self, module_id: Uuid) {
        self.offerings.lock().unwrap().insert(module_id);
    }
}

impl ModuleRepository for MemModules {
    async fn create(&self, module: &Module) -> Result<(), ApiError> {
        self.insert(module.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Module>, ApiError> {
        Ok(self.get(id))
    }

    async fn list(&self, active: Option<bool>) -> Result<Vec<Module>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| active.is_none_or(|a| m.is_active == a))
            .cloned()
            .collect())
    }

    async fn update(&self, module: &Module) -> Result<(), ApiError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|m| m.id == module.id) {
            *row = module.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        Ok(rows.len() < before)
    }

    async fn code_exists(&self, code: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.code == code && Some(m.id) != exclude))
    }

    async fn has_offerings(&self, module_id: Uuid) -> Result<bool, ApiError> {
        Ok(self.offerings.lock().unwrap().contains(&module_id))
    }
}

// ── Offerings ────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemOfferings {
    rows: Arc<Mutex<Vec<Offering>>>,
}

impl MemOfferings {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn insert(&self, offering: Offering) {
        self.rows.lock().unwrap().push(offering);
    }

    pub fn get(&self, id: Uuid) -> Option<Offering> {
        self.rows.lock().unwrap().iter().find(|o| o.id == id).cloned()
    }

    fn detail(offering: Offering) -> OfferingDetail {
        OfferingDetail {
            module: EntityRef {
                id: offering.module_id,
                name: String::new(),
            },
            class: EntityRef {
                id: offering.class_id,
                name: String::new(),
            },
            facilitator: PersonRef {
                id: offering.facilitator_id,
                first_name: String::new(),
                last_name: String::new(),
            },
            offering,
        }
    }
}

impl OfferingRepository for MemOfferings {
    async fn create(&self, offering: &Offering) -> Result<(), ApiError> {
        self.insert(offering.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offering>, ApiError> {
        Ok(self.get(id))
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<OfferingDetail>, ApiError> {
        Ok(self.get(id).map(Self::detail))
    }

    async fn list(&self, status: Option<OfferingStatus>) -> Result<Vec<OfferingDetail>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .map(Self::detail)
            .collect())
    }

    async fn update(&self, offering: &Offering) -> Result<(), ApiError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|o| o.id == offering.id) {
            *row = offering.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|o| o.id != id);
        Ok(rows.len() < before)
    }
}

// ── Activity logs ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemActivityLogs {
    rows: Arc<Mutex<Vec<ActivityLog>>>,
    /// offering id → facilitator id, for the deadline scan lookup.
    offering_facilitators: Arc<Mutex<HashMap<Uuid, Uuid>>>,
}

impl MemActivityLogs {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn insert(&self, log: ActivityLog) {
        self.rows.lock().unwrap().push(log);
    }

    pub fn get(&self, id: Uuid) -> Option<ActivityLog> {
        self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned()
    }

    pub fn link_offering(&self, offering_id: Uuid, facilitator_id: Uuid) {
        self.offering_facilitators
            .lock()
            .unwrap()
            .insert(offering_id, facilitator_id);
    }
}

impl ActivityLogRepository for MemActivityLogs {
    async fn create(&self, log: &ActivityLog) -> Result<(), ApiError> {
        self.insert(log.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ActivityLog>, ApiError> {
        Ok(self.get(id))
    }

    async fn list(&self, week_number: Option<i32>) -> Result<Vec<ActivityLog>, ApiError> {
        let mut rows: Vec<ActivityLog> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| week_number.is_none_or(|w| l.week_number == w))
            .cloned()
            .collect();
        rows.sort_by_key(|l| l.week_number);
        Ok(rows)
    }

    async fn update(&self, log: &ActivityLog) -> Result<(), ApiError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|l| l.id == log.id) {
            *row = log.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|l| l.id != id);
        Ok(rows.len() < before)
    }

    async fn facilitator_has_log_for_week(
        &self,
        facilitator_id: Uuid,
        week_number: i32,
    ) -> Result<bool, ApiError> {
        let links = self.offering_facilitators.lock().unwrap();
        Ok(self.rows.lock().unwrap().iter().any(|l| {
            l.week_number == week_number
                && links.get(&l.offering_id) == Some(&facilitator_id)
        }))
    }
}

// ── Grades ───────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemGrades {
    rows: Arc<Mutex<Vec<Grade>>>,
}

impl MemGrades {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn insert(&self, grade: Grade) {
        self.rows.lock().unwrap().push(grade);
    }

    pub fn get(&self, id: Uuid) -> Option<Grade> {
        self.rows.lock().unwrap().iter().find(|g| g.id == id).cloned()
    }
}

impl GradeRepository for MemGrades {
    async fn create(&self, grade: &Grade) -> Result<(), ApiError> {
        self.insert(grade.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Grade>, ApiError> {
        Ok(self.get(id))
    }

    async fn list(&self, status: Option<GradeStatus>) -> Result<Vec<Grade>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|g| status.is_none_or(|s| g.grade_status == s))
            .cloned()
            .collect())
    }

    async fn update(&self, grade: &Grade) -> Result<(), ApiError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|g| g.id == grade.id) {
            *row = grade.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|g| g.id != id);
        Ok(rows.len() < before)
    }
}

// ── Notifications ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemNotifications {
    rows: Arc<Mutex<Vec<Notification>>>,
}

impl MemNotifications {
    pub fn insert(&self, notification: Notification) {
        self.rows.lock().unwrap().push(notification);
    }

    pub fn get(&self, id: Uuid) -> Option<Notification> {
        self.rows.lock().unwrap().iter().find(|n| n.id == id).cloned()
    }
}

impl NotificationRepository for MemNotifications {
    async fn create(&self, notification: &Notification) -> Result<(), ApiError> {
        self.insert(notification.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Notification>, ApiError> {
        let mut rows: Vec<Notification> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|n| n.id == id && n.user_id == user_id) {
            Some(row) => {
                row.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Queue + clock ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemQueue {
    jobs: Arc<Mutex<Vec<JobEnvelope>>>,
}

impl MemQueue {
    pub fn jobs(&self) -> Vec<JobEnvelope> {
        self.jobs.lock().unwrap().clone()
    }
}

impl NotificationQueue for MemQueue {
    async fn enqueue(&self, job: &JobEnvelope) -> Result<(), ApiError> {
        self.jobs.lock().unwrap().push(job.clone());
        Ok(())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
