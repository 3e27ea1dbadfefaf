//! # Academic Structure Engine
//!
//! Owns the School -> Session -> Class -> Section hierarchy, session
//! activation exclusivity and the class subject catalog.

use std::sync::Arc;

use error::{AppError, Result};
use tracing::info;
use validator::Validate;

use crate::{
    commands::{AssignSubjects, CreateClass, CreateSchool, CreateSection, CreateSession, CreateSubject, UpdateSubject},
    config::AcademicsConfig,
    identity::{ensure_can_teach, IdentityDirectory},
    loader,
    model::{Class, Id, School, Section, Session, Subject},
    store::{AcademicStore, AssignmentFilter, NewClass, NewSchool, NewSection, NewSession, NewSubject, SubjectChanges},
    views::{
        ClassSubjectsView,
        ClassTree,
        ClassWithSubjects,
        SchoolDetail,
        SchoolStructure,
        SectionDetail,
        SectionSummary,
        SectionWithTeachers,
        SubjectList,
        SubjectRef,
        SubjectTeacher,
        SubjectWithClasses,
        UserContact,
        UserRef,
    },
};

#[derive(Clone)]
pub struct StructureEngine {
    store:     Arc<dyn AcademicStore>,
    directory: Arc<dyn IdentityDirectory>,
    config:    AcademicsConfig,
}

impl StructureEngine {
    pub fn new(store: Arc<dyn AcademicStore>, directory: Arc<dyn IdentityDirectory>, config: AcademicsConfig) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    /// Load a school by code or fail with `NotFound`.
    pub async fn require_school(&self, code: &str) -> Result<School> {
        self.store
            .find_school_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("School not found"))
    }

    // Schools

    pub async fn create_school(&self, cmd: CreateSchool) -> Result<School> {
        cmd.validate()?;

        if self.store.find_school_by_code(&cmd.code).await?.is_some() {
            return Err(AppError::conflict("School with this code already exists"));
        }

        let school = self
            .store
            .insert_school(NewSchool {
                code:             cmd.code,
                name:             cmd.name,
                address:          cmd.address,
                phone:            cmd.phone,
                email:            cmd.email,
                base_url:         cmd.base_url,
                logo_path:        cmd.logo_path,
                banner_path:      cmd.banner_path,
                payment_link:     cmd.payment_link,
                principal_name:   cmd.principal_name,
                established_year: cmd.established_year,
            })
            .await?;

        info!(school_code = %school.code, school_id = school.id, "School created");
        Ok(school)
    }

    pub async fn school_by_code(&self, code: &str) -> Result<SchoolDetail> {
        let school = self.require_school(code).await?;
        let sessions = self.store.list_sessions(&school.code).await?;
        Ok(SchoolDetail {
            school,
            sessions,
        })
    }

    /// The school with its active session and full class tree.
    pub async fn school_structure(&self, code: &str) -> Result<SchoolStructure> {
        let school = self.require_school(code).await?;
        let (active_session, classes) = tokio::try_join!(
            self.store.find_active_session(&school.code),
            self.classes_by_school(&school.code)
        )?;
        Ok(SchoolStructure {
            school,
            active_session,
            classes,
        })
    }

    // Sessions

    /// Create a session. An active session replaces the school's current one
    /// atomically.
    pub async fn create_session(&self, school_code: &str, cmd: CreateSession) -> Result<Session> {
        cmd.validate()?;
        let school = self.require_school(school_code).await?;

        let session = self
            .store
            .insert_session(NewSession {
                school_code: school.code,
                name:        cmd.name,
                start_date:  cmd.start_date,
                end_date:    cmd.end_date,
                is_active:   cmd.is_active,
            })
            .await?;

        info!(
            school_code = %session.school_code,
            session_id = session.id,
            is_active = session.is_active,
            "Session created"
        );
        Ok(session)
    }

    /// Sessions of a school, newest first.
    pub async fn sessions_by_school(&self, school_code: &str) -> Result<Vec<Session>> {
        self.store.list_sessions(school_code).await
    }

    // Classes and sections

    pub async fn create_class(&self, school_code: &str, cmd: CreateClass) -> Result<Class> {
        cmd.validate()?;
        let school = self.require_school(school_code).await?;

        if self.config.enforce_unique_class_names &&
            self.store
                .find_active_class_by_name(&school.code, &cmd.name)
                .await?
                .is_some()
        {
            return Err(AppError::conflict("Class with this name already exists in this school"));
        }

        let class = self
            .store
            .insert_class(NewClass {
                school_code: school.code,
                name:        cmd.name,
                level:       cmd.level,
                description: cmd.description,
            })
            .await?;

        info!(school_code = %class.school_code, class_id = class.id, "Class created");
        Ok(class)
    }

    /// Active classes by level, each with its active sections by name.
    pub async fn classes_by_school(&self, school_code: &str) -> Result<Vec<ClassTree>> {
        let classes = self.store.list_classes(school_code).await?;
        let class_ids: Vec<Id> = classes.iter().map(|c| c.id).collect();
        let sections = self.store.list_sections(&class_ids).await?;
        let teachers = loader::users(
            self.directory.as_ref(),
            sections.iter().filter_map(|s| s.class_teacher_id),
        )
        .await?;

        let mut trees: Vec<ClassTree> = classes
            .into_iter()
            .map(|class| {
                ClassTree {
                    class,
                    sections: Vec::new(),
                }
            })
            .collect();

        for section in sections {
            if let Some(tree) = trees.iter_mut().find(|t| t.class.id == section.class_id) {
                let class_teacher = section
                    .class_teacher_id
                    .and_then(|id| teachers.get(&id))
                    .map(UserRef::from);
                tree.sections.push(SectionSummary {
                    section,
                    class_teacher,
                });
            }
        }
        Ok(trees)
    }

    /// Create a section under an active class of the given school.
    pub async fn create_section(&self, school_code: &str, class_id: Id, cmd: CreateSection) -> Result<Section> {
        cmd.validate()?;

        let class = self
            .store
            .find_class(class_id)
            .await?
            .filter(|c| c.is_active && c.school_code == school_code)
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        if self.config.enforce_unique_section_names &&
            self.store
                .find_active_section_by_name(class.id, &cmd.name)
                .await?
                .is_some()
        {
            return Err(AppError::conflict("Section with this name already exists in this class"));
        }

        if let Some(teacher_id) = cmd.class_teacher_id {
            ensure_can_teach(
                self.directory.find_user(teacher_id).await?,
                "Class teacher not found or not authorized to teach",
            )?;
        }

        let section = self
            .store
            .insert_section(NewSection {
                school_code:      class.school_code,
                class_id:         class.id,
                name:             cmd.name,
                capacity:         cmd.capacity.unwrap_or(self.config.default_section_capacity),
                class_teacher_id: cmd.class_teacher_id,
                room:             cmd.room,
            })
            .await?;

        info!(
            school_code = %section.school_code,
            class_id = section.class_id,
            section_id = section.id,
            "Section created"
        );
        Ok(section)
    }

    pub async fn sections_by_class(&self, class_id: Id) -> Result<Vec<SectionDetail>> {
        let class = self
            .store
            .find_class(class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let sections = self.store.list_sections(&[class.id]).await?;
        let teachers = loader::users(
            self.directory.as_ref(),
            sections.iter().filter_map(|s| s.class_teacher_id),
        )
        .await?;

        Ok(sections
            .into_iter()
            .map(|section| {
                let class_teacher = section
                    .class_teacher_id
                    .and_then(|id| teachers.get(&id))
                    .map(UserContact::from);
                SectionDetail {
                    section,
                    class: (&class).into(),
                    class_teacher,
                }
            })
            .collect())
    }

    // Subjects

    pub async fn create_subject(&self, school_code: &str, cmd: CreateSubject) -> Result<Subject> {
        cmd.validate()?;
        let school = self.require_school(school_code).await?;

        if let Some(code) = cmd.code.as_deref() {
            self.ensure_subject_code_free(&school.code, code, None).await?;
        }

        let subject = self
            .store
            .insert_subject(NewSubject {
                school_code: school.code,
                name:        cmd.name,
                code:        cmd.code,
                description: cmd.description,
                is_active:   cmd.is_active,
            })
            .await?;

        info!(school_code = %subject.school_code, subject_id = subject.id, "Subject created");
        Ok(subject)
    }

    /// Subjects of a school by name, each with the active classes carrying it.
    pub async fn subjects_by_school(&self, school_code: &str, include_inactive: bool) -> Result<SubjectList> {
        let subjects = self.store.list_subjects(school_code, include_inactive).await?;

        let mut with_classes = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let links = self.store.list_subject_classes(subject.id).await?;
            let mut classes: Vec<Class> = loader::classes(self.store.as_ref(), links.iter().map(|l| l.class_id))
                .await?
                .into_values()
                .filter(|c| c.is_active)
                .collect();
            classes.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));

            with_classes.push(SubjectWithClasses {
                subject,
                classes: classes.iter().map(Into::into).collect(),
            });
        }

        Ok(SubjectList {
            count:    with_classes.len(),
            subjects: with_classes,
        })
    }

    /// Partially update a subject. The code stays unique among the active
    /// subjects of the school, including when a subject is reactivated.
    pub async fn update_subject(&self, subject_id: Id, cmd: UpdateSubject) -> Result<Subject> {
        cmd.validate()?;
        let subject = self
            .store
            .find_subject(subject_id)
            .await?
            .ok_or_else(|| AppError::not_found("Subject not found"))?;

        let code_changed = cmd.code.is_some() && cmd.code != subject.code;
        let reactivated = cmd.is_active == Some(true) && !subject.is_active;
        let will_be_active = cmd.is_active.unwrap_or(subject.is_active);
        if will_be_active && (code_changed || reactivated) {
            if let Some(code) = cmd.code.as_deref().or(subject.code.as_deref()) {
                self.ensure_subject_code_free(&subject.school_code, code, Some(subject.id))
                    .await?;
            }
        }

        let updated = self
            .store
            .update_subject(subject.id, SubjectChanges {
                name:        cmd.name,
                code:        cmd.code,
                description: cmd.description,
                is_active:   cmd.is_active,
            })
            .await?;

        info!(subject_id = updated.id, "Subject updated");
        Ok(updated)
    }

    /// Delete a subject that no active class or teacher references.
    pub async fn delete_subject(&self, subject_id: Id, hard_delete: bool) -> Result<()> {
        let subject = self
            .store
            .find_subject(subject_id)
            .await?
            .ok_or_else(|| AppError::not_found("Subject not found"))?;

        let (links, assignments) = tokio::try_join!(
            self.store.list_subject_classes(subject.id),
            self.store.list_assignments(AssignmentFilter {
                subject_id: Some(subject.id),
                ..Default::default()
            })
        )?;
        let active_classes = loader::classes(self.store.as_ref(), links.iter().map(|l| l.class_id))
            .await?
            .values()
            .filter(|c| c.is_active)
            .count();

        if active_classes > 0 || !assignments.is_empty() {
            return Err(AppError::conflict_with(
                "Cannot delete subject. It is assigned to active classes or teachers.",
                serde_json::json!({
                    "assignedClasses": active_classes,
                    "assignedTeachers": assignments.len(),
                }),
            ));
        }

        self.store.delete_subject(subject.id, hard_delete).await?;
        info!(subject_id = subject.id, hard_delete, "Subject deleted");
        Ok(())
    }

    async fn ensure_subject_code_free(&self, school_code: &str, code: &str, exclude: Option<Id>) -> Result<()> {
        if self
            .store
            .find_active_subject_by_code(school_code, code, exclude)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Subject with this code already exists"));
        }
        Ok(())
    }

    // Class catalog

    /// Add subjects to a class catalog. Every subject must be active and
    /// belong to the class's school, otherwise nothing is added.
    pub async fn assign_subjects(&self, cmd: AssignSubjects) -> Result<ClassWithSubjects> {
        cmd.validate()?;
        let class = self
            .store
            .find_class(cmd.class_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let requested = cmd.subject_ids.to_vec();
        let found = self
            .store
            .find_subjects(&requested)
            .await?
            .into_iter()
            .filter(|s| s.is_active && s.school_code == class.school_code)
            .count();
        if found != requested.len() {
            return Err(AppError::not_found("One or more subjects not found or inactive"));
        }

        self.store.add_class_subjects(class.id, &requested).await?;
        info!(class_id = class.id, subjects = ?requested, "Subjects assigned to class");

        let subjects = self.catalog_subjects(class.id).await?;
        Ok(ClassWithSubjects {
            class,
            subjects,
        })
    }

    /// Unlink a subject from a class unless a teacher is actively teaching it
    /// in one of the class's sections.
    pub async fn remove_subject_from_class(&self, class_id: Id, subject_id: Id) -> Result<()> {
        let (class, subject) = tokio::try_join!(self.store.find_class(class_id), self.store.find_subject(subject_id))?;
        let (Some(class), Some(subject)) = (class, subject)
        else {
            return Err(AppError::not_found("Class or Subject not found"));
        };

        let active = self
            .store
            .list_assignments(AssignmentFilter {
                subject_id: Some(subject.id),
                class_id: Some(class.id),
                ..Default::default()
            })
            .await?;
        if !active.is_empty() {
            return Err(AppError::conflict_with(
                "Cannot remove subject. It has active teacher assignments.",
                serde_json::json!({ "activeAssignments": active.len() }),
            ));
        }

        // Removing a subject the class does not carry is a no-op.
        if self.store.remove_class_subject(class.id, subject.id).await? {
            info!(class_id = class.id, subject_id = subject.id, "Subject removed from class");
        }
        Ok(())
    }

    /// A class with its active subjects and its active sections, each listing
    /// its active subject teachers.
    pub async fn class_subjects(&self, class_id: Id) -> Result<ClassSubjectsView> {
        let class = self
            .store
            .find_class(class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let class_ids = [class.id];
        let (subjects, sections) = tokio::try_join!(
            self.catalog_subjects(class.id),
            self.store.list_sections(&class_ids)
        )?;

        let mut views = Vec::with_capacity(sections.len());
        for section in sections {
            let subject_teachers = self.subject_teachers(section.id).await?;
            views.push(SectionWithTeachers {
                section,
                subject_teachers,
            });
        }

        Ok(ClassSubjectsView {
            class,
            subjects,
            sections: views,
        })
    }

    /// Active catalog subjects of a class by name.
    async fn catalog_subjects(&self, class_id: Id) -> Result<Vec<Subject>> {
        let catalog = loader::catalogs(self.store.as_ref(), [class_id]).await?;
        let ids = catalog.get(&class_id).cloned().unwrap_or_default();
        let mut subjects: Vec<Subject> = loader::subjects(self.store.as_ref(), ids)
            .await?
            .into_values()
            .filter(|s| s.is_active)
            .collect();
        subjects.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(subjects)
    }

    /// Active assignments of a section ordered by subject name.
    pub(crate) async fn subject_teachers(&self, section_id: Id) -> Result<Vec<SubjectTeacher>> {
        subject_teachers(self.store.as_ref(), self.directory.as_ref(), section_id).await
    }
}

pub(crate) async fn subject_teachers(
    store: &dyn AcademicStore,
    directory: &dyn IdentityDirectory,
    section_id: Id,
) -> Result<Vec<SubjectTeacher>> {
    let assignments = store
        .list_assignments(AssignmentFilter {
            section_id: Some(section_id),
            ..Default::default()
        })
        .await?;
    let (subjects, teachers) = tokio::try_join!(
        loader::subjects(store, assignments.iter().map(|a| a.subject_id)),
        loader::users(directory, assignments.iter().map(|a| a.teacher_id))
    )?;

    let mut rows: Vec<SubjectTeacher> = assignments
        .iter()
        .filter_map(|a| {
            subjects.get(&a.subject_id).map(|subject| {
                SubjectTeacher {
                    assignment_id: a.id,
                    subject:       SubjectRef::from(subject),
                    teacher:       teachers.get(&a.teacher_id).map(UserContact::from),
                }
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        a.subject
            .name
            .cmp(&b.subject.name)
            .then_with(|| a.assignment_id.cmp(&b.assignment_id))
    });
    Ok(rows)
}
