//! # Assignment Engine
//!
//! Section x Subject -> Teacher bindings. A (section, subject) pair moves
//! between `unassigned` and `assigned(teacher)`; at most one active row per
//! pair exists at any time and deactivated rows are kept as history.

use std::{collections::HashSet, sync::Arc};

use error::{AppError, Result, ResultExt};
use tracing::info;
use validator::Validate;

use crate::{
    commands::{AssignTeacher, BulkAssignTeachers, UpdateAssignment},
    identity::{ensure_can_teach, IdentityDirectory, UserSummary},
    loader,
    model::{Assignment, Class, Id, Section, Subject},
    store::{AcademicStore, AssignmentChanges, AssignmentFilter, NewAssignment},
    structure,
    views::{
        AssignmentDetail,
        BulkAssignmentResult,
        ClassRef,
        ScheduleEntry,
        ScheduleSection,
        ScheduleTeacher,
        ScheduledSubject,
        SectionTeachers,
        SectionWithClass,
        SubjectRef,
        SubjectTeachers,
        TaughtSection,
        TeacherLoad,
        TeacherProfile,
        TeacherSchedule,
        UserContact,
        WorkloadStats,
    },
};

/// Everything a validated assignment request resolved to.
struct Candidate {
    section: Section,
    class:   Class,
    subject: Subject,
    teacher: UserSummary,
}

#[derive(Clone)]
pub struct AssignmentEngine {
    pub(crate) store:     Arc<dyn AcademicStore>,
    pub(crate) directory: Arc<dyn IdentityDirectory>,
}

impl AssignmentEngine {
    pub fn new(store: Arc<dyn AcademicStore>, directory: Arc<dyn IdentityDirectory>) -> Self {
        Self {
            store,
            directory,
        }
    }

    /// Assign a teacher to a section-subject pair that has no active teacher.
    pub async fn assign_teacher(&self, cmd: AssignTeacher) -> Result<AssignmentDetail> {
        cmd.validate()?;
        let candidate = self.validate_candidate(&cmd).await?;

        let mut created = self
            .store
            .insert_assignments(vec![NewAssignment {
                section_id: cmd.section_id,
                subject_id: cmd.subject_id,
                teacher_id: cmd.teacher_id,
            }])
            .await?;
        let assignment = created
            .pop()
            .ok_or_else(|| AppError::internal("Assignment was not persisted"))?;

        info!(
            assignment_id = assignment.id,
            section_id = assignment.section_id,
            subject_id = assignment.subject_id,
            teacher_id = assignment.teacher_id,
            "Teacher assigned to section subject"
        );

        Ok(AssignmentDetail {
            section: SectionWithClass::new(&candidate.section, &candidate.class),
            subject: SubjectRef::from(&candidate.subject),
            teacher: Some(UserContact::from(&candidate.teacher)),
            assignment,
        })
    }

    /// Run the assignment rules in order: active section, active subject,
    /// teaching user, subject in the class catalog, no active assignment.
    async fn validate_candidate(&self, cmd: &AssignTeacher) -> Result<Candidate> {
        let (section, subject, teacher) = tokio::try_join!(
            self.store.find_section(cmd.section_id),
            self.store.find_subject(cmd.subject_id),
            self.directory.find_user(cmd.teacher_id)
        )?;

        let section = section
            .filter(|s| s.is_active)
            .ok_or_else(|| AppError::not_found("Section not found or inactive"))?;
        let subject = subject
            .filter(|s| s.is_active)
            .ok_or_else(|| AppError::not_found("Subject not found or inactive"))?;
        let teacher = ensure_can_teach(teacher, "Teacher not found or not authorized to teach")?;

        let class = self
            .store
            .find_class(section.class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;
        let catalog = loader::catalogs(self.store.as_ref(), [class.id]).await?;
        let in_catalog = catalog
            .get(&class.id)
            .is_some_and(|ids| ids.contains(&subject.id));
        if !in_catalog {
            return Err(AppError::invalid_state("Subject is not assigned to this class"));
        }

        if let Some(existing) = self.store.find_active_assignment(section.id, subject.id).await? {
            return Err(already_assigned(existing.teacher_id));
        }

        Ok(Candidate {
            section,
            class,
            subject,
            teacher,
        })
    }

    /// Change the teacher and/or active flag of an assignment.
    pub async fn update_assignment(&self, assignment_id: Id, cmd: UpdateAssignment) -> Result<AssignmentDetail> {
        cmd.validate()?;
        let assignment = self
            .store
            .find_assignment(assignment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Assignment not found"))?;

        let teacher_id = cmd.teacher_id.unwrap_or(assignment.teacher_id);
        if teacher_id != assignment.teacher_id {
            ensure_can_teach(
                self.directory.find_user(teacher_id).await?,
                "New teacher not found or not authorized to teach",
            )?;
        }

        if cmd.is_active.unwrap_or(assignment.is_active) {
            let current = self
                .store
                .find_active_assignment(assignment.section_id, assignment.subject_id)
                .await?;
            if let Some(other) = current.filter(|a| a.id != assignment.id) {
                if other.teacher_id == teacher_id {
                    return Err(AppError::conflict(
                        "This teacher is already assigned to this section-subject combination",
                    ));
                }
                return Err(already_assigned(other.teacher_id));
            }
        }

        let updated = self
            .store
            .update_assignment(assignment.id, AssignmentChanges {
                teacher_id: cmd.teacher_id,
                is_active:  cmd.is_active,
            })
            .await?;

        info!(
            assignment_id = updated.id,
            teacher_id = updated.teacher_id,
            is_active = updated.is_active,
            "Teacher assignment updated"
        );
        self.detail(updated).await
    }

    /// Deactivate an assignment, or delete it when `hard_delete` is set.
    pub async fn remove_assignment(&self, assignment_id: Id, hard_delete: bool) -> Result<()> {
        let assignment = self
            .store
            .find_assignment(assignment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Assignment not found"))?;

        self.store.delete_assignment(assignment.id, hard_delete).await?;
        info!(assignment_id = assignment.id, hard_delete, "Teacher assignment removed");
        Ok(())
    }

    /// Validate every entry, then create the whole batch in one transaction.
    pub async fn bulk_assign(&self, cmd: BulkAssignTeachers) -> Result<BulkAssignmentResult> {
        cmd.validate()?;

        let mut seen = HashSet::with_capacity(cmd.assignments.len());
        let mut candidates = Vec::with_capacity(cmd.assignments.len());
        for (index, entry) in cmd.assignments.iter().enumerate() {
            let position = index + 1;
            if !seen.insert((entry.section_id, entry.subject_id)) {
                return Err(AppError::conflict(format!(
                    "Assignment {}: Duplicate section-subject combination in request",
                    position
                )));
            }
            let candidate = self
                .validate_candidate(entry)
                .await
                .with_context(|| format!("Assignment {}", position))?;
            candidates.push(candidate);
        }

        let batch = cmd
            .assignments
            .iter()
            .map(|a| {
                NewAssignment {
                    section_id: a.section_id,
                    subject_id: a.subject_id,
                    teacher_id: a.teacher_id,
                }
            })
            .collect();
        let created = self.store.insert_assignments(batch).await?;
        info!(count = created.len(), "Teachers bulk assigned");

        let assignments = created
            .into_iter()
            .zip(candidates)
            .map(|(assignment, candidate)| {
                AssignmentDetail {
                    section: SectionWithClass::new(&candidate.section, &candidate.class),
                    subject: SubjectRef::from(&candidate.subject),
                    teacher: Some(UserContact::from(&candidate.teacher)),
                    assignment,
                }
            })
            .collect::<Vec<_>>();

        Ok(BulkAssignmentResult {
            created: assignments.len(),
            assignments,
        })
    }

    /// Active assignments of a teacher grouped by class-section.
    ///
    /// Student counts only include enrollments of `session_id` when given.
    pub async fn teacher_schedule(
        &self,
        teacher_id: Id,
        school_code: Option<String>,
        session_id: Option<Id>,
    ) -> Result<TeacherSchedule> {
        let teacher = self
            .directory
            .find_user(teacher_id)
            .await?
            .filter(|u| u.is_active && u.role.can_teach())
            .ok_or_else(|| AppError::not_found("Teacher not found"))?;

        let assignments = self
            .store
            .list_assignments(AssignmentFilter {
                teacher_id: Some(teacher.id),
                school_code,
                ..Default::default()
            })
            .await?;
        let rows = self.resolve(&assignments, session_id).await?;

        let mut stats = WorkloadStats {
            total_assignments: rows.len(),
            ..Default::default()
        };
        let mut classes = HashSet::new();
        let mut sections = HashSet::new();
        let mut subjects = HashSet::new();
        let mut schedule: Vec<ScheduleEntry> = Vec::new();

        for row in &rows {
            classes.insert(row.class.id);
            sections.insert(row.section.id);
            subjects.insert(row.subject.id);
            stats.total_students += row.student_count;

            let subject = ScheduledSubject {
                id:            row.subject.id,
                name:          row.subject.name.clone(),
                code:          row.subject.code.clone(),
                assignment_id: row.assignment.id,
            };
            match schedule.iter_mut().find(|e| e.section.id == row.section.id) {
                Some(entry) => entry.subjects.push(subject),
                None => {
                    schedule.push(ScheduleEntry {
                        key:      format!("{}-{}", row.class.name, row.section.name),
                        class:    ClassRef::from(&row.class),
                        section:  ScheduleSection {
                            id:            row.section.id,
                            name:          row.section.name.clone(),
                            room:          row.section.room.clone(),
                            capacity:      row.section.capacity,
                            student_count: row.student_count,
                        },
                        subjects: vec![subject],
                    })
                },
            }
        }
        stats.total_classes = classes.len();
        stats.total_sections = sections.len();
        stats.total_subjects = subjects.len();

        Ok(TeacherSchedule {
            teacher: ScheduleTeacher {
                id:        teacher.id,
                full_name: teacher.full_name,
                email:     teacher.email,
                role:      teacher.role,
            },
            workload_stats: stats,
            schedule,
        })
    }

    /// Active assignments of a subject grouped by teacher.
    pub async fn teachers_by_subject(
        &self,
        subject_id: Id,
        school_code: Option<String>,
        session_id: Option<Id>,
    ) -> Result<SubjectTeachers> {
        let subject = self
            .store
            .find_subject(subject_id)
            .await?
            .ok_or_else(|| AppError::not_found("Subject not found"))?;

        let assignments = self
            .store
            .list_assignments(AssignmentFilter {
                subject_id: Some(subject.id),
                school_code,
                ..Default::default()
            })
            .await?;
        let users = loader::users(self.directory.as_ref(), assignments.iter().map(|a| a.teacher_id)).await?;
        let mut rows = self.resolve(&assignments, session_id).await?;
        rows.retain(|r| users.contains_key(&r.assignment.teacher_id));
        rows.sort_by(|a, b| {
            let ta = &users[&a.assignment.teacher_id];
            let tb = &users[&b.assignment.teacher_id];
            ta.full_name
                .cmp(&tb.full_name)
                .then_with(|| ta.id.cmp(&tb.id))
                .then_with(|| a.class.level.cmp(&b.class.level))
                .then_with(|| a.section.name.cmp(&b.section.name))
        });

        let mut teachers: Vec<TeacherLoad> = Vec::new();
        for row in rows {
            let section = TaughtSection {
                assignment_id: row.assignment.id,
                id:            row.section.id,
                name:          row.section.name.clone(),
                room:          row.section.room.clone(),
                class:         ClassRef::from(&row.class),
                student_count: row.student_count,
            };
            match teachers.iter_mut().find(|t| t.teacher.id == row.assignment.teacher_id) {
                Some(load) => {
                    load.total_students += section.student_count;
                    load.sections.push(section);
                },
                None => {
                    teachers.push(TeacherLoad {
                        teacher:        TeacherProfile::from(&users[&row.assignment.teacher_id]),
                        total_students: section.student_count,
                        sections:       vec![section],
                    })
                },
            }
        }

        Ok(SubjectTeachers {
            subject: SubjectRef::from(&subject),
            teachers,
        })
    }

    /// Class teacher and active subject teachers of a section.
    pub async fn section_teachers(&self, section_id: Id) -> Result<SectionTeachers> {
        let section = self
            .store
            .find_section(section_id)
            .await?
            .ok_or_else(|| AppError::not_found("Section not found"))?;
        let class = self
            .store
            .find_class(section.class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let class_teacher = match section.class_teacher_id {
            Some(id) => self.directory.find_user(id).await?.as_ref().map(UserContact::from),
            None => None,
        };
        let subject_teachers =
            structure::subject_teachers(self.store.as_ref(), self.directory.as_ref(), section.id).await?;

        Ok(SectionTeachers {
            class: ClassRef::from(&class),
            section,
            class_teacher,
            subject_teachers,
        })
    }

    async fn detail(&self, assignment: Assignment) -> Result<AssignmentDetail> {
        let (section, subject, teacher) = tokio::try_join!(
            self.store.find_section(assignment.section_id),
            self.store.find_subject(assignment.subject_id),
            self.directory.find_user(assignment.teacher_id)
        )?;
        let section = section.ok_or_else(|| AppError::not_found("Section not found"))?;
        let subject = subject.ok_or_else(|| AppError::not_found("Subject not found"))?;
        let class = self
            .store
            .find_class(section.class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        Ok(AssignmentDetail {
            section: SectionWithClass::new(&section, &class),
            subject: SubjectRef::from(&subject),
            teacher: teacher.as_ref().map(UserContact::from),
            assignment,
        })
    }

    /// Join assignments with their section, class, subject and student count,
    /// ordered by class level, section name and subject name. Rows whose
    /// references no longer resolve are dropped.
    async fn resolve<'a>(&self, assignments: &'a [Assignment], session_id: Option<Id>) -> Result<Vec<ResolvedRow<'a>>> {
        let sections = loader::sections(self.store.as_ref(), assignments.iter().map(|a| a.section_id)).await?;
        let (classes, subjects, counts) = tokio::try_join!(
            loader::classes(self.store.as_ref(), sections.values().map(|s| s.class_id)),
            loader::subjects(self.store.as_ref(), assignments.iter().map(|a| a.subject_id)),
            loader::student_counts(self.store.as_ref(), sections.keys().copied(), session_id)
        )?;

        let mut rows: Vec<ResolvedRow<'a>> = assignments
            .iter()
            .filter_map(|assignment| {
                let section = sections.get(&assignment.section_id)?.clone();
                let class = classes.get(&section.class_id)?.clone();
                let subject = subjects.get(&assignment.subject_id)?.clone();
                Some(ResolvedRow {
                    assignment,
                    student_count: counts.get(&section.id).copied().unwrap_or(0),
                    section,
                    class,
                    subject,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            a.class
                .level
                .cmp(&b.class.level)
                .then_with(|| a.class.name.cmp(&b.class.name))
                .then_with(|| a.section.name.cmp(&b.section.name))
                .then_with(|| a.subject.name.cmp(&b.subject.name))
        });
        Ok(rows)
    }
}

struct ResolvedRow<'a> {
    assignment:    &'a Assignment,
    section:       Section,
    class:         Class,
    subject:       Subject,
    student_count: usize,
}

fn already_assigned(current_teacher_id: Id) -> AppError {
    AppError::conflict_with(
        "A teacher is already assigned to this section-subject combination",
        serde_json::json!({ "currentTeacherId": current_teacher_id }),
    )
}
