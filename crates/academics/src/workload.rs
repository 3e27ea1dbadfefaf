//! # Teaching Workload
//!
//! School-wide aggregates over the assignment graph: workload bands, subject
//! coverage and section-subject pairs still waiting for a teacher.

use std::collections::{HashMap, HashSet};

use error::{AppError, Result};

use crate::{
    assignment::AssignmentEngine,
    loader,
    model::{Assignment, Class, Id, School, Section, Session, Subject},
    store::AssignmentFilter,
    views::{
        AnalyticsOverview,
        SchoolRef,
        SectionWithClass,
        SessionRef,
        SubjectCoverage,
        SubjectCoverageDetail,
        SubjectRef,
        TeacherProfile,
        TeacherWorkload,
        TeacherWorkloadDetail,
        TeachingAnalytics,
        UnassignedCombinations,
        UnassignedGroup,
        UnassignedSection,
        UserRef,
        WorkloadDistribution,
    },
};

/// Workload band of a teacher by number of active assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadBand {
    Light,
    Moderate,
    Heavy,
    Overloaded,
}

impl WorkloadBand {
    pub const fn classify(assignments: usize) -> Self {
        match assignments {
            0 ..= 3 => WorkloadBand::Light,
            4 ..= 6 => WorkloadBand::Moderate,
            7 ..= 10 => WorkloadBand::Heavy,
            _ => WorkloadBand::Overloaded,
        }
    }
}

impl WorkloadDistribution {
    fn record(&mut self, band: WorkloadBand) {
        match band {
            WorkloadBand::Light => self.light += 1,
            WorkloadBand::Moderate => self.moderate += 1,
            WorkloadBand::Heavy => self.heavy += 1,
            WorkloadBand::Overloaded => self.overloaded += 1,
        }
    }
}

/// Active structure of a school with its catalog and active assignments.
struct SchoolGraph {
    classes:     HashMap<Id, Class>,
    sections:    Vec<Section>,
    subjects:    Vec<Subject>,
    catalogs:    HashMap<Id, Vec<Id>>,
    assignments: Vec<Assignment>,
}

impl SchoolGraph {
    /// Active catalog subjects without an active assignment, per active
    /// section, ordered by class level, section name and subject name.
    fn open_pairs(&self) -> Vec<(&Section, &Class, Vec<&Subject>, usize)> {
        let assigned: HashSet<(Id, Id)> = self
            .assignments
            .iter()
            .map(|a| (a.section_id, a.subject_id))
            .collect();
        let active_subjects: HashMap<Id, &Subject> = self.subjects.iter().map(|s| (s.id, s)).collect();

        let mut pairs = Vec::new();
        for section in &self.sections {
            let Some(class) = self.classes.get(&section.class_id)
            else {
                continue;
            };
            let mut catalog: Vec<&Subject> = self
                .catalogs
                .get(&class.id)
                .map(|ids| ids.iter().filter_map(|id| active_subjects.get(id).copied()).collect())
                .unwrap_or_default();
            let total = catalog.len();
            catalog.retain(|s| !assigned.contains(&(section.id, s.id)));
            catalog.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
            pairs.push((section, class, catalog, total));
        }
        pairs.sort_by(|a, b| {
            a.1.level
                .cmp(&b.1.level)
                .then_with(|| a.1.name.cmp(&b.1.name))
                .then_with(|| a.0.name.cmp(&b.0.name))
        });
        pairs
    }
}

impl AssignmentEngine {
    async fn require_school(&self, code: &str) -> Result<School> {
        self.store
            .find_school_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("School not found"))
    }

    async fn school_graph(&self, school_code: &str) -> Result<SchoolGraph> {
        let (classes, sections, subjects, assignments) = tokio::try_join!(
            self.store.list_classes(school_code),
            self.store.list_school_sections(school_code),
            self.store.list_subjects(school_code, false),
            self.store.list_assignments(AssignmentFilter {
                school_code: Some(school_code.to_string()),
                ..Default::default()
            })
        )?;
        let classes: HashMap<Id, Class> = classes.into_iter().map(|c| (c.id, c)).collect();
        let sections: Vec<Section> = sections
            .into_iter()
            .filter(|s| classes.contains_key(&s.class_id))
            .collect();
        let catalogs = loader::catalogs(self.store.as_ref(), classes.keys().copied()).await?;

        Ok(SchoolGraph {
            classes,
            sections,
            subjects,
            catalogs,
            assignments,
        })
    }

    /// Staffing overview of a school for one session, the active one unless
    /// `session_id` is given.
    pub async fn teaching_analytics(&self, school_code: &str, session_id: Option<Id>) -> Result<TeachingAnalytics> {
        let school = self.require_school(school_code).await?;
        let session: Session = match session_id {
            Some(id) => {
                self.store
                    .find_session(id)
                    .await?
                    .filter(|s| s.school_code == school.code)
                    .ok_or_else(|| AppError::not_found("Session not found"))?
            },
            None => {
                self.store
                    .find_active_session(&school.code)
                    .await?
                    .ok_or_else(|| AppError::not_found("No active session found"))?
            },
        };

        let (graph, staff) = tokio::try_join!(
            self.school_graph(&school.code),
            self.directory.list_teaching_staff(school.id)
        )?;
        let counts = loader::student_counts(
            self.store.as_ref(),
            graph.assignments.iter().map(|a| a.section_id),
            Some(session.id),
        )
        .await?;

        // Workload per teacher.
        let mut per_teacher: HashMap<Id, (usize, usize)> = HashMap::new();
        for assignment in &graph.assignments {
            let entry = per_teacher.entry(assignment.teacher_id).or_default();
            entry.0 += 1;
            entry.1 += counts.get(&assignment.section_id).copied().unwrap_or(0);
        }
        let users = loader::users(self.directory.as_ref(), per_teacher.keys().copied()).await?;
        let mut distribution = WorkloadDistribution::default();
        let mut details: Vec<TeacherWorkloadDetail> = per_teacher
            .into_iter()
            .map(|(teacher_id, (assignment_count, total_students))| {
                distribution.record(WorkloadBand::classify(assignment_count));
                TeacherWorkloadDetail {
                    teacher: users.get(&teacher_id).map(UserRef::from),
                    teacher_id,
                    assignment_count,
                    total_students,
                }
            })
            .collect();
        details.sort_by(|a, b| {
            b.assignment_count
                .cmp(&a.assignment_count)
                .then_with(|| a.teacher_id.cmp(&b.teacher_id))
        });

        // Coverage per active subject.
        let section_class: HashMap<Id, &Class> = graph
            .sections
            .iter()
            .filter_map(|s| graph.classes.get(&s.class_id).map(|c| (s.id, c)))
            .collect();
        let mut subjects: Vec<&Subject> = graph.subjects.iter().collect();
        subjects.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        let coverage: Vec<SubjectCoverageDetail> = subjects
            .into_iter()
            .map(|subject| {
                let taught: Vec<&Assignment> = graph
                    .assignments
                    .iter()
                    .filter(|a| a.subject_id == subject.id)
                    .collect();
                let mut classes_offered: Vec<String> = Vec::new();
                for assignment in &taught {
                    if let Some(class) = section_class.get(&assignment.section_id) {
                        if !classes_offered.contains(&class.name) {
                            classes_offered.push(class.name.clone());
                        }
                    }
                }
                SubjectCoverageDetail {
                    id: subject.id,
                    name: subject.name.clone(),
                    code: subject.code.clone(),
                    total_assignments: taught.len(),
                    classes_offered,
                    is_fully_covered: !taught.is_empty(),
                }
            })
            .collect();
        let uncovered_subjects: Vec<SubjectCoverageDetail> =
            coverage.iter().filter(|s| !s.is_fully_covered).cloned().collect();

        let unassigned_sections: Vec<UnassignedSection> = graph
            .open_pairs()
            .into_iter()
            .filter(|(_, _, open, _)| !open.is_empty())
            .map(|(section, class, open, total)| {
                UnassignedSection {
                    section_id:          section.id,
                    section_name:        section.name.clone(),
                    class_name:          class.name.clone(),
                    total_subjects:      total,
                    assigned_subjects:   total - open.len(),
                    unassigned_subjects: open.len(),
                }
            })
            .collect();

        Ok(TeachingAnalytics {
            school: SchoolRef {
                code: school.code.clone(),
                name: school.name.clone(),
            },
            session: SessionRef::from(&session),
            overview: AnalyticsOverview {
                total_teachers:    staff.len(),
                total_subjects:    graph.subjects.len(),
                total_classes:     graph.classes.len(),
                total_sections:    graph.sections.len(),
                total_assignments: graph.assignments.len(),
                unassigned_count:  unassigned_sections.len(),
            },
            teacher_workload: TeacherWorkload {
                distribution,
                details,
            },
            subject_coverage: SubjectCoverage {
                total: coverage.len(),
                covered: coverage.len() - uncovered_subjects.len(),
                uncovered: uncovered_subjects.len(),
                uncovered_subjects,
                details: coverage,
            },
            unassigned_sections,
        })
    }

    /// Active teaching staff of a school, optionally without those already
    /// teaching `subject_id`.
    pub async fn available_teachers(
        &self,
        school_code: &str,
        subject_id: Option<Id>,
        exclude_assigned: bool,
    ) -> Result<Vec<TeacherProfile>> {
        let school = self.require_school(school_code).await?;
        let staff = self.directory.list_teaching_staff(school.id).await?;

        let excluded: HashSet<Id> = match (exclude_assigned, subject_id) {
            (true, Some(subject_id)) => {
                self.store
                    .list_assignments(AssignmentFilter {
                        subject_id: Some(subject_id),
                        ..Default::default()
                    })
                    .await?
                    .into_iter()
                    .map(|a| a.teacher_id)
                    .collect()
            },
            _ => HashSet::new(),
        };

        Ok(staff
            .iter()
            .filter(|u| !excluded.contains(&u.id))
            .map(TeacherProfile::from)
            .collect())
    }

    /// Every active section-subject pair of the class catalogs that still
    /// has no active teacher, grouped by section.
    pub async fn unassigned_combinations(&self, school_code: &str) -> Result<UnassignedCombinations> {
        let school = self.require_school(school_code).await?;
        let graph = self.school_graph(&school.code).await?;

        let sections: Vec<UnassignedGroup> = graph
            .open_pairs()
            .into_iter()
            .filter(|(_, _, open, _)| !open.is_empty())
            .map(|(section, class, open, _)| {
                UnassignedGroup {
                    section:             SectionWithClass::new(section, class),
                    unassigned_subjects: open.into_iter().map(SubjectRef::from).collect(),
                }
            })
            .collect();

        Ok(UnassignedCombinations {
            total_unassigned: sections.iter().map(|g| g.unassigned_subjects.len()).sum(),
            sections,
        })
    }
}
