//! Batch lookups used to assemble read models without per-row queries.

use std::collections::HashMap;

use error::Result;

use crate::{
    identity::{IdentityDirectory, UserSummary},
    model::{Class, Id, Section, Subject},
    store::{AcademicStore, EnrollmentFilter},
};

fn distinct(ids: impl IntoIterator<Item = Id>) -> Vec<Id> {
    let mut ids: Vec<Id> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

pub(crate) async fn users(
    directory: &dyn IdentityDirectory,
    ids: impl IntoIterator<Item = Id>,
) -> Result<HashMap<Id, UserSummary>> {
    let ids = distinct(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(directory
        .find_users(&ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect())
}

pub(crate) async fn classes(
    store: &dyn AcademicStore,
    ids: impl IntoIterator<Item = Id>,
) -> Result<HashMap<Id, Class>> {
    let ids = distinct(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(store
        .find_classes(&ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect())
}

pub(crate) async fn sections(
    store: &dyn AcademicStore,
    ids: impl IntoIterator<Item = Id>,
) -> Result<HashMap<Id, Section>> {
    let ids = distinct(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(store
        .find_sections(&ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect())
}

pub(crate) async fn subjects(
    store: &dyn AcademicStore,
    ids: impl IntoIterator<Item = Id>,
) -> Result<HashMap<Id, Subject>> {
    let ids = distinct(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(store
        .find_subjects(&ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect())
}

/// Active enrollment count per section, optionally within one session.
pub(crate) async fn student_counts(
    store: &dyn AcademicStore,
    section_ids: impl IntoIterator<Item = Id>,
    session_id: Option<Id>,
) -> Result<HashMap<Id, usize>> {
    let section_ids = distinct(section_ids);
    if section_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let enrollments = store
        .list_enrollments(EnrollmentFilter {
            section_ids: Some(section_ids),
            session_id,
        })
        .await?;

    let mut counts = HashMap::new();
    for enrollment in enrollments {
        *counts.entry(enrollment.section_id).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Subject ids in the catalog of each class.
pub(crate) async fn catalogs(
    store: &dyn AcademicStore,
    class_ids: impl IntoIterator<Item = Id>,
) -> Result<HashMap<Id, Vec<Id>>> {
    let class_ids = distinct(class_ids);
    if class_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let mut catalogs: HashMap<Id, Vec<Id>> = HashMap::new();
    for link in store.list_class_subjects(&class_ids).await? {
        catalogs.entry(link.class_id).or_default().push(link.subject_id);
    }
    Ok(catalogs)
}
