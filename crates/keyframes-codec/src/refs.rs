//! Id tables and reference checks, run once the whole tree is decoded.

use keyframes_data::model::{Document, Feature, GroupId};
use std::collections::{HashMap, HashSet};

use crate::error::{DecodeError, IdKind, Result};
use crate::path::FieldPath;

pub(crate) fn resolve(doc: &Document) -> Result<()> {
    let groups = group_table(doc)?;
    check_feature_ids(doc)?;
    check_parents(doc, &groups)?;
    check_cycles(doc, &groups)?;
    check_feature_groups(doc, &groups)?;
    tracing::trace!(
        groups = groups.len(),
        features = doc.features.len(),
        "id references resolved"
    );
    Ok(())
}

fn group_path(index: usize) -> FieldPath {
    FieldPath::root().key("animation_groups").index(index)
}

/// Path of the feature at `depth` in the masking chain of `features[index]`.
fn feature_path(index: usize, depth: usize) -> FieldPath {
    (0..depth).fold(FieldPath::root().key("features").index(index), |p, _| {
        p.key("masking")
    })
}

/// Each top-level feature followed by its masks, with the mask depth.
fn features_with_masks(doc: &Document) -> impl Iterator<Item = (usize, usize, &Feature)> {
    doc.features.iter().enumerate().flat_map(|(index, feature)| {
        std::iter::once(feature)
            .chain(feature.masks())
            .enumerate()
            .map(move |(depth, f)| (index, depth, f))
    })
}

/// Maps group id to its position in `animation_groups`.
fn group_table(doc: &Document) -> Result<HashMap<GroupId, usize>> {
    let mut table = HashMap::with_capacity(doc.animation_groups.len());
    for (index, group) in doc.animation_groups.iter().enumerate() {
        if table.insert(group.group_id, index).is_some() {
            return Err(DecodeError::DuplicateId {
                path: group_path(index).key("group_id"),
                entity: IdKind::AnimationGroup,
                id: group.group_id,
            });
        }
    }
    Ok(table)
}

fn check_feature_ids(doc: &Document) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, depth, feature) in features_with_masks(doc) {
        if !seen.insert(feature.feature_id) {
            return Err(DecodeError::DuplicateId {
                path: feature_path(index, depth).key("feature_id"),
                entity: IdKind::Feature,
                id: feature.feature_id,
            });
        }
    }
    Ok(())
}

fn check_parents(doc: &Document, groups: &HashMap<GroupId, usize>) -> Result<()> {
    for (index, group) in doc.animation_groups.iter().enumerate() {
        if let Some(parent) = group.parent_group {
            if !groups.contains_key(&parent) {
                return Err(DecodeError::DanglingReference {
                    path: group_path(index).key("parent_group"),
                    id: parent,
                });
            }
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnTrail,
    Done,
}

/// Follows every parent chain once and collects each cycle it closes. The
/// error is reported at the first group in declaration order that lies on
/// any cycle, with that cycle's ids listed from there along the parents.
fn check_cycles(doc: &Document, groups: &HashMap<GroupId, usize>) -> Result<()> {
    let all = &doc.animation_groups;
    let mut marks = vec![Mark::Unvisited; all.len()];
    // Indices of the reported cycle, starting at its earliest group.
    let mut earliest: Option<Vec<usize>> = None;

    for start in 0..all.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        let mut trail: Vec<usize> = Vec::new();
        let mut current = Some(start);

        while let Some(index) = current {
            match marks[index] {
                Mark::Done => break,
                Mark::OnTrail => {
                    let begin = trail.iter().position(|&i| i == index).unwrap_or(0);
                    let cycle = rotate_to_lowest(&trail[begin..]);
                    if earliest.as_ref().map_or(true, |seen| cycle[0] < seen[0]) {
                        earliest = Some(cycle);
                    }
                    break;
                }
                Mark::Unvisited => {
                    marks[index] = Mark::OnTrail;
                    trail.push(index);
                    current = all[index]
                        .parent_group
                        .and_then(|parent| groups.get(&parent).copied());
                }
            }
        }

        for index in trail {
            marks[index] = Mark::Done;
        }
    }

    match earliest {
        Some(cycle) => Err(DecodeError::CyclicReference {
            path: group_path(cycle[0]).key("parent_group"),
            cycle: cycle.iter().map(|&i| all[i].group_id).collect(),
        }),
        None => Ok(()),
    }
}

/// Rotates a cycle of group indices so it starts at the smallest index.
fn rotate_to_lowest(cycle: &[usize]) -> Vec<usize> {
    let first = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, i)| *i)
        .map_or(0, |(pos, _)| pos);
    cycle[first..].iter().chain(&cycle[..first]).copied().collect()
}

fn check_feature_groups(doc: &Document, groups: &HashMap<GroupId, usize>) -> Result<()> {
    for (index, depth, feature) in features_with_masks(doc) {
        if let Some(group) = feature.animation_group {
            if !groups.contains_key(&group) {
                return Err(DecodeError::DanglingReference {
                    path: feature_path(index, depth).key("animation_group"),
                    id: group,
                });
            }
        }
    }
    Ok(())
}
