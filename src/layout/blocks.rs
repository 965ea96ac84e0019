//! Block grouping.
//!
//! Programs that overlap in time and share a group are drawn together as one
//! block. Overlap is transitive here: if A overlaps B and B overlaps C, all
//! three form one block even when A and C never touch.
//!
//! # Algorithm
//! Build edges with one O(n²) pass over the pairwise predicates, then merge
//! endpoints in a disjoint-set forest (union by size, path halving).
//!
//! # Reference
//! Tarjan (1975), "Efficiency of a Good But Not Linear Set Union Algorithm"

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{groups_intersect, time_overlaps, Group, GroupId, Program};

/// A cluster of transitively overlapping programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Members, sorted by begin, duration, groups and id.
    pub programs: Vec<&'a Program>,
    /// Earliest member begin (ms).
    pub begin: i64,
    /// Latest member end minus `begin` (ms).
    pub duration: i64,
    /// Distinct member groups; empty when any member is a wildcard.
    pub groups: Vec<GroupId>,
}

impl Block<'_> {
    /// Stable identity derived from the first member.
    pub fn key(&self) -> String {
        match self.programs.first() {
            Some(first) => format!(
                "{}-{}-{}",
                first.begin.unwrap_or_default(),
                first.duration,
                first.groups.join("-")
            ),
            None => String::new(),
        }
    }

    /// Block end (ms).
    pub fn end(&self) -> i64 {
        self.begin.saturating_add(self.duration)
    }
}

/// Replaces empty group sets by every known group, in row order.
///
/// Wildcard programs then take part in overlap tests against group-scoped
/// ones like any other program.
pub fn expand_wildcard_groups(programs: &[Program], groups: &[Group]) -> Vec<Program> {
    let all: Vec<GroupId> = groups.iter().map(|g| g.id.clone()).collect();
    programs
        .iter()
        .map(|p| {
            if p.is_wildcard() {
                Program {
                    groups: all.clone(),
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect()
}

/// Clusters placed programs into blocks.
///
/// Unplaced programs are skipped; they belong to the tray. Deleted programs
/// are skipped as well. Block membership
/// does not depend on input order, and blocks are reported in the order of
/// their first member.
pub fn group_programs_to_blocks(programs: &[Program]) -> Vec<Block<'_>> {
    let placed: Vec<&Program> = programs
        .iter()
        .filter(|p| p.is_live() && p.is_placed())
        .collect();
    let mut sets = DisjointSets::new(placed.len());

    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            if time_overlaps(placed[i], placed[j])
                && groups_intersect(&placed[i].groups, &placed[j].groups)
            {
                sets.union(i, j);
            }
        }
    }

    let mut components: BTreeMap<usize, Vec<&Program>> = BTreeMap::new();
    for (i, &p) in placed.iter().enumerate() {
        components.entry(sets.find(i)).or_default().push(p);
    }

    let mut blocks: Vec<Block<'_>> = components
        .into_values()
        .map(|mut members| {
            members.sort_by(|a, b| signature_cmp(a, b));
            build_block(members)
        })
        .collect();
    blocks.sort_by(|a, b| signature_cmp(a.programs[0], b.programs[0]));
    blocks
}

fn build_block(programs: Vec<&Program>) -> Block<'_> {
    let begin = programs.iter().filter_map(|p| p.begin).min().unwrap_or(0);
    let end = programs.iter().filter_map(|p| p.end()).max().unwrap_or(begin);

    let mut groups: Vec<GroupId> = Vec::new();
    if !programs.iter().any(|p| p.is_wildcard()) {
        for g in programs.iter().flat_map(|p| p.groups.iter()) {
            if !groups.contains(g) {
                groups.push(g.clone());
            }
        }
    }

    Block {
        programs,
        begin,
        duration: end.saturating_sub(begin),
        groups,
    }
}

fn signature_cmp(a: &Program, b: &Program) -> Ordering {
    a.begin
        .cmp(&b.begin)
        .then(a.duration.cmp(&b.duration))
        .then_with(|| a.groups.cmp(&b.groups))
        .then_with(|| a.id.cmp(&b.id))
}

/// Disjoint-set forest over `0..n`.
struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}
