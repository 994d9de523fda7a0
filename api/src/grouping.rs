use crate::{Competition, Match};
use std::collections::HashMap;
use std::str::FromStr;

/// What makes two matches belong to the same competition group.
///
/// The provider occasionally reuses a display name across competitions (e.g. two
/// "Primera Division" entries). Grouping by name merges them, grouping by id keeps
/// them apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupKey {
    #[default]
    CompetitionName,
    CompetitionId,
}

impl FromStr for GroupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "competition-name" => Ok(GroupKey::CompetitionName),
            "id" | "competition-id" => Ok(GroupKey::CompetitionId),
            other => Err(format!("unknown group key '{other}' (expected 'name' or 'id')")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionGroup {
    /// The competition as first seen in the source list.
    pub competition: Competition,
    pub matches: Vec<Match>,
}

impl CompetitionGroup {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[derive(Hash, PartialEq, Eq)]
enum Bucket {
    Name(String),
    Id(u64),
}

/// Group a flat list of matches by competition.
///
/// Groups appear in order of first occurrence and matches keep their source order
/// inside each group. Nothing is sorted.
pub fn group_matches(matches: Vec<Match>, key: GroupKey) -> Vec<CompetitionGroup> {
    let mut groups: Vec<CompetitionGroup> = Vec::new();
    let mut index: HashMap<Bucket, usize> = HashMap::new();

    for m in matches {
        let bucket = match key {
            GroupKey::CompetitionName => Bucket::Name(m.competition.name.clone()),
            GroupKey::CompetitionId => Bucket::Id(m.competition.id),
        };
        let slot = *index.entry(bucket).or_insert_with(|| {
            groups.push(CompetitionGroup {
                competition: m.competition.clone(),
                matches: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].matches.push(m);
    }

    groups
}
