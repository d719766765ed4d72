//! Friendship graph and like relation
//!
//! Both are read-only snapshots keyed by person. Friendship edges are
//! directed: `A -> B` does not imply `B -> A`.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Opaque person identifier
pub type PersonId = String;

/// Opaque item key (e.g. a video URL)
pub type ItemId = String;

/// Directed friendship graph: person -> declared friends, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FriendshipGraph {
    friends: HashMap<PersonId, Vec<PersonId>>,
}

impl FriendshipGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a person with no declared friends
    pub fn add_person(&mut self, person: impl Into<PersonId>) {
        self.friends.entry(person.into()).or_default();
    }

    /// Add a directed edge `person -> friend`
    ///
    /// Only `person` becomes a key; `friend` must be added separately for
    /// their own friends to be resolvable.
    pub fn add_friend(&mut self, person: impl Into<PersonId>, friend: impl Into<PersonId>) {
        self.friends.entry(person.into()).or_default().push(friend.into());
    }

    /// Add edges in both directions
    pub fn befriend(&mut self, a: &str, b: &str) {
        self.add_friend(a, b);
        self.add_friend(b, a);
    }

    /// Declared friends of a person, `None` if the person is not a key
    pub fn friends_of(&self, person: &str) -> Option<&[PersonId]> {
        self.friends.get(person).map(|v| v.as_slice())
    }

    /// Whether the person is a key of the graph
    pub fn contains(&self, person: &str) -> bool {
        self.friends.contains_key(person)
    }

    /// Number of people with a friend list
    pub fn person_count(&self) -> usize {
        self.friends.len()
    }

    /// All people with a friend list
    pub fn people(&self) -> impl Iterator<Item = &PersonId> {
        self.friends.keys()
    }
}

impl<P, F> FromIterator<(P, F)> for FriendshipGraph
where
    P: Into<PersonId>,
    F: IntoIterator,
    F::Item: Into<PersonId>,
{
    fn from_iter<T: IntoIterator<Item = (P, F)>>(iter: T) -> Self {
        let friends = iter
            .into_iter()
            .map(|(person, friends)| {
                (person.into(), friends.into_iter().map(Into::into).collect())
            })
            .collect();
        Self { friends }
    }
}

/// Person -> set of liked item keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikeRelation {
    likes: HashMap<PersonId, HashSet<ItemId>>,
}

impl LikeRelation {
    /// Create an empty relation
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a person who likes nothing yet
    pub fn add_person(&mut self, person: impl Into<PersonId>) {
        self.likes.entry(person.into()).or_default();
    }

    /// Record that `person` likes `item`
    pub fn add_like(&mut self, person: impl Into<PersonId>, item: impl Into<ItemId>) {
        self.likes.entry(person.into()).or_default().insert(item.into());
    }

    /// Like-set of a person, `None` if the person is not a key
    pub fn likes_of(&self, person: &str) -> Option<&HashSet<ItemId>> {
        self.likes.get(person)
    }

    /// Whether `person` likes `item`, `None` if the person is not a key
    pub fn likes(&self, person: &str, item: &str) -> Option<bool> {
        self.likes_of(person).map(|set| set.contains(item))
    }

    /// Whether the person is a key of the relation
    pub fn contains(&self, person: &str) -> bool {
        self.likes.contains_key(person)
    }

    /// Number of people with a like-set
    pub fn person_count(&self) -> usize {
        self.likes.len()
    }

    /// All people with a like-set
    pub fn people(&self) -> impl Iterator<Item = &PersonId> {
        self.likes.keys()
    }
}

impl<P, L> FromIterator<(P, L)> for LikeRelation
where
    P: Into<PersonId>,
    L: IntoIterator,
    L::Item: Into<ItemId>,
{
    fn from_iter<T: IntoIterator<Item = (P, L)>>(iter: T) -> Self {
        let likes = iter
            .into_iter()
            .map(|(person, items)| (person.into(), items.into_iter().map(Into::into).collect()))
            .collect();
        Self { likes }
    }
}
