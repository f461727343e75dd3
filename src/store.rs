//! Entity cache.
//!
//! Holds the last fetched snapshot of each domain. A snapshot is replaced
//! as a whole: the new collection and its id index are built off to the
//! side and swapped in with one assignment, so a render never sees a
//! collection that is half old and half new.
//!
//! The store never triggers rendering; it is only a cache.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::models::{Classroom, Course, EntityId, EntityKind, ScheduleEntry, Teacher};

/// A remotely listed collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Teachers,
    Classrooms,
    Courses,
    Schedule,
}

impl Domain {
    /// All domains, in initial-load order.
    pub const ALL: [Domain; 4] = [
        Domain::Teachers,
        Domain::Classrooms,
        Domain::Courses,
        Domain::Schedule,
    ];

    /// Path segment / display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Teachers => "teachers",
            Domain::Classrooms => "classrooms",
            Domain::Courses => "courses",
            Domain::Schedule => "schedule",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A whole collection for one domain, as handed to [`EntityStore::replace`].
#[derive(Debug, Clone, PartialEq)]
pub enum Records {
    Teachers(Vec<Teacher>),
    Classrooms(Vec<Classroom>),
    Courses(Vec<Course>),
    Schedule(Vec<ScheduleEntry>),
}

impl Records {
    /// Empty collection for a domain.
    pub fn empty(domain: Domain) -> Self {
        match domain {
            Domain::Teachers => Records::Teachers(Vec::new()),
            Domain::Classrooms => Records::Classrooms(Vec::new()),
            Domain::Courses => Records::Courses(Vec::new()),
            Domain::Schedule => Records::Schedule(Vec::new()),
        }
    }

    /// The domain these records belong to.
    pub fn domain(&self) -> Domain {
        match self {
            Records::Teachers(_) => Domain::Teachers,
            Records::Classrooms(_) => Domain::Classrooms,
            Records::Courses(_) => Domain::Courses,
            Records::Schedule(_) => Domain::Schedule,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            Records::Teachers(v) => v.len(),
            Records::Classrooms(v) => v.len(),
            Records::Courses(v) => v.len(),
            Records::Schedule(v) => v.len(),
        }
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A borrowed reference entity returned by [`EntityStore::lookup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRef<'a> {
    Teacher(&'a Teacher),
    Classroom(&'a Classroom),
    Course(&'a Course),
}

impl EntityRef<'_> {
    /// Display name of the entity.
    pub fn name(&self) -> &str {
        match self {
            EntityRef::Teacher(t) => &t.name,
            EntityRef::Classroom(c) => &c.name,
            EntityRef::Course(c) => &c.name,
        }
    }
}

/// Records with an integer id.
pub trait Keyed {
    fn key(&self) -> EntityId;
}

macro_rules! keyed {
    ($($ty:ty),*) => {
        $(impl Keyed for $ty {
            fn key(&self) -> EntityId {
                self.id
            }
        })*
    };
}

keyed!(Teacher, Classroom, Course, ScheduleEntry);

/// One snapshot: records in fetch order plus an id index.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    index: HashMap<EntityId, usize>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> Collection<T> {
    /// Builds a snapshot. On duplicate ids the first record wins.
    fn build(items: Vec<T>) -> Self {
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            index.entry(item.key()).or_insert(i);
        }
        Self { items, index }
    }

    /// Record by id.
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    /// Records in fetch order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Number of records (duplicates included).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Snapshot cache of every domain.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    teachers: Collection<Teacher>,
    classrooms: Collection<Classroom>,
    courses: Collection<Course>,
    entries: Collection<ScheduleEntry>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces one domain's collection wholesale.
    pub fn replace(&mut self, records: Records) {
        match records {
            Records::Teachers(v) => self.teachers = Collection::build(v),
            Records::Classrooms(v) => self.classrooms = Collection::build(v),
            Records::Courses(v) => self.courses = Collection::build(v),
            Records::Schedule(v) => self.entries = Collection::build(v),
        }
    }

    /// Looks up a reference entity by kind and id.
    pub fn lookup(&self, kind: EntityKind, id: EntityId) -> Option<EntityRef<'_>> {
        match kind {
            EntityKind::Teacher => self.teacher(id).map(EntityRef::Teacher),
            EntityKind::Classroom => self.classroom(id).map(EntityRef::Classroom),
            EntityKind::Course => self.course(id).map(EntityRef::Course),
        }
    }

    pub fn teacher(&self, id: EntityId) -> Option<&Teacher> {
        self.teachers.get(id)
    }

    pub fn classroom(&self, id: EntityId) -> Option<&Classroom> {
        self.classrooms.get(id)
    }

    pub fn course(&self, id: EntityId) -> Option<&Course> {
        self.courses.get(id)
    }

    pub fn entry(&self, id: EntityId) -> Option<&ScheduleEntry> {
        self.entries.get(id)
    }

    pub fn teachers(&self) -> &[Teacher] {
        self.teachers.as_slice()
    }

    pub fn classrooms(&self) -> &[Classroom] {
        self.classrooms.as_slice()
    }

    pub fn courses(&self) -> &[Course] {
        self.courses.as_slice()
    }

    /// Schedule entries in fetch order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        self.entries.as_slice()
    }

    /// Record count of one domain.
    pub fn count(&self, domain: Domain) -> usize {
        match domain {
            Domain::Teachers => self.teachers.len(),
            Domain::Classrooms => self.classrooms.len(),
            Domain::Courses => self.courses.len(),
            Domain::Schedule => self.entries.len(),
        }
    }
}
