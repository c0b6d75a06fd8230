//! Annotated objects and the universe that resolves their links.
//!
//! An [`AnnotatedObject`] is one node of the notation graph: a category
//! label, a pixel bounding box and typed directed links. Outgoing links mean
//! "this object is composed of / owns these"; incoming links mean "these
//! objects belong to this one". Links are stored as [`ObjectId`]s and only
//! become objects when resolved against an [`ObjectUniverse`].

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::bbox::BBox;
use super::ids::ObjectId;
use crate::error::StaffSeqError;

/// Category label of staff objects.
pub const STAFF_CLASS: &str = "staff";

/// One annotated object of the notation graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedObject {
    /// Identifier, unique within one document.
    pub id: ObjectId,

    /// Optional corpus-wide unique identifier string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Category label (e.g. "notehead-full", "g-clef", "staff").
    pub class_name: String,

    /// Bounding box in page pixels.
    pub bbox: BBox,

    /// Objects this one is composed of.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outlinks: Vec<ObjectId>,

    /// Objects that belong to this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inlinks: Vec<ObjectId>,
}

impl AnnotatedObject {
    /// Creates a new object without links.
    pub fn new(id: impl Into<ObjectId>, class_name: impl Into<String>, bbox: BBox) -> Self {
        Self {
            id: id.into(),
            uid: None,
            class_name: class_name.into(),
            bbox,
            outlinks: Vec::new(),
            inlinks: Vec::new(),
        }
    }

    /// Sets the corpus-wide unique identifier.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Sets the outgoing links.
    pub fn with_outlinks(mut self, outlinks: impl IntoIterator<Item = u64>) -> Self {
        self.outlinks = outlinks.into_iter().map(ObjectId::new).collect();
        self
    }

    /// Sets the incoming links.
    pub fn with_inlinks(mut self, inlinks: impl IntoIterator<Item = u64>) -> Self {
        self.inlinks = inlinks.into_iter().map(ObjectId::new).collect();
        self
    }

    /// Returns true if this object is a staff.
    pub fn is_staff(&self) -> bool {
        self.class_name == STAFF_CLASS
    }
}

/// Direction of a link between two objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkDirection {
    Outgoing,
    Incoming,
}

impl fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkDirection::Outgoing => write!(f, "outgoing"),
            LinkDirection::Incoming => write!(f, "incoming"),
        }
    }
}

/// The full collection of objects of one document, indexed by ID.
///
/// The universe is immutable once built; every link resolution takes it as
/// an explicit argument so it can be swapped or mocked per call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<AnnotatedObject>", into = "Vec<AnnotatedObject>")]
pub struct ObjectUniverse {
    objects: Vec<AnnotatedObject>,
    index: HashMap<ObjectId, usize>,
}

impl ObjectUniverse {
    /// Builds a universe from a list of objects.
    ///
    /// When an ID occurs more than once, the first occurrence is the one
    /// links resolve to.
    pub fn new(objects: Vec<AnnotatedObject>) -> Self {
        let mut index = HashMap::with_capacity(objects.len());
        for (position, object) in objects.iter().enumerate() {
            index.entry(object.id).or_insert(position);
        }
        Self { objects, index }
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates all objects in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, AnnotatedObject> {
        self.objects.iter()
    }

    /// All objects as a slice, in document order.
    pub fn objects(&self) -> &[AnnotatedObject] {
        &self.objects
    }

    /// Looks up an object by ID.
    pub fn get(&self, id: ObjectId) -> Option<&AnnotatedObject> {
        self.index.get(&id).map(|&position| &self.objects[position])
    }

    /// Returns the document-order position of an object.
    pub fn position(&self, id: ObjectId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Iterates the staff objects in document order.
    pub fn staves(&self) -> impl Iterator<Item = &AnnotatedObject> {
        self.objects.iter().filter(|object| object.is_staff())
    }

    /// Resolves the outgoing links of `object`.
    ///
    /// A repeated ID resolves once, at its first position.
    ///
    /// # Errors
    /// Returns [`StaffSeqError::UnresolvableLink`] if any link points to an
    /// object absent from this universe.
    pub fn outlink_objects<'u>(
        &'u self,
        object: &AnnotatedObject,
    ) -> Result<Vec<&'u AnnotatedObject>, StaffSeqError> {
        self.resolve_links(object.id, &object.outlinks, LinkDirection::Outgoing)
    }

    /// Resolves the incoming links of `object`.
    ///
    /// A repeated ID resolves once, at its first position.
    ///
    /// # Errors
    /// Returns [`StaffSeqError::UnresolvableLink`] if any link points to an
    /// object absent from this universe.
    pub fn inlink_objects<'u>(
        &'u self,
        object: &AnnotatedObject,
    ) -> Result<Vec<&'u AnnotatedObject>, StaffSeqError> {
        self.resolve_links(object.id, &object.inlinks, LinkDirection::Incoming)
    }

    fn resolve_links(
        &self,
        from: ObjectId,
        links: &[ObjectId],
        direction: LinkDirection,
    ) -> Result<Vec<&AnnotatedObject>, StaffSeqError> {
        let mut seen = HashSet::with_capacity(links.len());
        links
            .iter()
            .filter(|&&to| seen.insert(to))
            .map(|&to| {
                self.get(to).ok_or(StaffSeqError::UnresolvableLink {
                    from,
                    to,
                    direction,
                })
            })
            .collect()
    }
}

impl From<Vec<AnnotatedObject>> for ObjectUniverse {
    fn from(objects: Vec<AnnotatedObject>) -> Self {
        ObjectUniverse::new(objects)
    }
}

impl From<ObjectUniverse> for Vec<AnnotatedObject> {
    fn from(universe: ObjectUniverse) -> Self {
        universe.objects
    }
}

impl FromIterator<AnnotatedObject> for ObjectUniverse {
    fn from_iter<I: IntoIterator<Item = AnnotatedObject>>(iter: I) -> Self {
        ObjectUniverse::new(iter.into_iter().collect())
    }
}

impl PartialEq for ObjectUniverse {
    fn eq(&self, other: &Self) -> bool {
        self.objects == other.objects
    }
}

/// Adds a symmetric link `from -> to` to a list of objects under construction.
///
/// Appends `to` to the outlinks of `from` and `from` to the inlinks of `to`.
/// Unknown IDs are ignored.
pub fn connect(objects: &mut [AnnotatedObject], from: ObjectId, to: ObjectId) {
    for object in objects.iter_mut() {
        if object.id == from && !object.outlinks.contains(&to) {
            object.outlinks.push(to);
        }
        if object.id == to && !object.inlinks.contains(&from) {
            object.inlinks.push(from);
        }
    }
}
