//! Intermediate Representation (IR) of the notation graph.
//!
//! This module defines the annotated objects produced by an optical music
//! recognition corpus and the universe that resolves the links between them.
//! Readers convert corpus files into this representation; everything
//! downstream (linearization, encoding, validation) only sees the IR.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Space markers keep page pixels and staff-relative
//!    units apart at compile time.
//!
//! 2. **Index-based links**: objects store neighbour IDs, and resolution is
//!    a lookup against an explicitly passed [`ObjectUniverse`].
//!
//! 3. **Permissive Construction**: malformed boxes and dangling links can be
//!    represented, so that validation can report them rather than the reader
//!    rejecting the document.
//!
//! # Example
//!
//! ```
//! use staffseq::ir::{AnnotatedObject, BBox, ObjectId, ObjectUniverse};
//!
//! let universe = ObjectUniverse::new(vec![
//!     AnnotatedObject::new(1u64, "staff", BBox::from_ltrb(0.0, 100.0, 500.0, 140.0))
//!         .with_inlinks([2]),
//!     AnnotatedObject::new(2u64, "g-clef", BBox::from_ltrb(5.0, 90.0, 30.0, 150.0))
//!         .with_outlinks([1]),
//! ]);
//!
//! let staff = universe.get(ObjectId(1)).unwrap();
//! assert_eq!(universe.inlink_objects(staff).unwrap()[0].class_name, "g-clef");
//! ```

mod bbox;
mod ids;
pub mod io_json;
pub mod io_muscima_xml;
mod model;
mod space;
mod vector;

// Re-export core types for convenient access
pub use bbox::BBox;
pub use ids::ObjectId;
pub use model::{connect, AnnotatedObject, LinkDirection, ObjectUniverse, STAFF_CLASS};
pub use space::{Pixel, Staff};
pub use vector::Vector2;
