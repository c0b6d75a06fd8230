#![allow(dead_code)]

use staffseq::ir::{connect, AnnotatedObject, BBox, ObjectId, ObjectUniverse};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Tolerance for staff-frame coordinates compared across float reorderings.
pub const EPS_STAFF: f64 = 1e-9;

/// ID of the staff in every generated page.
pub const STAFF_ID: ObjectId = ObjectId(0);

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Labels attached directly to a staff. Every one of them either maps to a
/// grapheme or is skipped, so generated staves always encode.
const ATTACHED_CLASSES: &[&str] = &[
    "notehead-full",
    "notehead-empty",
    "grace-notehead-full",
    "grace-notehead-empty",
    "whole_rest",
    "half_rest",
    "quarter_rest",
    "8th_rest",
    "16th_rest",
    "32th_rest",
    "g-clef",
    "f-clef",
    "c-clef",
    "key_signature",
    "thin_barline",
    "thick_barline",
    "measure_separator",
    "time_signature",
];

const NOTEHEAD_CHILD_CLASSES: &[&str] =
    &["sharp", "flat", "natural", "ledger_line", "stem", "duration-dot"];

const KEY_SIGNATURE_CHILD_CLASSES: &[&str] = &["sharp", "flat", "natural"];

/// (class seed, left, top offset, width, height, children)
type ObjectSeed = (usize, u32, u32, u32, u32, Vec<ChildSeed>);
/// (class seed, left offset, top offset, width, height)
type ChildSeed = (usize, u32, u32, u32, u32);

fn child_seed_strategy() -> impl Strategy<Value = ChildSeed> {
    (any::<usize>(), 0u32..60, 0u32..200, 1u32..40, 1u32..60)
}

fn object_seed_strategy(staff_width: u32) -> impl Strategy<Value = ObjectSeed> {
    (
        any::<usize>(),
        0u32..staff_width,
        0u32..200,
        1u32..60,
        1u32..120,
        proptest::collection::vec(child_seed_strategy(), 0..=3),
    )
}

/// A single staff with up to `max_objects` attached objects, composites
/// included. Coordinates are integral pixels.
pub fn arb_staff_page(max_objects: usize) -> BoxedStrategy<ObjectUniverse> {
    (0u32..200, 0u32..2000, 500u32..3000, 20u32..200)
        .prop_flat_map(move |(left, top, width, height)| {
            proptest::collection::vec(object_seed_strategy(width), 0..=max_objects)
                .prop_map(move |seeds| build_page(left, top, width, height, seeds))
        })
        .boxed()
}

/// A page with at least one attached object.
pub fn arb_nonempty_staff_page(max_objects: usize) -> BoxedStrategy<ObjectUniverse> {
    assert!(max_objects > 0, "max_objects must be > 0");
    arb_staff_page(max_objects)
        .prop_filter("staff needs an attached object", |universe| {
            universe.len() > 1
        })
        .boxed()
}

fn build_page(left: u32, top: u32, width: u32, height: u32, seeds: Vec<ObjectSeed>) -> ObjectUniverse {
    let staff_top = top as f64 + 100.0;
    let mut objects = vec![AnnotatedObject::new(
        STAFF_ID,
        "staff",
        BBox::from_ltrb(
            left as f64,
            staff_top,
            (left + width) as f64,
            staff_top + height as f64,
        ),
    )];
    let mut links = Vec::new();
    let mut next_id = 1u64;

    for (class_seed, x, dy, w, h, children) in seeds {
        let class_name = ATTACHED_CLASSES[class_seed % ATTACHED_CLASSES.len()];
        let object_left = (left + x) as f64;
        let object_top = top as f64 + dy as f64;
        let parent = ObjectId(next_id);
        next_id += 1;
        objects.push(AnnotatedObject::new(
            parent,
            class_name,
            BBox::from_ltrb(object_left, object_top, object_left + w as f64, object_top + h as f64),
        ));
        links.push((parent, STAFF_ID));

        let child_classes = match class_name {
            "key_signature" => KEY_SIGNATURE_CHILD_CLASSES,
            name if name.contains("notehead") => NOTEHEAD_CHILD_CLASSES,
            _ => continue,
        };
        for (child_seed, cx, cdy, cw, ch) in children {
            let child = ObjectId(next_id);
            next_id += 1;
            let child_left = object_left + cx as f64 - 30.0;
            let child_top = top as f64 + cdy as f64;
            objects.push(AnnotatedObject::new(
                child,
                child_classes[child_seed % child_classes.len()],
                BBox::from_ltrb(child_left, child_top, child_left + cw as f64, child_top + ch as f64),
            ));
            links.push((parent, child));
        }
    }

    for (from, to) in links {
        connect(&mut objects, from, to);
    }
    ObjectUniverse::new(objects)
}

/// The same page with every box (the staff's included) scaled by `k`.
pub fn scale_page(universe: &ObjectUniverse, k: f64) -> ObjectUniverse {
    universe
        .iter()
        .map(|object| {
            let mut scaled = object.clone();
            scaled.bbox = object.bbox.scaled(k);
            scaled
        })
        .collect()
}

pub fn staff_of(universe: &ObjectUniverse) -> &AnnotatedObject {
    universe.get(STAFF_ID).expect("generated page has a staff")
}
