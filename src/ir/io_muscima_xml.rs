//! MUSCIMA++ CropObject XML reader.
//!
//! Each annotation document is a `<CropObjectList>` whose `<CropObject>`
//! entries carry an `<Id>`, a category label (`<ClassName>`, or the legacy
//! `<MLClassName>`), a bounding box given as `<Top>`, `<Left>`, `<Width>`,
//! `<Height>`, and optional whitespace-separated `<Inlinks>`/`<Outlinks>`
//! ID lists. Object masks are ignored.
//!
//! Object IDs are only unique within one document, so every document is
//! read into its own [`ObjectUniverse`].

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;
use walkdir::WalkDir;

use super::model::{AnnotatedObject, ObjectUniverse};
use super::{BBox, ObjectId};
use crate::error::StaffSeqError;

const MUSCIMA_XML_EXTENSION: &str = "xml";

/// One annotation document of a corpus directory.
#[derive(Clone, Debug)]
pub struct MuscimaDocument {
    /// Path of the XML file the document was read from.
    pub path: PathBuf,
    /// All objects of the document.
    pub universe: ObjectUniverse,
}

/// Read a single MUSCIMA++ XML file.
pub fn read_muscima_xml(path: &Path) -> Result<ObjectUniverse, StaffSeqError> {
    let xml = fs::read_to_string(path).map_err(StaffSeqError::Io)?;
    parse_muscima_xml_str(&xml, path)
}

/// Read every `*.xml` document below `path`, in sorted relative-path order.
pub fn read_muscima_dir(path: &Path) -> Result<Vec<MuscimaDocument>, StaffSeqError> {
    if !path.is_dir() {
        return Err(StaffSeqError::MuscimaXmlParse {
            path: path.to_path_buf(),
            message: "input must be a directory".to_string(),
        });
    }

    let mut xml_files = Vec::new();
    for entry in WalkDir::new(path).follow_links(true) {
        let entry = entry.map_err(|source| StaffSeqError::MuscimaXmlParse {
            path: path.to_path_buf(),
            message: format!("failed while traversing corpus directory: {source}"),
        })?;

        if entry.file_type().is_file() && has_xml_extension(entry.path()) {
            xml_files.push(entry.path().to_path_buf());
        }
    }
    xml_files.sort_by_cached_key(|xml_path| rel_string(path, xml_path));

    let mut documents = Vec::with_capacity(xml_files.len());
    for xml_path in xml_files {
        let universe = read_muscima_xml(&xml_path)?;
        log::debug!(
            "read {} object(s) from {}",
            universe.len(),
            xml_path.display()
        );
        documents.push(MuscimaDocument {
            path: xml_path,
            universe,
        });
    }

    Ok(documents)
}

/// Parse MUSCIMA++ XML from a UTF-8 string.
pub fn from_muscima_xml_str(xml: &str) -> Result<ObjectUniverse, StaffSeqError> {
    parse_muscima_xml_str(xml, Path::new("<memory>"))
}

/// Parse MUSCIMA++ XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_muscima_xml_slice(bytes: &[u8]) -> Result<ObjectUniverse, StaffSeqError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| StaffSeqError::MuscimaXmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_muscima_xml_str(xml)
}

/// Parses a page from bytes and encodes every staff on it.
///
/// Staff-level failures are expected on arbitrary input and are discarded;
/// only the parse result is returned.
#[cfg(feature = "fuzzing")]
pub fn fuzz_encode_muscima_xml(bytes: &[u8]) -> Result<(), StaffSeqError> {
    let universe = from_muscima_xml_slice(bytes)?;
    for staff in universe.staves() {
        let _ = crate::encoding::encode_staff(staff, &universe);
    }
    Ok(())
}

fn parse_muscima_xml_str(xml: &str, path: &Path) -> Result<ObjectUniverse, StaffSeqError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| StaffSeqError::MuscimaXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let root = document.root_element();
    if root.tag_name().name() != "CropObjectList" {
        return Err(StaffSeqError::MuscimaXmlParse {
            path: path.to_path_buf(),
            message: "missing <CropObjectList> root element".to_string(),
        });
    }

    let mut objects = Vec::new();
    for node in root
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "CropObject")
    {
        objects.push(parse_crop_object(node, path)?);
    }

    Ok(ObjectUniverse::new(objects))
}

fn parse_crop_object(node: Node<'_, '_>, path: &Path) -> Result<AnnotatedObject, StaffSeqError> {
    let id = parse_required_u64(node, "Id", path, "<CropObject>")?;
    let context = format!("<CropObject> {id}");

    let class_name = optional_child_text(node, "ClassName")
        .or_else(|| optional_child_text(node, "MLClassName"))
        .ok_or_else(|| StaffSeqError::MuscimaXmlParse {
            path: path.to_path_buf(),
            message: format!("missing <ClassName> in {context}"),
        })?;

    let top = parse_required_f64(node, "Top", path, &context)?;
    let left = parse_required_f64(node, "Left", path, &context)?;
    let width = parse_required_f64(node, "Width", path, &context)?;
    let height = parse_required_f64(node, "Height", path, &context)?;

    let mut object = AnnotatedObject::new(
        id,
        class_name,
        BBox::from_top_left_size(top, left, height, width),
    );
    object.uid = optional_child_text(node, "UniqueId");
    object.outlinks = parse_id_list(node, "Outlinks", path, &context)?;
    object.inlinks = parse_id_list(node, "Inlinks", path, &context)?;

    Ok(object)
}

fn parse_id_list(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Vec<ObjectId>, StaffSeqError> {
    let Some(raw) = optional_child_text(node, tag) else {
        return Ok(Vec::new());
    };

    raw.split_whitespace()
        .map(|token| {
            token
                .parse::<u64>()
                .map(ObjectId::new)
                .map_err(|_| StaffSeqError::MuscimaXmlParse {
                    path: path.to_path_buf(),
                    message: format!("invalid ID '{token}' in <{tag}> of {context}"),
                })
        })
        .collect()
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, StaffSeqError> {
    optional_child_text(node, tag).ok_or_else(|| StaffSeqError::MuscimaXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn parse_required_u64(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<u64, StaffSeqError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<u64>().map_err(|_| StaffSeqError::MuscimaXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected u64"),
    })
}

fn parse_required_f64(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<f64, StaffSeqError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<f64>().map_err(|_| StaffSeqError::MuscimaXmlParse {
        path: path.to_path_buf(),
        message: format!(
            "invalid <{tag}> value '{raw}' in {context}; expected floating-point number"
        ),
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(MUSCIMA_XML_EXTENSION))
        .unwrap_or(false)
}

fn rel_string(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<CropObjectList xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <CropObjects>
    <CropObject xml:id="doc___0">
      <Id>0</Id>
      <UniqueId>MUSCIMA-pp_1.0___doc___0</UniqueId>
      <ClassName>staff</ClassName>
      <Top>100</Top>
      <Left>20</Left>
      <Width>800</Width>
      <Height>40</Height>
      <Mask>0:10 1:20</Mask>
      <Inlinks>1</Inlinks>
    </CropObject>
    <CropObject xml:id="doc___1">
      <Id>1</Id>
      <MLClassName>g-clef</MLClassName>
      <Top>80</Top>
      <Left>30</Left>
      <Width>25</Width>
      <Height>80</Height>
      <Outlinks>0</Outlinks>
    </CropObject>
  </CropObjects>
</CropObjectList>"#;

    #[cfg(feature = "fuzzing")]
    #[test]
    fn fuzz_entry_encodes_pages_and_rejects_bad_bytes() {
        assert!(fuzz_encode_muscima_xml(SAMPLE.as_bytes()).is_ok());
        assert!(fuzz_encode_muscima_xml(b"\xff\xfe<CropObjectList>").is_err());
    }

    #[test]
    fn parse_reads_boxes_labels_and_links() {
        let universe = from_muscima_xml_str(SAMPLE).expect("parse xml");
        assert_eq!(universe.len(), 2);

        let staff = universe.get(ObjectId(0)).expect("staff");
        assert_eq!(staff.class_name, "staff");
        assert_eq!(staff.uid.as_deref(), Some("MUSCIMA-pp_1.0___doc___0"));
        assert_eq!(staff.bbox, BBox::from_ltrb(20.0, 100.0, 820.0, 140.0));
        assert_eq!(staff.inlinks, vec![ObjectId(1)]);
        assert!(staff.outlinks.is_empty());

        let clef = universe.get(ObjectId(1)).expect("clef");
        assert_eq!(clef.class_name, "g-clef");
        assert_eq!(clef.outlinks, vec![ObjectId(0)]);
    }

    #[test]
    fn parse_rejects_wrong_root() {
        let err = from_muscima_xml_str("<annotation/>").unwrap_err();
        assert!(err.to_string().contains("CropObjectList"));
    }

    #[test]
    fn parse_rejects_bad_link_id() {
        let xml = r#"<CropObjectList><CropObjects><CropObject>
            <Id>3</Id><ClassName>flat</ClassName>
            <Top>0</Top><Left>0</Left><Width>1</Width><Height>1</Height>
            <Outlinks>4 x</Outlinks>
        </CropObject></CropObjects></CropObjectList>"#;
        let err = from_muscima_xml_str(xml).unwrap_err();
        assert!(err.to_string().contains("invalid ID 'x'"));
    }

    #[test]
    fn slice_rejects_invalid_utf8() {
        let err = from_muscima_xml_slice(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }
}
