//! XObject creation for grid composition
//!
//! This module handles creating Form XObjects from source PDF pages,
//! which are then placed onto output pages with transformations.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::SourcePageRef;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

// =============================================================================
// Page Geometry
// =============================================================================

/// Visible box of a source page in its own user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    /// Lower-left x
    pub llx: f32,
    /// Lower-left y
    pub lly: f32,
    /// Unrotated width
    pub width: f32,
    /// Unrotated height
    pub height: f32,
    /// Clockwise display rotation: 0, 90, 180 or 270
    pub rotation: i64,
}

impl Default for PageBox {
    fn default() -> Self {
        Self {
            llx: 0.0,
            lly: 0.0,
            width: DEFAULT_PAGE_DIMENSIONS.0,
            height: DEFAULT_PAGE_DIMENSIONS.1,
            rotation: 0,
        }
    }
}

impl PageBox {
    /// Width and height as the page is displayed, after rotation
    pub fn visible_size(&self) -> (f32, f32) {
        if self.rotation % 180 == 0 {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        }
    }

    fn bbox(&self) -> Vec<Object> {
        vec![
            Object::Real(self.llx),
            Object::Real(self.lly),
            Object::Real(self.llx + self.width),
            Object::Real(self.lly + self.height),
        ]
    }
}

/// A page of the source document, ready for layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcePage {
    pub id: ObjectId,
    pub page_box: PageBox,
}

impl SourcePage {
    /// Layout view of this page
    pub fn page_ref(&self, index: usize) -> SourcePageRef {
        let (width, height) = self.page_box.visible_size();
        SourcePageRef::new(index, width, height)
    }
}

/// Collect every page of `doc` in document order
pub fn collect_source_pages(doc: &Document) -> Result<Vec<SourcePage>> {
    doc.get_pages()
        .into_values()
        .map(|id| -> Result<SourcePage> {
            Ok(SourcePage {
                id,
                page_box: get_page_box(doc, id)?,
            })
        })
        .collect()
}

/// Get the visible box of a page.
///
/// CropBox wins over MediaBox; both, as well as Rotate, may be inherited
/// from ancestors in the page tree. Pages without a usable box get
/// US Letter.
pub fn get_page_box(doc: &Document, page_id: ObjectId) -> Result<PageBox> {
    doc.get_dictionary(page_id)?;

    let rect = inherited_attribute(doc, page_id, b"CropBox")
        .and_then(|obj| parse_rect(doc, obj))
        .or_else(|| {
            inherited_attribute(doc, page_id, b"MediaBox").and_then(|obj| parse_rect(doc, obj))
        });

    let rotation = inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|obj| resolve(doc, obj).as_i64().ok())
        .map(|r| r.rem_euclid(360) / 90 * 90)
        .unwrap_or(0);

    Ok(match rect {
        Some((llx, lly, width, height)) => PageBox {
            llx,
            lly,
            width,
            height,
            rotation,
        },
        None => PageBox {
            rotation,
            ..PageBox::default()
        },
    })
}

/// Look up a page attribute, walking the `/Parent` chain
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    // Bounded walk guards against cyclic page trees
    for _ in 0..64 {
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
        let parent = current.get(b"Parent").and_then(Object::as_reference).ok()?;
        current = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Parse a rectangle array into (llx, lly, width, height), normalising corners
fn parse_rect(doc: &Document, obj: &Object) -> Option<(f32, f32, f32, f32)> {
    let arr = resolve(doc, obj).as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let values: Vec<f32> = arr
        .iter()
        .map(|item| extract_number(resolve(doc, item)))
        .collect::<Option<_>>()?;

    let (llx, urx) = (values[0].min(values[2]), values[0].max(values[2]));
    let (lly, ury) = (values[1].min(values[3]), values[1].max(values[3]));
    let (width, height) = (urx - llx, ury - lly);
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some((llx, lly, width, height))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Create a Form XObject from a source page.
///
/// The form's BBox is the page's visible box, so content outside a crop
/// box is clipped. Resources are deep copied through `cache`, which should
/// live for the whole output document so shared fonts and images are
/// copied once.
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page: &SourcePage,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page.id)?;
    let content_data = get_page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", Object::Array(page.page_box.bbox()));
    xobject_dict.set("FormType", Object::Integer(1));

    if let Some(resources) = inherited_attribute(source, page.id, b"Resources") {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    Ok(output.add_object(Stream::new(xobject_dict, content_data)))
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the decoded content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(id) => match doc.get_object(*id)? {
            Object::Array(arr) => get_concatenated_content_streams(doc, arr),
            Object::Stream(stream) => Ok(decoded_content(stream)),
            _ => Ok(Vec::new()),
        },
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            if let Ok(stream) = doc.get_object(*id)?.as_stream() {
                result.extend_from_slice(&decoded_content(stream));
                result.push(b'\n');
            }
        }
    }

    Ok(result)
}

fn decoded_content(stream: &Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// The output id is reserved before recursing, so reference cycles in the
/// source resolve to the same copied object.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_page_doc(
        page_entries: Vec<(&str, Object)>,
        tree_entries: Vec<(&str, Object)>,
    ) -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
        ]);
        for (key, value) in page_entries {
            page.set(key, value);
        }
        let page_id = doc.add_object(page);

        let mut pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
        ]);
        for (key, value) in tree_entries {
            pages.set(key, value);
        }
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", catalog_id);

        (doc, page_id)
    }

    fn rect(values: [i64; 4]) -> Object {
        Object::Array(values.iter().map(|&v| Object::Integer(v)).collect())
    }

    #[test]
    fn test_media_box_on_page() {
        let (doc, page_id) = single_page_doc(vec![("MediaBox", rect([0, 0, 595, 842]))], vec![]);
        let page_box = get_page_box(&doc, page_id).unwrap();

        assert_eq!(page_box.width, 595.0);
        assert_eq!(page_box.height, 842.0);
        assert_eq!(page_box.rotation, 0);
    }

    #[test]
    fn test_inherited_media_box_and_rotation() {
        let (doc, page_id) = single_page_doc(
            vec![],
            vec![("MediaBox", rect([0, 0, 612, 792])), ("Rotate", Object::Integer(90))],
        );
        let page_box = get_page_box(&doc, page_id).unwrap();

        assert_eq!((page_box.width, page_box.height), (612.0, 792.0));
        assert_eq!(page_box.rotation, 90);
        assert_eq!(page_box.visible_size(), (792.0, 612.0));
    }

    #[test]
    fn test_crop_box_preferred_and_normalised() {
        let (doc, page_id) = single_page_doc(
            vec![
                ("MediaBox", rect([0, 0, 612, 792])),
                ("CropBox", rect([512, 692, 100, 92])),
                ("Rotate", Object::Integer(-90)),
            ],
            vec![],
        );
        let page_box = get_page_box(&doc, page_id).unwrap();

        assert_eq!((page_box.llx, page_box.lly), (100.0, 92.0));
        assert_eq!((page_box.width, page_box.height), (412.0, 600.0));
        assert_eq!(page_box.rotation, 270);
    }

    #[test]
    fn test_missing_box_defaults_to_letter() {
        let (doc, page_id) = single_page_doc(vec![], vec![]);
        let page_box = get_page_box(&doc, page_id).unwrap();

        assert_eq!((page_box.width, page_box.height), DEFAULT_PAGE_DIMENSIONS);
    }

    #[test]
    fn test_deep_copy_handles_cycles() {
        let mut source = Document::with_version("1.7");
        let a_id = source.new_object_id();
        let b_id = source.add_object(Dictionary::from_iter(vec![(
            "Next",
            Object::Reference(a_id),
        )]));
        source.objects.insert(
            a_id,
            Object::Dictionary(Dictionary::from_iter(vec![(
                "Next",
                Object::Reference(b_id),
            )])),
        );

        let mut output = Document::with_version("1.7");
        let mut cache = HashMap::new();
        let copied =
            copy_object_deep(&mut output, &source, &Object::Reference(a_id), &mut cache).unwrap();

        assert!(matches!(copied, Object::Reference(_)));
        assert_eq!(cache.len(), 2);
        assert_eq!(output.objects.len(), 2);
    }
}
