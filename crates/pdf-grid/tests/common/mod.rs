#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Build an in-memory PDF with one page per `(width, height)` entry
pub fn create_test_pdf_with_sizes(sizes: &[(i64, i64)]) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for &(width, height) in sizes {
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            b"q 0 0 1 rg 0 0 10 10 re f Q".to_vec(),
        ));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(sizes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

/// US Letter pages
pub fn create_test_pdf(num_pages: usize) -> Document {
    create_test_pdf_with_sizes(&vec![(612, 792); num_pages])
}

pub fn write_test_pdf(doc: &mut Document, path: &std::path::Path) {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// (width, height) from a page's MediaBox
pub fn media_box_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let dict = doc.get_dictionary(page_id).unwrap();
    let mb = dict.get(b"MediaBox").unwrap().as_array().unwrap();
    let number = |obj: &Object| match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("unexpected MediaBox entry {:?}", other),
    };
    (number(&mb[2]), number(&mb[3]))
}

/// Raw (uncompressed) content stream of an output page
pub fn page_content(doc: &Document, page_id: ObjectId) -> String {
    let dict = doc.get_dictionary(page_id).unwrap();
    let content_id = dict.get(b"Contents").unwrap().as_reference().unwrap();
    let stream = doc.get_object(content_id).unwrap().as_stream().unwrap();
    let bytes = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    String::from_utf8(bytes).unwrap()
}
