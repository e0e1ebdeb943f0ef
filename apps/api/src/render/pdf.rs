//! PDF writer — serializes paginated lines with lopdf.
//!
//! Uses the standard Helvetica fonts with WinAnsiEncoding, so no font program
//! is embedded and every line is a plain `Tj` string in the content stream.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::layout::font_metrics::Font;
use crate::layout::paginator::{Page, PageSpec};

const PDF_VERSION: &str = "1.5";
const FONTS: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

/// Builds an in-memory PDF document, one PDF page per layout page.
pub fn build_document(pages: &[Page], spec: &PageSpec) -> Result<Document, lopdf::Error> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let mut font_dict = lopdf::Dictionary::new();
    for font in FONTS {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        font_dict.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_dict,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let page_id = add_page(&mut doc, page, pages_id)?;
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), spec.width_pt.into(), spec.height_pt.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

fn add_page(doc: &mut Document, page: &Page, parent: ObjectId) -> Result<ObjectId, lopdf::Error> {
    let mut operations = Vec::new();
    for line in page.lines.iter().filter(|l| !l.text.is_empty()) {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                line.style.font.resource_name().into(),
                line.style.size_pt.into(),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![line.x_pt.into(), line.baseline_pt.into()],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&line.text))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "Contents" => content_id,
    }))
}

/// Maps text to WinAnsiEncoding bytes. Characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
