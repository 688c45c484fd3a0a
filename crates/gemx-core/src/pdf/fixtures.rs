//! Small PDFs built in memory for tests.

use lopdf::content::{Content, Operation};
use lopdf::encryption::{decrypt_object, get_encryption_key};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// One page of Courier text, one `lines` entry per text line.
pub fn text_pdf(lines: &[&str]) -> Vec<u8> {
    let (mut doc, _) = build_text_document(lines);
    save(&mut doc)
}

/// A document whose page tree has no pages.
pub fn empty_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    save(&mut doc)
}

/// Like [`text_pdf`], RC4-encrypted under an empty user password.
///
/// The encryption dictionary omits `/U`, so lopdf derives the key without
/// verifying the password.
pub fn encrypted_text_pdf(lines: &[&str]) -> Vec<u8> {
    let (mut doc, content_id) = build_text_document(lines);

    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 4,
        "R" => 4,
        "Length" => 128,
        "O" => Object::string_literal(vec![0x42u8; 32]),
        "P" => -4,
        "CF" => dictionary! {
            "StdCF" => dictionary! {
                "CFM" => "V2",
                "Length" => 16,
            },
        },
        "StmF" => "StdCF",
        "StrF" => "StdCF",
    });
    doc.trailer.set("Encrypt", encrypt_id);
    doc.trailer.set(
        "ID",
        vec![
            Object::string_literal("gemx-fixture-id-0"),
            Object::string_literal("gemx-fixture-id-0"),
        ],
    );

    // RC4 is symmetric: "decrypting" plain content encrypts it.
    let key = get_encryption_key(&doc, "", false).unwrap();
    let encrypted = decrypt_object(&key, content_id, doc.get_object(content_id).unwrap(), false).unwrap();
    doc.get_object_mut(content_id)
        .and_then(Object::as_stream_mut)
        .unwrap()
        .set_content(encrypted);

    save(&mut doc)
}

fn build_text_document(lines: &[&str]) -> (Document, ObjectId) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-24).into()]));
        }
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    (doc, content_id)
}

fn save(doc: &mut Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
