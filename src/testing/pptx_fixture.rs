//! A small but structurally complete `.potx` package for tests.
//!
//! Only `std` and `zip` are used so integration tests can include this file by path.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PML_CT: &str = "application/vnd.openxmlformats-officedocument.presentationml";

/// Layouts in master order: `(name, [(type, idx, shape name)])`.
const LAYOUTS: &[(&str, &[(Option<&str>, Option<u32>, &str)])] = &[
    ("Title Slide", &[(Some("ctrTitle"), None, "Title 1"), (Some("subTitle"), Some(1), "Subtitle 2")]),
    (
        "10_Title and Content",
        &[
            (Some("title"), None, "Title 1"),
            (None, Some(1), "Content Placeholder 2"),
            (Some("dt"), Some(10), "Date Placeholder 3"),
        ],
    ),
    ("Blank", &[]),
];

pub fn minimal_template() -> Vec<u8> {
    let mut parts: Vec<(String, String)> = vec![
        ("[Content_Types].xml".to_string(), content_types()),
        ("_rels/.rels".to_string(), rels(&[("rId1", "officeDocument", "ppt/presentation.xml")])),
        ("ppt/presentation.xml".to_string(), presentation()),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            rels(&[
                ("rId1", "slideMaster", "slideMasters/slideMaster1.xml"),
                ("rId2", "slide", "slides/slide1.xml"),
                ("rId3", "notesMaster", "notesMasters/notesMaster1.xml"),
            ]),
        ),
        ("ppt/slideMasters/slideMaster1.xml".to_string(), slide_master()),
        ("ppt/notesMasters/notesMaster1.xml".to_string(), notes_master()),
        ("ppt/slides/slide1.xml".to_string(), slide(&[(Some("ctrTitle"), None, "Template title")])),
        (
            "ppt/slides/_rels/slide1.xml.rels".to_string(),
            rels(&[("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml")]),
        ),
    ];

    let master_targets: Vec<(String, String)> = (1..=LAYOUTS.len())
        .map(|n| (format!("rId{n}"), format!("../slideLayouts/slideLayout{n}.xml")))
        .collect();
    let master_rels: Vec<(&str, &str, &str)> = master_targets
        .iter()
        .map(|(id, target)| (id.as_str(), "slideLayout", target.as_str()))
        .collect();
    parts.push(("ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(), rels(&master_rels)));

    for (n, (name, placeholders)) in LAYOUTS.iter().enumerate() {
        parts.push((format!("ppt/slideLayouts/slideLayout{}.xml", n + 1), layout(name, placeholders)));
        parts.push((
            format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", n + 1),
            rels(&[("rId1", "slideMaster", "../slideMasters/slideMaster1.xml")]),
        ));
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, xml) in parts {
        writer.start_file(name, options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn content_types() -> String {
    let mut overrides = vec![
        ("/ppt/presentation.xml".to_string(), format!("{PML_CT}.template.main+xml")),
        ("/ppt/slideMasters/slideMaster1.xml".to_string(), format!("{PML_CT}.slideMaster+xml")),
        ("/ppt/notesMasters/notesMaster1.xml".to_string(), format!("{PML_CT}.notesMaster+xml")),
        ("/ppt/slides/slide1.xml".to_string(), format!("{PML_CT}.slide+xml")),
    ];
    for n in 1..=LAYOUTS.len() {
        overrides.push((format!("/ppt/slideLayouts/slideLayout{n}.xml"), format!("{PML_CT}.slideLayout+xml")));
    }

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>"#,
    );
    for (part, content_type) in overrides {
        xml.push_str(&format!(r#"<Override PartName="{part}" ContentType="{content_type}"/>"#));
    }
    xml.push_str("</Types>");
    xml
}

fn rels(entries: &[(&str, &str, &str)]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{REL_NS}">"#
    );
    for (id, kind, target) in entries {
        xml.push_str(&format!(
            r#"<Relationship Id="{id}" Type="{OFFICE_REL}/{kind}" Target="{target}"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn presentation() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation {NS} saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:notesMasterIdLst><p:notesMasterId r:id="rId3"/></p:notesMasterIdLst><p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst><p:sldSz cx="12192000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#
    )
}

fn slide_master() -> String {
    let ids: String = (1..=LAYOUTS.len())
        .map(|n| format!(r#"<p:sldLayoutId id="{}" r:id="rId{n}"/>"#, 2147483648u32 + n as u32))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:sldLayoutIdLst>{ids}</p:sldLayoutIdLst></p:sldMaster>"#
    )
}

fn notes_master() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notesMaster {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld></p:notesMaster>"#
    )
}

fn placeholder_shape(id: usize, type_tag: Option<&str>, idx: Option<u32>, name: &str, body: &str) -> String {
    let mut ph = String::from("<p:ph");
    if let Some(type_tag) = type_tag {
        ph.push_str(&format!(r#" type="{type_tag}""#));
    }
    if let Some(idx) = idx {
        ph.push_str(&format!(r#" idx="{idx}""#));
    }
    ph.push_str("/>");
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr/><p:nvPr>{ph}</p:nvPr></p:nvSpPr><p:spPr/>{body}</p:sp>"#
    )
}

fn layout(name: &str, placeholders: &[(Option<&str>, Option<u32>, &str)]) -> String {
    let shapes: String = placeholders
        .iter()
        .enumerate()
        .map(|(i, (type_tag, idx, shape_name))| {
            placeholder_shape(i + 2, *type_tag, *idx, shape_name, "")
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout {NS} preserve="1"><p:cSld name="{name}"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{shapes}</p:spTree></p:cSld></p:sldLayout>"#
    )
}

fn slide(shapes: &[(Option<&str>, Option<u32>, &str)]) -> String {
    let shapes: String = shapes
        .iter()
        .enumerate()
        .map(|(i, (type_tag, idx, text))| {
            let body = format!(r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody>"#);
            placeholder_shape(i + 2, *type_tag, *idx, "Title 1", &body)
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{shapes}</p:spTree></p:cSld></p:sld>"#
    )
}
