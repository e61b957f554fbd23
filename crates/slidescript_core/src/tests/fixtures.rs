//! In-memory `.pptx` fixtures

use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Slide XML with one `a:p` per inner slice; a `"\n"` run becomes `a:br`.
pub(crate) fn slide_xml(paragraphs: &[&[&str]]) -> String {
    let mut body = String::new();
    for para in paragraphs {
        body.push_str("<a:p>");
        for run in *para {
            if *run == "\n" {
                body.push_str("<a:br/>");
            } else {
                body.push_str("<a:r><a:rPr lang=\"en-US\"/><a:t>");
                body.push_str(&escape(run));
                body.push_str("</a:t></a:r>");
            }
        }
        body.push_str("</a:p>");
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld xmlns:a="{A_NS}" xmlns:r="{R_NS}" xmlns:p="{P_NS}"><p:cSld><p:spTree><p:sp><p:txBody><a:bodyPr/>{body}</p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#
    )
}

#[derive(Default)]
pub(crate) struct PptxBuilder {
    slides: Vec<(String, String)>,
    order: Option<Vec<String>>,
}

impl PptxBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add `ppt/slides/{file}`.
    pub(crate) fn slide(mut self, file: &str, paragraphs: &[&[&str]]) -> Self {
        self.slides.push((file.to_string(), slide_xml(paragraphs)));
        self
    }

    /// Write `presentation.xml` listing the slides in this order.
    pub(crate) fn order(mut self, files: &[&str]) -> Self {
        self.order = Some(files.iter().map(|f| f.to_string()).collect());
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
            .unwrap();

        for (file, xml) in &self.slides {
            zip.start_file(format!("ppt/slides/{file}"), options).unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
        }

        if let Some(order) = &self.order {
            let mut ids = String::new();
            let mut rels = String::new();
            for (i, file) in order.iter().enumerate() {
                ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 2));
                rels.push_str(&format!(
                    r#"<Relationship Id="rId{}" Type="{R_NS}/slide" Target="slides/{file}"/>"#,
                    i + 2
                ));
            }
            zip.start_file("ppt/presentation.xml", options).unwrap();
            zip.write_all(
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><p:presentation xmlns:a="{A_NS}" xmlns:r="{R_NS}" xmlns:p="{P_NS}"><p:sldIdLst>{ids}</p:sldIdLst></p:presentation>"#
                )
                .as_bytes(),
            )
            .unwrap();
            zip.start_file("ppt/_rels/presentation.xml.rels", options).unwrap();
            zip.write_all(
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
                )
                .as_bytes(),
            )
            .unwrap();
        }

        zip.finish().unwrap().into_inner()
    }
}
