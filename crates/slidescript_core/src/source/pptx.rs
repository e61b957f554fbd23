//! `.pptx` reader: one element per non-empty text paragraph, numbered by slide position.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

use roxmltree::Document;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::element::RawElement;
use crate::error::{PipelineError, Result};

use super::ElementSource;

const DRAWING_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const PRESENTATION_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const RELATIONSHIP_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const MARKUP_COMPAT_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";

const PRESENTATION_XML: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

#[derive(Debug, Clone)]
pub struct PptxSource {
    name: String,
    bytes: Vec<u8>,
}

impl PptxSource {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self {
            name: path.display().to_string(),
            bytes,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            name: "<in-memory pptx>".to_string(),
            bytes,
        }
    }

    fn archive(&self) -> Result<Archive<'_>> {
        ZipArchive::new(Cursor::new(self.bytes.as_slice())).map_err(|e| {
            PipelineError::extraction(format!("{} is not a pptx archive: {e}", self.name))
        })
    }
}

impl ElementSource for PptxSource {
    fn elements(&self) -> Result<Vec<RawElement>> {
        let mut archive = self.archive()?;

        let slides = match presentation_order(&mut archive)? {
            Some(order) if !order.is_empty() => order,
            _ => {
                tracing::debug!(source = %self.name, "No usable slide list; using file order");
                numbered_slides(&archive)
            }
        };

        let mut elements = Vec::new();
        for (position, entry) in slides.iter().enumerate() {
            let page = u32::try_from(position + 1)
                .map_err(|_| PipelineError::extraction("too many slides"))?;
            let xml = read_entry(&mut archive, entry)?.ok_or_else(|| {
                PipelineError::extraction(format!("{} lists missing slide {entry}", self.name))
            })?;
            for text in slide_paragraphs(&xml, entry)? {
                elements.push(RawElement::new(text).with_page(page));
            }
        }

        tracing::debug!(
            source = %self.name,
            slides = slides.len(),
            elements = elements.len(),
            "Read pptx"
        );
        Ok(elements)
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// `Ok(None)` when the entry does not exist.
fn read_entry(archive: &mut Archive<'_>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(PipelineError::extraction(format!("cannot open {name}: {e}"))),
    };
    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| PipelineError::extraction(format!("cannot read {name}: {e}")))?;
    Ok(Some(xml))
}

/// Slide entry names in presentation order, from `p:sldIdLst` and its relationships.
fn presentation_order(archive: &mut Archive<'_>) -> Result<Option<Vec<String>>> {
    let (Some(presentation), Some(rels)) = (
        read_entry(archive, PRESENTATION_XML)?,
        read_entry(archive, PRESENTATION_RELS)?,
    ) else {
        return Ok(None);
    };

    let (Ok(presentation), Ok(rels)) = (Document::parse(&presentation), Document::parse(&rels))
    else {
        return Ok(None);
    };

    let targets: HashMap<&str, &str> = rels
        .descendants()
        .filter(|n| n.has_tag_name("Relationship"))
        .filter_map(|n| Some((n.attribute("Id")?, n.attribute("Target")?)))
        .collect();

    let order = presentation
        .descendants()
        .filter(|n| n.has_tag_name((PRESENTATION_NS, "sldId")))
        .filter_map(|n| n.attribute((RELATIONSHIP_NS, "id")))
        .filter_map(|rel_id| targets.get(rel_id))
        .map(|target| resolve_target(target))
        .collect();

    Ok(Some(order))
}

fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{target}"),
    }
}

/// `ppt/slides/slideN.xml` entries sorted by N.
fn numbered_slides(archive: &Archive<'_>) -> Vec<String> {
    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let n = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse()
                .ok()?;
            Some((n, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(n, _)| *n);
    slides.into_iter().map(|(_, name)| name).collect()
}

/// True inside an `mc:Fallback` branch, which repeats the content of its `mc:Choice`.
fn in_fallback(node: roxmltree::Node<'_, '_>) -> bool {
    node.ancestors()
        .any(|a| a.has_tag_name((MARKUP_COMPAT_NS, "Fallback")))
}

/// Text of each `a:p` on the slide: runs concatenated, `a:br` as newline, trimmed.
fn slide_paragraphs(xml: &str, entry: &str) -> Result<Vec<String>> {
    let doc = Document::parse(xml)
        .map_err(|e| PipelineError::extraction(format!("{entry} parse failed: {e}")))?;

    let paragraphs = doc
        .descendants()
        .filter(|n| n.has_tag_name((DRAWING_NS, "p")) && !in_fallback(*n))
        .filter_map(|para| {
            let mut buf = String::new();
            for node in para
                .descendants()
                .filter(|n| n.is_element() && n.tag_name().namespace() == Some(DRAWING_NS))
                .filter(|n| !in_fallback(*n))
            {
                match node.tag_name().name() {
                    "t" => {
                        if let Some(text) = node.text() {
                            buf.push_str(text);
                        }
                    }
                    "br" => buf.push('\n'),
                    _ => {}
                }
            }
            let trimmed = buf.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect();

    Ok(paragraphs)
}
