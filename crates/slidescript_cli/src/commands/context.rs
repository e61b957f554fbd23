//! `slidescript context`

use std::path::Path;

use anyhow::Result;
use slidescript_core::open_source;
use slidescript_core::pipeline::{build_context, extract};

use crate::output;

pub fn handle(deck: &Path) -> Result<()> {
    let source = open_source(deck)?;
    let context = build_context(extract(source.as_ref())?)?;
    output::document("context", context.as_str());
    Ok(())
}
