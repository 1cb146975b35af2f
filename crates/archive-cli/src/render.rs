//! Plain-text rendering of catalog views.

use std::io::{self, Write};

use archive_models::{CatalogView, FacetOptions, Session, VideoRecord};

/// Shown in place of an empty facet value.
const BLANK_VALUE: &str = "(none)";

pub fn video<W: Write>(out: &mut W, record: &VideoRecord, base_url: &str) -> io::Result<()> {
    let meta = &record.metadata;
    if meta.school.is_empty() {
        writeln!(out, "{}", meta.title)?;
    } else {
        writeln!(out, "{}  [{}]", meta.title, meta.school)?;
    }
    if !meta.description.is_empty() {
        writeln!(out, "  {}", meta.description)?;
    }
    if !meta.tags.is_empty() {
        writeln!(out, "  tags: {}", meta.tags.join(", "))?;
    }
    writeln!(out, "  {}", record.media_url(base_url))
}

pub fn catalog<W: Write>(out: &mut W, view: &CatalogView, base_url: &str) -> io::Result<()> {
    if let Some(message) = view.empty_message() {
        return writeln!(out, "{}", message);
    }

    for record in view.visible() {
        video(out, record, base_url)?;
        writeln!(out)?;
    }

    let filters = view.criteria().active_filter_count();
    write!(out, "{} of {} videos", view.visible_count(), view.all().len())?;
    if filters > 0 {
        write!(out, " (filters: {})", filters)?;
    }
    writeln!(out)
}

pub fn facets<W: Write>(out: &mut W, facets: &FacetOptions) -> io::Result<()> {
    writeln!(out, "Schools")?;
    facet_values(out, &facets.schools)?;
    writeln!(out, "Tags")?;
    facet_values(out, &facets.tags)
}

fn facet_values<W: Write>(out: &mut W, values: &[String]) -> io::Result<()> {
    if values.is_empty() {
        return writeln!(out, "  -");
    }
    for value in values {
        let shown = if value.is_empty() { BLANK_VALUE } else { value.as_str() };
        writeln!(out, "  {}", shown)?;
    }
    Ok(())
}

pub fn session<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    let user = &session.user;
    if user.name.is_empty() {
        writeln!(out, "{}", user.email)?;
    } else {
        writeln!(out, "{} <{}>", user.name, user.email)?;
    }
    writeln!(out, "  signed in {}", session.signed_in_at.format("%Y-%m-%d %H:%M UTC"))
}
