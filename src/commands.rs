use crate::cli::Command;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::Serialize;
use shelf_storage::{ChapterEntry, LibraryBackend, SeriesEntry};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Listing output style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    /// One entry per line; listings are `name<TAB>last modified (RFC 3339)`
    Text,
    Json,
}

/// Run one subcommand against `backend`, writing results to `out`.
pub async fn run_command<W>(command: Command, output: Output, backend: &dyn LibraryBackend, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin + Send,
{
    let rendered = match command {
        Command::Series => {
            let series = backend.list_series().await.map_err(ErrorKind::storage)?;
            render_entries(&series, output, |s: &SeriesEntry| (&s.name, s.last_modified))?
        },
        Command::Chapters { series } => {
            let chapters = backend.list_chapters(&series).await.map_err(ErrorKind::storage)?;
            render_entries(&chapters, output, |c: &ChapterEntry| (&c.name, c.last_modified))?
        },
        Command::Pages { series, chapter } => {
            let pages = backend.list_pages(&series, &chapter).await.map_err(ErrorKind::storage)?;
            match output {
                Output::Text => pages.iter().map(|page| format!("{page}\n")).collect::<String>().into_bytes(),
                Output::Json => to_json(&pages)?,
            }
        },
        Command::Format { series, chapter } => {
            let format = backend.chapter_format(&series, &chapter).await.map_err(ErrorKind::storage)?;
            match output {
                Output::Text => format!("{format}\n").into_bytes(),
                Output::Json => to_json(format.as_str())?,
            }
        },
        Command::Page { series, chapter, page, output: Some(path) } => {
            let data = backend.get_page(&series, &chapter, &page).await.map_err(ErrorKind::storage)?;
            tokio::fs::write(&path, &data).await.or_raise(|| ErrorKind::Output)?;
            tracing::info!(path = %path.display(), size = data.len(), "Wrote page");
            return Ok(());
        },
        Command::Page { series, chapter, page, output: None } => {
            backend.get_page(&series, &chapter, &page).await.map_err(ErrorKind::storage)?
        },
    };
    out.write_all(&rendered).await.or_raise(|| ErrorKind::Output)?;
    out.flush().await.or_raise(|| ErrorKind::Output)
}

fn render_entries<T: Serialize>(
    entries: &[T],
    output: Output,
    fields: impl Fn(&T) -> (&String, OffsetDateTime),
) -> Result<Vec<u8>> {
    if output == Output::Json {
        return to_json(entries);
    }
    let mut rendered = String::new();
    for entry in entries {
        let (name, modified) = fields(entry);
        let modified = modified.format(&Rfc3339).or_raise(|| ErrorKind::Output)?;
        rendered.push_str(&format!("{name}\t{modified}\n"));
    }
    Ok(rendered.into_bytes())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut json = serde_json::to_vec_pretty(value).or_raise(|| ErrorKind::Output)?;
    json.push(b'\n');
    Ok(json)
}
