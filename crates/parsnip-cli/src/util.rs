//! Input loading and diagnostic rendering helpers.

use std::io::Read;
use std::path::Path;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use parsnip_core::{Coordinates, SymbolTable};
use parsnip_parser::SyntaxError;

/// Read input from a file path (`-` for stdin) or inline text.
pub fn read_input(
    path: Option<&Path>,
    inline: Option<&str>,
    what: &str,
) -> Result<String, String> {
    if let Some(text) = inline {
        return Ok(text.to_owned());
    }
    match path {
        Some(p) if p.as_os_str() == "-" => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            Ok(text)
        }
        Some(p) => std::fs::read_to_string(p)
            .map_err(|e| format!("failed to read {}: {e}", p.display())),
        None => Err(format!("no {what} given (pass a file or inline text)")),
    }
}

/// Byte offset of zero-based line/column coordinates in `source`.
fn byte_offset(source: &str, coordinates: Coordinates) -> usize {
    let mut line = 0;
    for (offset, byte) in source.bytes().enumerate() {
        if line == coordinates.line {
            return (offset + coordinates.column).min(source.len());
        }
        if byte == b'\n' {
            line += 1;
        }
    }
    if line == coordinates.line {
        coordinates.column.min(source.len())
    } else {
        source.len()
    }
}

fn render_annotated(
    source: &str,
    path: Option<&str>,
    coordinates: Coordinates,
    message: &str,
    colored: bool,
) -> String {
    let renderer = if colored {
        Renderer::styled()
    } else {
        Renderer::plain()
    };

    let start = byte_offset(source, coordinates);
    let end = (start + 1).min(source.len());
    let range = if start < end { start..end } else { start..start };

    let mut snippet = Snippet::source(source)
        .line_start(1)
        .annotation(AnnotationKind::Primary.span(range).label(message));
    if let Some(p) = path {
        snippet = snippet.path(p);
    }

    let report: Vec<Group> = vec![Level::ERROR.primary_title(message).element(snippet)];
    renderer.render(&report)
}

/// Render an unrecognized-input diagnostic.
pub fn render_scan_error(
    source: &str,
    path: Option<&str>,
    coordinates: Coordinates,
    colored: bool,
) -> String {
    render_annotated(source, path, coordinates, "unrecognized token", colored)
}

/// Print a scan failure to stderr, annotated against the source when the
/// failure has coordinates.
pub fn report_scan_error(
    source: &str,
    path: Option<&str>,
    error: &parsnip_core::ScanError,
    colored: bool,
) {
    match error {
        parsnip_core::ScanError::UnrecognizedToken { coordinates } => {
            eprintln!("{}", render_scan_error(source, path, *coordinates, colored));
        }
        other => eprintln!("error: {other}"),
    }
}

/// Render one parse diagnostic with the expected terminal names.
pub fn render_syntax_error(
    source: &str,
    path: Option<&str>,
    error: &SyntaxError,
    names: &SymbolTable,
    colored: bool,
) -> String {
    let expected: Vec<&str> = error
        .expected
        .iter()
        .map(|&s| names.try_resolve(s).unwrap_or("?"))
        .collect();
    let message = if expected.is_empty() {
        format!("unexpected `{}`", error.token.lexeme)
    } else {
        format!(
            "unexpected `{}`, expected one of: {}",
            error.token.lexeme,
            expected.join(" ")
        )
    };
    render_annotated(source, path, error.token.coordinates, &message, colored)
}
