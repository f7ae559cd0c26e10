//! Source-snippet and plain-line rendering of diagnostics.

use std::fmt::{self, Display, Write};
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::{Diagnostic, Diagnostics};

/// Renders [`Diagnostics`], as snippets once the grammar source is attached.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// File name shown in the snippet header.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    /// Without a source, writes one `error at start..end: message` line per
    /// diagnostic.
    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        let Some(text) = self.source else {
            return write_separated(w, self.diagnostics);
        };

        let source = GrammarSource {
            text,
            path: self.path,
        };
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        let reports = self
            .diagnostics
            .iter()
            .map(|diagnostic| renderer.render(&[source.report(diagnostic)]));
        write_separated(w, reports)
    }
}

/// Grammar text the diagnostic ranges point into.
#[derive(Clone, Copy)]
struct GrammarSource<'s> {
    text: &'s str,
    path: Option<&'s str>,
}

impl<'s> GrammarSource<'s> {
    fn report<'a>(&self, diagnostic: &'a Diagnostic) -> Group<'a>
    where
        's: 'a,
    {
        let mut snippet = Snippet::source(self.text).line_start(1).annotation(
            AnnotationKind::Primary
                .span(self.span(diagnostic.range))
                .label(&diagnostic.message),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }

        // Unspanned locations (common in JSON input) have nothing to underline.
        let mut notes = Vec::new();
        for related in &diagnostic.related {
            if related.range.is_empty() || related.range == diagnostic.range {
                notes.push(&related.message);
                continue;
            }
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(self.span(related.range))
                    .label(&related.message),
            );
        }

        let mut group = Level::ERROR
            .primary_title(&diagnostic.message)
            .element(snippet);
        for note in notes {
            group = group.element(Level::NOTE.message(note));
        }
        for hint in &diagnostic.hints {
            group = group.element(Level::HELP.message(hint));
        }
        group
    }

    /// Byte range clamped to the text. An empty range widens to one character
    /// so the caret stays visible.
    fn span(&self, range: TextRange) -> Range<usize> {
        let limit = self.text.len();
        let start = usize::from(range.start()).min(limit);
        let end = usize::from(range.end()).min(limit);
        if start < end {
            start..end
        } else {
            start..(start + 1).min(limit)
        }
    }
}

fn write_separated<T: Display>(w: &mut impl Write, items: impl IntoIterator<Item = T>) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            w.write_char('\n')?;
        }
        write!(w, "{item}")?;
    }
    Ok(())
}
