//! Markdown → ratatui `Text` for assistant answers.
//!
//! Answers arrive as markdown with a fairly narrow vocabulary: bold lead-ins,
//! numbered result lists, occasional headings, the SQL that produced a
//! result, and pipe tables of query rows. This renders that vocabulary into
//! styled lines:
//!
//! - fenced code is framed and highlighted with syntect; an unlabeled fence
//!   is treated as SQL
//! - tables are laid out as aligned columns (`---:` columns right-aligned)
//! - links keep their text and show the target in muted brackets
//!
//! [`plain`] is the fallback when rendering is switched off.

use std::sync::LazyLock;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use unicode_width::UnicodeWidthStr;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_THEME: &str = "base16-ocean.dark";
const DEFAULT_CODE_LANG: &str = "sql";

pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut renderer = Renderer::new(Palette::new(base_fg));
    for event in Parser::new_ext(content, options) {
        renderer.event(event);
    }
    renderer.finish()
}

/// Literal text, one `Line` per input line, in a single style.
pub fn plain(content: &str, base_fg: Color) -> Text<'static> {
    let style = Style::default().fg(base_fg);
    content
        .lines()
        .map(|l| Line::from(Span::styled(l.replace('\t', "    "), style)))
        .collect::<Vec<_>>()
        .into()
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    text: Style,
    muted: Style,
    code: Style,
    link: Style,
}

impl Palette {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Style::default().fg(base_fg),
            muted: Style::default().fg(Color::DarkGray),
            code: Style::default().fg(Color::Yellow),
            link: Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        }
    }

    fn heading(&self, level: HeadingLevel) -> Style {
        match level {
            HeadingLevel::H1 => self.text.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            _ => self.text.add_modifier(Modifier::BOLD),
        }
    }
}

/// Fenced code collected until the fence closes, then highlighted in one go.
struct CodeBlock {
    lang: String,
    source: String,
}

/// Table cells collected as plain strings so columns can be measured.
struct Table {
    alignments: Vec<Alignment>,
    rows: Vec<Vec<String>>,
    head_rows: usize,
    cell: String,
}

struct Renderer {
    palette: Palette,
    lines: Vec<Line<'static>>,
    /// Spans of the line being built.
    line: Vec<Span<'static>>,
    /// Inline style stack; each entry is already composed with its parent.
    styles: Vec<Style>,
    quote_depth: usize,
    /// None = bullet list, Some(n) = ordered list whose next item is n.
    lists: Vec<Option<u64>>,
    /// A list marker was just written and its item text has not started.
    marker_pending: bool,
    code: Option<CodeBlock>,
    table: Option<Table>,
    link: Option<String>,
    /// The next block starts after a blank line.
    gap: bool,
}

impl Renderer {
    fn new(palette: Palette) -> Self {
        Self {
            palette,
            lines: Vec::new(),
            line: Vec::new(),
            styles: Vec::new(),
            quote_depth: 0,
            lists: Vec::new(),
            marker_pending: false,
            code: None,
            table: None,
            link: None,
            gap: false,
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush();
        Text::from(self.lines)
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(self.palette.text)
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn emit(&mut self, mut line: Line<'static>) {
        if self.quote_depth > 0 {
            let bar = Span::styled("▎ ".repeat(self.quote_depth), self.palette.muted);
            line.spans.insert(0, bar);
        }
        self.lines.push(line);
    }

    fn flush(&mut self) {
        if !self.line.is_empty() {
            let spans = std::mem::take(&mut self.line);
            self.emit(Line::from(spans));
        }
    }

    fn open_block(&mut self) {
        self.flush();
        if self.gap && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.gap = false;
    }

    fn close_block(&mut self) {
        self.flush();
        self.gap = true;
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.open_block();
                self.emit(Line::from(Span::styled("─".repeat(40), self.palette.muted)));
                self.gap = true;
            }
            Event::TaskListMarker(done) => {
                let marker = if done { "[x] " } else { "[ ] " };
                self.line.push(Span::styled(marker, self.palette.muted));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // The first paragraph of a loose list item continues the marker line
                if !std::mem::take(&mut self.marker_pending) {
                    self.open_block();
                }
            }
            Tag::Heading { level, .. } => {
                self.open_block();
                let style = self.palette.heading(level);
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.open_block();
                self.quote_depth += 1;
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.open_block();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or_default().to_lowercase()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                let lang = if lang.is_empty() { DEFAULT_CODE_LANG.to_string() } else { lang };
                self.code = Some(CodeBlock {
                    lang,
                    source: String::new(),
                });
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.open_block();
                } else {
                    self.flush();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.line.push(Span::styled(marker, self.palette.muted));
                self.marker_pending = true;
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.push_style(self.palette.link);
            }
            Tag::Table(alignments) => {
                self.open_block();
                self.table = Some(Table {
                    alignments,
                    rows: Vec::new(),
                    head_rows: 0,
                    cell: String::new(),
                });
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.rows.push(Vec::new());
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.clear();
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.close_block(),
            TagEnd::Heading(_) | TagEnd::BlockQuote(_) => {
                self.styles.pop();
                self.close_block();
                if matches!(tag, TagEnd::BlockQuote(_)) {
                    self.quote_depth = self.quote_depth.saturating_sub(1);
                }
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    self.code_block(code);
                }
                self.gap = true;
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.gap = true;
                }
            }
            TagEnd::Item => {
                self.flush();
                self.marker_pending = false;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link.take() {
                    match self.table.as_mut() {
                        Some(table) => table.cell.push_str(&format!(" <{url}>")),
                        None => self.line.push(Span::styled(format!(" <{url}>"), self.palette.muted)),
                    }
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = table.cell.trim().to_string();
                    if let Some(row) = table.rows.last_mut() {
                        row.push(cell);
                    }
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.head_rows = table.rows.len();
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.table_lines(table);
                }
                self.gap = true;
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        // ratatui renders \t as zero-width
        let text = text.replace('\t', "    ");
        if let Some(code) = self.code.as_mut() {
            code.source.push_str(&text);
        } else if let Some(table) = self.table.as_mut() {
            table.cell.push_str(&text);
        } else {
            let style = self.style();
            self.line.push(Span::styled(text, style));
        }
    }

    fn inline_code(&mut self, code: &str) {
        match self.table.as_mut() {
            Some(table) => table.cell.push_str(code),
            None => self.line.push(Span::styled(code.to_string(), self.palette.code)),
        }
    }

    fn code_block(&mut self, code: CodeBlock) {
        let border = self.palette.muted;
        self.emit(Line::from(vec![
            Span::styled("┌─ ", border),
            Span::styled(code.lang.clone(), border.add_modifier(Modifier::BOLD)),
        ]));

        let syntax = SYNTAX_SET.find_syntax_by_token(&code.lang);
        let theme = THEME_SET.themes.get(CODE_THEME);
        let mut highlighter = syntax.zip(theme).map(|(s, t)| HighlightLines::new(s, t));

        for raw in LinesWithEndings::from(&code.source) {
            let mut spans = vec![Span::styled("│ ", border)];
            let ranges = highlighter
                .as_mut()
                .and_then(|h| h.highlight_line(raw, &SYNTAX_SET).ok());
            match ranges {
                Some(ranges) => spans.extend(ranges.into_iter().filter_map(|(style, frag)| {
                    let frag = frag.trim_end_matches(['\n', '\r']);
                    (!frag.is_empty()).then(|| {
                        let fg = style.foreground;
                        Span::styled(frag.to_string(), Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)))
                    })
                })),
                None => spans.push(Span::styled(
                    raw.trim_end_matches(['\n', '\r']).to_string(),
                    self.palette.code,
                )),
            }
            self.emit(Line::from(spans));
        }

        self.emit(Line::from(Span::styled("└─", border)));
    }

    fn table_lines(&mut self, table: Table) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &table.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }

        let separator = Span::styled(" │ ", self.palette.muted);
        for (r, row) in table.rows.iter().enumerate() {
            let is_head = r < table.head_rows;
            let style = if is_head {
                self.palette.text.add_modifier(Modifier::BOLD)
            } else {
                self.palette.text
            };

            let mut spans = Vec::with_capacity(columns * 2);
            for (i, width) in widths.iter().enumerate() {
                if i > 0 {
                    spans.push(separator.clone());
                }
                let cell = row.get(i).map(String::as_str).unwrap_or_default();
                let pad = " ".repeat(width.saturating_sub(cell.width()));
                let right = matches!(table.alignments.get(i), Some(Alignment::Right));
                let content = if right {
                    format!("{pad}{cell}")
                } else if i + 1 == columns {
                    cell.to_string()
                } else {
                    format!("{cell}{pad}")
                };
                spans.push(Span::styled(content, style));
            }
            self.emit(Line::from(spans));

            if is_head && r + 1 == table.head_rows {
                let rule = widths
                    .iter()
                    .map(|w| "─".repeat((*w).max(1)))
                    .collect::<Vec<_>>()
                    .join("─┼─");
                self.emit(Line::from(Span::styled(rule, self.palette.muted)));
            }
        }
    }
}
