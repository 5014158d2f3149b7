//! Markdown → ratatui `Text` for assistant replies.
//!
//! `pulldown_cmark` does the parsing; this module only maps its events onto
//! styled lines. Fenced code is highlighted with syntect. Tables are laid
//! out as padded rows separated by `│`.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
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
const MUTED: Color = Color::DarkGray;

pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut writer = MdWriter::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        writer.event(event);
    }
    writer.finish()
}

/// Table cells collected until the table closes, then laid out in one go.
#[derive(Default)]
struct TableBuf {
    rows: Vec<Vec<String>>,
    header_rows: usize,
    in_header: bool,
}

struct MdWriter {
    lines: Vec<Line<'static>>,
    base_fg: Color,
    styles: Vec<Style>,
    quote_depth: usize,
    /// None = bullet list, Some(n) = ordered list at n.
    lists: Vec<Option<u64>>,
    code: Option<CodeBlock>,
    table: Option<TableBuf>,
    link: Option<String>,
    gap_pending: bool,
    /// Just emitted a list marker; the item's first paragraph continues that line.
    fresh_item: bool,
}

struct CodeBlock {
    highlighter: Option<HighlightLines<'static>>,
}

impl MdWriter {
    fn new(base_fg: Color) -> Self {
        Self {
            lines: Vec::new(),
            base_fg,
            styles: Vec::new(),
            quote_depth: 0,
            lists: Vec::new(),
            code: None,
            table: None,
            link: None,
            gap_pending: false,
            fresh_item: false,
        }
    }

    fn finish(self) -> Text<'static> {
        Text::from(self.lines)
    }

    fn current_style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.current_style().patch(overlay));
    }

    fn new_line(&mut self) {
        let mut line = Line::default();
        if self.quote_depth > 0 {
            line.push_span(Span::styled("┃ ".repeat(self.quote_depth), Style::default().fg(MUTED)));
        }
        self.lines.push(line);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if self.lines.is_empty() {
            self.new_line();
        }
        if let Some(line) = self.lines.last_mut() {
            line.push_span(span);
        }
    }

    fn block_gap(&mut self) {
        if self.gap_pending && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.gap_pending = false;
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if let Some(table) = self.table.as_mut() {
                    push_cell_text(table, &code);
                } else {
                    self.push_span(Span::styled(
                        code.to_string(),
                        Style::default().fg(Color::Yellow).bg(Color::Black),
                    ));
                }
            }
            Event::SoftBreak => {
                if let Some(table) = self.table.as_mut() {
                    push_cell_text(table, " ");
                } else {
                    self.push_span(Span::raw(" "));
                }
            }
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.block_gap();
                self.lines
                    .push(Line::from(Span::styled("─".repeat(32), Style::default().fg(MUTED))));
                self.gap_pending = true;
            }
            Event::TaskListMarker(done) => {
                self.push_span(Span::raw(if done { "☑ " } else { "☐ " }));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.fresh_item {
                    self.fresh_item = false;
                } else {
                    self.block_gap();
                    self.new_line();
                }
            }
            Tag::Heading { level, .. } => {
                self.block_gap();
                self.new_line();
                self.push_style(heading_style(level));
            }
            Tag::BlockQuote(_) => {
                self.block_gap();
                self.quote_depth += 1;
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.block_gap();
                let lang = match &kind {
                    CodeBlockKind::Fenced(lang) => lang.split_whitespace().next().unwrap_or(""),
                    CodeBlockKind::Indented => "",
                };
                let label = if lang.is_empty() { String::new() } else { format!(" {lang} ") };
                self.lines.push(Line::from(Span::styled(
                    format!("┌─{label}"),
                    Style::default().fg(MUTED),
                )));
                let highlighter = SYNTAX_SET
                    .find_syntax_by_token(lang)
                    .filter(|_| !lang.is_empty())
                    .zip(THEME_SET.themes.get(CODE_THEME))
                    .map(|(syntax, theme)| HighlightLines::new(syntax, theme));
                self.code = Some(CodeBlock { highlighter });
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.block_gap();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.gap_pending = false;
                self.fresh_item = true;
                self.new_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.push_span(Span::styled(marker, Style::default().fg(MUTED)));
            }
            Tag::Table(_) => {
                self.block_gap();
                self.table = Some(TableBuf::default());
            }
            Tag::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.in_header = true;
                    table.rows.push(Vec::new());
                }
            }
            Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.rows.push(Vec::new());
                }
            }
            Tag::TableCell => {
                if let Some(row) = self.table.as_mut().and_then(|t| t.rows.last_mut()) {
                    row.push(String::new());
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.push_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.gap_pending = true,
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.gap_pending = true;
            }
            TagEnd::BlockQuote(_) => {
                self.styles.pop();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.gap_pending = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.lines
                    .push(Line::from(Span::styled("└─", Style::default().fg(MUTED))));
                self.gap_pending = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.gap_pending = true;
                }
            }
            TagEnd::Item => {
                self.fresh_item = false;
                self.gap_pending = false;
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.in_header = false;
                    table.header_rows = table.rows.len();
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.lines.extend(layout_table(&table, self.base_fg));
                }
                self.gap_pending = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link.take() {
                    self.push_span(Span::styled(format!(" <{url}>"), Style::default().fg(MUTED)));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        // ratatui renders '\t' as zero-width
        let text = text.replace('\t', "    ");

        if let Some(table) = self.table.as_mut() {
            push_cell_text(table, &text);
            return;
        }

        if let Some(code) = self.code.as_mut() {
            let gutter = Span::styled("│ ", Style::default().fg(MUTED));
            let mut code_lines = Vec::new();
            for raw in LinesWithEndings::from(&text) {
                let mut spans = vec![gutter.clone()];
                match code.highlighter.as_mut() {
                    Some(hl) => match hl.highlight_line(raw, &SYNTAX_SET) {
                        Ok(ranges) => spans.extend(ranges.into_iter().map(|(style, frag)| {
                            let fg = style.foreground;
                            Span::styled(
                                frag.trim_end_matches('\n').to_string(),
                                Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                            )
                        })),
                        Err(_) => spans.push(Span::raw(raw.trim_end_matches('\n').to_string())),
                    },
                    None => spans.push(Span::styled(
                        raw.trim_end_matches('\n').to_string(),
                        Style::default().fg(Color::White),
                    )),
                }
                code_lines.push(Line::from(spans));
            }
            self.lines.extend(code_lines);
            return;
        }

        let style = self.current_style();
        self.push_span(Span::styled(text, style));
    }
}

fn push_cell_text(table: &mut TableBuf, text: &str) {
    if let Some(cell) = table.rows.last_mut().and_then(|row| row.last_mut()) {
        cell.push_str(text);
    }
}

fn layout_table(table: &TableBuf, base_fg: Color) -> Vec<Line<'static>> {
    let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let sep = Span::styled(" │ ", Style::default().fg(MUTED));
    let mut lines = Vec::new();
    for (r, row) in table.rows.iter().enumerate() {
        let is_header = r < table.header_rows;
        let style = if is_header {
            Style::default().fg(base_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(base_fg)
        };
        let mut spans = Vec::new();
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                spans.push(sep.clone());
            }
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.width());
            spans.push(Span::styled(format!("{cell}{}", " ".repeat(pad)), style));
        }
        lines.push(Line::from(spans));

        if is_header && r + 1 == table.header_rows {
            let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
            lines.push(Line::from(Span::styled(
                rule.join("─┼─"),
                Style::default().fg(MUTED),
            )));
        }
    }
    lines
}

fn heading_style(level: HeadingLevel) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => style.add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => style,
        _ => style.add_modifier(Modifier::ITALIC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn paragraph_uses_base_color() {
        let text = render("hello", Color::Blue);
        assert_eq!(plain(&text), vec!["hello"]);
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Blue));
    }

    #[test]
    fn heading_is_bold_without_hash_prefix() {
        let text = render("## Setup", Color::Blue);
        assert_eq!(plain(&text), vec!["Setup"]);
        let style = text.lines[0].spans[0].style;
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(style.fg, Some(Color::Blue));
    }

    #[test]
    fn strong_span_is_bold() {
        let text = render("a **b** c", Color::Blue);
        let span = text.lines[0].spans.iter().find(|s| s.content == "b").unwrap();
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn paragraphs_separated_by_blank_line() {
        let text = render("one\n\ntwo", Color::Blue);
        assert_eq!(plain(&text), vec!["one", "", "two"]);
    }

    #[test]
    fn bullet_and_ordered_lists() {
        let text = render("* a\n* b\n\n1. x\n2. y", Color::Blue);
        let lines = plain(&text);
        assert!(lines.contains(&"• a".to_string()), "{lines:?}");
        assert!(lines.contains(&"• b".to_string()), "{lines:?}");
        assert!(lines.contains(&"1. x".to_string()), "{lines:?}");
        assert!(lines.contains(&"2. y".to_string()), "{lines:?}");
    }

    #[test]
    fn code_block_is_framed() {
        let text = render("```\nlet x = 1;\n```", Color::Blue);
        let lines = plain(&text);
        assert!(lines[0].starts_with('┌'));
        assert_eq!(lines[1], "│ let x = 1;");
        assert!(lines.last().unwrap().starts_with('└'));
    }

    #[test]
    fn table_columns_are_aligned() {
        let text = render("| a | bb |\n|---|----|\n| ccc | d |", Color::Blue);
        let lines = plain(&text);
        assert_eq!(lines[0], "a   │ bb");
        assert!(lines[1].contains('┼'));
        assert_eq!(lines[2], "ccc │ d ");
    }

    #[test]
    fn link_url_follows_text() {
        let text = render("[docs](https://example.com)", Color::Blue);
        assert_eq!(plain(&text), vec!["docs <https://example.com>"]);
    }
}
