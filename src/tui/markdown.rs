//! Markdown → ratatui `Text`.
//!
//! Replies from the agent are Markdown: prose, lists and, above all, fenced
//! code (every `code` event arrives fenced). Fences with a known language are
//! highlighted with syntect; the rest render as plain monospace lines inside a
//! left rule.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME: LazyLock<Option<Theme>> = LazyLock::new(|| {
    ThemeSet::load_defaults()
        .themes
        .remove("base16-ocean.dark")
});

const RULE: Color = Color::DarkGray;

/// Render `content` using `base_fg` for body text.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut renderer = Renderer::new(base_fg);
    for event in Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH) {
        renderer.event(event);
    }
    renderer.finish()
}

enum CodeBlock {
    Highlighted(HighlightLines<'static>),
    Plain,
}

struct Renderer {
    lines: Vec<Line<'static>>,
    base: Style,
    inline: Vec<Style>,
    /// `None` = bullet list, `Some(n)` = ordered list at item n.
    lists: Vec<Option<u64>>,
    code: Option<CodeBlock>,
    quote_depth: usize,
    link: Option<String>,
    /// A block just ended; the next block starts after a blank line.
    gap: bool,
}

impl Renderer {
    fn new(base_fg: Color) -> Self {
        Self {
            lines: Vec::new(),
            base: Style::default().fg(base_fg),
            inline: Vec::new(),
            lists: Vec::new(),
            code: None,
            quote_depth: 0,
            link: None,
            gap: false,
        }
    }

    fn finish(self) -> Text<'static> {
        Text::from(self.lines)
    }

    fn style(&self) -> Style {
        self.inline.last().copied().unwrap_or(self.base)
    }

    fn push_inline(&mut self, modifier: Style) {
        let next = self.style().patch(modifier);
        self.inline.push(next);
    }

    fn start_block(&mut self) {
        if self.gap && !self.lines.is_empty() {
            self.new_line();
        }
        self.gap = false;
    }

    fn new_line(&mut self) {
        let mut line = Line::default();
        for _ in 0..self.quote_depth {
            line.push_span(Span::styled("│ ", Style::default().fg(RULE)));
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

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_span(Span::styled(
                code.to_string(),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.start_block();
                self.new_line();
                self.push_span(Span::styled("─".repeat(32), Style::default().fg(RULE)));
                self.gap = true;
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Inside a list item the bullet already started the line
                if self.lists.is_empty() {
                    self.start_block();
                    self.new_line();
                }
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                self.new_line();
                let style = self.base.add_modifier(heading_modifier(level));
                self.inline.push(style);
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.quote_depth += 1;
                self.push_inline(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.start_block();
                let lang = match &kind {
                    CodeBlockKind::Fenced(lang) => lang.split_whitespace().next().unwrap_or(""),
                    CodeBlockKind::Indented => "",
                };
                self.new_line();
                let header = if lang.is_empty() {
                    "╭──".to_string()
                } else {
                    format!("╭── {lang}")
                };
                self.push_span(Span::styled(header, Style::default().fg(RULE)));
                self.code = Some(highlighter_for(lang));
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.start_block();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.new_line();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}{n}. ", "  ".repeat(depth));
                        *n += 1;
                        marker
                    }
                    _ => format!("{}• ", "  ".repeat(depth)),
                };
                self.push_span(Span::styled(marker, Style::default().fg(RULE)));
            }
            Tag::Emphasis => self.push_inline(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_inline(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_inline(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.push_inline(Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED));
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.gap = true,
            TagEnd::Heading(_) | TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.inline.pop();
                if matches!(tag, TagEnd::Heading(_)) {
                    self.gap = true;
                }
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.inline.pop();
                self.gap = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.new_line();
                self.push_span(Span::styled("╰──", Style::default().fg(RULE)));
                self.gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.gap = true;
                }
            }
            TagEnd::Link => {
                self.inline.pop();
                if let Some(url) = self.link.take() {
                    self.push_span(Span::styled(format!(" ({url})"), Style::default().fg(RULE)));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        // ratatui draws tabs zero-width
        let text = text.replace('\t', "    ");

        match self.code.take() {
            Some(CodeBlock::Highlighted(mut highlighter)) => {
                for source_line in LinesWithEndings::from(&text) {
                    let spans: Vec<Span<'static>> = match highlighter.highlight_line(source_line, &SYNTAX_SET) {
                        Ok(ranges) => ranges
                            .into_iter()
                            .map(|(style, fragment)| {
                                let fg = style.foreground;
                                Span::styled(
                                    fragment.trim_end_matches('\n').to_string(),
                                    Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                                )
                            })
                            .collect(),
                        Err(_) => vec![Span::raw(source_line.trim_end_matches('\n').to_string())],
                    };
                    self.code_line(spans);
                }
                self.code = Some(CodeBlock::Highlighted(highlighter));
            }
            Some(CodeBlock::Plain) => {
                for source_line in text.lines() {
                    self.code_line(vec![Span::styled(
                        source_line.to_string(),
                        Style::default().fg(Color::White),
                    )]);
                }
                self.code = Some(CodeBlock::Plain);
            }
            None => {
                let style = self.style();
                self.push_span(Span::styled(text, style));
            }
        }
    }

    fn code_line(&mut self, spans: Vec<Span<'static>>) {
        self.new_line();
        self.push_span(Span::styled("│ ", Style::default().fg(RULE)));
        for span in spans {
            self.push_span(span);
        }
    }
}

fn highlighter_for(lang: &str) -> CodeBlock {
    if lang.is_empty() {
        return CodeBlock::Plain;
    }
    match (SYNTAX_SET.find_syntax_by_token(lang), THEME.as_ref()) {
        (Some(syntax), Some(theme)) => CodeBlock::Highlighted(HighlightLines::new(syntax, theme)),
        _ => CodeBlock::Plain,
    }
}

fn heading_modifier(level: HeadingLevel) -> Modifier {
    match level {
        HeadingLevel::H1 => Modifier::BOLD | Modifier::UNDERLINED,
        HeadingLevel::H2 => Modifier::BOLD,
        _ => Modifier::BOLD | Modifier::ITALIC,
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
    fn plain_text_uses_base_color() {
        let text = render("hello", Color::Green);
        assert_eq!(plain(&text), vec!["hello"]);
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn paragraphs_are_separated_by_blank_line() {
        let text = render("one\n\ntwo", Color::Blue);
        assert_eq!(plain(&text), vec!["one", "", "two"]);
    }

    #[test]
    fn bold_text_is_bold() {
        let text = render("Some **bold** text", Color::Blue);
        let bold = text.lines[0].spans.iter().find(|s| s.content == "bold").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(bold.style.fg, Some(Color::Blue));
    }

    #[test]
    fn unfenced_code_block_is_framed() {
        let text = render("```\nls -la\npwd\n```", Color::Blue);
        let lines = plain(&text);
        assert_eq!(lines.first().map(String::as_str), Some("╭──"));
        assert_eq!(lines[1], "│ ls -la");
        assert_eq!(lines[2], "│ pwd");
        assert_eq!(lines.last().map(String::as_str), Some("╰──"));
    }

    #[test]
    fn highlighted_code_keeps_text() {
        let text = render("```python\nprint('hi')\n```", Color::Blue);
        let lines = plain(&text);
        assert_eq!(lines[0], "╭── python");
        assert_eq!(lines[1], "│ print('hi')");
    }

    #[test]
    fn lists_get_markers() {
        let text = render("- a\n- b\n\n1. x\n2. y", Color::Blue);
        let lines = plain(&text);
        assert!(lines.contains(&"• a".to_string()));
        assert!(lines.contains(&"• b".to_string()));
        assert!(lines.contains(&"1. x".to_string()));
        assert!(lines.contains(&"2. y".to_string()));
    }

    #[test]
    fn tabs_expanded_to_spaces() {
        let text = render("```\n\tindented\n```", Color::Blue);
        assert!(plain(&text).iter().any(|l| l == "│     indented"));
    }
}
