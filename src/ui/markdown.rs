use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

const RULE_WIDTH: usize = 24;

/// Render a markdown reply as plain terminal text.
pub fn render_markdown(input: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let mut writer = TerminalWriter::default();
    for event in Parser::new_ext(input, options) {
        writer.handle_event(event);
    }
    writer.finish()
}

#[derive(Default)]
struct TerminalWriter {
    lines: Vec<String>,
    current: String,
    quote_depth: usize,
    // One entry per open list: `Some(next number)` for ordered lists.
    lists: Vec<Option<u64>>,
    in_code_block: bool,
    link_url: Option<String>,
    heading_level: Option<u8>,
}

impl TerminalWriter {
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.handle_start(tag),
            Event::End(tag) => self.handle_end(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    for line in text.lines() {
                        self.push_line(format!("    {}", line));
                    }
                } else {
                    self.current.push_str(&text);
                }
            }
            Event::Code(code) => {
                self.current.push('`');
                self.current.push_str(&code);
                self.current.push('`');
            }
            Event::SoftBreak => self.current.push(' '),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                self.push_line("─".repeat(RULE_WIDTH));
                self.blank_line();
            }
            _ => {}
        }
    }

    fn handle_start(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_line();
                self.heading_level = Some(level as u8);
            }
            Tag::Link { dest_url, .. } => self.link_url = Some(dest_url.to_string()),
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth += 1;
            }
            Tag::List(start) => {
                self.flush_line();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "- ".to_string(),
                };
                self.current = format!("{}{}", indent, marker);
            }
            _ => {}
        }
    }

    fn handle_end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Heading(_) => {
                let title = std::mem::take(&mut self.current);
                let underline = if self.heading_level.take() == Some(1) { '=' } else { '-' };
                let width = title.chars().count();
                self.push_line(title);
                self.push_line(underline.to_string().repeat(width));
                self.blank_line();
            }
            TagEnd::Link => {
                if let Some(url) = self.link_url.take() {
                    self.current.push_str(&format!(" ({})", url));
                }
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank_line();
            }
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank_line();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush_line(),
            _ => {}
        }
    }

    fn push_line(&mut self, line: String) {
        let prefix = "> ".repeat(self.quote_depth);
        self.lines.push(format!("{}{}", prefix, line));
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            let line = std::mem::take(&mut self.current);
            self.push_line(line);
        }
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn finish(mut self) -> String {
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}
