//! Transcript rendering: themed, markdown-formatted terminal output.
//!
//! The conversation controller is indifferent to presentation; this module
//! is the collaborator that turns message content into styled text. It
//! covers the markup a chat reply realistically carries: paragraphs,
//! emphasis, code spans and blocks, lists, and headings.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::Deserialize;

use crate::llm::{Message, Role};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";

/// Current color preference. The default mirrors a fresh page load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme; toggling is the only transition.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Accent color for code.
    fn code_color(self) -> &'static str {
        match self {
            Theme::Light => "\x1b[33m",
            Theme::Dark => "\x1b[93m",
        }
    }

    /// Speaker label color per role.
    fn label_color(self, role: Role) -> &'static str {
        match (self, role) {
            (Theme::Light, Role::User) => "\x1b[34m",
            (Theme::Dark, Role::User) => "\x1b[94m",
            (Theme::Light, Role::Assistant) => "\x1b[32m",
            (Theme::Dark, Role::Assistant) => "\x1b[92m",
        }
    }
}

/// Render one turn with its speaker label.
pub fn render_turn(message: &Message, theme: Theme) -> String {
    let label = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    format!(
        "{}{}{}{}{}\n{}",
        theme.label_color(message.role),
        BOLD,
        label,
        RESET,
        ":",
        render_markdown(&message.content, theme)
    )
}

/// Render markdown content as ANSI-styled terminal text.
pub fn render_markdown(content: &str, theme: Theme) -> String {
    let mut out = String::new();
    // One counter per open list; None marks an unordered list.
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => out.push_str("\n\n"),

            Event::Start(Tag::Heading { .. }) => out.push_str(BOLD),
            Event::End(TagEnd::Heading(_)) => {
                out.push_str(RESET);
                out.push_str("\n\n");
            }

            Event::Start(Tag::Strong) => out.push_str(BOLD),
            Event::End(TagEnd::Strong) => out.push_str(RESET),
            Event::Start(Tag::Emphasis) => out.push_str(ITALIC),
            Event::End(TagEnd::Emphasis) => out.push_str(RESET),

            Event::Start(Tag::CodeBlock(_)) => out.push_str(theme.code_color()),
            Event::End(TagEnd::CodeBlock) => {
                out.push_str(RESET);
                out.push('\n');
            }

            Event::Start(Tag::List(start)) => lists.push(start),
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                let depth = lists.len().saturating_sub(1);
                out.push_str(&"  ".repeat(depth));
                match lists.last_mut() {
                    Some(Some(index)) => {
                        out.push_str(&format!("{index}. "));
                        *index += 1;
                    }
                    _ => out.push_str("- "),
                }
            }
            Event::End(TagEnd::Item) => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }

            Event::Text(text) => out.push_str(&text),
            Event::Code(code) => {
                out.push_str(theme.code_color());
                out.push_str(&code);
                out.push_str(RESET);
            }
            Event::SoftBreak | Event::HardBreak => out.push('\n'),

            _ => {}
        }
    }

    out.trim_end().to_string()
}
