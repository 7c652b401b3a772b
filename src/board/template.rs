//! Markup templates.
//!
//! Templates are compiled once when a board document is loaded. Placeholders:
//!
//! | Placeholder  | Renders                                         |
//! |--------------|-------------------------------------------------|
//! | `{player}`   | the viewer's player index                       |
//! | `{engine}`   | the game class's fragment for the viewer        |
//! | `{own:KEY}`  | the viewer's player-scoped value `KEY.<index>`  |
//! | `{KEY}`      | the board value `KEY`                           |
//!
//! Unset values render as `0`. `{{` and `}}` produce literal braces.

use std::fmt::Write;

use super::state::BoardState;
use crate::core::PlayerIndex;

/// One compiled piece of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Text(String),
    Player,
    Engine,
    Own(String),
    Value(String),
}

/// A compiled markup template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupTemplate {
    segments: Vec<Segment>,
}

impl MarkupTemplate {
    /// Compile a template.
    ///
    /// Returns a message describing the first syntax error.
    pub fn compile(source: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    text.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(format!("unterminated placeholder at offset {pos}"));
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Self::placeholder(name.trim(), pos)?);
                }
                '}' => return Err(format!("unmatched `}}` at offset {pos}")),
                c => text.push(c),
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }

    fn placeholder(name: &str, pos: usize) -> Result<Segment, String> {
        match name {
            "" => Err(format!("empty placeholder at offset {pos}")),
            "player" => Ok(Segment::Player),
            "engine" => Ok(Segment::Engine),
            _ => match name.strip_prefix("own:") {
                Some("") => Err(format!("empty `own:` key at offset {pos}")),
                Some(key) => Ok(Segment::Own(key.to_string())),
                None => Ok(Segment::Value(name.to_string())),
            },
        }
    }

    /// Whether the template splices in the game class's fragment.
    #[must_use]
    pub fn uses_engine(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Engine))
    }

    /// Render for one viewer.
    #[must_use]
    pub fn render(&self, state: &BoardState, player: PlayerIndex, engine: Option<&str>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Player => {
                    let _ = write!(out, "{}", player.index());
                }
                Segment::Engine => out.push_str(engine.unwrap_or_default()),
                Segment::Own(key) => {
                    let _ = write!(out, "{}", state.get_player(player, key, 0));
                }
                Segment::Value(key) => {
                    let _ = write!(out, "{}", state.get(key, 0));
                }
            }
        }
        out
    }
}
