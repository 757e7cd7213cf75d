//! Line commands understood by the terminal player.

use std::fmt;
use std::path::PathBuf;

use lesson_core::model::{ComponentId, HotspotId, ItemId, OptionId, PairId, ZoneId};
use services::BehaviorKind;
use services::ComponentIntent;
use services::behaviors::{
    CodeEditorIntent, DragDropIntent, FillBlankIntent, FlashcardsIntent, HotspotIntent,
    MatchingIntent, QuizIntent,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    MissingArgument { verb: String, what: &'static str },
    InvalidNumber { raw: String },
    UnknownVerb { kind: BehaviorKind, verb: String },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "empty command"),
            CommandError::MissingArgument { verb, what } => write!(f, "{verb} needs {what}"),
            CommandError::InvalidNumber { raw } => write!(f, "not a number: {raw}"),
            CommandError::UnknownVerb { kind, verb } => {
                write!(f, "{kind} components do not understand '{verb}'")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// A parsed player command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Prev,
    /// 1-based slide number as typed.
    Goto(usize),
    Slides,
    Info,
    Score,
    Show,
    Reset,
    Load(PathBuf),
    Help,
    Quit,
    /// `<component-id> <verb> [args...]`; resolved once the component kind is known.
    Component {
        id: ComponentId,
        verb: String,
        args: Vec<String>,
    },
}

impl Command {
    /// Parse one input line. Global commands win over component ids.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` for blank lines and malformed arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let rest: Vec<String> = words.map(str::to_string).collect();

        let command = match head {
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "goto" | "g" => {
                let raw = first_arg(&rest, head, "a slide number")?;
                Command::Goto(parse_number(raw)?)
            }
            "slides" => Command::Slides,
            "info" => Command::Info,
            "score" => Command::Score,
            "show" | "s" => Command::Show,
            "reset" => Command::Reset,
            "load" => {
                // Paths may contain spaces.
                let path = line.trim_start().strip_prefix(head).unwrap_or("").trim();
                if path.is_empty() {
                    return Err(CommandError::MissingArgument {
                        verb: head.to_string(),
                        what: "a file path",
                    });
                }
                Command::Load(PathBuf::from(path))
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            id => {
                let mut rest = rest.into_iter();
                let Some(verb) = rest.next() else {
                    return Err(CommandError::MissingArgument {
                        verb: id.to_string(),
                        what: "a verb",
                    });
                };
                Command::Component {
                    id: ComponentId::new(id),
                    verb,
                    args: rest.collect(),
                }
            }
        };
        Ok(command)
    }
}

fn first_arg<'a>(args: &'a [String], verb: &str, what: &'static str) -> Result<&'a str, CommandError> {
    args.first()
        .map(String::as_str)
        .ok_or_else(|| CommandError::MissingArgument {
            verb: verb.to_string(),
            what,
        })
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidNumber {
        raw: raw.to_string(),
    })
}

/// Translate a component verb into the intent its behavior accepts.
///
/// # Errors
///
/// Returns `CommandError::UnknownVerb` for verbs the kind does not support,
/// and argument errors for missing or malformed operands.
pub fn intent_for(kind: BehaviorKind, verb: &str, args: &[String]) -> Result<ComponentIntent, CommandError> {
    let arg = |what| first_arg(args, verb, what);
    let unknown = || CommandError::UnknownVerb {
        kind,
        verb: verb.to_string(),
    };

    let intent = match kind {
        BehaviorKind::Quiz => ComponentIntent::Quiz(match verb {
            "select" => QuizIntent::Select(OptionId::new(arg("an option id")?)),
            "submit" => QuizIntent::Submit,
            "next" => QuizIntent::Next,
            "prev" => QuizIntent::Previous,
            "reset" => QuizIntent::Reset,
            _ => return Err(unknown()),
        }),
        BehaviorKind::Flashcards => ComponentIntent::Flashcards(match verb {
            "flip" => FlashcardsIntent::Flip,
            "next" => FlashcardsIntent::Next,
            "prev" => FlashcardsIntent::Previous,
            _ => return Err(unknown()),
        }),
        BehaviorKind::Hotspot => ComponentIntent::Hotspot(match verb {
            "reveal" => HotspotIntent::Reveal(HotspotId::new(arg("a hotspot id")?)),
            "close" => HotspotIntent::Dismiss,
            "reset" => HotspotIntent::Reset,
            "loaded" => {
                let [w, h, c] = args else {
                    return Err(CommandError::MissingArgument {
                        verb: verb.to_string(),
                        what: "width, height and container width",
                    });
                };
                HotspotIntent::ImageLoaded {
                    natural_width: parse_number(w)?,
                    natural_height: parse_number(h)?,
                    container_width: parse_number(c)?,
                }
            }
            _ => return Err(unknown()),
        }),
        BehaviorKind::MatchingPairs => ComponentIntent::Matching(match verb {
            "left" => MatchingIntent::SelectLeft(PairId::new(arg("a pair id")?)),
            "right" => MatchingIntent::SelectRight(PairId::new(arg("a pair id")?)),
            "reset" => MatchingIntent::Reset,
            _ => return Err(unknown()),
        }),
        BehaviorKind::DragDrop => ComponentIntent::DragDrop(match verb {
            "place" => {
                let [item, zone] = args else {
                    return Err(CommandError::MissingArgument {
                        verb: verb.to_string(),
                        what: "an item id and a zone id",
                    });
                };
                DragDropIntent::Place {
                    item: ItemId::new(item.as_str()),
                    zone: ZoneId::new(zone.as_str()),
                }
            }
            "remove" => DragDropIntent::Remove(ItemId::new(arg("an item id")?)),
            "check" => DragDropIntent::Check,
            "reset" => DragDropIntent::Reset,
            _ => return Err(unknown()),
        }),
        BehaviorKind::FillInTheBlank => ComponentIntent::FillBlank(match verb {
            "fill" => {
                let number: usize = parse_number(arg("a blank number")?)?;
                FillBlankIntent::Fill {
                    index: number.saturating_sub(1),
                    value: args[1..].join(" "),
                }
            }
            "submit" => FillBlankIntent::Submit,
            "reset" => FillBlankIntent::Reset,
            _ => return Err(unknown()),
        }),
        BehaviorKind::CodeEditor => ComponentIntent::CodeEditor(match verb {
            // Typed on one line; `\n` stands for a line break.
            "edit" => CodeEditorIntent::Edit(args.join(" ").replace("\\n", "\n")),
            "submit" => CodeEditorIntent::Submit,
            "solution" => CodeEditorIntent::RevealSolution,
            "reset" => CodeEditorIntent::Reset,
            _ => return Err(unknown()),
        }),
        BehaviorKind::ScoreBoard if verb == "tick" => ComponentIntent::Tick,
        _ => return Err(unknown()),
    };
    Ok(intent)
}

pub const HELP: &str = "\
Navigation:
  next | n             next slide
  prev | p             previous slide
  goto | g <N>         jump to slide N
  slides               list slides
  info                 lesson details
  score                current score
  show | s             redraw the current slide
  reset                return to start (unload the lesson)
  load <path>          import a lesson file
  help | ?             this text
  quit | q             leave

Components (<id> <verb> [args]):
  quiz         select <option> | submit | next | prev | reset
  flashcards   flip | next | prev
  hotspot      reveal <id> | close | reset | loaded <w> <h> <container>
  matching     left <pair> | right <pair> | reset
  drag & drop  place <item> <zone> | remove <item> | check | reset
  fill blank   fill <N> <text> | submit | reset
  code editor  edit <code> | submit | solution | reset
  score board  tick";

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn parses_global_commands() {
        assert_eq!(Command::parse("next").unwrap(), Command::Next);
        assert_eq!(Command::parse("  g 3 ").unwrap(), Command::Goto(3));
        assert_eq!(
            Command::parse("load my lessons/intro.json").unwrap(),
            Command::Load(PathBuf::from("my lessons/intro.json"))
        );
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("goto x"),
            Err(CommandError::InvalidNumber {
                raw: "x".to_string()
            })
        );
    }

    #[test]
    fn component_lines_keep_their_arguments() {
        assert_eq!(
            Command::parse("quiz-1 select b").unwrap(),
            Command::Component {
                id: ComponentId::new("quiz-1"),
                verb: "select".to_string(),
                args: vec!["b".to_string()],
            }
        );
        assert!(matches!(
            Command::parse("quiz-1"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn verbs_map_to_intents_by_kind() {
        assert_eq!(
            intent_for(BehaviorKind::Quiz, "select", &words("b")).unwrap(),
            ComponentIntent::Quiz(QuizIntent::Select(OptionId::new("b")))
        );
        assert_eq!(
            intent_for(BehaviorKind::FillInTheBlank, "fill", &words("2 New York")).unwrap(),
            ComponentIntent::FillBlank(FillBlankIntent::Fill {
                index: 1,
                value: "New York".to_string()
            })
        );
        assert_eq!(
            intent_for(BehaviorKind::ScoreBoard, "tick", &[]).unwrap(),
            ComponentIntent::Tick
        );
        assert!(matches!(
            intent_for(BehaviorKind::Paragraph, "flip", &[]),
            Err(CommandError::UnknownVerb { .. })
        ));
        assert!(matches!(
            intent_for(BehaviorKind::DragDrop, "place", &words("only-one")),
            Err(CommandError::MissingArgument { .. })
        ));
    }
}
