//! Stdin command parsing for headless mode
//!
//! One command per line. Arguments run to the end of the line, so
//! `type SELECT * FROM t` keeps its spaces.

use sqlbench_app::{InputKey, Message};

/// Parse one stdin line.
///
/// `Ok(None)` for blank lines; `Err` carries a message for the user.
pub fn parse_command(line: &str) -> std::result::Result<Option<Message>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match trimmed.split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (trimmed.trim_end(), ""),
    };
    let arg = rest.trim();

    let msg = match verb {
        "problems" => Message::LoadCatalog,
        "open" => Message::OpenProblem {
            id: required(verb, arg)?,
        },
        // The draft is taken verbatim; auto-format is a separate command
        "type" => Message::EditDraft {
            text: rest.to_string(),
        },
        "format" => Message::FormatDraft,
        "run" => Message::RunQuery,
        "grade" => Message::GradeQuery,
        "hint" => Message::ToggleHint,
        "solution" => Message::ShowSolution,
        "next" => Message::NextProblem,
        "back" => Message::CloseProblem,
        "key" => {
            let key = InputKey::parse(arg).ok_or_else(|| format!("Unknown key: {}", arg))?;
            Message::Key(key)
        }
        "suggestor" => Message::OpenSuggestor,
        "actor" => Message::ActorInput {
            text: rest.to_string(),
        },
        "focus" => Message::ActorFocus,
        "blur" => Message::ActorBlur,
        "pick" => {
            let index = required(verb, arg)?
                .parse::<usize>()
                .map_err(|_| format!("pick expects a suggestion number, got '{}'", arg))?;
            Message::SelectActorSuggestion { index }
        }
        "genre" => Message::SetGenre {
            genre: optional(arg),
        },
        "year" => Message::SetYear { year: optional(arg) },
        "search" => Message::SearchMovies,
        "page" => match arg {
            "next" => Message::NextPage,
            "prev" | "previous" => Message::PreviousPage,
            _ => return Err(format!("page expects next or prev, got '{}'", arg)),
        },
        "movie" => Message::OpenMovie {
            id: required(verb, arg)?,
        },
        "cast" => Message::OpenActor {
            id: required(verb, arg)?,
        },
        "close" => Message::CloseDetail,
        "q" | "quit" => Message::Quit,
        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(Some(msg))
}

fn required(verb: &str, arg: &str) -> std::result::Result<String, String> {
    if arg.is_empty() {
        Err(format!("{} expects an argument", verb))
    } else {
        Ok(arg.to_string())
    }
}

/// `-` or nothing clears a filter
fn optional(arg: &str) -> Option<String> {
    match arg {
        "" | "-" => None,
        value => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Message {
        parse_command(line)
            .expect("command should parse")
            .expect("command should not be blank")
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert!(parse_command("").unwrap().is_none());
        assert!(parse_command("   \r\n").unwrap().is_none());
    }

    #[test]
    fn test_type_keeps_text_verbatim() {
        let Message::EditDraft { text } = parse("type SELECT  a ,b FROM t") else {
            panic!("expected EditDraft");
        };
        assert_eq!(text, "SELECT  a ,b FROM t");
    }

    #[test]
    fn test_actor_input_keeps_short_text() {
        let Message::ActorInput { text } = parse("actor T") else {
            panic!("expected ActorInput");
        };
        assert_eq!(text, "T");
        let Message::ActorInput { text } = parse("actor") else {
            panic!("expected ActorInput");
        };
        assert_eq!(text, "");
    }

    #[test]
    fn test_filters_clear_with_dash() {
        assert!(matches!(parse("genre -"), Message::SetGenre { genre: None }));
        assert!(matches!(
            parse("year 1994"),
            Message::SetYear { year: Some(ref y) } if y == "1994"
        ));
    }

    #[test]
    fn test_keys_and_paging() {
        assert!(matches!(parse("key ctrl+enter"), Message::Key(InputKey::CtrlEnter)));
        assert!(matches!(parse("key ctrl+q"), Message::Key(InputKey::CharCtrl('q'))));
        assert!(matches!(parse("page next"), Message::NextPage));
        assert!(matches!(parse("page prev"), Message::PreviousPage));
    }

    #[test]
    fn test_errors() {
        assert!(parse_command("open").is_err());
        assert!(parse_command("pick x").is_err());
        assert!(parse_command("page sideways").is_err());
        assert_eq!(
            parse_command("frob").unwrap_err(),
            "Unknown command: frob"
        );
    }
}
