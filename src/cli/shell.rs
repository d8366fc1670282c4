//! Interactive shell mode for the news CLI
//!
//! Provides a REPL with command history and tab completion.

use anyhow::Result;
use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Config, Editor, Helper};

use super::{Cli, Commands, OutputOptions};
use crate::app_data;

/// Command completer for the shell
#[derive(Default)]
struct ShellCompleter {
    commands: Vec<(&'static str, Vec<&'static str>)>,
}

impl ShellCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                ("news", vec!["global", "india", "state", "search", "refresh"]),
                ("states", vec!["list", "districts"]),
                ("config", vec!["show", "get", "set", "path"]),
                ("diag", vec!["paths", "check"]),
                ("help", vec![]),
                ("exit", vec![]),
                ("quit", vec![]),
            ],
        }
    }

    fn pairs<'a>(words: impl Iterator<Item = &'a str>) -> Vec<Pair> {
        words
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect()
    }

    /// State names for `news state` and `states districts`
    fn state_candidates(line: &str) -> Option<(usize, Vec<Pair>)> {
        let rest = line
            .strip_prefix("news state ")
            .or_else(|| line.strip_prefix("states districts "))?;
        let start = line.len() - rest.len();

        let candidates = app_data::selectable_states()
            .iter()
            .filter(|state| state.to_lowercase().starts_with(&rest.to_lowercase()))
            .map(|state| {
                let replacement = if state.contains(' ') {
                    format!("\"{}\"", state)
                } else {
                    state.clone()
                };
                Pair {
                    display: state.clone(),
                    replacement,
                }
            })
            .collect();

        Some((start, candidates))
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if let Some(found) = Self::state_candidates(line) {
            return Ok(found);
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let start = line.rfind(' ').map(|i| i + 1).unwrap_or(0);

        match words.as_slice() {
            [] => Ok((0, Self::pairs(self.commands.iter().map(|(cmd, _)| *cmd)))),
            [cmd] if line.ends_with(' ') => {
                let subs = self
                    .commands
                    .iter()
                    .find(|(name, _)| name == cmd)
                    .map(|(_, subs)| Self::pairs(subs.iter().copied()))
                    .unwrap_or_default();
                Ok((pos, subs))
            }
            [prefix] => {
                let names = self
                    .commands
                    .iter()
                    .map(|(cmd, _)| *cmd)
                    .filter(|cmd| cmd.starts_with(prefix));
                Ok((start, Self::pairs(names)))
            }
            [cmd, prefix] if !line.ends_with(' ') => {
                let subs = self
                    .commands
                    .iter()
                    .find(|(name, _)| name == cmd)
                    .map(|(_, subs)| {
                        Self::pairs(subs.iter().copied().filter(|sub| sub.starts_with(prefix)))
                    })
                    .unwrap_or_default();
                Ok((start, subs))
            }
            _ => Ok((pos, vec![])),
        }
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}
impl Helper for ShellCompleter {}

/// Parse a command line into arguments, handling quotes
fn parse_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, ' ') => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// Flags given when the shell was started apply unless a line overrides them
fn merge_options(line: OutputOptions, session: &OutputOptions) -> OutputOptions {
    OutputOptions {
        json: line.json || session.json,
        quiet: line.quiet || session.quiet,
        backend: line.backend.or_else(|| session.backend.clone()),
    }
}

/// Run a single command in the shell.
/// Returns Ok(true) to continue, Ok(false) to exit gracefully.
async fn run_command(args: Vec<String>, session: &OutputOptions) -> Result<bool> {
    let Some(first) = args.first() else {
        return Ok(true);
    };

    // Handle shell built-in commands
    match first.as_str() {
        "help" => {
            print_help();
            return Ok(true);
        }
        "exit" | "quit" => return Ok(false),
        _ => {}
    }

    // Build a fake argv for clap: ["affairs", ...args]
    let argv = std::iter::once("affairs".to_string()).chain(args);

    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(e) => {
            // Print clap's error message (includes usage hints)
            println!("{}", e);
            return Ok(true);
        }
    };

    let options = merge_options(cli.output, session);
    match cli.command {
        None => {
            print_help();
            Ok(true)
        }
        Some(Commands::Shell) => {
            println!("Already in shell mode.");
            Ok(true)
        }
        Some(command) => {
            super::dispatch(command, &options).await?;
            Ok(true)
        }
    }
}

fn print_help() {
    println!(
        r#"Current Affairs Hub Interactive Shell

Commands:
  news global                      Show global news
  news india                       Show India news
  news state <name>                Show news for a state
  news search <query>              Search all news
       [--state <name>] [--category <name>] [--limit <n>]
  news refresh                     Ask the backend to re-fetch, then show global news

  states list                      List states and their district counts
  states districts <name>          List the districts of a state

  config show                      Show current configuration
  config get <key>                 Get a specific setting
  config set <key> <value>         Set a configuration value
  config path                      Show config file path

  diag paths                       Show config and history paths
  diag check                       Check that the backend answers

  help                             Show this help
  exit, quit                       Exit the shell

Flags (can be added to any command):
  --json                           Output in JSON format
  --quiet, -q                      Suppress non-essential output
  --backend <url>                  Use another backend origin
"#
    );
}

/// Get the history file path
pub fn history_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "affairs", "Affairs")
        .map(|dirs| dirs.data_dir().join("shell_history"))
}

/// Run the interactive shell
pub async fn run(session: OutputOptions) -> Result<()> {
    println!("Current Affairs Hub Shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(ShellCompleter::new()));

    // Load history
    if let Some(path) = history_path() {
        let _ = rl.load_history(&path);
    }

    loop {
        match rl.readline("affairs> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                match run_command(parse_args(line), &session).await {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(path) = history_path() {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(&path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_handles_quotes() {
        assert_eq!(
            parse_args(r#"news state "Tamil Nadu" --json"#),
            vec!["news", "state", "Tamil Nadu", "--json"]
        );
        assert_eq!(parse_args("news  search  'NEET exam'"), vec!["news", "search", "NEET exam"]);
        assert!(parse_args("   ").is_empty());
    }

    #[test]
    fn test_merge_options_prefers_line_backend() {
        let session = OutputOptions {
            json: true,
            quiet: false,
            backend: Some("http://session:8001".to_string()),
        };
        let line = OutputOptions {
            json: false,
            quiet: true,
            backend: None,
        };

        let merged = merge_options(line, &session);
        assert!(merged.json);
        assert!(merged.quiet);
        assert_eq!(merged.backend.as_deref(), Some("http://session:8001"));

        let line = OutputOptions {
            json: false,
            quiet: false,
            backend: Some("http://line:9000".to_string()),
        };
        assert_eq!(
            merge_options(line, &session).backend.as_deref(),
            Some("http://line:9000")
        );
    }

    #[test]
    fn test_state_candidates_complete_names() {
        let (start, candidates) = ShellCompleter::state_candidates("news state tam").unwrap();
        assert_eq!(start, "news state ".len());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].display, "Tamil Nadu");
        assert_eq!(candidates[0].replacement, "\"Tamil Nadu\"");

        assert!(ShellCompleter::state_candidates("news global").is_none());
    }

    #[test]
    fn test_shell_args_parse_as_cli() {
        let argv = std::iter::once("affairs".to_string()).chain(parse_args("news state Kerala"));
        let cli = Cli::try_parse_from(argv).unwrap();
        assert!(matches!(cli.command, Some(Commands::News { .. })));
    }
}
