//! Read-eval-print loop over any line source.

use std::io::Write;

use colored::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use pokedex_core::error::Result;
use pokedex_core::traits::CatalogSource;

use crate::command::Command;
use crate::session::{Flow, Session};

pub const PROMPT: &str = "Pokedex > ";

/// Drives `session` until `exit` or end of input.
///
/// Parse and command errors are reported to `out` and the loop continues.
/// Only I/O failures on `input` or `out` end the loop with an error.
pub async fn run<S, R, W>(session: &mut Session<S>, input: R, out: &mut W) -> Result<()>
where
    S: CatalogSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e.to_string().red())?;
                writeln!(out, "Type 'help' to see the available commands.")?;
                continue;
            }
        };

        match session.execute(command, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => {
                debug!(error = ?e, recoverable = e.is_recoverable(), "Command failed");
                writeln!(out, "{} {}", "Error:".red().bold(), e)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{output, session, StaticSource, BASE};

    #[tokio::test]
    async fn test_exit_stops_reading() {
        let mut session = session(StaticSource::default(), 20);
        let mut out = Vec::new();

        run(&mut session, &b"help\nexit\npokedex\n"[..], &mut out)
            .await
            .unwrap();

        let text = output(&out);
        assert!(text.contains("Welcome to the Pokedex!"));
        assert!(!text.contains("Your Pokedex is empty"));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_loop() {
        let mut session = session(StaticSource::default(), 20);
        let mut out = Vec::new();

        run(&mut session, &b"pokedex"[..], &mut out).await.unwrap();

        let text = output(&out);
        assert!(text.contains("Your Pokedex is empty"));
        assert_eq!(text.matches(PROMPT).count(), 2);
    }

    #[tokio::test]
    async fn test_errors_do_not_end_loop() {
        let mut session = session(StaticSource::default(), 20);
        let mut out = Vec::new();

        let input = b"fly\ncatch\n\ninspect mew\nexplore nowhere\npokedex\n";
        run(&mut session, &input[..], &mut out).await.unwrap();

        let text = output(&out);
        assert!(text.contains("Unknown command: fly"));
        assert!(text.contains("catch <pokemon>"));
        assert!(text.contains("Error: You have not caught mew"));
        assert!(text.contains("Error: HTTP error 404"));
        assert!(text.contains("Your Pokedex is empty"));
    }

    #[tokio::test]
    async fn test_paging_through_prompt() {
        let source = StaticSource::default()
            .with(
                &format!("{BASE}location-area/?offset=0&limit=1"),
                r#"{"count": 2, "next": "n", "previous": null, "results": [{"name": "first-area"}]}"#,
            )
            .with(
                &format!("{BASE}location-area/?offset=1&limit=1"),
                r#"{"count": 2, "next": null, "previous": "p", "results": [{"name": "second-area"}]}"#,
            );
        let mut session = session(source, 1);
        let mut out = Vec::new();

        run(&mut session, &b"map\nmap\nmap\nmapb\nexit\n"[..], &mut out)
            .await
            .unwrap();

        let text = output(&out);
        assert!(text.contains("first-area"));
        assert!(text.contains("second-area"));
        assert!(text.contains("last page"));
        assert!(text.contains("(using cached data)"));
        assert_eq!(session.page().offset, 1);
    }
}
