//! `mimic chat`: type what your interlocutor wrote, pick a suggested reply.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use console::style;
use mimic_runtime::{ReplyGenerator, RuntimeConfig};

use crate::output;

const EXIT_WORDS: &[&str] = &["exit", "quit", "выход"];

pub async fn handle(config: RuntimeConfig, candidates: usize) -> Result<()> {
    let candidates = candidates.max(1);
    let spinner = output::spinner("Connecting to the model");
    let generator = match ReplyGenerator::load(config.provider()?, config.generator_config()).await
    {
        Ok(generator) => {
            output::spinner_success(&spinner, &format!("Using '{}'", config.model));
            generator
        }
        Err(e) => {
            output::spinner_error(&spinner, "Model not available");
            output::dim("Run `mimic check` for instructions on serving the checkpoint.");
            return Err(e.into());
        }
    };

    output::header("Replies in your style");
    output::dim("Enter your interlocutor's messages, one per line. An empty line generates replies.");
    output::dim("Type 'exit' to leave.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!();
        let Some(context) = read_context(&mut lines)? else {
            output::dim("Bye!");
            return Ok(());
        };
        if context.is_empty() {
            continue;
        }

        let spinner = output::spinner("Generating replies");
        let replies = generator
            .candidates(&context, candidates, config.temperature)
            .await;
        spinner.finish_and_clear();

        for (i, reply) in replies.iter().enumerate() {
            println!("  {} {}", style(format!("{}.", i + 1)).cyan().bold(), reply);
        }

        prompt(&format!("Pick the best reply (1-{}) or press Enter to skip: ", replies.len()))?;
        let answer = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        match parse_choice(&answer, replies.len()) {
            Some(index) => {
                output::success(&format!("Selected: {}", replies[index]));
                output::dim("Copy it into your messenger.");
            }
            None => output::dim("Skipped"),
        }
    }
}

/// Messages up to the first blank line. `None` when the user asked to leave or
/// input ended.
fn read_context<B: BufRead>(lines: &mut io::Lines<B>) -> Result<Option<Vec<String>>> {
    let mut context = Vec::new();
    loop {
        prompt("Message: ")?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        let message = line.trim();
        if is_exit(message) {
            return Ok(None);
        }
        if message.is_empty() {
            return Ok(Some(context));
        }
        context.push(message.to_string());
    }
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", style(text).dim());
    io::stdout().flush()?;
    Ok(())
}

fn is_exit(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    EXIT_WORDS.contains(&input.as_str())
}

/// Zero-based index for a 1-based choice in `1..=count`.
fn parse_choice(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(choice) if (1..=count).contains(&choice) => Some(choice - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_exit() {
        assert!(is_exit("exit"));
        assert!(is_exit(" QUIT "));
        assert!(is_exit("Выход"));
        assert!(!is_exit("exit now"));
        assert!(!is_exit(""));
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3 ", 3), Some(2));
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("", 3), None);
        assert_eq!(parse_choice("two", 3), None);
    }

    #[test]
    fn test_read_context_stops_at_blank_line() {
        let input = "hi\n  are you free tonight \n\nnext round\n";
        let mut lines = io::Cursor::new(input).lines();
        let context = read_context(&mut lines).unwrap();
        assert_eq!(
            context,
            Some(vec!["hi".to_string(), "are you free tonight".to_string()])
        );
        assert_eq!(
            read_context(&mut lines).unwrap(),
            None,
            "input ended before a blank line"
        );
    }

    #[test]
    fn test_read_context_exit_and_empty_round() {
        let mut lines = io::Cursor::new("\nhello\nexit\n").lines();
        assert_eq!(read_context(&mut lines).unwrap(), Some(vec![]));
        assert_eq!(read_context(&mut lines).unwrap(), None);
    }
}
