use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::select;
use tracing::info;

use crate::{
    api::CoinGeckoClient,
    config::AppConfig,
    interpreter::CommandInterpreter,
    models::{ConversationMessage, Role},
};

const HELP_TEXT: &str = "Available commands:
  /history - Show the conversation so far
  /clear   - Start a new conversation
  /help    - Show this help
  /quit    - Leave the chat
Anything else is sent to the assistant.";

/// What a line of terminal input turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Reply(String),
    History,
    Cleared,
    Help,
    UnknownCommand(String),
    Empty,
    Quit,
}

/// Terminal chat session: the interpreter plus the visible transcript.
pub struct AssistantSystem {
    interpreter: CommandInterpreter,
    transcript: Vec<ConversationMessage>,
}

impl AssistantSystem {
    pub fn new(interpreter: CommandInterpreter) -> Self {
        Self {
            interpreter,
            transcript: vec![ConversationMessage::welcome()],
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = CoinGeckoClient::from_config(config)?;
        Ok(Self::new(CommandInterpreter::new(Arc::new(client))))
    }

    pub fn transcript(&self) -> &[ConversationMessage] {
        &self.transcript
    }

    /// Record the user's turn, answer it, record the answer.
    pub async fn ask(&mut self, command: &str) -> String {
        self.transcript.push(ConversationMessage::user(command));
        let result = self.interpreter.interpret_with_diagnostics(command).await;
        info!(intent = %result.intent, degraded = result.failure.is_some(), "answered chat turn");

        self.transcript
            .push(ConversationMessage::assistant(result.response.clone()));
        result.response
    }

    pub async fn handle_command(&mut self, line: &str) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Empty;
        }

        match line {
            "/quit" | "/exit" => LineOutcome::Quit,
            "/history" => LineOutcome::History,
            "/help" => LineOutcome::Help,
            "/clear" => {
                self.transcript = vec![ConversationMessage::welcome()];
                LineOutcome::Cleared
            }
            other if other.starts_with('/') => LineOutcome::UnknownCommand(other.to_string()),
            command => LineOutcome::Reply(self.ask(command).await),
        }
    }

    fn print_message(message: &ConversationMessage) {
        match message.role {
            Role::User => println!("{} {}", "you:".green().bold(), message.content),
            Role::Assistant => println!("{} {}", "assistant:".cyan().bold(), message.content),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("\n{}", "🪙 Crypto Assistant".bold());
        println!("{}", HELP_TEXT.dimmed());
        println!("Press Ctrl+C to exit\n");
        if let Some(welcome) = self.transcript.first() {
            Self::print_message(welcome);
        }

        let stdin = BufReader::new(io::stdin());
        let mut lines = stdin.lines();

        loop {
            print!("\n{} ", ">".green().bold());
            std::io::stdout().flush()?;

            let line = select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => None,
            };
            let Some(line) = line else {
                println!();
                break;
            };

            match self.handle_command(&line).await {
                LineOutcome::Reply(reply) => println!("{} {}", "assistant:".cyan().bold(), reply),
                LineOutcome::History => {
                    for message in &self.transcript {
                        Self::print_message(message);
                    }
                }
                LineOutcome::Cleared => println!("{}", "Conversation cleared.".yellow()),
                LineOutcome::Help => println!("{}", HELP_TEXT),
                LineOutcome::UnknownCommand(command) => {
                    println!("{} {}", "Unknown command:".red(), command);
                    println!("{}", HELP_TEXT);
                }
                LineOutcome::Empty => {}
                LineOutcome::Quit => break,
            }
        }

        info!("chat session ended after {} messages", self.transcript.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::FixedSelector;
    use crate::models::WELCOME_MESSAGE;
    use crate::testing::StaticSource;

    fn system() -> AssistantSystem {
        AssistantSystem::new(
            CommandInterpreter::new(Arc::new(StaticSource::healthy()))
                .with_selector(Arc::new(FixedSelector(0))),
        )
    }

    #[test]
    fn transcript_starts_with_welcome() {
        let system = system();
        assert_eq!(system.transcript().len(), 1);
        assert_eq!(system.transcript()[0].id, "welcome");
        assert_eq!(system.transcript()[0].content, WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn each_question_adds_two_messages() {
        let mut system = system();
        let reply = system.ask("price of bitcoin").await;

        let transcript = system.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, Role::User);
        assert_eq!(transcript[1].content, "price of bitcoin");
        assert_eq!(transcript[2].role, Role::Assistant);
        assert_eq!(transcript[2].content, reply);
        assert_ne!(transcript[1].id, transcript[2].id);
    }

    #[tokio::test]
    async fn slash_commands_do_not_reach_the_interpreter() {
        let mut system = system();

        assert_eq!(system.handle_command("   ").await, LineOutcome::Empty);
        assert_eq!(system.handle_command("/history").await, LineOutcome::History);
        assert_eq!(system.handle_command("/help").await, LineOutcome::Help);
        assert_eq!(
            system.handle_command("/dance").await,
            LineOutcome::UnknownCommand("/dance".into())
        );
        assert_eq!(system.handle_command("/quit").await, LineOutcome::Quit);
        assert_eq!(system.transcript().len(), 1);
    }

    #[tokio::test]
    async fn clear_resets_to_welcome() {
        let mut system = system();
        system.handle_command("hello").await;
        assert_eq!(system.transcript().len(), 3);

        assert_eq!(system.handle_command("/clear").await, LineOutcome::Cleared);
        assert_eq!(system.transcript().len(), 1);
        assert_eq!(system.transcript()[0].id, "welcome");
    }
}
