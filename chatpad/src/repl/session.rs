//! REPL session management

use std::io::{self, Write};

use chrono::Local;
use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use super::command::{self, ReplCommand, ThreadRef};
use super::render::{self, TerminalReveal};
use crate::session::{Session, SessionError, View};

/// Interactive REPL session
pub struct ReplSession {
    session: Session,
}

impl ReplSession {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&self.prompt());

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let parsed = command::parse(input);
                    if command::keep_in_history(&parsed) {
                        let _ = rl.add_history_entry(input);
                    }

                    let cmd = match parsed {
                        Ok(cmd) => cmd,
                        Err(e) => {
                            println!("{} {}", "?".yellow(), e);
                            println!("Type {} for available commands", "/help".yellow());
                            continue;
                        }
                    };

                    match self.dispatch(cmd).await {
                        SlashResult::Continue => continue,
                        SlashResult::Quit => break,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn prompt(&self) -> String {
        match (self.session.email(), self.session.view()) {
            (None, _) => format!("{} ", ">".bright_green()),
            (Some(_), View::Chat) => format!("{} ", "chat>".bright_green()),
            (Some(_), View::Planner) => format!("{} ", "planner>".bright_magenta()),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "chatpad".bright_cyan().bold());
        println!("Chat with an assistant and keep a to-do list.");
        println!(
            "Use {} or {} to begin, {} for help, {} to quit",
            "/signup".yellow(),
            "/login".yellow(),
            "/help".yellow(),
            "/quit".yellow()
        );
        println!();
    }

    /// Run one command; failures are reported and the loop continues
    async fn dispatch(&mut self, cmd: ReplCommand) -> SlashResult {
        debug!(?cmd, "dispatch: called");
        match cmd {
            ReplCommand::Help => {
                self.print_help();
                SlashResult::Continue
            }
            ReplCommand::Quit => SlashResult::Quit,
            other => {
                if let Err(e) = self.execute(other).await {
                    report(&e);
                }
                SlashResult::Continue
            }
        }
    }

    async fn execute(&mut self, cmd: ReplCommand) -> Result<(), SessionError> {
        match cmd {
            ReplCommand::Signup { email, password } => {
                self.session.signup(&email, &password).await?;
                println!("{}", "Signup successful. You can now /login.".green());
            }
            ReplCommand::Login { email, password } => {
                self.session.login(&email, &password).await?;
                println!("{} {}", "Logged in as".green(), email.trim().bold());
                println!("{}", "Use /new to start a chat or /planner for your tasks.".dimmed());
            }
            ReplCommand::Logout => match self.session.logout() {
                Some(email) => println!("{} {}", "Logged out".dimmed(), email),
                None => println!("{}", "Not logged in.".dimmed()),
            },
            ReplCommand::Whoami => match self.session.email() {
                Some(email) => println!("{} ({} view)", email.bold(), self.session.view()),
                None => println!("{}", "Not logged in.".dimmed()),
            },
            ReplCommand::New => {
                let name = self.session.create_thread().await?;
                self.session.set_view(View::Chat)?;
                println!("{} {}", "Started".green(), name.bright_cyan());
            }
            ReplCommand::Chats => {
                let names = self.session.thread_names().await?;
                render::print_threads(&names, self.session.active_thread());
            }
            ReplCommand::Switch(target) => {
                let name = match target {
                    ThreadRef::Position(n) => self.session.select_thread_at(n).await?,
                    ThreadRef::Name(name) => {
                        self.session.select_thread(&name).await?;
                        name
                    }
                };
                self.session.set_view(View::Chat)?;
                let messages = self.session.active_messages().await?;
                render::print_thread(&name, &messages);
            }
            ReplCommand::History => {
                let messages = self.session.active_messages().await?;
                let name = self.session.active_thread().unwrap_or_default().to_string();
                render::print_thread(&name, &messages);
            }
            ReplCommand::Save => {
                let path = self.session.export_active().await?;
                println!("{} {}", "Saved to".green(), path.display());
            }
            ReplCommand::Retry => {
                self.send_with_reveal(None).await?;
            }
            ReplCommand::View(view) => {
                self.session.set_view(view)?;
                self.show_view().await?;
            }
            ReplCommand::Tasks => {
                let tasks = self.session.tasks().await?;
                render::print_tasks(&tasks, Local::now().date_naive());
            }
            ReplCommand::Add { text, due } => {
                self.session.add_task(&text, due).await?;
                println!("{} {}", "Added".green(), text);
            }
            ReplCommand::Done(position) => {
                let id = self.session.task_id_at(position).await?;
                let done = self.session.toggle_task(id).await?;
                let state = if done { "done" } else { "open" };
                println!("Task {position} marked {state}");
            }
            ReplCommand::Delete(position) => {
                let id = self.session.task_id_at(position).await?;
                let task = self.session.delete_task(id).await?;
                println!("{} {}", "Deleted".green(), task.text);
            }
            ReplCommand::Message(text) => {
                if self.session.is_logged_in() && self.session.view() == View::Planner {
                    println!("{}", "Switch to /chat to send messages, or /add to create a task.".yellow());
                    return Ok(());
                }
                self.send_with_reveal(Some(&text)).await?;
            }
            ReplCommand::Help | ReplCommand::Quit => {}
        }
        Ok(())
    }

    /// Send `prompt`, or retry the last one, revealing the reply
    async fn send_with_reveal(&mut self, prompt: Option<&str>) -> Result<(), SessionError> {
        let mut reveal = TerminalReveal::default();
        print!("{}", "...".dimmed());
        let _ = io::stdout().flush();

        let result = match prompt {
            Some(prompt) => self.session.send(prompt, &mut reveal).await,
            None => self.session.retry(&mut reveal).await,
        };

        if !reveal.started() {
            // Clear the waiting indicator
            print!("\r   \r");
            let _ = io::stdout().flush();
        }
        result.map(|_| ())
    }

    async fn show_view(&self) -> Result<(), SessionError> {
        match self.session.view() {
            View::Chat => match self.session.active_thread() {
                Some(name) => {
                    let messages = self.session.active_messages().await?;
                    render::print_thread(name, &messages);
                }
                None => println!("{}", "Start a new chat to begin.".dimmed()),
            },
            View::Planner => {
                let tasks = self.session.tasks().await?;
                render::print_tasks(&tasks, Local::now().date_naive());
            }
        }
        Ok(())
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Account:".bright_cyan());
        println!("  {:30} Create an account", "/signup <email> <password>".yellow());
        println!("  {:30} Log in", "/login <email> <password>".yellow());
        println!("  {:30} Log out (your chats and tasks are kept)", "/logout".yellow());
        println!("  {:30} Show the logged-in account", "/whoami".yellow());
        println!();
        println!("{}", "Chat:".bright_cyan());
        println!("  {:30} Start a new chat", "/new".yellow());
        println!("  {:30} List chats", "/chats".yellow());
        println!("  {:30} Switch to a chat", "/switch <n|name>".yellow());
        println!("  {:30} Show the active chat", "/history".yellow());
        println!(
            "  {:30} Export the active chat to {}",
            "/save".yellow(),
            self.session.export_dir().display()
        );
        println!("  {:30} Send the last message again", "/retry".yellow());
        println!("  {:30} Any other text is sent as a message", "<text>".yellow());
        println!();
        println!("{}", "Planner:".bright_cyan());
        println!("  {:30} List tasks", "/tasks".yellow());
        println!("  {:30} Add a task", "/add <text> [--due YYYY-MM-DD]".yellow());
        println!("  {:30} Toggle a task done", "/done <n>".yellow());
        println!("  {:30} Delete a task", "/delete <n>".yellow());
        println!();
        println!("{}", "General:".bright_cyan());
        println!("  {:30} Switch view", "/chat, /planner, /view <v>".yellow());
        println!("  {:30} Show this help", "/help".yellow());
        println!("  {:30} Exit", "/quit".yellow());
        println!();
    }
}

fn report(err: &SessionError) {
    match err {
        SessionError::Validation(e) => println!("{} {}", "!".yellow(), e),
        SessionError::Completion(e) => {
            if e.is_transient() {
                println!("{} Something went wrong. Use /retry to try again.", "Error:".red());
            } else {
                println!("{} Something went wrong.", "Error:".red());
            }
            println!("{}", e.to_string().dimmed());
        }
        other => println!("{} {}", "Error:".red(), other),
    }
}

/// Result of handling a command
enum SlashResult {
    Continue,
    Quit,
}
