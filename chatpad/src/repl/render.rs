//! Terminal rendering of threads, tasks and replies

use std::io::{self, Write};

use chrono::NaiveDate;
use colored::Colorize;

use crate::chat::{ChatMessage, RevealFrame, RevealSink, Sender};
use crate::planner::PlannerTask;

/// Prints each reveal frame's new text as it arrives
///
/// The first frame overwrites a waiting indicator on the current line.
#[derive(Debug, Default)]
pub struct TerminalReveal {
    started: bool,
}

impl TerminalReveal {
    pub fn started(&self) -> bool {
        self.started
    }
}

impl RevealSink for TerminalReveal {
    fn frame(&mut self, frame: RevealFrame<'_>) {
        if !self.started {
            print!("\r{} ", label(Sender::Bot));
            self.started = true;
        }
        print!("{}", frame.delta);
        let _ = io::stdout().flush();
    }

    fn finish(&mut self) {
        if self.started {
            println!();
        }
    }
}

fn label(sender: Sender) -> colored::ColoredString {
    match sender {
        Sender::You => format!("{sender}:").bright_green(),
        Sender::Bot => format!("{sender}:").bright_blue(),
    }
}

pub fn print_message(message: &ChatMessage) {
    println!("{} {}", label(message.sender), message.text);
}

pub fn print_thread(name: &str, messages: &[ChatMessage]) {
    println!();
    println!("{}", name.bright_cyan());
    if messages.is_empty() {
        println!("{}", "No messages yet.".dimmed());
    }
    for message in messages {
        print_message(message);
    }
    println!();
}

/// Thread listing with the active one marked
pub fn print_threads(names: &[String], active: Option<&str>) {
    if names.is_empty() {
        println!("{}", "No chats yet. Use /new to start one.".dimmed());
        return;
    }

    println!();
    println!("{}", "Chats:".bright_cyan());
    for (i, name) in names.iter().enumerate() {
        if Some(name.as_str()) == active {
            println!("{} {}. {}", "*".bright_green(), i + 1, name.bold());
        } else {
            println!("  {}. {}", i + 1, name);
        }
    }
    println!();
}

/// One listing line for a task
pub fn task_line(position: usize, task: &PlannerTask, today: NaiveDate) -> String {
    let check = if task.done { "[x]" } else { "[ ]" };
    let mut line = format!("{position}. {check} {}", task.text);
    if let Some(due) = task.due {
        line.push_str(&format!(" (due {due})"));
    }
    if task.is_overdue(today) {
        line.push_str(" OVERDUE");
    }
    line
}

pub fn print_tasks(tasks: &[PlannerTask], today: NaiveDate) {
    if tasks.is_empty() {
        println!("{}", "No tasks. Use /add <text> to create one.".dimmed());
        return;
    }

    println!();
    println!("{}", "Planner:".bright_cyan());
    for (i, task) in tasks.iter().enumerate() {
        let line = task_line(i + 1, task, today);
        if task.done {
            println!("  {}", line.dimmed());
        } else if task.is_overdue(today) {
            println!("  {}", line.red());
        } else {
            println!("  {line}");
        }
    }
    let pending = tasks.iter().filter(|t| !t.done).count();
    println!("{}", format!("{pending} of {} pending", tasks.len()).dimmed());
    println!();
}
