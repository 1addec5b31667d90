//! Interactive presentation layer.
//!
//! A line-oriented front end that plays the role the widget toolkit played
//! in the desktop version: it prompts for input, hands one intent at a time
//! to the [`Controller`], and reprints the whole task list after each one.
//! Recoverable errors are shown to the user; storage failures abort the
//! session.

use crate::controller::{Controller, Outcome};
use crate::error::AppError;
use crate::types::{NewTask, Priority};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::info;

const HELP: &str = "\
Commands:
  list                 show all tasks (with the current filter)
  add                  add a task (prompts for fields)
  select <row>         select the task at the given row (1-based)
  update               overwrite the selected task's fields
  delete               delete the selected task
  done                 mark the selected task completed
  filter               set a filter (priority:<v>, due:<v>, status:<v>; empty clears)
  help                 show this help
  quit                 exit";

/// Run the interactive loop until EOF or `quit`.
pub fn run(mut controller: Controller) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    info!("interactive session started");

    print_list(&mut controller)?;

    loop {
        let Some(line) = prompt(&mut input, "> ")? else {
            break;
        };

        let line = line.trim();
        let (cmd, arg) = match line.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        let result = match cmd {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "?" => {
                println!("{HELP}");
                continue;
            }
            "list" => print_list(&mut controller),
            "add" => add_task(&mut input, &mut controller),
            "select" => select_row(&mut controller, arg),
            "update" => update_task(&mut input, &mut controller),
            "delete" => delete_task(&mut controller),
            "done" => complete_task(&mut controller),
            "filter" => set_filter(&mut input, &mut controller),
            other => {
                println!("Unknown command '{other}' (try 'help')");
                continue;
            }
        };

        if let Err(err) = result {
            if err.is_fatal() {
                // Storage failure: unrecoverable for this session.
                return Err(err.into());
            }
            println!("Error: {err}");
        }
    }

    info!("interactive session ended");
    Ok(())
}

/// Read one line after printing a prompt. `None` means EOF.
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}

fn print_list(controller: &mut Controller) -> Result<(), AppError> {
    let lines = controller.reload()?;
    if lines.is_empty() {
        println!("(no tasks)");
        return Ok(());
    }
    for (row, line) in lines.iter().enumerate() {
        println!("{:>3}. {}", row + 1, line);
    }
    Ok(())
}

/// Collect the three task fields. A blank description cancels the intent.
fn prompt_fields(input: &mut impl BufRead) -> Result<NewTask, AppError> {
    let description = prompt(input, "Description: ")
        .map_err(AppError::internal)?
        .unwrap_or_default();
    if description.trim().is_empty() {
        return Ok(NewTask::default());
    }

    let priority_text = prompt(input, "Priority (High, Medium, Low; empty for none): ")
        .map_err(AppError::internal)?
        .unwrap_or_default();
    let priority = Priority::from_str(&priority_text);
    if priority.is_none() && !priority_text.trim().is_empty() {
        println!("Unrecognized priority '{}', leaving unset", priority_text.trim());
    }
    let due_date = prompt(input, "Due date (YYYY-MM-DD; empty for none): ")
        .map_err(AppError::internal)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(NewTask::new(description, priority, due_date))
}

fn add_task(input: &mut impl BufRead, controller: &mut Controller) -> Result<(), AppError> {
    let fields = prompt_fields(input)?;
    match controller.add_task(fields)? {
        Outcome::Ignored => Ok(()),
        _ => print_list(controller),
    }
}

fn select_row(controller: &mut Controller, arg: &str) -> Result<(), AppError> {
    let Ok(row @ 1..) = arg.parse::<usize>() else {
        println!("'{arg}' is not a row number (rows are numbered from 1)");
        return Ok(());
    };
    let id = controller.select_row(row - 1)?;
    println!("Selected task {id}");
    Ok(())
}

fn update_task(input: &mut impl BufRead, controller: &mut Controller) -> Result<(), AppError> {
    if controller.selection().is_none() {
        println!("Nothing selected");
        return Ok(());
    }
    let fields = prompt_fields(input)?;
    match controller.update_selected(fields)? {
        Outcome::NoSelection => {
            println!("Nothing selected");
            Ok(())
        }
        Outcome::Ignored => Ok(()),
        Outcome::Applied => print_list(controller),
    }
}

fn delete_task(controller: &mut Controller) -> Result<(), AppError> {
    match controller.delete_selected()? {
        Outcome::NoSelection => {
            println!("Nothing selected");
            Ok(())
        }
        _ => print_list(controller),
    }
}

fn complete_task(controller: &mut Controller) -> Result<(), AppError> {
    match controller.complete_selected()? {
        Outcome::NoSelection => {
            println!("Nothing selected");
            Ok(())
        }
        _ => print_list(controller),
    }
}

fn set_filter(input: &mut impl BufRead, controller: &mut Controller) -> Result<(), AppError> {
    let text = prompt(input, "Filter (priority:<v>, due:<v>, status:<v>; empty clears): ")
        .map_err(AppError::internal)?
        .unwrap_or_default();
    controller.set_filter(&text)?;
    print_list(controller)
}
