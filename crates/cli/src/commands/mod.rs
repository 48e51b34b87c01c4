//! CLI command implementations.

pub mod migrate;
pub mod resources;
pub mod stores;

use std::fmt::Display;
use std::io::{BufRead, Write};

use serde::Serialize;
use thiserror::Error;

use shop_pilot_cli::{Action, ClientError, Confirmation, Entity, Form, FormError};

/// Errors that end a management command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The API could not be reached or refused a read.
    #[error("{0}")]
    Client(#[from] ClientError),

    /// A submission settled with an error notification.
    #[error("{0}")]
    Rejected(String),

    /// Request body is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Pretty-print a response body to stdout.
pub(crate) fn print_json(value: &impl Serialize) -> Result<(), CommandError> {
    let rendered = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}

/// Run a create or update through a form and report the notification.
pub(crate) async fn submit<T, F>(
    entity: Entity,
    action: Action,
    request: F,
) -> Result<(), CommandError>
where
    T: Serialize,
    F: Future<Output = Result<T, ClientError>>,
{
    let mut form = Form::new(entity);
    match form.submit(action, request).await {
        Ok(result) => report(&form, result),
        // A fresh form is never mid-submission.
        Err(e) => Err(CommandError::Rejected(e.to_string())),
    }
}

/// Ask for confirmation (unless `yes`) and run a delete through a form.
pub(crate) async fn delete<T, F>(
    entity: Entity,
    id: impl Display,
    yes: bool,
    request: F,
) -> Result<(), CommandError>
where
    T: Serialize,
    F: Future<Output = Result<T, ClientError>>,
{
    let confirmation = if yes {
        Confirmation::confirmed()
    } else {
        prompt(&format!("Delete {} {id}? This cannot be undone. [y/N] ", entity.noun))?
    };

    let mut form = Form::new(entity);
    match form.delete(confirmation, request).await {
        Ok(result) => report(&form, result),
        Err(FormError::NotConfirmed) => {
            tracing::info!(entity = entity.noun, %id, "Delete cancelled");
            Ok(())
        }
        Err(e) => Err(CommandError::Rejected(e.to_string())),
    }
}

fn report<T: Serialize>(form: &Form, result: Result<T, ClientError>) -> Result<(), CommandError> {
    let message = form
        .notification()
        .map(ToString::to_string)
        .unwrap_or_default();

    match result {
        Ok(body) => {
            #[allow(clippy::print_stdout)]
            {
                println!("{message}");
            }
            print_json(&body)
        }
        Err(_) => Err(CommandError::Rejected(message)),
    }
}

fn prompt(question: &str) -> Result<Confirmation, CommandError> {
    let mut stdout = std::io::stdout();
    stdout.write_all(question.as_bytes())?;
    stdout.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;

    Ok(Confirmation::from_answer(&answer))
}
