//! Terminal implementations of the controller's dialogs.

use std::sync::Arc;

use async_trait::async_trait;
use client_core::{Dialog, DialogOutcome, DuplicateName};
use shared::domain::{creation_fields, Address, FieldKind};
use tokio::io::AsyncBufRead;

use crate::prompt::{is_yes, Prompt};

/// Walks every creation field, offering the current value as the default.
/// Returns false when input ran out before the form was finished.
pub async fn fill_form<R>(prompt: &Prompt<R>, address: &mut Address) -> bool
where
    R: AsyncBufRead + Unpin + Send,
{
    println!("(enter keeps the value in brackets, '-' clears it)");
    for field in creation_fields() {
        let label = field.label();
        match field.kind {
            FieldKind::Text => {
                let Some(current) = address.text_field_mut(field.name) else {
                    continue;
                };
                let Some(answer) = prompt.ask(&format!("{label} [{current}]: ")).await else {
                    return false;
                };
                apply_text_answer(current, &answer);
            }
            FieldKind::CheckBox => {
                let shown = if address.send_christmas_card { "y" } else { "n" };
                let Some(answer) = prompt.ask(&format!("{label} (y/n) [{shown}]: ")).await else {
                    return false;
                };
                apply_checkbox_answer(&mut address.send_christmas_card, &answer);
            }
        }
    }
    true
}

pub fn apply_text_answer(current: &mut String, answer: &str) {
    match answer.trim() {
        "" => {}
        "-" => current.clear(),
        value => *current = value.to_string(),
    }
}

pub fn apply_checkbox_answer(current: &mut bool, answer: &str) {
    let answer = answer.trim();
    if answer.is_empty() {
        return;
    }
    if is_yes(answer) {
        *current = true;
    } else if matches!(answer.to_ascii_lowercase().as_str(), "n" | "no") {
        *current = false;
    }
}

pub struct EditForm<R> {
    prompt: Arc<Prompt<R>>,
}

impl<R> EditForm<R> {
    pub fn new(prompt: Arc<Prompt<R>>) -> Self {
        Self { prompt }
    }
}

#[async_trait]
impl<R> Dialog for EditForm<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    type Input = Address;
    type Output = Address;

    async fn open(&self, mut copy: Address) -> DialogOutcome<Address> {
        println!("Editing {}", copy.full_name());
        if !fill_form(&*self.prompt, &mut copy).await {
            return DialogOutcome::Cancelled;
        }
        if self.prompt.confirm("Save changes?").await {
            DialogOutcome::Confirmed(copy)
        } else {
            DialogOutcome::Cancelled
        }
    }
}

pub struct RemoveConfirmation<R> {
    prompt: Arc<Prompt<R>>,
}

impl<R> RemoveConfirmation<R> {
    pub fn new(prompt: Arc<Prompt<R>>) -> Self {
        Self { prompt }
    }
}

#[async_trait]
impl<R> Dialog for RemoveConfirmation<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    type Input = Address;
    type Output = ();

    async fn open(&self, target: Address) -> DialogOutcome<()> {
        let question = format!("Delete {}?", target.full_name());
        if self.prompt.confirm(&question).await {
            DialogOutcome::Confirmed(())
        } else {
            DialogOutcome::Cancelled
        }
    }
}

pub struct DuplicateConfirmation<R> {
    prompt: Arc<Prompt<R>>,
}

impl<R> DuplicateConfirmation<R> {
    pub fn new(prompt: Arc<Prompt<R>>) -> Self {
        Self { prompt }
    }
}

#[async_trait]
impl<R> Dialog for DuplicateConfirmation<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    type Input = DuplicateName;
    type Output = ();

    async fn open(&self, notice: DuplicateName) -> DialogOutcome<()> {
        let question = format!(
            "{} {} is already in the address book. Add another?",
            notice.first_name, notice.last_name
        );
        if self.prompt.confirm(&question).await {
            DialogOutcome::Confirmed(())
        } else {
            DialogOutcome::Cancelled
        }
    }
}

#[cfg(test)]
#[path = "tests/dialogs_tests.rs"]
mod tests;
