//! Interactive command loop over an [`AddressListController`].

use std::sync::Arc;

use client_core::{AddressListController, AddressStore, MutationOutcome};
use shared::domain::{Address, AddressId};
use tokio::io::AsyncBufRead;
use tracing::debug;

use crate::{
    commands::{parse_command, Command, HELP},
    dialogs::{fill_form, DuplicateConfirmation, EditForm, RemoveConfirmation},
    prompt::Prompt,
    render::{address_detail, alert_lines, page_table, pager_footer},
};

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<S, R> {
    controller: AddressListController<S>,
    prompt: Arc<Prompt<R>>,
    edit_form: EditForm<R>,
    remove_confirmation: RemoveConfirmation<R>,
    duplicate_confirmation: DuplicateConfirmation<R>,
}

impl<S, R> Shell<S, R>
where
    S: AddressStore,
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(controller: AddressListController<S>, prompt: Prompt<R>) -> Self {
        let prompt = Arc::new(prompt);
        Self {
            controller,
            edit_form: EditForm::new(Arc::clone(&prompt)),
            remove_confirmation: RemoveConfirmation::new(Arc::clone(&prompt)),
            duplicate_confirmation: DuplicateConfirmation::new(Arc::clone(&prompt)),
            prompt,
        }
    }

    /// Loads the list and reads commands until `quit` or end of input.
    pub async fn run(&mut self) {
        self.controller.load().await;
        self.print_alerts_since(0);
        self.print_page();

        loop {
            let Some(line) = self.prompt.ask("> ").await else {
                break;
            };
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(error) => {
                    println!("{error}");
                    continue;
                }
            };
            debug!(?command, "running command");
            let seen_alerts = self.controller.alerts().len();
            let flow = self.execute(command).await;
            self.print_alerts_since(seen_alerts);
            if let Flow::Quit = flow {
                break;
            }
        }
    }

    async fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::List => self.print_page(),
            Command::Find(query) => {
                self.controller.set_query(query);
                self.print_page();
            }
            Command::Page(page) => {
                if self.controller.set_page(page) {
                    self.print_page();
                } else {
                    println!("there is no page {page}");
                }
            }
            Command::Next => {
                if self.controller.next_page() {
                    self.print_page();
                } else {
                    println!("already on the last page");
                }
            }
            Command::Previous => {
                if self.controller.previous_page() {
                    self.print_page();
                } else {
                    println!("already on the first page");
                }
            }
            Command::New => self.create().await,
            Command::Show(row) => {
                if let Some(address) = self.row(row) {
                    print!("{}", address_detail(address));
                }
            }
            Command::Edit(row) => {
                if let Some(id) = self.row_id(row) {
                    let outcome = self.controller.edit(&id, &self.edit_form).await;
                    self.report(outcome, "saved");
                }
            }
            Command::Remove(row) => {
                if let Some(id) = self.row_id(row) {
                    let outcome = self
                        .controller
                        .remove(&id, &self.remove_confirmation)
                        .await;
                    self.report(outcome, "deleted");
                }
            }
            Command::Map(row) => {
                if let Some(address) = self.row(row) {
                    println!("{}", self.controller.show_map(address));
                }
            }
            Command::Alerts => {
                if self.controller.alerts().is_empty() {
                    println!("no alerts");
                } else {
                    print!("{}", alert_lines(self.controller.alerts(), 0));
                }
            }
            Command::Dismiss(index) => {
                if self.controller.dismiss_alert(index - 1).is_none() {
                    println!("there is no alert {index}");
                }
            }
            Command::Reload => {
                if self.controller.load().await {
                    self.print_page();
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    async fn create(&mut self) {
        let mut fields = self.controller.draft().fields().clone();
        if !fill_form(&*self.prompt, &mut fields).await {
            return;
        }
        *self.controller.draft_mut().fields_mut() = fields;
        if !self.prompt.confirm("Add this address?").await {
            println!("kept as draft");
            return;
        }
        let outcome = self.controller.create(&self.duplicate_confirmation).await;
        self.report(outcome, "added");
    }

    fn row(&self, row: usize) -> Option<&Address> {
        let items = self.controller.current_page_items();
        match items.get(row.wrapping_sub(1)) {
            Some(address) => Some(*address),
            None => {
                println!("there is no row {row} on this page");
                None
            }
        }
    }

    fn row_id(&self, row: usize) -> Option<AddressId> {
        self.row(row).and_then(|address| address.id.clone())
    }

    fn report(&self, outcome: MutationOutcome, done: &str) {
        match outcome {
            MutationOutcome::Committed => {
                println!("{done}");
                self.print_page();
            }
            MutationOutcome::Cancelled => println!("cancelled"),
            MutationOutcome::Rejected => {}
            MutationOutcome::Missing => println!("that address is no longer in the list"),
        }
    }

    fn print_page(&self) {
        print!("{}", page_table(&self.controller.current_page_items()));
        println!("{}", pager_footer(self.controller.pager()));
    }

    fn print_alerts_since(&self, seen: usize) {
        let alerts = self.controller.alerts();
        if alerts.len() > seen {
            print!("{}", alert_lines(&alerts[seen..], seen));
        }
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
