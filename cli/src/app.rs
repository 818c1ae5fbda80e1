//! Interactive front end: reads commands, drives the client, renders.
//!
//! The view is redrawn while requests are in flight and again once they
//! settle. Several `rm`/`toggle` targets are sent on their own threads and
//! settled one by one; the client state itself is only touched here.

use std::io::{BufRead, Write};

use todo_list_core::{
    ApiError, ClientError, HttpRequest, Outcome, TodoListClient, Transport,
};

use crate::command::{Command, HELP};
use crate::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy)]
enum ItemAction {
    Delete,
    Toggle,
}

pub struct App<T> {
    client: TodoListClient,
    transport: T,
}

impl<T: Transport + Sync> App<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoListClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &TodoListClient {
        &self.client
    }

    /// Initial fetch, then one command per input line until `quit` or EOF.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> std::io::Result<()> {
        tracing::info!(base_url = self.client.api().base_url(), "starting");
        self.handle(Command::Refresh, output)?;

        let mut lines = input.lines();
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };
            let command = match Command::parse(&line?) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(output, "{message}")?;
                    continue;
                }
            };
            if self.handle(command, output)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle<W: Write>(&mut self, command: Command, output: &mut W) -> std::io::Result<Flow> {
        let result = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(output, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::SetPlace(place) => {
                self.client.set_place(place);
                Ok(())
            }
            Command::ClearPlace => {
                self.client.clear_place();
                Ok(())
            }
            Command::Refresh => self.refresh(output)?,
            Command::Add(title) => {
                if !self.client.set_draft_title(title) {
                    writeln!(output, "still submitting, input ignored")?;
                }
                self.submit(output)?
            }
            Command::Delete(targets) => {
                self.run_batch(ItemAction::Delete, &targets, output)?;
                Ok(())
            }
            Command::Toggle(targets) => {
                self.run_batch(ItemAction::Toggle, &targets, output)?;
                Ok(())
            }
        };
        report(result, output)?;
        write!(output, "{}", view::render(self.client.state()))?;
        Ok(Flow::Continue)
    }

    fn refresh<W: Write>(&mut self, output: &mut W) -> std::io::Result<Result<(), ClientError>> {
        let request = match self.client.begin_fetch_list() {
            Ok(request) => request,
            Err(err) => return Ok(Err(err)),
        };
        let outcome = self.send(&request, output)?;
        Ok(self.client.finish_fetch_list(outcome))
    }

    /// Submit the draft, as pressing Enter in the input field does.
    fn submit<W: Write>(&mut self, output: &mut W) -> std::io::Result<Result<(), ClientError>> {
        let request = match self.client.begin_submit() {
            Ok(request) => request,
            Err(err) => return Ok(Err(err)),
        };
        let outcome = self.send(&request, output)?;
        Ok(self.client.finish_submit(outcome))
    }

    /// Show the in-flight view, then execute one request.
    fn send<W: Write>(&self, request: &HttpRequest, output: &mut W) -> std::io::Result<Outcome> {
        write!(output, "{}", view::render(self.client.state()))?;
        Ok(self.transport.execute(request))
    }

    /// `#<id>` names an item by id; a bare number is a 1-based row.
    fn resolve(&self, target: &str) -> Result<String, String> {
        if let Some(id) = target.strip_prefix('#') {
            if id.is_empty() {
                return Err("# needs an item id".to_string());
            }
            return Ok(id.to_string());
        }
        let list = self.client.state().list();
        match target.parse::<usize>() {
            Ok(row) if (1..=list.len()).contains(&row) => Ok(list[row - 1].id.clone()),
            _ => Err(format!(
                "{target}: no such row (use 1-{}, or #<id>)",
                list.len()
            )),
        }
    }

    fn run_batch<W: Write>(
        &mut self,
        action: ItemAction,
        targets: &[String],
        output: &mut W,
    ) -> std::io::Result<()> {
        let mut pending = Vec::new();
        for target in targets {
            let id = match self.resolve(target) {
                Ok(id) => id,
                Err(message) => {
                    writeln!(output, "{message}")?;
                    continue;
                }
            };
            let begun = match action {
                ItemAction::Delete => self.client.begin_delete(&id),
                ItemAction::Toggle => self.client.begin_toggle(&id),
            };
            match begun {
                Ok(request) => pending.push((id, request)),
                Err(err) => writeln!(output, "{target}: {err}")?,
            }
        }
        if pending.is_empty() {
            return Ok(());
        }
        write!(output, "{}", view::render(self.client.state()))?;

        let transport = &self.transport;
        let outcomes: Vec<(String, Outcome)> = std::thread::scope(|scope| {
            let handles: Vec<_> = pending
                .into_iter()
                .map(|(id, request)| (id, scope.spawn(move || transport.execute(&request))))
                .collect();
            handles
                .into_iter()
                .map(|(id, handle)| {
                    let outcome = handle.join().unwrap_or_else(|_| {
                        Err(ApiError::Transport("request thread panicked".to_string()))
                    });
                    (id, outcome)
                })
                .collect()
        });

        for (id, outcome) in outcomes {
            let settled = match action {
                ItemAction::Delete => self.client.finish_delete(&id, outcome),
                ItemAction::Toggle => self.client.finish_toggle(&id, outcome),
            };
            report(settled, output)?;
        }
        Ok(())
    }
}

/// Print rejections. Failed round-trips are already shown by the view.
fn report<W: Write>(result: Result<(), ClientError>, output: &mut W) -> std::io::Result<()> {
    match result {
        Ok(()) | Err(ClientError::Api(_)) => Ok(()),
        Err(err) => writeln!(output, "{err}"),
    }
}
