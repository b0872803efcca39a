//! Terminal dashboard: shows the todo table and offers add / delete / update forms.
//!
//! Every action goes straight to the API and the table is fetched again
//! afterwards; nothing is cached between renders.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::client::TodoApiClient;
use crate::error::AppError;
use crate::models::{NewTodoRequest, Todo, UpdateTodoRequest};

const MENU: &str = "Commands: [a]dd, [d]elete, [u]pdate, [r]efresh, [q]uit\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Delete,
    Update,
    Refresh,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "a" | "add" => Some(Command::Add),
            "d" | "delete" => Some(Command::Delete),
            "u" | "update" => Some(Command::Update),
            "r" | "refresh" | "" => Some(Command::Refresh),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    Delete,
    Update,
}

impl Action {
    fn success(self) -> &'static str {
        match self {
            Action::Add => "Todo added successfully",
            Action::Delete => "Todo deleted successfully",
            Action::Update => "Todo updated successfully",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            Action::Add => "Failed to add todo",
            Action::Delete => "Failed to delete todo",
            Action::Update => "Failed to update todo",
        }
    }
}

/// The line shown after an action, based on whether the API accepted it.
fn notice<T>(action: Action, result: &Result<T, AppError>) -> String {
    match result {
        Ok(_) => format!("[ok] {}\n", action.success()),
        Err(AppError::Api { status, message }) => {
            format!("[error] {} ({}: {})\n", action.failure(), status, message)
        }
        Err(e) => format!("[error] {} ({})\n", action.failure(), e),
    }
}

/// An empty form field means "leave unchanged".
pub fn optional_field(input: &str) -> Option<String> {
    if input.is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

fn cell(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

/// Renders todos as a bordered text table with Id, Title and Description columns.
pub fn render_table(todos: &[Todo]) -> String {
    let rows: Vec<[String; 3]> = todos
        .iter()
        .map(|t| [t.id.to_string(), cell(&t.title), cell(&t.description)])
        .collect();

    let headers = ["Id", "Title", "Description"];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let separator = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{}+\n", separator);

    let line = |values: [&str; 3]| {
        let cells = values
            .iter()
            .zip(widths.iter())
            .map(|(v, w)| format!(" {:<width$} ", v, width = *w))
            .collect::<Vec<_>>()
            .join("|");
        format!("|{}|\n", cells)
    };

    let mut out = String::new();
    out.push_str(&separator);
    out.push_str(&line(headers));
    out.push_str(&separator);
    for row in &rows {
        out.push_str(&line([&row[0], &row[1], &row[2]]));
    }
    if !rows.is_empty() {
        out.push_str(&separator);
    }
    out
}

enum Flow {
    Continue,
    Quit,
}

pub struct Dashboard<R, W> {
    client: TodoApiClient,
    input: Lines<R>,
    output: W,
}

impl<R, W> Dashboard<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(client: TodoApiClient, input: R, output: W) -> Self {
        Self {
            client,
            input: input.lines(),
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `quit` or end of input.
    pub async fn run(&mut self) -> Result<(), AppError> {
        self.write("My Todo App\n").await?;
        self.refresh().await?;

        loop {
            self.write(MENU).await?;
            let Some(line) = self.prompt("> ").await? else {
                break;
            };

            let flow = match Command::parse(&line) {
                Some(Command::Quit) => Flow::Quit,
                Some(Command::Refresh) => Flow::Continue,
                Some(Command::Add) => self.add_form().await?,
                Some(Command::Delete) => self.delete_form().await?,
                Some(Command::Update) => self.update_form().await?,
                None => {
                    self.write(&format!("Unknown command: {}\n", line.trim())).await?;
                    continue;
                }
            };

            if let Flow::Quit = flow {
                break;
            }
            self.refresh().await?;
        }

        self.output.flush().await?;
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), AppError> {
        let todos = match self.client.list().await {
            Ok(todos) => todos,
            Err(e) => {
                tracing::warn!("failed to fetch todos: {}", e);
                self.write("[error] Failed to fetch todos\n").await?;
                Vec::new()
            }
        };
        let table = render_table(&todos);
        self.write(&table).await
    }

    async fn add_form(&mut self) -> Result<Flow, AppError> {
        let Some(title) = self.prompt("Enter Title: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(description) = self.prompt("Enter Description: ").await? else {
            return Ok(Flow::Quit);
        };

        let req = NewTodoRequest { title, description };
        let result = self.client.create(&req).await;
        self.write(&notice(Action::Add, &result)).await?;
        Ok(Flow::Continue)
    }

    async fn delete_form(&mut self) -> Result<Flow, AppError> {
        let Some(id) = self.prompt("Enter Id to Delete: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(id) = self.parse_id(Action::Delete, &id).await? else {
            return Ok(Flow::Continue);
        };

        let result = self.client.delete(id).await;
        self.write(&notice(Action::Delete, &result)).await?;
        Ok(Flow::Continue)
    }

    async fn update_form(&mut self) -> Result<Flow, AppError> {
        let Some(id) = self.prompt("Enter Id: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(title) = self.prompt("Enter Title To Update (blank keeps it): ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(description) = self
            .prompt("Enter Description To Update (blank keeps it): ")
            .await?
        else {
            return Ok(Flow::Quit);
        };
        let Some(id) = self.parse_id(Action::Update, &id).await? else {
            return Ok(Flow::Continue);
        };

        let req = UpdateTodoRequest {
            title: optional_field(&title),
            description: optional_field(&description),
        };
        let result = self.client.update(id, &req).await;
        self.write(&notice(Action::Update, &result)).await?;
        Ok(Flow::Continue)
    }

    async fn parse_id(&mut self, action: Action, raw: &str) -> Result<Option<i64>, AppError> {
        match raw.trim().parse::<i64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                self.write(&format!(
                    "[error] {} (id must be an integer, got {:?})\n",
                    action.failure(),
                    raw.trim()
                ))
                .await?;
                Ok(None)
            }
        }
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        self.write(label).await?;
        self.output.flush().await?;
        Ok(self.input.next_line().await?)
    }

    async fn write(&mut self, text: &str) -> Result<(), AppError> {
        self.output.write_all(text.as_bytes()).await?;
        Ok(())
    }
}
