use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

#[derive(Debug, Serialize, Deserialize)]
struct LoadStatusResponse {
    state: String,
    count: usize,
    source: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BookRow {
    row: usize,
    title: String,
    author_names: String,
    first_publish_year: Option<i32>,
    subject: Option<String>,
    author_birth_date: Option<String>,
    author_top_work: Option<String>,
    rating: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BooksResponse {
    source: String,
    loaded_at: DateTime<Utc>,
    page: usize,
    page_count: usize,
    page_size: usize,
    total: usize,
    can_previous: bool,
    can_next: bool,
    rows: Vec<BookRow>,
}

#[derive(Debug, Default, PartialEq)]
struct ViewArgs {
    page: Option<usize>,
    page_size: Option<usize>,
    sort: Option<String>,
    desc: bool,
}

const DEFAULT_SERVICE_URL: &str = "http://0.0.0.0:7004";
const USAGE: &str =
    "Usage: control-module [--page N] [--page-size N] [--sort COLUMN] [--desc]";

const HEADERS: [(&str, usize); 7] = [
    ("Title", 32),
    ("Author", 22),
    ("Year", 6),
    ("Subject", 18),
    ("Born", 18),
    ("Top work", 24),
    ("Rating", 13),
];

fn parse_args(args: &[String]) -> Result<ViewArgs, String> {
    let mut view = ViewArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--page" | "--page-size" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{} needs a value", arg))?;
                let number: usize = value
                    .parse()
                    .map_err(|_| format!("{} expects a number, got '{}'", arg, value))?;
                if arg == "--page" {
                    view.page = Some(number);
                } else {
                    view.page_size = Some(number);
                }
            }
            "--sort" => {
                let column = iter.next().ok_or("--sort needs a column name")?;
                view.sort = Some(column.clone());
            }
            "--desc" => view.desc = true,
            other => return Err(format!("Unknown argument '{}'", other)),
        }
    }

    Ok(view)
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn render_table(books: &BooksResponse) -> String {
    let mut out = String::new();

    let header: Vec<String> = HEADERS
        .iter()
        .map(|(name, width)| format!("{:<width$}", name, width = *width))
        .collect();
    out.push_str(&format!("{:>4}  {}\n", "#", header.join(" ")));
    out.push_str(&format!(
        "{}\n",
        "-".repeat(6 + HEADERS.iter().map(|(_, w)| w + 1).sum::<usize>())
    ));

    for book in &books.rows {
        let year = book
            .first_publish_year
            .map(|y| y.to_string())
            .unwrap_or_default();
        let cells = [
            book.title.as_str(),
            book.author_names.as_str(),
            year.as_str(),
            book.subject.as_deref().unwrap_or(""),
            book.author_birth_date.as_deref().unwrap_or(""),
            book.author_top_work.as_deref().unwrap_or(""),
            book.rating.as_deref().unwrap_or(""),
        ];
        let line: Vec<String> = cells
            .iter()
            .zip(HEADERS.iter())
            .map(|(cell, (_, width))| format!("{:<width$}", truncate(cell, *width), width = *width))
            .collect();
        out.push_str(&format!("{:>4}  {}\n", book.row, line.join(" ").trim_end()));
    }

    out.push_str(&format!(
        "\nLoaded from {} at {}\n",
        books.source,
        books.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Page {} of {} | {} books | {} per page{}{}\n",
        books.page,
        books.page_count,
        books.total,
        books.page_size,
        if books.can_previous { " | --page to go back" } else { "" },
        if books.can_next { " | more pages available" } else { "" },
    ));

    out
}

struct ControlModule {
    client: Client,
    service_url: String,
}

impl ControlModule {
    fn new(service_url: String) -> Self {
        Self {
            client: Client::new(),
            service_url,
        }
    }

    async fn wait_for_books(&self) -> Result<LoadStatusResponse, Box<dyn std::error::Error>> {
        info!("Waiting for reading list service to be ready...");

        let url = format!("{}/books/status", self.service_url);
        loop {
            match self.client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    let status: LoadStatusResponse = response.json().await?;
                    if status.state == "ready" {
                        info!(
                            "Reading list ready: {} books from {} (loaded {})",
                            status.count,
                            status.source.as_deref().unwrap_or("unknown"),
                            status
                                .loaded_at
                                .map(|at| at.to_rfc3339())
                                .unwrap_or_default()
                        );
                        return Ok(status);
                    }
                    info!("Reading list is {}", status.state);
                }
                Ok(response) => {
                    warn!("Service responded with status: {}", response.status());
                }
                Err(e) => {
                    warn!("Service not ready: {}", e);
                }
            }
            sleep(Duration::from_secs(2)).await;
        }
    }

    async fn fetch_page(
        &self,
        view: &ViewArgs,
    ) -> Result<BooksResponse, Box<dyn std::error::Error>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = view.page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = view.page_size {
            query.push(("page_size", page_size.to_string()));
        }
        if let Some(sort) = &view.sort {
            query.push(("sort", sort.clone()));
            let order = if view.desc { "desc" } else { "asc" };
            query.push(("order", order.to_string()));
        }

        let url = format!("{}/books", self.service_url);
        let response = self.client.get(&url).query(&query).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let error_msg = format!("Failed to fetch books: {}", response.status());
            error!("{}", error_msg);
            Err(error_msg.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("control_module=info")
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let view = match parse_args(&args) {
        Ok(view) => view,
        Err(e) => {
            error!("{}", e);
            info!("{}", USAGE);
            std::process::exit(1);
        }
    };

    let service_url = std::env::var("READING_LIST_SERVICE_URL")
        .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());
    let control = ControlModule::new(service_url);

    control.wait_for_books().await?;
    let books = control.fetch_page(&view).await?;

    print!("{}", render_table(&books));
    Ok(())
}
