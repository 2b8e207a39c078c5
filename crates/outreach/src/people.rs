//! Reached-people commands: paged listing and full export.

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use outreach_client::{ApiClient, Recipient, RecipientQuery, TimeFrame};
use outreach_core::{
    FilterState, IncrementalLoader, PageToken, Pager, RECIPIENT_PAGE_SIZE, SETTLE_PERIOD,
};

/// Page size for the tabular listing, matching the admin screen.
const TABLE_PAGE_SIZE: u32 = 10;

#[derive(clap::Subcommand)]
pub enum Command {
    /// List one page of reached people.
    List(ListArgs),

    /// Walk every page and print one CSV line per person.
    Export(FilterArgs),
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Page to show (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,

    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(clap::Args)]
pub struct FilterArgs {
    /// Search by name, email or phone.
    #[arg(long)]
    search: Option<String>,

    /// Only people reached on or after this date (YYYY-MM-DD).
    #[arg(long, conflicts_with = "time_frame")]
    from_date: Option<NaiveDate>,

    /// Only people reached on or before this date (YYYY-MM-DD).
    #[arg(long, conflicts_with = "time_frame")]
    to_date: Option<NaiveDate>,

    /// Quick date range, mutually exclusive with the explicit dates.
    #[arg(long, value_enum)]
    time_frame: Option<TimeFrameArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TimeFrameArg {
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
}

impl From<TimeFrameArg> for TimeFrame {
    fn from(arg: TimeFrameArg) -> Self {
        match arg {
            TimeFrameArg::Today => Self::Today,
            TimeFrameArg::ThisWeek => Self::ThisWeek,
            TimeFrameArg::ThisMonth => Self::ThisMonth,
            TimeFrameArg::ThisYear => Self::ThisYear,
        }
    }
}

impl FilterArgs {
    /// Builds the effective query through the same filter state the
    /// interactive screens use, so exclusivity rules hold either way.
    fn query(&self) -> RecipientQuery {
        let mut filter = FilterState::new();

        if let Some(search) = &self.search {
            // No keystroke bursts on a CLI: settle immediately.
            let now = Instant::now();
            filter.set_search_input(search.clone(), now);
            filter.poll_settle(now + SETTLE_PERIOD);
        }
        if let Some(frame) = self.time_frame {
            filter.toggle_time_frame(frame.into());
        }
        if self.from_date.is_some() || self.to_date.is_some() {
            filter.set_from_date(self.from_date);
            filter.set_to_date(self.to_date);
        }

        filter.query()
    }
}

pub async fn run(command: Command, client: &ApiClient) -> Result<()> {
    match command {
        Command::List(args) => list(&args, client).await,
        Command::Export(filter) => export(&filter, client).await,
    }
}

async fn list(args: &ListArgs, client: &ApiClient) -> Result<()> {
    let page = client
        .list_recipients(args.page.max(1), TABLE_PAGE_SIZE, &args.filter.query())
        .await
        .context("failed to fetch people")?;

    let mut pager = Pager::new(TABLE_PAGE_SIZE);
    pager.sync(&page);

    for recipient in &page.items {
        print_row(recipient);
    }
    if page.is_empty() {
        println!("No people found");
    }

    if let Some((start, end)) = pager.item_range() {
        println!("\nShowing {start} to {end} of {} entries", pager.total_items());
        println!("{}", token_strip(&pager));
    }

    Ok(())
}

async fn export(filter: &FilterArgs, client: &ApiClient) -> Result<()> {
    let fetcher = client.recipient_pages(filter.query());
    let mut loader: IncrementalLoader<Recipient> = IncrementalLoader::new(RECIPIENT_PAGE_SIZE);

    while loader.has_more() {
        loader
            .load_next(&fetcher)
            .await
            .context("failed to fetch people")?;
    }

    println!("id,name,email,group");
    for recipient in loader.items() {
        println!(
            "{},{},{},{}",
            recipient.id,
            recipient.name,
            recipient.email,
            recipient.group_name.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

fn print_row(recipient: &Recipient) {
    println!(
        "{:<26} {:<30} {:<14} {:<12} {}",
        recipient.name,
        recipient.email,
        recipient.group_name.as_deref().unwrap_or("-"),
        recipient.created_at.format("%Y-%m-%d"),
        if recipient.email_sent { "sent" } else { "not sent" }
    );
}

/// Renders the windowed page strip, e.g. `1 ... 4 [5] 6 ... 9`.
fn token_strip(pager: &Pager) -> String {
    pager
        .page_tokens()
        .iter()
        .map(|token| match token {
            PageToken::Page(n) if *n == pager.current() => format!("[{n}]"),
            PageToken::Page(n) => n.to_string(),
            PageToken::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
