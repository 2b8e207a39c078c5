//! Campaign send command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use outreach_client::ApiClient;
use outreach_core::{Composer, SelectionSet, TargetMode, TemplateLibrary};

use crate::templates::find_template;

#[derive(clap::Args)]
pub struct Args {
    /// Email subject line.
    #[arg(long)]
    subject: Option<String>,

    /// HTML body, inline.
    #[arg(long, conflicts_with = "html_file")]
    html: Option<String>,

    /// HTML body, read from a file.
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// Load subject and body from a saved template first.
    ///
    /// Explicit --subject/--html flags override the loaded values.
    #[arg(long, value_name = "ID")]
    template: Option<String>,

    /// Who receives the campaign.
    #[arg(long, value_enum, default_value_t = ModeArg::All)]
    mode: ModeArg,

    /// Recipient ids for --mode selected, comma separated.
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,

    /// Newcomer window in days for --mode newcomers.
    #[arg(long, default_value_t = 7)]
    days: u32,

    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    All,
    Selected,
    Newcomers,
}

impl From<ModeArg> for TargetMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::All => Self::All,
            ModeArg::Selected => Self::Selected,
            ModeArg::Newcomers => Self::Newcomers,
        }
    }
}

pub async fn run(args: Args, client: &ApiClient) -> Result<()> {
    let mut composer = Composer::new();
    let mut library = TemplateLibrary::new();

    if let Some(id) = &args.template {
        let template = find_template(client, id).await?;
        library.apply(&template, &mut composer.draft);
    }
    if let Some(subject) = args.subject {
        composer.draft.subject = subject;
    }
    if let Some(html) = args.html {
        composer.draft.html = html;
    } else if let Some(path) = &args.html_file {
        composer.draft.html = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    composer.draft.target_mode = args.mode.into();
    composer.draft.set_newcomer_days(args.days);

    let mut selection = SelectionSet::new();
    selection.select_all(args.ids.iter().map(|id| id.trim().to_string()));

    let pending = composer.request_send(&selection)?;
    if !args.yes && !confirm(pending.prompt())? {
        println!("Aborted");
        return Ok(());
    }

    let report = composer.send_confirmed(client, pending, &mut selection).await?;
    println!("{}", report.summary());
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
