//! Template library commands.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use outreach_client::{ApiClient, Template, TemplatePayload};
use outreach_core::{IncrementalLoader, TEMPLATES_PER_PAGE, TemplateLibrary};

#[derive(clap::Subcommand)]
pub enum Command {
    /// List one page of saved templates.
    List {
        /// Page to show (1-based).
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Save a new template.
    Create(TemplateForm),

    /// Edit a saved template. Fields not given keep their current value.
    Update {
        /// Id of the template to edit.
        id: String,

        #[command(flatten)]
        form: PartialForm,
    },

    /// Delete a saved template.
    Delete {
        /// Id of the template to delete.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(clap::Args)]
pub struct TemplateForm {
    /// Template name.
    #[arg(long)]
    name: String,

    /// Email subject line.
    #[arg(long)]
    subject: String,

    /// HTML body, inline.
    #[arg(long, conflicts_with = "html_file")]
    html: Option<String>,

    /// HTML body, read from a file.
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// Optional free-form description.
    #[arg(long, default_value = "")]
    description: String,
}

#[derive(clap::Args)]
pub struct PartialForm {
    /// New template name.
    #[arg(long)]
    name: Option<String>,

    /// New subject line.
    #[arg(long)]
    subject: Option<String>,

    /// New HTML body, inline.
    #[arg(long, conflicts_with = "html_file")]
    html: Option<String>,

    /// New HTML body, read from a file.
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// New description.
    #[arg(long)]
    description: Option<String>,
}

impl TemplateForm {
    fn into_payload(self) -> Result<TemplatePayload> {
        let html = read_html(self.html, self.html_file)?
            .context("provide the body with --html or --html-file")?;
        Ok(TemplatePayload {
            name: self.name,
            subject: self.subject,
            html,
            description: self.description,
        })
    }
}

fn read_html(inline: Option<String>, file: Option<PathBuf>) -> Result<Option<String>> {
    match (inline, file) {
        (Some(html), None) => Ok(Some(html)),
        (None, Some(path)) => {
            let html = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Some(html))
        }
        (None, None) => Ok(None),
        // clap's conflicts_with rejects this before we get here.
        (Some(_), Some(_)) => bail!("--html and --html-file are mutually exclusive"),
    }
}

pub async fn run(command: Command, client: &ApiClient) -> Result<()> {
    match command {
        Command::List { page } => list(page, client).await,
        Command::Create(form) => create(form, client).await,
        Command::Update { id, form } => update(&id, form, client).await,
        Command::Delete { id, yes } => delete(&id, yes, client).await,
    }
}

async fn list(page: u32, client: &ApiClient) -> Result<()> {
    let mut library = TemplateLibrary::new();
    library
        .go_to(client, page)
        .await
        .context("failed to fetch templates")?;

    if library.templates().is_empty() {
        println!("No templates found");
        return Ok(());
    }

    for template in library.templates() {
        println!("{:<26} {:<24} {}", template.id, template.name, template.subject);
    }
    let pager = library.pager();
    println!(
        "\nPage {} of {} ({} templates)",
        pager.current(),
        pager.total_pages(),
        pager.total_items()
    );

    Ok(())
}

async fn create(form: TemplateForm, client: &ApiClient) -> Result<()> {
    let payload = form.into_payload()?;
    let mut library = TemplateLibrary::new();
    let saved = library.save(client, &payload).await?;
    println!("Created template {} ({})", saved.name, saved.id);
    Ok(())
}

async fn update(id: &str, form: PartialForm, client: &ApiClient) -> Result<()> {
    let existing = find_template(client, id).await?;

    let mut library = TemplateLibrary::new();
    let mut payload = library.begin_edit(&existing);
    if let Some(name) = form.name {
        payload.name = name;
    }
    if let Some(subject) = form.subject {
        payload.subject = subject;
    }
    if let Some(html) = read_html(form.html, form.html_file)? {
        payload.html = html;
    }
    if let Some(description) = form.description {
        payload.description = description;
    }

    let saved = library.save(client, &payload).await?;
    println!("Updated template {} ({})", saved.name, saved.id);
    Ok(())
}

async fn delete(id: &str, yes: bool, client: &ApiClient) -> Result<()> {
    let existing = find_template(client, id).await?;
    if !yes && !confirm(&format!("Delete template {}? [y/N] ", existing.name))? {
        println!("Aborted");
        return Ok(());
    }

    let mut library = TemplateLibrary::new();
    library.remove(client, id).await?;
    println!("Deleted template {}", existing.name);
    Ok(())
}

/// Walks the library pages until the template turns up.
pub async fn find_template(client: &ApiClient, id: &str) -> Result<Template> {
    let fetcher = client.template_pages();
    let mut loader: IncrementalLoader<Template> = IncrementalLoader::new(TEMPLATES_PER_PAGE);

    while loader.has_more() {
        loader
            .load_next(&fetcher)
            .await
            .context("failed to fetch templates")?;
        if let Some(found) = loader.items().iter().find(|t| t.id == id) {
            return Ok(found.clone());
        }
    }
    bail!("no template with id {id}")
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
