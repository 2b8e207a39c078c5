//! Reusable email template library.

use outreach_client::{ApiClient, Page, PageFetcher, Template, TemplatePayload};
use tracing::debug;

use crate::campaign::CampaignDraft;
use crate::error::{Result, ValidationError};
use crate::pagination::Pager;

/// Templates shown per library page.
pub const TEMPLATES_PER_PAGE: u32 = 10;

/// Paginated CRUD over stored templates, plus "load into composer".
#[derive(Debug)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
    pager: Pager,
    active: Option<String>,
    editing: Option<String>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateLibrary {
    /// Creates an empty library positioned on page 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            templates: Vec::new(),
            pager: Pager::new(TEMPLATES_PER_PAGE),
            active: None,
            editing: None,
        }
    }

    /// Templates on the current page.
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Page navigation state for the list.
    #[must_use]
    pub const fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Id of the template last applied to the composer, for highlighting.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Returns true if the given template is the one last applied.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    /// Id of the template currently being edited, if any.
    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Replaces the current page with a freshly fetched one.
    fn adopt(&mut self, page: Page<Template>) {
        self.pager.sync(&page);
        self.templates = page.items;
    }

    /// Reloads the current page from the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; the previous page is kept.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<()> {
        let page = client
            .template_pages()
            .fetch_page(self.pager.current(), TEMPLATES_PER_PAGE)
            .await?;
        self.adopt(page);
        Ok(())
    }

    /// Loads the given page from the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; the previous page is kept.
    pub async fn go_to(&mut self, client: &ApiClient, page: u32) -> Result<()> {
        let page = client
            .template_pages()
            .fetch_page(page.max(1), TEMPLATES_PER_PAGE)
            .await?;
        self.adopt(page);
        Ok(())
    }

    /// Starts editing a template, returning the prefilled form payload.
    pub fn begin_edit(&mut self, template: &Template) -> TemplatePayload {
        self.editing = Some(template.id.clone());
        TemplatePayload {
            name: template.name.clone(),
            subject: template.subject.clone(),
            html: template.html.clone(),
            description: template.description.clone().unwrap_or_default(),
        }
    }

    /// Abandons the edit in progress.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Creates a new template, or updates the one being edited.
    ///
    /// On success the edit marker is cleared and the current page reloaded.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompleteTemplate`] before any request
    /// when a required field is blank, or the request error otherwise.
    pub async fn save(&mut self, client: &ApiClient, payload: &TemplatePayload) -> Result<Template> {
        if !payload.is_complete() {
            return Err(ValidationError::IncompleteTemplate.into());
        }

        let saved = match self.editing.take() {
            Some(id) => client.update_template(&id, payload).await?,
            None => client.create_template(payload).await?,
        };
        debug!(id = %saved.id, name = %saved.name, "template saved");

        self.refresh(client).await?;
        Ok(saved)
    }

    /// Deletes a template and reloads the current page.
    ///
    /// Deleting the active template clears the active marker; the composer
    /// draft is untouched (applying never created a binding).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete or the reload fails.
    pub async fn remove(&mut self, client: &ApiClient, id: &str) -> Result<()> {
        client.delete_template(id).await?;
        self.forget(id);
        self.refresh(client).await
    }

    fn forget(&mut self, id: &str) {
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
    }

    /// Copies a template's subject and body into the composer draft.
    ///
    /// Records the template as active for highlighting only; later edits to
    /// the draft never flow back into the stored template.
    pub fn apply(&mut self, template: &Template, draft: &mut CampaignDraft) {
        draft.subject.clone_from(&template.subject);
        draft.html.clone_from(&template.html);
        self.active = Some(template.id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str) -> Template {
        Template {
            id: id.to_string(),
            name: "Welcome".to_string(),
            subject: "Welcome aboard".to_string(),
            html: "<p>Hello!</p>".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_apply_copies_fields_and_marks_active() {
        let mut library = TemplateLibrary::new();
        let mut draft = CampaignDraft::default();

        library.apply(&template("t1"), &mut draft);

        assert_eq!(draft.subject, "Welcome aboard");
        assert_eq!(draft.html, "<p>Hello!</p>");
        assert!(library.is_active("t1"));
    }

    #[test]
    fn test_editing_the_draft_leaves_no_binding() {
        let mut library = TemplateLibrary::new();
        let mut draft = CampaignDraft::default();
        let stored = template("t1");

        library.apply(&stored, &mut draft);
        draft.subject.push_str(" (August edition)");

        // The stored template is what it always was.
        assert_eq!(stored.subject, "Welcome aboard");
        assert!(library.is_active("t1"));
    }

    #[test]
    fn test_removing_active_template_clears_marker() {
        let mut library = TemplateLibrary::new();
        let mut draft = CampaignDraft::default();
        library.apply(&template("t1"), &mut draft);

        library.forget("t1");
        assert!(library.active_id().is_none());

        // Removing some other template leaves the marker alone.
        library.apply(&template("t2"), &mut draft);
        library.forget("t1");
        assert!(library.is_active("t2"));
    }

    #[test]
    fn test_begin_edit_prefills_the_form() {
        let mut library = TemplateLibrary::new();
        let payload = library.begin_edit(&template("t1"));

        assert_eq!(library.editing_id(), Some("t1"));
        assert_eq!(payload.name, "Welcome");
        assert_eq!(payload.description, "");

        library.cancel_edit();
        assert!(library.editing_id().is_none());
    }

    #[test]
    fn test_adopt_replaces_page_and_syncs_pager() {
        let mut library = TemplateLibrary::new();
        library.adopt(Page {
            items: vec![template("t1"), template("t2")],
            number: 2,
            total_pages: 3,
            total_items: 25,
        });

        assert_eq!(library.templates().len(), 2);
        assert_eq!(library.pager().current(), 2);
        assert_eq!(library.pager().total_items(), 25);
    }
}
