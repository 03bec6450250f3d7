//! Paginated, searchable list views
//!
//! A [`ListView`] owns the screen state of one collection: the current page,
//! the search box and its debounced value, the last page fetched, the open
//! form dialog and the error/success banners. Rendering produces a
//! [`ListScreen`] snapshot; turning that into text is the output layer's job.

use std::time::Duration;

use log::{debug, warn};

use super::debounce::Debouncer;
use super::form::{FormDialog, FormMode, Submission};
use crate::auth::Principal;
use crate::client::api::ResourceApi;
use crate::client::pagination::{DEFAULT_PAGE_SIZE, ListQuery, Page, SortOrder};
use crate::error::{ApiError, AuthError, Error, Result};
use crate::view::form::FormResource;

/// Mutating actions a screen may offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Edit,
    Delete,
}

/// Pagination control state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: usize,
    pub total: usize,
    pub total_items: Option<usize>,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }
}

/// What a list view shows at a point in time
#[derive(Debug)]
pub struct ListScreen<'v, R> {
    pub title: &'static str,
    pub rows: &'v [R],
    pub pagination: Pagination,
    pub actions: &'static [Action],
    pub search: &'v str,
    pub error: Option<&'v str>,
    pub success: Option<&'v str>,
}

const MANAGE_ACTIONS: &[Action] = &[Action::Create, Action::Edit, Action::Delete];

/// List screen for collection `R` backed by client `C`
pub struct ListView<'a, R: FormResource, C: ResourceApi> {
    client: &'a C,
    page: usize,
    page_size: usize,
    search: String,
    applied_search: String,
    debouncer: Debouncer<String>,
    sort: Option<(String, SortOrder)>,
    data: Option<Page<R>>,
    dialog: Option<FormDialog<R>>,
    selected: Option<R>,
    error: Option<String>,
    success: Option<String>,
    can_manage: bool,
}

impl<'a, R: FormResource, C: ResourceApi> ListView<'a, R, C> {
    /// A view whose mutating actions are enabled only when `can_manage`.
    pub fn new(client: &'a C, can_manage: bool) -> Self {
        Self {
            client,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            applied_search: String::new(),
            debouncer: Debouncer::default(),
            sort: R::DEFAULT_SORT.map(|(field, order)| (field.to_string(), order)),
            data: None,
            dialog: None,
            selected: None,
            error: None,
            success: None,
            can_manage,
        }
    }

    /// A view for a signed-in user; admins may manage the collection.
    pub fn for_principal(client: &'a C, principal: &Principal) -> Self {
        Self::new(client, principal.is_admin)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    /// Order by `field` instead of the collection's default ordering.
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    /// Start on `page` (1-based) instead of the first page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Start with `term` already applied, skipping the quiet period.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = term.clone();
        self.applied_search = term;
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn data(&self) -> Option<&Page<R>> {
        self.data.as_ref()
    }

    pub fn items(&self) -> &[R] {
        self.data.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn can_manage(&self) -> bool {
        self.can_manage
    }

    pub fn applied_search(&self) -> &str {
        &self.applied_search
    }

    /// Query for the current page and applied search.
    pub fn query(&self) -> ListQuery {
        let mut query = ListQuery::new()
            .page(self.page)
            .limit(self.page_size)
            .search(self.applied_search.clone(), R::SEARCH_FIELD);
        if let Some((field, order)) = &self.sort {
            query = query.sort(field.clone(), *order);
        }
        query
    }

    /// Fetch the current page.
    ///
    /// On failure the previous page stays on screen, the error banner is set
    /// and the error is returned to the caller.
    pub async fn refresh(&mut self) -> Result<()> {
        let query = self.query();
        debug!("Loading {} page {}", R::NOUN_PLURAL, query.page);
        match self.client.list::<R>(&query).await {
            Ok(page) => {
                self.data = Some(page);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load {}: {}", R::NOUN_PLURAL, e);
                self.error = Some(format!("Could not load {}.", R::NOUN_PLURAL));
                Err(e)
            }
        }
    }

    /// Jump to `page` and refetch.
    pub async fn set_page(&mut self, page: usize) -> Result<()> {
        let last = self.pagination().total;
        self.page = page.clamp(1, last.max(1));
        self.refresh().await
    }

    pub async fn next_page(&mut self) -> Result<()> {
        self.set_page(self.page + 1).await
    }

    pub async fn prev_page(&mut self) -> Result<()> {
        self.set_page(self.page.saturating_sub(1)).await
    }

    /// Record a keystroke in the search box. Nothing is fetched until the
    /// input has been quiet for the debounce period.
    pub fn input_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.search = text.clone();
        self.debouncer.push(text);
    }

    /// Apply the search term if its quiet period has elapsed.
    ///
    /// Returns whether a fetch was made.
    pub async fn poll_search(&mut self) -> Result<bool> {
        match self.debouncer.take_ready() {
            Some(term) => self.apply_search(term).await,
            None => Ok(false),
        }
    }

    /// Wait for the search box to go quiet, then apply its term.
    pub async fn settle_search(&mut self) -> Result<bool> {
        match self.debouncer.settled().await {
            Some(term) => self.apply_search(term).await,
            None => Ok(false),
        }
    }

    async fn apply_search(&mut self, term: String) -> Result<bool> {
        if term == self.applied_search {
            return Ok(false);
        }
        self.applied_search = term;
        self.page = 1;
        self.refresh().await?;
        Ok(true)
    }

    /// Refuse `verb` locally unless the viewer may manage the collection.
    pub fn require_manage(&self, verb: &str) -> Result<()> {
        if self.can_manage {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied {
                action: format!("{} {}", verb, R::NOUN_PLURAL),
            }
            .into())
        }
    }

    /// Open an empty create dialog.
    pub fn open_create(&mut self) -> Result<&mut FormDialog<R>> {
        self.require_manage("create")?;
        self.selected = None;
        self.success = None;
        Ok(self.dialog.insert(FormDialog::create()))
    }

    /// Open the edit dialog prefilled from `item`.
    pub fn open_edit(&mut self, item: R) -> Result<&mut FormDialog<R>> {
        self.require_manage("edit")?;
        self.success = None;
        let dialog = FormDialog::edit(&item);
        self.selected = Some(item);
        Ok(self.dialog.insert(dialog))
    }

    pub fn dialog(&self) -> Option<&FormDialog<R>> {
        self.dialog.as_ref()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn selected(&self) -> Option<&R> {
        self.selected.as_ref()
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.selected = None;
    }

    /// Validate the open dialog and send it.
    ///
    /// On success the dialog closes, the list is refetched and the success
    /// banner set. On failure the dialog stays open and the error banner
    /// carries the server's message.
    pub async fn submit(&mut self) -> Result<R> {
        let Some(dialog) = self.dialog.as_ref() else {
            return Err(Error::Other("No form is open".to_string()));
        };
        let mode = dialog.mode();
        let submission = dialog.validate()?;

        let result = match &submission {
            Submission::Create(payload) => self.client.create::<R>(payload).await,
            Submission::Update(id, payload) => self.client.update::<R>(id, payload).await,
        };

        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                self.error = Some(mutation_message(&e));
                return Err(e);
            }
        };

        let verb = match mode {
            FormMode::Create => "created",
            FormMode::Edit => "updated",
        };
        self.close_dialog();
        self.error = None;
        self.success = Some(format!("{} {} successfully.", capitalize(R::NOUN), verb));

        if let Err(e) = self.refresh().await {
            debug!("Refetch after save failed: {}", e);
        }
        Ok(saved)
    }

    /// Delete `id` once `confirmed`. Returns whether anything was deleted.
    pub async fn delete(&mut self, id: &R::Id, confirmed: bool) -> Result<bool> {
        self.require_manage("delete")?;
        if !confirmed {
            return Ok(false);
        }

        if let Err(e) = self.client.delete::<R>(id).await {
            self.error = Some(mutation_message(&e));
            return Err(e);
        }

        self.error = None;
        self.success = Some(format!("{} deleted successfully.", capitalize(R::NOUN)));
        if let Err(e) = self.refresh().await {
            debug!("Refetch after delete failed: {}", e);
        }
        Ok(true)
    }

    fn pagination(&self) -> Pagination {
        let meta = self.data.as_ref().map(|p| p.meta.clone()).unwrap_or_default();
        Pagination {
            current: meta.current_page.unwrap_or(self.page),
            total: meta.page_count(),
            total_items: meta.total_items,
        }
    }

    /// Snapshot of what the screen shows.
    pub fn render(&self) -> ListScreen<'_, R> {
        ListScreen {
            title: R::NOUN_PLURAL,
            rows: self.items(),
            pagination: self.pagination(),
            actions: if self.can_manage { MANAGE_ACTIONS } else { &[] },
            search: &self.search,
            error: self.error.as_deref(),
            success: self.success.as_deref(),
        }
    }
}

/// Banner text for a failed mutation: the server's message when it sent one.
pub fn mutation_message(err: &Error) -> String {
    match err {
        Error::Api(ApiError::BadRequest(msg))
        | Error::Api(ApiError::NotFound(msg))
        | Error::Api(ApiError::ServerError(msg)) => msg.clone(),
        other => other.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockClinicClient;
    use crate::client::fixtures;
    use crate::client::models::{MedicalRecord, Medication, Patient};
    use tokio::time::advance;

    fn patients(n: i64) -> Vec<Patient> {
        (1..=n).map(|i| fixtures::patient(i, 100 + i)).collect()
    }

    #[tokio::test]
    async fn test_renders_rows_and_pagination() {
        let mock = MockClinicClient::new()
            .with_items(patients(5))
            .await
            .with_total_pages::<Patient>(3)
            .await;
        let mut view: ListView<Patient, _> = ListView::new(&mock, false);
        view.refresh().await.unwrap();

        let screen = view.render();
        assert_eq!(screen.rows.len(), 5);
        assert_eq!(screen.pagination.total, 3);
        assert_eq!(screen.pagination.current, 1);
        assert!(screen.pagination.has_next());
        assert!(!screen.pagination.has_prev());
        assert_eq!(screen.title, "patients");

        let query = mock.captured_requests().await[0].query.clone().unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.search, None);
    }

    #[tokio::test]
    async fn test_admin_sees_actions_non_admin_does_not() {
        let mock = MockClinicClient::new().with_items(patients(2)).await;

        let admin: ListView<Patient, _> = ListView::new(&mock, true);
        assert_eq!(admin.render().actions, MANAGE_ACTIONS);

        let mut user: ListView<Patient, _> = ListView::new(&mock, false);
        assert!(user.render().actions.is_empty());

        let err = user.open_create().unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::PermissionDenied { .. })));
        assert!(!user.is_dialog_open());

        let err = user.delete(&1, true).await.unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::PermissionDenied { .. })));
        assert_eq!(mock.calls_to("delete").await, 0);
    }

    #[tokio::test]
    async fn test_for_principal_uses_role() {
        let mock = MockClinicClient::new();
        let admin = Principal::new(crate::auth::token::decode(&fixtures::admin_token()).unwrap().into());
        let view: ListView<Patient, _> = ListView::for_principal(&mock, &admin);
        assert!(view.can_manage());
    }

    #[tokio::test]
    async fn test_fetch_error_keeps_previous_page() {
        let mock = MockClinicClient::new().with_items(patients(3)).await;
        let mut view: ListView<Patient, _> = ListView::new(&mock, false);
        view.refresh().await.unwrap();

        mock.fail_next(ApiError::ServerError("boom".into())).await;
        assert!(view.refresh().await.is_err());

        assert_eq!(view.error(), Some("Could not load patients."));
        assert_eq!(view.render().rows.len(), 3);

        view.refresh().await.unwrap();
        assert_eq!(view.error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_fetches_once_after_quiet_period() {
        let mock = MockClinicClient::new().with_items(patients(3)).await;
        let mut view: ListView<Patient, _> = ListView::new(&mock, false).with_page(2);

        view.input_search("0");
        advance(Duration::from_millis(200)).await;
        view.input_search("01");
        advance(Duration::from_millis(449)).await;
        assert!(!view.poll_search().await.unwrap());
        assert_eq!(mock.list_calls().await, 0);

        advance(Duration::from_millis(1)).await;
        assert!(view.poll_search().await.unwrap());
        assert!(!view.poll_search().await.unwrap());
        assert_eq!(mock.list_calls().await, 1);

        let query = mock.captured_requests().await[0].query.clone().unwrap();
        assert_eq!(query.search.as_deref(), Some("01"));
        assert_eq!(query.page, 1);
        assert_eq!(view.page(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_search_applies_last_value() {
        let mock = MockClinicClient::new();
        let mut view: ListView<Medication, _> = ListView::new(&mock, false);
        view.input_search("para");
        view.input_search("parace");

        assert!(view.settle_search().await.unwrap());
        let query = mock.captured_requests().await[0].query.clone().unwrap();
        assert_eq!(query.search.as_deref(), Some("parace"));
        assert_eq!(query.search_field.as_deref(), Some("nombre"));
        assert_eq!(query.sort.as_deref(), Some("nombre"));
        assert_eq!(query.order, Some(SortOrder::Asc));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_search_does_not_refetch() {
        let mock = MockClinicClient::new();
        let mut view: ListView<Patient, _> = ListView::new(&mock, false).with_search("x");
        view.input_search("x");
        assert!(!view.settle_search().await.unwrap());
        assert_eq!(mock.list_calls().await, 0);
    }

    #[tokio::test]
    async fn test_medical_record_query_sorted_newest_first() {
        let mock = MockClinicClient::new();
        let view: ListView<MedicalRecord, _> = ListView::new(&mock, true);
        let query = view.query();
        assert_eq!(query.sort.as_deref(), Some("createdAt"));
        assert_eq!(query.order, Some(SortOrder::Desc));
    }

    #[tokio::test]
    async fn test_sort_override() {
        let mock = MockClinicClient::new();
        let view: ListView<MedicalRecord, _> =
            ListView::new(&mock, true).with_sort("diagnostico", SortOrder::Asc);
        let query = view.query();
        assert_eq!(query.sort.as_deref(), Some("diagnostico"));
        assert_eq!(query.order, Some(SortOrder::Asc));
    }

    #[tokio::test]
    async fn test_set_page_clamps_to_known_pages() {
        let mock = MockClinicClient::new().with_items(patients(25)).await;
        let mut view: ListView<Patient, _> = ListView::new(&mock, false);
        view.refresh().await.unwrap();

        view.set_page(9).await.unwrap();
        assert_eq!(view.page(), 3);
        assert_eq!(view.render().rows.len(), 5);

        view.prev_page().await.unwrap();
        assert_eq!(view.page(), 2);
        view.set_page(0).await.unwrap();
        assert_eq!(view.page(), 1);
    }

    #[tokio::test]
    async fn test_submit_create_closes_and_refetches() {
        let mock = MockClinicClient::new().with_items(patients(1)).await;
        let mut view: ListView<Patient, _> = ListView::new(&mock, true);

        let dialog = view.open_create().unwrap();
        dialog.set("id_usuario", "55").unwrap();
        dialog.set("cedula", "0912345678").unwrap();
        dialog.set("fecha_nacimiento", "2000-01-31").unwrap();
        dialog.set("telefono", "0990000000").unwrap();
        dialog.set("direccion", "Calle 9").unwrap();

        let saved = view.submit().await.unwrap();
        assert_eq!(saved.user_id, 55);
        assert!(!view.is_dialog_open());
        assert_eq!(view.success(), Some("Patient created successfully."));
        assert_eq!(mock.calls_to("create").await, 1);
        assert_eq!(mock.list_calls().await, 1);
    }

    #[tokio::test]
    async fn test_submit_invalid_form_sends_nothing() {
        let mock = MockClinicClient::new();
        let mut view: ListView<Patient, _> = ListView::new(&mock, true);
        view.open_create().unwrap();

        let err = view.submit().await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(view.is_dialog_open());
        assert!(mock.captured_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_dialog_with_server_message() {
        let mock = MockClinicClient::new().with_items(patients(1)).await;
        let mut view: ListView<Patient, _> = ListView::new(&mock, true);
        view.open_edit(fixtures::patient(1, 101)).unwrap();

        mock.fail_next(ApiError::BadRequest("La cédula ya existe".into())).await;
        assert!(view.submit().await.is_err());

        assert!(view.is_dialog_open());
        assert_eq!(view.error(), Some("La cédula ya existe"));
        assert!(view.selected().is_some());
    }

    #[tokio::test]
    async fn test_submit_edit_uses_update() {
        let mock = MockClinicClient::new().with_items(patients(2)).await;
        let mut view: ListView<Patient, _> = ListView::new(&mock, true);
        view.open_edit(fixtures::patient(2, 102))
            .unwrap()
            .set("direccion", "Nueva 1")
            .unwrap();

        let saved = view.submit().await.unwrap();
        assert_eq!(saved.address, "Nueva 1");
        assert_eq!(view.success(), Some("Patient updated successfully."));

        let update = mock
            .captured_requests()
            .await
            .into_iter()
            .find(|r| r.operation == "update")
            .unwrap();
        assert_eq!(update.id.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let mock = MockClinicClient::new().with_items(patients(2)).await;
        let mut view: ListView<Patient, _> = ListView::new(&mock, true);

        assert!(!view.delete(&1, false).await.unwrap());
        assert_eq!(mock.calls_to("delete").await, 0);

        assert!(view.delete(&1, true).await.unwrap());
        assert_eq!(mock.items::<Patient>().await.len(), 1);
        assert_eq!(view.render().rows.len(), 1);
        assert_eq!(view.success(), Some("Patient deleted successfully."));
    }

    #[test]
    fn test_mutation_message() {
        let err: Error = ApiError::BadRequest("nombre must be unique".into()).into();
        assert_eq!(mutation_message(&err), "nombre must be unique");
        let err: Error = ApiError::Forbidden.into();
        assert!(mutation_message(&err).contains("Access denied"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("medical record"), "Medical record");
        assert_eq!(capitalize(""), "");
    }
}
