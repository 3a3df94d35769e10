//! Generic list-and-form screen behavior.
//!
//! Every management screen is the same shape: load a list, open a creation
//! form, submit it, sometimes delete a row. [`CrudShell`] implements that
//! shape once, parameterized by an [`AdminResource`]. User-visible side
//! effects go through the [`Notifier`] seam and destructive actions
//! through the [`ConfirmGate`] seam, so the shell stays headless and
//! testable.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::models::RecordId;
use crate::resource::{AdminResource, Identified, RequiredFields};

/// Sink for the transient success/warning/error notifications a screen
/// shows. The default [`TracingNotifier`] just logs them.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that routes everything to `tracing`.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(notification = "success", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(notification = "warning", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(notification = "error", "{message}");
    }
}

/// Explicit confirmation step guarding every delete. No request is issued
/// unless the gate accepts.
pub trait ConfirmGate: Send + Sync {
    /// Whether the user confirmed the prompt.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Gate that accepts every prompt — for screens whose confirmation happens
/// upstream of the shell.
#[derive(Debug, Default)]
pub struct AlwaysConfirm;

impl ConfirmGate for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// List, loading flag, and creation-form state for one screen.
pub struct CrudShell<R: AdminResource> {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    gate: Arc<dyn ConfirmGate>,
    items: Vec<R::ListModel>,
    loading: bool,
    form_open: bool,
    form: R::CreateModel,
}

impl<R: AdminResource> CrudShell<R> {
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>, gate: Arc<dyn ConfirmGate>) -> Self {
        Self {
            client,
            notifier,
            gate,
            items: Vec::new(),
            loading: false,
            form_open: false,
            form: R::CreateModel::default(),
        }
    }

    /// The current list.
    #[must_use]
    pub fn items(&self) -> &[R::ListModel] {
        &self.items
    }

    /// Whether a list fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the creation form is open.
    #[must_use]
    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// The creation form state.
    #[must_use]
    pub fn form(&self) -> &R::CreateModel {
        &self.form
    }

    /// Mutable access for input binding.
    pub fn form_mut(&mut self) -> &mut R::CreateModel {
        &mut self.form
    }

    /// Open the creation form.
    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    /// Close the creation form and reset it to its initial values.
    pub fn close_form(&mut self) {
        self.form_open = false;
        self.form = R::CreateModel::default();
    }

    /// Fetch the list. On failure the previous list is kept and an error
    /// notification is emitted; nothing propagates to the caller.
    pub async fn load(&mut self) {
        self.loading = true;
        match R::list_all(&self.client).await {
            Ok(items) => self.items = items,
            Err(err) => {
                err.log_internal();
                self.notifier
                    .error(&format!("Could not load {}", R::RESOURCE_NAME_PLURAL));
            }
        }
        self.loading = false;
    }

    /// Submit the creation form. Required fields are checked first; an
    /// incomplete form produces a warning and no request. On success the
    /// form closes and resets, and the list is reloaded — the canonical id
    /// is only known after reload, so no row is inserted optimistically.
    ///
    /// Returns whether the create succeeded.
    pub async fn submit_create(&mut self) -> bool {
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            self.notifier
                .warning(&format!("Fill in the required fields: {}", missing.join(", ")));
            return false;
        }
        match R::create(&self.client, &self.form).await {
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| format!("{} created", R::RESOURCE_NAME_SINGULAR));
                self.notifier.success(&message);
                self.close_form();
                self.load().await;
                true
            }
            Err(err) => {
                err.log_internal();
                self.notifier.error(&err.user_message());
                false
            }
        }
    }

    /// Replace the list wholesale (used by screens that filter locally).
    pub fn set_items(&mut self, items: Vec<R::ListModel>) {
        self.items = items;
    }
}

impl<R: AdminResource> CrudShell<R>
where
    R::ListModel: Identified,
{
    /// Delete a record. The confirmation gate runs first — a rejected
    /// prompt leaves the list untouched and issues no request. On success
    /// the row is removed locally by id rather than waiting for a reload.
    ///
    /// Returns whether the delete succeeded.
    pub async fn submit_delete(&mut self, id: &RecordId) -> bool {
        let prompt = format!("Delete this {}?", R::RESOURCE_NAME_SINGULAR);
        if !self.gate.confirm(&prompt) {
            return false;
        }
        match R::delete(&self.client, id).await {
            Ok(ack) => {
                self.items.retain(|item| item.record_id() != id);
                let message = ack
                    .message
                    .unwrap_or_else(|| format!("{} deleted", R::RESOURCE_NAME_SINGULAR));
                self.notifier.success(&message);
                true
            }
            Err(err) => {
                err.log_internal();
                self.notifier.error(&err.user_message());
                false
            }
        }
    }
}

impl<R: AdminResource> std::fmt::Debug for CrudShell<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudShell")
            .field("resource", &R::RESOURCE_NAME_PLURAL)
            .field("items", &self.items.len())
            .field("loading", &self.loading)
            .field("form_open", &self.form_open)
            .finish()
    }
}
