//! Link-creation workflows: a [`DependentChain`] plus the fetching and
//! submission around it.
//!
//! Each composite link table gets a [`LinkChain`] impl describing its
//! levels, where each level's options come from, and how the finished key
//! is submitted. [`ChainDriver`] runs the workflow: it dispatches option
//! fetches, applies them through the staleness guard, and refuses to
//! submit until every level holds a selection.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{
    DetailGroupLinks, DetailGroups, DetailTags, Details, FinalLinks, ModelYearGroups, Models, Tags,
    YearGroups,
};
use crate::chain::{ChainError, DependentChain, OptionsRequest, SelectOption};
use crate::client::ApiClient;
use crate::envelope::Ack;
use crate::errors::ApiError;
use crate::models::{
    DetailGroupLinkCreate, DetailTagCreate, FinalLinkCreate, ModelYearGroupCreate, RecordId,
};
use crate::resource::AdminResource;
use crate::shell::Notifier;

/// One composite link table's chain: level names, option sources, and the
/// submission of the finished key.
#[async_trait]
pub trait LinkChain: Send + Sync {
    /// Level names, outermost first.
    const LEVELS: &'static [&'static str];
    /// Display name of the link being created.
    const LINK_NAME: &'static str;

    /// Whether the level's options come from one unfiltered fetch at open
    /// time instead of being narrowed by the upstream selection.
    #[must_use]
    fn is_preset(level: usize) -> bool {
        let _ = level;
        false
    }

    /// Fetch the level's options. For non-preset levels `upstream` holds
    /// the selected ids of every level above, outermost first; for preset
    /// levels it is empty.
    async fn level_options(
        client: &ApiClient,
        level: usize,
        upstream: &[RecordId],
    ) -> Result<Vec<SelectOption>, ApiError>;

    /// Submit the complete key, outermost level first.
    async fn submit_key(client: &ApiClient, key: &[RecordId]) -> Result<Ack, ApiError>;
}

fn chain_misuse(err: ChainError) -> ApiError {
    ApiError::validation_failed(vec![err.to_string()])
}

fn upstream_id<'a>(upstream: &'a [RecordId], position: usize) -> Result<&'a RecordId, ApiError> {
    upstream.get(position).ok_or_else(|| {
        ApiError::validation_failed(vec![format!(
            "upstream selection {position} is missing"
        )])
    })
}

/// Runs one [`LinkChain`]: owns the [`DependentChain`] and performs the
/// async fetches its transitions call for.
pub struct ChainDriver<C: LinkChain> {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    chain: DependentChain,
    _chain_kind: PhantomData<C>,
}

impl<C: LinkChain> ChainDriver<C> {
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            chain: DependentChain::new(C::LEVELS),
            _chain_kind: PhantomData,
        }
    }

    /// Read access to the chain state, for rendering.
    #[must_use]
    pub fn chain(&self) -> &DependentChain {
        &self.chain
    }

    /// Populate the first level and prime every preset level. Failures are
    /// notified and leave the affected level empty but retryable.
    pub async fn open(&mut self) -> Result<(), ApiError> {
        let request = self.chain.begin_fetch(0).map_err(chain_misuse)?;
        self.resolve_fetch(request).await;
        for level in 1..C::LEVELS.len() {
            if !C::is_preset(level) {
                continue;
            }
            match C::level_options(&self.client, level, &[]).await {
                Ok(options) => self.chain.prime(level, options).map_err(chain_misuse)?,
                Err(err) => {
                    err.log_internal();
                    self.notifier.error(&format!(
                        "Could not load {} options",
                        self.chain.level_name(level).map_err(chain_misuse)?
                    ));
                }
            }
        }
        Ok(())
    }

    /// Select `id` at `level` and, when the next level is fetched rather
    /// than preset, dispatch its option fetch. A failed fetch is notified
    /// and leaves the level empty; re-selecting upstream retries.
    pub async fn select(&mut self, level: usize, id: RecordId) -> Result<(), ApiError> {
        self.chain.select(level, id).map_err(chain_misuse)?;
        let next = level + 1;
        if next < C::LEVELS.len() && !C::is_preset(next) {
            let request = self.chain.begin_fetch(next).map_err(chain_misuse)?;
            self.resolve_fetch(request).await;
        }
        Ok(())
    }

    /// Clear the selection at `level`, cascading downstream.
    pub fn clear_selection(&mut self, level: usize) -> Result<(), ApiError> {
        self.chain.clear_selection(level).map_err(chain_misuse)
    }

    /// Submit the composite key. An incomplete chain produces a warning
    /// and no request. On success the selections are cleared so the next
    /// link can be entered; the option sets stay.
    ///
    /// Returns whether the link was created. A `true` return is the
    /// caller's cue to reload the screen's link list (via the resource's
    /// [`CrudShell`](crate::shell::CrudShell)); the driver owns only the
    /// chain, not the list.
    pub async fn submit(&mut self) -> bool {
        let Some(key) = self.chain.composite_key() else {
            self.notifier.warning("Select every field first");
            return false;
        };
        match C::submit_key(&self.client, &key).await {
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| format!("{} created", C::LINK_NAME));
                self.notifier.success(&message);
                let _ = self.chain.clear_selection(0);
                true
            }
            Err(err) => {
                err.log_internal();
                self.notifier.error(&err.user_message());
                false
            }
        }
    }

    async fn resolve_fetch(&mut self, request: OptionsRequest) {
        match C::level_options(&self.client, request.level(), request.upstream()).await {
            Ok(options) => {
                self.chain.apply_options(&request, options);
            }
            Err(err) => {
                err.log_internal();
                self.chain.fetch_failed(&request);
                let name = self.chain.level_name(request.level()).unwrap_or("option");
                self.notifier
                    .error(&format!("Could not load {name} options"));
            }
        }
    }
}

impl<C: LinkChain> std::fmt::Debug for ChainDriver<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainDriver")
            .field("link", &C::LINK_NAME)
            .field("chain", &self.chain)
            .finish()
    }
}

// ── Option projections ─────────────────────────────────────────

async fn model_options(client: &ApiClient) -> Result<Vec<SelectOption>, ApiError> {
    Ok(Models::list_all(client)
        .await?
        .into_iter()
        .map(|m| SelectOption::new(m.id, m.name))
        .collect())
}

async fn year_group_options_for_model(
    client: &ApiClient,
    model_id: &RecordId,
) -> Result<Vec<SelectOption>, ApiError> {
    Ok(YearGroups::list_for_model(client, model_id)
        .await?
        .into_iter()
        .map(|yg| {
            let label = yg.range_label();
            SelectOption::new(yg.id, label)
        })
        .collect())
}

// ── Concrete chains ────────────────────────────────────────────

/// Model → YearGroup. The year-group level is preset from the full list;
/// any year range may be attached to any model.
pub struct ModelYearChain;

#[async_trait]
impl LinkChain for ModelYearChain {
    const LEVELS: &'static [&'static str] = &["model", "year group"];
    const LINK_NAME: &'static str = "model-year link";

    fn is_preset(level: usize) -> bool {
        level == 1
    }

    async fn level_options(
        client: &ApiClient,
        level: usize,
        _upstream: &[RecordId],
    ) -> Result<Vec<SelectOption>, ApiError> {
        match level {
            0 => model_options(client).await,
            _ => Ok(YearGroups::list_all(client)
                .await?
                .into_iter()
                .map(|yg| {
                    let label = yg.range_label();
                    SelectOption::new(yg.id, label)
                })
                .collect()),
        }
    }

    async fn submit_key(client: &ApiClient, key: &[RecordId]) -> Result<Ack, ApiError> {
        let create = ModelYearGroupCreate {
            model_id: key.first().cloned(),
            year_group_id: key.get(1).cloned(),
        };
        ModelYearGroups::create(client, &create).await
    }
}

/// Model → YearGroup → DetailGroup. Year groups are narrowed to the chosen
/// model; the detail-group level is preset from the full list.
pub struct DetailGroupLinkChain;

#[async_trait]
impl LinkChain for DetailGroupLinkChain {
    const LEVELS: &'static [&'static str] = &["model", "year group", "detail group"];
    const LINK_NAME: &'static str = "detail-group link";

    fn is_preset(level: usize) -> bool {
        level == 2
    }

    async fn level_options(
        client: &ApiClient,
        level: usize,
        upstream: &[RecordId],
    ) -> Result<Vec<SelectOption>, ApiError> {
        match level {
            0 => model_options(client).await,
            1 => year_group_options_for_model(client, upstream_id(upstream, 0)?).await,
            _ => Ok(DetailGroups::list_all(client)
                .await?
                .into_iter()
                .map(|dg| SelectOption::new(dg.id, dg.name))
                .collect()),
        }
    }

    async fn submit_key(client: &ApiClient, key: &[RecordId]) -> Result<Ack, ApiError> {
        let create = DetailGroupLinkCreate {
            model_id: key.first().cloned(),
            year_group_id: key.get(1).cloned(),
            detail_group_id: key.get(2).cloned(),
        };
        DetailGroupLinks::create(client, &create).await
    }
}

/// Model → YearGroup → DetailGroup → Detail, the full placement chain.
/// Year groups narrow to the model and detail groups to the (model, year
/// group) pair; the detail level is preset from the full part list.
pub struct FinalLinkChain;

#[async_trait]
impl LinkChain for FinalLinkChain {
    const LEVELS: &'static [&'static str] = &["model", "year group", "detail group", "detail"];
    const LINK_NAME: &'static str = "final link";

    fn is_preset(level: usize) -> bool {
        level == 3
    }

    async fn level_options(
        client: &ApiClient,
        level: usize,
        upstream: &[RecordId],
    ) -> Result<Vec<SelectOption>, ApiError> {
        match level {
            0 => model_options(client).await,
            1 => year_group_options_for_model(client, upstream_id(upstream, 0)?).await,
            2 => Ok(DetailGroups::list_for_model_year(
                client,
                upstream_id(upstream, 0)?,
                upstream_id(upstream, 1)?,
            )
            .await?
            .into_iter()
            .map(|dg| SelectOption::new(dg.id, dg.name))
            .collect()),
            _ => Ok(Details::list_all(client)
                .await?
                .into_iter()
                .map(|d| SelectOption::new(d.id, d.name))
                .collect()),
        }
    }

    async fn submit_key(client: &ApiClient, key: &[RecordId]) -> Result<Ack, ApiError> {
        let create = FinalLinkCreate {
            model_id: key.first().cloned(),
            year_group_id: key.get(1).cloned(),
            detail_group_id: key.get(2).cloned(),
            detail_id: key.get(3).cloned(),
        };
        FinalLinks::create(client, &create).await
    }
}

/// Tag → Detail. Both levels are independent lists; the detail level is
/// preset so picking a tag never refetches parts.
pub struct TagDetailChain;

#[async_trait]
impl LinkChain for TagDetailChain {
    const LEVELS: &'static [&'static str] = &["tag", "detail"];
    const LINK_NAME: &'static str = "detail-tag link";

    fn is_preset(level: usize) -> bool {
        level == 1
    }

    async fn level_options(
        client: &ApiClient,
        level: usize,
        _upstream: &[RecordId],
    ) -> Result<Vec<SelectOption>, ApiError> {
        match level {
            0 => Ok(Tags::list_all(client)
                .await?
                .into_iter()
                .map(|t| SelectOption::new(t.id, t.name))
                .collect()),
            _ => Ok(Details::list_all(client)
                .await?
                .into_iter()
                .map(|d| SelectOption::new(d.id, d.name))
                .collect()),
        }
    }

    async fn submit_key(client: &ApiClient, key: &[RecordId]) -> Result<Ack, ApiError> {
        let create = DetailTagCreate {
            tag_id: key.first().cloned(),
            detail_id: key.get(1).cloned(),
        };
        DetailTags::create(client, &create).await
    }
}
