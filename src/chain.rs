//! Dependent selection chain.
//!
//! Composite-link creation walks a chain of 2–4 selects where each
//! selection narrows the next level's option set: Model → YearGroup →
//! DetailGroup → Detail, or the shorter variants. [`DependentChain`] holds
//! the per-level state machine; the async fetching around it lives in
//! [`crate::links::ChainDriver`].
//!
//! Staleness: every option fetch is stamped with the chain generation at
//! dispatch via [`OptionsRequest`]. Any change to an upstream selection
//! bumps the generation, so a late response belonging to an abandoned
//! chain state is ignored rather than applied.

use std::fmt;

use crate::models::RecordId;

/// State of one level in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    /// No valid upstream selection yet; options empty, control disabled.
    Locked,
    /// Upstream just changed; this level's option fetch is in flight.
    Loading,
    /// Options populated (possibly empty); nothing selected yet.
    Ready,
    /// A value is chosen for this level.
    Selected,
}

/// One selectable option: an id plus its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: RecordId,
    pub label: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(id: impl Into<RecordId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A pending option fetch, stamped with the generation at dispatch.
///
/// Hand the request back to [`DependentChain::apply_options`] with the
/// fetched options; if the chain has moved on in the meantime the result
/// is discarded.
#[derive(Debug)]
pub struct OptionsRequest {
    level: usize,
    upstream: Vec<RecordId>,
    generation: u64,
}

impl OptionsRequest {
    /// The level whose options are being fetched.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Selected ids of every level above, outermost first.
    #[must_use]
    pub fn upstream(&self) -> &[RecordId] {
        &self.upstream
    }
}

/// Misuse of the chain surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The level index does not exist in this chain.
    LevelOutOfRange(usize),
    /// The level is not in a state that accepts a selection or fetch.
    NotSelectable(&'static str),
    /// The id is not among the level's current options.
    UnknownOption(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelOutOfRange(level) => write!(f, "level {level} does not exist"),
            Self::NotSelectable(name) => write!(f, "{name} is not selectable yet"),
            Self::UnknownOption(id) => {
                write!(f, "ID: {id} is not among the available options")
            }
        }
    }
}

impl std::error::Error for ChainError {}

#[derive(Debug)]
struct Level {
    name: &'static str,
    state: LevelState,
    options: Vec<SelectOption>,
    selected: Option<RecordId>,
    /// Options for a level populated once, up front, from an unfiltered
    /// list. Restored (selection cleared) on every upstream change.
    preset: Option<Vec<SelectOption>>,
}

impl Level {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            state: LevelState::Locked,
            options: Vec::new(),
            selected: None,
            preset: None,
        }
    }

    fn reset_downstream(&mut self) {
        self.selected = None;
        if let Some(preset) = &self.preset {
            self.options = preset.clone();
            self.state = LevelState::Ready;
        } else {
            self.options.clear();
            self.state = LevelState::Locked;
        }
    }
}

/// The chain of dependent selects for one composite-link form.
#[derive(Debug)]
pub struct DependentChain {
    levels: Vec<Level>,
    generation: u64,
}

impl DependentChain {
    /// A chain with one level per name, all `Locked`.
    #[must_use]
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            levels: names.iter().map(|name| Level::new(name)).collect(),
            generation: 0,
        }
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True for a chain with no levels (never constructed in practice).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn level(&self, index: usize) -> Result<&Level, ChainError> {
        self.levels
            .get(index)
            .ok_or(ChainError::LevelOutOfRange(index))
    }

    fn level_mut(&mut self, index: usize) -> Result<&mut Level, ChainError> {
        self.levels
            .get_mut(index)
            .ok_or(ChainError::LevelOutOfRange(index))
    }

    /// Install the up-front option set of an unconstrained level. The level
    /// becomes `Ready` and keeps (a copy of) these options across upstream
    /// changes.
    pub fn prime(&mut self, index: usize, options: Vec<SelectOption>) -> Result<(), ChainError> {
        let level = self.level_mut(index)?;
        level.preset = Some(options.clone());
        level.options = options;
        level.selected = None;
        level.state = LevelState::Ready;
        Ok(())
    }

    /// Start an option fetch for `index`: requires every upstream level to
    /// be `Selected`, moves the level to `Loading`, and returns the stamped
    /// request to resolve with [`Self::apply_options`].
    pub fn begin_fetch(&mut self, index: usize) -> Result<OptionsRequest, ChainError> {
        if index >= self.levels.len() {
            return Err(ChainError::LevelOutOfRange(index));
        }
        let mut upstream = Vec::with_capacity(index);
        for above in &self.levels[..index] {
            match &above.selected {
                Some(id) => upstream.push(id.clone()),
                None => return Err(ChainError::NotSelectable(above.name)),
            }
        }
        let generation = self.generation;
        let level = &mut self.levels[index];
        level.options.clear();
        level.selected = None;
        level.state = LevelState::Loading;
        Ok(OptionsRequest {
            level: index,
            upstream,
            generation,
        })
    }

    /// Resolve a fetch. Returns `false` (and changes nothing) when the
    /// request's generation is stale — an upstream selection changed while
    /// the fetch was in flight.
    pub fn apply_options(&mut self, request: &OptionsRequest, options: Vec<SelectOption>) -> bool {
        if request.generation != self.generation {
            return false;
        }
        if let Ok(level) = self.level_mut(request.level) {
            level.options = options;
            level.selected = None;
            level.state = LevelState::Ready;
            true
        } else {
            false
        }
    }

    /// Record a failed fetch: the level ends up `Ready` with no options
    /// (presented disabled), and the chain stays usable — re-selecting the
    /// upstream level retries.
    pub fn fetch_failed(&mut self, request: &OptionsRequest) {
        if request.generation != self.generation {
            return;
        }
        if let Ok(level) = self.level_mut(request.level) {
            level.options.clear();
            level.state = LevelState::Ready;
        }
    }

    /// Select `id` at `index`. The id must be among the level's current
    /// options; every downstream level's selection and option set is
    /// discarded, and any in-flight fetch becomes stale.
    pub fn select(&mut self, index: usize, id: RecordId) -> Result<(), ChainError> {
        {
            let level = self.level(index)?;
            if !matches!(level.state, LevelState::Ready | LevelState::Selected) {
                return Err(ChainError::NotSelectable(level.name));
            }
            if !level.options.iter().any(|option| option.id == id) {
                return Err(ChainError::UnknownOption(id.key()));
            }
        }
        let level = &mut self.levels[index];
        level.selected = Some(id);
        level.state = LevelState::Selected;
        self.cascade_reset(index + 1);
        Ok(())
    }

    /// Clear the selection at `index`, cascading the same downstream reset
    /// as a changed selection.
    pub fn clear_selection(&mut self, index: usize) -> Result<(), ChainError> {
        let level = self.level_mut(index)?;
        if level.selected.take().is_some() {
            level.state = LevelState::Ready;
        }
        self.cascade_reset(index + 1);
        Ok(())
    }

    fn cascade_reset(&mut self, from: usize) {
        for level in self.levels.iter_mut().skip(from) {
            level.reset_downstream();
        }
        self.generation += 1;
    }

    /// The full id tuple, outermost level first — `Some` only when every
    /// level holds a selection.
    #[must_use]
    pub fn composite_key(&self) -> Option<Vec<RecordId>> {
        self.levels
            .iter()
            .map(|level| level.selected.clone())
            .collect()
    }

    /// True when every level is `Selected`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.levels.iter().all(|level| level.selected.is_some())
    }

    /// The level's display name.
    pub fn level_name(&self, index: usize) -> Result<&'static str, ChainError> {
        Ok(self.level(index)?.name)
    }

    /// The level's current state.
    pub fn state(&self, index: usize) -> Result<LevelState, ChainError> {
        Ok(self.level(index)?.state)
    }

    /// The level's current options.
    pub fn options(&self, index: usize) -> Result<&[SelectOption], ChainError> {
        Ok(self.level(index)?.options.as_slice())
    }

    /// The level's current selection.
    pub fn selected(&self, index: usize) -> Result<Option<&RecordId>, ChainError> {
        Ok(self.level(index)?.selected.as_ref())
    }

    /// Whether the level's control should accept input: populated and not
    /// waiting on anything.
    pub fn is_enabled(&self, index: usize) -> Result<bool, ChainError> {
        let level = self.level(index)?;
        Ok(
            matches!(level.state, LevelState::Ready | LevelState::Selected)
                && !level.options.is_empty(),
        )
    }

    /// Placeholder text for a disabled or waiting control.
    pub fn placeholder(&self, index: usize) -> Result<&'static str, ChainError> {
        let level = self.level(index)?;
        Ok(match level.state {
            LevelState::Locked => "select the previous field first",
            LevelState::Loading => "loading options",
            LevelState::Ready if level.options.is_empty() => "no options for this selection",
            LevelState::Ready | LevelState::Selected => "",
        })
    }
}
