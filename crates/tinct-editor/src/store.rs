#![forbid(unsafe_code)]

//! The theme editor: current state, undo history and checkpoint.
//!
//! [`ThemeEditor`] is an ordinary value owned by the host and handed to
//! whatever needs it. Every mutating method has an `_at` twin that takes
//! the edit time explicitly; the plain form reads the clock.
//!
//! # Invariants
//!
//! 1. Switching between light and dark never creates, clears or consumes
//!    history.
//! 2. Undo and redo keep the mode currently being viewed.
//! 3. Applying a preset, resetting and restoring the checkpoint are always
//!    separate undo steps; they never coalesce with a prior edit.

use tinct_color::{HslAdjustments, adjust_color_by_hsl};
use tinct_theme::{
    ContrastCheck, DEFAULT_PRESET, PresetError, PresetRegistry, ShadowMap, ThemeEditorState,
    ThemeMode, ThemePreset, ThemePresetStyles, ThemeTarget, apply_theme_to_element,
    contrast_report, default_theme_state, generate_tailwind_config_code, generate_theme_code,
    get_shadow_map, is_color_token, is_known_token,
};
use web_time::Instant;

use crate::config::{EditorConfig, OutputConfig};
use crate::history::{History, Recorded};

/// How [`ThemeEditor::set_theme_state`] handled a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// Only the viewed mode changed; history untouched.
    ViewToggle,
    /// Merged into the newest undo step.
    Coalesced,
    /// The previous state became a new undo step.
    Recorded,
}

#[derive(Debug)]
pub struct ThemeEditor {
    state: ThemeEditorState,
    history: History<ThemeEditorState>,
    checkpoint: Option<ThemeEditorState>,
    presets: PresetRegistry,
    output: OutputConfig,
}

impl Default for ThemeEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeEditor {
    /// An editor showing the default theme with the built-in presets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            state: default_theme_state(),
            history: History::new(config.history),
            checkpoint: None,
            presets: PresetRegistry::builtin(),
            output: config.output,
        }
    }

    /// Start from `state` instead of the default theme.
    #[must_use]
    pub fn with_state(mut self, state: ThemeEditorState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_presets(mut self, presets: PresetRegistry) -> Self {
        self.presets = presets;
        self
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    #[must_use]
    pub fn state(&self) -> &ThemeEditorState {
        &self.state
    }

    #[must_use]
    pub fn checkpoint(&self) -> Option<&ThemeEditorState> {
        self.checkpoint.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &History<ThemeEditorState> {
        &self.history
    }

    #[must_use]
    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    pub fn presets_mut(&mut self) -> &mut PresetRegistry {
        &mut self.presets
    }

    #[must_use]
    pub fn output(&self) -> OutputConfig {
        self.output
    }

    pub fn set_output(&mut self, output: OutputConfig) {
        self.output = output;
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.past_len()
    }

    #[must_use]
    pub fn future_len(&self) -> usize {
        self.history.future_len()
    }

    // ====================================================================
    // Edits
    // ====================================================================

    pub fn set_theme_state(&mut self, state: ThemeEditorState) -> SetOutcome {
        self.set_theme_state_at(state, Instant::now())
    }

    /// Replace the state. Edits closer together than the coalescing window
    /// share one undo step.
    pub fn set_theme_state_at(&mut self, state: ThemeEditorState, now: Instant) -> SetOutcome {
        if state.differs_only_in_mode(&self.state) {
            self.state = state;
            return SetOutcome::ViewToggle;
        }
        let previous = std::mem::replace(&mut self.state, state);
        match self.history.record(previous, now) {
            Recorded::Coalesced => SetOutcome::Coalesced,
            Recorded::Pushed => SetOutcome::Recorded,
        }
    }

    pub fn set_mode(&mut self, mode: ThemeMode) -> SetOutcome {
        if self.state.current_mode != mode {
            self.state.current_mode = mode;
        }
        SetOutcome::ViewToggle
    }

    pub fn toggle_mode(&mut self) -> ThemeMode {
        self.set_mode(self.state.current_mode.toggled());
        self.state.current_mode
    }

    pub fn update_style(&mut self, mode: ThemeMode, key: &str, value: &str) -> Option<SetOutcome> {
        self.update_style_at(mode, key, value, Instant::now())
    }

    /// Set one token. Common tokens are written to both modes. Unknown
    /// tokens are rejected.
    pub fn update_style_at(
        &mut self,
        mode: ThemeMode,
        key: &str,
        value: &str,
        now: Instant,
    ) -> Option<SetOutcome> {
        if !is_known_token(key) {
            tracing::warn!(token = %key, "ignoring edit of unknown token");
            return None;
        }
        let mut next = self.state.clone();
        next.styles.set(mode, key, value);
        Some(self.set_theme_state_at(next, now))
    }

    pub fn apply_hsl_adjustments(&mut self, adjustments: HslAdjustments) -> SetOutcome {
        self.apply_hsl_adjustments_at(adjustments, Instant::now())
    }

    /// Recolor every color token of both modes from the checkpoint.
    ///
    /// The checkpoint is the baseline so repeated slider moves do not
    /// compound. Without one, the current state becomes the checkpoint.
    pub fn apply_hsl_adjustments_at(
        &mut self,
        adjustments: HslAdjustments,
        now: Instant,
    ) -> SetOutcome {
        let mut styles = match &self.checkpoint {
            Some(base) => base.styles.clone(),
            None => {
                self.save_theme_checkpoint();
                self.state.styles.clone()
            }
        };
        if !adjustments.is_neutral() {
            for mode in [ThemeMode::Light, ThemeMode::Dark] {
                for (key, value) in styles.mode_mut(mode).iter_mut() {
                    if is_color_token(key) {
                        *value = adjust_color_by_hsl(
                            value,
                            adjustments.hue_shift,
                            adjustments.saturation_scale,
                            adjustments.lightness_scale,
                        );
                    }
                }
            }
        }
        let next = ThemeEditorState {
            styles,
            current_mode: self.state.current_mode,
            preset: self.state.preset.clone(),
            hsl_adjustments: Some(adjustments),
        };
        self.set_theme_state_at(next, now)
    }

    // ====================================================================
    // Presets and checkpoint
    // ====================================================================

    pub fn apply_theme_preset(&mut self, name: &str) -> Result<(), PresetError> {
        self.apply_theme_preset_at(name, Instant::now())
    }

    /// Load a preset over the defaults and make it the checkpoint.
    pub fn apply_theme_preset_at(&mut self, name: &str, now: Instant) -> Result<(), PresetError> {
        if name != DEFAULT_PRESET && !self.presets.contains(name) {
            tracing::warn!(preset = %name, "cannot apply unknown preset");
            return Err(PresetError::not_found(name));
        }
        let next = self.preset_state(name);
        self.replace_as_step(next, now);
        self.checkpoint = Some(self.state.clone());
        tracing::debug!(preset = %name, "preset applied");
        Ok(())
    }

    pub fn reset_to_current_preset(&mut self) {
        self.reset_to_current_preset_at(Instant::now());
    }

    /// Discard edits and return to the selected preset (`default` when
    /// none is selected).
    pub fn reset_to_current_preset_at(&mut self, now: Instant) {
        let name = self
            .state
            .preset
            .clone()
            .unwrap_or_else(|| DEFAULT_PRESET.to_string());
        let next = self.preset_state(&name);
        self.replace_as_step(next, now);
        self.checkpoint = Some(self.state.clone());
    }

    pub fn save_theme_checkpoint(&mut self) {
        self.checkpoint = Some(self.state.clone());
    }

    pub fn restore_theme_checkpoint(&mut self) -> bool {
        self.restore_theme_checkpoint_at(Instant::now())
    }

    /// Return to the checkpoint as an undoable step. Returns `false` when
    /// no checkpoint has been saved.
    pub fn restore_theme_checkpoint_at(&mut self, now: Instant) -> bool {
        let Some(checkpoint) = &self.checkpoint else {
            tracing::warn!("no theme checkpoint to restore");
            return false;
        };
        let mut next = checkpoint.clone();
        next.current_mode = self.state.current_mode;
        self.replace_as_step(next, now);
        true
    }

    /// Whether the theme differs from its preset or carries adjustments.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        let name = self.state.preset.as_deref().unwrap_or(DEFAULT_PRESET);
        let baseline = self.presets.preset_theme_styles(name);
        self.state.styles != baseline || !self.state.effective_hsl_adjustments().is_neutral()
    }

    /// Store the current styles as a saved preset and select it.
    pub fn save_as_preset(&mut self, name: &str, label: &str) -> Result<(), PresetError> {
        let styles = ThemePresetStyles {
            light: self.state.styles.light.clone(),
            dark: self.state.styles.dark.clone(),
        };
        self.presets
            .add_saved_preset(name, ThemePreset::new(label, styles))?;
        self.state.preset = Some(name.to_string());
        self.state.hsl_adjustments = Some(HslAdjustments::NEUTRAL);
        self.checkpoint = Some(self.state.clone());
        Ok(())
    }

    // ====================================================================
    // History
    // ====================================================================

    pub fn undo(&mut self) -> bool {
        self.undo_at(Instant::now())
    }

    /// Step back one edit. Returns `false` when there is nothing to undo.
    pub fn undo_at(&mut self, now: Instant) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let mode = self.state.current_mode;
        let present = std::mem::take(&mut self.state);
        match self.history.step_back(present, now) {
            Some(restored) => self.restore(restored, mode),
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.redo_at(Instant::now())
    }

    /// Re-apply the most recently undone edit.
    pub fn redo_at(&mut self, now: Instant) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let mode = self.state.current_mode;
        let present = std::mem::take(&mut self.state);
        match self.history.step_forward(present, now) {
            Some(restored) => self.restore(restored, mode),
            None => false,
        }
    }

    // ====================================================================
    // Outputs
    // ====================================================================

    /// Write the current theme onto a document root.
    pub fn apply_to<T: ThemeTarget + ?Sized>(&self, target: &mut T) {
        apply_theme_to_element(&self.state, target);
    }

    /// Copy-paste CSS in the configured format.
    #[must_use]
    pub fn theme_code(&self) -> String {
        generate_theme_code(
            &self.state,
            self.output.color_format,
            self.output.tailwind_version,
        )
    }

    #[must_use]
    pub fn tailwind_config_code(&self) -> String {
        generate_tailwind_config_code(&self.state)
    }

    #[must_use]
    pub fn shadow_map(&self) -> ShadowMap {
        get_shadow_map(&self.state)
    }

    #[must_use]
    pub fn contrast_report(&self) -> Vec<ContrastCheck> {
        contrast_report(&self.state.styles, self.state.current_mode)
    }

    // ====================================================================
    // Internal
    // ====================================================================

    fn preset_state(&self, name: &str) -> ThemeEditorState {
        ThemeEditorState {
            styles: self.presets.preset_theme_styles(name),
            current_mode: self.state.current_mode,
            preset: Some(name.to_string()),
            hsl_adjustments: Some(HslAdjustments::NEUTRAL),
        }
    }

    /// Replace the state as its own undo step, bypassing coalescing.
    fn replace_as_step(&mut self, next: ThemeEditorState, now: Instant) {
        let previous = std::mem::replace(&mut self.state, next);
        self.history.push(previous, now);
    }

    fn restore(&mut self, mut restored: ThemeEditorState, mode: ThemeMode) -> bool {
        restored.current_mode = mode;
        self.checkpoint = Some(restored.clone());
        self.state = restored;
        tracing::debug!(
            past = self.history.past_len(),
            future = self.history.future_len(),
            "history step"
        );
        true
    }
}
