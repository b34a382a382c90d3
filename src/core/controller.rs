//! Draft-aware controller for the treatment-log form.
//!
//! The controller owns the field values and both signatures, persists a
//! whole-form draft through an injected [`DraftStore`] (on explicit save and
//! on every autosave tick), restores that draft on mount, validates before
//! submission and drives the submit / clear lifecycle:
//!
//! ```text
//! Idle ──submit──▶ Validating ──ok──▶ Submitting ──ok──▶ Submitted
//!  ▲                   │                  │
//!  └──── invalid ──────┘◀──── failed ─────┘
//! ```
//!
//! A confirmed clear brings any state back to `Idle` with an empty form.

use crate::config::{Config, DEFAULT_AUTOSAVE_SECS, DEFAULT_DRAFT_KEY, DEFAULT_SUBMIT_ROUTE};
use crate::core::autosave::AutosaveTimer;
use crate::core::submission::{
    Navigator, Notice, SUBMIT_SUCCESS_MESSAGE, SubmissionReceipt, Submitter,
};
use crate::core::validation::{ValidationErrors, validate};
use crate::errors::{AppError, AppResult};
use crate::models::catalog::{self, Vessel};
use crate::models::draft::{Signatures, TreatmentFormData, TreatmentLogDraft, TreatmentLogPayload};
use crate::models::form_field::{FormField, SignatureRole};
use crate::storage::DraftStore;
use chrono::Local;
use std::time::{Duration, Instant};

pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit form. Please try again.";

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub draft_key: String,
    pub autosave_interval: Duration,
    pub submit_route: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            draft_key: DEFAULT_DRAFT_KEY.to_string(),
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_SECS),
            submit_route: DEFAULT_SUBMIT_ROUTE.to_string(),
        }
    }
}

impl ControllerOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            draft_key: cfg.draft_key.clone(),
            autosave_interval: cfg.autosave_interval(),
            submit_route: cfg.submit_route.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Submitting,
    Submitted,
}

/// Result of one draft write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { timestamp: String },
    NotSaved { reason: String },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }
}

/// Handle for the single outstanding submission of a session.
#[derive(Debug)]
pub struct SubmitTicket {
    attempt: u64,
    payload: TreatmentLogPayload,
}

impl SubmitTicket {
    pub fn payload(&self) -> &TreatmentLogPayload {
        &self.payload
    }
}

#[derive(Debug)]
pub enum SubmitAttempt {
    /// Validation failed with this many field errors.
    Invalid(usize),
    Started(SubmitTicket),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResolution {
    Invalid(usize),
    Submitted(SubmissionReceipt),
    Failed(String),
    /// Late result for an unmounted form or a stale ticket.
    Ignored,
}

fn now_label() -> String {
    Local::now().format("%m/%d/%Y, %H:%M:%S").to_string()
}

pub struct DraftFormController<S: DraftStore> {
    store: S,
    options: ControllerOptions,
    form_data: TreatmentFormData,
    signatures: Signatures,
    errors: ValidationErrors,
    submit_error: Option<String>,
    state: FormState,
    is_draft: bool,
    last_saved: Option<String>,
    storage_warning: Option<String>,
    clear_requested: bool,
    mounted: bool,
    timer: AutosaveTimer,
    attempts: u64,
    in_flight: Option<u64>,
}

impl<S: DraftStore> DraftFormController<S> {
    pub fn mount(store: S, options: ControllerOptions) -> Self {
        Self::mount_at(store, options, Instant::now())
    }

    /// Mount the form, restoring any stored draft, with the autosave timer
    /// armed relative to `now`.
    pub fn mount_at(store: S, options: ControllerOptions, now: Instant) -> Self {
        let timer = AutosaveTimer::start(options.autosave_interval, now);
        let mut ctrl = Self {
            store,
            options,
            form_data: TreatmentFormData::default(),
            signatures: Signatures::default(),
            errors: ValidationErrors::default(),
            submit_error: None,
            state: FormState::Idle,
            is_draft: false,
            last_saved: None,
            storage_warning: None,
            clear_requested: false,
            mounted: true,
            timer,
            attempts: 0,
            in_flight: None,
        };
        ctrl.restore();
        ctrl
    }

    fn restore(&mut self) {
        let raw = match self.store.get(&self.options.draft_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                self.storage_warning = Some(format!("Could not read saved draft: {}", e));
                return;
            }
        };

        // unreadable drafts count as no draft
        if let Ok(draft) = TreatmentLogDraft::from_json(&raw) {
            self.signatures = draft.signatures();
            self.form_data = draft.form_data;
            self.is_draft = true;
            self.last_saved = Some(draft.timestamp).filter(|t| !t.is_empty());
        }
    }

    fn ensure_mounted(&self) -> AppResult<()> {
        if self.mounted {
            Ok(())
        } else {
            Err(AppError::Unmounted)
        }
    }

    fn ensure_editable(&self) -> AppResult<()> {
        self.ensure_mounted()?;
        if self.state == FormState::Submitted {
            return Err(AppError::AlreadySubmitted);
        }
        Ok(())
    }

    // ------------------------------------------------
    // Field edits
    // ------------------------------------------------

    pub fn on_field_change(&mut self, field: FormField, value: impl Into<String>) -> AppResult<()> {
        self.ensure_editable()?;
        self.form_data.set(field, value.into());
        self.errors.remove(field);
        Ok(())
    }

    pub fn on_signature_change(
        &mut self,
        role: SignatureRole,
        value: impl Into<String>,
    ) -> AppResult<()> {
        self.ensure_editable()?;
        self.signatures.set(role, value.into());
        self.errors.remove(role);
        Ok(())
    }

    // ------------------------------------------------
    // Draft persistence
    // ------------------------------------------------

    fn write_snapshot(&mut self) -> SaveOutcome {
        let timestamp = now_label();
        let draft = TreatmentLogDraft::new(&self.form_data, &self.signatures, timestamp.clone());

        let result = draft
            .to_json()
            .map_err(AppError::from)
            .and_then(|json| self.store.set(&self.options.draft_key, &json));

        match result {
            Ok(()) => {
                self.storage_warning = None;
                self.last_saved = Some(timestamp.clone());
                SaveOutcome::Saved { timestamp }
            }
            Err(e) => {
                let reason = format!("Draft not saved: {}", e);
                self.storage_warning = Some(reason.clone());
                SaveOutcome::NotSaved { reason }
            }
        }
    }

    pub fn on_save_draft(&mut self) -> AppResult<SaveOutcome> {
        self.ensure_editable()?;
        if self.clear_requested {
            return Err(AppError::ClearPending);
        }
        if self.state == FormState::Submitting {
            return Err(AppError::SubmissionInFlight);
        }

        let outcome = self.write_snapshot();
        if outcome.is_saved() {
            self.is_draft = true;
        }
        Ok(outcome)
    }

    /// One autosave cycle. Does nothing once unmounted or submitted.
    pub fn tick(&mut self) -> Option<SaveOutcome> {
        if !self.mounted || self.state == FormState::Submitted {
            return None;
        }
        Some(self.write_snapshot())
    }

    /// Run the autosave cycle if the timer is due at `now`.
    pub fn poll_autosave(&mut self, now: Instant) -> Option<SaveOutcome> {
        if !self.mounted || !self.timer.poll(now) {
            return None;
        }
        self.tick()
    }

    // ------------------------------------------------
    // Validation & submission
    // ------------------------------------------------

    pub fn validate(&self) -> ValidationErrors {
        validate(&self.form_data, &self.signatures)
    }

    pub fn on_submit(&mut self) -> AppResult<SubmitAttempt> {
        self.ensure_editable()?;
        if self.clear_requested {
            return Err(AppError::ClearPending);
        }
        if self.state == FormState::Submitting {
            return Err(AppError::SubmissionInFlight);
        }

        self.state = FormState::Validating;
        self.submit_error = None;
        self.errors = self.validate();

        if !self.errors.is_empty() {
            self.state = FormState::Idle;
            return Ok(SubmitAttempt::Invalid(self.errors.len()));
        }

        self.state = FormState::Submitting;
        self.attempts += 1;
        self.in_flight = Some(self.attempts);

        Ok(SubmitAttempt::Started(SubmitTicket {
            attempt: self.attempts,
            payload: TreatmentLogPayload {
                form_data: self.form_data.clone(),
                technician_signature: self.signatures.technician.clone(),
                operator_signature: self.signatures.operator.clone(),
            },
        }))
    }

    /// Apply the submission collaborator's answer for `ticket`.
    pub fn resolve_submission(
        &mut self,
        ticket: SubmitTicket,
        result: AppResult<SubmissionReceipt>,
        navigator: &mut dyn Navigator,
    ) -> SubmitResolution {
        if !self.mounted || self.in_flight != Some(ticket.attempt) {
            return SubmitResolution::Ignored;
        }
        self.in_flight = None;

        match result {
            Ok(receipt) => {
                if let Err(e) = self.store.delete(&self.options.draft_key) {
                    self.storage_warning = Some(format!("Could not remove saved draft: {}", e));
                }
                self.state = FormState::Submitted;
                self.is_draft = false;
                navigator.navigate(
                    &self.options.submit_route,
                    &Notice::success(SUBMIT_SUCCESS_MESSAGE),
                );
                SubmitResolution::Submitted(receipt)
            }
            Err(e) => {
                self.state = FormState::Idle;
                self.submit_error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                SubmitResolution::Failed(e.to_string())
            }
        }
    }

    /// Validate, submit through `submitter` and resolve in one step.
    pub fn submit_with(
        &mut self,
        submitter: &mut dyn Submitter,
        navigator: &mut dyn Navigator,
    ) -> AppResult<SubmitResolution> {
        match self.on_submit()? {
            SubmitAttempt::Invalid(n) => Ok(SubmitResolution::Invalid(n)),
            SubmitAttempt::Started(ticket) => {
                let result = submitter.submit(ticket.payload());
                Ok(self.resolve_submission(ticket, result, navigator))
            }
        }
    }

    // ------------------------------------------------
    // Clear
    // ------------------------------------------------

    pub fn request_clear(&mut self) -> AppResult<()> {
        self.ensure_mounted()?;
        if self.state == FormState::Submitting {
            return Err(AppError::SubmissionInFlight);
        }
        self.clear_requested = true;
        Ok(())
    }

    pub fn cancel_clear(&mut self) {
        self.clear_requested = false;
    }

    pub fn confirm_clear(&mut self) -> AppResult<()> {
        self.ensure_mounted()?;
        if !self.clear_requested {
            return Err(AppError::ClearNotRequested);
        }
        self.clear_requested = false;

        self.form_data = TreatmentFormData::default();
        self.signatures = Signatures::default();
        self.errors.clear();
        self.submit_error = None;
        self.is_draft = false;
        self.last_saved = None;
        self.state = FormState::Idle;

        match self.store.delete(&self.options.draft_key) {
            Ok(()) => self.storage_warning = None,
            Err(e) => {
                self.storage_warning = Some(format!("Could not remove saved draft: {}", e))
            }
        }
        Ok(())
    }

    // ------------------------------------------------
    // Lifecycle
    // ------------------------------------------------

    /// Stop the autosave timer; late submission results are ignored from now on.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.clear_requested = false;
        self.timer.cancel();
    }

    // ------------------------------------------------
    // Accessors
    // ------------------------------------------------

    pub fn form_data(&self) -> &TreatmentFormData {
        &self.form_data
    }

    pub fn signatures(&self) -> &Signatures {
        &self.signatures
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn is_draft(&self) -> bool {
        self.is_draft
    }

    /// Display label next to the save status.
    pub fn save_label(&self) -> &'static str {
        if self.is_draft { "Draft Saved" } else { "Auto-saved" }
    }

    pub fn last_saved(&self) -> Option<&str> {
        self.last_saved.as_deref()
    }

    pub fn storage_warning(&self) -> Option<&str> {
        self.storage_warning.as_deref()
    }

    pub fn is_clear_pending(&self) -> bool {
        self.clear_requested
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn timer(&self) -> &AutosaveTimer {
        &self.timer
    }

    pub fn draft_key(&self) -> &str {
        &self.options.draft_key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selected_vessel(&self) -> Option<&'static Vessel> {
        catalog::find_vessel(&self.form_data.vessel)
    }

    pub fn estimated_dye(&self) -> f64 {
        catalog::estimated_dye(&self.form_data.discharge_rate, &self.form_data.quantity_discharged)
    }
}
