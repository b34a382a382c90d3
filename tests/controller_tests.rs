use std::collections::VecDeque;
use std::time::{Duration, Instant};

use vesseltreat::core::controller::{
    ControllerOptions, DraftFormController, FormState, SUBMIT_FAILED_MESSAGE, SaveOutcome,
    SubmitAttempt, SubmitResolution,
};
use vesseltreat::core::submission::{
    Navigator, Notice, SUBMIT_SUCCESS_MESSAGE, SubmissionReceipt, Submitter,
};
use vesseltreat::errors::{AppError, AppResult};
use vesseltreat::models::draft::{TreatmentLogDraft, TreatmentLogPayload};
use vesseltreat::models::form_field::{FormField, SignatureRole};
use vesseltreat::storage::{DraftStore, MemoryStore};

const KEY: &str = "treatmentLogDraft";

#[derive(Default)]
struct RecordingNavigator {
    visits: Vec<(String, Notice)>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: &str, notice: &Notice) {
        self.visits.push((route.to_string(), notice.clone()));
    }
}

/// Answers submissions from a script, recording every payload it sees.
#[derive(Default)]
struct ScriptedSubmitter {
    script: VecDeque<AppResult<SubmissionReceipt>>,
    calls: Vec<TreatmentLogPayload>,
}

impl ScriptedSubmitter {
    fn answering(results: Vec<AppResult<SubmissionReceipt>>) -> Self {
        Self {
            script: results.into(),
            calls: Vec::new(),
        }
    }
}

impl Submitter for ScriptedSubmitter {
    fn submit(&mut self, payload: &TreatmentLogPayload) -> AppResult<SubmissionReceipt> {
        self.calls.push(payload.clone());
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Submission("no scripted answer".into())))
    }
}

/// Store whose reads and writes always fail.
struct BrokenStore;

impl DraftStore for BrokenStore {
    fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::Storage("storage unavailable".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::Storage("storage unavailable".into()))
    }

    fn delete(&mut self, _key: &str) -> AppResult<()> {
        Err(AppError::Storage("storage unavailable".into()))
    }
}

fn receipt(id: i64) -> SubmissionReceipt {
    SubmissionReceipt {
        id,
        submitted_at: "2025-07-14T08:30:00+00:00".into(),
    }
}

fn mount(store: &mut MemoryStore) -> DraftFormController<&mut MemoryStore> {
    DraftFormController::mount(store, ControllerOptions::default())
}

fn fill_valid<S: DraftStore>(ctrl: &mut DraftFormController<S>) {
    ctrl.on_field_change(FormField::Vessel, "vessel-001").unwrap();
    ctrl.on_field_change(FormField::TankNumber, "tank-1").unwrap();
    ctrl.on_field_change(FormField::DyeColor, "blue").unwrap();
    ctrl.on_field_change(FormField::DischargeRate, "10").unwrap();
    ctrl.on_field_change(FormField::QuantityDischarged, "100").unwrap();
    ctrl.on_field_change(FormField::Comments, "Port side first").unwrap();
    ctrl.on_signature_change(SignatureRole::Technician, "data:image/png;base64,AAA")
        .unwrap();
    ctrl.on_signature_change(SignatureRole::Operator, "data:image/png;base64,BBB")
        .unwrap();
}

fn stored(store: &MemoryStore) -> Option<TreatmentLogDraft> {
    store
        .get(KEY)
        .unwrap()
        .map(|raw| TreatmentLogDraft::from_json(&raw).unwrap())
}

// ------------------------------------------------
// Field edits
// ------------------------------------------------

#[test]
fn field_change_only_touches_the_named_field() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);

    for field in FormField::ALL {
        let before = ctrl.form_data().clone();
        ctrl.on_field_change(field, "changed").unwrap();

        for other in FormField::ALL.iter().filter(|f| **f != field) {
            assert_eq!(ctrl.form_data().get(*other), before.get(*other));
        }
        assert_eq!(ctrl.form_data().get(field), "changed");
        ctrl.on_field_change(field, before.get(field)).unwrap();
    }
}

#[test]
fn field_change_clears_only_that_fields_error() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    let mut nav = RecordingNavigator::default();
    let mut sub = ScriptedSubmitter::default();

    let res = ctrl.submit_with(&mut sub, &mut nav).unwrap();
    assert_eq!(res, SubmitResolution::Invalid(7));
    assert!(ctrl.errors().contains(FormField::Vessel));

    ctrl.on_field_change(FormField::Vessel, "vessel-002").unwrap();
    assert!(!ctrl.errors().contains(FormField::Vessel));
    assert!(ctrl.errors().contains(FormField::TankNumber));

    ctrl.on_signature_change(SignatureRole::Operator, "sig").unwrap();
    assert!(!ctrl.errors().contains(SignatureRole::Operator));
    assert!(ctrl.errors().contains(SignatureRole::Technician));
    assert_eq!(ctrl.errors().len(), 5);
}

#[test]
fn field_change_does_not_write_storage() {
    let mut store = MemoryStore::new();
    {
        let mut ctrl = mount(&mut store);
        fill_valid(&mut ctrl);
    }
    assert!(store.is_empty());
}

// ------------------------------------------------
// Save & restore
// ------------------------------------------------

#[test]
fn saved_draft_restores_identically_on_fresh_mount() {
    let mut store = MemoryStore::new();
    let (form, sigs, saved_at) = {
        let mut ctrl = mount(&mut store);
        fill_valid(&mut ctrl);
        let outcome = ctrl.on_save_draft().unwrap();
        assert!(outcome.is_saved());
        assert!(ctrl.is_draft());
        assert_eq!(ctrl.save_label(), "Draft Saved");
        (
            ctrl.form_data().clone(),
            ctrl.signatures().clone(),
            ctrl.last_saved().map(str::to_string),
        )
    };

    let ctrl = mount(&mut store);
    assert_eq!(ctrl.form_data(), &form);
    assert_eq!(ctrl.signatures(), &sigs);
    assert!(ctrl.is_draft());
    assert_eq!(ctrl.last_saved().map(str::to_string), saved_at);
    assert_eq!(ctrl.state(), FormState::Idle);
}

#[test]
fn saving_twice_changes_only_the_timestamp() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);

    ctrl.on_save_draft().unwrap();
    let mut first = stored(ctrl.store()).unwrap();
    ctrl.on_save_draft().unwrap();
    let mut second = stored(ctrl.store()).unwrap();

    first.timestamp.clear();
    second.timestamp.clear();
    assert_eq!(first, second);
}

#[test]
fn saved_timestamp_matches_last_saved() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    ctrl.on_field_change(FormField::Comments, "only a note").unwrap();

    let SaveOutcome::Saved { timestamp } = ctrl.on_save_draft().unwrap() else {
        panic!("draft should be saved");
    };
    assert_eq!(ctrl.last_saved(), Some(timestamp.as_str()));
    assert_eq!(stored(ctrl.store()).unwrap().timestamp, timestamp);
}

#[test]
fn draft_json_uses_camel_case_keys() {
    let mut store = MemoryStore::new();
    {
        let mut ctrl = mount(&mut store);
        fill_valid(&mut ctrl);
        ctrl.on_save_draft().unwrap();
    }

    let raw = store.get(KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["formData"]["tankNumber"], "tank-1");
    assert_eq!(value["formData"]["quantityDischarged"], "100");
    assert_eq!(value["technicianSignature"], "data:image/png;base64,AAA");
    assert_eq!(value["operatorSignature"], "data:image/png;base64,BBB");
    assert!(value["timestamp"].is_string());
}

#[test]
fn restore_uses_stored_timestamp() {
    let mut store = MemoryStore::new();
    store
        .set(
            KEY,
            r#"{"formData":{"vessel":"vessel-003","tankNumber":"tank-5","dyeColor":"red",
                "dischargeRate":"4","quantityDischarged":"80","comments":""},
                "technicianSignature":"t","operatorSignature":"","timestamp":"07/14/2025, 08:30:00"}"#,
        )
        .unwrap();

    let ctrl = mount(&mut store);
    assert_eq!(ctrl.form_data().vessel, "vessel-003");
    assert_eq!(ctrl.signatures().technician, "t");
    assert_eq!(ctrl.signatures().operator, "");
    assert_eq!(ctrl.last_saved(), Some("07/14/2025, 08:30:00"));
    assert!(ctrl.is_draft());
    assert_eq!(ctrl.selected_vessel().map(|v| v.name), Some("MV Nordic Star"));
}

#[test]
fn partial_draft_fills_missing_keys_with_empty_values() {
    let mut store = MemoryStore::new();
    store
        .set(KEY, r#"{"formData":{"vessel":"vessel-002"}}"#)
        .unwrap();

    let ctrl = mount(&mut store);
    assert_eq!(ctrl.form_data().vessel, "vessel-002");
    assert_eq!(ctrl.form_data().tank_number, "");
    assert_eq!(ctrl.signatures().technician, "");
    assert!(ctrl.is_draft());
    assert_eq!(ctrl.last_saved(), None);
}

#[test]
fn null_members_restore_as_empty_values() {
    let mut store = MemoryStore::new();
    store
        .set(
            KEY,
            r#"{"formData":null,"technicianSignature":"data:tech","operatorSignature":"data:op","timestamp":"07/14/2025, 08:30:00"}"#,
        )
        .unwrap();

    let ctrl = mount(&mut store);
    assert!(ctrl.form_data().is_empty());
    assert_eq!(ctrl.signatures().technician, "data:tech");
    assert_eq!(ctrl.signatures().operator, "data:op");
    assert!(ctrl.is_draft());
    assert_eq!(ctrl.last_saved(), Some("07/14/2025, 08:30:00"));

    let mut store = MemoryStore::new();
    store
        .set(
            KEY,
            r#"{"formData":{"vessel":"vessel-003","comments":null},"technicianSignature":null,"timestamp":null}"#,
        )
        .unwrap();

    let ctrl = mount(&mut store);
    assert_eq!(ctrl.form_data().vessel, "vessel-003");
    assert_eq!(ctrl.form_data().comments, "");
    assert_eq!(ctrl.signatures().technician, "");
    assert!(ctrl.is_draft());
    assert_eq!(ctrl.last_saved(), None);
}

#[test]
fn corrupt_draft_is_treated_as_no_draft() {
    let mut store = MemoryStore::new();
    store.set(KEY, "{not json at all").unwrap();

    let ctrl = mount(&mut store);
    assert!(ctrl.form_data().is_empty());
    assert!(!ctrl.is_draft());
    assert_eq!(ctrl.last_saved(), None);
    assert_eq!(ctrl.storage_warning(), None);
    assert_eq!(ctrl.state(), FormState::Idle);
}

#[test]
fn unreadable_storage_mounts_empty_with_warning() {
    let ctrl = DraftFormController::mount(BrokenStore, ControllerOptions::default());
    assert!(ctrl.form_data().is_empty());
    assert!(!ctrl.is_draft());
    assert!(ctrl.storage_warning().is_some());
}

#[test]
fn quota_failure_degrades_to_soft_warning() {
    let mut store = MemoryStore::with_quota(16);
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);
    let before = ctrl.form_data().clone();

    let outcome = ctrl.on_save_draft().unwrap();
    assert!(matches!(outcome, SaveOutcome::NotSaved { .. }));
    assert!(ctrl.storage_warning().unwrap().contains("quota exceeded"));
    assert!(!ctrl.is_draft());
    assert_eq!(ctrl.last_saved(), None);
    assert_eq!(ctrl.form_data(), &before);
    assert_eq!(ctrl.state(), FormState::Idle);

    // autosave degrades the same way
    assert!(matches!(ctrl.tick(), Some(SaveOutcome::NotSaved { .. })));
    drop(ctrl);
    assert!(store.is_empty());

    store.set_quota(None);
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);
    assert!(ctrl.on_save_draft().unwrap().is_saved());
    assert_eq!(ctrl.storage_warning(), None);
}

#[test]
fn separate_draft_keys_do_not_share_state() {
    let mut store = MemoryStore::new();
    let other = ControllerOptions {
        draft_key: "otherDraft".into(),
        ..ControllerOptions::default()
    };

    {
        let mut ctrl = DraftFormController::mount(&mut store, other.clone());
        ctrl.on_field_change(FormField::Vessel, "vessel-002").unwrap();
        ctrl.on_save_draft().unwrap();
        assert_eq!(ctrl.draft_key(), "otherDraft");
    }

    let ctrl = mount(&mut store);
    assert!(ctrl.form_data().is_empty());
    drop(ctrl);

    let ctrl = DraftFormController::mount(&mut store, other);
    assert_eq!(ctrl.form_data().vessel, "vessel-002");
}

// ------------------------------------------------
// Autosave
// ------------------------------------------------

#[test]
fn autosave_fires_once_per_interval() {
    let mut store = MemoryStore::new();
    let t0 = Instant::now();
    let mut ctrl = DraftFormController::mount_at(&mut store, ControllerOptions::default(), t0);
    ctrl.on_field_change(FormField::DyeColor, "green").unwrap();

    assert!(ctrl.poll_autosave(t0 + Duration::from_secs(29)).is_none());
    assert!(ctrl.store().is_empty());

    let outcome = ctrl.poll_autosave(t0 + Duration::from_secs(30));
    assert!(matches!(outcome, Some(SaveOutcome::Saved { .. })));
    assert!(ctrl.store().contains(KEY));
    assert!(ctrl.last_saved().is_some());
    // autosave only refreshes the timestamp; the label stays "Auto-saved"
    assert!(!ctrl.is_draft());
    assert_eq!(ctrl.save_label(), "Auto-saved");

    assert!(ctrl.poll_autosave(t0 + Duration::from_secs(31)).is_none());
    assert!(ctrl.poll_autosave(t0 + Duration::from_secs(60)).is_some());
}

#[test]
fn missed_intervals_collapse_into_one_tick() {
    let mut store = MemoryStore::new();
    let t0 = Instant::now();
    let mut ctrl = DraftFormController::mount_at(&mut store, ControllerOptions::default(), t0);

    let late = t0 + Duration::from_secs(95);
    assert!(ctrl.poll_autosave(late).is_some());
    assert!(ctrl.poll_autosave(late).is_none());
    assert_eq!(
        ctrl.timer().remaining(late),
        Some(Duration::from_secs(30))
    );
}

#[test]
fn autosave_after_draft_save_keeps_draft_label() {
    let mut store = MemoryStore::new();
    let t0 = Instant::now();
    let mut ctrl = DraftFormController::mount_at(&mut store, ControllerOptions::default(), t0);
    ctrl.on_save_draft().unwrap();

    assert!(ctrl.poll_autosave(t0 + Duration::from_secs(30)).is_some());
    assert!(ctrl.is_draft());
}

#[test]
fn autosave_serializes_the_snapshot_at_tick_time() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);

    ctrl.on_field_change(FormField::Comments, "first").unwrap();
    ctrl.tick();
    ctrl.on_field_change(FormField::Comments, "second").unwrap();
    ctrl.tick();

    let draft = stored(ctrl.store()).unwrap();
    assert_eq!(draft.form_data.comments, "second");
}

#[test]
fn unmount_cancels_the_timer() {
    let mut store = MemoryStore::new();
    let t0 = Instant::now();
    let mut ctrl = DraftFormController::mount_at(&mut store, ControllerOptions::default(), t0);
    assert!(ctrl.timer().is_active());

    ctrl.unmount();
    assert!(!ctrl.is_mounted());
    assert!(!ctrl.timer().is_active());
    assert!(ctrl.poll_autosave(t0 + Duration::from_secs(300)).is_none());
    assert!(ctrl.tick().is_none());
    assert!(ctrl.store().is_empty());
}

// ------------------------------------------------
// Submission
// ------------------------------------------------

#[test]
fn invalid_submit_stays_idle_and_never_calls_the_submitter() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);
    ctrl.on_field_change(FormField::DischargeRate, "-5").unwrap();

    let mut sub = ScriptedSubmitter::default();
    let mut nav = RecordingNavigator::default();
    let res = ctrl.submit_with(&mut sub, &mut nav).unwrap();

    assert_eq!(res, SubmitResolution::Invalid(1));
    assert_eq!(
        ctrl.errors().get(FormField::DischargeRate),
        Some("Please enter a valid discharge rate")
    );
    assert_eq!(ctrl.state(), FormState::Idle);
    assert!(sub.calls.is_empty());
    assert!(nav.visits.is_empty());
    assert!(ctrl.store().is_empty());
}

#[test]
fn successful_submit_deletes_draft_and_navigates() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);
    ctrl.on_save_draft().unwrap();

    let mut sub = ScriptedSubmitter::answering(vec![Ok(receipt(7))]);
    let mut nav = RecordingNavigator::default();
    let res = ctrl.submit_with(&mut sub, &mut nav).unwrap();

    assert_eq!(res, SubmitResolution::Submitted(receipt(7)));
    assert_eq!(ctrl.state(), FormState::Submitted);
    assert!(!ctrl.is_draft());
    assert!(!ctrl.store().contains(KEY));

    assert_eq!(sub.calls.len(), 1);
    assert_eq!(sub.calls[0].form_data, *ctrl.form_data());
    assert_eq!(sub.calls[0].technician_signature, "data:image/png;base64,AAA");
    assert_eq!(sub.calls[0].operator_signature, "data:image/png;base64,BBB");

    assert_eq!(nav.visits.len(), 1);
    let (route, notice) = &nav.visits[0];
    assert_eq!(route, "/dashboard");
    assert_eq!(notice.message, SUBMIT_SUCCESS_MESSAGE);
}

#[test]
fn failed_submit_keeps_everything_and_retry_succeeds() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);
    ctrl.on_save_draft().unwrap();
    let before = ctrl.form_data().clone();

    let mut sub = ScriptedSubmitter::answering(vec![
        Err(AppError::Submission("network down".into())),
        Ok(receipt(1)),
    ]);
    let mut nav = RecordingNavigator::default();

    let res = ctrl.submit_with(&mut sub, &mut nav).unwrap();
    assert!(matches!(res, SubmitResolution::Failed(ref r) if r.contains("network down")));
    assert_eq!(ctrl.state(), FormState::Idle);
    assert_eq!(ctrl.submit_error(), Some(SUBMIT_FAILED_MESSAGE));
    assert!(ctrl.errors().is_empty());
    assert_eq!(ctrl.form_data(), &before);
    assert!(ctrl.store().contains(KEY));
    assert!(nav.visits.is_empty());

    let res = ctrl.submit_with(&mut sub, &mut nav).unwrap();
    assert_eq!(res, SubmitResolution::Submitted(receipt(1)));
    assert_eq!(ctrl.submit_error(), None);
    assert_eq!(sub.calls.len(), 2);
    assert_eq!(sub.calls[0], sub.calls[1]);
}

#[test]
fn only_one_submission_may_be_in_flight() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);

    let SubmitAttempt::Started(ticket) = ctrl.on_submit().unwrap() else {
        panic!("valid form should start a submission");
    };
    assert!(ctrl.is_submitting());
    assert!(matches!(ctrl.on_submit(), Err(AppError::SubmissionInFlight)));
    assert!(matches!(ctrl.on_save_draft(), Err(AppError::SubmissionInFlight)));
    assert!(matches!(ctrl.request_clear(), Err(AppError::SubmissionInFlight)));

    let mut nav = RecordingNavigator::default();
    let res = ctrl.resolve_submission(ticket, Ok(receipt(3)), &mut nav);
    assert_eq!(res, SubmitResolution::Submitted(receipt(3)));
}

#[test]
fn late_result_after_unmount_is_ignored() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);
    ctrl.on_save_draft().unwrap();

    let SubmitAttempt::Started(ticket) = ctrl.on_submit().unwrap() else {
        panic!("valid form should start a submission");
    };
    ctrl.unmount();

    let mut nav = RecordingNavigator::default();
    let res = ctrl.resolve_submission(ticket, Ok(receipt(9)), &mut nav);
    assert_eq!(res, SubmitResolution::Ignored);
    assert!(nav.visits.is_empty());
    assert_eq!(ctrl.state(), FormState::Submitting);
    assert!(ctrl.store().contains(KEY));
}

#[test]
fn submitted_form_rejects_further_edits_and_autosave() {
    let mut store = MemoryStore::new();
    let t0 = Instant::now();
    let mut ctrl = DraftFormController::mount_at(&mut store, ControllerOptions::default(), t0);
    fill_valid(&mut ctrl);

    let mut sub = ScriptedSubmitter::answering(vec![Ok(receipt(2))]);
    let mut nav = RecordingNavigator::default();
    ctrl.submit_with(&mut sub, &mut nav).unwrap();

    assert!(matches!(
        ctrl.on_field_change(FormField::Comments, "late"),
        Err(AppError::AlreadySubmitted)
    ));
    assert!(matches!(ctrl.on_submit(), Err(AppError::AlreadySubmitted)));
    assert!(ctrl.poll_autosave(t0 + Duration::from_secs(30)).is_none());
    assert!(!ctrl.store().contains(KEY));
}

#[test]
fn edits_after_unmount_are_rejected() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    ctrl.unmount();

    assert!(matches!(
        ctrl.on_field_change(FormField::Vessel, "vessel-001"),
        Err(AppError::Unmounted)
    ));
    assert!(matches!(ctrl.on_save_draft(), Err(AppError::Unmounted)));
}

// ------------------------------------------------
// Clear
// ------------------------------------------------

#[test]
fn confirm_clear_without_request_is_refused() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    assert!(matches!(ctrl.confirm_clear(), Err(AppError::ClearNotRequested)));
}

#[test]
fn confirmed_clear_resets_form_and_deletes_draft() {
    let mut store = MemoryStore::new();
    {
        let mut ctrl = mount(&mut store);
        fill_valid(&mut ctrl);
        ctrl.on_save_draft().unwrap();
        ctrl.on_field_change(FormField::Vessel, "").unwrap();
        assert!(matches!(ctrl.on_submit().unwrap(), SubmitAttempt::Invalid(1)));
        assert!(!ctrl.errors().is_empty());

        ctrl.request_clear().unwrap();
        assert!(ctrl.is_clear_pending());
        ctrl.confirm_clear().unwrap();

        assert!(ctrl.form_data().is_empty());
        assert_eq!(ctrl.signatures().technician, "");
        assert_eq!(ctrl.signatures().operator, "");
        assert!(ctrl.errors().is_empty());
        assert!(!ctrl.is_draft());
        assert_eq!(ctrl.last_saved(), None);
        assert!(!ctrl.is_clear_pending());
        assert_eq!(ctrl.state(), FormState::Idle);
    }
    assert!(!store.contains(KEY));

    let ctrl = mount(&mut store);
    assert!(ctrl.form_data().is_empty());
    assert!(!ctrl.is_draft());
}

#[test]
fn pending_clear_blocks_save_and_submit_until_cancelled() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);

    ctrl.request_clear().unwrap();
    assert!(matches!(ctrl.on_save_draft(), Err(AppError::ClearPending)));
    assert!(matches!(ctrl.on_submit(), Err(AppError::ClearPending)));

    ctrl.cancel_clear();
    assert!(!ctrl.is_clear_pending());
    assert_eq!(ctrl.form_data().vessel, "vessel-001");
    assert!(ctrl.on_save_draft().unwrap().is_saved());
}

#[test]
fn clear_after_failed_submit_drops_the_top_level_error() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    fill_valid(&mut ctrl);

    let mut sub = ScriptedSubmitter::answering(vec![Err(AppError::Submission("down".into()))]);
    let mut nav = RecordingNavigator::default();
    ctrl.submit_with(&mut sub, &mut nav).unwrap();
    assert!(ctrl.submit_error().is_some());

    ctrl.request_clear().unwrap();
    ctrl.confirm_clear().unwrap();
    assert_eq!(ctrl.submit_error(), None);
}

#[test]
fn clear_with_broken_storage_still_resets_the_form() {
    let mut ctrl = DraftFormController::mount(BrokenStore, ControllerOptions::default());
    fill_valid(&mut ctrl);

    ctrl.request_clear().unwrap();
    ctrl.confirm_clear().unwrap();
    assert!(ctrl.form_data().is_empty());
    assert!(ctrl.storage_warning().is_some());
}

// ------------------------------------------------
// Derived values
// ------------------------------------------------

#[test]
fn estimated_dye_needs_both_numeric_fields() {
    let mut store = MemoryStore::new();
    let mut ctrl = mount(&mut store);
    assert_eq!(ctrl.estimated_dye(), 0.0);

    ctrl.on_field_change(FormField::QuantityDischarged, "200").unwrap();
    assert_eq!(ctrl.estimated_dye(), 0.0);

    ctrl.on_field_change(FormField::DischargeRate, "12").unwrap();
    assert!((ctrl.estimated_dye() - 1.0).abs() < 1e-9);
}
