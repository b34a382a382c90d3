use crate::cli::commands::ask_confirmation;
use crate::cli::parser::FormAction;
use crate::config::Config;
use crate::core::controller::{
    ControllerOptions, DraftFormController, SaveOutcome, SubmitResolution,
};
use crate::core::submission::{ConsoleNavigator, SqliteSubmitter};
use crate::core::validation::ValidationErrors;
use crate::db::drafts::SqliteDraftStore;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::catalog;
use crate::models::form_field::{FormField, SignatureRole};
use crate::storage::DraftStore;
use crate::ui::messages::{
    confirm_prompt, error, field_error, header, info, is_yes, success, warning,
};
use crate::utils::colors::{RESET, color_for_save_label, colorize_optional};
use crate::utils::formatting::{bold, litres, pad_right, signature_summary};
use rusqlite::Connection;
use std::fs;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

type Controller<'a> = DraftFormController<SqliteDraftStore<'a>>;

const LABEL_WIDTH: usize = 28;

pub fn handle(action: &FormAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    let store = SqliteDraftStore::new(&pool.conn);
    let mut ctrl = DraftFormController::mount(store, ControllerOptions::from_config(cfg));

    if let Some(w) = ctrl.storage_warning() {
        warning(w);
    }

    let result = match action {
        FormAction::Show => {
            print_form(&ctrl);
            Ok(())
        }
        FormAction::Set { pairs } => set_fields(&mut ctrl, &pool.conn, pairs),
        FormAction::Sign {
            technician,
            operator,
            clear_technician,
            clear_operator,
        } => {
            let mut changes: Vec<(SignatureRole, String)> = Vec::new();
            if let Some(v) = technician {
                changes.push((SignatureRole::Technician, read_signature(v)?));
            }
            if let Some(v) = operator {
                changes.push((SignatureRole::Operator, read_signature(v)?));
            }
            if *clear_technician {
                changes.push((SignatureRole::Technician, String::new()));
            }
            if *clear_operator {
                changes.push((SignatureRole::Operator, String::new()));
            }
            sign(&mut ctrl, &pool.conn, changes)
        }
        FormAction::Validate => {
            let errors = ctrl.validate();
            if errors.is_empty() {
                success("Form is valid and ready for submission.");
                Ok(())
            } else {
                print_errors(&errors);
                Err(AppError::ValidationFailed(errors.len()))
            }
        }
        FormAction::Submit => submit(&mut ctrl, &pool.conn),
        FormAction::Clear { yes } => {
            ctrl.request_clear()?;
            let confirmed = *yes
                || ask_confirmation(
                    "Clear all form data? Any unsaved changes will be lost permanently.",
                );
            if confirmed {
                clear(&mut ctrl, &pool.conn)
            } else {
                ctrl.cancel_clear();
                info("Operation cancelled.");
                Ok(())
            }
        }
        FormAction::Fill => fill(&mut ctrl, &pool.conn),
    };

    ctrl.unmount();
    result
}

/// `@path` reads the encoded signature from a file, anything else is literal.
fn read_signature(value: &str) -> AppResult<String> {
    match value.strip_prefix('@') {
        Some(path) => Ok(fs::read_to_string(path)?.trim_end().to_string()),
        None => Ok(value.to_string()),
    }
}

fn audit(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = log::audit(conn, operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
}

fn report_save(outcome: &SaveOutcome, label: &str) {
    match outcome {
        SaveOutcome::Saved { timestamp } => success(format!("{} at {}", label, timestamp)),
        SaveOutcome::NotSaved { reason } => warning(reason),
    }
}

fn save_draft<S: DraftStore>(
    ctrl: &mut DraftFormController<S>,
    conn: &Connection,
) -> AppResult<()> {
    let outcome = ctrl.on_save_draft()?;
    if outcome.is_saved() {
        audit(conn, "save_draft", ctrl.draft_key(), "Draft saved");
    }
    report_save(&outcome, "Draft saved");
    Ok(())
}

fn set_fields(ctrl: &mut Controller<'_>, conn: &Connection, pairs: &[String]) -> AppResult<()> {
    if pairs.len() % 2 != 0 {
        return Err(AppError::MissingValue(pairs[pairs.len() - 1].clone()));
    }

    // parse everything first so a typo leaves the draft untouched
    let mut edits = Vec::new();
    for pair in pairs.chunks(2) {
        edits.push((FormField::from_name(&pair[0])?, pair[1].clone()));
    }

    for (field, value) in edits {
        warn_unknown_option(field, &value);
        ctrl.on_field_change(field, value)?;
    }

    save_draft(ctrl, conn)
}

/// Soft check against the form's option lists; storage never rejects values.
fn warn_unknown_option(field: FormField, value: &str) {
    let known = match field {
        FormField::Vessel => catalog::find_vessel(value).is_some(),
        FormField::TankNumber => catalog::tank_label(value).is_some(),
        FormField::DyeColor => catalog::dye_label(value).is_some(),
        _ => true,
    };
    if !known && !value.is_empty() {
        warning(format!(
            "'{}' is not a known {} option (see `vesseltreat vessels`)",
            value,
            field.label()
        ));
    }
}

fn sign(
    ctrl: &mut Controller<'_>,
    conn: &Connection,
    changes: Vec<(SignatureRole, String)>,
) -> AppResult<()> {
    if changes.is_empty() {
        info("Nothing to do: use --technician, --operator or --clear-*.");
        return Ok(());
    }
    for (role, value) in changes {
        ctrl.on_signature_change(role, value)?;
    }
    save_draft(ctrl, conn)
}

fn submit<S: DraftStore>(ctrl: &mut DraftFormController<S>, conn: &Connection) -> AppResult<()> {
    let mut submitter = SqliteSubmitter::new(conn);
    let mut navigator = ConsoleNavigator::default();

    match ctrl.submit_with(&mut submitter, &mut navigator)? {
        SubmitResolution::Submitted(receipt) => {
            info(format!("Treatment log #{} recorded.", receipt.id));
            Ok(())
        }
        SubmitResolution::Invalid(n) => {
            print_errors(ctrl.errors());
            Err(AppError::ValidationFailed(n))
        }
        SubmitResolution::Failed(reason) => {
            if let Some(msg) = ctrl.submit_error() {
                error(msg);
            }
            Err(AppError::Submission(reason))
        }
        SubmitResolution::Ignored => Ok(()),
    }
}

fn clear<S: DraftStore>(ctrl: &mut DraftFormController<S>, conn: &Connection) -> AppResult<()> {
    ctrl.confirm_clear()?;
    if let Some(w) = ctrl.storage_warning() {
        warning(w);
    }
    audit(conn, "clear", ctrl.draft_key(), "Form cleared and draft removed");
    success("Form cleared.");
    Ok(())
}

fn print_errors(errors: &ValidationErrors) {
    error(format!("The form has {} error(s):", errors.len()));
    for (key, message) in errors.iter() {
        field_error(key, message);
    }
}

fn described(value: &str, label: Option<&str>) -> String {
    match label {
        Some(l) => format!("{} ({})", l, value),
        None => colorize_optional(value),
    }
}

fn print_form<S: DraftStore>(ctrl: &DraftFormController<S>) {
    let form = ctrl.form_data();
    let sigs = ctrl.signatures();

    header("Treatment Log");

    let row = |label: &str, value: String| {
        println!("{} : {}", pad_right(label, LABEL_WIDTH), value);
    };

    row(
        FormField::Vessel.label(),
        described(&form.vessel, ctrl.selected_vessel().map(|v| v.name)),
    );
    row(
        FormField::TankNumber.label(),
        described(&form.tank_number, catalog::tank_label(&form.tank_number)),
    );
    row(
        FormField::DyeColor.label(),
        described(&form.dye_color, catalog::dye_label(&form.dye_color)),
    );
    row(
        FormField::DischargeRate.label(),
        colorize_optional(&form.discharge_rate),
    );
    row(
        FormField::QuantityDischarged.label(),
        colorize_optional(&form.quantity_discharged),
    );
    row("Estimated Dye Injected", bold(&litres(ctrl.estimated_dye())));

    if form.comments.is_empty() {
        row(FormField::Comments.label(), colorize_optional(""));
    } else {
        let indent = " ".repeat(LABEL_WIDTH + 3);
        let wrapped = textwrap::wrap(&form.comments, 60).join(&format!("\n{}", indent));
        row(FormField::Comments.label(), wrapped);
    }

    row(
        SignatureRole::Technician.label(),
        signature_summary(&sigs.technician),
    );
    row(
        SignatureRole::Operator.label(),
        signature_summary(&sigs.operator),
    );

    if let Some(v) = ctrl.selected_vessel() {
        println!("\nVessel Information");
        println!("  Type:           {}", v.kind);
        println!("  Flag:           {}", v.flag);
        println!("  Capacity:       {}", v.capacity);
        println!("  Last Treatment: {}", v.last_treatment);
    }

    println!();
    let color = color_for_save_label(ctrl.is_draft());
    match ctrl.last_saved() {
        Some(ts) => println!("{}{}{} | Last saved: {}", color, ctrl.save_label(), RESET, ts),
        None => println!("{}{}{}", color, ctrl.save_label(), RESET),
    }
}

const FILL_HELP: &str = "Commands:
  set <field> <value>          set a field (vessel, tankNumber, dyeColor,
                               dischargeRate, quantityDischarged, comments)
  sign <technician|operator> <value|@file>
  unsign <technician|operator>
  save                         save the draft now
  validate                     check the form
  submit                       submit for approval
  clear                        clear the form (asks for confirmation)
  show                         print the form
  quit                         leave the session";

/// Read stdin line by line on its own thread so the session can keep the
/// autosave timer running while nobody types. The channel closes at EOF.
fn spawn_line_reader() -> Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Wait for the next line, but no longer than the autosave timer allows.
fn next_line(
    ctrl: &Controller<'_>,
    lines: &Receiver<io::Result<String>>,
) -> Result<io::Result<String>, RecvTimeoutError> {
    match ctrl.timer().remaining(Instant::now()) {
        Some(wait) => lines.recv_timeout(wait),
        None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
    }
}

/// Returns true when the tick stored the draft.
fn autosave(ctrl: &mut Controller<'_>, conn: &Connection) -> bool {
    let Some(outcome) = ctrl.poll_autosave(Instant::now()) else {
        return false;
    };
    if outcome.is_saved() {
        audit(conn, "autosave", ctrl.draft_key(), "Draft auto-saved");
    }
    report_save(&outcome, "Auto-saved");
    outcome.is_saved()
}

/// Interactive form session: one command per stdin line. Autosave keeps
/// ticking between commands, idle or not.
fn fill(ctrl: &mut Controller<'_>, conn: &Connection) -> AppResult<()> {
    let lines = spawn_line_reader();
    let mut dirty = false;

    info(format!(
        "Form session open (autosave every {}s). Type `help` for commands.",
        ctrl.timer().interval().as_secs()
    ));

    loop {
        print!("form> ");
        let _ = io::stdout().flush();

        let line = match next_line(ctrl, &lines) {
            Ok(line) => line?,
            Err(RecvTimeoutError::Timeout) => {
                if autosave(ctrl, conn) {
                    dirty = false;
                }
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        };

        if autosave(ctrl, conn) {
            dirty = false;
        }

        let trimmed = line.trim();
        let (cmd, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let rest = rest.trim();

        let step: AppResult<bool> = match cmd {
            "" => Ok(false),
            "help" => {
                println!("{}", FILL_HELP);
                Ok(false)
            }
            "quit" | "exit" => break,
            "set" => {
                let (name, value) = rest.split_once(' ').unwrap_or((rest, ""));
                FormField::from_name(name).and_then(|field| {
                    warn_unknown_option(field, value.trim());
                    ctrl.on_field_change(field, value.trim())?;
                    dirty = true;
                    Ok(false)
                })
            }
            "sign" | "unsign" => {
                let (role, value) = rest.split_once(' ').unwrap_or((rest, ""));
                SignatureRole::from_name(role).and_then(|role| {
                    let value = if cmd == "sign" {
                        read_signature(value.trim())?
                    } else {
                        String::new()
                    };
                    ctrl.on_signature_change(role, value)?;
                    dirty = true;
                    Ok(false)
                })
            }
            "save" => save_draft(ctrl, conn).map(|_| {
                dirty = false;
                false
            }),
            "validate" => {
                let errors = ctrl.validate();
                if errors.is_empty() {
                    success("Form is valid and ready for submission.");
                } else {
                    print_errors(&errors);
                }
                Ok(false)
            }
            // a successful submission navigates away and ends the session
            "submit" => submit(ctrl, conn).map(|_| true),
            "clear" => ctrl.request_clear().and_then(|_| {
                warning("Clear all form data? Any unsaved changes will be lost permanently.");
                confirm_prompt();
                if matches!(lines.recv(), Ok(Ok(answer)) if is_yes(&answer)) {
                    clear(ctrl, conn)?;
                    dirty = false;
                } else {
                    ctrl.cancel_clear();
                    info("Operation cancelled.");
                }
                Ok(false)
            }),
            "show" => {
                print_form(ctrl);
                Ok(false)
            }
            other => Err(AppError::Other(format!(
                "unknown command '{}' (type `help`)",
                other
            ))),
        };

        match step {
            Ok(true) => {
                dirty = false;
                break;
            }
            Ok(false) => {}
            // errors inside the session are reported and the session goes on
            Err(e) => error(e),
        }
    }

    if dirty {
        warning("Edits made after the last save were not stored.");
    }
    info("Form session closed.");
    Ok(())
}
