//! Scripted sessions through the interactive menu
//!
//! Each test feeds a fixed sequence of answers and checks both what the menu
//! printed and what ended up in the store.

use proptest::prelude::*;
use secrecy::ExposeSecret;
use sshbook_core::config::SshSettings;
use sshbook_core::SecretBackend;

use crate::fixtures::{
    capture_warnings, create_manager_with_failing_secrets, create_test_manager, run_menu,
    run_menu_with, run_menu_with_passwords, sample_db_profile, sample_web_profile,
    BrokenLauncher, RecordingLauncher, ScriptedPasswords,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Anything that is not a menu entry is reported and leaves the store alone.
    #[test]
    fn invalid_main_choice_changes_nothing(choice in "[a-pr-z7-9]{1,4}|0|[1-6][0-9]{1,2}") {
        let (manager, _secrets, _temp) = create_test_manager();
        manager.add(sample_web_profile()).unwrap();
        let launcher = RecordingLauncher::new();

        let output = run_menu(&format!("{choice}\n6\n"), &manager, &launcher);

        let expected = format!("Invalid choice '{choice}'.");
        prop_assert!(output.contains(&expected));
        prop_assert_eq!(manager.list().len(), 1);
        prop_assert!(launcher.commands.borrow().is_empty());
    }
}

#[test]
fn quit_and_end_of_input_stop_the_loop() {
    let (manager, _secrets, _temp) = create_test_manager();
    let launcher = RecordingLauncher::new();

    let quit = run_menu("6\n", &manager, &launcher);
    assert_eq!(quit.matches("=== SSH BOOKMARKS ===").count(), 1);

    let eof = run_menu("", &manager, &launcher);
    assert_eq!(eof.matches("=== SSH BOOKMARKS ===").count(), 1);

    let eof_mid_form = run_menu("3\nWeb\n10.0.0.5\n", &manager, &launcher);
    assert!(eof_mid_form.contains("Username: "));
    assert!(manager.list().is_empty());
}

#[test]
fn add_then_list() {
    let (manager, secrets, _temp) = create_test_manager();
    let launcher = RecordingLauncher::new();

    let output = run_menu("3\nWeb\n10.0.0.5\nroot\n\n\n\n2\n6\n", &manager, &launcher);

    assert!(output.contains("Profile 'Web' saved."));
    assert!(!output.contains("Password stored"));
    assert_eq!(manager.get("Web"), Some(sample_web_profile()));
    assert!(secrets.is_empty());

    let table_line = output
        .lines()
        .find(|line| line.starts_with("Web "))
        .expect("table should list Web");
    assert!(table_line.contains("10.0.0.5"));
    assert!(table_line.contains("root"));
    assert!(table_line.contains("22"));
}

#[test]
fn add_with_port_key_and_password() {
    let (manager, secrets, _temp) = create_test_manager();
    let launcher = RecordingLauncher::new();

    let output = run_menu(
        "3\nDb\ndb.internal\nadmin\n2222\n/keys/db_ed25519\nsecret-pw\n6\n",
        &manager,
        &launcher,
    );

    assert!(output.contains("Profile 'Db' saved."));
    assert!(output.contains("Password stored in Session memory."));
    assert_eq!(manager.get("Db"), Some(sample_db_profile()));
    let stored = secrets.retrieve("Db").unwrap().unwrap();
    assert_eq!(stored.expose_secret(), "secret-pw");
}

#[test]
fn add_rejects_empty_name_duplicate_and_bad_port() {
    let (manager, _secrets, _temp) = create_test_manager();
    manager.add(sample_web_profile()).unwrap();
    let launcher = RecordingLauncher::new();

    let output = run_menu(
        "3\n\n3\nWeb\n3\nNew\nh\nu\n70000\n6\n",
        &manager,
        &launcher,
    );

    assert!(output.contains("Profile name cannot be empty."));
    assert!(output.contains("A profile named 'Web' already exists"));
    assert!(output.contains("Invalid port '70000'."));
    assert_eq!(manager.list().len(), 1);
    assert_eq!(manager.get("Web"), Some(sample_web_profile()));
}

#[test]
fn password_failure_is_a_warning() {
    let (manager, _temp) = create_manager_with_failing_secrets();
    let launcher = RecordingLauncher::new();

    let output = run_menu("3\nWeb\n10.0.0.5\nroot\n\n\npw\n6\n", &manager, &launcher);

    assert!(output.contains("Profile 'Web' saved."));
    assert!(output.contains("Warning: password not stored"));
    assert!(manager.get("Web").is_some());
}

#[test]
fn connect_launches_selected_profile() {
    let (manager, _secrets, _temp) = create_test_manager();
    manager.add(sample_web_profile()).unwrap();
    manager.add(sample_db_profile()).unwrap();
    let launcher = RecordingLauncher::new();

    // Choices are listed by name: 1. Db, 2. Web
    let output = run_menu("1\n2\n6\n", &manager, &launcher);

    assert!(output.contains("1. Db (admin@db.internal:2222)"));
    assert!(output.contains("2. Web (root@10.0.0.5:22)"));
    assert!(output.contains("Connecting to Web..."));
    assert_eq!(launcher.command_lines(), ["ssh root@10.0.0.5 -p 22"]);
    assert!(!output.contains("exited with status"));
}

#[test]
fn connect_passes_key_and_settings() {
    let (manager, _secrets, _temp) = create_test_manager();
    manager.add(sample_db_profile()).unwrap();
    let launcher = RecordingLauncher::new();
    let ssh = SshSettings {
        program: "ssh".to_string(),
        force_utf8_locale: true,
    };

    run_menu_with("1\n1\n6\n", &manager, &launcher, &ssh);

    let commands = launcher.commands.borrow();
    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0].args,
        ["admin@db.internal", "-p", "2222", "-i", "/keys/db_ed25519"]
    );
    assert!(!commands[0].env.is_empty());
}

#[test]
fn connect_reports_non_zero_exit() {
    let (manager, _secrets, _temp) = create_test_manager();
    manager.add(sample_web_profile()).unwrap();
    let launcher = RecordingLauncher::exiting_with(255);

    let output = run_menu("1\n1\n6\n", &manager, &launcher);

    assert!(output.contains("ssh exited with status 255."));
    assert!(output.contains("=== SSH BOOKMARKS ==="));
    assert_eq!(output.matches("=== SSH BOOKMARKS ===").count(), 2);
}

#[test]
fn connect_reports_missing_client() {
    let (manager, _secrets, _temp) = create_test_manager();
    manager.add(sample_web_profile()).unwrap();

    let output = run_menu("1\n1\n6\n", &manager, &BrokenLauncher);

    assert!(output.contains("Could not start ssh:"));
    assert_eq!(manager.list().len(), 1);
}

#[test]
fn selection_errors_return_to_main() {
    let (manager, _secrets, _temp) = create_test_manager();
    let launcher = RecordingLauncher::new();

    let empty = run_menu("1\n6\n", &manager, &launcher);
    assert!(empty.contains("No saved profiles."));

    manager.add(sample_web_profile()).unwrap();
    let output = run_menu("1\n9\n1\nabc\n1\nq\n6\n", &manager, &launcher);
    assert!(output.contains("Invalid selection '9'."));
    assert!(output.contains("Invalid selection 'abc'."));
    assert!(launcher.commands.borrow().is_empty());
}

#[test]
fn edit_blank_answers_keep_values() {
    let (manager, _secrets, _temp) = create_test_manager();
    manager.add(sample_db_profile()).unwrap();
    let launcher = RecordingLauncher::new();

    let output = run_menu("4\n1\n\n\n\n\n\n6\n", &manager, &launcher);

    assert!(output.contains("Host [db.internal]: "));
    assert!(output.contains("Private key path [/keys/db_ed25519] ('-' to clear): "));
    assert!(output.contains("No changes."));
    assert_eq!(manager.get("Db"), Some(sample_db_profile()));
}

#[test]
fn edit_updates_given_fields_only() {
    let (manager, secrets, _temp) = create_test_manager();
    manager.add(sample_db_profile()).unwrap();
    let launcher = RecordingLauncher::new();

    let output = run_menu("4\n1\n10.1.1.1\n\n2200\n-\nnew-pw\n6\n", &manager, &launcher);

    assert!(output.contains("Profile 'Db' updated."));
    let updated = manager.get("Db").unwrap();
    assert_eq!(updated.host, "10.1.1.1");
    assert_eq!(updated.user, "admin");
    assert_eq!(updated.port, 2200);
    assert!(updated.key_path.is_none());
    assert!(secrets.contains("Db"));
}

#[test]
fn delete_requires_confirmation() {
    let (manager, _secrets, _temp) = create_test_manager();
    manager.add(sample_web_profile()).unwrap();
    manager.add(sample_db_profile()).unwrap();
    let launcher = RecordingLauncher::new();

    let cancelled = run_menu("5\n2\nn\n6\n", &manager, &launcher);
    assert!(cancelled.contains("Delete 'Web'? [y/N]: "));
    assert!(cancelled.contains("Cancelled."));
    assert_eq!(manager.list().len(), 2);

    let confirmed = run_menu("5\n2\ny\n6\n", &manager, &launcher);
    assert!(confirmed.contains("Profile 'Web' deleted."));
    assert!(manager.get("Web").is_none());
    assert_eq!(manager.get("Db"), Some(sample_db_profile()));
}

#[test]
fn passwords_go_through_password_prompt() {
    let (manager, secrets, _temp) = create_test_manager();
    manager.add(sample_db_profile()).unwrap();
    let launcher = RecordingLauncher::new();
    let passwords = ScriptedPasswords::new(&["add-secret", "edit-secret"]);

    // Neither password appears in the line script.
    let output = run_menu_with_passwords(
        "3\nWeb\n10.0.0.5\nroot\n\n\n4\n1\n\n\n\n\n6\n",
        &manager,
        &launcher,
        &passwords,
    );

    assert_eq!(
        *passwords.prompts.borrow(),
        [
            "Password to keep in Session memory (leave blank to skip): ",
            "New password (leave blank to keep): ",
        ]
    );
    assert!(!output.contains("add-secret"));
    assert!(!output.contains("edit-secret"));
    assert!(output.contains("Profile 'Web' saved."));
    assert_eq!(
        secrets.retrieve("Web").unwrap().unwrap().expose_secret(),
        "add-secret"
    );
    assert_eq!(
        secrets.retrieve("Db").unwrap().unwrap().expose_secret(),
        "edit-secret"
    );
    assert_eq!(manager.get("Web"), Some(sample_web_profile()));
}

#[test]
fn password_prompt_end_of_input_quits() {
    let (manager, secrets, _temp) = create_test_manager();
    let launcher = RecordingLauncher::new();
    let passwords = ScriptedPasswords::new(&[]);

    run_menu_with_passwords("3\nWeb\n10.0.0.5\nroot\n\n\n", &manager, &launcher, &passwords);

    assert!(manager.list().is_empty());
    assert!(secrets.is_empty());
}

#[test]
fn dash_key_path_on_add_means_no_key() {
    let (manager, _secrets, _temp) = create_test_manager();
    let launcher = RecordingLauncher::new();

    run_menu("3\nWeb\n10.0.0.5\nroot\n\n-\n\n6\n", &manager, &launcher);

    let profile = manager.get("Web").unwrap();
    assert!(profile.key_path.is_none());
    assert_eq!(profile, sample_web_profile());
}

#[test]
fn newer_store_is_reported_not_overwritten() {
    let (manager, _secrets, _temp) = create_test_manager();
    let store_path = manager.config_manager().store_path().to_path_buf();
    let newer = r#"{ "version": 3, "profiles": {} }"#;
    std::fs::write(&store_path, newer).unwrap();
    let launcher = RecordingLauncher::new();

    let output = run_menu("3\nWeb\n10.0.0.5\nroot\n\n\n\n6\n", &manager, &launcher);

    assert!(output.contains("Could not save profile:"));
    assert!(!output.contains("Profile 'Web' saved."));
    assert_eq!(std::fs::read_to_string(&store_path).unwrap(), newer);
}

#[test]
fn unreadable_store_is_warned_about_once() {
    let (manager, _secrets, _temp) = create_test_manager();
    std::fs::write(manager.config_manager().store_path(), "{ broken").unwrap();
    let launcher = RecordingLauncher::new();

    let (output, logs) = capture_warnings(|| {
        run_menu("3\nWeb\n10.0.0.5\nroot\n\n\n\n2\n6\n", &manager, &launcher)
    });

    assert!(output.contains("Profile 'Web' saved."));
    assert_eq!(logs.contents().matches("Profile store unreadable").count(), 1);
}
