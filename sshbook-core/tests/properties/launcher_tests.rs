//! Property-based tests for ssh command construction

use std::path::PathBuf;

use proptest::prelude::*;
use sshbook_core::config::SshSettings;
use sshbook_core::{LaunchError, Profile, SshCommand};

fn arb_host() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9-]{0,20}(\\.[a-z]{2,6})?".prop_map(|s| s),
        (1u8..=254, 0u8..=255, 0u8..=255, 1u8..=254)
            .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The argument vector is always `user@host -p port`.
    #[test]
    fn args_follow_destination_port_layout(
        host in arb_host(),
        user in "[a-z_][a-z0-9_]{0,12}",
        port in 1u16..=65535,
    ) {
        let profile = Profile::new("P", host.clone(), user.clone()).with_port(port);
        let command = SshCommand::for_profile(&profile, &SshSettings::default())
            .expect("Should build command");

        prop_assert_eq!(&command.program, "ssh");
        prop_assert_eq!(
            command.args,
            vec![format!("{user}@{host}"), "-p".to_string(), port.to_string()]
        );
        prop_assert!(command.env.is_empty());
    }

    /// A key path adds exactly one `-i <path>` pair at the end.
    #[test]
    fn key_path_appends_identity_flag(
        host in arb_host(),
        key in "/[a-z]{1,8}/[a-z_]{1,12}",
    ) {
        let profile = Profile::new("P", host, "u").with_key_path(key.clone());
        let command = SshCommand::for_profile(&profile, &SshSettings::default()).unwrap();

        prop_assert_eq!(command.args.len(), 5);
        prop_assert_eq!(&command.args[3], "-i");
        prop_assert_eq!(&command.args[4], &key);
        prop_assert_eq!(command.args.iter().filter(|a| *a == "-i").count(), 1);
    }

    /// The host is never split or altered.
    #[test]
    fn host_is_passed_verbatim(host in arb_host()) {
        let profile = Profile::new("P", host.clone(), "");
        let command = SshCommand::for_profile(&profile, &SshSettings::default()).unwrap();
        prop_assert_eq!(&command.args[0], &host);
    }
}

#[test]
fn quick_start_profile_builds_expected_command() {
    let profile = Profile::new("Web", "10.0.0.5", "root");
    let command = SshCommand::for_profile(&profile, &SshSettings::default()).unwrap();

    assert_eq!(command.to_string(), "ssh root@10.0.0.5 -p 22");
    assert_eq!(command.args, ["root@10.0.0.5", "-p", "22"]);
}

#[test]
fn tilde_key_path_is_expanded() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let profile = Profile::new("Db", "db", "admin").with_key_path("~/.ssh/id_ed25519");
    let command = SshCommand::for_profile(&profile, &SshSettings::default()).unwrap();

    let expected: PathBuf = home.join(".ssh/id_ed25519");
    assert_eq!(command.args[4], expected.display().to_string());
}

#[test]
fn custom_program_and_locale() {
    let settings = SshSettings {
        program: "/usr/local/bin/ssh".to_string(),
        force_utf8_locale: true,
    };
    let command =
        SshCommand::for_profile(&Profile::new("Web", "10.0.0.5", "root"), &settings).unwrap();

    assert_eq!(command.program, "/usr/local/bin/ssh");
    assert!(command
        .env
        .contains(&("LC_ALL".to_string(), "C.UTF-8".to_string())));
    assert!(command
        .env
        .contains(&("LANG".to_string(), "C.UTF-8".to_string())));
}

#[test]
fn blank_host_is_rejected() {
    let profile = Profile::new("Empty", "  ", "root");
    assert!(matches!(
        SshCommand::for_profile(&profile, &SshSettings::default()),
        Err(LaunchError::InvalidConfig(_))
    ));
}
