//! Identity read/update behaviour against a scripted command runner.

#![allow(clippy::unwrap_used)]

mod common;

use common::{ScriptedRunner, failure, is_git_config};
use gitpersona_core::{
    Config, EraseOutcome, Error, GitIdentity, IdentityUpdater, Platform, ValidationError,
};

fn updater(runner: ScriptedRunner, platform: Platform) -> IdentityUpdater<ScriptedRunner> {
    IdentityUpdater::new(runner, &Config::default()).with_platform(platform)
}

#[tokio::test]
async fn read_trims_both_values() {
    let runner = ScriptedRunner::new(|spec| match spec.args.last().map(String::as_str) {
        Some("user.name") => Ok("  Jo Doe \n".to_string()),
        Some("user.email") => Ok("jo@x.com\n".to_string()),
        _ => Err(failure(spec)),
    });
    let updater = updater(runner, Platform::Other);

    let identity = updater.read().await.unwrap();
    assert_eq!(identity, GitIdentity::new("Jo Doe", "jo@x.com"));
    assert_eq!(
        updater.runner().rendered_calls(),
        vec![
            "git config --global --get user.name",
            "git config --global --get user.email",
        ]
    );
}

#[tokio::test]
async fn read_fails_as_one_error_when_email_is_unset() {
    let runner = ScriptedRunner::new(|spec| match spec.args.last().map(String::as_str) {
        Some("user.name") => Ok("Jo\n".to_string()),
        _ => Err(failure(spec)),
    });
    let updater = updater(runner, Platform::Other);

    let err = updater.read().await.unwrap_err();
    assert!(matches!(err, Error::ConfigUnavailable(_)));
}

#[tokio::test]
async fn update_on_unix_erases_via_credential_manager() {
    let updater = updater(ScriptedRunner::succeeding(), Platform::Other);

    let report = updater.update("  Jo  ", " jo@x.com ").await.unwrap();
    assert_eq!(report.identity, GitIdentity::new("Jo", "jo@x.com"));
    assert!(report.credentials.is_erased());
    assert!(report.message().contains("erased"));
    assert_eq!(
        updater.runner().rendered_calls(),
        vec![
            "git config --global user.name Jo",
            "git config --global user.email jo@x.com",
            "git credential-manager delete https://github.com",
        ]
    );
}

#[tokio::test]
async fn update_on_macos_falls_back_to_keychain() {
    let runner = ScriptedRunner::new(|spec| {
        if is_git_config(spec) || spec.args.first().map(String::as_str) == Some("credential-osxkeychain") {
            Ok(String::new())
        } else {
            Err(failure(spec))
        }
    });
    let updater = updater(runner, Platform::MacOs);

    let report = updater.update("Jo", "jo@x.com").await.unwrap();
    match &report.credentials {
        EraseOutcome::Erased { command, failed } => {
            assert_eq!(command, "git credential-osxkeychain erase");
            assert_eq!(failed.len(), 1);
            assert_eq!(
                failed[0].command,
                "git credential-manager delete https://github.com"
            );
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let calls = updater.runner().calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(
        calls[3].stdin.as_deref(),
        Some("protocol=https\nhost=github.com\n\n")
    );
}

#[tokio::test]
async fn update_on_macos_stops_at_first_success() {
    let updater = updater(ScriptedRunner::succeeding(), Platform::MacOs);
    let report = updater.update("Jo", "jo@x.com").await.unwrap();
    assert!(report.credentials.is_erased());
    assert_eq!(updater.runner().calls().len(), 3);
}

#[tokio::test]
async fn update_succeeds_when_every_erase_attempt_fails() {
    let updater = updater(ScriptedRunner::config_only(), Platform::MacOs);

    let report = updater.update("Jo", "jo@x.com").await.unwrap();
    match &report.credentials {
        EraseOutcome::Failed { attempts } => assert_eq!(attempts.len(), 2),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(
        report.message(),
        "Git identity updated (credential erasure failed)."
    );
}

#[tokio::test]
async fn windows_has_no_fallback() {
    let updater = updater(ScriptedRunner::config_only(), Platform::Windows);

    let report = updater.update("Jo", "jo@x.com").await.unwrap();
    assert!(matches!(
        report.credentials,
        EraseOutcome::Failed { ref attempts } if attempts.len() == 1
    ));
    assert_eq!(
        updater.runner().rendered_calls().last().map(String::as_str),
        Some("cmdkey /delete:git:https://github.com")
    );
    assert_eq!(updater.runner().calls().len(), 3);
}

#[tokio::test]
async fn unix_failure_is_logged_not_retried() {
    let updater = updater(ScriptedRunner::config_only(), Platform::Other);
    let report = updater.update("Jo", "jo@x.com").await.unwrap();
    assert!(matches!(report.credentials, EraseOutcome::Failed { .. }));
    assert_eq!(updater.runner().calls().len(), 3);
}

#[tokio::test]
async fn disabled_erasure_is_not_attempted() {
    let config = Config {
        erase_credentials: false,
        ..Config::default()
    };
    let updater = IdentityUpdater::new(ScriptedRunner::succeeding(), &config)
        .with_platform(Platform::Other);

    let report = updater.update("Jo", "jo@x.com").await.unwrap();
    assert_eq!(report.credentials, EraseOutcome::NotAttempted);
    assert!(report.message().contains("skipped"));
    assert_eq!(updater.runner().calls().len(), 2);
}

#[tokio::test]
async fn email_write_failure_reports_update_failed() {
    let runner = ScriptedRunner::new(|spec| {
        if spec.args.get(2).map(String::as_str) == Some("user.email") {
            Err(failure(spec))
        } else {
            Ok(String::new())
        }
    });
    let updater = updater(runner, Platform::Other);

    let err = updater.update("Jo", "jo@x.com").await.unwrap_err();
    assert!(matches!(err, Error::UpdateFailed(_)));
    // No erase attempt after a failed write.
    assert_eq!(updater.runner().calls().len(), 2);
}

#[tokio::test]
async fn malformed_input_runs_no_commands() {
    for (name, email, expected) in [
        ("Jo", "foo@bar", ValidationError::InvalidEmail),
        ("Jo", "@b.com", ValidationError::InvalidEmail),
        ("Jo", "a@.com", ValidationError::InvalidEmail),
        ("   ", "jo@x.com", ValidationError::EmptyName),
        ("Jo", "  ", ValidationError::EmptyEmail),
    ] {
        let updater = updater(ScriptedRunner::succeeding(), Platform::Other);
        match updater.update(name, email).await {
            Err(Error::Validation(errors)) => assert_eq!(errors, vec![expected]),
            other => panic!("unexpected result for {email:?}: {other:?}"),
        }
        assert!(updater.runner().calls().is_empty());
    }
}

#[tokio::test]
async fn names_are_passed_without_shell_quoting() {
    let updater = updater(ScriptedRunner::succeeding(), Platform::Other);
    updater.update(r#"Jo "JD" O'Neil"#, "jo@x.com").await.unwrap();

    let calls = updater.runner().calls();
    assert_eq!(calls[0].args[3], r#"Jo "JD" O'Neil"#);
}

#[tokio::test]
async fn custom_git_program_and_host_are_used() {
    let config = Config {
        git_program: "/opt/git/bin/git".to_string(),
        credential_host: "https://gitlab.example.com".to_string(),
        ..Config::default()
    };
    let updater = IdentityUpdater::new(ScriptedRunner::succeeding(), &config)
        .with_platform(Platform::Other);

    updater.update("Jo", "jo@x.com").await.unwrap();
    assert_eq!(
        updater.runner().rendered_calls(),
        vec![
            "/opt/git/bin/git config --global user.name Jo",
            "/opt/git/bin/git config --global user.email jo@x.com",
            "/opt/git/bin/git credential-manager delete https://gitlab.example.com",
        ]
    );
}
