use super::*;
use chrono::TimeZone;
use libregclean::config::{KeepLastRule, OlderThanGivenDateRule};

const DIGEST: &str = "sha256:1111111111111111111111111111111111111111111111111111111111111111";

fn deleted(tag: &str, created: DateTime<Utc>) -> DeletedTag {
    DeletedTag {
        image: "team/app".to_string(),
        tag: tag.to_string(),
        digest: DIGEST.to_string(),
        created,
        status: 202,
    }
}

#[test]
fn test_output_format_from_string() {
    assert_eq!(OutputFormat::from("pretty"), OutputFormat::Pretty);
    assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
    assert_eq!(OutputFormat::from("invalid"), OutputFormat::Pretty);
}

#[test]
fn test_color_choice_from_string() {
    assert_eq!(ColorChoice::from("always"), ColorChoice::Always);
    assert_eq!(ColorChoice::from("never"), ColorChoice::Never);
    assert_eq!(ColorChoice::from("auto"), ColorChoice::Auto);
    assert_eq!(ColorChoice::from("sometimes"), ColorChoice::Auto);
}

#[test]
fn test_explicit_color_choice_ignores_environment() {
    assert!(should_color(ColorChoice::Always));
    assert!(!should_color(ColorChoice::Never));
}

#[test]
fn test_describe_deleted_includes_reference_and_age() {
    let now = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let created = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

    let line = describe_deleted(&deleted("v1", created), now);

    assert!(line.starts_with("team/app:v1 (sha256:1111"));
    assert!(line.contains("ago"));
    assert!(line.ends_with("status 202"));
}

#[test]
fn test_describe_failed_with_and_without_status() {
    let mut failure = FailedDeletion {
        image: "solo".to_string(),
        tag: "a".to_string(),
        digest: DIGEST.to_string(),
        status: Some(405),
        reason: "registry refused deletion".to_string(),
    };
    assert_eq!(
        describe_failed(&failure),
        format!("solo:a ({}) status 405: registry refused deletion", DIGEST)
    );

    failure.status = None;
    failure.reason = "connection refused".to_string();
    assert_eq!(
        describe_failed(&failure),
        format!("solo:a ({}): connection refused", DIGEST)
    );
}

#[test]
fn test_describe_skipped() {
    let skipped = SkippedRepository {
        image: "broken".to_string(),
        reason: "HTTP 500".to_string(),
    };
    assert_eq!(describe_skipped(&skipped), "broken: HTTP 500");
}

#[test]
fn test_summary_line_counts() {
    let created = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let report = CleanupReport {
        dry_run: false,
        images_evaluated: 3,
        deleted: vec![deleted("v1", created), deleted("v2", created)],
        failed: vec![],
        skipped: vec![SkippedRepository {
            image: "broken".to_string(),
            reason: "HTTP 500".to_string(),
        }],
    };

    assert_eq!(
        summary_line(&report),
        "3 images evaluated, deleted 2 tags, 0 failed, 1 repositories skipped"
    );
}

#[test]
fn test_summary_line_in_dry_run() {
    let report = CleanupReport {
        dry_run: true,
        ..CleanupReport::default()
    };
    assert!(summary_line(&report).contains("would delete 0 tags"));
}

#[test]
fn test_report_json_is_machine_readable() {
    let created = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let report = CleanupReport {
        dry_run: true,
        images_evaluated: 1,
        deleted: vec![deleted("v1", created)],
        ..CleanupReport::default()
    };

    let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["deleted"][0]["tag"], "v1");
    assert_eq!(json["deleted"][0]["status"], 202);
    assert_eq!(json["deleted"][0]["created"], "2020-01-01T00:00:00Z");
}

#[test]
fn test_config_lines_mask_password() {
    let mut config = Config::default();
    config.registry.username = Some("admin".to_string());
    config.registry.password = Some("secret".to_string());
    config.policy.keep_last = Some(KeepLastRule { count: 3 });

    let lines = config_lines(&config);

    assert!(lines.contains(&"registry.username = admin".to_string()));
    assert!(lines.contains(&"registry.password = ********".to_string()));
    assert!(lines.contains(&"policy.keep_last.count = 3".to_string()));
    assert!(lines.iter().all(|line| !line.contains("secret")));
}

#[test]
fn test_config_lines_without_credentials() {
    let mut config = Config::default();
    config.policy.older_than_given_date = Some(OlderThanGivenDateRule {
        date: "01.01.2022".to_string(),
    });

    let lines = config_lines(&config);

    assert_eq!(lines[0], "registry.host = localhost");
    assert!(lines.contains(&"registry.password = ~".to_string()));
    assert!(lines.contains(&"policy.older_than_given_date.date = 01.01.2022".to_string()));
}

#[test]
fn test_redacted_config_hides_password() {
    let mut config = Config::default();
    config.registry.password = Some("secret".to_string());

    let json = to_json(&redacted(&config)).unwrap();
    assert!(!json.contains("secret"));
    assert!(json.contains("********"));
    assert_eq!(config.registry.password.as_deref(), Some("secret"));
}
