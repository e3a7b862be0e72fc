use libregclean::client::CONTENT_DIGEST_HEADER;
use libregclean::{
    Client, Config, Evaluator, Image, MemoryLogger, NullLogger, OlderThanDate, Registry,
    split_repositories,
};
use std::sync::Arc;

const DIGEST_V1: &str = "sha256:7173b809ca12ec5dee4506cd86be934c4596dd234ee82c0662eac04a8c2c71dc";
const DIGEST_V2: &str = "sha256:c5b1261d6d3e43071626931fc004f70149baeba2c8ec672bd4f27761f8e1ad6b";

fn manifest_body(created: &str) -> String {
    format!(
        r#"{{"schemaVersion":1,"name":"team/app","history":[{{"v1Compatibility":"{{\"created\":\"{}\",\"id\":\"x\"}}"}}]}}"#,
        created
    )
}

#[test]
fn test_caller_driven_cleanup_of_team_app() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/v2/_catalog")
        .with_status(200)
        .with_body(r#"{"repositories":["team/app"]}"#)
        .create();
    server
        .mock("GET", "/v2/team/app/tags/list")
        .with_status(200)
        .with_body(r#"{"name":"team/app","tags":["v1","v2"]}"#)
        .create();
    server
        .mock("GET", "/v2/team/app/manifests/v1")
        .with_status(200)
        .with_body(manifest_body("2020-01-01T00:00:00Z"))
        .create();
    server
        .mock("GET", "/v2/team/app/manifests/v2")
        .with_status(200)
        .with_body(manifest_body("2023-06-01T00:00:00Z"))
        .create();
    server
        .mock("HEAD", "/v2/team/app/manifests/v1")
        .with_status(200)
        .with_header(CONTENT_DIGEST_HEADER, DIGEST_V1)
        .expect_at_least(1)
        .create();
    server
        .mock("HEAD", "/v2/team/app/manifests/v2")
        .with_status(200)
        .with_header(CONTENT_DIGEST_HEADER, DIGEST_V2)
        .create();
    let delete = server
        .mock("DELETE", format!("/v2/team/app/manifests/{}", DIGEST_V1).as_str())
        .with_status(202)
        .expect(1)
        .create();

    let addr = server.socket_address();
    let registry = Registry::new(addr.ip().to_string(), addr.port(), false);
    let logger = Arc::new(MemoryLogger::new());
    let client = Client::new(registry, logger.clone()).unwrap();

    let catalog = client.fetch_catalog().unwrap();
    let groups = split_repositories(&catalog.repositories);
    assert_eq!(groups["team"], vec!["app"]);

    let listed = client.fetch_tag_list("team", "app").unwrap();
    let evaluator = Evaluator::new(&client, logger.clone());
    let deletable = evaluator.evaluate(&listed, &OlderThanDate::new("01.01.2022"));
    assert_eq!(deletable, Image::new("team/app", vec!["v1".to_string()]));

    for tag in &deletable.tags {
        let digest = client.fetch_digest(&deletable.name, tag).unwrap();
        let status = client.delete_tag(&deletable.name, &digest.to_string()).unwrap();
        assert_eq!(status, 202);
    }

    delete.assert();
}

#[test]
fn test_registry_from_config_drives_client() {
    let config = Config::from_yaml_str(
        "registry:\n  host: registry.internal\n  port: 5001\n  dry_run: true\n",
    )
    .unwrap();

    let client = Client::new(config.to_registry(), Arc::new(NullLogger)).unwrap();

    assert_eq!(client.base_url(), "http://registry.internal:5001");
    assert_eq!(client.delete_tag("team/app", DIGEST_V1).unwrap(), 202);
}

#[test]
fn test_version_is_exposed() {
    assert_eq!(libregclean::version(), env!("CARGO_PKG_VERSION"));
}
