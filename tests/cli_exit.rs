// Exit-code behaviour of the binary for fatal input errors.

use std::fs;

use tokio::process::Command;
use wiremock::MockServer;

#[tokio::test]
async fn test_unwritable_report_path_fails_before_crawling() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("manifest.csv");
    fs::write(
        &manifest_path,
        "Job,Filename,PID,Large,Medium,Small\nJ1,one.png,z123abc,800,400,200\n",
    )
    .unwrap();
    let output = dir.path().join("no-such-dir").join("report.csv");

    let result = Command::new(env!("CARGO_BIN_EXE_imhotep"))
        .arg("/education/topics/zt")
        .arg(&manifest_path)
        .arg("--output")
        .arg(&output)
        .arg("--site-root")
        .arg(server.uri())
        .env_remove("IMHOTEP_PROXY")
        .env_remove("IMHOTEP_USER_AGENT")
        .output()
        .await
        .unwrap();

    assert_eq!(result.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Failed to create report"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "crawl started: {:?}", requests.len());
}

#[tokio::test]
async fn test_missing_manifest_exits_with_usage_error() {
    let result = Command::new(env!("CARGO_BIN_EXE_imhotep"))
        .arg("/education/topics/zt")
        .output()
        .await
        .unwrap();

    assert_eq!(result.status.code(), Some(2));
}
