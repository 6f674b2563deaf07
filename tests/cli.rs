use std::process::Command;

#[test]
fn failure_is_reported_on_stderr_with_logging_off() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_image-analyzer"))
        .arg(dir.path().join("scene.jpg"))
        .arg("--model")
        .arg(dir.path().join("missing.onnx"))
        .arg("--classes")
        .arg(dir.path().join("missing.txt"))
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Model unavailable"), "stderr was {:?}", stderr);
}
