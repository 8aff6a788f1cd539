//! CLI integration tests
//!
//! 启动失败的路径都不会监听端口，进程会立即退出

use assert_cmd::Command;

fn cmd(cache_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("tts-server").unwrap();
    cmd.env("TTS_SERVER_PROVISIONER__CACHE_DIR", cache_dir)
        .env_remove("TTS_SERVER_PROVISIONER__MIRROR_URL")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_list_models_exits_without_serving() {
    let cache = tempfile::tempdir().unwrap();

    let output = cmd(cache.path()).arg("--list_models").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(stdout.contains("tts_models/en/ljspeech/tacotron2-DDC"));
    assert!(stdout.contains("vocoder_models/en/ljspeech/hifigan_v2"));
    assert!(stdout.starts_with(" 1: "));
}

#[test]
fn test_list_models_accepts_explicit_value() {
    let cache = tempfile::tempdir().unwrap();

    cmd(cache.path()).args(["--list_models", "yes"]).assert().success();
}

#[test]
fn test_help_mentions_snake_case_flags() {
    let output = Command::cargo_bin("tts-server").unwrap().arg("--help").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(stdout.contains("--model_name"));
    assert!(stdout.contains("--show_details"));
    assert!(stdout.contains("--settings"));
}

#[test]
fn test_empty_model_name_fails() {
    let cache = tempfile::tempdir().unwrap();

    cmd(cache.path()).args(["--model_name", ""]).assert().failure();
}

#[test]
fn test_uncached_model_without_mirror_fails() {
    let cache = tempfile::tempdir().unwrap();

    let output = cmd(cache.path())
        .args(["--model_name", "tts_models/en/ljspeech/vits"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("tts_models/en/ljspeech/vits"));
}

#[test]
fn test_model_path_without_config_fails() {
    let cache = tempfile::tempdir().unwrap();
    let model = cache.path().join("model_file.pth");
    std::fs::write(&model, b"weights").unwrap();

    cmd(cache.path())
        .arg("--model_path")
        .arg(&model)
        .assert()
        .failure();
}

#[test]
fn test_missing_settings_file_fails() {
    let cache = tempfile::tempdir().unwrap();

    cmd(cache.path())
        .args(["--settings", "/nonexistent/tts-server.toml", "--list_models"])
        .assert()
        .failure();
}
