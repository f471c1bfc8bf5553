use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Run the built binary with `stdin`, a clean ScaleDown environment and `envs` on top
pub fn run_squeeze(args: &[&str], stdin: &str, envs: &[(&str, &str)]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_squeeze"))
        .args(args)
        .env_remove("SCALEDOWN_API_KEY")
        .env_remove("SCALEDOWN_API_URL")
        .env_remove("RUST_LOG")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn squeeze");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

pub fn response_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "expected one line, got {:?}", stdout);
    serde_json::from_str(&stdout).expect("stdout is not JSON")
}

/// URL on localhost where nothing is listening
pub fn dead_url() -> String {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    format!("http://127.0.0.1:{}/compress/raw/", port)
}

pub fn paper_abstract() -> String {
    [
        "We propose a novel method for extractive summarization of scientific papers.",
        "The conference venue was located near the river.",
        "Our experiments demonstrate significant improvements over strong baselines on three benchmark datasets.",
        "Coffee was available throughout the afternoon sessions for every attendee.",
        "We evaluate the approach with ROUGE and a human study of fifty annotators.",
        "These results suggest the model generalizes well beyond the training domain.",
    ]
    .join(" ")
}
