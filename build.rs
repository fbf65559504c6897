use std::env;
use std::process::Command;

/// Embeds provenance for `zepto_cli version`; every value falls back to "unknown".
fn main() {
    for path in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={path}");
    }

    let worktree = capture("git", &["status", "--porcelain"])
        .map(|changes| if changes.is_empty() { "clean" } else { "dirty" }.to_string());
    let built_at = chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    let stamps = [
        ("HASH", capture("git", &["rev-parse", "--short", "HEAD"])),
        ("STATUS", worktree),
        ("TIMESTAMP", Some(built_at)),
        ("TARGET", env::var("TARGET").ok()),
        ("PROFILE", env::var("PROFILE").ok()),
        ("RUSTC", capture(&rustc(), &["--version"])),
    ];
    for (key, value) in stamps {
        let value = value.unwrap_or_else(|| "unknown".into());
        println!("cargo:rustc-env=ZEPTO_BUILD_{key}={value}");
    }
}

/// Trimmed stdout of a successful command. `Some("")` means it ran and printed nothing.
fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string())
}

fn rustc() -> String {
    env::var("RUSTC").unwrap_or_else(|_| "rustc".into())
}
