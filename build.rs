use std::process::Command;

fn main() {
  embed_version();
  set_rerun_conditions();
}

/// Exposes `HEADER_KEEPER_VERSION`: the package version, followed by the
/// short commit hash and commit date when built from a git checkout.
fn embed_version() {
  let version = env!("CARGO_PKG_VERSION");

  let hash = git(&["rev-parse", "--short", "HEAD"]);
  let date = git(&["log", "-1", "--format=%cs"]);

  let full = match (hash, date) {
    (Some(hash), Some(date)) => format!("{version} ({hash} {date})"),
    (Some(hash), None) => format!("{version} ({hash})"),
    _ => version.to_string(),
  };
  println!("cargo:rustc-env=HEADER_KEEPER_VERSION={full}");
}

fn git(args: &[&str]) -> Option<String> {
  let output = Command::new("git").args(args).output().ok()?;
  if !output.status.success() {
    return None;
  }
  let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
  (!value.is_empty()).then_some(value)
}

fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}
