use std::process::Command;

// Embeds VHDRUN_GIT_COMMIT for the CLI long version. Release tarballs without
// a .git directory can inject it through the environment instead.
fn main() {
    println!("cargo:rerun-if-env-changed=VHDRUN_GIT_COMMIT");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let commit = match std::env::var("VHDRUN_GIT_COMMIT") {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => match describe_head() {
            Some(c) => c,
            None => return,
        },
    };
    println!("cargo:rustc-env=VHDRUN_GIT_COMMIT={commit}");
}

fn describe_head() -> Option<String> {
    let head = git(&["rev-parse", "--short=12", "HEAD"])?;
    if head.is_empty() {
        return None;
    }
    let dirty = match git(&["status", "--porcelain"]) {
        Some(s) => !s.is_empty(),
        None => false,
    };
    if dirty {
        Some(format!("{head}-dirty"))
    } else {
        Some(head)
    }
}

fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
}
