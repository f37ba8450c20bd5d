use anyhow::bail;
use std::fs;
use std::path::{Path, PathBuf};
use strsim::jaro_winkler;

/// Recognized VHDL source suffixes. A path qualifies by name only; content is
/// never inspected.
pub fn is_vhdl_source(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("vhd" | "vhdl")
    )
}

/// Recursively collects every VHDL source under `root`, sorted for
/// deterministic ordering. Unreadable directories or entries are reported as
/// warnings and skipped; the walk itself never fails, and an empty result is
/// not an error here.
pub fn collect_vhdl_sources(root: &Path) -> Vec<PathBuf> {
    fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                eprintln!("warning: skipping unreadable {}: {}", dir.display(), err);
                return;
            }
        };
        for ent in entries {
            let ent = match ent {
                Ok(ent) => ent,
                Err(err) => {
                    eprintln!(
                        "warning: skipping unreadable entry under {}: {}",
                        dir.display(),
                        err
                    );
                    continue;
                }
            };
            let p = ent.path();
            if p.is_dir() {
                walk(&p, out);
            } else if is_vhdl_source(&p) {
                out.push(p);
            }
        }
    }

    let mut out = vec![];
    walk(root, &mut out);
    out.sort();
    out
}

/// Usage-level validation for an explicitly given source path: it must exist,
/// be a file, and carry a recognized suffix. Runs before any external process
/// is dispatched; a missing path gets a closest-name hint when one exists.
pub fn validate_source_arg(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        match suggest_alternative(path) {
            Some(hint) => bail!("{} not found\n{}", path.display(), hint),
            None => bail!("{} not found", path.display()),
        }
    }
    if !path.is_file() {
        bail!("{} is not a file", path.display());
    }
    if !is_vhdl_source(path) {
        bail!("expected a .vhd or .vhdl file, got {}", path.display());
    }
    Ok(())
}

/// Simulation unit identifier for a testbench: the file name without
/// directory and extension.
pub fn unit_name(path: &Path) -> anyhow::Result<String> {
    match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) if !stem.is_empty() => Ok(stem.to_string()),
        _ => bail!("cannot derive a unit name from {}", path.display()),
    }
}

/// For a path that does not exist: the closest VHDL source name in the same
/// directory, formatted as a help line, if any candidate is close enough.
pub fn suggest_alternative(missing: &Path) -> Option<String> {
    let dir = match missing.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let needle = missing.file_name()?.to_str()?;

    let mut candidates = vec![];
    for ent in fs::read_dir(&dir).ok()?.flatten() {
        let p = ent.path();
        if p.is_file()
            && is_vhdl_source(&p)
            && let Some(name) = p.file_name().and_then(|s| s.to_str())
        {
            candidates.push(name.to_string());
        }
    }

    let best = best_name_match(needle, &candidates)?;
    Some(format!("help: did you mean \"{}\"?", best))
}

fn best_name_match<'a>(needle: &str, candidates: &'a [String]) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for c in candidates {
        let score = jaro_winkler(needle, c);
        if best.map(|(_, s)| score > s).unwrap_or(true) {
            best = Some((c.as_str(), score));
        }
    }
    match best {
        Some((name, score)) if score >= 0.84 => Some(name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        collect_vhdl_sources, is_vhdl_source, suggest_alternative, unit_name, validate_source_arg,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time drift")
            .as_nanos();
        std::env::temp_dir().join(format!("vhdrun-{}-{}-{}", prefix, std::process::id(), nonce))
    }

    #[test]
    fn suffix_predicate_accepts_vhd_and_vhdl_only() {
        assert!(is_vhdl_source(Path::new("a.vhd")));
        assert!(is_vhdl_source(Path::new("sub/b.vhdl")));
        assert!(!is_vhdl_source(Path::new("c.txt")));
        assert!(!is_vhdl_source(Path::new("d.VHD")), "matching is case-sensitive");
        assert!(!is_vhdl_source(Path::new(".vhd")), "a bare dotfile has no extension");
        assert!(!is_vhdl_source(Path::new("vhd")));
    }

    #[test]
    fn collects_recognized_sources_recursively_and_sorted() {
        let root = temp_dir("collect");
        fs::create_dir_all(root.join("sub")).expect("mkdir");
        fs::write(root.join("a.vhd"), "").expect("write a");
        fs::write(root.join("b.vhdl"), "").expect("write b");
        fs::write(root.join("c.txt"), "").expect("write c");
        fs::write(root.join("sub").join("d.vhd"), "").expect("write d");

        let found = collect_vhdl_sources(&root);
        assert_eq!(
            found,
            vec![
                root.join("a.vhd"),
                root.join("b.vhdl"),
                root.join("sub").join("d.vhd"),
            ]
        );

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn empty_or_missing_root_yields_empty_result() {
        let root = temp_dir("collect-empty");
        fs::create_dir_all(&root).expect("mkdir");
        assert!(collect_vhdl_sources(&root).is_empty());

        let missing = root.join("nope");
        assert!(collect_vhdl_sources(&missing).is_empty(), "missing root must not fail");

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn unit_name_strips_directory_and_extension() {
        assert_eq!(unit_name(Path::new("tb_counter.vhd")).expect("stem"), "tb_counter");
        assert_eq!(
            unit_name(Path::new("rtl/sim/tb_alu.vhdl")).expect("stem"),
            "tb_alu"
        );
        assert_eq!(unit_name(Path::new("tb.v2.vhd")).expect("stem"), "tb.v2");
        assert!(unit_name(Path::new("..")).is_err());
    }

    #[test]
    fn explicit_paths_must_exist_and_carry_a_recognized_suffix() {
        let root = temp_dir("validate");
        fs::create_dir_all(root.join("good.vhd")).expect("mkdir decoy");
        fs::write(root.join("tb.vhd"), "").expect("write");
        fs::write(root.join("notes.txt"), "").expect("write");

        validate_source_arg(&root.join("tb.vhd")).expect("existing source passes");

        let err = validate_source_arg(&root.join("missing.vhd")).expect_err("missing path");
        assert!(format!("{:#}", err).contains("not found"));

        let err = validate_source_arg(&root.join("notes.txt")).expect_err("wrong suffix");
        assert!(format!("{:#}", err).contains("expected a .vhd or .vhdl file"));

        let err = validate_source_arg(&root.join("good.vhd")).expect_err("directory decoy");
        assert!(format!("{:#}", err).contains("is not a file"));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_path_error_carries_closest_name_hint() {
        let root = temp_dir("validate-hint");
        fs::create_dir_all(&root).expect("mkdir");
        fs::write(root.join("tb_counter.vhd"), "").expect("write");

        let err = validate_source_arg(&root.join("tb_countr.vhd")).expect_err("missing path");
        let msg = format!("{:#}", err);
        assert!(
            msg.contains("did you mean \"tb_counter.vhd\""),
            "hint missing from: {}",
            msg
        );

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn suggestion_points_at_close_sibling_sources() {
        let root = temp_dir("suggest");
        fs::create_dir_all(&root).expect("mkdir");
        fs::write(root.join("tb_counter.vhd"), "").expect("write");
        fs::write(root.join("alu.vhd"), "").expect("write");

        let hint = suggest_alternative(&root.join("tb_countr.vhd")).expect("close name");
        assert_eq!(hint, "help: did you mean \"tb_counter.vhd\"?");

        assert!(
            suggest_alternative(&root.join("completely_unrelated.xyz")).is_none(),
            "distant names must not produce a hint"
        );

        let _ = fs::remove_dir_all(root);
    }
}
