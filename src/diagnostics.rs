use std::path::Path;

/// Preflight checks for the ledger database at `db_path`.
pub fn check(db_path: &Path) -> anyhow::Result<()> {
    let mut errors: Vec<String> = Vec::new();

    // Check 1: parent directory exists (or can be created) and is writable
    if let Some(dir) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            errors.push(format!("cannot create {}: {e}", dir.display()));
        } else if let Err(e) = write_probe(dir) {
            errors.push(format!(
                "cannot write to {}: {e}\n  \
                 → pass a writable location with --db <path>",
                dir.display()
            ));
        }
    }

    // Check 2: existing database file readable
    if db_path.exists() {
        if let Err(e) = std::fs::OpenOptions::new().read(true).open(db_path) {
            errors.push(format!("cannot open {}: {e}", db_path.display()));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    for err in &errors {
        eprintln!("ERROR: {err}");
    }
    anyhow::bail!("{} preflight check(s) failed", errors.len());
}

fn write_probe(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(".webauthn-shim-probe");
    std::fs::write(&probe, b"")?;
    std::fs::remove_file(probe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("ledger.db");
        check(&db).unwrap();
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_check_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let err = check(&blocker.join("ledger.db")).unwrap_err();
        assert!(err.to_string().contains("1 preflight check(s) failed"));
    }
}
