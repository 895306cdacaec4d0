//! Checks that the unit test tree mirrors the source tree

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Entry points and module organization files don't need their own test file
    fn is_organizational(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn rust_tree(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_stripped| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .to_string();

            if path.is_dir() {
                paths.insert(relative);
                rust_tree(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    fn tree(root: &str) -> BTreeSet<String> {
        let base = Path::new(root);
        let mut paths = BTreeSet::new();
        if let Err(error) = rust_tree(base, base, &mut paths) {
            assert!(!base.exists(), "Failed to read {root}: {error}");
        }
        paths
    }

    // Tests every source file has a unit test counterpart
    // Verified by adding a src file without tests
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let tests = tree("tests/unit");
        let missing: Vec<String> = tree("src")
            .into_iter()
            .filter(|p| !is_organizational(p) && !tests.contains(p))
            .map(|p| format!("  - src/{p} -> tests/unit/{p}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests every unit test file belongs to a source file
    // Verified by adding an orphaned test file
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = tree("src");
        let orphaned: Vec<String> = tree("tests/unit")
            .into_iter()
            .filter(|p| !p.ends_with("mod.rs") && !sources.contains(p))
            .map(|p| format!("  - tests/unit/{p} -> src/{p} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without source files:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every non-module test file declares at least one test
    // Verified by emptying a test file
    #[test]
    fn test_all_test_files_contain_tests() {
        let base = Path::new("tests");
        let empty: Vec<String> = tree("tests")
            .into_iter()
            .filter(|p| {
                Path::new(p).extension().and_then(|ext| ext.to_str()) == Some("rs")
                    && !p.ends_with("mod.rs")
            })
            .filter(|p| {
                fs::read_to_string(base.join(p))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|p| format!("  - tests/{p}"))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}
