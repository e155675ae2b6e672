//! Whole-word `joy<N>` substitution in the external bindings file.
//!
//! The bindings file is free-form text; the only tokens that matter to this
//! tool are whole-word `joy<digits>` references. Substitution is a single
//! simultaneous pass per line (every old index is looked up in the remapping
//! at match time), so cyclic remappings like `{1->2, 2->1}` swap cleanly
//! instead of colliding, and `joy1` never touches `joy10`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, info};

use crate::backup::write_with_backup;
use crate::ConfigError;

static JOY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(joy)(\d+)\b").unwrap_or_else(|e| panic!("invalid joy pattern: {e}"))
});

/// Apply an old-index → new-index remapping to bindings text.
///
/// Returns the rewritten text and the number of lines whose content changed.
pub fn apply_remapping(content: &str, remapping: &BTreeMap<u32, u32>) -> (String, usize) {
    let mut changed_lines = 0;
    let mut out = String::with_capacity(content.len());

    for (i, line) in content.split('\n').enumerate() {
        let rewritten = JOY_TOKEN.replace_all(line, |caps: &Captures<'_>| {
            let prefix = &caps[1];
            let old: Option<u32> = caps[2].parse().ok();
            match old.and_then(|o| remapping.get(&o)) {
                Some(new) => format!("{prefix}{new}"),
                None => caps[0].to_string(),
            }
        });
        if rewritten != line {
            changed_lines += 1;
        }
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&rewritten);
    }

    (out, changed_lines)
}

/// Outcome of a bindings-file rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingsRewrite {
    /// Nothing referenced a remapped index; the file was not touched.
    Unchanged,
    /// File rewritten (after backup); carries the changed-line count.
    Rewritten { changed_lines: usize },
}

/// Rewrite `joy<N>` references in the bindings file per the remapping.
///
/// The file is only written when at least one line changed, and any write is
/// preceded by a scoped backup.
pub fn rewrite_bindings_file(
    path: &Path,
    remapping: &BTreeMap<u32, u32>,
) -> Result<BindingsRewrite, ConfigError> {
    if remapping.is_empty() {
        return Ok(BindingsRewrite::Unchanged);
    }
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let (rewritten, changed_lines) = apply_remapping(&content, remapping);

    if changed_lines == 0 {
        debug!(path = %path.display(), "no joy references affected, skipping rewrite");
        return Ok(BindingsRewrite::Unchanged);
    }

    write_with_backup(path, &rewritten)?;
    info!(path = %path.display(), changed_lines, "bindings file rewritten");
    Ok(BindingsRewrite::Rewritten { changed_lines })
}
