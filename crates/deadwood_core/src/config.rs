use log::{debug, trace, warn};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{error::ConfigError, resolver::AliasConfig};

/// Loads `compilerOptions.paths` from the `tsconfig.json`/`jsconfig.json`
/// named `config_file` at the project root.
///
/// A missing file means "no aliases". A file that is not valid JSON (after
/// comments and trailing commas are removed) is logged and also yields no
/// aliases, leaving plain relative resolution in place.
pub fn read_path_aliases(root: &Path, config_file: &str) -> Result<AliasConfig, ConfigError> {
    let config_path = root.join(config_file);
    debug!("Reading path aliases from {}", config_path.display());

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No {} at project root, continuing without aliases", config_file);
            return Ok(AliasConfig::new());
        }
        Err(source) => return Err(ConfigError::AliasConfig { path: config_path, source }),
    };

    let json = match serde_json::from_str::<serde_json::Value>(&strip_json_comments(&content)) {
        Ok(json) => json,
        Err(e) => {
            warn!("Ignoring malformed {}: {}", config_path.display(), e);
            return Ok(AliasConfig::new());
        }
    };

    let mut aliases = AliasConfig::new();
    let Some(compiler_options) = json.get("compilerOptions") else {
        return Ok(aliases);
    };
    let Some(paths_obj) = compiler_options.get("paths").and_then(|p| p.as_object()) else {
        return Ok(aliases);
    };

    let base_url = compiler_options.get("baseUrl").and_then(|b| b.as_str()).unwrap_or(".");
    let base_path: PathBuf = path_clean::clean(root.join(base_url));

    for (alias, targets) in paths_obj {
        let Some(target_arr) = targets.as_array() else {
            continue;
        };
        let targets: Vec<&str> = target_arr.iter().filter_map(|t| t.as_str()).collect();
        trace!("Found path alias: '{}' -> {:?}", alias, targets);
        aliases.insert(&base_path, alias, &targets);
    }

    debug!("Loaded {} path aliases", aliases.len());
    Ok(aliases)
}

/// Removes `//` and `/* */` comments plus trailing commas, which tsconfig
/// files allow but JSON does not. String literals are left untouched.
fn strip_json_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            (']' | '}', _) => {
                let trimmed = out.trim_end().len();
                if out[..trimmed].ends_with(',') {
                    out.truncate(trimmed - 1);
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}
