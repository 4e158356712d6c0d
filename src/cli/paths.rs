//! Vault path resolution

use std::env;
use std::path::PathBuf;

/// The vault root: `--vault` when given, else the current directory, else `.`
pub fn resolve_vault_path(vault: Option<PathBuf>) -> PathBuf {
    vault.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_vault_wins() {
        let root = resolve_vault_path(Some(PathBuf::from("/tmp/vault")));
        assert_eq!(root, PathBuf::from("/tmp/vault"));
    }

    #[test]
    fn test_falls_back_to_current_dir() {
        let root = resolve_vault_path(None);
        assert!(!root.as_os_str().is_empty());
    }
}
