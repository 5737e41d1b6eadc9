use std::path::{Path, PathBuf};
use crate::structs::issue::Issue;
use crate::structs::resource_path::ResourcePath;
use crate::traits::resource_resolver::ResourceResolver;

/// Maps absolute issue paths onto resources below the workspace root.
pub struct WorkspaceResolver {
    root: PathBuf,
    require_existing: bool,
}

impl WorkspaceResolver {
    pub fn new(root: &Path, require_existing: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            require_existing,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve_path(&self, file: &Path) -> Option<ResourcePath> {
        let relative = file.strip_prefix(&self.root).ok()?;

        if self.require_existing && !file.is_file() {
            log::debug!("File {} is inside the workspace but does not exist", file.display());
            return None;
        }

        let resource = ResourcePath::from_relative(relative);
        // A file directly in the root has no project to live in
        if resource.is_workspace_root() || resource.parent().map_or(true, |p| p.is_workspace_root()) {
            return None;
        }
        Some(resource)
    }
}

impl ResourceResolver for WorkspaceResolver {
    fn resolve(&self, issue: &Issue) -> Option<ResourcePath> {
        self.resolve_path(Path::new(&issue.file_absolute_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_existing_files_inside_the_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("shop").join("src").join("Cart.java");
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, "class Cart {}").unwrap();

        let resolver = WorkspaceResolver::new(dir.path(), true);
        assert_eq!(resolver.resolve_path(&file), Some(ResourcePath::new("shop/src/Cart.java")));
    }

    #[test]
    fn rejects_missing_and_outside_files() {
        let dir = TempDir::new().unwrap();
        let resolver = WorkspaceResolver::new(dir.path(), true);

        assert_eq!(resolver.resolve_path(&dir.path().join("shop/Missing.java")), None);
        assert_eq!(resolver.resolve_path(Path::new("/elsewhere/shop/A.java")), None);
    }

    #[test]
    fn lenient_resolver_skips_the_existence_check() {
        let resolver = WorkspaceResolver::new(Path::new("/ws"), false);
        assert_eq!(
            resolver.resolve_path(Path::new("/ws/shop/A.java")),
            Some(ResourcePath::new("shop/A.java"))
        );
        assert_eq!(resolver.resolve_path(Path::new("/ws/loose.txt")), None);
    }
}
