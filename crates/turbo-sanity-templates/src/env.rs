//! Environment files for the web app and the studio

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::debug;

/// Which variable set an env file carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnvKind {
    NextPublic,
    Studio,
}

const ENV_FILES: &[(&str, EnvKind)] = &[
    (".env", EnvKind::NextPublic),
    ("apps/web/.env", EnvKind::NextPublic),
    ("apps/studio/.env", EnvKind::Studio),
];

/// Write `.env`, `apps/web/.env` and `apps/studio/.env`, replacing existing ones
pub fn write_env_files(
    project_dir: &Utf8Path,
    project_id: &str,
    dataset_name: &str,
) -> Result<Vec<Utf8PathBuf>> {
    let mut written = Vec::with_capacity(ENV_FILES.len());

    for (relative, kind) in ENV_FILES {
        let path = project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = match kind {
            EnvKind::NextPublic => next_public_env(project_id, dataset_name),
            EnvKind::Studio => studio_env(project_id, dataset_name),
        };
        fs::write(&path, content)?;
        debug!("Wrote {}", path);
        written.push(path);
    }

    Ok(written)
}

fn next_public_env(project_id: &str, dataset_name: &str) -> String {
    format!(
        "# Sanity Configuration
# Replace with your Sanity project ID
NEXT_PUBLIC_SANITY_PROJECT_ID={project_id}

# Replace with your Sanity dataset name (usually 'production' or 'development')
NEXT_PUBLIC_SANITY_DATASET={dataset_name}

# Optional: Add a read token for private datasets
SANITY_API_READ_TOKEN=
"
    )
}

fn studio_env(project_id: &str, dataset_name: &str) -> String {
    format!(
        "# Sanity Studio Configuration
# Replace with your Sanity project ID
SANITY_STUDIO_PROJECT_ID={project_id}

# Replace with your Sanity dataset name (usually 'production' or 'development')
SANITY_STUDIO_DATASET={dataset_name}

# Optional: Add a read token for private datasets
SANITY_API_READ_TOKEN=

# Optional: Add a studio host
SANITY_STUDIO_HOST=
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_all_env_files_with_parent_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();

        let written = write_env_files(&root, "abc123", "staging").unwrap();

        assert_eq!(written.len(), 3);
        let web = fs::read_to_string(root.join("apps/web/.env")).unwrap();
        assert!(web.contains("NEXT_PUBLIC_SANITY_PROJECT_ID=abc123\n"));
        assert!(web.contains("NEXT_PUBLIC_SANITY_DATASET=staging\n"));
        assert!(web.contains("SANITY_API_READ_TOKEN=\n"));

        let studio = fs::read_to_string(root.join("apps/studio/.env")).unwrap();
        assert!(studio.contains("SANITY_STUDIO_PROJECT_ID=abc123\n"));
        assert!(studio.contains("SANITY_STUDIO_DATASET=staging\n"));
        assert!(studio.ends_with("SANITY_STUDIO_HOST=\n"));

        assert_eq!(
            fs::read_to_string(root.join(".env")).unwrap(),
            web,
            "root and web env files carry the same variables"
        );
    }

    #[test]
    fn test_existing_env_file_is_replaced() {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();
        fs::write(root.join(".env"), "NEXT_PUBLIC_SANITY_PROJECT_ID=old\n").unwrap();

        write_env_files(&root, "new-id", "production").unwrap();

        let root_env = fs::read_to_string(root.join(".env")).unwrap();
        assert!(root_env.contains("NEXT_PUBLIC_SANITY_PROJECT_ID=new-id"));
        assert!(!root_env.contains("=old"));
    }
}
