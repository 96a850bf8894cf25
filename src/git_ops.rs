use anyhow::{Context, Result, anyhow};
use git2::{Repository, Signature, Time, build::CheckoutBuilder};
use std::path::{Path, PathBuf};

/// Version control for the checklist data file
///
/// Exists only when the data file sits inside a git work tree. Every save
/// becomes a commit; pulling and pushing go through the `origin` remote and
/// are skipped when the repository has none.
pub struct GitOps {
    repo: Repository,
}

impl GitOps {
    /// Look for a repository containing `file_path`
    ///
    /// The file itself does not have to exist yet.
    pub fn discover(file_path: &Path) -> Option<Self> {
        let dir = match file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let repo = Repository::discover(&dir).ok()?;
        // Bare repositories have nowhere to write the data file
        repo.workdir()?;
        Some(Self { repo })
    }

    fn branch_name(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get HEAD")?;
        head.shorthand()
            .map(str::to_string)
            .context("Failed to get branch name")
    }

    fn origin(&self) -> Option<git2::Remote<'_>> {
        match self.repo.find_remote("origin") {
            Ok(remote) => Some(remote),
            Err(_) => {
                tracing::debug!("No 'origin' remote configured, skipping network sync");
                None
            }
        }
    }

    /// Fetch `origin` and fast-forward the current branch
    ///
    /// Diverged histories are left alone and reported as an error.
    pub fn pull(&self) -> Result<()> {
        let Some(mut remote) = self.origin() else {
            return Ok(());
        };
        let branch = self.branch_name()?;

        remote
            .fetch(&[&branch], None, None)
            .context("Failed to fetch from origin")?;

        let fetch_head = self.repo.find_reference("FETCH_HEAD")?;
        let fetch_commit = self.repo.reference_to_annotated_commit(&fetch_head)?;
        let (analysis, _) = self.repo.merge_analysis(&[&fetch_commit])?;

        if analysis.is_up_to_date() {
            return Ok(());
        }
        if analysis.is_fast_forward() {
            let refname = format!("refs/heads/{}", branch);
            let mut reference = self.repo.find_reference(&refname)?;
            reference.set_target(fetch_commit.id(), "Fast-forward checklist data")?;
            self.repo.set_head(&refname)?;
            self.repo
                .checkout_head(Some(CheckoutBuilder::default().force()))?;
            tracing::info!(branch = %branch, "Fast-forwarded checklist data from origin");
            return Ok(());
        }
        Err(anyhow!(
            "Local and remote checklist history diverged. Please merge manually."
        ))
    }

    /// Stage `file_path` and commit it
    ///
    /// Returns `false` without committing when the file content matches HEAD.
    pub fn commit(&self, file_path: &Path, message: &str) -> Result<bool> {
        let workdir = self
            .repo
            .workdir()
            .context("Repository has no working directory")?
            .canonicalize()?;
        let absolute = file_path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", file_path.display()))?;
        let relative = absolute
            .strip_prefix(&workdir)
            .context("Data file is not inside the repository")?;

        let mut index = self.repo.index()?;
        index.add_path(relative)?;
        index.write()?;
        let tree_id = index.write_tree()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        if let Some(ref parent) = parent
            && parent.tree_id() == tree_id
        {
            return Ok(false);
        }

        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.signature()?;
        let parents: Vec<_> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(true)
    }

    /// Push the current branch to `origin`
    pub fn push(&self) -> Result<()> {
        let Some(mut remote) = self.origin() else {
            return Ok(());
        };
        let refspec = format!("refs/heads/{}", self.branch_name()?);
        remote
            .push(&[&refspec], None)
            .context("Failed to push to origin")?;
        Ok(())
    }

    fn signature(&self) -> Result<Signature<'static>> {
        let config = self.repo.config()?;
        let name = config
            .get_string("user.name")
            .unwrap_or_else(|_| "Checklist MCP Server".to_string());
        let email = config
            .get_string("user.email")
            .unwrap_or_else(|_| "checklist-mcp@localhost".to_string());

        Signature::now(&name, &email).or_else(|_| {
            // Some CI clocks make now() fail
            Signature::new(&name, &email, &Time::new(1_700_000_000, 0))
                .context("Failed to create commit signature")
        })
    }
}
