use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the fake query program written into each workspace.
pub const FAKE_PROGRAM: &str = ".bin/cscope";

/// Parses a fixture into relative paths and file contents.
///
/// Each file starts with a `//- /relative/path` header line; every following
/// line up to the next header belongs to that file.
/// ## Panics
/// if content appears before the first header
pub fn parse_fixture(input: &str) -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    let mut current_path: Option<PathBuf> = None;
    let mut current_content = String::new();

    for line in input.lines() {
        if let Some(path) = line.strip_prefix("//- ") {
            if let Some(p) = current_path.take() {
                files.push((p, current_content.clone()));
                current_content.clear();
            }
            // Store relative path (trim leading slash)
            current_path = Some(PathBuf::from(path.trim_start_matches('/')));
        } else if !line.trim().is_empty() || current_path.is_some() {
            assert!(current_path.is_some(), "fixture content before first header");
            current_content.push_str(line);
            current_content.push('\n');
        }
    }

    if let Some(p) = current_path {
        files.push((p, current_content));
    }
    files
}

/// Temporary source tree with a fake `cscope` program.
pub struct TestWorkspace {
    /// Temporary folder for the workspace
    pub root: TempDir,
    /// Files written from the fixture
    pub files: Vec<(PathBuf, String)>,
    /// Canonicalized root path (resolves symlinks like /var -> /private/var on macOS)
    canonical_root: PathBuf,
}

impl TestWorkspace {
    /// Creates a new builder for constructing a test workspace
    pub fn builder() -> TestWorkspaceBuilder {
        TestWorkspaceBuilder::new()
    }

    /// Returns the canonicalized root path
    pub fn canonical_root(&self) -> &PathBuf {
        &self.canonical_root
    }

    /// Converts a relative path to an absolute path
    pub fn apath(&self, path: &str) -> PathBuf {
        self.canonical_root.join(path)
    }

    /// Path of the fake query program
    pub fn program(&self) -> String {
        self.apath(FAKE_PROGRAM).display().to_string()
    }

    /// Arguments the fake program received on its last run, one per line
    pub fn recorded_args(&self) -> Vec<String> {
        std::fs::read_to_string(self.apath(".bin/args.txt"))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Replaces what the fake program prints
    pub fn set_output(&self, output: &[u8]) {
        std::fs::write(self.apath(".bin/output.txt"), output).unwrap();
    }
}

/// Builder for creating test workspaces
pub struct TestWorkspaceBuilder {
    fixture: Option<String>,
    database_in: Option<String>,
    output: Vec<u8>,
    failure: Option<String>,
}

impl TestWorkspaceBuilder {
    /// Creates a new builder
    pub fn new() -> Self {
        Self {
            fixture: None,
            database_in: Some(String::new()),
            output: Vec::new(),
            failure: None,
        }
    }

    /// Sets the fixture content
    #[must_use]
    pub fn fixture(mut self, fixture: &str) -> Self {
        self.fixture = Some(fixture.to_string());
        self
    }

    /// Places `cscope.out` in the given relative directory (root by default)
    #[must_use]
    pub fn database_in(mut self, dir: &str) -> Self {
        self.database_in = Some(dir.to_string());
        self
    }

    /// Builds the workspace without a database file
    #[must_use]
    pub fn without_database(mut self) -> Self {
        self.database_in = None;
        self
    }

    /// Sets what the fake query program prints
    #[must_use]
    pub fn cscope_output(mut self, output: impl AsRef<[u8]>) -> Self {
        self.output = output.as_ref().to_vec();
        self
    }

    /// Makes the fake program print `message` on stderr and exit with 1
    #[must_use]
    pub fn cscope_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Builds the test workspace
    /// ## Panics
    pub fn build(self) -> TestWorkspace {
        let root = TempDir::new().expect("Failed to create temp directory");
        let canonical_root = root
            .path()
            .canonicalize()
            .expect("Failed to canonicalize root");

        let files = self.fixture.as_deref().map(parse_fixture).unwrap_or_default();
        for (path, content) in &files {
            let abs = canonical_root.join(path);
            std::fs::create_dir_all(abs.parent().unwrap()).unwrap();
            std::fs::write(&abs, content).unwrap();
        }

        if let Some(dir) = &self.database_in {
            let dir = canonical_root.join(dir);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("cscope.out"), b"cscope 15 placeholder\n").unwrap();
        }

        write_fake_program(&canonical_root, &self.output, self.failure.as_deref());

        TestWorkspace {
            root,
            files,
            canonical_root,
        }
    }
}

impl Default for TestWorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes a shell script standing in for `cscope`.
///
/// The script records its arguments next to itself and prints the contents
/// of `output.txt`. If `stderr.txt` is not empty it is copied to stderr and
/// the script exits with status 1.
fn write_fake_program(root: &Path, output: &[u8], failure: Option<&str>) {
    let bin = root.join(".bin");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::write(bin.join("output.txt"), output).unwrap();
    std::fs::write(bin.join("stderr.txt"), failure.unwrap_or_default()).unwrap();

    let script = bin.join("cscope");
    std::fs::write(
        &script,
        "#!/bin/sh\n\
         dir=$(dirname \"$0\")\n\
         for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > \"$dir/args.txt\"\n\
         cat \"$dir/output.txt\"\n\
         if [ -s \"$dir/stderr.txt\" ]; then cat \"$dir/stderr.txt\" >&2; exit 1; fi\n",
    )
    .unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
