//! Test fixtures for working directories and config homes.
//!
//! Provides a `RepoFixture` builder that lays out a temporary config home and
//! working directory, plus scripted prompts and snapshot archives -- all
//! offline.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use reporouge::cli::{CommandContext, Prompt};
use reporouge::core::{ConfigPaths, GlobalConfig, RepoDescriptor};
use reporouge::platform::RougeClient;

/// A temporary config home and working directory, cleaned up on drop.
pub struct RepoFixture {
    /// Kept alive for the lifetime of the fixture.
    pub _temp: TempDir,
    /// Global config location (`<temp>/home`).
    pub paths: ConfigPaths,
    /// Directory commands operate on (`<temp>/work`).
    pub work_dir: PathBuf,
}

impl RepoFixture {
    /// Empty home, empty working directory, not logged in.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("failed to create temp dir");
        let paths = ConfigPaths::at(temp.path().join("home"));
        paths.ensure_dirs().expect("failed to create config home");
        let work_dir = temp.path().join("work");
        fs::create_dir_all(&work_dir).expect("failed to create work dir");

        Self {
            _temp: temp,
            paths,
            work_dir,
        }
    }

    /// Save a logged-in global config pointing at `server_url`.
    pub fn logged_in(self, server_url: &str) -> Self {
        GlobalConfig::logged_in(server_url, "cli-token-123", "alice", "alice@example.com")
            .save(&self.paths)
            .expect("failed to save config");
        self
    }

    /// Save a global config with only the server URL set.
    pub fn logged_out(self, server_url: &str) -> Self {
        let config = GlobalConfig {
            server_url: server_url.to_string(),
            ..GlobalConfig::default()
        };
        config.save(&self.paths).expect("failed to save config");
        self
    }

    /// Mark the working directory as a clone of `owner/repo` on `branch`.
    pub fn linked(self, owner: &str, repo: &str, branch: &str) -> Self {
        RepoDescriptor::new(owner, repo, branch)
            .save(&self.work_dir)
            .expect("failed to save descriptor");
        self
    }

    /// Write a file relative to the working directory.
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Read a file relative to the working directory.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", relative, e))
    }

    /// Whether a path exists relative to the working directory.
    pub fn exists(&self, relative: &str) -> bool {
        self.work_dir.join(relative).exists()
    }

    /// Fresh command context, reloading the config from disk.
    pub fn ctx(&self) -> CommandContext {
        CommandContext::load(self.paths.clone(), &self.work_dir)
    }

    /// Client configured from the saved global config.
    pub fn host(&self) -> RougeClient {
        self.ctx().connect().expect("failed to build client")
    }

    /// Descriptor currently on disk.
    pub fn descriptor(&self) -> Option<RepoDescriptor> {
        RepoDescriptor::load(&self.work_dir)
    }

    /// Raw bytes of the global config file.
    pub fn config_bytes(&self) -> Vec<u8> {
        fs::read(&self.paths.config_file).expect("config file missing")
    }

    /// Sorted list of every entry below `dir`, relative and `/`-separated.
    pub fn tree(&self, dir: &Path) -> Vec<String> {
        let mut entries: Vec<String> = walkdir::WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| {
                e.path()
                    .strip_prefix(dir)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        entries.sort();
        entries
    }
}

/// Build a ZIP snapshot in memory. Names ending in `/` become directories.
pub fn snapshot_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Prompt that replays canned answers and records the questions asked.
pub struct ScriptedPrompt {
    inputs: RefCell<VecDeque<String>>,
    confirm_answer: bool,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    /// Prompt that answers text questions in order and confirms with `confirm_answer`.
    pub fn new(inputs: &[&str], confirm_answer: bool) -> Self {
        Self {
            inputs: RefCell::new(inputs.iter().map(|s| s.to_string()).collect()),
            confirm_answer,
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Prompt that must never be consulted for text.
    pub fn silent() -> Self {
        Self::new(&[], false)
    }

    fn next(&self, label: &str) -> anyhow::Result<String> {
        self.asked.borrow_mut().push(label.to_string());
        self.inputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected prompt: {}", label))
    }
}

impl Prompt for ScriptedPrompt {
    fn input(&self, label: &str) -> anyhow::Result<String> {
        self.next(label)
    }

    fn password(&self, label: &str) -> anyhow::Result<String> {
        self.next(label)
    }

    fn confirm(&self, question: &str) -> anyhow::Result<bool> {
        self.asked.borrow_mut().push(question.to_string());
        Ok(self.confirm_answer)
    }
}
