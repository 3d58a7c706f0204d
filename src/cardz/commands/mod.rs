use crate::check::CheckReport;
use crate::config::CardzConfig;
use crate::model::{Card, Entry, Folder};
use crate::study::StudySession;
use crate::tree::OutlineRow;
use std::path::PathBuf;

pub mod cards;
pub mod check;
pub mod config;
pub mod export;
pub mod folders;
pub mod helpers;
pub mod import;
pub mod list;
pub mod navigate;
pub mod remove;
pub mod study;

pub use import::{ImportPlan, ImportSummary};

#[derive(Debug, Clone)]
pub struct CardzPaths {
    pub data: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_folders: Vec<Folder>,
    pub affected_cards: Vec<Card>,
    pub listed_entries: Vec<Entry>,
    pub listed_cards: Vec<Card>,
    /// Breadcrumb from root, when the command is about one folder.
    pub path: Vec<Folder>,
    pub outline: Vec<OutlineRow>,
    pub config: Option<CardzConfig>,
    pub report: Option<CheckReport>,
    pub import_summary: Option<ImportSummary>,
    pub study: Option<StudySession>,
    pub file: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_folders(mut self, folders: Vec<Folder>) -> Self {
        self.affected_folders = folders;
        self
    }

    pub fn with_affected_cards(mut self, cards: Vec<Card>) -> Self {
        self.affected_cards = cards;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<Entry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_listed_cards(mut self, cards: Vec<Card>) -> Self {
        self.listed_cards = cards;
        self
    }

    pub fn with_path(mut self, path: Vec<Folder>) -> Self {
        self.path = path;
        self
    }

    pub fn with_outline(mut self, outline: Vec<OutlineRow>) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_config(mut self, config: CardzConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_report(mut self, report: CheckReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_import_summary(mut self, summary: ImportSummary) -> Self {
        self.import_summary = Some(summary);
        self
    }

    pub fn with_study(mut self, study: StudySession) -> Self {
        self.study = Some(study);
        self
    }

    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }
}
