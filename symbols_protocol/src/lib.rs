use serde::{Deserialize, Serialize};

pub const DEFAULT_WEIGHT: i32 = 400;
pub const DEFAULT_SIZE: i32 = 24;
pub const DEFAULT_GRADE: i32 = 0;

pub const MIN_WEIGHT: i32 = 100;
pub const MAX_WEIGHT: i32 = 700;
pub const MIN_SIZE: i32 = 20;
pub const MAX_SIZE: i32 = 48;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleFamily {
    #[default]
    #[serde(rename = "materialsymbolsoutlined")]
    Outlined,
    #[serde(rename = "materialsymbolsrounded")]
    Rounded,
    #[serde(rename = "materialsymbolssharp")]
    Sharp,
}

impl StyleFamily {
    pub const ALL: [StyleFamily; 3] = [StyleFamily::Outlined, StyleFamily::Rounded, StyleFamily::Sharp];

    /// Path segment used by the remote icon repository.
    pub fn token(self) -> &'static str {
        match self {
            StyleFamily::Outlined => "materialsymbolsoutlined",
            StyleFamily::Rounded => "materialsymbolsrounded",
            StyleFamily::Sharp => "materialsymbolssharp",
        }
    }

    /// Accepts either the full token or the short family name ("rounded").
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.token() == s || f.token().strip_prefix("materialsymbols") == Some(s.as_str()))
    }
}

/// Rendering variant of an icon. Fields missing from incoming JSON take their defaults,
/// so a partial persisted record is merged over `ParameterSet::default()`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ParameterSet {
    pub style: StyleFamily,
    pub weight: i32,
    pub size: i32,
    pub grade: i32,
    pub fill: bool,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            style: StyleFamily::Outlined,
            weight: DEFAULT_WEIGHT,
            size: DEFAULT_SIZE,
            grade: DEFAULT_GRADE,
            fill: false,
        }
    }
}

impl ParameterSet {
    pub fn clamped(self) -> Self {
        Self {
            weight: self.weight.clamp(MIN_WEIGHT, MAX_WEIGHT),
            size: self.size.clamp(MIN_SIZE, MAX_SIZE),
            ..self
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Component,
    Frame,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SelectableNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(rename = "iconName", default)]
    pub icon_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressPhase {
    Starting,
    ItemProgress,
    ItemDone,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Busy,
    InvalidRequest,
}

/// Messages sent by the UI surface.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum UiRequest {
    GetSelection,
    UpdateIcons {
        parameters: ParameterSet,
        nodes: Vec<SelectableNode>,
    },
    Resize {
        width: u32,
        height: u32,
    },
}

/// Messages sent from the plugin core to the UI surface.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum PluginEvent {
    SelectionChanged {
        nodes: Vec<SelectableNode>,
        #[serde(rename = "hasUnsupportedNodes")]
        has_unsupported_nodes: bool,
    },
    UpdateProgress {
        phase: ProgressPhase,
        message: String,
        current: usize,
        total: usize,
    },
    UpdateComplete {
        count: usize,
    },
    UpdateError {
        error: String,
    },
    SettingsLoaded {
        parameters: ParameterSet,
    },
    Error {
        msg: String,
        code: ErrorCode,
    },
}
