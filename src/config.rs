use std::error::Error;
use std::fs;
use std::path::Path;

use delve_catalog::{Material, MaterialCode, Mode, Rgb};
use delve_view::{DEFAULT_MAX_PEEK_DEPTH, DEFAULT_PEEK_ALPHA, Visibility};
use serde::Deserialize;

/// `delve.toml`. Every section and key is optional.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridConfig,
    pub view: ViewConfig,
    pub editor: EditorSection,
    pub colors: ColorConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GridConfig {
    pub layers: usize,
    pub rows: usize,
    pub columns: usize,
    /// Material code a new map is filled with.
    pub fill: MaterialCode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            layers: 30,
            rows: 200,
            columns: 200,
            fill: Material::FILLER.code(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ViewConfig {
    pub max_peek_depth: u8,
    pub peek_alpha: u8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            max_peek_depth: DEFAULT_MAX_PEEK_DEPTH,
            peek_alpha: DEFAULT_PEEK_ALPHA,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EditorSection {
    /// Defaults to the middle layer.
    pub start_layer: Option<usize>,
    pub default_mode: String,
    pub seed: u64,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            start_layer: None,
            default_mode: Mode::Dig.key().to_string(),
            seed: 0x5EED,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ColorConfig {
    pub selection: String,
    pub cursor: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            selection: "#c4ae3e".into(),
            cursor: "#7777ff".into(),
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: EditorConfig = toml::from_str(toml_str)?;
        cfg.check()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Missing file means defaults; an unreadable or invalid one is a warning and
    /// also falls back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("config {} not found; using defaults", path.display());
            return Self::default();
        }
        match Self::from_path(path) {
            Ok(cfg) => {
                log::info!("config loaded from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("config {} rejected ({}); using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    fn check(&self) -> Result<(), Box<dyn Error>> {
        if Material::from_code(self.grid.fill).is_none() {
            return Err(format!("grid.fill {} is not a material code", self.grid.fill).into());
        }
        if self.grid.layers == 0 || self.grid.rows == 0 || self.grid.columns == 0 {
            return Err("grid dimensions must be non-zero".into());
        }
        Mode::parse(&self.editor.default_mode)?;
        self.selection_color()?;
        self.cursor_color()?;
        Ok(())
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::new(self.view.max_peek_depth, self.view.peek_alpha)
    }

    pub fn default_mode(&self) -> Mode {
        Mode::parse(&self.editor.default_mode).unwrap_or(Mode::Dig)
    }

    pub fn selection_color(&self) -> Result<Rgb, String> {
        Rgb::parse_hex(&self.colors.selection)
            .ok_or_else(|| format!("colors.selection `{}` is not #rrggbb", self.colors.selection))
    }

    pub fn cursor_color(&self) -> Result<Rgb, String> {
        Rgb::parse_hex(&self.colors.cursor)
            .ok_or_else(|| format!("colors.cursor `{}` is not #rrggbb", self.colors.cursor))
    }
}
