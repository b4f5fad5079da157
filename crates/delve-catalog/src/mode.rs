use serde::{Deserialize, Serialize};

use super::error::CatalogError;
use super::material::Material;

/// Tolerance for recipe weights summing to one.
pub const WEIGHT_EPSILON: f64 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStyle {
    /// Two-stage box between an anchor and the cursor, any number of layers.
    Free,
    /// Stamp of a fixed width × height around the cursor on the current layer.
    Fixed,
    /// Two-stage box captured into a buffer for pasting.
    Copy,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub material: Material,
    pub weight: f64,
}

impl RecipeEntry {
    #[inline]
    pub const fn new(material: Material, weight: f64) -> Self {
        Self { material, weight }
    }

    #[inline]
    pub const fn always(material: Material) -> Self {
        Self::new(material, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeDescriptor {
    pub label: String,
    pub style: SelectionStyle,
    /// Free style: weighted candidates. Fixed style: one entry per footprint cell, row-major.
    pub recipe: Vec<RecipeEntry>,
    #[serde(default)]
    pub footprint: Option<Footprint>,
}

impl ModeDescriptor {
    pub fn free(label: &str, recipe: Vec<RecipeEntry>) -> Self {
        Self {
            label: label.to_string(),
            style: SelectionStyle::Free,
            recipe,
            footprint: None,
        }
    }

    pub fn fixed(label: &str, footprint: Footprint, materials: &[Material]) -> Self {
        Self {
            label: label.to_string(),
            style: SelectionStyle::Fixed,
            recipe: materials.iter().copied().map(RecipeEntry::always).collect(),
            footprint: Some(footprint),
        }
    }

    pub fn copy(label: &str) -> Self {
        Self {
            label: label.to_string(),
            style: SelectionStyle::Copy,
            recipe: Vec::new(),
            footprint: None,
        }
    }

    /// Configuration-time check; placement assumes it passed.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let malformed = |reason: String| CatalogError::MalformedModeDescriptor {
            label: self.label.clone(),
            reason,
        };
        match self.style {
            SelectionStyle::Free => {
                if self.recipe.is_empty() {
                    return Err(malformed("free-style recipe is empty".into()));
                }
                if let Some(bad) = self
                    .recipe
                    .iter()
                    .find(|e| !(e.weight > 0.0 && e.weight <= 1.0))
                {
                    return Err(malformed(format!(
                        "weight {} for {:?} is outside (0, 1]",
                        bad.weight, bad.material
                    )));
                }
                let sum: f64 = self.recipe.iter().map(|e| e.weight).sum();
                if (sum - 1.0).abs() > WEIGHT_EPSILON {
                    return Err(malformed(format!("weights sum to {sum}, expected 1.0")));
                }
            }
            SelectionStyle::Fixed => {
                let Some(fp) = self.footprint else {
                    return Err(malformed("fixed style without a footprint".into()));
                };
                if fp.width == 0 || fp.height == 0 {
                    return Err(malformed(format!(
                        "footprint {}x{} has an empty side",
                        fp.width, fp.height
                    )));
                }
                if self.recipe.len() != fp.area() {
                    return Err(malformed(format!(
                        "recipe has {} entries, footprint {}x{} needs {}",
                        self.recipe.len(),
                        fp.width,
                        fp.height,
                        fp.area()
                    )));
                }
            }
            SelectionStyle::Copy => {}
        }
        Ok(())
    }
}

/// Editing tools.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Mode {
    Dig,
    MakeEmpty,
    Wall,
    Door,
    Ramp,
    Stairs,
    Farm,
    Table,
    Water,
    Grass,
    Carpenter,
    TradeDepot,
    Copy,
}

impl Mode {
    pub const COUNT: usize = 13;

    pub const ALL: [Mode; Mode::COUNT] = [
        Mode::Dig,
        Mode::MakeEmpty,
        Mode::Wall,
        Mode::Door,
        Mode::Ramp,
        Mode::Stairs,
        Mode::Farm,
        Mode::Table,
        Mode::Water,
        Mode::Grass,
        Mode::Carpenter,
        Mode::TradeDepot,
        Mode::Copy,
    ];

    /// Short name used by config files and command scripts.
    pub fn key(self) -> &'static str {
        match self {
            Mode::Dig => "dig",
            Mode::MakeEmpty => "empty",
            Mode::Wall => "wall",
            Mode::Door => "door",
            Mode::Ramp => "ramp",
            Mode::Stairs => "stairs",
            Mode::Farm => "farm",
            Mode::Table => "table",
            Mode::Water => "water",
            Mode::Grass => "grass",
            Mode::Carpenter => "carpenter",
            Mode::TradeDepot => "trade-depot",
            Mode::Copy => "copy",
        }
    }

    pub fn parse(key: &str) -> Result<Mode, CatalogError> {
        Mode::ALL
            .iter()
            .copied()
            .find(|m| m.key() == key)
            .ok_or_else(|| CatalogError::UnknownMode(key.to_string()))
    }

    fn build_descriptor(self) -> ModeDescriptor {
        use Material as M;
        let single = |label: &str, m: Material| ModeDescriptor::free(label, vec![RecipeEntry::always(m)]);
        match self {
            Mode::Dig => single("Dig Flooring", M::Floor),
            Mode::MakeEmpty => single("Make Empty", M::Empty),
            Mode::Wall => single("Place Wall", M::Stone),
            Mode::Door => single("Place Door", M::Door),
            Mode::Ramp => single("Place Up Ramp", M::Ramp),
            Mode::Stairs => single("Place Stairs", M::Stairs),
            Mode::Farm => single("Place Farm Plot", M::Farm),
            Mode::Table => single("Place Table", M::Table),
            Mode::Water => single("Place Water", M::Water),
            Mode::Grass => ModeDescriptor::free(
                "Place Grass",
                vec![
                    RecipeEntry::new(M::Grass1, 0.83),
                    RecipeEntry::new(M::Grass2, 0.15),
                    RecipeEntry::new(M::Grass3, 0.02),
                ],
            ),
            Mode::Carpenter => ModeDescriptor::fixed(
                "Place Workshop",
                Footprint::new(3, 3),
                &[
                    M::CarpenterTopLeft,
                    M::CarpenterTop,
                    M::CarpenterTopRight,
                    M::CarpenterLeft,
                    M::CarpenterMiddle,
                    M::CarpenterRight,
                    M::CarpenterBottomLeft,
                    M::CarpenterBottom,
                    M::CarpenterBottomRight,
                ],
            ),
            Mode::TradeDepot => {
                const C: Material = Material::TradingCircle;
                const S: Material = Material::TradingSolid;
                ModeDescriptor::fixed(
                    "Place Trade Depot",
                    Footprint::new(5, 5),
                    &[
                        C, S, S, S, C, //
                        S, S, S, S, S, //
                        S, S, C, S, S, //
                        S, S, S, S, S, //
                        C, S, S, S, C,
                    ],
                )
            }
            Mode::Copy => ModeDescriptor::copy("Copy Cells"),
        }
    }
}

/// Validated, immutable set of mode descriptors, built once at startup.
#[derive(Clone, Debug)]
pub struct ModeCatalog {
    modes: Vec<ModeDescriptor>,
}

impl ModeCatalog {
    pub fn load() -> Result<Self, CatalogError> {
        let modes: Vec<ModeDescriptor> = Mode::ALL.iter().map(|m| m.build_descriptor()).collect();
        for d in &modes {
            d.validate()?;
        }
        log::debug!("mode catalog loaded: {} modes", modes.len());
        Ok(Self { modes })
    }

    #[inline]
    pub fn get(&self, mode: Mode) -> &ModeDescriptor {
        &self.modes[mode as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mode, &ModeDescriptor)> {
        Mode::ALL.iter().copied().zip(self.modes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_validates() {
        let cat = ModeCatalog::load().expect("builtin modes are valid");
        assert_eq!(cat.iter().count(), Mode::COUNT);
        assert_eq!(cat.get(Mode::Carpenter).footprint, Some(Footprint::new(3, 3)));
        assert_eq!(cat.get(Mode::TradeDepot).recipe.len(), 25);
        assert_eq!(cat.get(Mode::Copy).style, SelectionStyle::Copy);
    }

    #[test]
    fn mode_keys_parse_back() {
        for m in Mode::ALL {
            assert_eq!(Mode::parse(m.key()), Ok(m));
        }
        assert!(matches!(Mode::parse("paint"), Err(CatalogError::UnknownMode(_))));
    }

    #[test]
    fn fixed_recipe_length_must_match_area() {
        let d = ModeDescriptor::fixed("short", Footprint::new(2, 2), &[Material::Floor; 3]);
        let err = d.validate().unwrap_err();
        assert!(matches!(err, CatalogError::MalformedModeDescriptor { ref label, .. } if label == "short"));
    }

    #[test]
    fn free_weights_must_sum_to_one() {
        let d = ModeDescriptor::free(
            "lopsided",
            vec![
                RecipeEntry::new(Material::Grass1, 0.5),
                RecipeEntry::new(Material::Grass2, 0.4),
            ],
        );
        assert!(d.validate().is_err());
        let ok = ModeDescriptor::free(
            "even",
            vec![
                RecipeEntry::new(Material::Grass1, 0.5),
                RecipeEntry::new(Material::Grass2, 0.5),
            ],
        );
        assert!(ok.validate().is_ok());
        assert!(ModeDescriptor::free("none", Vec::new()).validate().is_err());
    }

    #[test]
    fn fixed_without_footprint_is_rejected() {
        let mut d = ModeDescriptor::fixed("stamp", Footprint::new(1, 1), &[Material::Door]);
        d.footprint = None;
        assert!(d.validate().is_err());
    }
}
