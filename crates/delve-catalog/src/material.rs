use serde::{Deserialize, Serialize};

use super::types::{MaterialCode, RenderStyle, Rgb};

/// Everything that can occupy a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Material {
    Empty = 0,
    Floor = 1,
    Stone = 2,
    Grass1 = 3,
    Grass2 = 4,
    Grass3 = 5,
    Door = 6,
    Ramp = 7,
    Stairs = 8,
    Farm = 9,
    Table = 10,
    Water = 11,
    CarpenterTopLeft = 12,
    CarpenterTop = 13,
    CarpenterTopRight = 14,
    CarpenterLeft = 15,
    CarpenterMiddle = 16,
    CarpenterRight = 17,
    CarpenterBottomLeft = 18,
    CarpenterBottom = 19,
    CarpenterBottomRight = 20,
    TradingCircle = 21,
    TradingSolid = 22,
}

/// Immutable display metadata for one material.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaterialDescriptor {
    pub material: Material,
    pub name: &'static str,
    pub color: Rgb,
    pub style: RenderStyle,
    pub glyphs: &'static [char],
}

impl MaterialDescriptor {
    /// Glyph to draw. The second glyph is only used for elevation-styled
    /// materials seen from above; everything else takes the first.
    #[inline]
    pub fn glyph(&self, seen_from_above: bool) -> Option<char> {
        if seen_from_above && self.style == RenderStyle::Elevation && self.glyphs.len() == 2 {
            return Some(self.glyphs[1]);
        }
        self.glyphs.first().copied()
    }
}

const DOT: char = '\u{22C5}';
const CLUB: char = '\u{2663}';
const WAVES: char = '\u{2248}';

const FLOOR_GREY: Rgb = Rgb::new(0xd3, 0xd3, 0xd3);
const STONE_GREY: Rgb = Rgb::new(0x8c, 0x8c, 0x8c);
const GRASS_GREEN: Rgb = Rgb::new(0x4f, 0xa8, 0x62);
const OCHRE: Rgb = Rgb::new(0xcd, 0xd1, 0x00);

const fn standard(material: Material, name: &'static str, color: Rgb, glyphs: &'static [char]) -> MaterialDescriptor {
    MaterialDescriptor {
        material,
        name,
        color,
        style: RenderStyle::Standard,
        glyphs,
    }
}

const fn describe(m: Material) -> MaterialDescriptor {
    use Material::*;
    match m {
        Empty => standard(m, "empty", Rgb::BLACK, &[]),
        Floor => standard(m, "floor", FLOOR_GREY, &[DOT]),
        Stone => standard(m, "wall", STONE_GREY, &[]),
        Grass1 => standard(m, "grass", GRASS_GREEN, &[DOT]),
        Grass2 => standard(m, "grass", GRASS_GREEN, &[',']),
        Grass3 => standard(m, "grass", GRASS_GREEN, &[CLUB]),
        Door => standard(m, "door", STONE_GREY, &['+']),
        Ramp => MaterialDescriptor {
            material: m,
            name: "ramp",
            color: STONE_GREY,
            style: RenderStyle::Elevation,
            glyphs: &['\u{25B2}', '\u{25BC}'],
        },
        Stairs => standard(m, "stairs", STONE_GREY, &['X']),
        Farm => standard(m, "farm", OCHRE, &[WAVES]),
        Table => standard(m, "table", Rgb::new(0x96, 0x6d, 0x37), &['\u{2564}']),
        Water => standard(m, "water", Rgb::new(0x6d, 0x7e, 0xff), &[WAVES]),
        CarpenterTopLeft => standard(m, "carpenter", Rgb::BLACK, &[]),
        CarpenterTop => standard(m, "carpenter", OCHRE, &['"']),
        CarpenterTopRight => standard(m, "carpenter", OCHRE, &['=']),
        CarpenterLeft => standard(m, "carpenter", OCHRE, &[]),
        CarpenterMiddle => standard(m, "carpenter", Rgb::BLACK, &[]),
        CarpenterRight => standard(m, "carpenter", Rgb::BLACK, &[]),
        CarpenterBottomLeft => standard(m, "carpenter", OCHRE, &[]),
        CarpenterBottom => standard(m, "carpenter", OCHRE, &[']']),
        CarpenterBottomRight => standard(m, "carpenter", OCHRE, &[]),
        TradingCircle => standard(m, "trade depot", OCHRE, &['0']),
        TradingSolid => standard(m, "trade depot", OCHRE, &[]),
    }
}

static DESCRIPTORS: [MaterialDescriptor; Material::COUNT] = {
    let mut out = [describe(Material::Empty); Material::COUNT];
    let mut i = 0;
    while i < Material::COUNT {
        out[i] = describe(Material::ALL[i]);
        i += 1;
    }
    out
};

impl Material {
    pub const COUNT: usize = 23;

    /// Transparent cell: reveals whatever lies beneath.
    pub const EMPTY: Material = Material::Empty;
    /// Undifferentiated rock: only drawn where it borders something else.
    pub const FILLER: Material = Material::Stone;

    pub const ALL: [Material; Material::COUNT] = {
        use Material::*;
        [
            Empty,
            Floor,
            Stone,
            Grass1,
            Grass2,
            Grass3,
            Door,
            Ramp,
            Stairs,
            Farm,
            Table,
            Water,
            CarpenterTopLeft,
            CarpenterTop,
            CarpenterTopRight,
            CarpenterLeft,
            CarpenterMiddle,
            CarpenterRight,
            CarpenterBottomLeft,
            CarpenterBottom,
            CarpenterBottomRight,
            TradingCircle,
            TradingSolid,
        ]
    };

    #[inline]
    pub const fn code(self) -> MaterialCode {
        self as MaterialCode
    }

    pub const fn from_code(code: MaterialCode) -> Option<Material> {
        if (code as usize) < Material::COUNT {
            Some(Material::ALL[code as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn descriptor(self) -> &'static MaterialDescriptor {
        &DESCRIPTORS[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}
