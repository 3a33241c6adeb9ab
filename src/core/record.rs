//! Record and value types for the marine roster.
//!
//! Enumerated fields are looked up through explicit literal tables rather
//! than any form of runtime introspection.

use crate::core::error::UnknownVariant;
use chrono::NaiveDate;
use std::fmt;

/// Fixed enumeration with a literal name per variant.
pub trait Named: Sized + Copy + 'static {
    /// Human-readable name of the enumeration itself, used in errors.
    const KIND: &'static str;
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    /// Case-sensitive lookup by literal name.
    fn from_name(literal: &str) -> Result<Self, UnknownVariant> {
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.name() == literal)
            .ok_or_else(|| UnknownVariant {
                kind: Self::KIND,
                literal: literal.to_string(),
            })
    }

    /// `A, B, C` listing used by prompts.
    fn choices() -> String {
        Self::ALL
            .iter()
            .map(|variant| variant.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AstartesCategory {
    Scout,
    Aggressor,
    Inceptor,
    Tactical,
    Chaplain,
}

impl Named for AstartesCategory {
    const KIND: &'static str = "category";
    const ALL: &'static [Self] = &[
        Self::Scout,
        Self::Aggressor,
        Self::Inceptor,
        Self::Tactical,
        Self::Chaplain,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Scout => "SCOUT",
            Self::Aggressor => "AGGRESSOR",
            Self::Inceptor => "INCEPTOR",
            Self::Tactical => "TACTICAL",
            Self::Chaplain => "CHAPLAIN",
        }
    }
}

impl AstartesCategory {
    /// Zero-based position in the declared order.
    pub fn rank(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weapon {
    Boltgun,
    HeavyBoltgun,
    BoltRifle,
    PlasmaGun,
    GrenadeLauncher,
}

impl Named for Weapon {
    const KIND: &'static str = "weapon type";
    const ALL: &'static [Self] = &[
        Self::Boltgun,
        Self::HeavyBoltgun,
        Self::BoltRifle,
        Self::PlasmaGun,
        Self::GrenadeLauncher,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Boltgun => "BOLTGUN",
            Self::HeavyBoltgun => "HEAVY_BOLTGUN",
            Self::BoltRifle => "BOLT_RIFLE",
            Self::PlasmaGun => "PLASMA_GUN",
            Self::GrenadeLauncher => "GRENADE_LAUNCHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeleeWeapon {
    ChainSword,
    PowerSword,
    ChainAxe,
    Manreaper,
    PowerBlade,
}

impl Named for MeleeWeapon {
    const KIND: &'static str = "melee weapon type";
    const ALL: &'static [Self] = &[
        Self::ChainSword,
        Self::PowerSword,
        Self::ChainAxe,
        Self::Manreaper,
        Self::PowerBlade,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::ChainSword => "CHAIN_SWORD",
            Self::PowerSword => "POWER_SWORD",
            Self::ChainAxe => "CHAIN_AXE",
            Self::Manreaper => "MANREAPER",
            Self::PowerBlade => "POWER_BLADE",
        }
    }
}

macro_rules! display_by_name {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        })*
    };
}

display_by_name!(AstartesCategory, Weapon, MeleeWeapon);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.0}, {:.0})", self.x, self.y)
    }
}

/// Sub-group a marine belongs to. `name` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub name: String,
    pub world: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceMarine {
    pub id: i64,
    pub name: String,
    pub coordinates: Coordinates,
    pub creation_date: NaiveDate,
    pub health: f32,
    pub category: Option<AstartesCategory>,
    pub weapon_type: Weapon,
    pub melee_weapon: MeleeWeapon,
    pub chapter: Option<Chapter>,
}

/// Health must be a finite, strictly positive value.
pub fn is_valid_health(health: f32) -> bool {
    health.is_finite() && health > 0.0
}
