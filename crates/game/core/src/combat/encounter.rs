//! Immutable battle records.
//!
//! Every roll is captured so a battle can be audited shot by shot; the log
//! is also the authoritative record surfaced to players.

use crate::state::{Faction, HexId, ShipClass, ShipId};

/// Weapon firing windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponKind {
    Cannon,
    Missile,
}

/// Which roster a ship fought on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterSide {
    Attackers,
    Defenders,
}

impl EncounterSide {
    pub fn opponent(self) -> Self {
        match self {
            Self::Attackers => Self::Defenders,
            Self::Defenders => Self::Attackers,
        }
    }
}

/// One weapon shot, exactly as rolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotRecord {
    pub attacker: ShipId,
    pub attacker_faction: Faction,
    pub target: ShipId,
    pub weapon: WeaponKind,
    pub roll: u8,
    pub computer: i32,
    pub shield: i32,
    pub hit: bool,
    pub damage: u32,
    pub target_hp_after: u32,
    pub destroyed: bool,
}

/// Sub-round groupings of shots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VolleyKind {
    Missile,
    Cannon,
}

/// One sub-round of the exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Volley {
    pub index: u32,
    pub kind: VolleyKind,
    pub shots: Vec<ShotRecord>,
}

/// A faction that left through the retreat window.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetreatEvent {
    pub faction: Faction,
    pub ships: Vec<ShipId>,
    pub to: HexId,
}

/// A destroyed ship and who gets credit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KillRecord {
    pub ship: ShipId,
    pub class: ShipClass,
    pub owner: Faction,
    pub destroyed_by: Faction,
    /// VP credited for the kill (zero when the killer is the ancient
    /// pseudo-faction).
    pub vp: u32,
}

/// How the battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    /// Neither side carried a single weapon; nothing happened.
    NoExchange,
    /// One roster lost every ship.
    Eliminated { side: EncounterSide },
    /// A faction withdrew before the exchange could finish forming.
    Retreated { faction: Faction },
    /// Both sides survived the maximum number of volleys and disengaged.
    Stalemate,
}

/// Full record of one battle in one hex, immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEncounter {
    pub hex: HexId,
    /// Game round the battle happened in.
    pub round: u32,
    pub attackers: Vec<Faction>,
    pub defenders: Vec<Faction>,
    pub retreats: Vec<RetreatEvent>,
    pub volleys: Vec<Volley>,
    pub kills: Vec<KillRecord>,
    pub outcome: CombatOutcome,
}
