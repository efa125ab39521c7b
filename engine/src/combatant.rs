use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HP: i32 = 10;
pub const DEFAULT_MAX_HP: i32 = 20;
pub const DEFAULT_RESISTANCE: i32 = 5;
pub const DEFAULT_MANA: i32 = 15;
pub const DEFAULT_MAX_MANA: i32 = 25;

/// Which combatant of the duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The human-controlled combatant.
    Player,
    /// The computer-controlled combatant (MageBot).
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "You",
            Side::Opponent => "MageBot",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Burn,
    Freeze,
    Paralyze,
}

impl StatusKind {
    /// Adjective used when narrating the condition ("is now frozen").
    pub fn condition(self) -> &'static str {
        match self {
            StatusKind::Burn => "burned",
            StatusKind::Freeze => "frozen",
            StatusKind::Paralyze => "paralyzed",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusKind::Burn => "burn",
            StatusKind::Freeze => "freeze",
            StatusKind::Paralyze => "paralyze",
        })
    }
}

/// Remaining turns of each timed status; zero means inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    pub frozen: u32,
    pub paralyzed: u32,
    pub burned: u32,
}

impl StatusEffects {
    pub fn turns(&self, kind: StatusKind) -> u32 {
        match kind {
            StatusKind::Burn => self.burned,
            StatusKind::Freeze => self.frozen,
            StatusKind::Paralyze => self.paralyzed,
        }
    }

    /// Overwrites (never stacks) the remaining duration of `kind`.
    pub fn set(&mut self, kind: StatusKind, turns: u32) {
        match kind {
            StatusKind::Burn => self.burned = turns,
            StatusKind::Freeze => self.frozen = turns,
            StatusKind::Paralyze => self.paralyzed = turns,
        }
    }

    /// Active statuses in display order.
    pub fn active(&self) -> Vec<StatusKind> {
        [StatusKind::Freeze, StatusKind::Paralyze, StatusKind::Burn]
            .into_iter()
            .filter(|k| self.turns(*k) > 0)
            .collect()
    }

    pub fn is_clear(&self) -> bool {
        self.frozen == 0 && self.paralyzed == 0 && self.burned == 0
    }
}

/// Resources and timed statuses of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub hp: i32,
    pub max_hp: i32,
    pub resistance: i32,
    pub mana: i32,
    pub max_mana: i32,
    #[serde(default)]
    pub status: StatusEffects,
}

impl Combatant {
    /// A combatant with the opening values every duel starts from.
    pub fn fresh() -> Self {
        Self {
            hp: DEFAULT_HP,
            max_hp: DEFAULT_MAX_HP,
            resistance: DEFAULT_RESISTANCE,
            mana: DEFAULT_MANA,
            max_mana: DEFAULT_MAX_MANA,
            status: StatusEffects::default(),
        }
    }

    pub fn is_down(&self) -> bool {
        self.hp <= 0
    }

    pub fn at_full_health(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Lowers hp by `amount`, clamped at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).max(0);
        before - self.hp
    }

    /// Raises hp by `amount`, clamped at `max_hp`. Returns the hp actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        (self.hp - before).max(0)
    }

    /// Adds mana up to `max_mana`. Returns the mana actually gained.
    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let before = self.mana;
        self.mana = (self.mana + amount.max(0)).min(self.max_mana);
        (self.mana - before).max(0)
    }
}

impl Default for Combatant {
    fn default() -> Self {
        Self::fresh()
    }
}
