/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Maximum number of distinct inventory rows a new session allows.
    pub max_inventory_slots: usize,
    /// Credits granted to a freshly created player.
    pub starting_credits: u32,
    /// Inactivity window after which the host should submit an idle timeout.
    pub idle_timeout_ms: u64,
    /// Delay the host should wait before resolving a scheduled follow-up turn.
    pub follow_up_delay_ms: u64,
}

impl GameConfig {
    // ===== compile-time limits =====
    pub const MAX_EXITS: usize = 6;
    pub const MAX_ABILITIES: usize = 8;
    pub const MAX_CHOICES: usize = 6;
    pub const HISTORY_LEN: usize = 5;

    // ===== player baseline =====
    pub const STARTING_HEALTH: u32 = 100;
    pub const STARTING_ENERGY: u32 = 50;
    pub const EXPERIENCE_PER_LEVEL: u32 = 100;
    pub const HEALTH_PER_LEVEL: u32 = 10;
    pub const ENERGY_PER_LEVEL: u32 = 5;
    /// Highest level whose experience threshold still fits in a `u32`.
    pub const MAX_LEVEL: u32 = u32::MAX / Self::EXPERIENCE_PER_LEVEL;

    // ===== exploration =====
    pub const PROGRESS_PER_AREA: u8 = 2;
    pub const PROGRESS_PER_VICTORY: u8 = 1;
    pub const DANGEROUS_ENCOUNTER_BONUS: u32 = 15;
    pub const BOSS_ENCOUNTER_BONUS: u32 = 25;
    pub const SPECIAL_ENCOUNTER_BONUS: u32 = 10;
    pub const ACTIVE_SEARCH_BONUS: u32 = 20;
    pub const SAFE_SEARCH_CHANCE: u32 = 60;
    pub const CONSOLATION_CHANCE: u32 = 40;
    pub const REST_HEALTH_PERCENT: u32 = 50;
    pub const REST_ENERGY_PERCENT: u32 = 80;

    // ===== combat =====
    pub const BASE_ATTACK_DAMAGE: u32 = 10;
    pub const DAMAGE_VARIANCE_PERCENT: u32 = 30;
    pub const FLEE_CHANCE: u32 = 70;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_INVENTORY_SLOTS: usize = 20;
    pub const DEFAULT_STARTING_CREDITS: u32 = 100;
    pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 30 * 60 * 1000;
    pub const DEFAULT_FOLLOW_UP_DELAY_MS: u64 = 1_500;

    pub fn new() -> Self {
        Self {
            max_inventory_slots: Self::DEFAULT_MAX_INVENTORY_SLOTS,
            starting_credits: Self::DEFAULT_STARTING_CREDITS,
            idle_timeout_ms: Self::DEFAULT_IDLE_TIMEOUT_MS,
            follow_up_delay_ms: Self::DEFAULT_FOLLOW_UP_DELAY_MS,
        }
    }

    pub fn with_max_inventory_slots(mut self, max_inventory_slots: usize) -> Self {
        self.max_inventory_slots = max_inventory_slots.max(1);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
