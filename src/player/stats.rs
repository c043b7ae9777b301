//! Progression and survival stat helpers, plus inventory housekeeping.

use crate::shared::*;

fn percent(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    value / max * 100.0
}

impl PlayerState {
    /// Adds experience and applies any level-ups. Returns how many levels
    /// were gained; each one adds max health and refills health.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let new_level = self.experience / XP_PER_LEVEL + 1;
        if new_level <= self.level {
            return 0;
        }
        let gained = new_level - self.level;
        self.level = new_level;
        self.max_health += HEALTH_PER_LEVEL * gained as f32;
        self.health = self.max_health;
        gained
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn consume_food(&mut self, hunger: f32, thirst: f32) {
        self.hunger = (self.hunger + hunger).min(self.max_hunger);
        self.thirst = (self.thirst + thirst).min(self.max_thirst);
    }

    pub fn rest(&mut self, energy: f32) {
        self.energy = (self.energy + energy).min(self.max_energy);
    }

    pub fn experience_to_next_level(&self) -> u32 {
        self.level
            .max(1)
            .saturating_mul(XP_PER_LEVEL)
            .saturating_sub(self.experience)
    }

    /// Percentage through the current level.
    pub fn level_progress(&self) -> f32 {
        let level_floor = self.level.saturating_sub(1).saturating_mul(XP_PER_LEVEL);
        let into_level = self.experience.saturating_sub(level_floor);
        percent(into_level as f32, XP_PER_LEVEL as f32).min(100.0)
    }

    pub fn health_pct(&self) -> f32 {
        percent(self.health, self.max_health)
    }

    pub fn hunger_pct(&self) -> f32 {
        percent(self.hunger, self.max_hunger)
    }

    pub fn thirst_pct(&self) -> f32 {
        percent(self.thirst, self.max_thirst)
    }

    pub fn energy_pct(&self) -> f32 {
        percent(self.energy, self.max_energy)
    }

    pub fn is_critical_health(&self) -> bool {
        self.health_pct() <= 20.0
    }

    pub fn is_hungry(&self) -> bool {
        self.hunger_pct() <= 30.0
    }

    pub fn is_thirsty(&self) -> bool {
        self.thirst_pct() <= 30.0
    }

    pub fn is_tired(&self) -> bool {
        self.energy_pct() <= 25.0
    }
}

impl Inventory {
    pub fn total_value(&self, items: &ItemRegistry) -> u32 {
        self.slots
            .iter()
            .flatten()
            .map(|s| items.get(&s.item_id).map_or(0, |d| d.value) * s.quantity)
            .sum()
    }

    /// Returns false if either index is out of range.
    pub fn swap_slots(&mut self, a: usize, b: usize) -> bool {
        if a >= self.slots.len() || b >= self.slots.len() {
            return false;
        }
        self.slots.swap(a, b);
        true
    }

    /// Empties a slot and hands back what was in it.
    pub fn drop_slot(&mut self, index: usize) -> Option<InventorySlot> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Takes one item from a slot. Returns its id.
    pub fn consume_one(&mut self, index: usize) -> Option<ItemId> {
        let slot = self.slots.get_mut(index)?;
        let stack = slot.as_mut()?;
        let item_id = stack.item_id.clone();
        stack.quantity = stack.quantity.saturating_sub(1);
        if stack.quantity == 0 {
            *slot = None;
        }
        Some(item_id)
    }

    /// Grows to `new_size` slots. Never shrinks.
    pub fn upgrade(&mut self, new_size: usize) -> bool {
        if new_size <= self.slots.len() {
            return false;
        }
        self.slots.resize(new_size, None);
        true
    }

    /// Occupied slots by category then name, empties last.
    pub fn sorted(&self, items: &ItemRegistry) -> Inventory {
        let mut occupied: Vec<InventorySlot> = self.slots.iter().flatten().cloned().collect();
        occupied.sort_by(|a, b| {
            let key = |s: &InventorySlot| {
                items
                    .get(&s.item_id)
                    .map(|d| (Some(d.category), d.name.clone()))
                    .unwrap_or((None, s.item_id.clone()))
            };
            key(a).cmp(&key(b))
        });
        let mut slots: Vec<Option<InventorySlot>> = occupied.into_iter().map(Some).collect();
        slots.resize(self.slots.len(), None);
        Inventory { slots }
    }
}
