//! The game table: one GM's session over a shared store.
//!
//! `GameTable` owns the class catalog, every store, the battle controller
//! and the RNG. Its operations validate input, resolve checks, apply their
//! effects and write one log entry each.

use std::path::Path;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use mesa_core::storage::{FileBackend, MemoryBackend};
use mesa_core::{
    Attack, Backend, BaseAttributes, Character, CharacterId, CharacterStore, ClassCatalog,
    CoreError, Enemy, EnemyId, EnemyStore, EventLog, GmMessage, GmMessages, LogEntry, LogKind,
    NewCharacter, NewEnemy, ScenarioStore, Storage,
};

use crate::combat::{
    AbilityTarget, BattleController, BattleState, TurnEntry, ability_log_text, attack_log_text,
};
use crate::config::TableConfig;
use crate::dice::{DiceRoll, roll};
use crate::error::{MechError, MechResult};
use crate::resolution::{
    AbilityCheck, AbilityEffect, AttackCheck, resolve_ability, resolve_enemy_attack,
};

/// Actor recorded on GM dice rolls.
pub const GM_ACTOR: &str = "gm";
/// Reason logged for environmental damage without one.
pub const DEFAULT_DAMAGE_REASON: &str = "Environment";

/// A resolved check together with the log entry written for it.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    /// The check.
    pub check: T,
    /// The entry added to the event log.
    pub entry: LogEntry,
}

/// A tabletop session: stores, battle, log, and dice.
pub struct GameTable {
    config: TableConfig,
    catalog: Arc<ClassCatalog>,
    characters: CharacterStore,
    enemies: EnemyStore,
    log: EventLog,
    gm_messages: GmMessages,
    scenario: ScenarioStore,
    battle: BattleController,
    rng: StdRng,
}

impl GameTable {
    /// Create a table over a storage backend.
    pub fn new(backend: Arc<dyn Backend>, catalog: ClassCatalog, config: TableConfig) -> Self {
        let storage = Storage::new(backend, config.storage_prefix.clone());
        let catalog = Arc::new(catalog);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            characters: CharacterStore::new(storage.clone(), catalog.clone()),
            enemies: EnemyStore::new(storage.clone()).with_default_hp(config.default_enemy_hp),
            log: EventLog::new(storage.clone()).with_capacity(config.log_capacity),
            gm_messages: GmMessages::new(storage.clone()).with_capacity(config.log_capacity),
            scenario: ScenarioStore::new(storage.clone()),
            battle: BattleController::new(storage),
            catalog,
            config,
            rng,
        }
    }

    /// A table over a fresh in-memory store with the built-in classes.
    pub fn in_memory(config: TableConfig) -> Self {
        Self::new(
            Arc::new(MemoryBackend::new()),
            ClassCatalog::builtin(),
            config,
        )
    }

    /// A table persisted as JSON files in a directory.
    pub fn open_dir(
        dir: impl AsRef<Path>,
        catalog: ClassCatalog,
        config: TableConfig,
    ) -> MechResult<Self> {
        let backend = FileBackend::new(dir)?;
        Ok(Self::new(Arc::new(backend), catalog, config))
    }

    /// The table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The class catalog.
    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    /// The character store.
    pub fn characters(&self) -> &CharacterStore {
        &self.characters
    }

    /// The enemy store.
    pub fn enemies(&self) -> &EnemyStore {
        &self.enemies
    }

    /// The event log.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// The scenario store.
    pub fn scenario(&self) -> &ScenarioStore {
        &self.scenario
    }

    /// The battle controller.
    pub fn battle(&self) -> &BattleController {
        &self.battle
    }

    /// Create a character with the configured point budget.
    pub fn create_character(
        &self,
        name: &str,
        class_key: &str,
        attributes: BaseAttributes,
    ) -> MechResult<Character> {
        let input = NewCharacter {
            name: name.to_string(),
            class_key: class_key.to_string(),
            attributes,
        };
        Ok(self.characters.create(input, self.config.point_budget)?)
    }

    /// Create an enemy; a missing or zero maximum HP uses the configured
    /// default.
    pub fn create_enemy(
        &self,
        name: &str,
        max_hp: Option<u32>,
        attacks: Vec<Attack>,
    ) -> MechResult<Enemy> {
        let input = NewEnemy {
            name: name.to_string(),
            max_hp,
            attacks,
        };
        Ok(self.enemies.create(input)?)
    }

    fn character(&self, id: CharacterId) -> MechResult<Character> {
        Ok(self
            .characters
            .get(id)
            .ok_or_else(|| CoreError::not_found("character", id))?)
    }

    fn enemy(&self, id: EnemyId) -> MechResult<Enemy> {
        Ok(self
            .enemies
            .get(id)
            .ok_or_else(|| CoreError::not_found("enemy", id))?)
    }

    /// Use a character's ability on a target.
    ///
    /// The target is checked against the ability before any roll: attacks
    /// need a living enemy, single heals take a living character or fall
    /// back to the user, and party heals ignore the target. A failed check
    /// only writes the log entry.
    pub fn use_ability(
        &mut self,
        character_id: CharacterId,
        ability_key: &str,
        target: AbilityTarget,
    ) -> MechResult<Resolved<AbilityCheck>> {
        let user = self.character(character_id)?;
        let ability = self
            .catalog
            .get(&user.class_key)
            .ok_or_else(|| CoreError::not_found("class", &user.class_key))?
            .ability(ability_key)
            .ok_or_else(|| CoreError::not_found("ability", ability_key))?
            .clone();

        let target = if ability.heals_everyone() {
            AbilityTarget::AllCharacters
        } else if ability.targets_enemy() {
            let AbilityTarget::Enemy(enemy_id) = target else {
                return Err(MechError::InvalidTarget(format!(
                    "{} needs an enemy target",
                    ability.name
                )));
            };
            let enemy = self.enemy(enemy_id)?;
            if enemy.is_defeated() {
                return Err(MechError::InvalidTarget(format!(
                    "{} is already defeated",
                    enemy.name
                )));
            }
            target
        } else {
            match target {
                AbilityTarget::None => AbilityTarget::None,
                AbilityTarget::Character(id) if id == user.id => AbilityTarget::None,
                AbilityTarget::Character(id) => {
                    let ally = self.character(id)?;
                    if ally.is_defeated() {
                        return Err(MechError::InvalidTarget(format!(
                            "{} is defeated and cannot be healed",
                            ally.name
                        )));
                    }
                    target
                }
                other => {
                    return Err(MechError::InvalidTarget(format!(
                        "{} cannot target {other}",
                        ability.name
                    )));
                }
            }
        };

        let check = resolve_ability(
            &self.characters,
            &self.catalog,
            character_id,
            ability_key,
            &mut self.rng,
        )?;
        let target_name = self.apply_ability(&check, target)?;
        let entry = self
            .log
            .record(LogKind::Ability, ability_log_text(&check, target_name.as_deref()))?;
        Ok(Resolved { check, entry })
    }

    /// Apply a check's effect; returns the name to describe the target by.
    fn apply_ability(
        &self,
        check: &AbilityCheck,
        target: AbilityTarget,
    ) -> MechResult<Option<String>> {
        let name = match (check.effect, target) {
            (AbilityEffect::Damage { amount, .. }, AbilityTarget::Enemy(id)) => {
                Some(self.enemies.damage(id, i64::from(amount))?.name)
            }
            (AbilityEffect::Heal { amount }, AbilityTarget::Character(id)) => {
                Some(self.characters.heal(id, i64::from(amount))?.name)
            }
            (AbilityEffect::Heal { amount }, AbilityTarget::None) => {
                self.characters.heal(check.character, i64::from(amount))?;
                None
            }
            (AbilityEffect::HealAll { amount }, _) => {
                for c in self.characters.all() {
                    if !c.is_defeated() {
                        self.characters.heal(c.id, i64::from(amount))?;
                    }
                }
                None
            }
            _ => match target {
                AbilityTarget::Enemy(id) => self.enemies.get(id).map(|e| e.name),
                AbilityTarget::Character(id) => self.characters.get(id).map(|c| c.name),
                _ => None,
            },
        };
        Ok(name)
    }

    /// Have an enemy attack a character.
    ///
    /// Defeated enemies cannot attack and defeated characters cannot be
    /// targeted. A hit damages the target.
    pub fn enemy_attack(
        &mut self,
        enemy_id: EnemyId,
        attack_index: usize,
        target: CharacterId,
    ) -> MechResult<Resolved<AttackCheck>> {
        let enemy = self.enemy(enemy_id)?;
        if enemy.is_defeated() {
            return Err(MechError::InvalidTarget(format!(
                "{} is defeated and cannot attack",
                enemy.name
            )));
        }
        let victim = self.character(target)?;
        if victim.is_defeated() {
            return Err(MechError::InvalidTarget(format!(
                "{} is already defeated",
                victim.name
            )));
        }

        let check = resolve_enemy_attack(
            &self.enemies,
            &self.characters,
            enemy_id,
            attack_index,
            target,
            &mut self.rng,
        )?;
        if check.success {
            self.characters.damage(target, i64::from(check.damage))?;
        }
        let entry = self
            .log
            .record(LogKind::EnemyAttack, attack_log_text(&check, &victim.name))?;
        Ok(Resolved { check, entry })
    }

    /// Damage a character outside combat resolution (traps, falls, weather).
    pub fn apply_environmental_damage(
        &self,
        character_id: CharacterId,
        amount: i64,
        reason: Option<&str>,
    ) -> MechResult<Character> {
        if amount <= 0 {
            return Err(MechError::InvalidAmount(amount));
        }
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_DAMAGE_REASON);
        let character = self.characters.damage(character_id, amount)?;
        self.log.record(
            LogKind::Damage,
            format!("{} took {amount} damage ({reason}).", character.name),
        )?;
        Ok(character)
    }

    /// Restore a character to full HP.
    pub fn reset_character_hp(&self, id: CharacterId) -> MechResult<Character> {
        let character = self.characters.reset_hp(id)?;
        self.log
            .record(LogKind::Heal, format!("HP of {} was restored.", character.name))?;
        Ok(character)
    }

    /// Restore an enemy to full HP.
    pub fn reset_enemy_hp(&self, id: EnemyId) -> MechResult<Enemy> {
        let enemy = self.enemies.reset_hp(id)?;
        self.log
            .record(LogKind::Heal, format!("HP of {} was restored.", enemy.name))?;
        Ok(enemy)
    }

    /// Roll dice for the GM. `times` is clamped to `1..=max_dice`.
    pub fn roll_dice(&mut self, sides: u32, times: u32) -> MechResult<DiceRoll> {
        if sides < 2 {
            return Err(
                CoreError::invalid(format!("a die needs at least 2 sides, got {sides}")).into(),
            );
        }
        let times = times.clamp(1, self.config.max_dice);
        let result = roll(sides, times, &mut self.rng);
        let entry = LogEntry::new(LogKind::Dice, format!("GM rolled {result}"))
            .with_dice(result.details(GM_ACTOR));
        self.log.add(entry)?;
        Ok(result)
    }

    /// Display name of a turn slot.
    pub fn turn_name(&self, entry: &TurnEntry) -> String {
        match entry {
            TurnEntry::Gm => "GM".to_string(),
            TurnEntry::Player { id } => self
                .characters
                .get(*id)
                .map(|c| c.name)
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    fn current_turn_name(&self, state: &BattleState) -> String {
        state
            .current()
            .map(|t| self.turn_name(&t))
            .unwrap_or_else(|| "nobody".to_string())
    }

    /// Start a battle with every character, in list order.
    pub fn start_battle(&self) -> MechResult<BattleState> {
        let ids: Vec<CharacterId> = self.characters.all().iter().map(|c| c.id).collect();
        if ids.is_empty() {
            return Err(MechError::NoCharacters);
        }
        let state = self.battle.start(&ids)?;
        self.log.record(
            LogKind::Battle,
            format!("Battle started! Turn of {}", self.current_turn_name(&state)),
        )?;
        Ok(state)
    }

    /// Advance the turn. Does nothing outside a battle.
    pub fn next_turn(&self) -> MechResult<BattleState> {
        if !self.battle.is_active() {
            return Ok(self.battle.state());
        }
        let state = self.battle.next_turn()?;
        self.log.record(
            LogKind::Turn,
            format!("Turn of {}", self.current_turn_name(&state)),
        )?;
        Ok(state)
    }

    /// End the battle. Does nothing outside a battle.
    pub fn end_battle(&self) -> MechResult<BattleState> {
        if !self.battle.is_active() {
            return Ok(self.battle.state());
        }
        let state = self.battle.end()?;
        self.log.record(LogKind::Battle, "Battle ended.")?;
        Ok(state)
    }

    /// Change the scenario image.
    pub fn set_scenario(&self, path: &str) -> MechResult<()> {
        self.scenario.set(path)?;
        self.log.record(LogKind::Scenario, "Scenario updated by GM.")?;
        Ok(())
    }

    /// Add a GM note.
    pub fn add_gm_message(&self, text: &str) -> MechResult<GmMessage> {
        Ok(self.gm_messages.add(text)?)
    }

    /// GM notes, newest first.
    pub fn gm_messages(&self) -> Vec<GmMessage> {
        self.gm_messages.all()
    }

    /// Remove every GM note.
    pub fn clear_gm_messages(&self) -> MechResult<()> {
        Ok(self.gm_messages.clear()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_core::{Attribute, ErrorKind};

    fn table() -> GameTable {
        GameTable::in_memory(TableConfig::default().with_seed(42))
    }

    fn warrior_attrs() -> BaseAttributes {
        BaseAttributes::zeroed()
            .with(Attribute::Strength, 20)
            .with(Attribute::Health, 10)
            .with(Attribute::Agility, 10)
    }

    fn mage_attrs() -> BaseAttributes {
        BaseAttributes::zeroed()
            .with(Attribute::Magic, 20)
            .with(Attribute::Intelligence, 10)
            .with(Attribute::Health, 10)
    }

    #[test]
    fn create_uses_config() {
        let table = GameTable::in_memory(
            TableConfig::default()
                .with_point_budget(30)
                .with_default_enemy_hp(80),
        );
        let attrs = BaseAttributes::zeroed().with(Attribute::Health, 30);
        assert!(table.create_character("A", "warrior", attrs).is_ok());
        assert!(table.create_character("B", "warrior", warrior_attrs()).is_err());
        let e = table.create_enemy("Ogre", None, Vec::new()).unwrap();
        assert_eq!(e.hp.max_hp, 80);
    }

    #[test]
    fn attack_requires_enemy_target() {
        let mut table = table();
        let c = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let err = table
            .use_ability(c.id, "sword_strike", AbilityTarget::None)
            .unwrap_err();
        assert!(matches!(err, MechError::InvalidTarget(_)));
        assert!(table.log().all().is_empty());
    }

    #[test]
    fn attack_rejects_defeated_enemy() {
        let mut table = table();
        let c = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let e = table.create_enemy("Goblin", Some(10), Vec::new()).unwrap();
        table.enemies().update_hp(e.id, 0).unwrap();
        let err = table
            .use_ability(c.id, "sword_strike", AbilityTarget::Enemy(e.id))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }

    #[test]
    fn attack_applies_damage_on_success_only() {
        let mut table = table();
        let c = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let e = table.create_enemy("Troll", Some(500), Vec::new()).unwrap();

        for _ in 0..20 {
            let before = table.enemies().get(e.id).unwrap().hp.current_hp;
            let resolved = table
                .use_ability(c.id, "sword_strike", AbilityTarget::Enemy(e.id))
                .unwrap();
            let after = table.enemies().get(e.id).unwrap().hp.current_hp;
            if resolved.check.success {
                assert_eq!(before - after, 15);
                assert!(resolved.entry.text.contains("SUCCESS!"));
                assert!(resolved.entry.text.ends_with("damage to Troll."));
            } else {
                assert_eq!(before, after);
                assert!(resolved.entry.text.ends_with("FAILED!"));
            }
            assert_eq!(resolved.entry.kind, LogKind::Ability);
        }
        assert_eq!(table.log().all().len(), 20);
    }

    #[test]
    fn defense_heals_self_or_ally() {
        let mut table = table();
        let a = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let b = table.create_character("Bren", "warrior", warrior_attrs()).unwrap();
        table.characters().damage(a.id, 40).unwrap();
        table.characters().damage(b.id, 40).unwrap();

        let mut healed_self = false;
        let mut healed_ally = false;
        for i in 0..30 {
            let target = if i % 2 == 0 {
                AbilityTarget::None
            } else {
                AbilityTarget::Character(b.id)
            };
            let r = table.use_ability(a.id, "shield_block", target).unwrap();
            if r.check.success {
                if i % 2 == 0 {
                    healed_self = true;
                } else {
                    healed_ally = true;
                    assert!(r.entry.text.contains("Bren recovered 10 HP."));
                }
            }
        }
        // Health 16 gives +3: shield_block (difficulty 8) fails only on 1-4
        assert!(healed_self && healed_ally);
        assert!(table.characters().get(a.id).unwrap().hp.current_hp > 40);
        assert!(table.characters().get(b.id).unwrap().hp.current_hp > 40);
    }

    #[test]
    fn defense_rejects_defeated_ally_and_enemy_target() {
        let mut table = table();
        let a = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let b = table.create_character("Bren", "warrior", warrior_attrs()).unwrap();
        let e = table.create_enemy("Goblin", None, Vec::new()).unwrap();
        table.characters().update_hp(b.id, 0).unwrap();

        let err = table
            .use_ability(a.id, "shield_block", AbilityTarget::Character(b.id))
            .unwrap_err();
        assert!(matches!(err, MechError::InvalidTarget(_)));
        let err = table
            .use_ability(a.id, "shield_block", AbilityTarget::Enemy(e.id))
            .unwrap_err();
        assert!(matches!(err, MechError::InvalidTarget(_)));
    }

    #[test]
    fn heal_all_ignores_target_and_skips_defeated() {
        let mut table = table();
        let mage = table.create_character("Mira", "mage", mage_attrs()).unwrap();
        let ally = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let down = table.create_character("Bren", "warrior", warrior_attrs()).unwrap();
        table.characters().damage(mage.id, 20).unwrap();
        table.characters().damage(ally.id, 20).unwrap();
        table.characters().update_hp(down.id, 0).unwrap();

        let mut succeeded = false;
        for _ in 0..10 {
            let e = EnemyId::new();
            let r = table
                .use_ability(mage.id, "blessing", AbilityTarget::Enemy(e))
                .unwrap();
            succeeded |= r.check.success;
        }
        assert!(succeeded);
        assert_eq!(table.characters().get(down.id).unwrap().hp.current_hp, 0);
        let ally = table.characters().get(ally.id).unwrap();
        assert_eq!(ally.hp.current_hp, ally.hp.max_hp);
    }

    #[test]
    fn unknown_ability_is_not_found() {
        let mut table = table();
        let c = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let err = table
            .use_ability(c.id, "fireball", AbilityTarget::None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = table
            .use_ability(CharacterId::new(), "fireball", AbilityTarget::None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn enemy_attack_hits_and_logs() {
        let mut table = table();
        let c = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let e = table
            .create_enemy("Goblin", None, vec![Attack::new("Stab", 7, 20)])
            .unwrap();
        let r = table.enemy_attack(e.id, 0, c.id).unwrap();
        assert!(r.check.success);
        assert_eq!(r.entry.kind, LogKind::EnemyAttack);
        assert!(r.entry.text.ends_with("HIT! Dealt 7 damage."));
        let c = table.characters().get(c.id).unwrap();
        assert_eq!(c.hp.current_hp, c.hp.max_hp - 7);
    }

    #[test]
    fn enemy_attack_miss_changes_nothing() {
        let mut table = table();
        let c = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let e = table
            .create_enemy("Goblin", None, vec![Attack::new("Whiff", 30, 0)])
            .unwrap();
        let r = table.enemy_attack(e.id, 0, c.id).unwrap();
        assert!(!r.check.success);
        let c = table.characters().get(c.id).unwrap();
        assert_eq!(c.hp.current_hp, c.hp.max_hp);
    }

    #[test]
    fn enemy_attack_validation() {
        let mut table = table();
        let c = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let e = table
            .create_enemy("Goblin", None, vec![Attack::new("Stab", 7, 20)])
            .unwrap();

        let err = table.enemy_attack(e.id, 3, c.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        table.characters().update_hp(c.id, 0).unwrap();
        let err = table.enemy_attack(e.id, 0, c.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);

        table.characters().reset_hp(c.id).unwrap();
        table.enemies().update_hp(e.id, 0).unwrap();
        let err = table.enemy_attack(e.id, 0, c.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(table.log().all().is_empty());
    }

    #[test]
    fn environmental_damage() {
        let table = table();
        let c = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let hurt = table
            .apply_environmental_damage(c.id, 12, Some("  "))
            .unwrap();
        assert_eq!(hurt.hp.current_hp, c.hp.max_hp - 12);
        assert_eq!(table.log().all()[0].text, "Aria took 12 damage (Environment).");

        table
            .apply_environmental_damage(c.id, 3, Some("Falling rocks"))
            .unwrap();
        assert_eq!(table.log().all()[0].text, "Aria took 3 damage (Falling rocks).");

        for bad in [0, -5] {
            let err = table.apply_environmental_damage(c.id, bad, None).unwrap_err();
            assert!(matches!(err, MechError::InvalidAmount(_)));
        }
        assert_eq!(table.log().all().len(), 2);
    }

    #[test]
    fn resets_log_heal() {
        let table = table();
        let c = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let e = table.create_enemy("Goblin", Some(10), Vec::new()).unwrap();
        table.characters().damage(c.id, 5).unwrap();
        table.enemies().damage(e.id, 5).unwrap();
        assert_eq!(table.reset_character_hp(c.id).unwrap().hp.current_hp, c.hp.max_hp);
        assert_eq!(table.reset_enemy_hp(e.id).unwrap().hp.current_hp, 10);
        let entries = table.log().all();
        assert_eq!(entries[0].text, "HP of Goblin was restored.");
        assert_eq!(entries[1].text, "HP of Aria was restored.");
        assert!(entries.iter().all(|e| e.kind == LogKind::Heal));
    }

    #[test]
    fn dice_are_clamped_and_logged() {
        let mut table = table();
        let r = table.roll_dice(6, 50).unwrap();
        assert_eq!(r.times, 20);
        let r = table.roll_dice(6, 0).unwrap();
        assert_eq!(r.times, 1);
        let entries = table.log().all();
        let entry = &entries[0];
        assert_eq!(entry.kind, LogKind::Dice);
        let dice = entry.dice.as_ref().unwrap();
        assert_eq!(dice.actor, "gm");
        assert_eq!(dice.total, r.total);
        assert!(table.roll_dice(1, 3).is_err());
    }

    #[test]
    fn seeded_tables_repeat() {
        let mut a = table();
        let mut b = table();
        assert_eq!(a.roll_dice(20, 5).unwrap(), b.roll_dice(20, 5).unwrap());
    }

    #[test]
    fn battle_lifecycle() {
        let table = table();
        assert!(matches!(table.start_battle(), Err(MechError::NoCharacters)));

        let a = table.create_character("Aria", "warrior", warrior_attrs()).unwrap();
        let b = table.create_character("Bren", "warrior", warrior_attrs()).unwrap();
        let state = table.start_battle().unwrap();
        assert_eq!(state.turn_order.len(), 4);
        assert_eq!(table.log().all()[0].text, "Battle started! Turn of GM");
        assert!(matches!(
            table.start_battle(),
            Err(MechError::BattleAlreadyActive)
        ));

        table.next_turn().unwrap();
        assert_eq!(table.battle().current_character_id(), Some(a.id));
        assert_eq!(table.log().all()[0].text, "Turn of Aria");
        table.next_turn().unwrap();
        table.next_turn().unwrap();
        assert_eq!(table.battle().current_character_id(), Some(b.id));
        table.next_turn().unwrap();
        assert!(table.battle().is_gm_turn());

        table.end_battle().unwrap();
        assert!(!table.battle().is_active());
        assert_eq!(table.log().all()[0].text, "Battle ended.");
        assert_eq!(table.log().all()[0].kind, LogKind::Battle);

        let before = table.log().all().len();
        table.next_turn().unwrap();
        table.end_battle().unwrap();
        assert_eq!(table.log().all().len(), before);
    }

    #[test]
    fn scenario_and_gm_notes() {
        let table = table();
        table.set_scenario("assets/forest.png").unwrap();
        assert_eq!(table.scenario().current(), "assets/forest.png");
        assert_eq!(table.log().all()[0].kind, LogKind::Scenario);

        table.add_gm_message("Dragon wakes on turn 3").unwrap();
        assert_eq!(table.gm_messages().len(), 1);
        table.clear_gm_messages().unwrap();
        assert!(table.gm_messages().is_empty());
    }

    #[test]
    fn log_retention_follows_config() {
        let mut table = GameTable::in_memory(TableConfig::default().with_seed(1).with_log_capacity(5));
        for _ in 0..9 {
            table.roll_dice(6, 1).unwrap();
        }
        assert_eq!(table.log().all().len(), 5);
    }
}
