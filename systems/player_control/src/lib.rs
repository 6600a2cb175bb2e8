#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system translating per-frame input into player commands.
//!
//! The system never mutates anything itself. It inspects the player snapshot
//! to avoid flooding the command stream with requests the world would reject
//! anyway, then emits movement, ability, and restart commands for the world
//! to arbitrate.

use gridlock_core::{Ability, Command, GridVector, PlayerSnapshot};

/// Input gathered by an adapter over one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Combined held movement direction, one step per axis.
    pub step: GridVector,
    /// Whether the smash ability key was pressed this frame.
    pub smash: bool,
    /// Whether the rush ability key was pressed this frame.
    pub rush: bool,
    /// Whether the heal ability key was pressed this frame.
    pub heal: bool,
    /// Whether the fire key was pressed this frame.
    pub fire: bool,
    /// Whether the manual restart key was pressed this frame.
    pub restart: bool,
}

/// Pure system that maps input frames onto player commands.
#[derive(Debug, Default)]
pub struct PlayerControl;

impl PlayerControl {
    /// Consumes one input frame and emits the player's commands for the tick.
    pub fn handle(
        &mut self,
        input: &InputFrame,
        player: &PlayerSnapshot,
        out: &mut Vec<Command>,
    ) {
        if input.restart {
            out.push(Command::Restart);
            return;
        }
        if !player.alive {
            // The run restarts on its own once the countdown has run out.
            if player.death_timer == 0 {
                out.push(Command::Restart);
            }
            return;
        }
        if player.stunned {
            return;
        }
        if !input.step.is_zero() && player.movement_ready {
            out.push(Command::MovePlayer { step: input.step });
        }
        if input.smash {
            out.push(Command::TriggerAbility {
                ability: Ability::Smash,
            });
        }
        if input.rush {
            out.push(Command::TriggerAbility {
                ability: Ability::Rush,
            });
        }
        if input.heal {
            out.push(Command::TriggerAbility {
                ability: Ability::Heal,
            });
        }
        if input.fire {
            out.push(Command::FireArrow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlock_core::CellCoord;

    fn live_player() -> PlayerSnapshot {
        PlayerSnapshot {
            cell: CellCoord::new(1, 1),
            health: 100,
            max_health: 100,
            power: 8,
            alive: true,
            level: 1,
            experience: 0,
            experience_to_next: 100,
            in_combat: false,
            invulnerable: false,
            stunned: false,
            movement_ready: true,
            facing: GridVector::new(0, -1),
            intent: GridVector::default(),
            death_timer: 0,
        }
    }

    #[test]
    fn held_direction_becomes_a_move_command() {
        let mut control = PlayerControl::default();
        let mut commands = Vec::new();
        let input = InputFrame {
            step: GridVector::new(1, -1),
            ..InputFrame::default()
        };
        control.handle(&input, &live_player(), &mut commands);
        assert_eq!(
            commands,
            vec![Command::MovePlayer {
                step: GridVector::new(1, -1)
            }]
        );
    }

    #[test]
    fn movement_is_suppressed_while_the_cooldown_runs() {
        let mut control = PlayerControl::default();
        let mut commands = Vec::new();
        let player = PlayerSnapshot {
            movement_ready: false,
            ..live_player()
        };
        let input = InputFrame {
            step: GridVector::new(0, 1),
            ..InputFrame::default()
        };
        control.handle(&input, &player, &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn ability_keys_map_onto_ability_commands() {
        let mut control = PlayerControl::default();
        let mut commands = Vec::new();
        let input = InputFrame {
            smash: true,
            heal: true,
            fire: true,
            ..InputFrame::default()
        };
        control.handle(&input, &live_player(), &mut commands);
        assert_eq!(
            commands,
            vec![
                Command::TriggerAbility {
                    ability: Ability::Smash
                },
                Command::TriggerAbility {
                    ability: Ability::Heal
                },
                Command::FireArrow,
            ]
        );
    }

    #[test]
    fn stunned_players_emit_nothing() {
        let mut control = PlayerControl::default();
        let mut commands = Vec::new();
        let player = PlayerSnapshot {
            stunned: true,
            ..live_player()
        };
        let input = InputFrame {
            step: GridVector::new(1, 0),
            fire: true,
            ..InputFrame::default()
        };
        control.handle(&input, &player, &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn the_run_restarts_itself_after_the_death_countdown() {
        let mut control = PlayerControl::default();
        let mut commands = Vec::new();
        let dead = PlayerSnapshot {
            alive: false,
            health: 0,
            death_timer: 0,
            ..live_player()
        };
        control.handle(&InputFrame::default(), &dead, &mut commands);
        assert_eq!(commands, vec![Command::Restart]);
    }

    #[test]
    fn automatic_restart_waits_for_the_death_countdown() {
        let mut control = PlayerControl::default();
        let mut commands = Vec::new();
        let dying = PlayerSnapshot {
            alive: false,
            health: 0,
            death_timer: 40,
            ..live_player()
        };
        let input = InputFrame {
            fire: true,
            ..InputFrame::default()
        };
        control.handle(&input, &dying, &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn the_restart_key_works_at_any_moment() {
        let mut control = PlayerControl::default();
        let mut commands = Vec::new();
        let dying = PlayerSnapshot {
            alive: false,
            health: 0,
            death_timer: 40,
            ..live_player()
        };
        let input = InputFrame {
            restart: true,
            ..InputFrame::default()
        };
        control.handle(&input, &dying, &mut commands);
        assert_eq!(commands, vec![Command::Restart]);

        commands.clear();
        control.handle(&input, &live_player(), &mut commands);
        assert_eq!(commands, vec![Command::Restart]);
    }
}
