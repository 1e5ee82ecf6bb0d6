//! Solid (moving platform) motion
//!
//! Solids move one pixel at a time like the player, but never stop: anything
//! in the way is shoved. A rect inflated by one pixel acts as the pusher, so a
//! player resting on top or flush against a side is carried along.

use glam::{IVec2, Vec2};

use super::collision::{collides_with_tiles, rect_collision};
use super::geometry::{IRect, solid_rect};
use super::rules::{CrushPolicy, LevelRules, SolidMotion};
use super::state::{GameMode, GameState, Player, Solid};
use super::world::WorldGrid;
use crate::consts::CRUSH_RESPAWN;

const AXES: [usize; 2] = [0, 1];

/// Advance every solid of the active level by one tick
pub fn update_solids(state: &mut GameState, dt: f32) {
    let GameState {
        mode,
        player,
        level_1,
        level_2,
        world,
        ..
    } = state;

    let level = match mode {
        GameMode::InLevel1 => level_1,
        GameMode::InLevel2 => level_2,
        GameMode::MainMenu => return,
    };
    let rules = level.rules;

    player.solid_speed = Vec2::ZERO;
    for solid in level.solids_mut() {
        move_solid(solid, player, world, &rules, dt);
    }
}

fn move_solid(solid: &mut Solid, player: &mut Player, world: &WorldGrid, rules: &LevelRules, dt: f32) {
    solid.prev_pos = solid.pos;
    if rules.track_player_keyframe {
        if let Some(keyframe) = solid.keyframe_mut(0) {
            *keyframe = player.pos;
        }
    }

    let mut pusher = solid_rect(solid).inflate(1);

    // Chasing solids pick their heading once per tick
    let chase = match rules.solid_motion {
        SolidMotion::ChasePlayer => Some((player.hitbox().pos - solid.pos).signum()),
        SolidMotion::PingPong => None,
    };

    for axis in AXES {
        solid.remainder[axis] += solid.speed[axis] * dt;
        let amount = solid.remainder[axis].round();
        solid.remainder[axis] -= amount;

        for _ in 0..(amount as i32).abs() {
            let dir = match chase {
                Some(heading) => heading[axis],
                None => keyframe_direction(solid, axis),
            };
            if dir == 0 {
                break;
            }

            let mut step = IVec2::ZERO;
            step[axis] = dir;
            push_player(solid, &mut pusher, step, axis, player, world, rules);
            solid.pos += step;

            if chase.is_none() {
                advance_keyframe(solid, axis);
            }
        }
    }
}

/// Heading from the current keyframe toward the next one
fn keyframe_direction(solid: &Solid, axis: usize) -> i32 {
    match (solid.current_keyframe(), solid.next_keyframe()) {
        (Some(current), Some(next)) => (next[axis] - current[axis]).signum(),
        _ => 0,
    }
}

fn advance_keyframe(solid: &mut Solid, axis: usize) {
    let Some(next_idx) = solid.next_keyframe_idx() else {
        return;
    };
    if solid.keyframes()[next_idx][axis] == solid.pos[axis] {
        solid.keyframe_idx = next_idx;
        log::trace!("solid reached keyframe {} at {:?}", next_idx, solid.pos);
    }
}

/// Move the pusher one pixel and shove the player if it now overlaps
fn push_player(
    solid: &Solid,
    pusher: &mut IRect,
    step: IVec2,
    axis: usize,
    player: &mut Player,
    world: &WorldGrid,
    rules: &LevelRules,
) {
    let hitbox = player.hitbox();
    let standing_on_top = hitbox.bottom() - 1 == pusher.pos.y;

    *pusher = pusher.translated(step);
    if !rect_collision(hitbox, *pusher) {
        return;
    }

    player.solid_speed[axis] = solid.speed[axis] * step[axis] as f32 / rules.carry_damping[axis];

    let pushed = hitbox.translated(step);
    if !collides_with_tiles(world, pushed, player.pos) {
        player.pos += step;
        return;
    }

    log::debug!("player crushed against a tile at {:?}", player.pos);
    if rules.crush == CrushPolicy::ResetToSpawn && !standing_on_top {
        player.pos = CRUSH_RESPAWN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteId;
    use crate::consts::UPDATE_DELAY;

    fn state_with_solid(mode: GameMode, rules: LevelRules, solid: Solid, player_pos: IVec2) -> GameState {
        let mut state = GameState::new();
        state.mode = mode;
        state.player = Player::new(player_pos);
        let level = state.active_level_mut().unwrap();
        level.rules = rules;
        level.add_solid(solid).unwrap();
        state
    }

    fn shuttle(from: (i32, i32), to: (i32, i32), speed: (f32, f32)) -> Solid {
        Solid::shuttle(
            SpriteId::Solid02,
            IVec2::new(from.0, from.1),
            IVec2::new(to.0, to.1),
            Vec2::new(speed.0, speed.1),
        )
        .unwrap()
    }

    #[test]
    fn test_ping_pong_reaches_keyframe_and_turns() {
        let solid = shuttle((16, 80), (80, 80), (20.0, 20.0));
        let mut state =
            state_with_solid(GameMode::InLevel2, LevelRules::level_2(), solid, IVec2::new(600, 300));

        let mut ticks = 0;
        while state.level_2.solids()[0].keyframe_idx == 0 {
            update_solids(&mut state, UPDATE_DELAY);
            let solid = &state.level_2.solids()[0];
            assert!(solid.pos.x <= 80);
            // Keyframes share a row, so Y never moves
            assert_eq!(solid.pos.y, 80);
            ticks += 1;
            assert!(ticks < 400, "solid never reached its keyframe");
        }
        assert_eq!(state.level_2.solids()[0].pos.x, 80);

        for _ in 0..30 {
            update_solids(&mut state, UPDATE_DELAY);
        }
        let solid = &state.level_2.solids()[0];
        assert!(solid.pos.x < 80);
        assert_eq!(solid.keyframe_idx, 1);
    }

    #[test]
    fn test_remainder_accumulates_slow_speed() {
        // 20 px/s at 60 Hz is a third of a pixel per tick
        let solid = shuttle((16, 80), (80, 80), (20.0, 0.0));
        let mut state =
            state_with_solid(GameMode::InLevel2, LevelRules::level_2(), solid, IVec2::new(600, 300));

        for _ in 0..30 {
            update_solids(&mut state, UPDATE_DELAY);
        }
        assert_eq!(state.level_2.solids()[0].pos.x, 26);
    }

    #[test]
    fn test_push_moves_player_and_hands_over_speed() {
        // Inflated rect right edge is 109; player hitbox starts there
        let solid = shuttle((100, 100), (200, 100), (60.0, 0.0));
        let mut state =
            state_with_solid(GameMode::InLevel2, LevelRules::level_2(), solid, IVec2::new(113, 100));

        update_solids(&mut state, UPDATE_DELAY);
        assert_eq!(state.level_2.solids()[0].pos.x, 101);
        assert_eq!(state.player.pos.x, 114);
        assert!((state.player.solid_speed.x - 3.0).abs() < 1e-5);

        // Out of reach: speed handed over is cleared next tick
        state.player.pos.x = 400;
        update_solids(&mut state, UPDATE_DELAY);
        assert_eq!(state.player.solid_speed, Vec2::ZERO);
    }

    #[test]
    fn test_rider_is_carried() {
        // Solid top is y = 94; player stands on it
        let solid = shuttle((100, 100), (200, 100), (60.0, 0.0));
        let mut state =
            state_with_solid(GameMode::InLevel2, LevelRules::level_2(), solid, IVec2::new(100, 86));

        for _ in 0..5 {
            update_solids(&mut state, UPDATE_DELAY);
        }
        assert_eq!(state.level_2.solids()[0].pos.x, 105);
        assert_eq!(state.player.pos, IVec2::new(105, 86));
    }

    #[test]
    fn test_chase_heads_toward_player() {
        let mut solid = Solid::new(SpriteId::Solid02, IVec2::new(100, 100));
        solid.speed = Vec2::new(60.0, 60.0);
        solid.add_keyframe(IVec2::new(100, 100)).unwrap();
        solid.add_keyframe(IVec2::new(100, 100)).unwrap();
        let mut state =
            state_with_solid(GameMode::InLevel1, LevelRules::level_1(), solid, IVec2::new(200, 40));

        update_solids(&mut state, UPDATE_DELAY);
        let solid = &state.level_1.solids()[0];
        assert_eq!(solid.pos, IVec2::new(101, 99));
        assert_eq!(solid.prev_pos, IVec2::new(100, 100));
        // Keyframe 0 follows the live player
        assert_eq!(solid.keyframes()[0], IVec2::new(200, 40));
    }

    fn crush_setup(crush: CrushPolicy) -> GameState {
        // Tile (2, 1) at x 190; player hitbox flush against it, solid flush on the left
        let rules = LevelRules {
            crush,
            ..LevelRules::level_2()
        };
        let solid = shuttle((173, 99), (300, 99), (60.0, 0.0));
        let mut state = state_with_solid(GameMode::InLevel2, rules, solid, IVec2::new(186, 99));
        state.world.set_visible(2, 1, true);
        state
    }

    #[test]
    fn test_crush_inert_by_default() {
        let mut state = crush_setup(CrushPolicy::Ignore);
        update_solids(&mut state, UPDATE_DELAY);

        assert_eq!(state.player.pos, IVec2::new(186, 99));
        assert!(state.player.solid_speed.x > 0.0);
        assert_eq!(state.level_2.solids()[0].pos.x, 174);
    }

    #[test]
    fn test_crush_resets_to_spawn() {
        let mut state = crush_setup(CrushPolicy::ResetToSpawn);
        update_solids(&mut state, UPDATE_DELAY);
        assert_eq!(state.player.pos, CRUSH_RESPAWN);
    }

    #[test]
    fn test_rider_carried_into_tile_is_not_reset() {
        // Rider stands flush on a solid (top y = 107) and against tile (2, 1) at x 190
        let rules = LevelRules {
            crush: CrushPolicy::ResetToSpawn,
            ..LevelRules::level_2()
        };
        let solid = shuttle((186, 113), (300, 113), (60.0, 0.0));
        let mut state = state_with_solid(GameMode::InLevel2, rules, solid, IVec2::new(186, 99));
        state.world.set_visible(2, 1, true);
        assert_eq!(state.player.hitbox().bottom(), solid_rect(&state.level_2.solids()[0]).pos.y);

        update_solids(&mut state, UPDATE_DELAY);

        // Push withheld, no respawn, solid keeps moving underneath
        assert_eq!(state.player.pos, IVec2::new(186, 99));
        assert_ne!(state.player.pos, CRUSH_RESPAWN);
        assert!(state.player.solid_speed.x > 0.0);
        assert_eq!(state.level_2.solids()[0].pos.x, 187);
    }

    #[test]
    fn test_menu_does_not_move_solids() {
        let solid = shuttle((16, 80), (80, 80), (600.0, 0.0));
        let mut state =
            state_with_solid(GameMode::InLevel2, LevelRules::level_2(), solid, IVec2::new(600, 300));
        state.mode = GameMode::MainMenu;
        update_solids(&mut state, UPDATE_DELAY);
        assert_eq!(state.level_2.solids()[0].pos.x, 16);
    }
}
