//! Space shooter game variant.
//!
//! A small fleet of ships drifting over the field: station ships that hold
//! position, scouts that cruise, and spam ships whose [`SpawnGun`]
//! periodically fans out a new wave of three. Player armament is tracked as
//! session state on the blackboard but does not fire yet.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::blackboard::Blackboard;
use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::sandboxconfig::SandboxConfig;
use crate::resources::worldtime::WorldTime;

/// Seconds between spawn gun waves.
pub const SPAWN_PERIOD: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipKind {
    Small,
    Mother,
    Spam,
}

/// A ship in the fleet. Station ships ([`ShipKind::Mother`]) are spawned
/// without a [`RigidBody`], so they hold position by construction.
#[derive(Component, Debug, Clone)]
pub struct Ship {
    pub name: String,
    pub kind: ShipKind,
}

impl Ship {
    pub fn new(name: impl Into<String>, kind: ShipKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Periodic wave spawner carried by spam ships.
#[derive(Component, Debug, Clone)]
pub struct SpawnGun {
    pub period: f32,
    pub elapsed: f32,
}

impl SpawnGun {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }
}

/// Inert weapon descriptions; effects are not implemented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weapon {
    Rocket { position: Vec2, velocity: Vec2 },
    Emp { position: Vec2, radius: f32 },
}

/// Player session state kept on the [`Blackboard`].
#[derive(Debug, Clone, Copy)]
pub struct PlayerState {
    pub hull: i32,
    pub emp_charges: i32,
    pub target: Option<Entity>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            hull: 10,
            emp_charges: 3,
            target: None,
        }
    }

    /// Point the armament at a ship, or at nothing.
    pub fn aim_target(&mut self, target: Option<Entity>) {
        self.target = target;
    }

    /// Fire at the current aim target.
    ///
    /// Always `None` for now; weapons are described but their effects are
    /// not implemented yet.
    pub fn shoot(&mut self) -> Option<Weapon> {
        // TODO: expend an emp charge and return Weapon::Emp once effects exist.
        None
    }
}

/// Fire every spawn gun whose period has elapsed.
///
/// Contract
/// - Reads [`WorldTime`]; each gun accumulates the delta and fires at most
///   one wave per tick, strictly after its period, then resets to zero.
/// - A wave is three children at the gun's position: a small ship drifting
///   left-down, a spam ship (with its own gun) straight down, a small ship
///   right-down. Children are unnamed and inherit the parent's look with
///   playback rewound.
pub fn spawn_gun_system(
    mut guns: Query<(
        &MapPosition,
        &mut SpawnGun,
        Option<&Sprite>,
        Option<&Animation>,
        Option<&ZIndex>,
    )>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (position, mut gun, sprite, animation, z) in guns.iter_mut() {
        gun.elapsed += time.delta;
        if gun.elapsed <= gun.period {
            continue;
        }
        gun.elapsed = 0.0;

        let at = position.pos;
        debug!("spawn gun fires a wave at ({}, {})", at.x, at.y);
        for (kind, velocity) in [
            (ShipKind::Small, Vec2::new(-1.0, 2.0)),
            (ShipKind::Spam, Vec2::new(0.0, 2.0)),
            (ShipKind::Small, Vec2::new(1.0, 2.0)),
        ] {
            let child = commands
                .spawn((
                    Ship::new("", kind),
                    MapPosition { pos: at },
                    RigidBody { velocity },
                ))
                .id();
            if kind == ShipKind::Spam {
                commands.entity(child).insert(SpawnGun::new(gun.period));
            }
            if let Some(sprite) = sprite {
                commands.entity(child).insert(sprite.clone());
            }
            if let Some(animation) = animation {
                let mut animation = animation.clone();
                animation.reset();
                commands.entity(child).insert(animation);
            }
            if let Some(z) = z {
                commands.entity(child).insert(*z);
            }
        }
    }
}

/// Spawn a ship with the shared fleet look.
fn spawn_ship(
    world: &mut World,
    name: &str,
    kind: ShipKind,
    at: Vec2,
    velocity: Option<Vec2>,
) -> Entity {
    let mut entity = world.spawn((
        Ship::new(name, kind),
        MapPosition { pos: at },
        Sprite::new("ships"),
        ZIndex(1),
    ));
    match kind {
        ShipKind::Mother => entity.insert(Animation::new("ships", "idle", 4.0)),
        _ => entity.insert(Animation::new("ships", "thrust", 8.0)),
    };
    if let Some(velocity) = velocity {
        entity.insert(RigidBody { velocity });
    }
    entity.id()
}

/// Insert the shooter mode's session state and spawn the starting fleet.
pub fn setup(world: &mut World, _config: &SandboxConfig) {
    if let Some(mut board) = world.get_non_send_resource_mut::<Blackboard>() {
        board.insert(PlayerState::new());
    } else {
        let mut board = Blackboard::new();
        board.insert(PlayerState::new());
        world.insert_non_send_resource(board);
    }

    spawn_ship(world, "hive", ShipKind::Mother, Vec2::new(112.0, 8.0), None);
    for (i, x) in [48.0, 112.0, 176.0].into_iter().enumerate() {
        spawn_ship(
            world,
            &format!("scout-{i}"),
            ShipKind::Small,
            Vec2::new(x, 40.0),
            Some(Vec2::new(0.0, 2.0)),
        );
    }
    let spammer = spawn_ship(
        world,
        "spammer",
        ShipKind::Spam,
        Vec2::new(200.0, 10.0),
        Some(Vec2::ZERO),
    );
    world.entity_mut(spammer).insert(SpawnGun::new(SPAWN_PERIOD));

    info!("shooter fleet ready: 1 mother, 3 scouts, 1 spammer");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_starts_with_full_armament() {
        let player = PlayerState::new();
        assert_eq!(player.hull, 10);
        assert_eq!(player.emp_charges, 3);
        assert!(player.target.is_none());
    }

    #[test]
    fn aim_target_round_trips() {
        let mut world = World::new();
        let ship = world.spawn_empty().id();
        let mut player = PlayerState::new();
        player.aim_target(Some(ship));
        assert_eq!(player.target, Some(ship));
        player.aim_target(None);
        assert!(player.target.is_none());
    }

    #[test]
    fn shoot_is_dry_and_spends_nothing() {
        let mut player = PlayerState::new();
        assert!(player.shoot().is_none());
        assert_eq!(player.emp_charges, 3);
    }

    #[test]
    fn spawn_gun_starts_cold() {
        let gun = SpawnGun::new(SPAWN_PERIOD);
        assert_eq!(gun.elapsed, 0.0);
        assert_eq!(gun.period, 10.0);
    }
}
