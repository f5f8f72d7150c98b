//! Snake game variant.
//!
//! A grid [`GameField`] with apples, a [`Snake`] resource stepping on a
//! fixed period, and observer events for eating and dying. The variant
//! exercises the sprite stack headlessly; nothing here knows how cells end
//! up on screen.
//!
//! Rules
//! - The snake is inert until a direction is set, and ignores `None` once
//!   it is moving. Reversing straight into the body is rejected.
//! - Eating an apple queues growth; the tail stays put for one step per
//!   queued cell.
//! - Leaving the field or biting the body kills the snake and fires
//!   [`GameOverEvent`]; every apple fires [`AppleEatenEvent`] and respawns
//!   an apple on a random free cell.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use fastrand::Rng;
use log::{debug, info};
use smallvec::SmallVec;

use crate::blackboard::Blackboard;
use crate::resources::sandboxconfig::SandboxConfig;
use crate::resources::worldtime::WorldTime;

/// Cells of growth queued per apple.
pub const GROWTH_PER_APPLE: i32 = 1;

/// Heading of the snake. `None` means "not moving yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell delta for one step in this direction.
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Grid coordinates on the play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// What occupies a field cell. The snake itself lives in [`Snake`], not in
/// the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellKind {
    #[default]
    Empty,
    Apple,
}

/// Play field grid resource, row major.
#[derive(Resource, Debug, Clone)]
pub struct GameField {
    width: i32,
    height: i32,
    cells: Vec<CellKind>,
}

impl GameField {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![CellKind::Empty; (width.max(0) * height.max(0)) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, at: Coords) -> bool {
        at.x >= 0 && at.x < self.width && at.y >= 0 && at.y < self.height
    }

    /// Cell contents, or `None` outside the field.
    pub fn kind_at(&self, at: Coords) -> Option<CellKind> {
        if !self.in_bounds(at) {
            return None;
        }
        Some(self.cells[(at.y * self.width + at.x) as usize])
    }

    /// Write a cell. Returns whether `at` was inside the field.
    pub fn set_kind(&mut self, at: Coords, kind: CellKind) -> bool {
        if !self.in_bounds(at) {
            return false;
        }
        self.cells[(at.y * self.width + at.x) as usize] = kind;
        true
    }
}

/// Snake state resource: body cells, heading, and step pacing.
///
/// The head is `body[0]`; the body is never empty.
#[derive(Resource, Debug, Clone)]
pub struct Snake {
    body: SmallVec<[Coords; 16]>,
    direction: Direction,
    pending_growth: i32,
    step_period: f32,
    elapsed: f32,
    alive: bool,
}

impl Snake {
    /// A one-cell snake at `head`, stepping every `step_period` seconds.
    pub fn new(head: Coords, step_period: f32) -> Self {
        let mut body = SmallVec::new();
        body.push(head);
        Self {
            body,
            direction: Direction::None,
            pending_growth: 0,
            step_period,
            elapsed: 0.0,
            alive: true,
        }
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    /// Body cells, head first.
    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Steer the snake. Returns whether the new heading was accepted.
    ///
    /// Once moving, `None` no longer clears the heading, and the direct
    /// opposite of the current heading is rejected.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction != Direction::None && direction == Direction::None {
            return false;
        }
        if direction != Direction::None && direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Queue growth; the tail stays put for `cells` further steps.
    pub fn grow(&mut self, cells: i32) {
        self.pending_growth += cells;
    }

    /// Move the head to `next`, consuming queued growth before shrinking.
    fn advance(&mut self, next: Coords) {
        self.body.insert(0, next);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
            return;
        }
        self.body.pop();
    }
}

/// Why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    Wall,
    SelfBite,
}

/// Event fired when the snake leaves the field or bites itself.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameOverEvent {
    pub cause: GameOverCause,
}

/// Event fired when the snake's head lands on an apple.
#[derive(Event, Debug, Clone, Copy)]
pub struct AppleEatenEvent {
    pub at: Coords,
}

/// Mode-local session state kept on the [`Blackboard`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeSession {
    pub score: u32,
    pub game_over: bool,
}

/// Step the snake on its fixed period.
///
/// Contract
/// - Reads [`WorldTime`]; accumulates the delta and catches up, stepping
///   zero or more times per tick.
/// - Mutates [`Snake`] and the apple cells of [`GameField`].
/// - Triggers [`AppleEatenEvent`] and [`GameOverEvent`] via `Commands`.
/// - Inert until a direction is set, and once the snake is dead.
pub fn snake_step(
    mut field: ResMut<GameField>,
    mut snake: ResMut<Snake>,
    time: Res<WorldTime>,
    mut commands: Commands,
    mut rng: Local<Rng>,
) {
    if !snake.alive || snake.direction == Direction::None {
        return;
    }
    snake.elapsed += time.delta;
    while snake.elapsed >= snake.step_period {
        snake.elapsed -= snake.step_period;
        step_once(&mut field, &mut snake, &mut commands, &mut rng);
        if !snake.alive {
            return;
        }
    }
}

fn step_once(field: &mut GameField, snake: &mut Snake, commands: &mut Commands, rng: &mut Rng) {
    let (dx, dy) = snake.direction.step();
    let head = snake.head();
    let next = Coords::new(head.x + dx, head.y + dy);

    if !field.in_bounds(next) {
        snake.alive = false;
        commands.trigger(GameOverEvent {
            cause: GameOverCause::Wall,
        });
        return;
    }
    if snake.body.contains(&next) {
        snake.alive = false;
        commands.trigger(GameOverEvent {
            cause: GameOverCause::SelfBite,
        });
        return;
    }

    snake.advance(next);

    if field.kind_at(next) == Some(CellKind::Apple) {
        field.set_kind(next, CellKind::Empty);
        snake.grow(GROWTH_PER_APPLE);
        commands.trigger(AppleEatenEvent { at: next });
        if spawn_apple(field, snake, rng).is_none() {
            debug!("no free cell left for an apple");
        }
    }
}

/// Place an apple on a uniformly chosen free cell.
///
/// Free means an `Empty` cell not covered by the snake. Returns the chosen
/// cell, or `None` when no cell is free.
pub fn spawn_apple(field: &mut GameField, snake: &Snake, rng: &mut Rng) -> Option<Coords> {
    let mut free: Vec<Coords> = Vec::new();
    for y in 0..field.height() {
        for x in 0..field.width() {
            let at = Coords::new(x, y);
            if field.kind_at(at) == Some(CellKind::Empty) && !snake.body.contains(&at) {
                free.push(at);
            }
        }
    }
    if free.is_empty() {
        return None;
    }
    let at = free[rng.usize(0..free.len())];
    field.set_kind(at, CellKind::Apple);
    Some(at)
}

/// Observer that counts eaten apples on the session score.
pub fn observe_apple_eaten(trigger: On<AppleEatenEvent>, mut board: NonSendMut<Blackboard>) {
    let at = trigger.event().at;
    debug!("apple eaten at ({}, {})", at.x, at.y);
    if let Some(session) = board.get_mut::<SnakeSession>() {
        session.score += 1;
    }
}

/// Observer that flags the session as over.
pub fn observe_game_over(trigger: On<GameOverEvent>, mut board: NonSendMut<Blackboard>) {
    info!("game over: {:?}", trigger.event().cause);
    if let Some(session) = board.get_mut::<SnakeSession>() {
        session.game_over = true;
    }
}

/// Insert the snake mode's resources, seed the first apple, and register
/// the observers.
pub fn setup(world: &mut World, config: &SandboxConfig) {
    let mut field = GameField::new(config.field_width, config.field_height);
    let snake = Snake::new(
        Coords::new(config.field_width / 2, config.field_height / 2),
        config.snake_step,
    );
    let mut rng = Rng::new();
    spawn_apple(&mut field, &snake, &mut rng);
    world.insert_resource(field);
    world.insert_resource(snake);

    if let Some(mut board) = world.get_non_send_resource_mut::<Blackboard>() {
        board.insert(SnakeSession::default());
    } else {
        let mut board = Blackboard::new();
        board.insert(SnakeSession::default());
        world.insert_non_send_resource(board);
    }

    world.add_observer(observe_apple_eaten);
    world.add_observer(observe_game_over);
    world.flush();

    info!(
        "snake field ready: {}x{} cells",
        config.field_width, config.field_height
    );
}
