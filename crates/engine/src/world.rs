//! Physics arena backed by rapier2d.
//!
//! The world is built from an [`ArenaLayout`]: fixed cuboids for borders,
//! walls and the goal, plus one dynamic ball. Gravity is zero while the maze is
//! being played. When the ball first touches the goal the arena collapses:
//! gravity is switched on and every interior wall becomes dynamic, falling
//! onto the static borders.

use std::sync::Mutex;

use rapier2d::na::Vector2;
use rapier2d::prelude::*;

use crate::core::{ArenaLayout, RectSpec};
use crate::types::{
    ArenaSettings, BodyLabel, Direction, BALL_LINEAR_DAMPING, COLLAPSE_GRAVITY, NUDGE_SPEED,
    TICKS_PER_SECOND,
};

/// Result of one fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    /// The ball touched the goal during this step (reported once).
    GoalReached,
}

/// Collision shape of a body, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Rect { half_width: f32, half_height: f32 },
    Circle { radius: f32 },
}

/// Read-only view of one body, used for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyView {
    pub label: BodyLabel,
    pub x: f32,
    pub y: f32,
    /// Rotation in radians.
    pub angle: f32,
    pub shape: BodyShape,
}

/// Collects collision-start pairs reported during a step.
#[derive(Default)]
struct StartedContacts {
    pairs: Mutex<Vec<(ColliderHandle, ColliderHandle)>>,
}

impl StartedContacts {
    fn drain(&self) -> Vec<(ColliderHandle, ColliderHandle)> {
        match self.pairs.lock() {
            Ok(mut pairs) => std::mem::take(&mut *pairs),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventHandler for StartedContacts {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let CollisionEvent::Started(a, b, _) = event {
            let mut pairs = match self.pairs.lock() {
                Ok(pairs) => pairs,
                Err(poisoned) => poisoned.into_inner(),
            };
            pairs.push((a, b));
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

struct TrackedBody {
    handle: RigidBodyHandle,
    label: BodyLabel,
    shape: BodyShape,
}

/// The simulated arena.
pub struct ArenaWorld {
    settings: ArenaSettings,
    gravity: Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    events: StartedContacts,

    bodies: Vec<TrackedBody>,
    ball: RigidBodyHandle,
    collapsed: bool,
    steps: u64,
}

impl ArenaWorld {
    /// Build the world for a layout. Gravity starts at zero.
    pub fn new(layout: &ArenaLayout) -> Self {
        let mut rigid_body_set = RigidBodySet::new();
        let mut collider_set = ColliderSet::new();
        let mut bodies = Vec::with_capacity(layout.borders.len() + layout.walls.len() + 2);

        for rect in layout
            .borders
            .iter()
            .chain(layout.walls.iter())
            .chain(std::iter::once(&layout.goal))
        {
            let handle = insert_fixed_rect(&mut rigid_body_set, &mut collider_set, rect);
            bodies.push(TrackedBody {
                handle,
                label: rect.label,
                shape: BodyShape::Rect {
                    half_width: rect.width / 2.0,
                    half_height: rect.height / 2.0,
                },
            });
        }

        let ball_body = RigidBodyBuilder::dynamic()
            .translation(Vector2::new(layout.ball.x, layout.ball.y))
            .linear_damping(BALL_LINEAR_DAMPING)
            .ccd_enabled(true)
            .build();
        let ball = rigid_body_set.insert(ball_body);
        let ball_collider = ColliderBuilder::ball(layout.ball.radius)
            .friction(0.1)
            .restitution(0.0)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .user_data(BodyLabel::Ball.to_user_data())
            .build();
        collider_set.insert_with_parent(ball_collider, ball, &mut rigid_body_set);
        bodies.push(TrackedBody {
            handle: ball,
            label: BodyLabel::Ball,
            shape: BodyShape::Circle {
                radius: layout.ball.radius,
            },
        });

        let integration_parameters = IntegrationParameters {
            dt: 1.0 / TICKS_PER_SECOND,
            ..IntegrationParameters::default()
        };

        log::debug!(
            "[Arena] built {} walls, {} borders, ball r={:.1}",
            layout.walls.len(),
            layout.borders.len(),
            layout.ball.radius
        );

        Self {
            settings: layout.settings,
            gravity: Vector2::new(0.0, 0.0),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set,
            collider_set,
            events: StartedContacts::default(),
            bodies,
            ball,
            collapsed: false,
            steps: 0,
        }
    }

    pub fn settings(&self) -> &ArenaSettings {
        &self.settings
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn gravity(&self) -> (f32, f32) {
        (self.gravity.x, self.gravity.y)
    }

    /// Number of fixed steps taken.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Add `NUDGE_SPEED` units per tick to the ball velocity along one axis.
    pub fn nudge(&mut self, direction: Direction) {
        let (dr, dc) = direction.delta();
        let delta = Vector2::new(dc as f32, dr as f32) * (NUDGE_SPEED * TICKS_PER_SECOND);
        if let Some(ball) = self.rigid_body_set.get_mut(self.ball) {
            let v = *ball.linvel() + delta;
            ball.set_linvel(v, true);
        }
    }

    /// Ball position in world units.
    pub fn ball_position(&self) -> (f32, f32) {
        self.rigid_body_set
            .get(self.ball)
            .map(|b| (b.translation().x, b.translation().y))
            .unwrap_or_default()
    }

    /// Ball velocity in world units per second.
    pub fn ball_velocity(&self) -> (f32, f32) {
        self.rigid_body_set
            .get(self.ball)
            .map(|b| (b.linvel().x, b.linvel().y))
            .unwrap_or_default()
    }

    /// Advance the simulation by one fixed tick.
    pub fn step(&mut self) -> StepOutcome {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.events,
        );
        self.steps += 1;

        let goal_hit = self
            .events
            .drain()
            .into_iter()
            .any(|(a, b)| self.is_ball_goal_pair(a, b));

        if goal_hit && !self.collapsed {
            log::info!("[Arena] goal reached after {} steps", self.steps);
            self.collapse();
            return StepOutcome::GoalReached;
        }
        StepOutcome::Running
    }

    fn label_of(&self, collider: ColliderHandle) -> Option<BodyLabel> {
        let c = self.collider_set.get(collider)?;
        BodyLabel::from_user_data(c.user_data)
    }

    fn is_ball_goal_pair(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        matches!(
            (self.label_of(a), self.label_of(b)),
            (Some(BodyLabel::Ball), Some(BodyLabel::Goal))
                | (Some(BodyLabel::Goal), Some(BodyLabel::Ball))
        )
    }

    /// Switch on gravity and release every interior wall. Idempotent.
    pub fn collapse(&mut self) {
        if self.collapsed {
            return;
        }
        self.collapsed = true;
        self.gravity = Vector2::new(0.0, COLLAPSE_GRAVITY);

        let mut released = 0usize;
        for tracked in self.bodies.iter().filter(|b| b.label == BodyLabel::Wall) {
            if let Some(body) = self.rigid_body_set.get_mut(tracked.handle) {
                body.set_body_type(RigidBodyType::Dynamic, true);
                body.enable_ccd(true);
                released += 1;
            }
        }
        // Wake the ball too, it may have been put to sleep against the goal.
        if let Some(ball) = self.rigid_body_set.get_mut(self.ball) {
            ball.wake_up(true);
        }
        log::debug!("[Arena] collapse released {} walls", released);
    }

    /// Current state of every body, borders first and the ball last.
    pub fn bodies(&self) -> Vec<BodyView> {
        self.bodies
            .iter()
            .filter_map(|tracked| {
                let body = self.rigid_body_set.get(tracked.handle)?;
                Some(BodyView {
                    label: tracked.label,
                    x: body.translation().x,
                    y: body.translation().y,
                    angle: body.rotation().angle(),
                    shape: tracked.shape,
                })
            })
            .collect()
    }

    /// Number of bodies carrying `label` that are currently dynamic.
    pub fn dynamic_count(&self, label: BodyLabel) -> usize {
        self.bodies
            .iter()
            .filter(|t| t.label == label)
            .filter_map(|t| self.rigid_body_set.get(t.handle))
            .filter(|b| b.is_dynamic())
            .count()
    }
}

fn insert_fixed_rect(
    rigid_body_set: &mut RigidBodySet,
    collider_set: &mut ColliderSet,
    rect: &RectSpec,
) -> RigidBodyHandle {
    let body = RigidBodyBuilder::fixed()
        .translation(Vector2::new(rect.x, rect.y))
        .build();
    let handle = rigid_body_set.insert(body);
    let collider = ColliderBuilder::cuboid(rect.width / 2.0, rect.height / 2.0)
        .friction(0.1)
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .user_data(rect.label.to_user_data())
        .build();
    collider_set.insert_with_parent(collider, handle, rigid_body_set);
    handle
}
