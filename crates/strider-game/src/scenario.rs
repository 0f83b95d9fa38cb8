//! Scripted demo scenario.
//!
//! Drives a [`Session`] through a fixed per-tick input schedule: walk
//! forward, turn a quarter circle, walk along the new heading, jump,
//! then pause and resume mid-air. The schedule is keyed to simulation
//! ticks, so two runs with the same config produce the same trajectory.

use std::time::Duration;

use glam::Vec3;
use tracing::{error, info};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use strider_app::{GameLoop, Session};
use strider_config::Config;
use strider_input::{Action, Bindings, KeyboardState, MouseState, RawKeyEvent};

/// Last tick of the first walk phase.
const WALK_END: u64 = 240;
/// Last tick of the turn phase.
const TURN_END: u64 = 300;
/// Tick on which the jump key goes down.
const JUMP_TICK: u64 = 480;
/// Tick on which the pause key goes down, mid-jump.
const PAUSE_START: u64 = 540;
/// Tick on which the pause key goes down again to resume.
const PAUSE_END: u64 = 570;

/// Feeds a [`Session`] a scripted input schedule, one call per fixed update.
pub struct Scenario {
    keyboard: KeyboardState,
    mouse: MouseState,
    bindings: Bindings,
    paused: bool,
    tick: u64,
    turn_dx: f64,
    start: Option<Vec3>,
    frozen: Option<Vec3>,
}

impl Scenario {
    pub fn new(config: &Config) -> Self {
        // Spread a quarter circle of yaw evenly across the turn phase.
        let sensitivity = f64::from(config.look.mouse_sensitivity);
        let turn_ticks = (TURN_END - WALK_END) as f64;
        let turn_dx = if sensitivity > 0.0 {
            std::f64::consts::FRAC_PI_2 / sensitivity / turn_ticks
        } else {
            0.0
        };

        Self {
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            bindings: Bindings::default(),
            paused: false,
            tick: 0,
            turn_dx,
            start: None,
            frozen: None,
        }
    }

    /// Advances the script by one fixed update.
    pub fn drive(&mut self, session: &mut Session) {
        if self.tick == 0 {
            session.set_look_enabled(true);
            session.set_can_move(true);
            self.start = Some(session.body_position());
            self.press(KeyCode::KeyW);
            info!("Walking forward for {WALK_END} ticks");
        } else if self.tick == WALK_END {
            self.release(KeyCode::KeyW);
            if let Some(start) = self.start {
                let walked = (session.body_position() - start).length();
                info!("Walked {walked:.1} m, turning right");
            }
        } else if self.tick == TURN_END {
            info!("Turn complete, yaw {:.3} rad", session.look().yaw);
            self.press(KeyCode::KeyW);
        } else if self.tick == JUMP_TICK {
            self.release(KeyCode::KeyW);
            self.press(KeyCode::Space);
        } else if self.tick == JUMP_TICK + 1 {
            self.release(KeyCode::Space);
        } else if self.tick == PAUSE_START {
            self.press(KeyCode::Escape);
        } else if self.tick == PAUSE_START + 1 {
            self.release(KeyCode::Escape);
        } else if self.tick == PAUSE_END {
            if let Some(frozen) = self.frozen {
                let drift = (session.body_position() - frozen).length();
                info!(
                    "Pause held for {} ticks, drift {drift:.6} m",
                    PAUSE_END - PAUSE_START
                );
            }
            self.press(KeyCode::Escape);
        } else if self.tick == PAUSE_END + 1 {
            self.release(KeyCode::Escape);
        }

        if (WALK_END..TURN_END).contains(&self.tick) {
            self.mouse.on_raw_motion(self.turn_dx, 0.0);
        }

        // Pause routing lives with the host, not the session.
        if self.bindings.just_activated(Action::Pause, &self.keyboard) {
            self.paused = !self.paused;
            session.set_paused(self.paused);
            info!("Paused: {}", self.paused);
        }

        session.tick(&self.keyboard, self.mouse.take_delta());

        if self.tick == JUMP_TICK {
            let velocity = session.body_velocity();
            info!(
                "Jumped: vertical velocity {:.1} m/s, grounded {}",
                velocity.y,
                session.grounded()
            );
        } else if self.tick == PAUSE_START {
            self.frozen = Some(session.body_position());
        }

        self.keyboard.clear_transients();
        self.tick += 1;
    }

    fn press(&mut self, code: KeyCode) {
        self.keyboard.process_raw(RawKeyEvent {
            code,
            state: ElementState::Pressed,
            repeat: false,
        });
    }

    fn release(&mut self, code: KeyCode) {
        self.keyboard.process_raw(RawKeyEvent {
            code,
            state: ElementState::Released,
            repeat: false,
        });
    }
}

/// Runs the scripted scenario for `frames` frames of the fixed-timestep loop.
pub fn run(config: &Config, frames: u64) {
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start session: {e}");
            return;
        }
    };
    let mut scenario = Scenario::new(config);
    let mut game_loop = GameLoop::new(f64::from(session.timestep()));

    info!(
        "Scenario running for {frames} frames at {} Hz",
        (1.0 / game_loop.fixed_dt()).round()
    );

    while game_loop.frame_count() < frames {
        game_loop.tick(|_dt, _total| scenario.drive(&mut session), |_alpha| {});

        if game_loop.frame_count() % 120 == 0 {
            let p = session.body_position();
            info!(
                "Frame {}: position ({:.2}, {:.2}, {:.2})",
                game_loop.frame_count(),
                p.x,
                p.y,
                p.z
            );
        }

        std::thread::sleep(Duration::from_millis(8));
    }

    let position = session.body_position();
    let velocity = session.body_velocity();
    let eye = session.eye_position();
    info!(
        "Run complete: {} frames, {} fixed updates",
        game_loop.frame_count(),
        game_loop.update_count()
    );
    info!(
        "Final position ({:.2}, {:.2}, {:.2}), velocity ({:.2}, {:.2}, {:.2})",
        position.x, position.y, position.z, velocity.x, velocity.y, velocity.z
    );
    info!("Final eye position ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);
}
