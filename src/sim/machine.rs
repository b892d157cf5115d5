//! Outer game controller: Menu, Playing and GameOver
//!
//! Owns at most one session. Input events pick the transition, ticks drive the session.

use glam::Vec2;

use super::scene::{EntityView, GamePhase, Scene};
use super::session::{GameSession, TickInput};
use super::state::RngState;
use crate::consts::*;
use crate::highscores::HighScores;

/// Abstract input events produced by the host's input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    Start,
    /// Window close; exits from any state
    Quit,
    /// Escape: abandons a run while playing, exits otherwise
    Back,
}

/// Whether the host loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Current screen; the session lives inside `Playing`
#[derive(Debug, Clone)]
pub enum Screen {
    Menu,
    Playing(GameSession),
    GameOver { final_score: u32 },
}

#[derive(Debug, Clone)]
pub struct GameStateMachine {
    screen: Screen,
    /// Base seed; each run gets its own PCG stream
    seed: u64,
    /// Runs started so far (the next run's stream index)
    runs: u64,
    autopilot: bool,
    high_scores: HighScores,
    exited: bool,
}

impl GameStateMachine {
    pub fn new(seed: u64) -> Self {
        Self {
            screen: Screen::Menu,
            seed,
            runs: 0,
            autopilot: false,
            high_scores: HighScores::new(),
            exited: false,
        }
    }

    /// Let sessions steer themselves (demo mode)
    pub fn with_autopilot(mut self, autopilot: bool) -> Self {
        self.autopilot = autopilot;
        self
    }

    pub fn with_high_scores(mut self, high_scores: HighScores) -> Self {
        self.high_scores = high_scores;
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn phase(&self) -> GamePhase {
        match self.screen {
            Screen::Menu => GamePhase::Menu,
            Screen::Playing(_) => GamePhase::Playing,
            Screen::GameOver { .. } => GamePhase::GameOver,
        }
    }

    pub fn session(&self) -> Option<&GameSession> {
        match &self.screen {
            Screen::Playing(session) => Some(session),
            _ => None,
        }
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn has_exited(&self) -> bool {
        self.exited
    }

    /// Apply one input event. Events with no meaning in the current state are ignored.
    pub fn handle_event(&mut self, event: InputEvent) -> Flow {
        if self.exited {
            return Flow::Exit;
        }

        match (event, self.phase()) {
            (InputEvent::Quit, _) => return self.exit(),
            (InputEvent::Start, GamePhase::Menu | GamePhase::GameOver) => self.start_run(),
            (InputEvent::Back, GamePhase::Menu | GamePhase::GameOver) => return self.exit(),
            (InputEvent::Jump, GamePhase::Playing) => {
                if let Screen::Playing(session) = &mut self.screen {
                    session.queue_jump();
                }
            }
            (InputEvent::Back, GamePhase::Playing) => self.abandon_run(),
            (event, phase) => log::trace!("Ignored {:?} in {:?}", event, phase),
        }

        Flow::Continue
    }

    /// Advance one fixed tick. Only the Playing state has anything to simulate.
    pub fn tick(&mut self) -> Flow {
        if self.exited {
            return Flow::Exit;
        }

        let input = TickInput {
            jump: false,
            autopilot: self.autopilot,
        };

        if let Screen::Playing(session) = &mut self.screen {
            let outcome = session.update(&input);
            if !outcome.alive {
                let ticks = session.time_ticks;
                self.finish_run(outcome.score, ticks);
            }
        }

        Flow::Continue
    }

    /// One host frame: this frame's events in order, then `ticks` fixed steps.
    ///
    /// A Quit anywhere in the frame wins over everything else, including earlier events.
    pub fn frame(&mut self, events: &[InputEvent], ticks: u32) -> Flow {
        if events.contains(&InputEvent::Quit) {
            return self.exit();
        }

        for &event in events {
            if self.handle_event(event) == Flow::Exit {
                return Flow::Exit;
            }
        }

        for _ in 0..ticks {
            self.tick();
        }

        if self.exited { Flow::Exit } else { Flow::Continue }
    }

    /// Snapshot for the renderer
    pub fn scene(&self) -> Scene {
        let world_size = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);
        let best_score = self.high_scores.top_score();

        match &self.screen {
            Screen::Menu => Scene {
                phase: GamePhase::Menu,
                world_size,
                entity: None,
                obstacles: Vec::new(),
                score: 0,
                speed: INITIAL_SPEED,
                final_score: None,
                best_score,
            },
            Screen::Playing(session) => Scene {
                phase: GamePhase::Playing,
                world_size,
                entity: Some(EntityView {
                    pos: session.entity.pos,
                    radius: session.entity.radius,
                    vel: session.entity.vel,
                }),
                obstacles: session
                    .field
                    .obstacles
                    .iter()
                    .flat_map(|o| o.solid_spans())
                    .collect(),
                score: session.score,
                speed: session.speed,
                final_score: None,
                best_score,
            },
            Screen::GameOver { final_score } => Scene {
                phase: GamePhase::GameOver,
                world_size,
                entity: None,
                obstacles: Vec::new(),
                score: *final_score,
                speed: INITIAL_SPEED,
                final_score: Some(*final_score),
                best_score,
            },
        }
    }

    fn start_run(&mut self) {
        let rng_state = RngState::for_run(self.seed, self.runs);
        self.runs += 1;
        log::info!("Run {} started", self.runs);
        self.screen = Screen::Playing(GameSession::new(rng_state));
    }

    fn finish_run(&mut self, score: u32, ticks: u64) {
        if let Some(rank) = self.high_scores.add_score(score, ticks, self.runs) {
            log::info!("Score {} ranked #{}", score, rank);
        }
        log::info!("Game over (run {}, score {})", self.runs, score);
        self.screen = Screen::GameOver { final_score: score };
    }

    fn abandon_run(&mut self) {
        if let Screen::Playing(session) = &self.screen {
            let score = session.score;
            let ticks = session.time_ticks;
            log::info!("Run {} abandoned with score {}", self.runs, score);
            self.finish_run(score, ticks);
        }
    }

    fn exit(&mut self) -> Flow {
        log::info!("Quit from {:?}", self.phase());
        self.exited = true;
        Flow::Exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(seed: u64) -> GameStateMachine {
        let mut m = GameStateMachine::new(seed);
        assert_eq!(m.handle_event(InputEvent::Start), Flow::Continue);
        m
    }

    fn run_until_game_over(m: &mut GameStateMachine) {
        let mut guard = 0;
        while m.phase() == GamePhase::Playing {
            m.tick();
            guard += 1;
            assert!(guard < 10_000, "run never ended");
        }
    }

    #[test]
    fn test_initial_state_is_menu() {
        let m = GameStateMachine::new(1);
        assert_eq!(m.phase(), GamePhase::Menu);
        assert!(m.session().is_none());
        assert_eq!(m.runs(), 0);
    }

    #[test]
    fn test_menu_start_begins_fresh_session() {
        let m = playing(1);
        assert_eq!(m.phase(), GamePhase::Playing);
        let session = m.session().expect("session");
        assert_eq!(session.score, 0);
        assert_eq!(session.time_ticks, 0);
        assert_eq!(session.entity.vel, 0.0);
    }

    #[test]
    fn test_quit_exits_from_every_state() {
        let mut menu = GameStateMachine::new(1);
        assert_eq!(menu.handle_event(InputEvent::Quit), Flow::Exit);
        assert!(menu.has_exited());

        let mut play = playing(1);
        assert_eq!(play.handle_event(InputEvent::Quit), Flow::Exit);

        let mut over = playing(1);
        run_until_game_over(&mut over);
        assert_eq!(over.handle_event(InputEvent::Quit), Flow::Exit);

        // Once exited, everything reports Exit
        assert_eq!(over.tick(), Flow::Exit);
        assert_eq!(over.handle_event(InputEvent::Start), Flow::Exit);
    }

    #[test]
    fn test_jump_in_menu_is_ignored_and_applies_on_first_playing_tick() {
        let mut m = GameStateMachine::new(1);
        m.handle_event(InputEvent::Jump);
        assert_eq!(m.phase(), GamePhase::Menu);

        m.handle_event(InputEvent::Start);
        assert_eq!(m.session().map(|s| s.entity.vel), Some(0.0));

        m.handle_event(InputEvent::Jump);
        // Forwarded, not yet applied
        assert_eq!(m.session().map(|s| s.entity.vel), Some(0.0));

        m.tick();
        assert_eq!(m.session().map(|s| s.entity.vel), Some(JUMP_IMPULSE + GRAVITY));
    }

    #[test]
    fn test_death_moves_to_game_over() {
        let mut m = playing(5);
        run_until_game_over(&mut m);
        assert_eq!(m.phase(), GamePhase::GameOver);
        assert!(matches!(m.screen(), Screen::GameOver { final_score: 0 }));
        assert!(m.session().is_none());
    }

    #[test]
    fn test_ticks_outside_playing_do_nothing() {
        let mut m = GameStateMachine::new(1);
        assert_eq!(m.tick(), Flow::Continue);
        assert_eq!(m.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_restart_from_game_over_resets_score() {
        let mut m = playing(3);
        run_until_game_over(&mut m);

        m.handle_event(InputEvent::Start);
        assert_eq!(m.phase(), GamePhase::Playing);
        assert_eq!(m.runs(), 2);
        let session = m.session().expect("session");
        assert_eq!(session.score, 0);
        assert_eq!(session.speed, INITIAL_SPEED);
        assert_eq!(session.rng_state.stream, 1);
    }

    #[test]
    fn test_start_while_playing_is_ignored() {
        let mut m = playing(1);
        m.tick();
        m.handle_event(InputEvent::Start);
        assert_eq!(m.session().map(|s| s.time_ticks), Some(1));
        assert_eq!(m.runs(), 1);
    }

    #[test]
    fn test_back_abandons_run_then_exits() {
        let mut m = playing(1);
        m.tick();
        assert_eq!(m.handle_event(InputEvent::Back), Flow::Continue);
        assert_eq!(m.phase(), GamePhase::GameOver);
        assert_eq!(m.handle_event(InputEvent::Back), Flow::Exit);

        let mut menu = GameStateMachine::new(1);
        assert_eq!(menu.handle_event(InputEvent::Back), Flow::Exit);
    }

    #[test]
    fn test_quit_takes_precedence_within_frame() {
        let mut m = GameStateMachine::new(1);
        let flow = m.frame(&[InputEvent::Start, InputEvent::Quit], 1);
        assert_eq!(flow, Flow::Exit);
        // Start was never processed
        assert_eq!(m.phase(), GamePhase::Menu);
        assert_eq!(m.runs(), 0);
    }

    #[test]
    fn test_frame_applies_events_then_ticks() {
        let mut m = GameStateMachine::new(1);
        assert_eq!(m.frame(&[InputEvent::Start, InputEvent::Jump], 2), Flow::Continue);
        let session = m.session().expect("session");
        assert_eq!(session.time_ticks, 2);
        assert_eq!(session.entity.vel, JUMP_IMPULSE + 2.0 * GRAVITY);
    }

    #[test]
    fn test_scene_per_phase() {
        let mut m = GameStateMachine::new(1);
        let scene = m.scene();
        assert_eq!(scene.phase, GamePhase::Menu);
        assert!(scene.entity.is_none());
        assert!(scene.final_score.is_none());

        m.handle_event(InputEvent::Start);
        let scene = m.scene();
        assert_eq!(scene.phase, GamePhase::Playing);
        let entity = scene.entity.expect("entity");
        assert_eq!(entity.pos, Vec2::new(ENTITY_X, WORLD_HEIGHT / 2.0));
        assert_eq!(entity.radius, ENTITY_RADIUS);
        assert_eq!(scene.world_size, Vec2::new(WORLD_WIDTH, WORLD_HEIGHT));

        run_until_game_over(&mut m);
        let scene = m.scene();
        assert_eq!(scene.phase, GamePhase::GameOver);
        assert_eq!(scene.final_score, Some(scene.score));
    }

    #[test]
    fn test_scene_lists_two_spans_per_obstacle() {
        let mut m = playing(9);
        for _ in 0..=SPAWN_INTERVAL_TICKS {
            if let Screen::Playing(session) = &mut m.screen {
                session.entity.pos.y = 300.0;
                session.entity.vel = 0.0;
            }
            m.tick();
        }
        let scene = m.scene();
        assert_eq!(scene.obstacles.len(), 2);
        assert_eq!(scene.obstacles[0].min.y, 0.0);
        assert_eq!(scene.obstacles[1].max.y, WORLD_HEIGHT);
    }

    #[test]
    fn test_scene_serializes_phase_tag() {
        let m = GameStateMachine::new(1);
        let json = serde_json::to_value(m.scene()).expect("serialize");
        assert_eq!(json["phase"], "Menu");
        assert_eq!(json["score"], 0);
    }

    #[test]
    fn test_abandoned_score_recorded() {
        let mut m = playing(1);
        if let Screen::Playing(session) = &mut m.screen {
            session.score = 4;
        }
        m.handle_event(InputEvent::Back);
        assert_eq!(m.high_scores().top_score(), Some(4));
        assert_eq!(m.scene().best_score, Some(4));
    }

    #[test]
    fn test_same_seed_same_runs() {
        let mut a = GameStateMachine::new(77).with_autopilot(true);
        let mut b = GameStateMachine::new(77).with_autopilot(true);
        a.handle_event(InputEvent::Start);
        b.handle_event(InputEvent::Start);
        for _ in 0..1200 {
            a.tick();
            b.tick();
            assert_eq!(a.scene(), b.scene());
        }
    }
}
