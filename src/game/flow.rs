//! Game-flow state machine: menu, difficulty pick, play, pause, game over.
//!
//! `GameFlow` owns every piece of mutable game state. The runner feeds it
//! key actions and the current time; it hands back read-only snapshots for
//! drawing and a queue of sound cues.

use std::time::{Duration, Instant};

use super::{
    action::{Action, Direction, PlayerId},
    config::{Difficulty, GameConfig, GameMode},
    engine::{GameEngine, StepResult},
    scheduler::TickScheduler,
    state::RoundState,
};
use crate::audio::SoundCue;
use crate::input::KeyAction;
use crate::metrics::RoundClock;
use crate::records::RecordStore;

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Solo rounds have no winner
    Solo,
    /// The last snake standing
    Winner(PlayerId),
    /// Both snakes went out on the same tick
    Tie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub scores: Vec<u32>,
    /// Highest score across players
    pub best_score: u32,
    pub survival_time: Duration,
    pub new_best_score: bool,
    pub new_best_time: bool,
}

/// Current screen
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Menu { selection: GameMode },
    DifficultySelect { selection: Difficulty },
    Playing,
    Paused,
    GameOver(RoundResult),
}

/// Read-only view of everything the renderer needs
#[derive(Debug, Clone, Copy)]
pub struct FlowSnapshot<'a> {
    pub phase: &'a Phase,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub round: Option<&'a RoundState>,
    pub elapsed: Duration,
    pub best_score: u32,
    pub best_time: Duration,
}

pub struct GameFlow<S: RecordStore> {
    engine: GameEngine,
    records: S,
    phase: Phase,
    mode: GameMode,
    difficulty: Difficulty,
    round: Option<RoundState>,
    scheduler: TickScheduler,
    clock: Option<RoundClock>,
    /// Last accepted steering key per player since the previous tick
    pending: [Option<Direction>; 2],
    best_score: u32,
    best_time: f64,
    cues: Vec<SoundCue>,
}

fn cycle<T: Copy + PartialEq>(items: &[T], current: T, forward: bool) -> T {
    let index = items.iter().position(|item| *item == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % items.len()
    } else {
        (index + items.len() - 1) % items.len()
    };
    items[next]
}

impl<S: RecordStore> GameFlow<S> {
    pub fn new(config: GameConfig, records: S) -> Self {
        let best_score = records.load_best_score();
        let best_time = records.load_best_time();
        log::info!("Loaded records: score {}, time {:.1}s", best_score, best_time);

        Self {
            engine: GameEngine::new(config),
            records,
            phase: Phase::Menu {
                selection: GameMode::Solo,
            },
            mode: GameMode::Solo,
            difficulty: Difficulty::default(),
            round: None,
            scheduler: TickScheduler::new(Difficulty::default()),
            clock: None,
            pending: [None; 2],
            best_score,
            best_time,
            cues: Vec::new(),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn best_time(&self) -> f64 {
        self.best_time
    }

    pub fn records(&self) -> &S {
        &self.records
    }

    /// Route a key to whatever it means in the current phase; anything else is ignored
    pub fn handle_key(&mut self, action: KeyAction, now: Instant) {
        match (&self.phase, action) {
            (Phase::Menu { selection }, KeyAction::Steer(_, direction)) => {
                let forward = matches!(direction, Direction::Down | Direction::Right);
                self.phase = Phase::Menu {
                    selection: cycle(&GameMode::ALL, *selection, forward),
                };
            }
            (Phase::Menu { selection }, KeyAction::Confirm) => self.choose_mode(*selection),
            (Phase::Menu { .. }, KeyAction::Choose(index)) => {
                if let Some(mode) = GameMode::ALL.get(index) {
                    self.choose_mode(*mode);
                }
            }

            (Phase::DifficultySelect { selection }, KeyAction::Steer(_, direction)) => {
                let forward = matches!(direction, Direction::Down | Direction::Right);
                self.phase = Phase::DifficultySelect {
                    selection: cycle(&Difficulty::ALL, *selection, forward),
                };
            }
            (Phase::DifficultySelect { selection }, KeyAction::Confirm) => {
                self.start_round(*selection, now)
            }
            (Phase::DifficultySelect { .. }, KeyAction::Choose(index)) => {
                if let Some(difficulty) = Difficulty::ALL.get(index) {
                    self.start_round(*difficulty, now);
                }
            }

            (Phase::Playing, KeyAction::Steer(player, direction)) => self.steer(player, direction),
            (Phase::Playing | Phase::Paused, KeyAction::Pause) => self.toggle_pause(now),

            (Phase::GameOver(_), KeyAction::Restart) => self.restart(),
            (Phase::GameOver(_), KeyAction::Menu) => self.return_to_menu(),

            _ => {}
        }
    }

    /// Menu: lock in the mode and move on to picking a difficulty
    pub fn choose_mode(&mut self, mode: GameMode) {
        if !matches!(self.phase, Phase::Menu { .. }) {
            return;
        }
        self.mode = mode;
        self.phase = Phase::DifficultySelect {
            selection: Difficulty::default(),
        };
    }

    /// Difficulty select: build a fresh round and start playing
    pub fn start_round(&mut self, difficulty: Difficulty, now: Instant) {
        if !matches!(self.phase, Phase::DifficultySelect { .. }) {
            return;
        }
        self.difficulty = difficulty;
        self.round = Some(self.engine.reset(self.mode));
        self.scheduler.reset(difficulty, now);
        self.clock = Some(RoundClock::start(now));
        self.pending = [None; 2];
        self.phase = Phase::Playing;
        log::info!(
            "Round started: {} at {} ({} ticks/s)",
            self.mode.as_str(),
            difficulty.as_str(),
            difficulty.ticks_per_second()
        );
    }

    /// Queue a turn for the next tick. Reversals and turns for dead
    /// snakes are dropped; in solo either key set steers player one.
    pub fn steer(&mut self, player: PlayerId, direction: Direction) {
        if self.phase != Phase::Playing {
            return;
        }
        let player = match self.mode {
            GameMode::Solo => PlayerId::One,
            GameMode::Duo => player,
        };
        let Some(snake) = self.round.as_ref().and_then(|round| round.snake(player)) else {
            return;
        };
        if snake.alive && !snake.direction.is_opposite(direction) {
            self.pending[player.index()] = Some(direction);
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.phase {
            Phase::Playing => {
                if let Some(clock) = self.clock.as_mut() {
                    clock.pause(now);
                }
                self.phase = Phase::Paused;
                log::debug!("Paused");
            }
            Phase::Paused => {
                if let Some(clock) = self.clock.as_mut() {
                    clock.resume(now);
                }
                self.phase = Phase::Playing;
                log::debug!("Resumed");
            }
            _ => {}
        }
    }

    /// Game over: pick a difficulty again, keeping the mode
    pub fn restart(&mut self) {
        if let Phase::GameOver(_) = self.phase {
            self.round = None;
            self.phase = Phase::DifficultySelect {
                selection: Difficulty::default(),
            };
        }
    }

    pub fn return_to_menu(&mut self) {
        if let Phase::GameOver(_) = self.phase {
            self.round = None;
            self.phase = Phase::Menu {
                selection: self.mode,
            };
        }
    }

    /// Advance the simulation if a tick is due. Returns whether one ran.
    pub fn update(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Playing => {
                if self.scheduler.poll(now) {
                    self.tick(now);
                    true
                } else {
                    false
                }
            }
            Phase::Paused => {
                // Keep the scheduler's clock moving; the step itself is skipped
                self.scheduler.poll(now);
                false
            }
            _ => false,
        }
    }

    fn tick(&mut self, now: Instant) {
        let Some(round) = self.round.as_mut() else {
            return;
        };

        let actions: Vec<Action> = self
            .pending
            .iter_mut()
            .take(round.snakes.len())
            .map(|pending| Action::from(pending.take()))
            .collect();

        let StepResult { terminated, info } = self.engine.step(round, &actions);

        self.cues.extend(info.meals.iter().map(|_| SoundCue::Eat));
        self.cues.extend(info.collisions.iter().map(|_| SoundCue::Crash));

        if terminated {
            self.finish_round(now);
        }
    }

    fn finish_round(&mut self, now: Instant) {
        let Some(round) = self.round.as_ref() else {
            return;
        };

        let survival_time = match self.clock.as_mut() {
            Some(clock) => {
                clock.pause(now);
                clock.elapsed(now)
            }
            None => Duration::ZERO,
        };

        let outcome = match round.mode {
            GameMode::Solo => Outcome::Solo,
            GameMode::Duo => {
                let one = round.snakes.first().and_then(|snake| snake.died_at);
                let two = round.snakes.get(1).and_then(|snake| snake.died_at);
                match one.cmp(&two) {
                    std::cmp::Ordering::Greater => Outcome::Winner(PlayerId::One),
                    std::cmp::Ordering::Less => Outcome::Winner(PlayerId::Two),
                    std::cmp::Ordering::Equal => Outcome::Tie,
                }
            }
        };

        let scores = round.scores.clone();
        let best_score = round.best_score();

        let new_best_score = best_score > self.best_score;
        if new_best_score {
            self.best_score = best_score;
            log::info!("New best score: {}", best_score);
            if let Err(err) = self.records.save_best_score(best_score) {
                log::warn!("Failed to save best score: {:#}", err);
            }
        }

        let seconds = survival_time.as_secs_f64();
        let new_best_time = seconds > self.best_time;
        if new_best_time {
            self.best_time = seconds;
            log::info!("New best time: {:.1}s", seconds);
            if let Err(err) = self.records.save_best_time(seconds) {
                log::warn!("Failed to save best time: {:#}", err);
            }
        }

        log::info!(
            "Round over after {} ticks: {:?}, scores {:?}",
            round.ticks,
            outcome,
            scores
        );

        self.phase = Phase::GameOver(RoundResult {
            outcome,
            scores,
            best_score,
            survival_time,
            new_best_score,
            new_best_time,
        });
    }

    /// Sound cues queued since the last call
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn snapshot(&self, now: Instant) -> FlowSnapshot<'_> {
        FlowSnapshot {
            phase: &self.phase,
            mode: self.mode,
            difficulty: self.difficulty,
            round: self.round.as_ref(),
            elapsed: self
                .clock
                .as_ref()
                .map(|clock| clock.elapsed(now))
                .unwrap_or_default(),
            best_score: self.best_score,
            best_time: Duration::try_from_secs_f64(self.best_time).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Food, Obstacle, Position, Snake};
    use crate::records::MemoryRecordStore;

    const TICK: Duration = Duration::from_millis(100);

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        }
    }

    fn flow() -> GameFlow<MemoryRecordStore> {
        GameFlow::new(config(), MemoryRecordStore::new())
    }

    /// Menu -> mode -> Medium -> Playing, with obstacles removed and food parked in a corner
    fn playing(flow: &mut GameFlow<MemoryRecordStore>, mode: GameMode, start: Instant) {
        flow.handle_key(KeyAction::Choose(mode as usize), start);
        flow.handle_key(KeyAction::Confirm, start);
        assert_eq!(flow.phase, Phase::Playing);

        let round = flow.round.as_mut().unwrap();
        round.obstacles.clear();
        round.food = Food {
            position: Position::new(0, round.grid.rows as i32 - 1),
            is_bonus: false,
        };
    }

    /// Poll once per tick interval for `ticks` intervals; returns the last poll time
    fn run_ticks(flow: &mut GameFlow<MemoryRecordStore>, from: Instant, ticks: u32) -> Instant {
        let mut now = from;
        for _ in 0..ticks {
            now += TICK;
            flow.update(now);
        }
        now
    }

    #[test]
    fn test_starts_in_menu_with_loaded_records() {
        let records = MemoryRecordStore {
            best_score: Some(12),
            best_time: Some(30.5),
            saves: 0,
        };
        let flow = GameFlow::new(config(), records);
        assert_eq!(
            flow.phase(),
            &Phase::Menu {
                selection: GameMode::Solo
            }
        );
        assert_eq!(flow.best_score(), 12);
        assert_eq!(flow.best_time(), 30.5);
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut flow = flow();
        let now = Instant::now();

        flow.handle_key(KeyAction::Steer(PlayerId::One, Direction::Up), now);
        assert_eq!(
            flow.phase,
            Phase::Menu {
                selection: GameMode::Duo
            }
        );
        flow.handle_key(KeyAction::Steer(PlayerId::One, Direction::Down), now);
        assert_eq!(
            flow.phase,
            Phase::Menu {
                selection: GameMode::Solo
            }
        );
    }

    #[test]
    fn test_menu_to_playing() {
        let mut flow = flow();
        let now = Instant::now();

        flow.handle_key(KeyAction::Steer(PlayerId::One, Direction::Down), now);
        flow.handle_key(KeyAction::Confirm, now);
        assert_eq!(flow.mode(), GameMode::Duo);
        assert_eq!(
            flow.phase,
            Phase::DifficultySelect {
                selection: Difficulty::Medium
            }
        );

        flow.handle_key(KeyAction::Steer(PlayerId::Two, Direction::Down), now);
        flow.handle_key(KeyAction::Confirm, now);
        assert_eq!(flow.phase, Phase::Playing);
        assert_eq!(flow.difficulty(), Difficulty::Fast);
        assert_eq!(flow.scheduler.interval(), Difficulty::Fast.tick_interval());

        let round = flow.round().unwrap();
        assert_eq!(round.snakes.len(), 2);
        assert_eq!(round.scores, vec![0, 0]);
        assert_eq!(round.ticks, 0);
    }

    #[test]
    fn test_choose_out_of_range_is_ignored() {
        let mut flow = flow();
        let now = Instant::now();
        flow.handle_key(KeyAction::Choose(5), now);
        assert!(matches!(flow.phase, Phase::Menu { .. }));
        flow.handle_key(KeyAction::Choose(1), now);
        flow.handle_key(KeyAction::Choose(3), now);
        assert!(matches!(flow.phase, Phase::DifficultySelect { .. }));
    }

    #[test]
    fn test_keys_without_meaning_are_ignored() {
        let mut flow = flow();
        let now = Instant::now();

        for key in [KeyAction::Pause, KeyAction::Restart, KeyAction::Menu, KeyAction::None] {
            flow.handle_key(key, now);
        }
        assert!(matches!(flow.phase, Phase::Menu { .. }));

        playing(&mut flow, GameMode::Solo, now);
        for key in [
            KeyAction::Restart,
            KeyAction::Menu,
            KeyAction::Confirm,
            KeyAction::Choose(0),
        ] {
            flow.handle_key(key, now);
        }
        assert_eq!(flow.phase, Phase::Playing);
    }

    #[test]
    fn test_simulation_follows_scheduler() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Solo, start);

        // Rendering at ~60 fps only steps the snake at 10 ticks/s
        for frame in 1..=60 {
            flow.update(start + Duration::from_micros(16_667 * frame));
        }
        let ticks = flow.round().unwrap().ticks;
        assert!((9..=10).contains(&ticks), "ticks {ticks}");
    }

    #[test]
    fn test_steering_applies_on_next_tick() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Solo, start);
        let head = flow.round().unwrap().snakes[0].head();

        flow.handle_key(KeyAction::Steer(PlayerId::One, Direction::Up), start);
        assert_eq!(flow.round().unwrap().snakes[0].direction, Direction::Right);

        run_ticks(&mut flow, start, 1);
        let snake = &flow.round().unwrap().snakes[0];
        assert_eq!(snake.direction, Direction::Up);
        assert_eq!(snake.head(), head.moved_by(0, -1));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Solo, start);

        flow.handle_key(KeyAction::Steer(PlayerId::One, Direction::Down), start);
        flow.handle_key(KeyAction::Steer(PlayerId::One, Direction::Left), start);
        run_ticks(&mut flow, start, 1);

        let snake = &flow.round().unwrap().snakes[0];
        assert!(snake.alive);
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn test_solo_accepts_either_key_set() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Solo, start);

        flow.handle_key(KeyAction::Steer(PlayerId::Two, Direction::Down), start);
        run_ticks(&mut flow, start, 1);
        assert_eq!(flow.round().unwrap().snakes[0].direction, Direction::Down);
    }

    #[test]
    fn test_duo_players_steer_independently() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Duo, start);

        flow.handle_key(KeyAction::Steer(PlayerId::One, Direction::Down), start);
        flow.handle_key(KeyAction::Steer(PlayerId::Two, Direction::Up), start);
        run_ticks(&mut flow, start, 1);

        let round = flow.round().unwrap();
        assert_eq!(round.snakes[0].direction, Direction::Down);
        assert_eq!(round.snakes[1].direction, Direction::Up);
    }

    #[test]
    fn test_pause_freezes_simulation_and_clock() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Solo, start);

        let now = run_ticks(&mut flow, start, 3);
        assert_eq!(flow.round().unwrap().ticks, 3);

        flow.handle_key(KeyAction::Pause, now);
        assert_eq!(flow.phase, Phase::Paused);
        let snapshot_round = flow.round().unwrap().clone();

        let later = run_ticks(&mut flow, now, 50);
        assert_eq!(flow.round().unwrap(), &snapshot_round);
        assert_eq!(flow.snapshot(later).elapsed, TICK * 3);

        flow.handle_key(KeyAction::Pause, later);
        assert_eq!(flow.phase, Phase::Playing);
        let end = run_ticks(&mut flow, later, 2);
        assert_eq!(flow.round().unwrap().ticks, 5);
        assert_eq!(flow.snapshot(end).elapsed, TICK * 5);
    }

    #[test]
    fn test_solo_crash_ends_round_and_saves_records() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Solo, start);

        let round = flow.round.as_mut().unwrap();
        round.scores[0] = 7;
        let ahead = round.snakes[0].head().moved_by(2, 0);
        round.obstacles.push(Obstacle { position: ahead });

        run_ticks(&mut flow, start, 1);
        assert_eq!(flow.phase, Phase::Playing);
        run_ticks(&mut flow, start + TICK, 1);

        let Phase::GameOver(result) = flow.phase() else {
            panic!("expected game over, got {:?}", flow.phase());
        };
        assert_eq!(result.outcome, Outcome::Solo);
        assert_eq!(result.best_score, 7);
        assert_eq!(result.survival_time, TICK * 2);
        assert!(result.new_best_score);
        assert!(result.new_best_time);

        assert_eq!(flow.best_score(), 7);
        assert_eq!(flow.records().best_score, Some(7));
        assert_eq!(flow.records().best_time, Some(0.2));
        assert_eq!(flow.drain_cues(), vec![SoundCue::Crash]);
    }

    #[test]
    fn test_best_score_never_decreases() {
        let records = MemoryRecordStore {
            best_score: Some(10),
            best_time: Some(1000.0),
            saves: 0,
        };
        let mut flow = GameFlow::new(config(), records);
        let start = Instant::now();
        playing(&mut flow, GameMode::Solo, start);

        let round = flow.round.as_mut().unwrap();
        round.scores[0] = 3;
        let ahead = round.snakes[0].head().moved_by(1, 0);
        round.obstacles.push(Obstacle { position: ahead });
        run_ticks(&mut flow, start, 1);

        let Phase::GameOver(result) = flow.phase() else {
            panic!("expected game over");
        };
        assert!(!result.new_best_score);
        assert!(!result.new_best_time);
        assert_eq!(flow.best_score(), 10);
        assert_eq!(flow.records().best_score, Some(10));
        assert_eq!(flow.records().saves, 0);
    }

    #[test]
    fn test_eating_scores_and_cues() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Solo, start);

        let round = flow.round.as_mut().unwrap();
        let ahead = round.snakes[0].head().moved_by(1, 0);
        round.food = Food {
            position: ahead,
            is_bonus: true,
        };

        run_ticks(&mut flow, start, 1);
        let round = flow.round().unwrap();
        assert_eq!(round.scores[0], 5);
        assert_eq!(round.snakes[0].len(), 6);
        assert_ne!(round.food.position, ahead);
        assert_eq!(flow.drain_cues(), vec![SoundCue::Eat]);
        assert!(flow.drain_cues().is_empty());
    }

    #[test]
    fn test_solo_wraps_at_right_edge() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Solo, start);

        let round = flow.round.as_mut().unwrap();
        let grid = round.grid;
        round.snakes[0] = Snake::new(Position::new(10, 10), Direction::Right, 5, 100, &grid);

        run_ticks(&mut flow, start, 30);
        assert_eq!(flow.phase, Phase::Playing);
        assert_eq!(flow.round().unwrap().snakes[0].head(), Position::new(0, 10));
    }

    #[test]
    fn test_duo_single_elimination_keeps_playing() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Duo, start);

        let round = flow.round.as_mut().unwrap();
        let ahead = round.snakes[1].head().moved_by(-1, 0);
        round.obstacles.push(Obstacle { position: ahead });

        let now = run_ticks(&mut flow, start, 1);
        assert_eq!(flow.phase, Phase::Playing);
        assert!(!flow.round().unwrap().snakes[1].alive);

        // Player two's keys do nothing once it is out
        flow.handle_key(KeyAction::Steer(PlayerId::Two, Direction::Up), now);
        assert_eq!(flow.pending[1], None);

        // Player one runs into an obstacle two ticks later
        let round = flow.round.as_mut().unwrap();
        let ahead = round.snakes[0].head().moved_by(2, 0);
        round.obstacles.push(Obstacle { position: ahead });
        run_ticks(&mut flow, now, 2);

        let Phase::GameOver(result) = flow.phase() else {
            panic!("expected game over");
        };
        assert_eq!(result.outcome, Outcome::Winner(PlayerId::One));
    }

    #[test]
    fn test_duo_head_on_is_a_tie() {
        // 41 columns: heads at x=5 and x=35 meet on x=20 after 15 ticks
        let mut flow = GameFlow::new(
            GameConfig {
                seed: Some(3),
                ..GameConfig::new(41, 30)
            },
            MemoryRecordStore::new(),
        );
        let start = Instant::now();
        playing(&mut flow, GameMode::Duo, start);

        let now = run_ticks(&mut flow, start, 14);
        assert_eq!(flow.phase, Phase::Playing);
        run_ticks(&mut flow, now, 1);

        let round = flow.round().unwrap();
        assert_eq!(round.snakes[0].head(), round.snakes[1].head());
        assert!(!round.snakes[0].alive && !round.snakes[1].alive);

        let Phase::GameOver(result) = flow.phase() else {
            panic!("expected game over");
        };
        assert_eq!(result.outcome, Outcome::Tie);
        assert_eq!(result.scores, vec![0, 0]);
        assert_eq!(
            flow.drain_cues(),
            vec![SoundCue::Crash, SoundCue::Crash]
        );
    }

    /// Block the cell in front of every snake so the next tick ends the round
    fn crash_all(flow: &mut GameFlow<MemoryRecordStore>) {
        let round = flow.round.as_mut().unwrap();
        for snake in round.snakes.iter() {
            let ahead = snake.head().moved_in_direction(snake.direction);
            round.obstacles.push(Obstacle { position: ahead });
        }
    }

    #[test]
    fn test_duo_best_score_is_max_across_players() {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, GameMode::Duo, start);

        flow.round.as_mut().unwrap().scores = vec![3, 9];
        crash_all(&mut flow);
        let now = run_ticks(&mut flow, start, 1);

        let Phase::GameOver(result) = flow.phase() else {
            panic!("expected game over");
        };
        assert_eq!(result.scores, vec![3, 9]);
        assert_eq!(result.best_score, 9);
        assert!(result.new_best_score);
        assert_eq!(flow.best_score(), 9);
        assert_eq!(flow.records().best_score, Some(9));
        assert_eq!(flow.records().saves, 2);

        // A later duo round with a lower maximum leaves the record alone
        flow.handle_key(KeyAction::Restart, now);
        flow.handle_key(KeyAction::Confirm, now);
        assert_eq!(flow.phase, Phase::Playing);
        assert_eq!(flow.mode(), GameMode::Duo);

        flow.round.as_mut().unwrap().scores = vec![4, 2];
        crash_all(&mut flow);
        run_ticks(&mut flow, now, 1);

        let Phase::GameOver(result) = flow.phase() else {
            panic!("expected game over");
        };
        assert_eq!(result.best_score, 4);
        assert!(!result.new_best_score);
        assert_eq!(flow.best_score(), 9);
        assert_eq!(flow.records().best_score, Some(9));
        assert_eq!(flow.records().saves, 2);
    }

    fn finished(mode: GameMode) -> GameFlow<MemoryRecordStore> {
        let mut flow = flow();
        let start = Instant::now();
        playing(&mut flow, mode, start);
        crash_all(&mut flow);
        run_ticks(&mut flow, start, 1);
        assert!(matches!(flow.phase, Phase::GameOver(_)));
        flow
    }

    #[test]
    fn test_restart_keeps_mode() {
        let mut flow = finished(GameMode::Duo);
        let now = Instant::now();

        flow.handle_key(KeyAction::Restart, now);
        assert_eq!(
            flow.phase,
            Phase::DifficultySelect {
                selection: Difficulty::Medium
            }
        );
        assert_eq!(flow.mode(), GameMode::Duo);

        flow.handle_key(KeyAction::Choose(0), now);
        assert_eq!(flow.phase, Phase::Playing);
        assert_eq!(flow.difficulty(), Difficulty::Slow);
        assert_eq!(flow.round().unwrap().snakes.len(), 2);
        assert!(flow.round().unwrap().any_alive());
    }

    #[test]
    fn test_return_to_menu() {
        let mut flow = finished(GameMode::Duo);
        flow.handle_key(KeyAction::Menu, Instant::now());
        assert_eq!(
            flow.phase,
            Phase::Menu {
                selection: GameMode::Duo
            }
        );
        assert!(flow.round().is_none());
    }

    #[test]
    fn test_game_over_ignores_pause_and_steering() {
        let mut flow = finished(GameMode::Solo);
        let now = Instant::now();
        flow.handle_key(KeyAction::Pause, now);
        flow.handle_key(KeyAction::Steer(PlayerId::One, Direction::Up), now);
        assert!(matches!(flow.phase, Phase::GameOver(_)));
        assert!(!flow.update(now + Duration::from_secs(5)));
    }
}
