//! Game session - the controller that owns a player's nights.
//!
//! A session reacts to two event sources, player choices and timer jobs,
//! one at a time. Every handler re-checks that its night is still the
//! current one and still active, so whichever stream ends the night first
//! wins and everything queued behind it becomes a no-op.

use std::rc::Rc;

use game_rules::{DeltaOutcome, EndingKind, GameConfig, GameState, SessionId, StatDelta};
use log::{debug, info, trace, warn};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::graph::{Beat, ChoiceSpec, Effect, SceneGraph, SceneId, Transition, STRANDED_TEXT};
use crate::presentation::{ChoiceView, Presentation};
use crate::resolver::{EndingPayload, PLAY_AGAIN_LABEL};
use crate::scheduler::{ClockHandle, Job, ScheduledJob, Scheduler};

/// Result of [`GameSession::select_choice`]. Rejections change nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceOutcome {
    Accepted,
    /// The ending's restart choice was taken.
    Restarted,
    /// The night is over.
    Inactive,
    OutOfRange,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

#[derive(Debug, Clone)]
enum ChoiceAction {
    Play(Beat),
    Restart,
}

#[derive(Debug, Clone)]
struct OfferedChoice {
    view: ChoiceView,
    action: ChoiceAction,
}

/// Drives the narrative graph for one player.
///
/// Time is virtual: hosts call [`GameSession::advance`] with the real time
/// that passed, and tests call it directly.
pub struct GameSession<P: Presentation> {
    config: GameConfig,
    graph: Rc<SceneGraph>,
    state: GameState,
    scheduler: Scheduler,
    clock: ClockHandle,
    rng: Box<dyn RngCore>,
    presentation: P,
    scene: Option<SceneId>,
    offered: Vec<OfferedChoice>,
    started: bool,
}

impl<P: Presentation> GameSession<P> {
    /// Create a session with an explicit random source. Call
    /// [`GameSession::start`] to begin.
    pub fn new(config: GameConfig, presentation: P, rng: impl RngCore + 'static) -> Self {
        let graph = Rc::new(SceneGraph::standard(&config));
        let state = GameState::new(&config);
        let clock = ClockHandle::new(state.id());
        Self {
            config,
            graph,
            state,
            scheduler: Scheduler::new(),
            clock,
            rng: Box::new(rng),
            presentation,
            scene: None,
            offered: Vec::new(),
            started: false,
        }
    }

    /// Create a session whose rolls are reproducible from `seed`.
    pub fn with_seed(config: GameConfig, presentation: P, seed: u64) -> Self {
        Self::new(config, presentation, ChaCha20Rng::seed_from_u64(seed))
    }

    /// Create a session seeded from the operating system.
    pub fn with_entropy(config: GameConfig, presentation: P) -> Self {
        Self::new(config, presentation, ChaCha20Rng::from_entropy())
    }

    /// Replace the first night's state before starting.
    pub fn with_state(mut self, state: GameState) -> Self {
        self.clock = ClockHandle::new(state.id());
        self.state = state;
        self
    }

    /// Arm the clock, publish the status line and enter the sighting.
    pub fn start(&mut self) {
        if self.started {
            warn!("night {} already started", self.state.id());
            return;
        }
        self.started = true;
        info!("night {} begins", self.state.id());

        self.scheduler
            .schedule(self.config.clock_interval_ms, self.state.id(), Job::ClockTick);
        self.publish_status();
        self.enter(SceneId::Sighting);
    }

    /// Input gateway: the player picked the choice at `index`.
    pub fn select_choice(&mut self, index: usize) -> ChoiceOutcome {
        let Some(choice) = self.offered.get(index) else {
            debug!("ignoring choice {index}: only {} offered", self.offered.len());
            return ChoiceOutcome::OutOfRange;
        };
        if !choice.view.enabled {
            debug!("ignoring disabled choice '{}'", choice.view.label);
            return ChoiceOutcome::Disabled;
        }

        match choice.action.clone() {
            ChoiceAction::Restart => {
                self.restart();
                ChoiceOutcome::Restarted
            }
            ChoiceAction::Play(beat) => {
                if !self.state.is_active() {
                    return ChoiceOutcome::Inactive;
                }
                debug!("chose '{}'", choice.view.label);
                self.clear_choices();
                self.run_beat(&beat);
                ChoiceOutcome::Accepted
            }
        }
    }

    /// Let `elapsed_ms` of time pass, running every job that falls due.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some(job) = self.scheduler.pop_due(until) {
            self.dispatch(job);
        }
        self.scheduler.advance_to(until);
    }

    /// Throw the current night away and begin a fresh one.
    ///
    /// Jobs from the old night stay queued but can never match the new
    /// night's session id.
    pub fn restart(&mut self) {
        info!("restarting after night {}", self.state.id());
        self.presentation.on_restart();
        self.state = GameState::new(&self.config);
        self.clock = ClockHandle::new(self.state.id());
        self.scene = None;
        self.offered.clear();
        self.started = false;
        self.start();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn ending(&self) -> Option<EndingKind> {
        self.state.ending()
    }

    /// The scene most recently entered.
    pub fn current_scene(&self) -> Option<SceneId> {
        self.scene
    }

    /// Choices currently offered.
    pub fn choices(&self) -> Vec<ChoiceView> {
        self.offered.iter().map(|choice| choice.view.clone()).collect()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Jobs still queued, including stale ones.
    pub fn pending_jobs(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    fn dispatch(&mut self, scheduled: ScheduledJob) {
        if scheduled.token != self.state.id() {
            trace!("dropping {:?} from night {}", scheduled.job, scheduled.token);
            return;
        }
        if !self.state.is_active() {
            trace!("dropping {:?}: night is over", scheduled.job);
            return;
        }

        match scheduled.job {
            Job::ClockTick => self.on_clock_tick(scheduled.token),
            Job::Beat { scene, index } => self.run_timed_beat(scene, index),
            Job::Transition(transition) => self.follow(&transition),
        }
    }

    fn on_clock_tick(&mut self, token: SessionId) {
        if !self.clock.is_live_for(token) {
            return;
        }
        let dawn = self.state.advance_clock();
        self.publish_status();
        if dawn {
            self.resolve_ending(EndingKind::Survived);
        } else {
            self.scheduler
                .schedule(self.config.clock_interval_ms, token, Job::ClockTick);
        }
    }

    fn enter(&mut self, id: SceneId) {
        if !self.state.is_active() {
            return;
        }
        let graph = Rc::clone(&self.graph);
        let Some(scene) = graph.scene(id) else {
            warn!("no scene registered for {id}");
            return;
        };

        debug!("entering {id}");
        self.scene = Some(id);
        let token = self.state.id();

        for (index, beat) in scene.beats.iter().enumerate() {
            if beat.at_ms > 0 {
                self.scheduler
                    .schedule(beat.at_ms, token, Job::Beat { scene: id, index });
                continue;
            }
            if self.run_beat(beat) == Flow::Halt || self.scene != Some(id) {
                return;
            }
        }
    }

    fn run_timed_beat(&mut self, id: SceneId, index: usize) {
        let graph = Rc::clone(&self.graph);
        let Some(beat) = graph.scene(id).and_then(|scene| scene.beats.get(index)) else {
            warn!("no beat {index} in {id}");
            return;
        };
        debug!("{id}: beat {index} at +{}ms", beat.at_ms);
        self.run_beat(beat);
    }

    fn run_beat(&mut self, beat: &Beat) -> Flow {
        if !self.state.is_active() {
            return Flow::Halt;
        }

        for effect in &beat.effects {
            self.apply_effect(*effect);
        }
        if let Some((sprite, glitch)) = beat.image {
            self.presentation.display_image(sprite, glitch);
        }
        if let Some(narration) = &beat.text {
            let markup = narration.render(&self.state);
            self.presentation.display_text(markup);
        }
        if let Some(cost) = beat.cost {
            if self.apply_cost(cost) == Flow::Halt {
                return Flow::Halt;
            }
        }
        if let Some(choices) = &beat.choices {
            self.offer(choices);
        }
        if let Some(transition) = &beat.then {
            self.follow(transition);
        }
        Flow::Continue
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Grant(item) => {
                if self.state.grant(item) {
                    debug!("picked up {item:?}");
                }
            }
            Effect::SetCarCondition(value) => {
                self.state.set_car_condition(value);
            }
        }
    }

    /// Resource model call: subtract, publish, then react to thresholds.
    fn apply_cost(&mut self, delta: StatDelta) -> Flow {
        if !self.state.is_active() {
            return Flow::Halt;
        }
        let outcome = self.state.apply_delta(delta);
        self.publish_status();

        match outcome {
            DeltaOutcome::Stable => Flow::Continue,
            DeltaOutcome::AlreadyEnded => Flow::Halt,
            DeltaOutcome::Ended(kind) => {
                self.resolve_ending(kind);
                Flow::Halt
            }
            DeltaOutcome::Stranded => {
                info!("night {} stranded without fuel", self.state.id());
                self.presentation.display_text(STRANDED_TEXT);
                self.clear_choices();
                self.scheduler.schedule(
                    self.config.stranded_delay_ms,
                    self.state.id(),
                    Job::Transition(Transition::Goto(SceneId::OnFoot)),
                );
                Flow::Halt
            }
        }
    }

    fn follow(&mut self, transition: &Transition) {
        if !self.state.is_active() {
            return;
        }
        match transition {
            Transition::Goto(id) => self.enter(*id),
            Transition::After { delay_ms, then } => {
                self.scheduler.schedule(
                    *delay_ms,
                    self.state.id(),
                    Job::Transition((**then).clone()),
                );
            }
            Transition::Chance { chance, hit, miss } => {
                let roll: f64 = self.rng.gen();
                let hits = roll < *chance;
                debug!("rolled {roll:.3} against {chance:.2}: {}", if hits { "hit" } else { "miss" });
                self.follow(if hits { hit } else { miss });
            }
            Transition::End(kind) => self.resolve_ending(*kind),
        }
    }

    /// Ending resolver. Only the first ending of a night has any effect.
    fn resolve_ending(&mut self, kind: EndingKind) {
        if !self.state.terminate(kind) {
            return;
        }
        info!("night {} ended: {kind}", self.state.id());
        self.clock.cancel();
        self.clear_choices();

        let payload = EndingPayload::for_kind(kind);
        self.presentation.display_image(payload.sprite, payload.glitch);
        self.presentation.display_text(payload.text);

        self.offered = vec![OfferedChoice {
            view: ChoiceView::new(PLAY_AGAIN_LABEL, true),
            action: ChoiceAction::Restart,
        }];
        self.publish_choices();
    }

    fn offer(&mut self, choices: &[ChoiceSpec]) {
        self.offered = choices
            .iter()
            .filter_map(|spec| {
                spec.render(&self.state).map(|view| OfferedChoice {
                    view,
                    action: ChoiceAction::Play(spec.outcome.clone()),
                })
            })
            .collect();
        self.publish_choices();
    }

    fn clear_choices(&mut self) {
        self.offered.clear();
        self.publish_choices();
    }

    fn publish_choices(&mut self) {
        let views = self.choices();
        self.presentation.set_choices(&views);
    }

    fn publish_status(&mut self) {
        let line = self.state.status_line();
        self.presentation.display_status(&line);
    }
}
