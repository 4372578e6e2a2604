//! Scene definitions - presentation, costs, choices and transitions.
//!
//! A scene is a list of [`Beat`]s. Beats at offset zero run on entry; later
//! beats are timed reveals scheduled relative to entry. Choices are
//! evaluated against the current [`GameState`] when they are offered, never
//! stored as mutable UI state.

use game_rules::{EndingKind, GameState, Item, StatDelta};

use super::SceneId;
use crate::presentation::{ChoiceView, Sprite};

/// A predicate over the game state, used for conditional text and choices.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Always,
    Has(Item),
    Lacks(Item),
    /// Car condition strictly below the value.
    CarBelow(u8),
    Not(Box<Condition>),
    All(Vec<Condition>),
}

impl Condition {
    pub fn holds(&self, state: &GameState) -> bool {
        match self {
            Condition::Always => true,
            Condition::Has(item) => state.has(*item),
            Condition::Lacks(item) => !state.has(*item),
            Condition::CarBelow(limit) => state.resources().car_condition < *limit,
            Condition::Not(inner) => !inner.holds(state),
            Condition::All(conditions) => conditions.iter().all(|c| c.holds(state)),
        }
    }

    pub fn negate(self) -> Self {
        Condition::Not(Box::new(self))
    }
}

/// Story text, possibly depending on the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Narration {
    Fixed(String),
    Conditional {
        when: Condition,
        then: String,
        otherwise: String,
    },
}

impl Narration {
    pub fn fixed(text: impl Into<String>) -> Self {
        Narration::Fixed(text.into())
    }

    pub fn conditional(
        when: Condition,
        then: impl Into<String>,
        otherwise: impl Into<String>,
    ) -> Self {
        Narration::Conditional {
            when,
            then: then.into(),
            otherwise: otherwise.into(),
        }
    }

    /// Pick the text for the current state.
    pub fn render(&self, state: &GameState) -> &str {
        match self {
            Narration::Fixed(text) => text.as_str(),
            Narration::Conditional {
                when,
                then,
                otherwise,
            } => {
                if when.holds(state) {
                    then.as_str()
                } else {
                    otherwise.as_str()
                }
            }
        }
    }
}

/// State changes other than costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Grant(Item),
    /// Absolute, not additive.
    SetCarCondition(u8),
}

/// How the story moves on.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Enter a scene right away.
    Goto(SceneId),
    /// Follow another transition after a delay.
    After {
        delay_ms: u64,
        then: Box<Transition>,
    },
    /// Roll once; `hit` iff the roll is below `chance`.
    Chance {
        chance: f64,
        hit: Box<Transition>,
        miss: Box<Transition>,
    },
    /// End the night.
    End(EndingKind),
}

impl Transition {
    pub fn after(delay_ms: u64, then: Transition) -> Self {
        Transition::After {
            delay_ms,
            then: Box::new(then),
        }
    }

    pub fn chance(chance: f64, hit: Transition, miss: Transition) -> Self {
        Transition::Chance {
            chance,
            hit: Box::new(hit),
            miss: Box::new(miss),
        }
    }

    /// Every scene this transition can lead to.
    pub fn targets(&self) -> Vec<SceneId> {
        match self {
            Transition::Goto(id) => vec![*id],
            Transition::After { then, .. } => then.targets(),
            Transition::Chance { hit, miss, .. } => {
                let mut targets = hit.targets();
                targets.extend(miss.targets());
                targets
            }
            Transition::End(_) => Vec::new(),
        }
    }
}

/// One step of a scene: applied in the order effects, image, text, cost,
/// choices, transition. A cost that ends or strands the night stops the
/// beat before its choices and transition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Beat {
    /// Offset from scene entry.
    pub at_ms: u64,
    pub effects: Vec<Effect>,
    pub image: Option<(Sprite, bool)>,
    pub text: Option<Narration>,
    pub cost: Option<StatDelta>,
    /// `Some(vec![])` clears the choice list; `None` leaves it alone.
    pub choices: Option<Vec<ChoiceSpec>>,
    pub then: Option<Transition>,
}

impl Beat {
    /// A beat that runs on entry.
    pub fn now() -> Self {
        Self::default()
    }

    /// A beat that runs `at_ms` after entry.
    pub fn at(at_ms: u64) -> Self {
        Self {
            at_ms,
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_image(mut self, sprite: Sprite) -> Self {
        self.image = Some((sprite, false));
        self
    }

    pub fn with_glitch_image(mut self, sprite: Sprite) -> Self {
        self.image = Some((sprite, true));
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_narration(Narration::fixed(text))
    }

    pub fn with_narration(mut self, narration: Narration) -> Self {
        self.text = Some(narration);
        self
    }

    pub fn with_cost(mut self, cost: StatDelta) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_choices(mut self, choices: impl IntoIterator<Item = ChoiceSpec>) -> Self {
        self.choices = Some(choices.into_iter().collect());
        self
    }

    pub fn clearing_choices(mut self) -> Self {
        self.choices = Some(Vec::new());
        self
    }

    pub fn then(mut self, transition: Transition) -> Self {
        self.then = Some(transition);
        self
    }
}

/// A choice a scene may offer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceSpec {
    pub label: String,
    /// Hidden entirely when false.
    pub visible: Condition,
    /// Shown but not selectable when false.
    pub enabled: Condition,
    /// What happens on selection.
    pub outcome: Beat,
}

impl ChoiceSpec {
    pub fn new(label: impl Into<String>, outcome: Beat) -> Self {
        Self {
            label: label.into(),
            visible: Condition::Always,
            enabled: Condition::Always,
            outcome,
        }
    }

    /// A choice that only moves the story on.
    pub fn leads_to(label: impl Into<String>, transition: Transition) -> Self {
        Self::new(label, Beat::now().then(transition))
    }

    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible = condition;
        self
    }

    pub fn enabled_when(mut self, condition: Condition) -> Self {
        self.enabled = condition;
        self
    }

    /// Evaluate against the state; `None` if hidden.
    pub fn render(&self, state: &GameState) -> Option<ChoiceView> {
        self.visible
            .holds(state)
            .then(|| ChoiceView::new(self.label.clone(), self.enabled.holds(state)))
    }
}

/// A node of the narrative graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: SceneId,
    pub beats: Vec<Beat>,
}

impl Scene {
    pub fn new(id: SceneId) -> Self {
        Self {
            id,
            beats: Vec::new(),
        }
    }

    pub fn with_beat(mut self, beat: Beat) -> Self {
        self.beats.push(beat);
        self
    }

    /// Every scene reachable in one step, through beats or choices.
    pub fn targets(&self) -> Vec<SceneId> {
        let mut targets = Vec::new();
        for beat in &self.beats {
            collect_beat_targets(beat, &mut targets);
        }
        targets
    }
}

fn collect_beat_targets(beat: &Beat, targets: &mut Vec<SceneId>) {
    if let Some(transition) = &beat.then {
        targets.extend(transition.targets());
    }
    for choice in beat.choices.iter().flatten() {
        collect_beat_targets(&choice.outcome, targets);
    }
}
