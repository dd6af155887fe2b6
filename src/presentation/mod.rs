//! Presentation domain: sequences achievement completions into a series
//! of beats a frontend can animate.
//!
//! After every player action the achievement engine is consulted. A
//! completion plays out as: day-transition animation (if a day just
//! rolled over), the achievement's dialogue (if it has one), the reward
//! claim with unlock animations, then HUD toasts. Only when the whole
//! sequence has drained does the next check run, so a single action that
//! satisfies several achievements presents them one at a time.

use crate::achievements;
use crate::shared::*;
use bevy::prelude::*;

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PresentationSequence>()
            .add_event::<ActionCompletedEvent>()
            .add_event::<ResolveDayTransitionEvent>()
            .add_event::<ResolveDialogueEvent>()
            .add_event::<UnlockAnimationEvent>()
            .add_event::<ToastEvent>()
            .add_systems(OnEnter(AppState::Playing), kick_off)
            .add_systems(
                Update,
                (
                    handle_action_completed,
                    handle_resolve_day_transition,
                    handle_resolve_dialogue,
                    advance_sequence,
                )
                    .chain()
                    .run_if(in_state(AppState::Playing)),
            );
    }
}

/// Where the current achievement sequence stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Beat {
    #[default]
    Idle,
    /// Waiting for the frontend to finish the day-rollover animation.
    DayTransition,
    /// Waiting for the player to dismiss the dialogue.
    Dialogue,
    /// Reward claim and unlock animations fire here.
    Unlocks,
    /// HUD toasts fire here, then the sequence drains.
    Toasts,
}

#[derive(Resource, Debug, Default)]
pub struct PresentationSequence {
    pub beat: Beat,
    pub achievement_id: Option<String>,
}

impl PresentationSequence {
    pub fn is_idle(&self) -> bool {
        self.beat == Beat::Idle
    }
}

/// Everything one `advance` step asks the frontend to show.
#[derive(Debug, Default)]
pub struct PresentationOutput {
    pub unlocked_actions: Vec<ActionType>,
    pub toasts: Vec<(ToastKind, String)>,
    /// Set when the sequence drained and achievements should be
    /// re-checked for a follow-up completion.
    pub recheck: bool,
}

/// Consults the achievement engine and, on a completion, opens a new
/// sequence. No-op while a sequence (or an unclaimed reward) is live.
pub fn try_begin_sequence(
    state: &mut GameState,
    seq: &mut PresentationSequence,
    registry: &AchievementRegistry,
) -> bool {
    if !seq.is_idle() || state.pending_dialogue.is_some() {
        return false;
    }
    let Some(id) = achievements::check_achievements(state, registry) else {
        return false;
    };
    seq.achievement_id = Some(id);
    seq.beat = Beat::DayTransition;
    true
}

/// Advances the sequence by at most one beat. Beats that wait on the
/// frontend (day transition, dialogue) hold until the matching pending
/// marker clears.
pub fn advance_sequence_step(
    state: &mut GameState,
    seq: &mut PresentationSequence,
    registry: &AchievementRegistry,
    out: &mut PresentationOutput,
) {
    let Some(id) = seq.achievement_id.clone() else {
        return;
    };
    match seq.beat {
        Beat::Idle => {}
        Beat::DayTransition => {
            if state.pending_day_transition.is_some() {
                return;
            }
            let dialogue = registry.get(&id).and_then(|def| def.dialogue.clone());
            if let Some(dialogue) = dialogue {
                state.pending_dialogue = Some(dialogue);
                seq.beat = Beat::Dialogue;
            } else {
                seq.beat = Beat::Unlocks;
            }
        }
        Beat::Dialogue => {
            if state.pending_dialogue.is_some() {
                return;
            }
            seq.beat = Beat::Unlocks;
        }
        Beat::Unlocks => {
            if let Some(claimed) = achievements::claim_reward(state, registry) {
                out.unlocked_actions = claimed.unlocked_actions;
            }
            seq.beat = Beat::Toasts;
        }
        Beat::Toasts => {
            if let Some(def) = registry.get(&id) {
                if def.important {
                    out.toasts
                        .push((ToastKind::GoalComplete, format!("Goal complete: {}", def.title)));
                }
            }
            for goal in achievements::newly_active_goals(state, registry, &id) {
                out.toasts
                    .push((ToastKind::GoalActive, format!("New goal: {}", goal.title)));
            }
            seq.beat = Beat::Idle;
            seq.achievement_id = None;
            out.recheck = true;
        }
    }
}

// ─── Systems ───────────────────────────────────────────────────────────

/// New games open on whatever auto-complete achievements are seeded.
fn kick_off(mut completed: EventWriter<ActionCompletedEvent>) {
    completed.send(ActionCompletedEvent);
}

fn handle_action_completed(
    mut events: EventReader<ActionCompletedEvent>,
    mut state: ResMut<GameState>,
    mut seq: ResMut<PresentationSequence>,
    registry: Res<AchievementRegistry>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    if try_begin_sequence(&mut state, &mut seq, &registry) {
        info!("[Presentation] sequence started: {:?}", seq.achievement_id);
    }
}

fn handle_resolve_day_transition(
    mut events: EventReader<ResolveDayTransitionEvent>,
    mut state: ResMut<GameState>,
) {
    if !events.is_empty() {
        events.clear();
        state.pending_day_transition = None;
    }
}

fn handle_resolve_dialogue(
    mut events: EventReader<ResolveDialogueEvent>,
    mut state: ResMut<GameState>,
) {
    if !events.is_empty() {
        events.clear();
        state.pending_dialogue = None;
    }
}

fn advance_sequence(
    mut state: ResMut<GameState>,
    mut seq: ResMut<PresentationSequence>,
    registry: Res<AchievementRegistry>,
    mut unlocks: EventWriter<UnlockAnimationEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut completed: EventWriter<ActionCompletedEvent>,
) {
    let mut out = PresentationOutput::default();
    advance_sequence_step(&mut state, &mut seq, &registry, &mut out);
    for action in out.unlocked_actions {
        unlocks.send(UnlockAnimationEvent { action });
    }
    for (kind, message) in out.toasts {
        toasts.send(ToastEvent { kind, message });
    }
    if out.recheck {
        completed.send(ActionCompletedEvent);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════
