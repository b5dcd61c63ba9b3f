//! Step navigation and the wizard state machine
//!
//! States are `Step(1)..Step(n)` plus terminal `Submitted`. Advancing
//! requires the current step to validate; retreating and resetting do not.

use super::validation::validate_step;
use super::{Form, RegistrationForm, Summary};
use std::time::{Duration, Instant};

/// Direction of the last step change; picks the slide-in animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationDirection {
    #[default]
    Forward,
    Backward,
}

/// Visual state of a step indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

/// Result of an advance request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next step
    Moved,
    /// Current step was the last one; submission should follow
    Finished,
    /// Current step failed validation
    Blocked,
}

/// Panel slide-in after a step change
#[derive(Debug, Clone, Copy)]
struct Transition {
    direction: NavigationDirection,
    started: Instant,
}

/// Everything the UI needs to draw navigation chrome
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub current: usize,
    pub indicators: Vec<StepStatus>,
    /// `(current - 1) / (total - 1)`
    pub progress: f64,
    pub primary_label: &'static str,
    pub show_back: bool,
    pub direction: NavigationDirection,
    /// Horizontal panel offset as a fraction of the panel width.
    /// Positive slides in from the right, negative from the left.
    pub slide: f32,
}

/// Owns the current step index
#[derive(Debug, Clone)]
pub struct StepController {
    current: usize,
    total: usize,
    direction: NavigationDirection,
    transition: Option<Transition>,
    transition_duration: Duration,
}

impl StepController {
    /// Duration of the panel slide-in
    pub const TRANSITION_DURATION: Duration = Duration::from_millis(250);

    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
            direction: NavigationDirection::Forward,
            transition: None,
            transition_duration: Self::TRANSITION_DURATION,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Move forward if the current step is valid
    pub fn advance(&mut self, step_valid: bool, now: Instant) -> Advance {
        if !step_valid {
            return Advance::Blocked;
        }
        if self.is_last() {
            return Advance::Finished;
        }
        self.current += 1;
        self.start_transition(NavigationDirection::Forward, now);
        Advance::Moved
    }

    /// Move back one step. Returns false on the first step.
    pub fn retreat(&mut self, now: Instant) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        self.start_transition(NavigationDirection::Backward, now);
        true
    }

    /// Return to step 1 without animation
    pub fn reset(&mut self) {
        self.current = 1;
        self.direction = NavigationDirection::Forward;
        self.transition = None;
    }

    fn start_transition(&mut self, direction: NavigationDirection, now: Instant) {
        self.direction = direction;
        self.transition = Some(Transition {
            direction,
            started: now,
        });
    }

    /// Whether the panel is still sliding in at `now`
    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition
            .is_some_and(|t| now.saturating_duration_since(t.started) < self.transition_duration)
    }

    fn slide(&self, now: Instant) -> f32 {
        let Some(transition) = self.transition else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(transition.started);
        if elapsed >= self.transition_duration {
            return 0.0;
        }
        let progress = elapsed.as_secs_f32() / self.transition_duration.as_secs_f32();
        // Cubic ease-out: fast start, settles gently
        let remaining = 1.0 - simple_easing::cubic_out(progress);
        match transition.direction {
            NavigationDirection::Forward => remaining,
            NavigationDirection::Backward => -remaining,
        }
    }

    /// Compute indicator, progress and button state
    pub fn view(&self, now: Instant) -> StepView {
        let indicators = (1..=self.total)
            .map(|index| match index.cmp(&self.current) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Active,
                std::cmp::Ordering::Greater => StepStatus::Pending,
            })
            .collect();
        let progress = if self.total > 1 {
            (self.current - 1) as f64 / (self.total - 1) as f64
        } else {
            1.0
        };

        StepView {
            current: self.current,
            indicators,
            progress,
            primary_label: if self.is_last() { "Submit" } else { "Next" },
            show_back: !self.is_first(),
            direction: self.direction,
            slide: self.slide(now),
        }
    }
}

/// Whether the form is being filled in or has been submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardPhase {
    #[default]
    Editing,
    Submitted,
}

/// Outcome of a "Next" press, for the caller to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced,
    Submitted,
    Blocked,
    /// Already submitted; nothing to do
    Ignored,
}

/// Form, step controller and summary composed into one session
#[derive(Debug, Clone)]
pub struct Wizard {
    pub form: RegistrationForm,
    pub steps: StepController,
    phase: WizardPhase,
    summary: Option<Summary>,
}

impl Wizard {
    pub fn new() -> Self {
        let form = RegistrationForm::new();
        let steps = StepController::new(form.total_steps());
        Self {
            form,
            steps,
            phase: WizardPhase::Editing,
            summary: None,
        }
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == WizardPhase::Submitted
    }

    /// Summary slots, present while the final step is shown
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Validate the current step, then advance or submit
    pub fn next(&mut self, now: Instant) -> NextOutcome {
        if self.is_submitted() {
            return NextOutcome::Ignored;
        }
        let current = self.steps.current();
        let valid = validate_step(&mut self.form, current);
        match self.steps.advance(valid, now) {
            Advance::Blocked => NextOutcome::Blocked,
            Advance::Moved => {
                tracing::info!("Advanced to step {}", self.steps.current());
                self.on_step_changed();
                NextOutcome::Advanced
            }
            Advance::Finished => {
                self.submit();
                NextOutcome::Submitted
            }
        }
    }

    /// Go back one step; never validates
    pub fn prev(&mut self, now: Instant) -> bool {
        if self.is_submitted() || !self.steps.retreat(now) {
            return false;
        }
        tracing::info!("Returned to step {}", self.steps.current());
        self.on_step_changed();
        true
    }

    fn on_step_changed(&mut self) {
        let current = self.steps.current();
        self.form.focus_step(current);
        self.summary = self
            .steps
            .is_last()
            .then(|| Summary::from_form(&self.form));
    }

    /// Hide the form and enter the terminal state
    fn submit(&mut self) {
        tracing::info!("Form submitted");
        self.phase = WizardPhase::Submitted;
    }

    /// Clear all values and return to step 1
    pub fn reset(&mut self) {
        tracing::info!("Form reset");
        self.form.clear();
        self.steps.reset();
        self.phase = WizardPhase::Editing;
        self.summary = None;
    }

    /// Apply an edit to the active field. Returns true if the value changed,
    /// in which case the field's error is cleared.
    pub fn edit_active_field(&mut self, edit: impl FnOnce(&mut super::FormField) -> bool) -> bool {
        if self.is_submitted() {
            return false;
        }
        let Some(field) = self.form.get_active_field_mut() else {
            return false;
        };
        let changed = edit(field);
        if changed {
            field.error = None;
        }
        changed
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}
