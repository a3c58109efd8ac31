use serde::Serialize;
use crate::events::{Feedback, Haptic, Notice};


pub const DEFAULT_CANCEL_DISTANCE: f64 = 80.0;


#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VoicePhase {
    #[default]
    Idle,
    Recording { start_y: f64, cancel_pending: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceOutcome {
    Sent,
    Cancelled,
}

// Result of feeding one input to the tracker
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoiceReaction {
    pub outcome: Option<VoiceOutcome>,
    pub feedback: Vec<Feedback>,
}

impl VoiceReaction {
    fn ignored() -> Self {
        Self::default()
    }

    fn feedback(feedback: Vec<Feedback>) -> Self {
        Self { outcome: None, feedback }
    }

    fn finished(outcome: VoiceOutcome, feedback: Vec<Feedback>) -> Self {
        Self { outcome: Some(outcome), feedback }
    }
}

// Press-and-hold voice gesture with slide-up-to-cancel. Inputs return the
// feedback to emit rather than calling the toast or haptic side directly.
#[derive(Debug, Clone)]
pub struct VoiceGestureTracker {
    phase: VoicePhase,
    cancel_distance: f64,
}

impl Default for VoiceGestureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CANCEL_DISTANCE)
    }
}

impl VoiceGestureTracker {
    pub fn new(cancel_distance: f64) -> Self {
        Self { phase: VoicePhase::Idle, cancel_distance }
    }

    pub fn phase(&self) -> VoicePhase {
        self.phase
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.phase, VoicePhase::Recording { .. })
    }

    pub fn cancel_pending(&self) -> bool {
        matches!(self.phase, VoicePhase::Recording { cancel_pending: true, .. })
    }

    // A press without a touch point anchors at y = 0
    pub fn press(&mut self, touch_y: Option<f64>) -> VoiceReaction {
        self.phase = VoicePhase::Recording {
            start_y: touch_y.unwrap_or(0.0),
            cancel_pending: false,
        };
        VoiceReaction::feedback(vec![Feedback::Vibrate(Haptic::Medium)])
    }

    pub fn move_to(&mut self, touch_y: Option<f64>) -> VoiceReaction {
        let VoicePhase::Recording { start_y, cancel_pending } = self.phase else {
            return VoiceReaction::ignored();
        };
        let Some(y) = touch_y else {
            return VoiceReaction::ignored();
        };

        let should_cancel = start_y - y > self.cancel_distance;
        if should_cancel == cancel_pending {
            return VoiceReaction::ignored();
        }

        self.phase = VoicePhase::Recording { start_y, cancel_pending: should_cancel };
        if should_cancel {
            VoiceReaction::feedback(vec![Feedback::Vibrate(Haptic::Light)])
        } else {
            VoiceReaction::ignored()
        }
    }

    pub fn release(&mut self) -> VoiceReaction {
        let VoicePhase::Recording { cancel_pending, .. } = self.phase else {
            return VoiceReaction::ignored();
        };
        self.phase = VoicePhase::Idle;

        let haptic = Feedback::Vibrate(Haptic::Light);
        if cancel_pending {
            VoiceReaction::finished(
                VoiceOutcome::Cancelled,
                vec![haptic, Feedback::Notify(Notice::plain("Cancelled"))],
            )
        } else {
            VoiceReaction::finished(
                VoiceOutcome::Sent,
                vec![haptic, Feedback::Notify(Notice::success("Voice message sent"))],
            )
        }
    }

    // Explicit cancel button, honoured in every phase
    pub fn cancel(&mut self) -> VoiceReaction {
        self.phase = VoicePhase::Idle;
        VoiceReaction::finished(
            VoiceOutcome::Cancelled,
            vec![
                Feedback::Vibrate(Haptic::Heavy),
                Feedback::Notify(Notice::plain("Cancelled")),
            ],
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn haptics(reaction: &VoiceReaction) -> Vec<Haptic> {
        reaction
            .feedback
            .iter()
            .filter_map(|f| match f {
                Feedback::Vibrate(h) => Some(*h),
                Feedback::Notify(_) => None,
            })
            .collect()
    }

    #[test]
    fn press_starts_recording_with_medium_haptic() {
        let mut tracker = VoiceGestureTracker::default();
        let reaction = tracker.press(Some(600.0));
        assert_eq!(haptics(&reaction), vec![Haptic::Medium]);
        assert_eq!(
            tracker.phase(),
            VoicePhase::Recording { start_y: 600.0, cancel_pending: false }
        );
    }

    #[test]
    fn slide_up_past_threshold_cancels_on_release() {
        let mut tracker = VoiceGestureTracker::default();
        tracker.press(Some(600.0));

        assert!(tracker.move_to(Some(550.0)).feedback.is_empty());
        assert!(!tracker.cancel_pending());

        let mut light = haptics(&tracker.move_to(Some(519.0)));
        assert!(tracker.cancel_pending());
        light.extend(haptics(&tracker.move_to(Some(480.0))));
        light.extend(haptics(&tracker.move_to(Some(470.0))));
        assert_eq!(light, vec![Haptic::Light]);

        let reaction = tracker.release();
        assert_eq!(reaction.outcome, Some(VoiceOutcome::Cancelled));
        assert_eq!(
            reaction.feedback,
            vec![
                Feedback::Vibrate(Haptic::Light),
                Feedback::Notify(Notice::plain("Cancelled")),
            ]
        );
        assert_eq!(tracker.phase(), VoicePhase::Idle);
    }

    #[test]
    fn exactly_at_threshold_is_not_cancel_pending() {
        let mut tracker = VoiceGestureTracker::default();
        tracker.press(Some(200.0));
        tracker.move_to(Some(120.0));
        assert!(!tracker.cancel_pending());
    }

    #[test]
    fn sliding_back_down_clears_cancel_pending() {
        let mut tracker = VoiceGestureTracker::default();
        tracker.press(Some(600.0));
        tracker.move_to(Some(400.0));
        assert!(tracker.cancel_pending());

        let back = tracker.move_to(Some(590.0));
        assert!(back.feedback.is_empty());
        assert!(!tracker.cancel_pending());

        // crossing again fires the edge cue again
        assert_eq!(haptics(&tracker.move_to(Some(500.0))), vec![Haptic::Light]);

        tracker.move_to(Some(560.0));
        let reaction = tracker.release();
        assert_eq!(reaction.outcome, Some(VoiceOutcome::Sent));
        assert!(reaction
            .feedback
            .contains(&Feedback::Notify(Notice::success("Voice message sent"))));
    }

    #[test]
    fn moves_and_releases_while_idle_are_ignored() {
        let mut tracker = VoiceGestureTracker::default();
        assert_eq!(tracker.move_to(Some(10.0)), VoiceReaction::default());
        assert_eq!(tracker.release(), VoiceReaction::default());
        assert_eq!(tracker.phase(), VoicePhase::Idle);
    }

    #[test]
    fn explicit_cancel_while_idle_still_cancels() {
        let mut tracker = VoiceGestureTracker::default();
        let reaction = tracker.cancel();
        assert_eq!(reaction.outcome, Some(VoiceOutcome::Cancelled));
        assert_eq!(
            reaction.feedback,
            vec![
                Feedback::Vibrate(Haptic::Heavy),
                Feedback::Notify(Notice::plain("Cancelled")),
            ]
        );
        assert_eq!(tracker.phase(), VoicePhase::Idle);
    }

    #[test]
    fn move_without_touch_point_is_ignored() {
        let mut tracker = VoiceGestureTracker::default();
        tracker.press(Some(300.0));
        assert_eq!(tracker.move_to(None), VoiceReaction::default());
        assert!(tracker.is_recording());
    }

    #[test]
    fn explicit_cancel_wins_regardless_of_distance() {
        let mut tracker = VoiceGestureTracker::default();
        tracker.press(Some(300.0));
        tracker.move_to(Some(290.0));

        let reaction = tracker.cancel();
        assert_eq!(reaction.outcome, Some(VoiceOutcome::Cancelled));
        assert_eq!(haptics(&reaction), vec![Haptic::Heavy]);
        assert!(!tracker.is_recording());
        assert_eq!(tracker.release(), VoiceReaction::default());
    }

    #[test]
    fn custom_threshold() {
        let mut tracker = VoiceGestureTracker::new(20.0);
        tracker.press(Some(100.0));
        tracker.move_to(Some(75.0));
        assert!(tracker.cancel_pending());
    }
}
