//! Memory: five stages where later answers depend on earlier presses.
//!
//! The progress value is the module's whole cross-call memory. Solving a
//! stage never mutates it; the solver returns the successor, and stage 5
//! (or an explicit reset) transitions back to the initial value.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::error::{SolveError, SolveResult};

pub const FINAL_STAGE: u8 = 5;
pub const MEMORY_BUTTONS: usize = 4;

/// A press remembered for a completed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pressed {
    pub label: u8,
    pub position: usize,
}

/// Stand-in for a stage that has no remembered press.
const NOT_PRESSED: Pressed = Pressed {
    label: 0,
    position: 0,
};

/// Current stage plus the presses of completed stages 1..=4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryProgress {
    stage: u8,
    pressed: BTreeMap<u8, Pressed>,
}

impl Default for MemoryProgress {
    fn default() -> Self {
        Self {
            stage: 1,
            pressed: BTreeMap::new(),
        }
    }
}

impl MemoryProgress {
    pub fn stage(&self) -> u8 {
        self.stage
    }

    pub fn pressed(&self, stage: u8) -> Option<Pressed> {
        self.pressed.get(&stage).copied()
    }

    pub fn is_initial(&self) -> bool {
        *self == Self::default()
    }

    /// Explicit reset (operator reported a strike or a new module).
    pub fn reset() -> Self {
        Self::default()
    }

    /// Transition after `stage` resolved to `press`.
    ///
    /// Stages 1..=4 are remembered and the next stage becomes current; the
    /// final stage returns the initial progress.
    pub fn record(&self, stage: u8, press: Pressed) -> Self {
        if stage >= FINAL_STAGE {
            return Self::reset();
        }
        let mut next = self.clone();
        next.pressed.insert(stage, press);
        next.stage = stage + 1;
        next
    }

    fn remembered(&self, stage: u8) -> Pressed {
        self.pressed(stage).unwrap_or(NOT_PRESSED)
    }
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Position(usize),
    Label(u8),
    PositionOf(u8),
    LabelOf(u8),
}

/// `RULES[stage - 1][display - 1]`.
const RULES: [[Target; 4]; 5] = [
    [
        Target::Position(2),
        Target::Position(2),
        Target::Position(3),
        Target::Position(4),
    ],
    [
        Target::Label(4),
        Target::PositionOf(1),
        Target::Position(1),
        Target::PositionOf(1),
    ],
    [
        Target::LabelOf(2),
        Target::LabelOf(1),
        Target::Position(3),
        Target::Label(4),
    ],
    [
        Target::PositionOf(1),
        Target::Position(1),
        Target::PositionOf(2),
        Target::PositionOf(2),
    ],
    [
        Target::LabelOf(1),
        Target::LabelOf(2),
        Target::LabelOf(4),
        Target::LabelOf(3),
    ],
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryOutcome {
    pub label: u8,
    pub position: usize,
    pub progress: MemoryProgress,
}

/// Solve one stage: `display` is the large number shown, `buttons` the four
/// button labels left to right.
pub fn solve_memory(
    stage: u8,
    display: u8,
    buttons: &[u8],
    progress: &MemoryProgress,
) -> SolveResult<MemoryOutcome> {
    if !(1..=FINAL_STAGE).contains(&stage) {
        return Err(SolveError::malformed(
            format!("stage 1-{FINAL_STAGE}"),
            format!("stage {stage}"),
        ));
    }
    validate_labels(display, buttons)?;

    let rule = RULES[usize::from(stage - 1)][usize::from(display - 1)];
    let press = match rule {
        Target::Position(position) => at_position(buttons, position, stage)?,
        Target::Label(label) => with_label(buttons, label, stage)?,
        Target::PositionOf(earlier) => {
            at_position(buttons, progress.remembered(earlier).position, stage)?
        }
        Target::LabelOf(earlier) => with_label(buttons, progress.remembered(earlier).label, stage)?,
    };

    Ok(MemoryOutcome {
        label: press.label,
        position: press.position,
        progress: progress.record(stage, press),
    })
}

fn validate_labels(display: u8, buttons: &[u8]) -> SolveResult<()> {
    let max = MEMORY_BUTTONS as u8;
    if !(1..=max).contains(&display) {
        return Err(SolveError::malformed(
            format!("display 1-{max}"),
            display.to_string(),
        ));
    }
    if buttons.len() != MEMORY_BUTTONS {
        return Err(SolveError::malformed(
            format!("{MEMORY_BUTTONS} button labels"),
            format!("{} labels", buttons.len()),
        ));
    }
    for label in 1..=max {
        if !buttons.contains(&label) {
            return Err(SolveError::malformed(
                "button labels 1-4, each once",
                format!("{buttons:?}"),
            ));
        }
    }
    Ok(())
}

fn at_position(buttons: &[u8], position: usize, stage: u8) -> SolveResult<Pressed> {
    position
        .checked_sub(1)
        .and_then(|idx| buttons.get(idx))
        .map(|label| Pressed {
            label: *label,
            position,
        })
        .ok_or_else(|| {
            SolveError::unknown("memory recall", format!("stage {stage} position {position}"))
        })
}

fn with_label(buttons: &[u8], label: u8, stage: u8) -> SolveResult<Pressed> {
    buttons
        .iter()
        .position(|candidate| *candidate == label)
        .map(|idx| Pressed {
            label,
            position: idx + 1,
        })
        .ok_or_else(|| SolveError::unknown("memory recall", format!("stage {stage} label {label}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(progress: &MemoryProgress, display: u8, buttons: [u8; 4]) -> MemoryOutcome {
        solve_memory(progress.stage(), display, &buttons, progress).expect("stage solves")
    }

    #[test]
    fn five_stages_in_order() {
        let start = MemoryProgress::default();

        // Stage 1, display 3: third position.
        let s1 = run(&start, 3, [4, 1, 2, 3]);
        assert_eq!((s1.label, s1.position), (2, 3));
        assert_eq!(s1.progress.stage(), 2);

        // Stage 2, display 2: same position as stage 1.
        let s2 = run(&s1.progress, 2, [1, 3, 4, 2]);
        assert_eq!((s2.label, s2.position), (4, 3));

        // Stage 3, display 1: same label as stage 2.
        let s3 = run(&s2.progress, 1, [4, 2, 1, 3]);
        assert_eq!((s3.label, s3.position), (4, 1));

        // Stage 4, display 3: same position as stage 2.
        let s4 = run(&s3.progress, 3, [2, 1, 3, 4]);
        assert_eq!((s4.label, s4.position), (3, 3));
        assert_eq!(s4.progress.pressed(4), Some(Pressed { label: 3, position: 3 }));

        // Stage 5, display 3: same label as stage 4.
        let s5 = run(&s4.progress, 3, [3, 4, 1, 2]);
        assert_eq!((s5.label, s5.position), (3, 1));
        assert!(s5.progress.is_initial());
    }

    #[test]
    fn stage_two_label_four_rule() {
        let after_one = MemoryProgress::default().record(
            1,
            Pressed {
                label: 1,
                position: 2,
            },
        );
        let out = run(&after_one, 1, [2, 3, 4, 1]);
        assert_eq!((out.label, out.position), (4, 3));
    }

    #[test]
    fn final_stage_clears_memory() {
        let mut progress = MemoryProgress::default();
        for stage in 1..=4 {
            progress = progress.record(
                stage,
                Pressed {
                    label: stage,
                    position: usize::from(stage),
                },
            );
        }
        assert_eq!(progress.stage(), 5);
        assert_eq!(progress.pressed(4).map(|p| p.label), Some(4));
        let cleared = progress.record(5, Pressed { label: 1, position: 1 });
        assert!(cleared.is_initial());
        assert_eq!(cleared.pressed(1), None);
    }

    #[test]
    fn stage_one_never_reads_memory() {
        let out = solve_memory(1, 1, &[1, 2, 3, 4], &MemoryProgress::default()).expect("stage 1");
        assert_eq!((out.label, out.position), (2, 2));
    }

    #[test]
    fn missing_prior_stage_is_unknown_not_panic() {
        let err = solve_memory(4, 1, &[1, 2, 3, 4], &MemoryProgress::default())
            .expect_err("no stage 1 memory");
        assert!(matches!(err, SolveError::UnknownConfiguration { .. }));
        let err = solve_memory(5, 2, &[1, 2, 3, 4], &MemoryProgress::default())
            .expect_err("no stage 2 memory");
        assert!(matches!(err, SolveError::UnknownConfiguration { .. }));
    }

    #[test]
    fn malformed_labels_are_rejected() {
        let start = MemoryProgress::default();
        assert!(solve_memory(1, 5, &[1, 2, 3, 4], &start).is_err());
        assert!(solve_memory(1, 1, &[1, 2, 3], &start).is_err());
        assert!(solve_memory(1, 1, &[1, 1, 3, 4], &start).is_err());
        assert!(solve_memory(6, 1, &[1, 2, 3, 4], &start).is_err());
    }
}
