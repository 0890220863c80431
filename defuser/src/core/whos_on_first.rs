//! Who's on First: read a button chosen by the display, then press the first
//! word of that button's priority list that is present on the module.
//!
//! Multi-word entries are written without spaces (`holdon`, `youare`,
//! `what?`) and an empty display is entered as `-`.

use crate::core::error::{SolveError, SolveResult};

pub const WORD_BUTTONS: usize = 6;

/// Display word -> index of the button to read (left to right, top to bottom).
const DISPLAY_TO_BUTTON: &[(&str, usize)] = &[
    ("yes", 2),
    ("first", 1),
    ("display", 5),
    ("okay", 1),
    ("says", 5),
    ("nothing", 2),
    ("-", 4),
    ("blank", 3),
    ("no", 5),
    ("led", 2),
    ("lead", 5),
    ("read", 3),
    ("red", 3),
    ("reed", 4),
    ("leed", 4),
    ("holdon", 5),
    ("you", 3),
    ("youare", 5),
    ("your", 3),
    ("you're", 3),
    ("ur", 0),
    ("there", 5),
    ("they're", 4),
    ("their", 3),
    ("theyare", 2),
    ("see", 5),
    ("c", 1),
    ("cee", 5),
];

/// Button word -> priority list of words to press.
const PRIORITIES: &[(&str, [&str; 14])] = &[
    (
        "ready",
        [
            "yes", "okay", "what", "middle", "left", "press", "right", "blank", "ready", "no",
            "first", "uhhh", "nothing", "wait",
        ],
    ),
    (
        "first",
        [
            "left", "okay", "yes", "middle", "no", "right", "nothing", "uhhh", "wait", "ready",
            "blank", "what", "press", "first",
        ],
    ),
    (
        "no",
        [
            "blank", "uhhh", "wait", "first", "what", "ready", "right", "yes", "nothing", "left",
            "press", "okay", "no", "middle",
        ],
    ),
    (
        "blank",
        [
            "wait", "right", "okay", "middle", "blank", "press", "ready", "nothing", "no", "what",
            "left", "uhhh", "yes", "first",
        ],
    ),
    (
        "nothing",
        [
            "uhhh", "right", "okay", "middle", "yes", "blank", "no", "press", "left", "what",
            "wait", "first", "nothing", "ready",
        ],
    ),
    (
        "yes",
        [
            "okay", "right", "uhhh", "middle", "first", "what", "press", "ready", "nothing", "yes",
            "left", "blank", "no", "wait",
        ],
    ),
    (
        "what",
        [
            "uhhh", "what", "left", "nothing", "ready", "blank", "middle", "no", "okay", "first",
            "wait", "yes", "press", "right",
        ],
    ),
    (
        "uhhh",
        [
            "ready", "nothing", "left", "what", "okay", "yes", "right", "no", "press", "blank",
            "uhhh", "middle", "wait", "first",
        ],
    ),
    (
        "left",
        [
            "right", "left", "first", "no", "middle", "yes", "blank", "what", "uhhh", "wait",
            "press", "ready", "okay", "nothing",
        ],
    ),
    (
        "right",
        [
            "yes", "nothing", "ready", "press", "no", "wait", "what", "right", "middle", "left",
            "uhhh", "blank", "okay", "first",
        ],
    ),
    (
        "middle",
        [
            "blank", "ready", "okay", "what", "nothing", "press", "no", "wait", "left", "middle",
            "right", "first", "uhhh", "yes",
        ],
    ),
    (
        "okay",
        [
            "middle", "no", "first", "yes", "uhhh", "nothing", "wait", "okay", "left", "ready",
            "blank", "press", "what", "right",
        ],
    ),
    (
        "wait",
        [
            "uhhh", "no", "blank", "okay", "yes", "left", "first", "press", "what", "wait",
            "nothing", "ready", "right", "middle",
        ],
    ),
    (
        "press",
        [
            "right", "middle", "yes", "ready", "press", "okay", "nothing", "uhhh", "blank", "left",
            "first", "what", "no", "wait",
        ],
    ),
    (
        "you",
        [
            "sure", "youare", "your", "you're", "next", "uhhuh", "ur", "hold", "what?", "you",
            "uhuh", "like", "done", "u",
        ],
    ),
    (
        "youare",
        [
            "your", "next", "like", "uhhuh", "what?", "done", "uhuh", "hold", "you", "u", "you're",
            "sure", "ur", "youare",
        ],
    ),
    (
        "your",
        [
            "uhuh", "youare", "uhhuh", "your", "next", "ur", "sure", "u", "you're", "you", "what?",
            "hold", "like", "done",
        ],
    ),
    (
        "you're",
        [
            "you", "you're", "ur", "next", "uhuh", "youare", "u", "your", "what?", "uhhuh", "sure",
            "done", "like", "hold",
        ],
    ),
    (
        "ur",
        [
            "done", "u", "ur", "uhhuh", "what?", "sure", "your", "hold", "you're", "like", "next",
            "uhuh", "youare", "you",
        ],
    ),
    (
        "u",
        [
            "uhhuh", "sure", "next", "what?", "you're", "ur", "uhuh", "done", "u", "you", "like",
            "hold", "youare", "your",
        ],
    ),
    (
        "uhhuh",
        [
            "uhhuh", "your", "youare", "you", "done", "hold", "uhuh", "next", "sure", "like",
            "you're", "ur", "u", "what?",
        ],
    ),
    (
        "uhuh",
        [
            "ur", "u", "youare", "you're", "next", "uhuh", "done", "you", "uhhuh", "like", "your",
            "sure", "hold", "what?",
        ],
    ),
    (
        "what?",
        [
            "you", "hold", "you're", "your", "u", "done", "uhuh", "like", "youare", "uhhuh", "ur",
            "next", "what?", "sure",
        ],
    ),
    (
        "done",
        [
            "sure", "uhhuh", "next", "what?", "your", "ur", "you're", "hold", "like", "you", "u",
            "youare", "uhuh", "done",
        ],
    ),
    (
        "next",
        [
            "what?", "uhhuh", "uhuh", "your", "hold", "sure", "next", "like", "done", "youare",
            "ur", "you're", "u", "you",
        ],
    ),
    (
        "hold",
        [
            "youare", "u", "done", "uhuh", "you", "ur", "sure", "what?", "you're", "next", "hold",
            "uhhuh", "your", "like",
        ],
    ),
    (
        "sure",
        [
            "youare", "done", "like", "you're", "you", "hold", "uhhuh", "ur", "sure", "u", "what?",
            "next", "your", "uhuh",
        ],
    ),
    (
        "like",
        [
            "you're", "next", "u", "ur", "hold", "done", "uhuh", "what?", "uhhuh", "you", "like",
            "sure", "youare", "your",
        ],
    ),
];

/// Word to press given the display word and the six button words.
pub fn solve_whos_on_first(display: &str, buttons: &[String]) -> SolveResult<String> {
    if buttons.len() != WORD_BUTTONS {
        return Err(SolveError::malformed(
            format!("{WORD_BUTTONS} button words"),
            format!("{} words", buttons.len()),
        ));
    }
    let read_idx = DISPLAY_TO_BUTTON
        .iter()
        .find(|(word, _)| *word == display)
        .map(|(_, idx)| *idx)
        .ok_or_else(|| SolveError::malformed("a display word", format!("'{display}'")))?;
    for button in buttons {
        if priorities(button).is_none() {
            return Err(SolveError::malformed(
                "a button word",
                format!("'{button}'"),
            ));
        }
    }

    let read = &buttons[read_idx];
    let order = priorities(read)
        .ok_or_else(|| SolveError::unknown("who's on first priorities", read.as_str()))?;
    order
        .iter()
        .find(|word| buttons.iter().any(|button| button == *word))
        .map(|word| (*word).to_string())
        .ok_or_else(|| {
            SolveError::malformed(
                format!("button words from the same list as '{read}'"),
                buttons.join(" "),
            )
        })
}

fn priorities(word: &str) -> Option<&'static [&'static str; 14]> {
    PRIORITIES
        .iter()
        .find(|(button, _)| *button == word)
        .map(|(_, order)| order)
}
