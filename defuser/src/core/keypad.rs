//! Keypad: press four symbols in the order of the column that holds them all.

use crate::core::error::{SolveError, SolveResult};

pub const KEYPAD_COLUMNS: [[&str; 7]; 6] = [
    ["lp", "tr", "l", "sh", "cy", "h", "rc"],
    ["e", "lp", "rc", "lo", "s", "h", "q"],
    ["co", "w", "lo", "zh", "r", "l", "s"],
    ["b", "p", "so", "cy", "zh", "q", "t"],
    ["ps", "t", "so", "c", "p", "ks", "bs"],
    ["b", "e", "pz", "ae", "ps", "i", "o"],
];

pub const KEYPAD_SYMBOLS: usize = 4;

/// Abbreviations operators type for each keypad glyph.
pub const KEYPAD_LEGEND: &[(&str, &str)] = &[
    ("lo", "loop; swirl"),
    ("so", "soft sign; yat"),
    ("p", "paragraph"),
    ("sh", "shock; lightning"),
    ("co", "copyright"),
    ("cy", "cyrillic; iotified big yus"),
    ("ks", "ksi; reverse ksi with caron"),
    ("rc", "reverse c with dot"),
    ("c", "c with dot"),
    ("i", "i kratkoye with tail"),
    ("tr", "triangle; small yus"),
    ("s", "white star"),
    ("e", "e with diaresis"),
    ("zh", "zhe with tail"),
    ("q", "upside-down question mark"),
    ("t", "face with tongue sticking out; teh with ring"),
    ("h", "h with swirl"),
    ("l", "lambda"),
    ("lp", "lollipop"),
    ("b", "b"),
    ("pz", "puzzle"),
    ("r", "droopy capital r; capital komi dzje"),
    ("ps", "psi"),
    ("ae", "aesc"),
    ("o", "capital omega"),
    ("w", "cyrillic omega with titlo"),
    ("bs", "black star"),
];

/// Press order for the four keypad symbols, as 1-indexed input positions.
pub fn solve_keypad(symbols: &[String]) -> SolveResult<Vec<usize>> {
    if symbols.len() != KEYPAD_SYMBOLS {
        return Err(SolveError::malformed(
            "4 keypad symbols",
            format!("{} symbols", symbols.len()),
        ));
    }
    let known: Vec<&str> = KEYPAD_LEGEND.iter().map(|(token, _)| *token).collect();
    check_vocabulary(symbols, &known, "keypad")?;
    order_by_columns(&KEYPAD_COLUMNS, symbols, "keypad")
}

/// Reject unknown or repeated symbols.
pub(crate) fn check_vocabulary(
    symbols: &[String],
    known: &[&str],
    module: &str,
) -> SolveResult<()> {
    for (idx, symbol) in symbols.iter().enumerate() {
        if !known.contains(&symbol.as_str()) {
            return Err(SolveError::malformed(
                format!("a {module} symbol (enter ? for the legend)"),
                format!("'{symbol}'"),
            ));
        }
        if symbols[..idx].contains(symbol) {
            return Err(SolveError::malformed(
                "distinct symbols",
                format!("'{symbol}' twice"),
            ));
        }
    }
    Ok(())
}

/// Pick the first column containing every symbol and list the input
/// positions in that column's top-to-bottom order.
pub(crate) fn order_by_columns<C: AsRef<[&'static str]>>(
    columns: &[C],
    symbols: &[String],
    module: &str,
) -> SolveResult<Vec<usize>> {
    let column = columns
        .iter()
        .map(AsRef::as_ref)
        .find(|column| {
            symbols
                .iter()
                .all(|symbol| column.contains(&symbol.as_str()))
        })
        .ok_or_else(|| {
            SolveError::malformed(
                format!("{module} symbols sharing one column"),
                symbols.join(" "),
            )
        })?;

    Ok(column
        .iter()
        .filter_map(|glyph| symbols.iter().position(|symbol| symbol == glyph))
        .map(|idx| idx + 1)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(raw: &str) -> Vec<String> {
        raw.split_whitespace().map(ToString::to_string).collect()
    }

    #[test]
    fn orders_by_first_column() {
        // Column 1: lp tr l sh cy h rc
        assert_eq!(solve_keypad(&symbols("rc l lp cy")), Ok(vec![3, 2, 4, 1]));
    }

    #[test]
    fn shared_symbols_pick_first_matching_column() {
        // lp, rc and h appear in columns 1 and 2; q only in 2 and 4.
        assert_eq!(solve_keypad(&symbols("q h lp rc")), Ok(vec![3, 4, 2, 1]));
    }

    #[test]
    fn last_column() {
        assert_eq!(solve_keypad(&symbols("o ae b i")), Ok(vec![3, 2, 4, 1]));
    }

    #[test]
    fn no_common_column_is_malformed() {
        let err = solve_keypad(&symbols("lp co bs ae")).expect_err("no column");
        assert!(matches!(err, SolveError::MalformedInput { .. }));
    }

    #[test]
    fn wrong_count_unknown_and_duplicate_are_rejected() {
        assert!(solve_keypad(&symbols("lp tr l")).is_err());
        assert!(solve_keypad(&symbols("lp tr l zz")).is_err());
        assert!(solve_keypad(&symbols("lp tr l lp")).is_err());
    }

    #[test]
    fn legend_covers_every_column_symbol() {
        for column in KEYPAD_COLUMNS {
            for glyph in column {
                assert!(
                    KEYPAD_LEGEND.iter().any(|(token, _)| *token == glyph),
                    "{glyph} missing from legend"
                );
            }
        }
    }
}
