//! Per-round pivot columns for the score report.

/// Column that carries the round number in the report's inner subquery.
pub const ROUND_NUMBER_COLUMN: &str = "round_number";
/// Column that carries the points in the report's inner subquery.
pub const POINTS_COLUMN: &str = "points";

pub fn round_alias(k: u32) -> String {
    format!("round_{k}")
}

/// One conditional-sum expression per round `1..=n`. Rows of other rounds
/// (and competitors without scores) add 0, so the sum is never null.
pub fn round_columns(n: u32) -> Vec<String> {
    (1..=n)
        .map(|k| {
            format!(
                "SUM(CASE WHEN {ROUND_NUMBER_COLUMN} = {k} THEN {POINTS_COLUMN} ELSE 0 END) AS {}",
                round_alias(k)
            )
        })
        .collect()
}

/// The pivot columns as one select-list fragment. Empty for `n == 0`.
pub fn build_round_columns(n: u32) -> String {
    round_columns(n).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rounds_yield_an_empty_fragment() {
        assert!(round_columns(0).is_empty());
        assert_eq!(build_round_columns(0), "");
    }

    #[test]
    fn one_aliased_expression_per_round() {
        for n in 0..=8u32 {
            let fragment = build_round_columns(n);
            let aliases = fragment.matches(" AS round_").count();
            assert_eq!(aliases, n as usize, "fragment for n={n}: {fragment}");
            assert!(!fragment.trim_end().ends_with(','));
            assert!(!fragment.starts_with(','));
        }
    }

    #[test]
    fn expressions_are_indexed_from_one() {
        let columns = round_columns(2);
        assert_eq!(
            columns,
            vec![
                "SUM(CASE WHEN round_number = 1 THEN points ELSE 0 END) AS round_1".to_string(),
                "SUM(CASE WHEN round_number = 2 THEN points ELSE 0 END) AS round_2".to_string(),
            ]
        );
        assert_eq!(
            build_round_columns(2),
            format!("{}, {}", columns[0], columns[1])
        );
    }
}
