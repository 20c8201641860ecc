//! Scoring module - points for settled pieces
//!
//! A settled piece earns points in two ways:
//! - Line clears: 50 per line, doubled when the number of lines equals the order
//!   (the most a single piece can ever clear)
//! - Accel points: collected while the piece was falling (1 per soft drop step,
//!   20 for a hard drop) and added to the clear

use crate::types::{FULL_ORDER_MULTIPLIER, LINE_SCORE};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the cleared lines, including the full-order bonus
    pub line_clear_score: u32,
    /// Accel points carried by the piece
    pub accel_points: u32,
    pub total: u32,
    /// Whether the full-order multiplier was applied
    pub full_order_bonus: bool,
}

/// Points for clearing `lines` rows with a piece of the given order
pub fn calculate_line_score(lines: usize, order: usize) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base = (lines as u32).saturating_mul(LINE_SCORE);
    if lines == order {
        base.saturating_mul(FULL_ORDER_MULTIPLIER)
    } else {
        base
    }
}

/// Calculate the complete score for a settled piece
pub fn calculate_score(lines: usize, order: usize, accel_points: u32) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines, order);
    ScoreResult {
        line_clear_score,
        accel_points,
        total: line_clear_score.saturating_add(accel_points),
        full_order_bonus: lines > 0 && lines == order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lines_scores_nothing() {
        assert_eq!(calculate_line_score(0, 4), 0);
        // ...even for order 0 where lines == order
        assert_eq!(calculate_line_score(0, 0), 0);
    }

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(1, 4), 50);
        assert_eq!(calculate_line_score(3, 4), 150);
        assert_eq!(calculate_line_score(4, 4), 400);
        assert_eq!(calculate_line_score(5, 5), 500);
        assert_eq!(calculate_line_score(1, 1), 100);
    }

    #[test]
    fn test_accel_points_added() {
        let result = calculate_score(2, 4, 20);
        assert_eq!(result.line_clear_score, 100);
        assert_eq!(result.accel_points, 20);
        assert_eq!(result.total, 120);
        assert!(!result.full_order_bonus);

        let result = calculate_score(0, 4, 7);
        assert_eq!(result.total, 7);
    }

    #[test]
    fn test_full_order_bonus_flag() {
        let result = calculate_score(3, 3, 0);
        assert!(result.full_order_bonus);
        assert_eq!(result.total, 300);
    }
}
