//! Stock transition classification.
//!
//! Pure function of (previous count, current count). The six arms are
//! exhaustive and mutually exclusive; in particular `Restocked` and
//! `SoldOut` split the through-zero boundary exactly.

/// How the current count relates to the remembered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockTransition {
    /// Was zero, now positive.
    Restocked,
    /// Was positive, grew by `diff`.
    Increased { diff: u32 },
    /// Was positive, shrank by `diff` but not to zero.
    Decreased { diff: u32 },
    /// Positive and equal to the remembered count.
    Unchanged,
    /// Was positive, now zero.
    SoldOut,
    /// Zero before and after.
    StillEmpty,
}

/// Classify the transition from `prev` to `current`.
pub fn classify(prev: u32, current: u32) -> StockTransition {
    if current > 0 {
        if prev == 0 {
            StockTransition::Restocked
        } else if current > prev {
            StockTransition::Increased {
                diff: current - prev,
            }
        } else if current < prev {
            StockTransition::Decreased {
                diff: prev - current,
            }
        } else {
            StockTransition::Unchanged
        }
    } else if prev > 0 {
        StockTransition::SoldOut
    } else {
        StockTransition::StillEmpty
    }
}
