//! Order status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// The status is a flat label: any status may be replaced by any other.
/// Each variant has a short storage code (`Ca`, `Pn`, ...) and a display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Canceled,
    #[default]
    Pending,
    Completed,
    Processing,
    Sent,
    Received,
}

impl OrderStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Canceled,
        Self::Pending,
        Self::Completed,
        Self::Processing,
        Self::Sent,
        Self::Received,
    ];

    /// Short storage code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Canceled => "Ca",
            Self::Pending => "Pn",
            Self::Completed => "Co",
            Self::Processing => "P",
            Self::Sent => "S",
            Self::Received => "R",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Canceled => "Canceled",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Processing => "Processing",
            Self::Sent => "Sent",
            Self::Received => "Received",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    /// Accepts a storage code (`Pn`) or a label in any case (`pending`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == s || status.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}
