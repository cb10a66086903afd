//! Panel selection for the main application shell.
//!
//! The navigation rail sends an integer; `select` maps it to a panel and
//! falls back to the dashboard for anything unknown.

use serde::{Deserialize, Serialize};

/// One of the five top-level views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    #[default]
    Dashboard,
    Credit,
    Income,
    Expenses,
    Stock,
}

impl Panel {
    pub const ALL: [Self; 5] = [Self::Dashboard, Self::Credit, Self::Income, Self::Expenses, Self::Stock];

    /// Navigation index of this panel (1-based).
    #[must_use]
    pub fn index(self) -> i64 {
        match self {
            Self::Dashboard => 1,
            Self::Credit => 2,
            Self::Income => 3,
            Self::Expenses => 4,
            Self::Stock => 5,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Credit => "Credit",
            Self::Income => "Incomes",
            Self::Expenses => "Expenses",
            Self::Stock => "Stock",
        }
    }

    /// Whether showing this panel leaves the application.
    #[must_use]
    pub fn is_external(self) -> bool {
        matches!(self, Self::Stock)
    }
}

/// Map a navigation index to its panel. Total: unknown values show the dashboard.
#[must_use]
pub fn select(n: i64) -> Panel {
    match n {
        2 => Panel::Credit,
        3 => Panel::Income,
        4 => Panel::Expenses,
        5 => Panel::Stock,
        _ => Panel::Dashboard,
    }
}

/// Current navigation selection for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSelection {
    active: i64,
}

impl Default for ViewSelection {
    fn default() -> Self {
        Self { active: 1 }
    }
}

impl ViewSelection {
    /// Raw selection as last set by the user.
    #[must_use]
    pub fn active(self) -> i64 {
        self.active
    }

    #[must_use]
    pub fn panel(self) -> Panel {
        select(self.active)
    }

    /// Record a new selection and return the panel to show.
    ///
    /// External panels are a one-shot hand-off and never become the resting
    /// selection.
    pub fn set(&mut self, n: i64) -> Panel {
        let panel = select(n);
        if !panel.is_external() {
            self.active = n;
        }
        panel
    }
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
