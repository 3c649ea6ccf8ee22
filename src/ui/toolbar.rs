// Toolbar options
// Rendering mode and view switcher derived from a resolved granularity

use chrono::{Duration, Months, NaiveDateTime};

use crate::models::ui::ViewGranularity;

/// How far the previous/next buttons move the visible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationStep {
    Weeks(u32),
    Months(u32),
    /// Multi-month layouts show the whole range; no paging.
    None,
}

impl NavigationStep {
    /// Move `from` forward (`forward = true`) or back by one step.
    pub fn apply(&self, from: NaiveDateTime, forward: bool) -> Option<NaiveDateTime> {
        match *self {
            NavigationStep::Weeks(weeks) => {
                let delta = Duration::weeks(i64::from(weeks));
                if forward {
                    from.checked_add_signed(delta)
                } else {
                    from.checked_sub_signed(delta)
                }
            }
            NavigationStep::Months(months) => {
                let delta = Months::new(months);
                if forward {
                    from.checked_add_months(delta)
                } else {
                    from.checked_sub_months(delta)
                }
            }
            NavigationStep::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarOptions {
    /// Rendering mode identifier understood by the calendar widget.
    pub render_mode: &'static str,
    pub initial_view: ViewGranularity,
    /// Views offered in the switcher, narrowest first.
    pub available_views: Vec<ViewGranularity>,
    pub navigation: NavigationStep,
}

impl ToolbarOptions {
    pub fn for_view(view: ViewGranularity) -> Self {
        let (render_mode, navigation) = match view {
            ViewGranularity::WeekView => ("timeGridWeek", NavigationStep::Weeks(1)),
            ViewGranularity::MonthView => ("dayGridMonth", NavigationStep::Months(1)),
            ViewGranularity::MultiMonthView => ("multiMonth", NavigationStep::None),
        };

        Self {
            render_mode,
            initial_view: view,
            available_views: ViewGranularity::ALL
                .into_iter()
                .filter(|candidate| *candidate <= view)
                .collect(),
            navigation,
        }
    }

    pub fn shows_navigation(&self) -> bool {
        self.navigation != NavigationStep::None
    }
}
