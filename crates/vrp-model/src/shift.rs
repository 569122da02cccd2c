use serde::{Deserialize, Serialize};

use crate::ids::LocationId;
use crate::range::ValueRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakOption {
    Mandatory,
    Optional,
}

/// A rest period a vehicle may (or must) take during a shift.
///
/// `duration` is clamped to `[0, allowed_time_window.length]` at
/// construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Break {
    allowed_time_window: ValueRange,
    duration: i64,
    option: BreakOption,
    location: Option<LocationId>,
}

impl Break {
    pub fn new(
        allowed_time_window: ValueRange,
        duration: i64,
        option: BreakOption,
        location: Option<LocationId>,
    ) -> Self {
        let clamped = duration.clamp(0, allowed_time_window.length());
        Self {
            allowed_time_window,
            duration: clamped,
            option,
            location,
        }
    }

    pub fn allowed_time_window(&self) -> ValueRange {
        self.allowed_time_window
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn option(&self) -> BreakOption {
        self.option
    }

    pub fn location(&self) -> Option<&LocationId> {
        self.location.as_ref()
    }
}

/// Optional per-shift overrides of the parent vehicle's cost coefficients
/// and limits. `None` means "inherit the vehicle's value / no limit".
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ShiftCostOverrides {
    pub fixed_cost: Option<i64>,
    pub base_cost: Option<i64>,
    pub distance_cost: Option<i64>,
    pub time_cost: Option<i64>,
    pub waiting_time_cost: Option<i64>,
    pub max_duration: Option<i64>,
    pub max_distance: Option<i64>,
}

/// A time window plus start/end locations within which a vehicle may
/// operate, along with the breaks it may take during it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Shift {
    shift_time_window: ValueRange,
    start_location: Option<LocationId>,
    end_location: Option<LocationId>,
    breaks: Vec<Break>,
    cost_overrides: ShiftCostOverrides,
}

impl Shift {
    pub fn new(
        shift_time_window: ValueRange,
        start_location: Option<LocationId>,
        end_location: Option<LocationId>,
        breaks: Vec<Break>,
    ) -> Self {
        let retained = breaks
            .into_iter()
            .filter(|b| shift_time_window.contains(&b.allowed_time_window()))
            .collect();

        Self {
            shift_time_window,
            start_location,
            end_location,
            breaks: retained,
            cost_overrides: ShiftCostOverrides::default(),
        }
    }

    pub fn with_cost_overrides(mut self, overrides: ShiftCostOverrides) -> Self {
        self.cost_overrides = overrides;
        self
    }

    pub fn shift_time_window(&self) -> ValueRange {
        self.shift_time_window
    }

    pub fn start_location(&self) -> Option<&LocationId> {
        self.start_location.as_ref()
    }

    pub fn end_location(&self) -> Option<&LocationId> {
        self.end_location.as_ref()
    }

    pub fn breaks(&self) -> &[Break] {
        &self.breaks
    }

    pub fn cost_overrides(&self) -> &ShiftCostOverrides {
        &self.cost_overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_duration_is_clamped_to_window_length() {
        let b = Break::new(ValueRange::new(0, 10), 999, BreakOption::Optional, None);
        assert_eq!(b.duration(), 10);

        let b = Break::new(ValueRange::new(0, 10), -5, BreakOption::Optional, None);
        assert_eq!(b.duration(), 0);
    }

    #[test]
    fn breaks_outside_the_shift_window_are_dropped() {
        let shift = Shift::new(
            ValueRange::new(0, 100),
            None,
            None,
            vec![
                Break::new(ValueRange::new(10, 20), 5, BreakOption::Optional, None),
                Break::new(ValueRange::new(90, 150), 5, BreakOption::Optional, None),
            ],
        );
        assert_eq!(shift.breaks().len(), 1);
        assert_eq!(shift.breaks()[0].allowed_time_window().min(), 10);
    }
}
