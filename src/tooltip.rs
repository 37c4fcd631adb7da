use crate::ir::Partition;
use crate::transition::BarHit;

/// Where the tooltip sits, in plot coordinates, and what it describes.
/// `data` is `None` while nothing is hovered; the position is kept so the
/// tooltip can fade out in place.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverState<T> {
    pub top: f64,
    pub left: f64,
    pub data: Option<T>,
}

impl<T> Default for HoverState<T> {
    fn default() -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            data: None,
        }
    }
}

impl<T> HoverState<T> {
    pub fn is_active(&self) -> bool {
        self.data.is_some()
    }
}

/// Caller-supplied tooltip renderer. Receives the hover state on every
/// render and returns an SVG fragment drawn at `(left, top)`.
pub type TooltipRenderer<T> = Box<dyn Fn(&HoverState<T>) -> String>;

/// A rendered tooltip ready to be placed in the plot's coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLayer {
    pub left: f64,
    pub top: f64,
    pub visible: bool,
    pub markup: String,
}

impl TooltipLayer {
    pub fn render<T>(state: &HoverState<T>, renderer: &TooltipRenderer<T>) -> Self {
        Self {
            left: state.left,
            top: state.top,
            visible: state.is_active(),
            markup: renderer(state),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HoverTarget {
    row: usize,
    partition: Partition,
    index: usize,
}

/// Tracks the single hovered bar. The last pointer event wins.
#[derive(Debug, Clone)]
pub struct TooltipController<T> {
    offset_x: f64,
    offset_y: f64,
    target: Option<HoverTarget>,
    state: HoverState<T>,
}

impl<T: Clone> TooltipController<T> {
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            target: None,
            state: HoverState::default(),
        }
    }

    pub fn state(&self) -> &HoverState<T> {
        &self.state
    }

    /// Pointer moved over `hit` at plot x-coordinate `pointer_x`.
    pub fn pointer_move(&mut self, hit: &BarHit, pointer_x: f64, data: T) -> &HoverState<T> {
        let target = HoverTarget {
            row: hit.row,
            partition: hit.partition,
            index: hit.index,
        };
        if self.target != Some(target) {
            tracing::trace!(
                row = hit.row,
                index = hit.index,
                partition = ?hit.partition,
                "hover target changed"
            );
        }
        self.target = Some(target);
        self.state = HoverState {
            left: pointer_x + self.offset_x,
            top: hit.row_top + self.offset_y,
            data: Some(data),
        };
        &self.state
    }

    /// Refresh the hovered payload after the rows changed. `data_for` looks
    /// up the bar at `(row, partition, index)` in the new data; a bar that no
    /// longer exists clears the hover.
    pub fn rebind(
        &mut self,
        data_for: impl FnOnce(usize, Partition, usize) -> Option<T>,
    ) -> &HoverState<T> {
        let Some(target) = self.target else {
            return &self.state;
        };
        match data_for(target.row, target.partition, target.index) {
            Some(data) => self.state.data = Some(data),
            None => {
                self.pointer_leave();
            }
        }
        &self.state
    }

    pub fn pointer_leave(&mut self) -> &HoverState<T> {
        if self.target.take().is_some() {
            tracing::trace!("hover cleared");
        }
        self.state.data = None;
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Style;

    fn hit(row: usize, index: usize, row_top: f64) -> BarHit {
        BarHit {
            row,
            partition: Partition::Positive,
            index,
            bar: Style::default(),
            row_top,
        }
    }

    #[test]
    fn hover_positions_relative_to_pointer_and_row() {
        let mut tooltip = TooltipController::new(10.0, -10.0);
        let state = tooltip.pointer_move(&hit(1, 0, 38.0), 120.0, "alpha");
        assert_eq!(state.left, 130.0);
        assert_eq!(state.top, 28.0);
        assert_eq!(state.data, Some("alpha"));
    }

    #[test]
    fn leave_clears_data_but_keeps_position() {
        let mut tooltip = TooltipController::new(10.0, -10.0);
        tooltip.pointer_move(&hit(0, 2, 0.0), 50.0, 7);
        let state = tooltip.pointer_leave();
        assert!(!state.is_active());
        assert_eq!(state.left, 60.0);
        assert_eq!(state.top, -10.0);
    }

    #[test]
    fn last_event_wins() {
        let mut tooltip = TooltipController::new(0.0, 0.0);
        tooltip.pointer_move(&hit(0, 0, 0.0), 10.0, 'a');
        tooltip.pointer_move(&hit(3, 1, 114.0), 20.0, 'b');
        assert_eq!(tooltip.state().data, Some('b'));
        assert_eq!(tooltip.state().top, 114.0);
    }

    #[test]
    fn rebind_refreshes_or_clears_the_target() {
        let mut tooltip = TooltipController::new(0.0, 0.0);
        tooltip.rebind(|_, _, _| Some("unused"));
        assert!(!tooltip.state().is_active());

        tooltip.pointer_move(&hit(1, 0, 38.0), 10.0, "old");
        let state = tooltip.rebind(|row, partition, index| {
            (row == 1 && partition == Partition::Positive && index == 0).then_some("new")
        });
        assert_eq!(state.data, Some("new"));
        assert_eq!(state.top, 38.0);

        let state = tooltip.rebind(|_, _, _| None);
        assert!(!state.is_active());
        assert_eq!(state.left, 10.0);
    }
}
