use std::sync::Arc;

use crate::config::ChartConfig;
use crate::error::Result;
use crate::ir::Row;
use crate::layout::{ChartLayout, FramePlan, compute_layout, plan_frame};
use crate::parser::validate_rows;
use crate::render;
use crate::size::{ObserverSource, Size, SizeObserver};
use crate::theme::{ColorMapper, Theme};
use crate::tooltip::{HoverState, TooltipController, TooltipLayer, TooltipRenderer};
use crate::transition::{ReconcileStats, Scene, Snapshot};

struct Tooltip<T> {
    controller: TooltipController<T>,
    renderer: TooltipRenderer<T>,
}

/// The diverging positive/negative bar chart.
///
/// Owns the derived layout, the animated scene and the optional hover and
/// size-observation state. Every entry point takes the caller's frame-clock
/// time in milliseconds; nothing here reads a wall clock.
pub struct PvnChart<T> {
    config: ChartConfig,
    colors: ColorMapper,
    rows: Arc<[Row<T>]>,
    layout: Arc<ChartLayout<T>>,
    width: f64,
    scene: Scene,
    observer: Option<SizeObserver>,
    tooltip: Option<Tooltip<T>>,
}

impl<T: Clone + 'static> PvnChart<T> {
    pub fn new(config: ChartConfig, theme: &Theme) -> Result<Self> {
        let colors = ColorMapper::from_theme(theme)?;
        Ok(Self {
            scene: Scene::new(config.row_keying),
            config,
            colors,
            rows: Arc::from(Vec::<Row<T>>::new()),
            layout: Arc::new(ChartLayout::default()),
            width: 0.0,
            observer: None,
            tooltip: None,
        })
    }

    /// Wire up hover interactions. Without a renderer the chart ignores
    /// pointer events entirely.
    pub fn with_tooltip(mut self, renderer: impl Fn(&HoverState<T>) -> String + 'static) -> Self {
        self.tooltip = Some(Tooltip {
            controller: TooltipController::new(
                self.config.tooltip_offset_x,
                self.config.tooltip_offset_y,
            ),
            renderer: Box::new(renderer),
        });
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn rows(&self) -> &Arc<[Row<T>]> {
        &self.rows
    }

    pub fn layout(&self) -> &Arc<ChartLayout<T>> {
        &self.layout
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Replace the chart's data. The layout is recomputed only when the row
    /// slice identity changes; handing back the same `Arc` is a no-op.
    /// Rows holding a non-finite value are rejected and the previous data
    /// stays on screen.
    pub fn set_rows(
        &mut self,
        rows: impl Into<Arc<[Row<T>]>>,
        now_ms: f64,
    ) -> Result<ReconcileStats> {
        let rows = rows.into();
        if Arc::ptr_eq(&rows, &self.rows) {
            return Ok(ReconcileStats::default());
        }
        validate_rows(&rows)?;
        self.layout = Arc::new(compute_layout(&rows));
        self.rows = rows;
        if let Some(tooltip) = self.tooltip.as_mut() {
            let layout = &self.layout;
            tooltip.controller.rebind(|row, partition, index| {
                layout.bar(row, partition, index).map(|bar| bar.raw_value.clone())
            });
        }
        Ok(self.relayout(now_ms))
    }

    /// Change the plot width. Returns `None` when the width is unchanged.
    pub fn resize(&mut self, width: f64, now_ms: f64) -> Option<ReconcileStats> {
        if width == self.width {
            return None;
        }
        self.width = width;
        Some(self.relayout(now_ms))
    }

    /// Attach the size observer. Hosts that cannot observe the container
    /// itself get whole-window notifications instead. A previously attached
    /// observer is released first.
    pub fn mount(&mut self, size: Size, element_observation: bool, now_ms: f64) -> ReconcileStats {
        self.unmount();
        let source = ObserverSource::detect(element_observation);
        self.observer = Some(SizeObserver::observe(size, source, self.config.resize_debounce_ms));
        self.width = size.width;
        self.relayout(now_ms)
    }

    /// Release the size observer. Safe to call when not mounted.
    pub fn unmount(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.dispose();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.observer.is_some()
    }

    pub fn observer_source(&self) -> Option<ObserverSource> {
        self.observer.as_ref().map(SizeObserver::source)
    }

    /// Forward a container size report to the observer. Ignored while
    /// unmounted.
    pub fn notify_resize(&mut self, size: Size, now_ms: f64) {
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(size, now_ms);
        }
    }

    /// Drive one frame: apply a settled resize, then drop finished exit
    /// transitions. Returns whether anything is still animating.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let settled = self.observer.as_mut().and_then(|observer| observer.poll(now_ms));
        if let Some(size) = settled {
            self.resize(size.width, now_ms);
        }
        self.scene.advance(now_ms)
    }

    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.scene.is_animating(now_ms)
    }

    pub fn settled_at(&self) -> f64 {
        self.scene.settled_at()
    }

    pub fn plan(&self) -> FramePlan {
        plan_frame(&self.layout, self.width, &self.config, &self.colors)
    }

    pub fn snapshot(&self, now_ms: f64) -> Snapshot {
        self.scene.snapshot(now_ms)
    }

    /// Hit-test the plot-space pointer position against the bars on screen
    /// at `now_ms`. A hit binds the bar's raw value, a miss clears it.
    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> Option<&HoverState<T>> {
        let tooltip = self.tooltip.as_mut()?;
        let snapshot = self.scene.snapshot(now_ms);
        let bound = snapshot.hit_test(x, y).and_then(|hit| {
            let bar = self.layout.bar(hit.row, hit.partition, hit.index)?;
            Some((hit, bar.raw_value.clone()))
        });
        match bound {
            Some((hit, data)) => tooltip.controller.pointer_move(&hit, x, data),
            None => tooltip.controller.pointer_leave(),
        };
        Some(tooltip.controller.state())
    }

    pub fn pointer_leave(&mut self) -> Option<&HoverState<T>> {
        let tooltip = self.tooltip.as_mut()?;
        Some(tooltip.controller.pointer_leave())
    }

    pub fn hover(&self) -> Option<&HoverState<T>> {
        self.tooltip.as_ref().map(|tooltip| tooltip.controller.state())
    }

    pub fn tooltip_layer(&self) -> Option<TooltipLayer> {
        self.tooltip
            .as_ref()
            .map(|tooltip| TooltipLayer::render(tooltip.controller.state(), &tooltip.renderer))
    }

    pub fn render_svg(&self, now_ms: f64, theme: &Theme) -> String {
        render::render_svg(
            &self.snapshot(now_ms),
            theme,
            &self.config,
            self.tooltip_layer().as_ref(),
        )
    }

    fn relayout(&mut self, now_ms: f64) -> ReconcileStats {
        let plan = self.plan();
        self.scene.apply(&plan, &self.config, now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use crate::ir::Partition;

    fn chart() -> PvnChart<&'static str> {
        let mut chart = PvnChart::new(ChartConfig::default(), &Theme::dark()).unwrap();
        chart.resize(400.0, 0.0);
        chart
    }

    fn sample_rows() -> Arc<[Row<&'static str>]> {
        vec![
            Row::new("Growth")
                .with_point(10.0, "ten")
                .with_point(-5.0, "minus five"),
            Row::new("Value").with_point(3.0, "three"),
        ]
        .into()
    }

    fn settle<T: Clone + 'static>(chart: &mut PvnChart<T>) -> f64 {
        let settled = chart.settled_at();
        chart.tick(settled);
        settled
    }

    fn bar_center(snapshot: &Snapshot, row: usize, partition: Partition) -> (f64, f64) {
        let row = snapshot
            .rows
            .iter()
            .find(|r| r.index == Some(row))
            .unwrap();
        let bar = row
            .bars
            .iter()
            .find(|b| b.partition == partition && b.index == Some(0))
            .unwrap();
        (
            bar.style.left + bar.style.width / 2.0,
            bar.style.top + bar.style.height / 2.0,
        )
    }

    #[test]
    fn same_rows_reuse_the_memoized_layout() {
        let mut chart = chart();
        let rows = sample_rows();
        let first = chart.set_rows(rows.clone(), 0.0).unwrap();
        assert_eq!(first.rows.enter, 2);
        let layout = Arc::clone(chart.layout());

        let again = chart.set_rows(rows, 10.0).unwrap();
        assert_eq!(again, ReconcileStats::default());
        assert!(Arc::ptr_eq(&layout, chart.layout()));

        chart.set_rows(sample_rows(), 20.0).unwrap();
        assert!(!Arc::ptr_eq(&layout, chart.layout()));
    }

    #[test]
    fn invalid_rows_keep_previous_data() {
        let mut chart = chart();
        chart.set_rows(sample_rows(), 0.0).unwrap();
        let bad: Vec<Row<&str>> = vec![Row::new("Bad").with_point(f64::NAN, "nan")];
        let err = chart.set_rows(bad, 5.0).unwrap_err();
        assert!(matches!(err, ChartError::InvalidValue { row: 0, index: 0, .. }));
        assert_eq!(chart.rows().len(), 2);
        assert_eq!(chart.layout().rows.len(), 2);
    }

    #[test]
    fn pointer_events_are_ignored_without_tooltip() {
        let mut chart = chart();
        chart.set_rows(sample_rows(), 0.0).unwrap();
        let now = settle(&mut chart);
        assert!(chart.pointer_move(250.0, 19.0, now).is_none());
        assert!(chart.pointer_leave().is_none());
        assert!(chart.tooltip_layer().is_none());
    }

    #[test]
    fn hover_binds_raw_value_of_bar_under_pointer() {
        let mut chart = chart().with_tooltip(|state: &HoverState<&'static str>| {
            format!("<text>{}</text>", state.data.unwrap_or(""))
        });
        chart.set_rows(sample_rows(), 0.0).unwrap();
        let now = settle(&mut chart);
        let snapshot = chart.snapshot(now);

        let (x, y) = bar_center(&snapshot, 0, Partition::Negative);
        let state = chart.pointer_move(x, y, now).unwrap();
        assert_eq!(state.data, Some("minus five"));
        assert_eq!(state.left, x + 10.0);
        assert_eq!(state.top, -10.0);

        let (x, y) = bar_center(&snapshot, 1, Partition::Positive);
        let state = chart.pointer_move(x, y, now).unwrap();
        assert_eq!(state.data, Some("three"));
        assert_eq!(state.top, 38.0 - 10.0);

        let layer = chart.tooltip_layer().unwrap();
        assert!(layer.visible);
        assert_eq!(layer.markup, "<text>three</text>");
    }

    #[test]
    fn moving_off_bars_clears_hover() {
        let mut chart = chart().with_tooltip(|_: &HoverState<&'static str>| String::new());
        chart.set_rows(sample_rows(), 0.0).unwrap();
        let now = settle(&mut chart);
        let (x, y) = bar_center(&chart.snapshot(now), 0, Partition::Positive);
        chart.pointer_move(x, y, now);
        assert_eq!(chart.hover().unwrap().data, Some("ten"));

        let state = chart.pointer_move(x, 1_000.0, now).unwrap();
        assert!(!state.is_active());
        assert_eq!(state.left, x + 10.0);
        assert!(!chart.tooltip_layer().unwrap().visible);
    }

    #[test]
    fn new_rows_rebind_or_clear_hover() {
        let mut chart = chart()
            .with_tooltip(|state: &HoverState<&'static str>| state.data.unwrap_or("").to_string());
        chart.set_rows(sample_rows(), 0.0).unwrap();
        let now = settle(&mut chart);
        let (x, y) = bar_center(&chart.snapshot(now), 0, Partition::Negative);
        chart.pointer_move(x, y, now);
        assert_eq!(chart.hover().unwrap().data, Some("minus five"));

        let updated: Vec<Row<&str>> = vec![
            Row::new("Growth")
                .with_point(10.0, "ten")
                .with_point(-8.0, "minus eight"),
        ];
        chart.set_rows(updated, now).unwrap();
        assert_eq!(chart.hover().unwrap().data, Some("minus eight"));
        assert_eq!(chart.tooltip_layer().unwrap().markup, "minus eight");

        let positive_only: Vec<Row<&str>> = vec![Row::new("Growth").with_point(10.0, "ten")];
        chart.set_rows(positive_only, now + 1.0).unwrap();
        let layer = chart.tooltip_layer().unwrap();
        assert!(!layer.visible);
        assert_eq!(layer.markup, "");
    }

    #[test]
    fn debounced_resize_replans_after_quiet_period() {
        let mut chart: PvnChart<&'static str> =
            PvnChart::new(ChartConfig::default(), &Theme::dark()).unwrap();
        chart.mount(Size::new(400.0, 0.0), true, 0.0);
        chart.set_rows(sample_rows(), 0.0).unwrap();
        assert!(chart.is_mounted());
        assert_eq!(chart.observer_source(), Some(ObserverSource::Element));

        chart.notify_resize(Size::new(600.0, 0.0), 10.0);
        chart.tick(100.0);
        assert_eq!(chart.width(), 400.0);
        chart.tick(200.0);
        assert_eq!(chart.width(), 600.0);
        let settled = chart.settled_at();
        assert_eq!(chart.snapshot(settled).width, 600.0);
    }

    #[test]
    fn unmount_releases_observer_once() {
        let mut chart: PvnChart<()> =
            PvnChart::new(ChartConfig::default(), &Theme::dark()).unwrap();
        chart.mount(Size::new(300.0, 0.0), false, 0.0);
        assert_eq!(chart.observer_source(), Some(ObserverSource::Window));
        chart.unmount();
        chart.unmount();
        assert!(!chart.is_mounted());
        assert_eq!(chart.observer_source(), None);
        chart.notify_resize(Size::new(500.0, 0.0), 1.0);
        chart.tick(1_000.0);
        assert_eq!(chart.width(), 300.0);
    }

    #[test]
    fn empty_rows_render_placeholder() {
        let mut chart = chart();
        chart.set_rows(sample_rows(), 0.0).unwrap();
        chart.set_rows(Vec::<Row<&str>>::new(), 50.0).unwrap();
        let snapshot = chart.snapshot(50.0);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.height, 200.0);
        assert!(chart.render_svg(50.0, &Theme::dark()).contains("No Data"));
    }
}
