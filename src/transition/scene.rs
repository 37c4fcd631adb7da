use crate::config::{ChartConfig, RowKeying};
use crate::ir::Partition;
use crate::layout::{BarTarget, FramePlan, RowTarget, Style, TextTarget};

use super::join::Join;
use super::track::Track;

/// Exiting rows collapse to this height at the top of the plot.
const ROW_EXIT_HEIGHT: f64 = 10.0;

#[derive(Debug, Clone)]
struct Node {
    track: Track,
    text: String,
}

impl Node {
    fn entering(style: Style) -> Self {
        Self {
            track: Track::settled(style),
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct RowNode {
    key: String,
    track: Track,
    positive: Vec<Node>,
    negative: Vec<Node>,
    exiting_bars: Vec<(Partition, Node)>,
}

impl RowNode {
    fn entering(style: Style) -> Self {
        Self {
            key: String::new(),
            track: Track::settled(style),
            positive: Vec::new(),
            negative: Vec::new(),
            exiting_bars: Vec::new(),
        }
    }

    fn bars_mut(&mut self, partition: Partition) -> &mut Vec<Node> {
        match partition {
            Partition::Positive => &mut self.positive,
            Partition::Negative => &mut self.negative,
        }
    }

    fn tracks(&self) -> impl Iterator<Item = &Track> {
        std::iter::once(&self.track)
            .chain(self.positive.iter().map(|node| &node.track))
            .chain(self.negative.iter().map(|node| &node.track))
            .chain(self.exiting_bars.iter().map(|(_, node)| &node.track))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub enter: usize,
    pub update: usize,
    pub exit: usize,
}

impl JoinStats {
    fn record(&mut self, join: &Join) {
        self.enter += join.enter.len();
        self.update += join.update.len();
        self.exit += join.exit.len();
    }
}

/// Enter/update/exit counts of one reconciliation pass, per region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub rows: JoinStats,
    pub bars: JoinStats,
    pub labels: JoinStats,
    pub gridlines: JoinStats,
}

/// The retained set of rendered elements, animated between frame plans.
#[derive(Debug, Clone)]
pub struct Scene {
    keying: RowKeying,
    width: f64,
    height: f64,
    rows: Vec<RowNode>,
    exiting_rows: Vec<RowNode>,
    labels: Vec<Node>,
    gridlines: Vec<Node>,
    tick_labels: Vec<Node>,
    fading: Vec<(Region, Node)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Label,
    Gridline,
    TickLabel,
}

impl Scene {
    pub fn new(keying: RowKeying) -> Self {
        Self {
            keying,
            width: 0.0,
            height: 0.0,
            rows: Vec::new(),
            exiting_rows: Vec::new(),
            labels: Vec::new(),
            gridlines: Vec::new(),
            tick_labels: Vec::new(),
            fading: Vec::new(),
        }
    }

    /// Reconcile the retained elements against `plan`, starting every
    /// resulting transition at `now_ms`.
    pub fn apply(&mut self, plan: &FramePlan, config: &ChartConfig, now_ms: f64) -> ReconcileStats {
        self.width = plan.width;
        self.height = plan.height;
        let mut stats = ReconcileStats::default();

        if plan.is_empty() {
            // The plot regions are replaced by the placeholder outright.
            stats.rows.exit = self.rows.len();
            stats.labels.exit = self.labels.len();
            stats.gridlines.exit = self.gridlines.len();
            self.clear();
            tracing::debug!(exited = stats.rows.exit, "scene cleared for empty data");
            return stats;
        }

        let duration = config.transition_duration_ms;
        let join = match self.keying {
            RowKeying::Index => Join::by_index(self.rows.len(), plan.rows.len()),
            RowKeying::Label => {
                let previous: Vec<&str> = self.rows.iter().map(|row| row.key.as_str()).collect();
                let next: Vec<&str> = plan.rows.iter().map(|row| row.label.as_str()).collect();
                Join::by_key(&previous, &next)
            }
        };
        stats.rows.record(&join);
        stats.labels.record(&join);
        let sources = join.sources(plan.rows.len());

        let mut previous_rows: Vec<Option<RowNode>> =
            std::mem::take(&mut self.rows).into_iter().map(Some).collect();
        let mut previous_labels: Vec<Option<Node>> =
            std::mem::take(&mut self.labels).into_iter().map(Some).collect();

        for &idx in &join.exit {
            if let Some(mut row) = previous_rows.get_mut(idx).and_then(Option::take) {
                let current = row.track.sample(now_ms);
                let collapsed = Style {
                    top: 0.0,
                    height: ROW_EXIT_HEIGHT,
                    opacity: 0.0,
                    ..current
                };
                row.track.retarget(now_ms, collapsed, 0.0, duration);
                self.exiting_rows.push(row);
            }
            if let Some(label) = previous_labels.get_mut(idx).and_then(Option::take) {
                self.fade_out(Region::Label, label, now_ms, duration);
            }
        }

        for (idx, target) in plan.rows.iter().enumerate() {
            let source = sources[idx];
            let mut row = source
                .and_then(|prev| previous_rows.get_mut(prev).and_then(Option::take))
                .unwrap_or_else(|| RowNode::entering(plan.enter.row));
            row.key = target.label.clone();
            row.track.retarget(now_ms, target.style, config.stagger(idx), duration);
            for partition in [Partition::Positive, Partition::Negative] {
                let bars = reconcile_bars(&mut row, partition, target, plan, config, now_ms);
                stats.bars.enter += bars.enter;
                stats.bars.update += bars.update;
                stats.bars.exit += bars.exit;
            }
            self.rows.push(row);

            let label_target = &plan.labels[idx];
            let mut label = source
                .and_then(|prev| previous_labels.get_mut(prev).and_then(Option::take))
                .unwrap_or_else(|| Node::entering(label_target.style.faded()));
            label.text = label_target.text.clone();
            label.track.retarget(now_ms, label_target.style, config.stagger(idx), duration);
            self.labels.push(label);
        }

        let gridlines = std::mem::take(&mut self.gridlines);
        let (gridlines, gridline_stats) = self.reconcile_plain(
            Region::Gridline,
            gridlines,
            plan.ticks.iter().map(|tick| TextTarget {
                text: String::new(),
                style: tick.gridline,
            }),
            plan.enter.gridline,
            now_ms,
            duration,
        );
        self.gridlines = gridlines;
        stats.gridlines = gridline_stats;
        let tick_labels = std::mem::take(&mut self.tick_labels);
        let (tick_labels, _) = self.reconcile_plain(
            Region::TickLabel,
            tick_labels,
            plan.ticks.iter().map(|tick| tick.label.clone()),
            plan.enter.tick_label,
            now_ms,
            duration,
        );
        self.tick_labels = tick_labels;

        tracing::debug!(
            rows_enter = stats.rows.enter,
            rows_update = stats.rows.update,
            rows_exit = stats.rows.exit,
            bars_enter = stats.bars.enter,
            bars_update = stats.bars.update,
            bars_exit = stats.bars.exit,
            gridlines = self.gridlines.len(),
            "reconciled scene"
        );
        stats
    }

    /// Index-joined elements without stagger: gridlines and tick labels.
    fn reconcile_plain(
        &mut self,
        region: Region,
        previous: Vec<Node>,
        targets: impl ExactSizeIterator<Item = TextTarget>,
        enter: Style,
        now_ms: f64,
        duration: f64,
    ) -> (Vec<Node>, JoinStats) {
        let mut stats = JoinStats::default();
        stats.record(&Join::by_index(previous.len(), targets.len()));
        let mut previous = previous.into_iter();
        let mut nodes = Vec::with_capacity(targets.len());
        for target in targets {
            let mut node = previous.next().unwrap_or_else(|| Node::entering(enter));
            node.text = target.text;
            node.track.retarget(now_ms, target.style, 0.0, duration);
            nodes.push(node);
        }
        for node in previous {
            self.fade_out(region, node, now_ms, duration);
        }
        (nodes, stats)
    }

    fn fade_out(&mut self, region: Region, mut node: Node, now_ms: f64, duration: f64) {
        let current = node.track.sample(now_ms);
        node.track.retarget(now_ms, current.faded(), 0.0, duration);
        self.fading.push((region, node));
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.exiting_rows.clear();
        self.labels.clear();
        self.gridlines.clear();
        self.tick_labels.clear();
        self.fading.clear();
    }

    /// Detach every exiting element whose transition has completed.
    /// Returns whether anything is still animating.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        self.exiting_rows.retain(|row| !row.track.is_finished(now_ms));
        for row in self.rows.iter_mut().chain(self.exiting_rows.iter_mut()) {
            row.exiting_bars.retain(|(_, node)| !node.track.is_finished(now_ms));
        }
        self.fading.retain(|(_, node)| !node.track.is_finished(now_ms));
        self.is_animating(now_ms)
    }

    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.tracks().any(|track| !track.is_finished(now_ms))
    }

    /// Frame-clock time at which every scheduled transition has finished.
    pub fn settled_at(&self) -> f64 {
        self.tracks().map(Track::end_ms).fold(0.0, f64::max)
    }

    fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.rows
            .iter()
            .chain(self.exiting_rows.iter())
            .flat_map(RowNode::tracks)
            .chain(self.labels.iter().map(|node| &node.track))
            .chain(self.gridlines.iter().map(|node| &node.track))
            .chain(self.tick_labels.iter().map(|node| &node.track))
            .chain(self.fading.iter().map(|(_, node)| &node.track))
    }

    /// Interpolated geometry of every attached element at `now_ms`. Bars
    /// are reported in plot coordinates.
    pub fn snapshot(&self, now_ms: f64) -> Snapshot {
        let row_snapshot = |row: &RowNode, index: Option<usize>| {
            let style = row.track.sample(now_ms);
            let place = |partition: Partition, bar_index: Option<usize>, node: &Node| {
                let bar = node.track.sample(now_ms);
                BarSnapshot {
                    partition,
                    index: bar_index,
                    style: Style {
                        left: style.left + bar.left,
                        top: style.top + bar.top,
                        opacity: style.opacity * bar.opacity,
                        ..bar
                    },
                }
            };
            let mut bars = Vec::new();
            for (partition, node) in &row.exiting_bars {
                bars.push(place(*partition, None, node));
            }
            for (idx, node) in row.positive.iter().enumerate() {
                let bar_index = index.map(|_| idx);
                bars.push(place(Partition::Positive, bar_index, node));
            }
            for (idx, node) in row.negative.iter().enumerate() {
                let bar_index = index.map(|_| idx);
                bars.push(place(Partition::Negative, bar_index, node));
            }
            RowSnapshot {
                index,
                label: row.key.clone(),
                style,
                bars,
            }
        };

        let mut rows: Vec<RowSnapshot> = self
            .exiting_rows
            .iter()
            .map(|row| row_snapshot(row, None))
            .collect();
        rows.extend(
            self.rows
                .iter()
                .enumerate()
                .map(|(idx, row)| row_snapshot(row, Some(idx))),
        );

        let text = |node: &Node| TextSnapshot {
            text: node.text.clone(),
            style: node.track.sample(now_ms),
        };
        let fading = |region: Region| {
            self.fading
                .iter()
                .filter(move |(r, _)| *r == region)
                .map(|(_, node)| node)
        };

        Snapshot {
            width: self.width,
            height: self.height,
            row_count: self.rows.len(),
            rows,
            labels: fading(Region::Label).chain(self.labels.iter()).map(text).collect(),
            gridlines: fading(Region::Gridline)
                .chain(self.gridlines.iter())
                .map(|node| node.track.sample(now_ms))
                .collect(),
            tick_labels: fading(Region::TickLabel)
                .chain(self.tick_labels.iter())
                .map(text)
                .collect(),
        }
    }
}

fn reconcile_bars(
    row: &mut RowNode,
    partition: Partition,
    target: &RowTarget,
    plan: &FramePlan,
    config: &ChartConfig,
    now_ms: f64,
) -> JoinStats {
    let targets: &[BarTarget] = target.bars(partition);
    let duration = config.transition_duration_ms;
    let previous = std::mem::take(row.bars_mut(partition));
    let join = Join::by_index(previous.len(), targets.len());
    let mut stats = JoinStats::default();
    stats.record(&join);

    let mut previous = previous.into_iter();
    let mut bars = Vec::with_capacity(targets.len());
    for (idx, bar) in targets.iter().enumerate() {
        let mut node = previous.next().unwrap_or_else(|| Node::entering(plan.enter.bar));
        node.track.retarget(now_ms, bar.style, config.stagger(idx), duration);
        bars.push(node);
    }
    for mut node in previous {
        let current = node.track.sample(now_ms);
        let collapsed = Style {
            left: plan.center_x(),
            width: 0.0,
            ..current
        };
        node.track.retarget(now_ms, collapsed, 0.0, duration);
        row.exiting_bars.push((partition, node));
    }
    *row.bars_mut(partition) = bars;
    stats
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSnapshot {
    pub partition: Partition,
    /// Position in the row's partition; `None` while the bar is exiting.
    pub index: Option<usize>,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowSnapshot {
    /// Position in the current data; `None` while the row is exiting.
    pub index: Option<usize>,
    pub label: String,
    pub style: Style,
    pub bars: Vec<BarSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextSnapshot {
    pub text: String,
    pub style: Style,
}

/// A bar under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarHit {
    pub row: usize,
    pub partition: Partition,
    pub index: usize,
    pub bar: Style,
    pub row_top: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub width: f64,
    pub height: f64,
    /// Rows bound to current data (exiting rows excluded).
    pub row_count: usize,
    pub rows: Vec<RowSnapshot>,
    pub labels: Vec<TextSnapshot>,
    pub gridlines: Vec<Style>,
    pub tick_labels: Vec<TextSnapshot>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// The topmost live bar containing the plot-space point `(x, y)`.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<BarHit> {
        self.rows.iter().rev().find_map(|row| {
            let row_index = row.index?;
            row.bars.iter().rev().find_map(|bar| {
                let index = bar.index?;
                bar.style.contains(x, y).then_some(BarHit {
                    row: row_index,
                    partition: bar.partition,
                    index,
                    bar: bar.style,
                    row_top: row.style.top,
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Row;
    use crate::layout::{compute_layout, plan_frame};
    use crate::theme::ColorMapper;

    const WIDTH: f64 = 400.0;

    fn plan_for(rows: &[Row<()>]) -> FramePlan {
        plan_frame(
            &compute_layout(rows),
            WIDTH,
            &ChartConfig::default(),
            &ColorMapper::default(),
        )
    }

    fn scene_with(keying: RowKeying, rows: &[Row<()>]) -> Scene {
        let mut scene = Scene::new(keying);
        scene.apply(&plan_for(rows), &ChartConfig::default(), 0.0);
        let settled = scene.settled_at();
        scene.advance(settled);
        scene
    }

    #[test]
    fn first_pass_enters_everything_from_the_centre() {
        let rows = vec![Row::from_values("a", &[100.0, -50.0])];
        let mut scene = Scene::new(RowKeying::Index);
        let stats = scene.apply(&plan_for(&rows), &ChartConfig::default(), 0.0);
        assert_eq!(stats.rows, JoinStats { enter: 1, update: 0, exit: 0 });
        assert_eq!(stats.bars.enter, 2);
        assert!(stats.gridlines.enter > 0);

        let start = scene.snapshot(0.0);
        let row = &start.rows[0];
        assert_eq!(row.style.opacity, 0.0);
        assert_eq!(row.style.top, 19.0);
        assert!(row.bars.iter().all(|bar| bar.style.width == 0.0));

        let end = scene.snapshot(scene.settled_at());
        let row = &end.rows[0];
        assert_eq!(row.style.opacity, 1.0);
        assert_eq!(row.style.top, 0.0);
        assert_eq!(row.style.width, WIDTH);
        let positive = row.bars.iter().find(|bar| bar.partition == Partition::Positive).unwrap();
        assert_eq!(positive.style.left, 200.0);
        assert_eq!(positive.style.width, 200.0);
    }

    #[test]
    fn bars_and_rows_are_staggered_by_index() {
        let rows = vec![
            Row::from_values("a", &[1.0, 2.0, 3.0]),
            Row::from_values("b", &[1.0]),
        ];
        let mut scene = Scene::new(RowKeying::Index);
        let config = ChartConfig::default();
        scene.apply(&plan_for(&rows), &config, 0.0);
        // Row 1 and bar 2 wait two and one stagger steps before moving.
        let snapshot = scene.snapshot(config.transition_delay_ms);
        assert_eq!(snapshot.rows[1].style.opacity, 0.0);
        let third_bar = snapshot.rows[0]
            .bars
            .iter()
            .filter(|bar| bar.partition == Partition::Positive)
            .nth(2)
            .unwrap();
        assert_eq!(third_bar.style.width, 0.0);
        assert_eq!(
            scene.settled_at(),
            config.stagger(2) + config.transition_duration_ms
        );
    }

    #[test]
    fn gridlines_and_tick_labels_spread_out_from_the_centre() {
        let rows = vec![Row::from_values("a", &[100.0, -50.0])];
        let config = ChartConfig::default();
        let plan = plan_for(&rows);
        let mut scene = Scene::new(RowKeying::Index);
        scene.apply(&plan, &config, 0.0);

        let centre = WIDTH / 2.0;
        assert_eq!(plan.enter.gridline.left, centre);
        let start = scene.snapshot(0.0);
        assert_eq!(start.gridlines.len(), plan.ticks.len());
        assert!(start.gridlines.iter().all(|line| line.left == centre));
        assert!(start
            .tick_labels
            .iter()
            .all(|label| label.style.left == centre - config.tick_label_width / 2.0));

        // Gridlines are not staggered, so they are already on their way.
        let early = scene.snapshot(config.stagger(1));
        let outer = early.gridlines.last().unwrap();
        assert!(outer.left > centre && outer.left < WIDTH);

        let end = scene.snapshot(config.transition_duration_ms);
        for (tick, (line, label)) in plan
            .ticks
            .iter()
            .zip(end.gridlines.iter().zip(&end.tick_labels))
        {
            assert_eq!(line.left, tick.gridline.left);
            assert_eq!(label.style.left, tick.label.style.left);
            assert_eq!(label.text, tick.label.text);
        }
        assert_eq!(end.gridlines.last().unwrap().left, WIDTH);
        assert_eq!(end.tick_labels.last().unwrap().text, "100");
    }

    #[test]
    fn row_labels_fade_in_with_row_stagger() {
        let rows = vec![Row::from_values("a", &[1.0]), Row::from_values("b", &[-1.0])];
        let config = ChartConfig::default();
        let plan = plan_for(&rows);
        let mut scene = Scene::new(RowKeying::Index);
        scene.apply(&plan, &config, 0.0);

        let start = scene.snapshot(0.0);
        assert_eq!(start.labels.len(), 2);
        for (label, target) in start.labels.iter().zip(&plan.labels) {
            assert_eq!(label.style.opacity, 0.0);
            assert_eq!(label.style.top, target.style.top);
        }

        let early = scene.snapshot(config.stagger(1));
        assert!(early.labels[0].style.opacity > 0.0);
        assert_eq!(early.labels[1].style.opacity, 0.0);

        let second_done = config.stagger(1) + config.transition_duration_ms;
        let late = scene.snapshot(config.transition_duration_ms);
        assert_eq!(late.labels[0].style.opacity, 1.0);
        assert!(late.labels[1].style.opacity < 1.0);
        let end = scene.snapshot(second_done);
        assert_eq!(end.labels[1].style.opacity, 1.0);
        assert_eq!(end.labels[1].text, "b");
        assert_eq!(end.labels[1].style.top, 38.0 + 19.0 - 8.0);
    }

    #[test]
    fn removed_rows_collapse_then_detach() {
        let mut scene = scene_with(
            RowKeying::Index,
            &[Row::from_values("a", &[1.0]), Row::from_values("b", &[2.0])],
        );
        let stats = scene.apply(
            &plan_for(&[Row::from_values("a", &[1.0])]),
            &ChartConfig::default(),
            1_000.0,
        );
        assert_eq!(stats.rows, JoinStats { enter: 0, update: 1, exit: 1 });

        let during = scene.snapshot(1_000.0);
        assert_eq!(during.rows.len(), 2);
        assert_eq!(during.row_count, 1);
        assert_eq!(during.rows[0].index, None);

        let end = scene.settled_at();
        let after = scene.snapshot(end);
        let exiting = &after.rows[0];
        assert_eq!(exiting.style.opacity, 0.0);
        assert_eq!(exiting.style.height, ROW_EXIT_HEIGHT);
        assert_eq!(exiting.style.top, 0.0);

        assert!(!scene.advance(end));
        assert_eq!(scene.snapshot(end).rows.len(), 1);
    }

    #[test]
    fn removed_bars_collapse_to_zero_line() {
        let mut scene = scene_with(RowKeying::Index, &[Row::from_values("a", &[10.0, 20.0, -5.0])]);
        let stats = scene.apply(
            &plan_for(&[Row::from_values("a", &[10.0])]),
            &ChartConfig::default(),
            500.0,
        );
        assert_eq!(stats.bars.exit, 2);
        let end = scene.settled_at();
        let snapshot = scene.snapshot(end);
        let exiting: Vec<_> = snapshot.rows[0]
            .bars
            .iter()
            .filter(|bar| bar.index.is_none())
            .collect();
        assert_eq!(exiting.len(), 2);
        for bar in exiting {
            assert_eq!(bar.style.width, 0.0);
            assert_eq!(bar.style.left, WIDTH / 2.0);
        }
        scene.advance(end);
        assert_eq!(scene.snapshot(end).rows[0].bars.len(), 1);
    }

    #[test]
    fn label_keying_carries_rows_by_identity() {
        let mut scene = scene_with(
            RowKeying::Label,
            &[Row::from_values("a", &[1.0]), Row::from_values("b", &[1.0])],
        );
        let stats = scene.apply(
            &plan_for(&[Row::from_values("b", &[1.0]), Row::from_values("c", &[1.0])]),
            &ChartConfig::default(),
            1_000.0,
        );
        assert_eq!(stats.rows, JoinStats { enter: 1, update: 1, exit: 1 });
        let snapshot = scene.snapshot(1_000.0);
        let carried = snapshot.rows.iter().find(|row| row.index == Some(0)).unwrap();
        assert_eq!(carried.label, "b");
        assert_eq!(carried.style.top, 38.0);
        assert_eq!(carried.style.opacity, 1.0);
    }

    #[test]
    fn empty_plan_clears_scene() {
        let mut scene = scene_with(RowKeying::Index, &[Row::from_values("a", &[1.0])]);
        let stats = scene.apply(&plan_for(&[]), &ChartConfig::default(), 10.0);
        assert_eq!(stats.rows.exit, 1);
        let snapshot = scene.snapshot(10.0);
        assert!(snapshot.is_empty());
        assert!(snapshot.rows.is_empty());
        assert!(snapshot.gridlines.is_empty());
        assert!(!scene.is_animating(10.0));
    }

    #[test]
    fn hit_test_finds_live_bars_only() {
        let scene = scene_with(RowKeying::Index, &[Row::from_values("a", &[100.0, -100.0])]);
        let snapshot = scene.snapshot(scene.settled_at());
        let hit = snapshot.hit_test(300.0, 10.0).unwrap();
        assert_eq!(hit.row, 0);
        assert_eq!(hit.partition, Partition::Positive);
        assert_eq!(hit.index, 0);
        let hit = snapshot.hit_test(50.0, 10.0).unwrap();
        assert_eq!(hit.partition, Partition::Negative);
        assert!(snapshot.hit_test(300.0, 2.0).is_none());
    }

    #[test]
    fn removed_ticks_fade_out() {
        let mut scene = scene_with(RowKeying::Index, &[Row::from_values("a", &[100.0])]);
        let before = scene.snapshot(scene.settled_at()).gridlines.len();
        // Fewer requested ticks means a coarser step over the same domain.
        let config = ChartConfig {
            tick_count: 2,
            ..ChartConfig::default()
        };
        let plan = plan_frame(
            &compute_layout(&[Row::from_values("a", &[100.0])]),
            WIDTH,
            &config,
            &ColorMapper::default(),
        );
        let stats = scene.apply(&plan, &config, 1_000.0);
        assert_eq!(stats.gridlines.exit, before - plan.ticks.len());
        let end = scene.settled_at();
        let snapshot = scene.snapshot(end);
        let faded = snapshot.gridlines.iter().filter(|style| style.opacity == 0.0).count();
        assert_eq!(faded, before - plan.ticks.len());
        scene.advance(end);
        assert_eq!(scene.snapshot(end).gridlines.len(), plan.ticks.len());
    }
}
