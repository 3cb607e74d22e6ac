use std::collections::BTreeMap;
use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::format::format_money;
use crate::model::ChartSeries;

pub const NO_DATA: &str = "No data available";

pub const PIE_COLORS: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

const LINE_COLOR: &str = "#007bff";
const LINE_FILL: &str = "rgba(0, 123, 255, 0.1)";
const AXIS_COLOR: &str = "#94a3b8";
const PADDING: f64 = 36.0;

/// Drawing primitives the charts need from a 2D canvas.
pub trait ChartSurface {
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn text(&mut self, text: &str, x: f64, y: f64, color: &str);
    fn wedge(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: &str);
    fn polyline(&mut self, points: &[(f64, f64)], color: &str, width: f64);
    fn polygon(&mut self, points: &[(f64, f64)], color: &str);
}

/// Something occupying a chart slot that must be released before the slot
/// is reused.
pub trait ChartHandle {
    fn destroy(&mut self);
}

/// Owns at most one live chart. `replace` always destroys the current chart
/// before the next one is drawn.
pub struct ChartSlot<H: ChartHandle> {
    live: Option<H>,
}

impl<H: ChartHandle> Default for ChartSlot<H> {
    fn default() -> Self {
        ChartSlot { live: None }
    }
}

impl<H: ChartHandle> ChartSlot<H> {
    pub fn replace(&mut self, draw: impl FnOnce() -> Option<H>) {
        self.dispose();
        self.live = draw();
    }

    pub fn dispose(&mut self) {
        if let Some(mut chart) = self.live.take() {
            chart.destroy();
        }
    }

    pub fn live(&self) -> Option<&H> {
        self.live.as_ref()
    }
}

impl<H: ChartHandle> Drop for ChartSlot<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartKind {
    Placeholder,
    Pie,
    Line,
}

pub struct DrawnChart<S: ChartSurface> {
    pub kind: ChartKind,
    surface: S,
}

impl<S: ChartSurface> ChartHandle for DrawnChart<S> {
    fn destroy(&mut self) {
        self.surface.clear();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub start: f64,
    pub end: f64,
    pub color: &'static str,
}

/// Slices start at twelve o'clock and run clockwise. Non-positive totals
/// get no slice.
pub fn pie_slices(totals: &BTreeMap<String, f64>) -> Vec<PieSlice> {
    let sum: f64 = totals.values().filter(|v| **v > 0.0).sum();
    if sum <= 0.0 {
        return Vec::new();
    }
    let mut angle = -PI / 2.0;
    totals
        .iter()
        .enumerate()
        .filter(|(_, (_, value))| **value > 0.0)
        .map(|(idx, (label, value))| {
            let sweep = value / sum * 2.0 * PI;
            let slice = PieSlice {
                label: label.clone(),
                value: *value,
                start: angle,
                end: angle + sweep,
                color: PIE_COLORS[idx % PIE_COLORS.len()],
            };
            angle += sweep;
            slice
        })
        .collect()
}

pub fn legend_entries(totals: &BTreeMap<String, f64>, symbol: &str) -> Vec<(&'static str, String)> {
    totals
        .iter()
        .enumerate()
        .map(|(idx, (label, value))| {
            (
                PIE_COLORS[idx % PIE_COLORS.len()],
                format!("{}: {}", label, format_money(*value, symbol)),
            )
        })
        .collect()
}

/// Plot coordinates for the series inside a `width` x `height` area. The y
/// axis starts at zero.
pub fn line_points(data: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    if data.is_empty() {
        return Vec::new();
    }
    let max = data.iter().cloned().fold(0.0_f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };
    let plot_w = (width - 2.0 * PADDING).max(1.0);
    let plot_h = (height - 2.0 * PADDING).max(1.0);
    let step = if data.len() > 1 {
        plot_w / (data.len() - 1) as f64
    } else {
        0.0
    };
    data.iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if data.len() > 1 {
                PADDING + step * i as f64
            } else {
                PADDING + plot_w / 2.0
            };
            let y = PADDING + plot_h - (v.max(0.0) / max) * plot_h;
            (x, y)
        })
        .collect()
}

fn placeholder<S: ChartSurface>(mut surface: S) -> DrawnChart<S> {
    surface.text(NO_DATA, 10.0, 50.0, AXIS_COLOR);
    DrawnChart {
        kind: ChartKind::Placeholder,
        surface,
    }
}

pub fn draw_category<S: ChartSurface>(mut surface: S, totals: &BTreeMap<String, f64>) -> DrawnChart<S> {
    let slices = pie_slices(totals);
    if slices.is_empty() {
        return placeholder(surface);
    }
    let (w, h) = surface.size();
    let radius = (w.min(h) / 2.0 - 8.0).max(1.0);
    for slice in &slices {
        surface.wedge(w / 2.0, h / 2.0, radius, slice.start, slice.end, slice.color);
    }
    DrawnChart {
        kind: ChartKind::Pie,
        surface,
    }
}

pub fn draw_monthly<S: ChartSurface>(mut surface: S, series: &ChartSeries, symbol: &str) -> DrawnChart<S> {
    if series.is_empty() {
        return placeholder(surface);
    }
    let points = series.points();
    let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
    let (w, h) = surface.size();
    let coords = line_points(&values, w, h);
    let baseline = h - PADDING;

    let axis = [(PADDING, PADDING), (PADDING, baseline), (w - PADDING, baseline)];
    surface.polyline(&axis, AXIS_COLOR, 1.0);

    if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
        let mut area = Vec::with_capacity(coords.len() + 2);
        area.push((first.0, baseline));
        area.extend(coords.iter().copied());
        area.push((last.0, baseline));
        surface.polygon(&area, LINE_FILL);
    }
    surface.polyline(&coords, LINE_COLOR, 2.0);

    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    surface.text(&format!("{}{}", symbol, max), 2.0, PADDING - 6.0, AXIS_COLOR);
    surface.text(&format!("{}0", symbol), 2.0, baseline, AXIS_COLOR);
    for ((label, _), (x, _)) in points.iter().zip(coords.iter()) {
        surface.text(label, x - 20.0, baseline + 18.0, AXIS_COLOR);
    }

    DrawnChart {
        kind: ChartKind::Line,
        surface,
    }
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_node(node: &NodeRef) -> Option<Self> {
        let canvas = node.cast::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasSurface { canvas, ctx })
    }
}

impl ChartSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn text(&mut self, text: &str, x: f64, y: f64, color: &str) {
        self.ctx.set_font("12px Arial");
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn wedge(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, radius, start, end);
        ctx.close_path();
        ctx.fill();
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: &str, width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width);
        ctx.begin_path();
        ctx.move_to(first.0, first.1);
        for p in rest {
            ctx.line_to(p.0, p.1);
        }
        ctx.stroke();
    }

    fn polygon(&mut self, points: &[(f64, f64)], color: &str) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let ctx = &self.ctx;
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.move_to(first.0, first.1);
        for p in rest {
            ctx.line_to(p.0, p.1);
        }
        ctx.close_path();
        ctx.fill();
    }
}

fn log_drawn<S: ChartSurface>(slot: &str, chart: Option<&DrawnChart<S>>) {
    match chart {
        Some(chart) => log::debug!("{slot} chart drawn as {:?}", chart.kind),
        None => log::warn!("{slot} chart slot is empty after redraw"),
    }
}

#[derive(Properties, PartialEq)]
pub struct CategoryChartProps {
    pub totals: BTreeMap<String, f64>,
    pub currency_symbol: String,
}

#[function_component(CategoryChart)]
pub fn category_chart(props: &CategoryChartProps) -> Html {
    let canvas_ref = use_node_ref();
    let slot = use_mut_ref(ChartSlot::<DrawnChart<CanvasSurface>>::default);

    {
        let canvas_ref = canvas_ref.clone();
        let slot = slot.clone();
        use_effect_with_deps(
            move |totals: &BTreeMap<String, f64>| {
                if let Some(surface) = CanvasSurface::from_node(&canvas_ref) {
                    let mut slot = slot.borrow_mut();
                    slot.replace(|| Some(draw_category(surface, totals)));
                    log_drawn("category", slot.live());
                }
                || ()
            },
            props.totals.clone(),
        );
    }

    html! {
        <div>
            <canvas id="categoryChart" ref={canvas_ref} width="320" height="320" class="mx-auto max-w-full"></canvas>
            <ul class="mt-4 flex flex-wrap gap-3 justify-center text-xs text-muted-foreground">
                { for legend_entries(&props.totals, &props.currency_symbol).into_iter().map(|(color, label)| html! {
                    <li class="flex items-center gap-1">
                        <span class="inline-block w-3 h-3 rounded-sm" style={format!("background-color: {}", color)}></span>
                        { label }
                    </li>
                }) }
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MonthlyChartProps {
    pub series: ChartSeries,
    pub currency_symbol: String,
}

#[function_component(MonthlyChart)]
pub fn monthly_chart(props: &MonthlyChartProps) -> Html {
    let canvas_ref = use_node_ref();
    let slot = use_mut_ref(ChartSlot::<DrawnChart<CanvasSurface>>::default);

    {
        let canvas_ref = canvas_ref.clone();
        let slot = slot.clone();
        use_effect_with_deps(
            move |(series, symbol): &(ChartSeries, String)| {
                if let Some(surface) = CanvasSurface::from_node(&canvas_ref) {
                    let mut slot = slot.borrow_mut();
                    slot.replace(|| Some(draw_monthly(surface, series, symbol)));
                    log_drawn("monthly", slot.live());
                }
                || ()
            },
            (props.series.clone(), props.currency_symbol.clone()),
        );
    }

    html! {
        <canvas id="monthlyChart" ref={canvas_ref} width="560" height="300" class="w-full"></canvas>
    }
}
