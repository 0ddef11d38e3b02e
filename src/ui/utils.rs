use {
    crate::{
        ui::UI_CONFIG,
        utils::{S_IN_H, format_axis_time},
    },
    chrono::FixedOffset,
    eframe::egui::{Context, Visuals},
    egui_plot::{AxisHints, GridInput, GridMark},
};

/// Inserts `,` every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn with_grouping(formatted: &str) -> String {
    let (sign, body) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    match body.split_once('.') {
        Some((int, frac)) => format!("{}{}.{}", sign, group_thousands(int), frac),
        None => format!("{}{}", sign, group_thousands(body)),
    }
}

/// Shortest representation with thousands separators: `150`, `43,210.5`.
pub fn format_thousands(value: f64) -> String {
    with_grouping(&format!("{}", value))
}

/// Rounded to `decimals` with thousands separators: `12,346` for `(12345.6, 0)`.
pub fn format_thousands_fixed(value: f64, decimals: usize) -> String {
    with_grouping(&format!("{:.*}", decimals, round_half_away(value, decimals)))
}

fn round_half_away(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let r = (value * scale).round() / scale;
    if r == 0.0 { 0.0 } else { r }
}

pub fn format_mw(value: f64) -> String {
    format!("{} MW", format_thousands(value))
}

fn dollars(value: f64, decimals: usize, force_sign: bool) -> String {
    let r = round_half_away(value, decimals);
    let sign = if r < 0.0 {
        "-"
    } else if force_sign {
        "+"
    } else {
        ""
    };
    format!("{}${:.*}", sign, decimals, r.abs())
}

/// `$42`, `-$5`.
pub fn format_whole_dollars(value: f64) -> String {
    dollars(value, 0, false)
}

/// `$42.10`.
pub fn format_price(value: f64) -> String {
    dollars(value, 2, false)
}

/// `+$1.20`, `-$0.75`.
pub fn format_signed_price(value: f64) -> String {
    dollars(value, 2, true)
}

pub fn format_price_or_na(value: Option<f64>) -> String {
    value.map(format_price).unwrap_or_else(|| "N/A".to_string())
}

/// `power_storage` -> `Power Storage`.
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

// Calendar-friendly tick steps for the shared time axis.
const TIME_STEPS_H: [f64; 7] = [1.0, 2.0, 3.0, 6.0, 12.0, 24.0, 48.0];

/// Picks the smallest step giving at most `target` ticks across `span_s` seconds.
pub fn time_step_s(span_s: f64, target: f64) -> f64 {
    TIME_STEPS_H
        .iter()
        .map(|h| h * S_IN_H)
        .find(|step| span_s / step <= target)
        .unwrap_or(TIME_STEPS_H[TIME_STEPS_H.len() - 1] * S_IN_H)
}

/// Time grid aligned to whole hours of the display offset.
pub fn time_grid_marks(input: GridInput, offset: FixedOffset) -> Vec<GridMark> {
    let (min, max) = input.bounds;
    if !(max > min) {
        return Vec::new();
    }
    let shift = offset.local_minus_utc() as f64;
    let step = time_step_s(max - min, 10.0);
    let start = ((min + shift) / step).ceil() as i64;
    let end = ((max + shift) / step).floor() as i64;
    (start..=end)
        .map(|i| GridMark {
            value: i as f64 * step - shift,
            step_size: step,
        })
        .collect()
}

pub fn time_axis_hints(offset: FixedOffset) -> AxisHints<'static> {
    AxisHints::new_x()
        .label("Time")
        .formatter(move |mark, _range| format_axis_time(mark.value, offset))
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}
