use std::sync::LazyLock;

pub struct UiText {
    pub app_title: String,

    // --- Header cards ---
    pub card_peak_demand: String,
    pub card_max_rt_price: String,
    pub card_max_spread: String,
    pub card_pending: String,
    pub label_not_available: String,
    pub button_reset_window: String,
    pub label_window: String,
    pub label_full_range: String,

    // --- Chart headings ---
    pub heading_demand: String,
    pub heading_hub_price: String,
    pub heading_fuel_mix: String,
    pub heading_treemap: String,
    pub heading_heatmap: String,
    pub hint_brush: String,
    pub hint_heatmap_click: String,

    // --- Demand ---
    pub legend_current_forecast: String,
    pub legend_actual: String,
    pub legend_day_ahead_forecast: String,
    pub tt_actual: String,
    pub tt_current_forecast: String,
    pub tt_day_ahead_forecast: String,
    pub tt_forecast_error: String,
    pub tt_day_ahead_error: String,
    pub axis_mw: String,

    // --- Hub price ---
    pub label_location: String,
    pub legend_selected_rt: String,
    pub legend_selected_da: String,
    pub legend_system_rt: String,
    pub legend_system_da: String,
    pub tt_rt_price: String,
    pub tt_da_price: String,
    pub tt_spread: String,
    pub tt_system_rt: String,
    pub tt_system_da: String,
    pub tt_system_spread: String,
    pub axis_price: String,

    // --- Fuel mix / treemap ---
    pub tt_total_generation: String,
    pub tt_sum_over_period: String,
    pub tt_share_of_mix: String,

    // --- Heatmap ---
    pub tt_price: String,
    pub tt_system_avg: String,
    pub tt_deviation: String,
    pub legend_price: String,

    // --- Load status ---
    pub ls_title: String,
    pub ls_loading: String,
    pub ls_failed: String,
    pub ls_rows: String,
    pub ls_waiting: String,
    pub ls_all_settled: String,
    pub label_warning: String,
    pub label_failures: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "Grid Lens".to_string(),

    card_peak_demand: "Peak Demand".to_string(),
    card_max_rt_price: "Max RT Price".to_string(),
    card_max_spread: "Max RT-DA Spread".to_string(),
    card_pending: "...".to_string(),
    label_not_available: "N/A".to_string(),
    button_reset_window: "Reset time window".to_string(),
    label_window: "Window".to_string(),
    label_full_range: "Full range".to_string(),

    heading_demand: "System Demand".to_string(),
    heading_hub_price: "Hub / Zone Price".to_string(),
    heading_fuel_mix: "Fuel Mix".to_string(),
    heading_treemap: "Fuel Mix Share".to_string(),
    heading_heatmap: "LMP Heatmap".to_string(),
    hint_brush: "Drag to select a time window. Click to clear. Esc resets.".to_string(),
    hint_heatmap_click: "Click a cell to show that location in the price chart.".to_string(),

    legend_current_forecast: "Current Forecast".to_string(),
    legend_actual: "Actual Hourly Avg".to_string(),
    legend_day_ahead_forecast: "Day-Ahead Forecast".to_string(),
    tt_actual: "Actual".to_string(),
    tt_current_forecast: "Current Forecast".to_string(),
    tt_day_ahead_forecast: "Day-Ahead Forecast".to_string(),
    tt_forecast_error: "Error vs Current".to_string(),
    tt_day_ahead_error: "Error vs Day-Ahead".to_string(),
    axis_mw: "MW".to_string(),

    label_location: "Location".to_string(),
    legend_selected_rt: "Selected Hub/Zone (RT)".to_string(),
    legend_selected_da: "Selected Hub/Zone (DA)".to_string(),
    legend_system_rt: "System Avg (RT)".to_string(),
    legend_system_da: "System Avg (DA)".to_string(),
    tt_rt_price: "RT Price".to_string(),
    tt_da_price: "DA Price".to_string(),
    tt_spread: "Spread (RT - DA)".to_string(),
    tt_system_rt: "System RT".to_string(),
    tt_system_da: "System DA".to_string(),
    tt_system_spread: "System Spread".to_string(),
    axis_price: "$/MWh".to_string(),

    tt_total_generation: "Total Generation".to_string(),
    tt_sum_over_period: "(sum over period)".to_string(),
    tt_share_of_mix: "Share of Mix".to_string(),

    tt_price: "Price".to_string(),
    tt_system_avg: "System Avg".to_string(),
    tt_deviation: "Deviation".to_string(),
    legend_price: "Price ($/MWh)".to_string(),

    ls_title: "Loading datasets".to_string(),
    ls_loading: "Loading".to_string(),
    ls_failed: "FAILED".to_string(),
    ls_rows: "rows".to_string(),
    ls_waiting: "Waiting for data...".to_string(),
    ls_all_settled: "All datasets settled".to_string(),
    label_warning: "Warning:".to_string(),
    label_failures: "failed".to_string(),
});
