/// Times `$block` and logs it when it runs longer than `$threshold_micros`.
/// Compiles down to the bare block unless `LOG_PERFORMANCE` is on.
#[macro_export]
macro_rules! trace_time {
    ($name:expr, $threshold_micros:expr, $block:block) => {{
        if $crate::config::LOG_PERFORMANCE {
            let started = $crate::utils::AppInstant::now();
            let result = $block;
            let micros = started.elapsed().as_micros();
            if micros > $threshold_micros {
                log::warn!(
                    "Slow {} build: '{}' took {:.3}ms (budget {:.3}ms)",
                    if cfg!(debug_assertions) { "debug" } else { "release" },
                    $name,
                    micros as f64 / 1000.0,
                    $threshold_micros as f64 / 1000.0
                );
            }
            result
        } else {
            $block
        }
    }};
}
