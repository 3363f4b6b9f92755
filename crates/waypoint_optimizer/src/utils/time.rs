/// Runs `$block` and reports its wall time under the `stage` field.
#[macro_export]
macro_rules! timer_debug {
    ($stage:literal, $block:expr) => {{
        let started_at = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(started_at);

        tracing::debug!(stage = $stage, ?elapsed, "stage finished");

        result
    }};
}
