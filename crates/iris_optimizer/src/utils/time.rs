#[macro_export]
macro_rules! timer_debug {
    ($label:expr, $block:expr) => {{
        let start = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(start);

        tracing::debug!(?elapsed, "{} finished", $label);

        result
    }};
}
