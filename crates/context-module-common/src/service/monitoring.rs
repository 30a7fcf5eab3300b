/// Evaluate an expression and return it together with the time it took.
#[macro_export]
macro_rules! measure_duration {
    ($e: expr) => {{
        let now = std::time::Instant::now();

        let result = $e;
        (result, now.elapsed())
    }};
}

/// Emit a metric as a `tracing` event. Any subscriber layer understanding the
/// `monotonic_counter.`, `counter.` and `histogram.` prefixes can export them.
#[macro_export]
macro_rules! metric {
    (counter [ $label: ident ] = $i: expr $(,$field: ident = $value: expr)*) => {
        $crate::service::tracing::debug!(monotonic_counter.$label = $i, $($field = $value),*)
    };
    (on none $e: expr => counter [ $label: ident ] = $i: expr $(,$field: ident = $value: expr)*) => {
        if $e.is_none() {
            $crate::service::tracing::debug!(counter.$label = $i, $($field = $value),*);
        }
    };
    (histogram [ $label: ident ] = $i: expr $(,$field: ident = $value: expr)*) => {
        $crate::service::tracing::debug!(histogram.$label = $i as f64, $($field = $value),*)
    };
}
