use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner on stderr for a pending assistant call.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Clear the spinner line so the answer prints on a clean line.
pub fn clear_spinner(pb: &ProgressBar) {
    pb.finish_and_clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_spinner_returns_progress_bar() {
        let pb = create_spinner("thinking...");
        assert!(!pb.is_finished());
        pb.finish();
    }

    #[test]
    fn clear_spinner_completes() {
        let pb = create_spinner("thinking...");
        clear_spinner(&pb);
        assert!(pb.is_finished());
    }
}
