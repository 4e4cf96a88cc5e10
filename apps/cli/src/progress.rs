use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tubenotes_core::ProgressObserver;

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Progress bar advancing once per chunk summary, then spinning through the
/// final summary.
pub struct ChunkProgress {
    bar: ProgressBar,
    show_summaries: bool,
}

impl ChunkProgress {
    pub fn new(show_summaries: bool) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=> "),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Self {
            bar,
            show_summaries,
        }
    }

    pub fn finish(&self, msg: String) {
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .unwrap(),
        );
        self.bar.finish_with_message(msg);
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl ProgressObserver for ChunkProgress {
    fn on_chunked(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message("Summarizing chunks...");
    }

    fn on_chunk_summarized(&self, index: usize, total: usize, summary: &str) {
        if self.show_summaries {
            self.bar.println(format!(
                "{} {}\n{}\n",
                style(format!("[Chunk {}/{}]", index + 1, total)).cyan().bold(),
                style("summary").dim(),
                summary
            ));
        }
        self.bar.inc(1);
    }

    fn on_final_started(&self) {
        self.bar.set_message("Creating final summary...");
    }
}
