use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

pub struct StageSpinner {
    bar: Option<ProgressBar>,
    start: Instant,
    stage: u8,
    total_stages: u8,
    stage_start: Instant,
}

impl StageSpinner {
    pub fn new(total_stages: u8) -> Self {
        let now = Instant::now();
        Self {
            bar: None,
            start: now,
            stage: 0,
            total_stages,
            stage_start: now,
        }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn begin(&mut self, bar: ProgressBar, description: &str) {
        self.clear();
        self.stage += 1;
        self.stage_start = Instant::now();
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_prefix(format!("[{}/{}] {}", self.stage, self.total_stages, description));
        self.bar = Some(bar);
    }

    pub fn stage(&mut self, description: &str) {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {prefix}...") {
            bar.set_style(style.tick_chars(TICK_CHARS));
        }
        self.begin(bar, description);
    }

    pub fn counted_stage(&mut self, description: &str, total: u64) {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("  {spinner:.cyan} {prefix} {bar:24.cyan/blue} {pos}/{len} {msg}")
        {
            bar.set_style(style.tick_chars(TICK_CHARS).progress_chars("━╸─"));
        }
        self.begin(bar, description);
    }

    pub fn advance(&self, position: u64, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_position(position);
            bar.set_message(message.to_string());
        }
    }

    pub fn complete_stage(&mut self, description: &str, details: &[String]) {
        self.clear();
        let elapsed = self.stage_start.elapsed();
        let mut stderr = io::stderr().lock();

        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            description,
            elapsed.as_secs_f64()
        );
        for detail in details {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {}", detail);
        }
    }

    pub fn finish(mut self) {
        self.clear();
        print_footer(self.start.elapsed());
    }
}

fn print_footer(elapsed: Duration) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(
        stderr,
        "  \x1b[2m╺━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╸\x1b[0m"
    );
    let _ = writeln!(stderr);
    let _ = writeln!(
        stderr,
        "  \x1b[32m✓\x1b[0m Run complete {:>37}",
        format!("Total: {:.2}s", elapsed.as_secs_f64())
    );
    let _ = writeln!(stderr);
}

pub enum Progress {
    Interactive(StageSpinner),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool, total_stages: u8) -> Self {
        if interactive {
            Self::Interactive(StageSpinner::new(total_stages))
        } else {
            Self::Silent
        }
    }

    pub fn stage(&mut self, description: &str) {
        if let Self::Interactive(s) = self {
            s.stage(description);
        }
    }

    pub fn counted_stage(&mut self, description: &str, total: u64) {
        if let Self::Interactive(s) = self {
            s.counted_stage(description, total);
        }
    }

    pub fn advance(&self, position: u64, message: &str) {
        if let Self::Interactive(s) = self {
            s.advance(position, message);
        }
    }

    pub fn complete_stage(&mut self, description: &str, details: &[String]) {
        if let Self::Interactive(s) = self {
            s.complete_stage(description, details);
        }
    }

    pub fn finish(self) {
        if let Self::Interactive(s) = self {
            s.finish();
        }
    }
}
