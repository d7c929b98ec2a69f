use indicatif::{ProgressBar, ProgressStyle};

/// Number of bar segments; each stands for one tenth of the expected bytes.
const BAR_SEGMENTS: u32 = 10;

fn bar_style(done: bool) -> ProgressStyle {
    let template = if done {
        format!("{{msg}}: [{{bar:{BAR_SEGMENTS}}}] {{pos}}/{{len}} => ✅ Done")
    } else {
        format!("{{msg}}: [{{bar:{BAR_SEGMENTS}}}] {{pos}}/{{len}}")
    };

    ProgressStyle::default_bar()
        .template(&template)
        .unwrap()
        .progress_chars("== ")
}

/// In-place progress bar for one episode transfer, labeled with the episode
/// title and showing the literal byte-count fraction.
pub fn episode_bar(title: &str, total_bytes: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);
    pb.set_style(bar_style(false));
    pb.set_message(title.to_string());
    pb
}

/// Print the final all-segments-filled line and stop in-place updates.
pub fn finish(pb: &ProgressBar) {
    pb.set_style(bar_style(true));
    pb.finish();
}

/// Emit only the completed line, for transfers that were skipped.
pub fn completed(title: &str, total_bytes: u64) {
    let pb = episode_bar(title, total_bytes);
    pb.set_position(total_bytes);
    finish(&pb);
}
