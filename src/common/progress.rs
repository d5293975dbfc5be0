use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over one pair's subtitle entries.
pub fn create_bar(len: u64, message: String) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap()
            .progress_chars("=> "),
    );
    pb.set_message(message);
    pb
}
